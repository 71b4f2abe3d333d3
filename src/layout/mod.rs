/*!
# Layout

Assigns 2D coordinates to vertices so that a renderer can draw them legibly.

- [`CircleLayout`] places vertices evenly on a circle. It is deterministic and used as the initial
  placement of every generated graph.
- [`ForceLayout`] refines existing positions with a force-directed simulation
  (Fruchterman-Reingold style). It is a pure transformation: the input graph is left untouched.

```
use graph_trace::{prelude::*, layout::*};

let graph = Graph::from_edges(4, false, [(0, 1), (1, 2), (2, 3)])
    .with_positions(&CircleLayout::new().positions(4));

let positions = layout_force_directed(&graph, 50, (800.0, 600.0), 50.0);
assert!(positions.iter().all(|p| (50.0..=750.0).contains(&p.x) && (50.0..=550.0).contains(&p.y)));
```
*/

mod force;

pub use force::*;

use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

use crate::vertex::Position;

/// Evenly distributes vertices on a circle, starting at angle `0` and going counter-clockwise
/// (in a y-down coordinate system: clockwise).
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CircleLayout {
    radius: f64,
    center: Position,
}

impl Default for CircleLayout {
    fn default() -> Self {
        Self {
            radius: 200.0,
            center: Position::new(400.0, 300.0),
        }
    }
}

impl CircleLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the radius of the circle
    pub fn radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    /// Sets the center of the circle
    pub fn center<P: Into<Position>>(mut self, center: P) -> Self {
        self.center = center.into();
        self
    }

    /// Position of vertex `i` out of `n`, placed at angle `2 * pi * i / n`
    pub fn position_of(&self, i: usize, n: usize) -> Position {
        let angle = TAU * i as f64 / n as f64;
        self.center + Position::new(angle.cos(), angle.sin()) * self.radius
    }

    /// Positions of all `n` vertices
    pub fn positions(&self, n: usize) -> Vec<Position> {
        (0..n).map(|i| self.position_of(i, n)).collect()
    }
}
