use serde::{Deserialize, Serialize};

use crate::{
    error::{GraphError, Result},
    graph::Graph,
    vertex::Position,
};

/// Number of simulation rounds unless configured otherwise
pub const DEFAULT_ITERATIONS: usize = 50;

/// Maximum distance a vertex may travel in one round
pub const MAX_DISPLACEMENT: f64 = 10.0;

/// Distances below this value are treated as this value
pub const MIN_DISTANCE: f64 = 0.1;

/// Initial value of the cooling factor, which then decreases linearly to `0`
const COOLING: f64 = 0.9;

/// Force-directed layout in the style of Fruchterman and Reingold.
///
/// With optimal distance `k = sqrt(usable_area / n)`, every unordered pair of vertices repels with
/// force `k^2 / d` and every edge attracts its endpoints with force `d^2 / k`. In round `i` of `t`,
/// the summed displacement of a vertex is scaled by `0.9 * (1 - i / t)`, clamped to a length of
/// [`MAX_DISPLACEMENT`], and the resulting position is clamped into
/// `[margin, width - margin] x [margin, height - margin]`.
///
/// The simulation has no randomness: equal inputs give bit-identical outputs.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForceLayout {
    iterations: usize,
    width: f64,
    height: f64,
    margin: f64,
}

impl Default for ForceLayout {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            width: 800.0,
            height: 600.0,
            margin: 50.0,
        }
    }
}

impl ForceLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of simulation rounds
    pub fn iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Sets the drawing area `(width, height)`
    pub fn bounds(mut self, (width, height): (f64, f64)) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Sets the distance kept from every border
    pub fn margin(mut self, margin: f64) -> Self {
        self.margin = margin;
        self
    }

    /// Checks that the margin leaves a non-empty drawing area
    pub fn validate(&self) -> Result<()> {
        let usable = (self.width - 2.0 * self.margin, self.height - 2.0 * self.margin);
        if self.margin < 0.0 || !(usable.0 > 0.0 && usable.1 > 0.0) {
            return Err(GraphError::InvalidBounds {
                width: self.width,
                height: self.height,
                margin: self.margin,
            });
        }
        Ok(())
    }

    fn corners(&self) -> (Position, Position) {
        (
            Position::new(self.margin, self.margin),
            Position::new(self.width - self.margin, self.height - self.margin),
        )
    }

    /// Runs the simulation starting from the current vertex positions and returns the final
    /// position of every vertex (index == id).
    /// ** Panics in debug builds if the bounds are invalid (see [`ForceLayout::validate`]) **
    pub fn positions(&self, graph: &Graph) -> Vec<Position> {
        debug_assert!(self.validate().is_ok(), "invalid layout bounds: {self:?}");

        let n = graph.len();
        let (min, max) = self.corners();
        let mut positions = graph.positions();
        if n == 0 {
            return positions;
        }

        let usable_area = (max.x - min.x) * (max.y - min.y);
        let k = (usable_area / n as f64).sqrt();

        let mut disp = vec![Position::ORIGIN; n];
        for iter in 0..self.iterations {
            disp.fill(Position::ORIGIN);

            for i in 0..n {
                for j in (i + 1)..n {
                    let (direction, distance) = separation(positions[i], positions[j], j);
                    let push = direction * (k * k / distance);
                    disp[i] += push;
                    disp[j] -= push;
                }
            }

            for edge in graph.edges().iter().filter(|e| !e.is_loop()) {
                let (u, v) = (edge.from as usize, edge.to as usize);
                let (direction, distance) = separation(positions[u], positions[v], v);
                let pull = direction * (distance * distance / k);
                disp[u] -= pull;
                disp[v] += pull;
            }

            let cooling = COOLING * (1.0 - iter as f64 / self.iterations as f64);
            for (p, &d) in positions.iter_mut().zip(&disp) {
                let mut step = d * cooling;
                let length = step.length();
                if length > MAX_DISPLACEMENT {
                    step = step * (MAX_DISPLACEMENT / length);
                }
                *p = (*p + step).clamp(min, max);
            }
        }

        positions.into_iter().map(|p| p.clamp(min, max)).collect()
    }

    /// Returns a copy of `graph` with the simulated positions
    pub fn apply(&self, graph: &Graph) -> Graph {
        graph.with_positions(&self.positions(graph))
    }
}

/// Unit direction from `b` to `a` and their distance (at least [`MIN_DISTANCE`]).
/// Coincident points are pushed apart along a fixed direction derived from `salt`.
fn separation(a: Position, b: Position, salt: usize) -> (Position, f64) {
    let delta = a - b;
    let length = delta.length();
    if length > 0.0 {
        let distance = length.max(MIN_DISTANCE);
        (delta / length, distance)
    } else {
        let angle = salt as f64;
        (Position::new(angle.cos(), angle.sin()), MIN_DISTANCE)
    }
}

/// Shorthand for `ForceLayout::new().iterations(..).bounds(..).margin(..).positions(graph)`
pub fn layout_force_directed(
    graph: &Graph,
    iterations: usize,
    bounds: (f64, f64),
    margin: f64,
) -> Vec<Position> {
    ForceLayout::new()
        .iterations(iterations)
        .bounds(bounds)
        .margin(margin)
        .positions(graph)
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    use super::*;
    use crate::{gens::RandomGraphGenerator, layout::CircleLayout};

    fn in_bounds(positions: &[Position], (w, h): (f64, f64), margin: f64) -> bool {
        positions.iter().all(|p| {
            p.x >= margin && p.x <= w - margin && p.y >= margin && p.y <= h - margin
        })
    }

    #[test]
    fn deterministic_and_bounded() {
        for seed in 0..5 {
            let graph = RandomGraphGenerator::new()
                .vertices(12)
                .prob(0.2)
                .generate(&mut Pcg64Mcg::seed_from_u64(seed));

            let first = layout_force_directed(&graph, 50, (640.0, 480.0), 40.0);
            let second = layout_force_directed(&graph, 50, (640.0, 480.0), 40.0);

            assert_eq!(first, second);
            assert!(in_bounds(&first, (640.0, 480.0), 40.0));
        }
    }

    #[test]
    fn known_positions_of_a_path() {
        let graph = Graph::from_edges(3, false, [(0, 1), (1, 2)]).with_positions(&[
            Position::new(200.0, 300.0),
            Position::new(400.0, 250.0),
            Position::new(650.0, 350.0),
        ]);
        let positions = ForceLayout::new().iterations(10).positions(&graph);

        let expected = [
            (100.521054817, 302.990338730),
            (439.622912209, 186.156528725),
            (747.786087885, 369.610460079),
        ];
        for (p, (x, y)) in positions.iter().zip(expected) {
            assert!((p.x - x).abs() < 1e-6 && (p.y - y).abs() < 1e-6, "{p:?}");
        }
    }

    #[test]
    fn input_is_not_mutated() {
        let graph = Graph::from_edges(3, true, [(0, 1), (1, 2)])
            .with_positions(&CircleLayout::new().positions(3));
        let before = graph.positions();

        let moved = ForceLayout::new().apply(&graph);

        assert_eq!(graph.positions(), before);
        assert_ne!(moved.positions(), before);
        assert_eq!(moved.edges(), graph.edges());
    }

    #[test]
    fn coincident_vertices_separate() {
        let graph = Graph::new(3, false).with_positions(&[Position::new(400.0, 300.0); 3]);
        let positions = ForceLayout::new().positions(&graph);

        for i in 0..3 {
            for j in (i + 1)..3 {
                assert!(positions[i].distance_to(positions[j]) > 1.0);
            }
        }
        assert!(positions.iter().all(|p| p.x.is_finite() && p.y.is_finite()));
    }

    #[test]
    fn edges_pull_endpoints_together() {
        // two far apart pairs, only one of them connected
        let graph = Graph::from_edges(4, false, [(0, 1)]).with_positions(&[
            Position::new(100.0, 100.0),
            Position::new(700.0, 500.0),
            Position::new(100.0, 500.0),
            Position::new(700.0, 100.0),
        ]);
        let positions = ForceLayout::new().iterations(100).positions(&graph);

        assert!(positions[0].distance_to(positions[1]) < positions[2].distance_to(positions[3]));
    }

    #[test]
    fn steps_are_clamped() {
        let graph = Graph::from_edges(2, false, [(0, 1)]).with_positions(&[
            Position::new(100.0, 300.0),
            Position::new(700.0, 300.0),
        ]);
        let positions = ForceLayout::new().iterations(1).positions(&graph);

        // one round moves each vertex by at most `MAX_DISPLACEMENT`
        for (before, after) in graph.positions().iter().zip(&positions) {
            assert!(before.distance_to(*after) <= MAX_DISPLACEMENT + 1e-9);
        }
    }

    #[test]
    fn zero_iterations_only_clamp() {
        let graph = Graph::new(2, true)
            .with_positions(&[Position::new(-5.0, 10.0), Position::new(300.0, 300.0)]);
        let positions = ForceLayout::new().iterations(0).positions(&graph);
        assert_eq!(positions, vec![Position::new(50.0, 50.0), Position::new(300.0, 300.0)]);
    }

    #[test]
    fn invalid_bounds() {
        assert!(ForceLayout::new().validate().is_ok());
        assert!(matches!(
            ForceLayout::new().bounds((100.0, 100.0)).margin(50.0).validate(),
            Err(GraphError::InvalidBounds { .. })
        ));
    }
}
