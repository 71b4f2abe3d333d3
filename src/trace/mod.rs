/*!
# Traces

A *trace* is the ordered list of [`Step`]s one algorithm run produces. Every step is a complete,
independently renderable copy of the graph state: seeking to step `i` is an index operation and
playing backwards needs no replay.

Steps are produced by a [`TraceRecorder`] and handed out inside an [`AlgorithmResult`]; a
[`TracePlayer`] moves a cursor over them.
*/

mod player;
mod recorder;

pub use player::*;
pub use recorder::*;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::{edge::Edge, vertex::*};

/// One immutable snapshot of the whole graph plus a narration of what just happened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub vertices: Vec<Vertex>,
    pub edges: Vec<Edge>,
    pub description: String,
    /// Vertex the algorithm is looking at
    pub current_vertex: Option<VertexId>,
    /// Cycle discovered so far (cycle detection)
    pub cycle_path: Option<Vec<VertexId>>,
    /// Path assembled so far (Eulerian path search)
    pub path: Option<Vec<VertexId>>,
}

impl Step {
    /// Sets the vertex the step is focused on
    pub fn at(&mut self, u: VertexId) -> &mut Self {
        self.current_vertex = Some(u);
        self
    }

    /// Attaches a discovered cycle
    pub fn with_cycle(&mut self, cycle: Vec<VertexId>) -> &mut Self {
        self.cycle_path = Some(cycle);
        self
    }

    /// Attaches a (partial) path
    pub fn with_path(&mut self, path: Vec<VertexId>) -> &mut Self {
        self.path = Some(path);
        self
    }

    /// State of vertex `u` in this snapshot
    pub fn vertex_state(&self, u: VertexId) -> VertexState {
        self.vertices[u as usize].state
    }
}

/// Outcome of one algorithm invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlgorithmResult {
    pub found: bool,
    /// The detected cycle or the Eulerian path, in traversal order
    pub path_or_cycle: Option<Vec<VertexId>>,
    pub steps: Vec<Step>,
}

impl AlgorithmResult {
    /// The terminal step, which narrates the outcome
    pub fn last_step(&self) -> Option<&Step> {
        self.steps.last()
    }

    /// Number of recorded steps
    pub fn number_of_steps(&self) -> usize {
        self.steps.len()
    }
}

/// Joins the labels of `path` for narration, e.g. `A -> B -> C`
pub(crate) fn describe_path(vertices: &[Vertex], path: &[VertexId]) -> String {
    path.iter()
        .map(|&u| vertices[u as usize].label.as_str())
        .join(" -> ")
}
