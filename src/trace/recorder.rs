use tracing::trace;

use super::*;
use crate::{edge::EdgeState, graph::Graph};

/// Working copy of the graph state from which snapshots are taken.
///
/// Algorithms change vertex and edge states on the recorder between calls to
/// [`TraceRecorder::record`]; each call clones the current buffers into a fresh [`Step`], so no
/// step ever shares state with a later change.
///
/// Edge indices passed to the recorder always refer to [`Graph::edges`]. In deduplicated mode
/// several graph edges can map onto the same displayed edge.
#[derive(Debug, Clone)]
pub struct TraceRecorder {
    vertices: Vec<Vertex>,
    edges: Vec<Edge>,
    edge_map: Vec<usize>,
    steps: Vec<Step>,
}

impl TraceRecorder {
    /// Records all edges of `graph` as they are
    pub fn new(graph: &Graph) -> Self {
        let edges = graph.edges().to_vec();
        let edge_map = (0..edges.len()).collect();
        Self::with_edges(graph, edges, edge_map)
    }

    /// Records one edge per unordered endpoint pair
    pub fn deduplicated(graph: &Graph) -> Self {
        let (edges, edge_map) = graph.deduplicated_edges();
        Self::with_edges(graph, edges, edge_map)
    }

    fn with_edges(graph: &Graph, edges: Vec<Edge>, edge_map: Vec<usize>) -> Self {
        Self {
            vertices: graph
                .vertices()
                .iter()
                .map(|v| v.with_state(VertexState::Unvisited))
                .collect(),
            edges: edges
                .iter()
                .map(|e| e.with_state(EdgeState::Normal))
                .collect(),
            edge_map,
            steps: Vec::new(),
        }
    }

    /// Label of vertex `u`
    pub fn label(&self, u: VertexId) -> &str {
        &self.vertices[u as usize].label
    }

    /// Narration of a vertex sequence, e.g. `A -> B -> C`
    pub fn describe(&self, path: &[VertexId]) -> String {
        describe_path(&self.vertices, path)
    }

    pub fn vertex_state(&self, u: VertexId) -> VertexState {
        self.vertices[u as usize].state
    }

    pub fn set_vertex_state(&mut self, u: VertexId, state: VertexState) {
        self.vertices[u as usize].state = state;
    }

    /// State of the displayed edge representing graph edge `edge`
    pub fn edge_state(&self, edge: usize) -> EdgeState {
        self.edges[self.edge_map[edge]].state
    }

    /// Number of edges of the recorded graph (not of the displayed edge list)
    pub fn number_of_graph_edges(&self) -> usize {
        self.edge_map.len()
    }

    /// Changes the displayed edge representing graph edge `edge`
    pub fn set_edge_state(&mut self, edge: usize, state: EdgeState) {
        self.edges[self.edge_map[edge]].state = state;
    }

    /// Snapshots the current state. The returned step can still be annotated.
    pub fn record<S: Into<String>>(&mut self, description: S) -> &mut Step {
        let description = description.into();
        trace!(step = self.steps.len(), description = %description, "recorded step");

        self.steps.push(Step {
            vertices: self.vertices.clone(),
            edges: self.edges.clone(),
            description,
            current_vertex: None,
            cycle_path: None,
            path: None,
        });

        let last = self.steps.len() - 1;
        &mut self.steps[last]
    }

    /// Number of steps recorded so far
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Consumes the recorder and packs the trace into a result
    pub fn finish(self, found: bool, path_or_cycle: Option<Vec<VertexId>>) -> AlgorithmResult {
        AlgorithmResult {
            found,
            path_or_cycle,
            steps: self.steps,
        }
    }
}
