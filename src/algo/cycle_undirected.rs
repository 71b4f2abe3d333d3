use super::{cycle::*, *};

#[derive(Debug, Clone, Copy)]
struct Frame {
    vertex: VertexId,
    parent: Option<VertexId>,
    next: usize,
}

/// DFS on the simple undirected view of the graph: directions are ignored and parallel edges
/// are merged into the first of them.
pub(super) struct UndirectedCycleSearch<'a> {
    graph: &'a Graph,
    recorder: TraceRecorder,
    /// `(neighbor, representative graph edge)` per vertex, in edge insertion order
    neighbors: Vec<Vec<(VertexId, usize)>>,
    parent: Vec<Option<(VertexId, usize)>>,
    stack: Vec<Frame>,
}

impl<'a> UndirectedCycleSearch<'a> {
    pub(super) fn new(graph: &'a Graph) -> Self {
        let (unique, mapping) = graph.deduplicated_edges();

        let mut seen = vec![false; unique.len()];
        let mut neighbors = vec![Vec::new(); graph.len()];
        for (idx, edge) in graph.edges().iter().enumerate() {
            if std::mem::replace(&mut seen[mapping[idx]], true) {
                continue;
            }

            let (u, v) = edge.endpoints();
            neighbors[u as usize].push((v, idx));
            if !edge.is_loop() {
                neighbors[v as usize].push((u, idx));
            }
        }

        Self {
            graph,
            recorder: TraceRecorder::deduplicated(graph),
            neighbors,
            parent: vec![None; graph.len()],
            stack: Vec::new(),
        }
    }

    pub(super) fn run(mut self) -> AlgorithmResult {
        debug!(
            vertices = self.graph.number_of_vertices(),
            edges = self.graph.number_of_edges(),
            "undirected cycle detection"
        );

        self.recorder
            .record("Starting undirected cycle detection: all vertices are unvisited");

        for root in self.graph.vertex_ids() {
            if self.recorder.vertex_state(root) != VertexState::Unvisited {
                continue;
            }

            let label = self.recorder.label(root).to_owned();
            self.enter(root, None, format!("Start a new search at {label}"));

            if let Some((u, v, edge)) = self.search() {
                let (cycle, mut cycle_edges) = reconstruct_cycle(&self.parent, u, v);
                cycle_edges.push(edge);
                return report_cycle(self.recorder, cycle, &cycle_edges, u);
            }
        }

        report_no_cycle(self.recorder)
    }

    fn enter(&mut self, u: VertexId, parent: Option<VertexId>, description: String) {
        self.recorder.set_vertex_state(u, VertexState::Visiting);
        self.recorder.record(description).at(u);
        self.stack.push(Frame {
            vertex: u,
            parent,
            next: 0,
        });
    }

    fn edge_name(&self, u: VertexId, v: VertexId) -> String {
        format!("{} - {}", self.recorder.label(u), self.recorder.label(v))
    }

    /// Runs the DFS until the stack is empty or an edge to an already visited vertex other than
    /// the parent is found, which is returned as `(u, v, edge)`.
    fn search(&mut self) -> Option<(VertexId, VertexId, usize)> {
        while let Some(frame) = self.stack.last_mut() {
            let Frame { vertex: u, parent, next } = *frame;

            let Some(&(v, edge)) = self.neighbors[u as usize].get(next) else {
                self.stack.pop();
                self.recorder.set_vertex_state(u, VertexState::Visited);
                let description = format!(
                    "Finished {}: all of its edges are explored",
                    self.recorder.label(u)
                );
                self.recorder.record(description).at(u);
                continue;
            };
            frame.next += 1;

            if parent == Some(v) {
                let previous = self.recorder.edge_state(edge);
                self.recorder.set_edge_state(edge, EdgeState::Back);
                let description =
                    format!("Skip {}: it leads back to the parent", self.edge_name(u, v));
                self.recorder.record(description).at(u);
                self.recorder.set_edge_state(edge, previous);
                continue;
            }

            self.recorder.set_edge_state(edge, EdgeState::Discovery);
            let description = format!("Examine edge {}", self.edge_name(u, v));
            self.recorder.record(description).at(u);

            if self.recorder.vertex_state(v) != VertexState::Unvisited {
                debug_assert_eq!(self.recorder.vertex_state(v), VertexState::Visiting);
                return Some((u, v, edge));
            }

            self.recorder.set_edge_state(edge, EdgeState::Tree);
            self.parent[v as usize] = Some((u, edge));
            let description = format!("Visit {}", self.recorder.label(v));
            self.enter(v, Some(u), description);
        }

        None
    }
}
