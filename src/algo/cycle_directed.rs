use super::{cycle::*, *};

/// Stack frame of the iterative DFS: a vertex and the index of its next out-edge to examine
#[derive(Debug, Clone, Copy)]
struct Frame {
    vertex: VertexId,
    next: usize,
}

/// Three-color DFS. The colors live in the recorder as vertex states:
/// `Unvisited` (white), `Visiting` (gray, on the stack) and `Visited` (black).
pub(super) struct DirectedCycleSearch<'a> {
    graph: &'a Graph,
    recorder: TraceRecorder,
    parent: Vec<Option<(VertexId, usize)>>,
    stack: Vec<Frame>,
}

impl<'a> DirectedCycleSearch<'a> {
    pub(super) fn new(graph: &'a Graph) -> Self {
        Self {
            graph,
            recorder: TraceRecorder::new(graph),
            parent: vec![None; graph.len()],
            stack: Vec::new(),
        }
    }

    pub(super) fn run(mut self) -> AlgorithmResult {
        debug!(
            vertices = self.graph.number_of_vertices(),
            edges = self.graph.number_of_edges(),
            "directed cycle detection"
        );

        self.recorder
            .record("Starting directed cycle detection: all vertices are unvisited");

        for root in self.graph.vertex_ids() {
            if self.recorder.vertex_state(root) != VertexState::Unvisited {
                continue;
            }

            let label = self.recorder.label(root).to_owned();
            self.enter(root, format!("Start a new search at {label}"));

            if let Some((u, v, edge)) = self.search() {
                let (cycle, mut cycle_edges) = reconstruct_cycle(&self.parent, u, v);
                cycle_edges.push(edge);
                return report_cycle(self.recorder, cycle, &cycle_edges, u);
            }
        }

        report_no_cycle(self.recorder)
    }

    fn enter(&mut self, u: VertexId, description: String) {
        self.recorder.set_vertex_state(u, VertexState::Visiting);
        self.recorder.record(description).at(u);
        self.stack.push(Frame { vertex: u, next: 0 });
    }

    /// Runs the DFS until the stack is empty or an edge into a gray vertex is found.
    /// In the latter case returns `(u, v, edge)` for the closing edge `u -> v`.
    fn search(&mut self) -> Option<(VertexId, VertexId, usize)> {
        while let Some(frame) = self.stack.last_mut() {
            let u = frame.vertex;

            let Some((v, edge)) = self.graph.out_edge_at(u, frame.next) else {
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

            self.recorder.set_edge_state(edge, EdgeState::Discovery);
            let description = format!("Examine edge {}", self.recorder.describe(&[u, v]));
            self.recorder.record(description).at(u);

            match self.recorder.vertex_state(v) {
                VertexState::Unvisited => {
                    self.recorder.set_edge_state(edge, EdgeState::Tree);
                    self.parent[v as usize] = Some((u, edge));
                    let description = format!("Visit {}", self.recorder.label(v));
                    self.enter(v, description);
                }
                VertexState::Visiting => return Some((u, v, edge)),
                _ => {
                    self.recorder.set_edge_state(edge, EdgeState::Cross);
                    let description = format!(
                        "{} is already finished: {} is a cross edge",
                        self.recorder.label(v),
                        self.recorder.describe(&[u, v])
                    );
                    self.recorder.record(description).at(u);
                }
            }
        }

        None
    }
}
