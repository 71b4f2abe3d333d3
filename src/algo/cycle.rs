use super::*;

/// Cycle detection with a recorded trace.
///
/// Both variants stop at the first cycle they encounter and report it as the list of vertices
/// from the first vertex of the cycle (the one closing it) along the search tree to the vertex
/// the closing edge starts from. The closing edge from the last back to the first vertex is
/// implied.
pub trait CycleDetection {
    /// Three-color DFS over the out-edges (see [`Graph::out_edges_of`]).
    fn detect_directed_cycle(&self) -> AlgorithmResult;

    /// DFS that ignores edge directions and skips the edge back to the parent.
    /// Parallel edges are merged before the search.
    fn detect_undirected_cycle(&self) -> AlgorithmResult;
}

impl CycleDetection for Graph {
    fn detect_directed_cycle(&self) -> AlgorithmResult {
        super::cycle_directed::DirectedCycleSearch::new(self).run()
    }

    fn detect_undirected_cycle(&self) -> AlgorithmResult {
        super::cycle_undirected::UndirectedCycleSearch::new(self).run()
    }
}

/// Runs the directed or the undirected cycle detection on `graph`.
///
/// The flag selects the variant independently of [`Graph::is_directed`]: running the directed
/// variant on an undirected graph sees every edge in both directions (and thus a cycle of length
/// two for every edge).
///
/// ```
/// use graph_trace::{prelude::*, algo::*};
///
/// // A -> B -> C -> A
/// let graph = Graph::from_edges(3, true, [(0, 1), (1, 2), (2, 0)]);
/// let result = detect_cycle(&graph, true);
///
/// assert!(result.found);
/// assert_eq!(result.path_or_cycle, Some(vec![0, 1, 2]));
/// assert!(result.last_step().unwrap().description.starts_with("Cycle detected"));
/// ```
pub fn detect_cycle(graph: &Graph, directed: bool) -> AlgorithmResult {
    if directed {
        graph.detect_directed_cycle()
    } else {
        graph.detect_undirected_cycle()
    }
}

/// Walks `parent` from `from` up to `to` and returns the vertices in the order `to ..= from`
/// together with the tree edges between them, in the same order: `edges[i]` joins `cycle[i]`
/// and `cycle[i + 1]`.
pub(super) fn reconstruct_cycle(
    parent: &[Option<(VertexId, usize)>],
    from: VertexId,
    to: VertexId,
) -> (Vec<VertexId>, Vec<usize>) {
    let mut cycle = vec![from];
    let mut edges = Vec::new();

    let mut current = from;
    while current != to {
        let Some((p, edge)) = parent[current as usize] else {
            debug_assert!(false, "{to} is not an ancestor of {from}");
            break;
        };
        cycle.push(p);
        edges.push(edge);
        current = p;
    }

    cycle.reverse();
    edges.reverse();
    (cycle, edges)
}

/// Highlights the cycle and its edges and records the terminal step
pub(super) fn report_cycle(
    mut recorder: TraceRecorder,
    cycle: Vec<VertexId>,
    cycle_edges: &[usize],
    current: VertexId,
) -> AlgorithmResult {
    for &u in &cycle {
        recorder.set_vertex_state(u, VertexState::Highlighted);
    }
    for &edge in cycle_edges {
        recorder.set_edge_state(edge, EdgeState::Cycle);
    }

    let description = format!(
        "Cycle detected: {} -> {}",
        recorder.describe(&cycle),
        recorder.label(cycle[0])
    );
    recorder
        .record(description)
        .at(current)
        .with_cycle(cycle.clone());

    debug!(cycle = ?cycle, steps = recorder.len(), "cycle detected");
    recorder.finish(true, Some(cycle))
}

/// Records the terminal step of an unsuccessful search
pub(super) fn report_no_cycle(mut recorder: TraceRecorder) -> AlgorithmResult {
    recorder.record("No cycle found: every vertex has been explored");
    debug!(steps = recorder.len(), "no cycle found");
    recorder.finish(false, None)
}
