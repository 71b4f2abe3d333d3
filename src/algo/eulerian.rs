/*!
Eulerian paths via Hierholzer's algorithm.

Before walking anything the degrees are checked: a directed graph needs `|out - in| <= 1`
everywhere with at most one vertex of each surplus sign, an undirected graph needs zero or two
vertices of odd degree. The degree check is necessary but not sufficient, so after the walk we
verify that every edge was consumed; leftover edges mean the edges span several components.
*/

use std::collections::VecDeque;

use itertools::Itertools;

use super::*;

/// Reason why the degrees of a graph rule out an Eulerian path.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DegreeImbalance {
    #[error("the graph has no edges")]
    NoEdges,
    #[error("vertices {0:?} have |out - in| > 1")]
    Unbalanced(Vec<VertexId>),
    #[error("vertices {0:?} all have one more outgoing than incoming edge")]
    MultipleStarts(Vec<VertexId>),
    #[error("vertices {0:?} have odd degree")]
    TooManyOddVertices(Vec<VertexId>),
}

impl DegreeImbalance {
    /// Vertices that violate the degree condition
    pub fn offenders(&self) -> &[VertexId] {
        match self {
            Self::NoEdges => &[],
            Self::Unbalanced(vs)
            | Self::MultipleStarts(vs)
            | Self::TooManyOddVertices(vs) => vs,
        }
    }

    fn narrate(&self, recorder: &TraceRecorder) -> String {
        let labels = self
            .offenders()
            .iter()
            .map(|&u| recorder.label(u))
            .join(", ");

        match self {
            Self::NoEdges => "the graph has no edges".to_owned(),
            Self::Unbalanced(_) => {
                format!("in- and out-degree differ by more than one at {labels}")
            }
            Self::MultipleStarts(_) => {
                format!("more than one vertex has out-degree = in-degree + 1 ({labels})")
            }
            Self::TooManyOddVertices(_) => {
                format!("more than two vertices have odd degree ({labels})")
            }
        }
    }
}

/// Checks the degree condition and returns the vertex an Eulerian path has to start at.
///
/// Directed graphs start at the unique vertex with `out - in == 1`, undirected graphs at the
/// first vertex of odd degree. If there is none, the first vertex with an edge is used.
///
/// ```
/// use graph_trace::{prelude::*, algo::*};
///
/// let graph = Graph::from_edges(3, true, [(1, 0), (0, 2)]);
/// assert_eq!(eulerian_start(&graph), Ok(1));
///
/// let fork = Graph::from_edges(3, true, [(0, 1), (0, 2)]);
/// assert_eq!(eulerian_start(&fork), Err(DegreeImbalance::Unbalanced(vec![0])));
/// ```
pub fn eulerian_start(graph: &Graph) -> Result<VertexId, DegreeImbalance> {
    if graph.number_of_edges() == 0 {
        return Err(DegreeImbalance::NoEdges);
    }

    if graph.is_directed() {
        directed_start(graph)
    } else {
        undirected_start(graph)
    }
}

fn directed_start(graph: &Graph) -> Result<VertexId, DegreeImbalance> {
    let in_degs = graph.in_degrees();
    let surplus = |u: VertexId| graph.out_degree_of(u) as i64 - in_degs[u as usize] as i64;

    let unbalanced = graph
        .vertex_ids()
        .filter(|&u| surplus(u).abs() > 1)
        .collect_vec();
    if !unbalanced.is_empty() {
        return Err(DegreeImbalance::Unbalanced(unbalanced));
    }

    // the surpluses sum up to zero, so there are as many ends as starts
    let starts = graph.vertex_ids().filter(|&u| surplus(u) == 1).collect_vec();
    if starts.len() > 1 {
        return Err(DegreeImbalance::MultipleStarts(starts));
    }

    starts
        .first()
        .copied()
        .or_else(|| graph.vertex_ids().find(|&u| graph.out_degree_of(u) > 0))
        .ok_or(DegreeImbalance::NoEdges)
}

fn undirected_start(graph: &Graph) -> Result<VertexId, DegreeImbalance> {
    let degrees = undirected_degrees(graph);

    let odd = graph
        .vertex_ids()
        .filter(|&u| degrees[u as usize] % 2 == 1)
        .collect_vec();
    if odd.len() > 2 {
        return Err(DegreeImbalance::TooManyOddVertices(odd));
    }

    odd.first()
        .copied()
        .or_else(|| graph.vertex_ids().find(|&u| degrees[u as usize] > 0))
        .ok_or(DegreeImbalance::NoEdges)
}

/// A loop adds two to the degree of its vertex
fn undirected_degrees(graph: &Graph) -> Vec<NumVertices> {
    let mut degrees = vec![0; graph.len()];
    for edge in graph.edges() {
        degrees[edge.from as usize] += 1;
        degrees[edge.to as usize] += 1;
    }
    degrees
}

/// Eulerian path search with a recorded trace.
///
/// On success the path lists the vertices in walking order. A circuit does not repeat its start
/// vertex at the end, so a directed cycle on `N` vertices yields `N` vertices and an open trail
/// over `E` edges yields `E + 1`.
pub trait EulerianPath {
    /// Every adjacency entry is an arc: a bidirectional edge of a directed graph can be walked
    /// once in each direction and has to be.
    fn find_directed_eulerian_path(&self) -> AlgorithmResult;

    /// Every edge is walked exactly once, in either direction.
    fn find_undirected_eulerian_path(&self) -> AlgorithmResult;
}

impl EulerianPath for Graph {
    fn find_directed_eulerian_path(&self) -> AlgorithmResult {
        debug!(
            vertices = self.number_of_vertices(),
            edges = self.number_of_edges(),
            "directed Eulerian path search"
        );

        let mut recorder = TraceRecorder::new(self);
        recorder.record("Starting Eulerian path search on a directed graph");

        let in_degs = self.in_degrees();
        let degrees = self
            .vertex_ids()
            .map(|u| {
                format!(
                    "{} (in {}, out {})",
                    recorder.label(u),
                    in_degs[u as usize],
                    self.out_degree_of(u)
                )
            })
            .join(", ");
        recorder.record(format!("Degree check: {degrees}"));

        let start = match eulerian_start(self) {
            Ok(start) => start,
            Err(imbalance) => return report_imbalance(recorder, &imbalance),
        };

        let mut remaining: Vec<VecDeque<(VertexId, usize)>> = self
            .vertex_ids()
            .map(|u| self.out_edges_of(u).collect())
            .collect();
        let arcs = remaining.iter().map(VecDeque::len).sum();

        let path = walk_trail(&mut recorder, start, " -> ", |u| {
            remaining[u as usize].pop_front()
        });

        report_trail(recorder, path, arcs)
    }

    fn find_undirected_eulerian_path(&self) -> AlgorithmResult {
        debug!(
            vertices = self.number_of_vertices(),
            edges = self.number_of_edges(),
            "undirected Eulerian path search"
        );

        let mut recorder = TraceRecorder::new(self);
        recorder.record("Starting Eulerian path search on an undirected graph");

        let degrees = undirected_degrees(self)
            .into_iter()
            .enumerate()
            .map(|(u, d)| format!("{} (degree {d})", recorder.label(u as VertexId)))
            .join(", ");
        recorder.record(format!("Degree check: {degrees}"));

        let start = match eulerian_start(self) {
            Ok(start) => start,
            Err(imbalance) => return report_imbalance(recorder, &imbalance),
        };

        let mut remaining: Vec<VecDeque<(VertexId, usize)>> = self
            .vertex_ids()
            .map(|u| self.out_edges_of(u).collect())
            .collect();
        let mut used = vec![false; self.edges().len()];

        let path = walk_trail(&mut recorder, start, " - ", |u| {
            while let Some((v, edge)) = remaining[u as usize].pop_front() {
                if !std::mem::replace(&mut used[edge], true) {
                    return Some((v, edge));
                }
            }
            None
        });

        report_trail(recorder, path, self.edges().len())
    }
}

/// Runs [`EulerianPath::find_directed_eulerian_path`] or
/// [`EulerianPath::find_undirected_eulerian_path`] depending on [`Graph::is_directed`].
///
/// ```
/// use graph_trace::{prelude::*, algo::*};
///
/// // A -> B, B -> C, C -> D, D -> B
/// let graph = Graph::from_edges(4, true, [(0, 1), (1, 2), (2, 3), (3, 1)]);
/// let result = find_eulerian_path(&graph);
///
/// assert!(result.found);
/// assert_eq!(result.path_or_cycle, Some(vec![0, 1, 2, 3, 1]));
/// ```
pub fn find_eulerian_path(graph: &Graph) -> AlgorithmResult {
    if graph.is_directed() {
        graph.find_directed_eulerian_path()
    } else {
        graph.find_undirected_eulerian_path()
    }
}

/// Hierholzer's algorithm: follows unused edges from the top of the stack until it gets stuck,
/// then moves the stuck vertex onto the trail. `next_edge(u)` consumes and returns the next
/// unused edge leaving `u`.
///
/// Returns the trail in walking order.
fn walk_trail<F>(
    recorder: &mut TraceRecorder,
    start: VertexId,
    separator: &str,
    mut next_edge: F,
) -> Vec<VertexId>
where
    F: FnMut(VertexId) -> Option<(VertexId, usize)>,
{
    let mut stack = vec![start];
    let mut trail = Vec::new();
    let mut last_edge = None;

    recorder.set_vertex_state(start, VertexState::Visiting);
    let description = format!("Start the trail at {}", recorder.label(start));
    recorder.record(description).at(start);

    while let Some(&u) = stack.last() {
        if let Some(edge) = last_edge.take() {
            recorder.set_edge_state(edge, EdgeState::Tree);
        }

        if let Some((v, edge)) = next_edge(u) {
            recorder.set_edge_state(edge, EdgeState::Discovery);
            recorder.set_vertex_state(v, VertexState::Visiting);
            last_edge = Some(edge);

            let description = format!(
                "Traversing edge {}{separator}{}",
                recorder.label(u),
                recorder.label(v)
            );
            recorder.record(description).at(v);
            stack.push(v);
        } else {
            stack.pop();
            trail.push(u);
            recorder.set_vertex_state(u, VertexState::Processed);

            let partial = trail.iter().rev().copied().collect_vec();
            let description = format!(
                "{} has no unused edges left: backtrack and add it to the path",
                recorder.label(u)
            );
            recorder.record(description).at(u).with_path(partial);
        }
    }

    trail.reverse();
    trail
}

fn report_imbalance(mut recorder: TraceRecorder, imbalance: &DegreeImbalance) -> AlgorithmResult {
    for &u in imbalance.offenders() {
        recorder.set_vertex_state(u, VertexState::Highlighted);
    }

    let description = format!("No Eulerian path exists: {}", imbalance.narrate(&recorder));
    recorder.record(description);

    debug!(reason = %imbalance, steps = recorder.len(), "degree check failed");
    recorder.finish(false, None)
}

const EDGES_LEFT_OVER: &str =
    "No Eulerian path exists: not all edges could be traversed, the graph may be disconnected";

/// Post-check and terminal step. `arcs` is the number of edges the trail has to consume.
fn report_trail(
    mut recorder: TraceRecorder,
    mut path: Vec<VertexId>,
    arcs: usize,
) -> AlgorithmResult {
    if path.len() != arcs + 1 {
        for idx in 0..recorder.number_of_graph_edges() {
            if recorder.edge_state(idx) == EdgeState::Normal {
                recorder.set_edge_state(idx, EdgeState::Highlighted);
            }
        }

        recorder.record(EDGES_LEFT_OVER);
        debug!(
            traversed = path.len().saturating_sub(1),
            arcs,
            steps = recorder.len(),
            "edges left over"
        );
        return recorder.finish(false, None);
    }

    let circuit = path.len() > 1 && path.first() == path.last();
    let mut description = format!("Eulerian path found: {}", recorder.describe(&path));
    if circuit {
        path.pop();
        description.push_str(" (circuit)");
    }

    for &u in &path {
        recorder.set_vertex_state(u, VertexState::Highlighted);
    }
    for idx in 0..recorder.number_of_graph_edges() {
        recorder.set_edge_state(idx, EdgeState::Highlighted);
    }
    recorder.record(description).with_path(path.clone());

    debug!(path = ?path, circuit, steps = recorder.len(), "Eulerian path found");
    recorder.finish(true, Some(path))
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    use super::*;
    use crate::{gens::*, testing::*};

    fn descriptions(result: &AlgorithmResult) -> Vec<&str> {
        result.steps.iter().map(|s| s.description.as_str()).collect()
    }

    #[test]
    fn trail_with_inner_cycle() {
        // A -> B, B -> C, C -> D, D -> B
        let graph = Graph::from_edges(4, true, [(0, 1), (1, 2), (2, 3), (3, 1)]);
        assert_eq!(graph.in_degrees(), vec![0, 2, 1, 1]);
        assert_eq!(
            graph.vertex_ids().map(|u| graph.out_degree_of(u)).collect_vec(),
            vec![1, 1, 1, 1]
        );

        let result = graph.find_directed_eulerian_path();
        assert!(result.found);
        assert_eq!(result.path_or_cycle, Some(vec![0, 1, 2, 3, 1]));
        assert_eulerian_trail(&graph, &[0, 1, 2, 3, 1]);
        assert_valid_trace(&graph, &result, EULERIAN_TERMINALS);

        let texts = descriptions(&result);
        assert_eq!(
            texts[1],
            "Degree check: A (in 0, out 1), B (in 2, out 1), C (in 1, out 1), D (in 1, out 1)"
        );
        assert_eq!(texts.iter().filter(|d| d.starts_with("Traversing")).count(), 4);
        assert_eq!(texts.iter().filter(|d| d.contains("backtrack")).count(), 5);
        assert_eq!(
            texts.last().copied(),
            Some("Eulerian path found: A -> B -> C -> D -> B")
        );
    }

    #[test]
    fn partial_paths_grow_from_the_back() {
        let graph = Graph::from_edges(3, true, [(0, 1), (1, 2)]);
        let result = graph.find_directed_eulerian_path();

        let partials = result
            .steps
            .iter()
            .filter(|s| s.description.contains("backtrack"))
            .map(|s| s.path.clone().unwrap())
            .collect_vec();
        assert_eq!(partials, vec![vec![2], vec![1, 2], vec![0, 1, 2]]);
    }

    #[test]
    fn directed_cycle_is_a_circuit() {
        for n in [1, 2, 3, 7] {
            let mut graph = Graph::new(n, true);
            graph.connect_cycle(0..n);

            let result = find_eulerian_path(&graph);
            assert!(result.found);

            let path = result.path_or_cycle.clone().unwrap();
            assert_eq!(path.len(), n as usize);
            assert_eq!(path, (0..n).collect_vec());
            assert_eulerian_trail(&graph, &path);
            assert!(result.last_step().unwrap().description.ends_with("(circuit)"));
        }
    }

    #[test]
    fn complete_digraph() {
        let mut graph = Graph::new(5, true);
        graph.connect_clique(&[0, 1, 2, 3, 4], false);

        let result = find_eulerian_path(&graph);
        let path = result.path_or_cycle.unwrap();
        assert_eq!(path.len(), 20);
        assert_eulerian_trail(&graph, &path);
    }

    #[test]
    fn unbalanced_vertex_stops_before_traversal() {
        let graph = Graph::from_edges(3, true, [(0, 1), (0, 2)]);
        let result = find_eulerian_path(&graph);

        assert!(!result.found);
        assert_eq!(result.path_or_cycle, None);
        assert_eq!(result.number_of_steps(), 3);
        assert!(descriptions(&result).iter().all(|d| !d.starts_with("Traversing")));

        let last = result.last_step().unwrap();
        assert_eq!(
            last.description,
            "No Eulerian path exists: in- and out-degree differ by more than one at A"
        );
        assert_eq!(last.vertex_state(0), VertexState::Highlighted);
        assert_eq!(last.vertex_state(1), VertexState::Unvisited);
    }

    #[test]
    fn two_starts() {
        let graph = Graph::from_edges(4, true, [(0, 1), (2, 3)]);
        assert_eq!(
            eulerian_start(&graph),
            Err(DegreeImbalance::MultipleStarts(vec![0, 2]))
        );

        let result = find_eulerian_path(&graph);
        assert!(!result.found);
        assert!(result.last_step().unwrap().description.contains("(A, C)"));
    }

    #[test]
    fn unique_start_and_end() {
        // 3 -> 1 -> 2 -> 0 -> 1 -> 4
        let graph = Graph::from_edges(5, true, [(0, 1), (1, 2), (3, 1), (1, 4), (2, 0)]);
        assert_eq!(eulerian_start(&graph), Ok(3));

        let path = find_eulerian_path(&graph).path_or_cycle.unwrap();
        assert_eq!(path, vec![3, 1, 2, 0, 1, 4]);
        assert_eulerian_trail(&graph, &path);
    }

    #[test]
    fn disconnected_edges_fail_the_post_check() {
        let mut graph = Graph::new(5, true);
        graph.connect_cycle([0, 1]);
        graph.connect_cycle([2, 3, 4]);

        assert_eq!(eulerian_start(&graph), Ok(0));

        let result = find_eulerian_path(&graph);
        assert!(!result.found);
        assert_eq!(result.path_or_cycle, None);

        let last = result.last_step().unwrap();
        assert_eq!(last.description, EDGES_LEFT_OVER);
        assert!(last.edges[2..].iter().all(|e| e.state == EdgeState::Highlighted));
        assert!(last.edges[..2].iter().all(|e| e.state == EdgeState::Tree));
    }

    #[test]
    fn no_edges() {
        for directed in [false, true] {
            let graph = Graph::new(3, directed);
            let result = find_eulerian_path(&graph);

            assert!(!result.found);
            assert_eq!(
                result.last_step().unwrap().description,
                "No Eulerian path exists: the graph has no edges"
            );
        }
    }

    #[test]
    fn bidirectional_edges_are_two_arcs() {
        let mut graph = Graph::new(3, true);
        graph.add_edge(0, 1);
        graph.push_edge(Edge::undirected(1, 2));

        let result = find_eulerian_path(&graph);
        assert_eq!(result.path_or_cycle, Some(vec![0, 1, 2, 1]));
    }

    #[test]
    fn undirected_path_and_circuit() {
        let path = Graph::from_edges(4, false, [(1, 2), (0, 1), (2, 3)]);
        let result = find_eulerian_path(&path);
        assert_eq!(result.path_or_cycle, Some(vec![0, 1, 2, 3]));
        assert_valid_trace(&path, &result, EULERIAN_TERMINALS);

        // two triangles sharing vertex 0
        let bowtie = Graph::from_edges(5, false, [(0, 1), (1, 2), (2, 0), (0, 3), (3, 4), (4, 0)]);
        let result = find_eulerian_path(&bowtie);
        let circuit = result.path_or_cycle.unwrap();
        assert_eq!(circuit.len(), 6);
        assert_eulerian_trail(&bowtie, &circuit);
    }

    #[test]
    fn undirected_odd_vertices() {
        // claw: center of degree 3 and three leaves
        let claw = Graph::from_edges(4, false, [(0, 1), (0, 2), (0, 3)]);
        assert_eq!(
            eulerian_start(&claw),
            Err(DegreeImbalance::TooManyOddVertices(vec![0, 1, 2, 3]))
        );
        assert!(!find_eulerian_path(&claw).found);

        // the walk has to start at an odd vertex
        let graph = Graph::from_edges(4, false, [(0, 1), (1, 2), (2, 0), (2, 3)]);
        assert_eq!(eulerian_start(&graph), Ok(2));
        let trail = find_eulerian_path(&graph).path_or_cycle.unwrap();
        assert_eq!(trail.first(), Some(&2));
        assert_eq!(trail.last(), Some(&3));
        assert_eulerian_trail(&graph, &trail);
    }

    #[test]
    fn undirected_multi_edges_and_loops() {
        let graph = Graph::from_edges(2, false, [(0, 1), (1, 0), (1, 1)]);
        let result = find_eulerian_path(&graph);

        let circuit = result.path_or_cycle.unwrap();
        assert_eq!(circuit.len(), 3);
        assert_eulerian_trail(&graph, &circuit);
    }

    #[test]
    fn random_results_are_sound() {
        let rng = &mut Pcg64Mcg::seed_from_u64(37);

        for directed in [true, false] {
            for _ in 0..50 {
                let graph = random_graph(rng, 6, 0.3, directed);
                let result = find_eulerian_path(&graph);

                if let Some(path) = &result.path_or_cycle {
                    assert_eulerian_trail(&graph, path);
                }
                assert_eq!(result.found, result.path_or_cycle.is_some());
            }
        }
    }

    test_trace_invariants!(directed_traces, true, find_eulerian_path, EULERIAN_TERMINALS);
    test_trace_invariants!(undirected_traces, false, find_eulerian_path, EULERIAN_TERMINALS);
}
