//! Shared assertions for the algorithm tests.

use fxhash::FxHashMap;
use itertools::Itertools;
use rand::Rng;

use crate::{gens::RandomGraphGenerator, prelude::*};

/// Prefixes of the terminal step of a cycle detection: `[found, not found]`
pub(crate) const CYCLE_TERMINALS: [&str; 2] = ["Cycle detected", "No cycle found"];

/// Prefixes of the terminal step of an Eulerian path search: `[found, not found]`
pub(crate) const EULERIAN_TERMINALS: [&str; 2] = ["Eulerian path found", "No Eulerian path exists"];

/// Random graph with a Hamiltonian path and (if directed) possibly a back-edge
pub(crate) fn random_graph<R: Rng>(rng: &mut R, n: NumVertices, p: f64, directed: bool) -> Graph {
    RandomGraphGenerator::new()
        .vertices(n)
        .prob(p)
        .directed(directed)
        .allow_cycles(true)
        .generate(rng)
}

/// Checks the shape of a trace: at least one step, complete snapshots, and a terminal step
/// that agrees with the outcome.
pub(crate) fn assert_valid_trace(graph: &Graph, result: &AlgorithmResult, terminals: [&str; 2]) {
    assert!(!result.steps.is_empty());
    assert_eq!(result.found, result.path_or_cycle.is_some());

    for step in &result.steps {
        assert_eq!(step.vertices.len(), graph.len());
        assert!(step.vertices.iter().enumerate().all(|(i, v)| v.id as usize == i));
        assert!(step.edges.len() <= graph.number_of_edges() as usize);
        assert!(step.current_vertex.is_none_or(|u| u < graph.number_of_vertices()));
    }

    let last = result.last_step().unwrap();
    let expected = if result.found { terminals[0] } else { terminals[1] };
    assert!(
        last.description.starts_with(expected),
        "terminal step '{}' should start with '{expected}'",
        last.description
    );
}

/// Checks that `cycle` lists distinct vertices connected in order, including the closing edge.
/// If `directed` is false, edges may be walked against their direction.
pub(crate) fn assert_cycle_is_sound(graph: &Graph, cycle: &[VertexId], directed: bool) {
    assert!(!cycle.is_empty());
    assert_eq!(cycle.iter().unique().count(), cycle.len(), "{cycle:?} repeats a vertex");

    for (&u, &v) in cycle.iter().zip(cycle.iter().cycle().skip(1)) {
        let connected = graph.has_edge(u, v) || (!directed && graph.has_edge(v, u));
        assert!(connected, "{cycle:?} uses the missing edge ({u}, {v})");
    }
}

/// Checks that `path` walks every edge of `graph` exactly once. A circuit is given without
/// repeating its start vertex, i.e. with one vertex per edge.
pub(crate) fn assert_eulerian_trail(graph: &Graph, path: &[VertexId]) {
    let mut available: FxHashMap<(VertexId, VertexId), usize> = FxHashMap::default();

    let arcs: usize = if graph.is_directed() {
        for u in graph.vertex_ids() {
            for &v in graph.neighbors_of(u) {
                *available.entry((u, v)).or_default() += 1;
            }
        }
        available.values().sum()
    } else {
        for edge in graph.edges() {
            let EdgeKey(u, v) = edge.key();
            *available.entry((u, v)).or_default() += 1;
        }
        graph.edges().len()
    };

    assert!(arcs > 0);
    assert!(
        path.len() == arcs || path.len() == arcs + 1,
        "{path:?} has the wrong length for {arcs} edges"
    );

    let closing = (path.len() == arcs).then(|| (path[arcs - 1], path[0]));
    for (u, v) in path.iter().copied().tuple_windows().chain(closing) {
        let key = if graph.is_directed() {
            (u, v)
        } else {
            let EdgeKey(a, b) = Edge::new(u, v).key();
            (a, b)
        };

        let count = available.get_mut(&key).filter(|c| **c > 0);
        let Some(count) = count else {
            panic!("{path:?} walks ({u}, {v}) more often than it exists");
        };
        *count -= 1;
    }

    assert!(available.values().all(|&c| c == 0));
}

/// Asserts that two results are equal including every vertex state of every step.
/// `Vertex` compares by id only, so `==` on results does not see state changes.
pub(crate) fn assert_same_trace(a: &AlgorithmResult, b: &AlgorithmResult) {
    assert_eq!(a, b);
    for (i, (x, y)) in a.steps.iter().zip_eq(&b.steps).enumerate() {
        let states = |step: &Step| step.vertices.iter().map(|v| v.state).collect_vec();
        assert_eq!(states(x), states(y), "vertex states differ in step {i}");
    }
}

/// Generates a test running `$algo` on seeded random graphs and checking the trace shape with
/// [`assert_valid_trace`]. Also checks that the input graph is left untouched and that a second
/// run yields the same trace.
macro_rules! test_trace_invariants {
    ($name:ident, $directed:literal, $algo:expr, $terminals:expr) => {
        #[test]
        fn $name() {
            use rand::SeedableRng;
            use rand_pcg::Pcg64Mcg;

            let rng = &mut Pcg64Mcg::seed_from_u64(3);
            let algo = $algo;

            for n in [1, 2, 5, 10] {
                for p in [0.0, 0.1, 0.3, 0.8] {
                    for _ in 0..5 {
                        let graph = crate::testing::random_graph(rng, n, p, $directed);
                        let before = graph.clone();

                        let result = algo(&graph);
                        crate::testing::assert_valid_trace(&graph, &result, $terminals);

                        assert_eq!(graph.edges(), before.edges());
                        assert_eq!(graph.positions(), before.positions());
                        crate::testing::assert_same_trace(&algo(&graph), &result);
                    }
                }
            }
        }
    };
}

pub(crate) use test_trace_invariants;

mod tests {
    use super::*;
    use crate::algo::detect_cycle;

    #[test]
    fn same_trace_accepts_reruns() {
        let graph = Graph::from_edges(3, true, [(0, 1), (1, 2), (2, 0)]);
        assert_same_trace(&detect_cycle(&graph, true), &detect_cycle(&graph, true));
    }

    #[test]
    #[should_panic(expected = "vertex states differ")]
    fn same_trace_sees_vertex_states() {
        let graph = Graph::from_edges(3, true, [(0, 1), (1, 2), (2, 0)]);
        let result = detect_cycle(&graph, true);

        let mut altered = result.clone();
        altered.steps[0].vertices[1].state = VertexState::Processed;
        assert_eq!(result, altered);

        assert_same_trace(&result, &altered);
    }
}
