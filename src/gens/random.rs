use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::*;
use crate::{
    error::{GraphError, Result},
    layout::CircleLayout,
};

/// Probability of planting a single back-edge into a directed graph that may contain cycles
pub const BACK_EDGE_PROBABILITY: f64 = 0.5;

/// Generator for connected random graphs.
///
/// The generated graph consists of
/// - `n` vertices placed on a circle (see [`CircleLayout`]),
/// - the path `0 -> 1 -> ... -> n-1`, which makes the graph (weakly) connected,
/// - for every other ordered pair `(i, j)` with `i != j`, an edge with probability `p` unless it
///   already exists. If the graph is directed and cycles are not allowed, pairs with `j < i` are
///   skipped, so that the result is acyclic,
/// - if the graph is directed and cycles are allowed: with probability
///   [`BACK_EDGE_PROBABILITY`], one additional edge `(from, to)` with `to < from`. This makes
///   cycles likely but does not guarantee one.
///
/// ```
/// use graph_trace::gens::*;
///
/// let graph = RandomGraphGenerator::new()
///     .vertices(6)
///     .prob(0.25)
///     .directed(true)
///     .allow_cycles(false)
///     .generate_seeded(7);
///
/// assert_eq!(graph.number_of_vertices(), 6);
/// assert!(graph.edges().iter().all(|e| e.from < e.to));
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RandomGraphGenerator {
    #[serde(rename = "vertex_count")]
    n: NumVertices,
    #[serde(rename = "edge_probability")]
    p: f64,
    directed: bool,
    allow_cycles: bool,
    layout: CircleLayout,
}

impl Default for RandomGraphGenerator {
    fn default() -> Self {
        Self {
            n: 8,
            p: 0.3,
            directed: true,
            allow_cycles: true,
            layout: CircleLayout::default(),
        }
    }
}

impl RandomGraphGenerator {
    /// Creates a generator with default settings (8 vertices, `p = 0.3`, directed, cycles allowed)
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of vertices
    pub fn vertices(mut self, n: NumVertices) -> Self {
        self.n = n;
        self
    }

    /// Sets the probability of every optional edge.
    /// ** Panics if `p` is not within `[0, 1]` **
    pub fn prob(mut self, p: f64) -> Self {
        assert!(p.is_valid_probability(), "{p} is not a probability");
        self.p = p;
        self
    }

    pub fn directed(mut self, directed: bool) -> Self {
        self.directed = directed;
        self
    }

    /// Only has an effect on directed graphs
    pub fn allow_cycles(mut self, allow_cycles: bool) -> Self {
        self.allow_cycles = allow_cycles;
        self
    }

    /// Sets the initial placement of the vertices
    pub fn layout(mut self, layout: CircleLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Reports settings that `generate` would reject
    pub fn validate(&self) -> Result<()> {
        if self.n == 0 {
            return Err(GraphError::NoVertices);
        }
        if !self.p.is_valid_probability() {
            return Err(GraphError::InvalidProbability(self.p));
        }
        Ok(())
    }

    /// Generates a random graph using `rng`.
    /// ** Panics if no vertices are requested **
    pub fn generate<R: Rng>(&self, rng: &mut R) -> Graph {
        assert!(self.n > 0, "At least one vertex must be generated!");
        assert!(self.p.is_valid_probability(), "Probability was not valid!");

        let n = self.n;
        let vertices = self
            .layout
            .positions(n as usize)
            .into_iter()
            .zip(0..n)
            .map(|(position, id)| Vertex::new(id, position))
            .collect();

        let mut graph = Graph::from_vertices(vertices, self.directed);
        graph.connect_path(0..n);

        let acyclic = self.directed && !self.allow_cycles;
        for i in 0..n {
            for j in 0..n {
                if i == j || (acyclic && j < i) {
                    continue;
                }

                if rng.random_bool(self.p) {
                    graph.try_add_edge(i, j);
                }
            }
        }

        if self.directed && self.allow_cycles && n > 1 && rng.random_bool(BACK_EDGE_PROBABILITY) {
            let from = rng.random_range(1..n);
            let to = rng.random_range(0..from);
            graph.try_add_edge(from, to);
        }

        debug!(
            vertices = n,
            edges = graph.number_of_edges(),
            directed = self.directed,
            allow_cycles = self.allow_cycles,
            "generated random graph"
        );

        graph
    }

    /// Generates a random graph from a [`Pcg64Mcg`] seeded with `seed`
    pub fn generate_seeded(&self, seed: u64) -> Graph {
        self.generate(&mut Pcg64Mcg::seed_from_u64(seed))
    }
}

/// Shorthand for configuring a [`RandomGraphGenerator`] and calling `generate(rng)`
pub fn generate_random_graph<R: Rng>(
    rng: &mut R,
    vertex_count: NumVertices,
    edge_probability: f64,
    directed: bool,
    allow_cycles: bool,
    layout: &CircleLayout,
) -> Graph {
    RandomGraphGenerator::new()
        .vertices(vertex_count)
        .prob(edge_probability)
        .directed(directed)
        .allow_cycles(allow_cycles)
        .layout(*layout)
        .generate(rng)
}
