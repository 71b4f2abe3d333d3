/*!
# Graph Generators

Builders for the graphs the visualizer runs its algorithms on.

Generators follow a builder-style pattern:

1. Create a generator instance (e.g., `RandomGraphGenerator::new()`).
2. Set parameters using its methods (e.g., `.vertices(n).prob(p).directed(true)`).
3. Generate the graph via `generate(rng)`, injecting the random source.

Given the same seed, every generator produces exactly the same graph.

In addition, [`GeneratorSubstructures`] adds deterministic motifs (paths, cycles, cliques) to an
existing graph, which is how tests plant cycles and Eulerian circuits.
*/

use rand::Rng;

use crate::{prelude::*, utils::Probability};

mod random;
mod substructures;

pub use random::*;
pub use substructures::*;
