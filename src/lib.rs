/*!
`graph_trace` is the algorithm engine of a graph visualizer. It generates random graphs, lays them
out, and runs graph algorithms that record every decision they make as a sequence of immutable
snapshots, so a front-end can play, pause and scrub through the run.

# Representation

Vertices are identified by `u32` ids in the range `0..n` and carry a position, a label (`A`, `B`,
..., `Z`, `AA`, ...) and a visual state. Edges carry their endpoints, a state, an optional weight
and whether they may be walked in both directions. A [`Graph`](crate::graph::Graph) keeps the
adjacency in lock-step with its edge list; see the [`graph`] module for the exact rules.

# Traces

Every algorithm returns an [`AlgorithmResult`](crate::trace::AlgorithmResult): whether it found
what it was looking for, the cycle or path it found, and the list of
[`Step`](crate::trace::Step)s that led there. A step is a complete copy of all vertex and edge
states plus a human-readable description, so any step can be shown on its own.

# Usage

There are *5* core submodules you probably want to interact with:
- [`prelude`] includes vertices, edges, the graph and the trace types,
- [`algo`] includes the traced algorithms (`detect_cycle`, `find_eulerian_path`) and plain
  traversals,
- [`gens`] includes the random graph generator and deterministic substructures such as
  paths/cycles/cliques,
- [`layout`] includes the circle and force-directed layouts,
- [`trace`] includes the [`TracePlayer`](crate::trace::TracePlayer) to step through a result.

In addition, [`io`] writes graphs or single steps in the DOT format for inspection, and
[`config`] loads the generator and layout settings from JSON.

In most use-cases, `use graph_trace::{prelude::*, algo::*};` suffices for your needs.

```
use graph_trace::{prelude::*, algo::*, gens::*, layout::*};

let graph = RandomGraphGenerator::new().vertices(6).prob(0.3).generate_seeded(5);
let graph = ForceLayout::new().apply(&graph);

let result = detect_cycle(&graph, graph.is_directed());
assert_eq!(result.found, result.path_or_cycle.is_some());
assert!(!result.steps.is_empty());
```

Nothing in this crate installs a `tracing` subscriber; algorithms emit `debug!` events with their
outcome and `trace!` events per recorded step.
*/

pub mod algo;
pub mod config;
pub mod edge;
pub mod error;
pub mod gens;
pub mod graph;
pub mod io;
pub mod layout;
#[cfg(test)]
pub(crate) mod testing;
pub mod trace;
pub mod utils;
pub mod vertex;

pub use error::{GraphError, Result};

/// `graph_trace::prelude` includes definitions for vertices and edges, the graph itself and the
/// types algorithms return.
pub mod prelude {
    pub use super::{
        edge::*,
        graph::*,
        trace::{AlgorithmResult, Step},
        vertex::*,
    };
}
