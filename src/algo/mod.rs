/*!
# Graph Algorithms

Step-recording graph algorithms. All algorithms are re-exported at the top level of this module,
so you can simply do:
```rust
use graph_trace::algo::*;
```

Every algorithm takes a graph by reference and returns an owned
[`AlgorithmResult`](crate::trace::AlgorithmResult): whether something was found, what was found,
and the complete trace of how it was found. Algorithms are available both as free functions
([`detect_cycle`], [`find_eulerian_path`]) and as traits implemented on [`Graph`].

Neighbors are always explored in insertion order, so traces are deterministic.
*/

mod cycle;
mod cycle_directed;
mod cycle_undirected;
mod eulerian;
mod traversal;

use tracing::debug;

use crate::{prelude::*, trace::*};

pub use cycle::*;
pub use eulerian::*;
pub use traversal::*;
