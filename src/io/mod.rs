/*!
# IO

Rendering graphs and trace steps for inspection.

## Output Formats
- **Dot**: the [DOT language](https://graphviz.org/doc/info/lang.html) of [GraphViz](https://graphviz.org/).
  Vertices are named by their labels and pinned to their positions; vertex and edge states are
  drawn as colors, which makes single [`Step`](crate::trace::Step)s of a trace easy to inspect.

Writers only ever write into a caller-supplied [`std::io::Write`] and return [`std::io::Result`].
*/

pub mod dot;

use std::io::{Result, Write};

use crate::prelude::*;

pub use dot::*;

/// Trait for types that can write `T` (a graph or a step) in a specific format.
pub trait GraphWriter<T: ?Sized> {
    /// Writes `item` to the provided writer according to the settings in `self`.
    ///
    /// # Errors
    /// Returns an error if writing fails.
    fn try_write_graph<W>(&self, item: &T, writer: W) -> Result<()>
    where
        W: Write;
}
