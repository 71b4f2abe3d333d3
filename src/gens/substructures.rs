/*!
# Substructure Generators

Utility methods to add deterministic motifs to an existing graph:

- **Paths**
- **Cycles**
- **Cliques**

The random generator uses `connect_path` for its spanning path; tests use `connect_cycle` to plant
cycles and Eulerian circuits whose existence must not depend on chance.

# Example

```rust
use graph_trace::{prelude::*, gens::*};

let mut g = Graph::new(5, true);
g.connect_path([0, 1, 2]);
g.connect_cycle([2, 3, 4]);
g.connect_clique(&[0, 2, 4], false);

assert_eq!(g.number_of_edges(), 10);
assert!(g.has_edge(4, 2));
```
*/

use itertools::Itertools;

use super::*;

/// Trait for creating additional **substructures** (paths, cycles, cliques) inside a graph.
pub trait GeneratorSubstructures {
    /// Connects the given vertices in order with a **simple path**.
    ///
    /// Each consecutive pair of vertices is connected by a single edge.
    fn connect_path<P>(&mut self, vertices_on_path: P)
    where
        P: IntoIterator<Item = VertexId>;

    /// Connects the given vertices with a **cycle**: consecutive vertices are connected and the
    /// last vertex is connected back to the first.
    ///
    /// # Example
    /// ```rust
    /// use graph_trace::{prelude::*, gens::*};
    ///
    /// let mut g = Graph::new(3, true);
    /// g.connect_cycle([0, 1, 2]);
    ///
    /// assert!(g.has_edge(0, 1));
    /// assert!(g.has_edge(1, 2));
    /// assert!(g.has_edge(2, 0));
    /// ```
    fn connect_cycle<C>(&mut self, vertices_in_cycle: C)
    where
        C: IntoIterator<Item = VertexId>;

    /// Connects all given vertices into a **clique**, skipping edges that already exist.
    ///
    /// - If `with_loops` is `true`, each vertex also gets a self-loop.
    /// - In undirected graphs each pair is connected once.
    fn connect_clique(&mut self, vertices: &[VertexId], with_loops: bool);
}

impl GeneratorSubstructures for Graph {
    fn connect_path<P>(&mut self, vertices_on_path: P)
    where
        P: IntoIterator<Item = VertexId>,
    {
        for (u, v) in vertices_on_path.into_iter().tuple_windows() {
            self.add_edge(u, v);
        }
    }

    fn connect_cycle<C>(&mut self, vertices_in_cycle: C)
    where
        C: IntoIterator<Item = VertexId>,
    {
        let mut iter = vertices_in_cycle.into_iter();

        // we use a rather tedious implementation to avoid needing to clone the iterator
        if let Some(first) = iter.next() {
            let mut prev = first;
            for cur in iter {
                self.add_edge(prev, cur);
                prev = cur;
            }

            self.add_edge(prev, first);
        }
    }

    fn connect_clique(&mut self, vertices: &[VertexId], with_loops: bool) {
        for &u in vertices {
            for &v in vertices {
                if (!with_loops && u == v) || (!self.is_directed() && u > v) {
                    continue;
                }

                self.try_add_edge(u, v);
            }
        }
    }
}
