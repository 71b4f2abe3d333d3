/*!
Plain graph traversals without trace recording.

The traced algorithms in this module use their own explicit stacks because they need to narrate
every edge they look at; the iterators here are for everything else: reachability queries, the
acyclicity check used by the generator, and tests.

The frontier type decides the order: a [`VecDeque`] yields **BFS**, a [`Vec`] yields **DFS**.
*/

use std::collections::VecDeque;

use super::*;

/// Frontier of a traversal. The container decides the visiting order.
pub trait VertexSequencer {
    /// Creates a frontier holding only `u`
    fn init(u: VertexId) -> Self;

    fn push(&mut self, u: VertexId);

    /// Removes the vertex to visit next
    fn pop(&mut self) -> Option<VertexId>;

    fn cardinality(&self) -> usize;
}

impl VertexSequencer for VecDeque<VertexId> {
    fn init(u: VertexId) -> Self {
        Self::from(vec![u])
    }
    fn push(&mut self, u: VertexId) {
        self.push_back(u)
    }
    fn pop(&mut self) -> Option<VertexId> {
        self.pop_front()
    }
    fn cardinality(&self) -> usize {
        self.len()
    }
}

impl VertexSequencer for Vec<VertexId> {
    fn init(u: VertexId) -> Self {
        vec![u]
    }
    fn push(&mut self, u: VertexId) {
        self.push(u)
    }
    fn pop(&mut self) -> Option<VertexId> {
        self.pop()
    }
    fn cardinality(&self) -> usize {
        self.len()
    }
}

/// Lazy traversal over the out-neighbors of each vertex, starting at a single vertex.
/// Every vertex is yielded at most once.
pub struct TraversalSearch<'a, S: VertexSequencer> {
    graph: &'a Graph,
    visited: Vec<bool>,
    sequencer: S,
}

/// Breadth-first search
pub type Bfs<'a> = TraversalSearch<'a, VecDeque<VertexId>>;

/// Depth-first search (stack based, so neighbors are visited in reverse insertion order)
pub type Dfs<'a> = TraversalSearch<'a, Vec<VertexId>>;

impl<'a, S: VertexSequencer> TraversalSearch<'a, S> {
    /// ** Panics if `start >= n` **
    pub fn new(graph: &'a Graph, start: VertexId) -> Self {
        let mut visited = vec![false; graph.len()];
        visited[start as usize] = true;

        Self {
            graph,
            visited,
            sequencer: S::init(start),
        }
    }

    /// Returns *true* if `u` was already discovered
    pub fn did_visit(&self, u: VertexId) -> bool {
        self.visited[u as usize]
    }

    /// Consumes the search and returns *true* if `target` is reachable from the start
    pub fn is_vertex_reachable(mut self, target: VertexId) -> bool {
        self.any(|u| u == target)
    }
}

impl<S: VertexSequencer> Iterator for TraversalSearch<'_, S> {
    type Item = VertexId;

    fn next(&mut self) -> Option<Self::Item> {
        let u = self.sequencer.pop()?;

        for &v in self.graph.neighbors_of(u) {
            if !self.visited[v as usize] {
                self.visited[v as usize] = true;
                self.sequencer.push(v);
            }
        }

        Some(u)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.sequencer.cardinality(), Some(self.graph.len()))
    }
}

/// Kahn's algorithm: yields vertices in topological order and stops early on a cycle.
pub struct TopoSearch<'a> {
    graph: &'a Graph,
    in_degs: Vec<NumVertices>,
    stack: Vec<VertexId>,
}

impl<'a> TopoSearch<'a> {
    fn new(graph: &'a Graph) -> Self {
        let in_degs = graph.in_degrees();
        let stack = graph
            .vertex_ids()
            .filter(|&u| in_degs[u as usize] == 0)
            .collect();

        Self {
            graph,
            in_degs,
            stack,
        }
    }
}

impl Iterator for TopoSearch<'_> {
    type Item = VertexId;

    fn next(&mut self) -> Option<Self::Item> {
        let u = self.stack.pop()?;

        for &v in self.graph.neighbors_of(u) {
            self.in_degs[v as usize] -= 1;
            if self.in_degs[v as usize] == 0 {
                self.stack.push(v);
            }
        }

        Some(u)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.stack.len(), Some(self.graph.len()))
    }
}

/// Untraced traversal methods on [`Graph`]
pub trait Traversal {
    /// Vertices reachable from `start` in BFS order
    ///
    /// ```
    /// use graph_trace::{prelude::*, algo::*};
    ///
    /// let g = Graph::from_edges(3, true, [(0, 1), (0, 2)]);
    /// assert_eq!(g.bfs(0).collect::<Vec<_>>(), vec![0, 1, 2]);
    /// ```
    fn bfs(&self, start: VertexId) -> Bfs<'_>;

    /// Vertices reachable from `start` in DFS order
    fn dfs(&self, start: VertexId) -> Dfs<'_>;

    /// All vertices reachable from `start` (including `start`) in BFS order
    fn reachable_from(&self, start: VertexId) -> Vec<VertexId> {
        self.bfs(start).collect()
    }

    /// Topological order of the vertices, truncated at the first cycle.
    /// Every stored edge counts as an arc, so undirected edges form cycles of length two.
    fn topo_search(&self) -> TopoSearch<'_>;

    /// Returns *true* if [`Traversal::topo_search`] reaches every vertex.
    ///
    /// ```
    /// use graph_trace::{prelude::*, algo::*};
    ///
    /// assert!(Graph::from_edges(3, true, [(0, 1), (1, 2)]).is_acyclic());
    /// assert!(!Graph::from_edges(3, true, [(0, 1), (1, 2), (2, 0)]).is_acyclic());
    /// ```
    fn is_acyclic(&self) -> bool;
}

impl Traversal for Graph {
    fn bfs(&self, start: VertexId) -> Bfs<'_> {
        Bfs::new(self, start)
    }

    fn dfs(&self, start: VertexId) -> Dfs<'_> {
        Dfs::new(self, start)
    }

    fn topo_search(&self) -> TopoSearch<'_> {
        TopoSearch::new(self)
    }

    fn is_acyclic(&self) -> bool {
        self.topo_search().count() == self.len()
    }
}
