/*!
# Graph

[`Graph`] stores vertices, edges and a derived adjacency list. All three are private and only
changed through methods that update them together, so `adjacency` can never disagree with
`edges`:

- in a **directed** graph, an edge `u -> v` adds `v` to `adjacency[u]`; a `bidirectional` edge
  additionally adds `u` to `adjacency[v]`,
- in an **undirected** graph every edge is bidirectional.

Next to each adjacency entry we remember the index of the edge it stems from. This lets the
algorithms color exactly the edge they walk along, even in the presence of multi-edges.

Neighbors are kept in insertion order; all traversals in this crate rely on it.

```
use graph_trace::prelude::*;

let graph = Graph::from_edges(3, true, [(0, 1), (1, 2), (2, 0)]);
assert_eq!(graph.neighbors_of(2), &[0]);
assert_eq!(graph.in_degree_of(0), 1);
assert!(graph.validate().is_ok());
```
*/

use std::ops::Range;

use fxhash::FxHashMap;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::{
    edge::*,
    error::{GraphError, Result},
    vertex::*,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RawGraph")]
pub struct Graph {
    vertices: Vec<Vertex>,
    edges: Vec<Edge>,
    adjacency: Vec<Vec<VertexId>>,
    #[serde(skip_serializing)]
    adjacency_edges: Vec<Vec<usize>>,
    directed: bool,
}

/// Serialized form used when reading a graph: the adjacency is always re-derived
#[derive(Deserialize)]
struct RawGraph {
    vertices: Vec<Vertex>,
    edges: Vec<Edge>,
    directed: bool,
}

impl TryFrom<RawGraph> for Graph {
    type Error = GraphError;

    fn try_from(raw: RawGraph) -> Result<Self> {
        if raw.vertices.is_empty() {
            return Err(GraphError::NoVertices);
        }

        if let Some(vertex) = raw
            .vertices
            .iter()
            .enumerate()
            .find_map(|(i, v)| (v.id as usize != i).then_some(v.id))
        {
            return Err(GraphError::VertexOutOfRange {
                vertex,
                len: raw.vertices.len(),
            });
        }

        let mut graph = Graph::from_vertices(raw.vertices, raw.directed);
        for edge in raw.edges {
            graph.check_vertex(edge.from)?;
            graph.check_vertex(edge.to)?;
            graph.push_edge(edge);
        }

        Ok(graph)
    }
}

impl Graph {
    /// Creates a graph with `n` labelled vertices at the origin and no edges
    pub fn new(n: NumVertices, directed: bool) -> Self {
        Self::from_vertices(
            (0..n).map(|u| Vertex::new(u, Position::ORIGIN)).collect(),
            directed,
        )
    }

    /// Creates an edgeless graph from the given vertices.
    /// ** Panics in debug builds if the ids are not `0..n` in order **
    pub fn from_vertices(vertices: Vec<Vertex>, directed: bool) -> Self {
        debug_assert!(
            vertices
                .iter()
                .enumerate()
                .all(|(i, v)| v.id as usize == i)
        );

        let n = vertices.len();
        Self {
            vertices,
            edges: Vec::new(),
            adjacency: vec![Vec::new(); n],
            adjacency_edges: vec![Vec::new(); n],
            directed,
        }
    }

    /// Creates a graph with `n` vertices and the given edges (multi-edges are kept).
    /// ** Panics if an endpoint is `>= n` **
    pub fn from_edges<I, E>(n: NumVertices, directed: bool, edges: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<Edge>,
    {
        let mut graph = Self::new(n, directed);
        for edge in edges {
            graph.push_edge(edge.into());
        }
        graph
    }

    /// Checked variant of [`Graph::from_edges`] for input that did not originate in this crate
    pub fn try_from_edges<I, E>(n: NumVertices, directed: bool, edges: I) -> Result<Self>
    where
        I: IntoIterator<Item = E>,
        E: Into<Edge>,
    {
        if n == 0 {
            return Err(GraphError::NoVertices);
        }

        let mut graph = Self::new(n, directed);
        for edge in edges {
            let edge = edge.into();
            graph.check_vertex(edge.from)?;
            graph.check_vertex(edge.to)?;
            graph.push_edge(edge);
        }
        Ok(graph)
    }

    fn check_vertex(&self, u: VertexId) -> Result<()> {
        if (u as usize) < self.vertices.len() {
            Ok(())
        } else {
            Err(GraphError::VertexOutOfRange {
                vertex: u,
                len: self.vertices.len(),
            })
        }
    }

    /// Adds an edge and keeps the adjacency in sync. Returns the index of the new edge.
    /// In undirected graphs the edge is made bidirectional.
    /// ** Panics if an endpoint is out of range **
    pub fn push_edge(&mut self, mut edge: Edge) -> usize {
        let n = self.vertices.len();
        assert!(
            (edge.from as usize) < n && (edge.to as usize) < n,
            "edge {edge} is out of range for {n} vertices"
        );

        if !self.directed {
            edge.bidirectional = true;
        }

        let idx = self.edges.len();
        let (u, v) = edge.endpoints();

        self.adjacency[u as usize].push(v);
        self.adjacency_edges[u as usize].push(idx);
        if edge.bidirectional && !edge.is_loop() {
            self.adjacency[v as usize].push(u);
            self.adjacency_edges[v as usize].push(idx);
        }

        self.edges.push(edge);
        idx
    }

    /// Adds the edge `u -> v` (`u -- v` if undirected) without checking for duplicates
    pub fn add_edge(&mut self, u: VertexId, v: VertexId) -> usize {
        self.push_edge(Edge::new(u, v))
    }

    /// Adds a weighted edge `u -> v` without checking for duplicates
    pub fn add_weighted_edge(&mut self, u: VertexId, v: VertexId, weight: f64) -> usize {
        self.push_edge(Edge::new(u, v).with_weight(weight))
    }

    /// Adds the edge if it does not exist yet.
    /// Returns *true* if the edge was present before (and nothing was added).
    pub fn try_add_edge(&mut self, u: VertexId, v: VertexId) -> bool {
        if self.has_edge(u, v) {
            true
        } else {
            self.add_edge(u, v);
            false
        }
    }

    /// Adds all given edges without checking for duplicates
    pub fn add_edges<I, E>(&mut self, edges: I)
    where
        I: IntoIterator<Item = E>,
        E: Into<Edge>,
    {
        for edge in edges {
            self.push_edge(edge.into());
        }
    }

    /// Returns *true* if the graph is directed
    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// Returns the number of vertices
    pub fn number_of_vertices(&self) -> NumVertices {
        self.vertices.len() as NumVertices
    }

    /// Returns the number of vertices as usize
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Returns *true* if the graph has no vertices
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Returns the number of stored edges (an undirected edge counts once)
    pub fn number_of_edges(&self) -> NumEdges {
        self.edges.len() as NumEdges
    }

    /// Returns the range of all vertex ids. Does not borrow `self`.
    pub fn vertex_ids(&self) -> Range<VertexId> {
        0..self.number_of_vertices()
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// ** Panics if `u >= n` **
    pub fn vertex(&self, u: VertexId) -> &Vertex {
        &self.vertices[u as usize]
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn adjacency(&self) -> &[Vec<VertexId>] {
        &self.adjacency
    }

    /// Returns the (out-)neighbors of `u` in insertion order.
    /// ** Panics if `u >= n` **
    pub fn neighbors_of(&self, u: VertexId) -> &[VertexId] {
        &self.adjacency[u as usize]
    }

    /// Returns the (out-)neighbors of `u` together with the index of the edge leading there.
    /// ** Panics if `u >= n` **
    pub fn out_edges_of(&self, u: VertexId) -> impl Iterator<Item = (VertexId, usize)> + '_ {
        self.adjacency[u as usize]
            .iter()
            .copied()
            .zip(self.adjacency_edges[u as usize].iter().copied())
    }

    /// Returns the `i`-th (out-)neighbor of `u` together with the index of the edge leading there
    pub fn out_edge_at(&self, u: VertexId, i: usize) -> Option<(VertexId, usize)> {
        let u = u as usize;
        Some((*self.adjacency[u].get(i)?, self.adjacency_edges[u][i]))
    }

    /// Returns *true* if `v` can be reached from `u` over a single edge
    pub fn has_edge(&self, u: VertexId, v: VertexId) -> bool {
        self.adjacency[u as usize].contains(&v)
    }

    /// Returns the index of the first edge walkable from `u` to `v`
    pub fn edge_between(&self, u: VertexId, v: VertexId) -> Option<usize> {
        self.out_edges_of(u).find(|&(w, _)| w == v).map(|(_, e)| e)
    }

    /// Number of adjacency entries of `u`
    pub fn degree_of(&self, u: VertexId) -> NumVertices {
        self.adjacency[u as usize].len() as NumVertices
    }

    /// Alias of [`Graph::degree_of`] for directed graphs
    pub fn out_degree_of(&self, u: VertexId) -> NumVertices {
        self.degree_of(u)
    }

    /// Number of adjacency entries pointing to `u`. Takes `O(n + m)`.
    pub fn in_degree_of(&self, u: VertexId) -> NumVertices {
        self.adjacency.iter().flatten().filter(|&&v| v == u).count() as NumVertices
    }

    /// In-degrees of all vertices in one pass
    pub fn in_degrees(&self) -> Vec<NumVertices> {
        let mut in_degs = vec![0; self.len()];
        for &v in self.adjacency.iter().flatten() {
            in_degs[v as usize] += 1;
        }
        in_degs
    }

    /// Current position of every vertex (index == id)
    pub fn positions(&self) -> Vec<Position> {
        self.vertices.iter().map(|v| v.position).collect()
    }

    /// Returns a copy of this graph with vertex `i` moved to `positions[i]`.
    /// ** Panics if the number of positions differs from the number of vertices **
    pub fn with_positions(&self, positions: &[Position]) -> Self {
        assert_eq!(positions.len(), self.len());
        Self {
            vertices: self
                .vertices
                .iter()
                .zip(positions)
                .map(|(v, &p)| v.with_position(p))
                .collect(),
            ..self.clone()
        }
    }

    /// Deduplicates the edges by their unordered endpoint pair, keeping the first occurrence.
    ///
    /// Returns the deduplicated edges and, for each original edge index, the index of its
    /// representative in the deduplicated list.
    pub fn deduplicated_edges(&self) -> (Vec<Edge>, Vec<usize>) {
        let mut first_of_key: FxHashMap<EdgeKey, usize> = FxHashMap::default();
        let mut unique = Vec::new();

        let mapping = self
            .edges
            .iter()
            .map(|edge| {
                *first_of_key.entry(edge.key()).or_insert_with(|| {
                    unique.push(edge.clone());
                    unique.len() - 1
                })
            })
            .collect();

        (unique, mapping)
    }

    /// Edges as they should be drawn: unchanged for directed graphs, one edge per unordered pair
    /// for undirected graphs
    pub fn display_edges(&self) -> Vec<Edge> {
        if self.directed {
            self.edges.clone()
        } else {
            self.deduplicated_edges().0
        }
    }

    /// Re-derives the adjacency from the edge list and compares it with the cached one
    pub fn validate(&self) -> Result<()> {
        let n = self.len();
        let mut expected: Vec<Vec<(VertexId, usize)>> = vec![Vec::new(); n];

        for (idx, edge) in self.edges.iter().enumerate() {
            self.check_vertex(edge.from)?;
            self.check_vertex(edge.to)?;

            if !self.directed && !edge.bidirectional {
                return Err(GraphError::AdjacencyMismatch { vertex: edge.from });
            }

            expected[edge.from as usize].push((edge.to, idx));
            if edge.bidirectional && !edge.is_loop() {
                expected[edge.to as usize].push((edge.from, idx));
            }
        }

        for u in self.vertex_ids() {
            if self.adjacency[u as usize].len() != self.adjacency_edges[u as usize].len()
                || self.out_edges_of(u).collect_vec() != expected[u as usize]
            {
                return Err(GraphError::AdjacencyMismatch { vertex: u });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg64Mcg;

    use super::*;

    /// Creates a list of `m` random edges for vertices `0..n` (loops and multi-edges included)
    fn random_edges<R: Rng>(rng: &mut R, n: NumVertices, m: usize) -> Vec<(VertexId, VertexId)> {
        (0..m)
            .map(|_| (rng.random_range(0..n), rng.random_range(0..n)))
            .collect()
    }

    #[test]
    fn adjacency_follows_edges() {
        let rng = &mut Pcg64Mcg::seed_from_u64(3);

        for directed in [false, true] {
            for n in [1 as NumVertices, 10, 20] {
                for m in [0, n as usize, n as usize * 5] {
                    let edges = random_edges(rng, n, m);
                    let graph = Graph::from_edges(n, directed, edges.iter());

                    assert_eq!(graph.number_of_edges() as usize, m);
                    assert!(graph.validate().is_ok());

                    for &(u, v) in &edges {
                        assert!(graph.has_edge(u, v));
                        if !directed {
                            assert!(graph.has_edge(v, u));
                        }
                    }

                    let in_degs = graph.in_degrees();
                    for u in graph.vertex_ids() {
                        assert_eq!(graph.in_degree_of(u), in_degs[u as usize]);
                    }
                }
            }
        }
    }

    #[test]
    fn bidirectional_edge_in_directed_graph() {
        let mut graph = Graph::new(3, true);
        graph.add_edge(0, 1);
        graph.push_edge(Edge::undirected(1, 2));

        assert_eq!(graph.neighbors_of(0), &[1]);
        assert_eq!(graph.neighbors_of(1), &[2]);
        assert_eq!(graph.neighbors_of(2), &[1]);
        assert_eq!(graph.edge_between(2, 1), Some(1));
        assert_eq!(graph.edge_between(1, 0), None);
        assert!(graph.validate().is_ok());
    }

    #[test]
    fn try_add_edge_skips_duplicates() {
        let mut graph = Graph::new(3, false);
        assert!(!graph.try_add_edge(0, 1));
        assert!(graph.try_add_edge(1, 0));
        assert!(graph.try_add_edge(0, 1));
        assert_eq!(graph.number_of_edges(), 1);

        let mut graph = Graph::new(3, true);
        assert!(!graph.try_add_edge(0, 1));
        assert!(!graph.try_add_edge(1, 0));
        assert_eq!(graph.number_of_edges(), 2);
    }

    #[test]
    fn checked_construction() {
        assert!(matches!(
            Graph::try_from_edges(0, true, Vec::<Edge>::new()),
            Err(GraphError::NoVertices)
        ));
        assert!(matches!(
            Graph::try_from_edges(2, true, [(0, 2)]),
            Err(GraphError::VertexOutOfRange { vertex: 2, len: 2 })
        ));
        assert!(Graph::try_from_edges(2, true, [(0, 1)]).is_ok());
    }

    #[test]
    fn deduplication_keeps_first_occurrence() {
        let graph = Graph::from_edges(3, false, [(0, 1), (1, 2), (1, 0), (2, 1), (0, 2)]);
        let (unique, mapping) = graph.deduplicated_edges();

        assert_eq!(
            unique.iter().map(Edge::endpoints).collect_vec(),
            vec![(0, 1), (1, 2), (0, 2)]
        );
        assert_eq!(mapping, vec![0, 1, 0, 1, 2]);
        assert_eq!(graph.display_edges().len(), 3);

        let directed = Graph::from_edges(2, true, [(0, 1), (1, 0)]);
        assert_eq!(directed.display_edges().len(), 2);
        assert_eq!(directed.deduplicated_edges().0.len(), 1);
    }

    #[test]
    fn with_positions_is_pure() {
        let graph = Graph::from_edges(2, true, [(0, 1)]);
        let moved = graph.with_positions(&[Position::new(1.0, 1.0), Position::new(2.0, 3.0)]);

        assert_eq!(graph.positions(), vec![Position::ORIGIN; 2]);
        assert_eq!(moved.vertex(1).position, Position::new(2.0, 3.0));
        assert_eq!(moved.edges(), graph.edges());
        assert_eq!(moved.adjacency(), graph.adjacency());
    }

    #[test]
    fn serde_rederives_adjacency() {
        let graph = Graph::from_edges(3, false, [(0, 1), (1, 2)]);
        let json = serde_json::to_string(&graph).unwrap();
        let back: Graph = serde_json::from_str(&json).unwrap();

        assert_eq!(back.adjacency(), graph.adjacency());
        assert!(back.validate().is_ok());

        let broken = r#"{"vertices":[],"edges":[],"directed":true}"#;
        assert!(serde_json::from_str::<Graph>(broken).is_err());
    }
}
