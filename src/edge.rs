use std::fmt::{Debug, Display};

use serde::{Deserialize, Serialize};

use crate::vertex::VertexId;

/// Number of edges of a graph
pub type NumEdges = u32;

/// Visual/algorithmic state of an edge inside a single snapshot.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeState {
    #[default]
    Normal,
    /// Currently being examined
    Discovery,
    /// Leads back to an ancestor without closing a reported cycle (e.g. the parent edge)
    Back,
    /// Leads into an already finished part of the search
    Cross,
    /// Confirmed part of a detected cycle
    Cycle,
    /// Part of the search tree / already consumed
    Tree,
    /// Confirmed part of the final result
    Highlighted,
}

/// An edge is defined by two endpoints, a state and an optional weight.
///
/// `bidirectional` edges (everything created as an undirected pair) can be traversed in both
/// directions, even inside an otherwise directed graph.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub from: VertexId,
    pub to: VertexId,
    pub state: EdgeState,
    pub weight: Option<f64>,
    pub bidirectional: bool,
}

/// Identity of an edge for display purposes: the normalized (unordered) pair of endpoints
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeKey(pub VertexId, pub VertexId);

impl Display for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let arrow = if self.bidirectional { "--" } else { "->" };
        write!(f, "({}{arrow}{})", self.from, self.to)
    }
}

impl Debug for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        <Self as Display>::fmt(self, f)?;
        if self.state != EdgeState::Normal {
            write!(f, "[{:?}]", self.state)?;
        }
        Ok(())
    }
}

impl Edge {
    /// Creates a directed, unweighted edge `from -> to`
    pub fn new(from: VertexId, to: VertexId) -> Self {
        Self {
            from,
            to,
            state: EdgeState::Normal,
            weight: None,
            bidirectional: false,
        }
    }

    /// Creates an edge that can be traversed in both directions
    pub fn undirected(from: VertexId, to: VertexId) -> Self {
        Self {
            bidirectional: true,
            ..Self::new(from, to)
        }
    }

    /// Attaches a weight
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }

    /// Returns a copy of this edge in the given state
    pub fn with_state(&self, state: EdgeState) -> Self {
        Self {
            state,
            ..self.clone()
        }
    }

    /// Returns the display identity `{min(from, to), max(from, to)}`
    pub fn key(&self) -> EdgeKey {
        EdgeKey(self.from.min(self.to), self.from.max(self.to))
    }

    /// Returns *true* if both endpoints are equal
    pub fn is_loop(&self) -> bool {
        self.from == self.to
    }

    /// Returns *true* if the edge can be walked from `u` to `v`
    pub fn connects(&self, u: VertexId, v: VertexId) -> bool {
        (self.from == u && self.to == v) || (self.bidirectional && self.from == v && self.to == u)
    }

    /// Returns the endpoint opposite to `u`.
    /// ** Panics in debug builds if `u` is not an endpoint **
    pub fn opposite(&self, u: VertexId) -> VertexId {
        debug_assert!(self.from == u || self.to == u);
        if self.from == u { self.to } else { self.from }
    }

    /// Returns the endpoints as tuple
    pub fn endpoints(&self) -> (VertexId, VertexId) {
        (self.from, self.to)
    }
}

impl From<(VertexId, VertexId)> for Edge {
    fn from(value: (VertexId, VertexId)) -> Self {
        Edge::new(value.0, value.1)
    }
}

impl From<&(VertexId, VertexId)> for Edge {
    fn from(value: &(VertexId, VertexId)) -> Self {
        Edge::new(value.0, value.1)
    }
}

impl From<&Edge> for Edge {
    fn from(value: &Edge) -> Self {
        value.clone()
    }
}
