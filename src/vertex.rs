/*!
# Vertex Representation

Vertices are identified by `VertexId = u32` in the dense range `0..n`, so that an id doubles as the
index into every per-vertex array (`Graph::vertices`, `Graph::adjacency`, color arrays, ...).

A [`Vertex`] is a plain value: algorithms never mutate a vertex that already went into a
[`Step`](crate::trace::Step). Instead the next snapshot carries a vertex with the same id and a
different [`VertexState`].
*/

use std::{
    fmt::Display,
    hash::{Hash, Hasher},
    ops::{Add, AddAssign, Div, Mul, Sub, SubAssign},
};

use serde::{Deserialize, Serialize};

/// Vertices are unsigned integers from `0` to `n - 1`
pub type VertexId = u32;

/// Number of vertices of a graph
pub type NumVertices = VertexId;

/// Visual/algorithmic state of a vertex inside a single snapshot.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VertexState {
    /// Not reached yet
    #[default]
    Unvisited,
    /// Currently on the traversal stack
    Visiting,
    /// Fully explored
    Visited,
    /// Member of a discovered cycle/path or flagged by a degree check
    Highlighted,
    /// Fully explored and emitted into a result (Eulerian backtracking)
    Processed,
}

/// A point in the 2D drawing plane.
#[derive(Debug, Default, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    /// The origin `(0, 0)`
    pub const ORIGIN: Position = Position { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean length of the vector `(x, y)`
    pub fn length(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Euclidean distance to `other`
    pub fn distance_to(&self, other: Position) -> f64 {
        (*self - other).length()
    }

    /// Clamps both coordinates into `[min, max]` component-wise
    pub fn clamp(self, min: Position, max: Position) -> Self {
        Self {
            x: self.x.clamp(min.x, max.x),
            y: self.y.clamp(min.y, max.y),
        }
    }
}

impl From<(f64, f64)> for Position {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl Add for Position {
    type Output = Position;

    fn add(self, rhs: Self) -> Self::Output {
        Position::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Position {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Position {
    type Output = Position;

    fn sub(self, rhs: Self) -> Self::Output {
        Position::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for Position {
    fn sub_assign(&mut self, rhs: Self) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Mul<f64> for Position {
    type Output = Position;

    fn mul(self, rhs: f64) -> Self::Output {
        Position::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f64> for Position {
    type Output = Position;

    fn div(self, rhs: f64) -> Self::Output {
        Position::new(self.x / rhs, self.y / rhs)
    }
}

/// A labelled, positioned vertex.
///
/// Equality and hashing only consider `id`: two snapshots of the same vertex in different states
/// compare equal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vertex {
    pub id: VertexId,
    pub position: Position,
    pub label: String,
    pub state: VertexState,
}

impl Vertex {
    /// Creates an unvisited vertex at `position` labelled by [`vertex_label`]
    pub fn new(id: VertexId, position: Position) -> Self {
        Self {
            id,
            position,
            label: vertex_label(id),
            state: VertexState::Unvisited,
        }
    }

    /// Returns a copy of this vertex in the given state
    pub fn with_state(&self, state: VertexState) -> Self {
        Self {
            state,
            ..self.clone()
        }
    }

    /// Returns a copy of this vertex moved to `position`
    pub fn with_position(&self, position: Position) -> Self {
        Self {
            position,
            ..self.clone()
        }
    }
}

impl PartialEq for Vertex {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Vertex {}

impl Hash for Vertex {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl Display for Vertex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label)
    }
}

/// Display name of vertex `id`: `A, B, ..., Z, AA, AB, ...` (spreadsheet columns).
///
/// ```
/// use graph_trace::vertex::vertex_label;
///
/// assert_eq!(vertex_label(0), "A");
/// assert_eq!(vertex_label(25), "Z");
/// assert_eq!(vertex_label(26), "AA");
/// ```
pub fn vertex_label(id: VertexId) -> String {
    let mut n = id as u64 + 1;
    let mut label = Vec::new();
    while n > 0 {
        n -= 1;
        label.push(b'A' + (n % 26) as u8);
        n /= 26;
    }
    label.reverse();
    String::from_utf8_lossy(&label).into_owned()
}
