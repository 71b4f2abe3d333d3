use crate::vertex::VertexId;

#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("a graph needs at least one vertex")]
    NoVertices,
    #[error("vertex {vertex} is out of range for a graph with {len} vertices")]
    VertexOutOfRange { vertex: VertexId, len: usize },
    #[error("edge probability {0} is not within [0, 1]")]
    InvalidProbability(f64),
    #[error("layout bounds {width}x{height} leave no room inside a margin of {margin}")]
    InvalidBounds { width: f64, height: f64, margin: f64 },
    #[error("adjacency of vertex {vertex} disagrees with the edge list")]
    AdjacencyMismatch { vertex: VertexId },
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GraphError>;
