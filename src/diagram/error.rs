use thiserror::Error;

/// Reasons a diagram is rejected at construction time.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DiagramError {
    #[error("{labels} labels but {positions} positions")]
    LengthMismatch { labels: usize, positions: usize },

    #[error("edge {edge} references vertex {index}, but the diagram has {len} vertices")]
    VertexOutOfRange { edge: usize, index: usize, len: usize },

    #[error("radius must be positive and finite, got {0}")]
    InvalidRadius(f64),

    #[error("vertex {vertex} has invalid position ({x}, {y}); coordinates must be finite and non-negative")]
    InvalidCoordinate { vertex: usize, x: f64, y: f64 },

    #[error("edge {edge} connects vertices {from} and {to} at the same position")]
    CoincidentEndpoints {
        edge: usize,
        from: usize,
        to: usize,
    },

    #[error(
        "edge {edge} connects vertices {from} and {to} whose circles touch or overlap (distance {distance:.3}, radius {radius})"
    )]
    OverlappingEndpoints {
        edge: usize,
        from: usize,
        to: usize,
        distance: f64,
        radius: f64,
    },
}
