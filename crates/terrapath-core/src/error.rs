use thiserror::Error;

/// Errors raised by terrain generation and table construction.
///
/// Search never returns these: an unreachable goal is an ordinary outcome and
/// is reported through [`crate::search::PathResult`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TerrainError {
    #[error("invalid grid dimensions {width}x{height}: both must be positive")]
    InvalidDimensions { width: usize, height: usize },

    #[error("terrain boundaries out of order: {lower} must be strictly below {upper}")]
    MalformedBoundaries { lower: String, upper: String },

    #[error("terrain table must define {0} exactly once")]
    IncompleteTable(String),

    #[error("movement cost of {category} must be at least 1, got {cost}")]
    InvalidCost { category: String, cost: f64 },

    #[error("unknown terrain category: {0}")]
    UnknownCategory(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TerrainError>;
