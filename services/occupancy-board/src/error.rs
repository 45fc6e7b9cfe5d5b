//! Error types for the occupancy board

/// Errors that can occur while talking to the occupancy backend
#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("{status}: server-side error")]
    HttpStatus { status: u16 },

    /// A `success: false` body, or a body missing the fields it must carry
    #[error("{0}")]
    Payload(String),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Poll task failed: {0}")]
    Task(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for occupancy board operations
pub type Result<T> = std::result::Result<T, BoardError>;
