/// Domain-level error shared by the persistence and HTTP layers.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A referenced entity does not exist.
    #[error("{entity} not found")]
    NotFound { entity: &'static str },

    /// One or more input rules failed. Every violation is kept.
    #[error("Validation failed: {}", .0.join(";"))]
    Validation(Vec<String>),

    /// The request is well-formed but cannot be applied.
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Shorthand for a single-message validation failure.
    pub fn validation(message: impl Into<String>) -> Self {
        CoreError::Validation(vec![message.into()])
    }
}
