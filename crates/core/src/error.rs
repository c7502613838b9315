#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CoreError {
    /// The target of an update does not exist. The message is fixed so the
    /// stores surface the same text regardless of which id was requested.
    #[error("{entity} not found")]
    NotFound { entity: &'static str, id: String },

    #[error("{0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Shorthand for a missing scene object.
    pub fn object_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: "Object",
            id: id.into(),
        }
    }
}
