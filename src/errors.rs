use astra::Response;
use serde::Serialize;
use thiserror::Error;

/// One rejected request parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Errors originating from either the server logic
/// (validation, routing, missing resources) or downstream layers (DB).
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("validation failed ({} errors)", .0.len())]
    Validation(Vec<FieldError>),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("unauthorized")]
    Unauthorized,

    #[error("database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("database error: {0}")]
    DbError(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ServerError {
    pub fn status(&self) -> u16 {
        match self {
            ServerError::Validation(_) | ServerError::BadRequest(_) => 400,
            ServerError::Unauthorized => 401,
            ServerError::NotFound(_) => 404,
            ServerError::Db(_) | ServerError::DbError(_) | ServerError::Internal(_) => 500,
        }
    }

    /// True when the failure is the server's fault rather than the client's.
    pub fn is_server_fault(&self) -> bool {
        self.status() >= 500
    }
}

// Type alias commonly used by route handlers.
pub type ResultResp = Result<Response, ServerError>;
