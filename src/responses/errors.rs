use crate::errors::ServerError;
use astra::{Body, Response, ResponseBuilder};
use serde_json::json;

/// Convert a ServerError into a JSON error response.
///
/// Server faults are logged here and answered with a generic message.
pub fn error_to_response(err: ServerError) -> Response {
    let status = err.status();

    let body = match &err {
        ServerError::Validation(errors) => json!({ "errors": errors }),
        ServerError::NotFound(msg) | ServerError::BadRequest(msg) => json!({ "error": msg }),
        ServerError::Unauthorized => json!({ "error": "unauthorized" }),
        ServerError::Db(_) | ServerError::DbError(_) | ServerError::Internal(_) => {
            tracing::error!(error = %err, "request failed");
            json!({ "error": "internal server error" })
        }
    };

    ResponseBuilder::new()
        .status(status)
        .header("Content-Type", mime::APPLICATION_JSON.as_ref())
        .body(Body::from(body.to_string()))
        .unwrap_or_else(|_| Response::new(Body::from("internal server error")))
}
