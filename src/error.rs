use std::time::Duration;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

use crate::web::models::{ChatErrorResponse, ErrorDetail};

pub const ROUTER_ERROR_TYPE: &str = "router_error";

/// Every way a chat request can fail.
///
/// The first three are raised before any process is spawned. The rest come
/// out of the agent invocation and always surface as a 500.
#[derive(Debug, Error)]
pub enum RouterError {
    #[error("Unauthorized")]
    Unauthorized,

    #[error("{0}")]
    MalformedRequest(String),

    #[error("stream=true is not implemented by this router")]
    UnsupportedFeature,

    #[error("agent binary `{binary}` was not found")]
    BinaryNotFound { binary: String },

    #[error("agent exec timed out after {:.1}s", .elapsed.as_secs_f64())]
    TimedOut { elapsed: Duration },

    #[error("{0}")]
    NonZeroExit(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ResponseError for RouterError {
    fn status_code(&self) -> StatusCode {
        match self {
            RouterError::Unauthorized => StatusCode::UNAUTHORIZED,
            RouterError::MalformedRequest(_) | RouterError::UnsupportedFeature => {
                StatusCode::BAD_REQUEST
            }
            RouterError::BinaryNotFound { .. }
            | RouterError::TimedOut { .. }
            | RouterError::NonZeroExit(_)
            | RouterError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            HttpResponse::build(status).json(ChatErrorResponse {
                error: ErrorDetail {
                    message: self.to_string(),
                    kind: ROUTER_ERROR_TYPE.to_string(),
                },
            })
        } else {
            HttpResponse::build(status).json(json!({ "error": self.to_string() }))
        }
    }
}
