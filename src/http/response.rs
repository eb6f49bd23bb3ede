//! Response mapping.
//!
//! # Responsibilities
//! - Map pipeline errors to HTTP status codes
//! - Keep error bodies plain text, success bodies JSON
//!
//! Status mapping:
//! - validation → 422 Unprocessable Entity
//! - unknown postal code → 404 Not Found
//! - upstream failure → 502 Bad Gateway (body names the hop)
//! - hop timeout → 504 Gateway Timeout

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::any::Any;

use crate::pipeline::error::PipelineError;

impl PipelineError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            PipelineError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            PipelineError::NotFound => StatusCode::NOT_FOUND,
            PipelineError::Upstream { .. } => StatusCode::BAD_GATEWAY,
            PipelineError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
        }
    }
}

impl IntoResponse for PipelineError {
    fn into_response(self) -> Response {
        (self.status_code(), self.to_string()).into_response()
    }
}

/// Turn a handler panic into a 500 so the listener keeps serving.
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!(panic = %detail, "Handler panicked");
    (StatusCode::INTERNAL_SERVER_ERROR, "internal server error").into_response()
}
