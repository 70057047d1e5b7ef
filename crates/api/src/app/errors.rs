use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use surgishop_core::DomainError;

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    let status = match &err {
        DomainError::InvalidArgument(_)
        | DomainError::ExpiredBatch { .. }
        | DomainError::SerialBatchMismatch { .. } => StatusCode::EXPECTATION_FAILED,
        DomainError::NotFound => StatusCode::NOT_FOUND,
        DomainError::Conflict(_) => StatusCode::CONFLICT,
        DomainError::Storage(_) => StatusCode::SERVICE_UNAVAILABLE,
    };
    tracing::debug!(error = %err, status = status.as_u16(), "request rejected");
    json_error(status, err.exc_type(), err.to_string())
}

pub fn json_error(
    status: StatusCode,
    exc_type: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "exc_type": exc_type,
            "message": message.into(),
        })),
    )
        .into_response()
}
