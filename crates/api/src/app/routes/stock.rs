use std::sync::Arc;

use axum::{Json, extract::Extension, response::IntoResponse};
use serde_json::json;

use surgishop_core::DomainError;
use surgishop_stock::{Direction, validate_batches as validate};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub async fn is_inbound(Json(body): Json<dto::IsInboundRequest>) -> axum::response::Response {
    let Some(row) = body.transaction.items.get(body.row) else {
        return errors::domain_error_to_response(DomainError::invalid_argument(format!(
            "row {} out of range ({} items)",
            body.row,
            body.transaction.items.len()
        )));
    };

    let direction = Direction::of(&body.transaction, row);
    dto::message(json!({
        "inbound": direction == Direction::Inbound,
        "direction": direction,
    }))
    .into_response()
}

pub async fn validate_batches(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::ValidateBatchesRequest>,
) -> axum::response::Response {
    let policy = body
        .policy
        .unwrap_or_else(|| services.expiry_policies.policy_for(&body.transaction));

    match validate(
        &body.transaction,
        policy,
        services.batches.as_ref(),
        services.serials.as_ref(),
    ) {
        Ok(()) => dto::message(json!({
            "valid": true,
            "policy": policy,
        }))
        .into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
