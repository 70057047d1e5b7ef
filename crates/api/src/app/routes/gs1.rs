use std::sync::Arc;

use axum::{Json, extract::Extension, response::IntoResponse};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub async fn parse_gs1_and_get_batch(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::ParseGs1Request>,
) -> axum::response::Response {
    let gtin = body.gtin.unwrap_or_default();
    let lot = body.lot.unwrap_or_default();

    match services
        .resolver
        .resolve(&gtin, &lot, body.expiry.as_deref())
    {
        Ok(resolution) => dto::message(resolution).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn parse_gs1_scan(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::ParseScanRequest>,
) -> axum::response::Response {
    match services.resolver.resolve_scan(&body.barcode) {
        Ok(resolution) => dto::message(resolution).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
