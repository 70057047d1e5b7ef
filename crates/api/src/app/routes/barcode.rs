use std::sync::Arc;

use axum::{
    extract::{Extension, Query},
    response::IntoResponse,
};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub async fn get_item_by_gtin(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<dto::GtinQuery>,
) -> axum::response::Response {
    match surgishop_gs1::item_by_gtin(services.catalog.as_ref(), &query.gtin) {
        Ok(found) => dto::message(found).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn validate_gtin_format(Query(query): Query<dto::GtinQuery>) -> axum::response::Response {
    dto::message(surgishop_gs1::validate_gtin_format(&query.gtin)).into_response()
}

pub async fn get_gtin_info(Query(query): Query<dto::GtinQuery>) -> axum::response::Response {
    match surgishop_gs1::gtin_info(&query.gtin) {
        Ok(info) => dto::message(info).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn debug_barcode_scan(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<dto::DebugScanQuery>,
) -> axum::response::Response {
    let diagnosis = surgishop_gs1::debug_barcode_scan(
        services.catalog.as_ref(),
        &query.barcode,
        &query.context,
    );
    dto::message(diagnosis).into_response()
}
