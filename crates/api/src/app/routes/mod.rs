use axum::{
    Router,
    routing::{get, post},
};

pub mod barcode;
pub mod gs1;
pub mod stock;
pub mod system;

/// Router for the whitelisted RPC methods (mounted under `/api/method`).
pub fn router() -> Router {
    Router::new()
        .route(
            "/surgishop.gs1.parse_gs1_and_get_batch",
            post(gs1::parse_gs1_and_get_batch),
        )
        .route("/surgishop.gs1.parse_gs1_scan", post(gs1::parse_gs1_scan))
        .route(
            "/surgishop.barcode.get_item_by_gtin",
            get(barcode::get_item_by_gtin),
        )
        .route(
            "/surgishop.barcode.validate_gtin_format",
            get(barcode::validate_gtin_format),
        )
        .route("/surgishop.barcode.get_gtin_info", get(barcode::get_gtin_info))
        .route(
            "/surgishop.barcode.debug_barcode_scan",
            get(barcode::debug_barcode_scan),
        )
        .route("/surgishop.stock.is_inbound", post(stock::is_inbound))
        .route(
            "/surgishop.stock.validate_batches",
            post(stock::validate_batches),
        )
}
