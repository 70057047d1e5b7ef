use axum::Json;
use serde::{Deserialize, Serialize};

use surgishop_stock::{ExpiryPolicy, Transaction};

// -------------------------
// Request DTOs
// -------------------------

/// Missing fields deserialize as `None` so the handler reports them as
/// validation errors instead of the extractor rejecting the body.
#[derive(Debug, Default, Deserialize)]
pub struct ParseGs1Request {
    pub gtin: Option<String>,
    pub lot: Option<String>,
    pub expiry: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ParseScanRequest {
    #[serde(default)]
    pub barcode: String,
}

#[derive(Debug, Deserialize)]
pub struct GtinQuery {
    #[serde(default)]
    pub gtin: String,
}

#[derive(Debug, Deserialize)]
pub struct DebugScanQuery {
    #[serde(default)]
    pub barcode: String,
    #[serde(default)]
    pub context: String,
}

#[derive(Debug, Deserialize)]
pub struct IsInboundRequest {
    pub transaction: Transaction,
    #[serde(default)]
    pub row: usize,
}

#[derive(Debug, Deserialize)]
pub struct ValidateBatchesRequest {
    pub transaction: Transaction,
    #[serde(default)]
    pub policy: Option<ExpiryPolicy>,
}

// -------------------------
// Response envelope
// -------------------------

#[derive(Debug, Serialize)]
pub struct Message<T> {
    pub message: T,
}

pub fn message<T: Serialize>(value: T) -> Json<Message<T>> {
    Json(Message { message: value })
}
