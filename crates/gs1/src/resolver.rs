//! GTIN + lot resolution to an item and a (lazily created) batch.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use surgishop_core::{BatchId, DomainError, DomainResult, ItemCode};
use surgishop_stock::{Batch, BatchStore, ItemCatalog, NewBatch, StoreError, WriteScope};

use crate::date::parse_yymmdd;
use crate::element::Gs1Element;

/// Outcome of a resolution.
///
/// Soft failures (unknown GTIN, unusable item, storage trouble) come back with
/// `found_item = None` and `error` set; callers must inspect `error`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gs1Resolution {
    pub found_item: Option<ItemCode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch: Option<BatchId>,
    pub gtin: String,
    pub lot: String,
    pub expiry: Option<String>,
    #[serde(default)]
    pub batch_expiry_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Gs1Resolution {
    fn unresolved(gtin: &str, lot: &str, expiry: Option<&str>, error: String) -> Self {
        Self {
            found_item: None,
            batch: None,
            gtin: gtin.to_string(),
            lot: lot.to_string(),
            expiry: expiry.map(str::to_string),
            batch_expiry_date: None,
            error: Some(error),
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.found_item.is_some() && self.error.is_none()
    }
}

/// Resolves scanned GS1 payloads against the item catalog and batch store.
#[derive(Debug, Clone)]
pub struct Gs1Resolver<C, B> {
    catalog: C,
    batches: B,
}

impl<C, B> Gs1Resolver<C, B>
where
    C: ItemCatalog,
    B: BatchStore,
{
    pub fn new(catalog: C, batches: B) -> Self {
        Self { catalog, batches }
    }

    /// Resolve a GTIN + lot (+ optional `YYMMDD` expiry) to an item and batch.
    ///
    /// The batch identifier is `{item_code}-{lot}`. A missing batch is created
    /// (trusted write); an existing batch only gains an expiry date if it had
    /// none. Blank `gtin` or `lot` is the only hard failure.
    pub fn resolve(
        &self,
        gtin: &str,
        lot: &str,
        expiry: Option<&str>,
    ) -> DomainResult<Gs1Resolution> {
        let gtin = gtin.trim();
        let lot = lot.trim();
        let expiry = expiry.map(str::trim).filter(|e| !e.is_empty());

        if gtin.is_empty() || lot.is_empty() {
            return Err(DomainError::invalid_argument(
                "GTIN and Lot Number are required.",
            ));
        }

        tracing::info!(gtin, lot, expiry = expiry.unwrap_or(""), "processing GS1 scan");

        match self.resolve_inner(gtin, lot, expiry) {
            Ok(resolution) => Ok(resolution),
            Err(e) => {
                let message = format!("Unexpected error processing GS1 barcode: {e}");
                tracing::error!(gtin, lot, error = %e, "GS1 resolution failed");
                Ok(Gs1Resolution::unresolved(gtin, lot, expiry, message))
            }
        }
    }

    /// Decode a raw scan and resolve its GTIN, lot and expiry.
    pub fn resolve_scan(&self, raw: &str) -> DomainResult<Gs1Resolution> {
        let element = Gs1Element::parse(raw).ok_or_else(|| {
            DomainError::invalid_argument(format!("Not a GS1 barcode: {}", raw.trim()))
        })?;

        let (Some(gtin), Some(lot)) = (element.gtin.as_deref(), element.lot.as_deref()) else {
            return Err(DomainError::invalid_argument(
                "GTIN and Lot Number are required.",
            ));
        };

        self.resolve(gtin, lot, element.expiry.as_deref())
    }

    fn resolve_inner(
        &self,
        gtin: &str,
        lot: &str,
        expiry: Option<&str>,
    ) -> Result<Gs1Resolution, StoreError> {
        let soft = |error: String| Gs1Resolution::unresolved(gtin, lot, expiry, error);

        let Some(mapping) = self.catalog.barcode(gtin)? else {
            let error = format!("No item found for GTIN: {gtin}");
            tracing::warn!(gtin, "{error}");
            return Ok(soft(error));
        };
        let item_code = mapping.item_code;

        let Some(item) = self.catalog.item(&item_code)? else {
            let error = format!("Item {item_code} not found in system");
            tracing::warn!(item_code = %item_code, "{error}");
            return Ok(soft(error));
        };
        if item.disabled {
            let error = format!("Item {item_code} is disabled");
            tracing::warn!(item_code = %item_code, "{error}");
            return Ok(soft(error));
        }
        if !item.has_batch_no {
            let error = format!("Item {item_code} does not use batch numbers");
            tracing::warn!(item_code = %item_code, "{error}");
            return Ok(soft(error));
        }

        let batch_id = BatchId::derive(&item_code, lot)
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        let parsed_expiry = parse_expiry(expiry);

        let batch = match self.batches.find(&batch_id)? {
            Some(existing) => self.backfill_expiry(existing, parsed_expiry)?,
            None => self.create_batch(&item_code, &batch_id, parsed_expiry)?,
        };

        tracing::info!(
            item_code = %item_code,
            batch_id = %batch.id,
            "GS1 scan resolved"
        );

        Ok(Gs1Resolution {
            found_item: Some(item_code),
            batch: Some(batch.id),
            gtin: gtin.to_string(),
            lot: lot.to_string(),
            expiry: expiry.map(str::to_string),
            batch_expiry_date: batch.expiry_date,
            error: None,
        })
    }

    fn create_batch(
        &self,
        item_code: &ItemCode,
        batch_id: &BatchId,
        expiry: Option<NaiveDate>,
    ) -> Result<Batch, StoreError> {
        let new_batch = NewBatch {
            id: batch_id.clone(),
            item: item_code.clone(),
            expiry_date: expiry,
        };

        // Scanning operators may lack batch write permission; the identifier is
        // derived, not chosen by the caller.
        match self.batches.create(new_batch, WriteScope::Trusted) {
            Ok(batch) => {
                tracing::info!(batch_id = %batch.id, expiry = ?batch.expiry_date, "created batch");
                Ok(batch)
            }
            Err(StoreError::Duplicate(_)) => {
                // Lost a race with a concurrent scan of the same lot.
                let existing = self
                    .batches
                    .find(batch_id)?
                    .ok_or_else(|| StoreError::Missing(batch_id.to_string()))?;
                self.backfill_expiry(existing, expiry)
            }
            Err(e) => Err(e),
        }
    }

    fn backfill_expiry(
        &self,
        existing: Batch,
        expiry: Option<NaiveDate>,
    ) -> Result<Batch, StoreError> {
        match (existing.expiry_date, expiry) {
            (None, Some(date)) => {
                // A concurrent scan may have set it since `find`; the store keeps the first.
                let stored = self
                    .batches
                    .set_expiry_if_unset(&existing.id, date, WriteScope::Trusted)?;
                if stored.expiry_date == Some(date) {
                    tracing::info!(batch_id = %stored.id, expiry = %date, "set expiry on existing batch");
                } else {
                    tracing::info!(
                        batch_id = %stored.id,
                        current = ?stored.expiry_date,
                        scanned = %date,
                        "batch gained an expiry concurrently; keeping it"
                    );
                }
                Ok(stored)
            }
            (Some(current), Some(scanned)) if current != scanned => {
                tracing::info!(
                    batch_id = %existing.id,
                    %current,
                    %scanned,
                    "batch already has an expiry date; keeping it"
                );
                Ok(existing)
            }
            _ => Ok(existing),
        }
    }
}

fn parse_expiry(expiry: Option<&str>) -> Option<NaiveDate> {
    let raw = expiry?;
    if raw.len() != 6 {
        tracing::warn!(expiry = raw, "invalid expiry format (expected 6 digits)");
        return None;
    }
    let parsed = parse_yymmdd(raw);
    if parsed.is_none() {
        tracing::warn!(expiry = raw, "could not parse expiry date; batch keeps no expiry");
    }
    parsed
}
