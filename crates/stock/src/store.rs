//! Storage contracts for host-owned records.
//!
//! Implementations must be safe to share across request handlers. The batch
//! store in particular must reject a second record for an existing identifier.

use std::sync::Arc;

use chrono::NaiveDate;
use thiserror::Error;

use surgishop_core::{BatchId, ItemCode};

use crate::record::{Batch, Item, ItemBarcode, NewBatch, SerialNo};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A record with this identifier already exists.
    #[error("duplicate entry: {0}")]
    Duplicate(String),

    /// The record to update does not exist.
    #[error("record not found: {0}")]
    Missing(String),

    /// The caller may not write to this store.
    #[error("insufficient permission to write {0}")]
    PermissionDenied(&'static str),

    /// The backing storage failed.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Whether a write goes through ordinary permission checks.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum WriteScope {
    /// Subject to the caller's write permission.
    Checked,
    /// Trusted system write; permission checks are skipped.
    Trusted,
}

/// Item master and barcode lookups.
pub trait ItemCatalog: Send + Sync {
    fn item(&self, code: &ItemCode) -> Result<Option<Item>, StoreError>;
    fn barcode(&self, barcode: &str) -> Result<Option<ItemBarcode>, StoreError>;
}

/// Batch records keyed by their derived identifier.
pub trait BatchStore: Send + Sync {
    fn find(&self, id: &BatchId) -> Result<Option<Batch>, StoreError>;

    /// Insert a new batch. Fails with [`StoreError::Duplicate`] if the identifier exists.
    fn create(&self, batch: NewBatch, scope: WriteScope) -> Result<Batch, StoreError>;

    /// Set the expiry date on an existing batch that has none.
    ///
    /// Check and write are atomic; a batch that already carries an expiry is
    /// returned unchanged.
    fn set_expiry_if_unset(
        &self,
        id: &BatchId,
        expiry: NaiveDate,
        scope: WriteScope,
    ) -> Result<Batch, StoreError>;
}

/// Serial number lookups.
pub trait SerialNoStore: Send + Sync {
    /// Records for the given serial numbers; unknown numbers are omitted.
    fn serial_numbers(&self, names: &[String]) -> Result<Vec<SerialNo>, StoreError>;
}

impl<S> ItemCatalog for Arc<S>
where
    S: ItemCatalog + ?Sized,
{
    fn item(&self, code: &ItemCode) -> Result<Option<Item>, StoreError> {
        (**self).item(code)
    }

    fn barcode(&self, barcode: &str) -> Result<Option<ItemBarcode>, StoreError> {
        (**self).barcode(barcode)
    }
}

impl<S> BatchStore for Arc<S>
where
    S: BatchStore + ?Sized,
{
    fn find(&self, id: &BatchId) -> Result<Option<Batch>, StoreError> {
        (**self).find(id)
    }

    fn create(&self, batch: NewBatch, scope: WriteScope) -> Result<Batch, StoreError> {
        (**self).create(batch, scope)
    }

    fn set_expiry_if_unset(
        &self,
        id: &BatchId,
        expiry: NaiveDate,
        scope: WriteScope,
    ) -> Result<Batch, StoreError> {
        (**self).set_expiry_if_unset(id, expiry, scope)
    }
}

impl<S> SerialNoStore for Arc<S>
where
    S: SerialNoStore + ?Sized,
{
    fn serial_numbers(&self, names: &[String]) -> Result<Vec<SerialNo>, StoreError> {
        (**self).serial_numbers(names)
    }
}
