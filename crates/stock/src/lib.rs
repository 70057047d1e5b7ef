//! Stock document policy.
//!
//! This crate contains the decision rules applied to stock transactions,
//! implemented purely as deterministic domain logic. Record storage is reached
//! through the traits in [`store`]; nothing here performs IO directly.

pub mod direction;
pub mod document;
pub mod expiry;
pub mod record;
pub mod store;

pub use direction::{Direction, is_inbound};
pub use document::{DocStatus, DocumentType, LineItem, StockEntryPurpose, Transaction};
pub use expiry::{ExpiryPolicies, ExpiryPolicy, validate_batches};
pub use record::{Batch, Item, ItemBarcode, NewBatch, SerialNo};
pub use store::{BatchStore, ItemCatalog, SerialNoStore, StoreError, WriteScope};
