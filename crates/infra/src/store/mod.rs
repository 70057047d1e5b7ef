//! In-memory implementations of the stock store traits.
//!
//! Intended for tests/dev and single-process deployments. Each store guards
//! its map with one `RwLock`, which makes batch check-and-insert atomic.

pub mod batch;
pub mod catalog;
pub mod serial;

pub use batch::InMemoryBatchStore;
pub use catalog::InMemoryCatalog;
pub use serial::InMemorySerialNoStore;

use surgishop_stock::StoreError;

fn poisoned() -> StoreError {
    StoreError::Unavailable("lock poisoned".to_string())
}
