use std::collections::HashMap;
use std::sync::RwLock;

use chrono::NaiveDate;

use surgishop_core::BatchId;
use surgishop_stock::{Batch, BatchStore, NewBatch, StoreError, WriteScope};

use super::poisoned;

/// In-memory batch table keyed by batch identifier.
#[derive(Debug)]
pub struct InMemoryBatchStore {
    rows: RwLock<HashMap<BatchId, Batch>>,
    checked_writes_allowed: bool,
}

impl InMemoryBatchStore {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(HashMap::new()),
            checked_writes_allowed: true,
        }
    }

    /// A store whose callers lack batch write permission; only trusted writes succeed.
    pub fn read_only() -> Self {
        Self {
            checked_writes_allowed: false,
            ..Self::new()
        }
    }

    pub fn len(&self) -> usize {
        self.rows.read().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Insert or replace a batch (seeding).
    pub fn upsert(&self, batch: Batch) -> Result<(), StoreError> {
        let mut rows = self.rows.write().map_err(|_| poisoned())?;
        rows.insert(batch.id.clone(), batch);
        Ok(())
    }

    fn authorize(&self, scope: WriteScope) -> Result<(), StoreError> {
        match scope {
            WriteScope::Trusted => Ok(()),
            WriteScope::Checked if self.checked_writes_allowed => Ok(()),
            WriteScope::Checked => Err(StoreError::PermissionDenied("Batch")),
        }
    }
}

impl Default for InMemoryBatchStore {
    fn default() -> Self {
        Self::new()
    }
}

impl BatchStore for InMemoryBatchStore {
    fn find(&self, id: &BatchId) -> Result<Option<Batch>, StoreError> {
        let rows = self.rows.read().map_err(|_| poisoned())?;
        Ok(rows.get(id).cloned())
    }

    fn create(&self, batch: NewBatch, scope: WriteScope) -> Result<Batch, StoreError> {
        self.authorize(scope)?;

        // Existence check and insert happen under the same write lock.
        let mut rows = self.rows.write().map_err(|_| poisoned())?;
        if rows.contains_key(&batch.id) {
            return Err(StoreError::Duplicate(batch.id.to_string()));
        }

        let batch = Batch::from(batch);
        rows.insert(batch.id.clone(), batch.clone());
        tracing::debug!(batch_id = %batch.id, "batch inserted");
        Ok(batch)
    }

    fn set_expiry_if_unset(
        &self,
        id: &BatchId,
        expiry: NaiveDate,
        scope: WriteScope,
    ) -> Result<Batch, StoreError> {
        self.authorize(scope)?;

        let mut rows = self.rows.write().map_err(|_| poisoned())?;
        let row = rows
            .get_mut(id)
            .ok_or_else(|| StoreError::Missing(id.to_string()))?;
        if row.expiry_date.is_none() {
            row.expiry_date = Some(expiry);
        }
        Ok(row.clone())
    }
}
