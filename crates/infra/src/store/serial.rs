use std::collections::HashMap;
use std::sync::RwLock;

use surgishop_stock::{SerialNo, SerialNoStore, StoreError};

use super::poisoned;

/// In-memory serial number table.
#[derive(Debug, Default)]
pub struct InMemorySerialNoStore {
    rows: RwLock<HashMap<String, SerialNo>>,
}

impl InMemorySerialNoStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn upsert(&self, serial: SerialNo) -> Result<(), StoreError> {
        let mut rows = self.rows.write().map_err(|_| poisoned())?;
        rows.insert(serial.name.clone(), serial);
        Ok(())
    }
}

impl SerialNoStore for InMemorySerialNoStore {
    fn serial_numbers(&self, names: &[String]) -> Result<Vec<SerialNo>, StoreError> {
        let rows = self.rows.read().map_err(|_| poisoned())?;
        Ok(names.iter().filter_map(|n| rows.get(n).cloned()).collect())
    }
}
