//! Catalog seeding from a JSON document.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use surgishop_stock::{Batch, Item, ItemBarcode, SerialNo, StoreError};

use crate::store::{InMemoryBatchStore, InMemoryCatalog, InMemorySerialNoStore};

/// Records loaded into the in-memory stores at startup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogSeed {
    #[serde(default)]
    pub items: Vec<Item>,
    #[serde(default)]
    pub barcodes: Vec<ItemBarcode>,
    #[serde(default)]
    pub batches: Vec<Batch>,
    #[serde(default)]
    pub serial_numbers: Vec<SerialNo>,
}

impl CatalogSeed {
    pub fn from_json(raw: &str) -> anyhow::Result<Self> {
        serde_json::from_str(raw).context("invalid catalog seed JSON")
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading catalog seed {}", path.display()))?;
        Self::from_json(&raw)
    }

    pub fn apply(
        &self,
        catalog: &InMemoryCatalog,
        batches: &InMemoryBatchStore,
        serials: &InMemorySerialNoStore,
    ) -> Result<(), StoreError> {
        for item in &self.items {
            catalog.upsert_item(item.clone())?;
        }
        for barcode in &self.barcodes {
            catalog.add_barcode(barcode.clone())?;
        }
        for batch in &self.batches {
            batches.upsert(batch.clone())?;
        }
        for serial in &self.serial_numbers {
            serials.upsert(serial.clone())?;
        }

        tracing::info!(
            items = self.items.len(),
            barcodes = self.barcodes.len(),
            batches = self.batches.len(),
            serial_numbers = self.serial_numbers.len(),
            "catalog seeded"
        );
        Ok(())
    }
}
