//! Master and batch records owned by the host platform.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use surgishop_core::{BatchId, Entity, ItemCode, WarehouseId};

/// Item master record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub item_code: ItemCode,
    #[serde(default)]
    pub item_name: String,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default = "default_true")]
    pub is_stock_item: bool,
    #[serde(default)]
    pub has_batch_no: bool,
    #[serde(default)]
    pub has_serial_no: bool,
    #[serde(default = "default_uom")]
    pub stock_uom: String,
    #[serde(default)]
    pub valuation_rate: f64,
}

fn default_true() -> bool {
    true
}

fn default_uom() -> String {
    "Nos".to_string()
}

impl Item {
    pub fn new(item_code: ItemCode) -> Self {
        Self {
            item_name: item_code.to_string(),
            item_code,
            disabled: false,
            is_stock_item: true,
            has_batch_no: false,
            has_serial_no: false,
            stock_uom: default_uom(),
            valuation_rate: 0.0,
        }
    }

    pub fn batched(mut self) -> Self {
        self.has_batch_no = true;
        self
    }

    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }
}

impl Entity for Item {
    type Id = ItemCode;

    fn id(&self) -> &Self::Id {
        &self.item_code
    }
}

/// Barcode row attached to an item (many barcodes to one item).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemBarcode {
    pub barcode: String,
    #[serde(rename = "parent")]
    pub item_code: ItemCode,
    #[serde(default)]
    pub uom: Option<String>,
}

/// Batch record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Batch {
    #[serde(rename = "name")]
    pub id: BatchId,
    pub item: ItemCode,
    #[serde(default)]
    pub expiry_date: Option<NaiveDate>,
}

impl Entity for Batch {
    type Id = BatchId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Fields for a batch that does not exist yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBatch {
    pub id: BatchId,
    pub item: ItemCode,
    pub expiry_date: Option<NaiveDate>,
}

impl From<NewBatch> for Batch {
    fn from(value: NewBatch) -> Self {
        Self {
            id: value.id,
            item: value.item,
            expiry_date: value.expiry_date,
        }
    }
}

/// Serial number record: where a serialised unit currently sits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerialNo {
    pub name: String,
    #[serde(default)]
    pub batch_no: Option<BatchId>,
    #[serde(default)]
    pub warehouse: Option<WarehouseId>,
}
