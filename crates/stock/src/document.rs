//! Stock transaction documents as seen by the policy layer.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use surgishop_core::{BatchId, ItemCode, WarehouseId};

/// Document type of a stock-moving transaction.
///
/// Unknown host document types are kept verbatim in `Other` so that
/// classification stays total.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DocumentType {
    PurchaseReceipt,
    PurchaseInvoice,
    StockEntry,
    StockReconciliation,
    SalesInvoice,
    DeliveryNote,
    Other(String),
}

impl DocumentType {
    pub fn as_str(&self) -> &str {
        match self {
            DocumentType::PurchaseReceipt => "Purchase Receipt",
            DocumentType::PurchaseInvoice => "Purchase Invoice",
            DocumentType::StockEntry => "Stock Entry",
            DocumentType::StockReconciliation => "Stock Reconciliation",
            DocumentType::SalesInvoice => "Sales Invoice",
            DocumentType::DeliveryNote => "Delivery Note",
            DocumentType::Other(name) => name,
        }
    }

    pub fn is_purchase(&self) -> bool {
        matches!(
            self,
            DocumentType::PurchaseReceipt | DocumentType::PurchaseInvoice
        )
    }

    pub fn is_sales(&self) -> bool {
        matches!(self, DocumentType::SalesInvoice | DocumentType::DeliveryNote)
    }
}

impl From<String> for DocumentType {
    fn from(value: String) -> Self {
        match value.trim() {
            "Purchase Receipt" => DocumentType::PurchaseReceipt,
            "Purchase Invoice" => DocumentType::PurchaseInvoice,
            "Stock Entry" => DocumentType::StockEntry,
            "Stock Reconciliation" => DocumentType::StockReconciliation,
            "Sales Invoice" => DocumentType::SalesInvoice,
            "Delivery Note" => DocumentType::DeliveryNote,
            _ => DocumentType::Other(value),
        }
    }
}

impl From<&str> for DocumentType {
    fn from(value: &str) -> Self {
        DocumentType::from(value.to_string())
    }
}

impl From<DocumentType> for String {
    fn from(value: DocumentType) -> Self {
        match value {
            DocumentType::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl core::fmt::Display for DocumentType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Purpose of a stock entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StockEntryPurpose {
    MaterialReceipt,
    MaterialIssue,
    MaterialTransfer,
    Other(String),
}

impl StockEntryPurpose {
    pub fn as_str(&self) -> &str {
        match self {
            StockEntryPurpose::MaterialReceipt => "Material Receipt",
            StockEntryPurpose::MaterialIssue => "Material Issue",
            StockEntryPurpose::MaterialTransfer => "Material Transfer",
            StockEntryPurpose::Other(name) => name,
        }
    }
}

impl From<String> for StockEntryPurpose {
    fn from(value: String) -> Self {
        match value.trim() {
            "Material Receipt" => StockEntryPurpose::MaterialReceipt,
            "Material Issue" => StockEntryPurpose::MaterialIssue,
            "Material Transfer" => StockEntryPurpose::MaterialTransfer,
            _ => StockEntryPurpose::Other(value),
        }
    }
}

impl From<StockEntryPurpose> for String {
    fn from(value: StockEntryPurpose) -> Self {
        match value {
            StockEntryPurpose::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

/// Document lifecycle state (`0` draft, `1` submitted, `2` cancelled).
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum DocStatus {
    #[default]
    Draft,
    Submitted,
    Cancelled,
}

impl DocStatus {
    pub fn is_cancelled(self) -> bool {
        self == DocStatus::Cancelled
    }
}

impl TryFrom<u8> for DocStatus {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(DocStatus::Draft),
            1 => Ok(DocStatus::Submitted),
            2 => Ok(DocStatus::Cancelled),
            other => Err(format!("invalid docstatus: {other}")),
        }
    }
}

impl From<DocStatus> for u8 {
    fn from(value: DocStatus) -> Self {
        match value {
            DocStatus::Draft => 0,
            DocStatus::Submitted => 1,
            DocStatus::Cancelled => 2,
        }
    }
}

/// A stock transaction header plus its line items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub doctype: DocumentType,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub purpose: Option<StockEntryPurpose>,
    #[serde(default)]
    pub is_return: bool,
    #[serde(default)]
    pub posting_date: Option<NaiveDate>,
    #[serde(default)]
    pub docstatus: DocStatus,
    #[serde(default)]
    pub items: Vec<LineItem>,
}

impl Transaction {
    pub fn new(doctype: impl Into<DocumentType>) -> Self {
        Self {
            doctype: doctype.into(),
            name: None,
            purpose: None,
            is_return: false,
            posting_date: None,
            docstatus: DocStatus::Draft,
            items: Vec::new(),
        }
    }

    pub fn with_purpose(mut self, purpose: StockEntryPurpose) -> Self {
        self.purpose = Some(purpose);
        self
    }

    pub fn with_return(mut self, is_return: bool) -> Self {
        self.is_return = is_return;
        self
    }

    pub fn with_posting_date(mut self, date: NaiveDate) -> Self {
        self.posting_date = Some(date);
        self
    }

    pub fn with_docstatus(mut self, docstatus: DocStatus) -> Self {
        self.docstatus = docstatus;
        self
    }

    pub fn with_item(mut self, item: LineItem) -> Self {
        self.items.push(item);
        self
    }
}

/// One row of a stock transaction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(default, deserialize_with = "blank_as_none")]
    pub item_code: Option<ItemCode>,
    #[serde(rename = "s_warehouse", default, deserialize_with = "blank_as_none")]
    pub source_warehouse: Option<WarehouseId>,
    #[serde(rename = "t_warehouse", default, deserialize_with = "blank_as_none")]
    pub target_warehouse: Option<WarehouseId>,
    #[serde(default)]
    pub qty: f64,
    #[serde(rename = "batch_no", default, deserialize_with = "blank_as_none")]
    pub batch: Option<BatchId>,
    #[serde(default)]
    pub serial_no: Option<String>,
}

impl LineItem {
    pub fn new(qty: f64) -> Self {
        Self {
            qty,
            ..Self::default()
        }
    }

    pub fn with_source(mut self, warehouse: WarehouseId) -> Self {
        self.source_warehouse = Some(warehouse);
        self
    }

    pub fn with_target(mut self, warehouse: WarehouseId) -> Self {
        self.target_warehouse = Some(warehouse);
        self
    }

    pub fn with_batch(mut self, batch: BatchId) -> Self {
        self.batch = Some(batch);
        self
    }

    pub fn with_serial_no(mut self, serial_no: impl Into<String>) -> Self {
        self.serial_no = Some(serial_no.into());
        self
    }

    /// Serial numbers on this row (newline or comma separated; blanks dropped).
    pub fn serial_numbers(&self) -> Vec<String> {
        self.serial_no
            .as_deref()
            .map(|raw| {
                raw.split(['\n', ','])
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Host forms send empty strings for unset links.
fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: core::str::FromStr,
    T::Err: core::fmt::Display,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s.parse().map(Some).map_err(serde::de::Error::custom),
    }
}
