//! Item lookup by scanned GTIN.

use serde::{Deserialize, Serialize};

use surgishop_core::{DomainError, DomainResult, ItemCode};
use surgishop_stock::{Item, ItemCatalog};

use crate::element::{Gs1Element, is_gs1};
use crate::gtin::Gtin;

/// Item details returned for a scanned GTIN.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemMatch {
    pub item_code: ItemCode,
    pub item_name: String,
    pub uom: String,
    pub barcode: String,
    pub rate: f64,
    pub stock_uom: String,
    pub is_stock_item: bool,
    pub has_serial_no: bool,
    pub has_batch_no: bool,
}

impl ItemMatch {
    fn new(item: Item, barcode: &Gtin, uom: Option<String>) -> Self {
        Self {
            uom: uom.unwrap_or_else(|| item.stock_uom.clone()),
            barcode: barcode.to_string(),
            rate: item.valuation_rate,
            item_name: item.item_name,
            stock_uom: item.stock_uom,
            is_stock_item: item.is_stock_item,
            has_serial_no: item.has_serial_no,
            has_batch_no: item.has_batch_no,
            item_code: item.item_code,
        }
    }
}

/// Look up an item by GTIN: barcode mapping first, then an item whose code is the GTIN.
///
/// Blank or malformed input and disabled items are hard failures; no match is `Ok(None)`.
pub fn item_by_gtin<C>(catalog: &C, raw: &str) -> DomainResult<Option<ItemMatch>>
where
    C: ItemCatalog + ?Sized,
{
    if raw.trim().is_empty() {
        return Err(DomainError::invalid_argument("GTIN-01 is required"));
    }
    let gtin = Gtin::parse(raw)?;
    tracing::debug!(gtin = %gtin, "looking up item by GTIN");

    if let Some(mapping) = catalog.barcode(gtin.as_str())? {
        let item = catalog
            .item(&mapping.item_code)?
            .ok_or_else(DomainError::not_found)?;
        ensure_enabled(&item)?;
        tracing::info!(gtin = %gtin, item_code = %item.item_code, "item found by barcode");
        return Ok(Some(ItemMatch::new(item, &gtin, mapping.uom)));
    }

    let code = ItemCode::new(gtin.as_str())?;
    if let Some(item) = catalog.item(&code)? {
        ensure_enabled(&item)?;
        tracing::info!(gtin = %gtin, item_code = %item.item_code, "item found by item code");
        return Ok(Some(ItemMatch::new(item, &gtin, None)));
    }

    tracing::info!(gtin = %gtin, "no item found for GTIN");
    Ok(None)
}

fn ensure_enabled(item: &Item) -> DomainResult<()> {
    if item.disabled {
        return Err(DomainError::invalid_argument(format!(
            "Item {} is disabled",
            item.item_code
        )));
    }
    Ok(())
}

/// Operator-facing summary of a barcode scan attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanDiagnosis {
    pub success: bool,
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
    /// Whether the input starts with a known application identifier.
    pub is_gs1: bool,
    /// `(AI)data` rendering when the input decodes as an element string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub human_readable: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item: Option<ItemMatch>,
}

/// Decode a barcode and look up its GTIN, describing the result. Never fails.
///
/// A decodable element string contributes its `(01)` GTIN; otherwise the whole
/// input is tried as a GTIN.
pub fn debug_barcode_scan<C>(catalog: &C, barcode: &str, context: &str) -> ScanDiagnosis
where
    C: ItemCatalog + ?Sized,
{
    tracing::info!(barcode, context, "barcode scan diagnosis");

    let trimmed = barcode.trim();
    let element = Gs1Element::parse(trimmed);
    let gtin = element
        .as_ref()
        .and_then(|el| el.gtin.as_deref())
        .unwrap_or(barcode);

    let mut diagnosis = match item_by_gtin(catalog, gtin) {
        Ok(Some(item)) => ScanDiagnosis {
            success: true,
            kind: "GS1".to_string(),
            message: format!("Item found: {}", item.item_code),
            is_gs1: false,
            human_readable: None,
            error: None,
            item: Some(item),
        },
        Ok(None) => ScanDiagnosis {
            success: false,
            kind: "GS1".to_string(),
            message: "No item found for GTIN-01".to_string(),
            is_gs1: false,
            human_readable: None,
            error: None,
            item: None,
        },
        Err(e) => ScanDiagnosis {
            success: false,
            kind: "GS1".to_string(),
            message: format!("Error processing GS1 barcode: {e}"),
            is_gs1: false,
            human_readable: None,
            error: Some(e.to_string()),
            item: None,
        },
    };
    diagnosis.is_gs1 = is_gs1(trimmed);
    diagnosis.human_readable = element.map(|el| el.to_human_readable());
    diagnosis
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use surgishop_stock::{ItemBarcode, StoreError};

    #[derive(Default)]
    struct Catalog {
        items: HashMap<ItemCode, Item>,
        barcodes: HashMap<String, ItemBarcode>,
    }

    impl ItemCatalog for Catalog {
        fn item(&self, code: &ItemCode) -> Result<Option<Item>, StoreError> {
            Ok(self.items.get(code).cloned())
        }

        fn barcode(&self, barcode: &str) -> Result<Option<ItemBarcode>, StoreError> {
            Ok(self.barcodes.get(barcode).cloned())
        }
    }

    fn catalog() -> Catalog {
        let mut c = Catalog::default();

        let mut boxed = Item::new(ItemCode::new("GAUZE-BOX").unwrap()).batched();
        boxed.stock_uom = "Box".to_string();
        boxed.valuation_rate = 12.5;
        c.items.insert(boxed.item_code.clone(), boxed);
        c.barcodes.insert(
            "10614141999993".to_string(),
            ItemBarcode {
                barcode: "10614141999993".to_string(),
                item_code: ItemCode::new("GAUZE-BOX").unwrap(),
                uom: Some("Case".to_string()),
            },
        );

        let by_code = Item::new(ItemCode::new("00614141999996").unwrap());
        c.items.insert(by_code.item_code.clone(), by_code);

        let off = Item::new(ItemCode::new("20614141999990").unwrap()).disabled();
        c.items.insert(off.item_code.clone(), off);
        c
    }

    #[test]
    fn barcode_mapping_wins_and_carries_its_uom() {
        let m = item_by_gtin(&catalog(), " 1061414-1999993 ").unwrap().unwrap();
        assert_eq!(m.item_code.as_str(), "GAUZE-BOX");
        assert_eq!(m.uom, "Case");
        assert_eq!(m.stock_uom, "Box");
        assert_eq!(m.rate, 12.5);
        assert_eq!(m.barcode, "10614141999993");
        assert!(m.has_batch_no);
    }

    #[test]
    fn falls_back_to_item_code() {
        let m = item_by_gtin(&catalog(), "00614141999996").unwrap().unwrap();
        assert_eq!(m.item_code.as_str(), "00614141999996");
        assert_eq!(m.uom, "Nos");
    }

    #[test]
    fn unknown_gtin_is_none() {
        assert_eq!(item_by_gtin(&catalog(), "99999999999999").unwrap(), None);
    }

    #[test]
    fn blank_malformed_and_disabled_are_errors() {
        let c = catalog();
        assert_eq!(
            item_by_gtin(&c, " ").unwrap_err(),
            DomainError::invalid_argument("GTIN-01 is required")
        );
        assert!(item_by_gtin(&c, "1234").is_err());
        assert_eq!(
            item_by_gtin(&c, "20614141999990").unwrap_err(),
            DomainError::invalid_argument("Item 20614141999990 is disabled")
        );
    }

    #[test]
    fn diagnosis_reports_each_outcome() {
        let c = catalog();

        let found = debug_barcode_scan(&c, "10614141999993", "Stock Entry");
        assert!(found.success);
        assert_eq!(found.message, "Item found: GAUZE-BOX");

        let missing = debug_barcode_scan(&c, "99999999999999", "");
        assert!(!missing.success);
        assert_eq!(missing.message, "No item found for GTIN-01");

        let broken = debug_barcode_scan(&c, "12", "");
        assert!(!broken.success);
        assert!(broken.error.is_some());

        let json = serde_json::to_value(&found).unwrap();
        assert_eq!(json["type"], "GS1");
    }

    #[test]
    fn diagnosis_decodes_element_strings() {
        let c = catalog();

        let scan = debug_barcode_scan(&c, "]C10110614141999993\u{1d}10LOT7\u{1d}17270615", "");
        assert!(scan.success);
        assert!(scan.is_gs1);
        assert_eq!(scan.item.unwrap().item_code.as_str(), "GAUZE-BOX");
        assert_eq!(
            scan.human_readable.as_deref(),
            Some("(01)10614141999993(17)270615(10)LOT7")
        );

        let bracketed = debug_barcode_scan(&c, "(01)00614141999996(10)A1", "");
        assert!(bracketed.success);
        assert_eq!(bracketed.message, "Item found: 00614141999996");

        let plain = debug_barcode_scan(&c, "99999999999999", "");
        assert!(!plain.is_gs1);
        assert_eq!(plain.human_readable, None);
        assert!(serde_json::to_value(&plain).unwrap().get("human_readable").is_none());
    }
}
