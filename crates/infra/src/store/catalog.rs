use std::collections::HashMap;
use std::sync::RwLock;

use surgishop_core::ItemCode;
use surgishop_stock::{Item, ItemBarcode, ItemCatalog, StoreError};

use super::poisoned;

/// In-memory item master plus barcode table.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    items: RwLock<HashMap<ItemCode, Item>>,
    barcodes: RwLock<HashMap<String, ItemBarcode>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn upsert_item(&self, item: Item) -> Result<(), StoreError> {
        let mut items = self.items.write().map_err(|_| poisoned())?;
        items.insert(item.item_code.clone(), item);
        Ok(())
    }

    /// Attach a barcode to an item. A barcode belongs to at most one item.
    pub fn add_barcode(&self, barcode: ItemBarcode) -> Result<(), StoreError> {
        let key = barcode.barcode.trim().to_string();
        let mut barcodes = self.barcodes.write().map_err(|_| poisoned())?;
        match barcodes.get(&key) {
            Some(existing) if existing.item_code != barcode.item_code => {
                Err(StoreError::Duplicate(format!("barcode {key}")))
            }
            _ => {
                barcodes.insert(key, barcode);
                Ok(())
            }
        }
    }

    pub fn item_count(&self) -> usize {
        self.items.read().map(|m| m.len()).unwrap_or(0)
    }
}

impl ItemCatalog for InMemoryCatalog {
    fn item(&self, code: &ItemCode) -> Result<Option<Item>, StoreError> {
        let items = self.items.read().map_err(|_| poisoned())?;
        Ok(items.get(code).cloned())
    }

    fn barcode(&self, barcode: &str) -> Result<Option<ItemBarcode>, StoreError> {
        let barcodes = self.barcodes.read().map_err(|_| poisoned())?;
        Ok(barcodes.get(barcode.trim()).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping(barcode: &str, item: &str) -> ItemBarcode {
        ItemBarcode {
            barcode: barcode.to_string(),
            item_code: ItemCode::new(item).unwrap(),
            uom: None,
        }
    }

    #[test]
    fn barcode_resolves_to_owning_item() {
        let catalog = InMemoryCatalog::new();
        catalog
            .upsert_item(Item::new(ItemCode::new("ITEM-A").unwrap()))
            .unwrap();
        catalog.add_barcode(mapping("12345678901234", "ITEM-A")).unwrap();
        catalog.add_barcode(mapping("22345678901234", "ITEM-A")).unwrap();

        let hit = catalog.barcode(" 12345678901234").unwrap().unwrap();
        assert_eq!(hit.item_code.as_str(), "ITEM-A");
        assert!(catalog.barcode("00000000000000").unwrap().is_none());
        assert_eq!(catalog.item_count(), 1);
    }

    #[test]
    fn barcode_cannot_move_between_items() {
        let catalog = InMemoryCatalog::new();
        catalog.add_barcode(mapping("12345678901234", "ITEM-A")).unwrap();
        catalog.add_barcode(mapping("12345678901234", "ITEM-A")).unwrap();
        assert!(matches!(
            catalog.add_barcode(mapping("12345678901234", "ITEM-B")),
            Err(StoreError::Duplicate(_))
        ));
    }
}
