//! Transaction direction: does a line item bring stock into the system?

use serde::{Deserialize, Serialize};

use crate::document::{DocumentType, LineItem, StockEntryPurpose, Transaction};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Inbound,
    Outbound,
}

impl Direction {
    pub fn of(transaction: &Transaction, row: &LineItem) -> Self {
        if is_inbound(transaction, row) {
            Direction::Inbound
        } else {
            Direction::Outbound
        }
    }
}

/// Classify a line item as inbound (adds stock without removing it elsewhere).
///
/// Rules are evaluated in order; the first match wins:
///
/// 1. purchase receipt/invoice, not a return: inbound
/// 2. purchase receipt/invoice, return: outbound
/// 3. stock entry for material receipt: inbound
/// 4. stock entry for material transfer with a target and no source warehouse: inbound
/// 5. stock reconciliation with positive quantity: inbound
/// 6. sales invoice/delivery note, return: inbound
/// 7. anything else: outbound
pub fn is_inbound(transaction: &Transaction, row: &LineItem) -> bool {
    match &transaction.doctype {
        dt if dt.is_purchase() => !transaction.is_return,
        DocumentType::StockEntry => match transaction.purpose {
            Some(StockEntryPurpose::MaterialReceipt) => true,
            Some(StockEntryPurpose::MaterialTransfer) => {
                row.target_warehouse.is_some() && row.source_warehouse.is_none()
            }
            _ => false,
        },
        DocumentType::StockReconciliation => row.qty > 0.0,
        dt if dt.is_sales() => transaction.is_return,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use surgishop_core::WarehouseId;

    fn wh(name: &str) -> WarehouseId {
        WarehouseId::new(name).unwrap()
    }

    fn row() -> LineItem {
        LineItem::new(10.0)
    }

    #[test]
    fn purchase_documents_are_inbound_unless_returned() {
        for dt in [DocumentType::PurchaseReceipt, DocumentType::PurchaseInvoice] {
            let tx = Transaction::new(dt.clone());
            assert!(is_inbound(&tx, &row()));

            let ret = Transaction::new(dt).with_return(true);
            assert!(!is_inbound(&ret, &row()));
            assert_eq!(Direction::of(&ret, &row()), Direction::Outbound);
        }
    }

    #[test]
    fn material_receipt_is_inbound() {
        let tx = Transaction::new(DocumentType::StockEntry)
            .with_purpose(StockEntryPurpose::MaterialReceipt);
        assert!(is_inbound(&tx, &row()));
    }

    #[test]
    fn material_issue_is_outbound() {
        let tx = Transaction::new(DocumentType::StockEntry)
            .with_purpose(StockEntryPurpose::MaterialIssue);
        assert!(!is_inbound(&tx, &row().with_target(wh("Stores"))));
    }

    #[test]
    fn material_transfer_depends_on_warehouses() {
        let tx = Transaction::new(DocumentType::StockEntry)
            .with_purpose(StockEntryPurpose::MaterialTransfer);

        assert!(is_inbound(&tx, &row().with_target(wh("Stores"))));
        assert!(!is_inbound(
            &tx,
            &row().with_target(wh("Stores")).with_source(wh("Transit"))
        ));
        assert!(!is_inbound(&tx, &row().with_source(wh("Transit"))));
        assert!(!is_inbound(&tx, &row()));
    }

    #[test]
    fn stock_entry_without_purpose_is_outbound() {
        let tx = Transaction::new(DocumentType::StockEntry);
        assert!(!is_inbound(&tx, &row().with_target(wh("Stores"))));
    }

    #[test]
    fn reconciliation_is_inbound_only_for_positive_qty() {
        let tx = Transaction::new(DocumentType::StockReconciliation);
        assert!(is_inbound(&tx, &LineItem::new(0.5)));
        assert!(!is_inbound(&tx, &LineItem::new(0.0)));
        assert!(!is_inbound(&tx, &LineItem::new(-3.0)));
    }

    #[test]
    fn sales_returns_are_inbound() {
        for dt in [DocumentType::SalesInvoice, DocumentType::DeliveryNote] {
            assert!(!is_inbound(&Transaction::new(dt.clone()), &row()));
            assert!(is_inbound(&Transaction::new(dt).with_return(true), &row()));
        }
    }

    #[test]
    fn unknown_document_types_are_outbound() {
        let tx = Transaction::new("Work Order").with_return(true);
        assert!(!is_inbound(&tx, &row().with_target(wh("Stores"))));
    }

    fn doctype_strategy() -> impl Strategy<Value = DocumentType> {
        prop_oneof![
            Just(DocumentType::PurchaseReceipt),
            Just(DocumentType::PurchaseInvoice),
            Just(DocumentType::StockEntry),
            Just(DocumentType::StockReconciliation),
            Just(DocumentType::SalesInvoice),
            Just(DocumentType::DeliveryNote),
            "[A-Z][a-z]{2,10}".prop_map(DocumentType::Other),
        ]
    }

    fn purpose_strategy() -> impl Strategy<Value = Option<StockEntryPurpose>> {
        prop_oneof![
            Just(None),
            Just(Some(StockEntryPurpose::MaterialReceipt)),
            Just(Some(StockEntryPurpose::MaterialIssue)),
            Just(Some(StockEntryPurpose::MaterialTransfer)),
        ]
    }

    fn row_strategy() -> impl Strategy<Value = LineItem> {
        (any::<bool>(), any::<bool>(), -100.0f64..100.0).prop_map(|(src, tgt, qty)| {
            let mut row = LineItem::new(qty);
            if src {
                row = row.with_source(wh("Source"));
            }
            if tgt {
                row = row.with_target(wh("Target"));
            }
            row
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: classification is deterministic for any input.
        #[test]
        fn classification_is_deterministic(
            doctype in doctype_strategy(),
            purpose in purpose_strategy(),
            is_return in any::<bool>(),
            row in row_strategy(),
        ) {
            let mut tx = Transaction::new(doctype).with_return(is_return);
            tx.purpose = purpose;
            prop_assert_eq!(is_inbound(&tx, &row), is_inbound(&tx, &row));
        }

        /// Property: a purchase document flips direction with the return flag.
        #[test]
        fn purchase_return_flag_is_mutually_exclusive(
            invoice in any::<bool>(),
            row in row_strategy(),
        ) {
            let dt = if invoice { DocumentType::PurchaseInvoice } else { DocumentType::PurchaseReceipt };
            let normal = Transaction::new(dt.clone());
            let ret = Transaction::new(dt).with_return(true);
            prop_assert!(is_inbound(&normal, &row));
            prop_assert!(!is_inbound(&ret, &row));
        }

        /// Property: a material transfer is inbound iff target set and source unset.
        #[test]
        fn material_transfer_rule(row in row_strategy(), is_return in any::<bool>()) {
            let tx = Transaction::new(DocumentType::StockEntry)
                .with_purpose(StockEntryPurpose::MaterialTransfer)
                .with_return(is_return);
            let expected = row.target_warehouse.is_some() && row.source_warehouse.is_none();
            prop_assert_eq!(is_inbound(&tx, &row), expected);
        }

        /// Property: a reconciliation is inbound iff quantity is positive.
        #[test]
        fn reconciliation_rule(row in row_strategy()) {
            let tx = Transaction::new(DocumentType::StockReconciliation);
            prop_assert_eq!(is_inbound(&tx, &row), row.qty > 0.0);
        }
    }
}
