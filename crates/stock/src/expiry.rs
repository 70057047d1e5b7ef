//! Batch-expiry validation for stock transactions.
//!
//! The policy is passed in by the caller for each validation; there is no
//! process-wide switch.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use surgishop_core::{DomainError, DomainResult};

use crate::direction::is_inbound;
use crate::document::{LineItem, Transaction};
use crate::store::{BatchStore, SerialNoStore, StoreError};

impl From<StoreError> for DomainError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::Duplicate(key) => DomainError::conflict(format!("duplicate entry: {key}")),
            StoreError::Missing(_) => DomainError::not_found(),
            other => DomainError::Storage(other.to_string()),
        }
    }
}

/// How expired batches are treated on a document.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExpiryPolicy {
    /// Inbound rows may carry expired batches; outbound rows may not.
    #[default]
    EnforceOutbound,
    /// No expiry checks at all.
    Disabled,
}

impl ExpiryPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            ExpiryPolicy::EnforceOutbound => "enforce-outbound",
            ExpiryPolicy::Disabled => "disabled",
        }
    }

    /// Whether the expiry check is skipped for this row.
    pub fn skips(self, transaction: &Transaction, row: &LineItem) -> bool {
        match self {
            ExpiryPolicy::Disabled => true,
            ExpiryPolicy::EnforceOutbound => is_inbound(transaction, row),
        }
    }
}

impl core::str::FromStr for ExpiryPolicy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "enforce-outbound" => Ok(ExpiryPolicy::EnforceOutbound),
            "disabled" => Ok(ExpiryPolicy::Disabled),
            other => Err(DomainError::invalid_argument(format!(
                "unknown expiry policy '{other}' (expected enforce-outbound or disabled)"
            ))),
        }
    }
}

/// Expiry policy selection per document type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpiryPolicies {
    default: ExpiryPolicy,
    overrides: HashMap<String, ExpiryPolicy>,
}

impl ExpiryPolicies {
    pub fn new(default: ExpiryPolicy) -> Self {
        Self {
            default,
            overrides: HashMap::new(),
        }
    }

    pub fn with_override(
        mut self,
        doctype: impl Into<crate::document::DocumentType>,
        policy: ExpiryPolicy,
    ) -> Self {
        self.overrides.insert(String::from(doctype.into()), policy);
        self
    }

    pub fn default_policy(&self) -> ExpiryPolicy {
        self.default
    }

    pub fn policy_for(&self, transaction: &Transaction) -> ExpiryPolicy {
        self.overrides
            .get(transaction.doctype.as_str())
            .copied()
            .unwrap_or(self.default)
    }
}

/// Validate batch usage on every row of a transaction.
///
/// Checks, per row (reported 1-based):
/// - serial numbers on the row must not be stocked under a different batch;
/// - unless `policy` skips the row, a batch used with positive quantity on a
///   dated, non-cancelled document must not have expired before the posting date.
pub fn validate_batches<B, S>(
    transaction: &Transaction,
    policy: ExpiryPolicy,
    batches: &B,
    serials: &S,
) -> DomainResult<()>
where
    B: BatchStore + ?Sized,
    S: SerialNoStore + ?Sized,
{
    for (idx, row) in transaction.items.iter().enumerate() {
        let row_no = idx + 1;

        check_serial_batch(row_no, row, serials)?;

        if policy.skips(transaction, row) {
            tracing::debug!(
                doctype = %transaction.doctype,
                row = row_no,
                policy = policy.as_str(),
                "skipping batch expiry check"
            );
            continue;
        }

        let Some(batch_id) = row.batch.as_ref() else {
            continue;
        };
        let Some(posting_date) = transaction.posting_date else {
            continue;
        };
        if row.qty <= 0.0 || transaction.docstatus.is_cancelled() {
            continue;
        }

        let expiry = batches.find(batch_id)?.and_then(|b| b.expiry_date);
        if let Some(expiry) = expiry {
            if expiry < posting_date {
                tracing::warn!(
                    doctype = %transaction.doctype,
                    row = row_no,
                    batch_id = %batch_id,
                    %expiry,
                    %posting_date,
                    "expired batch on outbound row"
                );
                return Err(DomainError::expired_batch(row_no, batch_id.as_str()));
            }
        }
    }

    Ok(())
}

fn check_serial_batch<S>(row_no: usize, row: &LineItem, serials: &S) -> DomainResult<()>
where
    S: SerialNoStore + ?Sized,
{
    let Some(batch_id) = row.batch.as_ref() else {
        return Ok(());
    };
    let names = row.serial_numbers();
    if names.is_empty() {
        return Ok(());
    }

    for serial in serials.serial_numbers(&names)? {
        if serial.warehouse.is_some() && serial.batch_no.as_ref() != Some(batch_id) {
            return Err(DomainError::SerialBatchMismatch {
                row: row_no,
                serial_no: serial.name,
                batch: batch_id.to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    use chrono::NaiveDate;
    use surgishop_core::{BatchId, ItemCode, WarehouseId};

    use crate::document::{DocStatus, DocumentType, StockEntryPurpose};
    use crate::record::{Batch, NewBatch, SerialNo};
    use crate::store::WriteScope;

    #[derive(Default)]
    struct Batches(Mutex<HashMap<BatchId, Batch>>);

    impl Batches {
        fn with(self, id: &str, expiry: Option<NaiveDate>) -> Self {
            let id = BatchId::new(id).unwrap();
            self.0.lock().unwrap().insert(
                id.clone(),
                Batch {
                    id,
                    item: ItemCode::new("ITEM-A").unwrap(),
                    expiry_date: expiry,
                },
            );
            self
        }
    }

    impl BatchStore for Batches {
        fn find(&self, id: &BatchId) -> Result<Option<Batch>, StoreError> {
            Ok(self.0.lock().unwrap().get(id).cloned())
        }

        fn create(&self, batch: NewBatch, _scope: WriteScope) -> Result<Batch, StoreError> {
            let batch = Batch::from(batch);
            self.0.lock().unwrap().insert(batch.id.clone(), batch.clone());
            Ok(batch)
        }

        fn set_expiry_if_unset(
            &self,
            id: &BatchId,
            expiry: NaiveDate,
            _scope: WriteScope,
        ) -> Result<Batch, StoreError> {
            let mut map = self.0.lock().unwrap();
            let b = map.get_mut(id).ok_or_else(|| StoreError::Missing(id.to_string()))?;
            b.expiry_date.get_or_insert(expiry);
            Ok(b.clone())
        }
    }

    #[derive(Default)]
    struct Serials(Vec<SerialNo>);

    impl SerialNoStore for Serials {
        fn serial_numbers(&self, names: &[String]) -> Result<Vec<SerialNo>, StoreError> {
            Ok(self
                .0
                .iter()
                .filter(|s| names.contains(&s.name))
                .cloned()
                .collect())
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn batch(id: &str) -> BatchId {
        BatchId::new(id).unwrap()
    }

    fn expired_store() -> Batches {
        Batches::default().with("ITEM-A-OLD", Some(date(2024, 12, 31)))
    }

    fn delivery(posting: NaiveDate) -> Transaction {
        Transaction::new(DocumentType::DeliveryNote)
            .with_posting_date(posting)
            .with_item(LineItem::new(1.0).with_batch(batch("ITEM-A-OLD")))
    }

    #[test]
    fn outbound_row_with_expired_batch_fails() {
        let err = validate_batches(
            &delivery(date(2025, 1, 15)),
            ExpiryPolicy::EnforceOutbound,
            &expired_store(),
            &Serials::default(),
        )
        .unwrap_err();

        assert_eq!(err, DomainError::expired_batch(1, "ITEM-A-OLD"));
    }

    #[test]
    fn expiry_on_posting_date_is_still_valid() {
        let res = validate_batches(
            &delivery(date(2024, 12, 31)),
            ExpiryPolicy::EnforceOutbound,
            &expired_store(),
            &Serials::default(),
        );
        assert!(res.is_ok());
    }

    #[test]
    fn inbound_row_with_expired_batch_passes() {
        let tx = Transaction::new(DocumentType::PurchaseReceipt)
            .with_posting_date(date(2025, 1, 15))
            .with_item(LineItem::new(4.0).with_batch(batch("ITEM-A-OLD")));

        assert!(
            validate_batches(&tx, ExpiryPolicy::EnforceOutbound, &expired_store(), &Serials::default())
                .is_ok()
        );
    }

    #[test]
    fn purchase_return_with_expired_batch_fails() {
        let tx = Transaction::new(DocumentType::PurchaseReceipt)
            .with_return(true)
            .with_posting_date(date(2025, 1, 15))
            .with_item(LineItem::new(4.0).with_batch(batch("ITEM-A-OLD")));

        let err =
            validate_batches(&tx, ExpiryPolicy::EnforceOutbound, &expired_store(), &Serials::default())
                .unwrap_err();
        assert!(matches!(err, DomainError::ExpiredBatch { row: 1, .. }));
    }

    #[test]
    fn disabled_policy_skips_every_row() {
        assert!(
            validate_batches(
                &delivery(date(2025, 1, 15)),
                ExpiryPolicy::Disabled,
                &expired_store(),
                &Serials::default(),
            )
            .is_ok()
        );
    }

    #[test]
    fn preconditions_gate_the_check() {
        let store = expired_store();
        let serials = Serials::default();
        let policy = ExpiryPolicy::EnforceOutbound;

        let cancelled = delivery(date(2025, 1, 15)).with_docstatus(DocStatus::Cancelled);
        assert!(validate_batches(&cancelled, policy, &store, &serials).is_ok());

        let undated = Transaction::new(DocumentType::DeliveryNote)
            .with_item(LineItem::new(1.0).with_batch(batch("ITEM-A-OLD")));
        assert!(validate_batches(&undated, policy, &store, &serials).is_ok());

        let zero_qty = Transaction::new(DocumentType::DeliveryNote)
            .with_posting_date(date(2025, 1, 15))
            .with_item(LineItem::new(0.0).with_batch(batch("ITEM-A-OLD")));
        assert!(validate_batches(&zero_qty, policy, &store, &serials).is_ok());

        let unknown_batch = Transaction::new(DocumentType::DeliveryNote)
            .with_posting_date(date(2025, 1, 15))
            .with_item(LineItem::new(1.0).with_batch(batch("ITEM-A-NEW")));
        assert!(validate_batches(&unknown_batch, policy, &store, &serials).is_ok());
    }

    #[test]
    fn row_number_points_at_the_offending_line() {
        let store = expired_store().with("ITEM-A-GOOD", Some(date(2030, 1, 1)));
        let tx = Transaction::new(DocumentType::StockEntry)
            .with_purpose(StockEntryPurpose::MaterialIssue)
            .with_posting_date(date(2025, 1, 15))
            .with_item(LineItem::new(1.0).with_batch(batch("ITEM-A-GOOD")))
            .with_item(LineItem::new(1.0))
            .with_item(LineItem::new(2.0).with_batch(batch("ITEM-A-OLD")));

        let err = validate_batches(&tx, ExpiryPolicy::EnforceOutbound, &store, &Serials::default())
            .unwrap_err();
        assert_eq!(err, DomainError::expired_batch(3, "ITEM-A-OLD"));
    }

    #[test]
    fn serial_in_another_batch_is_rejected_even_when_expiry_is_skipped() {
        let serials = Serials(vec![SerialNo {
            name: "SN-1".to_string(),
            batch_no: Some(batch("ITEM-A-OTHER")),
            warehouse: Some(WarehouseId::new("Stores").unwrap()),
        }]);
        let tx = Transaction::new(DocumentType::PurchaseReceipt)
            .with_item(LineItem::new(1.0).with_batch(batch("ITEM-A-OLD")).with_serial_no("SN-1"));

        let err = validate_batches(&tx, ExpiryPolicy::Disabled, &expired_store(), &serials)
            .unwrap_err();
        assert_eq!(
            err,
            DomainError::SerialBatchMismatch {
                row: 1,
                serial_no: "SN-1".to_string(),
                batch: "ITEM-A-OLD".to_string(),
            }
        );
    }

    #[test]
    fn serial_without_warehouse_is_not_checked() {
        let serials = Serials(vec![SerialNo {
            name: "SN-1".to_string(),
            batch_no: Some(batch("ITEM-A-OTHER")),
            warehouse: None,
        }]);
        let tx = Transaction::new(DocumentType::PurchaseReceipt)
            .with_item(LineItem::new(1.0).with_batch(batch("ITEM-A-OLD")).with_serial_no("SN-1"));

        assert!(validate_batches(&tx, ExpiryPolicy::EnforceOutbound, &expired_store(), &serials).is_ok());
    }

    #[test]
    fn policies_select_per_document_type() {
        let policies = ExpiryPolicies::new(ExpiryPolicy::EnforceOutbound)
            .with_override(DocumentType::StockReconciliation, ExpiryPolicy::Disabled);

        let recon = Transaction::new(DocumentType::StockReconciliation);
        let sale = Transaction::new(DocumentType::SalesInvoice);
        assert_eq!(policies.policy_for(&recon), ExpiryPolicy::Disabled);
        assert_eq!(policies.policy_for(&sale), ExpiryPolicy::EnforceOutbound);
        assert_eq!(policies.default_policy(), ExpiryPolicy::EnforceOutbound);
    }

    #[test]
    fn policy_parses_from_config_strings() {
        assert_eq!("Disabled".parse::<ExpiryPolicy>().unwrap(), ExpiryPolicy::Disabled);
        assert_eq!(
            " enforce-outbound ".parse::<ExpiryPolicy>().unwrap(),
            ExpiryPolicy::EnforceOutbound
        );
        assert!("research".parse::<ExpiryPolicy>().is_err());
    }
}
