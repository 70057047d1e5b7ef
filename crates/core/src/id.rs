//! Strongly-typed identifiers used across the domain.
//!
//! Host records are keyed by human-readable names rather than UUIDs, so every
//! identifier here wraps a non-empty, trimmed string.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Identifier (name) of an item master record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemCode(String);

/// Identifier (name) of a batch record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BatchId(String);

/// Identifier (name) of a warehouse.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WarehouseId(String);

macro_rules! impl_name_newtype {
    ($t:ty, $name:literal) => {
        impl $t {
            /// Build an identifier from a raw name, trimming surrounding whitespace.
            pub fn new(raw: impl AsRef<str>) -> Result<Self, DomainError> {
                let trimmed = raw.as_ref().trim();
                if trimmed.is_empty() {
                    return Err(DomainError::invalid_argument(format!(
                        "{} cannot be empty",
                        $name
                    )));
                }
                Ok(Self(trimmed.to_string()))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $t {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl From<$t> for String {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }
    };
}

impl_name_newtype!(ItemCode, "ItemCode");
impl_name_newtype!(BatchId, "BatchId");
impl_name_newtype!(WarehouseId, "WarehouseId");

impl BatchId {
    /// Deterministic batch identifier for an item and a supplier lot: `{item_code}-{lot}`.
    ///
    /// The lot is trimmed; an empty lot is rejected.
    pub fn derive(item_code: &ItemCode, lot: &str) -> Result<Self, DomainError> {
        let lot = lot.trim();
        if lot.is_empty() {
            return Err(DomainError::invalid_argument("Lot Number is required."));
        }
        Ok(Self(format!("{item_code}-{lot}")))
    }
}
