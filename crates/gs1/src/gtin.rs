//! GTIN-14 value type.

use serde::{Deserialize, Serialize};

use surgishop_core::{DomainError, DomainResult, ValueObject};

/// A 14-digit Global Trade Item Number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Gtin(String);

impl ValueObject for Gtin {}

impl Gtin {
    pub const LEN: usize = 14;

    /// Parse a scanned GTIN, discarding every non-digit character.
    pub fn parse(raw: &str) -> DomainResult<Self> {
        let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
        if digits.len() != Self::LEN {
            return Err(DomainError::invalid_argument(format!(
                "Invalid GTIN-01 format. Expected 14 digits, got {}",
                digits.len()
            )));
        }
        Ok(Self(digits))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn company_prefix(&self) -> &str {
        &self.0[..7]
    }

    pub fn item_reference(&self) -> &str {
        &self.0[7..13]
    }

    pub fn check_digit(&self) -> char {
        self.0.as_bytes()[13] as char
    }

    /// GS1 mod-10 check over the first 13 digits.
    pub fn check_digit_valid(&self) -> bool {
        let digits: Vec<u32> = self.0.bytes().map(|b| u32::from(b - b'0')).collect();
        let sum: u32 = digits[..13]
            .iter()
            .enumerate()
            .map(|(i, d)| if i % 2 == 0 { d * 3 } else { *d })
            .sum();
        (10 - sum % 10) % 10 == digits[13]
    }
}

impl core::fmt::Display for Gtin {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Structural breakdown of a GTIN-14.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GtinInfo {
    pub gtin: String,
    pub company_prefix: String,
    pub item_reference: String,
    pub check_digit: String,
    pub length: usize,
    pub check_digit_valid: bool,
}

pub fn validate_gtin_format(raw: &str) -> bool {
    Gtin::parse(raw).is_ok()
}

pub fn gtin_info(raw: &str) -> DomainResult<GtinInfo> {
    let gtin = Gtin::parse(raw)
        .map_err(|_| DomainError::invalid_argument("Invalid GTIN-01 format"))?;
    Ok(GtinInfo {
        company_prefix: gtin.company_prefix().to_string(),
        item_reference: gtin.item_reference().to_string(),
        check_digit: gtin.check_digit().to_string(),
        length: gtin.as_str().len(),
        check_digit_valid: gtin.check_digit_valid(),
        gtin: gtin.0,
    })
}
