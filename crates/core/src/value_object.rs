//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Scanned payload fragments (a GTIN, a parsed GS1 element string) are values:
/// two scans carrying the same digits are interchangeable.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
