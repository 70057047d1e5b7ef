//! GS1 barcode handling: GTINs, element strings, and batch resolution.
//!
//! Storage is reached through the `surgishop-stock` store traits; callers pick
//! the implementations.

pub mod date;
pub mod element;
pub mod gtin;
pub mod lookup;
pub mod resolver;

pub use date::parse_yymmdd;
pub use element::{Gs1Element, is_gs1};
pub use gtin::{Gtin, GtinInfo, gtin_info, validate_gtin_format};
pub use lookup::{ItemMatch, ScanDiagnosis, debug_barcode_scan, item_by_gtin};
pub use resolver::{Gs1Resolution, Gs1Resolver};
