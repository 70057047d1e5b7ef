//! Infrastructure layer: record stores, catalog seeding, configuration.

pub mod config;
pub mod seed;
pub mod store;

pub use config::{AppConfig, ConfigError};
pub use seed::CatalogSeed;
pub use store::{InMemoryBatchStore, InMemoryCatalog, InMemorySerialNoStore};
