use std::sync::Arc;

use anyhow::Context;

use surgishop_gs1::Gs1Resolver;
use surgishop_infra::{
    AppConfig, CatalogSeed, InMemoryBatchStore, InMemoryCatalog, InMemorySerialNoStore,
};
use surgishop_stock::ExpiryPolicies;

pub type Resolver = Gs1Resolver<Arc<InMemoryCatalog>, Arc<InMemoryBatchStore>>;

/// Shared request-handling state.
pub struct AppServices {
    pub catalog: Arc<InMemoryCatalog>,
    pub batches: Arc<InMemoryBatchStore>,
    pub serials: Arc<InMemorySerialNoStore>,
    pub resolver: Resolver,
    pub expiry_policies: ExpiryPolicies,
}

impl AppServices {
    pub fn new(expiry_policies: ExpiryPolicies) -> Self {
        let catalog = Arc::new(InMemoryCatalog::new());
        // RPC callers never write batches directly; only the resolver's trusted writes land.
        let batches = Arc::new(InMemoryBatchStore::read_only());
        let serials = Arc::new(InMemorySerialNoStore::new());
        let resolver = Gs1Resolver::new(catalog.clone(), batches.clone());

        Self {
            catalog,
            batches,
            serials,
            resolver,
            expiry_policies,
        }
    }

    pub fn with_seed(seed: &CatalogSeed, expiry_policies: ExpiryPolicies) -> anyhow::Result<Self> {
        let services = Self::new(expiry_policies);
        seed.apply(&services.catalog, &services.batches, &services.serials)
            .context("applying catalog seed")?;
        Ok(services)
    }

    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let seed = match &config.catalog_path {
            Some(path) => CatalogSeed::load(path)?,
            None => {
                tracing::warn!("no catalog path configured; starting with an empty catalog");
                CatalogSeed::default()
            }
        };
        Self::with_seed(&seed, config.expiry_policies.clone())
    }
}
