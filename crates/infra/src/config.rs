//! Configuration loading from environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

use surgishop_observability::LogFormat;
use surgishop_stock::{DocumentType, ExpiryPolicies, ExpiryPolicy};

pub const BIND_ADDR: &str = "SURGISHOP_BIND_ADDR";
pub const LOG_FORMAT: &str = "SURGISHOP_LOG_FORMAT";
pub const EXPIRY_POLICY: &str = "SURGISHOP_EXPIRY_POLICY";
pub const EXPIRY_POLICY_OVERRIDES: &str = "SURGISHOP_EXPIRY_POLICY_OVERRIDES";
pub const CATALOG_PATH: &str = "SURGISHOP_CATALOG_PATH";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var}: invalid value '{value}': {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

impl ConfigError {
    fn invalid(var: &'static str, value: &str, reason: impl ToString) -> Self {
        Self::Invalid {
            var,
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Process configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub log_format: LogFormat,
    pub expiry_policies: ExpiryPolicies,
    pub catalog_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            log_format: LogFormat::Json,
            expiry_policies: ExpiryPolicies::default(),
            catalog_path: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from an arbitrary variable source. Unset or blank variables use defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(raw) = get(BIND_ADDR) {
            config.bind_addr = raw
                .trim()
                .parse()
                .map_err(|e| ConfigError::invalid(BIND_ADDR, &raw, e))?;
        }

        if let Some(raw) = get(LOG_FORMAT) {
            config.log_format = raw
                .parse()
                .map_err(|e| ConfigError::invalid(LOG_FORMAT, &raw, e))?;
        }

        let default_policy = match get(EXPIRY_POLICY) {
            Some(raw) => raw
                .parse::<ExpiryPolicy>()
                .map_err(|e| ConfigError::invalid(EXPIRY_POLICY, &raw, e))?,
            None => ExpiryPolicy::default(),
        };
        let mut policies = ExpiryPolicies::new(default_policy);

        // Format: "Stock Reconciliation=disabled;Delivery Note=enforce-outbound"
        if let Some(raw) = get(EXPIRY_POLICY_OVERRIDES) {
            for entry in raw.split(';').map(str::trim).filter(|e| !e.is_empty()) {
                let (doctype, policy) = entry.split_once('=').ok_or_else(|| {
                    ConfigError::invalid(EXPIRY_POLICY_OVERRIDES, entry, "expected DocType=policy")
                })?;
                let policy = policy
                    .parse::<ExpiryPolicy>()
                    .map_err(|e| ConfigError::invalid(EXPIRY_POLICY_OVERRIDES, entry, e))?;
                policies = policies.with_override(DocumentType::from(doctype.trim()), policy);
            }
        }
        config.expiry_policies = policies;

        config.catalog_path = get(CATALOG_PATH).map(|p| PathBuf::from(p.trim()));

        Ok(config)
    }
}
