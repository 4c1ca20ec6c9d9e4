//! Batch mint configuration.

use crate::{
    constants::{DEFAULT_IPFS_GATEWAY, DEFAULT_UPLOAD_TIMEOUT, DEFAULT_UPLOAD_URL},
    types::TxOverrides,
};
use eyre::Context;
use serde::{Deserialize, Serialize};
use std::{path::Path, time::Duration};
use url::Url;

/// Batch mint configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Chain RPC configuration.
    #[serde(default)]
    pub rpc: RpcConfig,
    /// Metadata storage configuration.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Default overrides applied to every batch transaction.
    #[serde(default)]
    pub transaction: TxOverrides,
}

impl BatchConfig {
    /// Sets the RPC endpoint.
    pub fn with_endpoint(mut self, endpoint: Option<Url>) -> Self {
        if let Some(endpoint) = endpoint {
            self.rpc.endpoint = endpoint;
        }
        self
    }

    /// Sets the number of confirmations to wait for after submitting.
    pub fn with_confirmations(mut self, confirmations: Option<u64>) -> Self {
        self.rpc.confirmations = confirmations.or(self.rpc.confirmations);
        self
    }

    /// Sets the metadata upload endpoint.
    pub fn with_upload_url(mut self, upload_url: Option<Url>) -> Self {
        if let Some(upload_url) = upload_url {
            self.storage.upload_url = upload_url;
        }
        self
    }

    /// Sets the storage secret key.
    pub fn with_storage_secret_key(mut self, secret_key: Option<String>) -> Self {
        self.storage.secret_key = secret_key.or(self.storage.secret_key);
        self
    }

    /// Sets transaction overrides, keeping configured defaults for unset fields.
    pub fn with_overrides(mut self, overrides: TxOverrides) -> Self {
        self.transaction = overrides.or(&self.transaction);
        self
    }

    /// Load from a YAML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> eyre::Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)
            .wrap_err_with(|| format!("failed to read config file: {}", path.display()))?;
        let config = serde_yaml::from_reader(&file)
            .wrap_err_with(|| format!("failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Save to a YAML file.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> eyre::Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

/// Chain RPC configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RpcConfig {
    /// The RPC endpoint batches are sent to.
    pub endpoint: Url,
    /// Confirmations to wait for after sending a batch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmations: Option<u64>,
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self { endpoint: "http://localhost:8545".parse().unwrap(), confirmations: None }
    }
}

/// Metadata storage configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Endpoint metadata documents are uploaded to.
    pub upload_url: Url,
    /// Gateway used to display `ipfs://` locators.
    pub gateway: Url,
    /// Timeout of a single upload, in seconds.
    #[serde(with = "crate::serde::duration")]
    pub timeout: Duration,
    /// Secret key of the storage service.
    #[serde(skip_serializing)]
    pub secret_key: Option<String>,
}

impl StorageConfig {
    /// Sets the upload endpoint.
    pub fn with_upload_url(mut self, upload_url: Url) -> Self {
        self.upload_url = upload_url;
        self
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            upload_url: DEFAULT_UPLOAD_URL.parse().unwrap(),
            gateway: DEFAULT_IPFS_GATEWAY.parse().unwrap(),
            timeout: DEFAULT_UPLOAD_TIMEOUT,
            secret_key: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::uint;

    #[test]
    fn test_config_yaml() {
        let s = include_str!("../tests/assets/config/batch.yaml");
        let config = serde_yaml::from_str::<BatchConfig>(s).unwrap();

        assert_eq!(config.rpc.endpoint.as_str(), "https://rpc.example.org/");
        assert_eq!(config.rpc.confirmations, Some(2));
        assert_eq!(config.storage.timeout, Duration::from_secs(30));
        assert_eq!(config.storage.secret_key.as_deref(), Some("secret"));
        assert_eq!(config.transaction.gas_limit, Some(3_000_000));
        assert_eq!(config.transaction.value, None);

        // secrets are never written back
        let yaml = serde_yaml::to_string(&config).unwrap();
        assert!(!yaml.contains("secret_key"));
        let from_yaml = serde_yaml::from_str::<BatchConfig>(&yaml).unwrap();
        assert_eq!(from_yaml.rpc, config.rpc);
        assert_eq!(from_yaml.transaction, config.transaction);
        assert_eq!(from_yaml.storage.upload_url, config.storage.upload_url);
    }

    #[test]
    fn test_defaults() {
        let config = serde_yaml::from_str::<BatchConfig>("{}").unwrap();
        assert_eq!(config, BatchConfig::default());
        assert_eq!(config.storage.upload_url.as_str(), DEFAULT_UPLOAD_URL);
    }

    #[test]
    fn test_overrides_merge() {
        let config = BatchConfig {
            transaction: TxOverrides { gas_limit: Some(1), nonce: Some(9), ..Default::default() },
            ..Default::default()
        }
        .with_overrides(TxOverrides {
            value: Some(uint!(1_U256)),
            nonce: Some(3),
            ..Default::default()
        });

        assert_eq!(config.transaction.gas_limit, Some(1));
        assert_eq!(config.transaction.nonce, Some(3));
        assert_eq!(config.transaction.value, Some(uint!(1_U256)));
    }
}
