use eyre::{eyre, Result, WrapErr};
use std::env;
use std::path::Path;

use tokenswap_rs::deploy::DEFAULT_GAS_PRICE_GWEI;
use tokenswap_rs::redact::Redacted;
use tokenswap_rs::{network_info, ApprovalPolicy, LocalKeyWallet, NetworkKey, NetworkProfile};

/// CLI configuration, read from the environment (and `.env`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub network: NetworkKey,
    /// Explicit endpoint; takes precedence over Infura for the first connection
    pub evm_rpc_url: Option<String>,
    pub infura_id: Option<Redacted<String>>,
    pub private_key: Option<Redacted<String>>,
    pub approval_policy: ApprovalPolicy,
    pub gas_price_gwei: u64,
}

impl Config {
    /// Load configuration from environment variables
    /// Loads .env file if present, then reads from environment
    pub fn load() -> Result<Self> {
        Self::load_from_file(".env")
    }

    /// Load from a specific .env file path
    pub fn load_from_file(path: &str) -> Result<Self> {
        if Path::new(path).exists() {
            dotenvy::from_filename(path)
                .wrap_err_with(|| format!("Failed to load .env file from {}", path))?;
        }
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from any variable source; empty values count as unset
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let network = match get("TOKENSWAP_NETWORK") {
            Some(v) => v.parse().wrap_err("TOKENSWAP_NETWORK is invalid")?,
            None => NetworkKey::Kovan,
        };

        let approval_policy = match get("APPROVAL_MODE") {
            Some(v) => v.parse().wrap_err("APPROVAL_MODE is invalid")?,
            None => ApprovalPolicy::default(),
        };

        let gas_price_gwei = match get("GAS_PRICE_GWEI") {
            Some(v) => v
                .parse()
                .wrap_err("GAS_PRICE_GWEI must be a valid u64")?,
            None => DEFAULT_GAS_PRICE_GWEI,
        };

        let config = Config {
            network,
            evm_rpc_url: get("EVM_RPC_URL"),
            infura_id: get("INFURA_ID").map(Redacted),
            private_key: get("EVM_PRIVATE_KEY").map(Redacted),
            approval_policy,
            gas_price_gwei,
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.evm_rpc_url.is_none() && self.infura_id.is_none() {
            return Err(eyre!(
                "Either EVM_RPC_URL or INFURA_ID environment variable is required"
            ));
        }

        if let Some(key) = &self.private_key {
            let key = key.expose();
            if key.len() != 66 || !key.starts_with("0x") {
                return Err(eyre!("EVM_PRIVATE_KEY must be 66 chars (0x + 64 hex chars)"));
            }
        }

        if self.gas_price_gwei == 0 {
            return Err(eyre!("GAS_PRICE_GWEI must be positive"));
        }

        Ok(())
    }

    pub fn profile(&self) -> &'static NetworkProfile {
        network_info(self.network)
    }

    /// Endpoint for the target network: the explicit URL, or Infura's
    pub fn rpc_url(&self) -> Result<String> {
        if let Some(url) = &self.evm_rpc_url {
            return Ok(url.clone());
        }
        self.infura_id
            .as_ref()
            .map(|key| self.profile().infura_rpc_url(key.expose()))
            .ok_or_else(|| eyre!("No RPC endpoint configured"))
    }

    pub fn require_private_key(&self) -> Result<&str> {
        self.private_key
            .as_ref()
            .map(|k| k.expose().as_str())
            .ok_or_else(|| eyre!("EVM_PRIVATE_KEY environment variable is required"))
    }

    /// Wallet starting on [`rpc_url`](Self::rpc_url), able to switch to any
    /// network Infura serves when a key is configured
    pub fn build_wallet(&self) -> Result<LocalKeyWallet> {
        let private_key = self.private_key.as_ref().map(|k| k.expose().as_str());
        let mut wallet = LocalKeyWallet::new(&self.rpc_url()?, private_key)?;
        if let Some(key) = &self.infura_id {
            wallet = wallet.with_infura(key.expose())?;
        }
        Ok(wallet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    fn load(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[("INFURA_ID", "abc")]).unwrap();
        assert_eq!(config.network, NetworkKey::Kovan);
        assert_eq!(config.approval_policy, ApprovalPolicy::Unlimited);
        assert_eq!(config.gas_price_gwei, 2);
        assert!(config.private_key.is_none());
        assert_eq!(
            config.rpc_url().unwrap(),
            "https://kovan.infura.io/v3/abc"
        );
    }

    #[test]
    fn test_requires_an_endpoint() {
        assert!(load(&[]).is_err());
        assert!(load(&[("EVM_RPC_URL", "  ")]).is_err());
        assert!(load(&[("EVM_RPC_URL", "http://localhost:8545")]).is_ok());
    }

    #[test]
    fn test_explicit_url_wins() {
        let config = load(&[
            ("EVM_RPC_URL", "http://localhost:8545"),
            ("INFURA_ID", "abc"),
            ("TOKENSWAP_NETWORK", "polygon"),
        ])
        .unwrap();
        assert_eq!(config.network, NetworkKey::Polygon);
        assert_eq!(config.rpc_url().unwrap(), "http://localhost:8545");
    }

    #[test]
    fn test_private_key_validation() {
        assert!(load(&[("INFURA_ID", "abc"), ("EVM_PRIVATE_KEY", "0x123")]).is_err());

        let config = load(&[("INFURA_ID", "abc"), ("EVM_PRIVATE_KEY", KEY)]).unwrap();
        assert_eq!(config.require_private_key().unwrap(), KEY);

        let config = load(&[("INFURA_ID", "abc")]).unwrap();
        assert!(config.require_private_key().is_err());
    }

    #[test]
    fn test_invalid_values() {
        assert!(load(&[("INFURA_ID", "abc"), ("TOKENSWAP_NETWORK", "goerli")]).is_err());
        assert!(load(&[("INFURA_ID", "abc"), ("APPROVAL_MODE", "half")]).is_err());
        assert!(load(&[("INFURA_ID", "abc"), ("GAS_PRICE_GWEI", "two")]).is_err());
        assert!(load(&[("INFURA_ID", "abc"), ("GAS_PRICE_GWEI", "0")]).is_err());

        let config = load(&[("INFURA_ID", "abc"), ("APPROVAL_MODE", "exact")]).unwrap();
        assert_eq!(config.approval_policy, ApprovalPolicy::Exact);
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = load(&[("INFURA_ID", "supersecret"), ("EVM_PRIVATE_KEY", KEY)]).unwrap();
        let debug = format!("{:?}", config);
        assert!(!debug.contains("supersecret"));
        assert!(!debug.contains(&KEY[2..]));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_build_wallet() {
        let config = load(&[("INFURA_ID", "abc"), ("EVM_PRIVATE_KEY", KEY)]).unwrap();
        let wallet = config.build_wallet().unwrap();
        assert!(wallet.has_signer());
        assert_eq!(wallet.known_chain_ids(), vec![42, 137]);
    }
}
