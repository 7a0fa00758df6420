//! Local-key wallet
//!
//! [`LocalKeyWallet`] is the [`WalletProvider`] for headless use: the signer
//! is a private key and "switching network" means re-pointing at another RPC
//! endpoint from a chain-id -> URL book.

use alloy::signers::local::PrivateKeySigner;
use async_trait::async_trait;
use eyre::{eyre, Result};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use url::Url;

use crate::chain::TokenSwapChain;
use crate::error::BridgeError;
use crate::evm::client::{connect_http, redacted_url};
use crate::networks::all_networks;
use crate::wallet::WalletProvider;

pub struct LocalKeyWallet {
    signer: Option<PrivateKeySigner>,
    active_url: RwLock<Url>,
    rpc_urls: HashMap<u64, Url>,
}

impl LocalKeyWallet {
    /// Wallet starting on `rpc_url`; `private_key` of `None` behaves like a
    /// browser without a wallet extension
    pub fn new(rpc_url: &str, private_key: Option<&str>) -> Result<Self> {
        let active = parse_rpc_url(rpc_url)?;
        let signer = private_key
            .map(|key| {
                key.parse::<PrivateKeySigner>()
                    .map_err(|e| eyre!("Invalid private key: {}", e))
            })
            .transpose()?;

        Ok(Self {
            signer,
            active_url: RwLock::new(active),
            rpc_urls: HashMap::new(),
        })
    }

    /// Register the endpoint to use for `chain_id`
    pub fn with_network_rpc(mut self, chain_id: u64, rpc_url: &str) -> Result<Self> {
        self.rpc_urls.insert(chain_id, parse_rpc_url(rpc_url)?);
        Ok(self)
    }

    /// Register Infura endpoints for every known network that has no
    /// explicit endpoint yet
    pub fn with_infura(mut self, api_key: &str) -> Result<Self> {
        for profile in all_networks() {
            if self.rpc_urls.contains_key(&profile.chain_id) {
                continue;
            }
            let url = parse_rpc_url(&profile.infura_rpc_url(api_key))?;
            self.rpc_urls.insert(profile.chain_id, url);
        }
        Ok(self)
    }

    pub fn has_signer(&self) -> bool {
        self.signer.is_some()
    }

    /// Chain IDs this wallet can switch to
    pub fn known_chain_ids(&self) -> Vec<u64> {
        let mut ids: Vec<u64> = self.rpc_urls.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub async fn active_url(&self) -> Url {
        self.active_url.read().await.clone()
    }
}

#[async_trait]
impl WalletProvider for LocalKeyWallet {
    async fn connect(&self) -> Result<Arc<dyn TokenSwapChain>, BridgeError> {
        let signer = self.signer.clone().ok_or(BridgeError::NoWalletAvailable)?;
        let url = self.active_url.read().await.clone();
        debug!(rpc_url = %redacted_url(&url), "Connecting local-key wallet");
        Ok(Arc::new(connect_http(url, signer)))
    }

    async fn switch_chain(&self, chain_id: u64) -> Result<(), BridgeError> {
        let Some(url) = self.rpc_urls.get(&chain_id) else {
            warn!(chain_id = chain_id, "No RPC endpoint known for network");
            return Err(BridgeError::UnsupportedNetwork(chain_id));
        };

        info!(chain_id = chain_id, rpc_url = %redacted_url(url), "Switching RPC endpoint");
        *self.active_url.write().await = url.clone();
        Ok(())
    }
}

fn parse_rpc_url(rpc_url: &str) -> Result<Url> {
    let url = Url::parse(rpc_url.trim()).map_err(|e| eyre!("Invalid RPC URL: {}", e))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(eyre!("Unsupported RPC URL scheme '{}' (expected http or https)", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    #[tokio::test]
    async fn test_connect_without_key_has_no_wallet() {
        let wallet = LocalKeyWallet::new("http://localhost:8545", None).unwrap();
        assert!(!wallet.has_signer());
        assert!(matches!(
            wallet.connect().await,
            Err(BridgeError::NoWalletAvailable)
        ));
    }

    #[tokio::test]
    async fn test_connect_uses_key_address() {
        let wallet = LocalKeyWallet::new("http://localhost:8545", Some(TEST_KEY)).unwrap();
        let channel = wallet.connect().await.unwrap();
        assert_eq!(
            channel.signer_address(),
            crate::testing::DEFAULT_SIGNER
        );
    }

    #[tokio::test]
    async fn test_switch_to_unknown_network() {
        let wallet = LocalKeyWallet::new("http://localhost:8545", Some(TEST_KEY)).unwrap();
        assert_eq!(
            wallet.switch_chain(42).await,
            Err(BridgeError::UnsupportedNetwork(42))
        );
        assert_eq!(wallet.active_url().await.as_str(), "http://localhost:8545/");
    }

    #[tokio::test]
    async fn test_switch_repoints_endpoint() {
        let wallet = LocalKeyWallet::new("http://localhost:8545", Some(TEST_KEY))
            .unwrap()
            .with_network_rpc(42, "http://127.0.0.1:9545")
            .unwrap();

        wallet.switch_chain(42).await.unwrap();
        assert_eq!(wallet.active_url().await.as_str(), "http://127.0.0.1:9545/");
    }

    #[test]
    fn test_infura_book_keeps_explicit_urls() {
        let wallet = LocalKeyWallet::new("http://localhost:8545", None)
            .unwrap()
            .with_network_rpc(42, "http://127.0.0.1:9545")
            .unwrap()
            .with_infura("abc123")
            .unwrap();

        assert_eq!(wallet.known_chain_ids(), vec![42, 137]);
        assert_eq!(wallet.rpc_urls[&42].as_str(), "http://127.0.0.1:9545/");
        assert_eq!(
            wallet.rpc_urls[&137].as_str(),
            "https://polygon-mainnet.infura.io/v3/abc123"
        );
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(LocalKeyWallet::new("not a url", None).is_err());
        assert!(LocalKeyWallet::new("ws://localhost:8546", None).is_err());
        assert!(LocalKeyWallet::new("http://localhost:8545", Some("0x1234")).is_err());
    }
}
