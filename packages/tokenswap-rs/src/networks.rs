//! Network Registry
//!
//! Static table of the networks TokenSwap is deployed on. Each profile fixes
//! the native chain ID and the three contract addresses for that deployment.
//! Profiles are compiled in; selecting one is configuration, not runtime logic.

use alloy::primitives::{address, Address};
use eyre::{eyre, Result};
use std::fmt;
use std::str::FromStr;

/// Immutable description of one TokenSwap deployment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkProfile {
    /// Registry key (e.g. "kovan")
    pub key: NetworkKey,
    /// Native EVM chain ID
    pub chain_id: u64,
    /// Human-readable network name
    pub name: &'static str,
    /// Legacy (V1) token address
    pub v1_token: Address,
    /// Replacement (V2) token address
    pub v2_token: Address,
    /// TokenSwap (bridge) contract address
    pub token_swap: Address,
    /// Infura subdomain used to build the relay RPC URL
    pub infura_network: &'static str,
}

impl NetworkProfile {
    /// Build the relay RPC URL for this network from an Infura project ID
    pub fn infura_rpc_url(&self, api_key: &str) -> String {
        format!("https://{}.infura.io/v3/{}", self.infura_network, api_key)
    }

    /// Whether the addresses are real deployments rather than placeholders
    pub fn is_deployed(&self) -> bool {
        self.token_swap != DEAD_ADDRESS
    }
}

/// Placeholder used for networks without a deployment yet
pub const DEAD_ADDRESS: Address = address!("000000000000000000000000000000000000dEaD");

/// Keys of the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NetworkKey {
    Kovan,
    Polygon,
}

impl NetworkKey {
    /// Get the key as a lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            NetworkKey::Kovan => "kovan",
            NetworkKey::Polygon => "polygon",
        }
    }
}

impl fmt::Display for NetworkKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NetworkKey {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "kovan" => Ok(NetworkKey::Kovan),
            "polygon" => Ok(NetworkKey::Polygon),
            other => Err(eyre!(
                "Unknown network '{}' (expected one of: kovan, polygon)",
                other
            )),
        }
    }
}

static KOVAN: NetworkProfile = NetworkProfile {
    key: NetworkKey::Kovan,
    chain_id: 42,
    name: "Kovan Testnet",
    v1_token: address!("5437e4760899a2eed8782d65f5A4917DEA866b62"),
    v2_token: address!("d8Bd8148F24B96eF136929ffe3D371a7A3138F7e"),
    token_swap: address!("217A6e7Dd5d84faFd292f741a0dcF7591aC1F6E1"),
    infura_network: "kovan",
};

static POLYGON: NetworkProfile = NetworkProfile {
    key: NetworkKey::Polygon,
    chain_id: 137,
    name: "Polygon Mainnet",
    v1_token: DEAD_ADDRESS,
    v2_token: DEAD_ADDRESS,
    token_swap: DEAD_ADDRESS,
    infura_network: "polygon-mainnet",
};

/// Look up the profile for a network key
pub fn network_info(key: NetworkKey) -> &'static NetworkProfile {
    match key {
        NetworkKey::Kovan => &KOVAN,
        NetworkKey::Polygon => &POLYGON,
    }
}

/// All registered profiles, in registry order
pub fn all_networks() -> [&'static NetworkProfile; 2] {
    [&KOVAN, &POLYGON]
}

/// Find the profile whose chain ID matches, if any
pub fn find_by_chain_id(chain_id: u64) -> Option<&'static NetworkProfile> {
    all_networks().into_iter().find(|p| p.chain_id == chain_id)
}
