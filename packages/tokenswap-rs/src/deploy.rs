//! TokenSwap deployment
//!
//! One-shot creation of the TokenSwap contract from a compiled artifact,
//! with the V1 and V2 token addresses as constructor arguments and a fixed
//! legacy gas price.

use alloy::{
    network::{EthereumWallet, TransactionBuilder},
    primitives::{Address, TxHash},
    providers::{Provider, ProviderBuilder},
    rpc::types::TransactionRequest,
    signers::local::PrivateKeySigner,
    sol_types::SolValue,
};
use eyre::{eyre, Result, WrapErr};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

/// Gas price used when none is configured
pub const DEFAULT_GAS_PRICE_GWEI: u64 = 2;

const WEI_PER_GWEI: u128 = 1_000_000_000;

/// Constructor arguments and gas settings for a deployment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployConfig {
    pub v1_token: Address,
    pub v2_token: Address,
    pub gas_price_gwei: u64,
}

impl DeployConfig {
    pub fn new(v1_token: Address, v2_token: Address) -> Self {
        Self {
            v1_token,
            v2_token,
            gas_price_gwei: DEFAULT_GAS_PRICE_GWEI,
        }
    }

    pub fn with_gas_price_gwei(mut self, gwei: u64) -> Self {
        self.gas_price_gwei = gwei;
        self
    }

    pub fn gas_price_wei(&self) -> Result<u128> {
        (self.gas_price_gwei as u128)
            .checked_mul(WEI_PER_GWEI)
            .ok_or_else(|| eyre!("Gas price {} gwei overflows", self.gas_price_gwei))
    }

    pub fn validate(&self) -> Result<()> {
        if self.v1_token == Address::ZERO || self.v2_token == Address::ZERO {
            return Err(eyre!("V1 and V2 token addresses must be non-zero"));
        }
        if self.v1_token == self.v2_token {
            return Err(eyre!("V1 and V2 tokens must differ"));
        }
        if self.gas_price_gwei == 0 {
            return Err(eyre!("Gas price must be positive"));
        }
        Ok(())
    }

    /// ABI-encoded `(address v1, address v2)`
    pub fn constructor_args(&self) -> Vec<u8> {
        (self.v1_token, self.v2_token).abi_encode_params()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum ArtifactBytecode {
    /// Hardhat: `"bytecode": "0x..."`
    Hex(String),
    /// Foundry: `"bytecode": { "object": "0x...", ... }`
    Object { object: String },
}

/// Compiled contract artifact (Hardhat or Foundry JSON)
#[derive(Debug, Clone, Deserialize)]
pub struct ContractArtifact {
    #[serde(rename = "contractName", default)]
    pub contract_name: Option<String>,
    bytecode: ArtifactBytecode,
}

impl ContractArtifact {
    /// Load from file path
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read artifact {}", path.display()))?;
        Self::from_json(&content)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let artifact: ContractArtifact =
            serde_json::from_str(json).wrap_err("Failed to parse contract artifact")?;
        Ok(artifact)
    }

    /// Creation bytecode
    pub fn bytecode(&self) -> Result<Vec<u8>> {
        let hex_str = match &self.bytecode {
            ArtifactBytecode::Hex(s) => s,
            ArtifactBytecode::Object { object } => object,
        };
        let hex_str = hex_str.trim().trim_start_matches("0x");
        if hex_str.is_empty() {
            return Err(eyre!("Artifact has empty bytecode (abstract contract or interface?)"));
        }
        if hex_str.contains("__") {
            return Err(eyre!("Artifact bytecode has unlinked library placeholders"));
        }
        hex::decode(hex_str).map_err(|e| eyre!("Invalid artifact bytecode: {}", e))
    }
}

/// A mined TokenSwap deployment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deployment {
    pub address: Address,
    pub tx_hash: TxHash,
}

/// Deploy TokenSwap(v1, v2) and wait for the creation receipt
pub async fn deploy_token_swap(
    rpc_url: &str,
    private_key: &str,
    artifact: &ContractArtifact,
    config: &DeployConfig,
) -> Result<Deployment> {
    config.validate()?;

    let signer: PrivateKeySigner = private_key
        .parse()
        .map_err(|e| eyre!("Invalid private key: {}", e))?;
    let deployer = signer.address();
    let wallet = EthereumWallet::from(signer);

    let provider = ProviderBuilder::new()
        .with_recommended_fillers()
        .wallet(wallet)
        .on_http(rpc_url.parse().wrap_err("Invalid RPC URL")?);

    let mut code = artifact.bytecode()?;
    code.extend_from_slice(&config.constructor_args());
    let gas_price = config.gas_price_wei()?;

    info!(
        deployer = %deployer,
        v1_token = %config.v1_token,
        v2_token = %config.v2_token,
        gas_price_gwei = config.gas_price_gwei,
        "Deploying TokenSwap"
    );

    let tx = TransactionRequest::default()
        .with_deploy_code(code)
        .with_gas_price(gas_price);

    let pending_tx = provider
        .send_transaction(tx)
        .await
        .map_err(|e| eyre!("Failed to send deployment: {}", e))?;

    let tx_hash = *pending_tx.tx_hash();
    debug!(tx_hash = %tx_hash, "Deployment sent, waiting for confirmation");

    let receipt = pending_tx
        .get_receipt()
        .await
        .map_err(|e| eyre!("Failed to get deployment receipt: {}", e))?;

    if !receipt.status() {
        return Err(eyre!("Deployment transaction {} reverted", tx_hash));
    }

    let address = receipt
        .contract_address
        .ok_or_else(|| eyre!("Deployment receipt {} has no contract address", tx_hash))?;

    info!(address = %address, tx_hash = %tx_hash, "TokenSwap deployed");

    Ok(Deployment { address, tx_hash })
}
