//! EVM RPC Channel
//!
//! [`EvmChannel`] is the alloy-backed [`TokenSwapChain`]: an HTTP provider
//! with the signer's wallet and the recommended nonce/gas/chain-id fillers.
//! Every write waits for its receipt and treats a failed status as an error.

use alloy::{
    network::EthereumWallet,
    primitives::{Address, U256},
    providers::{Provider, ProviderBuilder},
    rpc::types::TransactionReceipt,
    signers::local::PrivateKeySigner,
    transports::http::{Client, Http},
};
use async_trait::async_trait;
use eyre::{eyre, Result};
use tracing::{debug, info};
use url::Url;

use crate::chain::{TokenSwapChain, TxOutcome};
use crate::evm::contracts::{TokenSwap, ERC20};
use crate::evm::tokens::{self, TokenInfo};

/// Signing channel over one RPC endpoint
#[derive(Clone)]
pub struct EvmChannel<P> {
    provider: P,
    signer_address: Address,
    rpc_url: Url,
}

/// Build a signing channel for `signer` against `rpc_url`
pub fn connect_http(
    rpc_url: Url,
    signer: PrivateKeySigner,
) -> EvmChannel<impl Provider<Http<Client>> + Clone> {
    let signer_address = signer.address();
    let wallet = EthereumWallet::from(signer);

    let provider = ProviderBuilder::new()
        .with_recommended_fillers()
        .wallet(wallet)
        .on_http(rpc_url.clone());

    info!(rpc_url = %redacted_url(&rpc_url), address = %signer_address, "Created EVM channel");

    EvmChannel {
        provider,
        signer_address,
        rpc_url,
    }
}

impl<P> EvmChannel<P>
where
    P: Provider<Http<Client>> + Clone + 'static,
{
    pub fn rpc_url(&self) -> &Url {
        &self.rpc_url
    }

    /// Token pair the TokenSwap contract is configured with, as (V1, V2)
    pub async fn swap_pair(&self, token_swap: Address) -> Result<(Address, Address)> {
        let contract = TokenSwap::new(token_swap, &self.provider);
        let (v1, v2) = tokio::try_join!(
            async {
                contract
                    .v1Token()
                    .call()
                    .await
                    .map(|r| r._0)
                    .map_err(|e| eyre!("Failed to get v1Token: {}", e))
            },
            async {
                contract
                    .v2Token()
                    .call()
                    .await
                    .map(|r| r._0)
                    .map_err(|e| eyre!("Failed to get v2Token: {}", e))
            }
        )?;
        Ok((v1, v2))
    }

    pub async fn token_info(&self, token: Address) -> Result<TokenInfo> {
        tokens::get_token_info::<Http<Client>, _>(&self.provider, token).await
    }
}

#[async_trait]
impl<P> TokenSwapChain for EvmChannel<P>
where
    P: Provider<Http<Client>> + Clone + 'static,
{
    async fn chain_id(&self) -> Result<u64> {
        let chain_id = self.provider.get_chain_id().await?;
        Ok(chain_id)
    }

    fn signer_address(&self) -> Address {
        self.signer_address
    }

    async fn balance_of(&self, token: Address, owner: Address) -> Result<U256> {
        tokens::get_token_balance::<Http<Client>, _>(&self.provider, token, owner).await
    }

    async fn allowance(&self, token: Address, owner: Address, spender: Address) -> Result<U256> {
        tokens::get_token_allowance::<Http<Client>, _>(&self.provider, token, owner, spender).await
    }

    async fn approve(&self, token: Address, spender: Address, amount: U256) -> Result<TxOutcome> {
        let contract = ERC20::new(token, &self.provider);
        let pending_tx = contract
            .approve(spender, amount)
            .send()
            .await
            .map_err(|e| eyre!("Failed to send approve: {}", e))?;

        debug!(tx_hash = %pending_tx.tx_hash(), "Approve sent, waiting for confirmation");

        let receipt = pending_tx
            .get_receipt()
            .await
            .map_err(|e| eyre!("Failed to get approve receipt: {}", e))?;
        confirmed(receipt, "approve")
    }

    async fn bridge(&self, token_swap: Address, amount: U256) -> Result<TxOutcome> {
        let contract = TokenSwap::new(token_swap, &self.provider);
        let pending_tx = contract
            .bridge(amount)
            .send()
            .await
            .map_err(|e| eyre!("Failed to send bridge: {}", e))?;

        debug!(tx_hash = %pending_tx.tx_hash(), "Bridge sent, waiting for confirmation");

        let receipt = pending_tx
            .get_receipt()
            .await
            .map_err(|e| eyre!("Failed to get bridge receipt: {}", e))?;
        confirmed(receipt, "bridge")
    }

    async fn bridge_all(&self, token_swap: Address) -> Result<TxOutcome> {
        let contract = TokenSwap::new(token_swap, &self.provider);
        let pending_tx = contract
            .bridgeAll()
            .send()
            .await
            .map_err(|e| eyre!("Failed to send bridgeAll: {}", e))?;

        debug!(tx_hash = %pending_tx.tx_hash(), "BridgeAll sent, waiting for confirmation");

        let receipt = pending_tx
            .get_receipt()
            .await
            .map_err(|e| eyre!("Failed to get bridgeAll receipt: {}", e))?;
        confirmed(receipt, "bridgeAll")
    }
}

fn confirmed(receipt: TransactionReceipt, method: &str) -> Result<TxOutcome> {
    if !receipt.status() {
        return Err(eyre!(
            "{} transaction {} reverted",
            method,
            receipt.transaction_hash
        ));
    }

    for log in receipt.inner.logs() {
        if let Ok(decoded) = log.log_decode::<TokenSwap::Bridged>() {
            debug!(
                account = %decoded.inner.data.account,
                amount = %decoded.inner.data.amount,
                "Bridged event"
            );
        }
    }

    Ok(TxOutcome {
        tx_hash: receipt.transaction_hash,
        block_number: receipt.block_number,
    })
}

/// Strip the path (Infura API keys live there) for logging
pub(crate) fn redacted_url(url: &Url) -> String {
    match url.host_str() {
        Some(host) => format!("{}://{}", url.scheme(), host),
        None => url.scheme().to_string(),
    }
}
