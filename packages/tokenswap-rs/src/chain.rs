//! Remote contract surface consumed by the bridge flow
//!
//! [`TokenSwapChain`] is the read/write channel a wallet hands out after
//! connecting. It exposes exactly the token and TokenSwap methods the bridge
//! flow needs; the EVM implementation lives in `evm::client`, an in-memory
//! ledger in `testing`.

use alloy::primitives::{Address, TxHash, U256};
use async_trait::async_trait;
use eyre::Result;

/// A mined transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TxOutcome {
    /// Transaction hash
    pub tx_hash: TxHash,
    /// Block the transaction was included in, when reported
    pub block_number: Option<u64>,
}

/// Read/write channel to one chain, bound to one signing identity.
///
/// Channels are snapshots: after the wallet changes network a new channel
/// must be obtained. Write methods resolve only once the transaction is mined
/// (one confirmation) and fail if it reverted.
#[async_trait]
pub trait TokenSwapChain: Send + Sync {
    /// Chain ID reported by the channel's endpoint
    async fn chain_id(&self) -> Result<u64>;

    /// Address of the signing identity
    fn signer_address(&self) -> Address;

    /// `token.balanceOf(owner)`
    async fn balance_of(&self, token: Address, owner: Address) -> Result<U256>;

    /// `token.allowance(owner, spender)`
    async fn allowance(&self, token: Address, owner: Address, spender: Address) -> Result<U256>;

    /// `token.approve(spender, amount)` from the signer
    async fn approve(&self, token: Address, spender: Address, amount: U256) -> Result<TxOutcome>;

    /// `tokenSwap.bridge(amount)` from the signer
    async fn bridge(&self, token_swap: Address, amount: U256) -> Result<TxOutcome>;

    /// `tokenSwap.bridgeAll()` from the signer
    async fn bridge_all(&self, token_swap: Address) -> Result<TxOutcome>;
}
