//! ERC20 Token Helpers
//!
//! Read-only helpers for the V1/V2 tokens: balance, allowance and metadata.

use crate::evm::contracts::ERC20;
use alloy::{
    primitives::{Address, U256},
    providers::Provider,
    transports::Transport,
};
use eyre::{eyre, Result};

/// Get the ERC20 token balance of an address
pub async fn get_token_balance<T, P>(
    provider: P,
    token_address: Address,
    account: Address,
) -> Result<U256>
where
    T: Transport + Clone,
    P: Provider<T>,
{
    let contract = ERC20::new(token_address, provider);
    let balance = contract
        .balanceOf(account)
        .call()
        .await
        .map_err(|e| eyre!("Failed to get balance: {}", e))?;
    Ok(balance._0)
}

/// Get the ERC20 token allowance
pub async fn get_token_allowance<T, P>(
    provider: P,
    token_address: Address,
    owner: Address,
    spender: Address,
) -> Result<U256>
where
    T: Transport + Clone,
    P: Provider<T>,
{
    let contract = ERC20::new(token_address, provider);
    let allowance = contract
        .allowance(owner, spender)
        .call()
        .await
        .map_err(|e| eyre!("Failed to get allowance: {}", e))?;
    Ok(allowance._0)
}

/// Token info helper struct
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenInfo {
    pub address: Address,
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

/// Get complete token info
pub async fn get_token_info<T, P>(provider: P, token_address: Address) -> Result<TokenInfo>
where
    T: Transport + Clone,
    P: Provider<T>,
{
    let contract = ERC20::new(token_address, provider);

    let (name, symbol, decimals) = tokio::try_join!(
        async {
            contract
                .name()
                .call()
                .await
                .map(|r| r._0)
                .map_err(|e| eyre!("Failed to get name: {}", e))
        },
        async {
            contract
                .symbol()
                .call()
                .await
                .map(|r| r._0)
                .map_err(|e| eyre!("Failed to get symbol: {}", e))
        },
        async {
            contract
                .decimals()
                .call()
                .await
                .map(|r| r._0)
                .map_err(|e| eyre!("Failed to get decimals: {}", e))
        }
    )?;

    Ok(TokenInfo {
        address: token_address,
        name,
        symbol,
        decimals,
    })
}
