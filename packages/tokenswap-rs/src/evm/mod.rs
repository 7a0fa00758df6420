//! EVM Chain Support Module
//!
//! alloy-backed implementation of the chain and wallet seams.
//!
//! ## Submodules
//!
//! - `client` - Signing RPC channel implementing `TokenSwapChain`
//! - `contracts` - TokenSwap and ERC20 bindings using alloy sol! macro
//! - `tokens` - ERC20 balance/allowance/metadata helpers
//! - `wallet` - Private-key wallet with a per-network RPC endpoint book

pub mod client;
pub mod contracts;
pub mod tokens;
pub mod wallet;

// Re-export commonly used items
pub use client::{connect_http, EvmChannel};
pub use contracts::{TokenSwap, ERC20};
pub use tokens::TokenInfo;
pub use wallet::LocalKeyWallet;
