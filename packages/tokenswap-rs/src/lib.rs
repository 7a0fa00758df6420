//! TokenSwap-RS: V1 -> V2 Token Bridge Client Library
//!
//! This crate provides everything a front-end needs to move a holder's legacy
//! (V1) token balance into the replacement (V2) token through the TokenSwap
//! contract at a fixed 1:1 rate:
//!
//! - **Network Registry** - Static network profiles (chain ID + contract addresses)
//! - **Wallet Connector** - Connection state machine with network-mismatch detection
//! - **Formatting** - Exact fixed-point <-> decimal string conversions for display
//! - **Bridge Orchestrator** - Allowance check, approval, bridge, balance refresh
//! - **EVM Module** - alloy contract bindings, signing channel, local-key wallet
//! - **Deploy Module** - One-shot TokenSwap deployment with a fixed gas price
//! - **Testing Module** - In-memory contract ledger and wallet for tests
//!
//! ## Usage
//!
//! ```toml
//! [dependencies]
//! tokenswap-rs = { path = "../tokenswap-rs" }
//! ```
//!
//! ## Feature Flags
//!
//! - `evm` - Enable the alloy-backed channel, wallet and deployment (default)
//! - `testing` - Enable the in-memory ledger and wallet for downstream tests
//! - `full` - Enable all features

// Core modules (always available)
pub mod chain;
pub mod error;
pub mod events;
pub mod format;
pub mod networks;
pub mod orchestrator;
pub mod redact;
pub mod wallet;

// Chain-specific modules (feature-gated)
#[cfg(feature = "evm")]
pub mod deploy;
#[cfg(feature = "evm")]
pub mod evm;

// Testing utilities (feature-gated)
#[cfg(any(test, feature = "testing"))]
pub mod testing;

// Re-export commonly used items at the crate root
pub use chain::{TokenSwapChain, TxOutcome};
pub use error::{AmountError, BridgeError};
pub use events::{BridgeEvent, EventBus};
pub use format::{
    format_display_amount, from_decimal_string, short_address, to_decimal_string,
    with_thousands_separators, TOKEN_DECIMALS,
};
pub use networks::{all_networks, find_by_chain_id, network_info, NetworkKey, NetworkProfile};
pub use orchestrator::{ApprovalPolicy, BridgeOrchestrator, BridgeReceipt, SessionState};
pub use wallet::{Connection, ConnectionState, VerifiedChannel, WalletConnector, WalletProvider};

#[cfg(feature = "evm")]
pub use deploy::{deploy_token_swap, ContractArtifact, DeployConfig, Deployment};
#[cfg(feature = "evm")]
pub use evm::{EvmChannel, LocalKeyWallet};
