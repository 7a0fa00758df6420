//! Testing Utilities Module
//!
//! In-memory stand-ins for the chain and the wallet, used by the unit tests
//! of this crate and available to downstream crates via the `testing` feature.
//!
//! ## Submodules
//!
//! - `ledger` - Simulated V1/V2 ERC20 balances, allowances and TokenSwap logic
//! - `mock_wallet` - Wallet provider with a switchable network
//! - `assertions` - Common assertions on recorded ledger calls

pub mod assertions;
pub mod ledger;
pub mod mock_wallet;

// Re-export commonly used items
pub use assertions::*;
pub use ledger::*;
pub use mock_wallet::*;
