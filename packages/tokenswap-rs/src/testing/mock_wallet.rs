//! Mock wallet provider
//!
//! Hands out [`MockChannel`]s over a shared [`MockLedger`]. The wallet's
//! network can be switched; channels already handed out keep reporting the
//! network they were created on.

use alloy::primitives::{address, Address};
use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

use crate::chain::TokenSwapChain;
use crate::error::BridgeError;
use crate::testing::ledger::MockLedger;
use crate::wallet::WalletProvider;

/// Anvil's first default account
pub const DEFAULT_SIGNER: Address = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");

#[derive(Clone)]
pub struct MockWallet {
    ledger: MockLedger,
    signer: Address,
    chain_id: Arc<AtomicU64>,
    connects: Arc<AtomicUsize>,
    reject: bool,
    no_wallet: bool,
    fail_switch: bool,
}

impl MockWallet {
    /// Wallet holding [`DEFAULT_SIGNER`], currently on `chain_id`
    pub fn new(ledger: MockLedger, chain_id: u64) -> Self {
        Self {
            ledger,
            signer: DEFAULT_SIGNER,
            chain_id: Arc::new(AtomicU64::new(chain_id)),
            connects: Arc::new(AtomicUsize::new(0)),
            reject: false,
            no_wallet: false,
            fail_switch: false,
        }
    }

    /// The user dismisses every connection prompt
    pub fn rejecting(mut self) -> Self {
        self.reject = true;
        self
    }

    /// No wallet installed
    pub fn without_wallet(mut self) -> Self {
        self.no_wallet = true;
        self
    }

    /// The user declines the network switch
    pub fn with_switch_failure(mut self) -> Self {
        self.fail_switch = true;
        self
    }

    pub fn signer(&self) -> Address {
        self.signer
    }

    /// Network the wallet is on right now
    pub fn current_chain_id(&self) -> u64 {
        self.chain_id.load(Ordering::SeqCst)
    }

    /// Number of successful `connect()` calls
    pub fn connect_count(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WalletProvider for MockWallet {
    async fn connect(&self) -> Result<Arc<dyn TokenSwapChain>, BridgeError> {
        if self.no_wallet {
            return Err(BridgeError::NoWalletAvailable);
        }
        if self.reject {
            return Err(BridgeError::UserRejected);
        }
        self.connects.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::new(
            self.ledger.channel(self.current_chain_id(), self.signer),
        ))
    }

    async fn switch_chain(&self, chain_id: u64) -> Result<(), BridgeError> {
        if self.fail_switch {
            return Err(BridgeError::UserRejected);
        }
        self.chain_id.store(chain_id, Ordering::SeqCst);
        Ok(())
    }
}
