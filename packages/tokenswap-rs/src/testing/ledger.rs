//! In-memory TokenSwap ledger
//!
//! Simulates the V1 and V2 ERC20 tokens and the TokenSwap contract closely
//! enough to drive the bridge flow: allowances are checked and consumed,
//! `bridge` pulls V1 from the caller and pays out V2 from the contract's
//! reserve, reverts surface as errors. Every contract call is recorded.

use alloy::primitives::{Address, TxHash, B256, U256};
use async_trait::async_trait;
use eyre::{eyre, Result};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crate::chain::{TokenSwapChain, TxOutcome};
use crate::networks::NetworkProfile;

/// A contract call seen by the ledger
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerCall {
    BalanceOf,
    Allowance,
    Approve { amount: U256 },
    Bridge { amount: U256 },
    BridgeAll,
}

#[derive(Default)]
struct LedgerState {
    balances: HashMap<(Address, Address), U256>,
    allowances: HashMap<(Address, Address, Address), U256>,
    calls: Vec<LedgerCall>,
    fail_balance: bool,
    fail_allowance: bool,
    fail_approve: bool,
    fail_bridge: bool,
    bridge_delay: Option<Duration>,
    block_number: u64,
}

impl LedgerState {
    fn balance(&self, token: Address, owner: Address) -> U256 {
        self.balances.get(&(token, owner)).copied().unwrap_or_default()
    }

    fn allowance(&self, token: Address, owner: Address, spender: Address) -> U256 {
        self.allowances
            .get(&(token, owner, spender))
            .copied()
            .unwrap_or_default()
    }

    fn mine(&mut self) -> TxOutcome {
        self.block_number += 1;
        TxOutcome {
            tx_hash: TxHash::from(B256::left_padding_from(&self.block_number.to_be_bytes())),
            block_number: Some(self.block_number),
        }
    }

    fn transfer(&mut self, token: Address, from: Address, to: Address, amount: U256) -> Result<()> {
        let from_balance = self.balance(token, from);
        if from_balance < amount {
            return Err(eyre!("execution reverted: ERC20: transfer amount exceeds balance"));
        }
        self.balances.insert((token, from), from_balance - amount);
        let to_balance = self.balance(token, to);
        self.balances.insert((token, to), to_balance + amount);
        Ok(())
    }

    /// TokenSwap.bridge: V1 in via transferFrom, V2 out 1:1
    fn swap(&mut self, profile: &NetworkProfile, owner: Address, amount: U256) -> Result<TxOutcome> {
        let swap = profile.token_swap;
        let allowance = self.allowance(profile.v1_token, owner, swap);
        if allowance < amount {
            return Err(eyre!("execution reverted: ERC20: insufficient allowance"));
        }
        if self.balance(profile.v1_token, owner) < amount {
            return Err(eyre!("execution reverted: ERC20: transfer amount exceeds balance"));
        }
        if self.balance(profile.v2_token, swap) < amount {
            return Err(eyre!("execution reverted: TokenSwap: insufficient V2 reserve"));
        }

        if allowance != U256::MAX {
            self.allowances
                .insert((profile.v1_token, owner, swap), allowance - amount);
        }
        self.transfer(profile.v1_token, owner, swap, amount)?;
        self.transfer(profile.v2_token, swap, owner, amount)?;
        Ok(self.mine())
    }
}

/// Shared in-memory ledger; clones see the same state
#[derive(Clone)]
pub struct MockLedger {
    profile: &'static NetworkProfile,
    state: Arc<Mutex<LedgerState>>,
}

impl MockLedger {
    /// Empty ledger for the contracts of `profile`
    pub fn new(profile: &'static NetworkProfile) -> Self {
        Self {
            profile,
            state: Arc::new(Mutex::new(LedgerState::default())),
        }
    }

    fn state(&self) -> MutexGuard<'_, LedgerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn profile(&self) -> &'static NetworkProfile {
        self.profile
    }

    /// Set `owner`'s V1 balance
    pub fn set_v1_balance(&self, owner: Address, amount: U256) {
        self.state().balances.insert((self.profile.v1_token, owner), amount);
    }

    /// Fund the TokenSwap contract with V2 to pay out
    pub fn fund_v2_reserve(&self, amount: U256) {
        self.state()
            .balances
            .insert((self.profile.v2_token, self.profile.token_swap), amount);
    }

    /// Preset the V1 allowance `owner` granted the TokenSwap contract
    pub fn set_swap_allowance(&self, owner: Address, amount: U256) {
        self.state()
            .allowances
            .insert((self.profile.v1_token, owner, self.profile.token_swap), amount);
    }

    pub fn v1_balance(&self, owner: Address) -> U256 {
        self.state().balance(self.profile.v1_token, owner)
    }

    pub fn v2_balance(&self, owner: Address) -> U256 {
        self.state().balance(self.profile.v2_token, owner)
    }

    pub fn swap_allowance(&self, owner: Address) -> U256 {
        self.state()
            .allowance(self.profile.v1_token, owner, self.profile.token_swap)
    }

    /// Make every balanceOf read fail as if the node were unreachable
    pub fn set_balance_failure(&self, fail: bool) {
        self.state().fail_balance = fail;
    }

    /// Make every allowance read fail as if the node were unreachable
    pub fn set_allowance_failure(&self, fail: bool) {
        self.state().fail_allowance = fail;
    }

    /// Make every approve fail as if the user rejected it
    pub fn set_approve_failure(&self, fail: bool) {
        self.state().fail_approve = fail;
    }

    /// Make every bridge/bridgeAll revert
    pub fn set_bridge_failure(&self, fail: bool) {
        self.state().fail_bridge = fail;
    }

    /// Hold bridge transactions "in the mempool" for a while
    pub fn set_bridge_delay(&self, delay: Duration) {
        self.state().bridge_delay = Some(delay);
    }

    /// Calls recorded so far, oldest first
    pub fn calls(&self) -> Vec<LedgerCall> {
        self.state().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state().calls.clear();
    }

    /// A channel bound to `signer`, reporting `chain_id`
    pub fn channel(&self, chain_id: u64, signer: Address) -> MockChannel {
        MockChannel {
            ledger: self.clone(),
            chain_id,
            signer,
        }
    }

    fn record(&self, call: LedgerCall) {
        self.state().calls.push(call);
    }

    async fn wait_for_inclusion(&self) {
        let delay = self.state().bridge_delay;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }
}

/// Channel over a [`MockLedger`]; its chain ID is fixed at creation
#[derive(Clone)]
pub struct MockChannel {
    ledger: MockLedger,
    chain_id: u64,
    signer: Address,
}

#[async_trait]
impl TokenSwapChain for MockChannel {
    async fn chain_id(&self) -> Result<u64> {
        Ok(self.chain_id)
    }

    fn signer_address(&self) -> Address {
        self.signer
    }

    async fn balance_of(&self, token: Address, owner: Address) -> Result<U256> {
        self.ledger.record(LedgerCall::BalanceOf);
        let state = self.ledger.state();
        if state.fail_balance {
            return Err(eyre!("error sending request: connection refused"));
        }
        Ok(state.balance(token, owner))
    }

    async fn allowance(&self, token: Address, owner: Address, spender: Address) -> Result<U256> {
        self.ledger.record(LedgerCall::Allowance);
        let state = self.ledger.state();
        if state.fail_allowance {
            return Err(eyre!("error sending request: connection refused"));
        }
        Ok(state.allowance(token, owner, spender))
    }

    async fn approve(&self, token: Address, spender: Address, amount: U256) -> Result<TxOutcome> {
        self.ledger.record(LedgerCall::Approve { amount });
        let mut state = self.ledger.state();
        if state.fail_approve {
            return Err(eyre!("user denied transaction signature"));
        }
        state.allowances.insert((token, self.signer, spender), amount);
        Ok(state.mine())
    }

    async fn bridge(&self, token_swap: Address, amount: U256) -> Result<TxOutcome> {
        self.ledger.record(LedgerCall::Bridge { amount });
        self.ledger.wait_for_inclusion().await;

        let profile = self.ledger.profile;
        let mut state = self.ledger.state();
        if token_swap != profile.token_swap {
            return Err(eyre!("no TokenSwap contract at {}", token_swap));
        }
        if state.fail_bridge {
            return Err(eyre!("bridge transaction reverted"));
        }
        state.swap(profile, self.signer, amount)
    }

    async fn bridge_all(&self, token_swap: Address) -> Result<TxOutcome> {
        self.ledger.record(LedgerCall::BridgeAll);
        self.ledger.wait_for_inclusion().await;

        let profile = self.ledger.profile;
        let mut state = self.ledger.state();
        if token_swap != profile.token_swap {
            return Err(eyre!("no TokenSwap contract at {}", token_swap));
        }
        if state.fail_bridge {
            return Err(eyre!("bridgeAll transaction reverted"));
        }
        let amount = state.balance(profile.v1_token, self.signer);
        state.swap(profile, self.signer, amount)
    }
}
