//! Bridge Orchestrator
//!
//! Drives one V1 -> V2 bridge at a time over a [`VerifiedChannel`]:
//!
//! 1. read the allowance the signer granted the TokenSwap contract
//! 2. approve when it is too low, and wait for the approval to be mined
//! 3. send `bridge(amount)` (or `bridgeAll()`) and wait for it to be mined
//! 4. re-read the V1 balance from the chain
//!
//! Each step starts only after the previous transaction is mined, so a
//! failure never leaves half-applied local state. Progress and failures are
//! published on the [`EventBus`]; nothing here renders anything.

use alloy::primitives::U256;
use eyre::Report;
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::chain::TxOutcome;
use crate::error::BridgeError;
use crate::events::{BridgeEvent, EventBus};
use crate::format::{from_decimal_string, to_decimal_string, TOKEN_DECIMALS};
use crate::wallet::VerifiedChannel;

/// How much to approve when the allowance is insufficient
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApprovalPolicy {
    /// Approve `U256::MAX` once so later bridges skip the approval.
    /// The TokenSwap contract can then move the whole V1 balance.
    #[default]
    Unlimited,
    /// Approve exactly the amount being bridged
    Exact,
}

impl ApprovalPolicy {
    /// Allowance to request for a bridge of `needed`
    pub fn approval_amount(&self, needed: U256) -> U256 {
        match self {
            ApprovalPolicy::Unlimited => U256::MAX,
            ApprovalPolicy::Exact => needed,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ApprovalPolicy::Unlimited => "unlimited",
            ApprovalPolicy::Exact => "exact",
        }
    }
}

impl fmt::Display for ApprovalPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApprovalPolicy {
    type Err = Report;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "unlimited" | "max" => Ok(ApprovalPolicy::Unlimited),
            "exact" => Ok(ApprovalPolicy::Exact),
            other => Err(eyre::eyre!(
                "Unknown approval mode '{}' (expected 'unlimited' or 'exact')",
                other
            )),
        }
    }
}

/// Per-session view of the signer's V1 position.
///
/// The balance is a cached read; the contract is the source of truth.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub signer_address: Option<alloy::primitives::Address>,
    pub v1_balance: U256,
    pub amount_to_bridge: U256,
    pub in_flight: bool,
}

/// What a successful bridge did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeReceipt {
    /// V1 amount moved
    pub amount: U256,
    /// Approval transaction, if one was needed
    pub approval: Option<TxOutcome>,
    /// The bridge transaction
    pub bridge: TxOutcome,
    /// V1 balance re-read after the bridge; `None` if that read failed
    pub balance_after: Option<U256>,
}

#[derive(Debug, Clone, Copy)]
enum BridgeRequest {
    Amount(U256),
    All,
}

/// Clears the in-flight flag on every exit path
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

pub struct BridgeOrchestrator {
    channel: VerifiedChannel,
    policy: ApprovalPolicy,
    events: EventBus,
    session: RwLock<SessionState>,
    in_flight: AtomicBool,
}

impl BridgeOrchestrator {
    pub fn new(channel: VerifiedChannel, policy: ApprovalPolicy, events: EventBus) -> Self {
        let session = SessionState {
            signer_address: Some(channel.signer_address()),
            ..Default::default()
        };
        Self {
            channel,
            policy,
            events,
            session: RwLock::new(session),
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn channel(&self) -> &VerifiedChannel {
        &self.channel
    }

    /// Snapshot of the session state
    pub async fn session(&self) -> SessionState {
        let mut snapshot = self.session.read().await.clone();
        snapshot.in_flight = self.in_flight.load(Ordering::SeqCst);
        snapshot
    }

    /// Re-read the signer's V1 balance from the chain
    pub async fn refresh_balance(&self) -> Result<U256, BridgeError> {
        let profile = self.channel.profile();
        let signer = self.channel.signer_address();
        let balance = match self.channel.chain().balance_of(profile.v1_token, signer).await {
            Ok(balance) => balance,
            Err(e) => {
                let err = BridgeError::Rpc(format!("{:#}", e));
                warn!(error = %err, "Failed to refresh V1 balance");
                self.events.notify_error("Can't Refresh Balance", err.to_string());
                return Err(err);
            }
        };

        debug!(signer = %signer, balance = %balance, "V1 balance refreshed");
        self.session.write().await.v1_balance = balance;
        self.events.publish(BridgeEvent::BalanceUpdated { balance });
        Ok(balance)
    }

    /// Set the amount for the next [`bridge_pending`](Self::bridge_pending)
    pub async fn set_amount(&self, amount: U256) {
        self.session.write().await.amount_to_bridge = amount;
        self.events.publish(BridgeEvent::AmountChanged { amount });
    }

    /// Parse and set a human-entered amount (18 decimals); empty input is zero
    pub async fn set_amount_from_str(&self, input: &str) -> Result<U256, BridgeError> {
        let amount = from_decimal_string(input, TOKEN_DECIMALS)
            .map_err(|e| BridgeError::InvalidAmount(e.to_string()))?;
        self.set_amount(amount).await;
        Ok(amount)
    }

    /// Set the amount to the cached V1 balance
    pub async fn set_max(&self) -> U256 {
        let balance = self.session.read().await.v1_balance;
        self.set_amount(balance).await;
        balance
    }

    /// Bridge the amount currently set in the session
    pub async fn bridge_pending(&self) -> Result<BridgeReceipt, BridgeError> {
        let amount = self.session.read().await.amount_to_bridge;
        self.bridge(amount).await
    }

    /// Bridge exactly `amount` V1 tokens
    pub async fn bridge(&self, amount: U256) -> Result<BridgeReceipt, BridgeError> {
        self.run(BridgeRequest::Amount(amount)).await
    }

    /// Bridge the signer's whole V1 balance via `bridgeAll()`
    pub async fn bridge_all(&self) -> Result<BridgeReceipt, BridgeError> {
        self.run(BridgeRequest::All).await
    }

    async fn run(&self, request: BridgeRequest) -> Result<BridgeReceipt, BridgeError> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            debug!("Bridge requested while another one is in flight");
            return Err(BridgeError::InFlight);
        }
        let _guard = InFlightGuard(&self.in_flight);

        let amount = match request {
            BridgeRequest::Amount(amount) => Some(amount),
            BridgeRequest::All => None,
        };
        self.events.publish(BridgeEvent::BridgeStarted { amount });

        let result = self.execute(request).await;
        match &result {
            Ok(receipt) => {
                info!(
                    amount = %receipt.amount,
                    tx_hash = %receipt.bridge.tx_hash,
                    approved = receipt.approval.is_some(),
                    "Bridge complete"
                );
            }
            Err(e) => {
                warn!(error = %e, "Bridge aborted");
                if !e.is_silent() {
                    let detail = match e {
                        BridgeError::ApprovalFailed(d) | BridgeError::BridgeFailed(d) => d.clone(),
                        other => other.to_string(),
                    };
                    self.events.notify_error(e.title(), detail);
                }
            }
        }
        self.events.publish(BridgeEvent::BridgeFinished {
            success: result.is_ok(),
        });
        result
    }

    async fn execute(&self, request: BridgeRequest) -> Result<BridgeReceipt, BridgeError> {
        let profile = self.channel.profile();
        let chain = self.channel.chain();
        let signer = self.channel.signer_address();

        let amount = match request {
            BridgeRequest::Amount(amount) => {
                if amount.is_zero() {
                    return Err(BridgeError::InvalidAmount("amount must be positive".into()));
                }
                let cached = self.session.read().await.v1_balance;
                if amount > cached {
                    // Advisory only; the contract rejects over-withdrawal
                    warn!(
                        amount = %to_decimal_string(amount, TOKEN_DECIMALS),
                        balance = %to_decimal_string(cached, TOKEN_DECIMALS),
                        "Amount exceeds cached V1 balance"
                    );
                }
                amount
            }
            BridgeRequest::All => {
                let balance = chain
                    .balance_of(profile.v1_token, signer)
                    .await
                    .map_err(|e| BridgeError::Rpc(format!("{:#}", e)))?;
                if balance.is_zero() {
                    return Err(BridgeError::InvalidAmount("no V1 balance to bridge".into()));
                }
                balance
            }
        };

        let allowance = chain
            .allowance(profile.v1_token, signer, profile.token_swap)
            .await
            .map_err(|e| BridgeError::Rpc(format!("{:#}", e)))?;

        let approval = if allowance < amount {
            let approve_amount = self.policy.approval_amount(amount);
            info!(
                allowance = %allowance,
                approve = %approve_amount,
                policy = %self.policy,
                "Allowance too low, requesting approval"
            );
            self.events.publish(BridgeEvent::ApprovalSubmitted {
                amount: approve_amount,
            });

            let outcome = chain
                .approve(profile.v1_token, profile.token_swap, approve_amount)
                .await
                .map_err(|e| BridgeError::ApprovalFailed(format!("{:#}", e)))?;

            debug!(tx_hash = %outcome.tx_hash, "Approval mined");
            self.events.publish(BridgeEvent::ApprovalConfirmed {
                tx_hash: outcome.tx_hash,
            });
            Some(outcome)
        } else {
            debug!(allowance = %allowance, "Allowance sufficient, skipping approval");
            None
        };

        let bridged = match request {
            BridgeRequest::Amount(_) => chain.bridge(profile.token_swap, amount).await,
            BridgeRequest::All => chain.bridge_all(profile.token_swap).await,
        }
        .map_err(|e| BridgeError::BridgeFailed(format!("{:#}", e)))?;

        info!(tx_hash = %bridged.tx_hash, block = ?bridged.block_number, "Bridge mined");
        self.events.publish(BridgeEvent::BridgeConfirmed {
            tx_hash: bridged.tx_hash,
        });

        // The bridge itself succeeded; a failed refresh only leaves the cache stale
        let balance_after = self.refresh_balance().await.ok();

        Ok(BridgeReceipt {
            amount,
            approval,
            bridge: bridged,
            balance_after,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::networks::{network_info, NetworkKey, NetworkProfile};
    use crate::testing::{
        assert_approval_before_bridge, assert_no_approval, assert_not_bridged,
        assert_single_approval, LedgerCall, MockLedger, MockWallet,
    };
    use crate::wallet::{Connection, WalletConnector};
    use std::sync::Arc;
    use std::time::Duration;

    fn kovan() -> &'static NetworkProfile {
        network_info(NetworkKey::Kovan)
    }

    fn tokens(n: u64) -> U256 {
        U256::from(n) * U256::from(10u64).pow(U256::from(18u8))
    }

    struct Harness {
        ledger: MockLedger,
        wallet: MockWallet,
        events: EventBus,
        orchestrator: BridgeOrchestrator,
    }

    async fn harness(balance: U256, allowance: U256, policy: ApprovalPolicy) -> Harness {
        let ledger = MockLedger::new(kovan());
        let wallet = MockWallet::new(ledger.clone(), kovan().chain_id);
        ledger.set_v1_balance(wallet.signer(), balance);
        ledger.set_swap_allowance(wallet.signer(), allowance);
        ledger.fund_v2_reserve(tokens(12_000_000));

        let events = EventBus::new();
        let mut connector =
            WalletConnector::new(Arc::new(wallet.clone()), kovan(), events.clone());
        let channel = match connector.connect().await.unwrap() {
            Connection::Ready(channel) => channel,
            other => panic!("expected ready connection, got {:?}", other),
        };

        let orchestrator = BridgeOrchestrator::new(channel, policy, events.clone());
        orchestrator.refresh_balance().await.unwrap();
        ledger.clear_calls();

        Harness {
            ledger,
            wallet,
            events,
            orchestrator,
        }
    }

    #[tokio::test]
    async fn test_bridge_with_zero_allowance_approves_unlimited() {
        let h = harness(tokens(100), U256::ZERO, ApprovalPolicy::Unlimited).await;

        let receipt = h.orchestrator.bridge(tokens(100)).await.unwrap();

        let calls = h.ledger.calls();
        assert_single_approval(&calls, U256::MAX).unwrap();
        assert_approval_before_bridge(&calls).unwrap();
        assert!(calls.contains(&LedgerCall::Bridge {
            amount: tokens(100)
        }));
        assert!(receipt.approval.is_some());
        assert_eq!(receipt.balance_after, Some(U256::ZERO));
        assert_eq!(h.orchestrator.session().await.v1_balance, U256::ZERO);
        assert_eq!(h.ledger.v2_balance(h.wallet.signer()), tokens(100));
        assert_eq!(h.ledger.swap_allowance(h.wallet.signer()), U256::MAX);
    }

    #[tokio::test]
    async fn test_bridge_with_sufficient_allowance_skips_approval() {
        let h = harness(tokens(100), tokens(1000), ApprovalPolicy::Unlimited).await;

        let receipt = h.orchestrator.bridge(tokens(50)).await.unwrap();

        let calls = h.ledger.calls();
        assert_no_approval(&calls).unwrap();
        assert_eq!(
            calls,
            vec![
                LedgerCall::Allowance,
                LedgerCall::Bridge { amount: tokens(50) },
                LedgerCall::BalanceOf,
            ]
        );
        assert!(receipt.approval.is_none());
        assert_eq!(receipt.balance_after, Some(tokens(50)));
    }

    #[tokio::test]
    async fn test_bridge_all_mirrors_bridge_of_full_balance() {
        let h = harness(tokens(250), U256::ZERO, ApprovalPolicy::Unlimited).await;

        let receipt = h.orchestrator.bridge_all().await.unwrap();

        assert_eq!(receipt.amount, tokens(250));
        assert_eq!(receipt.balance_after, Some(U256::ZERO));
        assert_eq!(h.ledger.v2_balance(h.wallet.signer()), tokens(250));
        let calls = h.ledger.calls();
        assert_single_approval(&calls, U256::MAX).unwrap();
        assert!(calls.contains(&LedgerCall::BridgeAll));
    }

    #[tokio::test]
    async fn test_exact_policy_approves_only_the_amount() {
        let h = harness(tokens(100), U256::ZERO, ApprovalPolicy::Exact).await;

        h.orchestrator.bridge(tokens(40)).await.unwrap();

        assert_single_approval(&h.ledger.calls(), tokens(40)).unwrap();
        // transferFrom consumed the exact approval
        assert_eq!(h.ledger.swap_allowance(h.wallet.signer()), U256::ZERO);
    }

    #[tokio::test]
    async fn test_approval_failure_aborts_without_bridging() {
        let h = harness(tokens(100), U256::ZERO, ApprovalPolicy::Unlimited).await;
        h.ledger.set_approve_failure(true);
        let mut rx = h.events.subscribe();

        let err = h.orchestrator.bridge(tokens(10)).await.unwrap_err();

        assert!(matches!(err, BridgeError::ApprovalFailed(_)));
        assert_not_bridged(&h.ledger.calls()).unwrap();
        assert_eq!(h.ledger.v1_balance(h.wallet.signer()), tokens(100));
        assert!(!h.orchestrator.session().await.in_flight);

        let mut saw_toast = false;
        while let Ok(event) = rx.try_recv() {
            if let BridgeEvent::Notification { title, .. } = event {
                assert_eq!(title, "Can't Approve");
                saw_toast = true;
            }
        }
        assert!(saw_toast);
    }

    #[tokio::test]
    async fn test_bridge_failure_keeps_approval() {
        let h = harness(tokens(100), U256::ZERO, ApprovalPolicy::Unlimited).await;
        h.ledger.set_bridge_failure(true);

        let err = h.orchestrator.bridge(tokens(10)).await.unwrap_err();
        assert!(matches!(err, BridgeError::BridgeFailed(_)));
        assert_eq!(err.title(), "Can't Bridge");
        assert_eq!(h.ledger.swap_allowance(h.wallet.signer()), U256::MAX);
        assert_eq!(h.ledger.v1_balance(h.wallet.signer()), tokens(100));

        // Retry succeeds without a second approval
        h.ledger.set_bridge_failure(false);
        h.ledger.clear_calls();
        h.orchestrator.bridge(tokens(10)).await.unwrap();
        assert_no_approval(&h.ledger.calls()).unwrap();
        assert_eq!(h.orchestrator.session().await.v1_balance, tokens(90));
    }

    fn toast_titles(rx: &mut tokio::sync::broadcast::Receiver<BridgeEvent>) -> Vec<String> {
        let mut titles = Vec::new();
        while let Ok(event) = rx.try_recv() {
            if let BridgeEvent::Notification { title, .. } = event {
                titles.push(title);
            }
        }
        titles
    }

    #[tokio::test]
    async fn test_failed_refresh_after_bridge_still_succeeds() {
        let h = harness(tokens(100), tokens(1000), ApprovalPolicy::Unlimited).await;
        h.ledger.set_balance_failure(true);
        let mut rx = h.events.subscribe();

        let receipt = h.orchestrator.bridge(tokens(10)).await.unwrap();

        assert_eq!(receipt.balance_after, None);
        assert_eq!(h.ledger.v2_balance(h.wallet.signer()), tokens(10));
        // Cached balance is stale but the session is usable
        assert_eq!(h.orchestrator.session().await.v1_balance, tokens(100));
        assert!(!h.orchestrator.session().await.in_flight);
        assert_eq!(toast_titles(&mut rx), vec!["Can't Refresh Balance"]);
    }

    #[tokio::test]
    async fn test_allowance_read_failure_aborts_before_approval() {
        let h = harness(tokens(100), U256::ZERO, ApprovalPolicy::Unlimited).await;
        h.ledger.set_allowance_failure(true);
        let mut rx = h.events.subscribe();

        let err = h.orchestrator.bridge(tokens(10)).await.unwrap_err();

        assert!(matches!(err, BridgeError::Rpc(_)));
        assert_eq!(h.ledger.calls(), vec![LedgerCall::Allowance]);
        assert_eq!(h.ledger.v1_balance(h.wallet.signer()), tokens(100));
        assert_eq!(toast_titles(&mut rx), vec!["Network Error"]);
    }

    #[tokio::test]
    async fn test_refresh_balance_failure_is_notified() {
        let h = harness(tokens(100), U256::ZERO, ApprovalPolicy::Unlimited).await;
        h.ledger.set_balance_failure(true);
        let mut rx = h.events.subscribe();

        let err = h.orchestrator.refresh_balance().await.unwrap_err();

        match err {
            BridgeError::Rpc(detail) => assert!(detail.contains("connection refused")),
            other => panic!("unexpected error {:?}", other),
        }
        assert_eq!(h.orchestrator.session().await.v1_balance, tokens(100));
        assert_eq!(toast_titles(&mut rx), vec!["Can't Refresh Balance"]);

        h.ledger.set_balance_failure(false);
        assert_eq!(h.orchestrator.refresh_balance().await.unwrap(), tokens(100));
    }

    #[tokio::test]
    async fn test_over_balance_is_rejected_by_contract() {
        let h = harness(tokens(10), tokens(1000), ApprovalPolicy::Unlimited).await;

        let err = h.orchestrator.bridge(tokens(11)).await.unwrap_err();
        match err {
            BridgeError::BridgeFailed(detail) => assert!(detail.contains("exceeds balance")),
            other => panic!("unexpected error {:?}", other),
        }
        assert_eq!(h.ledger.v1_balance(h.wallet.signer()), tokens(10));
    }

    #[tokio::test]
    async fn test_zero_amount_is_invalid() {
        let h = harness(tokens(10), U256::ZERO, ApprovalPolicy::Unlimited).await;

        assert!(matches!(
            h.orchestrator.bridge(U256::ZERO).await,
            Err(BridgeError::InvalidAmount(_))
        ));
        assert!(h.ledger.calls().is_empty());
    }

    #[tokio::test]
    async fn test_bridge_all_with_empty_balance() {
        let h = harness(U256::ZERO, U256::ZERO, ApprovalPolicy::Unlimited).await;

        assert!(matches!(
            h.orchestrator.bridge_all().await,
            Err(BridgeError::InvalidAmount(_))
        ));
        assert_eq!(h.ledger.calls(), vec![LedgerCall::BalanceOf]);
    }

    #[tokio::test]
    async fn test_overlapping_bridge_is_refused() {
        let h = harness(tokens(100), tokens(1000), ApprovalPolicy::Unlimited).await;
        h.ledger.set_bridge_delay(Duration::from_millis(200));

        let (first, second) = tokio::join!(h.orchestrator.bridge(tokens(10)), async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            h.orchestrator.bridge(tokens(10)).await
        });

        assert!(first.is_ok());
        assert_eq!(second.unwrap_err(), BridgeError::InFlight);
        assert_eq!(h.ledger.v1_balance(h.wallet.signer()), tokens(90));
        assert!(!h.orchestrator.session().await.in_flight);
    }

    #[tokio::test]
    async fn test_pending_amount_from_input() {
        let h = harness(tokens(100), U256::ZERO, ApprovalPolicy::Unlimited).await;

        assert_eq!(
            h.orchestrator.set_amount_from_str("12.5").await.unwrap(),
            U256::from(12_500_000_000_000_000_000u128)
        );
        assert!(h.orchestrator.set_amount_from_str("abc1").await.is_err());
        h.orchestrator.bridge_pending().await.unwrap();
        assert_eq!(
            h.orchestrator.session().await.v1_balance,
            U256::from(87_500_000_000_000_000_000u128)
        );

        assert_eq!(h.orchestrator.set_max().await, U256::from(87_500_000_000_000_000_000u128));
        h.orchestrator.bridge_pending().await.unwrap();
        assert_eq!(h.orchestrator.session().await.v1_balance, U256::ZERO);
    }

    #[tokio::test]
    async fn test_event_sequence() {
        let h = harness(tokens(5), U256::ZERO, ApprovalPolicy::Unlimited).await;
        let mut rx = h.events.subscribe();

        h.orchestrator.bridge(tokens(5)).await.unwrap();

        let mut kinds = Vec::new();
        while let Ok(event) = rx.try_recv() {
            kinds.push(match event {
                BridgeEvent::BridgeStarted { .. } => "started",
                BridgeEvent::ApprovalSubmitted { .. } => "approval_submitted",
                BridgeEvent::ApprovalConfirmed { .. } => "approval_confirmed",
                BridgeEvent::BridgeConfirmed { .. } => "bridge_confirmed",
                BridgeEvent::BalanceUpdated { .. } => "balance",
                BridgeEvent::BridgeFinished { success: true } => "finished",
                other => panic!("unexpected event {:?}", other),
            });
        }
        assert_eq!(
            kinds,
            vec![
                "started",
                "approval_submitted",
                "approval_confirmed",
                "bridge_confirmed",
                "balance",
                "finished"
            ]
        );
    }

    #[tokio::test]
    async fn test_no_balance_read_until_switch_succeeds() {
        let ledger = MockLedger::new(kovan());
        let wallet = MockWallet::new(ledger.clone(), 1);
        ledger.set_v1_balance(wallet.signer(), tokens(3));
        let events = EventBus::new();
        let mut connector = WalletConnector::new(Arc::new(wallet), kovan(), events.clone());

        assert!(matches!(
            connector.connect().await.unwrap(),
            Connection::Mismatch { .. }
        ));
        assert!(connector.verified().is_err());
        assert!(ledger.calls().is_empty());

        let channel = connector.switch_network().await.unwrap();
        assert!(ledger.calls().is_empty());

        let orchestrator = BridgeOrchestrator::new(channel, ApprovalPolicy::default(), events);
        assert_eq!(orchestrator.refresh_balance().await.unwrap(), tokens(3));
        assert_eq!(ledger.calls(), vec![LedgerCall::BalanceOf]);
    }

    #[test]
    fn test_approval_policy_parsing() {
        assert_eq!("exact".parse::<ApprovalPolicy>().unwrap(), ApprovalPolicy::Exact);
        assert_eq!(
            "UNLIMITED".parse::<ApprovalPolicy>().unwrap(),
            ApprovalPolicy::Unlimited
        );
        assert!("some".parse::<ApprovalPolicy>().is_err());
        assert_eq!(ApprovalPolicy::default(), ApprovalPolicy::Unlimited);
        assert_eq!(
            ApprovalPolicy::Exact.approval_amount(U256::from(3u8)),
            U256::from(3u8)
        );
    }
}
