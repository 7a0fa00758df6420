//! State-change notifications
//!
//! The wallet connector and the bridge orchestrator publish [`BridgeEvent`]s
//! on an [`EventBus`]; renderers (the CLI, a UI) subscribe. Orchestration
//! never calls into rendering code directly.

use alloy::primitives::{Address, TxHash, U256};
use tokio::sync::broadcast;
use tracing::trace;

use crate::wallet::ConnectionState;

/// Default capacity of the broadcast buffer
const DEFAULT_CAPACITY: usize = 64;

/// Everything a renderer may want to react to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BridgeEvent {
    /// Wallet connector moved to a new state
    ConnectionChanged(ConnectionState),
    /// Signer identity known
    SignerResolved { address: Address },
    /// Fresh V1 balance read from the chain
    BalanceUpdated { balance: U256 },
    /// Amount entered for the next bridge changed
    AmountChanged { amount: U256 },
    /// A bridge run started
    BridgeStarted { amount: Option<U256> },
    /// Approval transaction sent because the allowance was too low
    ApprovalSubmitted { amount: U256 },
    /// Approval mined
    ApprovalConfirmed { tx_hash: TxHash },
    /// Bridge transaction mined
    BridgeConfirmed { tx_hash: TxHash },
    /// Bridge run ended, successfully or not; clears the loading indicator
    BridgeFinished { success: bool },
    /// User-facing error toast
    Notification {
        title: String,
        description: String,
    },
}

/// Broadcast channel of [`BridgeEvent`]s.
///
/// Cloning shares the same channel. Publishing with no subscriber is fine.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<BridgeEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribe to every event published from now on
    pub fn subscribe(&self) -> broadcast::Receiver<BridgeEvent> {
        self.sender.subscribe()
    }

    /// Publish an event to all current subscribers
    pub fn publish(&self, event: BridgeEvent) {
        trace!(?event, "Publishing event");
        // Err only means nobody is listening
        let _ = self.sender.send(event);
    }

    /// Publish an error toast
    pub fn notify_error(&self, title: impl Into<String>, description: impl Into<String>) {
        self.publish(BridgeEvent::Notification {
            title: title.into(),
            description: description.into(),
        });
    }

    /// Number of live subscribers
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
