//! Wallet Connector
//!
//! Obtains a signing channel from a [`WalletProvider`], checks that the wallet
//! is on the target network, and offers a network switch when it is not.
//!
//! ## State machine
//!
//! ```text
//! Disconnected -> Connecting -> Connected
//!                            -> NetworkMismatch -> Switching -> Connected
//! (any state) -> Disconnected   on rejection, failed switch, or disconnect()
//! ```
//!
//! Only the connector can produce a [`VerifiedChannel`], and it does so only
//! after the channel's chain ID matched the target profile. The orchestrator
//! accepts nothing else, so no balance read or transaction can happen while
//! the wallet sits on the wrong network.

use alloy::primitives::Address;
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::chain::TokenSwapChain;
use crate::error::BridgeError;
use crate::events::{BridgeEvent, EventBus};
use crate::networks::{find_by_chain_id, NetworkProfile};

/// Capability supplied by the wallet (browser extension, WalletConnect
/// session, local key...).
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Prompt for a wallet and hand out a channel on its current network
    async fn connect(&self) -> Result<Arc<dyn TokenSwapChain>, BridgeError>;

    /// Ask the wallet to change its active network
    async fn switch_chain(&self, chain_id: u64) -> Result<(), BridgeError>;
}

/// Connection lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    NetworkMismatch { expected: u64, actual: u64 },
    Switching,
    Connected { chain_id: u64 },
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionState::Disconnected => write!(f, "disconnected"),
            ConnectionState::Connecting => write!(f, "connecting"),
            ConnectionState::NetworkMismatch { expected, actual } => {
                write!(f, "network mismatch (expected {}, got {})", expected, actual)
            }
            ConnectionState::Switching => write!(f, "switching network"),
            ConnectionState::Connected { chain_id } => write!(f, "connected to chain {}", chain_id),
        }
    }
}

/// A channel whose chain ID matched the target profile.
#[derive(Clone)]
pub struct VerifiedChannel {
    chain: Arc<dyn TokenSwapChain>,
    profile: &'static NetworkProfile,
}

impl VerifiedChannel {
    /// The underlying channel
    pub fn chain(&self) -> &dyn TokenSwapChain {
        self.chain.as_ref()
    }

    /// The profile the channel was verified against
    pub fn profile(&self) -> &'static NetworkProfile {
        self.profile
    }

    /// Signing identity
    pub fn signer_address(&self) -> Address {
        self.chain.signer_address()
    }
}

impl fmt::Debug for VerifiedChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VerifiedChannel")
            .field("network", &self.profile.key)
            .field("signer", &self.chain.signer_address())
            .finish()
    }
}

/// Result of a connection attempt that reached the wallet
#[derive(Debug)]
pub enum Connection {
    /// Wallet is on the target network
    Ready(VerifiedChannel),
    /// Wallet is on another network; call [`WalletConnector::switch_network`]
    Mismatch { expected: u64, actual: u64 },
}

/// Connection service, constructed once per application run.
pub struct WalletConnector {
    provider: Arc<dyn WalletProvider>,
    target: &'static NetworkProfile,
    events: EventBus,
    state: ConnectionState,
    verified: Option<VerifiedChannel>,
}

impl WalletConnector {
    pub fn new(
        provider: Arc<dyn WalletProvider>,
        target: &'static NetworkProfile,
        events: EventBus,
    ) -> Self {
        Self {
            provider,
            target,
            events,
            state: ConnectionState::Disconnected,
            verified: None,
        }
    }

    /// Current state
    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Target network profile
    pub fn target(&self) -> &'static NetworkProfile {
        self.target
    }

    /// Connect to the wallet and check its network
    pub async fn connect(&mut self) -> Result<Connection, BridgeError> {
        self.reset();
        self.set_state(ConnectionState::Connecting);

        let channel = match self.provider.connect().await {
            Ok(channel) => channel,
            Err(e) => {
                if e.is_silent() {
                    debug!("Wallet prompt dismissed");
                } else {
                    warn!(error = %e, "Wallet connection failed");
                }
                self.set_state(ConnectionState::Disconnected);
                return Err(e);
            }
        };

        self.verify(channel).await
    }

    /// Ask the wallet to move to the target network, then reconnect.
    ///
    /// On failure the connector ends up `Disconnected`.
    pub async fn switch_network(&mut self) -> Result<VerifiedChannel, BridgeError> {
        match self.state {
            ConnectionState::NetworkMismatch { .. } => {}
            ConnectionState::Connected { .. } => return self.verified(),
            _ => return Err(BridgeError::NotConnected),
        }

        let target = self.target.chain_id;
        self.set_state(ConnectionState::Switching);
        info!(chain_id = target, network = self.target.name, "Requesting network switch");

        if let Err(e) = self.provider.switch_chain(target).await {
            warn!(error = %e, chain_id = target, "Network switch failed");
            self.disconnect();
            return Err(e);
        }

        // The old channel is pinned to the old network; get a fresh one
        let channel = match self.provider.connect().await {
            Ok(channel) => channel,
            Err(e) => {
                warn!(error = %e, "Reconnect after network switch failed");
                self.disconnect();
                return Err(e);
            }
        };

        match self.verify(channel).await? {
            Connection::Ready(verified) => Ok(verified),
            Connection::Mismatch { expected, actual } => {
                warn!(expected, actual, "Wallet still on the wrong network after switching");
                self.disconnect();
                Err(BridgeError::NetworkMismatch { expected, actual })
            }
        }
    }

    /// The verified channel, if connected to the target network
    pub fn verified(&self) -> Result<VerifiedChannel, BridgeError> {
        match (self.state, &self.verified) {
            (ConnectionState::Connected { .. }, Some(channel)) => Ok(channel.clone()),
            (ConnectionState::NetworkMismatch { expected, actual }, _) => {
                Err(BridgeError::NetworkMismatch { expected, actual })
            }
            _ => Err(BridgeError::NotConnected),
        }
    }

    /// Drop any channel and return to `Disconnected`
    pub fn disconnect(&mut self) {
        self.reset();
        if self.state != ConnectionState::Disconnected {
            self.set_state(ConnectionState::Disconnected);
        }
    }

    async fn verify(&mut self, channel: Arc<dyn TokenSwapChain>) -> Result<Connection, BridgeError> {
        let actual = match channel.chain_id().await {
            Ok(id) => id,
            Err(e) => {
                warn!(error = %e, "Failed to read chain ID from wallet");
                self.reset();
                self.set_state(ConnectionState::Disconnected);
                return Err(BridgeError::Rpc(format!("{:#}", e)));
            }
        };
        let expected = self.target.chain_id;

        if actual != expected {
            let current = find_by_chain_id(actual).map(|p| p.name).unwrap_or("unknown network");
            warn!(
                expected,
                actual,
                current,
                target = self.target.name,
                "Wallet is on the wrong network"
            );
            // The mismatched channel is dropped; switching hands out a new one
            drop(channel);
            self.set_state(ConnectionState::NetworkMismatch { expected, actual });
            return Ok(Connection::Mismatch { expected, actual });
        }

        let verified = VerifiedChannel {
            chain: channel,
            profile: self.target,
        };
        let signer = verified.signer_address();
        info!(chain_id = actual, signer = %signer, "Wallet connected");

        self.verified = Some(verified.clone());
        self.set_state(ConnectionState::Connected { chain_id: actual });
        self.events.publish(BridgeEvent::SignerResolved { address: signer });
        Ok(Connection::Ready(verified))
    }

    fn reset(&mut self) {
        self.verified = None;
    }

    fn set_state(&mut self, state: ConnectionState) {
        debug!(from = %self.state, to = %state, "Connection state change");
        self.state = state;
        self.events.publish(BridgeEvent::ConnectionChanged(state));
    }
}
