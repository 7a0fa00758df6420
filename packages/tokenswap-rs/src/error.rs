//! Error taxonomy for wallet connection and bridging

use thiserror::Error;

/// Errors surfaced by the wallet connector and the bridge orchestrator.
///
/// Every variant is recoverable: the session stays usable and the caller
/// may retry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BridgeError {
    #[error("User rejected the wallet request")]
    UserRejected,

    #[error("No wallet available")]
    NoWalletAvailable,

    #[error("Wrong network: expected chain {expected}, wallet is on chain {actual}")]
    NetworkMismatch { expected: u64, actual: u64 },

    #[error("Wallet has no endpoint for chain {0}")]
    UnsupportedNetwork(u64),

    #[error("Wallet is not connected")]
    NotConnected,

    #[error("A bridge transaction is already in flight")]
    InFlight,

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Can't Approve: {0}")]
    ApprovalFailed(String),

    #[error("Can't Bridge: {0}")]
    BridgeFailed(String),

    #[error("RPC error: {0}")]
    Rpc(String),
}

impl BridgeError {
    /// Short title for a user-facing notification
    pub fn title(&self) -> &'static str {
        match self {
            BridgeError::UserRejected => "Request Rejected",
            BridgeError::NoWalletAvailable => "No Wallet",
            BridgeError::NetworkMismatch { .. } => "Incorrect Network",
            BridgeError::UnsupportedNetwork(_) => "Unsupported Network",
            BridgeError::NotConnected => "Not Connected",
            BridgeError::InFlight => "Bridge In Progress",
            BridgeError::InvalidAmount(_) => "Invalid Amount",
            BridgeError::ApprovalFailed(_) => "Can't Approve",
            BridgeError::BridgeFailed(_) => "Can't Bridge",
            BridgeError::Rpc(_) => "Network Error",
        }
    }

    /// Whether this error should be shown to the user at all.
    /// A rejected prompt aborts silently.
    pub fn is_silent(&self) -> bool {
        matches!(self, BridgeError::UserRejected)
    }
}

/// Errors from parsing a human-entered decimal amount
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AmountError {
    #[error("invalid character '{0}' in amount")]
    InvalidCharacter(char),

    #[error("amount has more than one decimal point")]
    MultipleDecimalPoints,

    #[error("amount has {found} fractional digits, at most {max} allowed")]
    TooManyDecimals { found: usize, max: u8 },

    #[error("amount does not fit in 256 bits")]
    Overflow,
}
