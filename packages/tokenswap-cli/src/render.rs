//! Terminal rendering of bridge events

use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;

use tokenswap_rs::{
    format_display_amount, short_address, BridgeEvent, ConnectionState, EventBus, TOKEN_DECIMALS,
};

/// Print events until every publisher is dropped
pub fn spawn(events: &EventBus) -> JoinHandle<()> {
    let mut rx = events.subscribe();
    tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(event) => {
                    if let Some(line) = describe(&event) {
                        match event {
                            BridgeEvent::Notification { .. } => eprintln!("{}", line),
                            _ => println!("{}", line),
                        }
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped = skipped, "Renderer fell behind, events dropped");
                }
                Err(RecvError::Closed) => break,
            }
        }
    })
}

/// One terminal line per event worth showing
pub fn describe(event: &BridgeEvent) -> Option<String> {
    match event {
        BridgeEvent::ConnectionChanged(ConnectionState::NetworkMismatch { expected, actual }) => {
            Some(format!(
                "Incorrect network: wallet is on chain {}, expected {}",
                actual, expected
            ))
        }
        BridgeEvent::ConnectionChanged(ConnectionState::Switching) => {
            Some("Switching network...".to_string())
        }
        BridgeEvent::ConnectionChanged(_) => None,
        BridgeEvent::SignerResolved { address } => Some(format!("Signer: {}", short_address(address))),
        BridgeEvent::BalanceUpdated { balance } => Some(format!(
            "V1 balance: {}",
            format_display_amount(*balance, TOKEN_DECIMALS)
        )),
        BridgeEvent::AmountChanged { .. } => None,
        BridgeEvent::BridgeStarted { amount: Some(amount) } => Some(format!(
            "Bridging {} V1...",
            format_display_amount(*amount, TOKEN_DECIMALS)
        )),
        BridgeEvent::BridgeStarted { amount: None } => Some("Bridging all V1...".to_string()),
        BridgeEvent::ApprovalSubmitted { amount } => Some(if *amount == alloy::primitives::U256::MAX {
            "Approving TokenSwap (unlimited)...".to_string()
        } else {
            format!(
                "Approving TokenSwap for {}...",
                format_display_amount(*amount, TOKEN_DECIMALS)
            )
        }),
        BridgeEvent::ApprovalConfirmed { tx_hash } => Some(format!("Approved in {}", tx_hash)),
        BridgeEvent::BridgeConfirmed { tx_hash } => Some(format!("Bridge mined in {}", tx_hash)),
        BridgeEvent::BridgeFinished { .. } => None,
        BridgeEvent::Notification { title, description } => {
            Some(format!("Error: {}: {}", title, description))
        }
    }
}
