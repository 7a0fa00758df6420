//! Common Test Assertions
//!
//! Assertion helpers over the calls recorded by a
//! [`MockLedger`](crate::testing::MockLedger).

use alloy::primitives::U256;
use eyre::{eyre, Result};

use crate::testing::ledger::LedgerCall;

/// Assert that no approve call was made
pub fn assert_no_approval(calls: &[LedgerCall]) -> Result<()> {
    if let Some(call) = calls
        .iter()
        .find(|c| matches!(c, LedgerCall::Approve { .. }))
    {
        return Err(eyre!("Expected no approval, found {:?} in {:?}", call, calls));
    }
    Ok(())
}

/// Assert that exactly one approve call was made, for `amount`
pub fn assert_single_approval(calls: &[LedgerCall], amount: U256) -> Result<()> {
    let approvals: Vec<&LedgerCall> = calls
        .iter()
        .filter(|c| matches!(c, LedgerCall::Approve { .. }))
        .collect();

    match approvals.as_slice() {
        [LedgerCall::Approve { amount: approved }] if *approved == amount => Ok(()),
        _ => Err(eyre!(
            "Expected a single approval of {}, got {:?}",
            amount,
            approvals
        )),
    }
}

/// Assert that no bridge or bridgeAll call was made
pub fn assert_not_bridged(calls: &[LedgerCall]) -> Result<()> {
    if calls
        .iter()
        .any(|c| matches!(c, LedgerCall::Bridge { .. } | LedgerCall::BridgeAll))
    {
        return Err(eyre!("Expected no bridge call, got {:?}", calls));
    }
    Ok(())
}

/// Assert that every approve precedes every bridge call
pub fn assert_approval_before_bridge(calls: &[LedgerCall]) -> Result<()> {
    let last_approval = calls
        .iter()
        .rposition(|c| matches!(c, LedgerCall::Approve { .. }));
    let first_bridge = calls
        .iter()
        .position(|c| matches!(c, LedgerCall::Bridge { .. } | LedgerCall::BridgeAll));

    match (last_approval, first_bridge) {
        (Some(a), Some(b)) if a > b => Err(eyre!(
            "Approval at position {} came after bridge at position {}: {:?}",
            a,
            b,
            calls
        )),
        _ => Ok(()),
    }
}
