//! Settlement call descriptions produced by venue adapters.
//!
//! Adapters only describe calls; nothing in this crate touches chain state.
//! Execution belongs to whatever submission layer consumes the plan.

use alloy_primitives::{Address, Bytes, U256};
use serde::{Deserialize, Serialize};

/// A single call the settlement flow must execute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementCall {
	/// Contract the call targets.
	pub target: Address,
	/// ABI-encoded calldata.
	pub data: Bytes,
	/// Native value forwarded with the call.
	pub value: U256,
	/// Whether the adapter expects the call to succeed. Recorded for
	/// downstream verification and telemetry, not an on-chain guarantee.
	pub expect_success: bool,
}

/// The complete output of a settlement build.
///
/// Single-use artifact: built fresh per settlement attempt and consumed
/// immediately by the submission layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettlementPlan {
	/// Allowance grants the maker must have in place before settlement.
	/// Returned as inert data; the build never executes them.
	pub maker_approvals: Vec<SettlementCall>,
	/// The solver sequence: all taker-token approvals followed by exactly
	/// one settlement call. Execution order is a correctness requirement,
	/// or settlement reverts on insufficient allowance.
	pub calls: Vec<SettlementCall>,
}

impl SettlementPlan {
	/// The settlement call itself, always the last element of `calls`.
	pub fn settlement_call(&self) -> Option<&SettlementCall> {
		self.calls.last()
	}
}
