//! Order adaptation for OTC settlement venues.
//!
//! This crate converts venue-agnostic swap orders into signed, correctly
//! sequenced settlement call batches. Venue-specific order shaping, signing
//! and call encoding live behind the VenueAdapter trait; the service routes
//! builds to the configured venue.

use async_trait::async_trait;
use solver_account::{AccountError, AccountInterface};
use solver_types::{Address, SettlementPlan, SwapOrder};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

pub mod nonce;

/// Re-export implementations
pub mod implementations {
	pub mod venues {
		pub mod bebop;
	}
}

/// Errors that can occur while building a settlement.
#[derive(Debug, Error)]
pub enum OrderError {
	/// The input order breaks a structural invariant; the caller must fix
	/// it, retrying cannot help.
	#[error("Order invariant violated: {0}")]
	InvariantViolation(String),
	/// The signing capability rejected or failed. The build aborts whole;
	/// no partial plan is returned.
	#[error("Signing failed: {0}")]
	SigningFailed(#[from] AccountError),
	/// A native-asset position has no configured wrapped representation.
	#[error("Unsupported token: {0}")]
	UnsupportedToken(Address),
}

/// Execution context for a settlement build.
pub struct SettlementContext {
	/// Party whose sell-side tokens the venue will pull.
	pub taker: Address,
	/// Maker account that signs the structured order.
	pub maker: Arc<dyn AccountInterface>,
	/// Where settlement proceeds go; defaults to the taker when absent.
	pub receiver: Option<Address>,
}

/// Trait defining the interface for venue adapter implementations.
///
/// This trait must be implemented for each settlement venue the solver
/// supports. It handles venue-specific order shaping, maker signing and
/// call assembly.
#[async_trait]
pub trait VenueAdapter: Send + Sync {
	/// Builds the signed settlement plan for the given order.
	///
	/// Either a complete, correctly ordered plan is returned or the build
	/// fails whole; there is no partial result. The adapter performs no
	/// on-chain state mutation, it only describes calls.
	async fn build_settlement(
		&self,
		order: &SwapOrder,
		ctx: &SettlementContext,
	) -> Result<SettlementPlan, OrderError>;
}

/// Service that routes settlement builds to named venue adapters.
pub struct OrderService {
	/// Map of venue names to their adapters.
	venues: HashMap<String, Box<dyn VenueAdapter>>,
}

impl OrderService {
	/// Creates a new OrderService with the specified venue adapters.
	pub fn new(venues: HashMap<String, Box<dyn VenueAdapter>>) -> Self {
		Self { venues }
	}

	/// Builds a settlement plan through the named venue.
	pub async fn build_settlement(
		&self,
		venue: &str,
		order: &SwapOrder,
		ctx: &SettlementContext,
	) -> Result<SettlementPlan, OrderError> {
		let adapter = self
			.venues
			.get(venue)
			.ok_or_else(|| OrderError::InvariantViolation(format!("Unknown venue: {}", venue)))?;

		adapter.build_settlement(order, ctx).await
	}
}
