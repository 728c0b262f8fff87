//! Venue-agnostic swap orders.
//!
//! A [`SwapOrder`] describes what the taker offers and what the maker owes,
//! without committing to any particular settlement venue's wire format.

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

/// A venue-agnostic multi-token swap order.
///
/// Sell-side entries are the assets the taker offers, buy-side entries the
/// assets the maker owes. Tokens and amounts correspond positionally, so the
/// two vectors of each side must have equal length.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwapOrder {
	/// Tokens the taker sells.
	pub sell_tokens: Vec<Address>,
	/// Amount sold of each sell token.
	pub sell_amounts: Vec<U256>,
	/// Tokens the maker supplies.
	pub buy_tokens: Vec<Address>,
	/// Amount owed of each buy token.
	pub buy_amounts: Vec<U256>,
}

impl SwapOrder {
	/// Checks the positional-correspondence invariants.
	pub fn check_lengths(&self) -> Result<(), String> {
		if self.sell_tokens.len() != self.sell_amounts.len() {
			return Err(format!(
				"sell side mismatch: {} tokens, {} amounts",
				self.sell_tokens.len(),
				self.sell_amounts.len()
			));
		}
		if self.buy_tokens.len() != self.buy_amounts.len() {
			return Err(format!(
				"buy side mismatch: {} tokens, {} amounts",
				self.buy_tokens.len(),
				self.buy_amounts.len()
			));
		}
		Ok(())
	}
}
