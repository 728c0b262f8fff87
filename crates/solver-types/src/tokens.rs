//! Token classification and native-asset substitution.
//!
//! Settlement venues move ERC-20 balances only, so the chain-native asset
//! participates through its wrapped representation. The [`TokenRegistry`]
//! resolves the sentinel, and [`TokenKind`] records the substitution so the
//! venue can wrap or unwrap at settlement time.

use alloy_primitives::{address, Address};
use serde::{Deserialize, Serialize};

/// Sentinel address conventionally used for the chain-native asset.
pub const NATIVE_TOKEN: Address = address!("EeeeeEeeeEeEeeEeEeEeeEEEeeeeEeeeeeeeEEeE");

/// How a token position participates in settlement.
///
/// One command byte per token position is serialized onto the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenKind {
	/// Plain ERC-20 transfer.
	Erc20,
	/// Position was the native asset; the venue wraps or unwraps around the
	/// transfer.
	Native,
}

impl TokenKind {
	/// The wire flag byte for this kind.
	pub fn command_byte(self) -> u8 {
		match self {
			TokenKind::Erc20 => 0x00,
			TokenKind::Native => 0x01,
		}
	}
}

/// Serializes per-position kinds into the venue's flat command bytes.
pub fn encode_commands(kinds: &[TokenKind]) -> Vec<u8> {
	kinds.iter().map(|kind| kind.command_byte()).collect()
}

/// Resolves native-asset sentinels to their wrapped representation.
pub struct TokenRegistry {
	/// Address standing in for the chain-native asset in incoming orders.
	native_sentinel: Address,
	/// Wrapped-native token to substitute, when configured for the chain.
	wrapped_native: Option<Address>,
}

impl TokenRegistry {
	pub fn new(native_sentinel: Address, wrapped_native: Option<Address>) -> Self {
		Self {
			native_sentinel,
			wrapped_native,
		}
	}

	/// Registry using the canonical sentinel and the given wrapped-native
	/// token.
	pub fn with_wrapped_native(wrapped_native: Address) -> Self {
		Self::new(NATIVE_TOKEN, Some(wrapped_native))
	}

	pub fn is_native(&self, token: Address) -> bool {
		token == self.native_sentinel
	}

	/// Returns the settleable token for `token`, substituting the wrapped
	/// asset for the native sentinel.
	///
	/// `None` when the sentinel appears but no wrapped representation is
	/// configured, which is a configuration error the caller surfaces.
	pub fn resolve(&self, token: Address) -> Option<(Address, TokenKind)> {
		if self.is_native(token) {
			self.wrapped_native
				.map(|wrapped| (wrapped, TokenKind::Native))
		} else {
			Some((token, TokenKind::Erc20))
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const WETH: Address = address!("C02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2");

	#[test]
	fn test_erc20_passes_through() {
		let registry = TokenRegistry::with_wrapped_native(WETH);
		let token = Address::repeat_byte(0xaa);
		assert_eq!(registry.resolve(token), Some((token, TokenKind::Erc20)));
	}

	#[test]
	fn test_native_substituted_with_wrapped() {
		let registry = TokenRegistry::with_wrapped_native(WETH);
		assert_eq!(
			registry.resolve(NATIVE_TOKEN),
			Some((WETH, TokenKind::Native))
		);
	}

	#[test]
	fn test_native_without_wrapped_is_unresolvable() {
		let registry = TokenRegistry::new(NATIVE_TOKEN, None);
		assert_eq!(registry.resolve(NATIVE_TOKEN), None);
	}

	#[test]
	fn test_command_bytes() {
		let kinds = [TokenKind::Native, TokenKind::Erc20, TokenKind::Native];
		assert_eq!(encode_commands(&kinds), vec![0x01, 0x00, 0x01]);
	}
}
