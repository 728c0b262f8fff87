//! Signature representation shared by signing and call assembly.

use alloy_primitives::PrimitiveSignature;
use serde::{Deserialize, Serialize};

/// Cryptographic signature in the standard Ethereum 65-byte r || s || v
/// layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature(pub Vec<u8>);

impl Signature {
	pub fn as_bytes(&self) -> &[u8] {
		&self.0
	}
}

impl From<PrimitiveSignature> for Signature {
	fn from(sig: PrimitiveSignature) -> Self {
		let mut bytes = Vec::with_capacity(65);
		bytes.extend_from_slice(&sig.r().to_be_bytes::<32>());
		bytes.extend_from_slice(&sig.s().to_be_bytes::<32>());
		// Non-EIP-155 recovery id: v = 27 + y_parity
		let v = if sig.v() { 28 } else { 27 };
		bytes.push(v);
		Signature(bytes)
	}
}
