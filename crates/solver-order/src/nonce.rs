//! Maker nonce generation.

/// Source of maker nonces.
///
/// Injected into venue adapters so tests can pin the draw. Random sources
/// are a best-effort de-duplication against a maker's outstanding unexpired
/// orders, not a uniqueness guarantee.
pub trait NonceSource: Send + Sync {
	fn next_nonce(&self) -> u64;
}

/// Draws nonces uniformly from the full u64 space.
pub struct RandomNonce;

impl NonceSource for RandomNonce {
	fn next_nonce(&self) -> u64 {
		rand::random()
	}
}
