//! Maker signing capability for the solver.
//!
//! Venue adapters never see key material. They hand a typed-data digest to
//! an [`AccountInterface`] implementation and get a signature back; the
//! capability may suspend while an external signer is consulted.

use async_trait::async_trait;
use solver_types::{Address, Signature, B256};
use thiserror::Error;

/// Re-export implementations
pub mod implementations {
	pub mod local;
}

/// Errors that can occur during account operations.
#[derive(Debug, Error)]
pub enum AccountError {
	/// Error that occurs when the signing capability rejects or fails.
	#[error("Signing failed: {0}")]
	SigningFailed(String),
	/// Error that occurs when key material cannot be parsed.
	#[error("Invalid key: {0}")]
	InvalidKey(String),
}

/// Interface to an account that can sign order digests.
#[async_trait]
pub trait AccountInterface: Send + Sync {
	/// The address signatures from this account recover to.
	async fn address(&self) -> Result<Address, AccountError>;

	/// Signs a 32-byte typed-data digest.
	async fn sign_digest(&self, digest: B256) -> Result<Signature, AccountError>;
}
