//! Typed configuration for the solver.
//!
//! The root [`SolverConfig`] mirrors the TOML layout: `[solver]` service
//! settings, `[account]` maker key material, `[venue]` settlement venue
//! parameters and `[tokens]` native-asset substitution.

use serde::{Deserialize, Serialize};

/// Main solver configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolverConfig {
	/// Core solver settings like name and logging
	pub solver: SolverSettings,
	/// Maker account configuration
	pub account: AccountConfig,
	/// Settlement venue configuration
	pub venue: VenueConfig,
	/// Token substitution configuration
	pub tokens: TokenConfig,
}

/// Core solver service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolverSettings {
	/// Unique name for this solver instance
	pub name: String,
	/// Logging level for the service
	#[serde(default = "default_log_level")]
	pub log_level: String,
}

/// Maker account configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountConfig {
	/// Hex-encoded maker private key. Use `${VAR}` substitution rather
	/// than a literal key in checked-in files.
	pub private_key: String,
}

/// Settlement venue configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VenueConfig {
	/// On-chain address of the venue's settlement contract
	pub settlement_address: String,
	/// EIP-712 domain name of the venue
	#[serde(default = "default_domain_name")]
	pub domain_name: String,
	/// EIP-712 domain version of the venue
	#[serde(default = "default_domain_version")]
	pub domain_version: String,
	/// Chain the venue is deployed on
	pub chain_id: u64,
	/// Excess added to every maker amount as a price-drift margin
	#[serde(default = "default_solver_excess")]
	pub solver_excess: u64,
	/// Validity horizon for signed orders, in seconds
	#[serde(default = "default_order_ttl_seconds")]
	pub order_ttl_seconds: u64,
}

/// Token substitution configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenConfig {
	/// Sentinel address orders use for the chain-native asset; defaults to
	/// the canonical 0xeeee…eeee sentinel.
	#[serde(default)]
	pub native_sentinel: Option<String>,
	/// Wrapped-native token substituted for the sentinel. Orders carrying
	/// the sentinel fail when this is absent.
	#[serde(default)]
	pub wrapped_native: Option<String>,
}

fn default_log_level() -> String {
	"info".to_string()
}

fn default_domain_name() -> String {
	"BebopSettlement".to_string()
}

fn default_domain_version() -> String {
	"1".to_string()
}

fn default_solver_excess() -> u64 {
	1000
}

fn default_order_ttl_seconds() -> u64 {
	1000
}
