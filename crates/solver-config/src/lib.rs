//! Configuration loading for the solver.
//!
//! Loads TOML configuration with `${VAR}` environment substitution so key
//! material stays out of checked-in files, then validates the typed result
//! before any component is wired up.

use regex::Regex;
use solver_types::Address;
use std::env;
use std::path::Path;
use thiserror::Error;

pub mod types;

pub use types::*;

#[derive(Debug, Error)]
pub enum ConfigError {
	#[error("File not found: {0}")]
	FileNotFound(String),

	#[error("Parse error: {0}")]
	ParseError(String),

	#[error("Validation error: {0}")]
	ValidationError(String),

	#[error("Environment variable not found: {0}")]
	EnvVarNotFound(String),

	#[error("IO error: {0}")]
	IoError(#[from] std::io::Error),
}

/// Configuration loader with environment variable substitution
#[derive(Default)]
pub struct ConfigLoader {
	file_path: Option<String>,
	env_prefix: String,
}

impl ConfigLoader {
	pub fn new() -> Self {
		Self {
			file_path: None,
			env_prefix: "SOLVER_".to_string(),
		}
	}

	pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
		self.file_path = Some(path.as_ref().to_string_lossy().to_string());
		self
	}

	pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
		self.env_prefix = prefix.into();
		self
	}

	pub async fn load(&self) -> Result<SolverConfig, ConfigError> {
		let mut config = if let Some(file_path) = &self.file_path {
			self.load_from_file(file_path).await?
		} else {
			return Err(ConfigError::FileNotFound(
				"No configuration file specified".to_string(),
			));
		};

		self.apply_env_overrides(&mut config);
		self.validate_config(&config)?;

		Ok(config)
	}

	async fn load_from_file(&self, file_path: &str) -> Result<SolverConfig, ConfigError> {
		let content = tokio::fs::read_to_string(file_path).await?;

		let substituted_content = self.substitute_env_vars(&content)?;

		let config: SolverConfig = toml::from_str(&substituted_content)
			.map_err(|e| ConfigError::ParseError(e.to_string()))?;

		Ok(config)
	}

	fn substitute_env_vars(&self, content: &str) -> Result<String, ConfigError> {
		let mut result = content.to_string();

		// Find and replace ${VAR_NAME} patterns
		let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

		for cap in re.captures_iter(content) {
			let full_match = &cap[0];
			let var_name = &cap[1];

			let env_value = env::var(var_name)
				.map_err(|_| ConfigError::EnvVarNotFound(var_name.to_string()))?;

			result = result.replace(full_match, &env_value);
		}

		Ok(result)
	}

	fn apply_env_overrides(&self, config: &mut SolverConfig) {
		if let Ok(log_level) = env::var(format!("{}LOG_LEVEL", self.env_prefix)) {
			config.solver.log_level = log_level;
		}
	}

	fn validate_config(&self, config: &SolverConfig) -> Result<(), ConfigError> {
		if config.solver.name.is_empty() {
			return Err(ConfigError::ValidationError(
				"solver.name must not be empty".to_string(),
			));
		}

		if config.account.private_key.is_empty() {
			return Err(ConfigError::ValidationError(
				"account.private_key must not be empty".to_string(),
			));
		}

		require_address(&config.venue.settlement_address, "venue.settlement_address")?;
		if let Some(sentinel) = &config.tokens.native_sentinel {
			require_address(sentinel, "tokens.native_sentinel")?;
		}
		if let Some(wrapped) = &config.tokens.wrapped_native {
			require_address(wrapped, "tokens.wrapped_native")?;
		}

		if config.venue.order_ttl_seconds == 0 {
			return Err(ConfigError::ValidationError(
				"venue.order_ttl_seconds must be positive".to_string(),
			));
		}

		Ok(())
	}
}

fn require_address(value: &str, field: &str) -> Result<(), ConfigError> {
	value.parse::<Address>().map_err(|_| {
		ConfigError::ValidationError(format!("{} must be a valid Ethereum address", field))
	})?;
	Ok(())
}
