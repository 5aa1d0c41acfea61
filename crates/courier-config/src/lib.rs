//! Configuration module for the courier marketplace.
//!
//! This module provides structures and utilities for managing service
//! configuration. It supports loading configuration from TOML files and
//! provides validation to ensure all required configuration values are
//! properly set.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error that occurs during file I/O operations.
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
	/// Error that occurs when parsing TOML configuration.
	#[error("Configuration error: {0}")]
	Parse(String),
	/// Error that occurs when configuration validation fails.
	#[error("Validation error: {0}")]
	Validation(String),
}

impl From<toml::de::Error> for ConfigError {
	fn from(err: toml::de::Error) -> Self {
		// Extract just the message without the huge input dump
		let message = err.message().to_string();
		ConfigError::Parse(message)
	}
}

/// Main configuration structure for the courier service.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
	/// Configuration specific to this service instance.
	pub service: ServiceConfig,
	/// Configuration for the storage backend.
	pub storage: StorageConfig,
}

/// Configuration specific to this service instance.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServiceConfig {
	/// Unique identifier for this service instance.
	pub id: String,
}

/// Configuration for the storage backend.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
	/// Which implementation to use as primary.
	pub primary: String,
	/// Map of storage implementation names to their configurations.
	pub implementations: HashMap<String, toml::Value>,
}

impl Config {
	/// Parses and validates configuration from a TOML string.
	pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
		let config: Config = toml::from_str(raw)?;
		config.validate()?;
		Ok(config)
	}

	/// Loads and validates configuration from a TOML file.
	pub async fn from_file_async(path: &str) -> Result<Self, ConfigError> {
		let raw = tokio::fs::read_to_string(path).await?;
		Self::from_toml_str(&raw)
	}

	/// Returns the configuration value for the primary storage backend.
	pub fn primary_storage(&self) -> &toml::Value {
		// validate() guarantees the key exists.
		&self.storage.implementations[&self.storage.primary]
	}

	fn validate(&self) -> Result<(), ConfigError> {
		if self.service.id.trim().is_empty() {
			return Err(ConfigError::Validation(
				"service.id must not be empty".into(),
			));
		}
		if !self
			.storage
			.implementations
			.contains_key(&self.storage.primary)
		{
			return Err(ConfigError::Validation(format!(
				"storage.primary '{}' has no matching entry under storage.implementations",
				self.storage.primary
			)));
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Write;

	const GOOD: &str = r#"
		[service]
		id = "courier-dev"

		[storage]
		primary = "file"

		[storage.implementations.memory]

		[storage.implementations.file]
		storage_path = "./data/orders"
	"#;

	#[test]
	fn parses_a_valid_config() {
		let config = Config::from_toml_str(GOOD).unwrap();
		assert_eq!(config.service.id, "courier-dev");
		assert_eq!(config.storage.primary, "file");
		assert_eq!(
			config
				.primary_storage()
				.get("storage_path")
				.and_then(|v| v.as_str()),
			Some("./data/orders")
		);
	}

	#[test]
	fn rejects_unknown_primary_backend() {
		let raw = r#"
			[service]
			id = "courier-dev"

			[storage]
			primary = "redis"

			[storage.implementations.memory]
		"#;
		assert!(matches!(
			Config::from_toml_str(raw),
			Err(ConfigError::Validation(_))
		));
	}

	#[test]
	fn rejects_empty_service_id() {
		let raw = r#"
			[service]
			id = "  "

			[storage]
			primary = "memory"

			[storage.implementations.memory]
		"#;
		assert!(matches!(
			Config::from_toml_str(raw),
			Err(ConfigError::Validation(_))
		));
	}

	#[test]
	fn surfaces_parse_errors_without_the_input_dump() {
		let err = Config::from_toml_str("not toml at all [").unwrap_err();
		assert!(matches!(err, ConfigError::Parse(_)));
	}

	#[tokio::test]
	async fn loads_from_a_file() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		file.write_all(GOOD.as_bytes()).unwrap();

		let config = Config::from_file_async(file.path().to_str().unwrap())
			.await
			.unwrap();
		assert_eq!(config.service.id, "courier-dev");
	}
}
