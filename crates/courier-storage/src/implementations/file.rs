//! File-based storage backend for the courier marketplace.
//!
//! Stores one JSON-serialized value per key under a configured base
//! directory, with `namespace:id` keys mapped to `namespace/id` paths.
//! Writes go to a temporary file first and are renamed into place, so a
//! reader never observes a half-written value.

use crate::{StorageError, StorageFactory, StorageInterface};
use async_trait::async_trait;
use courier_types::ImplementationRegistry;
use std::path::PathBuf;
use tokio::fs;

/// File-based storage implementation.
pub struct FileStorage {
	/// Base directory holding one subdirectory per namespace.
	base_path: PathBuf,
}

impl FileStorage {
	/// Creates a new FileStorage rooted at the given directory.
	pub fn new(base_path: impl Into<PathBuf>) -> Self {
		Self {
			base_path: base_path.into(),
		}
	}

	/// Maps a `namespace:id` key to a path under the base directory.
	///
	/// Both key segments must stay within the base directory; path
	/// separators and traversal segments are rejected.
	fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
		let (namespace, id) = key
			.split_once(':')
			.ok_or_else(|| StorageError::Backend(format!("Malformed storage key: {}", key)))?;
		for segment in [namespace, id] {
			if segment.is_empty()
				|| segment.contains(['/', '\\'])
				|| segment == "."
				|| segment == ".."
			{
				return Err(StorageError::Backend(format!(
					"Invalid storage key segment: {}",
					segment
				)));
			}
		}
		Ok(self.base_path.join(namespace).join(format!("{}.json", id)))
	}
}

#[async_trait]
impl StorageInterface for FileStorage {
	async fn get_bytes(&self, key: &str) -> Result<Vec<u8>, StorageError> {
		let path = self.path_for(key)?;
		match fs::read(&path).await {
			Ok(bytes) => Ok(bytes),
			Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(StorageError::NotFound),
			Err(e) => Err(StorageError::Backend(e.to_string())),
		}
	}

	async fn set_bytes(&self, key: &str, value: Vec<u8>) -> Result<(), StorageError> {
		let path = self.path_for(key)?;
		if let Some(parent) = path.parent() {
			fs::create_dir_all(parent)
				.await
				.map_err(|e| StorageError::Backend(e.to_string()))?;
		}

		// Write-then-rename keeps the visible file whole at all times.
		let tmp_path = path.with_extension("json.tmp");
		fs::write(&tmp_path, &value)
			.await
			.map_err(|e| StorageError::Backend(e.to_string()))?;
		fs::rename(&tmp_path, &path)
			.await
			.map_err(|e| StorageError::Backend(e.to_string()))?;

		tracing::debug!(key, bytes = value.len(), "wrote storage entry");
		Ok(())
	}

	async fn delete(&self, key: &str) -> Result<(), StorageError> {
		let path = self.path_for(key)?;
		match fs::remove_file(&path).await {
			Ok(()) => Ok(()),
			Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
			Err(e) => Err(StorageError::Backend(e.to_string())),
		}
	}

	async fn exists(&self, key: &str) -> Result<bool, StorageError> {
		let path = self.path_for(key)?;
		Ok(fs::try_exists(&path)
			.await
			.map_err(|e| StorageError::Backend(e.to_string()))?)
	}
}

/// Factory function to create a file storage backend from configuration.
///
/// Configuration parameters:
/// - `storage_path`: directory to store files under (required)
pub fn create_storage(config: &toml::Value) -> Result<Box<dyn StorageInterface>, StorageError> {
	let storage_path = config
		.get("storage_path")
		.and_then(|v| v.as_str())
		.ok_or_else(|| {
			StorageError::Configuration("file storage requires 'storage_path'".into())
		})?;
	Ok(Box::new(FileStorage::new(storage_path)))
}

/// Registry entry for the file storage backend.
pub struct Registry;

impl ImplementationRegistry for Registry {
	const NAME: &'static str = "file";
	type Factory = StorageFactory;

	fn factory() -> Self::Factory {
		create_storage
	}
}

impl crate::StorageRegistry for Registry {}

#[cfg(test)]
mod tests {
	use super::*;

	#[tokio::test]
	async fn test_roundtrip_and_delete() {
		let dir = tempfile::tempdir().unwrap();
		let storage = FileStorage::new(dir.path());

		let key = "orders:o-1";
		storage.set_bytes(key, b"{\"a\":1}".to_vec()).await.unwrap();
		assert!(storage.exists(key).await.unwrap());
		assert_eq!(storage.get_bytes(key).await.unwrap(), b"{\"a\":1}".to_vec());

		storage.delete(key).await.unwrap();
		assert!(!storage.exists(key).await.unwrap());
		assert!(matches!(
			storage.get_bytes(key).await,
			Err(StorageError::NotFound)
		));
	}

	#[tokio::test]
	async fn test_overwrite_replaces_whole_value() {
		let dir = tempfile::tempdir().unwrap();
		let storage = FileStorage::new(dir.path());

		let key = "orders:o-1";
		storage.set_bytes(key, b"first-longer-value".to_vec()).await.unwrap();
		storage.set_bytes(key, b"second".to_vec()).await.unwrap();
		assert_eq!(storage.get_bytes(key).await.unwrap(), b"second".to_vec());
	}

	#[tokio::test]
	async fn test_rejects_traversal_keys() {
		let dir = tempfile::tempdir().unwrap();
		let storage = FileStorage::new(dir.path());

		for key in ["orders:../escape", "orders:a/b", "no-namespace"] {
			assert!(matches!(
				storage.get_bytes(key).await,
				Err(StorageError::Backend(_))
			));
		}
	}

	#[tokio::test]
	async fn test_factory_requires_storage_path() {
		let config: toml::Value = toml::from_str("").unwrap();
		assert!(matches!(
			create_storage(&config),
			Err(StorageError::Configuration(_))
		));

		let config: toml::Value = toml::from_str("storage_path = \"/tmp/orders\"").unwrap();
		assert!(create_storage(&config).is_ok());
	}
}
