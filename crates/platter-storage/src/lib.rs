//! Storage module for the platter service.
//!
//! This module provides abstractions for storing dish and order records,
//! supporting different backend implementations. Entities live in named
//! collections that preserve insertion order, and lookups resolve
//! identifiers leniently so that numerically equal forms of an id address
//! the same record.

use async_trait::async_trait;
use platter_types::Collection;
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

/// Re-export implementations
pub mod implementations {
	pub mod memory;
}

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
	/// Error that occurs when a requested record is not found.
	#[error("Not found")]
	NotFound,
	/// Error that occurs during serialization/deserialization.
	#[error("Serialization error: {0}")]
	Serialization(String),
	/// Error that occurs in the storage backend.
	#[error("Backend error: {0}")]
	Backend(String),
}

/// Trait defining the low-level interface for store backends.
///
/// Backends keep raw record bytes grouped into named collections. Each
/// record is addressed by its canonical id; collections preserve the order
/// in which records were appended so listings remain stable.
#[async_trait]
pub trait StoreBackend: Send + Sync {
	/// Returns the raw bytes of every record in the collection, in
	/// insertion order.
	async fn list_bytes(&self, collection: &str) -> Result<Vec<Vec<u8>>, StoreError>;

	/// Appends a new record to the end of the collection.
	async fn append_bytes(
		&self,
		collection: &str,
		id: &str,
		value: Vec<u8>,
	) -> Result<(), StoreError>;

	/// Finds the first record whose id matches the probe.
	///
	/// Matching is lenient: ids that are textually equal or numerically
	/// equal (e.g. `"042"` and `"42"`) resolve to the same record. Returns
	/// the canonical stored id alongside the record bytes.
	async fn find_bytes(
		&self,
		collection: &str,
		probe: &str,
	) -> Result<(String, Vec<u8>), StoreError>;

	/// Replaces the record with the exact canonical id in place,
	/// preserving its position in the collection.
	async fn replace_bytes(
		&self,
		collection: &str,
		id: &str,
		value: Vec<u8>,
	) -> Result<(), StoreError>;

	/// Removes the record with the exact canonical id.
	async fn remove(&self, collection: &str, id: &str) -> Result<(), StoreError>;
}

/// High-level store service that provides typed operations.
///
/// The StoreService wraps a low-level backend and provides convenient
/// methods for storing and retrieving typed records with automatic
/// serialization/deserialization. Callers address collections through the
/// [`Collection`] enum rather than raw strings.
pub struct StoreService {
	/// The underlying store backend implementation.
	backend: Box<dyn StoreBackend>,
}

impl StoreService {
	/// Creates a new StoreService with the specified backend.
	pub fn new(backend: Box<dyn StoreBackend>) -> Self {
		Self { backend }
	}

	/// Retrieves every record in the collection, in insertion order.
	pub async fn list<T: DeserializeOwned>(
		&self,
		collection: Collection,
	) -> Result<Vec<T>, StoreError> {
		let raw = self.backend.list_bytes(collection.as_str()).await?;
		raw.iter()
			.map(|bytes| {
				serde_json::from_slice(bytes)
					.map_err(|e| StoreError::Serialization(e.to_string()))
			})
			.collect()
	}

	/// Appends a new record under its canonical id.
	pub async fn append<T: Serialize>(
		&self,
		collection: Collection,
		id: &str,
		data: &T,
	) -> Result<(), StoreError> {
		let bytes =
			serde_json::to_vec(data).map_err(|e| StoreError::Serialization(e.to_string()))?;
		self.backend
			.append_bytes(collection.as_str(), id, bytes)
			.await
	}

	/// Finds a record by id, resolving lenient id forms.
	///
	/// The returned entity carries its own canonical id, which callers use
	/// for subsequent replace or remove operations.
	pub async fn find<T: DeserializeOwned>(
		&self,
		collection: Collection,
		probe: &str,
	) -> Result<T, StoreError> {
		let (_, bytes) = self.backend.find_bytes(collection.as_str(), probe).await?;
		serde_json::from_slice(&bytes).map_err(|e| StoreError::Serialization(e.to_string()))
	}

	/// Replaces an existing record in place by its exact canonical id.
	pub async fn replace<T: Serialize>(
		&self,
		collection: Collection,
		id: &str,
		data: &T,
	) -> Result<(), StoreError> {
		let bytes =
			serde_json::to_vec(data).map_err(|e| StoreError::Serialization(e.to_string()))?;
		self.backend
			.replace_bytes(collection.as_str(), id, bytes)
			.await
	}

	/// Removes a record by its exact canonical id.
	pub async fn remove(&self, collection: Collection, id: &str) -> Result<(), StoreError> {
		self.backend.remove(collection.as_str(), id).await
	}
}
