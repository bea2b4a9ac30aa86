//! In-memory store backend implementation for the platter service.
//!
//! This module provides a memory-based implementation of the StoreBackend
//! trait. Collections are kept as ordered vectors so listings always come
//! back in insertion order, and records keep their position when replaced
//! in place.

use crate::{StoreBackend, StoreError};
use async_trait::async_trait;
use platter_types::loose_id_eq;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A single stored record: canonical id plus serialized bytes.
#[derive(Debug, Clone)]
struct Entry {
	id: String,
	bytes: Vec<u8>,
}

/// In-memory store implementation.
///
/// This implementation keeps records in ordered vectors keyed by
/// collection name, providing fast access but no persistence across
/// restarts.
pub struct MemoryStore {
	/// Collections protected by a read-write lock.
	collections: Arc<RwLock<HashMap<String, Vec<Entry>>>>,
}

impl MemoryStore {
	/// Creates a new MemoryStore instance.
	pub fn new() -> Self {
		Self {
			collections: Arc::new(RwLock::new(HashMap::new())),
		}
	}
}

impl Default for MemoryStore {
	fn default() -> Self {
		Self::new()
	}
}

#[async_trait]
impl StoreBackend for MemoryStore {
	async fn list_bytes(&self, collection: &str) -> Result<Vec<Vec<u8>>, StoreError> {
		let collections = self.collections.read().await;
		Ok(collections
			.get(collection)
			.map(|entries| entries.iter().map(|e| e.bytes.clone()).collect())
			.unwrap_or_default())
	}

	async fn append_bytes(
		&self,
		collection: &str,
		id: &str,
		value: Vec<u8>,
	) -> Result<(), StoreError> {
		let mut collections = self.collections.write().await;
		collections
			.entry(collection.to_string())
			.or_default()
			.push(Entry {
				id: id.to_string(),
				bytes: value,
			});
		Ok(())
	}

	async fn find_bytes(
		&self,
		collection: &str,
		probe: &str,
	) -> Result<(String, Vec<u8>), StoreError> {
		let collections = self.collections.read().await;
		collections
			.get(collection)
			.and_then(|entries| entries.iter().find(|e| loose_id_eq(&e.id, probe)))
			.map(|e| (e.id.clone(), e.bytes.clone()))
			.ok_or(StoreError::NotFound)
	}

	async fn replace_bytes(
		&self,
		collection: &str,
		id: &str,
		value: Vec<u8>,
	) -> Result<(), StoreError> {
		let mut collections = self.collections.write().await;
		let entry = collections
			.get_mut(collection)
			.and_then(|entries| entries.iter_mut().find(|e| e.id == id))
			.ok_or(StoreError::NotFound)?;
		entry.bytes = value;
		Ok(())
	}

	async fn remove(&self, collection: &str, id: &str) -> Result<(), StoreError> {
		let mut collections = self.collections.write().await;
		let entries = collections.get_mut(collection).ok_or(StoreError::NotFound)?;
		let position = entries
			.iter()
			.position(|e| e.id == id)
			.ok_or(StoreError::NotFound)?;
		entries.remove(position);
		Ok(())
	}
}
