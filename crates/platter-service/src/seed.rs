//! Startup seed data loading.
//!
//! The store starts empty on every boot; a seed file provides initial
//! dishes and orders for local development and demos. Seed records are
//! full entities with their ids already assigned.

use platter_storage::StoreService;
use platter_types::{Collection, Dish, Order};
use serde::Deserialize;
use std::path::Path;

/// Shape of a seed file.
#[derive(Debug, Deserialize)]
pub struct SeedFile {
	#[serde(default)]
	pub dishes: Vec<Dish>,
	#[serde(default)]
	pub orders: Vec<Order>,
}

/// Counts of records loaded from a seed file.
#[derive(Debug, Clone, Copy)]
pub struct Seeded {
	pub dishes: usize,
	pub orders: usize,
}

/// Loads seed records from a JSON file into the store.
pub async fn load(path: &Path, store: &StoreService) -> Result<Seeded, Box<dyn std::error::Error>> {
	let content = tokio::fs::read_to_string(path).await?;
	let seed: SeedFile = serde_json::from_str(&content)?;

	for dish in &seed.dishes {
		store.append(Collection::Dishes, &dish.id, dish).await?;
	}
	for order in &seed.orders {
		store.append(Collection::Orders, &order.id, order).await?;
	}

	Ok(Seeded {
		dishes: seed.dishes.len(),
		orders: seed.orders.len(),
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use platter_storage::implementations::memory::MemoryStore;
	use std::io::Write;
	use tempfile::NamedTempFile;

	#[tokio::test]
	async fn loads_dishes_and_orders() {
		let mut file = NamedTempFile::new().unwrap();
		write!(
			file,
			r#"{{
				"dishes": [
					{{ "id": "d1", "name": "Taco", "description": "d", "price": 5, "image_url": "u" }}
				],
				"orders": [
					{{
						"id": "o1",
						"deliverTo": "A",
						"mobileNumber": "555",
						"status": "pending",
						"dishes": [{{ "dishId": "d1", "quantity": 2 }}]
					}}
				]
			}}"#
		)
		.unwrap();

		let store = StoreService::new(Box::new(MemoryStore::new()));
		let seeded = load(file.path(), &store).await.unwrap();
		assert_eq!(seeded.dishes, 1);
		assert_eq!(seeded.orders, 1);

		let dishes: Vec<Dish> = store.list(Collection::Dishes).await.unwrap();
		assert_eq!(dishes[0].id, "d1");
		let orders: Vec<Order> = store.list(Collection::Orders).await.unwrap();
		assert_eq!(orders[0].id, "o1");
	}

	#[tokio::test]
	async fn missing_sections_default_to_empty() {
		let mut file = NamedTempFile::new().unwrap();
		write!(file, "{{}}").unwrap();

		let store = StoreService::new(Box::new(MemoryStore::new()));
		let seeded = load(file.path(), &store).await.unwrap();
		assert_eq!(seeded.dishes, 0);
		assert_eq!(seeded.orders, 0);
	}

	#[tokio::test]
	async fn missing_file_is_an_error() {
		let store = StoreService::new(Box::new(MemoryStore::new()));
		assert!(load(Path::new("does-not-exist.json"), &store).await.is_err());
	}
}
