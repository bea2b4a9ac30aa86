//! Dish operations and their validation chains.
//!
//! Dishes have no lifecycle state: they are created, listed, read and
//! updated in place, never deleted. Identity is immutable once assigned.

use once_cell::sync::Lazy;
use platter_storage::{StoreError, StoreService};
use platter_types::{next_id, ApiError, Collection, Dish, DishPayload};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::chain::{match_route_id, parse_payload, payload_of, require_field, Chain, GuardContext};

const PRICE_RULE: &str = "Dish must have a price that is an integer greater than zero";

// Required fields are checked in declaration order before the price rule
// runs. Price presence is deliberately not a field guard: a missing price
// reports the price rule, not a missing-field message.
static CREATE_CHAIN: Lazy<Chain> = Lazy::new(|| {
	Chain::new()
		.guard(require_field("Dish", "name"))
		.guard(require_field("Dish", "description"))
		.guard(require_field("Dish", "image_url"))
		.guard(price_is_valid)
});

static UPDATE_CHAIN: Lazy<Chain> = Lazy::new(|| {
	Chain::new()
		.guard(match_route_id("Dish"))
		.guard(require_field("Dish", "name"))
		.guard(require_field("Dish", "description"))
		.guard(require_field("Dish", "image_url"))
		.guard(price_is_valid)
});

/// Guard requiring `price` to be a number strictly greater than zero.
///
/// Integrality is not enforced despite the message text; the check is
/// numeric type plus positivity only.
fn price_is_valid(ctx: &GuardContext<'_>) -> Result<(), ApiError> {
	let valid = matches!(
		ctx.payload.get("price"),
		Some(Value::Number(n)) if n.as_f64().is_some_and(|price| price > 0.0)
	);
	if valid {
		Ok(())
	} else {
		Err(ApiError::InvalidInput(PRICE_RULE.to_string()))
	}
}

/// Dish operations backed by the shared store.
pub struct DishService {
	store: Arc<StoreService>,
	/// Serializes the resolve-validate-mutate sequence for dishes.
	write_gate: Mutex<()>,
}

impl DishService {
	pub fn new(store: Arc<StoreService>) -> Self {
		Self {
			store,
			write_gate: Mutex::new(()),
		}
	}

	/// Returns every dish, in creation order.
	pub async fn list(&self) -> Result<Vec<Dish>, ApiError> {
		self.store
			.list(Collection::Dishes)
			.await
			.map_err(|e| ApiError::Internal(e.to_string()))
	}

	/// Validates the payload and appends a new dish under a fresh id.
	pub async fn create(&self, body: &Value) -> Result<Dish, ApiError> {
		let _gate = self.write_gate.lock().await;
		let payload = payload_of(body);
		CREATE_CHAIN.run(&GuardContext::for_create(payload))?;

		let parsed: DishPayload = parse_payload(payload)?;
		let dish = Dish::from_payload(next_id(), parsed);
		self.store
			.append(Collection::Dishes, &dish.id, &dish)
			.await
			.map_err(|e| ApiError::Internal(e.to_string()))?;

		tracing::info!(dish_id = %dish.id, "Created dish");
		Ok(dish)
	}

	/// Resolves a dish by route identifier, accepting lenient id forms.
	pub async fn read(&self, dish_id: &str) -> Result<Dish, ApiError> {
		self.store
			.find(Collection::Dishes, dish_id)
			.await
			.map_err(|e| match e {
				StoreError::NotFound => {
					ApiError::NotFound(format!("Dish ID not found: {}", dish_id))
				},
				other => ApiError::Internal(other.to_string()),
			})
	}

	/// Overwrites the mutable fields of an existing dish in place.
	pub async fn update(&self, dish_id: &str, body: &Value) -> Result<Dish, ApiError> {
		let _gate = self.write_gate.lock().await;
		let mut dish = self.read(dish_id).await?;
		let payload = payload_of(body);
		UPDATE_CHAIN.run(&GuardContext::for_existing(payload, dish_id))?;

		let parsed: DishPayload = parse_payload(payload)?;
		dish.apply(parsed);
		self.store
			.replace(Collection::Dishes, &dish.id, &dish)
			.await
			.map_err(|e| ApiError::Internal(e.to_string()))?;

		tracing::info!(dish_id = %dish.id, "Updated dish");
		Ok(dish)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use platter_storage::implementations::memory::MemoryStore;
	use serde_json::json;

	fn service() -> DishService {
		DishService::new(Arc::new(StoreService::new(Box::new(MemoryStore::new()))))
	}

	async fn seeded_service(dish: &Dish) -> DishService {
		let store = Arc::new(StoreService::new(Box::new(MemoryStore::new())));
		store
			.append(Collection::Dishes, &dish.id, dish)
			.await
			.unwrap();
		DishService::new(store)
	}

	fn taco_body() -> Value {
		json!({
			"data": {
				"name": "Taco",
				"description": "d",
				"price": 5,
				"image_url": "u"
			}
		})
	}

	#[tokio::test]
	async fn create_assigns_id_and_keeps_integer_price() {
		let service = service();
		let dish = service.create(&taco_body()).await.unwrap();

		assert!(!dish.id.is_empty());
		assert_eq!(dish.name, "Taco");
		assert_eq!(serde_json::to_value(&dish.price).unwrap(), json!(5));
		assert_eq!(service.list().await.unwrap().len(), 1);
	}

	#[tokio::test]
	async fn create_rejects_missing_fields_and_leaves_store_unchanged() {
		let service = service();
		for field in ["name", "description", "image_url"] {
			let mut body = taco_body();
			body["data"].as_object_mut().unwrap().remove(field);

			let err = service.create(&body).await.unwrap_err();
			assert_eq!(
				err,
				ApiError::InvalidInput(format!("Dish must include a {}", field))
			);
		}
		assert!(service.list().await.unwrap().is_empty());
	}

	#[tokio::test]
	async fn create_price_rule_covers_missing_and_invalid_prices() {
		let service = service();
		for price in [json!(0), json!(-1), json!("five")] {
			let mut body = taco_body();
			body["data"]["price"] = price;
			let err = service.create(&body).await.unwrap_err();
			assert_eq!(err, ApiError::InvalidInput(PRICE_RULE.into()));
		}

		// A missing price reports the price rule, not a missing-field
		// message.
		let mut body = taco_body();
		body["data"].as_object_mut().unwrap().remove("price");
		let err = service.create(&body).await.unwrap_err();
		assert_eq!(err, ApiError::InvalidInput(PRICE_RULE.into()));
	}

	#[tokio::test]
	async fn create_accepts_fractional_price() {
		let service = service();
		let mut body = taco_body();
		body["data"]["price"] = json!(4.5);
		assert!(service.create(&body).await.is_ok());
	}

	#[tokio::test]
	async fn read_unknown_dish_names_the_probe() {
		let service = service();
		let err = service.read("999").await.unwrap_err();
		assert_eq!(err, ApiError::NotFound("Dish ID not found: 999".into()));
	}

	#[tokio::test]
	async fn read_resolves_lenient_id_forms() {
		let dish = Dish::from_payload(
			"42".to_string(),
			serde_json::from_value(taco_body()["data"].clone()).unwrap(),
		);
		let service = seeded_service(&dish).await;

		let found = service.read("042").await.unwrap();
		assert_eq!(found.id, "42");
	}

	#[tokio::test]
	async fn update_overwrites_fields_and_keeps_identity() {
		let service = service();
		let dish = service.create(&taco_body()).await.unwrap();

		let body = json!({
			"data": {
				"name": "Burrito",
				"description": "bigger",
				"price": 7,
				"image_url": "b"
			}
		});
		let updated = service.update(&dish.id, &body).await.unwrap();
		assert_eq!(updated.id, dish.id);
		assert_eq!(updated.name, "Burrito");

		// A subsequent read returns the updated fields exactly as sent.
		let read_back = service.read(&dish.id).await.unwrap();
		assert_eq!(
			serde_json::to_value(&read_back).unwrap(),
			serde_json::to_value(&updated).unwrap()
		);
	}

	#[tokio::test]
	async fn update_body_id_must_match_route_exactly() {
		let dish = Dish::from_payload(
			"42".to_string(),
			serde_json::from_value(taco_body()["data"].clone()).unwrap(),
		);
		let service = seeded_service(&dish).await;

		let mut body = taco_body();
		body["data"]["id"] = json!("99");
		let err = service.update("42", &body).await.unwrap_err();
		assert_eq!(
			err,
			ApiError::InvalidInput("Dish id does not match route id. Dish: 99, Route:42".into())
		);

		// Same digits as a number still mismatch.
		body["data"]["id"] = json!(42);
		let err = service.update("42", &body).await.unwrap_err();
		assert_eq!(
			err,
			ApiError::InvalidInput("Dish id does not match route id. Dish: 42, Route:42".into())
		);

		// A matching string id passes.
		body["data"]["id"] = json!("42");
		assert!(service.update("42", &body).await.is_ok());
	}

	#[tokio::test]
	async fn failed_update_leaves_record_unchanged() {
		let service = service();
		let dish = service.create(&taco_body()).await.unwrap();

		let mut body = taco_body();
		body["data"]["name"] = json!("Nachos");
		body["data"]["price"] = json!(0);
		let err = service.update(&dish.id, &body).await.unwrap_err();
		assert_eq!(err, ApiError::InvalidInput(PRICE_RULE.into()));

		let read_back = service.read(&dish.id).await.unwrap();
		assert_eq!(read_back.name, "Taco");
	}
}
