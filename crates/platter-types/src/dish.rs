//! Dish domain types.

use serde::{Deserialize, Serialize};
use serde_json::Number;

use crate::id::deserialize_id;

/// A menu dish.
///
/// Identity is immutable once assigned; name, description, price, and image
/// URL may be rewritten by updates. Dishes are never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dish {
	/// Unique identifier for this dish.
	#[serde(deserialize_with = "deserialize_id")]
	pub id: String,
	/// Display name.
	pub name: String,
	/// Menu description.
	pub description: String,
	/// Price as a raw JSON number so integer payloads round-trip unchanged.
	/// Positivity is validated; integrality is not.
	pub price: Number,
	/// Image shown alongside the dish.
	pub image_url: String,
}

/// The writable fields of a dish, as accepted by create and update bodies.
#[derive(Debug, Clone, Deserialize)]
pub struct DishPayload {
	pub name: String,
	pub description: String,
	pub price: Number,
	pub image_url: String,
}

impl Dish {
	/// Builds a dish from validated payload fields under the given id.
	pub fn from_payload(id: String, payload: DishPayload) -> Self {
		Self {
			id,
			name: payload.name,
			description: payload.description,
			price: payload.price,
			image_url: payload.image_url,
		}
	}

	/// Overwrites the mutable fields in place; the identifier never changes.
	pub fn apply(&mut self, payload: DishPayload) {
		self.name = payload.name;
		self.description = payload.description;
		self.price = payload.price;
		self.image_url = payload.image_url;
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn integer_price_round_trips_as_integer() {
		let dish: Dish = serde_json::from_value(json!({
			"id": "abc",
			"name": "Taco",
			"description": "d",
			"price": 5,
			"image_url": "u",
		}))
		.unwrap();
		assert_eq!(serde_json::to_value(&dish).unwrap()["price"], json!(5));
	}

	#[test]
	fn numeric_id_normalizes_to_string() {
		let dish: Dish = serde_json::from_value(json!({
			"id": 42,
			"name": "Taco",
			"description": "d",
			"price": 5,
			"image_url": "u",
		}))
		.unwrap();
		assert_eq!(dish.id, "42");
	}

	#[test]
	fn apply_keeps_identity() {
		let mut dish = Dish::from_payload(
			"abc".to_string(),
			DishPayload {
				name: "Taco".to_string(),
				description: "d".to_string(),
				price: Number::from(5),
				image_url: "u".to_string(),
			},
		);
		dish.apply(DishPayload {
			name: "Burrito".to_string(),
			description: "big".to_string(),
			price: Number::from(9),
			image_url: "v".to_string(),
		});
		assert_eq!(dish.id, "abc");
		assert_eq!(dish.name, "Burrito");
		assert_eq!(dish.price, Number::from(9));
	}
}
