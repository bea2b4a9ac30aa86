//! Order domain types and lifecycle status.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use std::fmt;
use std::str::FromStr;

use crate::id::{deserialize_id, deserialize_opt_id};

/// Status of an order in its delivery lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderStatus {
	/// Order taken, not yet in preparation. The only state deletion is
	/// legal from.
	Pending,
	/// Kitchen is working on the order.
	Preparing,
	/// Order has left for delivery.
	OutForDelivery,
	/// Order reached the customer. Never accepted as an update target.
	Delivered,
}

impl OrderStatus {
	/// Returns the wire representation of the status.
	pub fn as_str(&self) -> &'static str {
		match self {
			OrderStatus::Pending => "pending",
			OrderStatus::Preparing => "preparing",
			OrderStatus::OutForDelivery => "out-for-delivery",
			OrderStatus::Delivered => "delivered",
		}
	}
}

impl fmt::Display for OrderStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for OrderStatus {
	type Err = ();

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"pending" => Ok(Self::Pending),
			"preparing" => Ok(Self::Preparing),
			"out-for-delivery" => Ok(Self::OutForDelivery),
			"delivered" => Ok(Self::Delivered),
			_ => Err(()),
		}
	}
}

/// One dish-reference-plus-quantity entry within an order.
///
/// Clients typically embed the whole dish object here; members beyond the
/// two recognized fields are preserved verbatim for round-tripping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLineItem {
	/// Referenced dish, when the client names one. No guard validates it.
	#[serde(
		rename = "dishId",
		default,
		skip_serializing_if = "Option::is_none",
		deserialize_with = "deserialize_opt_id"
	)]
	pub dish_id: Option<String>,
	/// Requested quantity as a raw JSON number; validated to be > 0.
	pub quantity: Number,
	/// Unrecognized members, kept as sent.
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

/// A delivery order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
	/// Unique identifier for this order.
	#[serde(deserialize_with = "deserialize_id")]
	pub id: String,
	/// Delivery address.
	#[serde(rename = "deliverTo")]
	pub deliver_to: String,
	/// Contact number for the courier.
	#[serde(rename = "mobileNumber")]
	pub mobile_number: String,
	/// Current lifecycle status.
	pub status: OrderStatus,
	/// Ordered sequence of line items; never empty once validated.
	pub dishes: Vec<OrderLineItem>,
}

/// The writable fields of an order, as accepted by create and update bodies.
///
/// `status` is handled separately because the create and update paths give
/// it different treatment.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderPayload {
	#[serde(rename = "deliverTo")]
	pub deliver_to: String,
	#[serde(rename = "mobileNumber")]
	pub mobile_number: String,
	pub dishes: Vec<OrderLineItem>,
}

impl Order {
	/// Builds an order from validated payload fields under the given id.
	pub fn from_payload(id: String, payload: OrderPayload, status: OrderStatus) -> Self {
		Self {
			id,
			deliver_to: payload.deliver_to,
			mobile_number: payload.mobile_number,
			status,
			dishes: payload.dishes,
		}
	}

	/// Overwrites the mutable fields in place; the identifier never changes.
	pub fn apply(&mut self, payload: OrderPayload, status: OrderStatus) {
		self.deliver_to = payload.deliver_to;
		self.mobile_number = payload.mobile_number;
		self.status = status;
		self.dishes = payload.dishes;
	}
}
