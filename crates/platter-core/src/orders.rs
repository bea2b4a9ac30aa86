//! Order operations and their validation chains.
//!
//! Orders carry the only lifecycle state in the system. Every mutation is
//! gated by the chains declared here plus the status rules in
//! [`crate::state`]; removal is additionally restricted to orders that
//! are still pending.

use once_cell::sync::Lazy;
use platter_storage::{StoreError, StoreService};
use platter_types::{next_id, ApiError, Collection, Order, OrderPayload};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::chain::{match_route_id, parse_payload, payload_of, require_field, Chain, GuardContext};
use crate::state::{resolve_create_status, validate_removal, validate_update_target};

static CREATE_CHAIN: Lazy<Chain> = Lazy::new(|| {
	Chain::new()
		.guard(require_field("Order", "deliverTo"))
		.guard(require_field("Order", "mobileNumber"))
		.guard(require_field("Order", "dishes"))
		.guard(dishes_is_valid)
});

static UPDATE_CHAIN: Lazy<Chain> = Lazy::new(|| {
	Chain::new()
		.guard(match_route_id("Order"))
		.guard(require_field("Order", "deliverTo"))
		.guard(require_field("Order", "mobileNumber"))
		.guard(require_field("Order", "dishes"))
		.guard(dishes_is_valid)
		.guard(status_is_valid)
});

/// Guard requiring `dishes` to be a non-empty sequence of line items with
/// positive numeric quantities.
///
/// The scan reports the lowest offending index. As with dish prices,
/// integrality is not enforced despite the message text.
fn dishes_is_valid(ctx: &GuardContext<'_>) -> Result<(), ApiError> {
	let dishes = match ctx.payload.get("dishes") {
		Some(Value::Array(items)) if !items.is_empty() => items,
		_ => {
			return Err(ApiError::InvalidInput(
				"Order must include at least one dish".to_string(),
			))
		},
	};
	for (index, item) in dishes.iter().enumerate() {
		let quantity_ok = matches!(
			item.get("quantity"),
			Some(Value::Number(n)) if n.as_f64().is_some_and(|quantity| quantity > 0.0)
		);
		if !quantity_ok {
			return Err(ApiError::InvalidInput(format!(
				"Dish {} must have quantity this is an integer greater than 0",
				index
			)));
		}
	}
	Ok(())
}

/// Guard wrapping the update-target status rule.
fn status_is_valid(ctx: &GuardContext<'_>) -> Result<(), ApiError> {
	validate_update_target(ctx.payload.get("status")).map(|_| ())
}

/// Order operations backed by the shared store.
pub struct OrderService {
	store: Arc<StoreService>,
	/// Serializes the resolve-validate-mutate sequence for orders.
	write_gate: Mutex<()>,
}

impl OrderService {
	pub fn new(store: Arc<StoreService>) -> Self {
		Self {
			store,
			write_gate: Mutex::new(()),
		}
	}

	/// Returns every order, in creation order.
	pub async fn list(&self) -> Result<Vec<Order>, ApiError> {
		self.store
			.list(Collection::Orders)
			.await
			.map_err(|e| ApiError::Internal(e.to_string()))
	}

	/// Validates the payload and appends a new order under a fresh id.
	///
	/// Any id supplied in the body is ignored; identity is always freshly
	/// allocated here.
	pub async fn create(&self, body: &Value) -> Result<Order, ApiError> {
		let _gate = self.write_gate.lock().await;
		let payload = payload_of(body);
		CREATE_CHAIN.run(&GuardContext::for_create(payload))?;
		let status = resolve_create_status(payload.get("status"))?;

		let parsed: OrderPayload = parse_payload(payload)?;
		let order = Order::from_payload(next_id(), parsed, status);
		self.store
			.append(Collection::Orders, &order.id, &order)
			.await
			.map_err(|e| ApiError::Internal(e.to_string()))?;

		tracing::info!(order_id = %order.id, status = %order.status, "Created order");
		Ok(order)
	}

	/// Resolves an order by route identifier, accepting lenient id forms.
	pub async fn read(&self, order_id: &str) -> Result<Order, ApiError> {
		self.store
			.find(Collection::Orders, order_id)
			.await
			.map_err(|e| match e {
				StoreError::NotFound => {
					ApiError::NotFound(format!("Order ID not found: {}", order_id))
				},
				other => ApiError::Internal(other.to_string()),
			})
	}

	/// Overwrites the mutable fields of an existing order in place.
	///
	/// The status rule validates the incoming target only; the stored
	/// status is never consulted on this path.
	pub async fn update(&self, order_id: &str, body: &Value) -> Result<Order, ApiError> {
		let _gate = self.write_gate.lock().await;
		let mut order = self.read(order_id).await?;
		let payload = payload_of(body);
		UPDATE_CHAIN.run(&GuardContext::for_existing(payload, order_id))?;
		let status = validate_update_target(payload.get("status"))?;

		let parsed: OrderPayload = parse_payload(payload)?;
		order.apply(parsed, status);
		self.store
			.replace(Collection::Orders, &order.id, &order)
			.await
			.map_err(|e| ApiError::Internal(e.to_string()))?;

		tracing::info!(order_id = %order.id, status = %order.status, "Updated order");
		Ok(order)
	}

	/// Removes an order, which must still be pending.
	pub async fn destroy(&self, order_id: &str) -> Result<(), ApiError> {
		let _gate = self.write_gate.lock().await;
		let order = self.read(order_id).await?;
		validate_removal(&order.status)?;

		self.store
			.remove(Collection::Orders, &order.id)
			.await
			.map_err(|e| ApiError::Internal(e.to_string()))?;

		tracing::info!(order_id = %order.id, "Removed order");
		Ok(())
	}
}
