//! Order lifecycle rules.
//!
//! Orders move through pending -> preparing -> out-for-delivery ->
//! delivered, but the update path deliberately does not enforce forward
//! progression between the first three states: any of them may be written
//! regardless of the current value. `delivered` is never accepted as an
//! update target, and removal is legal only while an order is still
//! pending.

use once_cell::sync::Lazy;
use platter_types::{ApiError, OrderStatus};
use serde_json::Value;
use std::collections::HashSet;
use std::str::FromStr;

use crate::chain::is_truthy;

/// Message for a missing or unrecognized status value.
pub const STATUS_REQUIRED: &str =
	"Order must have a status of pending, preparing, out-for-delivery, delivered";
/// Message for an attempt to write the terminal status.
pub const DELIVERED_IMMUTABLE: &str = "A delivered order cannot be changed";
/// Message for removal of an order that is no longer pending.
pub const REMOVAL_REQUIRES_PENDING: &str = "An order cannot be deleted unless it is pending";

// Statuses accepted as update targets. Delivered is a valid stored value
// but can never be written through the update path.
static WRITABLE_TARGETS: Lazy<HashSet<OrderStatus>> = Lazy::new(|| {
	HashSet::from([
		OrderStatus::Pending,
		OrderStatus::Preparing,
		OrderStatus::OutForDelivery,
	])
});

/// Resolves the status stored for a newly created order.
///
/// Creation accepts any of the four statuses, including `delivered`, so
/// historical orders can be loaded through the same path. A missing or
/// empty status defaults to `pending`; anything else is rejected.
pub fn resolve_create_status(raw: Option<&Value>) -> Result<OrderStatus, ApiError> {
	if !is_truthy(raw) {
		return Ok(OrderStatus::Pending);
	}
	parse_status(raw).ok_or_else(|| ApiError::InvalidInput(STATUS_REQUIRED.to_string()))
}

/// Validates the status supplied as an update target.
///
/// Only reads the incoming value, never the stored one: an order whose
/// stored status is `delivered` is unreachable through this check only
/// because `delivered` can never have been written by an update.
pub fn validate_update_target(raw: Option<&Value>) -> Result<OrderStatus, ApiError> {
	let Some(status) = parse_status(raw) else {
		return Err(ApiError::InvalidInput(STATUS_REQUIRED.to_string()));
	};
	if WRITABLE_TARGETS.contains(&status) {
		return Ok(status);
	}
	// The only recognized status outside the writable set is delivered.
	Err(ApiError::InvalidInput(DELIVERED_IMMUTABLE.to_string()))
}

/// Validates that an order may be removed given its current status.
pub fn validate_removal(current: &OrderStatus) -> Result<(), ApiError> {
	if *current == OrderStatus::Pending {
		Ok(())
	} else {
		Err(ApiError::InvalidInput(REMOVAL_REQUIRES_PENDING.to_string()))
	}
}

fn parse_status(raw: Option<&Value>) -> Option<OrderStatus> {
	match raw {
		Some(Value::String(s)) => OrderStatus::from_str(s).ok(),
		_ => None,
	}
}
