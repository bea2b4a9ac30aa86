//! Validation chain primitives.
//!
//! Every mutating operation is gated by an ordered list of guards, each of
//! which either passes control onward or short-circuits the whole chain
//! with a structured error. The [`Chain`] runner stops at the first
//! failing guard, so chain declaration order is the rule-priority order.
//!
//! Guards inspect the raw JSON payload rather than a typed model: this
//! keeps the contract messages exact for malformed input that a typed
//! parse would reject with a generic message.

use platter_types::ApiError;
use serde::de::DeserializeOwned;
use serde_json::Value;

static EMPTY: Value = Value::Null;

/// Request-scoped context handed to each guard in a chain.
pub struct GuardContext<'a> {
	/// The `data` member of the request body.
	pub payload: &'a Value,
	/// Identifier from the route path, when the route carries one.
	pub route_id: Option<&'a str>,
}

impl<'a> GuardContext<'a> {
	/// Context for create operations, which have no route identifier.
	pub fn for_create(payload: &'a Value) -> Self {
		Self {
			payload,
			route_id: None,
		}
	}

	/// Context for operations addressing an existing record.
	pub fn for_existing(payload: &'a Value, route_id: &'a str) -> Self {
		Self {
			payload,
			route_id: Some(route_id),
		}
	}
}

/// A single validation step in a chain.
pub type Guard = Box<dyn Fn(&GuardContext<'_>) -> Result<(), ApiError> + Send + Sync>;

/// Ordered list of guards with first-failure-wins execution.
pub struct Chain {
	guards: Vec<Guard>,
}

impl Chain {
	pub fn new() -> Self {
		Self { guards: Vec::new() }
	}

	/// Appends a guard to the end of the chain.
	pub fn guard<F>(mut self, guard: F) -> Self
	where
		F: Fn(&GuardContext<'_>) -> Result<(), ApiError> + Send + Sync + 'static,
	{
		self.guards.push(Box::new(guard));
		self
	}

	/// Runs every guard in declaration order, stopping at the first error.
	pub fn run(&self, ctx: &GuardContext<'_>) -> Result<(), ApiError> {
		for guard in &self.guards {
			guard(ctx)?;
		}
		Ok(())
	}
}

impl Default for Chain {
	fn default() -> Self {
		Self::new()
	}
}

/// Extracts the `data` member of a request body.
///
/// A body without a `data` member behaves like an empty payload, so field
/// guards report the missing fields instead of a body-shape error.
pub fn payload_of(body: &Value) -> &Value {
	body.get("data").unwrap_or(&EMPTY)
}

/// Whether a payload field counts as present.
///
/// Presence follows the lenient convention of the wire contract: absent
/// values, nulls, empty strings, zero and `false` are all treated as
/// missing. Arrays and objects count as present even when empty.
pub fn is_truthy(value: Option<&Value>) -> bool {
	match value {
		None | Some(Value::Null) => false,
		Some(Value::Bool(b)) => *b,
		Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
		Some(Value::String(s)) => !s.is_empty(),
		Some(Value::Array(_)) | Some(Value::Object(_)) => true,
	}
}

/// Guard requiring a payload field to be present.
pub fn require_field(
	entity: &'static str,
	field: &'static str,
) -> impl Fn(&GuardContext<'_>) -> Result<(), ApiError> {
	move |ctx| {
		if is_truthy(ctx.payload.get(field)) {
			Ok(())
		} else {
			Err(ApiError::InvalidInput(format!(
				"{} must include a {}",
				entity, field
			)))
		}
	}
}

/// Guard requiring a body-supplied `id` to match the route identifier.
///
/// The body id is optional; when present it must equal the route id
/// exactly, with no numeric coercion. A numeric body id therefore never
/// matches, even when its digits equal the route id.
pub fn match_route_id(
	entity: &'static str,
) -> impl Fn(&GuardContext<'_>) -> Result<(), ApiError> {
	move |ctx| {
		let Some(route_id) = ctx.route_id else {
			return Ok(());
		};
		let body_id = ctx.payload.get("id");
		if !is_truthy(body_id) {
			return Ok(());
		}
		let body_id = body_id.unwrap_or(&EMPTY);
		if matches!(body_id, Value::String(s) if s == route_id) {
			return Ok(());
		}
		Err(ApiError::InvalidInput(format!(
			"{} id does not match route id. {}: {}, Route:{}",
			entity,
			entity,
			display_value(body_id),
			route_id
		)))
	}
}

/// Renders a payload value for inclusion in an error message, without
/// surrounding quotes for strings.
fn display_value(value: &Value) -> String {
	match value {
		Value::String(s) => s.clone(),
		other => other.to_string(),
	}
}

/// Parses the payload into a typed model after its chain has passed.
pub fn parse_payload<T: DeserializeOwned>(payload: &Value) -> Result<T, ApiError> {
	serde_json::from_value(payload.clone()).map_err(|e| ApiError::InvalidInput(e.to_string()))
}
