//! Identifier allocation and comparison rules.
//!
//! Every created record receives a fresh 32-character hexadecimal
//! identifier. Two comparison rules exist side by side: existence lookups
//! are deliberately coercive (the numeric and string forms of an identifier
//! refer to the same record), while the identity-match validation on update
//! bodies is strict. Both rules are part of the public contract.

use serde::{Deserialize, Deserializer};
use uuid::Uuid;

/// Allocates a fresh unique record identifier.
///
/// Identifiers are random, 32 lowercase hex characters, and never reused
/// while the record exists.
pub fn next_id() -> String {
	Uuid::new_v4().simple().to_string()
}

/// Loose identifier comparison used by existence lookups.
///
/// Identifiers match when they are equal as strings, or when both parse as
/// numbers comparing equal (so `"042"` resolves the record stored under
/// `"42"`). Identity-match validation does not use this rule.
pub fn loose_id_eq(a: &str, b: &str) -> bool {
	if a == b {
		return true;
	}
	match (a.parse::<f64>(), b.parse::<f64>()) {
		(Ok(x), Ok(y)) => x == y,
		_ => false,
	}
}

/// Deserializes an identifier that may arrive as a JSON string or number.
///
/// Seed documents carry numeric ids; the typed model normalizes them to
/// their string form.
pub fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
	D: Deserializer<'de>,
{
	#[derive(Deserialize)]
	#[serde(untagged)]
	enum Raw {
		Text(String),
		Number(serde_json::Number),
	}

	Ok(match Raw::deserialize(deserializer)? {
		Raw::Text(s) => s,
		Raw::Number(n) => n.to_string(),
	})
}

/// Optional variant of [`deserialize_id`] for fields that may be absent.
pub fn deserialize_opt_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
	D: Deserializer<'de>,
{
	#[derive(Deserialize)]
	#[serde(untagged)]
	enum Raw {
		Text(String),
		Number(serde_json::Number),
	}

	Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
		Raw::Text(s) => s,
		Raw::Number(n) => n.to_string(),
	}))
}
