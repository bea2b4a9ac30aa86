//! Storage namespace identifiers.

/// Namespaces used to partition stored entities.
///
/// Using an enum rather than raw strings prevents typos when addressing
/// collections from service code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
	Dishes,
	Orders,
}

impl Collection {
	/// String form used as the backend namespace.
	pub fn as_str(&self) -> &'static str {
		match self {
			Collection::Dishes => "dishes",
			Collection::Orders => "orders",
		}
	}
}

impl std::fmt::Display for Collection {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.as_str())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn collection_string_forms() {
		assert_eq!(Collection::Dishes.as_str(), "dishes");
		assert_eq!(Collection::Orders.as_str(), "orders");
		assert_eq!(Collection::Orders.to_string(), "orders");
	}
}
