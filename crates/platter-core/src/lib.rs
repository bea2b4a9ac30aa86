//! Core validation and lifecycle logic for the platter service.
//!
//! This crate owns the two parallel subsystems behind the HTTP surface:
//! dish management and order management. Each mutating operation runs an
//! ordered validation chain against the raw request payload, then a
//! handler that performs the store mutation. The chain runner
//! short-circuits on the first violated rule, so error precedence follows
//! chain declaration order.
//!
//! Orders additionally carry a lifecycle status governed by the rules in
//! [`state`]: `delivered` can never be written through the update path,
//! and only pending orders may be removed.

/// Chain runner and shared guard primitives.
pub mod chain;
/// Dish operations and validation chains.
pub mod dishes;
/// Order operations, validation chains and removal rules.
pub mod orders;
/// Order lifecycle rules.
pub mod state;

pub use dishes::DishService;
pub use orders::OrderService;
