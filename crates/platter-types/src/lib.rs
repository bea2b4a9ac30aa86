//! Common types for the platter service.
//!
//! This crate defines the data types shared across the service: the dish and
//! order domain models, the HTTP envelope and error types, identifier rules,
//! and the storage collection keys. Keeping them in one place ensures the
//! validation layer, the store, and the HTTP surface agree on the wire shape.

/// Envelope and error types for the HTTP surface.
pub mod api;
/// Dish domain types.
pub mod dish;
/// Identifier allocation and comparison rules.
pub mod id;
/// Order domain types and lifecycle status.
pub mod order;
/// Storage collection keys.
pub mod storage;

// Re-export all types for convenient access
pub use api::*;
pub use dish::*;
pub use id::{loose_id_eq, next_id};
pub use order::*;
pub use storage::*;
