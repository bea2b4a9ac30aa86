//! HTTP server for the platter API.
//!
//! This module wires the dish and order services into an axum router.
//! Success bodies sit under a top-level `data` member; failures render as
//! `{"message": ...}` through the [`ApiError`] responder. Unsupported
//! verbs on defined paths report 405 rather than 404.

use axum::{
	extract::{rejection::JsonRejection, Path, State},
	http::{Method, StatusCode, Uri},
	response::Json,
	routing::get,
	Router,
};
use platter_config::Config;
use platter_core::{DishService, OrderService};
use platter_storage::{implementations::memory::MemoryStore, StoreService};
use platter_types::{ApiError, DataEnvelope, Dish, Order};
use serde_json::Value;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

/// Shared application state for the API server.
#[derive(Clone)]
pub struct AppState {
	/// Dish operations.
	pub dishes: Arc<DishService>,
	/// Order operations.
	pub orders: Arc<OrderService>,
}

/// Starts the HTTP server for the API.
///
/// This function builds the store and services, loads optional seed data,
/// and serves the router until the process is interrupted.
pub async fn start_server(config: Config) -> Result<(), Box<dyn std::error::Error>> {
	let store = Arc::new(StoreService::new(Box::new(MemoryStore::new())));
	let state = AppState {
		dishes: Arc::new(DishService::new(store.clone())),
		orders: Arc::new(OrderService::new(store.clone())),
	};

	if let Some(seed) = &config.seed {
		let seeded = crate::seed::load(&seed.path, &store).await?;
		tracing::info!(
			dishes = seeded.dishes,
			orders = seeded.orders,
			"Loaded seed data"
		);
	}

	let app = build_router(state);

	let bind_address = config.server.bind_address();
	let listener = TcpListener::bind(&bind_address).await?;

	tracing::info!("Platter API server starting on {}", bind_address);

	axum::serve(listener, app).await?;

	Ok(())
}

/// Builds the router with all routes, fallbacks and middleware.
fn build_router(state: AppState) -> Router {
	Router::new()
		.route(
			"/dishes",
			get(list_dishes)
				.post(create_dish)
				.fallback(method_not_allowed),
		)
		.route(
			"/dishes/{dish_id}",
			get(read_dish)
				.put(update_dish)
				.fallback(method_not_allowed),
		)
		.route(
			"/orders",
			get(list_orders)
				.post(create_order)
				.fallback(method_not_allowed),
		)
		.route(
			"/orders/{order_id}",
			get(read_order)
				.put(update_order)
				.delete(destroy_order)
				.fallback(method_not_allowed),
		)
		.fallback(path_not_found)
		.layer(ServiceBuilder::new().layer(CorsLayer::permissive()))
		.with_state(state)
}

/// Unwraps an extracted JSON body. Absent, malformed and non-JSON bodies
/// all behave as empty payloads, so field guards report the missing fields
/// instead of an extractor rejection leaking past the error envelope.
fn json_body(body: Result<Json<Value>, JsonRejection>) -> Value {
	body.map(|Json(value)| value).unwrap_or(Value::Null)
}

/// Handles GET /dishes requests.
async fn list_dishes(
	State(state): State<AppState>,
) -> Result<Json<DataEnvelope<Vec<Dish>>>, ApiError> {
	Ok(Json(DataEnvelope::new(state.dishes.list().await?)))
}

/// Handles POST /dishes requests.
async fn create_dish(
	State(state): State<AppState>,
	body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<DataEnvelope<Dish>>), ApiError> {
	match state.dishes.create(&json_body(body)).await {
		Ok(dish) => Ok((StatusCode::CREATED, Json(DataEnvelope::new(dish)))),
		Err(e) => {
			tracing::warn!("Dish creation rejected: {}", e);
			Err(e)
		},
	}
}

/// Handles GET /dishes/{dish_id} requests.
async fn read_dish(
	State(state): State<AppState>,
	Path(dish_id): Path<String>,
) -> Result<Json<DataEnvelope<Dish>>, ApiError> {
	Ok(Json(DataEnvelope::new(state.dishes.read(&dish_id).await?)))
}

/// Handles PUT /dishes/{dish_id} requests.
async fn update_dish(
	State(state): State<AppState>,
	Path(dish_id): Path<String>,
	body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<DataEnvelope<Dish>>, ApiError> {
	match state.dishes.update(&dish_id, &json_body(body)).await {
		Ok(dish) => Ok(Json(DataEnvelope::new(dish))),
		Err(e) => {
			tracing::warn!("Dish update rejected: {}", e);
			Err(e)
		},
	}
}

/// Handles GET /orders requests.
async fn list_orders(
	State(state): State<AppState>,
) -> Result<Json<DataEnvelope<Vec<Order>>>, ApiError> {
	Ok(Json(DataEnvelope::new(state.orders.list().await?)))
}

/// Handles POST /orders requests.
async fn create_order(
	State(state): State<AppState>,
	body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<DataEnvelope<Order>>), ApiError> {
	match state.orders.create(&json_body(body)).await {
		Ok(order) => Ok((StatusCode::CREATED, Json(DataEnvelope::new(order)))),
		Err(e) => {
			tracing::warn!("Order creation rejected: {}", e);
			Err(e)
		},
	}
}

/// Handles GET /orders/{order_id} requests.
async fn read_order(
	State(state): State<AppState>,
	Path(order_id): Path<String>,
) -> Result<Json<DataEnvelope<Order>>, ApiError> {
	Ok(Json(DataEnvelope::new(state.orders.read(&order_id).await?)))
}

/// Handles PUT /orders/{order_id} requests.
async fn update_order(
	State(state): State<AppState>,
	Path(order_id): Path<String>,
	body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<DataEnvelope<Order>>, ApiError> {
	match state.orders.update(&order_id, &json_body(body)).await {
		Ok(order) => Ok(Json(DataEnvelope::new(order))),
		Err(e) => {
			tracing::warn!("Order update rejected: {}", e);
			Err(e)
		},
	}
}

/// Handles DELETE /orders/{order_id} requests.
async fn destroy_order(
	State(state): State<AppState>,
	Path(order_id): Path<String>,
) -> Result<StatusCode, ApiError> {
	match state.orders.destroy(&order_id).await {
		Ok(()) => Ok(StatusCode::NO_CONTENT),
		Err(e) => {
			tracing::warn!("Order removal rejected: {}", e);
			Err(e)
		},
	}
}

/// Fallback for unsupported verbs on defined paths.
async fn method_not_allowed(method: Method, uri: Uri) -> ApiError {
	ApiError::MethodNotAllowed(format!("{} not allowed for {}", method, uri.path()))
}

/// Fallback for paths outside the API surface.
async fn path_not_found(uri: Uri) -> ApiError {
	ApiError::NotFound(format!("Not found: {}", uri.path()))
}
