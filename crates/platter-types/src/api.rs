//! Envelope and error types for the HTTP surface.
//!
//! Every successful response body sits under a top-level `data` member and
//! every failure renders as `{"message": ...}` with its HTTP status. The
//! [`ApiError`] `IntoResponse` impl is the single centralized error
//! responder for the whole service.

use axum::{
	http::StatusCode,
	response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Top-level envelope wrapping every successful response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataEnvelope<T> {
	pub data: T,
}

impl<T> DataEnvelope<T> {
	pub fn new(data: T) -> Self {
		Self { data }
	}
}

/// Error body returned for every failed request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
	/// Human-readable description of the violated rule.
	pub message: String,
}

/// Structured API error with its HTTP status mapping.
///
/// `InvalidInput` and `NotFound` are the two kinds that propagate through
/// validation chains; `MethodNotAllowed` comes from verb dispatch and
/// `Internal` from store failures that no request content can cause.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
	/// Malformed or semantically invalid request content (400).
	#[error("Invalid input: {0}")]
	InvalidInput(String),
	/// Referenced entity identifier does not exist in the store (404).
	#[error("Not found: {0}")]
	NotFound(String),
	/// Verb not supported on a defined path (405).
	#[error("Method not allowed: {0}")]
	MethodNotAllowed(String),
	/// Unexpected failure in a collaborator (500).
	#[error("Internal error: {0}")]
	Internal(String),
}

impl ApiError {
	/// HTTP status code for this error.
	pub fn status_code(&self) -> StatusCode {
		match self {
			ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
			ApiError::NotFound(_) => StatusCode::NOT_FOUND,
			ApiError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
			ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
		}
	}

	/// The message carried to the caller.
	pub fn message(&self) -> &str {
		match self {
			ApiError::InvalidInput(m)
			| ApiError::NotFound(m)
			| ApiError::MethodNotAllowed(m)
			| ApiError::Internal(m) => m,
		}
	}
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let status = self.status_code();
		let body = ErrorBody {
			message: self.message().to_string(),
		};
		(status, Json(body)).into_response()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn status_codes_match_error_kinds() {
		assert_eq!(
			ApiError::InvalidInput("x".into()).status_code(),
			StatusCode::BAD_REQUEST
		);
		assert_eq!(
			ApiError::NotFound("x".into()).status_code(),
			StatusCode::NOT_FOUND
		);
		assert_eq!(
			ApiError::MethodNotAllowed("x".into()).status_code(),
			StatusCode::METHOD_NOT_ALLOWED
		);
		assert_eq!(
			ApiError::Internal("x".into()).status_code(),
			StatusCode::INTERNAL_SERVER_ERROR
		);
	}

	#[test]
	fn message_is_carried_verbatim() {
		let err = ApiError::InvalidInput("Dish must include a name".into());
		assert_eq!(err.message(), "Dish must include a name");
	}

	#[test]
	fn envelope_serializes_under_data() {
		let body = serde_json::to_value(DataEnvelope::new(vec![1, 2])).unwrap();
		assert_eq!(body, serde_json::json!({ "data": [1, 2] }));
	}
}
