//! The JSON envelope shared by every API response.
//!
//! Successful responses look like `{ "success": true, "message"?: ..., "data"?: ... }`
//! and failures look like `{ "success": false, "message": ..., "error"?: ... }`.

use axum::{
    Json,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

/// A successful API response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiResponse<T> {
    /// Always `true`; failures are sent as [ErrorBody].
    pub success: bool,
    /// A human readable description of what happened.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// The payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// A response carrying only `data`.
    pub fn data(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    /// A response carrying `data` and a confirmation `message`.
    pub fn with_message(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    /// A response with a confirmation `message` and no payload.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: None,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

/// The body of a failed API response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Always `false`.
    pub success: bool,
    /// A message that is safe to show to the user.
    pub message: String,
    /// Extra detail about an internal failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ErrorBody {
    /// Create the body of a failed response.
    pub fn new(message: String, error: Option<String>) -> Self {
        Self {
            success: false,
            message,
            error,
        }
    }
}

impl IntoResponse for ErrorBody {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::ApiResponse;

    #[test]
    fn message_only_response_omits_data() {
        let json = serde_json::to_value(ApiResponse::message("done")).unwrap();

        assert_eq!(json, json!({ "success": true, "message": "done" }));
    }

    #[test]
    fn data_response_omits_message() {
        let json = serde_json::to_value(ApiResponse::data(vec![1, 2])).unwrap();

        assert_eq!(json, json!({ "success": true, "data": [1, 2] }));
    }
}
