//! JSON request/response surface for a host engine.
//!
//! Every entry point takes a JSON request string and returns a JSON
//! `ApiResponse` string. Malformed input yields `success: false` with an
//! error code; nothing here panics on host data.

pub mod coaching_json;

pub use coaching_json::*;

use crate::error::CoachingError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// API version for schema compatibility
pub const API_VERSION: &str = "v1";

/// Standard API response wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<ApiError>,
    pub schema_version: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
    pub details: Option<HashMap<String, serde_json::Value>>,
}

impl ApiError {
    pub fn new(code: &str, message: &str) -> Self {
        Self { code: code.to_string(), message: message.to_string(), details: None }
    }

    pub fn with_details(
        code: &str,
        message: &str,
        details: HashMap<String, serde_json::Value>,
    ) -> Self {
        Self { code: code.to_string(), message: message.to_string(), details: Some(details) }
    }

    pub fn from_coaching_error(error: &CoachingError) -> Self {
        let code = match error {
            CoachingError::DataFormat { .. } => "DATA_FORMAT",
            CoachingError::Io(_) => "IO_ERROR",
            CoachingError::AlreadyEmployed { .. } => "ALREADY_EMPLOYED",
            CoachingError::UnsupportedPosition { .. } => "UNSUPPORTED_POSITION",
            CoachingError::SlotEmpty { .. } => "SLOT_EMPTY",
            CoachingError::PlaceholderNotHireable => "PLACEHOLDER_NOT_HIREABLE",
            CoachingError::TeamNotFound { .. } => "TEAM_NOT_FOUND",
            CoachingError::Config(_) => "CONFIG_ERROR",
        };
        Self::new(code, &error.to_string())
    }
}

impl From<CoachingError> for ApiError {
    fn from(error: CoachingError) -> Self {
        Self::from_coaching_error(&error)
    }
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            schema_version: API_VERSION.to_string(),
            timestamp: Utc::now(),
        }
    }

    pub fn error(error: ApiError) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
            schema_version: API_VERSION.to_string(),
            timestamp: Utc::now(),
        }
    }
}

impl<T: Serialize> ApiResponse<T> {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            r#"{"success":false,"error":{"code":"SERIALIZATION","message":"Serialization failed"}}"#
                .to_string()
        })
    }
}

impl<T: Serialize> From<Result<T, ApiError>> for ApiResponse<T> {
    fn from(result: Result<T, ApiError>) -> Self {
        match result {
            Ok(data) => ApiResponse::success(data),
            Err(error) => ApiResponse::error(error),
        }
    }
}
