//! API Request/Response Types

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::emissions::VehicleInfo;
use crate::core::summary::{MapView, RouteSummary};
use crate::models::errors::AppError;
use crate::models::types::RouteResult;

/// API Response wrapper
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
    pub latency_ms: f64,
    pub timestamp: i64,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T, latency_ms: f64) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            latency_ms,
            timestamp: chrono::Utc::now().timestamp(),
        }
    }

    /// Failed call that still carries data for the client to show
    pub fn failure(data: T, error: ApiError, latency_ms: f64) -> Self {
        Self {
            success: false,
            data: Some(data),
            error: Some(error),
            latency_ms,
            timestamp: chrono::Utc::now().timestamp(),
        }
    }
}

impl ApiResponse<()> {
    pub fn error(error: ApiError, latency_ms: f64) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
            latency_ms,
            timestamp: chrono::Utc::now().timestamp(),
        }
    }
}

/// API Error
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    pub fn rate_limited(retry_after: u64) -> Self {
        Self {
            code: "RATE_LIMITED".to_string(),
            message: format!("Rate limit exceeded. Retry after {} seconds", retry_after),
            details: Some(format!("retry_after: {}", retry_after)),
        }
    }
}

impl From<&AppError> for ApiError {
    fn from(err: &AppError) -> Self {
        Self {
            code: err.code_str().to_string(),
            message: err.message.clone(),
            details: Some(format!(
                "kind: {}, retryable: {}",
                err.kind().as_str(),
                err.is_retryable()
            )),
        }
    }
}

// ============================================
// Directions
// ============================================

/// Raw coordinates are validated by the handler so shape errors get
/// the same messages as any other caller.
#[derive(Debug, Deserialize)]
pub struct DirectionsRequestBody {
    #[serde(default)]
    pub coordinates: Vec<Value>,
    #[serde(default)]
    pub profile: Option<String>,
}

// ============================================
// Route Planning
// ============================================

#[derive(Debug, Deserialize)]
pub struct PlanRequest {
    /// "lat, lon"
    pub start: String,
    /// "lat, lon"
    pub end: String,
    #[serde(default)]
    pub vehicle_type: Option<String>,
    #[serde(default)]
    pub profile: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PlanData {
    pub route: RouteResult,
    pub summary: RouteSummary,
    pub vehicle: VehicleInfo,
    pub map: MapView,
}

// ============================================
// Health & Reference Data
// ============================================

#[derive(Debug, Serialize)]
pub struct HealthData {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub provider_configured: bool,
}

#[derive(Debug, Serialize)]
pub struct VehiclesData {
    pub vehicles: Vec<VehicleInfo>,
}
