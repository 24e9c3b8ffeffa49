//! Centralized Error Handling Module
//!
//! Every failure carries a unique code so logs and API clients can branch on
//! the cause without matching message text.
//!
//! Error codes follow pattern: CATEGORY_SPECIFIC_ERROR
//! - CFG_xxx: Configuration errors
//! - VAL_xxx: Caller input errors
//! - REQ_xxx: Network / HTTP errors
//! - ROUTE_xxx: Provider found no route
//! - RESP_xxx: Provider response had an unexpected shape

use std::fmt;

/// Application-wide error type
#[derive(Debug)]
pub struct AppError {
    /// Unique error code for logging/monitoring
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Upstream HTTP status, when the provider answered with a non-2xx status
    pub http_status: Option<u16>,
    /// Optional underlying error
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new AppError
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            http_status: None,
            source: None,
        }
    }

    /// Create AppError with source error
    pub fn with_source(
        code: ErrorCode,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            http_status: None,
            source: Some(Box::new(source)),
        }
    }

    /// Replace the message, keeping the code
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Get error code as string (for logging)
    pub fn code_str(&self) -> &'static str {
        self.code.as_str()
    }

    /// Broad category of this error
    pub fn kind(&self) -> ErrorKind {
        self.code.kind()
    }

    /// Whether trying the same call later could succeed.
    ///
    /// Upstream 429 and 5xx answers count as transient, other statuses do not.
    pub fn is_retryable(&self) -> bool {
        match (self.code, self.http_status) {
            (ErrorCode::RequestHttpStatus, Some(status)) => status == 429 || status >= 500,
            (code, _) => code.is_retryable(),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source.as_ref().map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Error categories callers branch on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing or invalid credential / settings; needs operator action
    Configuration,
    /// Malformed caller input; fix the input and call again
    Validation,
    /// Network or HTTP failure; may succeed later
    Request,
    /// Provider found no path between the waypoints
    NoRoute,
    /// Provider answered with an unexpected shape
    ResponseFormat,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Configuration => "CONFIGURATION",
            Self::Validation => "VALIDATION",
            Self::Request => "REQUEST",
            Self::NoRoute => "NO_ROUTE",
            Self::ResponseFormat => "RESPONSE_FORMAT",
        }
    }
}

/// Unique error codes for monitoring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // ============================================
    // Configuration Errors
    // ============================================
    /// ORS_API_KEY absent or blank
    ConfigMissingApiKey,
    /// Configuration value could not be read or parsed
    ConfigInvalidValue,

    // ============================================
    // Validation Errors
    // ============================================
    /// Fewer than two waypoints
    ValidationTooFewWaypoints,
    /// Coordinate is not a (longitude, latitude) pair
    ValidationMalformedCoordinate,
    /// Coordinate value is not a finite number
    ValidationNonNumeric,
    /// Longitude or latitude outside geographic bounds
    ValidationOutOfRange,
    /// Unknown travel profile
    ValidationUnknownProfile,
    /// Unknown vehicle type
    ValidationUnknownVehicle,
    /// Request body is not valid JSON or misses a required field
    ValidationInvalidBody,

    // ============================================
    // Request Errors
    // ============================================
    /// Provider answered with a non-2xx status
    RequestHttpStatus,
    /// DNS, connect or reset failure
    RequestTransport,
    /// Request exceeded the configured timeout
    RequestTimeout,

    // ============================================
    // Provider Result Errors
    // ============================================
    /// Provider returned no route candidate
    NoRoute,
    /// Provider response is malformed or missing a field
    ResponseInvalidFormat,
}

impl ErrorCode {
    /// Get string representation of error code
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ConfigMissingApiKey => "CFG_MISSING_API_KEY",
            Self::ConfigInvalidValue => "CFG_INVALID_VALUE",

            Self::ValidationTooFewWaypoints => "VAL_TOO_FEW_WAYPOINTS",
            Self::ValidationMalformedCoordinate => "VAL_MALFORMED_COORDINATE",
            Self::ValidationNonNumeric => "VAL_NON_NUMERIC",
            Self::ValidationOutOfRange => "VAL_OUT_OF_RANGE",
            Self::ValidationUnknownProfile => "VAL_UNKNOWN_PROFILE",
            Self::ValidationUnknownVehicle => "VAL_UNKNOWN_VEHICLE",
            Self::ValidationInvalidBody => "VAL_INVALID_BODY",

            Self::RequestHttpStatus => "REQ_HTTP_STATUS",
            Self::RequestTransport => "REQ_TRANSPORT",
            Self::RequestTimeout => "REQ_TIMEOUT",

            Self::NoRoute => "ROUTE_NOT_FOUND",
            Self::ResponseInvalidFormat => "RESP_INVALID_FORMAT",
        }
    }

    /// Category of this code
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ConfigMissingApiKey | Self::ConfigInvalidValue => ErrorKind::Configuration,
            Self::ValidationTooFewWaypoints
            | Self::ValidationMalformedCoordinate
            | Self::ValidationNonNumeric
            | Self::ValidationOutOfRange
            | Self::ValidationUnknownProfile
            | Self::ValidationUnknownVehicle
            | Self::ValidationInvalidBody => ErrorKind::Validation,
            Self::RequestHttpStatus | Self::RequestTransport | Self::RequestTimeout => {
                ErrorKind::Request
            }
            Self::NoRoute => ErrorKind::NoRoute,
            Self::ResponseInvalidFormat => ErrorKind::ResponseFormat,
        }
    }

    /// Get HTTP status code for API responses
    pub fn http_status(&self) -> u16 {
        match self {
            Self::RequestTimeout => 504,
            _ => match self.kind() {
                ErrorKind::Validation => 400,
                ErrorKind::NoRoute => 404,
                ErrorKind::Request | ErrorKind::ResponseFormat => 502,
                ErrorKind::Configuration => 500,
            },
        }
    }

    /// Check if error is retryable
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::RequestTransport | Self::RequestTimeout)
    }
}

// ============================================
// Convenience constructors
// ============================================

impl AppError {
    /// Missing API key
    pub fn missing_api_key(key_name: &str) -> Self {
        Self::new(
            ErrorCode::ConfigMissingApiKey,
            format!("{} environment variable is not set", key_name),
        )
    }

    /// API key present but blank
    pub fn empty_api_key(key_name: &str) -> Self {
        Self::new(ErrorCode::ConfigMissingApiKey, format!("{} is empty", key_name))
    }

    /// Invalid configuration value
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigInvalidValue, msg)
    }

    /// Too few waypoints
    pub fn too_few_waypoints() -> Self {
        Self::new(
            ErrorCode::ValidationTooFewWaypoints,
            "At least two coordinates are required",
        )
    }

    /// Coordinate is not a pair
    pub fn malformed_coordinate() -> Self {
        Self::new(
            ErrorCode::ValidationMalformedCoordinate,
            "Coordinates must be (longitude, latitude) tuples",
        )
    }

    /// Coordinate is not numeric
    pub fn non_numeric_coordinate() -> Self {
        Self::new(ErrorCode::ValidationNonNumeric, "Coordinates must be numeric values")
    }

    /// Coordinate out of bounds
    pub fn out_of_range(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationOutOfRange, msg)
    }

    /// Unknown travel profile
    pub fn unknown_profile(profile: &str) -> Self {
        Self::new(
            ErrorCode::ValidationUnknownProfile,
            format!("Unknown travel profile: {}", profile),
        )
    }

    /// Unknown vehicle type
    pub fn unknown_vehicle(vehicle: &str) -> Self {
        Self::new(
            ErrorCode::ValidationUnknownVehicle,
            format!("Invalid vehicle type: {}", vehicle),
        )
    }

    /// Request body rejected before any field was read
    pub fn invalid_body(detail: impl fmt::Display) -> Self {
        Self::new(
            ErrorCode::ValidationInvalidBody,
            format!("Invalid request body: {}", detail),
        )
    }

    /// Provider answered with a non-2xx status
    pub fn http_status(status: u16, reason: &str, body: Option<&str>) -> Self {
        let mut message = format!("API request failed: HTTP {} {}", status, reason);
        if let Some(body) = body.filter(|b| !b.is_empty()) {
            message.push_str("\nResponse: ");
            message.push_str(body);
        }
        Self {
            code: ErrorCode::RequestHttpStatus,
            message: message.trim_end().to_string(),
            http_status: Some(status),
            source: None,
        }
    }

    /// Provider found no route
    pub fn no_route() -> Self {
        Self::new(ErrorCode::NoRoute, "No route found")
    }

    /// Provider response is missing or has an invalid field
    pub fn invalid_response(field: &str, detail: impl fmt::Display) -> Self {
        Self::new(
            ErrorCode::ResponseInvalidFormat,
            format!("Invalid API response format: {}: {}", field, detail),
        )
    }
}

// ============================================
// Result type alias
// ============================================

/// Application Result type
pub type AppResult<T> = Result<T, AppError>;

// ============================================
// Conversion from common error types
// ============================================

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::with_source(
                ErrorCode::RequestTimeout,
                format!("API request failed: request timed out: {}", err),
                err,
            )
        } else {
            Self::with_source(
                ErrorCode::RequestTransport,
                format!("API request failed: {}", err),
                err,
            )
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorCode::ResponseInvalidFormat,
            format!("Invalid API response format: {}", err),
            err,
        )
    }
}
