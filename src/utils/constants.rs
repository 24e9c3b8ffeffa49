//! Constants Module - Single Source of Truth
//!
//! Endpoint paths, environment variable names and defaults used across the
//! client, the CLI and the REST API. No other module hardcodes these.

// ============================================
// APPLICATION CONSTANTS
// ============================================

/// Application name
pub const APP_NAME: &str = "PathX";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// User-Agent for outbound HTTP requests
pub const USER_AGENT: &str = concat!("PathX/", env!("CARGO_PKG_VERSION"));

// ============================================
// OPENROUTESERVICE
// ============================================

/// Production base URL of the directions provider
pub const ORS_BASE_URL: &str = "https://api.openrouteservice.org";

/// Default timeout for a directions request (seconds)
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Routing preference sent with every request
pub const ORS_PREFERENCE: &str = "fastest";

/// Distance unit sent with every request (meters)
pub const ORS_UNITS: &str = "m";

/// Build the GeoJSON directions URL for a profile
pub fn directions_url(base_url: &str, profile: &str) -> String {
    format!(
        "{}/v2/directions/{}/geojson",
        base_url.trim_end_matches('/'),
        profile
    )
}

// ============================================
// ENVIRONMENT VARIABLES
// ============================================

/// Credential for the directions provider
pub const ENV_ORS_API_KEY: &str = "ORS_API_KEY";
/// Override for the provider base URL (tests, self-hosted ORS)
pub const ENV_ORS_BASE_URL: &str = "ORS_BASE_URL";
/// Request timeout in seconds
pub const ENV_ORS_TIMEOUT_SECS: &str = "ORS_TIMEOUT_SECS";
/// Server bind host
pub const ENV_HOST: &str = "PATHX_HOST";
/// Server port (PORT wins, as set by most PaaS runtimes)
pub const ENV_PORT: &str = "PORT";
pub const ENV_PORT_FALLBACK: &str = "PATHX_PORT";
/// Requests per minute per client
pub const ENV_RATE_LIMIT: &str = "PATHX_RATE_LIMIT";
/// Set to true when a proxy in front of the server sets X-Forwarded-For
pub const ENV_TRUST_PROXY: &str = "PATHX_TRUST_PROXY";

// ============================================
// SERVER DEFAULTS
// ============================================

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_RATE_LIMIT_PER_MINUTE: u32 = 60;

// ============================================
// MAP DEFAULTS (Heidelberg)
// ============================================

/// Default map center as (lat, lon)
pub const DEFAULT_MAP_CENTER: [f64; 2] = [49.41461, 8.681495];

/// Default polyline shown when no route is available, as (lat, lon)
pub const DEFAULT_ROUTE_POINTS: [[f64; 2]; 2] = [[49.41461, 8.681495], [49.420318, 8.687872]];

// ============================================
// UNIT CONVERSIONS
// ============================================

pub const METERS_PER_KM: f64 = 1000.0;
pub const SECONDS_PER_HOUR: f64 = 3600.0;
