//! PathX Library
//!
//! Route planning on top of the OpenRouteService directions API:
//! - Waypoint validation before any network call
//! - One directions request per call, first route candidate returned as-is
//! - Coded errors (configuration, validation, request, no route, response format)
//! - CO₂ estimates and map-ready (lat, lon) polylines
//! - REST API for dashboards

pub mod api;
pub mod core;
pub mod models;
pub mod providers;
pub mod utils;

pub use crate::core::{
    calculate_emissions, parse_lat_lon, parse_waypoints, validate_waypoints, MapView,
    RouteSummary, VehicleInfo, VehicleType,
};
pub use models::{
    AppError, AppResult, Credential, ErrorCode, ErrorKind, Profile, RouteConfig, RouteQuery,
    RouteResult, ServerConfig, Waypoint,
};
pub use providers::RouteClient;
