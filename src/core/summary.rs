//! Route presentation: statistics and map view
//!
//! Converts a [`RouteResult`] into the units the dashboard shows (km, hours,
//! kg CO₂) and into a (lat, lon) polyline for map renderers.

use serde::Serialize;

use super::emissions::{calculate_emissions, VehicleType};
use crate::models::types::{RouteResult, Waypoint};
use crate::utils::constants::{
    DEFAULT_MAP_CENTER, DEFAULT_ROUTE_POINTS, METERS_PER_KM, SECONDS_PER_HOUR,
};

/// Route statistics for one vehicle
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteSummary {
    pub vehicle_type: VehicleType,
    pub distance_km: f64,
    pub duration_hours: f64,
    pub emissions_kg: f64,
    /// None for zero-duration routes
    pub average_speed_kmh: Option<f64>,
    /// km per kg CO₂; None when nothing is emitted
    pub efficiency_km_per_kg: Option<f64>,
}

impl RouteSummary {
    pub fn from_route(route: &RouteResult, vehicle: VehicleType) -> Self {
        let distance_km = route.distance / METERS_PER_KM;
        let duration_hours = route.duration / SECONDS_PER_HOUR;
        let emissions_kg = calculate_emissions(distance_km, vehicle);

        Self {
            vehicle_type: vehicle,
            distance_km,
            duration_hours,
            emissions_kg,
            average_speed_kmh: (duration_hours > 0.0).then(|| distance_km / duration_hours),
            efficiency_km_per_kg: (emissions_kg > 0.0).then(|| distance_km / emissions_kg),
        }
    }
}

/// What a map widget needs to draw a route.
/// All points are (lat, lon), the reverse of the provider's order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapView {
    pub center: [f64; 2],
    pub polyline: Vec<[f64; 2]>,
}

impl MapView {
    /// Centered between start and end, polyline from the route geometry
    pub fn for_route(start: Waypoint, end: Waypoint, route: &RouteResult) -> Self {
        Self {
            center: [(start.lat + end.lat) / 2.0, (start.lon + end.lon) / 2.0],
            polyline: route.geometry.iter().map(Waypoint::to_lat_lon).collect(),
        }
    }

    pub fn start(&self) -> Option<[f64; 2]> {
        self.polyline.first().copied()
    }

    pub fn end(&self) -> Option<[f64; 2]> {
        self.polyline.last().copied()
    }
}

/// Fallback view shown when no route could be computed
impl Default for MapView {
    fn default() -> Self {
        Self {
            center: DEFAULT_MAP_CENTER,
            polyline: DEFAULT_ROUTE_POINTS.to_vec(),
        }
    }
}
