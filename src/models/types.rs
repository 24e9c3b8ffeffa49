//! Type definitions for PathX
//! Waypoints, travel profiles, queries and route results

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::errors::{AppError, AppResult};

/// A (longitude, latitude) coordinate.
///
/// Serialized as the JSON array `[lon, lat]`, the order the provider uses.
/// `From<[f64; 2]>` does not check bounds; use [`Waypoint::new`] for caller input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Waypoint {
    pub lon: f64,
    pub lat: f64,
}

impl Waypoint {
    pub const LON_RANGE: (f64, f64) = (-180.0, 180.0);
    pub const LAT_RANGE: (f64, f64) = (-90.0, 90.0);

    /// Checked constructor: both values finite and within geographic bounds
    pub fn new(lon: f64, lat: f64) -> AppResult<Self> {
        let waypoint = Self { lon, lat };
        waypoint.validate()?;
        Ok(waypoint)
    }

    /// Check this waypoint is numeric and in bounds
    pub fn validate(&self) -> AppResult<()> {
        if !self.lon.is_finite() || !self.lat.is_finite() {
            return Err(AppError::non_numeric_coordinate());
        }
        if !(Self::LON_RANGE.0..=Self::LON_RANGE.1).contains(&self.lon) {
            return Err(AppError::out_of_range(format!(
                "Coordinates out of range: longitude must be between -180 and 180, got {}",
                self.lon
            )));
        }
        if !(Self::LAT_RANGE.0..=Self::LAT_RANGE.1).contains(&self.lat) {
            return Err(AppError::out_of_range(format!(
                "Coordinates out of range: latitude must be between -90 and 90, got {}",
                self.lat
            )));
        }
        Ok(())
    }

    /// Same point in the (lat, lon) order map renderers expect
    pub fn to_lat_lon(&self) -> [f64; 2] {
        [self.lat, self.lon]
    }
}

impl From<[f64; 2]> for Waypoint {
    fn from([lon, lat]: [f64; 2]) -> Self {
        Self { lon, lat }
    }
}

impl From<(f64, f64)> for Waypoint {
    fn from((lon, lat): (f64, f64)) -> Self {
        Self { lon, lat }
    }
}

impl From<Waypoint> for [f64; 2] {
    fn from(w: Waypoint) -> Self {
        [w.lon, w.lat]
    }
}

impl fmt::Display for Waypoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.lon, self.lat)
    }
}

/// Travel mode selecting the provider's routing graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Profile {
    #[default]
    DrivingCar,
    DrivingHgv,
    CyclingRegular,
    CyclingRoad,
    CyclingMountain,
    CyclingElectric,
    FootWalking,
    FootHiking,
    Wheelchair,
}

impl Profile {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DrivingCar => "driving-car",
            Self::DrivingHgv => "driving-hgv",
            Self::CyclingRegular => "cycling-regular",
            Self::CyclingRoad => "cycling-road",
            Self::CyclingMountain => "cycling-mountain",
            Self::CyclingElectric => "cycling-electric",
            Self::FootWalking => "foot-walking",
            Self::FootHiking => "foot-hiking",
            Self::Wheelchair => "wheelchair",
        }
    }

    pub fn all() -> &'static [Profile] {
        &[
            Self::DrivingCar,
            Self::DrivingHgv,
            Self::CyclingRegular,
            Self::CyclingRoad,
            Self::CyclingMountain,
            Self::CyclingElectric,
            Self::FootWalking,
            Self::FootHiking,
            Self::Wheelchair,
        ]
    }
}

impl FromStr for Profile {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::all()
            .iter()
            .copied()
            .find(|p| p.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| AppError::unknown_profile(s))
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated directions query. Built per call and never retained.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteQuery {
    waypoints: Vec<Waypoint>,
    profile: Profile,
}

impl RouteQuery {
    /// Validate waypoints and build the query
    pub fn new(waypoints: Vec<Waypoint>, profile: Profile) -> AppResult<Self> {
        crate::core::validation::validate_waypoints(&waypoints)?;
        Ok(Self { waypoints, profile })
    }

    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    pub fn profile(&self) -> Profile {
        self.profile
    }
}

/// First route candidate returned by the provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteResult {
    /// Meters
    pub distance: f64,
    /// Seconds
    pub duration: f64,
    /// Path polyline in (lon, lat) order, as returned by the provider
    pub geometry: Vec<Waypoint>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::errors::ErrorCode;

    #[test]
    fn test_waypoint_wire_format() {
        let w = Waypoint::new(8.681495, 49.41461).unwrap();
        assert_eq!(serde_json::to_string(&w).unwrap(), "[8.681495,49.41461]");

        let back: Waypoint = serde_json::from_str("[8.68, 49.41]").unwrap();
        assert_eq!(back, Waypoint { lon: 8.68, lat: 49.41 });
        assert_eq!(back.to_lat_lon(), [49.41, 8.68]);
    }

    #[test]
    fn test_waypoint_bounds() {
        assert!(Waypoint::new(180.0, -90.0).is_ok());
        assert_eq!(
            Waypoint::new(180.5, 0.0).unwrap_err().code,
            ErrorCode::ValidationOutOfRange
        );
        assert_eq!(
            Waypoint::new(0.0, 90.01).unwrap_err().code,
            ErrorCode::ValidationOutOfRange
        );
        assert_eq!(
            Waypoint::new(f64::NAN, 0.0).unwrap_err().code,
            ErrorCode::ValidationNonNumeric
        );
    }

    #[test]
    fn test_profile_parse() {
        assert_eq!(Profile::default().as_str(), "driving-car");
        assert_eq!("foot-walking".parse::<Profile>().unwrap(), Profile::FootWalking);
        assert_eq!(" Driving-HGV ".parse::<Profile>().unwrap(), Profile::DrivingHgv);

        let err = "hovercraft".parse::<Profile>().unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationUnknownProfile);
    }

    #[test]
    fn test_route_query_requires_two_waypoints() {
        let single = vec![Waypoint::from([8.68, 49.41])];
        let err = RouteQuery::new(single, Profile::DrivingCar).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationTooFewWaypoints);
    }
}
