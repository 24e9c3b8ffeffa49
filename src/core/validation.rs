//! Coordinate validation
//!
//! Runs before any network I/O. Checks happen in a fixed order: count first,
//! then shape, then numeric values, then geographic bounds.

use serde_json::Value;

use crate::models::errors::{AppError, AppResult};
use crate::models::types::Waypoint;

/// Minimum number of waypoints for a directions query
pub const MIN_WAYPOINTS: usize = 2;

/// Validate typed waypoints: at least two, each finite and in bounds
pub fn validate_waypoints(waypoints: &[Waypoint]) -> AppResult<()> {
    if waypoints.len() < MIN_WAYPOINTS {
        return Err(AppError::too_few_waypoints());
    }
    for waypoint in waypoints {
        waypoint.validate()?;
    }
    Ok(())
}

/// Parse untyped JSON coordinates (`[[lon, lat], ...]`) into waypoints.
///
/// Each element must be a two-element array of numbers.
pub fn parse_waypoints(raw: &[Value]) -> AppResult<Vec<Waypoint>> {
    if raw.len() < MIN_WAYPOINTS {
        return Err(AppError::too_few_waypoints());
    }

    let mut waypoints = Vec::with_capacity(raw.len());
    for item in raw {
        let pair = match item.as_array() {
            Some(pair) if pair.len() == 2 => pair,
            _ => return Err(AppError::malformed_coordinate()),
        };
        let (lon, lat) = match (pair[0].as_f64(), pair[1].as_f64()) {
            (Some(lon), Some(lat)) => (lon, lat),
            _ => return Err(AppError::non_numeric_coordinate()),
        };
        waypoints.push(Waypoint::from([lon, lat]));
    }

    validate_waypoints(&waypoints)?;
    Ok(waypoints)
}

/// Parse the `"lat, lon"` text a user types into a waypoint.
///
/// `label` names the input in the out-of-range message ("start", "end").
pub fn parse_lat_lon(input: &str, label: &str) -> AppResult<Waypoint> {
    let parts: Vec<&str> = input.split(',').map(str::trim).collect();
    if parts.len() != 2 {
        return Err(AppError::malformed_coordinate().with_message(format!(
            "Error parsing coordinates: expected \"lat, lon\", got {:?}",
            input
        )));
    }

    let lat: f64 = parts[0].parse().map_err(|_| parse_error(parts[0]))?;
    let lon: f64 = parts[1].parse().map_err(|_| parse_error(parts[1]))?;

    if !lat.is_finite() || !lon.is_finite() {
        return Err(AppError::non_numeric_coordinate());
    }
    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
        return Err(AppError::out_of_range(format!("Invalid {} coordinates", label)));
    }

    Ok(Waypoint::from([lon, lat]))
}

fn parse_error(value: &str) -> AppError {
    AppError::non_numeric_coordinate().with_message(format!(
        "Error parsing coordinates: could not convert string to float: {:?}",
        value
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::errors::{ErrorCode, ErrorKind};
    use serde_json::json;

    #[test]
    fn test_too_few_waypoints() {
        for waypoints in [vec![], vec![Waypoint::from([8.68, 49.41])]] {
            let err = validate_waypoints(&waypoints).unwrap_err();
            assert_eq!(err.code, ErrorCode::ValidationTooFewWaypoints);
            assert_eq!(err.message, "At least two coordinates are required");
        }
    }

    #[test]
    fn test_non_finite_rejected() {
        let waypoints = vec![Waypoint::from([8.68, 49.41]), Waypoint::from([f64::INFINITY, 49.42])];
        let err = validate_waypoints(&waypoints).unwrap_err();
        assert_eq!(err.message, "Coordinates must be numeric values");
    }

    #[test]
    fn test_out_of_range_rejected() {
        let waypoints = vec![Waypoint::from([8.68, 49.41]), Waypoint::from([8.69, 95.0])];
        let err = validate_waypoints(&waypoints).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationOutOfRange);
    }

    #[test]
    fn test_parse_waypoints() {
        let raw = vec![json!([8.68, 49.41]), json!([8.69, 49.42])];
        let waypoints = parse_waypoints(&raw).unwrap();
        assert_eq!(waypoints[1], Waypoint { lon: 8.69, lat: 49.42 });
    }

    #[test]
    fn test_parse_waypoints_shape_errors() {
        let cases = [
            (vec![json!([8.68, 49.41])], "At least two coordinates are required"),
            (
                vec![json!([8.68, 49.41]), json!([8.69])],
                "Coordinates must be (longitude, latitude) tuples",
            ),
            (
                vec![json!([8.68, 49.41]), json!({"lon": 8.69, "lat": 49.42})],
                "Coordinates must be (longitude, latitude) tuples",
            ),
            (
                vec![json!([8.68, 49.41]), json!([8.69, 49.42, 110.0])],
                "Coordinates must be (longitude, latitude) tuples",
            ),
            (
                vec![json!(["8.68", 49.41]), json!([8.69, 49.42])],
                "Coordinates must be numeric values",
            ),
            (
                vec![json!([8.68, null]), json!([8.69, 49.42])],
                "Coordinates must be numeric values",
            ),
        ];

        for (raw, expected) in cases {
            let err = parse_waypoints(&raw).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Validation);
            assert_eq!(err.message, expected);
        }
    }

    #[test]
    fn test_parse_lat_lon() {
        let start = parse_lat_lon("49.41461, 8.681495", "start").unwrap();
        assert_eq!(start, Waypoint { lon: 8.681495, lat: 49.41461 });

        let err = parse_lat_lon("49.41461", "start").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(err.message.starts_with("Error parsing coordinates"));

        let err = parse_lat_lon("north, 8.68", "start").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationNonNumeric);

        let err = parse_lat_lon("91.0, 8.68", "end").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationOutOfRange);
        assert_eq!(err.message, "Invalid end coordinates");
    }
}
