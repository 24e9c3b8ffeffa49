//! CO₂ estimates per vehicle type

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::models::errors::AppError;

/// Vehicle types the planner knows emission factors for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum VehicleType {
    #[default]
    Petrol,
    Diesel,
    Electric,
}

impl VehicleType {
    /// kg CO₂ per km
    pub fn co2_kg_per_km(&self) -> f64 {
        match self {
            Self::Petrol => 0.192,
            Self::Diesel => 0.171,
            Self::Electric => 0.05,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Petrol => "Petrol",
            Self::Diesel => "Diesel",
            Self::Electric => "Electric",
        }
    }

    pub fn fuel_type(&self) -> &'static str {
        match self {
            Self::Petrol => "Gasoline",
            Self::Diesel => "Diesel",
            Self::Electric => "Electricity",
        }
    }

    pub fn avg_consumption(&self) -> &'static str {
        match self {
            Self::Petrol => "6-8 L/100km",
            Self::Diesel => "5-7 L/100km",
            Self::Electric => "15-20 kWh/100km",
        }
    }

    pub fn typical_range(&self) -> &'static str {
        match self {
            Self::Petrol => "400-600 km",
            Self::Diesel => "600-800 km",
            Self::Electric => "300-500 km",
        }
    }

    pub fn all() -> &'static [VehicleType] {
        &[Self::Petrol, Self::Diesel, Self::Electric]
    }

    /// Display details for this vehicle
    pub fn info(&self) -> VehicleInfo {
        VehicleInfo {
            vehicle_type: *self,
            fuel_type: self.fuel_type(),
            avg_consumption: self.avg_consumption(),
            co2_kg_per_km: self.co2_kg_per_km(),
            typical_range: self.typical_range(),
        }
    }
}

impl FromStr for VehicleType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::all()
            .iter()
            .copied()
            .find(|v| v.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| AppError::unknown_vehicle(s))
    }
}

impl fmt::Display for VehicleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct VehicleInfo {
    pub vehicle_type: VehicleType,
    pub fuel_type: &'static str,
    pub avg_consumption: &'static str,
    pub co2_kg_per_km: f64,
    pub typical_range: &'static str,
}

/// Estimated kg CO₂ for a distance in km
pub fn calculate_emissions(distance_km: f64, vehicle: VehicleType) -> f64 {
    distance_km * vehicle.co2_kg_per_km()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::errors::ErrorCode;

    #[test]
    fn test_emission_factors() {
        assert!((calculate_emissions(10.0, VehicleType::Petrol) - 1.92).abs() < 1e-9);
        assert!((calculate_emissions(10.0, VehicleType::Diesel) - 1.71).abs() < 1e-9);
        assert!((calculate_emissions(10.0, VehicleType::Electric) - 0.5).abs() < 1e-9);
        assert_eq!(calculate_emissions(0.0, VehicleType::Petrol), 0.0);
    }

    #[test]
    fn test_vehicle_parse() {
        assert_eq!("Diesel".parse::<VehicleType>().unwrap(), VehicleType::Diesel);
        assert_eq!("electric".parse::<VehicleType>().unwrap(), VehicleType::Electric);

        let err = "Hydrogen".parse::<VehicleType>().unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationUnknownVehicle);
        assert_eq!(err.message, "Invalid vehicle type: Hydrogen");
    }

    #[test]
    fn test_vehicle_info() {
        let info = VehicleType::Electric.info();
        assert_eq!(info.fuel_type, "Electricity");
        assert_eq!(info.co2_kg_per_km, 0.05);
    }
}
