//! Providers Module - External Data Sources
//!
//! Jalur data: the OpenRouteService directions API.

pub mod openrouteservice;

pub use openrouteservice::*;
