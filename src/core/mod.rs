//! Core Module - Business Logic
//!
//! Validation of caller input, CO₂ estimates and route presentation.

pub mod emissions;
pub mod summary;
pub mod validation;

pub use emissions::*;
pub use summary::*;
pub use validation::*;
