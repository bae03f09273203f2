//! Lakbay Shared Library
//!
//! This crate contains the itinerary domain model and the pure derivation
//! logic shared between the client engine and any future surfaces (wasm
//! bindings, tooling). Nothing in here performs I/O or suspends.

pub mod cost;
pub mod errors;
pub mod models;
pub mod progress;
pub mod types;
pub mod validation;

// Re-export commonly used items
pub use cost::parse_cost;
pub use errors::TripValidationError;
pub use models::{
    Activity, ActivityCategory, Budget, Coordinates, Day, Location, Trip, TripDuration,
    TripProgress, TripStatus, Visibility,
};
pub use progress::{derive_progress, recompute_progress, total_cost};
pub use types::{CompletionAck, ErrorDetail, ErrorResponse, MarkCompletedResponse};
pub use validation::validate_trip;
