//! Lakbay Itinerary Engine (client side)
//!
//! Owns one trip per viewing/editing session, derives its progress
//! statistics, and keeps the local copy consistent with the remote trip
//! service across optimistic, possibly-failing network operations.

pub mod config;
pub mod controller;
pub mod error;
pub mod gateway;
pub mod store;

pub use config::ClientConfig;
pub use controller::{CompleteOutcome, CompletionController};
pub use error::EngineError;
pub use gateway::{HttpTripGateway, TripGateway};
pub use store::ItineraryStore;
