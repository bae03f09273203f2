//! Engine error handling
//!
//! All failure reporting for the engine is concentrated here and at the
//! gateway boundary; the cost parser and progress derivation in the shared
//! crate never raise.

use lakbay_shared::TripValidationError;
use thiserror::Error;
use uuid::Uuid;

/// Errors surfaced by the itinerary engine
#[derive(Error, Debug)]
pub enum EngineError {
    /// Invalid `(dayIndex, activityIndex)` addressing. A programmer error:
    /// never reachable through UI-driven navigation over a live snapshot.
    #[error("no activity at day {day_index}, activity {activity_index}")]
    Addressing {
        day_index: usize,
        activity_index: usize,
    },

    /// The trip id does not resolve remotely. Terminal for the current view.
    #[error("trip {0} not found")]
    NotFound(Uuid),

    /// The addressed day/activity no longer exists on the server's copy.
    #[error("activity {activity_index} of day {day_index} no longer exists on trip {trip_id}")]
    StaleIndex {
        trip_id: Uuid,
        day_index: usize,
        activity_index: usize,
    },

    /// The server rejected a full-trip update.
    #[error("trip update rejected: {0}")]
    Validation(String),

    /// The client-built payload failed local pre-flight checks.
    #[error("invalid trip payload: {0}")]
    InvalidPayload(#[from] TripValidationError),

    /// Request failed in transit; the remote copy is presumed unchanged
    /// (or only optimistically changed locally). Recoverable by retry.
    #[error("transient network error: {0}")]
    Transient(#[source] anyhow::Error),

    /// An edited trip's id does not match the trip held by the store.
    #[error("edited trip {actual} does not match loaded trip {expected}")]
    TripIdMismatch { expected: Uuid, actual: Uuid },

    /// An operation was issued before any trip was loaded.
    #[error("no trip loaded")]
    NotLoaded,
}

impl EngineError {
    /// Whether the caller may reasonably retry the operation
    pub fn is_recoverable(&self) -> bool {
        matches!(self, EngineError::Transient(_))
    }
}

/// Result type alias for engine operations
pub type EngineResult<T> = Result<T, EngineError>;
