//! Error types for the shared itinerary domain

use thiserror::Error;

/// Validation failures for a locally constructed trip payload.
///
/// Raised only on trips the client built itself (e.g. the edit flow) before
/// they are sent to the server; authoritative server responses are never
/// validated, they are accepted and re-derived.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TripValidationError {
    #[error("trip title must not be empty")]
    EmptyTitle,

    #[error("day at index {index} has dayNumber {day_number}, expected {}", index + 1)]
    DayNumberMismatch { index: usize, day_number: u32 },

    #[error("completion percentage {0} is out of range 0..=100")]
    PercentageOutOfRange(u8),

    #[error("completed count {completed} exceeds planned count {planned}")]
    CompletedExceedsPlanned { completed: u32, planned: u32 },
}
