//! Pre-flight validation for locally constructed trips
//!
//! The server revalidates everything; these checks exist to fail fast on
//! programmer errors in the edit flow before a payload goes on the wire.

use crate::errors::TripValidationError;
use crate::models::Trip;

/// Validate a trip the client is about to send as a full update
pub fn validate_trip(trip: &Trip) -> Result<(), TripValidationError> {
    if trip.title.trim().is_empty() {
        return Err(TripValidationError::EmptyTitle);
    }

    for (index, day) in trip.days.iter().enumerate() {
        if day.day_number as usize != index + 1 {
            return Err(TripValidationError::DayNumberMismatch {
                index,
                day_number: day.day_number,
            });
        }
    }

    let progress = &trip.progress;
    if progress.completion_percentage > 100 {
        return Err(TripValidationError::PercentageOutOfRange(
            progress.completion_percentage,
        ));
    }
    if progress.completed_activities > progress.planned_activities {
        return Err(TripValidationError::CompletedExceedsPlanned {
            completed: progress.completed_activities,
            planned: progress.planned_activities,
        });
    }

    Ok(())
}
