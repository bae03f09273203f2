//! Itinerary store
//!
//! Holds exactly one trip per active viewing/editing session and is the
//! single source of truth the UI reads from. Published snapshots are
//! immutable (`Arc<Trip>`); every mutation is copy-then-mutate-then-publish,
//! so a snapshot handed to the UI never changes underneath it.

use crate::error::{EngineError, EngineResult};
use lakbay_shared::{recompute_progress, Trip};
use std::sync::Arc;
use tracing::debug;

/// Single-session owner of the in-memory trip copy
#[derive(Default)]
pub struct ItineraryStore {
    current: Option<Arc<Trip>>,
}

impl ItineraryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the held trip wholesale after a fetch or a confirmed full
    /// update. Progress is always re-derived before publishing, so a
    /// malformed server payload can never park inconsistent counters.
    pub fn load(&mut self, mut trip: Trip) -> Arc<Trip> {
        recompute_progress(&mut trip);
        debug!(
            trip_id = %trip.id,
            planned = trip.progress.planned_activities,
            completed = trip.progress.completed_activities,
            "loaded trip into store"
        );
        let snapshot = Arc::new(trip);
        self.current = Some(Arc::clone(&snapshot));
        snapshot
    }

    /// Reconciliation overwrite with an authoritative server response.
    /// Same derivation rules as [`load`](Self::load); the distinct name
    /// keeps call sites honest about why the copy is being swapped.
    pub fn replace(&mut self, trip: Trip) -> Arc<Trip> {
        self.load(trip)
    }

    /// Optimistically mark one activity completed and publish a new
    /// snapshot with re-derived progress.
    ///
    /// No-ops (returning the current snapshot) when the activity is already
    /// completed: the complete transition is one-directional on this path,
    /// and only a full-trip edit may set `is_completed` back to `false`.
    pub fn apply_local_toggle(
        &mut self,
        day_index: usize,
        activity_index: usize,
    ) -> EngineResult<Arc<Trip>> {
        let current = self.current.as_ref().ok_or(EngineError::NotLoaded)?;

        if current
            .activity(day_index, activity_index)
            .ok_or(EngineError::Addressing {
                day_index,
                activity_index,
            })?
            .is_completed
        {
            return Ok(Arc::clone(current));
        }

        let mut next = Trip::clone(current);
        // Checked above; the clone has the same shape.
        if let Some(activity) = next.activity_mut(day_index, activity_index) {
            activity.is_completed = true;
        }
        recompute_progress(&mut next);
        debug!(
            trip_id = %next.id,
            day_index,
            activity_index,
            completed = next.progress.completed_activities,
            "applied local completion toggle"
        );

        let snapshot = Arc::new(next);
        self.current = Some(Arc::clone(&snapshot));
        Ok(snapshot)
    }

    /// Current published snapshot, if a trip is loaded
    pub fn snapshot(&self) -> Option<Arc<Trip>> {
        self.current.clone()
    }

    pub fn is_loaded(&self) -> bool {
        self.current.is_some()
    }

    /// Discard the session's copy (view teardown)
    pub fn clear(&mut self) {
        self.current = None;
    }
}
