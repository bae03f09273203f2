//! Activity completion controller
//!
//! Owns the per-activity completion state machine and the reconciliation
//! protocol against the trip service. The fast path marks one activity
//! completed optimistically and confirms it with a narrow gateway call; the
//! slow path sends a full edited trip and replaces the store with the
//! server's authoritative response.
//!
//! Concurrency model: interleaving async operations on one logical owner,
//! never parallel mutation. The inner state sits behind a single async
//! mutex whose guard is never held across a gateway call, so two
//! completions on *different* keys can be in flight at once; duplicates on
//! the *same* key are rejected by the per-key in-flight set.

use crate::error::{EngineError, EngineResult};
use crate::gateway::TripGateway;
use crate::store::ItineraryStore;
use lakbay_shared::{recompute_progress, validate_trip, MarkCompletedResponse, Trip};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// `(day_index, activity_index)` address of one activity
pub type ActivityKey = (usize, usize);

/// Result of a fast-path completion attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompleteOutcome {
    /// Applied locally and confirmed by the server
    Completed,
    /// The activity was already completed; idempotent no-op
    AlreadyCompleted,
    /// A request for this exact key is still outstanding; ignored
    AlreadyInFlight,
}

struct ControllerState {
    store: ItineraryStore,
    /// Bumped on every reload and teardown. A request that started under an
    /// older generation no longer owns its marker and must not touch state
    /// in phase 2.
    generation: u64,
    /// Keys with an outstanding completion request. Per-key markers, not a
    /// global lock: unrelated activities may sync concurrently.
    in_flight: HashSet<ActivityKey>,
    /// Keys completed locally whose confirmation failed. The UI must render
    /// these as "pending sync"; a successful load clears them.
    unsynced: HashSet<ActivityKey>,
}

/// Drives both completion transitions over an [`ItineraryStore`] and a
/// [`TripGateway`]
pub struct CompletionController<G: TripGateway> {
    gateway: G,
    state: Mutex<ControllerState>,
}

impl<G: TripGateway> CompletionController<G> {
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            state: Mutex::new(ControllerState {
                store: ItineraryStore::new(),
                generation: 0,
                in_flight: HashSet::new(),
                unsynced: HashSet::new(),
            }),
        }
    }

    /// Fetch a trip and make it the session's copy.
    ///
    /// This is also the full-reconciliation escape hatch: it drops all
    /// in-flight markers and unsynced keys, since the fetched copy is
    /// authoritative for everything.
    pub async fn load_trip(&self, trip_id: Uuid) -> EngineResult<Arc<Trip>> {
        let trip = self.gateway.fetch_trip(trip_id).await?;

        let mut state = self.state.lock().await;
        state.generation += 1;
        state.in_flight.clear();
        state.unsynced.clear();
        info!(%trip_id, "trip loaded and reconciled");
        Ok(state.store.load(trip))
    }

    /// Fast-path Complete transition for one activity.
    ///
    /// Applies the local flip before the network round-trip so derived
    /// counters update immediately. On gateway failure the optimistic flip
    /// is deliberately retained: the activity stays "locally completed,
    /// unsynced" and its key is reported by [`unsynced_keys`](Self::unsynced_keys)
    /// until a retry succeeds or a `load_trip` reconciles the session.
    /// Calling again on an unsynced key re-issues the confirmation call
    /// (the local flip is already in place and is not re-applied).
    pub async fn complete_activity(
        &self,
        day_index: usize,
        activity_index: usize,
    ) -> EngineResult<CompleteOutcome> {
        let key = (day_index, activity_index);

        // Phase 1 under the lock: idempotence check, in-flight marker,
        // optimistic apply. The guard is released before the gateway call.
        let (trip_id, generation) = {
            let mut state = self.state.lock().await;
            let snapshot = state.store.snapshot().ok_or(EngineError::NotLoaded)?;
            let activity =
                snapshot
                    .activity(day_index, activity_index)
                    .ok_or(EngineError::Addressing {
                        day_index,
                        activity_index,
                    })?;

            // The in-flight check runs first: once the optimistic flip is
            // applied the activity reads as completed, and a duplicate
            // trigger must still be reported as the in-flight rejection.
            if state.in_flight.contains(&key) {
                debug!(day_index, activity_index, "completion already in flight");
                return Ok(CompleteOutcome::AlreadyInFlight);
            }
            // An unsynced key looks completed locally but still needs its
            // confirmation call; only a synced completion is a no-op.
            if activity.is_completed && !state.unsynced.contains(&key) {
                return Ok(CompleteOutcome::AlreadyCompleted);
            }
            state.in_flight.insert(key);

            if let Err(err) = state.store.apply_local_toggle(day_index, activity_index) {
                state.in_flight.remove(&key);
                return Err(err);
            }
            (snapshot.id, state.generation)
        };

        let result = self
            .gateway
            .mark_activity_completed(trip_id, day_index, activity_index)
            .await;

        // Phase 2 under the lock: release the marker and reconcile, but only
        // while the session generation still matches. A reload or teardown
        // mid-flight bumps the generation and may hand this key's marker to
        // a newer request; a stale response must not release it, and must
        // not be applied over the reconciled copy.
        let mut state = self.state.lock().await;
        let session_live = state.generation == generation;
        if session_live {
            state.in_flight.remove(&key);
        }
        match result {
            Ok(MarkCompletedResponse::Trip(trip)) => {
                if session_live {
                    state.store.replace(*trip);
                    state.unsynced.remove(&key);
                }
                Ok(CompleteOutcome::Completed)
            }
            Ok(MarkCompletedResponse::Ack(_)) => {
                // Local optimistic state already matches the server.
                if session_live {
                    state.unsynced.remove(&key);
                }
                Ok(CompleteOutcome::Completed)
            }
            Err(err) => {
                if session_live {
                    state.unsynced.insert(key);
                    warn!(
                        %trip_id,
                        day_index,
                        activity_index,
                        error = %err,
                        "completion not confirmed; keeping optimistic state as unsynced"
                    );
                }
                Err(err)
            }
        }
    }

    /// Slow-path Edit transition: full-trip update.
    ///
    /// The caller builds `modified` from a cloned snapshot (published trips
    /// are never mutated in place). On success the store is replaced with
    /// the *server's* returned trip, not the local copy; on failure the
    /// store is left untouched.
    pub async fn edit_trip(&self, modified: Trip) -> EngineResult<Arc<Trip>> {
        let (trip_id, generation) = {
            let state = self.state.lock().await;
            let current = state.store.snapshot().ok_or(EngineError::NotLoaded)?;
            if current.id != modified.id {
                return Err(EngineError::TripIdMismatch {
                    expected: current.id,
                    actual: modified.id,
                });
            }
            (current.id, state.generation)
        };
        validate_trip(&modified)?;

        let mut authoritative = self.gateway.update_trip(trip_id, &modified).await?;

        let mut state = self.state.lock().await;
        if state.generation == generation {
            info!(%trip_id, "trip updated from authoritative server response");
            Ok(state.store.replace(authoritative))
        } else {
            // Session was torn down or reconciled while the update was
            // outstanding; hand the result back without applying it.
            recompute_progress(&mut authoritative);
            Ok(Arc::new(authoritative))
        }
    }

    /// Current published snapshot of the session's trip
    pub async fn snapshot(&self) -> Option<Arc<Trip>> {
        self.state.lock().await.store.snapshot()
    }

    /// Keys whose completion requests are still outstanding
    pub async fn in_flight_keys(&self) -> Vec<ActivityKey> {
        let mut keys: Vec<_> = self.state.lock().await.in_flight.iter().copied().collect();
        keys.sort_unstable();
        keys
    }

    /// Keys completed locally but not confirmed by the server — the
    /// "pending sync" indicator any UI over this engine must surface
    pub async fn unsynced_keys(&self) -> Vec<ActivityKey> {
        let mut keys: Vec<_> = self.state.lock().await.unsynced.iter().copied().collect();
        keys.sort_unstable();
        keys
    }

    /// Drop the session's copy and all markers (view teardown). Outstanding
    /// network calls are not aborted; their results are simply ignored.
    pub async fn teardown(&self) {
        let mut state = self.state.lock().await;
        state.generation += 1;
        state.store.clear();
        state.in_flight.clear();
        state.unsynced.clear();
    }
}
