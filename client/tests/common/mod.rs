//! Shared test fixtures and a scripted gateway for controller tests
#![allow(dead_code)]

use anyhow::anyhow;
use async_trait::async_trait;
use lakbay_client::error::{EngineError, EngineResult};
use lakbay_client::gateway::TripGateway;
use lakbay_shared::{
    recompute_progress, Activity, CompletionAck, Day, MarkCompletedResponse, Trip,
};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;
use uuid::Uuid;

pub type Key = (usize, usize);

/// The two-day trip from the product scenario: day 1 has ₱500 + Free,
/// day 2 has ₱1,200; nothing completed. Total cost 1700.
pub fn sample_trip(trip_id: Uuid) -> Trip {
    let activity = |name: &str, cost: &str| Activity {
        name: name.to_string(),
        cost: cost.to_string(),
        ..Activity::default()
    };

    let mut trip = Trip::new(trip_id, "Ilocos Heritage Run");
    trip.budget.total = "₱8,000".to_string();
    trip.budget.currency = "₱".to_string();
    trip.days = vec![
        Day {
            day_number: 1,
            theme: "Vigan".to_string(),
            activities: vec![
                activity("Calle Crisologo walk", "₱500"),
                activity("Plaza Salcedo lights", "Free"),
            ],
        },
        Day {
            day_number: 2,
            theme: "Laoag".to_string(),
            activities: vec![activity("Sand dunes 4x4", "₱1,200")],
        },
    ];
    trip
}

/// In-memory gateway with scriptable response ordering and failures.
///
/// Tests can gate a key behind a [`Notify`] to hold its completion request
/// in flight, mark keys as failing, and choose between ack and full-trip
/// success bodies. The authoritative copies live in `trips`, mutated the
/// way the real service would (idempotent completion, normalize-on-update).
#[derive(Default)]
pub struct ScriptedGateway {
    trips: Mutex<HashMap<Uuid, Trip>>,
    gates: Mutex<HashMap<Key, Arc<Notify>>>,
    failing: Mutex<HashSet<Key>>,
    trip_responses: Mutex<HashSet<Key>>,
    fail_update: Mutex<bool>,
    pub mark_calls: Mutex<Vec<Key>>,
    pub update_calls: Mutex<u32>,
}

impl ScriptedGateway {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn insert_trip(&self, trip: Trip) {
        self.trips.lock().unwrap().insert(trip.id, trip);
    }

    pub fn server_trip(&self, trip_id: Uuid) -> Option<Trip> {
        self.trips.lock().unwrap().get(&trip_id).cloned()
    }

    /// Hold this key's completion request until the returned handle is
    /// notified
    pub fn gate_key(&self, key: Key) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.gates.lock().unwrap().insert(key, Arc::clone(&gate));
        gate
    }

    pub fn fail_key(&self, key: Key) {
        self.failing.lock().unwrap().insert(key);
    }

    pub fn clear_failure(&self, key: Key) {
        self.failing.lock().unwrap().remove(&key);
    }

    /// Respond to this key's completion with the full updated trip instead
    /// of a minimal ack
    pub fn respond_with_trip(&self, key: Key) {
        self.trip_responses.lock().unwrap().insert(key);
    }

    pub fn fail_next_update(&self) {
        *self.fail_update.lock().unwrap() = true;
    }

    pub fn mark_call_count(&self) -> usize {
        self.mark_calls.lock().unwrap().len()
    }
}

#[async_trait]
impl TripGateway for ScriptedGateway {
    async fn fetch_trip(&self, trip_id: Uuid) -> EngineResult<Trip> {
        self.trips
            .lock()
            .unwrap()
            .get(&trip_id)
            .cloned()
            .ok_or(EngineError::NotFound(trip_id))
    }

    async fn mark_activity_completed(
        &self,
        trip_id: Uuid,
        day_index: usize,
        activity_index: usize,
    ) -> EngineResult<MarkCompletedResponse> {
        let key = (day_index, activity_index);
        self.mark_calls.lock().unwrap().push(key);

        let gate = self.gates.lock().unwrap().get(&key).cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        if self.failing.lock().unwrap().contains(&key) {
            return Err(EngineError::Transient(anyhow!("scripted network failure")));
        }

        let mut trips = self.trips.lock().unwrap();
        let trip = trips
            .get_mut(&trip_id)
            .ok_or(EngineError::NotFound(trip_id))?;
        match trip.activity_mut(day_index, activity_index) {
            Some(activity) => activity.is_completed = true,
            None => {
                return Err(EngineError::StaleIndex {
                    trip_id,
                    day_index,
                    activity_index,
                })
            }
        }
        recompute_progress(trip);

        if self.trip_responses.lock().unwrap().contains(&key) {
            Ok(MarkCompletedResponse::Trip(Box::new(trip.clone())))
        } else {
            Ok(MarkCompletedResponse::Ack(CompletionAck {
                trip_id,
                day_index,
                activity_index,
                completed: true,
            }))
        }
    }

    async fn update_trip(&self, trip_id: Uuid, trip: &Trip) -> EngineResult<Trip> {
        *self.update_calls.lock().unwrap() += 1;

        if std::mem::take(&mut *self.fail_update.lock().unwrap()) {
            return Err(EngineError::Validation(
                "trip rejected by scripted server".to_string(),
            ));
        }

        let mut trips = self.trips.lock().unwrap();
        if !trips.contains_key(&trip_id) {
            return Err(EngineError::NotFound(trip_id));
        }

        // Server-side normalization: trim the title, recompute progress
        // (client-sent counters are advisory only).
        let mut stored = trip.clone();
        stored.id = trip_id;
        stored.title = stored.title.trim().to_string();
        recompute_progress(&mut stored);
        trips.insert(trip_id, stored.clone());
        Ok(stored)
    }
}

/// Spin until the controller reports the key in flight, yielding to let the
/// spawned request reach its gate.
pub async fn wait_in_flight<G: TripGateway>(
    controller: &lakbay_client::CompletionController<G>,
    key: Key,
) {
    for _ in 0..1000 {
        if controller.in_flight_keys().await.contains(&key) {
            return;
        }
        tokio::task::yield_now().await;
    }
    panic!("key {key:?} never became in-flight");
}
