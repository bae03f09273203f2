//! Trip Mutation Gateway
//!
//! The engine's only network boundary. The trait is the seam the
//! controller is tested against; [`HttpTripGateway`] is the production
//! implementation talking to the trip service's REST API.

use crate::error::EngineResult;
use async_trait::async_trait;
use lakbay_shared::{MarkCompletedResponse, Trip};
use std::sync::Arc;
use uuid::Uuid;

mod http;

pub use http::HttpTripGateway;

/// Remote operations on the authoritative trip copy.
///
/// `mark_activity_completed` is idempotent server-side: repeated calls after
/// a client retry must not double-apply.
#[async_trait]
pub trait TripGateway: Send + Sync {
    /// Fetch the authoritative copy of a trip
    async fn fetch_trip(&self, trip_id: Uuid) -> EngineResult<Trip>;

    /// Narrow completion call addressed by trip id + day index + activity
    /// index. The server may answer with the full updated trip or a minimal
    /// acknowledgment.
    async fn mark_activity_completed(
        &self,
        trip_id: Uuid,
        day_index: usize,
        activity_index: usize,
    ) -> EngineResult<MarkCompletedResponse>;

    /// Full-replace update. The returned trip is authoritative: the server
    /// may reject or normalize fields, and treats any client-sent progress
    /// as advisory.
    async fn update_trip(&self, trip_id: Uuid, trip: &Trip) -> EngineResult<Trip>;
}

#[async_trait]
impl<G: TripGateway + ?Sized> TripGateway for Arc<G> {
    async fn fetch_trip(&self, trip_id: Uuid) -> EngineResult<Trip> {
        (**self).fetch_trip(trip_id).await
    }

    async fn mark_activity_completed(
        &self,
        trip_id: Uuid,
        day_index: usize,
        activity_index: usize,
    ) -> EngineResult<MarkCompletedResponse> {
        (**self)
            .mark_activity_completed(trip_id, day_index, activity_index)
            .await
    }

    async fn update_trip(&self, trip_id: Uuid, trip: &Trip) -> EngineResult<Trip> {
        (**self).update_trip(trip_id, trip).await
    }
}
