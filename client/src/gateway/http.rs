//! HTTP implementation of the trip mutation gateway

use crate::config::ClientConfig;
use crate::error::{EngineError, EngineResult};
use crate::gateway::TripGateway;
use async_trait::async_trait;
use lakbay_shared::{ErrorResponse, MarkCompletedResponse, Trip};
use reqwest::StatusCode;
use std::time::Duration;
use tracing::error;
use uuid::Uuid;

/// Gateway over the trip service's REST API.
///
/// Route shapes:
/// - `GET    /api/trips/{id}`
/// - `POST   /api/trips/{id}/days/{d}/activities/{a}/complete`
/// - `PUT    /api/trips/{id}`
pub struct HttpTripGateway {
    http: reqwest::Client,
    base_url: String,
}

impl HttpTripGateway {
    pub fn new(config: &ClientConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.api.timeout_secs))
            .user_agent(config.api.user_agent.clone())
            .build()?;

        Ok(Self {
            http,
            base_url: config.api.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn trip_url(&self, trip_id: Uuid) -> String {
        format!("{}/api/trips/{}", self.base_url, trip_id)
    }

    /// Pull the service's error body out of a failed response, falling back
    /// to the raw status when the body is not the expected shape.
    async fn error_message(response: reqwest::Response) -> String {
        let status = response.status();
        match response.json::<ErrorResponse>().await {
            Ok(body) => body.error.message,
            Err(_) => format!("request failed with status {status}"),
        }
    }
}

fn transient(err: reqwest::Error) -> EngineError {
    error!("trip service request failed: {err}");
    EngineError::Transient(err.into())
}

#[async_trait]
impl TripGateway for HttpTripGateway {
    async fn fetch_trip(&self, trip_id: Uuid) -> EngineResult<Trip> {
        let response = self
            .http
            .get(self.trip_url(trip_id))
            .send()
            .await
            .map_err(transient)?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(EngineError::NotFound(trip_id)),
            status if status.is_success() => response.json::<Trip>().await.map_err(transient),
            status => Err(EngineError::Transient(anyhow::anyhow!(
                "fetch failed with status {status}"
            ))),
        }
    }

    async fn mark_activity_completed(
        &self,
        trip_id: Uuid,
        day_index: usize,
        activity_index: usize,
    ) -> EngineResult<MarkCompletedResponse> {
        let url = format!(
            "{}/days/{}/activities/{}/complete",
            self.trip_url(trip_id),
            day_index,
            activity_index
        );
        let response = self.http.post(url).send().await.map_err(transient)?;

        match response.status() {
            // 404/409 here means the index no longer resolves on the
            // server's copy, not a missing trip.
            StatusCode::NOT_FOUND | StatusCode::CONFLICT => Err(EngineError::StaleIndex {
                trip_id,
                day_index,
                activity_index,
            }),
            status if status.is_success() => response
                .json::<MarkCompletedResponse>()
                .await
                .map_err(transient),
            status => Err(EngineError::Transient(anyhow::anyhow!(
                "completion failed with status {status}"
            ))),
        }
    }

    async fn update_trip(&self, trip_id: Uuid, trip: &Trip) -> EngineResult<Trip> {
        let response = self
            .http
            .put(self.trip_url(trip_id))
            .json(trip)
            .send()
            .await
            .map_err(transient)?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(EngineError::NotFound(trip_id)),
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                Err(EngineError::Validation(Self::error_message(response).await))
            }
            status if status.is_success() => response.json::<Trip>().await.map_err(transient),
            status => Err(EngineError::Transient(anyhow::anyhow!(
                "update failed with status {status}"
            ))),
        }
    }
}
