//! Wire request and response types for the trip service

use crate::models::Trip;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Minimal acknowledgment body for a narrow completion call
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CompletionAck {
    pub trip_id: Uuid,
    pub day_index: usize,
    pub activity_index: usize,
    pub completed: bool,
}

/// Response to `markActivityCompleted`.
///
/// The server may answer with either the full updated trip or a minimal
/// acknowledgment; the controller handles both, recomputing progress itself
/// when only an ack comes back. `Trip` is tried first: its required fields
/// (`title`, `days`) don't overlap with the ack's, so untagged
/// deserialization is unambiguous.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MarkCompletedResponse {
    Trip(Box<Trip>),
    Ack(CompletionAck),
}

/// Error response body from the trip service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}
