//! Data models for the Lakbay itinerary engine
//!
//! The wire format is the JSON REST contract of the trip service, which was
//! authored for a JavaScript front end: camelCase keys, lowercase enum
//! values, and free-form display strings for times, durations, and costs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Trip lifecycle status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum TripStatus {
    #[default]
    Draft,
    Planned,
    InProgress,
    Completed,
    Cancelled,
}

/// Who can see a trip
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Private,
    Shared,
    Public,
}

/// Activity category
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ActivityCategory {
    Historical,
    Food,
    Nature,
    Cultural,
    Adventure,
    Transport,
    #[default]
    Other,
}

/// Trip length in days and nights
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct TripDuration {
    pub days: u32,
    pub nights: u32,
}

/// Budget metadata as authored by the user or the AI generator.
///
/// `total` is a display string (e.g. `"₱5,000"` or `"Flexible"`) and is a
/// *target*, not a derived value. The derived actual is
/// [`crate::progress::total_cost`]; the two are exposed side by side and
/// never reconciled against each other.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub total: String,
    pub currency: String,
    #[serde(default)]
    pub per_person: bool,
    #[serde(default)]
    pub breakdown: BTreeMap<String, String>,
}

/// Geographic coordinates
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// Where an activity happens
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
}

/// Derived completion counters.
///
/// Never authored independently: every local mutation of `days` goes through
/// [`crate::progress::recompute_progress`] before the trip is published.
/// A server-sent value is only trusted as the immediate post-load snapshot.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct TripProgress {
    pub planned_activities: u32,
    pub completed_activities: u32,
    pub completion_percentage: u8,
}

/// One schedulable item within a day.
///
/// `is_completed` is the only independently authored mutable field driving
/// progress; everything else is display metadata.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub category: ActivityCategory,
    #[serde(default)]
    pub location: Location,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Display string: a currency amount like `"₱500"` or the literal `"Free"`.
    #[serde(default)]
    pub cost: String,
    #[serde(default)]
    pub is_completed: bool,
}

/// One calendar day of a trip.
///
/// `day_number` is 1-based and must equal the day's array index + 1 for the
/// lifetime of the trip; completion toggles never reorder activities.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Day {
    pub day_number: u32,
    #[serde(default)]
    pub theme: String,
    #[serde(default)]
    pub activities: Vec<Activity>,
}

/// A planned itinerary, the aggregate root of the engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    pub id: Uuid,
    /// Supplied by the auth context at creation; opaque to this engine.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<Uuid>,
    pub title: String,
    #[serde(default)]
    pub duration: TripDuration,
    #[serde(default)]
    pub budget: Budget,
    #[serde(default)]
    pub travel_dates: Option<String>,
    #[serde(default)]
    pub travelers: Option<String>,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub days: Vec<Day>,
    #[serde(default)]
    pub progress: TripProgress,
    #[serde(default)]
    pub status: TripStatus,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default)]
    pub generated_by_ai: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_model: Option<String>,
    /// Server-managed timestamps; absent on locally created drafts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Trip {
    /// Create an empty draft trip
    pub fn new(id: Uuid, title: impl Into<String>) -> Self {
        Self {
            id,
            owner_id: None,
            title: title.into(),
            duration: TripDuration::default(),
            budget: Budget::default(),
            travel_dates: None,
            travelers: None,
            interests: Vec::new(),
            days: Vec::new(),
            progress: TripProgress::default(),
            status: TripStatus::Draft,
            visibility: Visibility::Private,
            generated_by_ai: false,
            ai_prompt: None,
            ai_model: None,
            created_at: None,
            updated_at: None,
        }
    }

    /// Look up an activity by `(day_index, activity_index)`
    pub fn activity(&self, day_index: usize, activity_index: usize) -> Option<&Activity> {
        self.days.get(day_index)?.activities.get(activity_index)
    }

    /// Mutable lookup of an activity by `(day_index, activity_index)`
    pub fn activity_mut(
        &mut self,
        day_index: usize,
        activity_index: usize,
    ) -> Option<&mut Activity> {
        self.days
            .get_mut(day_index)?
            .activities
            .get_mut(activity_index)
    }

    /// Iterate over all activities across all days, in itinerary order
    pub fn all_activities(&self) -> impl Iterator<Item = &Activity> {
        self.days.iter().flat_map(|day| day.activities.iter())
    }
}
