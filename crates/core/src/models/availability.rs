use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityQuery {
    pub studio_id: Uuid,
    pub artist_id: Uuid,
    pub date: NaiveDate,
}

/// Bookable slots for one (artist, date) pair.
///
/// `closed` and `fully_booked` both imply an empty `slots` list; they tell the
/// booking form which message to show.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityResponse {
    pub studio_id: Uuid,
    pub artist_id: Uuid,
    pub date: NaiveDate,
    pub slots: Vec<String>,
    pub taken_slots: Vec<String>,
    pub closed: bool,
    pub fully_booked: bool,
    pub date_disabled: bool,
}
