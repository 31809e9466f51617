use std::{fmt, str::FromStr};

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    errors::{TimeError, TimeResult},
    models::opening_hours::parse_clock,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::Completed => "completed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, BookingStatus::Cancelled | BookingStatus::Completed)
    }

    /// Owners confirm or decline pending requests; customers may cancel
    /// anything not yet finished.
    pub fn can_transition_to(&self, next: BookingStatus) -> bool {
        matches!(
            (self, next),
            (BookingStatus::Pending, BookingStatus::Confirmed)
                | (BookingStatus::Pending, BookingStatus::Cancelled)
                | (BookingStatus::Confirmed, BookingStatus::Completed)
                | (BookingStatus::Confirmed, BookingStatus::Cancelled)
        )
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(BookingStatus::Pending),
            "confirmed" => Ok(BookingStatus::Confirmed),
            "cancelled" => Ok(BookingStatus::Cancelled),
            "completed" => Ok(BookingStatus::Completed),
            other => Err(TimeError::Validation(format!(
                "Unknown booking status '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    pub artist_id: Uuid,
    pub studio_id: Uuid,
    pub customer_id: Option<Uuid>,
    pub date: NaiveDate,
    /// Start time as `HH:MM`.
    pub time: String,
    pub status: BookingStatus,
    pub notes: Option<String>,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBookingRequest {
    pub studio_id: Uuid,
    pub artist_id: Uuid,
    pub customer_id: Option<Uuid>,
    pub date: NaiveDate,
    pub time: String,
    pub notes: Option<String>,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
}

impl CreateBookingRequest {
    /// Field-level checks that need no stored data. Returns the parsed start
    /// time on success.
    pub fn validate(&self) -> TimeResult<NaiveTime> {
        if self.customer_name.trim().is_empty() {
            return Err(TimeError::Validation("Full name is required".to_string()));
        }
        if self.customer_phone.trim().is_empty() {
            return Err(TimeError::Validation("Phone is required".to_string()));
        }
        if !is_plausible_email(self.customer_email.trim()) {
            return Err(TimeError::Validation(format!(
                "Invalid email address '{}'",
                self.customer_email
            )));
        }

        parse_clock(&self.time)
            .and_then(|(hour, minute)| NaiveTime::from_hms_opt(hour, minute, 0))
            .ok_or_else(|| {
                TimeError::Validation(format!("Invalid time '{}', expected HH:MM", self.time))
            })
    }
}

fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && domain.contains('.')
                && !domain.contains('@')
        }
        None => false,
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBookingResponse {
    pub id: Uuid,
    pub status: BookingStatus,
    pub date: NaiveDate,
    pub time: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListBookingsResponse {
    pub bookings: Vec<Booking>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateBookingStatusRequest {
    pub status: BookingStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateBookingStatusResponse {
    pub id: Uuid,
    pub status: BookingStatus,
    pub updated_at: DateTime<Utc>,
}
