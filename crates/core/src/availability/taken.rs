use std::{collections::BTreeSet, str::FromStr};

use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::{error, warn};
use uuid::Uuid;

use crate::errors::{TimeError, TimeResult};

/// Start times (`HH:MM`) already booked for one artist on one date.
pub type TakenSlots = BTreeSet<String>;

/// Lookup of already-booked start times, implemented by the database layer.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TakenSlotsSource: Send + Sync {
    /// Raw start times for `artist_id` on `date`, formatted `HH:MM:SS`.
    async fn taken_times(&self, artist_id: Uuid, date: NaiveDate) -> eyre::Result<Vec<String>>;
}

/// What to do when taken times cannot be fetched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailMode {
    /// Treat the lookup as "nothing booked" and keep offering slots.
    #[default]
    Open,
    /// Refuse to answer until availability can be confirmed.
    Closed,
}

impl FromStr for FailMode {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "open" => Ok(FailMode::Open),
            "closed" => Ok(FailMode::Closed),
            other => Err(eyre::eyre!(
                "Unknown availability fail mode '{}', expected 'open' or 'closed'",
                other
            )),
        }
    }
}

/// Cuts `HH:MM:SS` down to `HH:MM`.
pub fn truncate_slot(raw: &str) -> String {
    raw.chars().take(5).collect()
}

pub async fn fetch_taken_slots<S>(
    source: &S,
    artist_id: Uuid,
    date: NaiveDate,
    mode: FailMode,
) -> TimeResult<TakenSlots>
where
    S: TakenSlotsSource + ?Sized,
{
    match source.taken_times(artist_id, date).await {
        Ok(rows) => Ok(rows.iter().map(|raw| truncate_slot(raw)).collect()),
        Err(err) => match mode {
            FailMode::Open => {
                warn!(
                    %artist_id,
                    %date,
                    error = %err,
                    "Failed to fetch taken slots, offering all slots"
                );
                Ok(TakenSlots::new())
            }
            FailMode::Closed => {
                error!(%artist_id, %date, error = %err, "Failed to fetch taken slots");
                Err(TimeError::Unavailable(format!(
                    "Availability for artist {} on {} could not be confirmed",
                    artist_id, date
                )))
            }
        },
    }
}
