//! # Availability Handlers
//!
//! Answers "which hours can I still request?" for one artist on one date.
//!
//! The lookup runs in four steps:
//!
//! 1. Load the studio (for its opening hours) and check the artist works there
//! 2. Decide whether the date can be picked at all
//! 3. Fetch the artist's already-booked times, applying the configured
//!    [`FailMode`](where2tattoo_core::availability::taken::FailMode)
//! 4. Generate the hour slots and remove the booked ones
//!
//! Nothing is cached; every request recomputes from current data.

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;
use where2tattoo_core::{
    availability::{
        calendar::is_date_disabled, slots::SlotAvailability, taken::fetch_taken_slots,
    },
    errors::TimeError,
    models::{
        artist::Artist,
        availability::{AvailabilityQuery, AvailabilityResponse},
        studio::Studio,
    },
};

use crate::{middleware::error_handling::AppError, ApiState};

/// Bookable slots for an artist on a date.
///
/// ```text
/// GET /api/availability?studio_id=<uuid>&artist_id=<uuid>&date=2030-01-07
/// ```
///
/// # Errors
///
/// * `TimeError::NotFound` - unknown studio, or artist not at that studio
/// * `TimeError::Unavailable` - booked times could not be fetched and the
///   server runs fail-closed
#[axum::debug_handler]
pub async fn get_availability(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<AvailabilityResponse>, AppError> {
    let (studio, _artist) = load_studio_artist(&state, query.studio_id, query.artist_id).await?;
    let opening_hours = studio.opening_hours.as_ref();

    let date_disabled = is_date_disabled(query.date, Utc::now().naive_utc(), opening_hours);

    let taken = fetch_taken_slots(
        state.taken_slots.as_ref(),
        query.artist_id,
        query.date,
        state.fail_mode,
    )
    .await?;
    let availability = SlotAvailability::resolve(opening_hours, query.date, &taken);

    Ok(Json(AvailabilityResponse {
        studio_id: studio.id,
        artist_id: query.artist_id,
        date: query.date,
        slots: availability.slots,
        taken_slots: taken.into_iter().collect(),
        closed: availability.closed,
        fully_booked: availability.fully_booked,
        date_disabled,
    }))
}

/// Loads the studio and one of its artists, failing with `NotFound` when
/// either is missing or the artist belongs to another studio.
pub(crate) async fn load_studio_artist(
    state: &ApiState,
    studio_id: Uuid,
    artist_id: Uuid,
) -> Result<(Studio, Artist), AppError> {
    let studio = state
        .studios
        .get_studio_by_id(studio_id)
        .await?
        .ok_or_else(|| TimeError::NotFound(format!("Studio with ID {} not found", studio_id)))?;

    let artist = state
        .artists
        .get_artist_by_id(artist_id)
        .await?
        .filter(|artist| artist.studio_id == studio.id)
        .ok_or_else(|| {
            TimeError::NotFound(format!(
                "Artist with ID {} not found at studio {}",
                artist_id, studio_id
            ))
        })?;

    Ok((studio, artist))
}
