use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;
use where2tattoo_core::{
    availability::{calendar::is_date_disabled, slots::generate_slots, taken::fetch_taken_slots},
    errors::TimeError,
    models::booking::{
        CreateBookingRequest, CreateBookingResponse, ListBookingsResponse,
        UpdateBookingStatusRequest, UpdateBookingStatusResponse,
    },
};

use crate::{
    handlers::availability::load_studio_artist, middleware::error_handling::AppError, ApiState,
};

/// Query parameters for listing bookings; exactly one must be set.
#[derive(Debug, Deserialize)]
pub struct ListBookingsQuery {
    /// Owner dashboard: all bookings of a studio
    pub studio_id: Option<Uuid>,
    /// Customer appointments page: all bookings of a customer
    pub customer_id: Option<Uuid>,
}

/// Creates a pending booking request.
///
/// Besides field validation, the requested start time must be one of the
/// slots currently offered for that artist and date.
#[axum::debug_handler]
pub async fn create_booking(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<CreateBookingResponse>), AppError> {
    let time = payload.validate()?;
    let (studio, _artist) = load_studio_artist(&state, payload.studio_id, payload.artist_id).await?;
    let opening_hours = studio.opening_hours.as_ref();

    if is_date_disabled(payload.date, Utc::now().naive_utc(), opening_hours) {
        return Err(AppError(TimeError::Validation(format!(
            "{} is not available for booking",
            payload.date
        ))));
    }

    let slot = time.format("%H:%M").to_string();
    let taken = fetch_taken_slots(
        state.taken_slots.as_ref(),
        payload.artist_id,
        payload.date,
        state.fail_mode,
    )
    .await?;
    if taken.contains(&slot) {
        return Err(AppError(TimeError::Conflict(format!(
            "{} on {} is already booked",
            slot, payload.date
        ))));
    }
    if !generate_slots(opening_hours, payload.date, &taken).contains(&slot) {
        return Err(AppError(TimeError::Validation(format!(
            "{} is not an offered slot on {}",
            slot, payload.date
        ))));
    }

    let booking = state
        .bookings
        .create_booking(&payload, time)
        .await?
        .ok_or_else(|| {
            TimeError::Conflict(format!("{} on {} is already booked", slot, payload.date))
        })?;
    info!(
        "Created booking {} for artist {} on {} at {}",
        booking.id, booking.artist_id, booking.date, booking.time
    );

    Ok((
        StatusCode::CREATED,
        Json(CreateBookingResponse {
            id: booking.id,
            status: booking.status,
            date: booking.date,
            time: booking.time,
            created_at: booking.created_at,
        }),
    ))
}

#[axum::debug_handler]
pub async fn list_bookings(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<ListBookingsQuery>,
) -> Result<Json<ListBookingsResponse>, AppError> {
    let bookings = match (query.studio_id, query.customer_id) {
        (Some(studio_id), None) => state.bookings.list_bookings_for_studio(studio_id).await?,
        (None, Some(customer_id)) => {
            state
                .bookings
                .list_bookings_for_customer(customer_id)
                .await?
        }
        _ => {
            return Err(AppError(TimeError::Validation(
                "Exactly one of studio_id or customer_id must be provided".to_string(),
            )));
        }
    };

    Ok(Json(ListBookingsResponse { bookings }))
}

/// Moves a booking to a new status (confirm, decline/cancel, complete).
#[axum::debug_handler]
pub async fn update_booking_status(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateBookingStatusRequest>,
) -> Result<Json<UpdateBookingStatusResponse>, AppError> {
    let booking = state
        .bookings
        .get_booking_by_id(id)
        .await?
        .ok_or_else(|| TimeError::NotFound(format!("Booking with ID {} not found", id)))?;

    if !booking.status.can_transition_to(payload.status) {
        return Err(AppError(TimeError::Validation(format!(
            "Cannot change booking from {} to {}",
            booking.status, payload.status
        ))));
    }

    let updated = state
        .bookings
        .update_booking_status(id, booking.status, payload.status)
        .await?
        .ok_or_else(|| {
            TimeError::Conflict(format!("Booking {} was changed by another request", id))
        })?;
    info!("Booking {} is now {}", updated.id, updated.status);

    Ok(Json(UpdateBookingStatusResponse {
        id: updated.id,
        status: updated.status,
        updated_at: Utc::now(),
    }))
}
