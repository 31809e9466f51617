//! # Studio Handlers
//!
//! Listing and search, public studio profiles, opening-hours management and
//! the artist roster.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;
use where2tattoo_core::{
    errors::TimeError,
    models::{
        artist::{Artist, CreateArtistRequest},
        studio::{
            CreateStudioRequest, GetStudioResponse, ListStudiosResponse, OpeningHoursResponse,
            Studio, UpdateOpeningHoursRequest,
        },
    },
    search::{StudioFilter, StudioSearchParams},
    slug::generate_slug,
};

use crate::{middleware::error_handling::AppError, ApiState};

/// Lists studios matching the listing page's query-string filters.
///
/// ```text
/// GET /api/studios?q=rose&style=fine-line&city=new-york&min_price=0&max_price=500
/// ```
#[axum::debug_handler]
pub async fn list_studios(
    State(state): State<Arc<ApiState>>,
    Query(params): Query<StudioSearchParams>,
) -> Result<Json<ListStudiosResponse>, AppError> {
    let filter = StudioFilter::from_params(&params)?;
    let studios = state.studios.search_studios(&filter).await?;

    Ok(Json(ListStudiosResponse { studios }))
}

#[axum::debug_handler]
pub async fn create_studio(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateStudioRequest>,
) -> Result<(StatusCode, Json<Studio>), AppError> {
    payload.validate()?;

    let location = Some(payload.location.trim()).filter(|l| !l.is_empty());
    let slug = generate_slug(&payload.name, location);
    if slug.is_empty() {
        return Err(AppError(TimeError::Validation(
            "Studio name must contain letters or digits".to_string(),
        )));
    }
    if state.studios.get_studio_by_slug(&slug).await?.is_some() {
        return Err(AppError(TimeError::Conflict(format!(
            "A studio with slug '{}' already exists",
            slug
        ))));
    }

    let studio = state
        .studios
        .create_studio(&slug, &payload)
        .await?
        .ok_or_else(|| {
            TimeError::Conflict(format!("A studio with slug '{}' already exists", slug))
        })?;
    info!("Created studio {} ({})", studio.slug, studio.id);

    Ok((StatusCode::CREATED, Json(studio)))
}

/// Public studio profile looked up by slug, with its artists.
#[axum::debug_handler]
pub async fn get_studio(
    State(state): State<Arc<ApiState>>,
    Path(slug): Path<String>,
) -> Result<Json<GetStudioResponse>, AppError> {
    let studio = state
        .studios
        .get_studio_by_slug(&slug)
        .await?
        .ok_or_else(|| TimeError::NotFound(format!("Studio '{}' not found", slug)))?;
    let artists = state.artists.list_artists(studio.id).await?;

    Ok(Json(GetStudioResponse { studio, artists }))
}

#[axum::debug_handler]
pub async fn get_opening_hours(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<OpeningHoursResponse>, AppError> {
    let studio = state
        .studios
        .get_studio_by_id(id)
        .await?
        .ok_or_else(|| TimeError::NotFound(format!("Studio with ID {} not found", id)))?;

    Ok(Json(OpeningHoursResponse {
        studio_id: studio.id,
        opening_hours: studio.opening_hours,
    }))
}

#[axum::debug_handler]
pub async fn update_opening_hours(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateOpeningHoursRequest>,
) -> Result<Json<OpeningHoursResponse>, AppError> {
    payload.opening_hours.validate()?;

    let studio = state
        .studios
        .update_opening_hours(id, &payload.opening_hours)
        .await?
        .ok_or_else(|| TimeError::NotFound(format!("Studio with ID {} not found", id)))?;
    info!("Updated opening hours for studio {}", studio.id);

    Ok(Json(OpeningHoursResponse {
        studio_id: studio.id,
        opening_hours: studio.opening_hours,
    }))
}

#[axum::debug_handler]
pub async fn create_artist(
    State(state): State<Arc<ApiState>>,
    Path(studio_id): Path<Uuid>,
    Json(payload): Json<CreateArtistRequest>,
) -> Result<(StatusCode, Json<Artist>), AppError> {
    if payload.name.trim().is_empty() {
        return Err(AppError(TimeError::Validation(
            "Artist name is required".to_string(),
        )));
    }
    if payload.years_experience < 0 {
        return Err(AppError(TimeError::Validation(
            "years_experience must not be negative".to_string(),
        )));
    }

    state
        .studios
        .get_studio_by_id(studio_id)
        .await?
        .ok_or_else(|| TimeError::NotFound(format!("Studio with ID {} not found", studio_id)))?;

    let artist = state.artists.create_artist(studio_id, &payload).await?;

    Ok((StatusCode::CREATED, Json(artist)))
}
