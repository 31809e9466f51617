//! Repository traits used by the API, and their PostgreSQL implementation.
//!
//! The traits speak in domain types from `where2tattoo-core`; row mapping
//! stays inside [`PgStore`]. Each trait gets a mockall mock
//! (`MockStudioRepository`, ...) for handler tests.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use eyre::Result;
use mockall::automock;
use uuid::Uuid;
use where2tattoo_core::{
    availability::taken::TakenSlotsSource,
    models::{
        artist::{Artist, CreateArtistRequest},
        booking::{Booking, BookingStatus, CreateBookingRequest},
        opening_hours::OpeningHours,
        studio::{CreateStudioRequest, Studio},
    },
    search::StudioFilter,
};

use crate::{
    repositories::{artist, booking, studio},
    DbPool,
};

#[automock]
#[async_trait]
pub trait StudioRepository: Send + Sync {
    /// `None` means the slug was claimed by a concurrent request.
    async fn create_studio(&self, slug: &str, request: &CreateStudioRequest)
        -> Result<Option<Studio>>;

    async fn get_studio_by_slug(&self, slug: &str) -> Result<Option<Studio>>;

    async fn get_studio_by_id(&self, id: Uuid) -> Result<Option<Studio>>;

    async fn search_studios(&self, filter: &StudioFilter) -> Result<Vec<Studio>>;

    async fn update_opening_hours(
        &self,
        id: Uuid,
        opening_hours: &OpeningHours,
    ) -> Result<Option<Studio>>;
}

#[automock]
#[async_trait]
pub trait ArtistRepository: Send + Sync {
    async fn create_artist(&self, studio_id: Uuid, request: &CreateArtistRequest)
        -> Result<Artist>;

    async fn get_artist_by_id(&self, id: Uuid) -> Result<Option<Artist>>;

    async fn list_artists(&self, studio_id: Uuid) -> Result<Vec<Artist>>;
}

#[automock]
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// `None` means the slot was taken by a concurrent booking.
    async fn create_booking(
        &self,
        request: &CreateBookingRequest,
        time: NaiveTime,
    ) -> Result<Option<Booking>>;

    async fn get_booking_by_id(&self, id: Uuid) -> Result<Option<Booking>>;

    async fn list_bookings_for_studio(&self, studio_id: Uuid) -> Result<Vec<Booking>>;

    async fn list_bookings_for_customer(&self, customer_id: Uuid) -> Result<Vec<Booking>>;

    /// `None` means the booking was no longer in `expected`.
    async fn update_booking_status(
        &self,
        id: Uuid,
        expected: BookingStatus,
        status: BookingStatus,
    ) -> Result<Option<Booking>>;
}

#[derive(Debug, Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StudioRepository for PgStore {
    async fn create_studio(
        &self,
        slug: &str,
        request: &CreateStudioRequest,
    ) -> Result<Option<Studio>> {
        Ok(studio::create_studio(&self.pool, slug, request)
            .await?
            .map(Into::into))
    }

    async fn get_studio_by_slug(&self, slug: &str) -> Result<Option<Studio>> {
        Ok(studio::get_studio_by_slug(&self.pool, slug)
            .await?
            .map(Into::into))
    }

    async fn get_studio_by_id(&self, id: Uuid) -> Result<Option<Studio>> {
        Ok(studio::get_studio_by_id(&self.pool, id).await?.map(Into::into))
    }

    async fn search_studios(&self, filter: &StudioFilter) -> Result<Vec<Studio>> {
        let rows = studio::search_studios(&self.pool, filter).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn update_opening_hours(
        &self,
        id: Uuid,
        opening_hours: &OpeningHours,
    ) -> Result<Option<Studio>> {
        Ok(studio::update_opening_hours(&self.pool, id, opening_hours)
            .await?
            .map(Into::into))
    }
}

#[async_trait]
impl ArtistRepository for PgStore {
    async fn create_artist(
        &self,
        studio_id: Uuid,
        request: &CreateArtistRequest,
    ) -> Result<Artist> {
        Ok(artist::create_artist(&self.pool, studio_id, request)
            .await?
            .into())
    }

    async fn get_artist_by_id(&self, id: Uuid) -> Result<Option<Artist>> {
        Ok(artist::get_artist_by_id(&self.pool, id).await?.map(Into::into))
    }

    async fn list_artists(&self, studio_id: Uuid) -> Result<Vec<Artist>> {
        let rows = artist::list_artists_by_studio_id(&self.pool, studio_id).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl BookingRepository for PgStore {
    async fn create_booking(
        &self,
        request: &CreateBookingRequest,
        time: NaiveTime,
    ) -> Result<Option<Booking>> {
        booking::create_booking(&self.pool, request, time)
            .await?
            .map(|row| row.into_booking())
            .transpose()
    }

    async fn get_booking_by_id(&self, id: Uuid) -> Result<Option<Booking>> {
        booking::get_booking_by_id(&self.pool, id)
            .await?
            .map(|row| row.into_booking())
            .transpose()
    }

    async fn list_bookings_for_studio(&self, studio_id: Uuid) -> Result<Vec<Booking>> {
        booking::list_bookings_by_studio_id(&self.pool, studio_id)
            .await?
            .into_iter()
            .map(|row| row.into_booking())
            .collect()
    }

    async fn list_bookings_for_customer(&self, customer_id: Uuid) -> Result<Vec<Booking>> {
        booking::list_bookings_by_customer_id(&self.pool, customer_id)
            .await?
            .into_iter()
            .map(|row| row.into_booking())
            .collect()
    }

    async fn update_booking_status(
        &self,
        id: Uuid,
        expected: BookingStatus,
        status: BookingStatus,
    ) -> Result<Option<Booking>> {
        booking::update_booking_status(&self.pool, id, expected, status)
            .await?
            .map(|row| row.into_booking())
            .transpose()
    }
}

#[async_trait]
impl TakenSlotsSource for PgStore {
    async fn taken_times(&self, artist_id: Uuid, date: NaiveDate) -> Result<Vec<String>> {
        booking::get_taken_times(&self.pool, artist_id, date).await
    }
}
