use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use eyre::Result;
use sqlx::{types::Json, FromRow};
use uuid::Uuid;
use where2tattoo_core::models::{
    artist::Artist, booking::Booking, opening_hours::OpeningHours, studio::Studio,
};

#[derive(Debug, Clone, FromRow)]
pub struct DbStudio {
    pub id: Uuid,
    pub slug: String,
    pub name: String,
    pub location: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub email: String,
    pub phone: String,
    pub description: String,
    pub styles: Vec<String>,
    pub price_min: i32,
    pub price_max: i32,
    pub opening_hours: Option<Json<OpeningHours>>,
    pub owner_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl From<DbStudio> for Studio {
    fn from(row: DbStudio) -> Self {
        Studio {
            id: row.id,
            slug: row.slug,
            name: row.name,
            location: row.location,
            city: row.city,
            state: row.state,
            address: row.address,
            email: row.email,
            phone: row.phone,
            description: row.description,
            styles: row.styles,
            price_min: row.price_min,
            price_max: row.price_max,
            opening_hours: row.opening_hours.map(|Json(hours)| hours),
            owner_id: row.owner_id,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct DbArtist {
    pub id: Uuid,
    pub studio_id: Uuid,
    pub name: String,
    pub bio: String,
    pub specialty: String,
    pub specialties: Vec<String>,
    pub years_experience: i32,
    pub created_at: DateTime<Utc>,
}

impl From<DbArtist> for Artist {
    fn from(row: DbArtist) -> Self {
        Artist {
            id: row.id,
            studio_id: row.studio_id,
            name: row.name,
            bio: row.bio,
            specialty: row.specialty,
            specialties: row.specialties,
            years_experience: row.years_experience,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct DbBooking {
    pub id: Uuid,
    pub artist_id: Uuid,
    pub studio_id: Uuid,
    pub customer_id: Option<Uuid>,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub status: String,
    pub notes: Option<String>,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub created_at: DateTime<Utc>,
}

impl DbBooking {
    pub fn into_booking(self) -> Result<Booking> {
        let status = self
            .status
            .parse()
            .map_err(|e| eyre::eyre!("Booking {} has invalid status: {}", self.id, e))?;

        Ok(Booking {
            id: self.id,
            artist_id: self.artist_id,
            studio_id: self.studio_id,
            customer_id: self.customer_id,
            date: self.date,
            time: self.time.format("%H:%M").to_string(),
            status,
            notes: self.notes,
            customer_name: self.customer_name,
            customer_email: self.customer_email,
            customer_phone: self.customer_phone,
            created_at: self.created_at,
        })
    }
}
