use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    errors::{TimeError, TimeResult},
    models::{artist::Artist, opening_hours::OpeningHours},
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Studio {
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
    pub opening_hours: Option<OpeningHours>,
    pub owner_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateStudioRequest {
    pub name: String,
    pub location: String,
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub address: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub styles: Vec<String>,
    #[serde(default)]
    pub price_min: i32,
    #[serde(default)]
    pub price_max: i32,
    pub opening_hours: Option<OpeningHours>,
    pub owner_id: Option<Uuid>,
}

impl CreateStudioRequest {
    pub fn validate(&self) -> TimeResult<()> {
        if self.name.trim().is_empty() {
            return Err(TimeError::Validation("Studio name is required".to_string()));
        }
        if self.city.trim().is_empty() {
            return Err(TimeError::Validation("City is required".to_string()));
        }
        if self.price_min < 0 || self.price_max < self.price_min {
            return Err(TimeError::Validation(
                "Price range must satisfy 0 <= price_min <= price_max".to_string(),
            ));
        }
        if let Some(hours) = &self.opening_hours {
            hours.validate()?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetStudioResponse {
    #[serde(flatten)]
    pub studio: Studio,
    pub artists: Vec<Artist>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListStudiosResponse {
    pub studios: Vec<Studio>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateOpeningHoursRequest {
    pub opening_hours: OpeningHours,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpeningHoursResponse {
    pub studio_id: Uuid,
    pub opening_hours: Option<OpeningHours>,
}
