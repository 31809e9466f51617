use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artist {
    pub id: Uuid,
    pub studio_id: Uuid,
    pub name: String,
    pub bio: String,
    pub specialty: String,
    pub specialties: Vec<String>,
    pub years_experience: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateArtistRequest {
    pub name: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub specialty: String,
    #[serde(default)]
    pub specialties: Vec<String>,
    #[serde(default)]
    pub years_experience: i32,
}
