use crate::models::DbArtist;
use chrono::Utc;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;
use where2tattoo_core::models::artist::CreateArtistRequest;

pub async fn create_artist(
    pool: &Pool<Postgres>,
    studio_id: Uuid,
    request: &CreateArtistRequest,
) -> Result<DbArtist> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    let artist = sqlx::query_as::<_, DbArtist>(
        r#"
        INSERT INTO artists (id, studio_id, name, bio, specialty, specialties, years_experience, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING id, studio_id, name, bio, specialty, specialties, years_experience, created_at
        "#,
    )
    .bind(id)
    .bind(studio_id)
    .bind(&request.name)
    .bind(&request.bio)
    .bind(&request.specialty)
    .bind(&request.specialties)
    .bind(request.years_experience)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(artist)
}

pub async fn get_artist_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbArtist>> {
    let artist = sqlx::query_as::<_, DbArtist>(
        r#"
        SELECT id, studio_id, name, bio, specialty, specialties, years_experience, created_at
        FROM artists
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(artist)
}

pub async fn list_artists_by_studio_id(
    pool: &Pool<Postgres>,
    studio_id: Uuid,
) -> Result<Vec<DbArtist>> {
    let artists = sqlx::query_as::<_, DbArtist>(
        r#"
        SELECT id, studio_id, name, bio, specialty, specialties, years_experience, created_at
        FROM artists
        WHERE studio_id = $1
        ORDER BY name ASC
        "#,
    )
    .bind(studio_id)
    .fetch_all(pool)
    .await?;

    Ok(artists)
}
