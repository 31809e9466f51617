use crate::models::DbStudio;
use chrono::Utc;
use eyre::Result;
use sqlx::{types::Json, Pool, Postgres, QueryBuilder};
use uuid::Uuid;
use where2tattoo_core::{
    models::{opening_hours::OpeningHours, studio::CreateStudioRequest},
    search::StudioFilter,
};

const STUDIO_COLUMNS: &str = "id, slug, name, location, city, state, address, email, phone, \
     description, styles, price_min, price_max, opening_hours, owner_id, created_at";

/// Inserts a studio. Returns `None` when `slug` is already in use.
pub async fn create_studio(
    pool: &Pool<Postgres>,
    slug: &str,
    request: &CreateStudioRequest,
) -> Result<Option<DbStudio>> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!("Creating studio: id={}, slug={}", id, slug);

    let result = sqlx::query_as::<_, DbStudio>(&format!(
        r#"
        INSERT INTO studios (id, slug, name, location, city, state, address, email, phone,
                             description, styles, price_min, price_max, opening_hours,
                             owner_id, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
        RETURNING {}
        "#,
        STUDIO_COLUMNS
    ))
    .bind(id)
    .bind(slug)
    .bind(&request.name)
    .bind(&request.location)
    .bind(&request.city)
    .bind(&request.state)
    .bind(&request.address)
    .bind(&request.email)
    .bind(&request.phone)
    .bind(&request.description)
    .bind(&request.styles)
    .bind(request.price_min)
    .bind(request.price_max)
    .bind(request.opening_hours.as_ref().map(Json))
    .bind(request.owner_id)
    .bind(now)
    .fetch_one(pool)
    .await;

    match result {
        Ok(studio) => Ok(Some(studio)),
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
            tracing::debug!("Studio slug already taken: {}", slug);
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn get_studio_by_slug(pool: &Pool<Postgres>, slug: &str) -> Result<Option<DbStudio>> {
    tracing::debug!("Getting studio by slug: {}", slug);

    let studio = sqlx::query_as::<_, DbStudio>(&format!(
        "SELECT {} FROM studios WHERE slug = $1",
        STUDIO_COLUMNS
    ))
    .bind(slug)
    .fetch_optional(pool)
    .await?;

    Ok(studio)
}

pub async fn get_studio_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbStudio>> {
    tracing::debug!("Getting studio by id: {}", id);

    let studio = sqlx::query_as::<_, DbStudio>(&format!(
        "SELECT {} FROM studios WHERE id = $1",
        STUDIO_COLUMNS
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(studio)
}

/// Lists studios matching `filter`, ordered by name.
pub async fn search_studios(pool: &Pool<Postgres>, filter: &StudioFilter) -> Result<Vec<DbStudio>> {
    let mut query = QueryBuilder::<Postgres>::new(format!(
        "SELECT {} FROM studios WHERE TRUE",
        STUDIO_COLUMNS
    ));

    if let Some(pattern) = &filter.name_pattern {
        query.push(" AND name ILIKE ").push_bind(pattern);
    }
    if let Some(style) = &filter.style {
        query
            .push(" AND EXISTS (SELECT 1 FROM unnest(styles) AS s WHERE ")
            .push("lower(regexp_replace(trim(s), '\\s+', '-', 'g')) = ")
            .push_bind(style)
            .push(")");
    }
    if let Some(city) = &filter.city {
        query
            .push(" AND lower(regexp_replace(trim(city), '\\s+', '-', 'g')) = ")
            .push_bind(city);
    }
    if let Some(min_price) = filter.min_price {
        query.push(" AND price_min >= ").push_bind(min_price);
    }
    if let Some(max_price) = filter.max_price {
        query.push(" AND price_min <= ").push_bind(max_price);
    }
    query.push(" ORDER BY name ASC");

    tracing::debug!("Searching studios: {:?}", filter);

    let studios = query.build_query_as::<DbStudio>().fetch_all(pool).await?;

    Ok(studios)
}

/// Replaces the studio's opening hours. Returns `None` when no studio has
/// `id`.
pub async fn update_opening_hours(
    pool: &Pool<Postgres>,
    id: Uuid,
    opening_hours: &OpeningHours,
) -> Result<Option<DbStudio>> {
    tracing::debug!("Updating opening hours for studio: {}", id);

    let studio = sqlx::query_as::<_, DbStudio>(&format!(
        r#"
        UPDATE studios
        SET opening_hours = $2
        WHERE id = $1
        RETURNING {}
        "#,
        STUDIO_COLUMNS
    ))
    .bind(id)
    .bind(Json(opening_hours))
    .fetch_optional(pool)
    .await?;

    Ok(studio)
}
