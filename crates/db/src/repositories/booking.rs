use crate::models::DbBooking;
use chrono::{NaiveDate, NaiveTime, Utc};
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;
use where2tattoo_core::models::booking::{BookingStatus, CreateBookingRequest};

const BOOKING_COLUMNS: &str = "id, artist_id, studio_id, customer_id, date, time, status, notes, \
     customer_name, customer_email, customer_phone, created_at";

/// Inserts a pending booking.
///
/// Returns `None` when a live booking already holds the same artist, date
/// and time (the partial unique index rejected the insert).
pub async fn create_booking(
    pool: &Pool<Postgres>,
    request: &CreateBookingRequest,
    time: NaiveTime,
) -> Result<Option<DbBooking>> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!(
        "Creating booking: id={}, artist_id={}, date={}, time={}",
        id,
        request.artist_id,
        request.date,
        time
    );

    let result = sqlx::query_as::<_, DbBooking>(&format!(
        r#"
        INSERT INTO bookings (id, artist_id, studio_id, customer_id, date, time, status, notes,
                              customer_name, customer_email, customer_phone, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
        RETURNING {}
        "#,
        BOOKING_COLUMNS
    ))
    .bind(id)
    .bind(request.artist_id)
    .bind(request.studio_id)
    .bind(request.customer_id)
    .bind(request.date)
    .bind(time)
    .bind(BookingStatus::Pending.as_str())
    .bind(request.notes.as_deref())
    .bind(request.customer_name.trim())
    .bind(request.customer_email.trim())
    .bind(request.customer_phone.trim())
    .bind(now)
    .fetch_one(pool)
    .await;

    match result {
        Ok(booking) => Ok(Some(booking)),
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
            tracing::debug!("Booking slot already taken: artist_id={}", request.artist_id);
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn get_booking_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbBooking>> {
    let booking = sqlx::query_as::<_, DbBooking>(&format!(
        "SELECT {} FROM bookings WHERE id = $1",
        BOOKING_COLUMNS
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(booking)
}

pub async fn list_bookings_by_studio_id(
    pool: &Pool<Postgres>,
    studio_id: Uuid,
) -> Result<Vec<DbBooking>> {
    let bookings = sqlx::query_as::<_, DbBooking>(&format!(
        "SELECT {} FROM bookings WHERE studio_id = $1 ORDER BY date DESC, time DESC",
        BOOKING_COLUMNS
    ))
    .bind(studio_id)
    .fetch_all(pool)
    .await?;

    Ok(bookings)
}

pub async fn list_bookings_by_customer_id(
    pool: &Pool<Postgres>,
    customer_id: Uuid,
) -> Result<Vec<DbBooking>> {
    let bookings = sqlx::query_as::<_, DbBooking>(&format!(
        "SELECT {} FROM bookings WHERE customer_id = $1 ORDER BY date DESC, time DESC",
        BOOKING_COLUMNS
    ))
    .bind(customer_id)
    .fetch_all(pool)
    .await?;

    Ok(bookings)
}

/// Sets `status` only if the booking is still in `expected`, so two
/// concurrent transitions cannot both succeed. Returns `None` otherwise.
pub async fn update_booking_status(
    pool: &Pool<Postgres>,
    id: Uuid,
    expected: BookingStatus,
    status: BookingStatus,
) -> Result<Option<DbBooking>> {
    let booking = sqlx::query_as::<_, DbBooking>(&format!(
        r#"
        UPDATE bookings
        SET status = $3
        WHERE id = $1 AND status = $2
        RETURNING {}
        "#,
        BOOKING_COLUMNS
    ))
    .bind(id)
    .bind(expected.as_str())
    .bind(status.as_str())
    .fetch_optional(pool)
    .await?;

    Ok(booking)
}

/// Start times already booked for the artist on `date`, as `HH:MM:SS`.
pub async fn get_taken_times(
    pool: &Pool<Postgres>,
    artist_id: Uuid,
    date: NaiveDate,
) -> Result<Vec<String>> {
    let slots = sqlx::query_scalar::<_, String>("SELECT slot FROM get_taken_times($1, $2)")
        .bind(artist_id)
        .bind(date)
        .fetch_all(pool)
        .await?;

    Ok(slots)
}
