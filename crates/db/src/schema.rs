use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Create studios table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS studios (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            slug VARCHAR(255) NOT NULL UNIQUE,
            name VARCHAR(255) NOT NULL,
            location VARCHAR(255) NOT NULL DEFAULT '',
            city VARCHAR(255) NOT NULL,
            state VARCHAR(255) NOT NULL DEFAULT '',
            address VARCHAR(255) NOT NULL DEFAULT '',
            email VARCHAR(255) NOT NULL,
            phone VARCHAR(64) NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            styles TEXT[] NOT NULL DEFAULT '{}',
            price_min INTEGER NOT NULL DEFAULT 0,
            price_max INTEGER NOT NULL DEFAULT 0,
            opening_hours JSONB NULL,
            owner_id UUID NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_price_range CHECK (price_min >= 0 AND price_max >= price_min)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create artists table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS artists (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            studio_id UUID NOT NULL REFERENCES studios(id) ON DELETE CASCADE,
            name VARCHAR(255) NOT NULL,
            bio TEXT NOT NULL DEFAULT '',
            specialty VARCHAR(255) NOT NULL DEFAULT '',
            specialties TEXT[] NOT NULL DEFAULT '{}',
            years_experience INTEGER NOT NULL DEFAULT 0,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create bookings table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS bookings (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            artist_id UUID NOT NULL REFERENCES artists(id),
            studio_id UUID NOT NULL REFERENCES studios(id),
            customer_id UUID NULL,
            date DATE NOT NULL,
            time TIME NOT NULL,
            status VARCHAR(16) NOT NULL DEFAULT 'pending',
            notes TEXT NULL,
            customer_name VARCHAR(255) NOT NULL,
            customer_email VARCHAR(255) NOT NULL,
            customer_phone VARCHAR(64) NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_status CHECK (status IN ('pending', 'confirmed', 'cancelled', 'completed'))
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Times already booked for an artist on a date, as HH:MM:SS
    sqlx::query(
        r#"
        CREATE OR REPLACE FUNCTION get_taken_times(p_artist_id UUID, p_date DATE)
        RETURNS TABLE (slot TEXT)
        LANGUAGE sql STABLE
        AS $$
            SELECT to_char(b.time, 'HH24:MI:SS') AS slot
            FROM bookings b
            WHERE b.artist_id = p_artist_id
              AND b.date = p_date
              AND b.status <> 'cancelled'
            ORDER BY b.time
        $$;
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes
    for statement in [
        "CREATE INDEX IF NOT EXISTS idx_studios_city ON studios(city)",
        "CREATE INDEX IF NOT EXISTS idx_artists_studio_id ON artists(studio_id)",
        "CREATE INDEX IF NOT EXISTS idx_bookings_studio_id ON bookings(studio_id)",
        "CREATE INDEX IF NOT EXISTS idx_bookings_customer_id ON bookings(customer_id)",
        // One live booking per artist and start time
        "CREATE UNIQUE INDEX IF NOT EXISTS idx_bookings_artist_slot \
         ON bookings(artist_id, date, time) WHERE status <> 'cancelled'",
    ] {
        sqlx::query(statement).execute(pool).await?;
    }

    info!("Database schema initialized successfully.");
    Ok(())
}
