use axum::{
    routing::{get, put},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/bookings",
            get(handlers::booking::list_bookings).post(handlers::booking::create_booking),
        )
        .route(
            "/api/bookings/:id/status",
            put(handlers::booking::update_booking_status),
        )
}
