use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

// `:studio` is a slug on the profile route and an id everywhere else; the
// segment name has to match across routes sharing the prefix.
pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/studios",
            get(handlers::studio::list_studios).post(handlers::studio::create_studio),
        )
        .route("/api/studios/:studio", get(handlers::studio::get_studio))
        .route(
            "/api/studios/:studio/opening-hours",
            get(handlers::studio::get_opening_hours).put(handlers::studio::update_opening_hours),
        )
        .route(
            "/api/studios/:studio/artists",
            post(handlers::studio::create_artist),
        )
}
