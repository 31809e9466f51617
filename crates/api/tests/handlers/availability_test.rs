use axum::http::StatusCode;
use axum_test::TestResponse;
use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use test_log::test;
use uuid::Uuid;
use where2tattoo_core::{
    availability::{slots::FALLBACK_SLOTS, taken::FailMode},
    models::{
        availability::AvailabilityResponse,
        opening_hours::{DaySchedule, OpeningHours},
    },
};

use crate::test_utils::{
    artist, future_monday, future_sunday, studio, StubTakenSlots, TestContext,
};

fn short_week() -> OpeningHours {
    OpeningHours::new()
        .with_day("monday", DaySchedule::open("09:00", "12:00"))
        .with_day("sunday", DaySchedule::closed())
}

async fn request(ctx: TestContext, studio_id: Uuid, artist_id: Uuid, date: NaiveDate) -> TestResponse {
    ctx.server()
        .get("/api/availability")
        .add_query_param("studio_id", studio_id)
        .add_query_param("artist_id", artist_id)
        .add_query_param("date", date)
        .await
}

#[test(tokio::test)]
async fn booked_hours_are_removed_from_the_day() {
    let studio = studio(Some(short_week()));
    let artist = artist(studio.id);
    let mut ctx = TestContext::new();
    ctx.expect_studio_with_artist(&studio, &artist);
    ctx.taken_slots = StubTakenSlots::Times(vec!["10:00:00".to_string()]);

    let response = request(ctx, studio.id, artist.id, future_monday()).await;

    response.assert_status_ok();
    let body = response.json::<AvailabilityResponse>();
    assert_eq!(
        body,
        AvailabilityResponse {
            studio_id: studio.id,
            artist_id: artist.id,
            date: future_monday(),
            slots: vec!["09:00".to_string(), "11:00".to_string()],
            taken_slots: vec!["10:00".to_string()],
            closed: false,
            fully_booked: false,
            date_disabled: false,
        }
    );
}

#[test(tokio::test)]
async fn closed_weekday_is_disabled_and_empty() {
    let studio = studio(Some(short_week()));
    let artist = artist(studio.id);
    let mut ctx = TestContext::new();
    ctx.expect_studio_with_artist(&studio, &artist);

    let response = request(ctx, studio.id, artist.id, future_sunday()).await;

    response.assert_status_ok();
    let body = response.json::<AvailabilityResponse>();
    assert!(body.slots.is_empty());
    assert!(body.closed);
    assert!(!body.fully_booked);
    assert!(body.date_disabled);
}

#[test(tokio::test)]
async fn every_hour_taken_reports_fully_booked() {
    let studio = studio(Some(short_week()));
    let artist = artist(studio.id);
    let mut ctx = TestContext::new();
    ctx.expect_studio_with_artist(&studio, &artist);
    ctx.taken_slots = StubTakenSlots::Times(vec![
        "09:00:00".to_string(),
        "10:00:00".to_string(),
        "11:00:00".to_string(),
    ]);

    let response = request(ctx, studio.id, artist.id, future_monday()).await;

    let body = response.json::<AvailabilityResponse>();
    assert!(body.slots.is_empty());
    assert!(!body.closed);
    assert!(body.fully_booked);
    assert!(!body.date_disabled);
}

#[test(tokio::test)]
async fn studio_without_hours_gets_fallback_slots() {
    let studio = studio(None);
    let artist = artist(studio.id);
    let mut ctx = TestContext::new();
    ctx.expect_studio_with_artist(&studio, &artist);
    ctx.taken_slots = StubTakenSlots::Times(vec!["09:00:00".to_string()]);

    let response = request(ctx, studio.id, artist.id, future_sunday()).await;

    let body = response.json::<AvailabilityResponse>();
    assert_eq!(body.slots, FALLBACK_SLOTS.to_vec());
    assert_eq!(body.taken_slots, vec!["09:00"]);
    assert!(!body.date_disabled);
}

#[test(tokio::test)]
async fn failed_lookup_offers_all_slots_when_fail_open() {
    let studio = studio(Some(short_week()));
    let artist = artist(studio.id);
    let mut ctx = TestContext::new();
    ctx.expect_studio_with_artist(&studio, &artist);
    ctx.taken_slots = StubTakenSlots::Failing;

    let response = request(ctx, studio.id, artist.id, future_monday()).await;

    response.assert_status_ok();
    let body = response.json::<AvailabilityResponse>();
    assert_eq!(body.slots, vec!["09:00", "10:00", "11:00"]);
    assert!(body.taken_slots.is_empty());
}

#[test(tokio::test)]
async fn failed_lookup_is_unavailable_when_fail_closed() {
    let studio = studio(Some(short_week()));
    let artist = artist(studio.id);
    let mut ctx = TestContext::new();
    ctx.expect_studio_with_artist(&studio, &artist);
    ctx.taken_slots = StubTakenSlots::Failing;
    ctx.fail_mode = FailMode::Closed;

    let response = request(ctx, studio.id, artist.id, future_monday()).await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
}

#[test(tokio::test)]
async fn past_date_is_disabled() {
    let studio = studio(Some(short_week()));
    let artist = artist(studio.id);
    let mut ctx = TestContext::new();
    ctx.expect_studio_with_artist(&studio, &artist);
    // 2024-06-03 is a Monday
    let past_monday = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();

    let response = request(ctx, studio.id, artist.id, past_monday).await;

    let body = response.json::<AvailabilityResponse>();
    assert!(body.date_disabled);
    assert_eq!(body.slots, vec!["09:00", "10:00", "11:00"]);
}

#[test(tokio::test)]
async fn unknown_studio_is_not_found() {
    let mut ctx = TestContext::new();
    ctx.studios
        .expect_get_studio_by_id()
        .returning(|_| Ok(None));

    let response = request(ctx, Uuid::new_v4(), Uuid::new_v4(), future_monday()).await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[test(tokio::test)]
async fn artist_from_another_studio_is_not_found() {
    let studio = studio(Some(short_week()));
    let stranger = artist(Uuid::new_v4());
    let mut ctx = TestContext::new();
    ctx.expect_studio_with_artist(&studio, &stranger);

    let response = request(ctx, studio.id, stranger.id, future_monday()).await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[test(tokio::test)]
async fn missing_date_is_rejected() {
    let ctx = TestContext::new();

    let response = ctx
        .server()
        .get("/api/availability")
        .add_query_param("studio_id", Uuid::new_v4())
        .add_query_param("artist_id", Uuid::new_v4())
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}
