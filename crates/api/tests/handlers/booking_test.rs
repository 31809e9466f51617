use axum::http::StatusCode;
use chrono::{NaiveTime, Utc};
use fake::{
    faker::{internet::en::SafeEmail, name::en::Name, phone_number::en::PhoneNumber},
    Fake,
};
use mockall::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::json;
use test_log::test;
use uuid::Uuid;
use where2tattoo_core::{
    availability::taken::FailMode,
    models::{
        artist::Artist,
        booking::{
            Booking, BookingStatus, CreateBookingRequest, CreateBookingResponse,
            ListBookingsResponse, UpdateBookingStatusResponse,
        },
        opening_hours::{DaySchedule, OpeningHours},
        studio::Studio,
    },
};

use crate::test_utils::{
    artist, future_monday, future_sunday, studio, StubTakenSlots, TestContext,
};

fn morning_hours() -> OpeningHours {
    OpeningHours::new()
        .with_day("monday", DaySchedule::open("09:00", "12:00"))
        .with_day("sunday", DaySchedule::closed())
}

fn booking_request(studio: &Studio, artist: &Artist, time: &str) -> CreateBookingRequest {
    CreateBookingRequest {
        studio_id: studio.id,
        artist_id: artist.id,
        customer_id: None,
        date: future_monday(),
        time: time.to_string(),
        notes: Some("Fine line swallow".to_string()),
        customer_name: Name().fake(),
        customer_email: SafeEmail().fake(),
        customer_phone: PhoneNumber().fake(),
    }
}

fn stored_booking(request: &CreateBookingRequest, status: BookingStatus) -> Booking {
    Booking {
        id: Uuid::new_v4(),
        artist_id: request.artist_id,
        studio_id: request.studio_id,
        customer_id: request.customer_id,
        date: request.date,
        time: request.time.clone(),
        status,
        notes: request.notes.clone(),
        customer_name: request.customer_name.clone(),
        customer_email: request.customer_email.clone(),
        customer_phone: request.customer_phone.clone(),
        created_at: Utc::now(),
    }
}

/// Context with a Monday 09-12 studio and one of its artists.
fn booking_context() -> (TestContext, Studio, Artist) {
    let studio = studio(Some(morning_hours()));
    let artist = artist(studio.id);
    let mut ctx = TestContext::new();
    ctx.expect_studio_with_artist(&studio, &artist);
    (ctx, studio, artist)
}

#[test(tokio::test)]
async fn offered_slot_creates_pending_booking() {
    let (mut ctx, studio, artist) = booking_context();
    let request = booking_request(&studio, &artist, "11:00");
    let stored = stored_booking(&request, BookingStatus::Pending);
    let booking_id = stored.id;
    ctx.bookings
        .expect_create_booking()
        .withf(|_, time| *time == NaiveTime::from_hms_opt(11, 0, 0).unwrap())
        .times(1)
        .returning(move |_, _| Ok(Some(stored.clone())));

    let response = ctx.server().post("/api/bookings").json(&request).await;

    response.assert_status(StatusCode::CREATED);
    let body = response.json::<CreateBookingResponse>();
    assert_eq!(body.id, booking_id);
    assert_eq!(body.status, BookingStatus::Pending);
    assert_eq!(body.time, "11:00");
    assert_eq!(body.date, future_monday());
}

#[test(tokio::test)]
async fn already_taken_slot_is_a_conflict() {
    let (mut ctx, studio, artist) = booking_context();
    ctx.taken_slots = StubTakenSlots::Times(vec!["10:00:00".to_string()]);
    ctx.bookings.expect_create_booking().never();
    let request = booking_request(&studio, &artist, "10:00");

    let response = ctx.server().post("/api/bookings").json(&request).await;

    response.assert_status(StatusCode::CONFLICT);
}

#[test(tokio::test)]
async fn concurrent_insert_is_a_conflict() {
    let (mut ctx, studio, artist) = booking_context();
    ctx.bookings
        .expect_create_booking()
        .times(1)
        .returning(|_, _| Ok(None));
    let request = booking_request(&studio, &artist, "09:00");

    let response = ctx.server().post("/api/bookings").json(&request).await;

    response.assert_status(StatusCode::CONFLICT);
}

#[test(tokio::test)]
async fn failed_lookup_refuses_booking_when_fail_closed() {
    let (mut ctx, studio, artist) = booking_context();
    ctx.taken_slots = StubTakenSlots::Failing;
    ctx.fail_mode = FailMode::Closed;
    ctx.bookings.expect_create_booking().never();
    let request = booking_request(&studio, &artist, "10:00");

    let response = ctx.server().post("/api/bookings").json(&request).await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
}

#[test(tokio::test)]
async fn failed_lookup_still_relies_on_insert_conflict_when_fail_open() {
    let (mut ctx, studio, artist) = booking_context();
    ctx.taken_slots = StubTakenSlots::Failing;
    ctx.bookings
        .expect_create_booking()
        .withf(|_, time| *time == NaiveTime::from_hms_opt(10, 0, 0).unwrap())
        .times(1)
        .returning(|_, _| Ok(None));
    let request = booking_request(&studio, &artist, "10:00");

    let response = ctx.server().post("/api/bookings").json(&request).await;

    response.assert_status(StatusCode::CONFLICT);
}

#[rstest]
#[case::outside_opening_hours("15:00")]
#[case::closing_hour("12:00")]
#[case::not_on_the_hour("09:30")]
#[tokio::test]
async fn slot_not_offered_is_rejected(#[case] time: &str) {
    let (mut ctx, studio, artist) = booking_context();
    ctx.bookings.expect_create_booking().never();
    let request = booking_request(&studio, &artist, time);

    let response = ctx.server().post("/api/bookings").json(&request).await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[test(tokio::test)]
async fn closed_day_is_rejected() {
    let (mut ctx, studio, artist) = booking_context();
    ctx.bookings.expect_create_booking().never();
    let mut request = booking_request(&studio, &artist, "10:00");
    request.date = future_sunday();

    let response = ctx.server().post("/api/bookings").json(&request).await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[test(tokio::test)]
async fn invalid_email_is_rejected_before_any_lookup() {
    let ctx = TestContext::new();
    let studio = studio(Some(morning_hours()));
    let artist = artist(studio.id);
    let mut request = booking_request(&studio, &artist, "10:00");
    request.customer_email = "not-an-email".to_string();

    let response = ctx.server().post("/api/bookings").json(&request).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body = response.json::<serde_json::Value>();
    assert!(body["error"].as_str().unwrap().contains("not-an-email"));
}

#[test(tokio::test)]
async fn bookings_are_listed_for_a_studio() {
    let (mut ctx, studio, artist) = booking_context();
    let request = booking_request(&studio, &artist, "09:00");
    let stored = stored_booking(&request, BookingStatus::Confirmed);
    let expected = vec![stored.clone()];
    ctx.bookings
        .expect_list_bookings_for_studio()
        .with(predicate::eq(studio.id))
        .times(1)
        .returning(move |_| Ok(vec![stored.clone()]));

    let response = ctx
        .server()
        .get("/api/bookings")
        .add_query_param("studio_id", studio.id)
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<ListBookingsResponse>().bookings, expected);
}

#[test(tokio::test)]
async fn bookings_are_listed_for_a_customer() {
    let mut ctx = TestContext::new();
    let customer_id = Uuid::new_v4();
    ctx.bookings
        .expect_list_bookings_for_customer()
        .with(predicate::eq(customer_id))
        .times(1)
        .returning(|_| Ok(Vec::new()));

    let response = ctx
        .server()
        .get("/api/bookings")
        .add_query_param("customer_id", customer_id)
        .await;

    response.assert_status_ok();
    assert!(response.json::<ListBookingsResponse>().bookings.is_empty());
}

#[test(tokio::test)]
async fn listing_needs_exactly_one_filter() {
    let ctx = TestContext::new();

    let response = ctx
        .server()
        .get("/api/bookings")
        .add_query_param("studio_id", Uuid::new_v4())
        .add_query_param("customer_id", Uuid::new_v4())
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[test(tokio::test)]
async fn owner_confirms_pending_booking() {
    let (mut ctx, studio, artist) = booking_context();
    let request = booking_request(&studio, &artist, "09:00");
    let pending = stored_booking(&request, BookingStatus::Pending);
    let id = pending.id;
    let confirmed = Booking {
        status: BookingStatus::Confirmed,
        ..pending.clone()
    };
    ctx.bookings
        .expect_get_booking_by_id()
        .with(predicate::eq(id))
        .returning(move |_| Ok(Some(pending.clone())));
    ctx.bookings
        .expect_update_booking_status()
        .with(
            predicate::eq(id),
            predicate::eq(BookingStatus::Pending),
            predicate::eq(BookingStatus::Confirmed),
        )
        .times(1)
        .returning(move |_, _, _| Ok(Some(confirmed.clone())));

    let response = ctx
        .server()
        .put(&format!("/api/bookings/{}/status", id))
        .json(&json!({ "status": "confirmed" }))
        .await;

    response.assert_status_ok();
    let body = response.json::<UpdateBookingStatusResponse>();
    assert_eq!(body.id, id);
    assert_eq!(body.status, BookingStatus::Confirmed);
}

#[rstest]
#[case::reopen_cancelled(BookingStatus::Cancelled, "pending")]
#[case::complete_pending(BookingStatus::Pending, "completed")]
#[case::revive_completed(BookingStatus::Completed, "confirmed")]
#[tokio::test]
async fn invalid_transition_is_rejected(#[case] current: BookingStatus, #[case] next: &str) {
    let (mut ctx, studio, artist) = booking_context();
    let booking = stored_booking(&booking_request(&studio, &artist, "09:00"), current);
    let id = booking.id;
    ctx.bookings
        .expect_get_booking_by_id()
        .returning(move |_| Ok(Some(booking.clone())));
    ctx.bookings.expect_update_booking_status().never();

    let response = ctx
        .server()
        .put(&format!("/api/bookings/{}/status", id))
        .json(&json!({ "status": next }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[test(tokio::test)]
async fn status_change_raced_by_another_request_is_a_conflict() {
    let (mut ctx, studio, artist) = booking_context();
    let booking = stored_booking(&booking_request(&studio, &artist, "09:00"), BookingStatus::Pending);
    let id = booking.id;
    ctx.bookings
        .expect_get_booking_by_id()
        .returning(move |_| Ok(Some(booking.clone())));
    ctx.bookings
        .expect_update_booking_status()
        .returning(|_, _, _| Ok(None));

    let response = ctx
        .server()
        .put(&format!("/api/bookings/{}/status", id))
        .json(&json!({ "status": "cancelled" }))
        .await;

    response.assert_status(StatusCode::CONFLICT);
}

#[test(tokio::test)]
async fn status_of_unknown_booking_is_not_found() {
    let mut ctx = TestContext::new();
    ctx.bookings
        .expect_get_booking_by_id()
        .returning(|_| Ok(None));

    let response = ctx
        .server()
        .put(&format!("/api/bookings/{}/status", Uuid::new_v4()))
        .json(&json!({ "status": "confirmed" }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}
