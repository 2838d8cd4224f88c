//! Showtime scheduling and seat booking through the HTTP surface.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete_auth, post_json_auth, put_json_auth, seed_admin};
use oneway_db::repositories::UserRepo;
use serde_json::json;
use sqlx::PgPool;

struct Fixture {
    app: axum::Router,
    token: String,
    admin_id: i64,
    movie_id: i64,
}

async fn fixture(pool: PgPool) -> Fixture {
    seed_admin(&pool).await;
    let admin_id = UserRepo::find_by_username(&pool, "admin")
        .await
        .unwrap()
        .expect("admin should exist")
        .id;

    let app = common::build_test_app(pool);
    let token = common::login(app.clone(), "admin", "password").await;

    let response = post_json_auth(
        app.clone(),
        "/movies",
        &token,
        json!({ "title": "Heat", "duration": 170, "genre": "Crime" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let movie_id = body_json(response).await["id"].as_i64().unwrap();

    Fixture {
        app,
        token,
        admin_id,
        movie_id,
    }
}

impl Fixture {
    async fn schedule(&self, hall: &str, showtime: &str) -> axum::response::Response {
        post_json_auth(
            self.app.clone(),
            "/showtimes",
            &self.token,
            json!({ "movie_id": self.movie_id, "showtime": showtime, "hall": hall }),
        )
        .await
    }

    async fn book(&self, showtime_id: i64, seat_number: i32) -> axum::response::Response {
        post_json_auth(
            self.app.clone(),
            "/bookings",
            &self.token,
            json!({ "user_id": self.admin_id, "showtime_id": showtime_id, "seat_number": seat_number }),
        )
        .await
    }
}

async fn created_id(response: axum::response::Response) -> i64 {
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}

async fn assert_conflict(response: axum::response::Response, code: &str) {
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], code);
}

// ---------------------------------------------------------------------------
// Showtimes
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn hall_window_is_three_hours(pool: PgPool) {
    let f = fixture(pool).await;

    let response = f.schedule("Hall 1", "2024-05-17 18:00").await;
    let first = body_json(response).await;
    assert_eq!(first["showtime"], "2024-05-17 18:00");

    assert_conflict(f.schedule("Hall 1", "2024-05-17 21:00").await, "OVERLAPPING_SHOWTIME").await;
    assert_conflict(f.schedule("Hall 1", "2024-05-17 15:00").await, "OVERLAPPING_SHOWTIME").await;

    created_id(f.schedule("Hall 1", "2024-05-17 21:01").await).await;
    created_id(f.schedule("Hall 2", "2024-05-17 18:00").await).await;
}

#[sqlx::test(migrations = "../db/migrations")]
async fn malformed_showtime_is_400(pool: PgPool) {
    let f = fixture(pool).await;

    let response = f.schedule("Hall 1", "2024-05-17T18:00:00Z").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Invalid showtime format");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn showtime_update_ignores_itself(pool: PgPool) {
    let f = fixture(pool).await;
    let id = created_id(f.schedule("Hall 1", "2024-05-17 18:00").await).await;
    let other = created_id(f.schedule("Hall 1", "2024-05-17 22:00").await).await;

    // Nudging a showtime by an hour only collides with itself.
    let response = put_json_auth(
        f.app.clone(),
        &format!("/showtimes/{id}"),
        &f.token,
        json!({ "movie_id": f.movie_id, "showtime": "2024-05-17 17:00", "hall": "Hall 1" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    // Moving it next to the other one does not.
    let response = put_json_auth(
        f.app.clone(),
        &format!("/showtimes/{id}"),
        &f.token,
        json!({ "movie_id": f.movie_id, "showtime": "2024-05-17 20:00", "hall": "Hall 1" }),
    )
    .await;
    assert_conflict(response, "OVERLAPPING_SHOWTIME").await;

    let response = delete_auth(f.app.clone(), &format!("/showtimes/{other}"), &f.token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn updating_missing_showtime_is_404(pool: PgPool) {
    let f = fixture(pool).await;

    let response = put_json_auth(
        f.app.clone(),
        "/showtimes/9999",
        &f.token,
        json!({ "movie_id": f.movie_id, "showtime": "2024-05-17 17:00", "hall": "Hall 1" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Bookings
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn seat_is_free_again_after_booking_moves(pool: PgPool) {
    let f = fixture(pool).await;
    let showtime = created_id(f.schedule("Hall 1", "2024-05-17 18:00").await).await;

    let first = created_id(f.book(showtime, 4).await).await;
    assert_conflict(f.book(showtime, 4).await, "OVERLAPPING_SEAT").await;

    let response = put_json_auth(
        f.app.clone(),
        &format!("/bookings/{first}"),
        &f.token,
        json!({ "user_id": f.admin_id, "showtime_id": showtime, "seat_number": 5 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["seat_number"], 5);

    created_id(f.book(showtime, 4).await).await;
}

#[sqlx::test(migrations = "../db/migrations")]
async fn rebooking_own_seat_on_update_is_allowed(pool: PgPool) {
    let f = fixture(pool).await;
    let showtime = created_id(f.schedule("Hall 1", "2024-05-17 18:00").await).await;
    let booking = created_id(f.book(showtime, 10).await).await;

    let response = put_json_auth(
        f.app.clone(),
        &format!("/bookings/{booking}"),
        &f.token,
        json!({ "user_id": f.admin_id, "showtime_id": showtime, "seat_number": 10 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn seat_range_is_enforced(pool: PgPool) {
    let f = fixture(pool).await;
    let showtime = created_id(f.schedule("Hall 1", "2024-05-17 18:00").await).await;

    assert_conflict(f.book(showtime, 0).await, "SEAT_NUMBER_OUT_OF_RANGE").await;
    assert_conflict(f.book(showtime, 101).await, "SEAT_NUMBER_OUT_OF_RANGE").await;
    created_id(f.book(showtime, 1).await).await;
    created_id(f.book(showtime, 100).await).await;
}

#[sqlx::test(migrations = "../db/migrations")]
async fn same_seat_other_showtime_is_fine(pool: PgPool) {
    let f = fixture(pool).await;
    let early = created_id(f.schedule("Hall 1", "2024-05-17 12:00").await).await;
    let late = created_id(f.schedule("Hall 1", "2024-05-17 18:00").await).await;

    created_id(f.book(early, 7).await).await;
    created_id(f.book(late, 7).await).await;
}

#[sqlx::test(migrations = "../db/migrations")]
async fn booking_unknown_showtime_is_400(pool: PgPool) {
    let f = fixture(pool).await;

    let response = f.book(424242, 3).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
