use chrono::{Duration, NaiveDate};
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;

use shared::models::{
    CleanStatus, CustomerCreate, ReservationCreate, ReservationStatus, ReservationUpdate,
    RoomCreate, RoomStatus,
};

use super::*;
use crate::db::repository::{customer, reservation, room};

async fn test_pool() -> SqlitePool {
    // Single connection: an in-memory database exists per connection
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory database");
    sqlx::query("PRAGMA foreign_keys = ON;")
        .execute(&pool)
        .await
        .expect("enable foreign keys");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("apply migrations");
    pool
}

fn day(offset: i64) -> NaiveDate {
    chrono::Utc::now().date_naive() + Duration::days(offset)
}

async fn seed_room(pool: &SqlitePool, room_number: i64, price: f64) {
    room::create(
        pool,
        RoomCreate {
            room_number,
            room_type: "Standard".to_string(),
            price,
            clean_status: None,
        },
    )
    .await
    .expect("seed room");
}

async fn seed_customer(pool: &SqlitePool, name: &str, id_card: &str) -> i64 {
    customer::create(
        pool,
        CustomerCreate {
            name: name.to_string(),
            contact: "555-0100".to_string(),
            id_card: id_card.to_string(),
        },
    )
    .await
    .expect("seed customer")
    .customer_id
}

async fn room_status(pool: &SqlitePool, room_number: i64) -> (RoomStatus, CleanStatus) {
    let r = room::find_by_number(pool, room_number)
        .await
        .expect("query room")
        .expect("room exists");
    (r.status, r.clean_status)
}

fn booking(room_number: i64, customer_id: i64, from: i64, to: i64) -> ReservationCreate {
    ReservationCreate {
        room_number,
        customer_id,
        check_in_date: day(from),
        check_out_date: day(to),
    }
}

#[tokio::test]
async fn create_reservation_marks_room_reserved() {
    let pool = test_pool().await;
    seed_room(&pool, 101, 300.0).await;
    let guest = seed_customer(&pool, "Alice", "G-001").await;

    let created = create_reservation(&pool, booking(101, guest, 1, 3))
        .await
        .expect("create reservation");
    assert_eq!(created.status, ReservationStatus::Reserved);
    assert_eq!(room_status(&pool, 101).await.0, RoomStatus::Reserved);

    // The identical interval immediately conflicts
    let availability = check_availability(&pool, 101, day(1), day(3), None)
        .await
        .expect("availability check");
    assert!(matches!(availability, Availability::Conflict { .. }));
}

#[tokio::test]
async fn overlapping_booking_is_rejected_but_boundary_touch_is_not() {
    let pool = test_pool().await;
    seed_room(&pool, 101, 300.0).await;
    let alice = seed_customer(&pool, "Alice", "G-001").await;
    let bob = seed_customer(&pool, "Bob", "G-002").await;

    create_reservation(&pool, booking(101, alice, 1, 3))
        .await
        .expect("first booking");

    // [2, 4) overlaps [1, 3)
    let err = create_reservation(&pool, booking(101, bob, 2, 4))
        .await
        .expect_err("overlap must fail");
    assert!(matches!(err, BookingError::Conflict(_)));

    // [3, 5) touches the boundary: half-open intervals do not overlap
    let availability = check_availability(&pool, 101, day(3), day(5), None)
        .await
        .expect("availability check");
    assert_eq!(availability, Availability::Available);
    create_reservation(&pool, booking(101, bob, 3, 5))
        .await
        .expect("boundary booking succeeds");
}

#[tokio::test]
async fn no_two_active_rows_ever_overlap() {
    let pool = test_pool().await;
    seed_room(&pool, 101, 300.0).await;
    let alice = seed_customer(&pool, "Alice", "G-001").await;
    let bob = seed_customer(&pool, "Bob", "G-002").await;

    create_reservation(&pool, booking(101, alice, 1, 4)).await.unwrap();
    let _ = create_reservation(&pool, booking(101, bob, 2, 6)).await;
    let _ = create_reservation(&pool, booking(101, bob, 3, 5)).await;
    create_reservation(&pool, booking(101, bob, 4, 6)).await.unwrap();

    let active = reservation::find_active_by_room(&pool, 101).await.unwrap();
    for a in &active {
        for b in &active {
            if a.reservation_id == b.reservation_id {
                continue;
            }
            let overlap =
                a.check_in_date < b.check_out_date && b.check_in_date < a.check_out_date;
            assert!(
                !overlap,
                "reservations {} and {} overlap",
                a.reservation_id, b.reservation_id
            );
        }
    }
}

#[tokio::test]
async fn create_validates_room_customer_and_dates() {
    let pool = test_pool().await;
    seed_room(&pool, 101, 300.0).await;
    let guest = seed_customer(&pool, "Alice", "G-001").await;

    let err = create_reservation(&pool, booking(404, guest, 1, 3))
        .await
        .expect_err("unknown room");
    assert!(matches!(err, BookingError::RoomNotFound(404)));

    let err = create_reservation(&pool, booking(101, 999, 1, 3))
        .await
        .expect_err("unknown customer");
    assert!(matches!(err, BookingError::CustomerNotFound(999)));

    let err = create_reservation(&pool, booking(101, guest, 3, 3))
        .await
        .expect_err("empty range");
    assert!(matches!(err, BookingError::DateRangeInvalid { .. }));

    // Nothing was written along the failed paths
    let active = reservation::find_active_by_room(&pool, 101).await.unwrap();
    assert!(active.is_empty());
    assert_eq!(room_status(&pool, 101).await.0, RoomStatus::Vacant);
}

#[tokio::test]
async fn cancel_releases_room_only_when_nothing_else_holds_it() {
    let pool = test_pool().await;
    seed_room(&pool, 101, 300.0).await;
    let alice = seed_customer(&pool, "Alice", "G-001").await;
    let bob = seed_customer(&pool, "Bob", "G-002").await;

    let first = create_reservation(&pool, booking(101, alice, 1, 3)).await.unwrap();
    let second = create_reservation(&pool, booking(101, bob, 3, 5)).await.unwrap();

    let cancelled = cancel_reservation(&pool, first.reservation_id).await.unwrap();
    assert_eq!(cancelled.status, ReservationStatus::Cancelled);
    // Bob still holds the room
    assert_eq!(room_status(&pool, 101).await.0, RoomStatus::Reserved);

    cancel_reservation(&pool, second.reservation_id).await.unwrap();
    assert_eq!(room_status(&pool, 101).await.0, RoomStatus::Vacant);
}

#[tokio::test]
async fn cancel_rejects_terminal_and_checked_in_rows() {
    let pool = test_pool().await;
    seed_room(&pool, 101, 300.0).await;
    let guest = seed_customer(&pool, "Alice", "G-001").await;

    let r = create_reservation(&pool, booking(101, guest, 1, 3)).await.unwrap();
    cancel_reservation(&pool, r.reservation_id).await.unwrap();
    let err = cancel_reservation(&pool, r.reservation_id)
        .await
        .expect_err("double cancel");
    assert!(matches!(
        err,
        BookingError::InvalidTransition {
            from: ReservationStatus::Cancelled,
            ..
        }
    ));

    let r2 = create_reservation(&pool, booking(101, guest, 1, 3)).await.unwrap();
    check_in(&pool, 101, guest).await.unwrap();
    let err = cancel_reservation(&pool, r2.reservation_id)
        .await
        .expect_err("cancel after check-in");
    assert!(matches!(
        err,
        BookingError::InvalidTransition {
            from: ReservationStatus::CheckedIn,
            ..
        }
    ));

    let err = cancel_reservation(&pool, 12345)
        .await
        .expect_err("unknown reservation");
    assert!(matches!(err, BookingError::ReservationNotFound(12345)));
}

#[tokio::test]
async fn check_in_requires_the_exact_room_customer_pair() {
    let pool = test_pool().await;
    seed_room(&pool, 101, 300.0).await;
    let alice = seed_customer(&pool, "Alice", "G-001").await;
    let bob = seed_customer(&pool, "Bob", "G-002").await;

    create_reservation(&pool, booking(101, alice, 1, 3)).await.unwrap();

    // The room has an active reservation, but not for Bob
    let err = check_in(&pool, 101, bob).await.expect_err("wrong customer");
    assert!(matches!(
        err,
        BookingError::NoMatchingReservation {
            room_number: 101,
            ..
        }
    ));

    let checked_in = check_in(&pool, 101, alice).await.expect("check in");
    assert_eq!(checked_in.status, ReservationStatus::CheckedIn);
    assert_eq!(room_status(&pool, 101).await.0, RoomStatus::Occupied);

    // Occupied iff exactly one CheckedIn row
    let active = reservation::find_active_by_room(&pool, 101).await.unwrap();
    let checked_in_rows = active
        .iter()
        .filter(|r| r.status == ReservationStatus::CheckedIn)
        .count();
    assert_eq!(checked_in_rows, 1);
}

#[tokio::test]
async fn check_out_requires_an_occupied_room() {
    let pool = test_pool().await;
    seed_room(&pool, 101, 300.0).await;
    let guest = seed_customer(&pool, "Alice", "G-001").await;

    let err = check_out(&pool, 101).await.expect_err("vacant room");
    assert!(matches!(err, BookingError::RoomNotOccupied(101)));

    create_reservation(&pool, booking(101, guest, 1, 3)).await.unwrap();
    let err = check_out(&pool, 101).await.expect_err("reserved-only room");
    assert!(matches!(err, BookingError::RoomNotOccupied(101)));

    let err = check_out(&pool, 404).await.expect_err("unknown room");
    assert!(matches!(err, BookingError::RoomNotFound(404)));
}

#[tokio::test]
async fn checkout_charges_price_times_nights_and_releases_the_room() {
    let pool = test_pool().await;
    seed_room(&pool, 101, 300.0).await;
    let guest = seed_customer(&pool, "Alice", "G-001").await;

    // Two nights at 300
    create_reservation(&pool, booking(101, guest, 0, 2)).await.unwrap();
    check_in(&pool, 101, guest).await.unwrap();
    let receipt = check_out(&pool, 101).await.expect("check out");

    assert_eq!(receipt.nights, 2);
    assert_eq!(receipt.charge.amount, 600.0);
    assert_eq!(
        receipt.charge.reservation_id,
        Some(receipt.reservation.reservation_id)
    );
    assert_eq!(receipt.reservation.status, ReservationStatus::Completed);

    let (status, clean) = room_status(&pool, 101).await;
    assert_eq!(status, RoomStatus::Vacant);
    assert_eq!(clean, CleanStatus::Dirty);

    // One loyalty point per whole currency unit of the charge
    let c = customer::find_by_id(&pool, guest).await.unwrap().unwrap();
    assert_eq!(c.points, 600);

    // Checking out twice fails: the ledger no longer holds the room
    let err = check_out(&pool, 101).await.expect_err("already checked out");
    assert!(matches!(err, BookingError::RoomNotOccupied(101)));
}

#[tokio::test]
async fn checkout_keeps_room_reserved_for_upcoming_bookings() {
    let pool = test_pool().await;
    seed_room(&pool, 101, 300.0).await;
    let alice = seed_customer(&pool, "Alice", "G-001").await;
    let bob = seed_customer(&pool, "Bob", "G-002").await;

    create_reservation(&pool, booking(101, alice, 0, 2)).await.unwrap();
    create_reservation(&pool, booking(101, bob, 5, 7)).await.unwrap();
    check_in(&pool, 101, alice).await.unwrap();
    check_out(&pool, 101).await.unwrap();

    // Bob's upcoming stay still holds the room
    assert_eq!(room_status(&pool, 101).await.0, RoomStatus::Reserved);
}

#[tokio::test]
async fn modifying_a_reservation_excludes_itself_from_the_overlap_scan() {
    let pool = test_pool().await;
    seed_room(&pool, 101, 300.0).await;
    seed_room(&pool, 102, 260.0).await;
    let alice = seed_customer(&pool, "Alice", "G-001").await;
    let bob = seed_customer(&pool, "Bob", "G-002").await;

    let r = create_reservation(&pool, booking(101, alice, 1, 3)).await.unwrap();
    create_reservation(&pool, booking(101, bob, 5, 7)).await.unwrap();

    // Shifting within its own window would overlap itself without the
    // exclusion
    let moved = update_reservation(
        &pool,
        r.reservation_id,
        ReservationUpdate {
            room_number: None,
            customer_id: None,
            check_in_date: Some(day(2)),
            check_out_date: Some(day(4)),
        },
    )
    .await
    .expect("self-overlapping move succeeds");
    assert_eq!(moved.check_in_date, day(2));

    // Colliding with Bob still fails
    let err = update_reservation(
        &pool,
        r.reservation_id,
        ReservationUpdate {
            room_number: None,
            customer_id: None,
            check_in_date: Some(day(5)),
            check_out_date: Some(day(8)),
        },
    )
    .await
    .expect_err("overlap with another booking");
    assert!(matches!(err, BookingError::Conflict(_)));

    // Moving to another room releases the old one
    update_reservation(
        &pool,
        r.reservation_id,
        ReservationUpdate {
            room_number: Some(102),
            customer_id: None,
            check_in_date: None,
            check_out_date: None,
        },
    )
    .await
    .expect("room move");
    assert_eq!(room_status(&pool, 102).await.0, RoomStatus::Reserved);
    // Bob still holds 101
    assert_eq!(room_status(&pool, 101).await.0, RoomStatus::Reserved);

    cancel_reservation(&pool, r.reservation_id).await.unwrap();
    assert_eq!(room_status(&pool, 102).await.0, RoomStatus::Vacant);
}

#[tokio::test]
async fn modify_rejects_non_reserved_rows() {
    let pool = test_pool().await;
    seed_room(&pool, 101, 300.0).await;
    let guest = seed_customer(&pool, "Alice", "G-001").await;

    let r = create_reservation(&pool, booking(101, guest, 0, 2)).await.unwrap();
    check_in(&pool, 101, guest).await.unwrap();

    let err = update_reservation(
        &pool,
        r.reservation_id,
        ReservationUpdate {
            room_number: None,
            customer_id: None,
            check_in_date: None,
            check_out_date: Some(day(3)),
        },
    )
    .await
    .expect_err("modify after check-in");
    assert!(matches!(
        err,
        BookingError::InvalidTransition {
            from: ReservationStatus::CheckedIn,
            ..
        }
    ));
}

#[tokio::test]
async fn occupied_room_cannot_take_a_second_check_in() {
    let pool = test_pool().await;
    seed_room(&pool, 101, 300.0).await;
    let alice = seed_customer(&pool, "Alice", "G-001").await;
    let bob = seed_customer(&pool, "Bob", "G-002").await;

    create_reservation(&pool, booking(101, alice, 0, 2)).await.unwrap();
    create_reservation(&pool, booking(101, bob, 2, 4)).await.unwrap();
    check_in(&pool, 101, alice).await.unwrap();

    let err = check_in(&pool, 101, bob).await.expect_err("room occupied");
    assert!(matches!(err, BookingError::Conflict(_)));
}
