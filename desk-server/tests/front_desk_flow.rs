//! End-to-end front desk flow against a real database file:
//! register room + guest, reserve, check in, check out, then verify the
//! ledger, the room state and the finance figures.

use chrono::Duration;

use desk_server::booking;
use desk_server::db::DbService;
use desk_server::db::repository::{customer, reservation, room, transaction, user};
use desk_server::utils::time;
use shared::models::{
    CleanStatus, CustomerCreate, ReservationCreate, ReservationStatus, RoomCreate, RoomStatus,
    TransactionCreate, UserRole,
};

async fn open_db(dir: &tempfile::TempDir) -> sqlx::SqlitePool {
    let path = dir.path().join("hotel.db");
    DbService::new(&path.to_string_lossy())
        .await
        .expect("open database")
        .pool
}

#[tokio::test]
async fn full_stay_flow_updates_ledger_room_and_finances() {
    let dir = tempfile::tempdir().expect("temp dir");
    let pool = open_db(&dir).await;

    let created_room = room::create(
        &pool,
        RoomCreate {
            room_number: 101,
            room_type: "Deluxe".to_string(),
            price: 300.0,
            clean_status: None,
        },
    )
    .await
    .expect("create room");
    assert_eq!(created_room.status, RoomStatus::Vacant);

    let guest = customer::create(
        &pool,
        CustomerCreate {
            name: "Alice".to_string(),
            contact: "555-0100".to_string(),
            id_card: "11010519491231002X".to_string(),
        },
    )
    .await
    .expect("create customer");

    let today = time::today();
    let reservation = booking::create_reservation(
        &pool,
        ReservationCreate {
            room_number: 101,
            customer_id: guest.customer_id,
            check_in_date: today,
            check_out_date: today + Duration::days(2),
        },
    )
    .await
    .expect("create reservation");
    assert_eq!(reservation.status, ReservationStatus::Reserved);

    booking::check_in(&pool, 101, guest.customer_id)
        .await
        .expect("check in");

    let receipt = booking::check_out(&pool, 101).await.expect("check out");
    assert_eq!(receipt.nights, 2);
    assert_eq!(receipt.charge.amount, 600.0);

    // Room is released and flagged for housekeeping
    let after = room::find_by_number(&pool, 101)
        .await
        .expect("query room")
        .expect("room exists");
    assert_eq!(after.status, RoomStatus::Vacant);
    assert_eq!(after.clean_status, CleanStatus::Dirty);

    // The ledger holds exactly one completed row and no active ones
    let all = reservation::find_all(&pool, None, 50, 0).await.expect("list");
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].status, ReservationStatus::Completed);
    assert!(
        reservation::find_active_by_room(&pool, 101)
            .await
            .expect("active rows")
            .is_empty()
    );

    // Finance: the stay charge plus an ad-hoc minibar charge
    transaction::create(
        &pool,
        TransactionCreate {
            reservation_id: Some(reservation.reservation_id),
            amount: 42.5,
            description: "Minibar".to_string(),
        },
    )
    .await
    .expect("ad-hoc charge");

    let summary = transaction::finance_summary(&pool, time::today())
        .await
        .expect("summary");
    assert_eq!(summary.total_income, 642.5);
    assert_eq!(summary.today_income, 642.5);
    assert_eq!(summary.reservation_count, 1);
    assert_eq!(summary.avg_income_per_reservation, 642.5);

    let daily = transaction::daily_income(&pool, time::today())
        .await
        .expect("daily");
    assert_eq!(daily.len(), 7);
    assert_eq!(daily.last().map(|d| d.amount), Some(642.5));
}

#[tokio::test]
async fn fresh_database_seeds_a_default_admin_once() {
    let dir = tempfile::tempdir().expect("temp dir");
    let pool = open_db(&dir).await;

    user::ensure_default_admin(&pool).await.expect("seed admin");
    user::ensure_default_admin(&pool).await.expect("idempotent");

    let admins = user::count_admins(&pool).await.expect("count");
    assert_eq!(admins, 1);

    let admin = user::find_by_username(&pool, "admin")
        .await
        .expect("query")
        .expect("admin exists");
    assert_eq!(admin.role, UserRole::Admin);
    assert!(
        desk_server::auth::password::verify_password(&admin.password_hash, "admin123")
            .expect("verify")
    );
}

#[tokio::test]
async fn referenced_customers_and_rooms_cannot_be_deleted() {
    let dir = tempfile::tempdir().expect("temp dir");
    let pool = open_db(&dir).await;

    room::create(
        &pool,
        RoomCreate {
            room_number: 101,
            room_type: "Standard".to_string(),
            price: 200.0,
            clean_status: None,
        },
    )
    .await
    .expect("create room");
    let guest = customer::create(
        &pool,
        CustomerCreate {
            name: "Bob".to_string(),
            contact: "555-0101".to_string(),
            id_card: "11010519491231002X".to_string(),
        },
    )
    .await
    .expect("create customer");

    let today = time::today();
    booking::create_reservation(
        &pool,
        ReservationCreate {
            room_number: 101,
            customer_id: guest.customer_id,
            check_in_date: today + Duration::days(1),
            check_out_date: today + Duration::days(3),
        },
    )
    .await
    .expect("reserve");

    let err = customer::delete(&pool, guest.customer_id)
        .await
        .expect_err("referenced customer");
    assert!(matches!(
        err,
        desk_server::db::repository::RepoError::Conflict(_)
    ));

    let err = room::delete(&pool, 101).await.expect_err("referenced room");
    assert!(matches!(
        err,
        desk_server::db::repository::RepoError::Conflict(_)
    ));
}
