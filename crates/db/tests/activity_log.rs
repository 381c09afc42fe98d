//! Integration tests for activity log entry, listing and editing.

use assert_matches::assert_matches;
use chrono::NaiveDate;
use placement_core::filters::LogFilter;
use placement_db::models::activity_log::{CreateActivityLog, UpdateActivityLog};
use placement_db::repositories::{
    resolve, ActivityLogRepo, ActivityRepo, DomainRepo, LocationRepo, StudentRepo,
    SupervisorRepo, UnitRepo,
};
use sqlx::PgPool;

async fn new_log(pool: &PgPool, minutes: i32, on: NaiveDate) -> CreateActivityLog {
    let mut conn = pool.acquire().await.unwrap();
    CreateActivityLog {
        student_id: resolve::<StudentRepo>(&mut *conn, "Alice").await.unwrap().row.id,
        location_id: resolve::<LocationRepo>(&mut *conn, "Ward 5").await.unwrap().row.id,
        supervisor_id: resolve::<SupervisorRepo>(&mut *conn, "Dr Smith")
            .await
            .unwrap()
            .row
            .id,
        activity_id: resolve::<ActivityRepo>(&mut *conn, "Assessment")
            .await
            .unwrap()
            .row
            .id,
        domain_id: resolve::<DomainRepo>(&mut *conn, "Cardiovascular")
            .await
            .unwrap()
            .row
            .id,
        unit_id: None,
        minutes_spent: minutes,
        record_date: on,
        response_id: None,
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_and_find(pool: PgPool) {
    let input = new_log(&pool, 45, date(2023, 2, 14)).await;
    let created = ActivityLogRepo::create(&pool, &input).await.unwrap();

    assert_eq!(created.minutes_spent, 45);
    assert!(!created.is_edited);

    let found = ActivityLogRepo::find_by_id(&pool, created.id)
        .await
        .unwrap()
        .expect("log should exist");
    assert_eq!(found.record_date, date(2023, 2, 14));
    assert!(ActivityLogRepo::find_by_id(&pool, created.id + 1000)
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_marks_log_edited(pool: PgPool) {
    let input = new_log(&pool, 45, date(2023, 2, 14)).await;
    let created = ActivityLogRepo::create(&pool, &input).await.unwrap();

    let update = UpdateActivityLog {
        minutes_spent: Some(50),
        ..Default::default()
    };
    let updated = ActivityLogRepo::update(&pool, created.id, &update)
        .await
        .unwrap()
        .expect("log should exist");

    assert_eq!(updated.minutes_spent, 50);
    assert_eq!(updated.record_date, created.record_date);
    assert_eq!(updated.domain_id, created.domain_id);
    assert!(updated.is_edited);
    assert!(updated.updated_at >= created.updated_at);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_detaches_unit_only_when_null(pool: PgPool) {
    let mut input = new_log(&pool, 45, date(2023, 2, 14)).await;
    let mut conn = pool.acquire().await.unwrap();
    let unit_id = resolve::<UnitRepo>(&mut *conn, "Clinical Practice 1")
        .await
        .unwrap()
        .row
        .id;
    drop(conn);
    input.unit_id = Some(unit_id);
    let created = ActivityLogRepo::create(&pool, &input).await.unwrap();

    // Absent unit_id leaves the assignment alone.
    let update = UpdateActivityLog {
        minutes_spent: Some(50),
        ..Default::default()
    };
    let kept = ActivityLogRepo::update(&pool, created.id, &update)
        .await
        .unwrap()
        .expect("log should exist");
    assert_eq!(kept.unit_id, Some(unit_id));

    let detach = UpdateActivityLog {
        unit_id: Some(None),
        ..Default::default()
    };
    let detached = ActivityLogRepo::update(&pool, created.id, &detach)
        .await
        .unwrap()
        .expect("log should exist");
    assert_eq!(detached.unit_id, None);
    assert_eq!(detached.minutes_spent, 50);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_missing_log_returns_none(pool: PgPool) {
    let result = ActivityLogRepo::update(&pool, 999_999, &UpdateActivityLog::default())
        .await
        .unwrap();
    assert!(result.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_with_unknown_reference_violates_fk(pool: PgPool) {
    let mut input = new_log(&pool, 45, date(2023, 2, 14)).await;
    input.location_id = 999_999;

    let err = ActivityLogRepo::create(&pool, &input).await.unwrap_err();
    assert_matches!(
        err,
        sqlx::Error::Database(ref db) if db.code().as_deref() == Some("23503")
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_orders_newest_first_and_paginates(pool: PgPool) {
    for (minutes, day) in [(10, 1), (20, 3), (30, 2)] {
        let input = new_log(&pool, minutes, date(2023, 6, day)).await;
        ActivityLogRepo::create(&pool, &input).await.unwrap();
    }

    let all = ActivityLogRepo::list(&pool, &[], None, None).await.unwrap();
    let minutes: Vec<i32> = all.iter().map(|l| l.minutes_spent).collect();
    assert_eq!(minutes, vec![20, 30, 10]);

    let page = ActivityLogRepo::list(&pool, &[], Some(1), Some(1)).await.unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].minutes_spent, 30);

    // Out-of-range limits are clamped rather than rejected.
    let clamped = ActivityLogRepo::list(&pool, &[], Some(0), Some(-5)).await.unwrap();
    assert_eq!(clamped.len(), 1);
    assert_eq!(clamped[0].minutes_spent, 20);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_applies_filters(pool: PgPool) {
    let early = new_log(&pool, 10, date(2022, 11, 1)).await;
    let late = new_log(&pool, 20, date(2023, 1, 5)).await;
    ActivityLogRepo::create(&pool, &early).await.unwrap();
    ActivityLogRepo::create(&pool, &late).await.unwrap();

    let in_2023 = ActivityLogRepo::list(&pool, &[LogFilter::Year(2023)], None, None)
        .await
        .unwrap();
    assert_eq!(in_2023.len(), 1);
    assert_eq!(in_2023[0].minutes_spent, 20);

    let nobody = ActivityLogRepo::list(&pool, &[LogFilter::Student(999_999)], None, None)
        .await
        .unwrap();
    assert!(nobody.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_exists_for_response(pool: PgPool) {
    let mut input = new_log(&pool, 10, date(2023, 6, 1)).await;
    input.response_id = Some("R_abc123".to_string());
    ActivityLogRepo::create(&pool, &input).await.unwrap();

    assert!(ActivityLogRepo::exists_for_response(&pool, "R_abc123")
        .await
        .unwrap());
    assert!(!ActivityLogRepo::exists_for_response(&pool, "R_other")
        .await
        .unwrap());
}
