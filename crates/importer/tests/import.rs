//! Integration tests for the survey importer.

use chrono::NaiveDate;
use placement_core::survey::{
    SurveyDefinition, SurveyExport, CATEGORY_QUESTION, DOMAIN_QUESTION, LOCATION_QUESTION,
    LOG_COUNT_QUESTION, MINUTES_QUESTION, SERVICE_DATE_QUESTION, STUDENT_NAME_QUESTION,
    SUPERVISOR_QUESTION,
};
use placement_db::models::supervisor::CreateSupervisor;
use placement_db::repositories::{
    ActivityLogRepo, ActivityRepo, DomainRepo, StudentRepo, SupervisorRepo, UnitRepo,
};
use placement_import::{run_import, ImportOptions, ImportSummary};
use serde_json::{json, Value};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

fn definition() -> SurveyDefinition {
    serde_json::from_value(json!({
        "result": {
            "questions": {
                "QID1": { "questionText": STUDENT_NAME_QUESTION },
                "QID2": { "questionText": SERVICE_DATE_QUESTION },
                "QID3": { "questionText": LOCATION_QUESTION },
                "QID4": { "questionText": SUPERVISOR_QUESTION },
                "QID5": { "questionText": SUPERVISOR_QUESTION },
                "QID6": { "questionText": LOG_COUNT_QUESTION },
                "QID7": { "questionText": CATEGORY_QUESTION },
                "QID8": { "questionText": DOMAIN_QUESTION },
                "QID9": { "questionText": MINUTES_QUESTION }
            }
        }
    }))
    .unwrap()
}

/// A response from Alice with two log blocks: 60 and 30 minutes.
fn response(id: &str, date: &str, second_minutes: Value) -> Value {
    json!({
        "responseId": id,
        "values": {
            "QID1_TEXT": "Alice Smith",
            "QID2_TEXT": date,
            "QID6_TEXT": "2",
            "1_QID9_TEXT": "60",
            "2_QID9_TEXT": second_minutes
        },
        "labels": {
            "QID3": "Ward 5",
            "QID5": "Dr Jones",
            "1_QID7": "Exercise Assessment",
            "1_QID8": "Cardiovascular",
            "2_QID7": "Exercise Delivery",
            "2_QID8": "Cardiovascular"
        }
    })
}

fn export(responses: Vec<Value>) -> SurveyExport {
    serde_json::from_value(json!({ "responses": responses })).unwrap()
}

async fn import(pool: &PgPool, export: &SurveyExport, options: &ImportOptions) -> ImportSummary {
    run_import(pool, &definition(), export, options).await.unwrap()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_imports_response_and_creates_references(pool: PgPool) {
    let data = export(vec![response("R_1", "02/05/2023", json!(30))]);

    let summary = import(&pool, &data, &ImportOptions::default()).await;

    assert_eq!(summary.responses_imported, 1);
    assert_eq!(summary.logs_inserted, 2);
    // Student, location, supervisor, two activities, one domain.
    assert_eq!(summary.references_created, 6);

    let logs = ActivityLogRepo::list(&pool, &[], None, None).await.unwrap();
    assert_eq!(logs.len(), 2);
    for log in &logs {
        assert_eq!(log.record_date, NaiveDate::from_ymd_opt(2023, 5, 2).unwrap());
        assert_eq!(log.response_id.as_deref(), Some("R_1"));
        assert_eq!(log.unit_id, None);
    }
    let mut minutes: Vec<i32> = logs.iter().map(|l| l.minutes_spent).collect();
    minutes.sort();
    assert_eq!(minutes, vec![30, 60]);

    assert_eq!(DomainRepo::list(&pool).await.unwrap().len(), 1);
    assert_eq!(ActivityRepo::list(&pool).await.unwrap().len(), 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_reimport_is_idempotent(pool: PgPool) {
    let data = export(vec![response("R_1", "02/05/2023", json!(30))]);
    import(&pool, &data, &ImportOptions::default()).await;

    let second = import(&pool, &data, &ImportOptions::default()).await;

    assert_eq!(second.responses_imported, 0);
    assert_eq!(second.responses_skipped, 1);
    assert_eq!(second.references_created, 0);
    let logs = ActivityLogRepo::list(&pool, &[], None, None).await.unwrap();
    assert_eq!(logs.len(), 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_existing_references_are_reused(pool: PgPool) {
    let data = export(vec![
        response("R_1", "02/05/2023", json!(30)),
        response("R_2", "03/05/2023", json!(45)),
    ]);

    let summary = import(&pool, &data, &ImportOptions::default()).await;

    assert_eq!(summary.responses_imported, 2);
    assert_eq!(summary.logs_inserted, 4);
    assert_eq!(summary.references_created, 6);
    assert_eq!(StudentRepo::list(&pool).await.unwrap().len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_bad_date_skips_whole_response(pool: PgPool) {
    let data = export(vec![
        response("R_1", "2023-05-02", json!(30)),
        response("R_2", "03/05/2023", json!(45)),
    ]);

    let summary = import(&pool, &data, &ImportOptions::default()).await;

    assert_eq!(summary.responses_seen, 2);
    assert_eq!(summary.responses_failed, 1);
    assert_eq!(summary.responses_imported, 1);
    assert!(!ActivityLogRepo::exists_for_response(&pool, "R_1").await.unwrap());
    assert!(ActivityLogRepo::exists_for_response(&pool, "R_2").await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_bad_minutes_skips_only_that_entry(pool: PgPool) {
    let data = export(vec![response("R_1", "02/05/2023", json!("ninety"))]);

    let summary = import(&pool, &data, &ImportOptions::default()).await;

    assert_eq!(summary.responses_imported, 1);
    assert_eq!(summary.logs_inserted, 1);
    assert_eq!(summary.entries_skipped, 1);
    let logs = ActivityLogRepo::list(&pool, &[], None, None).await.unwrap();
    assert_eq!(logs[0].minutes_spent, 60);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_ambiguous_reference_rolls_back_response(pool: PgPool) {
    let dup = CreateSupervisor {
        name: "Dr Jones".to_string(),
    };
    SupervisorRepo::create(&pool, &dup).await.unwrap();
    SupervisorRepo::create(&pool, &dup).await.unwrap();
    let data = export(vec![response("R_1", "02/05/2023", json!(30))]);

    let summary = import(&pool, &data, &ImportOptions::default()).await;

    assert_eq!(summary.responses_failed, 1);
    assert_eq!(summary.logs_inserted, 0);
    // The student resolved before the failure was rolled back too.
    assert!(StudentRepo::list(&pool).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unit_option_attaches_unit(pool: PgPool) {
    let data = export(vec![response("R_1", "02/05/2023", json!(30))]);
    let options = ImportOptions {
        unit: Some("Clinical Practice 1".to_string()),
        dry_run: false,
    };

    let summary = import(&pool, &data, &options).await;

    assert_eq!(summary.references_created, 7);
    let units = UnitRepo::list(&pool).await.unwrap();
    assert_eq!(units.len(), 1);
    let logs = ActivityLogRepo::list(&pool, &[], None, None).await.unwrap();
    assert!(logs.iter().all(|l| l.unit_id == Some(units[0].id)));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_dry_run_writes_nothing(pool: PgPool) {
    let data = export(vec![response("R_1", "02/05/2023", json!(30))]);
    let options = ImportOptions {
        unit: None,
        dry_run: true,
    };

    let summary = import(&pool, &data, &options).await;

    assert_eq!(summary.responses_imported, 1);
    assert_eq!(summary.logs_inserted, 2);
    assert!(ActivityLogRepo::list(&pool, &[], None, None)
        .await
        .unwrap()
        .is_empty());
    assert!(StudentRepo::list(&pool).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_definition_missing_question_aborts(pool: PgPool) {
    let mut def = definition();
    def.result.questions.remove("QID9");
    let data = export(vec![response("R_1", "02/05/2023", json!(30))]);

    let result = run_import(&pool, &def, &data, &ImportOptions::default()).await;

    assert_matches::assert_matches!(result, Err(placement_import::ImportError::Survey(_)));
}
