//! HTTP-level tests for evaluations, health history, burndown, portfolio and
//! alerts.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use common::{body_json, create_project, evaluate, get, log_hours, patch, post_json};
use finhealth_events::bus::{EVENT_ALERT_RAISED, EVENT_HEALTH_EVALUATED};
use finhealth_events::EventBus;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Evaluations
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn critical_evaluation_returns_snapshot_and_alert(pool: PgPool) {
    let id = create_project(&pool, "ECR-001", "100.00").await;
    log_hours(&pool, id, "85", "2026-01-10").await;

    let response = evaluate(&pool, id, "40.00").await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["previous_status"], "HEALTHY");
    assert_eq!(json["new_status"], "CRITICAL");

    let snapshot = &json["snapshot"];
    assert_eq!(snapshot["project_id"], id);
    assert_eq!(snapshot["consumption_percent"], "85.00");
    assert_eq!(snapshot["progress_percent"], "40.00");
    assert_eq!(snapshot["budget_consumed"], "5950.00");
    assert_eq!(snapshot["earned_value"], "20000.00");
    assert_eq!(snapshot["health_status"], "CRITICAL");
    assert_eq!(snapshot["health_score"], 10);

    assert_eq!(json["alert"]["alert_type"], "CRITICAL");
    assert!(json["alert"]["message"]
        .as_str()
        .unwrap()
        .contains("E-commerce Redesign"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn numeric_progress_is_accepted_and_quantized(pool: PgPool) {
    let id = create_project(&pool, "NUM-001", "100.00").await;
    log_hours(&pool, id, "55", "2026-01-10").await;

    let response = post_json(
        common::build_test_app(pool),
        &format!("/api/v1/projects/{id}/evaluations"),
        serde_json::json!({ "progress_percent": 50 }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["snapshot"]["progress_percent"], "50.00");
    assert_eq!(json["snapshot"]["health_score"], 95);
    assert!(json["alert"].is_null());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn progress_is_rounded_before_classification(pool: PgPool) {
    let id = create_project(&pool, "RND-001", "100.00").await;
    log_hours(&pool, id, "85", "2026-01-10").await;

    let json = body_json(evaluate(&pool, id, "49.995").await).await;
    assert_eq!(json["new_status"], "WARNING");
    assert_eq!(json["snapshot"]["progress_percent"], "50.00");

    let history = body_json(
        get(common::build_test_app(pool), &format!("/api/v1/projects/{id}/health-history")).await,
    )
    .await;
    assert_eq!(history["data"][0]["progress_percent"], "50.00");
    assert_eq!(history["data"][0]["health_status"], "WARNING");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn repeated_critical_evaluation_raises_one_alert(pool: PgPool) {
    let id = create_project(&pool, "ECR-002", "100.00").await;
    log_hours(&pool, id, "85", "2026-01-10").await;

    evaluate(&pool, id, "40.00").await;
    let json = body_json(evaluate(&pool, id, "41.00").await).await;
    assert_eq!(json["previous_status"], "CRITICAL");
    assert!(json["alert"].is_null());

    let alerts = body_json(get(common::build_test_app(pool), "/api/v1/alerts").await).await;
    assert_eq!(alerts["data"].as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn progress_out_of_range_is_rejected(pool: PgPool) {
    let id = create_project(&pool, "RNG-001", "100.00").await;

    for progress in ["-1", "100.01"] {
        let response = evaluate(&pool, id, progress).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
    }

    let history = body_json(
        get(common::build_test_app(pool), &format!("/api/v1/projects/{id}/health-history")).await,
    )
    .await;
    assert!(history["data"].as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn evaluating_missing_project_returns_404(pool: PgPool) {
    let response = evaluate(&pool, 999_999, "10").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn evaluation_publishes_events(pool: PgPool) {
    let id = create_project(&pool, "EVT-001", "100.00").await;
    log_hours(&pool, id, "60", "2026-01-10").await;

    let bus = Arc::new(EventBus::default());
    let mut rx = bus.subscribe();
    let app = common::build_test_app_with_bus(pool, Arc::clone(&bus));

    let response = post_json(
        app,
        &format!("/api/v1/projects/{id}/evaluations"),
        serde_json::json!({ "progress_percent": "40.00" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let evaluated = rx.try_recv().unwrap();
    assert_eq!(evaluated.event_type, EVENT_HEALTH_EVALUATED);
    assert_eq!(evaluated.project_id, id);
    assert_eq!(evaluated.payload["new_status"], "WARNING");

    let alert = rx.try_recv().unwrap();
    assert_eq!(alert.event_type, EVENT_ALERT_RAISED);
    assert_eq!(alert.payload["alert_type"], "WARNING");
    assert!(rx.try_recv().is_err());
}

// ---------------------------------------------------------------------------
// History and burndown
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn health_history_is_newest_first_and_shown_in_detail(pool: PgPool) {
    let id = create_project(&pool, "HIS-001", "100.00").await;
    log_hours(&pool, id, "30", "2026-01-10").await;

    evaluate(&pool, id, "10.00").await;
    evaluate(&pool, id, "25.00").await;

    let json = body_json(
        get(common::build_test_app(pool.clone()), &format!("/api/v1/projects/{id}/health-history")).await,
    )
    .await;
    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);
    assert_eq!(data[0]["progress_percent"], "25.00");
    assert_eq!(data[1]["progress_percent"], "10.00");

    let detail = body_json(get(common::build_test_app(pool), &format!("/api/v1/projects/{id}")).await).await;
    assert_eq!(detail["latest_snapshot"]["progress_percent"], "25.00");
    assert_eq!(detail["current_health_status"], "HEALTHY");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn burndown_spans_first_entry_through_today(pool: PgPool) {
    let today = Utc::now().date_naive();
    let start = today - Duration::days(2);

    let id = create_project(&pool, "BRN-001", "100.00").await;
    log_hours(&pool, id, "10", &start.to_string()).await;
    log_hours(&pool, id, "5", &today.to_string()).await;
    evaluate(&pool, id, "40.00").await;

    let json = body_json(
        get(common::build_test_app(pool), &format!("/api/v1/projects/{id}/burndown")).await,
    )
    .await;
    let points = json["data"].as_array().unwrap();
    assert_eq!(points.len(), 3);

    assert_eq!(points[0]["date"], start.to_string());
    assert_eq!(points[0]["budget_line"], "16666.67");
    assert_eq!(points[0]["actual_cost_cumulative"], "700.00");
    assert_eq!(points[0]["earned_value_cumulative"], "0.00");

    assert_eq!(points[1]["budget_line"], "33333.33");
    assert_eq!(points[1]["actual_cost_cumulative"], "700.00");

    assert_eq!(points[2]["date"], today.to_string());
    assert_eq!(points[2]["budget_line"], "50000.00");
    assert_eq!(points[2]["actual_cost_cumulative"], "1050.00");
    assert_eq!(points[2]["earned_value_cumulative"], "20000.00");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn burndown_is_empty_without_entries(pool: PgPool) {
    let id = create_project(&pool, "BRN-002", "100.00").await;

    let json = body_json(
        get(common::build_test_app(pool), &format!("/api/v1/projects/{id}/burndown")).await,
    )
    .await;
    assert!(json["data"].as_array().unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Portfolio
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn portfolio_lists_every_project_with_figures(pool: PgPool) {
    let evaluated = create_project(&pool, "PRT-001", "100.00").await;
    let untouched = create_project(&pool, "PRT-002", "0").await;
    log_hours(&pool, evaluated, "60", "2026-01-10").await;
    evaluate(&pool, evaluated, "40.00").await;

    let json = body_json(get(common::build_test_app(pool), "/api/v1/portfolio").await).await;
    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);

    let row = data.iter().find(|r| r["id"] == evaluated).unwrap();
    assert_eq!(row["current_health_status"], "WARNING");
    assert_eq!(row["consumed_hours"], "60.00");
    assert_eq!(row["consumption_percent"], "60.00");
    assert_eq!(row["progress_percent"], "40.00");
    assert_eq!(row["deviation"], "20.00");

    let row = data.iter().find(|r| r["id"] == untouched).unwrap();
    assert_eq!(row["consumed_hours"], "0.00");
    assert_eq!(row["consumption_percent"], "0.00");
    assert_eq!(row["progress_percent"], "0.00");
    assert_eq!(row["deviation"], "0.00");
}

// ---------------------------------------------------------------------------
// Alerts
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn alerts_can_be_filtered_and_marked_read(pool: PgPool) {
    let id = create_project(&pool, "ALR-001", "100.00").await;
    log_hours(&pool, id, "85", "2026-01-10").await;
    let outcome = body_json(evaluate(&pool, id, "40.00").await).await;
    let alert_id = outcome["alert"]["id"].as_i64().unwrap();

    let unread = body_json(get(common::build_test_app(pool.clone()), "/api/v1/alerts?is_read=false").await).await;
    let data = unread["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["project_code"], "ALR-001");

    let warnings = body_json(
        get(common::build_test_app(pool.clone()), "/api/v1/alerts?alert_type=WARNING").await,
    )
    .await;
    assert!(warnings["data"].as_array().unwrap().is_empty());

    let response = patch(common::build_test_app(pool.clone()), &format!("/api/v1/alerts/{alert_id}/read")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["is_read"], true);

    let unread = body_json(get(common::build_test_app(pool), "/api/v1/alerts?is_read=false").await).await;
    assert!(unread["data"].as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn project_alerts_are_scoped_to_the_project(pool: PgPool) {
    let critical = create_project(&pool, "ALR-002", "100.00").await;
    let warning = create_project(&pool, "ALR-003", "100.00").await;
    log_hours(&pool, critical, "85", "2026-01-10").await;
    log_hours(&pool, warning, "60", "2026-01-10").await;
    evaluate(&pool, critical, "40.00").await;
    evaluate(&pool, warning, "40.00").await;

    let response = get(common::build_test_app(pool.clone()), &format!("/api/v1/projects/{critical}/alerts")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let data = body_json(response).await["data"].as_array().unwrap().clone();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["project_id"], critical);
    assert_eq!(data[0]["alert_type"], "CRITICAL");

    let response = get(common::build_test_app(pool), "/api/v1/projects/999999/alerts").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn marking_missing_alert_returns_404(pool: PgPool) {
    let response = patch(common::build_test_app(pool), "/api/v1/alerts/999999/read").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
