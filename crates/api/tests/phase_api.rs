//! HTTP-level tests for project phases and the phase comparison.

mod common;

use axum::http::StatusCode;
use common::{body_json, create_phase, create_project, get, log_hours, log_phase_hours, post_json};
use sqlx::PgPool;

#[sqlx::test(migrations = "../db/migrations")]
async fn phase_comparison_lists_estimate_and_logged_hours(pool: PgPool) {
    let id = create_project(&pool, "PHS-001", "100.00").await;
    let design = create_phase(&pool, id, "Design", "20").await;
    let build = create_phase(&pool, id, "Build", "60").await;
    create_phase(&pool, id, "QA", "20").await;

    log_phase_hours(&pool, id, build, "30.5").await;
    log_phase_hours(&pool, id, build, "12").await;
    log_phase_hours(&pool, id, design, "25").await;
    log_hours(&pool, id, "4", "2026-01-10").await;

    let response = get(common::build_test_app(pool), &format!("/api/v1/projects/{id}/phase-comparison")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 3);

    let by_name = |name: &str| data.iter().find(|r| r["phase_name"] == name).unwrap();
    assert_eq!(by_name("Build")["estimated_hours"], "60.00");
    assert_eq!(by_name("Build")["actual_hours"], "42.50");
    assert_eq!(by_name("Build")["variance_hours"], "-17.50");
    assert_eq!(by_name("Design")["actual_hours"], "25.00");
    assert_eq!(by_name("Design")["variance_hours"], "5.00");
    assert_eq!(by_name("QA")["actual_hours"], "0.00");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn phases_are_listed_in_sort_order(pool: PgPool) {
    let id = create_project(&pool, "PHS-002", "100.00").await;
    for (name, order) in [("Launch", 3), ("Discovery", 1), ("Build", 2)] {
        let response = post_json(
            common::build_test_app(pool.clone()),
            &format!("/api/v1/projects/{id}/phases"),
            serde_json::json!({ "name": name, "estimated_hours": "10", "sort_order": order }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let json = body_json(get(common::build_test_app(pool), &format!("/api/v1/projects/{id}/phases")).await).await;
    let names: Vec<_> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, ["Discovery", "Build", "Launch"]);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn duplicate_phase_name_returns_409(pool: PgPool) {
    let id = create_project(&pool, "PHS-003", "100.00").await;
    create_phase(&pool, id, "Build", "10").await;

    let response = post_json(
        common::build_test_app(pool),
        &format!("/api/v1/projects/{id}/phases"),
        serde_json::json!({ "name": "Build", "estimated_hours": "5" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn negative_estimate_is_rejected(pool: PgPool) {
    let id = create_project(&pool, "PHS-004", "100.00").await;
    let response = post_json(
        common::build_test_app(pool),
        &format!("/api/v1/projects/{id}/phases"),
        serde_json::json!({ "name": "Build", "estimated_hours": "-1" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn time_entry_with_foreign_phase_is_rejected(pool: PgPool) {
    let owner = create_project(&pool, "PHS-005", "100.00").await;
    let other = create_project(&pool, "PHS-006", "100.00").await;
    let phase = create_phase(&pool, owner, "Build", "10").await;

    let response = log_phase_hours(&pool, other, phase, "2").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");

    let response = log_phase_hours(&pool, owner, phase, "2").await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["phase_id"], phase);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn phase_comparison_for_missing_project_returns_404(pool: PgPool) {
    let response = get(common::build_test_app(pool), "/api/v1/projects/999999/phase-comparison").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
