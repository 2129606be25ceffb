use super::common::*;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use crate::workflows::staffing::router::{apply_handler, ApplyRequest};
use crate::workflows::staffing::{StaffingService, WorkerId};

#[tokio::test]
async fn apply_handler_returns_conflict_on_duplicate() {
    let (service, _) = build_service();

    let response = apply_handler::<MemoryRepository>(
        State(Arc::new(service)),
        Path("J001".to_string()),
        axum::Json(ApplyRequest {
            worker_id: WorkerId::from("W001"),
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn apply_handler_returns_conflict_on_stale_write() {
    let service = Arc::new(StaffingService::new(Arc::new(ConflictRepository)));

    let response = apply_handler::<ConflictRepository>(
        State(service),
        Path("J001".to_string()),
        axum::Json(ApplyRequest {
            worker_id: WorkerId::from("W005"),
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn apply_handler_returns_internal_error_on_repository_failure() {
    let service = Arc::new(StaffingService::new(Arc::new(UnavailableRepository)));

    let response = apply_handler::<UnavailableRepository>(
        State(service),
        Path("J001".to_string()),
        axum::Json(ApplyRequest {
            worker_id: WorkerId::from("W005"),
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn apply_route_creates_application() {
    let (service, repository) = build_service();
    let router = router_with_service(service);

    let response = router
        .oneshot(json_request(
            "POST",
            "/api/v1/jobs/J001/applications",
            json!({ "worker_id": "W005" }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::CREATED);
    let payload = read_json_body(response).await;
    let applications = payload
        .get("applications")
        .and_then(Value::as_array)
        .expect("applications array");
    let last = applications.last().expect("new application");
    assert_eq!(last.get("worker_id"), Some(&json!("W005")));
    assert_eq!(last.get("status"), Some(&json!("応募済み")));
    assert_eq!(last.get("id"), Some(&json!("J001-A003")));

    let store = repository.current();
    assert_eq!(store.revision(), 1);
}

#[tokio::test]
async fn worker_routes_scope_to_the_worker() {
    let (service, _) = build_service();
    let router = router_with_service(service);

    let response = router
        .clone()
        .oneshot(empty_request("GET", "/api/v1/workers/W002/jobs"))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);
    let jobs = read_json_body(response).await;
    let ids: Vec<&str> = jobs
        .as_array()
        .expect("job array")
        .iter()
        .filter_map(|job| job.get("id").and_then(Value::as_str))
        .collect();
    assert_eq!(ids, vec!["J001", "J002"]);

    let response = router
        .clone()
        .oneshot(empty_request("GET", "/api/v1/workers/W001/totals"))
        .await
        .expect("route executes");
    let totals = read_json_body(response).await;
    assert_eq!(totals.get("total_hours"), Some(&json!(8.5)));
    assert_eq!(totals.get("total_earnings"), Some(&json!(10200.0)));

    let response = router
        .oneshot(empty_request("GET", "/api/v1/workers/W001/messages"))
        .await
        .expect("route executes");
    let inbox = read_json_body(response).await;
    assert_eq!(inbox.get("unread_count"), Some(&json!(2)));
}

#[tokio::test]
async fn unknown_worker_is_not_found() {
    let (service, _) = build_service();
    let router = router_with_service(service);

    let response = router
        .oneshot(empty_request("GET", "/api/v1/workers/W404/history"))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let payload = read_json_body(response).await;
    assert!(payload
        .get("error")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .contains("W404"));
}

#[tokio::test]
async fn invalid_transition_is_unprocessable() {
    let (service, _) = build_service();
    let router = router_with_service(service);

    let response = router
        .oneshot(json_request(
            "PUT",
            "/api/v1/jobs/J004/applications/J004-A002",
            json!({ "status": "承認" }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn non_numeric_salary_is_unprocessable() {
    let (service, repository) = build_service();
    let router = router_with_service(service);

    let response = router
        .oneshot(json_request(
            "POST",
            "/api/v1/jobs",
            json!({
                "title": "宴会サービス",
                "date": "2026-03-01",
                "start_time": "17:00",
                "end_time": "22:00",
                "salary": "abc",
                "break_time": "30",
                "max_workers": "3",
            }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(repository.current().revision(), 0);
}

#[tokio::test]
async fn withdraw_route_cancels_application() {
    let (service, _) = build_service();
    let router = router_with_service(service);

    let response = router
        .oneshot(empty_request(
            "DELETE",
            "/api/v1/jobs/J003/applications/workers/W003",
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(
        payload.pointer("/applications/0/status"),
        Some(&json!("キャンセル"))
    );
}

#[tokio::test]
async fn deleting_referenced_worker_conflicts() {
    let (service, _) = build_service();
    let router = router_with_service(service);

    let response = router
        .oneshot(empty_request("DELETE", "/api/v1/workers/W001"))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn job_board_lists_badges() {
    let (service, _) = build_service();
    let router = router_with_service(service);

    let response = router
        .oneshot(empty_request("GET", "/api/v1/jobs"))
        .await
        .expect("route executes");
    let payload = read_json_body(response).await;
    let jobs = payload.as_array().expect("job array");

    let badge_of = |id: &str| {
        jobs.iter()
            .find(|job| job.get("id") == Some(&json!(id)))
            .and_then(|job| job.get("badge"))
            .cloned()
    };
    assert_eq!(badge_of("J001"), Some(json!("default")));
    assert_eq!(badge_of("J004"), Some(json!("outline")));
    assert_eq!(badge_of("J006"), Some(json!("destructive")));
    assert_eq!(badge_of("J007"), Some(json!("secondary")));
}

#[tokio::test]
async fn template_route_creates_job_copy() {
    let (service, _) = build_service();
    let router = router_with_service(service);

    let response = router
        .oneshot(json_request(
            "POST",
            "/api/v1/templates/T002/jobs",
            json!({
                "date": "2026-03-02",
                "start_time": "10:00",
                "end_time": "15:00",
                "location": "東館",
                "max_workers": "2",
            }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::CREATED);
    let payload = read_json_body(response).await;
    assert_eq!(payload.get("template_id"), Some(&json!("T002")));
    assert_eq!(payload.get("status"), Some(&json!("募集中")));
    assert_eq!(payload.get("visibility_level"), Some(&json!("全体")));
    assert_eq!(payload.get("id"), Some(&json!("J008")));
}

#[tokio::test]
async fn overview_ranks_workers_by_history() {
    let (service, _) = build_service();
    let router = router_with_service(service);

    let response = router
        .oneshot(empty_request("GET", "/api/v1/reports/overview"))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload.get("total_workers"), Some(&json!(5)));
    assert_eq!(
        payload.pointer("/top_workers/0/worker_id"),
        Some(&json!("W002"))
    );
    assert_eq!(
        payload
            .get("recent_jobs")
            .and_then(Value::as_array)
            .map(Vec::len),
        Some(3)
    );
}

#[tokio::test]
async fn payment_csv_route_serves_csv() {
    let (service, _) = build_service();
    let router = router_with_service(service);

    let response = router
        .oneshot(empty_request(
            "GET",
            "/api/v1/reports/payments.csv?month=2026-01",
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok()),
        Some("text/csv; charset=utf-8")
    );
    let body = String::from_utf8(read_body(response).await).expect("utf-8 body");
    assert!(body.starts_with("ワーカーID,氏名"));
}

#[tokio::test]
async fn malformed_month_is_unprocessable() {
    let (service, _) = build_service();
    let router = router_with_service(service);

    let response = router
        .oneshot(empty_request("GET", "/api/v1/reports/payments?month=2026-13"))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn message_without_admin_side_is_unprocessable() {
    let (service, repository) = build_service();
    let router = router_with_service(service);

    for (from, to) in [("W001", "W002"), ("admin", "admin")] {
        let response = router
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/v1/messages",
                json!({ "from": from, "to": to, "content": "シフト交換できますか" }),
            ))
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
    assert_eq!(repository.current().revision(), 0);
}

#[tokio::test]
async fn history_csv_route_serves_detail_rows_for_the_month() {
    let (service, _) = build_service();
    let router = router_with_service(service);

    let response = router
        .oneshot(empty_request(
            "GET",
            "/api/v1/reports/payments/history.csv?month=2025-12",
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok()),
        Some("text/csv; charset=utf-8")
    );
    let body = String::from_utf8(read_body(response).await).expect("utf-8 body");
    let lines: Vec<&str> = body.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("日付,ワーカーID,ワーカー名"));
    assert!(lines[1].starts_with("2025-12-24,W002,"));
}
