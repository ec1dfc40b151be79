use super::common::*;
use axum::body::Body;
use axum::extract::State;
use axum::http::{header, Request, StatusCode};
use std::sync::Arc;
use tower::ServiceExt;

use crate::workflows::lending::router::submit_handler;
use crate::workflows::lending::LoanApplicationService;

fn json_post(uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(body).expect("serializes")))
        .expect("request builds")
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri)
        .header(header::ORIGIN, "https://partners.example.com")
        .body(Body::empty())
        .expect("request builds")
}

#[tokio::test]
async fn submit_route_returns_receipt_only() {
    let (service, repository, _) = build_service();
    let router = application_router_with_service(service);
    let payload = serde_json::to_value(submission()).expect("serializes");

    let response = router
        .oneshot(json_post("/api/loan-application", &payload))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["applicantName"], "Asha Verma");
    assert_eq!(
        body["message"],
        "Your loan application has been submitted successfully"
    );
    assert!(body.get("quotes").is_none());
    assert_eq!(repository.records.lock().expect("mutex").len(), 1);
}

#[tokio::test]
async fn submit_route_rejects_missing_fields() {
    let (service, _, _) = build_service();
    let router = application_router_with_service(service);
    let mut payload = serde_json::to_value(submission()).expect("serializes");
    payload["phoneNumber"] = serde_json::json!("");

    let response = router
        .oneshot(json_post("/api/loan-application", &payload))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json_body(response).await;
    assert_eq!(body["error"], "Missing required fields");
}

#[tokio::test]
async fn submit_route_answers_incomplete_json_with_json_error() {
    let mut payload = serde_json::to_value(submission()).expect("serializes");
    let object = payload.as_object_mut().expect("object payload");
    object.remove("gender");
    object.remove("annualIncome");

    let (service, repository, _) = build_service();
    let response = application_router_with_service(service)
        .oneshot(json_post("/api/loan-application", &payload))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json_body(response).await;
    assert_eq!(body["error"], "Missing required fields");
    assert!(repository.records.lock().expect("mutex").is_empty());

    let (service, _, _) = build_service();
    let malformed = Request::post("/api/loan-application")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"firstName\": "))
        .expect("request builds");
    let response = application_router_with_service(service)
        .oneshot(malformed)
        .await
        .expect("router responds");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        read_json_body(response).await["error"],
        "Missing required fields"
    );
}

#[tokio::test]
async fn submit_handler_returns_internal_error_on_repository_failure() {
    let service = Arc::new(LoanApplicationService::new(
        Arc::new(UnavailableRepository),
        Arc::new(MemoryNotifier::default()),
    ));

    let response = submit_handler::<UnavailableRepository, MemoryNotifier>(
        State(service),
        Ok(axum::Json(submission())),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = read_json_body(response).await;
    assert_eq!(body["error"], "Internal server error");
}

#[tokio::test]
async fn submit_handler_returns_conflict_on_duplicate_id() {
    let service = Arc::new(LoanApplicationService::new(
        Arc::new(FixedIdRepository::default()),
        Arc::new(MemoryNotifier::default()),
    ));

    let first = submit_handler::<FixedIdRepository, MemoryNotifier>(
        State(service.clone()),
        Ok(axum::Json(submission())),
    )
    .await;
    assert_eq!(first.status(), StatusCode::OK);

    let second = submit_handler::<FixedIdRepository, MemoryNotifier>(
        State(service),
        Ok(axum::Json(submission())),
    )
    .await;
    assert_eq!(second.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn detail_route_returns_both_tables() {
    let (service, _, _) = build_service();
    let receipt = service
        .submit_at(submission(), submitted_at())
        .expect("accepted");
    let router = application_router_with_service(service);

    let response = router
        .oneshot(get(&format!("/api/applications/{}", receipt.application_id)))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|value| value.to_str().ok()),
        Some("*")
    );
    let body = read_json_body(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["applicationId"], receipt.application_id.0.as_str());
    assert_eq!(body["applicantDetails"]["age"], 35);
    assert_eq!(body["applicantDetails"]["requestedLoanType"], serde_json::Value::Null);
    assert_eq!(body["collateral"]["eligibilityStatus"], "ELIGIBLE");
    assert_eq!(body["collateral"]["ineligibilityReason"], serde_json::Value::Null);
    let quotes = body["collateral"]["loanQuotes"]
        .as_array()
        .expect("quote rows");
    assert_eq!(quotes.len(), 4);
    assert_eq!(quotes[0]["loanType"], "housing");
    assert_eq!(quotes[0]["loanAmount"], 50_000.0);
}

#[tokio::test]
async fn detail_route_returns_not_found() {
    let (service, _, _) = build_service();
    let router = application_router_with_service(service);

    let response = router
        .oneshot(get("/api/applications/LN000"))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = read_json_body(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Application not found");
    assert_eq!(body["message"], "No application found with ID: LN000");
}

#[tokio::test]
async fn list_and_table_routes_report_counts() {
    let (service, _, _) = build_service();
    service
        .submit_at(submission(), submitted_at())
        .expect("accepted");
    service
        .submit_at(submission_born("1950-02-02"), submitted_at())
        .expect("accepted");
    let router = application_router_with_service(service);

    let list = read_json_body(
        router
            .clone()
            .oneshot(get("/api/applications"))
            .await
            .expect("router responds"),
    )
    .await;
    assert_eq!(list["count"], 2);
    assert_eq!(list["applications"][0]["userDetails"]["fullName"], "Asha Verma");
    assert_eq!(list["applications"][1]["eligibility"]["isEligible"], false);

    let applicants = read_json_body(
        router
            .clone()
            .oneshot(get("/api/applications/applicants"))
            .await
            .expect("router responds"),
    )
    .await;
    assert_eq!(applicants["tableName"], "Applicant Details");
    assert_eq!(applicants["count"], 2);
    assert_eq!(applicants["data"][0]["email"], "asha.verma@example.com");

    let collateral = read_json_body(
        router
            .oneshot(get("/api/applications/collateral"))
            .await
            .expect("router responds"),
    )
    .await;
    assert_eq!(collateral["tableName"], "Collateral");
    assert_eq!(collateral["data"][0]["applicantName"], "Asha Verma");
    assert_eq!(collateral["data"][1]["eligibilityStatus"], "NOT ELIGIBLE");
    assert_eq!(
        collateral["data"][1]["ineligibilityReason"],
        "Age over 60 - not eligible for any loan"
    );
}

#[tokio::test]
async fn export_route_supports_json_and_csv() {
    let (service, _, _) = build_service();
    service
        .submit_at(submission(), submitted_at())
        .expect("accepted");
    let router = application_router_with_service(service);

    let json = read_json_body(
        router
            .clone()
            .oneshot(get("/api/applications/export"))
            .await
            .expect("router responds"),
    )
    .await;
    assert_eq!(json["count"], 1);
    assert_eq!(
        json["applications"][0]["collateral"]["eligibleLoanTypes"]
            .as_array()
            .map(Vec::len),
        Some(4)
    );

    let response = router
        .oneshot(get("/api/applications/export?format=csv"))
        .await
        .expect("router responds");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok()),
        Some("text/csv; charset=utf-8")
    );
    let body = String::from_utf8(read_body(response).await).expect("utf-8 csv");
    assert_eq!(body.lines().count(), 5);
}
