use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tracing::{debug, error};

use super::domain::{ApplicationId, ApplicationSubmission};
use super::intake::IntakeError;
use super::repository::{ApplicationNotifier, ApplicationRepository, RepositoryError};
use super::service::{ApplicationServiceError, LoanApplicationService};

type SharedService<R, N> = Arc<LoanApplicationService<R, N>>;

/// Router exposing intake plus the read-only application tables.
///
/// The `/api/applications` family is readable from any origin so partner
/// systems can pull the tables directly.
pub fn application_router<R, N>(service: SharedService<R, N>) -> Router
where
    R: ApplicationRepository + 'static,
    N: ApplicationNotifier + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET])
        .allow_headers([header::CONTENT_TYPE]);

    let tables = Router::new()
        .route("/api/applications", get(list_handler::<R, N>))
        .route(
            "/api/applications/applicants",
            get(applicants_handler::<R, N>),
        )
        .route(
            "/api/applications/collateral",
            get(collateral_handler::<R, N>),
        )
        .route("/api/applications/export", get(export_handler::<R, N>))
        .route(
            "/api/applications/:application_id",
            get(detail_handler::<R, N>),
        )
        .layer(cors);

    Router::new()
        .route("/api/loan-application", post(submit_handler::<R, N>))
        .merge(tables)
        .with_state(service)
}

pub(crate) async fn submit_handler<R, N>(
    State(service): State<SharedService<R, N>>,
    submission: Result<axum::Json<ApplicationSubmission>, JsonRejection>,
) -> Response
where
    R: ApplicationRepository + 'static,
    N: ApplicationNotifier + 'static,
{
    // Absent or mistyped form fields answer like blank ones.
    let axum::Json(submission) = match submission {
        Ok(submission) => submission,
        Err(rejection) => {
            debug!(error = %rejection.body_text(), "loan application body rejected");
            let payload = json!({ "error": IntakeError::MissingField("body").to_string() });
            return (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response();
        }
    };

    match service.submit(submission) {
        Ok(receipt) => (StatusCode::OK, axum::Json(receipt)).into_response(),
        Err(ApplicationServiceError::Intake(error)) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response()
        }
        Err(ApplicationServiceError::Repository(RepositoryError::Conflict)) => {
            let payload = json!({ "error": "application already exists" });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        Err(other) => internal_error("processing loan application", &other),
    }
}

pub(crate) async fn detail_handler<R, N>(
    State(service): State<SharedService<R, N>>,
    Path(application_id): Path<String>,
) -> Response
where
    R: ApplicationRepository + 'static,
    N: ApplicationNotifier + 'static,
{
    let id = ApplicationId(application_id);
    match service.get(&id) {
        Ok(record) => {
            let notice = record.notice();
            let payload = json!({
                "success": true,
                "applicationId": notice.application_id,
                "submittedAt": notice.submitted_at,
                "applicantDetails": notice.applicant_details,
                "collateral": notice.collateral,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(ApplicationServiceError::Repository(RepositoryError::NotFound)) => {
            let payload = json!({
                "success": false,
                "error": "Application not found",
                "message": format!("No application found with ID: {id}"),
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(other) => internal_error("fetching application", &other),
    }
}

pub(crate) async fn list_handler<R, N>(State(service): State<SharedService<R, N>>) -> Response
where
    R: ApplicationRepository + 'static,
    N: ApplicationNotifier + 'static,
{
    match service.list() {
        Ok(applications) => {
            let payload = json!({
                "success": true,
                "count": applications.len(),
                "applications": applications,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(other) => internal_error("fetching applications", &other),
    }
}

pub(crate) async fn applicants_handler<R, N>(
    State(service): State<SharedService<R, N>>,
) -> Response
where
    R: ApplicationRepository + 'static,
    N: ApplicationNotifier + 'static,
{
    match service.applicant_table() {
        Ok(rows) => {
            let payload = json!({
                "success": true,
                "tableName": "Applicant Details",
                "count": rows.len(),
                "data": rows,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(other) => internal_error("fetching applicant details", &other),
    }
}

pub(crate) async fn collateral_handler<R, N>(
    State(service): State<SharedService<R, N>>,
) -> Response
where
    R: ApplicationRepository + 'static,
    N: ApplicationNotifier + 'static,
{
    match service.collateral_table() {
        Ok(rows) => {
            let payload = json!({
                "success": true,
                "tableName": "Collateral",
                "count": rows.len(),
                "data": rows,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(other) => internal_error("fetching collateral data", &other),
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Json,
    Csv,
}

#[derive(Debug, Default, Deserialize)]
pub struct ExportParams {
    #[serde(default)]
    pub format: ExportFormat,
}

pub(crate) async fn export_handler<R, N>(
    State(service): State<SharedService<R, N>>,
    Query(params): Query<ExportParams>,
) -> Response
where
    R: ApplicationRepository + 'static,
    N: ApplicationNotifier + 'static,
{
    match params.format {
        ExportFormat::Json => match service.export() {
            Ok(applications) => {
                let payload = json!({
                    "success": true,
                    "count": applications.len(),
                    "applications": applications,
                });
                (StatusCode::OK, axum::Json(payload)).into_response()
            }
            Err(other) => internal_error("exporting applications", &other),
        },
        ExportFormat::Csv => match service.export_csv() {
            Ok(body) => (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "text/csv; charset=utf-8")],
                body,
            )
                .into_response(),
            Err(other) => internal_error("exporting applications", &other),
        },
    }
}

fn internal_error(context: &str, err: &ApplicationServiceError) -> Response {
    error!(error = %err, "error {context}");
    let payload = json!({
        "success": false,
        "error": "Internal server error",
        "message": err.to_string(),
    });
    (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
}
