use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use loan_desk::workflows::lending::{
    application_router, ApplicationNotifier, ApplicationRepository, LoanApplicationService,
};
use serde::Serialize;
use std::sync::Arc;

pub(crate) fn with_application_routes<R, N>(
    service: Arc<LoanApplicationService<R, N>>,
) -> axum::Router
where
    R: ApplicationRepository + 'static,
    N: ApplicationNotifier + 'static,
{
    application_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum CheckStatus {
    Ok,
    Ready,
    Initializing,
}

#[derive(Debug, Serialize)]
pub(crate) struct StatusBody {
    status: CheckStatus,
}

pub(crate) async fn healthcheck() -> Json<StatusBody> {
    Json(StatusBody {
        status: CheckStatus::Ok,
    })
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let (code, status) = if ready {
        (StatusCode::OK, CheckStatus::Ready)
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, CheckStatus::Initializing)
    };

    (code, Json(StatusBody { status }))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
