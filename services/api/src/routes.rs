use crate::infra::{assembler, AppState, ReportRequest};
use axum::extract::rejection::JsonRejection;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::{Extension, Json, Router};
use serde::Serialize;
use serde_json::json;
use seo_report::error::AppError;
use seo_report::Report;
use std::path::PathBuf;
use tracing::warn;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ReportResponse {
    pub(crate) success: bool,
    pub(crate) report_data: Report,
    pub(crate) html_content: String,
    pub(crate) pdf_generated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) pdf_path: Option<PathBuf>,
}

pub(crate) fn router() -> Router {
    Router::new()
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route("/api/v1/reports", axum::routing::post(report_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn report_endpoint(
    Extension(state): Extension<AppState>,
    payload: Result<Json<ReportRequest>, JsonRejection>,
) -> Result<Json<ReportResponse>, AppError> {
    let Json(ReportRequest { url, modules }) =
        payload.map_err(|rejection| AppError::payload(rejection.body_text()))?;

    let assembler = assembler();
    let report = assembler.assemble(&url, modules)?;
    let html_content = assembler.render(&report);

    let pdf_path = match state.exporter {
        Some(exporter) => {
            let snapshot = report.clone();
            match tokio::task::spawn_blocking(move || exporter.export(&snapshot)).await {
                Ok(Ok(path)) => Some(path),
                Ok(Err(err)) => {
                    warn!(error = %err, domain = %report.domain, "pdf export failed");
                    None
                }
                Err(err) => {
                    warn!(error = %err, domain = %report.domain, "pdf export task aborted");
                    None
                }
            }
        }
        None => None,
    };

    Ok(Json(ReportResponse {
        success: true,
        report_data: report,
        html_content,
        pdf_generated: pdf_path.is_some(),
        pdf_path,
    }))
}
