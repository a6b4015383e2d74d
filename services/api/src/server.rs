use crate::cli::ServeArgs;
use crate::infra::{AppState, PdfExporter};
use crate::routes::router;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use seo_report::config::AppConfig;
use seo_report::error::AppError;
use seo_report::telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let exporter = PdfExporter::from_config(&config.export).map(Arc::new);
    let pdf_enabled = exporter.is_some();
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        exporter,
    };

    let app = router()
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, pdf_enabled, "seo report service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
