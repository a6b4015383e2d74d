use metrics_exporter_prometheus::PrometheusHandle;
use seo_report::config::ExportConfig;
use seo_report::error::AppError;
use seo_report::render::{HeadlessBrowserRasterizer, PageRasterizer, RenderMode, RenderedDocument};
use seo_report::report::{ReportAssembler, ReportModules, TracingObserver};
use seo_report::Report;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) exporter: Option<Arc<PdfExporter>>,
}

/// Analysis request: the target URL plus the four provider payloads.
#[derive(Debug, Deserialize)]
pub(crate) struct ReportRequest {
    pub(crate) url: String,
    #[serde(flatten)]
    pub(crate) modules: ReportModules,
}

pub(crate) fn load_request(path: &Path) -> Result<ReportRequest, AppError> {
    let raw = fs::read_to_string(path)?;
    serde_json::from_str(&raw)
        .map_err(|err| AppError::payload(format!("{}: {err}", path.display())))
}

pub(crate) fn assembler() -> ReportAssembler<TracingObserver> {
    ReportAssembler::with_observer(TracingObserver)
}

/// Prints reports to PDF and stores them under the output directory.
pub(crate) struct PdfExporter {
    rasterizer: Arc<dyn PageRasterizer>,
    output_dir: PathBuf,
}

impl PdfExporter {
    pub(crate) fn new(rasterizer: Arc<dyn PageRasterizer>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            rasterizer,
            output_dir: output_dir.into(),
        }
    }

    pub(crate) fn from_config(config: &ExportConfig) -> Option<Self> {
        let binary = config.browser_bin.as_ref()?;
        Some(Self::new(
            Arc::new(HeadlessBrowserRasterizer::new(binary)),
            &config.output_dir,
        ))
    }

    /// Writes into the output directory under a name derived from the report.
    pub(crate) fn export(&self, report: &Report) -> Result<PathBuf, AppError> {
        let path = self.output_dir.join(pdf_file_name(report));
        self.export_to(report, &path)?;
        Ok(path)
    }

    pub(crate) fn export_to(&self, report: &Report, path: &Path) -> Result<(), AppError> {
        let document =
            assembler().render_document(report, RenderMode::Paginated, self.rasterizer.as_ref())?;
        write_document(path, &document)?;
        info!(path = %path.display(), bytes = document.len(), "pdf report written");
        Ok(())
    }
}

pub(crate) fn write_document(path: &Path, document: &RenderedDocument) -> Result<(), AppError> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, document.as_bytes())?;
    Ok(())
}

pub(crate) fn pdf_file_name(report: &Report) -> String {
    let domain: String = report
        .domain
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect();
    format!(
        "seo-report-{}-{}.pdf",
        domain.trim_matches('-'),
        report.analyzed_at.format("%Y%m%dT%H%M%SZ")
    )
}
