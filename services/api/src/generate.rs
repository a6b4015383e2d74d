use crate::infra::{assembler, load_request, write_document, PdfExporter, ReportRequest};
use clap::Args;
use seo_report::config::{AppConfig, ConfigError};
use seo_report::error::AppError;
use seo_report::render::{HeadlessBrowserRasterizer, RenderedDocument};
use seo_report::{telemetry, Report};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct ReportArgs {
    /// JSON payload with `url` and the four provider modules
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Destination for the rendered HTML report
    #[arg(long)]
    pub(crate) output: PathBuf,
    /// Also print the report to this PDF file (requires a headless browser)
    #[arg(long)]
    pub(crate) pdf: Option<PathBuf>,
    /// Also write the assembled report data as JSON
    #[arg(long)]
    pub(crate) json: Option<PathBuf>,
    /// Headless browser binary; overrides REPORT_BROWSER_BIN
    #[arg(long)]
    pub(crate) browser: Option<PathBuf>,
}

pub(crate) fn run_report(args: ReportArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    let request = load_request(&args.input)?;

    let exporter = match (&args.pdf, args.browser.as_ref().or(config.export.browser_bin.as_ref())) {
        (None, _) => None,
        (Some(_), Some(binary)) => Some(PdfExporter::new(
            Arc::new(HeadlessBrowserRasterizer::new(binary)),
            &config.export.output_dir,
        )),
        (Some(_), None) => return Err(ConfigError::MissingBrowser.into()),
    };

    let report = generate(request, &args, exporter.as_ref())?;
    print_summary(&report, &args);
    Ok(())
}

fn generate(
    request: ReportRequest,
    args: &ReportArgs,
    exporter: Option<&PdfExporter>,
) -> Result<Report, AppError> {
    let assembler = assembler();
    let report = assembler.assemble(&request.url, request.modules)?;

    let html = assembler.render(&report);
    write_document(&args.output, &RenderedDocument::Html(html))?;

    if let Some(path) = &args.json {
        write_json(path, &report)?;
    }

    if let (Some(path), Some(exporter)) = (&args.pdf, exporter) {
        exporter.export_to(&report, path)?;
    }

    Ok(report)
}

fn write_json(path: &Path, report: &Report) -> Result<(), AppError> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, serde_json::to_vec_pretty(report)?)?;
    Ok(())
}

fn print_summary(report: &Report, args: &ReportArgs) {
    println!("SEO report for {} ({})", report.domain, report.url);
    println!(
        "Analyzed at: {}",
        report.analyzed_at.format("%Y-%m-%d %H:%M:%S UTC")
    );

    if let Some(summary) = &report.executive_summary {
        println!("Overall health: {}", summary.overall_health.label());
        println!(
            "Traffic: {} | Competitive position: {}",
            summary.traffic_status.label(),
            summary.competitive_position.label()
        );
        if !summary.urgent_issues.is_empty() {
            println!("\nUrgent issues:");
            for issue in &summary.urgent_issues {
                println!("  - {issue}");
            }
        }
        if !summary.quick_wins.is_empty() {
            println!("\nQuick wins:");
            for win in &summary.quick_wins {
                println!("  - {win}");
            }
        }
    }

    let recommendations = report.recommendations.as_deref().unwrap_or_default();
    if !recommendations.is_empty() {
        println!("\nRecommendations:");
        for (index, recommendation) in recommendations.iter().enumerate() {
            println!(
                "  {:>2}. [{} / {}] {} ({})",
                index + 1,
                recommendation.priority.label(),
                recommendation.category.label(),
                recommendation.title,
                recommendation.timeframe.label()
            );
        }
    }

    println!("\nHTML written to {}", args.output.display());
    if let Some(path) = &args.json {
        println!("JSON written to {}", path.display());
    }
    if let Some(path) = &args.pdf {
        println!("PDF written to {}", path.display());
    }
}
