use super::domain::{ModuleKind, Report, ReportInputs, ReportModules};
use super::observer::{NoopObserver, ReportEvent, ReportObserver};
use super::recommendations::recommend;
use super::summary::synthesize;
use crate::render::{self, PageRasterizer, RasterizeError, RenderMode, RenderedDocument};
use chrono::Utc;
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReportError {
    #[error("missing module data: {}", join_modules(.missing))]
    MissingModuleData { missing: Vec<ModuleKind> },
    #[error("malformed url '{url}': {reason}")]
    MalformedUrl { url: String, reason: String },
}

impl ReportError {
    /// Short machine-facing name used in error responses.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::MissingModuleData { .. } => "Missing module data",
            Self::MalformedUrl { .. } => "Malformed URL",
        }
    }
}

fn join_modules(missing: &[ModuleKind]) -> String {
    missing
        .iter()
        .map(|kind| kind.wire_name())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Composes reports from provider payloads and reports progress to an observer.
#[derive(Debug, Default, Clone)]
pub struct ReportAssembler<O = NoopObserver> {
    observer: O,
}

impl ReportAssembler<NoopObserver> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<O: ReportObserver> ReportAssembler<O> {
    pub fn with_observer(observer: O) -> Self {
        Self { observer }
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn assemble(&self, url: &str, modules: ReportModules) -> Result<Report, ReportError> {
        self.observer
            .observe(&ReportEvent::AssemblyStarted { url });

        let (technical_seo, content_audit, keywords, backlinks) = match modules {
            ReportModules {
                technical_seo: Some(technical_seo),
                content_audit: Some(content_audit),
                keywords: Some(keywords),
                backlinks: Some(backlinks),
            } => (technical_seo, content_audit, keywords, backlinks),
            incomplete => {
                let missing = incomplete.missing_modules();
                return Err(self.reject(url, ReportError::MissingModuleData { missing }));
            }
        };

        let domain = derive_domain(url).map_err(|error| self.reject(url, error))?;

        let inputs =
            ReportInputs::complete(&technical_seo, &content_audit, &keywords, &backlinks);
        let executive_summary = synthesize(inputs);
        self.observer.observe(&ReportEvent::SummarySynthesized {
            domain: &domain,
            health: executive_summary.overall_health,
            quick_wins: executive_summary.quick_wins.len(),
            urgent_issues: executive_summary.urgent_issues.len(),
        });

        let recommendations = recommend(inputs);
        self.observer.observe(&ReportEvent::RecommendationsRanked {
            domain: &domain,
            count: recommendations.len(),
        });

        let analyzed_at = Utc::now();
        self.observer.observe(&ReportEvent::AssemblyCompleted {
            domain: &domain,
            analyzed_at,
        });

        Ok(Report {
            url: url.to_string(),
            domain,
            analyzed_at,
            technical_seo,
            content_audit,
            keywords,
            backlinks,
            executive_summary: Some(executive_summary),
            recommendations: Some(recommendations),
        })
    }

    /// Renders the screen HTML document.
    pub fn render(&self, report: &Report) -> String {
        let html = render::render(report);
        self.observer.observe(&ReportEvent::RenderCompleted {
            domain: &report.domain,
            mode: RenderMode::Html,
            bytes: html.len(),
        });
        html
    }

    /// Renders in the requested mode; paginated output goes through `rasterizer`.
    pub fn render_document(
        &self,
        report: &Report,
        mode: RenderMode,
        rasterizer: &dyn PageRasterizer,
    ) -> Result<RenderedDocument, RasterizeError> {
        let document = render::render_document(report, mode, rasterizer)?;
        self.observer.observe(&ReportEvent::RenderCompleted {
            domain: &report.domain,
            mode,
            bytes: document.len(),
        });
        Ok(document)
    }

    fn reject(&self, url: &str, error: ReportError) -> ReportError {
        self.observer.observe(&ReportEvent::AssemblyRejected {
            url,
            error: &error,
        });
        error
    }
}

/// Assembles a report without observation.
pub fn assemble(url: &str, modules: ReportModules) -> Result<Report, ReportError> {
    ReportAssembler::new().assemble(url, modules)
}

/// Host component of `url` exactly as written (case preserved), without
/// scheme, credentials, port, path, query or fragment.
pub fn derive_domain(url: &str) -> Result<String, ReportError> {
    let trimmed = url.trim();
    let parsed = Url::parse(trimmed).map_err(|source| ReportError::MalformedUrl {
        url: url.to_string(),
        reason: source.to_string(),
    })?;

    let normalized = parsed
        .host_str()
        .filter(|host| !host.is_empty())
        .ok_or_else(|| ReportError::MalformedUrl {
            url: url.to_string(),
            reason: "url has no host".to_string(),
        })?;

    Ok(verbatim_host(trimmed, normalized)
        .unwrap_or(normalized)
        .to_string())
}

/// The parser lowercases hosts; recover the caller's spelling from the raw
/// authority when it matches the parsed host. Special schemes accept any run
/// of slashes or backslashes after `scheme:`, including none.
fn verbatim_host<'a>(raw: &'a str, normalized: &str) -> Option<&'a str> {
    let (_, rest) = raw.split_once(':')?;
    let rest = rest.trim_start_matches(['/', '\\']);
    let authority_end = rest
        .find(|c: char| matches!(c, '/' | '?' | '#' | '\\'))
        .unwrap_or(rest.len());
    let authority = &rest[..authority_end];
    let host_and_port = authority
        .rsplit_once('@')
        .map_or(authority, |(_, host)| host);

    let host = if host_and_port.starts_with('[') {
        let close = host_and_port.find(']')?;
        &host_and_port[..=close]
    } else {
        host_and_port
            .split_once(':')
            .map_or(host_and_port, |(host, _)| host)
    };

    host.eq_ignore_ascii_case(normalized).then_some(host)
}
