use super::assembler::ReportError;
use super::domain::HealthGrade;
use crate::render::RenderMode;
use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

/// Checkpoints emitted while a report is assembled and rendered.
#[derive(Debug, Clone, Copy)]
pub enum ReportEvent<'a> {
    AssemblyStarted {
        url: &'a str,
    },
    AssemblyRejected {
        url: &'a str,
        error: &'a ReportError,
    },
    SummarySynthesized {
        domain: &'a str,
        health: HealthGrade,
        quick_wins: usize,
        urgent_issues: usize,
    },
    RecommendationsRanked {
        domain: &'a str,
        count: usize,
    },
    AssemblyCompleted {
        domain: &'a str,
        analyzed_at: DateTime<Utc>,
    },
    RenderCompleted {
        domain: &'a str,
        mode: RenderMode,
        bytes: usize,
    },
}

impl ReportEvent<'_> {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::AssemblyStarted { .. } => "assembly_started",
            Self::AssemblyRejected { .. } => "assembly_rejected",
            Self::SummarySynthesized { .. } => "summary_synthesized",
            Self::RecommendationsRanked { .. } => "recommendations_ranked",
            Self::AssemblyCompleted { .. } => "assembly_completed",
            Self::RenderCompleted { .. } => "render_completed",
        }
    }
}

/// Receives pipeline checkpoints. Implementations must not fail or block.
pub trait ReportObserver: Send + Sync {
    fn observe(&self, event: &ReportEvent<'_>);
}

impl<T: ReportObserver + ?Sized> ReportObserver for std::sync::Arc<T> {
    fn observe(&self, event: &ReportEvent<'_>) {
        (**self).observe(event)
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl ReportObserver for NoopObserver {
    fn observe(&self, _event: &ReportEvent<'_>) {}
}

/// Forwards checkpoints to `tracing` as structured events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl ReportObserver for TracingObserver {
    fn observe(&self, event: &ReportEvent<'_>) {
        match *event {
            ReportEvent::AssemblyStarted { url } => debug!(%url, "assembling report"),
            ReportEvent::AssemblyRejected { url, error } => {
                warn!(%url, %error, "report assembly rejected")
            }
            ReportEvent::SummarySynthesized {
                domain,
                health,
                quick_wins,
                urgent_issues,
            } => debug!(
                %domain,
                health = health.as_str(),
                quick_wins,
                urgent_issues,
                "executive summary synthesized"
            ),
            ReportEvent::RecommendationsRanked { domain, count } => {
                debug!(%domain, count, "recommendations ranked")
            }
            ReportEvent::AssemblyCompleted {
                domain,
                analyzed_at,
            } => info!(%domain, %analyzed_at, "report assembled"),
            ReportEvent::RenderCompleted {
                domain,
                mode,
                bytes,
            } => info!(%domain, mode = mode.as_str(), bytes, "report rendered"),
        }
    }
}
