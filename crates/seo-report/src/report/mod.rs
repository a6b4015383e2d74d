pub mod assembler;
pub mod domain;
pub mod observer;
pub mod recommendations;
pub mod summary;
pub mod thresholds;

#[cfg(test)]
pub(crate) mod tests;

pub use assembler::{assemble, derive_domain, ReportAssembler, ReportError};
pub use domain::*;
pub use observer::{NoopObserver, ReportEvent, ReportObserver, TracingObserver};
pub use recommendations::{recommend, MAX_RECOMMENDATIONS};
pub use summary::{synthesize, MAX_FINDINGS};
pub use thresholds::{GradeThresholds, DISPLAY_SCORE_THRESHOLDS, HEALTH_THRESHOLDS};
