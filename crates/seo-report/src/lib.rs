//! Aggregates page performance, content crawl, keyword rank and backlink
//! payloads into one report with a synthesized executive summary and ranked
//! recommendations, and renders it as a self-contained HTML document.

pub mod config;
pub mod error;
pub mod format;
pub mod render;
pub mod report;
pub mod telemetry;

pub use render::{render, render_document, RenderMode, RenderedDocument};
pub use report::{assemble, recommend, synthesize, Report, ReportError, ReportModules};
