mod paginated;
mod sections;

pub use paginated::{HeadlessBrowserRasterizer, PageRasterizer, RasterizeError};

use crate::report::domain::Report;

const SCREEN_STYLES: &str = include_str!("templates/report.css");
const PRINT_STYLES: &str = include_str!("templates/print.css");

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RenderMode {
    #[default]
    Html,
    Paginated,
}

impl RenderMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Paginated => "paginated",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderedDocument {
    Html(String),
    Pdf(Vec<u8>),
}

impl RenderedDocument {
    pub fn len(&self) -> usize {
        match self {
            Self::Html(html) => html.len(),
            Self::Pdf(bytes) => bytes.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub const fn content_type(&self) -> &'static str {
        match self {
            Self::Html(_) => "text/html; charset=utf-8",
            Self::Pdf(_) => "application/pdf",
        }
    }

    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Html(_) => "html",
            Self::Pdf(_) => "pdf",
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Html(html) => html.as_bytes(),
            Self::Pdf(bytes) => bytes,
        }
    }
}

/// Self-contained screen document. Never fails.
pub fn render(report: &Report) -> String {
    compose(report, &[SCREEN_STYLES])
}

/// Same sections as [`render`] with A4 print rules layered on top.
pub fn render_print(report: &Report) -> String {
    compose(report, &[SCREEN_STYLES, PRINT_STYLES])
}

pub fn render_document(
    report: &Report,
    mode: RenderMode,
    rasterizer: &dyn PageRasterizer,
) -> Result<RenderedDocument, RasterizeError> {
    match mode {
        RenderMode::Html => Ok(RenderedDocument::Html(render(report))),
        RenderMode::Paginated => rasterizer
            .rasterize(&render_print(report))
            .map(RenderedDocument::Pdf),
    }
}

fn compose(report: &Report, styles: &[&str]) -> String {
    let body: Vec<String> = [
        Some(sections::header(report)),
        report
            .executive_summary
            .as_ref()
            .map(sections::executive_summary),
        Some(sections::technical_seo(&report.technical_seo)),
        Some(sections::content_audit(&report.content_audit)),
        Some(sections::keywords(&report.keywords)),
        Some(sections::backlinks(&report.backlinks)),
        report
            .recommendations
            .as_deref()
            .and_then(sections::recommendations),
        Some(sections::footer(report)),
    ]
    .into_iter()
    .flatten()
    .collect();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>SEO Report: {domain}</title>
<style>
{styles}
</style>
</head>
<body>
<main>
{body}
</main>
</body>
</html>
"#,
        domain = html_escape::encode_text(&report.domain),
        styles = styles.concat(),
        body = body.join("\n"),
    )
}
