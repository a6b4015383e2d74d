//! One pure function per document section. Every provider-sourced string is
//! escaped here before it reaches markup.

use chrono::{DateTime, Utc};
use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::format::{count, percent, rounded_count, signed_count, signed_percent};
use crate::report::domain::{
    AnchorText, BacklinksData, ContentAuditData, ExecutiveSummary, KeywordEntry, KeywordsData,
    ModuleKind, Recommendation, ReferringDomain, Report, TechnicalIssue, TechnicalSeoData,
    TopPage, WebVital,
};
use crate::report::thresholds::DISPLAY_SCORE_THRESHOLDS;

pub(crate) const MAX_TOP_PAGES: usize = 10;
pub(crate) const MAX_KEYWORD_ROWS: usize = 5;
pub(crate) const MAX_REFERRING_DOMAINS: usize = 10;
pub(crate) const MAX_ANCHOR_TEXTS: usize = 10;

pub(crate) fn header(report: &Report) -> String {
    format!(
        r#"<header class="report-header">
<h1>SEO Analysis Report</h1>
<p class="report-domain">{domain}</p>
<p class="report-url"><a href="{href}">{url}</a></p>
<p class="report-date">Analyzed {date}</p>
</header>"#,
        domain = encode_text(&report.domain),
        href = encode_double_quoted_attribute(&report.url),
        url = encode_text(&report.url),
        date = long_date(report.analyzed_at),
    )
}

pub(crate) fn executive_summary(summary: &ExecutiveSummary) -> String {
    let ranking = &summary.current_ranking;
    let cards = [
        card(
            "Keywords in Top 10",
            &count(ranking.keywords_in_top10),
            None,
            None,
        ),
        card(
            "Estimated Monthly Traffic",
            &rounded_count(ranking.estimated_traffic),
            Some(summary.traffic_status.label()),
            None,
        ),
        card(
            "Domain Authority",
            &ranking.domain_authority.to_string(),
            Some(&*format!(
                "{} competitive position",
                summary.competitive_position.label()
            )),
            Some(score_class(ranking.domain_authority)),
        ),
    ];

    format!(
        r#"<section class="report-section executive-summary">
<h2>Executive Summary</h2>
<div class="health-badge {grade}">Overall Health: {label}</div>
<div class="card-grid">{cards}</div>
<div class="findings">
<div class="finding-list quick-wins"><h3>Quick Wins</h3>{quick_wins}</div>
<div class="finding-list urgent-issues"><h3>Urgent Issues</h3>{urgent_issues}</div>
</div>
</section>"#,
        grade = summary.overall_health.as_str(),
        label = summary.overall_health.label(),
        cards = cards.concat(),
        quick_wins = bullet_list(&summary.quick_wins, "No quick wins identified."),
        urgent_issues = bullet_list(&summary.urgent_issues, "No urgent issues found."),
    )
}

pub(crate) fn technical_seo(technical: &TechnicalSeoData) -> String {
    let scores = [
        ("Performance", technical.performance_score),
        ("SEO", technical.seo_score),
        ("Accessibility", technical.accessibility_score),
    ]
    .map(|(label, score)| {
        card(
            label,
            &score.to_string(),
            Some("out of 100"),
            Some(score_class(score)),
        )
    });

    let vitals = &technical.core_web_vitals;
    let vital_cards = [
        ("Largest Contentful Paint", &vitals.lcp),
        ("Cumulative Layout Shift", &vitals.cls),
        ("First Input Delay", &vitals.fid),
    ]
    .map(|(label, vital)| vital_card(label, vital));

    let issues = if technical.issues.is_empty() {
        empty_state("No technical issues detected.")
    } else {
        let items: String = technical.issues.iter().map(issue_item).collect();
        format!(r#"<ul class="issue-list">{items}</ul>"#)
    };

    format!(
        r#"<section class="report-section technical-seo">
<h2>{title}</h2>
<div class="card-grid">{scores}</div>
<h3>Core Web Vitals</h3>
<div class="card-grid">{vitals}</div>
<h3>Issues</h3>
{issues}
</section>"#,
        title = ModuleKind::TechnicalSeo.label(),
        scores = scores.concat(),
        vitals = vital_cards.concat(),
    )
}

pub(crate) fn content_audit(content: &ContentAuditData) -> String {
    let metrics = &content.content_metrics;
    let cards = [
        card("Total Pages", &count(content.total_pages), None, None),
        card("Indexed Pages", &count(content.indexed_pages), None, None),
        card(
            "Average Word Count",
            &rounded_count(metrics.average_word_count),
            None,
            None,
        ),
        card(
            "Pages with CTAs",
            &percent(metrics.pages_with_ctas.percentage),
            Some(&*format!("{} pages", count(metrics.pages_with_ctas.count))),
            None,
        ),
    ];

    let metadata = &content.metadata;
    let bars = [
        ("Title Tags", metadata.title_tags.percentage),
        ("Meta Descriptions", metadata.meta_descriptions.percentage),
        ("H1 Tags", metadata.h1_tags.percentage),
    ]
    .map(|(label, percentage)| completeness_bar(label, percentage));

    let top_pages = table(
        &["Page", "Word Count", "Traffic"],
        content.top_pages.iter().take(MAX_TOP_PAGES).map(top_page_row),
        "No top pages reported.",
    );

    format!(
        r#"<section class="report-section content-audit">
<h2>{title}</h2>
<div class="card-grid">{cards}</div>
<h3>Metadata Completeness</h3>
{bars}
<h3>Top Pages</h3>
{top_pages}
</section>"#,
        title = ModuleKind::ContentAudit.label(),
        cards = cards.concat(),
        bars = bars.concat(),
    )
}

pub(crate) fn keywords(keywords: &KeywordsData) -> String {
    let distribution = &keywords.rank_distribution;
    let traffic = &keywords.organic_traffic;
    let cards = [
        card(
            "Total Keywords",
            &count(keywords.total_keywords),
            Some(&*format!("{} indexed", count(keywords.indexed_keywords))),
            None,
        ),
        card(
            "Top 3 Positions",
            &count(distribution.top3.count),
            Some(&*percent(distribution.top3.percentage)),
            None,
        ),
        card(
            "Top 10 Positions",
            &count(distribution.top10.count),
            Some(&*percent(distribution.top10.percentage)),
            None,
        ),
        card(
            "Organic Traffic",
            &rounded_count(traffic.estimated),
            Some(&*format!("{} vs last period", signed_percent(traffic.change))),
            None,
        ),
    ];

    let columns = ["Keyword", "Position", "Volume", "Change"];
    let best = table(
        &columns,
        keywords
            .best_keywords
            .iter()
            .take(MAX_KEYWORD_ROWS)
            .map(keyword_row),
        "No ranking keywords yet.",
    );
    let worst = table(
        &columns,
        keywords
            .worst_keywords
            .iter()
            .take(MAX_KEYWORD_ROWS)
            .map(keyword_row),
        "No underperforming keywords.",
    );

    format!(
        r#"<section class="report-section keywords">
<h2>{title}</h2>
<div class="card-grid">{cards}</div>
<h3>Best Performing Keywords</h3>
{best}
<h3>Keywords Needing Attention</h3>
{worst}
</section>"#,
        title = ModuleKind::Keywords.label(),
        cards = cards.concat(),
    )
}

pub(crate) fn backlinks(backlinks: &BacklinksData) -> String {
    let growth = &backlinks.referring_domains_growth;
    let cards = [
        card("Total Backlinks", &count(backlinks.total_backlinks), None, None),
        card(
            "Referring Domains",
            &count(backlinks.referring_domains),
            Some(&*format!("{} this month", signed_percent(growth.change))),
            None,
        ),
        card(
            "Domain Rating",
            &backlinks.domain_rating.to_string(),
            None,
            Some(score_class(backlinks.domain_rating)),
        ),
        card(
            "Organic Traffic",
            &count(backlinks.organic_traffic),
            None,
            None,
        ),
    ];

    let domains = table(
        &["Domain", "Domain Rating", "Backlinks", "Traffic"],
        backlinks
            .top_referring_domains
            .iter()
            .take(MAX_REFERRING_DOMAINS)
            .map(referring_domain_row),
        "No referring domains found.",
    );
    let anchors = table(
        &["Anchor Text", "Count", "Share"],
        backlinks
            .anchor_texts
            .iter()
            .take(MAX_ANCHOR_TEXTS)
            .map(anchor_row),
        "No anchor texts found.",
    );

    format!(
        r#"<section class="report-section backlinks">
<h2>{title}</h2>
<div class="card-grid">{cards}</div>
<h3>Top Referring Domains</h3>
{domains}
<h3>Anchor Text Distribution</h3>
{anchors}
</section>"#,
        title = ModuleKind::Backlinks.label(),
        cards = cards.concat(),
    )
}

/// `None` when there is nothing to recommend; the section is dropped entirely.
pub(crate) fn recommendations(recommendations: &[Recommendation]) -> Option<String> {
    if recommendations.is_empty() {
        return None;
    }

    let cards: String = recommendations.iter().map(recommendation_card).collect();
    Some(format!(
        r#"<section class="report-section recommendations">
<h2>Recommendations</h2>
{cards}
</section>"#
    ))
}

pub(crate) fn footer(report: &Report) -> String {
    format!(
        r#"<footer class="report-footer">
<p>Report generated on {date} for {domain}.</p>
</footer>"#,
        date = long_date(report.analyzed_at),
        domain = encode_text(&report.domain),
    )
}

fn recommendation_card(recommendation: &Recommendation) -> String {
    let resources = if recommendation.resources.is_empty() {
        String::new()
    } else {
        let items: String = recommendation
            .resources
            .iter()
            .map(|resource| format!("<li>{}</li>", encode_text(resource)))
            .collect();
        format!(r#"<ul class="resources">{items}</ul>"#)
    };

    format!(
        r#"<article class="recommendation priority-{priority_class}">
<div><span class="priority-badge">{priority} Priority</span><span class="category">{category}</span></div>
<h3>{title}</h3>
<p>{description}</p>
<dl><dt>Estimated Impact</dt><dd>{impact}</dd><dt>Timeframe</dt><dd>{timeframe}</dd></dl>
{resources}
</article>"#,
        priority_class = recommendation.priority.as_str(),
        priority = recommendation.priority.label(),
        category = recommendation.category.label(),
        title = encode_text(&recommendation.title),
        description = encode_text(&recommendation.description),
        impact = recommendation.estimated_impact.label(),
        timeframe = recommendation.timeframe.label(),
    )
}

fn card(label: &str, value: &str, detail: Option<&str>, grade: Option<&str>) -> String {
    let detail = detail
        .map(|detail| format!(r#"<div class="card-detail">{}</div>"#, encode_text(detail)))
        .unwrap_or_default();
    format!(
        r#"<div class="card {grade}"><div class="card-label">{label}</div><div class="card-value">{value}</div>{detail}</div>"#,
        grade = grade.unwrap_or(""),
        label = encode_text(label),
        value = encode_text(value),
    )
}

fn vital_card(label: &str, vital: &WebVital) -> String {
    card(
        label,
        &vital.value,
        Some(vital.score.label()),
        Some(vital.score.css_class()),
    )
}

fn issue_item(issue: &TechnicalIssue) -> String {
    format!(
        r#"<li class="issue issue-{kind}"><span class="issue-type">{kind_label}</span><span class="impact">{impact} impact</span><strong>{title}</strong><p>{description}</p></li>"#,
        kind = issue.issue_type.label().to_ascii_lowercase(),
        kind_label = issue.issue_type.label(),
        impact = issue.impact.label(),
        title = encode_text(&issue.title),
        description = encode_text(&issue.description),
    )
}

fn completeness_bar(label: &str, percentage: f64) -> String {
    let width = if percentage.is_finite() {
        percentage.clamp(0.0, 100.0).round()
    } else {
        0.0
    };
    format!(
        r#"<div class="bar"><span>{label}</span><div class="bar-track"><div class="bar-fill {grade}" style="width: {width}%"></div></div><span>{value}</span></div>"#,
        grade = DISPLAY_SCORE_THRESHOLDS.grade(percentage).as_str(),
        value = percent(percentage),
    )
}

fn top_page_row(page: &TopPage) -> Vec<Cell> {
    vec![
        Cell::Markup(format!(
            r#"<a href="{href}">{title}</a>"#,
            href = encode_double_quoted_attribute(&page.url),
            title = encode_text(if page.title.is_empty() {
                &page.url
            } else {
                &page.title
            }),
        )),
        Cell::Numeric(count(u64::from(page.word_count))),
        Cell::Numeric(count(page.traffic)),
    ]
}

fn keyword_row(entry: &KeywordEntry) -> Vec<Cell> {
    vec![
        Cell::Text(entry.keyword.clone()),
        Cell::Numeric(entry.position.to_string()),
        Cell::Numeric(count(entry.volume)),
        Cell::Numeric(signed_count(i64::from(entry.change))),
    ]
}

fn referring_domain_row(domain: &ReferringDomain) -> Vec<Cell> {
    vec![
        Cell::Text(domain.domain.clone()),
        Cell::Numeric(domain.domain_rating.to_string()),
        Cell::Numeric(count(domain.backlinks)),
        Cell::Numeric(count(domain.traffic)),
    ]
}

fn anchor_row(anchor: &AnchorText) -> Vec<Cell> {
    vec![
        Cell::Text(anchor.text.clone()),
        Cell::Numeric(count(anchor.count)),
        Cell::Numeric(percent(anchor.percentage)),
    ]
}

enum Cell {
    /// Escaped on output.
    Text(String),
    Numeric(String),
    /// Already escaped.
    Markup(String),
}

impl Cell {
    fn render(&self) -> String {
        match self {
            Self::Text(text) => format!("<td>{}</td>", encode_text(text)),
            Self::Numeric(value) => format!(r#"<td class="numeric">{}</td>"#, encode_text(value)),
            Self::Markup(markup) => format!("<td>{markup}</td>"),
        }
    }
}

fn table(columns: &[&str], rows: impl Iterator<Item = Vec<Cell>>, empty: &str) -> String {
    let body: String = rows
        .map(|cells| {
            let cells: String = cells.iter().map(Cell::render).collect();
            format!("<tr>{cells}</tr>")
        })
        .collect();
    if body.is_empty() {
        return empty_state(empty);
    }

    let head: String = columns
        .iter()
        .enumerate()
        .map(|(index, column)| {
            if index == 0 {
                format!("<th>{column}</th>")
            } else {
                format!(r#"<th class="numeric">{column}</th>"#)
            }
        })
        .collect();
    format!("<table><thead><tr>{head}</tr></thead><tbody>{body}</tbody></table>")
}

fn bullet_list(items: &[String], empty: &str) -> String {
    if items.is_empty() {
        return empty_state(empty);
    }
    let items: String = items
        .iter()
        .map(|item| format!("<li>{}</li>", encode_text(item)))
        .collect();
    format!("<ul>{items}</ul>")
}

fn empty_state(message: &str) -> String {
    format!(r#"<p class="empty-state">{message}</p>"#)
}

fn score_class(score: u8) -> &'static str {
    DISPLAY_SCORE_THRESHOLDS.grade(f64::from(score)).as_str()
}

fn long_date(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%B %-d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::domain::{IssueType, Level};
    use crate::report::tests::common::{
        ideal_content, ideal_keywords, ideal_modules, ideal_technical, report_from,
    };

    #[test]
    fn header_escapes_url_and_formats_date() {
        let mut report = report_from(ideal_modules());
        report.url = "https://www.example.com/?q=<b>&x=\"1\"".to_string();

        let html = header(&report);

        assert!(html.contains("Analyzed October 1, 2025"));
        assert!(html.contains("?q=&lt;b&gt;&amp;x="));
        assert!(!html.contains("<b>"));
    }

    #[test]
    fn technical_issue_text_is_escaped() {
        let mut technical = ideal_technical();
        technical.issues = vec![TechnicalIssue {
            issue_type: IssueType::Error,
            title: "<script>alert(1)</script>".to_string(),
            description: "Tom & Jerry".to_string(),
            impact: Level::High,
        }];

        let html = technical_seo(&technical);

        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(html.contains("Tom &amp; Jerry"));
        assert!(html.contains(r#"class="issue issue-error""#));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn technical_section_shows_empty_state_without_issues() {
        let mut technical = ideal_technical();
        technical.issues.clear();

        let html = technical_seo(&technical);

        assert!(html.contains("No technical issues detected."));
        assert!(!html.contains("issue-list"));
    }

    #[test]
    fn empty_lists_keep_every_section_with_empty_states() {
        let mut report = report_from(ideal_modules());
        report.technical_seo.issues.clear();
        report.content_audit.top_pages.clear();
        report.keywords.best_keywords.clear();
        report.keywords.worst_keywords.clear();
        report.backlinks.top_referring_domains.clear();
        report.backlinks.anchor_texts.clear();
        report.recommendations = Some(Vec::new());

        let html = crate::render::render(&report);

        for message in [
            "No technical issues detected.",
            "No top pages reported.",
            "No ranking keywords yet.",
            "No underperforming keywords.",
            "No referring domains found.",
            "No anchor texts found.",
        ] {
            assert!(
                html.contains(&format!(r#"<p class="empty-state">{message}</p>"#)),
                "missing empty state: {message}"
            );
        }
        for heading in [
            "<h1>SEO Analysis Report</h1>".to_string(),
            "<h2>Executive Summary</h2>".to_string(),
            format!("<h2>{}</h2>", ModuleKind::TechnicalSeo.label()),
            format!("<h2>{}</h2>", ModuleKind::ContentAudit.label()),
            format!("<h2>{}</h2>", ModuleKind::Keywords.label()),
            format!("<h2>{}</h2>", ModuleKind::Backlinks.label()),
        ] {
            assert!(html.contains(&heading), "missing heading: {heading}");
        }
        assert!(!html.contains("<h2>Recommendations</h2>"));
        assert!(!html.contains("<table>"));
    }

    #[test]
    fn score_cards_use_display_thresholds() {
        let mut technical = ideal_technical();
        technical.performance_score = 82;
        technical.seo_score = 60;
        technical.accessibility_score = 39;

        let html = technical_seo(&technical);

        assert!(html.contains(r#"<div class="card excellent"><div class="card-label">Performance</div><div class="card-value">82</div>"#));
        assert!(html.contains(r#"<div class="card good"><div class="card-label">SEO</div>"#));
        assert!(html.contains(r#"<div class="card poor"><div class="card-label">Accessibility</div>"#));
    }

    #[test]
    fn top_pages_are_capped_at_ten_rows() {
        let content = ideal_content();
        assert!(content.top_pages.len() > MAX_TOP_PAGES);

        let html = content_audit(&content);

        assert_eq!(html.matches("<tr>").count(), MAX_TOP_PAGES + 1);
        assert!(html.contains("Guide 10"));
        assert!(!html.contains("Guide 11"));
    }

    #[test]
    fn keyword_tables_are_capped_at_five_rows() {
        let keywords = ideal_keywords();
        assert!(keywords.best_keywords.len() > MAX_KEYWORD_ROWS);

        let html = super::keywords(&keywords);

        assert!(html.contains("seo tool 5"));
        assert!(!html.contains("seo tool 6"));
        assert!(html.contains("<td>seo audit checklist</td>"));
    }

    #[test]
    fn counts_and_percentages_follow_display_format() {
        let html = super::keywords(&ideal_keywords());

        assert!(html.contains(r#"<div class="card-value">1,200</div>"#));
        assert!(html.contains(r#"<div class="card-value">152,000</div>"#));
        assert!(html.contains(r#"<div class="card-detail">40%</div>"#));
        assert!(html.contains("+12% vs last period"));
        assert!(html.contains(r#"<td class="numeric">-6</td>"#));
    }

    #[test]
    fn completeness_bars_clamp_width() {
        let bar = completeness_bar("Title Tags", 120.4);

        assert!(bar.contains("width: 100%"));
        assert!(bar.contains("<span>120%</span>"));
        assert!(bar.contains("bar-fill excellent"));
    }

    #[test]
    fn empty_recommendations_produce_no_section() {
        assert_eq!(recommendations(&[]), None);
    }
}
