use super::super::domain::{
    Level, Recommendation, RecommendationCategory, ReportInputs, Timeframe, VitalScore,
};
use crate::format::{count, percent, rounded_count, signed_percent};

/// A single remediation rule. `trigger` inspects the modules and, when the rule
/// fires, returns the description with the triggering metric filled in.
pub(crate) struct RecommendationRule {
    pub category: RecommendationCategory,
    pub priority: Level,
    pub impact: Level,
    pub timeframe: Timeframe,
    pub title: &'static str,
    pub resources: &'static [&'static str],
    pub trigger: fn(ReportInputs<'_>) -> Option<String>,
}

impl RecommendationRule {
    pub(crate) fn evaluate(&self, inputs: ReportInputs<'_>) -> Option<Recommendation> {
        let description = (self.trigger)(inputs)?;
        Some(Recommendation {
            priority: self.priority,
            category: self.category,
            title: self.title.to_string(),
            description,
            estimated_impact: self.impact,
            timeframe: self.timeframe,
            resources: self
                .resources
                .iter()
                .map(|resource| resource.to_string())
                .collect(),
        })
    }
}

/// Evaluation order: technical, content, keywords, backlinks.
pub(crate) const RULES: [RecommendationRule; 15] = [
    RecommendationRule {
        category: RecommendationCategory::Technical,
        priority: Level::High,
        impact: Level::High,
        timeframe: Timeframe::Weeks,
        title: "Improve Page Speed Performance",
        resources: &[
            "Google PageSpeed Insights",
            "web.dev: Fast load times",
            "Image compression and next-gen formats",
        ],
        trigger: slow_performance,
    },
    RecommendationRule {
        category: RecommendationCategory::Technical,
        priority: Level::High,
        impact: Level::High,
        timeframe: Timeframe::Weeks,
        title: "Optimize Largest Contentful Paint",
        resources: &[
            "web.dev: Optimize LCP",
            "Preload hero images and critical fonts",
        ],
        trigger: poor_lcp,
    },
    RecommendationRule {
        category: RecommendationCategory::Technical,
        priority: Level::Medium,
        impact: Level::Medium,
        timeframe: Timeframe::Weeks,
        title: "Reduce Cumulative Layout Shift",
        resources: &[
            "web.dev: Optimize CLS",
            "Reserve space for images, embeds and ads",
        ],
        trigger: poor_cls,
    },
    RecommendationRule {
        category: RecommendationCategory::Technical,
        priority: Level::Medium,
        impact: Level::High,
        timeframe: Timeframe::Weeks,
        title: "Resolve Technical SEO Issues",
        resources: &[
            "Google Search Console coverage report",
            "Lighthouse SEO audit",
        ],
        trigger: weak_seo_score,
    },
    RecommendationRule {
        category: RecommendationCategory::Content,
        priority: Level::High,
        impact: Level::High,
        timeframe: Timeframe::Weeks,
        title: "Optimize Title Tags",
        resources: &[
            "Google Search Central: Title links",
            "Keep titles between 50 and 60 characters",
        ],
        trigger: low_title_coverage,
    },
    RecommendationRule {
        category: RecommendationCategory::Content,
        priority: Level::High,
        impact: Level::Medium,
        timeframe: Timeframe::Weeks,
        title: "Write Meta Descriptions",
        resources: &[
            "Google Search Central: Snippets",
            "Keep descriptions between 150 and 160 characters",
        ],
        trigger: low_meta_description_coverage,
    },
    RecommendationRule {
        category: RecommendationCategory::Content,
        priority: Level::Medium,
        impact: Level::Medium,
        timeframe: Timeframe::Weeks,
        title: "Add Missing H1 Headings",
        resources: &["One descriptive H1 per page", "Heading hierarchy best practices"],
        trigger: low_h1_coverage,
    },
    RecommendationRule {
        category: RecommendationCategory::Content,
        priority: Level::Medium,
        impact: Level::Medium,
        timeframe: Timeframe::Months,
        title: "Refresh Stale Content",
        resources: &["Content audit spreadsheet", "Editorial update calendar"],
        trigger: stale_content,
    },
    RecommendationRule {
        category: RecommendationCategory::Content,
        priority: Level::Medium,
        impact: Level::High,
        timeframe: Timeframe::Months,
        title: "Expand Thin Content",
        resources: &[
            "Google Search Central: Helpful content",
            "Topic cluster planning",
        ],
        trigger: thin_content,
    },
    RecommendationRule {
        category: RecommendationCategory::Keywords,
        priority: Level::High,
        impact: Level::High,
        timeframe: Timeframe::Quarter,
        title: "Improve Keyword Rankings",
        resources: &[
            "Keyword gap analysis",
            "On-page optimization for striking-distance keywords",
        ],
        trigger: weak_top10_share,
    },
    RecommendationRule {
        category: RecommendationCategory::Keywords,
        priority: Level::High,
        impact: Level::High,
        timeframe: Timeframe::Months,
        title: "Increase Organic Traffic",
        resources: &[
            "Search Console performance report",
            "Internal linking to high-intent pages",
        ],
        trigger: flat_organic_traffic,
    },
    RecommendationRule {
        category: RecommendationCategory::Keywords,
        priority: Level::Medium,
        impact: Level::Medium,
        timeframe: Timeframe::Months,
        title: "Expand Keyword Coverage",
        resources: &["Keyword research tooling", "Long-tail content briefs"],
        trigger: narrow_keyword_coverage,
    },
    RecommendationRule {
        category: RecommendationCategory::Backlinks,
        priority: Level::High,
        impact: Level::High,
        timeframe: Timeframe::Quarter,
        title: "Build High-Quality Backlinks",
        resources: &[
            "Digital PR outreach",
            "Guest contributions on industry publications",
        ],
        trigger: few_referring_domains,
    },
    RecommendationRule {
        category: RecommendationCategory::Backlinks,
        priority: Level::High,
        impact: Level::Medium,
        timeframe: Timeframe::Months,
        title: "Recover Lost Referring Domains",
        resources: &["Lost backlink report", "Broken link reclamation outreach"],
        trigger: shrinking_referring_domains,
    },
    RecommendationRule {
        category: RecommendationCategory::Backlinks,
        priority: Level::Medium,
        impact: Level::High,
        timeframe: Timeframe::Quarter,
        title: "Strengthen Domain Authority",
        resources: &["Linkable asset creation", "Partnership and citation building"],
        trigger: low_domain_rating,
    },
];

fn slow_performance(inputs: ReportInputs<'_>) -> Option<String> {
    let score = inputs.technical_seo?.performance_score;
    (score < 60).then(|| {
        format!(
            "Performance score is {score}/100. Compress images, defer non-critical \
             JavaScript and enable caching to cut load times."
        )
    })
}

fn poor_lcp(inputs: ReportInputs<'_>) -> Option<String> {
    let lcp = &inputs.technical_seo?.core_web_vitals.lcp;
    (lcp.score == VitalScore::Poor).then(|| {
        format!(
            "Largest Contentful Paint is {}. Optimize the main hero element, server \
             response time and render-blocking resources.",
            lcp.value
        )
    })
}

fn poor_cls(inputs: ReportInputs<'_>) -> Option<String> {
    let cls = &inputs.technical_seo?.core_web_vitals.cls;
    (cls.score == VitalScore::Poor).then(|| {
        format!(
            "Cumulative Layout Shift is {}. Set explicit dimensions on media and avoid \
             inserting content above existing content.",
            cls.value
        )
    })
}

fn weak_seo_score(inputs: ReportInputs<'_>) -> Option<String> {
    let score = inputs.technical_seo?.seo_score;
    (score < 80).then(|| {
        format!(
            "SEO score is {score}/100. Fix crawlability, canonical and structured data \
             issues flagged by the audit."
        )
    })
}

fn low_title_coverage(inputs: ReportInputs<'_>) -> Option<String> {
    let coverage = inputs.content_audit?.metadata.title_tags;
    (coverage.percentage < 80.0).then(|| {
        format!(
            "Only {} of pages have title tags. Write unique, keyword-focused titles for \
             every indexable page.",
            percent(coverage.percentage)
        )
    })
}

fn low_meta_description_coverage(inputs: ReportInputs<'_>) -> Option<String> {
    let coverage = inputs.content_audit?.metadata.meta_descriptions;
    (coverage.percentage < 80.0).then(|| {
        format!(
            "Only {} of pages have meta descriptions. Add compelling summaries to lift \
             click-through rates.",
            percent(coverage.percentage)
        )
    })
}

fn low_h1_coverage(inputs: ReportInputs<'_>) -> Option<String> {
    let coverage = inputs.content_audit?.metadata.h1_tags;
    (coverage.percentage < 70.0).then(|| {
        format!(
            "Only {} of pages have an H1 heading. Give each page a single heading that \
             states its topic.",
            percent(coverage.percentage)
        )
    })
}

fn stale_content(inputs: ReportInputs<'_>) -> Option<String> {
    let freshness = inputs
        .content_audit?
        .content_metrics
        .content_freshness;
    (freshness.stale > freshness.fresh).then(|| {
        format!(
            "{} pages are stale against {} fresh ones. Update statistics, examples and \
             dates on the highest-traffic pages first.",
            count(freshness.stale),
            count(freshness.fresh)
        )
    })
}

fn thin_content(inputs: ReportInputs<'_>) -> Option<String> {
    let words = inputs
        .content_audit?
        .content_metrics
        .average_word_count;
    (words < 600.0).then(|| {
        format!(
            "Pages average {} words. Deepen coverage of each topic to satisfy search \
             intent.",
            rounded_count(words)
        )
    })
}

fn weak_top10_share(inputs: ReportInputs<'_>) -> Option<String> {
    let top10 = inputs.keywords?.rank_distribution.top10;
    (top10.percentage < 20.0).then(|| {
        format!(
            "Only {} of tracked keywords rank in the top 10. Target keywords sitting in \
             positions 11-30 with on-page improvements.",
            percent(top10.percentage)
        )
    })
}

fn flat_organic_traffic(inputs: ReportInputs<'_>) -> Option<String> {
    let traffic = inputs.keywords?.organic_traffic;
    (traffic.change <= 0.0).then(|| {
        format!(
            "Organic traffic changed {} to an estimated {} visits. Publish content for \
             high-volume opportunities and strengthen internal links.",
            signed_percent(traffic.change),
            rounded_count(traffic.estimated)
        )
    })
}

fn narrow_keyword_coverage(inputs: ReportInputs<'_>) -> Option<String> {
    let indexed = inputs.keywords?.indexed_keywords;
    (indexed < 50).then(|| {
        format!(
            "Only {} keywords are indexed. Build pages around related long-tail queries.",
            count(indexed)
        )
    })
}

fn few_referring_domains(inputs: ReportInputs<'_>) -> Option<String> {
    let domains = inputs.backlinks?.referring_domains;
    (domains < 100).then(|| {
        format!(
            "Only {} referring domains link to the site. Earn links from relevant, \
             authoritative sites.",
            count(domains)
        )
    })
}

fn shrinking_referring_domains(inputs: ReportInputs<'_>) -> Option<String> {
    let growth = inputs.backlinks?.referring_domains_growth;
    (growth.change < 0.0).then(|| {
        format!(
            "Referring domains changed {} this month. Reach out to reclaim lost links \
             and fix broken link targets.",
            signed_percent(growth.change)
        )
    })
}

fn low_domain_rating(inputs: ReportInputs<'_>) -> Option<String> {
    let rating = inputs.backlinks?.domain_rating;
    (rating < 50).then(|| {
        format!(
            "Domain rating is {rating}. Create linkable assets and pursue partnerships \
             to grow authority."
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::tests::common::ideal_modules;
    use std::collections::HashSet;

    #[test]
    fn rule_titles_are_unique() {
        let titles: HashSet<_> = RULES.iter().map(|rule| rule.title).collect();
        assert_eq!(titles.len(), RULES.len());
    }

    #[test]
    fn rules_are_grouped_by_category_in_evaluation_order() {
        let categories: Vec<_> = RULES.iter().map(|rule| rule.category).collect();
        let mut sorted = categories.clone();
        sorted.sort_by_key(|category| match category {
            RecommendationCategory::Technical => 0,
            RecommendationCategory::Content => 1,
            RecommendationCategory::Keywords => 2,
            RecommendationCategory::Backlinks => 3,
        });
        assert_eq!(categories, sorted);
    }

    #[test]
    fn thin_content_interpolates_word_count() {
        let mut modules = ideal_modules();
        if let Some(content) = modules.content_audit.as_mut() {
            content.content_metrics.average_word_count = 450.0;
        }

        let description = thin_content(modules.inputs()).expect("rule fires");
        assert!(description.starts_with("Pages average 450 words."));
    }

    #[test]
    fn stale_rule_requires_strictly_more_stale_pages() {
        let mut modules = ideal_modules();
        if let Some(content) = modules.content_audit.as_mut() {
            content.content_metrics.content_freshness.fresh = 10;
            content.content_metrics.content_freshness.stale = 10;
        }
        assert!(stale_content(modules.inputs()).is_none());

        if let Some(content) = modules.content_audit.as_mut() {
            content.content_metrics.content_freshness.stale = 11;
        }
        assert!(stale_content(modules.inputs()).is_some());
    }

    #[test]
    fn rules_skip_absent_modules() {
        let inputs = ReportInputs::default();
        assert!(RULES.iter().all(|rule| rule.evaluate(inputs).is_none()));
    }
}
