use super::domain::{
    CompetitivePosition, CurrentRanking, ExecutiveSummary, HealthGrade, ReportInputs,
    TrafficStatus, VitalScore,
};
use super::thresholds::HEALTH_THRESHOLDS;
use crate::format::{percent, rounded_count, signed_percent};

/// Upper bound on quick wins and urgent issues surfaced in a summary.
pub const MAX_FINDINGS: usize = 5;

type Finding = fn(ReportInputs<'_>) -> Option<String>;

const QUICK_WIN_CHECKS: [Finding; 7] = [
    stable_layout,
    strong_seo_score,
    in_depth_content,
    title_tag_coverage,
    top10_presence,
    referring_domain_growth,
    high_domain_rating,
];

const URGENT_ISSUE_CHECKS: [Finding; 7] = [
    critical_performance,
    slow_lcp,
    missing_title_tags,
    missing_meta_descriptions,
    missing_h1_tags,
    weak_top10_presence,
    referring_domain_loss,
];

/// Derives the executive summary from the provider payloads.
///
/// Never fails: an absent module grades the report `poor` and silences every
/// checklist entry that depends on it.
pub fn synthesize(inputs: ReportInputs<'_>) -> ExecutiveSummary {
    ExecutiveSummary {
        overall_health: overall_health(inputs),
        current_ranking: current_ranking(inputs),
        quick_wins: collect_findings(&QUICK_WIN_CHECKS, inputs),
        urgent_issues: collect_findings(&URGENT_ISSUE_CHECKS, inputs),
        traffic_status: traffic_status(inputs),
        competitive_position: competitive_position(inputs),
    }
}

pub(crate) fn overall_health(inputs: ReportInputs<'_>) -> HealthGrade {
    if !inputs.is_complete() {
        return HealthGrade::Poor;
    }
    let (Some(technical), Some(content)) = (inputs.technical_seo, inputs.content_audit) else {
        return HealthGrade::Poor;
    };

    let components = [
        f64::from(technical.performance_score),
        f64::from(technical.seo_score),
        content.metadata.average(),
    ];
    let average = components.iter().sum::<f64>() / components.len() as f64;

    HEALTH_THRESHOLDS.grade(average)
}

fn current_ranking(inputs: ReportInputs<'_>) -> CurrentRanking {
    CurrentRanking {
        keywords_in_top10: inputs
            .keywords
            .map(|keywords| keywords.rank_distribution.top10.count)
            .unwrap_or_default(),
        estimated_traffic: inputs
            .keywords
            .map(|keywords| keywords.organic_traffic.estimated)
            .unwrap_or_default(),
        domain_authority: inputs
            .backlinks
            .map(|backlinks| backlinks.domain_rating)
            .unwrap_or_default(),
    }
}

fn traffic_status(inputs: ReportInputs<'_>) -> TrafficStatus {
    let Some(keywords) = inputs.keywords else {
        return TrafficStatus::Stable;
    };

    let change = keywords.organic_traffic.change;
    if change > 5.0 {
        TrafficStatus::Increasing
    } else if change < -5.0 {
        TrafficStatus::Decreasing
    } else {
        TrafficStatus::Stable
    }
}

fn competitive_position(inputs: ReportInputs<'_>) -> CompetitivePosition {
    let (Some(keywords), Some(backlinks)) = (inputs.keywords, inputs.backlinks) else {
        return CompetitivePosition::Weak;
    };

    let average = (f64::from(backlinks.domain_rating)
        + keywords.rank_distribution.top10.percentage)
        / 2.0;

    if average >= 70.0 {
        CompetitivePosition::Strong
    } else if average >= 40.0 {
        CompetitivePosition::Moderate
    } else {
        CompetitivePosition::Weak
    }
}

fn collect_findings(checks: &[Finding], inputs: ReportInputs<'_>) -> Vec<String> {
    checks
        .iter()
        .filter_map(|check| check(inputs))
        .take(MAX_FINDINGS)
        .collect()
}

fn stable_layout(inputs: ReportInputs<'_>) -> Option<String> {
    let cls = &inputs.technical_seo?.core_web_vitals.cls;
    (cls.score == VitalScore::Good)
        .then(|| format!("Excellent visual stability (CLS {} rated good)", cls.value))
}

fn strong_seo_score(inputs: ReportInputs<'_>) -> Option<String> {
    let score = inputs.technical_seo?.seo_score;
    (score >= 90).then(|| format!("Strong on-page SEO foundation (SEO score {score}/100)"))
}

fn in_depth_content(inputs: ReportInputs<'_>) -> Option<String> {
    let words = inputs
        .content_audit?
        .content_metrics
        .average_word_count;
    (words > 800.0).then(|| {
        format!(
            "In-depth content averaging {} words per page",
            rounded_count(words)
        )
    })
}

fn title_tag_coverage(inputs: ReportInputs<'_>) -> Option<String> {
    let coverage = inputs.content_audit?.metadata.title_tags.percentage;
    (coverage > 80.0).then(|| format!("Title tags present on {} of pages", percent(coverage)))
}

fn top10_presence(inputs: ReportInputs<'_>) -> Option<String> {
    let share = inputs
        .keywords?
        .rank_distribution
        .top10
        .percentage;
    (share >= 30.0).then(|| {
        format!(
            "{} of tracked keywords already rank in the top 10",
            percent(share)
        )
    })
}

fn referring_domain_growth(inputs: ReportInputs<'_>) -> Option<String> {
    let change = inputs.backlinks?.referring_domains_growth.change;
    (change > 0.0).then(|| {
        format!(
            "Referring domains growing ({} month over month)",
            signed_percent(change)
        )
    })
}

fn high_domain_rating(inputs: ReportInputs<'_>) -> Option<String> {
    let rating = inputs.backlinks?.domain_rating;
    (rating > 70).then(|| format!("High domain authority (domain rating {rating})"))
}

fn critical_performance(inputs: ReportInputs<'_>) -> Option<String> {
    let score = inputs.technical_seo?.performance_score;
    (score < 50).then(|| format!("Critical page speed problems (performance score {score}/100)"))
}

fn slow_lcp(inputs: ReportInputs<'_>) -> Option<String> {
    let lcp = &inputs.technical_seo?.core_web_vitals.lcp;
    (lcp.score == VitalScore::Poor)
        .then(|| format!("Largest Contentful Paint is too slow ({})", lcp.value))
}

fn missing_title_tags(inputs: ReportInputs<'_>) -> Option<String> {
    let coverage = inputs.content_audit?.metadata.title_tags.percentage;
    (coverage < 50.0).then(|| format!("Only {} of pages have title tags", percent(coverage)))
}

fn missing_meta_descriptions(inputs: ReportInputs<'_>) -> Option<String> {
    let coverage = inputs
        .content_audit?
        .metadata
        .meta_descriptions
        .percentage;
    (coverage < 50.0).then(|| {
        format!(
            "Only {} of pages have meta descriptions",
            percent(coverage)
        )
    })
}

fn missing_h1_tags(inputs: ReportInputs<'_>) -> Option<String> {
    let coverage = inputs.content_audit?.metadata.h1_tags.percentage;
    (coverage < 30.0).then(|| format!("Only {} of pages have an H1 heading", percent(coverage)))
}

fn weak_top10_presence(inputs: ReportInputs<'_>) -> Option<String> {
    let share = inputs
        .keywords?
        .rank_distribution
        .top10
        .percentage;
    (share < 10.0).then(|| {
        format!(
            "Only {} of tracked keywords rank in the top 10",
            percent(share)
        )
    })
}

fn referring_domain_loss(inputs: ReportInputs<'_>) -> Option<String> {
    let change = inputs.backlinks?.referring_domains_growth.change;
    (change < -10.0).then(|| {
        format!(
            "Referring domains are declining ({} month over month)",
            signed_percent(change)
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::domain::ModuleKind;
    use crate::report::tests::common::{ideal_modules, struggling_modules};
    use pretty_assertions::assert_eq;

    #[test]
    fn ideal_site_grades_excellent_with_five_quick_wins() {
        let summary = synthesize(ideal_modules().inputs());

        assert_eq!(summary.overall_health, HealthGrade::Excellent);
        assert_eq!(summary.quick_wins.len(), MAX_FINDINGS);
        assert!(summary.urgent_issues.is_empty());
        assert_eq!(summary.competitive_position, CompetitivePosition::Moderate);
        assert!(summary.quick_wins[0].contains("CLS"));
        assert!(summary.quick_wins[1].contains("SEO score 98/100"));
    }

    #[test]
    fn quick_wins_preserve_checklist_order() {
        let mut modules = ideal_modules();
        if let Some(technical) = modules.technical_seo.as_mut() {
            technical.core_web_vitals.cls.score = VitalScore::Poor;
            technical.seo_score = 70;
        }
        if let Some(content) = modules.content_audit.as_mut() {
            content.content_metrics.average_word_count = 500.0;
        }

        let summary = synthesize(modules.inputs());

        assert_eq!(
            summary.quick_wins,
            vec![
                "Title tags present on 95% of pages".to_string(),
                "40% of tracked keywords already rank in the top 10".to_string(),
                "Referring domains growing (+5% month over month)".to_string(),
                "High domain authority (domain rating 80)".to_string(),
            ]
        );
    }

    #[test]
    fn struggling_site_truncates_urgent_issues_to_five() {
        let summary = synthesize(struggling_modules().inputs());

        assert_eq!(summary.overall_health, HealthGrade::Poor);
        assert_eq!(summary.urgent_issues.len(), MAX_FINDINGS);
        assert!(summary.urgent_issues[0].contains("performance score 38/100"));
        assert!(summary.urgent_issues[1].contains("Largest Contentful Paint"));
        assert_eq!(summary.urgent_issues[4], "Only 22% of pages have an H1 heading");
        assert!(summary.quick_wins.is_empty());
    }

    #[test]
    fn health_averages_performance_seo_and_metadata() {
        let mut modules = ideal_modules();
        if let Some(technical) = modules.technical_seo.as_mut() {
            technical.performance_score = 45;
            technical.seo_score = 80;
        }
        if let Some(content) = modules.content_audit.as_mut() {
            content.metadata.title_tags.percentage = 70.0;
            content.metadata.meta_descriptions.percentage = 60.0;
        }

        // (45 + 80 + 65) / 3 = 63.3
        assert_eq!(overall_health(modules.inputs()), HealthGrade::Fair);
    }

    #[test]
    fn traffic_status_uses_five_percent_band() {
        let mut modules = ideal_modules();
        let cases = [
            (5.1, TrafficStatus::Increasing),
            (5.0, TrafficStatus::Stable),
            (0.0, TrafficStatus::Stable),
            (-5.0, TrafficStatus::Stable),
            (-5.1, TrafficStatus::Decreasing),
        ];

        for (change, expected) in cases {
            if let Some(keywords) = modules.keywords.as_mut() {
                keywords.organic_traffic.change = change;
            }
            assert_eq!(traffic_status(modules.inputs()), expected, "change {change}");
        }
    }

    #[test]
    fn competitive_position_averages_rating_and_top10_share() {
        let mut modules = ideal_modules();
        if let Some(keywords) = modules.keywords.as_mut() {
            keywords.rank_distribution.top10.percentage = 60.0;
        }
        assert_eq!(
            competitive_position(modules.inputs()),
            CompetitivePosition::Strong
        );

        if let Some(backlinks) = modules.backlinks.as_mut() {
            backlinks.domain_rating = 10;
        }
        if let Some(keywords) = modules.keywords.as_mut() {
            keywords.rank_distribution.top10.percentage = 20.0;
        }
        assert_eq!(competitive_position(modules.inputs()), CompetitivePosition::Weak);
    }

    #[test]
    fn current_ranking_passes_metrics_through() {
        let summary = synthesize(ideal_modules().inputs());

        assert_eq!(summary.current_ranking.keywords_in_top10, 480);
        assert_eq!(summary.current_ranking.estimated_traffic, 152_000.0);
        assert_eq!(summary.current_ranking.domain_authority, 80);
    }

    #[test]
    fn absent_module_degrades_to_poor_without_failing() {
        let mut modules = ideal_modules();
        modules.keywords = None;

        let summary = synthesize(modules.inputs());

        assert_eq!(modules.missing_modules(), vec![ModuleKind::Keywords]);
        assert_eq!(summary.overall_health, HealthGrade::Poor);
        assert_eq!(summary.traffic_status, TrafficStatus::Stable);
        assert_eq!(summary.competitive_position, CompetitivePosition::Weak);
        assert_eq!(summary.current_ranking.keywords_in_top10, 0);
        assert!(summary
            .quick_wins
            .iter()
            .all(|win| !win.contains("tracked keywords")));
    }

    #[test]
    fn empty_module_set_yields_worst_case_summary() {
        let summary = synthesize(ReportInputs::default());

        assert_eq!(summary.overall_health, HealthGrade::Poor);
        assert!(summary.quick_wins.is_empty());
        assert!(summary.urgent_issues.is_empty());
    }

    #[test]
    fn synthesis_is_deterministic() {
        let modules = struggling_modules();
        assert_eq!(synthesize(modules.inputs()), synthesize(modules.inputs()));
    }
}
