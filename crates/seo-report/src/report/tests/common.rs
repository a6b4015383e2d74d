use std::sync::Mutex;

use chrono::{NaiveDate, TimeZone, Utc};

use crate::report::domain::{
    AnchorText, Backlink, BacklinkBuckets, BacklinksData, ContentAuditData, ContentFreshness,
    ContentIssue, ContentMetrics, CoreWebVitals, Coverage, DomainGrowth, IssueType, KeywordEntry,
    KeywordsData, Level, LinkType, MetadataCompleteness, OrganicTraffic, RankDistribution,
    ReferringDomain, Report, ReportModules, TechnicalIssue, TechnicalSeoData, TopPage,
    VitalScore, WebVital,
};
use crate::report::observer::{ReportEvent, ReportObserver};
use crate::report::{recommend, synthesize};

pub(crate) fn coverage(count: u64, percentage: f64) -> Coverage {
    Coverage { count, percentage }
}

fn vital(value: &str, score: VitalScore) -> WebVital {
    WebVital {
        value: value.to_string(),
        score,
    }
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub(crate) fn keyword(keyword: &str, position: u32, volume: u64, change: i32) -> KeywordEntry {
    KeywordEntry {
        keyword: keyword.to_string(),
        position,
        volume,
        difficulty: 42,
        url: format!("https://example.com/{}", keyword.replace(' ', "-")),
        change,
    }
}

pub(crate) fn backlink(from_domain: &str, domain_rating: u8) -> Backlink {
    Backlink {
        from_url: format!("https://{from_domain}/resources"),
        from_domain: from_domain.to_string(),
        anchor_text: "example tools".to_string(),
        link_type: LinkType::Dofollow,
        domain_rating,
        traffic: 1_200,
        first_seen: date(2025, 8, 2),
        last_seen: date(2025, 9, 30),
    }
}

pub(crate) fn ideal_technical() -> TechnicalSeoData {
    TechnicalSeoData {
        core_web_vitals: CoreWebVitals {
            lcp: vital("1.8 s", VitalScore::Good),
            cls: vital("0.05", VitalScore::Good),
            fid: vital("40 ms", VitalScore::Good),
        },
        performance_score: 95,
        seo_score: 98,
        accessibility_score: 91,
        best_practices_score: 88,
        issues: vec![TechnicalIssue {
            issue_type: IssueType::Info,
            title: "Serve images in next-gen formats".to_string(),
            description: "Two hero images are still served as PNG.".to_string(),
            impact: Level::Low,
        }],
    }
}

pub(crate) fn ideal_content() -> ContentAuditData {
    ContentAuditData {
        total_pages: 240,
        indexed_pages: 231,
        metadata: MetadataCompleteness {
            title_tags: coverage(228, 95.0),
            meta_descriptions: coverage(228, 95.0),
            h1_tags: coverage(216, 90.0),
        },
        content_metrics: ContentMetrics {
            average_word_count: 1_200.0,
            pages_with_ctas: coverage(180, 75.0),
            content_freshness: ContentFreshness {
                fresh: 190,
                stale: 50,
            },
        },
        top_pages: (1..=12u32)
            .map(|rank| TopPage {
                url: format!("https://example.com/guides/{rank}"),
                title: format!("Guide {rank}"),
                word_count: 1_500,
                traffic: 10_000 / u64::from(rank),
            })
            .collect(),
        issues: Vec::new(),
    }
}

pub(crate) fn ideal_keywords() -> KeywordsData {
    KeywordsData {
        total_keywords: 1_200,
        indexed_keywords: 1_150,
        rank_distribution: RankDistribution {
            top3: coverage(150, 12.5),
            top10: coverage(480, 40.0),
            top50: coverage(900, 75.0),
        },
        best_keywords: (1..=7)
            .map(|rank| keyword(&format!("seo tool {rank}"), rank, 5_400, 2))
            .collect(),
        worst_keywords: vec![keyword("seo audit checklist", 48, 880, -6)],
        new_keywords: vec![keyword("technical seo guide", 14, 1_300, 0)],
        opportunities: vec![keyword("site speed test", 11, 9_900, 3)],
        organic_traffic: OrganicTraffic {
            estimated: 152_000.0,
            change: 12.0,
        },
    }
}

pub(crate) fn ideal_backlinks() -> BacklinksData {
    BacklinksData {
        total_backlinks: 48_210,
        referring_domains: 1_340,
        domain_rating: 80,
        organic_traffic: 152_000,
        backlinks: BacklinkBuckets {
            new: vec![backlink("news.example.org", 74)],
            lost: Vec::new(),
            top: vec![backlink("wiki.example.net", 92)],
        },
        anchor_texts: (1..=11)
            .map(|index| AnchorText {
                text: format!("anchor {index}"),
                count: 100 - index,
                percentage: 9.0,
            })
            .collect(),
        referring_domains_growth: DomainGrowth {
            this_month: 1_340,
            last_month: 1_276,
            change: 5.0,
        },
        top_referring_domains: (1..=11)
            .map(|index| ReferringDomain {
                domain: format!("ref{index}.example.com"),
                domain_rating: 90 - index as u8,
                backlinks: 400,
                traffic: 25_000,
            })
            .collect(),
    }
}

/// Every module at values that satisfy all quick-win checks and no rule.
pub(crate) fn ideal_modules() -> ReportModules {
    ReportModules::new(
        ideal_technical(),
        ideal_content(),
        ideal_keywords(),
        ideal_backlinks(),
    )
}

/// Every module at values that trip most urgent-issue checks and rules.
pub(crate) fn struggling_modules() -> ReportModules {
    let mut technical = ideal_technical();
    technical.performance_score = 38;
    technical.seo_score = 64;
    technical.core_web_vitals.lcp = vital("4.8 s", VitalScore::Poor);
    technical.core_web_vitals.cls = vital("0.18", VitalScore::NeedsImprovement);
    technical.issues = vec![TechnicalIssue {
        issue_type: IssueType::Error,
        title: "Render-blocking resources".to_string(),
        description: "Six stylesheets block first paint.".to_string(),
        impact: Level::High,
    }];

    let mut content = ideal_content();
    content.metadata = MetadataCompleteness {
        title_tags: coverage(50, 42.0),
        meta_descriptions: coverage(42, 35.0),
        h1_tags: coverage(26, 22.0),
    };
    content.content_metrics.average_word_count = 420.0;
    content.content_metrics.content_freshness = ContentFreshness {
        fresh: 20,
        stale: 60,
    };
    content.issues = vec![ContentIssue {
        issue_type: IssueType::Warning,
        title: "Duplicate title tags".to_string(),
        description: "Category pages share the same title.".to_string(),
        affected_pages: 18,
    }];

    let mut keywords = ideal_keywords();
    keywords.indexed_keywords = 30;
    keywords.rank_distribution.top10 = coverage(4, 6.0);
    keywords.organic_traffic = OrganicTraffic {
        estimated: 1_850.0,
        change: -12.0,
    };

    let mut backlinks = ideal_backlinks();
    backlinks.referring_domains = 45;
    backlinks.domain_rating = 28;
    backlinks.referring_domains_growth = DomainGrowth {
        this_month: 45,
        last_month: 55,
        change: -18.0,
    };

    ReportModules::new(technical, content, keywords, backlinks)
}

/// Fully derived report with a fixed timestamp, for rendering tests.
pub(crate) fn report_from(modules: ReportModules) -> Report {
    let executive_summary = synthesize(modules.inputs());
    let recommendations = recommend(modules.inputs());
    let ReportModules {
        technical_seo: Some(technical_seo),
        content_audit: Some(content_audit),
        keywords: Some(keywords),
        backlinks: Some(backlinks),
    } = modules
    else {
        panic!("fixture modules are complete");
    };

    Report {
        url: "https://www.example.com/".to_string(),
        domain: "www.example.com".to_string(),
        analyzed_at: Utc
            .with_ymd_and_hms(2025, 10, 1, 9, 30, 0)
            .single()
            .expect("valid timestamp"),
        technical_seo,
        content_audit,
        keywords,
        backlinks,
        executive_summary: Some(executive_summary),
        recommendations: Some(recommendations),
    }
}

#[derive(Default)]
pub(crate) struct RecordingObserver {
    events: Mutex<Vec<String>>,
}

impl RecordingObserver {
    pub(crate) fn events(&self) -> Vec<String> {
        self.events.lock().expect("observer mutex poisoned").clone()
    }
}

impl ReportObserver for RecordingObserver {
    fn observe(&self, event: &ReportEvent<'_>) {
        self.events
            .lock()
            .expect("observer mutex poisoned")
            .push(event.name().to_string());
    }
}
