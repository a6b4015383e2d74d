use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Count of matching pages/keywords alongside its share of the total (0-100).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Coverage {
    pub count: u64,
    pub percentage: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VitalScore {
    Good,
    NeedsImprovement,
    Poor,
}

impl VitalScore {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::NeedsImprovement => "Needs Improvement",
            Self::Poor => "Poor",
        }
    }

    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::NeedsImprovement => "fair",
            Self::Poor => "poor",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebVital {
    pub value: String,
    pub score: VitalScore,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoreWebVitals {
    pub lcp: WebVital,
    pub cls: WebVital,
    pub fid: WebVital,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueType {
    Error,
    Warning,
    Info,
}

impl IssueType {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Error => "Error",
            Self::Warning => "Warning",
            Self::Info => "Info",
        }
    }
}

/// Shared high/medium/low scale used for issue impact and recommendation
/// priority. Declaration order is ranking order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    High,
    Medium,
    Low,
}

impl Level {
    pub const fn label(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechnicalIssue {
    #[serde(rename = "type")]
    pub issue_type: IssueType,
    pub title: String,
    pub description: String,
    pub impact: Level,
}

/// Page performance provider output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TechnicalSeoData {
    pub core_web_vitals: CoreWebVitals,
    pub performance_score: u8,
    pub seo_score: u8,
    pub accessibility_score: u8,
    pub best_practices_score: u8,
    #[serde(default)]
    pub issues: Vec<TechnicalIssue>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataCompleteness {
    pub title_tags: Coverage,
    pub meta_descriptions: Coverage,
    pub h1_tags: Coverage,
}

impl MetadataCompleteness {
    /// Mean of title tag and meta description coverage.
    pub fn average(&self) -> f64 {
        (self.title_tags.percentage + self.meta_descriptions.percentage) / 2.0
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentFreshness {
    pub fresh: u64,
    pub stale: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentMetrics {
    /// Mean words per page; providers may report a fractional value.
    pub average_word_count: f64,
    #[serde(rename = "pagesWithCTAs")]
    pub pages_with_ctas: Coverage,
    pub content_freshness: ContentFreshness,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopPage {
    pub url: String,
    pub title: String,
    #[serde(default)]
    pub word_count: u32,
    #[serde(default)]
    pub traffic: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentIssue {
    #[serde(rename = "type")]
    pub issue_type: IssueType,
    pub title: String,
    pub description: String,
    pub affected_pages: u64,
}

/// Content crawl provider output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentAuditData {
    pub total_pages: u64,
    pub indexed_pages: u64,
    pub metadata: MetadataCompleteness,
    pub content_metrics: ContentMetrics,
    #[serde(default)]
    pub top_pages: Vec<TopPage>,
    #[serde(default)]
    pub issues: Vec<ContentIssue>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RankDistribution {
    pub top3: Coverage,
    pub top10: Coverage,
    pub top50: Coverage,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordEntry {
    pub keyword: String,
    pub position: u32,
    pub volume: u64,
    pub difficulty: u8,
    pub url: String,
    pub change: i32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct OrganicTraffic {
    pub estimated: f64,
    /// Signed percent change against the previous period.
    pub change: f64,
}

/// Keyword rank provider output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordsData {
    pub total_keywords: u64,
    pub indexed_keywords: u64,
    pub rank_distribution: RankDistribution,
    #[serde(default)]
    pub best_keywords: Vec<KeywordEntry>,
    #[serde(default)]
    pub worst_keywords: Vec<KeywordEntry>,
    #[serde(default)]
    pub new_keywords: Vec<KeywordEntry>,
    #[serde(default)]
    pub opportunities: Vec<KeywordEntry>,
    pub organic_traffic: OrganicTraffic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkType {
    Dofollow,
    Nofollow,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Backlink {
    pub from_url: String,
    pub from_domain: String,
    pub anchor_text: String,
    #[serde(rename = "type")]
    pub link_type: LinkType,
    pub domain_rating: u8,
    pub traffic: u64,
    pub first_seen: NaiveDate,
    pub last_seen: NaiveDate,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BacklinkBuckets {
    #[serde(default)]
    pub new: Vec<Backlink>,
    #[serde(default)]
    pub lost: Vec<Backlink>,
    #[serde(default)]
    pub top: Vec<Backlink>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnchorText {
    pub text: String,
    pub count: u64,
    pub percentage: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainGrowth {
    pub this_month: u64,
    pub last_month: u64,
    pub change: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferringDomain {
    pub domain: String,
    pub domain_rating: u8,
    pub backlinks: u64,
    #[serde(default)]
    pub traffic: u64,
}

/// Backlink discovery provider output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BacklinksData {
    pub total_backlinks: u64,
    pub referring_domains: u64,
    pub domain_rating: u8,
    pub organic_traffic: u64,
    #[serde(default)]
    pub backlinks: BacklinkBuckets,
    #[serde(default)]
    pub anchor_texts: Vec<AnchorText>,
    pub referring_domains_growth: DomainGrowth,
    #[serde(default)]
    pub top_referring_domains: Vec<ReferringDomain>,
}

/// Identifies one of the four provider payloads by its wire name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ModuleKind {
    TechnicalSeo,
    ContentAudit,
    Keywords,
    Backlinks,
}

impl ModuleKind {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::TechnicalSeo,
            Self::ContentAudit,
            Self::Keywords,
            Self::Backlinks,
        ]
    }

    pub const fn wire_name(self) -> &'static str {
        match self {
            Self::TechnicalSeo => "technicalSeo",
            Self::ContentAudit => "contentAudit",
            Self::Keywords => "keywords",
            Self::Backlinks => "backlinks",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::TechnicalSeo => "Technical SEO",
            Self::ContentAudit => "Content Audit",
            Self::Keywords => "Keyword Rankings",
            Self::Backlinks => "Backlink Profile",
        }
    }
}

impl fmt::Display for ModuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// The four provider payloads as handed over by the acquisition layer.
///
/// Any of them may be absent; the assembler rejects such a set, while the
/// synthesizer and recommendation engine degrade instead of failing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportModules {
    #[serde(default)]
    pub technical_seo: Option<TechnicalSeoData>,
    #[serde(default)]
    pub content_audit: Option<ContentAuditData>,
    #[serde(default)]
    pub keywords: Option<KeywordsData>,
    #[serde(default)]
    pub backlinks: Option<BacklinksData>,
}

impl ReportModules {
    pub fn new(
        technical_seo: TechnicalSeoData,
        content_audit: ContentAuditData,
        keywords: KeywordsData,
        backlinks: BacklinksData,
    ) -> Self {
        Self {
            technical_seo: Some(technical_seo),
            content_audit: Some(content_audit),
            keywords: Some(keywords),
            backlinks: Some(backlinks),
        }
    }

    /// Absent modules, in canonical order.
    pub fn missing_modules(&self) -> Vec<ModuleKind> {
        ModuleKind::ordered()
            .into_iter()
            .filter(|kind| !self.is_present(*kind))
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing_modules().is_empty()
    }

    /// Borrowed view handed to the synthesizer and recommendation engine.
    pub fn inputs(&self) -> ReportInputs<'_> {
        ReportInputs {
            technical_seo: self.technical_seo.as_ref(),
            content_audit: self.content_audit.as_ref(),
            keywords: self.keywords.as_ref(),
            backlinks: self.backlinks.as_ref(),
        }
    }

    fn is_present(&self, kind: ModuleKind) -> bool {
        match kind {
            ModuleKind::TechnicalSeo => self.technical_seo.is_some(),
            ModuleKind::ContentAudit => self.content_audit.is_some(),
            ModuleKind::Keywords => self.keywords.is_some(),
            ModuleKind::Backlinks => self.backlinks.is_some(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ReportInputs<'a> {
    pub technical_seo: Option<&'a TechnicalSeoData>,
    pub content_audit: Option<&'a ContentAuditData>,
    pub keywords: Option<&'a KeywordsData>,
    pub backlinks: Option<&'a BacklinksData>,
}

impl<'a> ReportInputs<'a> {
    pub fn complete(
        technical_seo: &'a TechnicalSeoData,
        content_audit: &'a ContentAuditData,
        keywords: &'a KeywordsData,
        backlinks: &'a BacklinksData,
    ) -> Self {
        Self {
            technical_seo: Some(technical_seo),
            content_audit: Some(content_audit),
            keywords: Some(keywords),
            backlinks: Some(backlinks),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.technical_seo.is_some()
            && self.content_audit.is_some()
            && self.keywords.is_some()
            && self.backlinks.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthGrade {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl HealthGrade {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::Poor => "Poor",
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Fair => "fair",
            Self::Poor => "poor",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrafficStatus {
    Increasing,
    Stable,
    Decreasing,
}

impl TrafficStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Increasing => "Increasing",
            Self::Stable => "Stable",
            Self::Decreasing => "Decreasing",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompetitivePosition {
    Strong,
    Moderate,
    Weak,
}

impl CompetitivePosition {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Strong => "Strong",
            Self::Moderate => "Moderate",
            Self::Weak => "Weak",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentRanking {
    pub keywords_in_top10: u64,
    pub estimated_traffic: f64,
    pub domain_authority: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutiveSummary {
    pub overall_health: HealthGrade,
    pub current_ranking: CurrentRanking,
    pub quick_wins: Vec<String>,
    pub urgent_issues: Vec<String>,
    pub traffic_status: TrafficStatus,
    pub competitive_position: CompetitivePosition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationCategory {
    Technical,
    Content,
    Keywords,
    Backlinks,
}

impl RecommendationCategory {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Technical => "Technical",
            Self::Content => "Content",
            Self::Keywords => "Keywords",
            Self::Backlinks => "Backlinks",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timeframe {
    #[serde(rename = "1-2 weeks")]
    Weeks,
    #[serde(rename = "1-2 months")]
    Months,
    #[serde(rename = "3+ months")]
    Quarter,
}

impl Timeframe {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Weeks => "1-2 weeks",
            Self::Months => "1-2 months",
            Self::Quarter => "3+ months",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub priority: Level,
    pub category: RecommendationCategory,
    pub title: String,
    pub description: String,
    pub estimated_impact: Level,
    pub timeframe: Timeframe,
    pub resources: Vec<String>,
}

/// Canonical aggregate produced once per analysis request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub url: String,
    pub domain: String,
    pub analyzed_at: DateTime<Utc>,
    pub technical_seo: TechnicalSeoData,
    pub content_audit: ContentAuditData,
    pub keywords: KeywordsData,
    pub backlinks: BacklinksData,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub executive_summary: Option<ExecutiveSummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendations: Option<Vec<Recommendation>>,
}
