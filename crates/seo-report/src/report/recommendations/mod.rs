mod rules;

use super::domain::{Recommendation, ReportInputs};
use rules::RULES;

/// Upper bound on recommendations carried by a report.
pub const MAX_RECOMMENDATIONS: usize = 10;

/// Evaluates every rule against the modules and returns the fired ones ranked
/// by priority, then estimated impact.
///
/// The sort is stable, so rules with equal keys keep their evaluation order
/// (technical, content, keywords, backlinks).
pub fn recommend(inputs: ReportInputs<'_>) -> Vec<Recommendation> {
    let mut recommendations: Vec<Recommendation> = RULES
        .iter()
        .filter_map(|rule| rule.evaluate(inputs))
        .collect();

    recommendations.sort_by_key(|recommendation| {
        (recommendation.priority, recommendation.estimated_impact)
    });
    recommendations.truncate(MAX_RECOMMENDATIONS);
    recommendations
}
