//! Heuristic intent classifier.
//!
//! Maps a query string (plus the known corpus filenames and an optional
//! forced mode) to an [`Intent`]. The classifier is a pure function: no
//! corpus text is read, only the uploaded filename lists.
//!
//! # Decision order
//!
//! 1. A forced [`QueryMode`] other than `auto` bypasses all heuristics.
//! 2. Filename mentions: a known filename's extension-stripped, lower-cased
//!    stem appearing as a substring of the query is a stronger, unambiguous
//!    signal than any generic keyword and short-circuits keyword scoring.
//! 3. Keyword scoring over three fixed keyword sets (data / document /
//!    action) with plain substring containment, not tokenized matching.
//! 4. Fallback: [`Intent::GeneralQuery`].

use crate::models::{Intent, QueryMode};

/// Keywords signalling a tabular-data question.
const DATA_KEYWORDS: &[&str] = &[
    "employee data",
    "metrics",
    "trend",
    "attrition",
    "engagement",
    "statistics",
    "analyze",
    "dataset",
    "count",
    "score",
    "sales",
    "correlation",
    "csv",
];

/// Keywords signalling a document-lookup question.
const DOC_KEYWORDS: &[&str] = &[
    "policy",
    "manual",
    "guidelines",
    "compliance",
    "sop",
    "handbook",
    "document",
    "training",
    "leave",
    "pdf",
];

/// Keywords signalling a request for recommendations or next steps.
const ACTION_KEYWORDS: &[&str] = &["recommend", "action", "strategy"];

/// Strip the final extension from a filename and lower-case the result.
///
/// `"HR_Policy.pdf"` becomes `"hr_policy"`. Only the last `.ext` segment
/// is removed, so `"report.v2.csv"` becomes `"report.v2"`.
pub(crate) fn stem_lower(name: &str) -> String {
    match name.rfind('.') {
        Some(idx) if idx > 0 => name[..idx].to_lowercase(),
        _ => name.to_lowercase(),
    }
}

/// True if the lower-cased query mentions any filename in `names` by its
/// extension-stripped stem.
fn mentions_any(query_lower: &str, names: &[String]) -> bool {
    names.iter().any(|name| {
        let stem = stem_lower(name);
        !stem.is_empty() && query_lower.contains(&stem)
    })
}

/// Classify a query into an [`Intent`].
///
/// Total and side-effect free: every input maps to a value. `known_docs`
/// and `known_data` are the ordered lists of uploaded document and dataset
/// filenames; `mode` is the externally-set forced-mode selector.
pub fn classify(
    query: &str,
    known_docs: &[String],
    known_data: &[String],
    mode: QueryMode,
) -> Intent {
    match mode {
        QueryMode::Doc => return Intent::DocumentIntelligence,
        QueryMode::Data => return Intent::AnalyticsEngine,
        QueryMode::Hybrid => return Intent::HybridReasoning,
        QueryMode::Auto => {}
    }

    let q = query.to_lowercase();

    // Explicit filename mentions dominate keyword scoring entirely.
    let mentions_doc = mentions_any(&q, known_docs);
    let mentions_data = mentions_any(&q, known_data);

    if mentions_doc && mentions_data {
        return Intent::HybridReasoning;
    }
    if mentions_doc {
        return Intent::DocumentIntelligence;
    }
    if mentions_data {
        return Intent::AnalyticsEngine;
    }

    let is_data = DATA_KEYWORDS.iter().any(|k| q.contains(k));
    let is_doc = DOC_KEYWORDS.iter().any(|k| q.contains(k));
    let is_action = ACTION_KEYWORDS.iter().any(|k| q.contains(k));

    if is_data && is_doc {
        return Intent::HybridReasoning;
    }
    // Policy-grounded recommendations need document context plus synthesis.
    if is_doc && is_action {
        return Intent::HybridReasoning;
    }
    if is_data {
        return Intent::AnalyticsEngine;
    }
    if is_doc {
        return Intent::DocumentIntelligence;
    }

    Intent::GeneralQuery
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docs(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_forced_mode_bypasses_heuristics() {
        // Query content is full of data keywords, but forced doc mode wins.
        let q = "analyze attrition metrics in the dataset";
        assert_eq!(
            classify(q, &[], &[], QueryMode::Doc),
            Intent::DocumentIntelligence
        );
        assert_eq!(
            classify(q, &[], &[], QueryMode::Data),
            Intent::AnalyticsEngine
        );
        assert_eq!(
            classify(q, &[], &[], QueryMode::Hybrid),
            Intent::HybridReasoning
        );
    }

    #[test]
    fn test_filename_mention_dominates_keywords() {
        let known_docs = docs(&["HR_Policy.pdf"]);
        // "metrics" is a data keyword, but the document stem mention wins.
        let intent = classify(
            "show me the hr_policy metrics",
            &known_docs,
            &[],
            QueryMode::Auto,
        );
        assert_eq!(intent, Intent::DocumentIntelligence);
    }

    #[test]
    fn test_filename_mention_is_case_insensitive() {
        let known_docs = docs(&["HR_Policy.pdf"]);
        let intent = classify(
            "What does HR_Policy say about notice periods",
            &known_docs,
            &[],
            QueryMode::Auto,
        );
        assert_eq!(intent, Intent::DocumentIntelligence);
    }

    #[test]
    fn test_doc_and_data_filename_mentions_go_hybrid() {
        let known_docs = docs(&["HR_Policy.pdf"]);
        let known_data = docs(&["attrition_report.csv"]);
        let intent = classify(
            "compare hr_policy with attrition_report",
            &known_docs,
            &known_data,
            QueryMode::Auto,
        );
        assert_eq!(intent, Intent::HybridReasoning);
    }

    #[test]
    fn test_dataset_mention_routes_to_analytics() {
        let known_data = docs(&["sales_q3.csv"]);
        let intent = classify("summarize sales_q3 for me", &[], &known_data, QueryMode::Auto);
        assert_eq!(intent, Intent::AnalyticsEngine);
    }

    #[test]
    fn test_keyword_routing() {
        assert_eq!(
            classify("what is the attrition trend", &[], &[], QueryMode::Auto),
            Intent::AnalyticsEngine
        );
        assert_eq!(
            classify("where is the compliance handbook", &[], &[], QueryMode::Auto),
            Intent::DocumentIntelligence
        );
        assert_eq!(
            classify("hello there", &[], &[], QueryMode::Auto),
            Intent::GeneralQuery
        );
    }

    #[test]
    fn test_doc_plus_data_keywords_go_hybrid() {
        let intent = classify(
            "does the leave policy explain the engagement metrics",
            &[],
            &[],
            QueryMode::Auto,
        );
        assert_eq!(intent, Intent::HybridReasoning);
    }

    #[test]
    fn test_doc_plus_action_keywords_go_hybrid() {
        let intent = classify(
            "recommend changes to the travel policy",
            &[],
            &[],
            QueryMode::Auto,
        );
        assert_eq!(intent, Intent::HybridReasoning);
    }

    #[test]
    fn test_action_keyword_alone_falls_through_to_general() {
        // No rule maps a bare action keyword to ACTION_RECOMMENDATION yet.
        let intent = classify("recommend a rollout strategy", &[], &[], QueryMode::Auto);
        assert_eq!(intent, Intent::GeneralQuery);
    }

    #[test]
    fn test_stem_lower() {
        assert_eq!(stem_lower("HR_Policy.pdf"), "hr_policy");
        assert_eq!(stem_lower("report.v2.csv"), "report.v2");
        assert_eq!(stem_lower("README"), "readme");
        assert_eq!(stem_lower(".env"), ".env");
    }
}
