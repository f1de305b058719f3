//! Lexical retriever: selects the best-matching document fragment for a
//! query using term-overlap scoring.
//!
//! Retrieval is intentionally simple substring term-overlap, not semantic.
//! This bounds recall but keeps results explainable and deterministic.
//! Explicit filename targeting is a hard constraint: a query that names an
//! uploaded document never silently falls back to unrelated documents.
//!
//! # Algorithm
//!
//! 1. An empty fragment collection short-circuits to no match.
//! 2. Exclusion detection: `not <stem>`, `exclude <stem>`, `excluding
//!    <stem>`, `without <stem>` phrases mark a known document as excluded.
//! 3. Inclusion detection: a known document stem appearing as a plain
//!    substring of the query marks it as included.
//! 4. Candidates are restricted to the non-excluded included sources (no
//!    fallback to the full corpus), then excluded sources are removed.
//! 5. An empty candidate set with named documents yields a sentinel answer
//!    attributing the miss to those documents; otherwise no match.
//! 6. Query terms survive punctuation stripping, a fixed stop-word list,
//!    and a minimum length of four characters.
//! 7. Topic refinement: with explicitly included documents, terms that
//!    overlap an included stem are dropped so the filename itself cannot
//!    dominate the relevance score.
//! 8. Each candidate scores one point per topic term contained in its
//!    lower-cased text; the sort is stable, so equal scores preserve
//!    ingestion order.

use crate::classify::stem_lower;
use crate::models::DocumentFragment;

/// Query tokens dropped before scoring.
const STOP_WORDS: &[&str] = &[
    "what",
    "does",
    "say",
    "about",
    "exclude",
    "without",
    "summarize",
    "compare",
    "describe",
    "explain",
    "between",
    "difference",
];

/// Markers that turn a filename mention into an exclusion.
const EXCLUSION_MARKERS: &[&str] = &["not", "exclude", "excluding", "without"];

/// The passage selected for a query, or a synthesized sentinel answer when
/// the user explicitly named a source that yields no usable match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextMatch {
    pub text: String,
    pub source: String,
}

/// Known document filenames whose stems the query marks as excluded.
fn detect_exclusions(query_lower: &str, known_docs: &[String]) -> Vec<String> {
    known_docs
        .iter()
        .filter(|doc| {
            let stem = stem_lower(doc);
            !stem.is_empty()
                && EXCLUSION_MARKERS
                    .iter()
                    .any(|marker| query_lower.contains(&format!("{marker} {stem}")))
        })
        .cloned()
        .collect()
}

/// Known document filenames whose stems appear in the query.
///
/// Exclusions are deliberately not filtered out here: a filename can be
/// both included and excluded (e.g. "what does x say, excluding x"). Only
/// the non-excluded subset restricts candidates, but a miss is still
/// attributed to every named document rather than widening scope.
fn detect_inclusions(query_lower: &str, known_docs: &[String]) -> Vec<String> {
    known_docs
        .iter()
        .filter(|doc| {
            let stem = stem_lower(doc);
            !stem.is_empty() && query_lower.contains(&stem)
        })
        .cloned()
        .collect()
}

/// Extract scoring terms: strip `? . , !`, lower-case, split on
/// whitespace, drop stop words and terms of length <= 3.
fn extract_terms(query: &str) -> Vec<String> {
    let cleaned: String = query
        .to_lowercase()
        .chars()
        .filter(|c| !matches!(c, '?' | '.' | ',' | '!'))
        .collect();

    cleaned
        .split_whitespace()
        .filter(|t| t.len() > 3 && !STOP_WORDS.contains(t))
        .map(|t| t.to_string())
        .collect()
}

/// Drop terms that overlap an included filename stem in either direction.
///
/// Falls back to the original term set when refinement would leave
/// nothing to score with.
fn refine_topic_terms(terms: Vec<String>, included: &[String]) -> Vec<String> {
    let stems: Vec<String> = included.iter().map(|d| stem_lower(d)).collect();
    let topic: Vec<String> = terms
        .iter()
        .filter(|t| !stems.iter().any(|n| n.contains(*t) || t.contains(n)))
        .cloned()
        .collect();

    if topic.is_empty() {
        terms
    } else {
        topic
    }
}

/// Select zero or one best-matching fragment for `query`.
///
/// Returns `None` when the corpus is empty or nothing relevant is found
/// and no document was explicitly named. When the user named included
/// documents, a sentinel [`ContextMatch`] is returned instead of `None`
/// so the miss is attributed to those documents.
pub fn retrieve(
    query: &str,
    fragments: &[DocumentFragment],
    known_docs: &[String],
) -> Option<ContextMatch> {
    if fragments.is_empty() {
        return None;
    }

    let q = query.to_lowercase();

    let excluded = detect_exclusions(&q, known_docs);
    let included = detect_inclusions(&q, known_docs);
    // Only non-excluded named documents restrict the candidate set; the
    // full `included` list still owns sentinel attribution below.
    let targeted: Vec<String> = included
        .iter()
        .filter(|doc| !excluded.contains(doc))
        .cloned()
        .collect();

    let mut candidates: Vec<&DocumentFragment> = if targeted.is_empty() {
        fragments.iter().collect()
    } else {
        fragments
            .iter()
            .filter(|f| targeted.contains(&f.source))
            .collect()
    };
    if !excluded.is_empty() {
        candidates.retain(|f| !excluded.contains(&f.source));
    }

    if candidates.is_empty() {
        if included.is_empty() {
            return None;
        }
        let names = included.join(", ");
        return Some(ContextMatch {
            text: format!(
                "The document(s) \"{names}\" do not contain any retrievable text or were excluded."
            ),
            source: names,
        });
    }

    let mut terms = extract_terms(query);
    if !targeted.is_empty() {
        terms = refine_topic_terms(terms, &targeted);
    }

    let mut scored: Vec<(usize, &DocumentFragment)> = candidates
        .iter()
        .map(|f| {
            let text_lower = f.text.to_lowercase();
            let score = terms.iter().filter(|t| text_lower.contains(*t)).count();
            (score, *f)
        })
        .collect();
    // Stable sort: equal scores keep ingestion order.
    scored.sort_by(|a, b| b.0.cmp(&a.0));

    let (top_score, top) = scored[0];

    if !targeted.is_empty() && top_score == 0 {
        let names = targeted.join(", ");
        return Some(ContextMatch {
            text: format!("The document \"{names}\" does not mention this information."),
            source: names,
        });
    }

    if top_score > 0 {
        Some(ContextMatch {
            text: top.text.clone(),
            source: top.source.clone(),
        })
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::fragment_from_text;

    fn fragment(text: &str, source: &str) -> DocumentFragment {
        fragment_from_text(text, source)
    }

    fn docs(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_empty_corpus_returns_none() {
        assert_eq!(retrieve("anything at all", &[], &docs(&["a.pdf"])), None);
    }

    #[test]
    fn test_scores_by_term_overlap() {
        let fragments = vec![
            fragment("Expense claims are reviewed monthly.", "Finance.pdf"),
            fragment("Leave requests require 10 days notice.", "HR_Policy.pdf"),
        ];
        let known = docs(&["Finance.pdf", "HR_Policy.pdf"]);
        let found = retrieve("how much notice for leave requests?", &fragments, &known).unwrap();
        assert_eq!(found.source, "HR_Policy.pdf");
    }

    #[test]
    fn test_named_document_restricts_candidates() {
        let fragments = vec![
            fragment("Travel booking follows the notice rules too.", "Travel.pdf"),
            fragment("Leave requests require 10 days notice.", "HR_Policy.pdf"),
        ];
        let known = docs(&["Travel.pdf", "HR_Policy.pdf"]);
        let found = retrieve(
            "What does HR_Policy say about leave notice?",
            &fragments,
            &known,
        )
        .unwrap();
        assert_eq!(found.source, "HR_Policy.pdf");
        assert!(found.text.contains("10 days notice"));
    }

    #[test]
    fn test_named_document_never_falls_back() {
        // Travel.pdf would score, but the query names HR_Policy only.
        let fragments = vec![fragment(
            "Travel bookings mention reimbursement windows.",
            "Travel.pdf",
        )];
        let known = docs(&["Travel.pdf", "HR_Policy.pdf"]);
        let found = retrieve(
            "What does HR_Policy say about reimbursement?",
            &fragments,
            &known,
        )
        .unwrap();
        assert_eq!(found.source, "HR_Policy.pdf");
        assert!(found.text.contains("do not contain any retrievable text"));
    }

    #[test]
    fn test_does_not_mention_sentinel() {
        let fragments = vec![fragment(
            "Leave requests require 10 days notice.",
            "HR_Policy.pdf",
        )];
        let known = docs(&["HR_Policy.pdf"]);
        let found = retrieve(
            "What does HR_Policy say about parking spaces?",
            &fragments,
            &known,
        )
        .unwrap();
        assert_eq!(found.source, "HR_Policy.pdf");
        assert!(found.text.contains("does not mention"));
    }

    #[test]
    fn test_exclusion_removes_top_scoring_source() {
        let fragments = vec![
            fragment("Attrition policy details and notice windows.", "Old_Manual.pdf"),
            fragment("Notice periods are two weeks for new hires.", "Handbook.pdf"),
        ];
        let known = docs(&["Old_Manual.pdf", "Handbook.pdf"]);
        let found = retrieve(
            "notice windows please, without old_manual",
            &fragments,
            &known,
        )
        .unwrap();
        assert_eq!(found.source, "Handbook.pdf");
    }

    #[test]
    fn test_included_and_excluded_same_document() {
        let fragments = vec![fragment(
            "Leave requests require 10 days notice.",
            "HR_Policy.pdf",
        )];
        let known = docs(&["HR_Policy.pdf"]);
        let found = retrieve(
            "What does HR_Policy say, excluding HR_Policy?",
            &fragments,
            &known,
        )
        .unwrap();
        assert_eq!(found.source, "HR_Policy.pdf");
        assert!(found.text.contains("or were excluded"));
    }

    #[test]
    fn test_tie_preserves_ingestion_order() {
        let fragments = vec![
            fragment("The onboarding schedule spans two weeks.", "Alpha_Notes.pdf"),
            fragment("The onboarding schedule includes mentoring.", "Beta_Notes.pdf"),
        ];
        let known = docs(&["Alpha_Notes.pdf", "Beta_Notes.pdf"]);
        // "onboarding" and "schedule" hit both fragments equally.
        let found = retrieve("tell me the onboarding schedule", &fragments, &known).unwrap();
        assert_eq!(found.source, "Alpha_Notes.pdf");
    }

    #[test]
    fn test_no_overlap_returns_none_without_named_docs() {
        let fragments = vec![fragment(
            "Leave requests require 10 days notice.",
            "HR_Policy.pdf",
        )];
        let found = retrieve("quarterly revenue projections", &fragments, &[]);
        assert_eq!(found, None);
    }

    #[test]
    fn test_extract_terms_filters_stop_words_and_short_tokens() {
        let terms = extract_terms("What does the handbook say about leave, exactly?");
        assert!(terms.contains(&"handbook".to_string()));
        assert!(terms.contains(&"leave".to_string()));
        assert!(terms.contains(&"exactly".to_string()));
        assert!(!terms.contains(&"what".to_string()));
        assert!(!terms.contains(&"does".to_string()));
        assert!(!terms.contains(&"the".to_string()));
    }

    #[test]
    fn test_topic_refinement_drops_filename_terms() {
        let included = docs(&["HR_Policy.pdf"]);
        let terms = vec!["hr_policy".to_string(), "notice".to_string()];
        let refined = refine_topic_terms(terms, &included);
        assert_eq!(refined, vec!["notice".to_string()]);
    }

    #[test]
    fn test_topic_refinement_keeps_original_when_nothing_survives() {
        let included = docs(&["HR_Policy.pdf"]);
        let terms = vec!["hr_policy".to_string()];
        let refined = refine_topic_terms(terms, &included);
        assert_eq!(refined, vec!["hr_policy".to_string()]);
    }
}
