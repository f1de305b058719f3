//! Core data models used throughout the routing and retrieval engine.
//!
//! These types represent the document fragments, tabular records, and
//! structured responses that flow between the corpus store, the intent
//! classifier, and the downstream engines.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A slice of extracted document text paired with its originating filename.
///
/// Fragments are immutable once created. Many fragments share one source
/// filename; the `hash` is the SHA-256 of the text and doubles as a
/// deduplication key at ingestion time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentFragment {
    pub id: String,
    pub text: String,
    pub source: String,
    pub hash: String,
}

/// A tagged scalar value inside a [`DataRecord`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

/// An open-shaped tabular record: an ordered mapping from column name to
/// scalar value.
///
/// The schema is not fixed and may vary per record. Summaries treat the
/// first record's key set as a representative schema for display only.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataRecord {
    pub fields: Vec<(String, Scalar)>,
}

impl DataRecord {
    /// Column names in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    /// Look up a column value by name.
    pub fn get(&self, key: &str) -> Option<&Scalar> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }
}

/// Forced-mode selector selectable externally before a query is submitted.
///
/// A non-[`Auto`](QueryMode::Auto) mode bypasses all classification
/// heuristics on the next query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryMode {
    #[default]
    Auto,
    Doc,
    Data,
    Hybrid,
}

/// The routing decision determining which downstream engine(s) answer
/// a query.
///
/// `ActionRecommendation` is currently produced by no classifier rule;
/// the variant and its orchestrator handler are kept pending a dedicated
/// classification rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Intent {
    DocumentIntelligence,
    AnalyticsEngine,
    HybridReasoning,
    ActionRecommendation,
    GeneralQuery,
    MultiAgentRouter,
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Intent::DocumentIntelligence => "DOCUMENT_INTELLIGENCE",
            Intent::AnalyticsEngine => "ANALYTICS_ENGINE",
            Intent::HybridReasoning => "HYBRID_REASONING",
            Intent::ActionRecommendation => "ACTION_RECOMMENDATION",
            Intent::GeneralQuery => "GENERAL_QUERY",
            Intent::MultiAgentRouter => "MULTI_AGENT_ROUTER",
        };
        f.write_str(label)
    }
}

/// Named sequential processing phase within one query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessingPhase {
    Interpreting,
    Retrieving,
    Analyzing,
    Generating,
}

impl std::fmt::Display for ProcessingPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ProcessingPhase::Interpreting => "interpreting",
            ProcessingPhase::Retrieving => "retrieving",
            ProcessingPhase::Analyzing => "analyzing",
            ProcessingPhase::Generating => "generating",
        };
        f.write_str(label)
    }
}

/// Per-engine structured payload attached to a [`Response`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StructuredInsight {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc_insight: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_insight: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<String>,
}

impl StructuredInsight {
    pub fn is_empty(&self) -> bool {
        self.doc_insight.is_none() && self.data_insight.is_none() && self.recommendation.is_none()
    }
}

/// One assembled answer, created once per (sub-)query and never mutated
/// after return.
#[derive(Debug, Clone, Serialize)]
pub struct Response {
    pub content: String,
    pub intent: Intent,
    pub source: String,
    pub structured: StructuredInsight,
    pub created_at: DateTime<Utc>,
}
