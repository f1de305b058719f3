//! Query orchestrator: splits compound questions, routes each through the
//! classifier, and assembles the final [`Response`].
//!
//! The orchestrator reads one immutable snapshot of the corpus per request
//! and hands it to the pure component functions ([`classify`],
//! [`retrieve`], [`summarize`]). Each processing stage is a sequential
//! async phase with an artificial pacing delay used purely for
//! perceived-progress UX; the delays are non-cancelable and carry no
//! ordering guarantee beyond strict phase order within one query.
//!
//! # Data flow
//!
//! ```text
//! raw query ──▶ split ──▶ (per sub-query) classify ──▶ { retrieve,
//!                                                        summarize,
//!                                                        or both }
//!                                        └──────▶ assemble Response
//! ```

use std::time::Duration;

use anyhow::Result;
use chrono::Utc;
use tokio::time::sleep;
use tracing::debug;

use crate::analytics::summarize;
use crate::classify::classify;
use crate::config::PacingConfig;
use crate::models::{Intent, ProcessingPhase, QueryMode, Response, StructuredInsight};
use crate::retrieve::retrieve;
use crate::store::CorpusStore;

/// Fixed synthesized recommendation attached to hybrid answers.
const HYBRID_RECOMMENDATION: &str =
    "Synthesizing document rules with data trends suggests immediate policy review for at-risk departments.";

/// Canned recommendation for the (currently unreachable) action intent.
const ACTION_RECOMMENDATION: &str =
    "Based on best practices, we recommend implementing a quarterly review cycle.";

/// Fallback answer when no engine applies.
const GENERAL_FALLBACK: &str =
    "I didn't understand that. Please ask about Documents (PDF) or Data (CSV).";

/// Minimum sub-query length kept after compound splitting.
const MIN_SUB_QUERY_CHARS: usize = 5;

/// Artificial per-phase delays.
///
/// Defaults mirror the interactive pacing of the assistant UI; use
/// [`PhasePacing::none`] wherever real latency is unwanted (tests,
/// batch callers).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhasePacing {
    pub interpret: Duration,
    pub retrieve: Duration,
    pub analyze: Duration,
    pub hybrid: Duration,
    pub generate: Duration,
}

impl Default for PhasePacing {
    fn default() -> Self {
        Self {
            interpret: Duration::from_millis(600),
            retrieve: Duration::from_millis(800),
            analyze: Duration::from_millis(800),
            hybrid: Duration::from_millis(1000),
            generate: Duration::from_millis(800),
        }
    }
}

impl PhasePacing {
    /// No artificial delays.
    pub fn none() -> Self {
        Self {
            interpret: Duration::ZERO,
            retrieve: Duration::ZERO,
            analyze: Duration::ZERO,
            hybrid: Duration::ZERO,
            generate: Duration::ZERO,
        }
    }
}

impl From<&PacingConfig> for PhasePacing {
    fn from(cfg: &PacingConfig) -> Self {
        Self {
            interpret: Duration::from_millis(cfg.interpret_ms),
            retrieve: Duration::from_millis(cfg.retrieve_ms),
            analyze: Duration::from_millis(cfg.analyze_ms),
            hybrid: Duration::from_millis(cfg.hybrid_ms),
            generate: Duration::from_millis(cfg.generate_ms),
        }
    }
}

/// Bundles all inputs for a single orchestrated query.
#[derive(Debug, Clone)]
pub struct QueryRequest<'a> {
    /// Raw user input, possibly compound.
    pub query: &'a str,
    /// Forced-mode selector; [`QueryMode::Auto`] enables the heuristics.
    pub mode: QueryMode,
    /// Artificial per-phase delays.
    pub pacing: PhasePacing,
}

impl<'a> QueryRequest<'a> {
    /// Auto-mode request without pacing delays.
    pub fn new(query: &'a str) -> Self {
        Self {
            query,
            mode: QueryMode::Auto,
            pacing: PhasePacing::none(),
        }
    }
}

async fn enter_phase(phase: ProcessingPhase, delay: Duration) {
    debug!(%phase, "entering phase");
    if !delay.is_zero() {
        sleep(delay).await;
    }
}

/// Split a raw input into sub-queries on `?` boundaries.
///
/// Fragments are trimmed; fragments of length <= 5 (stray "ok", "and")
/// are dropped. A single surviving fragment means the input was not
/// compound.
fn split_sub_queries(query: &str) -> Vec<&str> {
    query
        .split('?')
        .map(str::trim)
        .filter(|q| q.len() > MIN_SUB_QUERY_CHARS)
        .collect()
}

/// Join non-empty source labels with `", "`.
fn join_sources(parts: &[&str]) -> String {
    parts
        .iter()
        .filter(|p| !p.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(", ")
}

/// Answer a raw query against the corpus snapshot held by `store`.
///
/// Compound inputs (more than one surviving sub-query) are processed
/// independently per sub-query and combined into one
/// [`Intent::MultiAgentRouter`] response with `Q1:`/`Q2:` labels and no
/// structured payload. Single queries dispatch on the classified intent.
///
/// Total over all corpus states: an empty corpus produces the explicit
/// no-data / no-match sentinels, never an error. The only error surface
/// is the store read itself.
pub async fn answer<S: CorpusStore + ?Sized>(
    store: &S,
    req: &QueryRequest<'_>,
) -> Result<Response> {
    let fragments = store.fragments().await?;
    let records = store.records().await?;
    let known_docs = store.document_names().await?;
    let known_data = store.dataset_names().await?;

    enter_phase(ProcessingPhase::Interpreting, req.pacing.interpret).await;

    let sub_queries = split_sub_queries(req.query);
    if sub_queries.len() > 1 {
        let mut sections = Vec::with_capacity(sub_queries.len());
        for (i, sub) in sub_queries.into_iter().enumerate() {
            let intent = classify(sub, &known_docs, &known_data, req.mode);
            debug!(sub_query = sub, %intent, "routing sub-query");
            let ans = match intent {
                Intent::DocumentIntelligence => retrieve(sub, &fragments, &known_docs)
                    .map(|ctx| ctx.text)
                    .unwrap_or_else(|| "No relevant document found.".to_string()),
                Intent::AnalyticsEngine => summarize(sub, &records),
                Intent::HybridReasoning => {
                    let doc = retrieve(sub, &fragments, &known_docs)
                        .map(|ctx| ctx.text)
                        .unwrap_or_else(|| "No document context.".to_string());
                    format!("{doc}\n{}", summarize(sub, &records))
                }
                _ => "I can only process document or data questions here.".to_string(),
            };
            sections.push(format!("Q{}: {sub}?\n{ans}", i + 1));
        }

        return Ok(Response {
            content: sections.join("\n\n"),
            intent: Intent::MultiAgentRouter,
            source: "Orchestrator".to_string(),
            structured: StructuredInsight::default(),
            created_at: Utc::now(),
        });
    }

    let intent = classify(req.query, &known_docs, &known_data, req.mode);
    debug!(query = req.query, %intent, "classified query");

    let mut structured = StructuredInsight::default();
    let content;
    let source;

    match intent {
        Intent::DocumentIntelligence => {
            enter_phase(ProcessingPhase::Retrieving, req.pacing.retrieve).await;
            let ctx = retrieve(req.query, &fragments, &known_docs);
            let insight = match &ctx {
                Some(ctx) => format!("Match found in \"{}\": \"{}\"", ctx.source, ctx.text),
                None => "No specific match found in current documents.".to_string(),
            };
            // Only the source actually used is attributed.
            source = ctx
                .map(|ctx| ctx.source)
                .unwrap_or_else(|| "PDF Knowledge Base".to_string());
            content = insight.clone();
            structured.doc_insight = Some(insight);
        }
        Intent::AnalyticsEngine => {
            enter_phase(ProcessingPhase::Analyzing, req.pacing.analyze).await;
            let insight = summarize(req.query, &records);
            source = if known_data.is_empty() {
                "CSV Analytics Engine".to_string()
            } else {
                known_data.join(", ")
            };
            content = insight.clone();
            structured.data_insight = Some(insight);
        }
        Intent::HybridReasoning => {
            enter_phase(ProcessingPhase::Analyzing, req.pacing.hybrid).await;
            let ctx = retrieve(req.query, &fragments, &known_docs);
            structured.doc_insight = Some(
                ctx.as_ref()
                    .map(|ctx| ctx.text.clone())
                    .unwrap_or_else(|| "No document context.".to_string()),
            );
            structured.data_insight = Some(summarize(req.query, &records));
            structured.recommendation = Some(HYBRID_RECOMMENDATION.to_string());
            let doc_source = match ctx {
                Some(ctx) => ctx.source,
                None if known_docs.is_empty() => "Documents".to_string(),
                None => known_docs.join(", "),
            };
            source = join_sources(&[&doc_source, &known_data.join(", ")]);
            content = "Hybrid Analysis Complete.".to_string();
        }
        // No classifier rule currently emits this intent; the handler is
        // reachable only when callers construct the intent directly.
        Intent::ActionRecommendation => {
            enter_phase(ProcessingPhase::Generating, req.pacing.generate).await;
            structured.recommendation = Some(ACTION_RECOMMENDATION.to_string());
            content = ACTION_RECOMMENDATION.to_string();
            source = "Strategic Agent".to_string();
        }
        Intent::GeneralQuery | Intent::MultiAgentRouter => {
            content = GENERAL_FALLBACK.to_string();
            source = "General Chat".to_string();
        }
    }

    Ok(Response {
        content,
        intent,
        source,
        structured,
        created_at: Utc::now(),
    })
}
