//! # Insight Router
//!
//! **Query routing and lexical context retrieval for a document/data
//! assistant.**
//!
//! Insight Router takes free-text questions and routes them to one of
//! several analysis engines — document lookup, tabular-data summary, or a
//! hybrid of both — using heuristic text classification, then assembles a
//! structured answer with source attribution.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────┐   ┌──────────────┐   ┌─────────────────────┐
//! │ Ingestion  │──▶│ CorpusStore  │──▶│ Orchestrator        │
//! │ (external) │   │ fragments +  │   │  classify ──┬─▶ doc │
//! └────────────┘   │ records      │   │             ├─▶ data│
//!                  └──────────────┘   │             └─▶ both│
//!                                     └─────────┬───────────┘
//!                                               ▼
//!                                           Response
//! ```
//!
//! ## Data flow
//!
//! 1. The external ingestion collaborator fragments extracted document
//!    text ([`ingest`]) and appends fragments, records, and filenames to a
//!    [`store::CorpusStore`].
//! 2. The **orchestrator** ([`orchestrate`]) takes a snapshot of the
//!    corpus, splits compound questions, and classifies each (sub-)query.
//! 3. The **classifier** ([`classify`]) picks an [`models::Intent`] from
//!    filename mentions and fixed keyword sets; explicit filename mentions
//!    always dominate keyword scoring.
//! 4. The **retriever** ([`retrieve`]) selects the best-matching fragment
//!    by lexical term overlap, honoring include/exclude filename
//!    directives as hard constraints.
//! 5. The **summarizer** ([`analytics`]) produces a canned statistic over
//!    the tabular records.
//! 6. The orchestrator assembles one [`models::Response`] per query with
//!    per-engine structured insights.
//!
//! Retrieval is deliberately lexical (term-overlap, substring
//! containment): no embeddings, no ML. Results stay explainable and
//! deterministic, and downstream behavior depends on the precise keyword
//! lists and their precedence order.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML engine configuration with serde defaults |
//! | [`models`] | Core data types: `DocumentFragment`, `DataRecord`, `Intent`, `Response` |
//! | [`ingest`] | Fragmenting extracted text; building records from JSON rows |
//! | [`store`] | `CorpusStore` trait and the in-memory backend |
//! | [`classify`] | Heuristic intent classifier |
//! | [`retrieve`] | Lexical term-overlap retriever |
//! | [`analytics`] | Canned tabular summarizer |
//! | [`orchestrate`] | Compound-query splitting, routing, response assembly |

pub mod analytics;
pub mod classify;
pub mod config;
pub mod ingest;
pub mod models;
pub mod orchestrate;
pub mod retrieve;
pub mod store;
