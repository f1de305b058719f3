//! Ingestion helpers: fragmenting extracted document text and building
//! tabular records from parsed rows.
//!
//! Text extraction (PDF) and CSV parsing happen outside this crate; the
//! ingestion collaborator hands over plain text or JSON-shaped rows and
//! these helpers normalize them into [`DocumentFragment`]s and
//! [`DataRecord`]s for the corpus store.
//!
//! Fragmenting splits on sentence boundaries (a `.` followed by
//! whitespace) and discards fragments at or below the minimum length, so
//! stray abbreviations and page artifacts never become retrieval
//! candidates. Each fragment receives a UUID and a SHA-256 content hash
//! used for deduplication.

use anyhow::{bail, Result};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::models::{DataRecord, DocumentFragment, Scalar};

/// Default minimum fragment length in characters; shorter fragments are
/// discarded at ingestion.
pub const DEFAULT_MIN_FRAGMENT_CHARS: usize = 20;

/// Create a single [`DocumentFragment`] with a UUID and SHA-256 hash.
pub fn fragment_from_text(text: &str, source: &str) -> DocumentFragment {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    let hash = format!("{:x}", hasher.finalize());

    DocumentFragment {
        id: Uuid::new_v4().to_string(),
        text: text.to_string(),
        source: source.to_string(),
        hash,
    }
}

/// Split extracted document text into fragments on sentence boundaries.
///
/// A boundary is a `.` followed by at least one whitespace character.
/// Pieces are trimmed; pieces of length <= `min_chars` are discarded.
/// An empty result is valid (e.g. for scanned pages with no text layer).
pub fn fragment_text(text: &str, source: &str, min_chars: usize) -> Vec<DocumentFragment> {
    split_sentences(text)
        .into_iter()
        .map(str::trim)
        .filter(|piece| piece.len() > min_chars)
        .map(|piece| fragment_from_text(piece, source))
        .collect()
}

/// Split on `.` + whitespace, keeping the text between boundaries.
fn split_sentences(text: &str) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((idx, c)) = chars.next() {
        if c == '.' {
            if let Some(&(_, next)) = chars.peek() {
                if next.is_whitespace() {
                    pieces.push(&text[start..idx]);
                    start = idx + c.len_utf8();
                }
            }
        }
    }
    pieces.push(&text[start..]);
    pieces
}

/// Convert a JSON value into a [`Scalar`].
///
/// Nested arrays and objects are flattened to their JSON text form so
/// open-shaped rows never fail ingestion.
fn scalar_from_json(value: &serde_json::Value) -> Scalar {
    match value {
        serde_json::Value::Null => Scalar::Null,
        serde_json::Value::Bool(b) => Scalar::Bool(*b),
        serde_json::Value::Number(n) => Scalar::Number(n.as_f64().unwrap_or(0.0)),
        serde_json::Value::String(s) => Scalar::Text(s.clone()),
        other => Scalar::Text(other.to_string()),
    }
}

/// Build ordered [`DataRecord`]s from a JSON array of row objects — the
/// shape a header-aware CSV parser produces.
///
/// Column order within each record follows the JSON object's key order.
/// Rows may have differing key sets; non-object rows are rejected.
pub fn records_from_json(rows: &serde_json::Value) -> Result<Vec<DataRecord>> {
    let Some(rows) = rows.as_array() else {
        bail!("expected a JSON array of row objects");
    };

    let mut records = Vec::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        let Some(object) = row.as_object() else {
            bail!("row {i} is not a JSON object");
        };
        let fields = object
            .iter()
            .map(|(k, v)| (k.clone(), scalar_from_json(v)))
            .collect();
        records.push(DataRecord { fields });
    }
    Ok(records)
}

/// Parse a JSON string of rows; see [`records_from_json`].
pub fn records_from_json_str(json: &str) -> Result<Vec<DataRecord>> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    records_from_json(&value)
}
