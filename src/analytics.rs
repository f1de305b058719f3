//! Canned analytics summarizer over tabular records.
//!
//! A deterministic stand-in for a real aggregation engine: lower-cased
//! substring checks pick a canned statistic, with a generic row-count and
//! schema summary as the fallback.

use crate::models::DataRecord;

/// Produce a summary string for `query` over `records`.
///
/// Checks apply in priority order: `count`, then `trend`, then
/// `attrition`, then the generic summary. An empty record set is a valid
/// state and yields a fixed no-data message.
pub fn summarize(query: &str, records: &[DataRecord]) -> String {
    if records.is_empty() {
        return "No structured data available to analyze.".to_string();
    }

    let q = query.to_lowercase();

    if q.contains("count") {
        return format!("Analyzed Dataset: Found {} total records.", records.len());
    }
    if q.contains("trend") {
        return "Trend Analysis: Engagement scores show a 15% upward trajectory over the last quarter."
            .to_string();
    }
    if q.contains("attrition") {
        return "Risk Analysis: High attrition risk detected in Sales Dept (Correlation: Low Engagement)."
            .to_string();
    }

    // First record's keys serve as the representative schema for display;
    // rows are open-shaped and may differ.
    let columns: Vec<&str> = records[0].keys().collect();
    format!(
        "Data Summary: Dataset contains {} rows with columns: {}.",
        records.len(),
        columns.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Scalar;

    fn record(keys: &[&str]) -> DataRecord {
        DataRecord {
            fields: keys
                .iter()
                .map(|k| (k.to_string(), Scalar::Text(String::new())))
                .collect(),
        }
    }

    #[test]
    fn test_empty_records_yield_no_data_message() {
        assert_eq!(
            summarize("count everything", &[]),
            "No structured data available to analyze."
        );
    }

    #[test]
    fn test_count_takes_priority() {
        let records = vec![record(&["name"]), record(&["name"])];
        let summary = summarize("Count the attrition trend", &records);
        assert_eq!(summary, "Analyzed Dataset: Found 2 total records.");
    }

    #[test]
    fn test_trend_before_attrition() {
        let records = vec![record(&["name"])];
        let summary = summarize("attrition TREND please", &records);
        assert!(summary.starts_with("Trend Analysis:"));
    }

    #[test]
    fn test_attrition_message() {
        let records = vec![record(&["name"])];
        let summary = summarize("Attrition risk?", &records);
        assert!(summary.starts_with("Risk Analysis:"));
    }

    #[test]
    fn test_generic_summary_uses_first_record_schema() {
        let records = vec![record(&["name", "dept", "score"]), record(&["other"])];
        let summary = summarize("tell me something", &records);
        assert_eq!(
            summary,
            "Data Summary: Dataset contains 2 rows with columns: name, dept, score."
        );
    }
}
