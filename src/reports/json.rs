use crate::Result;
use crate::metrics::MetricRecord;

/// Pretty-printed single-run document, insertion order preserved.
pub fn render_record(record: &MetricRecord) -> Result<String> {
    Ok(serde_json::to_string_pretty(record)?)
}

/// Compact array document covering every run of a batch.
pub fn render_batch(batch: &[MetricRecord]) -> Result<String> {
    Ok(serde_json::to_string(batch)?)
}
