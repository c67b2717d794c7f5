use super::MetricRecord;
use std::collections::HashMap;

/// Header of the key column shared by every per-run table.
pub const METRICS_COLUMN: &str = "Metrics";

/// Two-column tabular view of one run's record.
///
/// The value column is headed by the record's first two values joined with
/// `__` — by construction the generation date and the tool version — which
/// keeps column headers unique when many runs are merged side by side.
#[derive(Debug, Clone)]
pub struct DesignColumn {
    header: String,
    rows: Vec<(String, String)>,
}

impl DesignColumn {
    #[must_use]
    pub fn from_record(record: &MetricRecord) -> Self {
        let mut leading = record.iter().take(2).map(|(_, value)| value.to_string());
        let first = leading.next().unwrap_or_default();
        let second = leading.next().unwrap_or_default();

        Self {
            header: format!("{first}__{second}"),
            rows: record.iter().map(|(key, value)| (key.to_string(), value.to_string())).collect(),
        }
    }

    #[must_use]
    pub fn header(&self) -> &str {
        &self.header
    }

    #[must_use]
    pub fn rows(&self) -> &[(String, String)] {
        &self.rows
    }
}

/// Metric-keyed table merged across designs with inner-join semantics: a
/// metric missing from any merged design is dropped from the aggregate.
#[derive(Debug, Default)]
pub struct AggregateTable {
    columns: Vec<String>,
    rows: Vec<(String, Vec<String>)>,
}

impl AggregateTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge one design's column in. The first merge adopts the column
    /// wholesale; every later merge keeps only the metrics present on both
    /// sides, preserving the existing row order.
    pub fn merge(&mut self, column: DesignColumn) {
        let DesignColumn { header, rows } = column;

        if self.columns.is_empty() {
            self.columns.push(header);
            self.rows = rows.into_iter().map(|(key, value)| (key, vec![value])).collect();
            return;
        }

        self.columns.push(header);
        let mut incoming: HashMap<String, String> = rows.into_iter().collect();
        self.rows.retain_mut(|(key, cells)| {
            if let Some(value) = incoming.remove(key.as_str()) {
                cells.push(value);
                true
            } else {
                false
            }
        });
    }

    /// Value-column headers in merge order.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Rows as (metric key, one cell per merged column).
    #[must_use]
    pub fn rows(&self) -> &[(String, Vec<String>)] {
        &self.rows
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::MetricValue;

    fn record_with(pairs: &[(&str, MetricValue)]) -> MetricRecord {
        let mut record = MetricRecord::new();
        for (key, value) in pairs {
            record.insert(*key, value.clone());
        }
        record
    }

    #[test]
    fn test_header_joins_first_two_values() {
        let record = record_with(&[
            ("run__flow__generate__date", MetricValue::Text("2024-03-01 10:30".to_string())),
            ("run__flow__openroad__version", MetricValue::Text("v2.0".to_string())),
            ("x", MetricValue::Int(1)),
        ]);

        let column = DesignColumn::from_record(&record);
        assert_eq!(column.header(), "2024-03-01 10:30__v2.0");
        assert_eq!(column.rows().len(), 3);
    }

    #[test]
    fn test_first_merge_adopts_column() {
        let record = record_with(&[("date", MetricValue::Text("d".to_string())), ("ver", MetricValue::Text("v".to_string()))]);

        let mut table = AggregateTable::new();
        table.merge(DesignColumn::from_record(&record));

        assert_eq!(table.columns(), &["d__v".to_string()]);
        assert_eq!(table.rows().len(), 2);
    }

    #[test]
    fn test_inner_join_drops_partial_metrics() {
        let left = record_with(&[
            ("date", MetricValue::Text("d1".to_string())),
            ("ver", MetricValue::Text("v1".to_string())),
            ("X", MetricValue::Float(1.0)),
            ("Y", MetricValue::Float(2.0)),
        ]);
        let right = record_with(&[
            ("date", MetricValue::Text("d2".to_string())),
            ("ver", MetricValue::Text("v2".to_string())),
            ("X", MetricValue::Float(3.0)),
        ]);

        let mut table = AggregateTable::new();
        table.merge(DesignColumn::from_record(&left));
        table.merge(DesignColumn::from_record(&right));

        assert_eq!(table.columns(), &["d1__v1".to_string(), "d2__v2".to_string()]);

        let keys: Vec<_> = table.rows().iter().map(|(key, _)| key.as_str()).collect();
        assert_eq!(keys, vec!["date", "ver", "X"]);

        let x_row = table.rows().iter().find(|(key, _)| key == "X").unwrap();
        assert_eq!(x_row.1, vec!["1".to_string(), "3".to_string()]);
    }
}
