use crate::metrics::{Diagnostics, MetricRecord, MetricValue};
use camino::Utf8Path;
use regex::RegexBuilder;
use std::fs;

/// One pattern-driven extraction into a record under construction.
///
/// Queries are built fluently and then applied to a file:
///
/// ```ignore
/// FieldQuery::new("floorplan__timing__setup__wns", r"^wns (\S+)")
///     .occurrence(0)
///     .apply(&log_path, &mut record, &mut diags);
/// ```
///
/// Failures never escape: an unreadable file writes the error sentinel, a
/// pattern miss writes the default, and both leave a diagnostic behind.
#[derive(Debug)]
pub struct FieldQuery<'a> {
    key: &'a str,
    pattern: &'a str,
    count: bool,
    occurrence: isize,
    group: Option<usize>,
    default: MetricValue,
}

impl<'a> FieldQuery<'a> {
    /// A query for `key` matching `pattern` with per-line anchor semantics,
    /// selecting the last occurrence and defaulting to the missing sentinel.
    #[must_use]
    pub const fn new(key: &'a str, pattern: &'a str) -> Self {
        Self {
            key,
            pattern,
            count: false,
            occurrence: -1,
            group: None,
            default: MetricValue::Missing,
        }
    }

    /// Store the number of matches instead of any single match's text.
    #[must_use]
    pub const fn count(mut self) -> Self {
        self.count = true;
        self
    }

    /// Select a specific occurrence; negative values count from the end.
    #[must_use]
    pub const fn occurrence(mut self, occurrence: isize) -> Self {
        self.occurrence = occurrence;
        self
    }

    /// Select a capture group for patterns that carry more than one.
    #[must_use]
    pub const fn group(mut self, group: usize) -> Self {
        self.group = Some(group);
        self
    }

    /// Value stored on a miss. A caller-supplied default also suppresses the
    /// not-found diagnostic.
    #[must_use]
    pub fn default_value(mut self, default: MetricValue) -> Self {
        self.default = default;
        self
    }

    /// Run the query against `file`, writing the outcome into `record`.
    pub fn apply(self, file: &Utf8Path, record: &mut MetricRecord, diags: &mut Diagnostics) {
        // Overwrite detection runs before any I/O so the warning fires even
        // when the file has gone missing since the first extraction.
        if record.contains_key(self.key) {
            diags.warn(Some(self.key), "overwriting previously extracted tag");
        }

        let content = match fs::read_to_string(file) {
            Ok(content) => content,
            Err(e) => {
                diags.warn(Some(self.key), format!("failed to open '{file}': {e}"));
                record.insert(self.key, MetricValue::Error);
                return;
            }
        };

        let regex = match RegexBuilder::new(self.pattern).multi_line(true).build() {
            Ok(regex) => regex,
            Err(e) => {
                diags.warn(Some(self.key), format!("invalid pattern '{}': {e}", self.pattern));
                record.insert(self.key, MetricValue::Error);
                return;
            }
        };

        let matches: Vec<regex::Captures<'_>> = regex.captures_iter(&content).collect();

        if self.count {
            record.insert(self.key, MetricValue::Int(i64::try_from(matches.len()).unwrap_or(i64::MAX)));
            return;
        }

        let Some(slot) = resolve_occurrence(self.occurrence, matches.len()) else {
            if self.default.is_missing() {
                diags.warn(Some(self.key), format!("pattern not found in '{file}'"));
            }
            record.insert(self.key, self.default);
            return;
        };

        let captures = &matches[slot];
        // A lone capture group is the value, a multi-group pattern needs an
        // explicit choice, and a groupless pattern yields the whole match.
        let group = self.group.unwrap_or(usize::from(captures.len() > 1));
        let raw = captures.get(group).map_or("", |m| m.as_str());
        record.insert(self.key, MetricValue::coerce(raw));
    }
}

/// Map a possibly negative occurrence onto an index; `None` when there are
/// no matches or the index falls outside the match list.
fn resolve_occurrence(occurrence: isize, len: usize) -> Option<usize> {
    let len = isize::try_from(len).ok()?;
    let slot = if occurrence < 0 { len + occurrence } else { occurrence };
    (slot >= 0 && slot < len).then(|| usize::try_from(slot).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use tempfile::TempDir;

    fn write_log(dir: &TempDir, name: &str, content: &str) -> Utf8PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        Utf8PathBuf::from_path_buf(path).unwrap()
    }

    fn missing_path(dir: &TempDir) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(dir.path().join("no_such_file.log")).unwrap()
    }

    #[test]
    fn test_unreadable_file_yields_error_sentinel() {
        let dir = TempDir::new().unwrap();
        let mut record = MetricRecord::new();
        let mut diags = Diagnostics::new();

        FieldQuery::new("stage__metric", r"^tns (\S+)").apply(&missing_path(&dir), &mut record, &mut diags);

        assert_eq!(record.get("stage__metric"), Some(&MetricValue::Error));
        assert_eq!(diags.warn_count(), 1);
    }

    #[test]
    fn test_miss_uses_builtin_default_and_warns() {
        let dir = TempDir::new().unwrap();
        let file = write_log(&dir, "a.log", "nothing of note\n");
        let mut record = MetricRecord::new();
        let mut diags = Diagnostics::new();

        FieldQuery::new("stage__metric", r"^tns (\S+)").apply(&file, &mut record, &mut diags);

        assert_eq!(record.get("stage__metric"), Some(&MetricValue::Missing));
        assert_eq!(diags.warn_count(), 1);
    }

    #[test]
    fn test_caller_default_suppresses_miss_warning() {
        let dir = TempDir::new().unwrap();
        let file = write_log(&dir, "a.log", "nothing of note\n");
        let mut record = MetricRecord::new();
        let mut diags = Diagnostics::new();

        FieldQuery::new("stage__metric", r"^tns (\S+)")
            .default_value(MetricValue::Int(0))
            .apply(&file, &mut record, &mut diags);

        assert_eq!(record.get("stage__metric"), Some(&MetricValue::Int(0)));
        assert!(diags.is_empty());
    }

    #[test]
    fn test_last_occurrence_is_the_default() {
        let dir = TempDir::new().unwrap();
        let file = write_log(&dir, "a.log", "tns -1.0\ntns -2.0\ntns -3.0\n");
        let mut record = MetricRecord::new();
        let mut diags = Diagnostics::new();

        FieldQuery::new("last", r"^tns (\S+)").apply(&file, &mut record, &mut diags);
        FieldQuery::new("first", r"^tns (\S+)").occurrence(0).apply(&file, &mut record, &mut diags);
        FieldQuery::new("explicit_last", r"^tns (\S+)").occurrence(2).apply(&file, &mut record, &mut diags);

        assert_eq!(record.get("last"), Some(&MetricValue::Float(-3.0)));
        assert_eq!(record.get("first"), Some(&MetricValue::Float(-1.0)));
        assert_eq!(record.get("explicit_last"), record.get("last"));
    }

    #[test]
    fn test_out_of_range_occurrence_is_a_miss() {
        let dir = TempDir::new().unwrap();
        let file = write_log(&dir, "a.log", "tns -1.0\n");
        let mut record = MetricRecord::new();
        let mut diags = Diagnostics::new();

        FieldQuery::new("stage__metric", r"^tns (\S+)").occurrence(5).apply(&file, &mut record, &mut diags);

        assert_eq!(record.get("stage__metric"), Some(&MetricValue::Missing));
        assert_eq!(diags.warn_count(), 1);
    }

    #[test]
    fn test_count_ignores_occurrence() {
        let dir = TempDir::new().unwrap();
        let file = write_log(&dir, "a.rpt", "violation here\nanother VIOLATION there\n");
        let mut record = MetricRecord::new();
        let mut diags = Diagnostics::new();

        FieldQuery::new("drc", r"(?i)violation").count().occurrence(0).apply(&file, &mut record, &mut diags);

        assert_eq!(record.get("drc"), Some(&MetricValue::Int(2)));
        assert!(diags.is_empty());
    }

    #[test]
    fn test_count_of_zero_matches() {
        let dir = TempDir::new().unwrap();
        let file = write_log(&dir, "a.rpt", "all clean\n");
        let mut record = MetricRecord::new();
        let mut diags = Diagnostics::new();

        FieldQuery::new("drc", r"(?i)violation").count().apply(&file, &mut record, &mut diags);

        assert_eq!(record.get("drc"), Some(&MetricValue::Int(0)));
    }

    #[test]
    fn test_numeric_and_text_coercion() {
        let dir = TempDir::new().unwrap();
        let file = write_log(&dir, "a.log", "elapsed 1:02.50 total\nDesign area 4021 u^2\n");
        let mut record = MetricRecord::new();
        let mut diags = Diagnostics::new();

        FieldQuery::new("area", r"^Design area (\S+) u\^2").apply(&file, &mut record, &mut diags);
        FieldQuery::new("wall", r"elapsed (\S+) total").apply(&file, &mut record, &mut diags);

        assert_eq!(record.get("area"), Some(&MetricValue::Float(4021.0)));
        assert_eq!(record.get("wall"), Some(&MetricValue::Text("1:02.50".to_string())));
    }

    #[test]
    fn test_overwrite_warns_exactly_once() {
        let dir = TempDir::new().unwrap();
        let file = write_log(&dir, "a.log", "tns -1.0\n");
        let mut record = MetricRecord::new();
        let mut diags = Diagnostics::new();

        FieldQuery::new("stage__metric", r"^tns (\S+)").apply(&file, &mut record, &mut diags);
        FieldQuery::new("stage__metric", r"^tns (\S+)").apply(&file, &mut record, &mut diags);

        assert_eq!(record.get("stage__metric"), Some(&MetricValue::Float(-1.0)));
        assert_eq!(record.len(), 1);
        assert_eq!(diags.warn_count(), 1);
    }

    #[test]
    fn test_multiline_pattern_spans_lines() {
        let dir = TempDir::new().unwrap();
        let file = write_log(&dir, "a.log", "instance_count\n--------------\n12453\n");
        let mut record = MetricRecord::new();
        let mut diags = Diagnostics::new();

        FieldQuery::new("cells", r"^instance_count\n-*\n^(\S+)").apply(&file, &mut record, &mut diags);

        assert_eq!(record.get("cells"), Some(&MetricValue::Float(12453.0)));
    }

    #[test]
    fn test_explicit_group_selection() {
        let dir = TempDir::new().unwrap();
        let file = write_log(&dir, "a.log", "Total 1.1 2.2 3.3\n");
        let mut record = MetricRecord::new();
        let mut diags = Diagnostics::new();

        FieldQuery::new("second", r"Total (\S+) (\S+) (\S+)").group(2).apply(&file, &mut record, &mut diags);

        assert_eq!(record.get("second"), Some(&MetricValue::Float(2.2)));
    }
}
