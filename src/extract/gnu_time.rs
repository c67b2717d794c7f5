use super::FieldQuery;
use crate::metrics::{Diagnostics, MetricRecord};
use camino::Utf8Path;

/// Pull the GNU-time wall/CPU/peak-memory triple for one stage from its log.
///
/// The conventional summary line is `<wall>elapsed <cpu>CPU <mem>memKB`.
/// Each of the three fields misses or overwrites independently.
pub fn extract_gnu_time(prefix: &str, file: &Utf8Path, record: &mut MetricRecord, diags: &mut Diagnostics) {
    let key = format!("{prefix}__runtime__total");
    FieldQuery::new(&key, r"^(\S+)elapsed \S+CPU \S+memKB").apply(file, record, diags);

    let key = format!("{prefix}__cpu__total");
    FieldQuery::new(&key, r"^\S+elapsed (\S+)CPU \S+memKB").apply(file, record, diags);

    let key = format!("{prefix}__mem__peak");
    FieldQuery::new(&key, r"^\S+elapsed \S+CPU (\S+)memKB").apply(file, record, diags);
}
