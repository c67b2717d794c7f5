//! Typed metric values, per-run records, and cross-design tables
//!
//! Everything a flow run produces is normalized into a flat, insertion-ordered
//! [`MetricRecord`] mapping double-underscore-separated keys (e.g.
//! `floorplan__timing__setup__tns`) to typed [`MetricValue`]s. The type of a
//! value is decided exactly once, at extraction time; downstream consumers
//! never re-coerce.
//!
//! Missing or unreadable data is represented in-band: the record always has a
//! slot for every expected key, carrying a sentinel when the source was
//! silent. That keeps the serialized schema stable run over run, which is
//! what diffing and trend tooling rely on.
//!
//! Messages produced while building a record go into a [`Diagnostics`] sink
//! rather than straight to a logger, so callers decide how to surface them.
//! [`DesignColumn`] and [`AggregateTable`] provide the tabular view used for
//! cross-design comparison.

mod diagnostics;
mod metric_value;
mod record;
mod table;

pub use diagnostics::{Diagnostic, Diagnostics, Severity};
pub use metric_value::{ERROR_SENTINEL, MISSING_SENTINEL, MetricValue};
pub use record::MetricRecord;
pub use table::{AggregateTable, DesignColumn, METRICS_COLUMN};
