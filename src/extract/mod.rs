//! Pattern-driven extraction from flow logs and reports
//!
//! The leaf extractors of the pipeline. [`FieldQuery`] is the workhorse: one
//! regex query against one file, producing exactly one field in the record
//! under construction. On top of it sit the GNU-time triple
//! ([`extract_gnu_time`]), the stateful latency-block scanner
//! ([`scan_skew_latency`]), and the clock-constraint parser
//! ([`read_clock_constraints`]).
//!
//! None of these return errors. An unreadable file becomes the error
//! sentinel, a silent pattern becomes the caller's default, and every such
//! outcome leaves a diagnostic behind — extraction failures are data, not
//! control flow.

mod duration;
mod field;
mod gnu_time;
mod latency;
mod sdc;

pub use duration::{UnrecognizedDuration, format_elapsed, parse_elapsed};
pub use field::FieldQuery;
pub use gnu_time::extract_gnu_time;
pub use latency::{SkewSummary, scan_skew_latency};
pub use sdc::read_clock_constraints;
