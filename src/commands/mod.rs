//! Command-line entry points for the tool.

mod batch;
mod common;
mod design;

pub use batch::{BatchArgs, process_batch};
pub use design::{DesignArgs, process_design};
