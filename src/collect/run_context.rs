use super::toolver;
use crate::metrics::Diagnostics;
use camino::Utf8Path;
use chrono::{DateTime, Local};

/// Provenance shared by every run in one invocation, resolved up front so
/// the assembler never reads ambient process state.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub generated_at: DateTime<Local>,
    pub tool_version: String,
    pub tool_commit: String,
    pub scripts_commit: String,
    pub platform_commit: String,
}

impl RunContext {
    /// Snapshot the clock and the external tool/repository state.
    ///
    /// Each external query fires exactly once and is never retried; a
    /// failure becomes a sentinel string plus a diagnostic, never an error.
    #[must_use]
    pub fn capture(platform_dir: Option<&Utf8Path>, diags: &mut Diagnostics) -> Self {
        let (tool_version, tool_commit) = toolver::query_tool_version(diags);

        Self {
            generated_at: Local::now(),
            tool_version,
            tool_commit,
            scripts_commit: toolver::scripts_commit(diags),
            platform_commit: toolver::platform_commit(platform_dir, diags),
        }
    }
}
