use crate::Result;
use camino::Utf8Path;
use ohno::bail;
use walkdir::WalkDir;

/// Log target for discovery
const LOG_TARGET: &str = "discover";

/// One discovered (platform, design, variant) flow run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunTriple {
    pub platform: String,
    pub design: String,
    pub variant: String,
}

/// Enumerate `<root>/logs/<platform>/<design>` and cross every design with
/// the requested variants.
///
/// Enumeration is sorted so batch order (and with it the merge order of the
/// aggregate table) is deterministic. A missing log directory is the one
/// fatal condition; unreadable entries below it are skipped with a log
/// message.
pub fn discover_runs(flow_root: &Utf8Path, variants: &[String]) -> Result<Vec<RunTriple>> {
    let logs_root = flow_root.join("logs");
    if !logs_root.is_dir() {
        bail!("log directory '{logs_root}' does not exist");
    }

    let mut triples = Vec::new();
    for entry in WalkDir::new(&logs_root).min_depth(2).max_depth(2).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                log::warn!(target: LOG_TARGET, "skipping unreadable directory entry: {e}");
                continue;
            }
        };
        if !entry.file_type().is_dir() {
            continue;
        }

        let design = entry.file_name().to_string_lossy().into_owned();
        let platform = entry
            .path()
            .parent()
            .and_then(|parent| parent.file_name())
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        for variant in variants {
            triples.push(RunTriple {
                platform: platform.clone(),
                design: design.clone(),
                variant: variant.clone(),
            });
        }
    }

    Ok(triples)
}
