use crate::metrics::Diagnostics;
use camino::Utf8Path;
use std::process::{Command, Stdio};

/// Binary queried for the flow tool's version banner.
const TOOL_BIN: &str = "openroad";

/// Version and commit from the tool's `-version` banner.
///
/// The banner's first whitespace token is the version, the second the
/// commit; either falls back to `N/A` when the banner is short or the
/// query fails outright.
pub fn query_tool_version(diags: &mut Diagnostics) -> (String, String) {
    match Command::new(TOOL_BIN).arg("-version").output() {
        Ok(output) if output.status.success() => {
            let banner = String::from_utf8_lossy(&output.stdout);
            let mut fields = banner.split_whitespace();
            let version = fields.next().unwrap_or("N/A").to_string();
            let commit = fields.next().unwrap_or("N/A").to_string();
            (version, commit)
        }
        _ => {
            diags.warn(None, format!("could not query '{TOOL_BIN} -version'"));
            ("N/A".to_string(), "N/A".to_string())
        }
    }
}

/// HEAD revision of the scripts checkout, or a spelled-out sentinel when
/// the working directory is not a repository.
pub fn scripts_commit(diags: &mut Diagnostics) -> String {
    if is_git_repo(None)
        && let Some(head) = git_head(None)
    {
        return head;
    }

    diags.warn(None, "not a git repo");
    "not a git repo".to_string()
}

/// HEAD revision of the platform checkout named by `PLATFORM_DIR`.
pub fn platform_commit(platform_dir: Option<&Utf8Path>, diags: &mut Diagnostics) -> String {
    let Some(dir) = platform_dir else {
        diags.info(None, "PLATFORM_DIR env variable not set");
        return "N/A".to_string();
    };

    if is_git_repo(Some(dir))
        && let Some(head) = git_head(Some(dir))
    {
        return head;
    }

    diags.warn(None, format!("'{dir}' is not a git repo"));
    "N/A".to_string()
}

/// Probe with `git branch`, discarding output; only the exit status matters.
fn is_git_repo(folder: Option<&Utf8Path>) -> bool {
    let mut cmd = Command::new("git");
    let _ = cmd.arg("branch").stdout(Stdio::null()).stderr(Stdio::null());
    if let Some(folder) = folder {
        let _ = cmd.current_dir(folder);
    }
    cmd.status().is_ok_and(|status| status.success())
}

fn git_head(folder: Option<&Utf8Path>) -> Option<String> {
    let mut cmd = Command::new("git");
    let _ = cmd.args(["rev-parse", "HEAD"]).stderr(Stdio::null());
    if let Some(folder) = folder {
        let _ = cmd.current_dir(folder);
    }

    let output = cmd.output().ok()?;
    output
        .status
        .success()
        .then(|| String::from_utf8_lossy(&output.stdout).trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_platform_commit_without_dir_is_sentinel() {
        let mut diags = Diagnostics::new();
        assert_eq!(platform_commit(None, &mut diags), "N/A");
        assert_eq!(diags.len(), 1);
        assert_eq!(diags.warn_count(), 0);
    }

    #[test]
    fn test_platform_commit_for_plain_directory_is_sentinel() {
        let dir = TempDir::new().unwrap();
        let path = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();

        let mut diags = Diagnostics::new();
        assert_eq!(platform_commit(Some(&path), &mut diags), "N/A");
        assert_eq!(diags.warn_count(), 1);
    }
}
