//! Shared plumbing for the design and batch commands.

use camino::{Utf8Path, Utf8PathBuf};
use clap::{Args, ValueEnum};
use flow_metrics::Result;
use flow_metrics::metrics::{Diagnostics, Severity};
use ohno::bail;

/// Log target for forwarded extraction diagnostics
const LOG_TARGET: &str = "extract";

/// Log level for diagnostic output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    None,
    /// Only error messages
    Error,
    /// Warning and error messages
    Warn,
    /// Info, warning, and error messages
    Info,
    /// Debug and above messages
    Debug,
    /// All messages including trace
    Trace,
}

/// Common arguments shared between the design and batch commands
#[derive(Args, Debug)]
pub struct CommonArgs {
    /// Path to the flow directory
    #[arg(long, short = 'f', default_value = "./", value_name = "PATH")]
    pub flow_path: Utf8PathBuf,

    /// Platform repository checkout, used for the platform commit field
    #[arg(long, value_name = "PATH", env = "PLATFORM_DIR")]
    pub platform_dir: Option<Utf8PathBuf>,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "warn", global = true)]
    pub log_level: LogLevel,
}

impl CommonArgs {
    /// Validate the flow path. A bad root is the one fatal input error;
    /// everything below it degrades to sentinel fields instead.
    pub fn validated_flow_path(&self) -> Result<&Utf8Path> {
        if !self.flow_path.is_dir() {
            bail!("flow path '{}' does not exist", self.flow_path);
        }

        Ok(&self.flow_path)
    }
}

/// Initialize logger based on log level
pub fn init_logging(log_level: LogLevel) {
    if log_level == LogLevel::None {
        return;
    }

    let level = match log_level {
        LogLevel::None => return, // Already checked above, but being explicit
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    };

    let env = env_logger::Env::default().filter_or("RUST_LOG", level);

    env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(matches!(log_level, LogLevel::Debug) || matches!(log_level, LogLevel::Trace))
        .init();
}

/// Forward structured extraction diagnostics to the logger.
pub fn emit_diagnostics(diags: &Diagnostics) {
    for diag in diags.iter() {
        let message = match &diag.key {
            Some(key) => format!("{key}: {}", diag.message),
            None => diag.message.clone(),
        };

        match diag.severity {
            Severity::Warn => log::warn!(target: LOG_TARGET, "{message}"),
            Severity::Info => log::info!(target: LOG_TARGET, "{message}"),
        }
    }
}
