//! Extract metrics for a single design run.

use super::common::{CommonArgs, emit_diagnostics, init_logging};
use camino::Utf8PathBuf;
use clap::Args;
use flow_metrics::Result;
use flow_metrics::collect::{RunContext, assemble};
use flow_metrics::metrics::Diagnostics;
use flow_metrics::reports;
use ohno::IntoAppError;
use std::fs;

/// Arguments for the single-design command
#[derive(Args, Debug)]
pub struct DesignArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Design name for metrics
    #[arg(long, short = 'd', value_name = "NAME")]
    pub design: String,

    /// Design platform
    #[arg(long, short = 'p', value_name = "NAME")]
    pub platform: String,

    /// Flow variant of the run
    #[arg(long, short = 'v', default_value = "base", value_name = "NAME")]
    pub variant: String,

    /// Output file
    #[arg(long, short = 'o', default_value = "metrics.json", value_name = "PATH")]
    pub output: Utf8PathBuf,
}

pub fn process_design(args: &DesignArgs) -> Result<()> {
    init_logging(args.common.log_level);
    let flow_root = args.common.validated_flow_path()?;

    let mut diags = Diagnostics::new();
    let ctx = RunContext::capture(args.common.platform_dir.as_deref(), &mut diags);

    let (record, run_diags) = assemble(flow_root, &args.platform, &args.design, &args.variant, &ctx);
    diags.extend(run_diags);
    emit_diagnostics(&diags);

    fs::write(&args.output, reports::render_record(&record)?).into_app_err_with(|| format!("could not write '{}'", args.output))?;

    Ok(())
}
