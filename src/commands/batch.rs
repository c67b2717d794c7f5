//! Discover and extract every design run under the flow directory.

use super::common::{CommonArgs, emit_diagnostics, init_logging};
use clap::Args;
use flow_metrics::Result;
use flow_metrics::collect::{RunContext, SweepOutcome, discover_runs, sweep};
use flow_metrics::metrics::Diagnostics;
use flow_metrics::reports;
use ohno::IntoAppError;
use std::fs;

/// Arguments for the batch command
#[derive(Args, Debug)]
pub struct BatchArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Flow variants to collect for every design
    #[arg(long, short = 'v', value_name = "NAME", num_args = 1.., default_value = "base")]
    pub variants: Vec<String>,
}

pub fn process_batch(args: &BatchArgs) -> Result<()> {
    init_logging(args.common.log_level);
    let flow_root = args.common.validated_flow_path()?;

    let runs = discover_runs(flow_root, &args.variants)?;

    let mut diags = Diagnostics::new();
    let ctx = RunContext::capture(args.common.platform_dir.as_deref(), &mut diags);

    let SweepOutcome {
        batch,
        table,
        diagnostics,
    } = sweep(flow_root, &runs, &ctx)?;

    diags.extend(diagnostics);
    emit_diagnostics(&diags);

    let batch_path = flow_root.join("metrics.json");
    fs::write(&batch_path, reports::render_batch(&batch)?).into_app_err_with(|| format!("could not write '{batch_path}'"))?;

    let mut html = String::new();
    reports::generate_html(&table, &mut html)?;
    let html_path = flow_root.join("metrics.html");
    fs::write(&html_path, html).into_app_err_with(|| format!("could not write '{html_path}'"))?;

    Ok(())
}
