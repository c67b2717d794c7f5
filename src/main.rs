//! A tool to extract quality metrics from hardware design flow artifacts.
//!
//! # Overview
//!
//! `flow-metrics` digs through the logs, reports, and results a
//! synthesis-to-GDS flow leaves behind and condenses them into one flat JSON
//! record per design run: cell counts, areas, utilization, timing slack,
//! wirelength, clock skew and latency, DRC violation counts, power breakdown,
//! and per-stage runtimes. In batch mode it additionally merges every run
//! into a single cross-design comparison table.
//!
//! Extraction is deliberately forgiving: a missing log or a silent pattern
//! becomes an `"ERR"`/`"N/A"` placeholder in the output rather than a
//! failure, so the record's schema stays stable from run to run and trend
//! tooling can diff documents directly.
//!
//! # Quick Start
//!
//! Extract one design run:
//!
//! ```bash
//! flow-metrics design -d aes -p asap7 -v base -o metrics.json
//! ```
//!
//! Extract every run found under a flow directory and merge the results:
//!
//! ```bash
//! flow-metrics batch --flow-path ./flow --variants base
//! ```
//!
//! # Flow Directory Layout
//!
//! Both commands expect the conventional flow layout, with one directory
//! level for the platform and one for the design:
//!
//! ```text
//! <flow>/logs/<platform>/<design>/<variant>/1_1_yosys.log, ...
//! <flow>/reports/<platform>/<design>/<variant>/synth_stat.txt, ...
//! <flow>/results/<platform>/<design>/<variant>/2_floorplan.sdc, ...
//! ```
//!
//! # Outputs
//!
//! - `design`: the run's record, pretty-printed to `--output`
//!   (default `metrics.json`).
//! - `batch`: per-run records under
//!   `<flow>/reports/<platform>/<design>/<variant>/metrics.json`, the full
//!   batch as a JSON array at `<flow>/metrics.json`, and the merged
//!   comparison table at `<flow>/metrics.html`. The table is an inner join:
//!   a metric missing from any run is dropped from the comparison.
//!
//! # Provenance
//!
//! Every record starts with provenance fields: generation time, the
//! `openroad -version` banner, the scripts checkout's HEAD revision, and —
//! when `PLATFORM_DIR` points at a platform checkout — the platform's HEAD
//! revision. Failures to resolve any of these degrade to `N/A`-style
//! placeholders; they never abort extraction.
//!
//! # Diagnostics
//!
//! Extraction warnings (missing files, silent patterns, overwritten keys)
//! are reported through the logger; tune them with `--log-level`:
//!
//! ```bash
//! flow-metrics batch --log-level info
//! ```

use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use clap::{Parser, Subcommand};
use flow_metrics::Result;

mod commands;

use crate::commands::{BatchArgs, DesignArgs, process_batch, process_design};

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "flow-metrics", version, about)]
#[command(styles = CLAP_STYLES)]
struct Cli {
    #[command(subcommand)]
    command: FlowSubcommand,
}

#[derive(Subcommand, Debug)]
enum FlowSubcommand {
    /// Extract metrics for a single design run
    Design(DesignArgs),
    /// Discover every design run under the flow directory and merge the results
    Batch(BatchArgs),
}

fn main() -> Result<()> {
    match Cli::parse().command {
        FlowSubcommand::Design(args) => process_design(&args),
        FlowSubcommand::Batch(args) => process_batch(&args),
    }
}
