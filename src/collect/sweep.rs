use super::{RunContext, RunTriple, assemble};
use crate::Result;
use crate::metrics::{AggregateTable, DesignColumn, Diagnostics, MetricRecord};
use crate::reports;
use camino::Utf8Path;
use ohno::IntoAppError;
use std::fs;

/// Log target for the sweep
const LOG_TARGET: &str = "sweep";

/// Everything one batch invocation produced.
#[derive(Debug)]
pub struct SweepOutcome {
    pub batch: Vec<MetricRecord>,
    pub table: AggregateTable,
    pub diagnostics: Diagnostics,
}

/// Run the assembler over every discovered triple in order.
///
/// Each run's document is written under
/// `reports/<platform>/<design>/<variant>/metrics.json` and its column is
/// merged into the aggregate as the run completes. A run whose files are
/// all missing contributes a record full of sentinels; the sweep never
/// stops early. Only an unwritable output document is fatal.
pub fn sweep(flow_root: &Utf8Path, runs: &[RunTriple], ctx: &RunContext) -> Result<SweepOutcome> {
    let mut batch = Vec::with_capacity(runs.len());
    let mut table = AggregateTable::new();
    let mut diagnostics = Diagnostics::new();

    for run in runs {
        log::info!(target: LOG_TARGET, "{} {} {}", run.platform, run.design, run.variant);

        let (record, diags) = assemble(flow_root, &run.platform, &run.design, &run.variant, ctx);

        let report_dir = flow_root.join("reports").join(&run.platform).join(&run.design).join(&run.variant);
        fs::create_dir_all(&report_dir).into_app_err_with(|| format!("could not create report directory '{report_dir}'"))?;

        let output = report_dir.join("metrics.json");
        fs::write(&output, reports::render_record(&record)?).into_app_err_with(|| format!("could not write '{output}'"))?;

        table.merge(DesignColumn::from_record(&record));
        batch.push(record);
        diagnostics.extend(diags);
    }

    Ok(SweepOutcome {
        batch,
        table,
        diagnostics,
    })
}
