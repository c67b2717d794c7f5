use super::RunContext;
use crate::extract::{FieldQuery, extract_gnu_time, format_elapsed, parse_elapsed, read_clock_constraints, scan_skew_latency};
use crate::metrics::{Diagnostics, MetricRecord, MetricValue};
use camino::{Utf8Path, Utf8PathBuf};
use chrono::Duration;
use uuid::Uuid;

/// Suffix shared by every per-stage wall-clock field, scanned by the
/// total-runtime summary.
const RUNTIME_SUFFIX: &str = "__runtime__total";

/// Assemble the full metric record for one (platform, design, variant) run.
///
/// Extractions execute in a fixed order against the conventional file names
/// under the run's `logs`, `reports`, and `results` directories. Per-field
/// failures are isolated: every expected key ends up present in the record,
/// carrying a sentinel when its source was missing or silent.
#[must_use]
pub fn assemble(flow_root: &Utf8Path, platform: &str, design: &str, variant: &str, ctx: &RunContext) -> (MetricRecord, Diagnostics) {
    let logs = stage_dir(flow_root, "logs", platform, design, variant);
    let reports = stage_dir(flow_root, "reports", platform, design, variant);
    let results = stage_dir(flow_root, "results", platform, design, variant);

    let mut record = MetricRecord::new();
    let mut diags = Diagnostics::new();

    // Provenance. The first two values double as the design's column header
    // in the cross-design table, so their order is part of the contract.
    record.insert(
        "run__flow__generate__date",
        MetricValue::Text(ctx.generated_at.format("%Y-%m-%d %H:%M").to_string()),
    );
    record.insert("run__flow__openroad__version", MetricValue::Text(ctx.tool_version.clone()));
    record.insert("run__flow__openroad__commit", MetricValue::Text(ctx.tool_commit.clone()));
    record.insert("run__flow__scripts__commit", MetricValue::Text(ctx.scripts_commit.clone()));
    record.insert("run__flow__uuid", MetricValue::Text(Uuid::new_v4().to_string()));
    record.insert("run__flow__design", MetricValue::Text(design.to_string()));
    record.insert("run__flow__platform", MetricValue::Text(platform.to_string()));
    record.insert("run__flow__platform__commit", MetricValue::Text(ctx.platform_commit.clone()));
    record.insert("run__flow__variant", MetricValue::Text(variant.to_string()));

    // Synthesis
    let synth_stat = reports.join("synth_stat.txt");
    FieldQuery::new("synth__design__instance__stdcell__count", r"Number of cells: +(\S+)").apply(&synth_stat, &mut record, &mut diags);
    FieldQuery::new("synth__design__instance__stdcell__area", r"Chip area for module.*: +(\S+)").apply(&synth_stat, &mut record, &mut diags);
    extract_gnu_time("synth", &logs.join("1_1_yosys.log"), &mut record, &mut diags);

    // Clock constraints
    let clocks = read_clock_constraints(&results.join("2_floorplan.sdc"), &mut diags);
    record.insert("constraints__clocks__count", MetricValue::Int(clocks.len() as i64));
    record.insert("constraints__clocks__details", MetricValue::List(clocks));

    // Floorplan
    let floorplan_log = logs.join("2_1_floorplan.log");
    FieldQuery::new("floorplan__timing__setup__tns", r"^tns (\S+)").apply(&floorplan_log, &mut record, &mut diags);
    FieldQuery::new("floorplan__timing__setup__wns", r"^wns (\S+)")
        .occurrence(0)
        .apply(&floorplan_log, &mut record, &mut diags);
    FieldQuery::new("floorplan__design__instance__stdcell__area", r"^Design area (\S+) u\^2").apply(&floorplan_log, &mut record, &mut diags);
    FieldQuery::new("floorplan__design__instance__design__util", r"^Design area.* (\S+)% utilization")
        .apply(&floorplan_log, &mut record, &mut diags);
    FieldQuery::new("floorplan__design__io__count", r"Num of I/O +(\d+)").apply(&logs.join("3_2_place_iop.log"), &mut record, &mut diags);

    let mplace_log = logs.join("2_4_mplace.log");
    FieldQuery::new("floorplan__design__instance__macros__count", r"Extracted # Macros: (\S+)")
        .default_value(MetricValue::Int(0))
        .apply(&mplace_log, &mut record, &mut diags);
    extract_gnu_time("floorplan", &mplace_log, &mut record, &mut diags);

    // Global placement
    let gp_log = logs.join("3_1_place_gp.log");
    FieldQuery::new("globalplace__route__wirelength__estimated", r"Total wirelength: (\S+)").apply(&gp_log, &mut record, &mut diags);
    FieldQuery::new("globalplace__timing__setup__tns", r"^tns (\S+)").apply(&gp_log, &mut record, &mut diags);
    FieldQuery::new("globalplace__timing__setup__wns", r"^wns (\S+)").apply(&gp_log, &mut record, &mut diags);
    extract_gnu_time("globalplace", &gp_log, &mut record, &mut diags);

    // Placement optimization
    let resizer_log = logs.join("3_3_resizer.log");
    FieldQuery::new("placeopt__timing__setup__tns", r"^tns (\S+)").apply(&resizer_log, &mut record, &mut diags);
    FieldQuery::new("placeopt__timing__setup__wns", r"^wns (\S+)").apply(&resizer_log, &mut record, &mut diags);
    FieldQuery::new("placeopt__design__instance__design__area", r"^Design area (\S+) u\^2").apply(&resizer_log, &mut record, &mut diags);
    FieldQuery::new("placeopt__design__instance__design__util", r"^Design area.* (\S+)% utilization")
        .apply(&resizer_log, &mut record, &mut diags);
    FieldQuery::new("placeopt__design__instance__stdcell__count", r"^instance_count\n-*\n^(\S+)").apply(&resizer_log, &mut record, &mut diags);
    extract_gnu_time("placeopt", &resizer_log, &mut record, &mut diags);

    // Detailed placement
    let opendp_log = logs.join("3_4_opendp.log");
    FieldQuery::new("detailedplace__timing__setup__tns", r"^tns (\S+)").apply(&opendp_log, &mut record, &mut diags);
    FieldQuery::new("detailedplace__timing__setup__wns", r"^wns (\S+)").apply(&opendp_log, &mut record, &mut diags);
    FieldQuery::new("detailedplace__design__instance__displacement", r"total displacement +(\d*\.?\d*)")
        .apply(&opendp_log, &mut record, &mut diags);
    FieldQuery::new("detailedplace__design__instance__displacement__mean", r"average displacement +(\d*\.?\d*)")
        .apply(&opendp_log, &mut record, &mut diags);
    // "desgin" is the historical key spelling; downstream dashboards key on it.
    FieldQuery::new("detailedplace__desgin__instance__displacement__max", r"max displacement +(\d*\.?\d*)")
        .apply(&opendp_log, &mut record, &mut diags);
    FieldQuery::new("detailedplace__route__wirelength__estimated", r"legalized HPWL +(\d*\.?\d*)")
        .apply(&opendp_log, &mut record, &mut diags);
    extract_gnu_time("detailedplace", &opendp_log, &mut record, &mut diags);

    // Clock tree synthesis
    let cts_log = logs.join("4_1_cts.log");
    apply_skew_fields("cts", &cts_log, &mut record, &mut diags);
    FieldQuery::new("cts__timing__setup__tns__prerepair", r"^post cts-pre-repair.*report_tns\n^-*\n^tns (\S+)")
        .apply(&cts_log, &mut record, &mut diags);
    FieldQuery::new("cts__timing__setup__wns__prerepair", r"^post cts-pre-repair.*report_wns\n^-*\n^wns (\S+)")
        .apply(&cts_log, &mut record, &mut diags);
    FieldQuery::new("cts__timing__setup__tns", r"^post cts.*report_tns\n^-*\n^tns (\S+)").apply(&cts_log, &mut record, &mut diags);
    FieldQuery::new("cts__timing__setup__wns", r"^post cts.*report_wns\n^-*\n^wns (\S+)").apply(&cts_log, &mut record, &mut diags);
    FieldQuery::new("cts__design__instance__hold_buffer__count", r"Inserted (\d+) hold buffers").apply(&cts_log, &mut record, &mut diags);

    // Global route
    let fastroute_log = logs.join("5_1_fastroute.log");
    apply_skew_fields("globalroute", &fastroute_log, &mut record, &mut diags);
    FieldQuery::new("globalroute__timing__setup__tns", r"^tns (\S+)").apply(&fastroute_log, &mut record, &mut diags);
    FieldQuery::new("globalroute__timing__setup__wns", r"^wns (\S+)").apply(&fastroute_log, &mut record, &mut diags);
    FieldQuery::new("globalroute__timing__clock__slack", r"^\[INFO FLW-....\] Clock .* slack (\S+)")
        .apply(&fastroute_log, &mut record, &mut diags);
    FieldQuery::new("globalroute__timing__clock__period", r"^\[INFO FLW-....\] Clock .* period (\S+)")
        .apply(&fastroute_log, &mut record, &mut diags);
    extract_gnu_time("globalroute", &fastroute_log, &mut record, &mut diags);

    // Detailed route
    let troute_log = logs.join("5_2_TritonRoute.log");
    FieldQuery::new("detailedroute__route__wirelength", r"total wire length = +(\S+) um").apply(&troute_log, &mut record, &mut diags);
    FieldQuery::new("detailedroute__route__via__count", r"total number of vias = +(\S+)").apply(&troute_log, &mut record, &mut diags);
    FieldQuery::new("detailedroute__route__drc_errors__count", r"(?i)violation")
        .count()
        .apply(&reports.join("5_route_drc.rpt"), &mut record, &mut diags);
    extract_gnu_time("detailedroute", &troute_log, &mut record, &mut diags);

    // Finish
    let report_log = logs.join("6_report.log");
    FieldQuery::new("finish__power__internal__total", r"Total +(\S+) +\S+ +\S+ +\S+ +\S+").apply(&report_log, &mut record, &mut diags);
    FieldQuery::new("finish__power__switch__total", r"Total +\S+ +(\S+) +\S+ +\S+ +\S+").apply(&report_log, &mut record, &mut diags);
    FieldQuery::new("finish__power__leakage__total", r"Total +\S+ +\S+ +(\S+) +\S+ +\S+").apply(&report_log, &mut record, &mut diags);
    FieldQuery::new("finish__power__total", r"Total +\S+ +\S+ +\S+ +(\S+) +\S+").apply(&report_log, &mut record, &mut diags);
    FieldQuery::new("finish__design__instance__area", r"^Design area (\S+) u\^2").apply(&report_log, &mut record, &mut diags);
    FieldQuery::new("finish__design__instance__utilization", r"^Design area.* (\S+)% utilization").apply(&report_log, &mut record, &mut diags);
    extract_gnu_time("finish", &report_log, &mut record, &mut diags);

    accumulate_total_time(&mut record);

    (record, diags)
}

fn stage_dir(flow_root: &Utf8Path, kind: &str, platform: &str, design: &str, variant: &str) -> Utf8PathBuf {
    flow_root.join(kind).join(platform).join(design).join(variant)
}

/// Write the worst-skew triple for `prefix`, or error sentinels when the
/// report was unreadable.
fn apply_skew_fields(prefix: &str, file: &Utf8Path, record: &mut MetricRecord, diags: &mut Diagnostics) {
    let (min, max, skew) = match scan_skew_latency(file, diags) {
        Some(summary) => (
            MetricValue::Float(summary.latency_min),
            MetricValue::Float(summary.latency_max),
            MetricValue::Float(summary.skew),
        ),
        None => (MetricValue::Error, MetricValue::Error, MetricValue::Error),
    };

    record.insert(format!("{prefix}__clock__latency__min"), min);
    record.insert(format!("{prefix}__clock__latency__max"), max);
    record.insert(format!("{prefix}__clock__skew__worst"), skew);
}

/// Sum every per-stage wall-clock field into `total_time`.
///
/// Accumulation is all-or-nothing: if any runtime field fails the format
/// chain (including fields holding a sentinel), the summary is the error
/// sentinel, never a partial sum.
fn accumulate_total_time(record: &mut MetricRecord) {
    let mut total = Some(Duration::zero());
    for (key, value) in record.iter() {
        if !key.ends_with(RUNTIME_SUFFIX) {
            continue;
        }

        total = total.and_then(|sum| {
            value
                .as_text()
                .and_then(|text| parse_elapsed(text).ok())
                .map(|elapsed| sum + elapsed)
        });
        if total.is_none() {
            break;
        }
    }

    let summary = total.map_or(MetricValue::Error, |sum| MetricValue::Text(format_elapsed(sum)));
    record.insert("total_time", summary);
}
