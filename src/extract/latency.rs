use crate::metrics::Diagnostics;
use camino::Utf8Path;
use std::fs;

/// Worst-skew latency triple harvested from one report.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SkewSummary {
    pub latency_max: f64,
    pub latency_min: f64,
    pub skew: f64,
}

/// Where the scanner is inside the repeating latency block structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    OutsideBlock,
    ExpectMax,
    ExpectMinAndSkew,
}

/// Scan a report for repeated latency blocks, keeping the triple of the
/// block with the largest skew.
///
/// A block is a line starting with `Latency`, followed by a single-token
/// line carrying the maximum latency, followed by a line of three or more
/// tokens carrying the minimum latency (first token) and the skew (third
/// token). Blank lines never change state; a new `Latency` header resets
/// the scan wherever it is.
///
/// `None` means the file was unreadable. A readable report without one
/// complete block yields the all-zero summary.
pub fn scan_skew_latency(file: &Utf8Path, diags: &mut Diagnostics) -> Option<SkewSummary> {
    let content = match fs::read_to_string(file) {
        Ok(content) => content,
        Err(e) => {
            diags.warn(None, format!("failed to open '{file}': {e}"));
            return None;
        }
    };

    let mut state = ScanState::OutsideBlock;
    let mut block_max = 0.0_f64;
    let mut worst = SkewSummary::default();

    for line in content.lines() {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.is_empty() {
            continue;
        }

        if line.starts_with("Latency") {
            state = ScanState::ExpectMax;
            continue;
        }

        match state {
            ScanState::OutsideBlock => {}
            ScanState::ExpectMax => {
                if tokens.len() == 1 {
                    match tokens[0].parse::<f64>() {
                        Ok(value) => {
                            block_max = value;
                            state = ScanState::ExpectMinAndSkew;
                        }
                        Err(_) => diags.warn(None, format!("unparseable latency value '{}' in '{file}'", tokens[0])),
                    }
                }
            }
            ScanState::ExpectMinAndSkew => {
                if tokens.len() > 2 {
                    match (tokens[0].parse::<f64>(), tokens[2].parse::<f64>()) {
                        (Ok(latency_min), Ok(skew)) => {
                            if skew > worst.skew {
                                worst = SkewSummary {
                                    latency_max: block_max,
                                    latency_min,
                                    skew,
                                };
                            }
                            state = ScanState::OutsideBlock;
                        }
                        _ => diags.warn(None, format!("unparseable skew line in '{file}': {}", line.trim())),
                    }
                }
            }
        }
    }

    Some(worst)
}
