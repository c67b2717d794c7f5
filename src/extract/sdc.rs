use crate::metrics::Diagnostics;
use camino::Utf8Path;
use std::fs;

/// Extract `create_clock` declarations from a constraint file.
///
/// Each relevant line contributes one `"<name>: <period>"` entry, taken
/// from the tokens following the `-name` and `-period` flags. The result is
/// sorted lexicographically. A missing file is an empty clock set, not an
/// error.
pub fn read_clock_constraints(file: &Utf8Path, diags: &mut Diagnostics) -> Vec<String> {
    let content = match fs::read_to_string(file) {
        Ok(content) => content,
        Err(e) => {
            diags.warn(None, format!("failed to open '{file}': {e}"));
            return Vec::new();
        }
    };

    let mut clocks = Vec::new();
    for line in content.lines() {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() < 2 || tokens[0] != "create_clock" {
            continue;
        }

        match (token_after(&tokens, "-name"), token_after(&tokens, "-period")) {
            (Some(name), Some(period)) => clocks.push(format!("{name}: {period}")),
            _ => diags.warn(None, format!("malformed create_clock line in '{file}': {}", line.trim())),
        }
    }

    clocks.sort();
    clocks
}

fn token_after<'a>(tokens: &[&'a str], flag: &str) -> Option<&'a str> {
    tokens.iter().position(|token| *token == flag).and_then(|slot| tokens.get(slot + 1).copied())
}
