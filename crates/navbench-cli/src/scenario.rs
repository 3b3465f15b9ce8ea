//! Scenario file reader.
//!
//! A scenario is a text file with one hex-encoded navigation page per line.
//! Blank lines and `#` comments are skipped. A line that does not decode as
//! hex still becomes a record; its conversion falls through to the textual
//! form, so a partially malformed scenario never truncates a run.

use navbench_core::SourceRecord;
use std::fs;
use std::path::Path;

/// One scenario line, hex-decoded when possible.
#[derive(Debug, Clone)]
pub struct ScenarioRecord {
    line: String,
    bits: Option<Vec<u8>>,
}

impl SourceRecord for ScenarioRecord {
    fn nav_bits(&self) -> Option<&[u8]> {
        self.bits.as_deref()
    }

    fn describe(&self) -> String {
        self.line.clone()
    }
}

/// Read a scenario file into indexed records.
///
/// Indices are assigned sequentially from 0 over the retained lines.
///
/// # Errors
///
/// Returns an I/O error when the file cannot be read; individual malformed
/// lines are not errors.
pub fn read_scenario(path: &Path) -> std::io::Result<Vec<(u64, ScenarioRecord)>> {
    let content = fs::read_to_string(path)?;
    let mut records = Vec::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let bits = hex::decode(line).ok();
        if bits.is_none() {
            tracing::debug!(line, "non-hex scenario line; will use textual fallback");
        }
        records.push((
            records.len() as u64,
            ScenarioRecord {
                line: line.to_string(),
                bits,
            },
        ));
    }
    Ok(records)
}
