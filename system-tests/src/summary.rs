// system-tests/src/summary.rs
// ============================================================================
// Module: Test Summary
// Description: Per-test run summary in JSON and Markdown form.
// Purpose: Give every live test a machine- and human-readable outcome record.
// Dependencies: serde, serde_jcs
// ============================================================================

//! ## Overview
//! [`TestSummary`] is written as canonical JSON (`summary.json`) and as
//! Markdown (`summary.md`). Timestamps are Unix milliseconds held in `u64`,
//! which every JSON writer encodes as a plain number.

use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::Path;
use std::time::Duration;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Deserialize;
use serde::Serialize;

/// JSON summary file name.
pub const SUMMARY_JSON: &str = "summary.json";
/// Markdown summary file name.
pub const SUMMARY_MARKDOWN: &str = "summary.md";

/// Outcome record for one test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestSummary {
    /// Test function name.
    pub test_name: String,
    /// `pass`, `fail`, `skip`, `panic`, or `unknown`.
    pub status: String,
    /// Start time in Unix milliseconds.
    pub started_at_ms: u64,
    /// End time in Unix milliseconds.
    pub ended_at_ms: u64,
    /// Wall-clock duration in milliseconds.
    pub duration_ms: u64,
    /// Exchanges recorded in the transcript.
    pub requests: usize,
    /// Free-form notes.
    pub notes: Vec<String>,
    /// Files written next to the summary.
    pub artifacts: Vec<String>,
}

impl TestSummary {
    /// Writes `summary.json` and `summary.md` into `dir`.
    ///
    /// # Errors
    ///
    /// Returns an I/O error when serialization or a file write fails.
    pub fn write(&self, dir: &Path) -> io::Result<()> {
        let json = serde_jcs::to_vec(self).map_err(|err| io::Error::other(err.to_string()))?;
        fs::write(dir.join(SUMMARY_JSON), json)?;
        fs::write(dir.join(SUMMARY_MARKDOWN), self.to_markdown())
    }

    /// Renders the human-readable summary.
    #[must_use]
    pub fn to_markdown(&self) -> String {
        let mut out = String::from("# License API System-Test Summary\n\n");
        let _ = writeln!(out, "- Test: {}", self.test_name);
        let _ = writeln!(out, "- Status: {}", self.status);
        let _ = writeln!(out, "- Requests: {}", self.requests);
        let _ = writeln!(out, "- Duration (ms): {}", self.duration_ms);
        for (heading, items) in [("Notes", &self.notes), ("Artifacts", &self.artifacts)] {
            let _ = writeln!(out, "\n## {heading}\n");
            if items.is_empty() {
                out.push_str("- None\n");
            }
            for item in items {
                let _ = writeln!(out, "- {item}");
            }
        }
        out
    }
}

/// Current Unix time in milliseconds, saturating at `u64::MAX`.
#[must_use]
pub fn now_millis() -> u64 {
    millis(SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default())
}

/// Converts a duration to whole milliseconds, saturating at `u64::MAX`.
#[must_use]
pub fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
