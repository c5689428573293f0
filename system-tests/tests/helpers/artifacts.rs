// system-tests/tests/helpers/artifacts.rs
// ============================================================================
// Module: Test Artifacts
// Description: Per-test artifact directories, summaries, and transcripts.
// Purpose: Leave a reviewable record of every live run.
// Dependencies: system-tests, license-api-client, serde, serde_jcs
// ============================================================================

use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;
use std::sync::OnceLock;

use license_api_client::Transcript;
use serde::Serialize;
use system_tests::config::SystemTestConfig;
use system_tests::summary::SUMMARY_JSON;
use system_tests::summary::SUMMARY_MARKDOWN;
use system_tests::summary::TestSummary;
use system_tests::summary::now_millis;

/// Transcript artifact file name.
pub const TRANSCRIPT_FILE: &str = "http_transcript.json";

/// Timestamped run root shared by every test in this binary.
static DEFAULT_RUN_ROOT: OnceLock<PathBuf> = OnceLock::new();

/// Resolves `<run root>/<test_name>`.
fn run_root(test_name: &str) -> io::Result<PathBuf> {
    let config = SystemTestConfig::load().map_err(io::Error::other)?;
    let base = config.run_root.unwrap_or_else(|| {
        DEFAULT_RUN_ROOT
            .get_or_init(|| {
                PathBuf::from("target/system-tests").join(format!("run_{}", now_millis()))
            })
            .clone()
    });
    Ok(base.join(test_name))
}

/// Artifact directory for a single test.
#[derive(Debug, Clone)]
pub struct TestArtifacts {
    /// Directory all artifacts are written to.
    root: PathBuf,
}

impl TestArtifacts {
    /// Creates the artifact directory for a test.
    pub fn new(test_name: &str) -> io::Result<Self> {
        let root = run_root(test_name)?;
        fs::create_dir_all(&root)?;
        Ok(Self {
            root,
        })
    }

    /// Returns the artifact directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Writes a JSON artifact using canonical JCS serialization.
    pub fn write_json<T: Serialize>(&self, name: &str, value: &T) -> io::Result<PathBuf> {
        let path = self.root.join(name);
        let bytes = serde_jcs::to_vec(value).map_err(|err| io::Error::other(err.to_string()))?;
        fs::write(&path, bytes)?;
        Ok(path)
    }

    /// Writes a UTF-8 text artifact.
    pub fn write_text(&self, name: &str, value: &str) -> io::Result<PathBuf> {
        let path = self.root.join(name);
        fs::write(&path, value.as_bytes())?;
        Ok(path)
    }
}

/// Writes a summary and transcript for one test, even if it panics.
pub struct TestReporter {
    /// Artifact directory.
    artifacts: TestArtifacts,
    /// Test function name.
    test_name: String,
    /// Start time in Unix milliseconds.
    started_at_ms: u64,
    /// Transcript persisted on finish.
    transcript: Option<Transcript>,
    /// Notes queued before finish.
    notes: Vec<String>,
    /// Set once a summary has been written.
    finalized: bool,
}

impl TestReporter {
    /// Creates a reporter for the named test.
    pub fn new(test_name: &str) -> io::Result<Self> {
        Ok(Self {
            artifacts: TestArtifacts::new(test_name)?,
            test_name: test_name.to_string(),
            started_at_ms: now_millis(),
            transcript: None,
            notes: Vec::new(),
            finalized: false,
        })
    }

    /// Returns the artifact directory.
    pub fn artifacts(&self) -> &TestArtifacts {
        &self.artifacts
    }

    /// Persists `transcript` alongside the summary when the test ends.
    pub fn attach_transcript(&mut self, transcript: Transcript) {
        self.transcript = Some(transcript);
    }

    /// Queues a note for the summary.
    pub fn note(&mut self, note: String) {
        self.notes.push(note);
    }

    /// Records a passing run.
    pub fn pass(&mut self, notes: Vec<String>) -> io::Result<()> {
        self.finish("pass", notes)
    }

    /// Records a skipped run.
    pub fn skip(&mut self, reason: &str) -> io::Result<()> {
        tracing::info!(test = %self.test_name, reason, "precondition unmet, skipping");
        self.finish("skip", vec![reason.to_string()])
    }

    /// Records a failed run.
    pub fn fail(&mut self, notes: Vec<String>) -> io::Result<()> {
        self.finish("fail", notes)
    }

    /// Writes the summary and, when attached, the transcript.
    pub fn finish(&mut self, status: &str, notes: Vec<String>) -> io::Result<()> {
        let mut all_notes = std::mem::take(&mut self.notes);
        all_notes.extend(notes);
        let mut artifacts = vec![SUMMARY_JSON.to_string(), SUMMARY_MARKDOWN.to_string()];
        let requests = match &self.transcript {
            Some(transcript) => {
                let entries = transcript.entries();
                self.artifacts.write_json(TRANSCRIPT_FILE, &entries)?;
                artifacts.push(TRANSCRIPT_FILE.to_string());
                entries.len()
            }
            None => 0,
        };
        let ended_at_ms = now_millis();
        let summary = TestSummary {
            test_name: self.test_name.clone(),
            status: status.to_string(),
            started_at_ms: self.started_at_ms,
            ended_at_ms,
            duration_ms: ended_at_ms.saturating_sub(self.started_at_ms),
            requests,
            notes: all_notes,
            artifacts,
        };
        summary.write(self.artifacts.root())?;
        self.finalized = true;
        Ok(())
    }
}

impl Drop for TestReporter {
    fn drop(&mut self) {
        if self.finalized {
            return;
        }
        let status = if std::thread::panicking() { "panic" } else { "unknown" };
        let _ = self.finish(status, vec!["test terminated without explicit summary".to_string()]);
    }
}
