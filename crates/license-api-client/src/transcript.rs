// crates/license-api-client/src/transcript.rs
// ============================================================================
// Module: Request Transcript
// Description: Ordered log of completed HTTP exchanges.
// Purpose: Let test reporters persist exactly what was sent and received.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Each call through [`crate::HttpClient`] appends one entry, whether it
//! produced a response or a transport error. Header values are never stored,
//! so API keys cannot leak into artifacts.

use std::sync::Arc;
use std::sync::Mutex;

use serde::Serialize;

/// One recorded HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranscriptEntry {
    /// 1-based position within the transcript.
    pub sequence: u64,
    /// HTTP method.
    pub method: String,
    /// Endpoint path relative to the base URL.
    pub path: String,
    /// Query parameters in send order.
    pub query: Vec<(String, String)>,
    /// Final status, when a response was received.
    pub status: Option<u16>,
    /// Number of requests sent for this call.
    pub attempts: u32,
    /// Request body as sent.
    pub request_body: Option<String>,
    /// Final response body.
    pub response_body: Option<String>,
    /// Transport error message, when no response was received.
    pub error: Option<String>,
}

/// Shared, append-only transcript.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    /// Recorded entries.
    entries: Arc<Mutex<Vec<TranscriptEntry>>>,
}

impl Transcript {
    /// Creates an empty transcript.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry, assigning its sequence number.
    pub fn record(&self, mut entry: TranscriptEntry) {
        let Ok(mut guard) = self.entries.lock() else {
            return;
        };
        entry.sequence = u64::try_from(guard.len()).unwrap_or(u64::MAX).saturating_add(1);
        guard.push(entry);
    }

    /// Returns a snapshot of the entries.
    #[must_use]
    pub fn entries(&self) -> Vec<TranscriptEntry> {
        self.entries.lock().map_or_else(|_| Vec::new(), |entries| entries.clone())
    }

    /// Returns the number of recorded entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().map_or(0, |entries| entries.len())
    }

    /// Returns true when nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
