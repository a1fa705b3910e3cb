//! Value types for a single sweep.
//!
//! A `ScanRequest` goes in, one `Outcome` per candidate address flows
//! between the workers and the collector, and a `ScanResult` comes out.

use std::num::NonZeroUsize;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ── Request ───────────────────────────────────────────────────────

/// Parameters for one sweep. Not modified once a scan starts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScanRequest {
    /// Prefix-notation range, e.g. `192.168.11.0/24`.
    pub range: String,
    /// Number of probe workers running at once.
    pub concurrency: NonZeroUsize,
    /// Passed to the probe before the candidate address, uninterpreted.
    #[serde(default)]
    pub probe_options: Vec<String>,
}

impl ScanRequest {
    pub fn new(range: impl Into<String>, concurrency: NonZeroUsize) -> Self {
        Self {
            range: range.into(),
            concurrency,
            probe_options: Vec::new(),
        }
    }

    pub fn with_probe_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.probe_options = options.into_iter().map(Into::into).collect();
        self
    }
}

// ── Outcome ───────────────────────────────────────────────────────

/// Result of probing one candidate address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub address: String,
    pub reachable: bool,
}

impl Outcome {
    pub fn reachable(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            reachable: true,
        }
    }

    pub fn unreachable(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            reachable: false,
        }
    }
}

// ── Result ────────────────────────────────────────────────────────

/// The reachable set of one sweep plus bookkeeping about the run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanResult {
    /// Unique ID for this scan run.
    pub scan_id: Uuid,
    /// The range specification as requested.
    pub range: String,
    /// Number of candidate addresses probed.
    pub candidate_count: usize,
    /// Reachable addresses in ascending lexicographic string order.
    pub alive: Vec<String>,
    pub started_at: DateTime<Utc>,
    pub duration_ms: u64,
}

impl ScanResult {
    /// An empty result for a range with no candidates.
    pub fn empty(scan_id: Uuid, range: &str, started_at: DateTime<Utc>) -> Self {
        Self {
            scan_id,
            range: range.to_string(),
            candidate_count: 0,
            alive: Vec::new(),
            started_at,
            duration_ms: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.alive.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alive.is_empty()
    }
}
