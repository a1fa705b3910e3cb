//! Scan orchestration.
//!
//! Expands the range, fans candidates out to a fixed pool of probe workers
//! over a bounded queue, fans outcomes back in to a single collector, and
//! waits for the collector's completion signal.

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use tokio::sync::{mpsc, oneshot, Mutex};
use uuid::Uuid;

use pingsweep_core::{Result, ScanRequest, ScanResult, SweepError};

use crate::collector::collect_outcomes;
use crate::expand::expand_range;
use crate::probe::{CommandProbe, Probe};
use crate::worker::run_probe_worker;

/// Sweeps address ranges with a pluggable probe.
pub struct PingScanner<P: ?Sized> {
    probe: Arc<P>,
}

impl<P: ?Sized> Clone for PingScanner<P> {
    fn clone(&self) -> Self {
        Self {
            probe: self.probe.clone(),
        }
    }
}

impl PingScanner<CommandProbe> {
    /// Scanner that shells out to `program` for every candidate.
    pub fn command(program: &str) -> Self {
        Self::new(CommandProbe::new(program))
    }
}

impl<P: Probe> PingScanner<P> {
    pub fn new(probe: P) -> Self {
        Self {
            probe: Arc::new(probe),
        }
    }
}

impl<P> PingScanner<P>
where
    P: Probe + ?Sized + 'static,
{
    pub fn from_arc(probe: Arc<P>) -> Self {
        Self { probe }
    }

    /// Probe every candidate in `request.range` once and return the alive ones.
    ///
    /// The only error for a well-formed run is an unparseable range, reported
    /// before any probe is started. Probe failures count as unreachable.
    pub async fn scan(&self, request: &ScanRequest) -> Result<ScanResult> {
        let candidates = expand_range(&request.range)?;
        let scan_id = Uuid::new_v4();
        let started_at = Utc::now();

        if candidates.is_empty() {
            tracing::info!(scan_id = %scan_id, range = %request.range, "No candidates in range");
            return Ok(ScanResult::empty(scan_id, &request.range, started_at));
        }

        let start = Instant::now();
        let candidate_count = candidates.len();
        let concurrency = request.concurrency.get();
        // Workers past the candidate count would never receive work.
        let pool_size = concurrency.min(candidate_count);

        tracing::info!(
            scan_id = %scan_id,
            range = %request.range,
            candidates = candidate_count,
            concurrency,
            pool_size,
            "Starting ping sweep"
        );

        // Outcomes get room for every candidate so workers never block on send.
        let (work_tx, work_rx) = mpsc::channel::<String>(pool_size);
        let (outcome_tx, outcome_rx) = mpsc::channel(candidate_count);
        let (done_tx, done_rx) = oneshot::channel();

        let work_rx = Arc::new(Mutex::new(work_rx));
        let options: Arc<[String]> = Arc::from(request.probe_options.as_slice());

        let mut workers = Vec::with_capacity(pool_size);
        for worker_id in 0..pool_size {
            workers.push(tokio::spawn(run_probe_worker(
                worker_id,
                work_rx.clone(),
                outcome_tx.clone(),
                self.probe.clone(),
                options.clone(),
            )));
        }
        drop(outcome_tx);
        drop(work_rx);

        let collector = tokio::spawn(collect_outcomes(candidate_count, outcome_rx, done_tx));

        for address in candidates {
            if work_tx.send(address).await.is_err() {
                // Every worker is gone; the collector will report the shortfall.
                break;
            }
        }
        drop(work_tx);

        let completion = done_rx.await;

        for handle in workers {
            if let Err(e) = handle.await {
                tracing::error!(scan_id = %scan_id, error = %e, "Probe worker panicked");
            }
        }
        let received = match collector.await {
            Ok(received) => received,
            Err(e) => {
                tracing::error!(scan_id = %scan_id, error = %e, "Collector task panicked");
                0
            }
        };

        let mut alive = completion.map_err(|_| SweepError::Incomplete {
            expected: candidate_count,
            received,
        })?;
        alive.sort();

        let duration = start.elapsed();
        tracing::info!(
            scan_id = %scan_id,
            range = %request.range,
            candidates = candidate_count,
            alive = alive.len(),
            duration_ms = duration.as_millis(),
            "Ping sweep complete"
        );

        Ok(ScanResult {
            scan_id,
            range: request.range.clone(),
            candidate_count,
            alive,
            started_at,
            duration_ms: duration.as_millis() as u64,
        })
    }
}
