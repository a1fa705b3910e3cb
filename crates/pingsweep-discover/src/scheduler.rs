//! Batch scanning of several ranges.
//!
//! Spawns one tokio task per request. A semaphore limits how many sweeps run
//! at once, since each one already fans out to its own worker pool.

use std::sync::Arc;

use tokio::sync::Semaphore;

use pingsweep_core::{Result, ScanRequest, ScanResult};

use crate::probe::Probe;
use crate::scanner::PingScanner;

/// Run every request and return `(range, result)` pairs in input order.
///
/// A failing range does not stop the others. A task that panics is logged
/// and left out.
pub async fn scan_targets<P>(
    scanner: &PingScanner<P>,
    requests: Vec<ScanRequest>,
    max_concurrent: usize,
) -> Vec<(String, Result<ScanResult>)>
where
    P: Probe + ?Sized + 'static,
{
    let semaphore = Arc::new(Semaphore::new(max_concurrent.max(1)));
    let mut handles = Vec::with_capacity(requests.len());

    for request in requests {
        let scanner = scanner.clone();
        let semaphore = semaphore.clone();
        let range = request.range.clone();

        let handle = tokio::spawn(async move {
            // The semaphore is never closed.
            let _permit = semaphore.acquire_owned().await.ok();
            scanner.scan(&request).await
        });
        handles.push((range, handle));
    }

    tracing::info!(target_count = handles.len(), max_concurrent, "Batch scan started");

    let mut results = Vec::with_capacity(handles.len());
    for (range, handle) in handles {
        match handle.await {
            Ok(result) => {
                if let Err(e) = &result {
                    tracing::error!(range = %range, error = %e, "Scan failed");
                }
                results.push((range, result));
            }
            Err(e) => {
                tracing::error!(range = %range, error = %e, "Scan task panicked");
            }
        }
    }

    results
}
