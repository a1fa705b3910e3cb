//! Probe workers: pull candidates off the shared work queue until it closes.

use std::sync::Arc;

use tokio::sync::{mpsc, Mutex};

use pingsweep_core::Outcome;

use crate::probe::Probe;

/// Work queue shared by every worker in a scan.
pub type WorkQueue = Arc<Mutex<mpsc::Receiver<String>>>;

/// Probe candidates one at a time, sending exactly one outcome for each.
///
/// Returns once the work queue is closed and drained.
pub async fn run_probe_worker<P>(
    worker_id: usize,
    work_rx: WorkQueue,
    outcome_tx: mpsc::Sender<Outcome>,
    probe: Arc<P>,
    options: Arc<[String]>,
) where
    P: Probe + ?Sized,
{
    tracing::debug!(worker_id, "Probe worker started");
    let mut probed = 0usize;

    loop {
        let address = {
            let mut rx = work_rx.lock().await;
            rx.recv().await
        };
        let Some(address) = address else {
            break;
        };

        let reachable = match probe.probe(&address, &options).await {
            Ok(alive) => alive,
            Err(e) => {
                tracing::debug!(worker_id, address = %address, error = %e, "Probe failed");
                false
            }
        };
        probed += 1;

        if outcome_tx.send(Outcome { address, reachable }).await.is_err() {
            tracing::debug!(worker_id, "Outcome channel closed, stopping");
            break;
        }
    }

    tracing::debug!(worker_id, probed, "Probe worker finished");
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::error::ProbeError;

    struct EvenOctetProbe;

    #[async_trait]
    impl Probe for EvenOctetProbe {
        async fn probe(&self, address: &str, _options: &[String]) -> Result<bool, ProbeError> {
            let last: u8 = address.rsplit('.').next().unwrap().parse().unwrap();
            if last == 3 {
                return Err(ProbeError::Spawn {
                    program: "stub".to_string(),
                    source: std::io::Error::other("boom"),
                });
            }
            Ok(last % 2 == 0)
        }
    }

    #[tokio::test]
    async fn test_one_outcome_per_candidate_until_closed() {
        let (work_tx, work_rx) = mpsc::channel(2);
        let (outcome_tx, mut outcome_rx) = mpsc::channel(8);
        let worker = tokio::spawn(run_probe_worker(
            0,
            Arc::new(Mutex::new(work_rx)),
            outcome_tx,
            Arc::new(EvenOctetProbe),
            Arc::from(Vec::<String>::new()),
        ));

        for addr in ["10.0.0.1", "10.0.0.2", "10.0.0.3", "10.0.0.4"] {
            work_tx.send(addr.to_string()).await.unwrap();
        }
        drop(work_tx);
        worker.await.unwrap();

        let mut outcomes = Vec::new();
        while let Some(outcome) = outcome_rx.recv().await {
            outcomes.push(outcome);
        }
        assert_eq!(
            outcomes,
            vec![
                Outcome::unreachable("10.0.0.1"),
                Outcome::reachable("10.0.0.2"),
                Outcome::unreachable("10.0.0.3"),
                Outcome::reachable("10.0.0.4"),
            ]
        );
    }
}
