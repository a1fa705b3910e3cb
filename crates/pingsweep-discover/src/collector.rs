//! Outcome collection.

use tokio::sync::{mpsc, oneshot};

use pingsweep_core::Outcome;

/// Receive exactly `expected` outcomes and deliver the reachable addresses.
///
/// Completion depends only on the count. If every sender goes away first,
/// `done_tx` is dropped unsent so the receiver sees the scan as incomplete.
pub async fn collect_outcomes(
    expected: usize,
    mut outcome_rx: mpsc::Receiver<Outcome>,
    done_tx: oneshot::Sender<Vec<String>>,
) -> usize {
    let mut alive = Vec::new();
    let mut received = 0usize;

    while received < expected {
        let Some(outcome) = outcome_rx.recv().await else {
            tracing::error!(expected, received, "Outcome channel closed early");
            return received;
        };
        received += 1;
        if outcome.reachable {
            alive.push(outcome.address);
        }
    }

    // The orchestrator may have been dropped; nothing left to do either way.
    let _ = done_tx.send(alive);
    received
}
