//! Fan-out of progress updates and the terminal outcome to subscribers.

use circlefractal_core::{RenderOutcome, RenderProgress};
use futures::channel::{mpsc, oneshot};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::time::Duration;

/// Subscribers of one render task.
#[derive(Default)]
pub(crate) struct RenderObservers {
    progress: Vec<mpsc::UnboundedSender<RenderProgress>>,
    outcome: Vec<oneshot::Sender<RenderOutcome>>,
    last_progress: Option<RenderProgress>,
    final_outcome: Option<RenderOutcome>,
}

impl RenderObservers {
    /// New progress stream. It starts with the latest published value and
    /// closes once the task reaches a terminal state.
    pub fn subscribe_progress(&mut self) -> mpsc::UnboundedReceiver<RenderProgress> {
        let (tx, rx) = mpsc::unbounded();
        if self.final_outcome.is_some() {
            return rx;
        }
        if let Some(progress) = self.last_progress {
            // A fresh channel cannot be closed yet.
            let _ = tx.unbounded_send(progress);
        }
        self.progress.push(tx);
        rx
    }

    /// New outcome receiver, already resolved if the task has finished.
    pub fn subscribe_outcome(&mut self) -> oneshot::Receiver<RenderOutcome> {
        let (tx, rx) = oneshot::channel();
        match &self.final_outcome {
            Some(outcome) => {
                let _ = tx.send(outcome.clone());
            }
            None => self.outcome.push(tx),
        }
        rx
    }

    pub fn publish(&mut self, progress: RenderProgress) {
        self.last_progress = Some(progress);
        self.progress
            .retain(|tx| tx.unbounded_send(progress).is_ok());
    }

    /// Deliver the outcome to every subscriber and close the progress streams.
    pub fn finish(&mut self, outcome: RenderOutcome) {
        for tx in self.outcome.drain(..) {
            // Dropped receivers are not interested.
            let _ = tx.send(outcome.clone());
        }
        self.progress.clear();
        self.final_outcome = Some(outcome);
    }
}

/// Republish the pixel counter every `interval` until `stop` is signalled or dropped.
///
/// Only values that grew since the last publication and are still below
/// `total` are published; the completion path owns the final `(total, total)`.
pub(crate) fn report_progress(
    completed: &AtomicU64,
    total: u64,
    interval: Duration,
    stop: Receiver<()>,
    mut publish: impl FnMut(RenderProgress),
) {
    let mut last = 0;
    loop {
        match stop.recv_timeout(interval) {
            Err(RecvTimeoutError::Timeout) => {
                let now = completed.load(Ordering::Relaxed);
                if now > last && now < total {
                    publish(RenderProgress::new(now, total));
                    last = now;
                }
            }
            Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
        }
    }
}
