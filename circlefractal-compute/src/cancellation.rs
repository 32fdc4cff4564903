use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Checked by workers before every pixel.
pub trait CancellationChecker: Clone {
    /// Returns true if the worker should stop now.
    fn is_cancelled(&self) -> bool;
}

/// Stop signal of one render run.
///
/// Two flags feed it: the caller's cancel request, shared with the task
/// handle, and an abort raised by the run itself when a row fails.
#[derive(Clone)]
pub struct RenderStop {
    cancel: Arc<AtomicBool>,
    abort: Arc<AtomicBool>,
}

impl RenderStop {
    /// Stop signal watching `cancel`, with a fresh abort flag.
    pub fn new(cancel: Arc<AtomicBool>) -> Self {
        Self {
            cancel,
            abort: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Stop every row of this run without marking it as cancelled.
    pub fn abort(&self) {
        self.abort.store(true, Ordering::Relaxed);
    }

    pub fn is_aborted(&self) -> bool {
        self.abort.load(Ordering::Relaxed)
    }

    /// True only when the caller asked for the stop.
    pub fn is_cancel_requested(&self) -> bool {
        self.cancel.load(Ordering::SeqCst)
    }
}

impl CancellationChecker for RenderStop {
    fn is_cancelled(&self) -> bool {
        self.cancel.load(Ordering::Relaxed) || self.abort.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_run_keeps_going() {
        let stop = RenderStop::new(Arc::new(AtomicBool::new(false)));
        assert!(!stop.is_cancelled());
        assert!(!stop.is_aborted());
        assert!(!stop.is_cancel_requested());
    }

    #[test]
    fn caller_cancel_stops_every_clone() {
        let cancel = Arc::new(AtomicBool::new(false));
        let stop = RenderStop::new(Arc::clone(&cancel));
        let worker_view = stop.clone();

        cancel.store(true, Ordering::SeqCst);
        assert!(stop.is_cancelled());
        assert!(worker_view.is_cancelled());
        assert!(worker_view.is_cancel_requested());
        assert!(!worker_view.is_aborted());
    }

    #[test]
    fn abort_stops_rows_but_is_not_a_cancel_request() {
        let cancel = Arc::new(AtomicBool::new(false));
        let stop = RenderStop::new(Arc::clone(&cancel));
        let worker_view = stop.clone();

        worker_view.abort();
        assert!(stop.is_cancelled());
        assert!(stop.is_aborted());
        assert!(!stop.is_cancel_requested());
        assert!(!cancel.load(Ordering::SeqCst));
    }

    #[test]
    fn runs_sharing_a_cancel_flag_abort_independently() {
        let cancel = Arc::new(AtomicBool::new(false));
        let first = RenderStop::new(Arc::clone(&cancel));
        let second = RenderStop::new(Arc::clone(&cancel));

        first.abort();
        assert!(first.is_cancelled());
        assert!(!second.is_cancelled());
    }
}
