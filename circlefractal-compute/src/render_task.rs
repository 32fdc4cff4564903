//! Cancellable, progress-reporting render of a whole circle-fractal image.
//!
//! Rendering, parallelization, progress and cancellation are each simple on
//! their own. Combined, they need a few rules:
//!
//! - Rows are the unit of work. Each worker owns a disjoint row slice of the
//!   output buffer, so pixel writes need no locking.
//! - Workers check for cancellation before every pixel and bump one shared
//!   atomic counter after every pixel. They never publish progress.
//! - A single reporter thread reads the counter at a fixed cadence and is the
//!   only publisher while rows are running, so observers see a
//!   non-decreasing sequence whatever order rows complete in.
//! - The thread pool and the reporter live only as long as one run.

use crate::observers::{report_progress, RenderObservers};
use crate::row_render::{render_row_guarded, RowInterrupt};
use crate::{PixelComputer, PointCalculator, RenderStop};
use circlefractal_core::{
    PixelBuffer, RenderError, RenderOutcome, RenderParameters, RenderProgress, TaskState,
    CIRCLE_FRACTAL_CONFIG,
};
use futures::channel::{mpsc, oneshot};
use log::{debug, error, info, warn};
use rayon::prelude::*;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{mpsc as std_mpsc, Arc, Mutex, MutexGuard, OnceLock, PoisonError};
use std::thread;
use std::time::{Duration, Instant};

/// Handle to one circle-fractal render.
///
/// Cloning gives another handle to the same task, so a caller can cancel
/// from one thread while waiting on another. A task runs at most once;
/// rendering again needs a new task.
#[derive(Clone)]
pub struct FractalRenderTask {
    shared: Arc<TaskShared>,
}

struct TaskShared {
    parameters: RenderParameters,
    computer: Arc<dyn PixelComputer>,
    progress_interval: Duration,
    state: Mutex<TaskState>,
    cancel_requested: Arc<AtomicBool>,
    completed: AtomicU64,
    observers: Mutex<RenderObservers>,
}

/// Name of the background thread that drives a run. Linux keeps 15 bytes.
pub const RENDER_THREAD_NAME: &str = "cf-render";
/// Name of the thread republishing progress during a run.
pub const PROGRESS_THREAD_NAME: &str = "cf-progress";
/// Prefix of the per-run row worker threads.
pub const ROW_THREAD_PREFIX: &str = "cfrow-";

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl FractalRenderTask {
    /// Create a task rendering the circle-fractal described by `parameters`.
    pub fn new(parameters: RenderParameters) -> Result<Self, RenderError> {
        let calculator = PointCalculator::from_parameters(&parameters)?;
        Ok(Self::with_computer(parameters, Arc::new(calculator)))
    }

    /// Create a task that colors every pixel with `computer`.
    pub fn with_computer(parameters: RenderParameters, computer: Arc<dyn PixelComputer>) -> Self {
        debug!(
            "Created render task for {}x{} image",
            parameters.width(),
            parameters.height()
        );
        Self {
            shared: Arc::new(TaskShared {
                parameters,
                computer,
                progress_interval: CIRCLE_FRACTAL_CONFIG.progress_interval,
                state: Mutex::new(TaskState::Ready),
                cancel_requested: Arc::new(AtomicBool::new(false)),
                completed: AtomicU64::new(0),
                observers: Mutex::new(RenderObservers::default()),
            }),
        }
    }

    pub fn parameters(&self) -> &RenderParameters {
        &self.shared.parameters
    }

    pub fn state(&self) -> TaskState {
        *lock(&self.shared.state)
    }

    /// Begin rendering on a background thread and return immediately.
    ///
    /// Only the first call starts anything; later calls are ignored.
    pub fn start(&self) {
        {
            let mut state = lock(&self.shared.state);
            if *state != TaskState::Ready {
                warn!("Render task already started (state {:?}), ignoring start", *state);
                return;
            }
            *state = TaskState::Running;
        }
        debug!("Render task Ready -> Running");

        let shared = Arc::clone(&self.shared);
        let spawned = thread::Builder::new()
            .name(RENDER_THREAD_NAME.to_string())
            .spawn(move || {
                let outcome = shared.run();
                shared.finish(outcome);
            });

        if let Err(err) = spawned {
            error!("Could not spawn render thread: {err}");
            self.shared
                .finish(RenderOutcome::Failed(RenderError::WorkerPool(err.to_string())));
        }
    }

    /// Ask the render to stop. Takes effect at the next pixel; a no-op once
    /// the task has finished.
    pub fn cancel(&self) {
        // Held across the store so a finishing run cannot slip in between.
        let state = lock(&self.shared.state);
        if state.is_terminal() {
            debug!("Render task already {:?}, ignoring cancel", *state);
            return;
        }
        if !self.shared.cancel_requested.swap(true, Ordering::SeqCst) {
            debug!("Cancellation requested");
        }
    }

    pub fn is_cancel_requested(&self) -> bool {
        self.shared.cancel_requested.load(Ordering::SeqCst)
    }

    /// Stream of `(completed, total)` pixel counts, closed when the task finishes.
    pub fn subscribe_progress(&self) -> mpsc::UnboundedReceiver<RenderProgress> {
        lock(&self.shared.observers).subscribe_progress()
    }

    /// Future resolving to the task's single terminal outcome.
    pub fn outcome(&self) -> oneshot::Receiver<RenderOutcome> {
        lock(&self.shared.observers).subscribe_outcome()
    }

    /// Block the calling thread until the task finishes.
    ///
    /// A task that was never started returns `Failed(NotStarted)` at once
    /// instead of blocking.
    pub fn wait(&self) -> RenderOutcome {
        if self.state() == TaskState::Ready {
            return RenderOutcome::Failed(RenderError::NotStarted);
        }
        futures::executor::block_on(self.outcome()).unwrap_or_else(|_| {
            RenderOutcome::Failed(RenderError::ComputationFailure(
                "render task ended without an outcome".to_string(),
            ))
        })
    }
}

impl TaskShared {
    fn run(&self) -> RenderOutcome {
        let parameters = &self.parameters;
        let total = parameters.total_pixels();
        let width = parameters.width() as usize;
        let started = Instant::now();

        info!(
            "Rendering {}x{} circle-fractal: {} iterations, division factor {}, cut-off {}, parallel {}",
            parameters.width(),
            parameters.height(),
            parameters.number_of_iterations(),
            parameters.division_factor(),
            parameters.cut_off(),
            parameters.is_parallelized()
        );

        self.publish(RenderProgress::start(total));

        let threads = if parameters.is_parallelized() {
            thread::available_parallelism()
                .map(NonZeroUsize::get)
                .unwrap_or(1)
        } else {
            1
        };
        let mut pixels = vec![0u32; width * parameters.height() as usize];
        let stop = RenderStop::new(Arc::clone(&self.cancel_requested));
        let failure = OnceLock::new();

        // The scoped pool joins every worker before `build_scoped` returns,
        // and the reporter is joined by its scope, on every path.
        let rows = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("{ROW_THREAD_PREFIX}{i}"))
            .build_scoped(
                |worker| worker.run(),
                |pool| {
                    debug!("Worker pool ready with {threads} thread(s)");
                    let (stop_tx, stop_rx) = std_mpsc::channel::<()>();
                    thread::scope(|scope| {
                        let reporter = thread::Builder::new()
                            .name(PROGRESS_THREAD_NAME.to_string())
                            .spawn_scoped(scope, move || {
                                report_progress(
                                    &self.completed,
                                    total,
                                    self.progress_interval,
                                    stop_rx,
                                    |p| self.publish(p),
                                )
                            });
                        if let Err(err) = reporter {
                            return Err(RowInterrupt::Failed(RenderError::WorkerPool(
                                err.to_string(),
                            )));
                        }

                        let rows =
                            pool.install(|| self.render_rows(&mut pixels, width, &stop, &failure));
                        drop(stop_tx);
                        rows
                    })
                },
            );
        let rows = match rows {
            Ok(rows) => rows,
            Err(err) => {
                error!("Could not build worker pool: {err}");
                return RenderOutcome::Failed(RenderError::WorkerPool(err.to_string()));
            }
        };
        debug!("Worker pool and progress reporter shut down");

        let failure = failure.into_inner().or(match rows {
            Err(RowInterrupt::Failed(err)) => Some(err),
            _ => None,
        });
        if let Some(err) = failure {
            error!("Render failed after {:?}: {err}", started.elapsed());
            return RenderOutcome::Failed(err);
        }
        if stop.is_cancel_requested() {
            info!(
                "Render cancelled after {:?} at {}/{} pixels",
                started.elapsed(),
                self.completed.load(Ordering::Relaxed),
                total
            );
            return RenderOutcome::Cancelled;
        }

        match PixelBuffer::new(parameters.width(), parameters.height(), pixels) {
            Ok(image) => {
                self.publish(RenderProgress::new(total, total));
                info!("Render finished in {:?}", started.elapsed());
                RenderOutcome::Completed(image)
            }
            Err(err) => RenderOutcome::Failed(err),
        }
    }

    fn render_rows(
        &self,
        pixels: &mut [u32],
        width: usize,
        stop: &RenderStop,
        failure: &OnceLock<RenderError>,
    ) -> Result<(), RowInterrupt> {
        if self.parameters.is_parallelized() {
            pixels
                .par_chunks_mut(width)
                .enumerate()
                .try_for_each(|(y, row)| self.render_one_row(y, row, stop, failure))
        } else {
            pixels
                .chunks_mut(width)
                .enumerate()
                .try_for_each(|(y, row)| self.render_one_row(y, row, stop, failure))
        }
    }

    fn render_one_row(
        &self,
        y: usize,
        row: &mut [u32],
        stop: &RenderStop,
        failure: &OnceLock<RenderError>,
    ) -> Result<(), RowInterrupt> {
        let result = render_row_guarded(
            self.computer.as_ref(),
            y as u32,
            row,
            stop,
            &self.completed,
        );
        if let Err(RowInterrupt::Failed(err)) = &result {
            // First failure wins; every other in-flight row stops at its next pixel.
            if failure.set(err.clone()).is_ok() {
                error!("Row {y} failed: {err}");
            }
            stop.abort();
        }
        result
    }

    fn publish(&self, progress: RenderProgress) {
        lock(&self.observers).publish(progress);
    }

    fn finish(&self, outcome: RenderOutcome) {
        let state = outcome.state();
        *lock(&self.state) = state;
        debug!("Render task Running -> {state:?}");
        lock(&self.observers).finish(outcome);
    }
}
