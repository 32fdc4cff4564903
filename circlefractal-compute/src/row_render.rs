//! Row rendering logic extracted for testability.
//!
//! One row is the unit of work handed to a worker. The render task drives
//! these functions from its thread pool; tests drive them directly.

use crate::{CancellationChecker, PixelComputer};
use circlefractal_core::RenderError;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};

/// Why a row stopped before all of its pixels were written.
#[derive(Clone, Debug, PartialEq)]
pub enum RowInterrupt {
    Cancelled,
    Failed(RenderError),
}

/// Fill `row` with the colors of image row `y`.
///
/// Cancellation is checked before every pixel, and `completed` is bumped
/// after every pixel written.
pub fn render_row<C: CancellationChecker>(
    computer: &dyn PixelComputer,
    y: u32,
    row: &mut [u32],
    checker: &C,
    completed: &AtomicU64,
) -> Result<(), RowInterrupt> {
    for (x, slot) in row.iter_mut().enumerate() {
        if checker.is_cancelled() {
            return Err(RowInterrupt::Cancelled);
        }
        *slot = computer
            .color_at(x as u32, y)
            .map_err(RowInterrupt::Failed)?;
        completed.fetch_add(1, Ordering::Relaxed);
    }
    Ok(())
}

/// Like [`render_row`], but a panic inside the computer becomes a
/// [`RenderError::ComputationFailure`] instead of unwinding into the pool.
pub fn render_row_guarded<C: CancellationChecker>(
    computer: &dyn PixelComputer,
    y: u32,
    row: &mut [u32],
    checker: &C,
    completed: &AtomicU64,
) -> Result<(), RowInterrupt> {
    panic::catch_unwind(AssertUnwindSafe(|| {
        render_row(computer, y, row, checker, completed)
    }))
    .unwrap_or_else(|payload| {
        Err(RowInterrupt::Failed(RenderError::ComputationFailure(
            format!("row {y} panicked: {}", panic_message(payload.as_ref())),
        )))
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
