pub mod cancellation;
mod observers;
pub mod point_calculator;
pub mod point_compute;
pub mod render_task;
pub mod row_render;

pub use cancellation::{CancellationChecker, RenderStop};
pub use point_calculator::{CircleWalk, PointCalculator};
pub use point_compute::PixelComputer;
pub use render_task::{
    FractalRenderTask, PROGRESS_THREAD_NAME, RENDER_THREAD_NAME, ROW_THREAD_PREFIX,
};
pub use row_render::{render_row, render_row_guarded, RowInterrupt};

// Re-export core types for convenience
pub use circlefractal_core::*;
