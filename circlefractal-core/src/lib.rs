pub mod config;
pub mod error;
pub mod outcome;
pub mod parameters;
pub mod pixel_buffer;
pub mod progress;

pub use config::{CircleFractalConfig, CIRCLE_FRACTAL_CONFIG};
pub use error::RenderError;
pub use outcome::{RenderOutcome, TaskState};
pub use parameters::{calc_length, validate_calculator_inputs, RenderParameters};
pub use pixel_buffer::{Argb, PixelBuffer};
pub use progress::RenderProgress;
