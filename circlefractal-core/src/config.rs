//! Circle-fractal configuration.
//!
//! Fixed geometry constants shared by the point calculator, plus the default
//! values a caller offers before the user changes anything.

use std::time::Duration;

/// Configuration for the circle-fractal renderer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CircleFractalConfig {
    /// Radius of the outermost circle, in pixels.
    pub start_radius: f64,
    /// Heading of the outermost circle, in quarter turns.
    pub start_direction: u8,
    /// Added to the center-to-corner distance when deriving the maximum distance.
    pub maximum_distance_margin: f64,
    /// How often the progress counter is republished to observers.
    pub progress_interval: Duration,
    /// Default image width in pixels.
    pub default_width: u32,
    /// Default image height in pixels.
    pub default_height: u32,
    pub default_iterations: i32,
    pub default_division_factor: i32,
    pub default_cut_off: f64,
    pub default_parallelized: bool,
}

/// The canonical source of truth for circle-fractal rendering constants.
pub static CIRCLE_FRACTAL_CONFIG: CircleFractalConfig = CircleFractalConfig {
    start_radius: 50.0,
    start_direction: 0,
    maximum_distance_margin: 10.0,
    progress_interval: Duration::from_millis(5),
    default_width: 500,
    default_height: 350,
    default_iterations: 5,
    default_division_factor: 2,
    default_cut_off: 0.0,
    default_parallelized: true,
};

impl CircleFractalConfig {
    /// Total pixel count of the default image.
    pub fn default_pixel_count(&self) -> u64 {
        self.default_width as u64 * self.default_height as u64
    }
}
