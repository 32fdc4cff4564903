//! Validated render parameters.

use crate::{RenderError, CIRCLE_FRACTAL_CONFIG};
use serde::{Deserialize, Serialize};

/// Euclidean length of the vector `(dx, dy)`.
pub fn calc_length(dx: f64, dy: f64) -> f64 {
    (dx * dx + dy * dy).sqrt()
}

/// Everything the engine needs to render one circle-fractal image.
///
/// Validated once in [`RenderParameters::new`] and immutable afterwards;
/// deserialization runs the same validation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawRenderParameters")]
pub struct RenderParameters {
    width: u32,
    height: u32,
    number_of_iterations: i32,
    division_factor: i32,
    cut_off: f64,
    maximum_distance: f64,
    is_parallelized: bool,
}

/// Unvalidated mirror of [`RenderParameters`], used as the serde input.
#[derive(Deserialize)]
struct RawRenderParameters {
    width: u32,
    height: u32,
    number_of_iterations: i32,
    division_factor: i32,
    cut_off: f64,
    maximum_distance: f64,
    is_parallelized: bool,
}

impl TryFrom<RawRenderParameters> for RenderParameters {
    type Error = RenderError;

    fn try_from(raw: RawRenderParameters) -> Result<Self, Self::Error> {
        RenderParameters::new(
            raw.width,
            raw.height,
            raw.number_of_iterations,
            raw.division_factor,
            raw.cut_off,
            raw.maximum_distance,
            raw.is_parallelized,
        )
    }
}

impl RenderParameters {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        width: u32,
        height: u32,
        number_of_iterations: i32,
        division_factor: i32,
        cut_off: f64,
        maximum_distance: f64,
        is_parallelized: bool,
    ) -> Result<Self, RenderError> {
        if width == 0 || height == 0 {
            return Err(RenderError::invalid(format!(
                "Width and height were not legal: {width}, {height}."
            )));
        }
        validate_calculator_inputs(
            number_of_iterations,
            division_factor,
            cut_off,
            maximum_distance,
        )?;
        if usize::try_from(width as u64 * height as u64).is_err() {
            return Err(RenderError::invalid(format!(
                "Image of {width}x{height} pixels does not fit in memory."
            )));
        }

        Ok(Self {
            width,
            height,
            number_of_iterations,
            division_factor,
            cut_off,
            maximum_distance,
            is_parallelized,
        })
    }

    /// Build parameters whose maximum distance is derived from the image size:
    /// the distance from the image center to its corner, plus a fixed margin.
    pub fn for_image(
        width: u32,
        height: u32,
        number_of_iterations: i32,
        division_factor: i32,
        cut_off: f64,
        is_parallelized: bool,
    ) -> Result<Self, RenderError> {
        let maximum_distance = calc_length(width as f64 / 2.0, height as f64 / 2.0)
            + CIRCLE_FRACTAL_CONFIG.maximum_distance_margin;
        Self::new(
            width,
            height,
            number_of_iterations,
            division_factor,
            cut_off,
            maximum_distance,
            is_parallelized,
        )
    }

    /// Default parameters for the default image size.
    pub fn default_for_image() -> Result<Self, RenderError> {
        let config = &CIRCLE_FRACTAL_CONFIG;
        Self::for_image(
            config.default_width,
            config.default_height,
            config.default_iterations,
            config.default_division_factor,
            config.default_cut_off,
            config.default_parallelized,
        )
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn number_of_iterations(&self) -> i32 {
        self.number_of_iterations
    }

    pub fn division_factor(&self) -> i32 {
        self.division_factor
    }

    pub fn cut_off(&self) -> f64 {
        self.cut_off
    }

    pub fn maximum_distance(&self) -> f64 {
        self.maximum_distance
    }

    pub fn is_parallelized(&self) -> bool {
        self.is_parallelized
    }

    /// Number of pixels in the image, which is also the total progress work.
    pub fn total_pixels(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Center of the image, where the outermost circle sits.
    pub fn center(&self) -> (f64, f64) {
        (self.width as f64 / 2.0, self.height as f64 / 2.0)
    }
}

/// Checks the numeric contract shared by render parameters and point calculators.
pub fn validate_calculator_inputs(
    number_of_iterations: i32,
    division_factor: i32,
    cut_off: f64,
    maximum_distance: f64,
) -> Result<(), RenderError> {
    if !cut_off.is_finite()
        || !maximum_distance.is_finite()
        || cut_off < 0.0
        || maximum_distance < cut_off + 1.0
    {
        return Err(RenderError::invalid(format!(
            "'cutOff' and/or 'maximumDistance' did not have legal values. c: {cut_off}, m: {maximum_distance}."
        )));
    }
    if division_factor < 2 {
        return Err(RenderError::invalid(format!(
            "'divisionFactor' was not at least 2: {division_factor}."
        )));
    }
    if number_of_iterations < 0 {
        return Err(RenderError::invalid(format!(
            "'numberOfIterations' was not non-negative: {number_of_iterations}."
        )));
    }
    Ok(())
}
