//! Circle-fractal geometry: distance from a point to the nearest circle, and
//! the color that distance maps to.
//!
//! The fractal starts with one circle at the image center. Each circle has up
//! to three children, tangent to it along the axis directions other than the
//! one pointing back at its parent, each `division_factor` times smaller. For
//! a given point only the child in the point's quadrant can be nearest, so the
//! search follows a single path down the tree.

use crate::PixelComputer;
use circlefractal_core::{
    calc_length, validate_calculator_inputs, Argb, RenderError, RenderParameters,
    CIRCLE_FRACTAL_CONFIG,
};
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

/// Calculates color for given points in the circle-fractal.
///
/// Immutable after construction; safe to share between threads.
#[derive(Clone, Debug, PartialEq)]
pub struct PointCalculator {
    center_x: f64,
    center_y: f64,
    number_of_iterations: i32,
    maximum_distance: f64,
    division_factor: i32,
    cut_off: f64,
}

impl PointCalculator {
    /// Center coordinates are assumed to be relatively small (below 1e6 in
    /// absolute value).
    pub fn new(
        center_x: f64,
        center_y: f64,
        number_of_iterations: i32,
        maximum_distance: f64,
        division_factor: i32,
        cut_off: f64,
    ) -> Result<Self, RenderError> {
        if !center_x.is_finite() || !center_y.is_finite() {
            return Err(RenderError::InvalidParameter(format!(
                "Center was not finite: {center_x}, {center_y}."
            )));
        }
        validate_calculator_inputs(number_of_iterations, division_factor, cut_off, maximum_distance)?;

        Ok(Self {
            center_x,
            center_y,
            number_of_iterations,
            maximum_distance,
            division_factor,
            cut_off,
        })
    }

    /// Calculator for a whole image, with the outermost circle at its center.
    pub fn from_parameters(parameters: &RenderParameters) -> Result<Self, RenderError> {
        let (center_x, center_y) = parameters.center();
        Self::new(
            center_x,
            center_y,
            parameters.number_of_iterations(),
            parameters.maximum_distance(),
            parameters.division_factor(),
            parameters.cut_off(),
        )
    }

    /// The best-so-far distance after each step of the walk down the circles.
    ///
    /// Values never increase; the last one is the distance to the nearest circle.
    pub fn circle_walk(&self, x: i64, y: i64) -> CircleWalk<'_> {
        CircleWalk {
            calculator: self,
            point: (x as f64, y as f64),
            center: (self.center_x, self.center_y),
            radius: CIRCLE_FRACTAL_CONFIG.start_radius,
            remaining: self.number_of_iterations,
            direction: CIRCLE_FRACTAL_CONFIG.start_direction,
            best: self.maximum_distance,
            done: false,
        }
    }

    /// Distance from the point to the nearest circle, capped by the maximum
    /// distance. Zero or negative when the point is covered by a circle.
    pub fn distance_to_nearest_circle(&self, x: i64, y: i64) -> f64 {
        self.circle_walk(x, y).fold(self.maximum_distance, |_, distance| distance)
    }

    /// Color for a distance: black on or inside a circle, black to red across
    /// the cut-off band, then red to blue up to the maximum distance.
    pub fn color_from_distance(&self, distance: f64) -> Result<Argb, RenderError> {
        if distance <= 0.0 {
            Argb::from_rgb(0, 0, 0)
        } else if distance <= self.cut_off && self.cut_off > 0.00001 {
            let val = interpolate(distance / self.cut_off);
            Argb::from_rgb(val, 0, 0)
        } else {
            let val = interpolate(
                (distance - self.cut_off) / (self.maximum_distance - self.cut_off),
            );
            Argb::from_rgb(255 - val, 0, val)
        }
    }

    /// Given point, returns the corresponding color.
    pub fn get_color(&self, x: i64, y: i64) -> Result<Argb, RenderError> {
        self.color_from_distance(self.distance_to_nearest_circle(x, y))
    }
}

impl PixelComputer for PointCalculator {
    fn color_at(&self, x: u32, y: u32) -> Result<u32, RenderError> {
        self.get_color(x as i64, y as i64).map(u32::from)
    }
}

/// Scale a `[0, 1]` ratio to a color channel, rounded and clamped.
fn interpolate(ratio: f64) -> i64 {
    (255.0 * ratio).round().clamp(0.0, 255.0) as i64
}

/// Heading of the child circle nearest to the point, in quarter turns.
///
/// The angle from the circle center to the point, measured from the current
/// heading, picks one of three children: straight on, a left turn or a right
/// turn. The child behind the current circle is its parent.
fn next_direction(center: (f64, f64), direction: u8, point: (f64, f64)) -> u8 {
    let (dx, dy) = (point.0 - center.0, point.1 - center.1);
    let offset = direction as f64 * FRAC_PI_2;
    let rads = if dx == 0.0 && dy == 0.0 {
        0.0
    } else {
        (dy.atan2(dx) - offset + 4.0 * PI) % (2.0 * PI)
    };

    let turn = if rads <= FRAC_PI_4 {
        0
    } else if rads <= PI {
        1
    } else if rads <= PI * 7.0 / 4.0 {
        3
    } else {
        0
    };
    (direction + turn) % 4
}

/// Iterator over the best-so-far distances of one point's walk.
pub struct CircleWalk<'a> {
    calculator: &'a PointCalculator,
    point: (f64, f64),
    center: (f64, f64),
    radius: f64,
    remaining: i32,
    direction: u8,
    best: f64,
    done: bool,
}

impl Iterator for CircleWalk<'_> {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if self.done {
            return None;
        }

        let (x, y) = self.point;
        let current =
            (calc_length(x - self.center.0, y - self.center.1) - self.radius).min(self.best);

        // A zero radius can no longer move the center, so later steps repeat this value.
        if current <= 0.0 || self.remaining <= 0 || self.radius == 0.0 {
            self.done = true;
            return Some(current);
        }

        let radius_next = self.radius / self.calculator.division_factor as f64;
        let direction_next = next_direction(self.center, self.direction, self.point);
        let rads = direction_next as f64 * FRAC_PI_2;
        let step = self.radius + radius_next;

        self.center = (
            self.center.0 + step * rads.cos(),
            self.center.1 + step * rads.sin(),
        );
        self.radius = radius_next;
        self.remaining -= 1;
        self.direction = direction_next;
        self.best = current;

        Some(current)
    }
}
