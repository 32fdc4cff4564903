use circlefractal_core::RenderError;

/// Trait for computing the color of a single pixel.
///
/// This is the lowest-level rendering abstraction - pure computation with no loops.
/// The render task adds row iteration, cancellation and progress on top.
/// Implementations are shared read-only across worker threads.
pub trait PixelComputer: Send + Sync {
    /// ARGB color of the pixel at `(x, y)`.
    fn color_at(&self, x: u32, y: u32) -> Result<u32, RenderError>;
}
