//! ARGB pixel packing and the finished image buffer.

use crate::RenderError;
use std::sync::Arc;

/// A 32-bit color in ARGB order: `0xAARRGGBB`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Argb(pub u32);

impl Argb {
    pub const BLACK: Argb = Argb(0xFF00_0000);

    /// Pack an opaque color, rejecting any component outside `[0, 255]`.
    pub fn from_rgb(red: i64, green: i64, blue: i64) -> Result<Self, RenderError> {
        let in_range = |c: i64| (0..=255).contains(&c);
        if !in_range(red) || !in_range(green) || !in_range(blue) {
            return Err(RenderError::ColorComponentOutOfRange { red, green, blue });
        }
        Ok(Argb(
            (255 << 24) | ((red as u32) << 16) | ((green as u32) << 8) | blue as u32,
        ))
    }

    pub fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    pub fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub fn blue(self) -> u8 {
        self.0 as u8
    }

    /// Bytes in RGBA order, as canvas image data expects them.
    pub fn to_rgba(self) -> [u8; 4] {
        [self.red(), self.green(), self.blue(), self.alpha()]
    }
}

impl From<Argb> for u32 {
    fn from(color: Argb) -> Self {
        color.0
    }
}

/// A finished image: `width * height` ARGB values in row-major order.
///
/// Cloning is cheap; the pixel storage is shared and never mutated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Arc<[u32]>,
}

impl PixelBuffer {
    /// Wrap row-major pixels. Fails if the length does not match the size.
    pub fn new(width: u32, height: u32, pixels: Vec<u32>) -> Result<Self, RenderError> {
        let expected = width as u64 * height as u64;
        if pixels.len() as u64 != expected {
            return Err(RenderError::ComputationFailure(format!(
                "pixel buffer holds {} values, expected {expected} for {width}x{height}",
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            pixels: pixels.into(),
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Color at `(x, y)`, or `None` outside the image.
    pub fn get(&self, x: u32, y: u32) -> Option<Argb> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let index = y as usize * self.width as usize + x as usize;
        self.pixels.get(index).copied().map(Argb)
    }

    /// One row of pixels.
    pub fn row(&self, y: u32) -> Option<&[u32]> {
        if y >= self.height {
            return None;
        }
        let start = y as usize * self.width as usize;
        self.pixels.get(start..start + self.width as usize)
    }

    /// The whole image as RGBA bytes, 4 per pixel.
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|&p| Argb(p).to_rgba()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packs_components_in_argb_order() {
        let green = Argb::from_rgb(0, 255, 0).unwrap();
        assert_eq!(green.0, 0xFF00_FF00);
        assert_eq!(green.alpha(), 255);
        assert_eq!(Argb::from_rgb(0, 0, 0).unwrap(), Argb::BLACK);
    }

    #[test]
    fn rejects_out_of_range_components() {
        assert!(Argb::from_rgb(256, 0, 0).is_err());
        assert!(Argb::from_rgb(0, -1, 0).is_err());
        assert!(Argb::from_rgb(0, 0, 1000).is_err());
    }

    #[test]
    fn rgba_bytes() {
        let color = Argb::from_rgb(10, 20, 30).unwrap();
        assert_eq!(color.to_rgba(), [10, 20, 30, 255]);
    }

    #[test]
    fn buffer_size_must_match() {
        assert!(PixelBuffer::new(2, 2, vec![0; 3]).is_err());
        assert!(PixelBuffer::new(2, 2, vec![0; 4]).is_ok());
    }

    #[test]
    fn get_and_row_are_row_major() {
        let buffer = PixelBuffer::new(3, 2, vec![0, 1, 2, 3, 4, 5]).unwrap();
        assert_eq!(buffer.get(2, 1), Some(Argb(5)));
        assert_eq!(buffer.get(3, 0), None);
        assert_eq!(buffer.row(1), Some(&[3, 4, 5][..]));
        assert_eq!(buffer.row(2), None);
    }

    #[test]
    fn rgba_bytes_cover_every_pixel() {
        let red = Argb::from_rgb(255, 0, 0).unwrap().0;
        let buffer = PixelBuffer::new(2, 1, vec![red, Argb::BLACK.0]).unwrap();
        assert_eq!(buffer.to_rgba_bytes(), vec![255, 0, 0, 255, 0, 0, 0, 255]);
    }
}
