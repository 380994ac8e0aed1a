//! Framebuffer holding one frame of linear colors.

use std::path::Path;

use crate::{BucketResult, RenderResult};
use prism_math::{Color, Interval};

/// Convert a color to 8-bit RGB.
///
/// Colors brighter than white are scaled down by their largest channel
/// so highlights keep their hue instead of clipping to white.
pub fn color_to_rgb(color: Color) -> [u8; 3] {
    let max = color.max_element();
    let color = if max > 1.0 { color / max } else { color };

    let to_byte = |c: f32| (255.0 * Interval::UNIT.clamp(c)) as u8;
    [to_byte(color.x), to_byte(color.y), to_byte(color.z)]
}

/// A flat, row-major buffer of `width * height` colors.
///
/// Index = row * width + col. Row 0 is the bottom scanline.
#[derive(Debug, Clone, PartialEq)]
pub struct Framebuffer {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl Framebuffer {
    /// Create a new framebuffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn index(&self, row: u32, col: u32) -> usize {
        row as usize * self.width as usize + col as usize
    }

    /// Get the pixel at (row, col).
    pub fn get(&self, row: u32, col: u32) -> Color {
        self.pixels[self.index(row, col)]
    }

    /// Set the pixel at (row, col).
    pub fn set(&mut self, row: u32, col: u32, color: Color) {
        let index = self.index(row, col);
        self.pixels[index] = color;
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    pub(crate) fn pixels_mut(&mut self) -> &mut [Color] {
        &mut self.pixels
    }

    /// View the buffer as packed RGB floats, ready for a texture upload.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Copy a rendered bucket into its region of the frame.
    pub fn write_bucket(&mut self, result: &BucketResult) {
        let bucket = &result.bucket;
        for (local_row, line) in result.pixels.chunks_exact(bucket.width as usize).enumerate() {
            let start = self.index(bucket.y + local_row as u32, bucket.x);
            self.pixels[start..start + line.len()].copy_from_slice(line);
        }
    }

    /// Convert to 8-bit RGB bytes in top-down scanline order (for saving).
    pub fn to_rgb8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 3);
        for line in self.pixels.chunks_exact(self.width.max(1) as usize).rev() {
            for color in line {
                bytes.extend_from_slice(&color_to_rgb(*color));
            }
        }
        bytes
    }

    /// Save the frame to disk; the format follows the file extension.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> RenderResult<()> {
        image::save_buffer(
            path.as_ref(),
            &self.to_rgb8(),
            self.width,
            self.height,
            image::ColorType::Rgb8,
        )?;
        log::info!("Saved {}x{} frame to {}", self.width, self.height, path.as_ref().display());
        Ok(())
    }
}
