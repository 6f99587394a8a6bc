//! Detached copies of canvas pixels.

use crate::error::Canvas2dResult;

/// Straight-alpha RGBA copy of a canvas, independent of the context it came from.
///
/// Snapshots are plain data, so they can be moved to another thread and encoded
/// there while the context keeps drawing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanvasSnapshot {
    pub width: u32,
    pub height: u32,
    /// Non-premultiplied RGBA, 4 bytes per pixel, row-major.
    pub data: Vec<u8>,
}

impl CanvasSnapshot {
    /// RGBA value of a single pixel, or `None` outside the snapshot.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y * self.width + x) * 4) as usize;
        let mut px = [0u8; 4];
        px.copy_from_slice(&self.data[idx..idx + 4]);
        Some(px)
    }

    /// Number of pixels with non-zero alpha.
    pub fn painted_pixels(&self) -> usize {
        self.data.chunks_exact(4).filter(|px| px[3] != 0).count()
    }

    /// Encode as PNG data.
    ///
    /// # Arguments
    /// * `ppi` - Optional pixels per inch for PNG metadata. Defaults to 72 if not specified.
    pub fn to_png(&self, ppi: Option<f32>) -> Canvas2dResult<Vec<u8>> {
        let ppi = ppi.unwrap_or(72.0);

        let mut buf = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut buf, self.width, self.height);
            encoder.set_color(png::ColorType::Rgba);
            encoder.set_depth(png::BitDepth::Eight);

            // Pixel density is stored per meter
            let ppm = (ppi.max(0.0) / 0.0254).round() as u32;
            encoder.set_pixel_dims(Some(png::PixelDimensions {
                xppu: ppm,
                yppu: ppm,
                unit: png::Unit::Meter,
            }));

            let mut writer = encoder.write_header()?;
            writer.write_image_data(&self.data)?;
        }
        Ok(buf)
    }
}
