//! Pixel readback and export for Canvas2dContext.

use super::Canvas2dContext;
use crate::error::Canvas2dResult;
use crate::snapshot::CanvasSnapshot;

impl Canvas2dContext {
    /// Get image data for a region of the canvas.
    ///
    /// Returns non-premultiplied RGBA; pixels outside the canvas are transparent black.
    pub fn get_image_data(&self, x: i32, y: i32, width: u32, height: u32) -> Vec<u8> {
        let mut data = vec![0u8; (width * height * 4) as usize];
        let pixels = self.pixmap.pixels();

        for dy in 0..height {
            for dx in 0..width {
                let src_x = x + dx as i32;
                let src_y = y + dy as i32;
                if src_x < 0
                    || src_y < 0
                    || src_x >= self.width as i32
                    || src_y >= self.height as i32
                {
                    continue;
                }

                let src_idx = (src_y as u32 * self.width + src_x as u32) as usize;
                let color = pixels[src_idx].demultiply();
                let dst_idx = ((dy * width + dx) * 4) as usize;
                data[dst_idx..dst_idx + 4].copy_from_slice(&[
                    color.red(),
                    color.green(),
                    color.blue(),
                    color.alpha(),
                ]);
            }
        }

        data
    }

    /// Copy the whole canvas into a detached [`CanvasSnapshot`].
    pub fn snapshot(&self) -> CanvasSnapshot {
        CanvasSnapshot {
            width: self.width,
            height: self.height,
            data: self.get_image_data(0, 0, self.width, self.height),
        }
    }

    /// Export the canvas as PNG data.
    ///
    /// # Arguments
    /// * `ppi` - Optional pixels per inch for PNG metadata. Defaults to 72 if not specified.
    pub fn to_png(&self, ppi: Option<f32>) -> Canvas2dResult<Vec<u8>> {
        self.snapshot().to_png(ppi)
    }
}

#[cfg(test)]
mod tests {
    use crate::{Canvas2dContext, FontConfig};

    #[test]
    fn test_blank_canvas_is_transparent() {
        let config = FontConfig {
            load_system_fonts: false,
            ..FontConfig::default()
        };
        let ctx = Canvas2dContext::with_config(4, 3, config).unwrap();
        let snapshot = ctx.snapshot();
        assert_eq!(snapshot.data.len(), 4 * 3 * 4);
        assert_eq!(snapshot.painted_pixels(), 0);
    }

    #[test]
    fn test_region_outside_canvas_is_zeroed() {
        let config = FontConfig {
            load_system_fonts: false,
            ..FontConfig::default()
        };
        let ctx = Canvas2dContext::with_config(4, 4, config).unwrap();
        let data = ctx.get_image_data(-2, -2, 3, 3);
        assert_eq!(data.len(), 36);
        assert!(data.iter().all(|&b| b == 0));
    }
}
