//! The drawing surface: sole owner of the raster buffer.

use crate::config::EditorConfig;
use crate::download::{DownloadSink, DOWNLOAD_FILE_NAME};
use crate::request::TextDrawRequest;
use futures::channel::oneshot;
use std::path::PathBuf;
use std::thread;
use textcanvas_canvas2d::{Canvas2dContext, Canvas2dError, CanvasSnapshot};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("Failed to create canvas: {0}")]
    Canvas(#[source] Canvas2dError),

    #[error("Canvas rejected font {font:?}: {source}")]
    Font {
        font: String,
        source: Canvas2dError,
    },

    #[error("Canvas rejected color {color:?}: {source}")]
    Color {
        color: String,
        source: Canvas2dError,
    },
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to encode image: {0}")]
    Encoding(#[from] Canvas2dError),

    #[error("Failed to start image encoder: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("Image encoder stopped before delivering a result")]
    Canceled,

    #[error("Failed to save {file_name}: {source}")]
    Save {
        file_name: String,
        source: std::io::Error,
    },
}

/// The drawing operations the surface needs from a raster.
pub trait TextRaster {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    /// Set the font from a CSS font shorthand.
    fn set_font(&mut self, font: &str) -> Result<(), Canvas2dError>;
    /// Set the fill color from a CSS color.
    fn set_fill_style(&mut self, color: &str) -> Result<(), Canvas2dError>;
    /// Paint text with its alphabetic baseline at `(x, y)`, over existing content.
    fn fill_text(&mut self, text: &str, x: f32, y: f32);
    /// Detached copy of the current pixels.
    fn snapshot(&self) -> CanvasSnapshot;
}

impl TextRaster for Canvas2dContext {
    fn width(&self) -> u32 {
        Canvas2dContext::width(self)
    }

    fn height(&self) -> u32 {
        Canvas2dContext::height(self)
    }

    fn set_font(&mut self, font: &str) -> Result<(), Canvas2dError> {
        Canvas2dContext::set_font(self, font)
    }

    fn set_fill_style(&mut self, color: &str) -> Result<(), Canvas2dError> {
        Canvas2dContext::set_fill_style(self, color)
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32) {
        Canvas2dContext::fill_text(self, text, x, y)
    }

    fn snapshot(&self) -> CanvasSnapshot {
        Canvas2dContext::snapshot(self)
    }
}

/// Opaque handle over the raster buffer.
///
/// Text insertions accumulate: nothing ever clears the buffer. Exports read the
/// current pixels without changing them.
pub struct DrawingSurface<R: TextRaster = Canvas2dContext> {
    raster: R,
}

impl DrawingSurface<Canvas2dContext> {
    /// Create a transparent canvas sized and fonted per `config`.
    pub fn new(config: &EditorConfig) -> Result<Self, SurfaceError> {
        let raster = Canvas2dContext::with_config(
            config.canvas.width,
            config.canvas.height,
            config.font_config(),
        )
        .map_err(SurfaceError::Canvas)?;
        log::debug!(
            "created {}x{} canvas with {} font faces",
            raster.width(),
            raster.height(),
            raster.font_face_count()
        );
        Ok(Self { raster })
    }

    /// Number of font faces the canvas can render with.
    pub fn font_face_count(&self) -> usize {
        self.raster.font_face_count()
    }
}

impl<R: TextRaster> DrawingSurface<R> {
    pub fn with_raster(raster: R) -> Self {
        Self { raster }
    }

    pub fn width(&self) -> u32 {
        self.raster.width()
    }

    pub fn height(&self) -> u32 {
        self.raster.height()
    }

    /// Paint a request onto the buffer.
    ///
    /// Requests are expected to come validated from the form; only font and color
    /// strings the canvas cannot parse are reported.
    pub fn insert_text(&mut self, request: &TextDrawRequest) -> Result<(), SurfaceError> {
        let font = request.css_font();
        self.raster
            .set_font(&font)
            .map_err(|source| SurfaceError::Font { font, source })?;
        self.raster
            .set_fill_style(&request.color)
            .map_err(|source| SurfaceError::Color {
                color: request.color.clone(),
                source,
            })?;
        self.raster
            .fill_text(&request.text, request.x as f32, request.y as f32);
        log::debug!(
            "inserted {:?} at ({}, {})",
            request.text,
            request.x,
            request.y
        );
        Ok(())
    }

    /// Encode the current buffer as PNG.
    ///
    /// Pixels are captured when called; encoding happens on a separate thread and
    /// the bytes are delivered once, through a one-shot channel.
    pub async fn export_image(&self) -> Result<Vec<u8>, ExportError> {
        let snapshot = self.raster.snapshot();
        let (resp_tx, resp_rx) = oneshot::channel::<Result<Vec<u8>, Canvas2dError>>();

        thread::Builder::new()
            .name("png-export".to_string())
            .spawn(move || {
                resp_tx.send(snapshot.to_png(None)).ok();
            })
            .map_err(ExportError::Spawn)?;

        match resp_rx.await {
            Ok(png) => Ok(png?),
            Err(_) => Err(ExportError::Canceled),
        }
    }

    /// Export the buffer and hand it to `sink` as `image.png`, exactly once.
    pub async fn download<S: DownloadSink + ?Sized>(
        &self,
        sink: &mut S,
    ) -> Result<PathBuf, ExportError> {
        let png = self.export_image().await?;
        sink.save(DOWNLOAD_FILE_NAME, &png)
            .map_err(|source| ExportError::Save {
                file_name: DOWNLOAD_FILE_NAME.to_string(),
                source,
            })
    }
}
