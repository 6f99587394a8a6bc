//! One editing session: a form feeding a drawing surface.

use crate::config::EditorConfig;
use crate::download::DownloadSink;
use crate::form::{Field, FieldUpdate, InputForm, ValidationErrors};
use crate::request::TextDrawRequest;
use crate::surface::{DrawingSurface, ExportError, SurfaceError, TextRaster};
use std::path::PathBuf;
use textcanvas_canvas2d::Canvas2dContext;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("Invalid form input:\n{0}")]
    Invalid(#[from] ValidationErrors),

    #[error(transparent)]
    Draw(#[from] SurfaceError),
}

pub struct Editor<S: DownloadSink, R: TextRaster = Canvas2dContext> {
    form: InputForm,
    surface: DrawingSurface<R>,
    sink: S,
}

impl<S: DownloadSink> Editor<S, Canvas2dContext> {
    pub fn new(config: &EditorConfig, sink: S) -> Result<Self, SurfaceError> {
        let surface = DrawingSurface::new(config)?;
        Ok(Self::with_surface(InputForm::new(config), surface, sink))
    }
}

impl<S: DownloadSink, R: TextRaster> Editor<S, R> {
    pub fn with_surface(form: InputForm, surface: DrawingSurface<R>, sink: S) -> Self {
        Self {
            form,
            surface,
            sink,
        }
    }

    pub fn form(&self) -> &InputForm {
        &self.form
    }

    pub fn surface(&self) -> &DrawingSurface<R> {
        &self.surface
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn set_field(&mut self, field: Field, value: &str) -> FieldUpdate {
        self.form.set_field(field, value)
    }

    /// Submit the form and draw the resulting request.
    ///
    /// The surface is only reached when every field validates.
    pub fn submit(&mut self) -> Result<TextDrawRequest, SubmitError> {
        let request = self.form.submit()?;
        self.surface.insert_text(&request)?;
        Ok(request)
    }

    /// Export the canvas through the session's sink.
    pub async fn download(&mut self) -> Result<PathBuf, ExportError> {
        self.surface.download(&mut self.sink).await
    }
}
