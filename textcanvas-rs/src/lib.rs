//! Text-on-canvas editor core.
//!
//! An [`InputForm`] collects and validates the parameters of a text insertion,
//! a [`DrawingSurface`] paints validated [`TextDrawRequest`]s onto its raster and
//! exports it as PNG, and an [`Editor`] wires the two to a [`DownloadSink`].

pub mod config;
pub mod download;
pub mod editor;
pub mod form;
pub mod request;
pub mod surface;

#[macro_use]
extern crate lazy_static;

pub use config::{CanvasSize, ConfigError, EditorConfig};
pub use download::{DirectorySink, DownloadSink, DOWNLOAD_FILE_NAME};
pub use editor::{Editor, SubmitError};
pub use form::{Field, FieldUpdate, FormValues, InputForm, TextCounter, ValidationErrors, Violation};
pub use request::TextDrawRequest;
pub use surface::{DrawingSurface, ExportError, SurfaceError, TextRaster};
