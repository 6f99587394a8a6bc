//! Destinations for exported images.

use std::io::Write;
use std::path::{Path, PathBuf};

/// Fixed name of the exported image.
pub const DOWNLOAD_FILE_NAME: &str = "image.png";

/// Something that can receive a downloaded file, like a browser's save dialog.
pub trait DownloadSink {
    /// Save `bytes` under `file_name`, returning where the file ended up.
    fn save(&mut self, file_name: &str, bytes: &[u8]) -> std::io::Result<PathBuf>;
}

/// Saves downloads into a directory, replacing any earlier file of the same name.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl DownloadSink for DirectorySink {
    fn save(&mut self, file_name: &str, bytes: &[u8]) -> std::io::Result<PathBuf> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(file_name);

        // Write next to the target and rename, so a failed write never leaves a truncated image
        let mut temp = tempfile::NamedTempFile::new_in(&self.dir)?;
        temp.write_all(bytes)?;
        temp.persist(&path).map_err(|err| err.error)?;

        log::info!("saved {} ({} bytes)", path.display(), bytes.len());
        Ok(path)
    }
}
