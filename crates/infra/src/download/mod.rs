//! File "downloads" for a desktop process: files are saved into a directory.

use std::fs;
use std::path::{Path, PathBuf};

use hoursguard_core::FileDownloader;
use hoursguard_domain::{HoursGuardError, Result};
use tracing::info;

use crate::errors::InfraError;

/// Saves downloaded files into a fixed directory, created on demand
#[derive(Debug, Clone)]
pub struct DirectoryDownloader {
    dir: PathBuf,
}

impl DirectoryDownloader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl FileDownloader for DirectoryDownloader {
    fn download(&self, filename: &str, mime: &str, content: &str) -> Result<()> {
        let name = Path::new(filename);
        if name.file_name().map(Path::new) != Some(name) {
            return Err(HoursGuardError::InvalidInput(format!(
                "download filename must be a bare file name: {filename}"
            )));
        }

        fs::create_dir_all(&self.dir).map_err(InfraError::from)?;
        let target = self.dir.join(name);
        fs::write(&target, content).map_err(InfraError::from)?;

        info!(path = %target.display(), mime, bytes = content.len(), "file downloaded");
        Ok(())
    }
}
