use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use backup_restore_settings::Settings;
use tracing::{debug, info, warn};

/// The two files a run leaves in its working directory.
#[derive(Debug, Clone)]
pub struct DumpArtifacts {
    pub compressed: PathBuf,
    pub sql: PathBuf,
}

impl DumpArtifacts {
    pub fn from_settings(config: &Settings) -> Self {
        Self {
            compressed: config.compressed_dump_path(),
            sql: config.sql_dump_path(),
        }
    }

    pub fn paths(&self) -> [&Path; 2] {
        [self.compressed.as_path(), self.sql.as_path()]
    }

    /// Removes whatever artifacts exist and returns how many were deleted.
    /// Absent files are skipped and removal failures only warn.
    pub fn cleanup(&self) -> usize {
        info!("Cleaning up temporary files...");
        let mut removed = 0;
        for path in self.paths() {
            match std::fs::remove_file(path) {
                Ok(()) => {
                    debug!("Removed: {}", path.display());
                    removed += 1;
                }
                Err(err) if err.kind() == ErrorKind::NotFound => {
                    debug!("File not found (already cleaned): {}", path.display());
                }
                Err(err) => warn!("Could not remove {}: {err}", path.display()),
            }
        }
        removed
    }
}
