use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{AirdropError, Result};

/// A serialized artifact and its SHA3-256 checksum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub bytes: Vec<u8>,
    pub checksum: [u8; 32],
}

fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> AirdropError + '_ {
    move |source| AirdropError::Io {
        path: path.to_path_buf(),
        source,
    }
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

fn write_synced(path: &Path, contents: &[u8]) -> Result<()> {
    let mut file = File::create(path).map_err(io_err(path))?;
    file.write_all(contents).map_err(io_err(path))?;
    file.flush().map_err(io_err(path))?;
    file.sync_all().map_err(io_err(path))
}

/// A set of files written to temp paths and renamed into place together.
///
/// Nothing reaches a final path until [`OutputStage::commit`]; dropping an
/// uncommitted stage removes its temp files.
#[derive(Debug, Default)]
pub struct OutputStage {
    staged: Vec<(PathBuf, PathBuf)>,
}

impl OutputStage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&mut self, path: &Path, contents: &[u8]) -> Result<()> {
        let temp_path = temp_path_for(path);
        // Record before writing so a half-written temp file is still cleaned up.
        self.staged.push((temp_path.clone(), path.to_path_buf()));
        write_synced(&temp_path, contents)
    }

    /// Renames every staged file into place, in staging order.
    ///
    /// An entry leaves the stage only once its rename succeeds, so on failure
    /// `Drop` still removes the temp files that were not moved.
    pub fn commit(mut self) -> Result<()> {
        while let Some((temp_path, path)) = self.staged.first() {
            fs::rename(temp_path, path).map_err(io_err(path))?;
            self.staged.remove(0);
        }
        Ok(())
    }
}

impl Drop for OutputStage {
    fn drop(&mut self) {
        for (temp_path, _) in &self.staged {
            let _ = fs::remove_file(temp_path);
        }
    }
}
