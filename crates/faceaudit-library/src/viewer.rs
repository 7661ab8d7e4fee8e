//! Launching an external viewer for closer inspection of a photo.

use std::path::{Path, PathBuf};
use std::process::{Child, Command};
use thiserror::Error;

#[cfg(target_os = "macos")]
pub const DEFAULT_VIEWER: &str = "open";
#[cfg(not(target_os = "macos"))]
pub const DEFAULT_VIEWER: &str = "xdg-open";

#[derive(Error, Debug)]
pub enum ViewerError {
    #[error("photo not found: {0}")]
    NotFound(PathBuf),
    #[error("failed to launch {program}: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },
}

/// Opens photos in an external program without waiting for it.
#[derive(Debug, Clone)]
pub struct ViewerLauncher {
    program: String,
    args: Vec<String>,
}

impl ViewerLauncher {
    /// `program` is run with `args` followed by the photo path.
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    fn command(&self, path: &Path) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args).arg(path);
        cmd
    }

    /// Spawn the viewer on `path` and return immediately.
    pub fn open(&self, path: &Path) -> Result<Child, ViewerError> {
        if !path.exists() {
            return Err(ViewerError::NotFound(path.to_path_buf()));
        }
        let child = self
            .command(path)
            .spawn()
            .map_err(|source| ViewerError::Spawn {
                program: self.program.clone(),
                source,
            })?;
        tracing::info!(program = %self.program, path = %path.display(), pid = child.id(), "viewer launched");
        Ok(child)
    }
}

impl Default for ViewerLauncher {
    fn default() -> Self {
        Self::new(DEFAULT_VIEWER, Vec::new())
    }
}
