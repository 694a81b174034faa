//! Per-request scratch directories

use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::error::Result;

const SCRATCH_PREFIX: &str = "formatforge-";

/// Uniquely named directory holding one conversion's temporary files
///
/// The directory and everything in it is deleted on drop.
pub struct ScratchDir {
    dir: TempDir,
}

impl ScratchDir {
    /// Create under `root`, or the system temp dir when `None`
    pub fn create(root: Option<&Path>) -> Result<Self> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(SCRATCH_PREFIX);

        let dir = match root {
            Some(root) => builder.tempdir_in(root)?,
            None => builder.tempdir()?,
        };

        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn input_pdf(&self) -> PathBuf {
        self.dir.path().join("input.pdf")
    }

    /// Sibling of [`input_pdf`](Self::input_pdf)
    pub fn output_docx(&self) -> PathBuf {
        self.dir.path().join("input.docx")
    }
}
