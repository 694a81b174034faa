//! DOCX converter backends

use async_trait::async_trait;
use std::path::Path;
use tokio::process::Command;

use crate::error::{AppError, Result};

/// Converts a PDF on disk into a DOCX file at `docx_path`
#[async_trait]
pub trait DocxConverter: Send + Sync {
    /// Name for logs
    fn name(&self) -> &str;

    async fn convert(&self, pdf_path: &Path, docx_path: &Path) -> Result<()>;
}

/// Runs a `pdf2docx`-compatible command: `<program> convert <pdf> <docx>`
pub struct CommandConverter {
    program: String,
}

impl CommandConverter {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

#[async_trait]
impl DocxConverter for CommandConverter {
    fn name(&self) -> &str {
        &self.program
    }

    async fn convert(&self, pdf_path: &Path, docx_path: &Path) -> Result<()> {
        let output = Command::new(&self.program)
            .arg("convert")
            .arg(pdf_path)
            .arg(docx_path)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| AppError::Conversion(format!("Failed to run {}: {}", self.program, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AppError::Conversion(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }

        if !tokio::fs::try_exists(docx_path).await.unwrap_or(false) {
            return Err(AppError::Conversion(format!(
                "{} reported success but wrote no output",
                self.program
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_program_is_conversion_error() {
        let dir = TempDir::new().unwrap();
        let converter = CommandConverter::new("formatforge-no-such-converter");

        let result = converter
            .convert(&dir.path().join("in.pdf"), &dir.path().join("in.docx"))
            .await;

        assert!(matches!(result, Err(AppError::Conversion(_))));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_non_zero_exit_is_conversion_error() {
        let dir = TempDir::new().unwrap();
        // `false convert a b` exits 1
        let converter = CommandConverter::new("false");

        let result = converter
            .convert(&dir.path().join("in.pdf"), &dir.path().join("in.docx"))
            .await;

        assert!(matches!(result, Err(AppError::Conversion(_))));
    }
}
