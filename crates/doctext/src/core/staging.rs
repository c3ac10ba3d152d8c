//! Scoped staging of bytes on the filesystem.
//!
//! Some capabilities (the OCR engine in particular) only accept a path. Content is
//! written to a uniquely named temporary file owned by a [`StagedFile`] guard; the
//! file is removed when the guard drops, whether the extraction succeeded, failed,
//! or its future was abandoned. Two requests never share a path.

use crate::{DoctextError, Result};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

const STAGING_PREFIX: &str = "doctext-";

/// A temporary file that lives exactly as long as this value.
#[derive(Debug)]
pub struct StagedFile {
    file: NamedTempFile,
}

impl StagedFile {
    /// Stage `content` in the system temp dir.
    pub fn write(content: &[u8], suffix: &str) -> Result<Self> {
        Self::write_in(None, content, suffix)
    }

    /// Stage `content`, in `dir` when given. `suffix` should include the dot (".png").
    pub fn write_in(dir: Option<&Path>, content: &[u8], suffix: &str) -> Result<Self> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(STAGING_PREFIX).suffix(suffix);

        let mut file = match dir {
            Some(dir) => builder.tempfile_in(dir),
            None => builder.tempfile(),
        }
        .map_err(|e| DoctextError::extractor_failure_with_source("Failed to create staging file", e))?;

        file.write_all(content)
            .and_then(|()| file.flush())
            .map_err(|e| DoctextError::extractor_failure_with_source("Failed to write staging file", e))?;

        tracing::debug!(path = %file.path().display(), size = content.len(), "Staged content");
        Ok(Self { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }
}
