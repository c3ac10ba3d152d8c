//! Tesseract OCR backend.
//!
//! Drives the `tesseract` command-line program. The decoded image is re-encoded as
//! PNG into a staged temporary file, which tesseract reads by path; recognised text
//! is read from its stdout.

use crate::core::blocking::run_blocking;
use crate::core::config::ExtractionConfig;
use crate::core::staging::StagedFile;
use crate::plugins::{OcrBackend, Plugin};
use crate::{DoctextError, Result};
use async_trait::async_trait;
use image::{DynamicImage, ImageFormat};
use std::io::Cursor;
use std::process::Stdio;
use tokio::process::Command;
use tokio::time::{Duration, timeout};

pub struct TesseractBackend;

impl TesseractBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TesseractBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for TesseractBackend {
    fn name(&self) -> &str {
        "tesseract"
    }

    fn description(&self) -> &str {
        "OCR through the tesseract command-line program"
    }
}

/// Arguments for `tesseract <image> stdout -l <lang> [--psm N]`.
pub(crate) fn tesseract_args(image_path: &std::path::Path, config: &ExtractionConfig) -> Vec<std::ffi::OsString> {
    let mut args: Vec<std::ffi::OsString> = vec![
        image_path.as_os_str().to_owned(),
        "stdout".into(),
        "-l".into(),
        config.ocr.language.as_str().into(),
    ];
    if let Some(psm) = config.ocr.psm {
        args.push("--psm".into());
        args.push(psm.to_string().into());
    }
    args
}

fn encode_png(image: &DynamicImage) -> Result<Vec<u8>> {
    let mut buffer = Cursor::new(Vec::new());
    image
        .write_to(&mut buffer, ImageFormat::Png)
        .map_err(|e| DoctextError::ocr_with_source("Failed to encode image for OCR", e))?;
    Ok(buffer.into_inner())
}

#[async_trait]
impl OcrBackend for TesseractBackend {
    async fn process_image(&self, image: DynamicImage, config: &ExtractionConfig) -> Result<String> {
        let staging_dir = config.staging_dir.clone();
        let staged = run_blocking("OCR staging", move || {
            let png = encode_png(&image)?;
            StagedFile::write_in(staging_dir.as_deref(), &png, ".png")
        })
        .await?;

        let program = &config.ocr.tesseract_cmd;
        let child = Command::new(program)
            .args(tesseract_args(staged.path(), config))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    DoctextError::MissingDependency(format!("tesseract executable '{}' not found", program))
                } else {
                    DoctextError::ocr_with_source(format!("Failed to start '{}'", program), e)
                }
            })?;

        let limit = Duration::from_secs(config.ocr.timeout_secs);
        // On timeout the child is dropped with the future and killed.
        let output = match timeout(limit, child.wait_with_output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => return Err(DoctextError::ocr_with_source("Failed to wait for tesseract", e)),
            Err(_) => {
                return Err(DoctextError::ocr(format!(
                    "tesseract timed out after {} seconds",
                    config.ocr.timeout_secs
                )));
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(DoctextError::ocr(format!(
                "tesseract exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        drop(staged);
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn supports_language(&self, language: &str) -> bool {
        !language.is_empty()
            && language
                .split('+')
                .all(|part| !part.is_empty() && part.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'))
    }
}
