//! OCR fallback: rasterize pages with `pdftoppm`, recognize with `tesseract`.
//!
//! Both binaries are external collaborators; their paths are injected
//! through [`OcrConfig`] rather than read from a process-wide constant.
//! Every failure mode degrades to empty text, and a page that fails OCR
//! contributes nothing while the remaining pages continue.

use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result, bail};
use tracing::{debug, info, warn};

/// Injected OCR engine configuration.
#[derive(Debug, Clone)]
pub struct OcrConfig {
    /// Path to the poppler `pdftoppm` binary.
    pub pdftoppm_path: String,
    /// Path to the `tesseract` binary.
    pub tesseract_path: String,
    /// Tesseract language code.
    pub language: String,
    /// Rasterization resolution.
    pub dpi: u32,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            pdftoppm_path: "pdftoppm".to_string(),
            tesseract_path: "tesseract".to_string(),
            language: "eng".to_string(),
            dpi: 200,
        }
    }
}

/// Check that both OCR tools resolve on this system.
pub fn is_ocr_available(config: &OcrConfig) -> bool {
    let pdftoppm = which::which(&config.pdftoppm_path).is_ok();
    let tesseract = which::which(&config.tesseract_path).is_ok();
    if !pdftoppm {
        debug!(
            "{} not found - install poppler-utils for OCR support",
            config.pdftoppm_path
        );
    }
    if !tesseract {
        debug!(
            "{} not found - install tesseract-ocr for OCR support",
            config.tesseract_path
        );
    }
    pdftoppm && tesseract
}

/// Rasterize every page and OCR it, concatenating per-page results.
///
/// Never fails: setup problems or a total OCR failure yield an empty
/// string so the caller can keep the native-text candidate.
pub fn ocr_pdf_bytes(bytes: &[u8], config: &OcrConfig) -> String {
    match try_ocr(bytes, config) {
        Ok(text) => text,
        Err(e) => {
            warn!("OCR fallback failed entirely: {e:#}");
            String::new()
        }
    }
}

fn try_ocr(bytes: &[u8], config: &OcrConfig) -> Result<String> {
    if !is_ocr_available(config) {
        bail!("pdftoppm/tesseract not available");
    }

    let dir = tempfile::tempdir().context("creating OCR temp directory")?;
    let pdf_path = dir.path().join("input.pdf");
    std::fs::write(&pdf_path, bytes).context("writing PDF to temp file")?;

    let prefix = dir.path().join("page");
    let output = Command::new(&config.pdftoppm_path)
        .arg("-png")
        .arg("-r")
        .arg(config.dpi.to_string())
        .arg(&pdf_path)
        .arg(&prefix)
        .output()
        .with_context(|| format!("running {}", config.pdftoppm_path))?;
    if !output.status.success() {
        bail!(
            "pdftoppm failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
    }

    let mut pages: Vec<_> = std::fs::read_dir(dir.path())
        .context("listing rasterized pages")?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.extension().map(|ext| ext == "png").unwrap_or(false))
        .collect();
    pages.sort();
    if pages.is_empty() {
        bail!("pdftoppm produced no page images");
    }

    let mut texts = Vec::with_capacity(pages.len());
    for (i, image) in pages.iter().enumerate() {
        match ocr_page(image, config) {
            Ok(text) => {
                debug!("OCR done for page {}, {} chars", i + 1, text.len());
                texts.push(text);
            }
            Err(e) => warn!("OCR failed on page {}: {e:#}", i + 1),
        }
    }

    let joined = texts.join("\n").trim().to_string();
    info!(
        "OCR produced {} chars across {} pages",
        joined.len(),
        pages.len()
    );
    Ok(joined)
}

fn ocr_page(image: &Path, config: &OcrConfig) -> Result<String> {
    let output = Command::new(&config.tesseract_path)
        .arg(image)
        .arg("stdout")
        .arg("-l")
        .arg(&config.language)
        .output()
        .with_context(|| format!("running {}", config.tesseract_path))?;
    if !output.status.success() {
        bail!(
            "tesseract exited with {}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr)
        );
    }
    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}
