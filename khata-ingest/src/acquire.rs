//! Text acquisition: per-page native PDF extraction with an OCR fallback.
//!
//! Expected statement input is digitally generated (native text extracts
//! cleanly); scanned statements yield almost nothing natively and go
//! through the OCR path. Whichever candidate is longer wins, and total
//! failure is an empty string, which downstream routes to UNKNOWN.

use tracing::{debug, info, warn};

use crate::ocr::{OcrConfig, ocr_pdf_bytes};

/// Minimum native-text yield before the OCR path is attempted.
pub const OCR_MIN_TEXT_LEN: usize = 200;

/// Pluggable text-acquisition capability consumed by the orchestrator.
pub trait TextAcquirer {
    /// Produce the best linearized text for the document, or an empty
    /// string when nothing usable can be extracted. Must not panic.
    fn acquire(&self, bytes: &[u8]) -> String;
}

/// Default acquirer over PDF bytes.
#[derive(Debug, Clone)]
pub struct PdfTextAcquirer {
    pub ocr: OcrConfig,
    /// Native yields below this many characters trigger the OCR path.
    pub ocr_threshold: usize,
    /// When false the OCR path is skipped; scanned statements then come
    /// back empty and route to UNKNOWN.
    pub ocr_enabled: bool,
}

impl Default for PdfTextAcquirer {
    fn default() -> Self {
        Self {
            ocr: OcrConfig::default(),
            ocr_threshold: OCR_MIN_TEXT_LEN,
            ocr_enabled: true,
        }
    }
}

impl TextAcquirer for PdfTextAcquirer {
    fn acquire(&self, bytes: &[u8]) -> String {
        let native = extract_text_native(bytes);
        if native.chars().count() >= self.ocr_threshold || !self.ocr_enabled {
            return native;
        }
        info!(
            "native extraction yielded only {} chars; attempting OCR fallback",
            native.chars().count()
        );
        let ocr = ocr_pdf_bytes(bytes, &self.ocr);
        choose_candidate(native, ocr)
    }
}

/// Longer candidate wins; ties favor the native text.
pub fn choose_candidate(native: String, ocr: String) -> String {
    if ocr.chars().count() > native.chars().count() {
        debug!("OCR text used for parsing");
        ocr
    } else {
        native
    }
}

/// Extract text page by page.
///
/// A page whose extraction fails contributes an empty string for that
/// page only; an unreadable document yields empty text overall.
pub fn extract_text_native(bytes: &[u8]) -> String {
    let doc = match lopdf::Document::load_mem(bytes) {
        Ok(doc) => doc,
        Err(e) => {
            warn!("failed to read PDF: {e}");
            return String::new();
        }
    };

    let mut pages_text = Vec::new();
    for (page_num, _object_id) in doc.get_pages() {
        match doc.extract_text(&[page_num]) {
            Ok(text) => pages_text.push(text),
            Err(e) => {
                warn!("text extraction failed on page {page_num}: {e}");
                pages_text.push(String::new());
            }
        }
    }
    pages_text.join("\n").trim().to_string()
}
