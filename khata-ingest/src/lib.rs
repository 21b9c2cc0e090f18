//! khata-ingest: text acquisition for statement PDFs (native per-page
//! extraction with an OCR fallback over rasterized pages).

pub mod acquire;
pub mod ocr;

pub use acquire::{
    OCR_MIN_TEXT_LEN, PdfTextAcquirer, TextAcquirer, choose_candidate, extract_text_native,
};
pub use ocr::{OcrConfig, is_ocr_available, ocr_pdf_bytes};
