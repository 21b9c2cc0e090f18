//! khata-banks: bank-specific statement field extractors, the keyword
//! router, and the document-parse orchestrator.

pub mod parsers;
pub mod pipeline;
pub mod router;

pub use parsers::line::extract_transactions;
pub use parsers::{parse_axis, parse_hdfc, parse_icici, parse_kotak, parse_sbi};
pub use pipeline::{ParsedDocument, parse_document, parse_document_with};
pub use router::{classify, detect_bank_and_parse};
