//! Orchestrator: acquisition -> router -> extractor.
//!
//! Data flows strictly one way, and nothing in here is fatal: unusable
//! text routes to UNKNOWN, and an extractor-level error degrades to the
//! routed bank with an empty field set.

use khata_core::{BankIdentity, StatementFields};
use khata_ingest::{PdfTextAcquirer, TextAcquirer};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::router::detect_bank_and_parse;

/// Result of a full document parse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedDocument {
    pub bank: BankIdentity,
    pub fields: StatementFields,
}

/// Parse raw PDF bytes with the default acquisition strategy.
pub fn parse_document(bytes: &[u8]) -> ParsedDocument {
    parse_document_with(&PdfTextAcquirer::default(), bytes)
}

/// Parse raw PDF bytes with an injected acquisition strategy.
pub fn parse_document_with(acquirer: &dyn TextAcquirer, bytes: &[u8]) -> ParsedDocument {
    let text = acquirer.acquire(bytes);
    let (bank, result) = detect_bank_and_parse(&text);
    let fields = match result {
        Ok(fields) => fields,
        Err(e) => {
            warn!(
                "extraction failed for {}: {e:#}; returning empty fields",
                bank.as_str()
            );
            StatementFields::default()
        }
    };
    ParsedDocument { bank, fields }
}
