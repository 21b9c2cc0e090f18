//! Kotak statement extractor.
//!
//! Rows are single self-contained lines handled by the shared line
//! extractor; the summary labels are stable ("Statement Date", "Remember
//! to pay by", "Transaction details from X to Y").

use anyhow::Result;
use khata_core::{StatementFields, find_last4, normalize_date};
use regex::Regex;

use crate::parsers::line::extract_transactions;

pub fn parse_kotak(text: &str) -> Result<StatementFields> {
    let mut fields = StatementFields::default();

    fields.last4 = find_last4(text).unwrap_or_default();

    let stmt_re = Regex::new(r"Statement\s+Date\s+([0-9]{1,2}[-/A-Za-z]+[-/0-9]+)")?;
    if let Some(c) = stmt_re.captures(text) {
        fields.statement_date = normalize_date(&c[1]);
    }

    let cycle_re =
        Regex::new(r"Transaction\s+details\s+from\s+([A-Za-z0-9-]+)\s+to\s+([A-Za-z0-9-]+)")?;
    if let Some(c) = cycle_re.captures(text) {
        fields.billing_cycle_start = normalize_date(&c[1]);
        fields.billing_cycle_end = normalize_date(&c[2]);
    }

    let due_re =
        Regex::new(r"(?i)Remember\s*to\s*pay\s*by\s*([0-9]{1,2}[-/][A-Za-z]{3}[-/][0-9]{4})")?;
    if let Some(c) = due_re.captures(text) {
        fields.payment_due_date = normalize_date(&c[1]);
    }

    // This layout prints amounts as "Rs. n,nnn.nn"; output stays plain.
    let total_re = Regex::new(r"Total\s+Amount\s+Due.*?Rs\.?\s?([0-9,]+\.\d{2})")?;
    if let Some(c) = total_re.captures(text) {
        fields.total_balance = c[1].replace(',', "");
    }

    let min_re = Regex::new(r"Minimum\s+Amount\s+Due.*?Rs\.?\s?([0-9,]+\.\d{2})")?;
    if let Some(c) = min_re.captures(text) {
        fields.minimum_due = c[1].replace(',', "");
    }

    fields.transactions = extract_transactions(text)?;

    Ok(fields)
}
