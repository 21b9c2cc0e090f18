//! HDFC statement extractor.
//!
//! The Millennia layout is columnar; PDF extraction scatters label/value
//! pairs, so date searches run on the raw text first and on a
//! whitespace-flattened copy as fallback. OCR renders the rupee glyph as
//! a stray `C`, which doubles as the amount marker in transaction rows.

use anyhow::Result;
use khata_core::text::{flatten_ws, head};
use khata_core::{
    StatementFields, TransactionRecord, TxnDirection, find_last4, normalize_date_hdfc,
    rupee_amount_hdfc,
};
use regex::Regex;

const DATE_TOKEN: &str = r"([0-9]{1,2}\s*[A-Za-z]{3,9},?\s*\d{4})";

/// First date token within `window` characters after byte offset `start`.
fn date_near(text: &str, start: usize, window: usize) -> Result<Option<String>> {
    if start >= text.len() {
        return Ok(None);
    }
    let token_re = Regex::new(&format!("(?i){DATE_TOKEN}"))?;
    let snippet = head(&text[start..], window);
    Ok(token_re.captures(snippet).map(|c| c[1].to_string()))
}

pub fn parse_hdfc(text: &str) -> Result<StatementFields> {
    let mut fields = StatementFields::default();

    fields.last4 = find_last4(text).unwrap_or_default();

    let mut flat_text: Option<String> = None;

    // Statement date: windowed scan after the label, raw text first.
    let label_re = Regex::new(r"(?i)Statement\s*Date")?;
    if let Some(m) = label_re.find(text) {
        if let Some(cand) = date_near(text, m.end(), 180)? {
            fields.statement_date = normalize_date_hdfc(&cand);
        }
    }
    if fields.statement_date.is_empty() {
        let flat = flat_text.get_or_insert_with(|| flatten_ws(text));
        if let Some(m) = label_re.find(flat) {
            if let Some(cand) = date_near(flat, m.end(), 200)? {
                fields.statement_date = normalize_date_hdfc(&cand);
            }
        }
    }

    // Billing period: label and range adjoining, or flattened with
    // unrelated text between the label and the actual range.
    let period_re = Regex::new(
        r"(?i)Billing\s*Period\s*(?:[:\-]?\s*)[\n\r\t ]*([0-9]{1,2}\s*[A-Za-z]{3,9},?\s*\d{4})\s*[-–to]+\s*([0-9]{1,2}\s*[A-Za-z]{3,9},?\s*\d{4})",
    )?;
    if let Some(c) = period_re.captures(text) {
        fields.billing_cycle_start = normalize_date_hdfc(&c[1]);
        fields.billing_cycle_end = normalize_date_hdfc(&c[2]);
    } else {
        let flat = flat_text.get_or_insert_with(|| flatten_ws(text));
        let fallback_re = Regex::new(
            r"(?i)Billing\s*Period\s*.*?\s*([0-9]{1,2}\s*[A-Za-z]{3,9},?\s*\d{4})\s*[-–to]+\s*([0-9]{1,2}\s*[A-Za-z]{3,9},?\s*\d{4})",
        )?;
        if let Some(c) = fallback_re.captures(flat) {
            fields.billing_cycle_start = normalize_date_hdfc(&c[1]);
            fields.billing_cycle_end = normalize_date_hdfc(&c[2]);
        }
    }

    let total_re = Regex::new(r"(?i)TOTAL\s+AMOUNT\s+DUE\s*(?:\n|:)\s*C?\s*([0-9,]+\.\d{2})")?;
    if let Some(c) = total_re.captures(text) {
        fields.total_balance = rupee_amount_hdfc(&c[1]);
    }

    let min_re = Regex::new(r"(?i)MINIMUM\s+DUE\s*(?:\n|:)\s*C?\s*([0-9,]+\.\d{2})")?;
    if let Some(c) = min_re.captures(text) {
        fields.minimum_due = rupee_amount_hdfc(&c[1]);
    }

    let due_re = Regex::new(
        r"(?i)(?:DUE\s+DATE|Payment\s+Due\s+Date)\s*(?:\n|:)?\s*([0-9]{1,2}\s*[A-Za-z]{3,9},?\s*\d{4})",
    )?;
    if let Some(c) = due_re.captures(text) {
        fields.payment_due_date = normalize_date_hdfc(&c[1]);
    }

    fields.transactions = extract_transactions_hdfc(text)?;

    if fields.statement_date.is_empty() && !fields.billing_cycle_end.is_empty() {
        fields.statement_date = fields.billing_cycle_end.clone();
    }

    Ok(fields)
}

/// Rows between the "Domestic Transactions" marker and the next section.
///
/// Each row is `<dd/mm/yyyy> [hh:mm] <description> C <amount>` where the
/// `C` is the OCR-mangled rupee glyph acting as the amount marker.
pub fn extract_transactions_hdfc(text: &str) -> Result<Vec<TransactionRecord>> {
    let block_re = Regex::new(
        r"(?i)(Domestic Transactions[\s\S]+?)(?:Rewards Program Points|Total Outstanding)",
    )?;
    let Some(block_caps) = block_re.captures(text) else {
        return Ok(Vec::new());
    };
    let block = block_caps[1].replace('\r', "\n");

    let row_re = Regex::new(
        r"(?P<date>\d{1,2}/\d{1,2}/\d{4})\s*\|?\s*(?:\d{1,2}:\d{2}\s*)?(?P<desc>[A-Za-z0-9\s.,'&\-()#/]+?)\s+C\s*(?P<amt>[0-9,]+\.\d{2})",
    )?;
    let leading_num = Regex::new(r"^\d+\s+")?;
    let credit_kw = Regex::new(r"(?i)payment|credit|refund")?;

    let mut txs = Vec::new();
    for caps in row_re.captures_iter(&block) {
        let desc = leading_num.replace(caps["desc"].trim(), "");
        let desc = flatten_ws(&desc);
        let direction = if credit_kw.is_match(&desc) {
            TxnDirection::Credit
        } else {
            TxnDirection::Debit
        };
        txs.push(TransactionRecord {
            date: normalize_date_hdfc(&caps["date"]),
            description: desc,
            amount: rupee_amount_hdfc(&caps["amt"]),
            direction,
        });
    }
    Ok(txs)
}
