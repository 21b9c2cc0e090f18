//! Axis statement extractor.
//!
//! Transaction rows are blocks: a line that begins with a date token plus
//! everything up to the next date-starting line, so multi-line
//! descriptions survive. The payment-due-date search is a ladder of
//! increasingly loose heuristics ending in a blind scan of the document
//! head.

use anyhow::Result;
use chrono::NaiveDate;
use khata_core::text::{collapse_spaces, flatten_ws, head, normalize_newlines};
use khata_core::{
    StatementFields, TransactionRecord, TxnDirection, find_last4, normalize_date_axis,
    rupee_amount_axis,
};
use regex::Regex;
use tracing::debug;

/// Date shapes accepted anywhere a due or statement date may appear.
const DATE_TOKEN: &str = r"(\d{1,2}\s+[A-Za-z]{3,9}\s+'?\d{2,4}|\d{1,2}[/\-.]\d{1,2}[/\-.]\d{2,4}|\d{4}-\d{2}-\d{2}|[A-Za-z]{3,9}\s+\d{1,2},?\s*'?\d{2,4}|\b[A-Za-z]{3,9}\s+\d{4}\b)";

/// Date shapes that anchor a transaction line.
const LINE_DATE_TOKEN: &str =
    r"(\d{1,2}\s+[A-Za-z]{3,9}\s+'?\d{2,4}|\d{1,2}[/\-.]\d{1,2}[/\-.]\d{2,4}|\d{4}-\d{2}-\d{2})";

/// Section headers that bound the transaction search region.
const SECTION_HEADERS: &[&str] = &[
    "transaction summary",
    "transaction details",
    "transaction history",
    "transactions for the period",
    "card transactions",
];

pub fn parse_axis(text: &str) -> Result<StatementFields> {
    let mut fields = StatementFields::default();

    fields.last4 = find_last4(text).unwrap_or_default();

    // Summary items sit in the header zone.
    let top = normalize_newlines(head(text, 5000));

    let total_re = Regex::new(
        r"(?i)(?:Total\s+Payment\s+Due|Total\s+Amount\s+Due|Total\s+Due)\s*[:\-]?\s*(?:₹|Rs\.?)?\s*([0-9,]+(?:\.\d{1,2})?)",
    )?;
    if let Some(c) = total_re.captures(&top) {
        fields.total_balance = rupee_amount_axis(&c[1]);
    }

    let min_re = Regex::new(
        r"(?i)(?:Minimum\s+Payment\s+Due|Minimum\s+Amount\s+Due|Minimum\s+Due)\s*[:\-]?\s*(?:₹|Rs\.?)?\s*([0-9,]+(?:\.\d{1,2})?)",
    )?;
    if let Some(c) = min_re.captures(&top) {
        fields.minimum_due = rupee_amount_axis(&c[1]);
    }

    fields.payment_due_date = find_due_date(text, &top)?;

    let sel_re =
        Regex::new(r"(?i)Selected\s+Statement\s+Month\s*[:\-]?\s*([A-Za-z]{3,9}\s+\d{4})")?;
    if let Some(c) = sel_re.captures(&top) {
        fields.statement_date = normalize_date_axis(&c[1]);
    } else {
        let sd_re = Regex::new(
            r"(?i)Statement\s+Date\s*[:\-]?\s*([A-Za-z]{3,9}\s+\d{1,2}\s*'?\d{2,4})",
        )?;
        if let Some(c) = sd_re.captures(&top) {
            fields.statement_date = normalize_date_axis(&c[1]);
        }
    }

    // Billing cycle: explicit label anywhere, else a bare From ... To ...
    let cycle_re = Regex::new(
        r"(?i)(?:Statement\s*period|Billing\s*Cycle)\s*[:\-]?\s*([A-Za-z0-9/\-\s,']+?)\s*(?:to|-)\s*([A-Za-z0-9/\-\s,']+?)\b",
    )?;
    if let Some(c) = cycle_re.captures(text) {
        fields.billing_cycle_start = normalize_date_axis(c[1].trim());
        fields.billing_cycle_end = normalize_date_axis(c[2].trim());
    } else {
        let ft_re =
            Regex::new(r"(?i)From\s+([A-Za-z0-9/\-\s,']+?)\s+To\s+([A-Za-z0-9/\-\s,']+?)\b")?;
        if let Some(c) = ft_re.captures(text) {
            fields.billing_cycle_start = normalize_date_axis(c[1].trim());
            fields.billing_cycle_end = normalize_date_axis(c[2].trim());
        }
    }

    fields.transactions = extract_transactions_axis(text)?;

    // Derive missing cycle bounds from the earliest/latest row dates.
    if (fields.billing_cycle_start.is_empty() || fields.billing_cycle_end.is_empty())
        && !fields.transactions.is_empty()
    {
        let mut valid: Vec<NaiveDate> = fields
            .transactions
            .iter()
            .filter_map(|t| NaiveDate::parse_from_str(&t.date, "%Y-%m-%d").ok())
            .collect();
        valid.sort();
        if let (Some(first), Some(last)) = (valid.first(), valid.last()) {
            if fields.billing_cycle_start.is_empty() {
                fields.billing_cycle_start = first.format("%Y-%m-%d").to_string();
            }
            if fields.billing_cycle_end.is_empty() {
                fields.billing_cycle_end = last.format("%Y-%m-%d").to_string();
            }
        }
    }

    if fields.statement_date.is_empty() && !fields.billing_cycle_end.is_empty() {
        fields.statement_date = fields.billing_cycle_end.clone();
    }

    Ok(fields)
}

/// Ladder of due-date heuristics, most specific label first.
fn find_due_date(text: &str, top: &str) -> Result<String> {
    let labels = [
        r"Payment\s+Due\s+Date",
        r"Payment\s+Due\s+On",
        r"Payment\s+Due",
        r"Pay\s+by",
        r"Due\s+Date",
        r"Last\s+Date\s+for\s+Payment",
        r"Payment\s+Due\s+Amount",
    ];
    let token_re = Regex::new(&format!("(?i){DATE_TOKEN}"))?;

    for label in labels {
        // Label and date on the same line.
        let same = Regex::new(&format!(r"(?i){label}\s*[:\-]?\s*{DATE_TOKEN}"))?;
        if let Some(c) = same.captures(top) {
            return Ok(normalize_date_axis(&c[1]));
        }
        // Label alone on one line, date on the next.
        let next_line = Regex::new(&format!(r"(?i){label}\s*[:\-]?\s*[\r\n]+\s*{DATE_TOKEN}"))?;
        if let Some(c) = next_line.captures(top) {
            return Ok(normalize_date_axis(&c[1]));
        }
        // Label present but the date sits further away.
        let label_re = Regex::new(&format!("(?i){label}"))?;
        if let Some(m) = label_re.find(top) {
            let after = head(&top[m.end()..], 300);
            if let Some(c) = token_re.captures(after) {
                return Ok(normalize_date_axis(&c[1]));
            }
        }
    }

    // Whole-document label scan.
    let global = [
        format!(r"(?i)(?:Payment\s+Due\s+Date|Payment\s+Due|Due\s+Date)\s*[:\-]?\s*{DATE_TOKEN}"),
        format!(r"(?i)(?:Pay\s+by|Last\s+Date\s+for\s+Payment)\s*[:\-]?\s*{DATE_TOKEN}"),
        format!(r"(?i)(?:Due\s+Date)\s*[\r\n]+\s*{DATE_TOKEN}"),
    ];
    for pattern in &global {
        if let Some(c) = Regex::new(pattern)?.captures(text) {
            return Ok(normalize_date_axis(&c[1]));
        }
    }

    // Blind scan of the document head for any plausible due date.
    debug!("due-date labels missed; blind-scanning document head");
    let iso_prefix = Regex::new(r"^(\d{4})-\d{2}-\d{2}")?;
    for c in token_re.captures_iter(head(top, 1200)) {
        let norm = normalize_date_axis(&c[1]);
        if let Some(yc) = iso_prefix.captures(&norm) {
            let year: i32 = yc[1].parse().unwrap_or(0);
            if (2023..=2026).contains(&year) {
                return Ok(norm);
            }
        }
    }

    Ok(String::new())
}

/// Extract Axis transaction rows from plain extracted text.
///
/// Lines beginning with a date token anchor a block running to the next
/// date-starting line; the amount is located by currency-symbol proximity
/// or a trailing Cr/Dr marker. When no date-anchored lines exist at all,
/// falls back to a per-line heuristic keyed on currency presence.
pub fn extract_transactions_axis(text: &str) -> Result<Vec<TransactionRecord>> {
    let text = normalize_newlines(text);

    // Bound the search region at a known section header when present.
    let lower = text.to_lowercase();
    let block = match SECTION_HEADERS.iter().find_map(|h| lower.find(h)) {
        Some(idx) if text.is_char_boundary(idx) => &text[idx..],
        _ => text.as_str(),
    };

    let date_line_re = Regex::new(&format!(r"(?im)^{LINE_DATE_TOKEN}\b"))?;
    let anchors: Vec<regex::Match> = date_line_re.find_iter(block).collect();

    if anchors.is_empty() {
        return per_line_fallback(block);
    }

    let primary_amt = Regex::new(r"(?i)(?:₹|Rs\.?)\s*([0-9,]+(?:\.\d{1,2})?)")?;
    let secondary_amt =
        Regex::new(r"([0-9,]+(?:\.\d{1,2})?)\s*(?:Cr|Dr|CR|DR|\bCredit\b|\bDebit\b)")?;
    let marker_re = Regex::new(r"(?i)\b(Cr|Dr|Credit|Debit|credited|debited)\b")?;
    let refund_kw = Regex::new(r"(?i)\b(refund|cashback|credited)\b")?;
    let spend_kw = Regex::new(r"(?i)\b(purchase|spent|debited|paid|withdrawal)\b")?;

    let mut txs = Vec::new();
    for (i, anchor) in anchors.iter().enumerate() {
        let date_token = anchor.as_str().trim();
        let end = anchors.get(i + 1).map(|n| n.start()).unwrap_or(block.len());
        let seg = collapse_spaces(block[anchor.end()..end].trim());

        let Some(amt_caps) = primary_amt
            .captures(&seg)
            .or_else(|| secondary_amt.captures(&seg))
        else {
            // A date line with no amount nearby is not a transaction row.
            continue;
        };
        let amount = rupee_amount_axis(&amt_caps[1]);

        let direction = if let Some(c) = marker_re.captures(&seg) {
            TxnDirection::from_marker(&c[1])
        } else if refund_kw.is_match(&seg) {
            TxnDirection::Credit
        } else if spend_kw.is_match(&seg) {
            TxnDirection::Debit
        } else {
            TxnDirection::Unstated
        };

        let amt_start = amt_caps.get(0).map(|m| m.start()).unwrap_or(seg.len());
        let description = flatten_ws(seg[..amt_start].trim());

        txs.push(TransactionRecord {
            date: normalize_date_axis(date_token),
            description,
            amount,
            direction,
        });
    }

    Ok(txs)
}

/// No date-anchored lines at all: treat any line carrying a currency
/// marker as a row and pull what we can from it.
fn per_line_fallback(block: &str) -> Result<Vec<TransactionRecord>> {
    let amt_re = Regex::new(r"(?i)(?:₹|Rs\.?)\s*([0-9,]+(?:\.[0-9]{1,2})?)")?;
    let amt_strip_re = Regex::new(r"(?i)(?:₹|Rs\.?)\s*[0-9,]+(?:\.\d{1,2})?")?;
    let any_date_re = Regex::new(LINE_DATE_TOKEN)?;
    let credit_kw = Regex::new(r"(?i)\b(cr|credit|credited|cashback)\b")?;
    let debit_kw = Regex::new(r"(?i)\b(dr|debit|debited|purchase|spent)\b")?;

    let mut txs = Vec::new();
    for line in block.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let Some(amt_caps) = amt_re.captures(line) else {
            continue;
        };
        let date = any_date_re
            .find(line)
            .map(|m| normalize_date_axis(m.as_str()))
            .unwrap_or_default();
        let description = flatten_ws(amt_strip_re.replace_all(line, "").trim());
        let direction = if credit_kw.is_match(line) {
            TxnDirection::Credit
        } else if debit_kw.is_match(line) {
            TxnDirection::Debit
        } else {
            TxnDirection::Unstated
        };
        txs.push(TransactionRecord {
            date,
            description,
            amount: rupee_amount_axis(&amt_caps[1]),
            direction,
        });
    }
    Ok(txs)
}

#[cfg(test)]
mod tests {
    use super::*;

    const STATEMENT: &str = r#"
AXIS BANK Credit Card Statement
Card: XXXX XXXX XXXX 7731
Selected Statement Month: Oct 2025
Total Payment Due: ₹15,230.00
Minimum Payment Due: ₹760.00
Payment Due Date: 30 Oct '25

Transaction Details
09 Oct '25 AMAZON PAY INDIA
PURCHASE ₹1,234.56
12 Oct '25 SWIGGY ORDER
credited ₹250.00 Cr
"#;

    #[test]
    fn test_parse_axis_summary() {
        let fields = parse_axis(STATEMENT).unwrap();
        assert_eq!(fields.last4, "7731");
        assert_eq!(fields.statement_date, "2025-10-01");
        assert_eq!(fields.payment_due_date, "2025-10-30");
        assert_eq!(fields.total_balance, "₹15230.00");
        assert_eq!(fields.minimum_due, "₹760.00");
    }

    #[test]
    fn test_axis_block_transactions() {
        let fields = parse_axis(STATEMENT).unwrap();
        assert_eq!(fields.transactions.len(), 2);

        let first = &fields.transactions[0];
        assert_eq!(first.date, "2025-10-09");
        assert!(!first.description.contains("1,234.56"));
        assert!(!first.description.contains("1234.56"));
        assert_eq!(first.amount, "₹1234.56");
        assert_eq!(first.direction, TxnDirection::Debit);

        let second = &fields.transactions[1];
        assert_eq!(second.date, "2025-10-12");
        assert_eq!(second.amount, "₹250.00");
        assert_eq!(second.direction, TxnDirection::Credit);
    }

    #[test]
    fn test_axis_cycle_derived_from_transactions() {
        let fields = parse_axis(STATEMENT).unwrap();
        assert_eq!(fields.billing_cycle_start, "2025-10-09");
        assert_eq!(fields.billing_cycle_end, "2025-10-12");
    }

    #[test]
    fn test_axis_statement_date_defaults_to_cycle_end() {
        let text = r#"
AXIS BANK
Transaction Details
09 Oct '25 MERCHANT ONE ₹100.00
12 Oct '25 MERCHANT TWO ₹200.00
"#;
        let fields = parse_axis(text).unwrap();
        assert_eq!(fields.billing_cycle_end, "2025-10-12");
        assert_eq!(fields.statement_date, "2025-10-12");
    }

    #[test]
    fn test_axis_per_line_fallback() {
        let text = r#"
AXIS BANK
Card Transactions
Merchant ABC ₹500.00 debited on 09/10/2025
"#;
        let fields = parse_axis(text).unwrap();
        assert_eq!(fields.transactions.len(), 1);
        let tx = &fields.transactions[0];
        assert_eq!(tx.date, "2025-10-09");
        assert_eq!(tx.amount, "₹500.00");
        assert_eq!(tx.direction, TxnDirection::Debit);
        assert!(!tx.description.contains("500.00"));
    }

    #[test]
    fn test_axis_blind_scan_due_date() {
        let text = "AXIS BANK\nstatement generated 12/10/2025\nno labels anywhere";
        let fields = parse_axis(text).unwrap();
        assert_eq!(fields.payment_due_date, "2025-10-12");
    }

    #[test]
    fn test_axis_due_date_on_next_line() {
        let text = "AXIS BANK\nDue Date\n30 Oct 2025\n";
        let fields = parse_axis(text).unwrap();
        assert_eq!(fields.payment_due_date, "2025-10-30");
    }
}
