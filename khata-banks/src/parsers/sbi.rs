//! SBI statement extractor.
//!
//! The SBI Card layout scatters labels and their dates, so both the
//! statement date and the payment due date go through a windowed
//! label-proximity search. Transaction rows sit after a "TRANSACTIONS
//! FOR" marker and carry an optional trailing C/D/M marker the layout
//! never maps to a direction.

use anyhow::Result;
use khata_core::text::{flatten_ws, head, tail};
use khata_core::{StatementFields, TransactionRecord, TxnDirection, normalize_date};
use regex::Regex;

/// Date shapes accepted near a label.
const DATE_TOKEN: &str =
    r"([A-Za-z]{3,9}\s+\d{1,2},?\s*\d{4}|\d{1,2}\s+[A-Za-z]{3,9}\s+'?\d{2,4}|\d{1,2}/\d{1,2}/\d{4})";

/// Windowed label-proximity date search.
///
/// Looks for a date token within `window_after` characters after the
/// label, then within `window_before` characters before it, and finally
/// retries with a combined label-then-date pattern over the whole text.
/// The label pattern must not contain capture groups.
pub(crate) fn find_date_near_label(
    text: &str,
    label: &str,
    window_after: usize,
    window_before: usize,
) -> Result<Option<String>> {
    let token_re = Regex::new(&format!("(?i){DATE_TOKEN}"))?;
    let label_re = Regex::new(&format!("(?i){label}"))?;
    let combined = Regex::new(&format!(r"(?i){label}[\s\S]{{0,{window_after}}}{DATE_TOKEN}"))?;

    let Some(m) = label_re.find(text) else {
        return Ok(combined
            .captures(text)
            .map(|c| c[1].trim().to_string()));
    };

    let after = head(&text[m.end()..], window_after);
    if let Some(c) = token_re.captures(after) {
        return Ok(Some(c[1].trim().to_string()));
    }

    let before = tail(&text[..m.start()], window_before);
    if let Some(c) = token_re.captures(before) {
        return Ok(Some(c[1].trim().to_string()));
    }

    Ok(combined.captures(text).map(|c| c[1].trim().to_string()))
}

pub fn parse_sbi(text: &str) -> Result<StatementFields> {
    let mut fields = StatementFields::default();

    // "Credit Card Number XXXX XXXX XXXX XX46", tolerating line breaks
    // between the label and the digit groups; short groups zero-pad.
    let card_re = Regex::new(
        r"(?i)Credit\s*Card\s*Number[\s:]*X{2,}\s*X{2,}\s*X{2,}\s*X{2,}\s*X{0,2}(\d{2,4})",
    )?;
    if let Some(c) = card_re.captures(text) {
        fields.last4 = format!("{:0>4}", &c[1]);
    }

    let cycle_re = Regex::new(
        r"(?i)for\s+Statement\s+Period\s*:\s*([0-9]{1,2}\s*[A-Za-z]{3,}\s*[0-9]{2,4})\s*to\s*([0-9]{1,2}\s*[A-Za-z]{3,}\s*[0-9]{2,4})",
    )?;
    if let Some(c) = cycle_re.captures(text) {
        fields.billing_cycle_start = normalize_date(&c[1]);
        fields.billing_cycle_end = normalize_date(&c[2]);
    }

    if let Some(raw) = find_date_near_label(text, r"Statement\s*Date", 200, 40)? {
        fields.statement_date = normalize_date(&raw);
    }

    if let Some(raw) = find_date_near_label(text, r"Payment\s*Due\s*Date", 200, 40)? {
        fields.payment_due_date = normalize_date(&raw);
    }

    let total_re = Regex::new(r"(?is)Total\s*Amount\s*Due.*?([0-9,]+\.\d{2})")?;
    if let Some(c) = total_re.captures(text) {
        fields.total_balance = format!("₹{}", c[1].replace(',', ""));
    }

    let min_re = Regex::new(r"(?is)Minimum\s*Amount\s*Due.*?([0-9,]+\.\d{2})")?;
    if let Some(c) = min_re.captures(text) {
        fields.minimum_due = format!("₹{}", c[1].replace(',', ""));
    }

    fields.transactions = extract_sbi_transactions(text)?;

    Ok(fields)
}

/// Rows after the "TRANSACTIONS FOR" marker, e.g.
/// `30 Sep 25 TPS*PHONEPE WALLET MUMBAI MAH 5,150.00 D`.
pub fn extract_sbi_transactions(text: &str) -> Result<Vec<TransactionRecord>> {
    let row_re =
        Regex::new(r"^(\d{1,2}\s*[A-Za-z]{3}\s*\d{2,4})\s+(.+?)\s+([0-9,]+\.\d{2})\s*[CDM]?$")?;

    let scan = match text.find("TRANSACTIONS FOR") {
        Some(idx) => &text[idx..],
        None => text,
    };

    let mut txs = Vec::new();
    for line in scan.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(c) = row_re.captures(line) {
            txs.push(TransactionRecord {
                date: normalize_date(&c[1]),
                description: flatten_ws(&c[2]),
                amount: c[3].replace(',', ""),
                direction: TxnDirection::Unstated,
            });
        }
    }
    Ok(txs)
}

#[cfg(test)]
mod tests {
    use super::*;

    const STATEMENT: &str = r#"
SBI CARDS AND PAYMENT SERVICES
Credit Card Number XXXX XXXX XXXX XX46
for Statement Period : 15 Sep 25 to 14 Oct 25
Statement Date
14 Oct 2025
Payment Due Date 03 Nov 2025
Total Amount Due 8,420.00
Minimum Amount Due 421.00

TRANSACTIONS FOR SBI CARD
30 Sep 25 TPS*PHONEPE WALLET MUMBAI MAH 5,150.00 D
02 Oct 25 REFUND SWIGGY BANGALORE 320.00 C
summary line that should not match
"#;

    #[test]
    fn test_parse_sbi_card_number_zero_pads() {
        let fields = parse_sbi(STATEMENT).unwrap();
        assert_eq!(fields.last4, "0046");
    }

    #[test]
    fn test_parse_sbi_dates() {
        let fields = parse_sbi(STATEMENT).unwrap();
        assert_eq!(fields.billing_cycle_start, "2025-09-15");
        assert_eq!(fields.billing_cycle_end, "2025-10-14");
        assert_eq!(fields.statement_date, "2025-10-14");
        assert_eq!(fields.payment_due_date, "2025-11-03");
    }

    #[test]
    fn test_parse_sbi_amounts_carry_glyph() {
        let fields = parse_sbi(STATEMENT).unwrap();
        assert_eq!(fields.total_balance, "₹8420.00");
        assert_eq!(fields.minimum_due, "₹421.00");
    }

    #[test]
    fn test_sbi_transactions_leave_direction_unstated() {
        let fields = parse_sbi(STATEMENT).unwrap();
        assert_eq!(fields.transactions.len(), 2);
        assert_eq!(fields.transactions[0].date, "2025-09-30");
        assert_eq!(
            fields.transactions[0].description,
            "TPS*PHONEPE WALLET MUMBAI MAH"
        );
        assert_eq!(fields.transactions[0].amount, "5150.00");
        assert_eq!(fields.transactions[0].direction, TxnDirection::Unstated);
        assert_eq!(fields.transactions[1].amount, "320.00");
    }

    #[test]
    fn test_find_date_near_label_window_before() {
        let text = "03 Nov 2025 is the Payment Due Date for this cycle";
        let raw = find_date_near_label(text, r"Payment\s*Due\s*Date", 200, 40)
            .unwrap()
            .unwrap();
        assert_eq!(normalize_date(&raw), "2025-11-03");
    }

    #[test]
    fn test_find_date_near_label_absent() {
        let raw = find_date_near_label("no labels here", r"Payment\s*Due\s*Date", 200, 40).unwrap();
        assert_eq!(raw, None);
    }
}
