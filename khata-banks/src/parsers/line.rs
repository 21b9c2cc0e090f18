//! Generic line-oriented transaction extractor shared by the Kotak and
//! ICICI layouts.
//!
//! A row is one self-contained line: `<dd/mm/yyyy> <description>
//! <amount>[ Cr]`. Non-matching lines are silently skipped; there is no
//! multi-line merge.

use anyhow::Result;
use khata_core::text::flatten_ws;
use khata_core::{TransactionRecord, TxnDirection, normalize_date};
use regex::Regex;

/// Scan text line by line for `<date> <description> <amount>` triples.
pub fn extract_transactions(text: &str) -> Result<Vec<TransactionRecord>> {
    let row_re = Regex::new(r"^(\d{1,2}/\d{1,2}/\d{4})\s+(.*?)\s+([0-9,]+\.\d{2})(?:\s*Cr)?$")?;

    let mut txs = Vec::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(caps) = row_re.captures(line) {
            txs.push(TransactionRecord {
                date: normalize_date(&caps[1]),
                description: flatten_ws(&caps[2]),
                amount: caps[3].replace(',', ""),
                direction: TxnDirection::Unstated,
            });
        }
    }
    Ok(txs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_basic_row() {
        let txs = extract_transactions("15/03/2025 AMAZON PURCHASE 1,234.56").unwrap();
        assert_eq!(txs.len(), 1);
        assert_eq!(txs[0].date, "2025-03-15");
        assert_eq!(txs[0].description, "AMAZON PURCHASE");
        assert_eq!(txs[0].amount, "1234.56");
    }

    #[test]
    fn test_cr_suffix_and_noise_lines() {
        let text = r#"
Some header text
01/10/2025 UPI REFUND FLIPKART 250.00 Cr
not a transaction line
12/10/2025   SWIGGY   ORDER   489.00
"#;
        let txs = extract_transactions(text).unwrap();
        assert_eq!(txs.len(), 2);
        assert_eq!(txs[0].date, "2025-10-01");
        assert_eq!(txs[0].description, "UPI REFUND FLIPKART");
        assert_eq!(txs[1].description, "SWIGGY ORDER");
        assert_eq!(txs[1].amount, "489.00");
    }

    #[test]
    fn test_rows_keep_source_order() {
        let text = "05/09/2025 LATER ROW 10.00\n01/09/2025 EARLIER ROW 20.00";
        let txs = extract_transactions(text).unwrap();
        assert_eq!(txs[0].description, "LATER ROW");
        assert_eq!(txs[1].description, "EARLIER ROW");
    }
}
