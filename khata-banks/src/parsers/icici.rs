//! ICICI statement extractor.
//!
//! Summary values live in the first ~5000 characters (the header/summary
//! zone). Every search runs there first, then against whitespace-flattened
//! views of the header and of the whole document, because the columnar
//! layout scatters labels and values across lines.

use anyhow::Result;
use khata_core::text::{flatten_ws, head};
use khata_core::{
    StatementFields, normalize_date, normalize_date_axis, normalize_date_icici, rupee_amount,
};
use regex::Regex;

use crate::parsers::line::extract_transactions;

fn scan_patterns(patterns: &[&str], primary: &str, fallback: &str) -> Result<Option<String>> {
    for p in patterns {
        if let Some(c) = Regex::new(p)?.captures(primary) {
            return Ok(Some(c[1].to_string()));
        }
    }
    for p in patterns {
        if let Some(c) = Regex::new(p)?.captures(fallback) {
            return Ok(Some(c[1].to_string()));
        }
    }
    Ok(None)
}

pub fn parse_icici(text: &str) -> Result<StatementFields> {
    let mut fields = StatementFields::default();

    let top = head(text, 5000);
    let flat_top = flatten_ws(top);
    let flat_all = flatten_ws(text);

    // last4: prefer the masked pattern, header zone only.
    let masked = Regex::new(r"X{4,}\s*(\d{4})")?;
    if let Some(c) = masked.captures(top) {
        fields.last4 = c[1].to_string();
    } else {
        let near_header = Regex::new(r"(?i)(?:Card|Credit|XXXXX|XXXX)\s*[:\-]?\s*(\d{4})")?;
        if let Some(c) = near_header.captures(top) {
            fields.last4 = c[1].to_string();
        } else {
            let four = Regex::new(r"\b(\d{4})\b")?;
            if let Some(c) = four.captures_iter(top).last() {
                fields.last4 = c[1].to_string();
            }
        }
    }

    // Statement period, lenient form, across the three zones.
    let period_re = Regex::new(
        r"(?i)(?:Statement\s+period|Billing\s*Period)\s*[:\-]?\s*([A-Za-z0-9,\s/\-']+?)\s*(?:to|[-–])\s*([A-Za-z0-9,\s/\-']+?)\b",
    )?;
    if let Some(c) = period_re
        .captures(top)
        .or_else(|| period_re.captures(&flat_top))
        .or_else(|| period_re.captures(&flat_all))
    {
        fields.billing_cycle_start = normalize_date_icici(c[1].trim());
        fields.billing_cycle_end = normalize_date_icici(c[2].trim());
    }

    // Statement date labels; month-only first. These tokens share the
    // Axis shapes, so they reuse that normalizer.
    let month_label = Regex::new(r"(?i)STATEMENT\s+DATE\s*[:\-]?\s*([A-Za-z]{3,9}\s+\d{4})")?;
    if let Some(c) = month_label.captures(top) {
        fields.statement_date = normalize_date_axis(&c[1]);
    } else {
        let day_label =
            Regex::new(r"(?i)Statement\s+Date\s*[:\-]?\s*([A-Za-z]{3,9}\s+\d{1,2}\s*'?\d{2,4})")?;
        if let Some(c) = day_label.captures(top) {
            fields.statement_date = normalize_date_axis(&c[1]);
        }
    }

    // Stricter day-month-year period form may overwrite the lenient match.
    let cycle_re = Regex::new(
        r"(?i)Statement\s*Period\s*[:\-]?\s*([0-9]{1,2}\s*[A-Za-z]{3,9}\s*[0-9]{4})\s*(?:to|-)\s*([0-9]{1,2}\s*[A-Za-z]{3,9}\s*[0-9]{4})",
    )?;
    if let Some(c) = cycle_re.captures(top) {
        fields.billing_cycle_start = normalize_date(&c[1]);
        fields.billing_cycle_end = normalize_date(&c[2]);
    }

    // Payment due date: label variants, each tried across the zones.
    let due_patterns = [
        r"(?i)Payment\s+Due\s+Date\s*[:\-]?\s*([A-Za-z]{3,9}\s+\d{1,2},?\s*\d{4})",
        r"(?i)Payment\s+Due\s*[:\-]?\s*([A-Za-z]{3,9}\s+\d{1,2},?\s*\d{4})",
        r"(?i)Pay\s+by\s*[:\-]?\s*([A-Za-z]{3,9}\s+\d{1,2},?\s*\d{4})",
        r"(?i)Due\s+Date\s*[:\-]?\s*([A-Za-z]{3,9}\s+\d{1,2},?\s*\d{4})",
        r"(?i)Payment\s+Due\s+Date\s*[:\-]?\s*([0-9]{1,2}/[0-9]{1,2}/[0-9]{4})",
    ];
    'due: for pattern in due_patterns {
        let re = Regex::new(pattern)?;
        for zone in [top, flat_top.as_str(), flat_all.as_str()] {
            if let Some(c) = re.captures(zone) {
                fields.payment_due_date = normalize_date_icici(&c[1]);
                break 'due;
            }
        }
    }

    // Total and minimum due: two pattern variants each, header zone first,
    // then the flattened full document.
    let total_patterns = [
        r"(?i)Total\s+Amount\s+due\s*[:\n\r-]*\s*[₹`Rs.]*\s*([0-9,]+(?:\.\d{1,2})?)",
        r"(?i)Total\s+Amount\s+due[\s\S]{0,40}?([0-9,]+(?:\.\d{1,2})?)",
    ];
    let min_patterns = [
        r"(?i)(?:Minimum\s+Amount\s+due|Minimum\s+Amount)\s*[:\n\r-]*\s*[₹`Rs.]*\s*([0-9,]+(?:\.\d{1,2})?)",
        r"(?i)Minimum\s+Amount\s+due[\s\S]{0,40}?([0-9,]+(?:\.\d{1,2})?)",
    ];

    let mut total_raw = scan_patterns(&total_patterns, top, &flat_top)?;
    if total_raw.is_none() {
        total_raw = scan_patterns(&total_patterns, &flat_all, &flat_all)?;
    }
    let mut min_raw = scan_patterns(&min_patterns, top, &flat_top)?;
    if min_raw.is_none() {
        min_raw = scan_patterns(&min_patterns, &flat_all, &flat_all)?;
    }

    if let Some(raw) = total_raw {
        fields.total_balance = rupee_amount(&raw);
    }
    if let Some(raw) = min_raw {
        fields.minimum_due = rupee_amount(&raw);
    }

    // Rows are single self-contained lines; extraction problems here must
    // not cost the summary fields.
    fields.transactions = extract_transactions(text).unwrap_or_default();

    // A bare currency glyph is as good as nothing.
    if fields.total_balance == "₹" {
        fields.total_balance.clear();
    }
    if fields.minimum_due == "₹" {
        fields.minimum_due.clear();
    }

    Ok(fields)
}
