//! Bank router: classify document text by keyword, dispatch to the
//! matching extractor.
//!
//! First match in a fixed priority order wins; there is no scoring and no
//! ambiguity resolution. Unmatched text yields UNKNOWN with the empty
//! field set, and the boundary layer decides whether that is a rejection.

use anyhow::Result;
use khata_core::{BankIdentity, StatementFields};
use tracing::debug;

use crate::parsers::{parse_axis, parse_hdfc, parse_icici, parse_kotak, parse_sbi};

type Extractor = fn(&str) -> Result<StatementFields>;

/// `(keyword, identity, extractor)` evaluated in order over the
/// upper-cased text; the first matching keyword wins.
const DISPATCH: &[(&str, BankIdentity, Extractor)] = &[
    ("ICICI BANK", BankIdentity::Icici, parse_icici),
    ("KOTAK", BankIdentity::Kotak, parse_kotak),
    ("AXIS BANK", BankIdentity::Axis, parse_axis),
    ("HDFC BANK", BankIdentity::Hdfc, parse_hdfc),
    ("SBI", BankIdentity::Sbi, parse_sbi),
];

/// Classify the document text by bank-identifying keyword.
pub fn classify(text: &str) -> BankIdentity {
    let upper = text.to_uppercase();
    for (keyword, bank, _) in DISPATCH {
        if upper.contains(keyword) {
            return *bank;
        }
    }
    BankIdentity::Unknown
}

/// Classify and run the matching extractor.
///
/// UNKNOWN yields the fully-shaped empty field set. Extractor errors
/// propagate so the orchestrator can absorb them defensively.
pub fn detect_bank_and_parse(text: &str) -> (BankIdentity, Result<StatementFields>) {
    let upper = text.to_uppercase();
    for (keyword, bank, extract) in DISPATCH {
        if upper.contains(keyword) {
            debug!("classified statement as {}", bank.as_str());
            return (*bank, extract(text));
        }
    }
    debug!("no bank keyword matched; returning UNKNOWN");
    (BankIdentity::Unknown, Ok(StatementFields::default()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_each_bank() {
        assert_eq!(classify("statement from icici bank ltd"), BankIdentity::Icici);
        assert_eq!(classify("KOTAK Mahindra"), BankIdentity::Kotak);
        assert_eq!(classify("Axis Bank Credit Card"), BankIdentity::Axis);
        assert_eq!(classify("hdfc bank millennia"), BankIdentity::Hdfc);
        assert_eq!(classify("SBI Cards"), BankIdentity::Sbi);
    }

    #[test]
    fn test_classify_is_total() {
        assert_eq!(classify(""), BankIdentity::Unknown);
        assert_eq!(classify("some random flyer"), BankIdentity::Unknown);
        assert_eq!(classify("HDFC LIFE INSURANCE"), BankIdentity::Unknown);
    }

    #[test]
    fn test_classify_priority_order() {
        // ICICI outranks Kotak when both keywords appear.
        assert_eq!(
            classify("transfer from ICICI BANK to KOTAK"),
            BankIdentity::Icici
        );
        // A bare SBI mention loses to any earlier keyword.
        assert_eq!(
            classify("AXIS BANK statement, payable via SBI netbanking"),
            BankIdentity::Axis
        );
    }

    #[test]
    fn test_detect_unknown_has_empty_fields() {
        let (bank, fields) = detect_bank_and_parse("unrecognized document");
        assert_eq!(bank, BankIdentity::Unknown);
        assert_eq!(fields.unwrap(), StatementFields::default());
    }

    /// Every extractor keeps the schema fully shaped: unrecognized fields
    /// are empty strings, never missing keys.
    #[test]
    fn test_missing_fields_surface_as_empty_strings_for_every_bank() {
        for keyword in ["ICICI BANK", "KOTAK", "AXIS BANK", "HDFC BANK", "SBI"] {
            let (bank, fields) = detect_bank_and_parse(keyword);
            assert!(bank.is_supported(), "{keyword} should route");
            let json = serde_json::to_value(fields.unwrap()).unwrap();
            for key in [
                "last4",
                "statement_date",
                "billing_cycle_start",
                "billing_cycle_end",
                "payment_due_date",
                "total_balance",
                "minimum_due",
            ] {
                assert_eq!(json[key], "", "{keyword}: {key} should be empty");
            }
            assert!(json["transactions"].as_array().unwrap().is_empty());
        }
    }
}
