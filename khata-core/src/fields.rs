//! Canonical output schema shared by every bank extractor.
//!
//! The record is always fully shaped: a field the extractor could not
//! recognize is an empty string, never a missing key. Each parse owns its
//! own `StatementFields`; nothing here is shared across requests.

use serde::{Deserialize, Serialize};

/// Banks with a dedicated statement extractor.
///
/// Classified once per document by keyword presence and never re-evaluated
/// mid-parse. Anything outside the closed set is `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BankIdentity {
    #[serde(rename = "KOTAK")]
    Kotak,
    #[serde(rename = "ICICI")]
    Icici,
    #[serde(rename = "AXIS")]
    Axis,
    #[serde(rename = "HDFC")]
    Hdfc,
    #[serde(rename = "SBI")]
    Sbi,
    #[serde(rename = "UNKNOWN")]
    Unknown,
}

impl BankIdentity {
    pub fn as_str(&self) -> &'static str {
        match self {
            BankIdentity::Kotak => "KOTAK",
            BankIdentity::Icici => "ICICI",
            BankIdentity::Axis => "AXIS",
            BankIdentity::Hdfc => "HDFC",
            BankIdentity::Sbi => "SBI",
            BankIdentity::Unknown => "UNKNOWN",
        }
    }

    /// Whether a dedicated extractor exists for this identity.
    pub fn is_supported(&self) -> bool {
        !matches!(self, BankIdentity::Unknown)
    }
}

/// Transaction direction, when the statement states or implies one.
///
/// SBI rows carry a trailing C/D/M marker the original layout never maps to
/// a direction, so SBI transactions stay `Unstated`; the other banks infer
/// it from explicit Cr/Dr tokens or description keywords.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TxnDirection {
    Credit,
    Debit,
    #[default]
    #[serde(rename = "")]
    Unstated,
}

impl TxnDirection {
    /// Map an explicit Cr/Dr-style token to a direction.
    pub fn from_marker(token: &str) -> TxnDirection {
        match token.to_lowercase().as_str() {
            "cr" | "credit" | "credited" => TxnDirection::Credit,
            "dr" | "debit" | "debited" => TxnDirection::Debit,
            _ => TxnDirection::Unstated,
        }
    }
}

/// One matched statement row or block. Never mutated after creation;
/// ordering follows order of appearance in the source text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// ISO `YYYY-MM-DD`, or empty when the row's date token did not parse.
    pub date: String,
    /// Trimmed, whitespace-collapsed description.
    pub description: String,
    /// Currency string; `₹`-prefixed or plain depending on bank convention.
    pub amount: String,
    #[serde(rename = "type")]
    pub direction: TxnDirection,
}

/// The canonical per-statement output record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatementFields {
    pub last4: String,
    pub statement_date: String,
    pub billing_cycle_start: String,
    pub billing_cycle_end: String,
    pub payment_due_date: String,
    pub total_balance: String,
    pub minimum_due: String,
    pub transactions: Vec<TransactionRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_fields_are_fully_shaped() {
        let fields = StatementFields::default();
        let json = serde_json::to_value(&fields).unwrap();
        for key in [
            "last4",
            "statement_date",
            "billing_cycle_start",
            "billing_cycle_end",
            "payment_due_date",
            "total_balance",
            "minimum_due",
        ] {
            assert_eq!(json[key], "", "{key} should default to empty string");
        }
        assert!(json["transactions"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_unstated_direction_serializes_as_empty_string() {
        let record = TransactionRecord {
            date: "2025-10-09".to_string(),
            description: "UPI REFUND".to_string(),
            amount: "₹120.00".to_string(),
            direction: TxnDirection::Unstated,
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["type"], "");
        assert_eq!(json["date"], "2025-10-09");
    }

    #[test]
    fn test_direction_from_marker() {
        assert_eq!(TxnDirection::from_marker("Cr"), TxnDirection::Credit);
        assert_eq!(TxnDirection::from_marker("credited"), TxnDirection::Credit);
        assert_eq!(TxnDirection::from_marker("DR"), TxnDirection::Debit);
        assert_eq!(TxnDirection::from_marker("memo"), TxnDirection::Unstated);
    }

    #[test]
    fn test_bank_identity_round_trip() {
        let json = serde_json::to_string(&BankIdentity::Hdfc).unwrap();
        assert_eq!(json, "\"HDFC\"");
        assert!(BankIdentity::Sbi.is_supported());
        assert!(!BankIdentity::Unknown.is_supported());
    }
}
