//! Weak card identifier: the last four digits of a masked card number.

use regex::Regex;

fn last_digits(s: &str, n: usize) -> Option<String> {
    let digits: Vec<char> = s.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() < n {
        return None;
    }
    Some(digits[digits.len() - n..].iter().collect())
}

/// Extract the last four card digits from the full statement text.
///
/// Tried in order: the Kotak-labeled masked pattern
/// (`Primary Card Transactions-416644XXXXXX8253`), a generic
/// `XXXX...dddd` mask, and finally the last 4-digit number in the text
/// that cannot be a calendar year.
pub fn find_last4(text: &str) -> Option<String> {
    let labeled =
        Regex::new(r"(?i)Primary\s*Card\s*Transactions[-:\s]*([0-9Xx\s\-]{8,})").unwrap();
    if let Some(c) = labeled.captures(text) {
        if let Some(d) = last_digits(&c[1], 4) {
            return Some(d);
        }
    }

    let masked = Regex::new(r"[Xx]{2,}[\s\-]*\d{4}").unwrap();
    if let Some(m) = masked.find(text) {
        if let Some(d) = last_digits(m.as_str(), 4) {
            return Some(d);
        }
    }

    let four = Regex::new(r"\b\d{4}\b").unwrap();
    let candidates: Vec<&str> = four.find_iter(text).map(|m| m.as_str()).collect();
    for token in candidates.iter().rev() {
        if let Ok(n) = token.parse::<u32>() {
            if !(1900..=2099).contains(&n) {
                return Some((*token).to_string());
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kotak_labeled_mask() {
        assert_eq!(
            find_last4("Primary Card Transactions-416644XXXXXX8253"),
            Some("8253".to_string())
        );
        assert_eq!(
            find_last4("Primary Card Transactions- 4166 XXXX XXXX 8253"),
            Some("8253".to_string())
        );
    }

    #[test]
    fn test_generic_mask() {
        assert_eq!(
            find_last4("Card No: XXXX XXXX XXXX 4321"),
            Some("4321".to_string())
        );
        assert_eq!(find_last4("xxxxxxxxxxxx9876"), Some("9876".to_string()));
    }

    #[test]
    fn test_year_tokens_are_skipped() {
        // 2025 looks like a year; 8111 is the real candidate.
        assert_eq!(
            find_last4("Statement for 2025 account 8111"),
            Some("8111".to_string())
        );
        assert_eq!(find_last4("Statement period 2024 to 2025"), None);
    }

    #[test]
    fn test_nothing_to_find() {
        assert_eq!(find_last4("no digits here"), None);
    }
}
