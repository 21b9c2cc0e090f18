//! Amount normalizers: strip currency markers and OCR artifacts, coerce to
//! exactly two decimals, prefix the canonical rupee glyph.
//!
//! OCR renders `₹` as a backtick or a stray `C` depending on the layout,
//! so each variant strips the artifacts its bank actually produces. A token
//! with no numeric substring normalizes to the empty string.

use regex::Regex;

fn pad_two_decimals(v: &str) -> String {
    match v.split_once('.') {
        None => format!("{v}.00"),
        Some((_, frac)) if frac.len() == 1 => format!("{v}0"),
        _ => v.to_string(),
    }
}

fn has_digit(s: &str) -> bool {
    s.chars().any(|c| c.is_ascii_digit())
}

/// ICICI-style cleaner: `"Rs. 1,234.5"` -> `"₹1234.50"`.
///
/// If the stripped token is not purely numeric, the first numeric substring
/// is coerced instead; no digits at all yields `""`.
pub fn rupee_amount(raw: &str) -> String {
    if raw.trim().is_empty() {
        return String::new();
    }
    let t = raw
        .replace('`', "")
        .replace("Rs.", "")
        .replace("INR", "")
        .replace('₹', "");
    let t = t.trim().replace(',', "");

    let exact = Regex::new(r"^\d+(?:\.\d{1,2})?$").unwrap();
    if exact.is_match(&t) {
        return format!("₹{}", pad_two_decimals(&t));
    }
    let any_num = Regex::new(r"\d+(?:\.\d+)?").unwrap();
    if let Some(m) = any_num.find(&t) {
        return format!("₹{}", pad_two_decimals(m.as_str()));
    }
    String::new()
}

/// Axis rows capture the numeric token separately, so this only strips
/// stray markers and coerces the decimals.
pub fn rupee_amount_axis(raw: &str) -> String {
    let s = raw.replace(',', "").replace('`', "");
    let s = Regex::new(r"(?i)^(Rs\.?|INR|₹)\s*")
        .unwrap()
        .replace(s.trim(), "")
        .to_string();
    if !has_digit(&s) {
        return String::new();
    }
    let exact = Regex::new(r"^\d+(?:\.\d{1,2})?$").unwrap();
    if exact.is_match(&s) {
        return format!("₹{}", pad_two_decimals(&s));
    }
    format!("₹{s}")
}

/// HDFC statements render the rupee glyph as a stray `C` through OCR.
pub fn rupee_amount_hdfc(raw: &str) -> String {
    let s = raw.replace(',', "").replace('C', "").replace('`', "");
    let s = Regex::new(r"(?i)^(Rs\.?|INR|₹)\s*")
        .unwrap()
        .replace(s.trim(), "")
        .to_string();
    if !has_digit(&s) {
        return String::new();
    }
    let exact = Regex::new(r"^\d+(?:\.\d{1,2})?$").unwrap();
    if exact.is_match(&s) {
        return format!("₹{}", pad_two_decimals(&s));
    }
    format!("₹{s}")
}
