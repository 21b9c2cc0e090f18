//! Date normalizers for the free-form tokens found on statement PDFs.
//!
//! Every normalizer is total: on success it emits ISO `YYYY-MM-DD`
//! (month-only inputs resolve to the first of that month), on failure it
//! returns the trimmed input unchanged so a caller can detect non-ISO
//! output and apply its next heuristic. The bank variants accept slightly
//! different sloppy forms and must stay interchangeable but distinct.

use chrono::NaiveDate;
use regex::Regex;

/// Month name to number, tolerating long names and "Sept".
fn month_to_num(name: &str) -> Option<u32> {
    let key: String = name.trim().to_lowercase().chars().take(3).collect();
    let n = match key.as_str() {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };
    Some(n)
}

/// Two-digit years on statements are always 2000+.
fn expand_year(y: i32) -> i32 {
    if y < 100 { 2000 + y } else { y }
}

fn iso(year: i32, month: u32, day: u32) -> Option<String> {
    NaiveDate::from_ymd_opt(year, month, day).map(|d| d.format("%Y-%m-%d").to_string())
}

fn clean_token(raw: &str) -> String {
    raw.trim().replace('’', "'").replace('‘', "'")
}

/// Generic day-first normalizer used by the Kotak and SBI paths and the
/// shared line extractor. Indian statements put the day first, so
/// `09/10/2025` is the 9th of October.
///
/// Ordered templates: day month-name year (separators optional, `'yy`
/// tolerated), month-name day year, numeric `d/m/y`, ISO, month-year-only.
pub fn normalize_date(raw: &str) -> String {
    let s = clean_token(raw);
    if s.is_empty() {
        return s;
    }

    // "21-Sep-2025", "30 Sep 25", "1Sep2025", "09 Oct '25"
    let dmy = Regex::new(r"^(\d{1,2})\s*[-/ ]?\s*([A-Za-z]{3,9})\.?,?\s*[-/ ]?\s*'?(\d{2,4})$")
        .unwrap();
    if let Some(c) = dmy.captures(&s) {
        if let (Ok(day), Some(month), Ok(year)) =
            (c[1].parse::<u32>(), month_to_num(&c[2]), c[3].parse::<i32>())
        {
            if let Some(out) = iso(expand_year(year), month, day) {
                return out;
            }
        }
    }

    // "Oct 14, 2025", "October 14 2025"; day and year must be separated
    // or "Oct 2025" would split as day 20, year 25.
    let mdy = Regex::new(r"^([A-Za-z]{3,9})\.?\s+(\d{1,2})(?:,\s*|\s*'|\s+)(\d{2,4})$").unwrap();
    if let Some(c) = mdy.captures(&s) {
        if let (Some(month), Ok(day), Ok(year)) =
            (month_to_num(&c[1]), c[2].parse::<u32>(), c[3].parse::<i32>())
        {
            if let Some(out) = iso(expand_year(year), month, day) {
                return out;
            }
        }
    }

    // "07/11/2025", "14-10-2025", "09.10.25"
    let numeric = Regex::new(r"^(\d{1,2})[/\-.](\d{1,2})[/\-.](\d{2,4})$").unwrap();
    if let Some(c) = numeric.captures(&s) {
        if let (Ok(day), Ok(month), Ok(year)) =
            (c[1].parse::<u32>(), c[2].parse::<u32>(), c[3].parse::<i32>())
        {
            if let Some(out) = iso(expand_year(year), month, day) {
                return out;
            }
        }
    }

    // Already ISO
    let iso_re = Regex::new(r"^(\d{4})-(\d{2})-(\d{2})$").unwrap();
    if iso_re.is_match(&s) {
        return s;
    }

    // "Oct 2025" -> first of the month
    let month_year = Regex::new(r"^([A-Za-z]{3,9})\.?,?\s+(\d{4})$").unwrap();
    if let Some(c) = month_year.captures(&s) {
        if let (Some(month), Ok(year)) = (month_to_num(&c[1]), c[2].parse::<i32>()) {
            if let Some(out) = iso(year, month, 1) {
                return out;
            }
        }
    }

    s
}

/// Axis date tokens: `09 Oct '25`, `Oct 2025`, `09.10.2025`, ISO.
pub fn normalize_date_axis(raw: &str) -> String {
    let s = clean_token(raw);
    if s.is_empty() {
        return s;
    }

    // dd Mon 'yy / dd Mon yyyy
    let dmy = Regex::new(r"^(\d{1,2})\s+([A-Za-z]{3,9})\.?\s+'?(\d{2,4})$").unwrap();
    if let Some(c) = dmy.captures(&s) {
        if let (Ok(day), Some(month), Ok(year)) =
            (c[1].parse::<u32>(), month_to_num(&c[2]), c[3].parse::<i32>())
        {
            if let Some(out) = iso(expand_year(year), month, day) {
                return out;
            }
        }
    }

    // Mon YYYY -> YYYY-MM-01
    let month_year = Regex::new(r"^([A-Za-z]{3,9})\.?\s+(\d{4})$").unwrap();
    if let Some(c) = month_year.captures(&s) {
        if let (Some(month), Ok(year)) = (month_to_num(&c[1]), c[2].parse::<i32>()) {
            if let Some(out) = iso(year, month, 1) {
                return out;
            }
        }
    }

    // dd/mm/yyyy, dd-mm-yyyy and the dotted variant Axis also prints
    let numeric = Regex::new(r"^(\d{1,2})[/\-.](\d{1,2})[/\-.](\d{2,4})$").unwrap();
    if let Some(c) = numeric.captures(&s) {
        if let (Ok(day), Ok(month), Ok(year)) =
            (c[1].parse::<u32>(), c[2].parse::<u32>(), c[3].parse::<i32>())
        {
            if let Some(out) = iso(expand_year(year), month, day) {
                return out;
            }
        }
    }

    let iso_re = Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap();
    if iso_re.is_match(&s) {
        return s;
    }

    s
}

/// HDFC date tokens: `14 Oct, 2025`, `15/09/2025`.
pub fn normalize_date_hdfc(raw: &str) -> String {
    let s = clean_token(raw).replace(',', "");
    if s.is_empty() {
        return s;
    }
    for fmt in ["%d %b %Y", "%d %B %Y", "%d/%m/%Y", "%d-%m-%Y"] {
        if let Ok(d) = NaiveDate::parse_from_str(&s, fmt) {
            return d.format("%Y-%m-%d").to_string();
        }
    }
    s
}

/// ICICI date tokens; additionally tries a month+year-only form.
pub fn normalize_date_icici(raw: &str) -> String {
    let trimmed = clean_token(raw);
    if trimmed.is_empty() {
        return trimmed;
    }
    let s: String = trimmed.replace('.', "").replace(',', "");
    let s = crate::text::flatten_ws(&s);

    for fmt in [
        "%d %b %Y", "%d %B %Y", // "14 Oct 2025", "14 October 2025"
        "%b %d %Y", "%B %d %Y", // "Oct 14 2025", "October 14 2025"
        "%d/%m/%Y", "%d-%m-%Y", // "14/10/2025"
        "%Y-%m-%d",
    ] {
        if let Ok(d) = NaiveDate::parse_from_str(&s, fmt) {
            return d.format("%Y-%m-%d").to_string();
        }
    }

    // "Oct 2025" -> YYYY-MM-01
    let month_year = Regex::new(r"^([A-Za-z]{3,9})\s+(\d{4})$").unwrap();
    if let Some(c) = month_year.captures(&trimmed) {
        if let (Some(month), Ok(year)) = (month_to_num(&c[1]), c[2].parse::<i32>()) {
            if let Some(out) = iso(year, month, 1) {
                return out;
            }
        }
    }

    trimmed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_date_day_first_forms() {
        assert_eq!(normalize_date("21-Sep-2025"), "2025-09-21");
        assert_eq!(normalize_date("30 Sep 25"), "2025-09-30");
        assert_eq!(normalize_date("1Sep2025"), "2025-09-01");
        assert_eq!(normalize_date("09 Oct '25"), "2025-10-09");
    }

    #[test]
    fn test_normalize_date_numeric_is_day_first() {
        // Indian convention: 07/11 is the 7th of November.
        assert_eq!(normalize_date("07/11/2025"), "2025-11-07");
        assert_eq!(normalize_date("14-10-2025"), "2025-10-14");
    }

    #[test]
    fn test_normalize_date_month_name_first() {
        assert_eq!(normalize_date("Oct 14, 2025"), "2025-10-14");
        assert_eq!(normalize_date("October 14 2025"), "2025-10-14");
    }

    #[test]
    fn test_normalize_date_month_only() {
        assert_eq!(normalize_date("Oct 2025"), "2025-10-01");
        assert_eq!(normalize_date("Sept 2025"), "2025-09-01");
    }

    #[test]
    fn test_normalize_date_idempotent_on_iso() {
        assert_eq!(normalize_date("2025-03-15"), "2025-03-15");
        assert_eq!(normalize_date_axis("2025-03-15"), "2025-03-15");
        assert_eq!(normalize_date_icici("2025-03-15"), "2025-03-15");
    }

    #[test]
    fn test_normalize_date_failure_returns_trimmed_input() {
        assert_eq!(normalize_date("  not a date  "), "not a date");
        assert_eq!(normalize_date_axis("Due Soon"), "Due Soon");
        assert_eq!(normalize_date_hdfc("n/a"), "n/a");
    }

    #[test]
    fn test_axis_quote_year() {
        assert_eq!(normalize_date_axis("09 Oct '25"), "2025-10-09");
        assert_eq!(normalize_date_axis("30 Oct '25"), "2025-10-30");
        assert_eq!(normalize_date_axis("09 Oct 2025"), "2025-10-09");
    }

    #[test]
    fn test_axis_month_only_and_dotted() {
        assert_eq!(normalize_date_axis("Oct 2025"), "2025-10-01");
        assert_eq!(normalize_date_axis("09.10.2025"), "2025-10-09");
        assert_eq!(normalize_date_axis("09/10/25"), "2025-10-09");
    }

    #[test]
    fn test_hdfc_comma_form() {
        assert_eq!(normalize_date_hdfc("14 Oct, 2025"), "2025-10-14");
        assert_eq!(normalize_date_hdfc("15/09/2025"), "2025-09-15");
    }

    #[test]
    fn test_icici_forms() {
        assert_eq!(normalize_date_icici("14 Oct 2025"), "2025-10-14");
        assert_eq!(normalize_date_icici("Oct 14 2025"), "2025-10-14");
        assert_eq!(normalize_date_icici("14/10/2025"), "2025-10-14");
        assert_eq!(normalize_date_icici("Oct 2025"), "2025-10-01");
        // The ICICI variant does not accept the Axis 'yy form.
        assert_eq!(normalize_date_icici("14 Oct '25"), "14 Oct '25");
    }

    #[test]
    fn test_invalid_calendar_day_falls_through() {
        assert_eq!(normalize_date("31/02/2025"), "31/02/2025");
    }
}
