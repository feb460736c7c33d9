//! Built-in rule predicates.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("valid email regex")
});

static PHONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9 -]+$").expect("valid phone regex"));

static URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)^https?://",
        r"(?:(?:[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?\.)+[a-z]{2,}|localhost|\d{1,3}(?:\.\d{1,3}){3})",
        r"(?::\d+)?",
        r"(?:[/?#]\S*)?$",
    ))
    .expect("valid url regex")
});

static DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("valid date regex"));

const MIN_PHONE_DIGITS: usize = 10;

/// `local@domain.tld`.
pub fn is_email(value: &str) -> bool {
    EMAIL.is_match(value)
}

/// At least ten digits, an optional leading `+`, spaces and hyphens allowed.
pub fn is_phone(value: &str) -> bool {
    PHONE.is_match(value) && value.chars().filter(char::is_ascii_digit).count() >= MIN_PHONE_DIGITS
}

/// `http(s)://` followed by a host and an optional port, path or query.
pub fn is_url(value: &str) -> bool {
    URL.is_match(value)
}

/// Strict `YYYY-MM-DD` naming a real calendar day.
pub fn is_date(value: &str) -> bool {
    DATE.is_match(value) && NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
}

/// Digits only once at most one decimal point is removed.
pub fn is_number(value: &str) -> bool {
    let digits = value.replacen('.', "", 1);
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}

/// Value is present after trimming whitespace.
pub fn is_present(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Length in characters, not bytes.
pub fn char_len(value: &str) -> usize {
    value.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email() {
        assert!(is_email("a@b.com"));
        assert!(is_email("first.last+tag@mail.example.org"));
        assert!(!is_email("a@b"));
        assert!(!is_email("@b.com"));
        assert!(!is_email("a b@c.com"));
        assert!(!is_email("a@b.c"));
    }

    #[test]
    fn test_phone() {
        assert!(is_phone("5551234567"));
        assert!(is_phone("+1 555-123-4567"));
        assert!(is_phone("+44 20 7946 0958"));
        assert!(!is_phone("555-1234"));
        assert!(!is_phone("555.123.4567"));
        assert!(!is_phone("1+5551234567"));
        assert!(!is_phone("(555) 123-4567"));
    }

    #[test]
    fn test_url() {
        assert!(is_url("https://example.com"));
        assert!(is_url("http://sub.example.co.uk/path?q=1"));
        assert!(is_url("http://localhost:8080/api"));
        assert!(is_url("HTTPS://EXAMPLE.COM"));
        assert!(is_url("http://192.168.0.1/"));
        assert!(!is_url("ftp://example.com"));
        assert!(!is_url("example.com"));
        assert!(!is_url("https://"));
        assert!(!is_url("https://exa mple.com"));
    }

    #[test]
    fn test_date_is_strict() {
        assert!(is_date("2024-02-29"));
        assert!(!is_date("2023-02-29"));
        assert!(!is_date("2024-13-01"));
        assert!(!is_date("2024-1-01"));
        assert!(!is_date("01/02/2024"));
        assert!(!is_date("2024-01-01T00:00"));
    }

    #[test]
    fn test_number_allows_one_decimal_point() {
        assert!(is_number("42"));
        assert!(is_number("3.14"));
        assert!(is_number(".5"));
        assert!(is_number("7."));
        assert!(!is_number("1.2.3"));
        assert!(!is_number("-1"));
        assert!(!is_number("1e5"));
        assert!(!is_number("."));
        assert!(!is_number(""));
    }

    #[test]
    fn test_char_len_counts_characters() {
        assert_eq!(char_len("héllo"), 5);
        assert_eq!(char_len(""), 0);
    }
}
