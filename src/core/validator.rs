//! Field validators.
//!
//! Every check here is a predicate or returns a structured report; an invalid
//! input is a normal return value, never an `Err`. The one exception is
//! `check_postal_code`, which distinguishes "unknown country" from "invalid
//! code" for callers that need to.

use std::net::IpAddr;
use std::sync::LazyLock;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use regex::Regex;
use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::dates;
use crate::error::{Error, Result};

pub const DEFAULT_PHONE_PATTERN: &str = r"^\+?[1-9][0-9]{1,14}$";

pub const POSTAL_COUNTRIES: [&str; 3] = ["US", "UK", "CA"];

static EMAIL_LOCAL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*$")
        .unwrap()
});

static EMAIL_DOMAIN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z0-9]([A-Za-z0-9-]{0,61}[A-Za-z0-9])?\.)+[A-Za-z0-9]([A-Za-z0-9-]{0,61}[A-Za-z0-9])?$")
        .unwrap()
});

static DEFAULT_PHONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(DEFAULT_PHONE_PATTERN).unwrap());

static NORTH_AMERICAN_PHONE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\+?1?[\s-]?\(?[0-9]{3}\)?[\s-]?[0-9]{3}[\s-]?[0-9]{4}$")
        .unwrap()
});

static UK_PHONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?44[\s-]?[0-9]{10}$").unwrap());

static US_POSTAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{5}(-[0-9]{4})?$").unwrap());

static UK_POSTAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[A-Z]{1,2}[0-9][A-Z0-9]? ?[0-9][A-Z]{2}$").unwrap()
});

static CA_POSTAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[A-Z][0-9][A-Z][ -]?[0-9][A-Z][0-9]$").unwrap()
});

/// Syntax check for an email address (no DNS lookup).
pub fn is_valid_email(email: &str) -> bool {
    if email.len() > 320 {
        return false;
    }
    let Some((local, domain)) = email.rsplit_once('@') else {
        return false;
    };
    if local.is_empty() || local.len() > 64 || domain.len() > 253 {
        return false;
    }
    EMAIL_LOCAL_PATTERN.is_match(local) && EMAIL_DOMAIN_PATTERN.is_match(domain)
}

/// Absolute URL with a scheme and, except for host-less schemes, a host.
pub fn is_valid_url(url: &str) -> bool {
    match Url::parse(url) {
        Ok(parsed) => {
            parsed.has_host() || matches!(parsed.scheme(), "mailto" | "news" | "file")
        }
        Err(_) => false,
    }
}

/// IPv4 or IPv6 address.
pub fn is_valid_ip(ip: &str) -> bool {
    ip.parse::<IpAddr>().is_ok()
}

/// Match against `pattern`, or the E.164-like default. A pattern that does not
/// compile never matches.
pub fn is_valid_phone(phone: &str, pattern: Option<&str>) -> bool {
    match pattern {
        None => DEFAULT_PHONE.is_match(phone),
        Some(pattern) => Regex::new(pattern)
            .map(|re| re.is_match(phone))
            .unwrap_or(false),
    }
}

/// Country-specific phone format; unknown countries use the default pattern.
pub fn is_valid_phone_for_country(phone: &str, country: &str) -> bool {
    match country_code(country).as_str() {
        "US" | "CA" => NORTH_AMERICAN_PHONE.is_match(phone),
        "UK" => UK_PHONE.is_match(phone),
        _ => is_valid_phone(phone, None),
    }
}

/// Luhn checksum over 13 to 19 digits. Whitespace and hyphens are ignored.
pub fn is_valid_credit_card(card_number: &str) -> bool {
    let digits: Vec<u32> = match card_number
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .map(|c| c.to_digit(10))
        .collect::<Option<Vec<u32>>>()
    {
        Some(digits) => digits,
        None => return false,
    };

    if !(13..=19).contains(&digits.len()) {
        return false;
    }

    let sum: u32 = digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &digit)| {
            if i % 2 == 1 {
                let doubled = digit * 2;
                if doubled > 9 {
                    doubled - 9
                } else {
                    doubled
                }
            } else {
                digit
            }
        })
        .sum();

    sum % 10 == 0
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordPolicy {
    #[serde(default = "default_min_length")]
    pub min_length: usize,
    #[serde(default = "default_true")]
    pub require_uppercase: bool,
    #[serde(default = "default_true")]
    pub require_lowercase: bool,
    #[serde(default = "default_true")]
    pub require_digit: bool,
    #[serde(default)]
    pub require_special: bool,
}

fn default_min_length() -> usize {
    8
}

fn default_true() -> bool {
    true
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: default_min_length(),
            require_uppercase: true,
            require_lowercase: true,
            require_digit: true,
            require_special: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PasswordCheck {
    pub valid: bool,
    pub violations: Vec<String>,
}

/// Evaluate every enabled rule; violations are reported in the order
/// length, uppercase, lowercase, digit, special.
pub fn validate_password(password: &str, policy: &PasswordPolicy) -> PasswordCheck {
    let mut violations = Vec::new();

    if password.chars().count() < policy.min_length {
        violations.push(format!(
            "Password must be at least {} characters long.",
            policy.min_length
        ));
    }

    if policy.require_uppercase && !password.chars().any(|c| c.is_ascii_uppercase()) {
        violations.push("Password must contain at least one uppercase letter.".to_string());
    }

    if policy.require_lowercase && !password.chars().any(|c| c.is_ascii_lowercase()) {
        violations.push("Password must contain at least one lowercase letter.".to_string());
    }

    if policy.require_digit && !password.chars().any(|c| c.is_ascii_digit()) {
        violations.push("Password must contain at least one number.".to_string());
    }

    if policy.require_special && !password.chars().any(|c| !c.is_ascii_alphanumeric()) {
        violations.push("Password must contain at least one special character.".to_string());
    }

    PasswordCheck {
        valid: violations.is_empty(),
        violations,
    }
}

/// Country codes compare case-insensitively, ignoring surrounding whitespace.
fn country_code(country: &str) -> String {
    country.trim().to_ascii_uppercase()
}

fn postal_pattern(country: &str) -> Option<&'static Regex> {
    match country_code(country).as_str() {
        "US" => Some(&*US_POSTAL),
        "UK" => Some(&*UK_POSTAL),
        "CA" => Some(&*CA_POSTAL),
        _ => None,
    }
}

/// Postal code check. Countries without a known format are accepted.
pub fn is_valid_postal_code(postal_code: &str, country: &str) -> bool {
    postal_pattern(country)
        .map(|re| re.is_match(postal_code))
        .unwrap_or(true)
}

/// Strict postal code check: an unsupported country is an error.
pub fn check_postal_code(postal_code: &str, country: &str) -> Result<bool> {
    let re = postal_pattern(country).ok_or_else(|| {
        Error::validation_invalid_argument(
            "country",
            format!("No postal code format for country '{}'", country),
            Some(country.to_string()),
            Some(POSTAL_COUNTRIES.iter().map(|c| c.to_string()).collect()),
        )
    })?;
    Ok(re.is_match(postal_code))
}

/// Valid iff strict decoding succeeds and re-encoding reproduces the input.
pub fn is_valid_base64(value: &str) -> bool {
    match STANDARD.decode(value) {
        Ok(decoded) => STANDARD.encode(decoded) == value,
        Err(_) => false,
    }
}

/// Letters and whitespace only, non-empty.
pub fn is_alpha_only(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphabetic() || c.is_ascii_whitespace())
}

pub fn is_alphanumeric(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_alphanumeric())
}

/// ASCII digits only, non-empty. Signs and decimal points are rejected.
pub fn is_numeric(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_digit())
}

/// Inclusive length bounds, counted in characters.
pub fn is_valid_length(value: &str, min: usize, max: usize) -> bool {
    let length = value.chars().count();
    length >= min && length <= max
}

/// Inclusive range check.
pub fn is_valid_range<T: PartialOrd>(value: T, min: T, max: T) -> bool {
    value >= min && value <= max
}

/// True when `value` parses with `format` and formats back to itself.
pub fn is_valid_date_format(value: &str, format: &str) -> bool {
    dates::matches_format(value, format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn email_accepts_common_addresses() {
        assert!(is_valid_email("john@example.com"));
        assert!(is_valid_email("first.last+tag@sub.example.co.uk"));
    }

    #[test]
    fn email_rejects_malformed() {
        assert!(!is_valid_email("invalid-email"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("john@"));
        assert!(!is_valid_email("john..doe@example.com"));
        assert!(!is_valid_email("john@-example.com"));
        assert!(!is_valid_email("john@localhost"));
    }

    #[test]
    fn url_checks() {
        assert!(is_valid_url("https://example.com"));
        assert!(is_valid_url("http://example.com:8080/path?q=1"));
        assert!(is_valid_url("mailto:someone@example.com"));
        assert!(!is_valid_url("not-a-url"));
        assert!(!is_valid_url("/relative/path"));
    }

    #[test]
    fn ip_checks() {
        assert!(is_valid_ip("192.168.1.1"));
        assert!(is_valid_ip("::1"));
        assert!(!is_valid_ip("invalid-ip"));
        assert!(!is_valid_ip("256.1.1.1"));
    }

    #[test]
    fn phone_default_pattern() {
        assert!(is_valid_phone("+14155552671", None));
        assert!(!is_valid_phone("0123", None));
        assert!(!is_valid_phone("+1 415 555", None));
    }

    #[test]
    fn phone_custom_pattern() {
        assert!(is_valid_phone("555-1234", Some(r"^\d{3}-\d{4}$")));
        assert!(!is_valid_phone("555-1234", Some(r"([unclosed")));
    }

    #[test]
    fn phone_for_country() {
        assert!(is_valid_phone_for_country("(415) 555-2671", "US"));
        assert!(is_valid_phone_for_country("+44 2071234567", "UK"));
        assert!(!is_valid_phone_for_country("12345", "CA"));
        assert!(is_valid_phone_for_country("+33612345678", "FR"));
    }

    #[test]
    fn phone_rejects_non_ascii_digits() {
        assert!(!is_valid_phone("+1٢٣٤٥٦٧٨٩٠", None));
        assert!(!is_valid_phone("+१२३४५६७८९०", None));
        assert!(!is_valid_phone_for_country("(٤١٥) ٥٥٥-٢٦٧١", "US"));
        assert!(!is_valid_phone_for_country("+44 ٢٠٧١٢٣٤٥٦٧", "UK"));
    }

    #[test]
    fn credit_card_luhn() {
        assert!(is_valid_credit_card("4111111111111111"));
        assert!(is_valid_credit_card("4111 1111 1111 1111"));
        assert!(is_valid_credit_card("4111-1111-1111-1111"));
        assert!(!is_valid_credit_card("4111111111111112"));
        assert!(!is_valid_credit_card("4111x111111111111"));
        assert!(!is_valid_credit_card("411111111111"));
        assert!(!is_valid_credit_card("٤١١١١١١١١١١١١١١١"));
    }

    #[test]
    fn password_short_reports_length_only() {
        let policy = PasswordPolicy::default();
        let check = validate_password("Sh0rt!", &policy);
        assert!(!check.valid);
        assert_eq!(
            check.violations,
            vec!["Password must be at least 8 characters long.".to_string()]
        );
    }

    #[test]
    fn password_collects_every_violation_in_order() {
        let policy = PasswordPolicy {
            require_special: true,
            ..PasswordPolicy::default()
        };
        let check = validate_password("", &policy);
        assert_eq!(check.violations.len(), 5);
        assert!(check.violations[0].contains("at least 8 characters"));
        assert!(check.violations[1].contains("uppercase"));
        assert!(check.violations[2].contains("lowercase"));
        assert!(check.violations[3].contains("number"));
        assert!(check.violations[4].contains("special"));
    }

    #[test]
    fn password_valid_when_all_rules_pass() {
        let check = validate_password("Correct1Horse", &PasswordPolicy::default());
        assert!(check.valid);
        assert!(check.violations.is_empty());
    }

    #[test]
    fn postal_codes() {
        assert!(is_valid_postal_code("12345", "US"));
        assert!(is_valid_postal_code("12345-6789", "US"));
        assert!(!is_valid_postal_code("1234", "US"));
        assert!(is_valid_postal_code("SW1A 1AA", "UK"));
        assert!(is_valid_postal_code("k1a 0b1", "CA"));
        assert!(is_valid_postal_code("anything", "ZZ"));
    }

    #[test]
    fn postal_codes_reject_non_ascii_digits() {
        assert!(!is_valid_postal_code("١٢٣٤٥", "US"));
        assert!(!is_valid_postal_code("12345-٦٧٨٩", "US"));
        assert!(!is_valid_postal_code("K1A ٠B1", "CA"));
        assert!(!is_valid_postal_code("SW١A 1AA", "UK"));
    }

    #[test]
    fn country_codes_are_case_insensitive() {
        assert!(!is_valid_postal_code("1234", "us"));
        assert!(is_valid_postal_code("12345", " us "));
        assert!(!is_valid_postal_code("12345", "ca"));
        assert!(check_postal_code("SW1A 1AA", "uk").unwrap());
        assert!(is_valid_phone_for_country("(415) 555-2671", "us"));
        assert!(!is_valid_phone_for_country("12345", " Ca "));
    }

    #[test]
    fn strict_postal_rejects_unknown_country() {
        assert!(check_postal_code("12345", "US").unwrap());
        let err = check_postal_code("12345", "ZZ").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationInvalidArgument);
    }

    #[test]
    fn base64_round_trip() {
        assert!(is_valid_base64("aGVsbG8="));
        assert!(is_valid_base64(""));
        assert!(!is_valid_base64("aGVsbG8"));
        assert!(!is_valid_base64("not base64!"));
    }

    #[test]
    fn character_class_predicates() {
        assert!(is_alpha_only("Hello World"));
        assert!(!is_alpha_only("Hello1"));
        assert!(!is_alpha_only(""));
        assert!(is_alphanumeric("abc123"));
        assert!(!is_alphanumeric("abc 123"));
        assert!(is_numeric("0042"));
        assert!(!is_numeric("-42"));
        assert!(!is_numeric(""));
    }

    #[test]
    fn bounds_are_inclusive() {
        assert!(is_valid_range(50, 1, 100));
        assert!(is_valid_range(100, 1, 100));
        assert!(!is_valid_range(150, 1, 100));
        assert!(is_valid_range(0.5, 0.0, 1.0));
        assert!(is_valid_length("abc", 3, 3));
        assert!(!is_valid_length("abcd", 1, 3));
    }

    #[test]
    fn date_format_validation() {
        assert!(is_valid_date_format("2024-12-25", "%Y-%m-%d"));
        assert!(!is_valid_date_format("invalid-date", "%Y-%m-%d"));
        assert!(!is_valid_date_format("2024-02-30", "%Y-%m-%d"));
    }
}
