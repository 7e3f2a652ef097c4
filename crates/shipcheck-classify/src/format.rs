//! # Format Validators
//!
//! Pure checks over user-entered strings: email addresses, phone numbers,
//! and Harmonized System codes.

use std::sync::OnceLock;

use regex::Regex;

const EMAIL_PATTERN: &str = r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9](?:[A-Za-z0-9\-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9\-]*[A-Za-z0-9])?)*\.[A-Za-z]{2,}$";

fn email_regex() -> Option<&'static Regex> {
    static EMAIL: OnceLock<Option<Regex>> = OnceLock::new();
    EMAIL
        .get_or_init(|| match Regex::new(EMAIL_PATTERN) {
            Ok(re) => Some(re),
            Err(e) => {
                tracing::error!(error = %e, "email pattern failed to compile");
                None
            }
        })
        .as_ref()
}

/// True if `email` has the standard `local@domain.tld` shape.
///
/// Returns `true` if the pattern itself is unavailable, so a broken
/// validator never produces diagnostics.
pub fn is_valid_email(email: &str) -> bool {
    match email_regex() {
        Some(re) => re.is_match(email.trim()),
        None => true,
    }
}

/// Number of digits in `phone`, ignoring spaces, dashes, parentheses, `+`.
pub fn significant_digits(phone: &str) -> usize {
    phone.chars().filter(char::is_ascii_digit).count()
}

/// True if `phone` has at least `min_digits` digits.
pub fn is_valid_phone(phone: &str, min_digits: usize) -> bool {
    significant_digits(phone) >= min_digits
}

/// HS code with dots and whitespace removed (`"8471.30"` → `"847130"`).
pub fn normalize_hs_code(code: &str) -> String {
    code.chars()
        .filter(|c| !c.is_whitespace() && *c != '.')
        .collect()
}

/// True if the normalized HS code is 6 to 10 digits.
///
/// Six digits is the international HS subheading; national tariff lines
/// extend it to eight or ten.
pub fn is_valid_hs_code(code: &str) -> bool {
    let normalized = normalize_hs_code(code);
    (6..=10).contains(&normalized.len()) && normalized.bytes().all(|b| b.is_ascii_digit())
}

/// True if the normalized HS code starts with any of `prefixes`.
///
/// Prefixes are compared digit-wise, so `"27"` matches chapter 27 and
/// `"2710"` matches heading 27.10 only.
pub fn hs_code_matches_any<S: AsRef<str>>(code: &str, prefixes: &[S]) -> bool {
    let normalized = normalize_hs_code(code);
    !normalized.is_empty()
        && prefixes.iter().any(|p| {
            let p = normalize_hs_code(p.as_ref());
            !p.is_empty() && normalized.starts_with(&p)
        })
}
