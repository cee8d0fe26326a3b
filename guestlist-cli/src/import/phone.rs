//! Phone number canonicalization

use once_cell::sync::Lazy;
use regex::Regex;

/// Values that look like a phone number: optional `+`, then digits, spaces, dashes, parens
static PHONE_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9\s\-()]+$").expect("phone pattern is valid"));

/// Whether a raw cell value looks like a phone number
pub fn looks_like_phone(value: &str) -> bool {
    let value = value.trim();
    !value.is_empty() && value.chars().any(|c| c.is_ascii_digit()) && PHONE_SHAPE.is_match(value)
}

/// Canonicalizes phone numbers to `+<calling code><digits>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneFormatter {
    calling_code: String,
}

impl Default for PhoneFormatter {
    fn default() -> Self {
        Self::new("234")
    }
}

impl PhoneFormatter {
    /// `calling_code` may be given with or without a leading `+`
    pub fn new(calling_code: impl AsRef<str>) -> Self {
        let calling_code = calling_code
            .as_ref()
            .chars()
            .filter(|c| c.is_ascii_digit())
            .collect();
        Self { calling_code }
    }

    pub fn calling_code(&self) -> &str {
        &self.calling_code
    }

    /// Canonicalize a raw value; `None` when nothing phone-like remains
    ///
    /// - `08031234567` -> `+2348031234567` (trunk zero replaced)
    /// - `2348031234567` -> `+2348031234567`
    /// - `8031234567` -> `+2348031234567`
    /// - `+234 803 123 4567` -> `+2348031234567`
    ///
    /// A leading `+` is stripped like any other separator, so the calling code
    /// rules apply to every value.
    pub fn canonicalize(&self, raw: &str) -> Option<String> {
        let digits: String = raw
            .trim()
            .chars()
            .filter(|c| !c.is_whitespace() && !matches!(c, '(' | ')' | '+' | '-'))
            .collect();

        if digits.is_empty() {
            return None;
        }

        let canonical = if let Some(local) = digits.strip_prefix('0') {
            format!("+{}{}", self.calling_code, local)
        } else if digits.starts_with(&self.calling_code) {
            format!("+{}", digits)
        } else {
            format!("+{}{}", self.calling_code, digits)
        };

        Some(canonical)
    }
}
