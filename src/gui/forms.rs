use eframe::egui;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern"));

/// Per-field validation messages for one open form.
#[derive(Debug, Clone, Default)]
pub struct FieldErrors {
    errors: BTreeMap<&'static str, String>,
}

impl FieldErrors {
    pub fn set(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.insert(field, message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn clear(&mut self) {
        self.errors.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Render the error for `field` under its input, if any.
pub fn field_error(ui: &mut egui::Ui, errors: &FieldErrors, field: &str) {
    if let Some(message) = errors.get(field) {
        ui.colored_label(egui::Color32::LIGHT_RED, message);
    }
}

pub fn valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value.trim())
}

/// At least eight characters containing both a letter and a digit.
pub fn valid_password(value: &str) -> bool {
    value.len() >= 8
        && value.chars().any(|c| c.is_ascii_alphabetic())
        && value.chars().any(|c| c.is_ascii_digit())
}

pub fn valid_url(value: &str) -> bool {
    url::Url::parse(value.trim())
        .map(|parsed| matches!(parsed.scheme(), "http" | "https"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_pattern_accepts_plain_addresses() {
        assert!(valid_email("ana@example.test"));
        assert!(valid_email("  a.b+c@sub.domain.org "));
        assert!(!valid_email("ana@example"));
        assert!(!valid_email("ana example@test.org"));
        assert!(!valid_email(""));
    }

    #[test]
    fn password_needs_length_letter_and_digit() {
        assert!(valid_password("hunter22"));
        assert!(!valid_password("short1"));
        assert!(!valid_password("lettersonly"));
        assert!(!valid_password("12345678"));
    }

    #[test]
    fn url_requires_http_scheme() {
        assert!(valid_url("https://doc.rust-lang.org/book/"));
        assert!(valid_url("http://example.test/page"));
        assert!(!valid_url("ftp://example.test"));
        assert!(!valid_url("not a url"));
    }

    #[test]
    fn errors_track_per_field_messages() {
        let mut errors = FieldErrors::default();
        assert!(errors.is_empty());
        errors.set("email", "Email is required");
        assert_eq!(errors.get("email"), Some("Email is required"));
        assert_eq!(errors.get("password"), None);
        errors.clear();
        assert!(errors.is_empty());
    }
}
