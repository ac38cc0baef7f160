//! Language negotiation for user-facing messaging.

use std::fmt;

/// Negotiated messaging language.
///
/// The platform ships bilingual reset emails; German is the house default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    De,
    En,
}

impl Language {
    /// Negotiates a language from an `Accept-Language`-style header value.
    ///
    /// Defaults to German unless the header starts with `en`.
    pub fn negotiate(header: Option<&str>) -> Self {
        match header {
            Some(value) if value.trim().to_ascii_lowercase().starts_with("en") => Language::En,
            _ => Language::De,
        }
    }

    /// Returns the lowercase ISO code, e.g. `"de"`.
    pub fn code(&self) -> &'static str {
        match self {
            Language::De => "de",
            Language::En => "en",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_header_defaults_to_german() {
        assert_eq!(Language::negotiate(None), Language::De);
    }

    #[test]
    fn english_prefix_selects_english() {
        assert_eq!(Language::negotiate(Some("en")), Language::En);
        assert_eq!(Language::negotiate(Some("en-US,en;q=0.9")), Language::En);
        assert_eq!(Language::negotiate(Some("EN-GB")), Language::En);
    }

    #[test]
    fn anything_else_stays_german() {
        assert_eq!(Language::negotiate(Some("de-CH")), Language::De);
        assert_eq!(Language::negotiate(Some("fr-FR")), Language::De);
        assert_eq!(Language::negotiate(Some("")), Language::De);
    }
}
