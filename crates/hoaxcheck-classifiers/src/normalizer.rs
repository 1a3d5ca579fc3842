//! Text normalization applied before vectorization
//!
//! The steps run in a fixed order. URLs are removed before punctuation so a
//! link never fragments into stray tokens like `http fakenews`.

use hoaxcheck_core::Result;
use regex::Regex;
use std::fmt;

/// Text that went through [`TextNormalizer::normalize`]
///
/// Lowercase, free of URLs, ASCII punctuation and digits, single-spaced and
/// trimmed. Only the normalizer can construct one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedText(String);

impl NormalizedText {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for NormalizedText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NormalizedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Deterministic text-cleaning transform
#[derive(Debug, Clone)]
pub struct TextNormalizer {
    url_regex: Regex,
    digit_regex: Regex,
    whitespace_regex: Regex,
}

impl TextNormalizer {
    /// Create a new normalizer
    pub fn new() -> Result<Self> {
        Ok(Self {
            url_regex: Regex::new(r"(?:https?://|www\.)\S*").map_err(|e| {
                hoaxcheck_core::Error::config(format!("Failed to compile URL regex: {}", e))
            })?,
            digit_regex: Regex::new(r"\d+").map_err(|e| {
                hoaxcheck_core::Error::config(format!("Failed to compile digit regex: {}", e))
            })?,
            whitespace_regex: Regex::new(r"\s+").map_err(|e| {
                hoaxcheck_core::Error::config(format!("Failed to compile whitespace regex: {}", e))
            })?,
        })
    }

    /// Normalize raw text. Never fails; empty input yields empty output.
    pub fn normalize(&self, raw: &str) -> NormalizedText {
        let text = raw.to_lowercase();
        let text = self.url_regex.replace_all(&text, " ");
        let text: String = text.chars().filter(|c| !c.is_ascii_punctuation()).collect();
        let text = self.digit_regex.replace_all(&text, "");
        let text = self.whitespace_regex.replace_all(&text, " ");

        NormalizedText(text.trim().to_string())
    }

    /// Normalize any displayable value by formatting it first
    pub fn normalize_display<T: fmt::Display + ?Sized>(&self, value: &T) -> NormalizedText {
        self.normalize(&value.to_string())
    }
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new().expect("Failed to create text normalizer")
    }
}
