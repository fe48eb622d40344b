//! Input aggregation: manual text + extracted document text

use serde::{Deserialize, Serialize};

/// Separator placed between manual and extracted text
pub const SOURCE_SEPARATOR: &str = "\n\n";

/// Marker appended to truncated previews
pub const TRUNCATION_MARKER: &str = "...";

/// Word and character counts of a text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextStats {
    /// Whitespace-delimited tokens
    pub words: usize,
    /// Unicode scalar values
    pub chars: usize,
}

impl TextStats {
    pub fn of(text: &str) -> Self {
        Self {
            words: text.split_whitespace().count(),
            chars: text.chars().count(),
        }
    }
}

/// The text sent to the model: trimmed manual text first, then trimmed
/// extracted text, joined by a blank line when both are present
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FinalText(String);

impl FinalText {
    pub fn combine(manual: &str, extracted: &str) -> Self {
        let manual = manual.trim();
        let extracted = extracted.trim();

        let text = match (manual.is_empty(), extracted.is_empty()) {
            (true, true) => String::new(),
            (false, true) => manual.to_string(),
            (true, false) => extracted.to_string(),
            (false, false) => format!("{}{}{}", manual, SOURCE_SEPARATOR, extracted),
        };
        Self(text)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Length in characters
    pub fn char_len(&self) -> usize {
        self.0.chars().count()
    }

    pub fn stats(&self) -> TextStats {
        TextStats::of(&self.0)
    }
}

/// First `limit` characters of `text`, plus whether anything was cut
pub fn preview(text: &str, limit: usize) -> (String, bool) {
    match text.char_indices().nth(limit) {
        Some((cut, _)) => (format!("{}{}", &text[..cut], TRUNCATION_MARKER), true),
        None => (text.to_string(), false),
    }
}
