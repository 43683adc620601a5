//! Advisory notes returned alongside mapping suggestions.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How prominently a note should be shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteKind {
    Error,
    Warning,
    Info,
}

impl NoteKind {
    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Self::Error => "✖",
            Self::Warning => "⚠",
            Self::Info => "ℹ",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

impl fmt::Display for NoteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classifies a note by keyword, case-insensitively. First match wins:
/// "missing" is an error, "merge" or "warning" a warning, anything else info.
pub fn classify_note(text: &str) -> NoteKind {
    let lower = text.to_lowercase();
    if lower.contains("missing") {
        NoteKind::Error
    } else if lower.contains("merge") || lower.contains("warning") {
        NoteKind::Warning
    } else {
        NoteKind::Info
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvisoryNote {
    pub text: String,
    pub kind: NoteKind,
}

impl AdvisoryNote {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let kind = classify_note(&text);
        Self { text, kind }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_classification() {
        assert_eq!(
            classify_note("'country_code' appears to be missing."),
            NoteKind::Error
        );
        assert_eq!(
            classify_note("'first_name' and 'last_name' can be merged into 'full_name'"),
            NoteKind::Warning
        );
        assert_eq!(classify_note("WARNING: ambiguous column"), NoteKind::Warning);
        assert_eq!(
            classify_note("Note: this is a fallback response."),
            NoteKind::Info
        );
    }

    #[test]
    fn missing_takes_precedence() {
        assert_eq!(
            classify_note("Warning: merge target is missing"),
            NoteKind::Error
        );
    }
}
