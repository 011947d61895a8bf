//! Error types for the markup tree parser.

use std::fmt;

/// The kind of markup error that occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkupErrorKind {
    /// A closing tag does not match the innermost open element.
    TagMismatch,
    /// Input ended while elements were still open.
    UnexpectedEof,
    /// Statement content (`;`) appeared before the open element was closed.
    TrailingContent,
    /// A closing tag appeared with no open element.
    StrayClosingTag,
    /// A start or end tag is missing its `>`.
    UnterminatedTag,
    /// A `<!--` comment is missing its `-->`.
    UnterminatedComment,
    /// A quoted attribute value is missing its closing quote.
    UnterminatedAttributeValue,
}

impl MarkupErrorKind {
    /// Returns a human-readable description of this error kind.
    pub fn description(&self) -> &'static str {
        match self {
            Self::TagMismatch => "mismatched closing tag",
            Self::UnexpectedEof => "unexpected end of input",
            Self::TrailingContent => "trailing content before closing tag",
            Self::StrayClosingTag => "closing tag with no open element",
            Self::UnterminatedTag => "unterminated tag",
            Self::UnterminatedComment => "unterminated markup comment",
            Self::UnterminatedAttributeValue => "unterminated attribute value",
        }
    }

    /// Returns a suggested fix for this error kind.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::TagMismatch | Self::UnexpectedEof | Self::TrailingContent => {
                Some("close every element before the end of the expression")
            }
            Self::StrayClosingTag => Some("remove the closing tag or add its opening tag"),
            Self::UnterminatedTag => Some("add > to close the tag"),
            Self::UnterminatedComment => Some("add --> to close the comment"),
            Self::UnterminatedAttributeValue => Some("add the closing quote to the attribute value"),
        }
    }
}

/// A markup error with the tags involved and the offending raw text.
#[derive(Debug, Clone)]
pub struct MarkupError {
    /// The kind of error.
    pub kind: MarkupErrorKind,
    /// Byte position of the error.
    pub position: usize,
    /// The closing tag name that was expected, if any.
    pub expected: Option<String>,
    /// What was actually found.
    pub found: Option<String>,
    /// The offending raw text.
    pub snippet: String,
    /// Help text that overrides the kind's suggestion.
    pub help: Option<String>,
}

impl MarkupError {
    /// Creates a new markup error.
    pub fn new(kind: MarkupErrorKind, position: usize) -> Self {
        Self {
            kind,
            position,
            expected: None,
            found: None,
            snippet: String::new(),
            help: None,
        }
    }

    /// `</found>` closed an element that was opened as `<expected>`.
    pub fn tag_mismatch(position: usize, expected: &str, found: &str) -> Self {
        Self::new(MarkupErrorKind::TagMismatch, position)
            .with_expected(expected)
            .with_found(found)
    }

    /// Input ended while `<expected>` was still open.
    pub fn unexpected_eof(position: usize, expected: &str) -> Self {
        Self::new(MarkupErrorKind::UnexpectedEof, position).with_expected(expected)
    }

    /// Statement content was found while `<expected>` was still open.
    pub fn trailing_content(position: usize, expected: &str, content: &str) -> Self {
        Self::new(MarkupErrorKind::TrailingContent, position)
            .with_expected(expected)
            .with_snippet(content)
    }

    /// `</found>` appeared with nothing open.
    pub fn stray_closing_tag(position: usize, found: &str) -> Self {
        Self::new(MarkupErrorKind::StrayClosingTag, position).with_found(found)
    }

    /// Adds the expected closing tag name.
    pub fn with_expected(mut self, expected: &str) -> Self {
        self.expected = Some(expected.to_string());
        self
    }

    /// Adds what was found.
    pub fn with_found(mut self, found: &str) -> Self {
        self.found = Some(found.to_string());
        self
    }

    /// Adds the offending raw text.
    pub fn with_snippet(mut self, snippet: &str) -> Self {
        self.snippet = snippet.to_string();
        self
    }

    /// Adds help text to the error.
    pub fn with_help(mut self, help: &str) -> Self {
        self.help = Some(help.to_string());
        self
    }

    /// Returns the help text, falling back to the kind's suggestion.
    pub fn help_text(&self) -> Option<&str> {
        self.help.as_deref().or_else(|| self.kind.suggestion())
    }

    /// Shifts the position by `base`, for errors raised on a slice of a larger input.
    pub fn offset_by(mut self, base: usize) -> Self {
        self.position += base;
        self
    }

    /// The message without position or snippet.
    pub fn headline(&self) -> String {
        let expected = self.expected.as_deref().unwrap_or_default();
        let found = self.found.as_deref().unwrap_or_default();
        match self.kind {
            MarkupErrorKind::TagMismatch => format!(
                "expected closing tag '{}' but was '{}'",
                expected, found
            ),
            MarkupErrorKind::UnexpectedEof => format!(
                "unexpected end of input, expected closing tag '{}'",
                expected
            ),
            MarkupErrorKind::TrailingContent => format!(
                "expected closing tag '{}', found trailing content",
                expected
            ),
            MarkupErrorKind::StrayClosingTag => format!(
                "unexpected closing tag '{}' with no open element",
                found
            ),
            _ => self.kind.description().to_string(),
        }
    }

    /// Converts the error to a user-friendly message.
    pub fn to_message(&self) -> String {
        let mut msg = self.headline();
        msg.push_str(&format!(" at position {}", self.position));

        if !self.snippet.is_empty() {
            msg.push_str(&format!("\n  --> '{}'", self.snippet));
        }
        if let Some(help) = &self.help {
            msg.push_str(&format!("\n  help: {}", help));
        }

        msg
    }
}

impl fmt::Display for MarkupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_message())
    }
}

impl std::error::Error for MarkupError {}

/// Result type for markup parsing.
pub type MarkupResult<T> = Result<T, MarkupError>;
