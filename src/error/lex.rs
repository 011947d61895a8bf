//! Error types for the source scanner and the embedded-expression tokenizer.
//!
//! Both stages work on characters rather than tags, so they share one error
//! type. Positions are byte offsets into the text that was being lexed; the
//! scanner rebases segment errors onto the whole file where it knows the
//! offset.

use std::fmt;

/// The kind of lexical error that occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexErrorKind {
    /// Unterminated string or character literal - missing closing quote.
    UnterminatedString,
    /// Unterminated raw string - missing `"` followed by the opening `#` run.
    UnterminatedRawString,
    /// An embedded code block was opened with `{` but never closed.
    UnterminatedEmbeddedCode,
    /// A newline appeared inside an embedded code block.
    NewlineInEmbeddedCode,
    /// A `{` appeared inside an already open embedded code block.
    NestedEmbeddedCode,
    /// A `}` appeared with no open embedded code block.
    UnexpectedCloseBrace,
    /// The one-letter modifier before `:` is not a known modifier.
    InvalidModifier,
}

impl LexErrorKind {
    /// Returns a human-readable description of this error kind.
    pub fn description(&self) -> &'static str {
        match self {
            Self::UnterminatedString => "unterminated string literal",
            Self::UnterminatedRawString => "unterminated raw string literal",
            Self::UnterminatedEmbeddedCode => "missing closing '}' for embedded code",
            Self::NewlineInEmbeddedCode => "illegal character '\\n' in embedded code block",
            Self::NestedEmbeddedCode => "cannot nest expressions in embedded code",
            Self::UnexpectedCloseBrace => "unexpected '}'",
            Self::InvalidModifier => "invalid expression modifier",
        }
    }

    /// Returns a suggested fix for this error kind.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::UnterminatedString => Some("add the closing quote"),
            Self::UnterminatedRawString => {
                Some("close the raw string with \" followed by the same number of #")
            }
            Self::UnterminatedEmbeddedCode => Some("add } to close the embedded code"),
            Self::NewlineInEmbeddedCode => Some("keep embedded code on a single line"),
            Self::NestedEmbeddedCode => {
                Some("move the inner expression into a variable before the markup")
            }
            Self::UnexpectedCloseBrace => Some("remove the } or open the block with {"),
            Self::InvalidModifier => Some("the only supported modifier is `s:` (render as text)"),
        }
    }
}

/// A detailed lexical error with context information.
#[derive(Debug, Clone)]
pub struct LexError {
    /// The kind of error.
    pub kind: LexErrorKind,
    /// Byte position in the input where the error occurred.
    pub position: usize,
    /// Context describing what was being lexed.
    pub context: String,
    /// The offending raw text.
    pub snippet: String,
    /// What was actually found.
    pub found: Option<String>,
    /// Optional help text for fixing the error.
    pub help: Option<String>,
    /// Position where a construct was opened (for unterminated errors).
    pub opened_at: Option<usize>,
}

impl LexError {
    /// Creates a new lexical error.
    pub fn new(kind: LexErrorKind, position: usize) -> Self {
        Self {
            kind,
            position,
            context: String::new(),
            snippet: String::new(),
            found: None,
            help: None,
            opened_at: None,
        }
    }

    /// Creates an "unterminated string" error for a literal opened with `quote`.
    pub fn unterminated_string(position: usize, opened_at: usize, quote: char) -> Self {
        Self::new(LexErrorKind::UnterminatedString, position)
            .with_context(&format!("literal starting with {}", quote))
            .with_found("end of input")
            .opened_at(opened_at)
    }

    /// Creates an "unterminated raw string" error for a raw string opened with `hashes` `#`s.
    pub fn unterminated_raw_string(position: usize, opened_at: usize, hashes: usize) -> Self {
        Self::new(LexErrorKind::UnterminatedRawString, position)
            .with_context(&format!("raw string with {} '#'", hashes))
            .with_found("end of input")
            .opened_at(opened_at)
    }

    /// Creates an "unterminated embedded code" error.
    pub fn unterminated_embedded(position: usize, opened_at: usize, input: &str) -> Self {
        Self::new(LexErrorKind::UnterminatedEmbeddedCode, position)
            .with_context("embedded code")
            .with_snippet(input)
            .with_found("end of input")
            .opened_at(opened_at)
    }

    /// Creates an error for an invalid modifier letter.
    pub fn invalid_modifier(position: usize, letter: char, code: &str) -> Self {
        Self::new(LexErrorKind::InvalidModifier, position)
            .with_context("embedded code")
            .with_snippet(code)
            .with_found(&format!("'{}'", letter))
    }

    /// Adds context to the error.
    pub fn with_context(mut self, context: &str) -> Self {
        self.context = context.to_string();
        self
    }

    /// Adds the offending raw text to the error.
    pub fn with_snippet(mut self, snippet: &str) -> Self {
        self.snippet = snippet.to_string();
        self
    }

    /// Adds the found token to the error.
    pub fn with_found(mut self, found: &str) -> Self {
        self.found = Some(found.to_string());
        self
    }

    /// Adds help text to the error.
    pub fn with_help(mut self, help: &str) -> Self {
        self.help = Some(help.to_string());
        self
    }

    /// Sets the position where the construct was opened.
    pub fn opened_at(mut self, pos: usize) -> Self {
        self.opened_at = Some(pos);
        self
    }

    /// Shifts every position by `base`, for errors raised on a slice of a larger input.
    pub fn offset_by(mut self, base: usize) -> Self {
        self.position += base;
        self.opened_at = self.opened_at.map(|pos| pos + base);
        self
    }

    /// Returns the help text, falling back to the kind's suggestion.
    pub fn help_text(&self) -> Option<&str> {
        self.help.as_deref().or_else(|| self.kind.suggestion())
    }

    /// Converts the error to a user-friendly message.
    pub fn to_message(&self) -> String {
        let mut msg = format!("Lex error at position {}: ", self.position);
        msg.push_str(self.kind.description());

        if let Some(ref found) = self.found {
            msg.push_str(&format!(", found {}", found));
        }

        if !self.context.is_empty() {
            msg.push_str(&format!(" while lexing {}", self.context));
        }

        if let Some(opened) = self.opened_at {
            msg.push_str(&format!(" (opened at position {})", opened));
        }

        if !self.snippet.is_empty() {
            msg.push_str(&format!("\n  --> '{}'", self.snippet));
        }

        if let Some(help) = self.help_text() {
            msg.push_str(&format!("\n  help: {}", help));
        }

        msg
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_message())
    }
}

impl std::error::Error for LexError {}

/// Result type for lexing operations.
pub type LexResult<T> = Result<T, LexError>;
