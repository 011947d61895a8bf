//! Error types for code generation.
//!
//! Codegen works on trees that already parsed, so its errors are about values
//! that cannot become arguments: too many segments where one is allowed, a
//! spread that is not a single expression, or code that is not a Rust
//! expression.

use std::fmt;

/// The kind of codegen error that occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodegenErrorKind {
    /// A value that must be one argument tokenized into several segments.
    TooManySegments,
    /// The spread attribute is not exactly one `{expression}`.
    SpreadNotEmbedded,
    /// Embedded code did not parse as a Rust expression.
    InvalidExpression,
}

impl CodegenErrorKind {
    /// Returns a human-readable description of this error kind.
    pub fn description(&self) -> &'static str {
        match self {
            Self::TooManySegments => "only a single expression is allowed",
            Self::SpreadNotEmbedded => "spread attribute must be a single embedded expression",
            Self::InvalidExpression => "embedded code is not a valid expression",
        }
    }

    /// Returns a suggested fix for this error kind.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::TooManySegments => {
                Some("build the value with format!() and embed it as one {expression}")
            }
            Self::SpreadNotEmbedded => Some("write the value as {expression}"),
            Self::InvalidExpression => None,
        }
    }
}

/// A codegen error with the offending raw value.
#[derive(Debug, Clone)]
pub struct CodegenError {
    /// The kind of error.
    pub kind: CodegenErrorKind,
    /// Where the value came from, e.g. "attribute 'title' of <div>".
    pub context: String,
    /// The offending raw text.
    pub found: String,
    /// The host parser's message, for invalid expressions.
    pub detail: Option<String>,
    /// Optional help text for fixing the error.
    pub help: Option<String>,
    /// Byte offset of the markup region in the original source.
    pub position: Option<usize>,
}

impl CodegenError {
    /// Creates a new codegen error.
    pub fn new(kind: CodegenErrorKind, found: &str) -> Self {
        Self {
            kind,
            context: String::new(),
            found: found.to_string(),
            detail: None,
            help: None,
            position: None,
        }
    }

    pub fn too_many_segments(context: &str, value: &str) -> Self {
        Self::new(CodegenErrorKind::TooManySegments, value).with_context(context)
    }

    pub fn spread_not_embedded(context: &str, value: &str) -> Self {
        Self::new(CodegenErrorKind::SpreadNotEmbedded, value).with_context(context)
    }

    pub fn invalid_expression(code: &str, err: &syn::Error) -> Self {
        let mut error = Self::new(CodegenErrorKind::InvalidExpression, code);
        error.detail = Some(err.to_string());
        error
    }

    /// Adds context to the error.
    pub fn with_context(mut self, context: &str) -> Self {
        self.context = context.to_string();
        self
    }

    /// Adds help text to the error.
    pub fn with_help(mut self, help: &str) -> Self {
        self.help = Some(help.to_string());
        self
    }

    /// Sets the byte offset of the region the error belongs to, unless already set.
    pub fn at(mut self, position: usize) -> Self {
        self.position.get_or_insert(position);
        self
    }

    /// Returns the help text, falling back to the kind's suggestion.
    pub fn help_text(&self) -> Option<&str> {
        self.help.as_deref().or_else(|| self.kind.suggestion())
    }

    /// One-line description including context and the offending text.
    pub fn summary(&self) -> String {
        let mut msg = self.kind.description().to_string();
        if !self.context.is_empty() {
            msg.push_str(&format!(" in {}", self.context));
        }
        msg.push_str(&format!(": '{}'", self.found));
        if let Some(ref detail) = self.detail {
            msg.push_str(&format!(" ({})", detail));
        }
        msg
    }

    /// Converts the error to a user-friendly message.
    pub fn to_message(&self) -> String {
        let mut msg = format!("Codegen error: {}", self.summary());
        if let Some(position) = self.position {
            msg.push_str(&format!(" (region at position {})", position));
        }
        if let Some(help) = self.help_text() {
            msg.push_str(&format!("\n  help: {}", help));
        }
        msg
    }
}

impl fmt::Display for CodegenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_message())
    }
}

impl std::error::Error for CodegenError {}

/// Result type for codegen operations.
pub type CodegenResult<T> = Result<T, CodegenError>;
