//! Crate-level error type.
//!
//! Each pipeline stage has its own detailed error ([`LexError`],
//! [`MarkupError`], [`CodegenError`], [`ReconcileError`], [`HostParseError`]);
//! [`Error`] wraps whichever one aborted the compilation. Any error aborts the
//! whole file and no partial output is produced.
//!
//! Errors that know where they happened can be rendered against the source
//! with [`Error::render`]:
//!
//! ```text
//! error: expected closing tag 'div' but was 'span'
//!  --> view.rs:3:18
//!   |
//! 3 |     let v = <div></span>;
//!   |                  ^ found: span
//! help: close every element before the end of the expression
//! ```

mod format;
mod lex;

pub use format::{ErrorFormat, SourceLocation};
pub use lex::{LexError, LexErrorKind, LexResult};

use std::fmt;

use crate::codegen::CodegenError;
use crate::markup::MarkupError;
use crate::reconcile::ReconcileError;

/// The placeholder-annotated source failed to parse as Rust.
///
/// The message is the host parser's own, unmodified.
#[derive(Debug, Clone)]
pub struct HostParseError {
    pub message: String,
    /// 1-based line in the annotated source.
    pub line: usize,
    /// 0-based column in the annotated source.
    pub column: usize,
    /// The offending line of annotated source.
    pub snippet: String,
}

impl HostParseError {
    pub fn from_syn(err: &syn::Error, annotated: &str) -> Self {
        let start = err.span().start();
        Self {
            message: err.to_string(),
            line: start.line,
            column: start.column,
            snippet: annotated
                .lines()
                .nth(start.line.saturating_sub(1))
                .unwrap_or_default()
                .to_string(),
        }
    }
}

impl fmt::Display for HostParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "failed to parse annotated source at {}:{}: {}",
            self.line, self.column, self.message
        )?;
        if !self.snippet.is_empty() {
            write!(f, "\n  --> '{}'", self.snippet.trim())?;
        }
        Ok(())
    }
}

impl std::error::Error for HostParseError {}

/// Any error that aborts a compilation.
#[derive(Debug, Clone)]
pub enum Error {
    Lex(LexError),
    Markup(MarkupError),
    Codegen(CodegenError),
    Reconcile(ReconcileError),
    HostParse(HostParseError),
    /// Byte input that is not UTF-8; carries the offset of the first bad byte.
    InvalidUtf8 { valid_up_to: usize },
}

impl Error {
    /// Byte offset in the original source, when the failing stage knows it.
    pub fn position(&self) -> Option<usize> {
        match self {
            Error::Lex(err) => Some(err.position),
            Error::Markup(err) => Some(err.position),
            Error::Codegen(err) => err.position,
            Error::Reconcile(err) => err.position,
            Error::HostParse(_) => None,
            Error::InvalidUtf8 { valid_up_to } => Some(*valid_up_to),
        }
    }

    fn summary(&self) -> String {
        match self {
            Error::Lex(err) => err.kind.description().to_string(),
            Error::Markup(err) => err.headline(),
            Error::Codegen(err) => err.summary(),
            Error::Reconcile(err) => err.summary(),
            Error::HostParse(err) => err.message.clone(),
            Error::InvalidUtf8 { .. } => "source is not valid UTF-8".to_string(),
        }
    }

    fn help(&self) -> Option<&str> {
        match self {
            Error::Lex(err) => err.help_text(),
            Error::Markup(err) => err.help_text(),
            Error::Codegen(err) => err.help_text(),
            Error::Reconcile(err) => err.kind.suggestion(),
            Error::HostParse(_) | Error::InvalidUtf8 { .. } => None,
        }
    }

    fn annotation(&self) -> Option<String> {
        match self {
            Error::Lex(err) => err.found.as_ref().map(|found| format!("found: {}", found)),
            Error::Markup(err) => err.found.as_ref().map(|found| format!("found: {}", found)),
            _ => None,
        }
    }

    /// Renders the error rustc-style against the original `source`.
    ///
    /// Errors without a position fall back to their plain message.
    pub fn render(&self, source: &str, filename: &str) -> String {
        let Some(position) = self.position() else {
            return format!("error: {}\n", self);
        };
        let summary = self.summary();
        let mut format = ErrorFormat::new(&summary, source, position).filename(filename);
        if let Some(annotation) = self.annotation() {
            format = format.annotation(annotation);
        }
        if let Some(help) = self.help() {
            format = format.help(help);
        }
        format.format()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Lex(err) => fmt::Display::fmt(err, f),
            Error::Markup(err) => fmt::Display::fmt(err, f),
            Error::Codegen(err) => fmt::Display::fmt(err, f),
            Error::Reconcile(err) => fmt::Display::fmt(err, f),
            Error::HostParse(err) => fmt::Display::fmt(err, f),
            Error::InvalidUtf8 { valid_up_to } => {
                write!(f, "source is not valid UTF-8 (first invalid byte at {})", valid_up_to)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Lex(err) => Some(err),
            Error::Markup(err) => Some(err),
            Error::Codegen(err) => Some(err),
            Error::Reconcile(err) => Some(err),
            Error::HostParse(err) => Some(err),
            Error::InvalidUtf8 { .. } => None,
        }
    }
}

impl From<LexError> for Error {
    fn from(err: LexError) -> Self {
        Error::Lex(err)
    }
}

impl From<MarkupError> for Error {
    fn from(err: MarkupError) -> Self {
        Error::Markup(err)
    }
}

impl From<CodegenError> for Error {
    fn from(err: CodegenError) -> Self {
        Error::Codegen(err)
    }
}

impl From<ReconcileError> for Error {
    fn from(err: ReconcileError) -> Self {
        Error::Reconcile(err)
    }
}

impl From<HostParseError> for Error {
    fn from(err: HostParseError) -> Self {
        Error::HostParse(err)
    }
}

impl From<std::str::Utf8Error> for Error {
    fn from(err: std::str::Utf8Error) -> Self {
        Error::InvalidUtf8 {
            valid_up_to: err.valid_up_to(),
        }
    }
}

/// Result type for compilation.
pub type Result<T> = std::result::Result<T, Error>;
