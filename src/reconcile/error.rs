//! Error types for placeholder reconciliation.

use std::fmt;

/// The kind of reconcile error that occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileErrorKind {
    /// A placeholder refers to an id the table does not have.
    UnknownId,
    /// A call to the placeholder path is not `path(<int>, "<text>")`.
    MalformedPlaceholder,
    /// A well-formed placeholder call that does not carry its region's text,
    /// or a second call for an id already replaced.
    ForeignPlaceholder,
    /// A captured region sits where no expression can be rewritten.
    UnplacedRegion,
}

impl ReconcileErrorKind {
    /// Returns a human-readable description of this error kind.
    pub fn description(&self) -> &'static str {
        match self {
            Self::UnknownId => "referenced html id not found",
            Self::MalformedPlaceholder => "invalid placeholder call, must have an integer id and a string",
            Self::ForeignPlaceholder => "placeholder call does not belong to a captured region",
            Self::UnplacedRegion => "markup region is not in an expression position",
        }
    }

    /// Returns a suggested fix for this error kind.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::UnknownId | Self::MalformedPlaceholder | Self::ForeignPlaceholder => {
                Some("placeholder calls are generated; do not write them by hand")
            }
            Self::UnplacedRegion => Some(
                "move the markup into a let binding, return value, argument or block tail",
            ),
        }
    }
}

/// A reconcile error.
#[derive(Debug, Clone)]
pub struct ReconcileError {
    /// The kind of error.
    pub kind: ReconcileErrorKind,
    /// The placeholder id involved, when known.
    pub id: Option<usize>,
    /// Byte offset of the region in the original source, when known.
    pub position: Option<usize>,
    /// The offending placeholder call or captured text.
    pub snippet: String,
}

impl ReconcileError {
    pub fn new(kind: ReconcileErrorKind) -> Self {
        Self {
            kind,
            id: None,
            position: None,
            snippet: String::new(),
        }
    }

    pub fn unknown_id(id: usize, snippet: &str) -> Self {
        Self::new(ReconcileErrorKind::UnknownId)
            .with_id(id)
            .with_snippet(snippet)
    }

    pub fn foreign(id: usize, snippet: &str) -> Self {
        Self::new(ReconcileErrorKind::ForeignPlaceholder)
            .with_id(id)
            .with_snippet(snippet)
    }

    pub fn malformed(snippet: &str) -> Self {
        Self::new(ReconcileErrorKind::MalformedPlaceholder).with_snippet(snippet)
    }

    pub fn unplaced(id: usize, position: usize, text: &str) -> Self {
        let mut err = Self::new(ReconcileErrorKind::UnplacedRegion)
            .with_id(id)
            .with_snippet(text);
        err.position = Some(position);
        err
    }

    pub fn with_id(mut self, id: usize) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_snippet(mut self, snippet: &str) -> Self {
        self.snippet = snippet.to_string();
        self
    }

    pub fn summary(&self) -> String {
        match self.id {
            Some(id) => format!("{} (id {})", self.kind.description(), id),
            None => self.kind.description().to_string(),
        }
    }

    /// Converts the error to a user-friendly message.
    pub fn to_message(&self) -> String {
        let mut msg = format!("Reconcile error: {}", self.summary());
        if let Some(position) = self.position {
            msg.push_str(&format!(" at position {}", position));
        }
        if !self.snippet.is_empty() {
            msg.push_str(&format!("\n  --> '{}'", self.snippet));
        }
        if let Some(help) = self.kind.suggestion() {
            msg.push_str(&format!("\n  help: {}", help));
        }
        msg
    }
}

impl fmt::Display for ReconcileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_message())
    }
}

impl std::error::Error for ReconcileError {}
