//! Embedded-expression tokenizer.
//!
//! Splits attribute values and text content into literal text and `{code}`
//! segments. Embedded code may carry a one-letter modifier before a colon:
//!
//! | Syntax      | Meaning                                  |
//! |-------------|------------------------------------------|
//! | `{expr}`    | the expression itself                    |
//! | `{s:expr}`  | the expression wrapped in a text call    |
//!
//! Literal runs are trimmed and empty runs dropped; embedded code is kept
//! exactly as written.

#[cfg(test)]
mod tests;

use std::fmt;

use crate::error::{LexError, LexErrorKind, LexResult};

/// A directive attached to an embedded segment with `x:`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modifier {
    /// `s:` - render the value as text.
    Text,
}

impl Modifier {
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter {
            's' => Some(Self::Text),
            _ => None,
        }
    }

    pub fn letter(self) -> char {
        match self {
            Self::Text => 's',
        }
    }
}

/// One piece of a tokenized string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Embedded {
        code: String,
        modifier: Option<Modifier>,
    },
}

impl fmt::Display for Segment {
    /// Writes the segment back in source form, re-delimiting embedded code.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Literal(text) => f.write_str(text),
            Segment::Embedded {
                code,
                modifier: Some(modifier),
            } => write!(f, "{{{}:{}}}", modifier.letter(), code),
            Segment::Embedded {
                code,
                modifier: None,
            } => write!(f, "{{{}}}", code),
        }
    }
}

/// Splits `input` into literal and embedded segments.
///
/// An input with no content yields a single empty literal.
pub fn tokenize_segments(input: &str) -> LexResult<Vec<Segment>> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut open: Option<usize> = None;

    for (pos, c) in input.char_indices() {
        match (c, open) {
            ('{', Some(opened_at)) => {
                return Err(LexError::new(LexErrorKind::NestedEmbeddedCode, pos)
                    .with_snippet(input)
                    .opened_at(opened_at));
            }
            ('{', None) => {
                flush_literal(&mut segments, &mut current);
                open = Some(pos);
            }
            ('}', Some(opened_at)) => {
                if !current.is_empty() {
                    segments.push(embedded(&current, opened_at + 1)?);
                }
                current.clear();
                open = None;
            }
            ('}', None) => {
                return Err(LexError::new(LexErrorKind::UnexpectedCloseBrace, pos).with_snippet(input));
            }
            ('\n', Some(opened_at)) => {
                return Err(LexError::new(LexErrorKind::NewlineInEmbeddedCode, pos)
                    .with_snippet(input)
                    .opened_at(opened_at));
            }
            ('\n', None) => flush_literal(&mut segments, &mut current),
            _ => current.push(c),
        }
    }

    if let Some(opened_at) = open {
        return Err(LexError::unterminated_embedded(input.len(), opened_at, input));
    }
    flush_literal(&mut segments, &mut current);

    if segments.is_empty() {
        segments.push(Segment::Literal(String::new()));
    }
    Ok(segments)
}

fn flush_literal(segments: &mut Vec<Segment>, current: &mut String) {
    let text = current.trim();
    if !text.is_empty() {
        segments.push(Segment::Literal(text.to_string()));
    }
    current.clear();
}

/// Builds an embedded segment, splitting off a `x:` modifier.
///
/// `a::b` is a path, not a modifier.
fn embedded(code: &str, position: usize) -> LexResult<Segment> {
    let mut chars = code.chars();
    if let (Some(letter @ 'a'..='z'), Some(':')) = (chars.next(), chars.next()) {
        let rest = &code[2..];
        if !rest.is_empty() && !rest.starts_with(':') {
            let modifier = Modifier::from_letter(letter)
                .ok_or_else(|| LexError::invalid_modifier(position, letter, code))?;
            return Ok(Segment::Embedded {
                code: rest.to_string(),
                modifier: Some(modifier),
            });
        }
    }
    Ok(Segment::Embedded {
        code: code.to_string(),
        modifier: None,
    })
}
