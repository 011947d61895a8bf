//! Markup tree parser.
//!
//! Given text positioned at a candidate `<`, decides whether a markup region
//! starts there and, if so, builds its [`TagTree`] and reports how many bytes
//! the region spans. Nesting is tracked with an explicit stack of open
//! elements; an element is attached to its parent only once its closing tag
//! has been seen.
//!
//! ## Region boundaries
//!
//! A region runs from the opening `<` through the `>` of the tag that closes
//! the outermost element (or the `/>` of a self-closing root). Nothing after
//! that is read, so statement punctuation following the region is left for
//! the host language:
//!
//! ```text
//! let view = <p>{count} items</p>;
//!            ^^^^^^^^^^^^^^^^^^^^ captured
//! ```
//!
//! Text that does not begin with a tag is "not markup" and yields `None`,
//! which is how `a < b` and `x << y` fall through untouched.

mod entities;
mod errors;
mod stack;
mod tokenizer;
mod tree;

#[cfg(test)]
mod tests;

pub use errors::{MarkupError, MarkupErrorKind, MarkupResult};
pub use tree::{Attribute, Element, TagTree, Text};

use stack::TagStack;
use tokenizer::{Token, Tokenizer};

/// A completed markup region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Captured {
    /// The root element of the region.
    pub root: Element,
    /// Bytes consumed, from the opening `<` through the final `>`.
    pub len: usize,
}

impl Captured {
    /// The raw text of the region within the input it was parsed from.
    pub fn span<'a>(&self, input: &'a str) -> &'a str {
        &input[..self.len]
    }
}

/// Parses the markup region at the start of `input`, if there is one.
///
/// Returns `Ok(None)` when `input` does not open with a tag.
pub fn parse_markup(input: &str) -> MarkupResult<Option<Captured>> {
    let mut tokenizer = Tokenizer::new(input);
    if !tokenizer.at_tag_open() {
        return Ok(None);
    }

    let mut stack = TagStack::new();
    loop {
        let token_start = tokenizer.position();
        let Some(token) = tokenizer.next_token()? else {
            break;
        };

        match token {
            Token::Comment => {}
            Token::Text(raw) => {
                let decoded = entities::decode(raw);
                let text = decoded.trim();
                if text.is_empty() {
                    continue;
                }
                let Some(open) = stack.innermost() else {
                    return Ok(None);
                };
                if text.starts_with(';') {
                    return Err(MarkupError::trailing_content(token_start, open, text));
                }
                stack.push_text(Text::new(text));
            }
            Token::StartTag {
                name,
                attributes,
                self_closing,
            } => {
                let element = Element::new(name, attributes);
                if !self_closing {
                    stack.open(element);
                } else if let Some(root) = stack.close(element) {
                    let len = tokenizer.position();
                    return Ok(Some(Captured { root, len }));
                }
            }
            Token::EndTag { name } => {
                let Some(element) = stack.pop() else {
                    return Err(MarkupError::stray_closing_tag(token_start, &name)
                        .with_snippet(&input[token_start..tokenizer.position()]));
                };
                if element.name != name {
                    return Err(MarkupError::tag_mismatch(token_start, &element.name, &name)
                        .with_snippet(&input[..tokenizer.position()]));
                }
                if let Some(root) = stack.close(element) {
                    let len = tokenizer.position();
                    return Ok(Some(Captured { root, len }));
                }
            }
        }
    }

    match stack.innermost() {
        Some(open) => Err(MarkupError::unexpected_eof(input.len(), open).with_snippet(input)),
        None => Ok(None),
    }
}
