//! Streaming tag tokenizer over the text of a candidate markup region.
//!
//! The tokenizer knows nothing about nesting; it yields start tags, end tags,
//! text runs and comments in order and leaves tree building to the caller.

use super::entities;
use super::errors::{MarkupError, MarkupErrorKind, MarkupResult};
use super::tree::Attribute;

/// A single markup token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Token<'a> {
    StartTag {
        name: String,
        attributes: Vec<Attribute>,
        self_closing: bool,
    },
    EndTag {
        name: String,
    },
    /// Raw text, still carrying character references.
    Text(&'a str),
    Comment,
}

/// True if `rest` begins a tag or comment rather than plain text.
fn starts_markup(rest: &str) -> bool {
    let mut chars = rest.chars();
    if chars.next() != Some('<') {
        return false;
    }
    match chars.next() {
        Some(c) if c.is_ascii_lowercase() => true,
        Some('/') => matches!(chars.next(), Some(c) if c.is_ascii_alphabetic()),
        Some('!') => rest.starts_with("<!--"),
        _ => false,
    }
}

pub(crate) struct Tokenizer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Tokenizer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Byte offset of the next unread character.
    pub fn position(&self) -> usize {
        self.pos
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn advance(&mut self, bytes: usize) {
        self.pos += bytes;
    }

    /// True if the input opens with a start or end tag.
    ///
    /// Only the first two characters are inspected, so a `<` used as an
    /// operator is rejected without scanning further.
    pub fn at_tag_open(&self) -> bool {
        let mut chars = self.rest().chars();
        chars.next() == Some('<')
            && match chars.next() {
                Some(c) if c.is_ascii_lowercase() => true,
                Some('/') => matches!(chars.next(), Some(c) if c.is_ascii_lowercase()),
                _ => false,
            }
    }

    pub fn next_token(&mut self) -> MarkupResult<Option<Token<'a>>> {
        let rest = self.rest();
        if rest.is_empty() {
            return Ok(None);
        }
        if rest.starts_with("<!--") {
            return self.comment().map(Some);
        }
        if starts_markup(rest) {
            if rest.starts_with("</") {
                return self.end_tag().map(Some);
            }
            return self.start_tag().map(Some);
        }
        Ok(Some(self.text()))
    }

    fn text(&mut self) -> Token<'a> {
        let rest = self.rest();
        let end = rest
            .char_indices()
            .skip(1)
            .find(|&(i, c)| c == '<' && starts_markup(&rest[i..]))
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
        self.advance(end);
        Token::Text(&rest[..end])
    }

    fn comment(&mut self) -> MarkupResult<Token<'a>> {
        let start = self.pos;
        match self.rest()[4..].find("-->") {
            Some(end) => {
                self.advance(4 + end + 3);
                Ok(Token::Comment)
            }
            None => Err(MarkupError::new(MarkupErrorKind::UnterminatedComment, start)
                .with_snippet(self.rest())),
        }
    }

    fn unterminated_tag(&self, start: usize) -> MarkupError {
        MarkupError::new(MarkupErrorKind::UnterminatedTag, start).with_snippet(&self.input[start..])
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let rest = self.rest();
        let end = rest.find(|c: char| !pred(c)).unwrap_or(rest.len());
        self.advance(end);
        &rest[..end]
    }

    fn skip_whitespace(&mut self) {
        self.take_while(char::is_whitespace);
    }

    fn tag_name(&mut self) -> String {
        self.take_while(|c| !c.is_whitespace() && c != '/' && c != '>')
            .to_ascii_lowercase()
    }

    fn end_tag(&mut self) -> MarkupResult<Token<'a>> {
        let start = self.pos;
        self.advance(2);
        let name = self.tag_name();
        // Anything between the name and `>` is ignored, as browsers do
        match self.rest().find('>') {
            Some(end) => {
                self.advance(end + 1);
                Ok(Token::EndTag { name })
            }
            None => Err(self.unterminated_tag(start)),
        }
    }

    fn start_tag(&mut self) -> MarkupResult<Token<'a>> {
        let start = self.pos;
        self.advance(1);
        let name = self.tag_name();
        let mut attributes = Vec::new();

        loop {
            self.skip_whitespace();
            match self.peek() {
                None => return Err(self.unterminated_tag(start)),
                Some('>') => {
                    self.advance(1);
                    return Ok(Token::StartTag {
                        name,
                        attributes,
                        self_closing: false,
                    });
                }
                Some('/') => {
                    self.advance(1);
                    if self.peek() == Some('>') {
                        self.advance(1);
                        return Ok(Token::StartTag {
                            name,
                            attributes,
                            self_closing: true,
                        });
                    }
                }
                Some(_) => attributes.push(self.attribute(start)?),
            }
        }
    }

    fn attribute(&mut self, tag_start: usize) -> MarkupResult<Attribute> {
        let mut name = self
            .take_while(|c| !c.is_whitespace() && !matches!(c, '=' | '>' | '/'))
            .to_ascii_lowercase();
        if name.is_empty() {
            // A leading `=` is part of the name in HTML
            if let Some(c) = self.peek() {
                self.advance(c.len_utf8());
                name.push(c);
            }
        }

        let before_value = self.pos;
        self.skip_whitespace();
        if self.peek() != Some('=') {
            self.pos = before_value;
            return Ok(Attribute::new(name, ""));
        }
        self.advance(1);
        self.skip_whitespace();

        let raw = match self.peek() {
            Some(quote @ ('"' | '\'')) => {
                let value_start = self.pos;
                self.advance(1);
                let rest = self.rest();
                let Some(end) = rest.find(quote) else {
                    return Err(MarkupError::new(
                        MarkupErrorKind::UnterminatedAttributeValue,
                        value_start,
                    )
                    .with_found(&name)
                    .with_snippet(&self.input[tag_start..]));
                };
                self.advance(end + 1);
                &rest[..end]
            }
            Some(_) => self.take_while(|c| !c.is_whitespace() && c != '>'),
            None => return Err(self.unterminated_tag(tag_start)),
        };

        Ok(Attribute::new(name, entities::decode(raw)))
    }
}
