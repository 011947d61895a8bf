//! Source scanner and region extractor.
//!
//! Streams a Rust source file character by character, echoing it to the
//! output, and replaces every markup region with a numbered placeholder call
//! that carries the region's raw text:
//!
//! ```text
//! let view = <p class="note">{msg}</p>;
//! let view = tagsplice::html(1, r#"<p class="note">{msg}</p>"#);
//! ```
//!
//! ## Lexical context
//!
//! Markup is never looked for inside comments, string literals, raw strings
//! or character literals:
//!
//! | State           | Entered by                | Left by                         |
//! |-----------------|---------------------------|---------------------------------|
//! | `LineComment`   | `//`                      | `\n`                            |
//! | `BlockComment`  | `/*`                      | the matching `*/` (they nest)   |
//! | `Quoted`        | `"` or a `'` char literal | the same quote, `\` escapes     |
//! | `Raw`           | `r"`, `r#"`, `br#"`, ...  | `"` plus the same number of `#` |
//!
//! ## Where markup may start
//!
//! Rust uses `<` for comparisons, shifts and generics, so a `<` is only
//! offered to the markup parser where an expression can begin: at the start
//! of the file, after one of `= ( [ { , ; |`, after an operator such as `&`,
//! `!`, `*` or `-`, after a lone `:`, after `=>`, or after the keywords
//! `return`, `break` and `mut`. Even there the markup parser looks at a
//! single character past the `<` before giving up, so
//! `let ok = <T as Trait>::f();` passes through untouched. Rust's primitive
//! types are never tag names, which keeps `<u8>::MAX` out of markup too.

mod placeholder;


pub use placeholder::{placeholder_call, raw_string_literal, PlaceholderTable, Region, SourceSpan};

use syn::Path;
use tracing::{debug, trace};

use crate::error::{LexError, Result};
use crate::markup::{parse_markup, MarkupError, MarkupErrorKind};

/// The placeholder-annotated source and the regions it refers to.
#[derive(Debug, Clone)]
pub struct ScanOutput {
    pub source: String,
    pub table: PlaceholderTable,
}

impl ScanOutput {
    /// The annotated source followed by an outline of every captured region.
    pub fn debug_string(&self) -> String {
        format!("{}\n---\n{}", self.source, self.table.debug_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Plain,
    LineComment,
    BlockComment { depth: usize },
    Quoted { quote: char, opened_at: usize },
    Raw { hashes: usize, opened_at: usize },
}

fn is_ident_char(c: char) -> bool {
    c == '_' || c.is_alphanumeric()
}

/// The last significant code characters, for deciding whether a `<` may
/// open markup.
#[derive(Debug, Default)]
struct CodeContext {
    last: Option<char>,
    before_last: Option<char>,
    /// The identifier or keyword that ended at `last`, if any.
    word: String,
    /// Whitespace has been seen since `last`.
    gap: bool,
}

impl CodeContext {
    fn record(&mut self, c: char) {
        if c.is_whitespace() || c == '\u{feff}' {
            self.gap = true;
            return;
        }
        if is_ident_char(c) {
            if self.gap || !self.last.is_some_and(is_ident_char) {
                self.word.clear();
            }
            self.word.push(c);
        } else {
            self.word.clear();
        }
        self.before_last = self.last;
        self.last = Some(c);
        self.gap = false;
    }

    fn allows_markup(&self) -> bool {
        match self.last {
            None => true,
            Some('=' | '(' | '[' | '{' | ',' | ';' | '|') => true,
            // Prefix and binary operators; no value ends in one
            Some('&' | '!' | '*' | '-' | '+' | '%' | '^' | '/' | '~') => true,
            Some(':') => self.before_last != Some(':'),
            Some('>') => self.before_last == Some('='),
            Some(_) => matches!(self.word.as_str(), "return" | "break" | "mut"),
        }
    }
}

/// Scans one file. Each scanner owns its output and table.
pub struct Scanner<'a> {
    source: &'a str,
    placeholder: &'a Path,
    pos: usize,
    out: String,
    state: ScanState,
    context: CodeContext,
    table: PlaceholderTable,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str, placeholder: &'a Path) -> Self {
        Self {
            source,
            placeholder,
            pos: 0,
            out: String::with_capacity(source.len()),
            state: ScanState::Plain,
            context: CodeContext::default(),
            table: PlaceholderTable::new(),
        }
    }

    fn rest(&self) -> &'a str {
        &self.source[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn echo(&mut self, c: char) {
        self.out.push(c);
        self.pos += c.len_utf8();
    }

    fn echo_str(&mut self, s: &str) {
        self.out.push_str(s);
        self.pos += s.len();
    }

    /// Runs the scan to the end of the source.
    pub fn scan(mut self) -> Result<ScanOutput> {
        while let Some(c) = self.peek() {
            match self.state {
                ScanState::Plain => self.plain(c)?,
                ScanState::LineComment => {
                    self.echo(c);
                    if c == '\n' {
                        self.state = ScanState::Plain;
                    }
                }
                ScanState::BlockComment { depth } => self.block_comment(c, depth),
                ScanState::Quoted { quote, .. } => self.quoted(c, quote),
                ScanState::Raw { hashes, .. } => self.raw(c, hashes),
            }
        }

        match self.state {
            ScanState::Quoted { quote, opened_at } => Err(LexError::unterminated_string(
                self.source.len(),
                opened_at,
                quote,
            )
            .with_snippet(&self.source[opened_at..])
            .into()),
            ScanState::Raw { hashes, opened_at } => Err(LexError::unterminated_raw_string(
                self.source.len(),
                opened_at,
                hashes,
            )
            .with_snippet(&self.source[opened_at..])
            .into()),
            _ => {
                debug!(regions = self.table.len(), "scan complete");
                Ok(ScanOutput {
                    source: self.out,
                    table: self.table,
                })
            }
        }
    }

    fn plain(&mut self, c: char) -> Result<()> {
        let rest = self.rest();
        match c {
            '"' => {
                self.state = ScanState::Quoted {
                    quote: '"',
                    opened_at: self.pos,
                };
                self.echo(c);
                self.context.record(c);
            }
            '\'' => self.quote_or_lifetime(),
            '/' if rest.starts_with("//") => {
                self.echo_str("//");
                self.state = ScanState::LineComment;
            }
            '/' if rest.starts_with("/*") => {
                self.echo_str("/*");
                self.state = ScanState::BlockComment { depth: 1 };
            }
            '<' if self.context.allows_markup() => self.markup()?,
            _ => match self.raw_string_hashes() {
                Some(hashes) => {
                    self.state = ScanState::Raw {
                        hashes,
                        opened_at: self.pos,
                    };
                    self.echo_str(&rest[..hashes + 2]);
                    self.context.record('"');
                }
                None => {
                    self.echo(c);
                    self.context.record(c);
                }
            },
        }
        Ok(())
    }

    /// `'x'` and `'\n'` are literals, `'a` is a lifetime or label.
    fn quote_or_lifetime(&mut self) {
        let mut chars = self.rest().chars().skip(1);
        match (chars.next(), chars.next()) {
            (Some('\\'), _) => {
                self.state = ScanState::Quoted {
                    quote: '\'',
                    opened_at: self.pos,
                };
                self.echo('\'');
            }
            (Some(c), Some('\'')) => {
                self.echo('\'');
                self.echo(c);
                self.echo('\'');
            }
            _ => self.echo('\''),
        }
        self.context.record('\'');
    }

    /// Number of `#` if a raw string literal starts here.
    fn raw_string_hashes(&self) -> Option<usize> {
        let after_r = self.rest().strip_prefix('r')?;
        let mut before = self.source[..self.pos].chars().rev();
        let standalone = match before.next() {
            Some('b' | 'c') => !before.next().is_some_and(is_ident_char),
            Some(prev) => !is_ident_char(prev),
            None => true,
        };
        if !standalone {
            return None;
        }
        let hashes = after_r.chars().take_while(|&c| c == '#').count();
        after_r[hashes..].starts_with('"').then_some(hashes)
    }

    fn block_comment(&mut self, c: char, depth: usize) {
        let rest = self.rest();
        if rest.starts_with("*/") {
            self.echo_str("*/");
            self.state = match depth - 1 {
                0 => ScanState::Plain,
                depth => ScanState::BlockComment { depth },
            };
        } else if rest.starts_with("/*") {
            self.echo_str("/*");
            self.state = ScanState::BlockComment { depth: depth + 1 };
        } else {
            self.echo(c);
        }
    }

    fn quoted(&mut self, c: char, quote: char) {
        self.echo(c);
        if c == '\\' {
            if let Some(escaped) = self.peek() {
                self.echo(escaped);
            }
        } else if c == quote {
            self.state = ScanState::Plain;
        }
    }

    fn raw(&mut self, c: char, hashes: usize) {
        self.echo(c);
        if c == '"' {
            let rest = self.rest();
            if rest.len() >= hashes && rest.bytes().take(hashes).all(|b| b == b'#') {
                self.echo_str(&rest[..hashes]);
                self.state = ScanState::Plain;
            }
        }
    }

    fn markup(&mut self) -> Result<()> {
        let start = self.pos;
        let rest = self.rest();
        let parsed = if opens_primitive_type(rest) {
            None
        } else {
            parse_markup(rest).map_err(|err| qualified_path_hint(err, rest).offset_by(start))?
        };
        match parsed {
            None => {
                trace!(offset = start, "`<` does not open markup");
                self.echo('<');
                self.context.record('<');
            }
            Some(captured) => {
                let text = captured.span(rest);
                let id = self.table.insert(
                    SourceSpan {
                        offset: start,
                        text: text.to_string(),
                    },
                    captured.root,
                );
                debug!(id, offset = start, len = captured.len, "captured markup region");
                self.out
                    .push_str(&placeholder_call(self.placeholder, id, text));
                self.pos += captured.len;
                self.context.record(')');
            }
        }
        Ok(())
    }
}

const PRIMITIVE_TYPES: &[&str] = &[
    "bool", "char", "str", "f32", "f64", "i8", "i16", "i32", "i64", "i128", "isize", "u8", "u16",
    "u32", "u64", "u128", "usize",
];

/// `<u8>::MAX`, `<str as Trait>::f` and the like.
fn opens_primitive_type(rest: &str) -> bool {
    let name_len = rest[1..]
        .find(|c: char| !is_ident_char(c))
        .unwrap_or(rest.len() - 1);
    PRIMITIVE_TYPES.contains(&&rest[1..1 + name_len])
}

/// An unclosed `<name>` directly followed by `::` is most likely a
/// qualified path on a lowercase type.
fn qualified_path_hint(err: MarkupError, rest: &str) -> MarkupError {
    let followed_by_path = rest
        .find('>')
        .is_some_and(|end| rest[end + 1..].starts_with("::"));
    if err.kind == MarkupErrorKind::UnexpectedEof && followed_by_path {
        err.with_help(
            "`<` starts markup here; call the item through its type or trait \
             (`Type::item`, `Trait::item(value)`) instead of `<Type>::item`",
        )
    } else {
        err
    }
}

/// Scans `source`, replacing markup regions with calls to `placeholder`.
pub fn scan(source: &str, placeholder: &Path) -> Result<ScanOutput> {
    Scanner::new(source, placeholder).scan()
}
