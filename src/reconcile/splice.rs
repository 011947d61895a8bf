//! Text splicing of generated expressions into the annotated source.

use proc_macro2::LineColumn;

use crate::codegen::GeneratedExpr;

/// One placeholder call to replace, located by the host parser's spans.
#[derive(Debug, Clone)]
pub(crate) struct Splice {
    pub id: usize,
    pub start: LineColumn,
    pub end: LineColumn,
    pub expr: GeneratedExpr,
}

/// Converts parser line/column positions back into byte offsets.
pub(crate) struct LineIndex<'a> {
    source: &'a str,
    /// Byte offset where each line starts.
    line_starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    pub fn new(source: &'a str) -> Self {
        // The parser never sees a byte order mark
        let base = if source.starts_with('\u{feff}') { 3 } else { 0 };
        let mut line_starts = vec![base];
        line_starts.extend(
            source
                .char_indices()
                .filter(|&(_, c)| c == '\n')
                .map(|(i, _)| i + 1),
        );
        Self {
            source,
            line_starts,
        }
    }

    /// Byte offset of a 1-based line and 0-based character column.
    pub fn offset(&self, at: LineColumn) -> usize {
        let Some(&line_start) = at.line.checked_sub(1).and_then(|i| self.line_starts.get(i)) else {
            return self.source.len();
        };
        self.source[line_start..]
            .char_indices()
            .nth(at.column)
            .map(|(i, _)| line_start + i)
            .unwrap_or(self.source.len())
    }
}

/// Leading whitespace of the line containing `offset`.
fn line_indent(source: &str, offset: usize) -> &str {
    let line_start = source[..offset].rfind('\n').map(|i| i + 1).unwrap_or(0);
    let line = &source[line_start..offset];
    let indent_len = line.len() - line.trim_start().len();
    &line[..indent_len]
}

/// Replaces each splice's span with its rendered expression; everything
/// else is copied unchanged.
pub(crate) fn apply(source: &str, splices: &[Splice]) -> String {
    let index = LineIndex::new(source);
    let mut located: Vec<_> = splices
        .iter()
        .map(|splice| (index.offset(splice.start), index.offset(splice.end), splice))
        .collect();
    located.sort_by_key(|&(start, _, _)| start);

    let newline = if source.contains("\r\n") { "\r\n" } else { "\n" };
    let mut out = String::with_capacity(source.len());
    let mut cursor = 0;
    for (start, end, splice) in located {
        out.push_str(&source[cursor..start]);
        out.push_str(&splice.expr.render_with_newline(line_indent(source, start), newline));
        cursor = end;
    }
    out.push_str(&source[cursor..]);
    out
}
