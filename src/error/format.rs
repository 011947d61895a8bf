//! rustc-style rendering of positioned errors against the source they came from.

/// A 1-based line/column location resolved from a byte offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    /// 1-based line number.
    pub line: usize,
    /// 1-based column, counted in characters.
    pub column: usize,
}

impl SourceLocation {
    /// Resolves a byte offset into a line/column pair.
    ///
    /// Offsets past the end of `source` clamp to the end; offsets inside a
    /// multi-byte character resolve to that character.
    pub fn from_offset(source: &str, offset: usize) -> Self {
        let offset = floor_char_boundary(source, offset);
        let before = &source[..offset];
        let line = before.matches('\n').count() + 1;
        let line_start = before.rfind('\n').map(|pos| pos + 1).unwrap_or(0);
        let column = source[line_start..offset].chars().count() + 1;
        Self { line, column }
    }
}

fn floor_char_boundary(source: &str, offset: usize) -> usize {
    let mut offset = offset.min(source.len());
    while !source.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}

/// Configuration for formatting an error with source context.
pub struct ErrorFormat<'a> {
    /// The error message (e.g., "unexpected end of input")
    pub message: &'a str,
    /// Source code
    pub source: &'a str,
    /// Byte position in source where error occurred
    pub position: usize,
    /// Filename to display
    pub filename: &'a str,
    /// Annotation text shown after the caret
    pub annotation: Option<String>,
    /// Help text
    pub help: Option<&'a str>,
}

impl<'a> ErrorFormat<'a> {
    /// Creates a new error format configuration.
    pub fn new(message: &'a str, source: &'a str, position: usize) -> Self {
        Self {
            message,
            source,
            position,
            filename: "input",
            annotation: None,
            help: None,
        }
    }

    /// Sets the filename.
    pub fn filename(mut self, filename: &'a str) -> Self {
        self.filename = filename;
        self
    }

    /// Sets the annotation (found/expected text).
    pub fn annotation(mut self, ann: String) -> Self {
        self.annotation = Some(ann);
        self
    }

    /// Sets the help text.
    pub fn help(mut self, help: &'a str) -> Self {
        self.help = Some(help);
        self
    }

    /// Formats the error with source context.
    ///
    /// Output format:
    /// ```text
    /// error: message
    ///  --> file:line:column
    ///   |
    /// N | source line content
    ///   |     ^ annotation
    /// help: suggestion
    /// ```
    pub fn format(&self) -> String {
        let loc = SourceLocation::from_offset(self.source, self.position);

        let mut msg = format!("error: {}\n", self.message);
        msg.push_str(&format!(" --> {}:{}:{}\n", self.filename, loc.line, loc.column));

        if let Some(line_content) = self.source.lines().nth(loc.line - 1) {
            // Tabs render as four columns so the caret stays aligned
            let expanded = line_content.replace('\t', "    ");
            let visual_column: usize = line_content
                .chars()
                .take(loc.column - 1)
                .map(|c| if c == '\t' { 4 } else { 1 })
                .sum();

            let (display, caret_col) = truncate_around(&expanded, visual_column);
            let gutter = loc.line.to_string().len();
            let annotation = self.annotation.as_deref().unwrap_or("");

            msg.push_str(&format!("{:>width$} |\n", "", width = gutter));
            msg.push_str(&format!("{} | {}\n", loc.line, display));
            msg.push_str(
                format!(
                    "{:>width$} | {:>col$}^ {}",
                    "",
                    "",
                    annotation,
                    width = gutter,
                    col = caret_col
                )
                .trim_end(),
            );
            msg.push('\n');
        }

        if let Some(help) = self.help {
            msg.push_str(&format!("help: {}\n", help));
        }

        msg
    }
}

/// Shortens long lines to a window around `column`, returning the text to
/// display and the caret column within it.
fn truncate_around(line: &str, column: usize) -> (String, usize) {
    const MAX_LINE_LEN: usize = 100;
    const CONTEXT_CHARS: usize = 40;

    let chars: Vec<char> = line.chars().collect();
    if chars.len() <= MAX_LINE_LEN {
        return (line.to_string(), column);
    }

    let start = column.saturating_sub(CONTEXT_CHARS).min(chars.len());
    let end = (column + CONTEXT_CHARS).min(chars.len());
    let prefix = if start > 0 { "..." } else { "" };
    let suffix = if end < chars.len() { "..." } else { "" };
    let window: String = chars[start..end].iter().collect();

    (
        format!("{}{}{}", prefix, window, suffix),
        column - start + prefix.len(),
    )
}
