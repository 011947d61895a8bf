//! Text rendering of generated expressions for splice output.
//!
//! A call whose arguments are all strings or host code stays on one line;
//! anything containing a nested call gets one argument per line with
//! trailing commas:
//!
//! ```text
//! elem::div(
//!     vecty::markup(
//!         vecty::class("card", extra),
//!     ),
//!     vecty::text("Hello"),
//! )
//! ```

use proc_macro2::Literal;
use syn::Path;

use super::ir::GeneratedExpr;

const INDENT: &str = "    ";

/// Inline calls longer than this are broken onto several lines.
const MAX_INLINE_WIDTH: usize = 100;

struct Layout<'a> {
    base: &'a str,
    newline: &'a str,
}

impl GeneratedExpr {
    /// Renders the expression as Rust source.
    ///
    /// The first line carries no indentation since it continues the line the
    /// placeholder was on; continuation lines start with `base_indent`.
    pub fn render(&self, base_indent: &str) -> String {
        self.render_with_newline(base_indent, "\n")
    }

    /// [`GeneratedExpr::render`] with lines ending in `newline`, which should
    /// match the file the text is spliced into.
    pub fn render_with_newline(&self, base_indent: &str, newline: &str) -> String {
        let mut out = String::new();
        let layout = Layout {
            base: base_indent,
            newline,
        };
        self.render_into(&mut out, &layout, 0);
        out
    }

    fn render_into(&self, out: &mut String, layout: &Layout<'_>, level: usize) {
        match self {
            GeneratedExpr::Str(value) => out.push_str(&Literal::string(value).to_string()),
            GeneratedExpr::Host { source, .. } => out.push_str(source),
            GeneratedExpr::Call { func, args } => {
                out.push_str(&path_to_string(func));
                if let Some(inline) = self.render_inline() {
                    out.push('(');
                    out.push_str(&inline);
                    out.push(')');
                    return;
                }
                out.push('(');
                out.push_str(layout.newline);
                for arg in args {
                    push_indent(out, layout.base, level + 1);
                    arg.render_into(out, layout, level + 1);
                    out.push(',');
                    out.push_str(layout.newline);
                }
                push_indent(out, layout.base, level);
                out.push(')');
            }
        }
    }

    /// The argument list on one line, if the call is simple enough for that.
    fn render_inline(&self) -> Option<String> {
        let args = self.args();
        if !args.iter().all(GeneratedExpr::is_leaf) {
            return None;
        }
        let inline = args
            .iter()
            .map(|arg| arg.render(""))
            .collect::<Vec<_>>()
            .join(", ");
        (inline.len() <= MAX_INLINE_WIDTH).then_some(inline)
    }
}

fn push_indent(out: &mut String, base: &str, level: usize) {
    out.push_str(base);
    for _ in 0..level {
        out.push_str(INDENT);
    }
}

/// `a::b::c`, without the spacing `quote` puts around `::`.
pub(crate) fn path_to_string(path: &Path) -> String {
    let mut out = String::new();
    if path.leading_colon.is_some() {
        out.push_str("::");
    }
    for (i, segment) in path.segments.iter().enumerate() {
        if i > 0 {
            out.push_str("::");
        }
        out.push_str(&segment.ident.to_string());
    }
    out
}
