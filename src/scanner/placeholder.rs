//! Placeholder calls and the table of regions they stand for.

use crate::codegen::path_to_string;
use crate::markup::{Element, TagTree};
use syn::Path;

/// The raw text of a captured region and where it started.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSpan {
    /// Byte offset of the opening `<` in the original source.
    pub offset: usize,
    /// The region exactly as written.
    pub text: String,
}

/// A captured region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub span: SourceSpan,
    pub root: Element,
}

/// Regions of one file, keyed by placeholder id.
///
/// Ids start at 1 and increase in source order; the table is only ever
/// appended to.
#[derive(Debug, Clone, Default)]
pub struct PlaceholderTable {
    regions: Vec<Region>,
}

impl PlaceholderTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a region and returns its id.
    pub fn insert(&mut self, span: SourceSpan, root: Element) -> usize {
        self.regions.push(Region { span, root });
        self.regions.len()
    }

    pub fn get(&self, id: usize) -> Option<&Region> {
        id.checked_sub(1).and_then(|index| self.regions.get(index))
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Regions with their ids, in source order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Region)> + '_ {
        self.regions
            .iter()
            .enumerate()
            .map(|(index, region)| (index + 1, region))
    }

    /// An outline of every region, for inspecting what the scanner captured.
    pub fn debug_string(&self) -> String {
        let mut out = String::new();
        for (id, region) in self.iter() {
            out.push_str(&format!("#{} @ {}\n", id, region.span.offset));
            for line in TagTree::from(region.root.clone()).debug_string().lines() {
                out.push_str("  ");
                out.push_str(line);
                out.push('\n');
            }
        }
        out
    }
}

/// Formats `path(id, r#"raw"#)`.
pub fn placeholder_call(path: &Path, id: usize, raw: &str) -> String {
    format!("{}({}, {})", path_to_string(path), id, raw_string_literal(raw))
}

/// Wraps `raw` in a raw string literal it cannot terminate early.
///
/// Uses one more `#` than the longest run of `#` following any `"` in the
/// text, and never fewer than one.
pub fn raw_string_literal(raw: &str) -> String {
    let longest = raw
        .split('"')
        .skip(1)
        .map(|after| after.chars().take_while(|&c| c == '#').count())
        .max()
        .unwrap_or(0);
    let hashes = "#".repeat(longest + 1);
    format!("r{hashes}\"{raw}\"{hashes}")
}
