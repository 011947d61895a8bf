//! Tag name to element function lookup.

use proc_macro2::{Ident, Span};
use rustc_hash::FxHashMap;
use syn::{parse_quote, Path, PathSegment};

/// HTML elements and the function each one maps to.
const HTML_ELEMENTS: &[(&str, &str)] = &[
    ("a", "anchor"),
    ("abbr", "abbreviation"),
    ("address", "address"),
    ("area", "area"),
    ("article", "article"),
    ("aside", "aside"),
    ("audio", "audio"),
    ("b", "bold"),
    ("bdi", "bidirectional_isolation"),
    ("bdo", "bidirectional_override"),
    ("blockquote", "block_quote"),
    ("body", "body"),
    ("br", "line_break"),
    ("button", "button"),
    ("canvas", "canvas"),
    ("caption", "caption"),
    ("cite", "citation"),
    ("code", "code"),
    ("col", "column"),
    ("colgroup", "column_group"),
    ("data", "data"),
    ("datalist", "data_list"),
    ("dd", "description"),
    ("del", "deleted_text"),
    ("details", "details"),
    ("dfn", "definition"),
    ("dialog", "dialog"),
    ("div", "div"),
    ("dl", "description_list"),
    ("dt", "definition_term"),
    ("em", "emphasis"),
    ("embed", "embed"),
    ("fieldset", "field_set"),
    ("figcaption", "figure_caption"),
    ("figure", "figure"),
    ("footer", "footer"),
    ("form", "form"),
    ("h1", "heading1"),
    ("h2", "heading2"),
    ("h3", "heading3"),
    ("h4", "heading4"),
    ("h5", "heading5"),
    ("h6", "heading6"),
    ("header", "header"),
    ("hgroup", "heading_group"),
    ("hr", "horizontal_rule"),
    ("i", "italic"),
    ("iframe", "inline_frame"),
    ("img", "image"),
    ("input", "input"),
    ("ins", "inserted_text"),
    ("kbd", "keyboard_input"),
    ("label", "label"),
    ("legend", "legend"),
    ("li", "list_item"),
    ("main", "main"),
    ("map", "map"),
    ("mark", "mark"),
    ("menu", "menu"),
    ("meter", "meter"),
    ("nav", "navigation"),
    ("noscript", "no_script"),
    ("object", "object"),
    ("ol", "ordered_list"),
    ("optgroup", "option_group"),
    ("option", "option"),
    ("output", "output"),
    ("p", "paragraph"),
    ("param", "parameter"),
    ("picture", "picture"),
    ("pre", "preformatted"),
    ("progress", "progress"),
    ("q", "inline_quote"),
    ("rp", "ruby_parenthesis"),
    ("rt", "ruby_text"),
    ("ruby", "ruby_annotation"),
    ("s", "strikethrough"),
    ("samp", "sample"),
    ("section", "section"),
    ("select", "select"),
    ("slot", "slot"),
    ("small", "small"),
    ("source", "source"),
    ("span", "span"),
    ("strong", "strong"),
    ("sub", "subscript"),
    ("summary", "summary"),
    ("sup", "superscript"),
    ("table", "table"),
    ("tbody", "table_body"),
    ("td", "table_data"),
    ("template", "template"),
    ("textarea", "text_area"),
    ("tfoot", "table_foot"),
    ("th", "table_header"),
    ("thead", "table_head"),
    ("time", "time"),
    ("tr", "table_row"),
    ("track", "track"),
    ("u", "underline"),
    ("ul", "unordered_list"),
    ("var", "variable"),
    ("video", "video"),
    ("wbr", "word_break_opportunity"),
];

/// Maps tag names to the function that builds the element.
///
/// Built once per configuration and only read during codegen. Names missing
/// from the table go through the raw-tag call instead.
#[derive(Debug, Clone)]
pub struct TagTable {
    entries: FxHashMap<String, Path>,
}

impl TagTable {
    /// An empty table; every tag takes the raw-tag fallback.
    pub fn empty() -> Self {
        Self {
            entries: FxHashMap::default(),
        }
    }

    /// The HTML vocabulary, with each function under `module`.
    pub fn html(module: &Path) -> Self {
        let mut table = Self::empty();
        for (tag, function) in HTML_ELEMENTS {
            let mut path = module.clone();
            path.segments
                .push(PathSegment::from(Ident::new(function, Span::call_site())));
            table.entries.insert((*tag).to_string(), path);
        }
        table
    }

    /// Adds or replaces the function for `tag`.
    pub fn insert(&mut self, tag: impl Into<String>, function: Path) -> Option<Path> {
        self.entries.insert(tag.into().to_ascii_lowercase(), function)
    }

    /// Removes `tag`, sending it through the raw-tag fallback.
    pub fn remove(&mut self, tag: &str) -> Option<Path> {
        self.entries.remove(tag)
    }

    pub fn get(&self, tag: &str) -> Option<&Path> {
        self.entries.get(tag)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for TagTable {
    fn default() -> Self {
        Self::html(&parse_quote!(elem))
    }
}
