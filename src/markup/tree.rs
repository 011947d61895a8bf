//! The tag tree produced for one captured markup region.

use super::entities;

/// A `name="value"` pair on an element. Attributes without a value carry `""`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// An element with its attributes in source order and its children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<Attribute>,
    pub children: Vec<TagTree>,
}

impl Element {
    pub fn new(name: impl Into<String>, attributes: Vec<Attribute>) -> Self {
        Self {
            name: name.into(),
            attributes,
            children: Vec::new(),
        }
    }

    /// Returns the value of the first attribute called `name`.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attr| attr.name == name)
            .map(|attr| attr.value.as_str())
    }
}

/// A trimmed, non-empty text run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Text {
    pub content: String,
}

impl Text {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }

    /// True when the content is exactly one `{...}` block.
    pub fn is_embedded_code(&self) -> bool {
        let content = self.content.trim();
        content.len() >= 2
            && content.starts_with('{')
            && content.ends_with('}')
            && !content[1..content.len() - 1].contains(['{', '}'])
    }
}

/// A node of a captured markup region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagTree {
    Element(Element),
    Text(Text),
}

impl From<Element> for TagTree {
    fn from(element: Element) -> Self {
        TagTree::Element(element)
    }
}

impl From<Text> for TagTree {
    fn from(text: Text) -> Self {
        TagTree::Text(text)
    }
}

impl TagTree {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            TagTree::Element(element) => Some(element),
            TagTree::Text(_) => None,
        }
    }

    /// Renders an indented outline of the tree, one node per line.
    ///
    /// ```text
    /// div class="greeting"
    ///   h1
    ///     embed:{s:msg}
    ///   plain text
    /// ```
    pub fn debug_string(&self) -> String {
        let mut out = String::new();
        self.write_debug(&mut out, 0);
        out
    }

    fn write_debug(&self, out: &mut String, depth: usize) {
        let indent = "  ".repeat(depth);
        match self {
            TagTree::Element(element) => {
                out.push_str(&indent);
                out.push_str(&element.name);
                for attr in &element.attributes {
                    out.push_str(&format!(" {}={:?}", attr.name, attr.value));
                }
                out.push('\n');
                for child in &element.children {
                    child.write_debug(out, depth + 1);
                }
            }
            TagTree::Text(text) if text.is_embedded_code() => {
                out.push_str(&format!("{}embed:{}\n", indent, text.content));
            }
            TagTree::Text(text) => {
                out.push_str(&format!("{}{}\n", indent, text.content));
            }
        }
    }

    /// Serializes the tree back to markup.
    ///
    /// Elements without children are written self-closing. Text and attribute
    /// values are escaped so that parsing the output yields an equal tree.
    pub fn to_markup(&self) -> String {
        let mut out = String::new();
        self.write_markup(&mut out);
        out
    }

    fn write_markup(&self, out: &mut String) {
        match self {
            TagTree::Element(element) => {
                out.push('<');
                out.push_str(&element.name);
                for attr in &element.attributes {
                    out.push(' ');
                    out.push_str(&attr.name);
                    out.push_str("=\"");
                    out.push_str(&entities::escape_attribute(&attr.value));
                    out.push('"');
                }
                if element.children.is_empty() {
                    out.push_str("/>");
                    return;
                }
                out.push('>');
                for child in &element.children {
                    child.write_markup(out);
                }
                out.push_str("</");
                out.push_str(&element.name);
                out.push('>');
            }
            TagTree::Text(text) => out.push_str(&entities::escape_text(&text.content)),
        }
    }
}
