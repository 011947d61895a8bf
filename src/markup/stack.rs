use super::tree::{Element, Text};

/// Open elements, innermost last. Its length is the nesting depth.
#[derive(Debug, Default)]
pub(crate) struct TagStack {
    frames: Vec<Element>,
}

impl TagStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Name of the innermost open element.
    pub fn innermost(&self) -> Option<&str> {
        self.frames.last().map(|frame| frame.name.as_str())
    }

    pub fn open(&mut self, element: Element) {
        self.frames.push(element);
    }

    pub fn pop(&mut self) -> Option<Element> {
        self.frames.pop()
    }

    /// Appends a finished element to the innermost open element.
    ///
    /// With nothing open the element is the root and is handed back.
    pub fn close(&mut self, element: Element) -> Option<Element> {
        match self.frames.last_mut() {
            Some(parent) => {
                parent.children.push(element.into());
                None
            }
            None => Some(element),
        }
    }

    /// Appends a text run to the innermost open element.
    pub fn push_text(&mut self, text: Text) {
        if let Some(parent) = self.frames.last_mut() {
            parent.children.push(text.into());
        }
    }
}
