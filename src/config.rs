//! Transpiler configuration.
//!
//! Everything the generated code depends on is data here: the placeholder
//! path that carries regions through the host parser, the paths of the target
//! API, the tag table and the names of the attributes that get special
//! treatment. [`TranspileConfig::default`] targets a `vecty`-style API:
//!
//! | Concern            | Default                     |
//! |--------------------|-----------------------------|
//! | placeholder        | `tagsplice::html(id, r#"…"#)` |
//! | element functions  | `elem::<name>`              |
//! | raw tag fallback   | `vecty::tag("name", …)`     |
//! | text               | `vecty::text(…)`            |
//! | attributes         | `vecty::markup(…)`          |
//! | class list         | `vecty::class(…)`           |
//! | other attributes   | `vecty::attribute("name", value)` |
//! | `click` handler    | `event::click(handler)`     |

use rustc_hash::FxHashMap;
use syn::{parse_quote, Path};

use crate::codegen::TagTable;

/// How the reconciled file is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Emit {
    /// Replace only the placeholder calls; all other text is kept byte for byte.
    #[default]
    Splice,
    /// Print the whole reconciled syntax tree with `prettyplease`.
    Pretty,
}

/// Paths of the API functions generated calls go through.
#[derive(Debug, Clone)]
pub struct ApiPaths {
    /// Wraps a string or value rendered as text.
    pub text: Path,
    /// Groups an element's attributes.
    pub markup: Path,
    /// Class list entries.
    pub class: Path,
    /// Any attribute without special handling; takes the name then the value.
    pub attribute: Path,
    /// Elements missing from the tag table; takes the tag name first.
    pub raw_tag: Path,
}

impl Default for ApiPaths {
    fn default() -> Self {
        Self {
            text: parse_quote!(vecty::text),
            markup: parse_quote!(vecty::markup),
            class: parse_quote!(vecty::class),
            attribute: parse_quote!(vecty::attribute),
            raw_tag: parse_quote!(vecty::tag),
        }
    }
}

/// Configuration for a [`Transpiler`](crate::Transpiler).
#[derive(Debug, Clone)]
pub struct TranspileConfig {
    /// Path of the placeholder call emitted for each region.
    pub placeholder: Path,
    pub api: ApiPaths,
    pub tags: TagTable,
    /// Attribute whose whitespace-separated value becomes one class call.
    pub class_attribute: String,
    /// Attribute whose single `{expression}` is passed straight into the
    /// attributes call.
    pub spread_attribute: String,
    /// Attributes whose value is a handler expression, and the function that
    /// wraps it.
    pub event_handlers: FxHashMap<String, Path>,
    pub emit: Emit,
}

impl Default for TranspileConfig {
    fn default() -> Self {
        let mut event_handlers = FxHashMap::default();
        event_handlers.insert("click".to_string(), parse_quote!(event::click));
        Self {
            placeholder: parse_quote!(tagsplice::html),
            api: ApiPaths::default(),
            tags: TagTable::default(),
            class_attribute: "class".to_string(),
            spread_attribute: "markup".to_string(),
            event_handlers,
            emit: Emit::default(),
        }
    }
}

impl TranspileConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_placeholder(mut self, path: Path) -> Self {
        self.placeholder = path;
        self
    }

    pub fn with_api(mut self, api: ApiPaths) -> Self {
        self.api = api;
        self
    }

    pub fn with_tags(mut self, tags: TagTable) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_class_attribute(mut self, name: &str) -> Self {
        self.class_attribute = name.to_ascii_lowercase();
        self
    }

    pub fn with_spread_attribute(mut self, name: &str) -> Self {
        self.spread_attribute = name.to_ascii_lowercase();
        self
    }

    /// Treats attribute `name` as an event handler wrapped in `handler(...)`.
    pub fn with_event_handler(mut self, name: &str, handler: Path) -> Self {
        self.event_handlers.insert(name.to_ascii_lowercase(), handler);
        self
    }

    pub fn with_emit(mut self, emit: Emit) -> Self {
        self.emit = emit;
        self
    }
}
