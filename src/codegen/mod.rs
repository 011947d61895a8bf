//! Tree-to-call code generation.
//!
//! Turns the [`Element`] captured for a region into a [`GeneratedExpr`]: one
//! call per element, with an attributes call first when the element has
//! attributes, followed by its children in order.
//!
//! ## Element
//!
//! ```text
//! <p class="note">Hi {name}</p>
//!
//! elem::paragraph(
//!     vecty::markup(
//!         vecty::class("note"),
//!     ),
//!     vecty::text("Hi"),
//!     name,
//! )
//! ```
//!
//! Tags missing from the [`TagTable`] become `vecty::tag("name", ...)`.
//!
//! ## Attributes
//!
//! - the class attribute is split on whitespace; every token is one argument
//!   of a single class call;
//! - the spread attribute must be one `{expression}`, which is passed to the
//!   attributes call as is;
//! - event handler attributes are parsed as one expression, braces or not,
//!   and wrapped in the handler function;
//! - anything else becomes `vecty::attribute("name", value)` where the value
//!   is a string or one `{expression}`.

mod error;
mod ir;
mod render;
mod tags;

#[cfg(test)]
mod tests;

pub use error::{CodegenError, CodegenErrorKind, CodegenResult};
pub use ir::GeneratedExpr;
pub use tags::TagTable;

pub(crate) use render::path_to_string;

use syn::Expr;

use crate::config::TranspileConfig;
use crate::error::Result;
use crate::markup::{Element, TagTree};
use crate::segment::{tokenize_segments, Modifier, Segment};

/// Generates call expressions for captured regions.
pub struct Codegen<'a> {
    config: &'a TranspileConfig,
}

impl<'a> Codegen<'a> {
    pub fn new(config: &'a TranspileConfig) -> Self {
        Self { config }
    }

    /// Generates the call expression for a region's root element.
    pub fn generate(&self, root: &Element) -> Result<GeneratedExpr> {
        self.element(root)
    }

    fn element(&self, element: &Element) -> Result<GeneratedExpr> {
        let mut args = Vec::with_capacity(element.children.len() + 2);
        let func = match self.config.tags.get(&element.name) {
            Some(func) => func,
            None => {
                args.push(GeneratedExpr::str(&element.name));
                &self.config.api.raw_tag
            }
        };

        if !element.attributes.is_empty() {
            args.push(self.attributes(element)?);
        }
        for child in &element.children {
            match child {
                TagTree::Element(child) => args.push(self.element(child)?),
                TagTree::Text(text) => {
                    for segment in tokenize_segments(&text.content)? {
                        args.push(self.segment(&segment, true)?);
                    }
                }
            }
        }

        Ok(GeneratedExpr::call(func, args))
    }

    fn attributes(&self, element: &Element) -> Result<GeneratedExpr> {
        let config = self.config;
        let mut args = Vec::with_capacity(element.attributes.len());

        for attr in &element.attributes {
            let context = || format!("attribute '{}' of <{}>", attr.name, element.name);

            if attr.name == config.class_attribute {
                let classes = attr
                    .value
                    .split_whitespace()
                    .map(|token| self.single_value(token, &context))
                    .collect::<Result<Vec<_>>>()?;
                args.push(GeneratedExpr::call(&config.api.class, classes));
            } else if attr.name == config.spread_attribute {
                match tokenize_segments(&attr.value)?.as_slice() {
                    [segment @ Segment::Embedded { .. }] => args.push(self.segment(segment, false)?),
                    _ => {
                        return Err(CodegenError::spread_not_embedded(&context(), &attr.value).into())
                    }
                }
            } else if let Some(handler) = config.event_handlers.get(&attr.name) {
                let code = strip_braces(&attr.value);
                args.push(GeneratedExpr::call(handler, vec![host_expr(code)?]));
            } else {
                let value = self.single_value(&attr.value, &context)?;
                args.push(GeneratedExpr::call(
                    &config.api.attribute,
                    vec![GeneratedExpr::str(&attr.name), value],
                ));
            }
        }

        Ok(GeneratedExpr::call(&config.api.markup, args))
    }

    /// A value that must be exactly one argument.
    fn single_value(&self, value: &str, context: &dyn Fn() -> String) -> Result<GeneratedExpr> {
        match tokenize_segments(value)?.as_slice() {
            [segment] => self.segment(segment, false),
            _ => Err(CodegenError::too_many_segments(&context(), value).into()),
        }
    }

    fn segment(&self, segment: &Segment, wrap_literal: bool) -> Result<GeneratedExpr> {
        match segment {
            Segment::Literal(text) if wrap_literal => Ok(GeneratedExpr::call(
                &self.config.api.text,
                vec![GeneratedExpr::str(text)],
            )),
            Segment::Literal(text) => Ok(GeneratedExpr::str(text)),
            Segment::Embedded { code, modifier } => {
                let expr = host_expr(code)?;
                Ok(match modifier {
                    Some(Modifier::Text) => GeneratedExpr::call(&self.config.api.text, vec![expr]),
                    None => expr,
                })
            }
        }
    }
}

/// Parses embedded code as a Rust expression.
fn host_expr(code: &str) -> Result<GeneratedExpr> {
    let source = code.trim();
    let expr = syn::parse_str::<Expr>(source)
        .map_err(|err| CodegenError::invalid_expression(code, &err))?;
    Ok(GeneratedExpr::Host {
        expr: Box::new(expr),
        source: source.to_string(),
    })
}

/// Handler values may be written bare or as `{expression}`.
fn strip_braces(value: &str) -> &str {
    let trimmed = value.trim();
    trimmed
        .strip_prefix('{')
        .and_then(|inner| inner.strip_suffix('}'))
        .unwrap_or(trimmed)
}
