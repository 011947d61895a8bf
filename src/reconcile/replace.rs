//! The syntax tree walk that swaps placeholder calls for generated code.

use proc_macro2::LineColumn;
use quote::ToTokens;
use rustc_hash::{FxHashMap, FxHashSet};
use syn::punctuated::Punctuated;
use syn::visit_mut::{self, VisitMut};
use syn::{Expr, ExprCall, ExprLit, ExprPath, Lit, Macro, Path, Token};
use tracing::debug;

use super::error::ReconcileError;
use super::splice::Splice;
use crate::codegen::GeneratedExpr;
use crate::scanner::PlaceholderTable;

pub(crate) struct PlaceholderReplacer<'a> {
    placeholder: &'a Path,
    table: &'a PlaceholderTable,
    generated: &'a FxHashMap<usize, GeneratedExpr>,
    placed: FxHashSet<usize>,
    splices: Vec<Splice>,
    error: Option<ReconcileError>,
}

impl<'a> PlaceholderReplacer<'a> {
    pub fn new(
        placeholder: &'a Path,
        table: &'a PlaceholderTable,
        generated: &'a FxHashMap<usize, GeneratedExpr>,
    ) -> Self {
        Self {
            placeholder,
            table,
            generated,
            placed: FxHashSet::default(),
            splices: Vec::new(),
            error: None,
        }
    }

    /// The replacements made, or the first error met during the walk.
    pub fn finish(self) -> Result<Vec<Splice>, ReconcileError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.splices),
        }
    }

    fn is_placeholder(&self, path: &Path) -> bool {
        path.leading_colon.is_some() == self.placeholder.leading_colon.is_some()
            && path.segments.len() == self.placeholder.segments.len()
            && path
                .segments
                .iter()
                .zip(&self.placeholder.segments)
                .all(|(a, b)| a.ident == b.ident && a.arguments.is_none())
    }

    /// The id and raw text of a placeholder call, `None` for any other call.
    fn placeholder_id(&self, call: &ExprCall) -> Result<Option<(usize, String)>, ReconcileError> {
        let Expr::Path(ExprPath {
            qself: None, path, ..
        }) = &*call.func
        else {
            return Ok(None);
        };
        if !self.is_placeholder(path) {
            return Ok(None);
        }

        let malformed = || ReconcileError::malformed(&call.to_token_stream().to_string());
        if call.args.len() != 2 {
            return Err(malformed());
        }
        let id = match &call.args[0] {
            Expr::Lit(ExprLit {
                lit: Lit::Int(id), ..
            }) => id.base10_parse::<usize>().map_err(|_| malformed())?,
            _ => return Err(malformed()),
        };
        match &call.args[1] {
            Expr::Lit(ExprLit {
                lit: Lit::Str(raw), ..
            }) => Ok(Some((id, raw.value()))),
            _ => Err(malformed()),
        }
    }

    /// Replaces `expr` if it is a placeholder call. Returns whether it was.
    fn try_replace(&mut self, expr: &mut Expr) -> bool {
        let Expr::Call(call) = expr else {
            return false;
        };
        let (id, raw) = match self.placeholder_id(call) {
            Ok(Some(found)) => found,
            Ok(None) => return false,
            Err(err) => {
                self.error = Some(err);
                return true;
            }
        };
        let snippet = || call.to_token_stream().to_string();
        let (Some(generated), Some(region)) = (self.generated.get(&id), self.table.get(id)) else {
            self.error = Some(ReconcileError::unknown_id(id, &snippet()));
            return true;
        };
        // A call written by hand may reuse an id; only the scanner's own call carries the region text
        if region.span.text != raw || !self.placed.insert(id) {
            self.error = Some(ReconcileError::foreign(id, &snippet()));
            return true;
        }

        let (start, end) = call_bounds(call);
        debug!(id, line = start.line, column = start.column, "replacing placeholder");
        self.splices.push(Splice {
            id,
            start,
            end,
            expr: generated.clone(),
        });
        *expr = generated.to_expr();
        true
    }
}

/// Where the call's text starts and ends in the annotated source.
fn call_bounds(call: &ExprCall) -> (LineColumn, LineColumn) {
    let start = match &*call.func {
        Expr::Path(ExprPath { path, .. }) => match (&path.leading_colon, path.segments.first()) {
            (Some(colon), _) => colon.spans[0].start(),
            (None, Some(segment)) => segment.ident.span().start(),
            (None, None) => call.paren_token.span.open().start(),
        },
        _ => call.paren_token.span.open().start(),
    };
    (start, call.paren_token.span.close().end())
}

impl VisitMut for PlaceholderReplacer<'_> {
    fn visit_expr_mut(&mut self, expr: &mut Expr) {
        if self.error.is_some() {
            return;
        }
        // Generated code never contains placeholders, so there is nothing below a replacement
        if self.try_replace(expr) {
            return;
        }
        visit_mut::visit_expr_mut(self, expr);
    }

    fn visit_macro_mut(&mut self, mac: &mut Macro) {
        if self.error.is_some() {
            return;
        }
        let Ok(mut args) = mac.parse_body_with(Punctuated::<Expr, Token![,]>::parse_terminated)
        else {
            return;
        };
        let before = self.splices.len();
        for arg in args.iter_mut() {
            self.visit_expr_mut(arg);
        }
        if self.splices.len() > before {
            mac.tokens = args.into_token_stream();
        }
    }
}
