//! The call-expression tree produced for a markup region.
//!
//! Kept separate from `syn::Expr` so the reconciler can both splice it into
//! the host syntax tree and print it with host code reproduced verbatim.

use proc_macro2::{Span, TokenStream};
use quote::ToTokens;
use syn::{token, Expr, ExprCall, ExprLit, ExprPath, Lit, LitStr, Path};

/// A generated expression.
#[derive(Debug, Clone)]
pub enum GeneratedExpr {
    /// `func(args...)`
    Call { func: Path, args: Vec<GeneratedExpr> },
    /// A string literal.
    Str(String),
    /// Embedded host code, parsed and as written.
    Host { expr: Box<Expr>, source: String },
}

impl GeneratedExpr {
    pub fn call(func: &Path, args: Vec<GeneratedExpr>) -> Self {
        GeneratedExpr::Call {
            func: func.clone(),
            args,
        }
    }

    pub fn str(value: impl Into<String>) -> Self {
        GeneratedExpr::Str(value.into())
    }

    /// The called path, if this is a call.
    pub fn callee(&self) -> Option<&Path> {
        match self {
            GeneratedExpr::Call { func, .. } => Some(func),
            _ => None,
        }
    }

    /// Call arguments; empty for anything that is not a call.
    pub fn args(&self) -> &[GeneratedExpr] {
        match self {
            GeneratedExpr::Call { args, .. } => args,
            _ => &[],
        }
    }

    /// True for strings and host code, which never span several lines.
    pub(crate) fn is_leaf(&self) -> bool {
        !matches!(self, GeneratedExpr::Call { .. })
    }

    /// Converts to a `syn` expression for splicing into the host tree.
    pub fn to_expr(&self) -> Expr {
        match self {
            GeneratedExpr::Call { func, args } => Expr::Call(ExprCall {
                attrs: Vec::new(),
                func: Box::new(Expr::Path(ExprPath {
                    attrs: Vec::new(),
                    qself: None,
                    path: func.clone(),
                })),
                paren_token: token::Paren::default(),
                args: args.iter().map(GeneratedExpr::to_expr).collect(),
            }),
            GeneratedExpr::Str(value) => Expr::Lit(ExprLit {
                attrs: Vec::new(),
                lit: Lit::Str(LitStr::new(value, Span::call_site())),
            }),
            GeneratedExpr::Host { expr, .. } => (**expr).clone(),
        }
    }
}

impl ToTokens for GeneratedExpr {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        self.to_expr().to_tokens(tokens);
    }
}
