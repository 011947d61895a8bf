//! Two-pass reconciliation.
//!
//! Pass one ([`crate::scanner`]) leaves a numbered placeholder call wherever
//! markup was. Pass two, here, parses that annotated text as Rust, generates
//! the calls for every table entry, and replaces each placeholder in the
//! syntax tree with its generated expression.
//!
//! Placeholders are found in every expression position, including the
//! arguments of macros whose body is a comma-separated expression list such
//! as `vec![...]`. Each id must be consumed: an id the table does not have
//! and a region left in a position that cannot be rewritten are both errors.

mod error;
mod replace;
mod splice;

#[cfg(test)]
mod tests;

pub use error::{ReconcileError, ReconcileErrorKind};

use rustc_hash::{FxHashMap, FxHashSet};
use syn::visit_mut::VisitMut;
use tracing::debug;

use crate::codegen::Codegen;
use crate::config::{Emit, TranspileConfig};
use crate::error::{Error, HostParseError, Result};
use crate::scanner::ScanOutput;

use replace::PlaceholderReplacer;

/// The result of reconciling one file.
#[derive(Debug, Clone)]
pub struct Reconciled {
    /// The syntax tree with every placeholder replaced.
    pub file: syn::File,
    /// The rewritten source text, printed per the configured [`Emit`] mode.
    pub source: String,
}

/// Runs codegen and splices the results into the host syntax tree.
pub struct Reconciler<'a> {
    config: &'a TranspileConfig,
}

impl<'a> Reconciler<'a> {
    pub fn new(config: &'a TranspileConfig) -> Self {
        Self { config }
    }

    pub fn reconcile(&self, scanned: ScanOutput) -> Result<Reconciled> {
        let ScanOutput { source, table } = scanned;

        let mut file = syn::parse_file(&source)
            .map_err(|err| HostParseError::from_syn(&err, &source))?;
        debug!(items = file.items.len(), "parsed annotated source");

        let codegen = Codegen::new(self.config);
        let mut generated = FxHashMap::default();
        for (id, region) in table.iter() {
            let expr = codegen
                .generate(&region.root)
                .map_err(|err| locate(err, region.span.offset))?;
            generated.insert(id, expr);
        }

        let mut replacer = PlaceholderReplacer::new(&self.config.placeholder, &table, &generated);
        replacer.visit_file_mut(&mut file);
        let splices = replacer.finish()?;

        let placed: FxHashSet<usize> = splices.iter().map(|splice| splice.id).collect();
        if let Some((id, region)) = table.iter().find(|(id, _)| !placed.contains(id)) {
            return Err(
                ReconcileError::unplaced(id, region.span.offset, &region.span.text).into(),
            );
        }
        debug!(replaced = splices.len(), "replaced placeholders");

        let source = match self.config.emit {
            Emit::Splice => splice::apply(&source, &splices),
            Emit::Pretty => prettyplease::unparse(&file),
        };
        Ok(Reconciled { file, source })
    }
}

/// Points errors raised while generating a region at that region.
///
/// Segment errors carry offsets into an attribute value or text run, which
/// mean nothing against the whole file.
fn locate(err: Error, offset: usize) -> Error {
    match err {
        Error::Lex(mut err) => {
            err.position = offset;
            err.opened_at = None;
            Error::Lex(err)
        }
        Error::Codegen(err) => Error::Codegen(err.at(offset)),
        other => other,
    }
}
