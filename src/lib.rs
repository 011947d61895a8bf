//! Inline markup for Rust source.
//!
//! `tagsplice` rewrites Rust files that contain HTML-like markup in expression
//! position into plain Rust that builds the same tree through nested calls:
//!
//! ```text
//! fn view(name: &str) -> Node {            fn view(name: &str) -> Node {
//!     <div class="card">                       elem::div(
//!         <h1>{s:name}</h1>          =>            vecty::markup(
//!     </div>                                           vecty::class("card"),
//! }                                                ),
//!                                                  elem::heading1(
//!                                                      vecty::text(name),
//!                                                  ),
//!                                              )
//!                                          }
//! ```
//!
//! # Pipeline
//!
//! The rewrite happens in two passes connected by a table of captured regions:
//!
//! 1. [`scanner`] copies the file, replacing every markup region with a
//!    numbered placeholder call `tagsplice::html(id, r#"<raw markup>"#)` and
//!    recording the parsed [`TagTree`](markup::TagTree) under that id.
//! 2. [`reconcile`] parses the annotated text as Rust with `syn`, turns each
//!    recorded tree into a [`GeneratedExpr`](codegen::GeneratedExpr) and
//!    swaps it in for its placeholder.
//!
//! Text and attribute values may embed Rust in braces. `{expr}` is passed
//! through as is; `{s:expr}` wraps it in the text call.
//!
//! # Usage
//!
//! ```ignore
//! let rewritten = tagsplice::compile(&std::fs::read_to_string("view.rs")?)?;
//! ```
//!
//! Any error aborts the file. [`Error::render`] formats positioned errors
//! against the source in the style of compiler diagnostics.

pub mod codegen;
pub mod config;
pub mod error;
pub mod markup;
pub mod reconcile;
pub mod scanner;
pub mod segment;

pub use config::{ApiPaths, Emit, TranspileConfig};
pub use error::{Error, Result};
pub use reconcile::Reconciled;
pub use scanner::{PlaceholderTable, ScanOutput};

use tracing::debug;

use crate::reconcile::Reconciler;

/// Runs the pipeline with one configuration.
///
/// A transpiler holds no per-file state, so one instance can compile any
/// number of files.
#[derive(Debug, Clone, Default)]
pub struct Transpiler {
    config: TranspileConfig,
}

impl Transpiler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: TranspileConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TranspileConfig {
        &self.config
    }

    /// Pass one only: the placeholder-annotated source and its region table.
    pub fn extract(&self, source: &str) -> Result<ScanOutput> {
        let scanned = scanner::scan(source, &self.config.placeholder)?;
        debug!(regions = scanned.table.len(), "scanned source");
        Ok(scanned)
    }

    /// Pass two on the output of [`Transpiler::extract`].
    pub fn reconcile(&self, scanned: ScanOutput) -> Result<Reconciled> {
        Reconciler::new(&self.config).reconcile(scanned)
    }

    /// Both passes, returning the reconciled tree along with the text.
    pub fn compile_file(&self, source: &str) -> Result<Reconciled> {
        self.reconcile(self.extract(source)?)
    }

    pub fn compile(&self, source: &str) -> Result<String> {
        Ok(self.compile_file(source)?.source)
    }
}

/// Rewrites every markup region in `source` with the default configuration.
pub fn compile(source: &str) -> Result<String> {
    Transpiler::new().compile(source)
}

pub fn compile_with_config(source: &str, config: TranspileConfig) -> Result<String> {
    Transpiler::with_config(config).compile(source)
}

/// Runs only the scanner, returning the annotated source and the region table.
///
/// Useful for inspecting what was captured; see [`ScanOutput::debug_string`].
pub fn extract_markup_only(source: &str) -> Result<(String, PlaceholderTable)> {
    let ScanOutput { source, table } = Transpiler::new().extract(source)?;
    Ok((source, table))
}

/// [`compile`] for raw file contents. Input that is not UTF-8 is rejected.
pub fn compile_bytes(source: &[u8]) -> Result<Vec<u8>> {
    let source = std::str::from_utf8(source)?;
    Ok(compile(source)?.into_bytes())
}

/// [`extract_markup_only`] for raw file contents.
pub fn extract_markup_only_bytes(source: &[u8]) -> Result<(String, PlaceholderTable)> {
    extract_markup_only(std::str::from_utf8(source)?)
}
