//! Bundle analysis using tree-sitter for JavaScript.
//!
//! This module parses a Lasso bundle file and walks its syntax tree to
//! build an ordered inventory of module-like units. The first record always
//! describes the bundle as a whole; every call expression after that gets
//! one record, classified against the loader runtime vocabulary and
//! enriched with whatever literals and factory content its shape provides.

mod classify;
mod content;
mod literals;

pub use classify::CallKind;

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tree_sitter::{Node, Parser, TreeCursor};

use crate::compress;
use crate::stats::{StatsRecord, BUNDLE_PACKAGE_NAME};

/// Name attached to records for the bundle's own top-level wrapper call.
const MODULE_WRAPPER_NAME: &str = "module.js";
const MODULE_WRAPPER_PATH: &str = "/module.js";

/// Errors that can occur during bundle analysis.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Failed to read file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Failed to parse bundle: {path}")]
    Parse { path: String },

    #[error("Tree-sitter language initialization failed")]
    LanguageInit,
}

/// Result type for analysis operations.
pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// Outcome of analyzing one bundle.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisOutcome {
    /// The parsed program had zero top-level statements.
    EmptyFile,
    /// The ordered record collection: the whole-bundle record first, then
    /// one record per call expression in document order.
    Report(Vec<StatsRecord>),
}

impl AnalysisOutcome {
    /// Returns the record collection, or `None` for an empty file.
    pub fn records(&self) -> Option<&[StatsRecord]> {
        match self {
            AnalysisOutcome::Report(records) => Some(records),
            AnalysisOutcome::EmptyFile => None,
        }
    }

    /// Returns true for the empty-file sentinel.
    pub fn is_empty_file(&self) -> bool {
        matches!(self, AnalysisOutcome::EmptyFile)
    }
}

/// Analyzer for Lasso bundle files.
///
/// Owns a tree-sitter parser configured for JavaScript; one instance can
/// analyze any number of bundles in sequence.
///
/// # Example
///
/// ```
/// use std::path::Path;
/// use lassoscope::analysis::BundleAnalyzer;
///
/// let mut analyzer = BundleAnalyzer::new().unwrap();
/// let outcome = analyzer
///     .analyze_source("$_mod.run('/app$1.0.0/index.js');", Path::new("bundle.js"))
///     .unwrap();
/// let records = outcome.records().unwrap();
/// assert_eq!(records[0].package_name.as_deref(), Some("BundleSize"));
/// assert_eq!(records[1].kind.as_deref(), Some("run"));
/// ```
pub struct BundleAnalyzer {
    parser: Parser,
}

impl BundleAnalyzer {
    /// Create a new BundleAnalyzer.
    pub fn new() -> AnalysisResult<Self> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_javascript::LANGUAGE.into())
            .map_err(|_| AnalysisError::LanguageInit)?;
        Ok(Self { parser })
    }

    /// Analyze the bundle file at `path`.
    ///
    /// A path that is not directly accessible is re-resolved against the
    /// current working directory before reading.
    pub fn analyze_file(&mut self, path: &Path) -> AnalysisResult<AnalysisOutcome> {
        let resolved = resolve_input_path(path)?;
        let source = fs::read_to_string(&resolved)?;
        self.analyze_source(&source, &resolved)
    }

    /// Analyze bundle source text directly, parsed as a standalone script.
    ///
    /// A program with zero top-level statements yields
    /// [`AnalysisOutcome::EmptyFile`]; syntax errors are fatal.
    pub fn analyze_source(&mut self, source: &str, path: &Path) -> AnalysisResult<AnalysisOutcome> {
        let tree = self
            .parser
            .parse(source, None)
            .ok_or_else(|| AnalysisError::Parse {
                path: path.display().to_string(),
            })?;

        let root = tree.root_node();
        if root.has_error() {
            return Err(AnalysisError::Parse {
                path: path.display().to_string(),
            });
        }
        if statement_count(&root) == 0 {
            return Ok(AnalysisOutcome::EmptyFile);
        }

        let mut records = vec![bundle_record(&root, source)?];
        let mut cursor = root.walk();
        visit_node(&mut cursor, source, &mut records)?;
        Ok(AnalysisOutcome::Report(records))
    }
}

/// Count the program's top-level statements. Comments and shebang lines are
/// tree nodes but not statements.
fn statement_count(root: &Node) -> usize {
    let mut cursor = root.walk();
    root.named_children(&mut cursor)
        .filter(|child| !matches!(child.kind(), "comment" | "hash_bang_line"))
        .count()
}

/// Builds the whole-bundle record seeded at the front of the collection.
/// Raw size covers the program span; compressed sizes cover the entire file
/// text.
fn bundle_record(root: &Node, source: &str) -> AnalysisResult<StatsRecord> {
    let mut record = StatsRecord::new();
    record.package_name = Some(BUNDLE_PACKAGE_NAME.to_string());
    record.file_name = Some("program".to_string());
    record.size = root.end_byte() - root.start_byte();

    let gzip = compress::gzip_size(source.as_bytes())?;
    let brotli = compress::brotli_size(source.as_bytes())?;
    record.set_compressed_sizes(gzip, brotli);
    Ok(record)
}

/// Depth-first pre-order traversal; every call expression appends one
/// record in visitation order.
fn visit_node(
    cursor: &mut TreeCursor,
    source: &str,
    records: &mut Vec<StatsRecord>,
) -> AnalysisResult<()> {
    let node = cursor.node();
    if node.kind() == "call_expression" {
        records.push(record_for_call(&node, source)?);
    }

    if cursor.goto_first_child() {
        loop {
            visit_node(cursor, source, records)?;
            if !cursor.goto_next_sibling() {
                break;
            }
        }
        cursor.goto_parent();
    }
    Ok(())
}

/// Builds the record for one call-expression node: size from byte offsets,
/// classification from the callee shape, then literal and factory-content
/// extraction as the classification allows.
fn record_for_call(node: &Node, source: &str) -> AnalysisResult<StatsRecord> {
    let mut record = StatsRecord::new();
    record.size = node.end_byte() - node.start_byte();

    let kind = if let Some(method) = classify::member_method_name(node, source) {
        record.kind = Some(method.to_string());
        CallKind::from_method(method)
    } else if classify::is_module_wrapper(node) {
        record.package_name = Some(MODULE_WRAPPER_NAME.to_string());
        record.file_name = Some(MODULE_WRAPPER_NAME.to_string());
        record.path = Some(MODULE_WRAPPER_PATH.to_string());
        CallKind::ModuleWrapper
    } else {
        CallKind::Unknown
    };

    let args = classify::call_arguments(node);
    if !args.is_empty() {
        literals::extract_literals(&mut record, kind, &args, source);
    }
    if kind == CallKind::Def {
        content::extract_factory_content(source, &mut record, &args)?;
    }
    Ok(record)
}

/// Resolves the input path the way a shell user expects: take it as given
/// when it exists, otherwise anchor it to the current working directory.
fn resolve_input_path(path: &Path) -> AnalysisResult<PathBuf> {
    if path.exists() {
        Ok(path.to_path_buf())
    } else {
        Ok(env::current_dir()?.join(path))
    }
}
