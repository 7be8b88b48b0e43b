//! HCL parser using tree-sitter-hcl

use crate::error::{Error, Result};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tree_sitter::{Node, Parser, Tree};

use super::blocks::Block;

/// A syntax problem reported by the parser
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// 1-based line
    pub line: usize,
    /// 1-based column
    pub column: usize,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}", self.line, self.column, self.message)
    }
}

/// The outcome of analysing one file, together with the diagnostics the
/// parser produced along the way.
#[derive(Debug, Clone)]
pub struct Parsed<T> {
    pub value: T,
    pub diagnostics: Vec<Diagnostic>,
}

impl<T> Parsed<T> {
    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

/// Parser for Terraform configuration files
pub struct HclParser {
    parser: Parser,
}

impl HclParser {
    /// Create a new HCL parser
    pub fn new() -> Result<Self> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_hcl::LANGUAGE.into())
            .map_err(|e| Error::TreeSitterError(format!("Failed to set HCL language: {e}")))?;
        Ok(Self { parser })
    }

    /// Read and parse a configuration file from disk
    pub fn parse_file(&mut self, path: &Path) -> Result<HclFile> {
        let source = fs::read_to_string(path).map_err(|e| Error::io_at(path, e))?;
        self.parse_source(path, source)
    }

    /// Parse configuration source that was already loaded
    pub fn parse_source(&mut self, path: &Path, source: String) -> Result<HclFile> {
        let tree = self.parser.parse(&source, None).ok_or_else(|| Error::ParseError {
            path: path.to_path_buf(),
            message: "parser produced no syntax tree".to_string(),
        })?;

        let diagnostics = collect_diagnostics(tree.root_node());
        Ok(HclFile {
            path: path.to_path_buf(),
            tree,
            source,
            diagnostics,
        })
    }
}

/// A parsed configuration file
pub struct HclFile {
    pub path: PathBuf,
    pub tree: Tree,
    pub source: String,
    pub diagnostics: Vec<Diagnostic>,
}

impl HclFile {
    /// Top-level blocks of the file, in source order
    pub fn blocks(&self) -> Vec<Block<'_>> {
        let root = self.tree.root_node();
        let mut cursor = root.walk();
        root.named_children(&mut cursor)
            .filter(|child| child.kind() == "body")
            .flat_map(|body| Block::children_of(body, self.source.as_bytes()))
            .collect()
    }

    /// Top-level blocks of the given type
    pub fn blocks_of_type(&self, block_type: &str) -> Vec<Block<'_>> {
        self.blocks()
            .into_iter()
            .filter(|block| block.block_type() == block_type)
            .collect()
    }

    /// Wrap `value` with this file's diagnostics
    pub fn parsed<T>(&self, value: T) -> Parsed<T> {
        Parsed {
            value,
            diagnostics: self.diagnostics.clone(),
        }
    }
}

fn collect_diagnostics(root: Node<'_>) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    if !root.has_error() {
        return diagnostics;
    }

    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        let position = node.start_position();
        if node.is_missing() {
            diagnostics.push(Diagnostic {
                line: position.row + 1,
                column: position.column + 1,
                message: format!("missing {}", node.kind()),
            });
            continue;
        }
        if node.is_error() {
            diagnostics.push(Diagnostic {
                line: position.row + 1,
                column: position.column + 1,
                message: "syntax error".to_string(),
            });
            continue;
        }
        if node.has_error() {
            let mut cursor = node.walk();
            let children: Vec<_> = node.children(&mut cursor).collect();
            stack.extend(children.into_iter().rev());
        }
    }
    diagnostics
}
