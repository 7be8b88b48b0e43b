//! Typed views over HCL blocks
//!
//! Only three block shapes matter for entrypoint discovery:
//!
//! ```hcl
//! terraform {
//!   backend "gcs" {
//!     bucket = "my-state"
//!     prefix = "project1"
//!   }
//! }
//!
//! module "network" {
//!   source = "../modules/network"
//! }
//! ```
//!
//! Everything else in a file is skipped without being interpreted.

use tree_sitter::Node;

/// A generic block: `type "label" ... { body }`
#[derive(Clone, Copy)]
pub struct Block<'a> {
    node: Node<'a>,
    source: &'a [u8],
}

impl<'a> Block<'a> {
    /// Blocks directly inside a `body` node
    pub(crate) fn children_of(body: Node<'a>, source: &'a [u8]) -> Vec<Block<'a>> {
        let mut cursor = body.walk();
        body.named_children(&mut cursor)
            .filter(|child| child.kind() == "block")
            .map(|node| Block { node, source })
            .collect()
    }

    /// The block type identifier, e.g. `terraform` or `module`
    pub fn block_type(&self) -> &'a str {
        let mut cursor = self.node.walk();
        let first = self.node.named_children(&mut cursor).next();
        first
            .filter(|n| n.kind() == "identifier")
            .and_then(|n| n.utf8_text(self.source).ok())
            .unwrap_or("")
    }

    /// Block labels, in order, with quotes removed
    pub fn labels(&self) -> Vec<String> {
        let mut labels = Vec::new();
        let mut cursor = self.node.walk();
        for child in self.node.named_children(&mut cursor).skip(1) {
            match child.kind() {
                "string_lit" => labels.push(string_value(child, self.source).unwrap_or_default()),
                "identifier" => {
                    labels.push(child.utf8_text(self.source).unwrap_or("").to_string())
                }
                "block_start" => break,
                _ => {}
            }
        }
        labels
    }

    fn body(&self) -> Option<Node<'a>> {
        let mut cursor = self.node.walk();
        let body = self
            .node
            .named_children(&mut cursor)
            .find(|child| child.kind() == "body");
        body
    }

    /// Nested blocks of the given type
    pub fn blocks(&self, block_type: &str) -> Vec<Block<'a>> {
        self.body()
            .map(|body| Block::children_of(body, self.source))
            .unwrap_or_default()
            .into_iter()
            .filter(|block| block.block_type() == block_type)
            .collect()
    }

    /// Literal string value of an attribute
    ///
    /// Returns `None` when the attribute is absent or is not a plain quoted
    /// string (interpolations, references, function calls).
    pub fn attribute(&self, name: &str) -> Option<String> {
        let body = self.body()?;
        let mut cursor = body.walk();
        let attributes: Vec<_> = body
            .named_children(&mut cursor)
            .filter(|child| child.kind() == "attribute")
            .collect();

        attributes.into_iter().find_map(|attr| {
            let mut cursor = attr.walk();
            let mut parts = attr
                .named_children(&mut cursor)
                .filter(|child| child.kind() != "comment");
            let key = parts.next()?;
            if key.utf8_text(self.source).ok()? != name {
                return None;
            }
            let value = parts.next()?;
            Some(string_value(value, self.source))
        })?
    }

    /// 1-based line where the block starts
    pub fn line(&self) -> usize {
        self.node.start_position().row + 1
    }
}

/// `terraform { ... }`
pub struct TerraformBlock<'a>(Block<'a>);

/// `backend "<type>" { ... }` inside a terraform block
pub struct BackendBlock<'a>(Block<'a>);

/// `module "<name>" { source = "..." }`
pub struct ModuleBlock<'a>(Block<'a>);

impl<'a> TerraformBlock<'a> {
    pub fn from_block(block: Block<'a>) -> Option<Self> {
        (block.block_type() == "terraform").then_some(Self(block))
    }

    pub fn backends(&self) -> Vec<BackendBlock<'a>> {
        self.0.blocks("backend").into_iter().map(BackendBlock).collect()
    }
}

impl<'a> BackendBlock<'a> {
    /// Backend type label, e.g. `gcs` or `s3`
    pub fn backend_type(&self) -> String {
        self.0.labels().into_iter().next().unwrap_or_default()
    }

    pub fn attribute(&self, name: &str) -> Option<String> {
        self.0.attribute(name)
    }
}

impl<'a> ModuleBlock<'a> {
    pub fn from_block(block: Block<'a>) -> Option<Self> {
        (block.block_type() == "module").then_some(Self(block))
    }

    pub fn name(&self) -> String {
        self.0.labels().into_iter().next().unwrap_or_default()
    }

    pub fn source(&self) -> Option<String> {
        self.0.attribute("source")
    }

    pub fn line(&self) -> usize {
        self.0.line()
    }
}

/// Extract the text of a literal string expression
fn string_value(node: Node<'_>, source: &[u8]) -> Option<String> {
    match node.kind() {
        "string_lit" | "quoted_template" => {
            let mut value = String::new();
            let mut cursor = node.walk();
            for child in node.named_children(&mut cursor) {
                match child.kind() {
                    "template_literal" => value.push_str(child.utf8_text(source).ok()?),
                    "quoted_template_start" | "quoted_template_end" => {}
                    _ => return None,
                }
            }
            Some(value)
        }
        "expression" | "literal_value" | "template_expr" => {
            let mut cursor = node.walk();
            let mut children = node
                .named_children(&mut cursor)
                .filter(|child| child.kind() != "comment");
            let only = children.next()?;
            if children.next().is_some() {
                return None;
            }
            string_value(only, source)
        }
        _ => None,
    }
}
