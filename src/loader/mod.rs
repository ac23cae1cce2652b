//! Static Python loader.
//!
//! Turns a source file into a [`ModuleUnit`] without running it: the file is
//! parsed with tree-sitter and its bindings are recorded the way the module
//! object would expose them after import.

pub mod builder;
pub mod literal;

use std::fs;
use std::path::Path;

use tracing::debug;
use tree_sitter::{Node, Parser, Tree};

use crate::error::{DocError, Result};
use crate::introspect::ModuleUnit;
use builder::NamespaceBuilder;

/// Loads the Python file at `path` as a module named `display_name`
pub fn load_module(path: &Path, display_name: &str) -> Result<ModuleUnit> {
    if !path.is_file() {
        return Err(DocError::InputNotFound(path.to_path_buf()));
    }

    let bytes = fs::read(path).map_err(|e| DocError::load(path, e.to_string()))?;
    let source = String::from_utf8(bytes)
        .map_err(|e| DocError::load(path, format!("source is not valid UTF-8: {}", e)))?;

    let module = parse_module(&source, display_name, path)?;
    debug!(
        module = display_name,
        members = module.namespace.len(),
        "loaded module"
    );
    Ok(module)
}

/// Parses Python source held in memory; `path` is only used in errors
pub fn parse_module(source: &str, display_name: &str, path: &Path) -> Result<ModuleUnit> {
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);
    let tree = parse_source(source, path)?;

    let root = tree.root_node();
    if let Some(error) = first_error(root) {
        let message = if error.is_missing() {
            format!("missing '{}'", error.kind())
        } else {
            format!("invalid syntax near '{}'", snippet(node_text(&error, source)))
        };
        return Err(DocError::Parse {
            path: path.to_path_buf(),
            line: error.start_position().row + 1,
            column: error.start_position().column + 1,
            message,
        });
    }

    Ok(NamespaceBuilder::new(source).build_module(root, display_name))
}

fn parse_source(source: &str, path: &Path) -> Result<Tree> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_python::LANGUAGE.into())
        .map_err(|e| DocError::load(path, format!("failed to set tree-sitter language: {}", e)))?;

    parser
        .parse(source, None)
        .ok_or_else(|| DocError::load(path, "failed to parse source code"))
}

/// First error or missing node in document order
fn first_error(node: Node) -> Option<Node> {
    if !node.has_error() {
        return None;
    }
    if node.is_error() || node.is_missing() {
        return Some(node);
    }

    let mut cursor = node.walk();
    let children: Vec<Node> = node.children(&mut cursor).collect();
    children.into_iter().find_map(first_error).or(Some(node))
}

fn snippet(text: &str) -> &str {
    let line = text.lines().next().unwrap_or_default();
    match line.char_indices().nth(40) {
        Some((end, _)) => &line[..end],
        None => line,
    }
}

/// Get text for a tree-sitter node
pub fn node_text<'a>(node: &Node, source: &'a str) -> &'a str {
    &source[node.start_byte()..node.end_byte()]
}
