//! Error types shared by the loader, the renderer and the extractor

use std::path::PathBuf;
use thiserror::Error;

/// Everything that can abort documentation extraction.
///
/// No variant is retried; the first error ends the run.
#[derive(Debug, Error)]
pub enum DocError {
    /// A single-file input that does not reference an existing file
    #[error("input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    /// A directory input that is missing or not a directory
    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    /// The source could not be read as a Python module
    #[error("failed to load {}: {message}", path.display())]
    Load { path: PathBuf, message: String },

    /// The source is not syntactically valid Python
    #[error("parse error in {}:{line}:{column}: {message}", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        column: usize,
        message: String,
    },

    /// Lookup of a name the unit does not bind
    #[error("'{unit}' has no attribute '{name}'")]
    AttributeNotFound { unit: String, name: String },

    /// The output sink could not be opened or written
    #[error("failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Two units of one run resolved to the same output file
    #[error("output file collision: {} was already written in this run", path.display())]
    FilenameCollision { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl DocError {
    pub fn load(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Load {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }

    pub fn attribute_not_found(unit: &str, name: &str) -> Self {
        Self::AttributeNotFound {
            unit: unit.to_string(),
            name: name.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DocError>;
