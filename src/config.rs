use std::path::{Path, PathBuf};

use clap::ValueEnum;

/// What to do when two units of one run map to the same output file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum CollisionPolicy {
    /// Abort the run
    #[default]
    Error,
    /// Last writer wins
    Overwrite,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    File(PathBuf),
    Directory(PathBuf),
}

#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    pub input: InputSource,
    pub output_dir: PathBuf,
    /// Descend into subdirectories of a directory input
    pub recursive: bool,
    pub collision_policy: CollisionPolicy,
}

impl ExtractorConfig {
    pub fn new(input: InputSource, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input,
            output_dir: output_dir.into(),
            recursive: false,
            collision_policy: CollisionPolicy::default(),
        }
    }

    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    pub fn collision_policy(mut self, policy: CollisionPolicy) -> Self {
        self.collision_policy = policy;
        self
    }
}

/// Expands a leading `~` and makes the path absolute against the current
/// directory. The path does not need to exist.
pub fn absolute_path(path: &Path) -> std::io::Result<PathBuf> {
    let expanded = match path.strip_prefix("~") {
        Ok(rest) => match dirs::home_dir() {
            Some(home) => home.join(rest),
            None => path.to_path_buf(),
        },
        Err(_) => path.to_path_buf(),
    };

    if expanded.is_absolute() {
        Ok(expanded)
    } else {
        Ok(std::env::current_dir()?.join(expanded))
    }
}
