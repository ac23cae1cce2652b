//! Runs the loader and renderer over the configured input and writes one
//! Markdown file per module.

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::config::{CollisionPolicy, ExtractorConfig, InputSource};
use crate::error::{DocError, Result};
use crate::loader::load_module;
use crate::renderer::MarkdownRenderer;

/// Files written by one run, in processing order
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ExtractionReport {
    pub files: Vec<PathBuf>,
}

pub struct Extractor {
    config: ExtractorConfig,
    renderer: MarkdownRenderer,
}

impl Extractor {
    pub fn new(config: ExtractorConfig) -> Self {
        Self {
            config,
            renderer: MarkdownRenderer::new(),
        }
    }

    /// Processes every input unit; the first failure aborts the batch
    pub fn extract(&self) -> Result<ExtractionReport> {
        let mut written = HashSet::new();
        let mut report = ExtractionReport::default();

        match &self.config.input {
            InputSource::File(path) => {
                if !path.is_file() {
                    return Err(DocError::InputNotFound(path.clone()));
                }
                let display_name = module_stem(path);
                self.extract_file(path, &display_name, &mut written, &mut report)?;
            }
            InputSource::Directory(dir) => {
                if !dir.is_dir() {
                    return Err(DocError::NotADirectory(dir.clone()));
                }
                for (path, display_name) in self.discover(dir)? {
                    self.extract_file(&path, &display_name, &mut written, &mut report)?;
                }
            }
        }

        Ok(report)
    }

    /// `.py` files under `dir` with their dotted display names
    fn discover(&self, dir: &Path) -> Result<Vec<(PathBuf, String)>> {
        let max_depth = if self.config.recursive { usize::MAX } else { 1 };
        let walker = WalkDir::new(dir)
            .min_depth(1)
            .max_depth(max_depth)
            .follow_links(true)
            .sort_by_file_name();

        let mut units = Vec::new();
        for entry in walker {
            let entry = entry.map_err(|e| DocError::Io(e.into()))?;
            let path = entry.path();
            let is_python = path
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.ends_with(".py"));
            if !is_python || !path.is_file() {
                continue;
            }

            let relative = path.strip_prefix(dir).unwrap_or(path);
            units.push((path.to_path_buf(), display_name(relative)));
        }

        debug!(dir = %dir.display(), count = units.len(), "discovered python files");
        Ok(units)
    }

    fn extract_file(
        &self,
        path: &Path,
        display_name: &str,
        written: &mut HashSet<PathBuf>,
        report: &mut ExtractionReport,
    ) -> Result<()> {
        let module = load_module(path, display_name)?;
        let output = self.config.output_dir.join(format!("{}.md", display_name));

        if written.contains(&output) {
            match self.config.collision_policy {
                CollisionPolicy::Error => {
                    return Err(DocError::FilenameCollision { path: output });
                }
                CollisionPolicy::Overwrite => {
                    warn!(output = %output.display(), source = %path.display(), "overwriting output written earlier in this run");
                }
            }
        }

        let file = File::create(&output).map_err(|e| DocError::write(&output, e))?;
        let mut sink = BufWriter::new(file);
        self.renderer
            .render_module(&module, &mut sink, display_name)
            .map_err(|e| match e {
                DocError::Io(source) => DocError::write(&output, source),
                other => other,
            })?;
        sink.flush().map_err(|e| DocError::write(&output, e))?;

        info!(source = %path.display(), output = %output.display(), "wrote documentation");
        if written.insert(output.clone()) {
            report.files.push(output);
        }
        Ok(())
    }
}

fn module_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// `pkg/sub/c.py` relative to the input directory becomes `pkg.sub.c`
fn display_name(relative: &Path) -> String {
    let mut parts: Vec<String> = relative
        .parent()
        .map(|parent| {
            parent
                .components()
                .map(|component| component.as_os_str().to_string_lossy().into_owned())
                .collect()
        })
        .unwrap_or_default();
    parts.push(module_stem(relative));
    parts.join(".")
}
