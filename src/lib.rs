//! # pydocmd
//!
//! Extracts module, class, method and function docstrings from Python
//! sources and renders one Markdown document per module.
//!
//! The pipeline is loader → [`introspect::Introspectable`] unit →
//! [`renderer::MarkdownRenderer`], driven per file by [`extract::Extractor`].

pub mod config;
pub mod error;
pub mod extract;
pub mod filter;
pub mod introspect;
pub mod loader;
pub mod renderer;

#[cfg(test)]
mod tests;

pub use config::{CollisionPolicy, ExtractorConfig, InputSource};
pub use error::{DocError, Result};
pub use extract::{ExtractionReport, Extractor};
pub use filter::MemberFilter;
pub use introspect::*;
pub use renderer::{MarkdownRenderer, Render, RenderContext, RenderMode};
