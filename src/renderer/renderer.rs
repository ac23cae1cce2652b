use std::io::Write;

use tracing::debug;

use crate::error::Result;
use crate::filter::MemberFilter;
use crate::introspect::{Introspectable, MemberKind};
use crate::renderer::traits::*;

/// Walks a unit depth-first and writes its Markdown to a sink
#[derive(Debug, Default)]
pub struct MarkdownRenderer {
    filter: MemberFilter,
}

impl MarkdownRenderer {
    pub fn new() -> Self {
        Self {
            filter: MemberFilter,
        }
    }

    /// Writes the `# <display_name>` header, the module docstring and then
    /// every documented member.
    pub fn render_module<W: Write + ?Sized>(
        &self,
        unit: &dyn Introspectable,
        sink: &mut W,
        display_name: &str,
    ) -> Result<()> {
        sink.write_all(format!("# {}\n\n", display_name).as_bytes())?;

        if let Some(docs) = unit.doc().filter(|docs| !docs.is_empty()) {
            sink.write_all(docs.as_bytes())?;
            if !docs.ends_with('\n') {
                sink.write_all(b"\n")?;
            }
        }

        self.render_members(unit, sink, &RenderContext::new())
    }

    /// Writes one block per documented class or function of `unit`, in
    /// attribute order, descending into class bodies.
    pub fn render_members<W: Write + ?Sized>(
        &self,
        unit: &dyn Introspectable,
        sink: &mut W,
        context: &RenderContext,
    ) -> Result<()> {
        for name in unit.attribute_names() {
            if !self.filter.is_documentable(unit, &name)? {
                continue;
            }

            let value = unit.attribute(&name)?;
            match value.kind() {
                MemberKind::Class => {
                    let Some(class) = value.as_class() else {
                        continue;
                    };
                    debug!(unit = unit.name(), member = %name, "documenting class");
                    sink.write_all(class.render(&name, context).as_bytes())?;
                    self.render_members(class, sink, &context.enter_class())?;
                }
                MemberKind::Function => {
                    let Some(function) = value.as_function() else {
                        continue;
                    };
                    debug!(unit = unit.name(), member = %name, "documenting function");
                    sink.write_all(function.render(&name, context).as_bytes())?;
                }
                MemberKind::Other => {}
            }
        }

        Ok(())
    }

    pub fn render_to_string(&self, unit: &dyn Introspectable, display_name: &str) -> Result<String> {
        let mut buffer = Vec::new();
        self.render_module(unit, &mut buffer, display_name)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}
