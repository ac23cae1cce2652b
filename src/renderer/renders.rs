use crate::introspect::{ClassUnit, FunctionUnit};
use crate::renderer::components::*;
use crate::renderer::traits::*;

impl Render for ClassUnit {
    fn render(&self, name: &str, _context: &RenderContext) -> String {
        let docs = DocRenderer.render_docs(self.docs.as_deref());
        format!("## Class {}\n{}\n", name, docs)
    }
}

impl Render for FunctionUnit {
    fn render(&self, name: &str, context: &RenderContext) -> String {
        // Only top-level functions document their call shape
        let heading = if context.in_class() {
            format!("### Method {}", name)
        } else {
            format!(
                "## Function {}{}",
                name,
                SignatureRenderer.format_parameters(self)
            )
        };

        let docs = DocRenderer.render_docs(self.docs.as_deref());
        format!("{}\n{}\n", heading, docs)
    }
}
