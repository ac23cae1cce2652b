use crate::introspect::FunctionUnit;

/// Helper for rendering call signatures
pub struct SignatureRenderer;

impl SignatureRenderer {
    /// `(a, b=1, *args, **kwargs)`, or `()` for no parameters
    pub fn format_parameters(&self, function: &FunctionUnit) -> String {
        let params: Vec<String> = function
            .parameters
            .iter()
            .map(|param| param.to_string())
            .collect();
        format!("({})", params.join(", "))
    }
}

/// Helper for rendering docstring bodies
pub struct DocRenderer;

impl DocRenderer {
    /// The docstring verbatim, or an empty body when there is none
    pub fn render_docs(&self, docs: Option<&str>) -> String {
        docs.unwrap_or_default().to_string()
    }
}
