use crate::error::Result;
use crate::introspect::Introspectable;

/// Structural names every module or class carries whatever its author wrote
pub const ILLEGAL_ATTRIBUTES: &[&str] = &[
    "__builtins__",
    "__cached__",
    "__file__",
    "__loader__",
    "__name__",
    "__package__",
    "__spec__",
    "__abstractmethods__",
    "__class__",
];

/// Decides which names of a unit are its own documentable members
#[derive(Debug, Default, Clone, Copy)]
pub struct MemberFilter;

impl MemberFilter {
    /// `false` for deny-listed names and for values declared in another unit.
    ///
    /// Values without an owner pass; the renderer's kind check drops them.
    /// Lookup failures propagate unchanged.
    pub fn is_documentable(&self, unit: &dyn Introspectable, name: &str) -> Result<bool> {
        if ILLEGAL_ATTRIBUTES.contains(&name) {
            return Ok(false);
        }

        let value = unit.attribute(name)?;
        match value.owner() {
            Some(owner) => Ok(owner == unit.name()),
            None => Ok(true),
        }
    }
}
