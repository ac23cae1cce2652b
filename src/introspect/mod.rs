//! In-memory view of a loaded Python module.
//!
//! The renderer only talks to [`Introspectable`], the same questions a
//! runtime would answer through `dir()`, `getattr()` and `__doc__`.

pub mod types;

pub use types::*;

use crate::error::{DocError, Result};

/// A module-like or class-like unit whose members can be enumerated
pub trait Introspectable {
    /// Identity of the unit; owners of declared members compare against it
    fn name(&self) -> &str;

    fn doc(&self) -> Option<&str>;

    /// Every bound name, sorted by code point
    fn attribute_names(&self) -> Vec<String>;

    fn attribute(&self, name: &str) -> Result<&Attribute>;
}

impl Introspectable for ModuleUnit {
    fn name(&self) -> &str {
        &self.name
    }

    fn doc(&self) -> Option<&str> {
        self.docs.as_deref()
    }

    fn attribute_names(&self) -> Vec<String> {
        self.namespace.keys().cloned().collect()
    }

    fn attribute(&self, name: &str) -> Result<&Attribute> {
        self.namespace
            .get(name)
            .ok_or_else(|| DocError::attribute_not_found(&self.name, name))
    }
}

impl Introspectable for ClassUnit {
    fn name(&self) -> &str {
        &self.qualified_name
    }

    fn doc(&self) -> Option<&str> {
        self.docs.as_deref()
    }

    fn attribute_names(&self) -> Vec<String> {
        self.namespace.keys().cloned().collect()
    }

    fn attribute(&self, name: &str) -> Result<&Attribute> {
        self.namespace
            .get(name)
            .ok_or_else(|| DocError::attribute_not_found(&self.qualified_name, name))
    }
}
