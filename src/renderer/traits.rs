/// Where the traversal currently is; the only state carried while recursing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    TopLevel,
    InsideClass,
}

/// Configuration context for rendering operations
#[derive(Debug, Clone, Copy)]
pub struct RenderContext {
    pub mode: RenderMode,
}

impl RenderContext {
    pub fn new() -> Self {
        Self {
            mode: RenderMode::TopLevel,
        }
    }

    /// Context for a class body. Entering a class from inside a class
    /// leaves the mode unchanged.
    pub fn enter_class(&self) -> Self {
        Self {
            mode: RenderMode::InsideClass,
        }
    }

    pub fn in_class(&self) -> bool {
        self.mode == RenderMode::InsideClass
    }
}

impl Default for RenderContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Renders one documented member as a heading line followed by its body.
///
/// `name` is the attribute name the member was found under, which differs
/// from the declared name for aliases.
pub trait Render {
    fn render(&self, name: &str, context: &RenderContext) -> String;
}
