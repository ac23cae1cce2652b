use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

/// Names bound in a module or class body, kept in `dir()` order
pub type Namespace = BTreeMap<String, Attribute>;

/// Coarse classification the renderer dispatches on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
    Class,
    Function,
    Other,
}

/// The value a name resolves to inside a unit.
///
/// Classes and functions are shared between every namespace that can see
/// them (a base class and its subclasses, an alias and its target), so the
/// owner they report is always the unit that declared them.
#[derive(Debug, Clone)]
pub enum Attribute {
    Class(Rc<ClassUnit>),
    Function(Rc<FunctionUnit>),
    /// `import m` / `import m as n`
    Module(String),
    /// `from m import x`
    Imported { module: String, name: String },
    Data,
}

impl Attribute {
    pub fn kind(&self) -> MemberKind {
        match self {
            Attribute::Class(_) => MemberKind::Class,
            Attribute::Function(_) => MemberKind::Function,
            _ => MemberKind::Other,
        }
    }

    /// Qualified name of the unit this value was declared in, if it has one
    pub fn owner(&self) -> Option<&str> {
        match self {
            Attribute::Class(class) => Some(&class.owner),
            Attribute::Function(function) => Some(&function.owner),
            Attribute::Imported { module, .. } => Some(module),
            Attribute::Module(_) | Attribute::Data => None,
        }
    }

    pub fn as_class(&self) -> Option<&ClassUnit> {
        match self {
            Attribute::Class(class) => Some(&**class),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&FunctionUnit> {
        match self {
            Attribute::Function(function) => Some(&**function),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ModuleUnit {
    pub name: String,
    pub docs: Option<String>,
    pub namespace: Namespace,
}

#[derive(Debug, Clone)]
pub struct ClassUnit {
    pub qualified_name: String,
    pub owner: String,
    pub docs: Option<String>,
    pub namespace: Namespace,
}

#[derive(Debug, Clone)]
pub struct FunctionUnit {
    pub name: String,
    pub owner: String,
    pub parameters: Vec<Parameter>,
    pub docs: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterKind {
    /// Ordinary named parameter, positional or keyword
    Named,
    /// `*args`
    VarPositional,
    /// `**kwargs`
    VarKeyword,
    /// Bare `*` ending the positional parameters
    KeywordOnlyMarker,
    /// `/` ending the positional-only parameters
    PositionalOnlyMarker,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub name: String,
    pub kind: ParameterKind,
    pub annotation: Option<String>,
    pub default: Option<String>,
}

impl Parameter {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ParameterKind::Named,
            annotation: None,
            default: None,
        }
    }

    pub fn marker(kind: ParameterKind) -> Self {
        Self {
            name: String::new(),
            kind,
            annotation: None,
            default: None,
        }
    }

    pub fn with_annotation(mut self, annotation: impl Into<String>) -> Self {
        self.annotation = Some(annotation.into());
        self
    }

    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }
}

/// The parameter exactly as it is declared: `b=1`, `x: int = 0`, `*args`
impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ParameterKind::KeywordOnlyMarker => return write!(f, "*"),
            ParameterKind::PositionalOnlyMarker => return write!(f, "/"),
            ParameterKind::VarPositional => write!(f, "*{}", self.name)?,
            ParameterKind::VarKeyword => write!(f, "**{}", self.name)?,
            ParameterKind::Named => write!(f, "{}", self.name)?,
        }

        match (&self.annotation, &self.default) {
            (Some(annotation), Some(default)) => write!(f, ": {} = {}", annotation, default),
            (Some(annotation), None) => write!(f, ": {}", annotation),
            (None, Some(default)) => write!(f, "={}", default),
            (None, None) => Ok(()),
        }
    }
}
