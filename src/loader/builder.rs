//! Builds module and class namespaces from a tree-sitter Python tree.

use std::rc::Rc;

use tree_sitter::Node;

use crate::introspect::{
    Attribute, ClassUnit, FunctionUnit, ModuleUnit, Namespace, Parameter, ParameterKind,
};
use crate::loader::literal::{decode_concatenated, decode_string_literal};
use crate::loader::node_text;

const MODULE_METADATA: &[&str] = &[
    "__builtins__",
    "__cached__",
    "__doc__",
    "__file__",
    "__loader__",
    "__name__",
    "__package__",
    "__spec__",
];

const CLASS_METADATA: &[&str] = &["__dict__", "__doc__", "__module__", "__weakref__"];

/// Decorators that turn a `def` into something other than a plain function
const NON_FUNCTION_DECORATORS: &[&str] = &[
    "property",
    "classmethod",
    "cached_property",
    "abstractproperty",
    "setter",
    "getter",
    "deleter",
];

const COMPOUND_STATEMENTS: &[&str] = &[
    "if_statement",
    "try_statement",
    "with_statement",
    "for_statement",
    "while_statement",
    "match_statement",
];

pub struct NamespaceBuilder<'a> {
    source: &'a str,
}

impl<'a> NamespaceBuilder<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { source }
    }

    fn text(&self, node: Node) -> &'a str {
        node_text(&node, self.source)
    }

    pub fn build_module(&self, root: Node, name: &str) -> ModuleUnit {
        let mut namespace: Namespace = MODULE_METADATA
            .iter()
            .map(|meta| (meta.to_string(), Attribute::Data))
            .collect();

        self.collect_block(root, name, &mut namespace, None);

        ModuleUnit {
            name: name.to_string(),
            docs: self.docstring(root),
            namespace,
        }
    }

    /// Binds every name declared by the statements directly in `block`.
    ///
    /// `globals` is the module namespace when `block` is a class body; class
    /// bodies never see the names of an enclosing class.
    fn collect_block(
        &self,
        block: Node,
        owner: &str,
        namespace: &mut Namespace,
        globals: Option<&Namespace>,
    ) {
        let mut cursor = block.walk();
        for statement in block.named_children(&mut cursor) {
            self.collect_statement(statement, owner, namespace, globals);
        }
    }

    fn collect_statement(
        &self,
        statement: Node,
        owner: &str,
        namespace: &mut Namespace,
        globals: Option<&Namespace>,
    ) {
        match statement.kind() {
            "function_definition" | "class_definition" => {
                self.bind_definition(statement, &[], owner, namespace, globals);
            }
            "decorated_definition" => {
                let Some(definition) = statement.child_by_field_name("definition") else {
                    return;
                };
                let mut cursor = statement.walk();
                let decorators: Vec<Node> = statement
                    .named_children(&mut cursor)
                    .filter(|child| child.kind() == "decorator")
                    .collect();
                self.bind_definition(definition, &decorators, owner, namespace, globals);
            }
            "import_statement" => self.bind_import(statement, namespace),
            "import_from_statement" => {
                let module = statement
                    .child_by_field_name("module_name")
                    .map(|node| self.text(node))
                    .unwrap_or_default();
                self.bind_from_import(statement, module, namespace);
            }
            "future_import_statement" => {
                self.bind_from_import(statement, "__future__", namespace);
            }
            "expression_statement" => {
                let mut cursor = statement.walk();
                for expression in statement.named_children(&mut cursor) {
                    if expression.kind() == "assignment" {
                        self.bind_assignment(expression, owner, namespace, globals);
                    }
                }
            }
            "delete_statement" => {
                let mut cursor = statement.walk();
                for target in statement.named_children(&mut cursor) {
                    self.unbind_targets(target, namespace);
                }
            }
            // `case` blocks sit in the block of a `match` statement
            "case_clause" => self.collect_compound(statement, owner, namespace, globals),
            kind if COMPOUND_STATEMENTS.contains(&kind) => {
                if kind == "for_statement" {
                    if let Some(left) = statement.child_by_field_name("left") {
                        self.bind_targets(left, &Attribute::Data, namespace);
                    }
                }
                self.collect_compound(statement, owner, namespace, globals);
            }
            _ => {}
        }
    }

    /// Statements nested in `if`/`try`/`with`/`match`/loop blocks bind at the same scope
    fn collect_compound(
        &self,
        node: Node,
        owner: &str,
        namespace: &mut Namespace,
        globals: Option<&Namespace>,
    ) {
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            if child.kind() == "block" {
                self.collect_block(child, owner, namespace, globals);
            } else if child.kind().ends_with("_clause") {
                self.collect_compound(child, owner, namespace, globals);
            }
        }
    }

    fn bind_definition(
        &self,
        definition: Node,
        decorators: &[Node],
        owner: &str,
        namespace: &mut Namespace,
        globals: Option<&Namespace>,
    ) {
        let Some(name) = definition.child_by_field_name("name").map(|n| self.text(n)) else {
            return;
        };

        let value = match definition.kind() {
            "function_definition" if self.changes_kind(decorators) => Attribute::Data,
            "function_definition" => {
                Attribute::Function(Rc::new(self.build_function(definition, name, owner)))
            }
            "class_definition" => {
                let globals = globals.unwrap_or(&*namespace);
                let class = self.build_class(definition, name, owner, namespace, globals);
                Attribute::Class(Rc::new(class))
            }
            _ => return,
        };

        namespace.insert(name.to_string(), value);
    }

    fn changes_kind(&self, decorators: &[Node]) -> bool {
        decorators.iter().any(|decorator| {
            let Some(mut expression) = decorator.named_child(0) else {
                return false;
            };
            if expression.kind() == "call" {
                match expression.child_by_field_name("function") {
                    Some(function) => expression = function,
                    None => return false,
                }
            }
            let text = self.text(expression);
            let last = text.rsplit('.').next().unwrap_or(text).trim();
            NON_FUNCTION_DECORATORS.contains(&last)
        })
    }

    fn build_function(&self, definition: Node, name: &str, owner: &str) -> FunctionUnit {
        let parameters = definition
            .child_by_field_name("parameters")
            .map(|params| self.parameters(params))
            .unwrap_or_default();

        let docs = definition
            .child_by_field_name("body")
            .and_then(|body| self.docstring(body));

        FunctionUnit {
            name: name.to_string(),
            owner: owner.to_string(),
            parameters,
            docs,
        }
    }

    /// `enclosing` is the scope the `class` statement runs in, where its
    /// bases are looked up.
    fn build_class(
        &self,
        definition: Node,
        name: &str,
        owner: &str,
        enclosing: &Namespace,
        globals: &Namespace,
    ) -> ClassUnit {
        let qualified_name = format!("{}.{}", owner, name);
        let mut bases = Vec::new();
        let mut is_abstract = false;
        let mut namespace = Namespace::new();

        if let Some(arguments) = definition.child_by_field_name("superclasses") {
            let mut cursor = arguments.walk();
            for argument in arguments.named_children(&mut cursor) {
                match argument.kind() {
                    "identifier" | "attribute" => {
                        let base = self.text(argument);
                        is_abstract |= base == "ABC" || base == "abc.ABC";
                        bases.push(base.to_string());
                    }
                    "keyword_argument" => {
                        let keyword = argument.child_by_field_name("name").map(|n| self.text(n));
                        let value = argument.child_by_field_name("value").map(|n| self.text(n));
                        if keyword == Some("metaclass")
                            && value.is_some_and(|meta| meta.ends_with("ABCMeta"))
                        {
                            is_abstract = true;
                        }
                    }
                    _ => {}
                }
            }
        }

        // Earlier bases shadow later ones, so merge them last
        for base in bases.iter().rev() {
            if let Some(Attribute::Class(base_class)) = lookup(base, enclosing, Some(globals)) {
                for (member, value) in &base_class.namespace {
                    namespace.insert(member.clone(), value.clone());
                }
            }
        }

        for meta in CLASS_METADATA {
            namespace.insert(meta.to_string(), Attribute::Data);
        }
        namespace.insert(
            "__class__".to_string(),
            Attribute::Imported {
                module: "builtins".to_string(),
                name: "type".to_string(),
            },
        );
        if is_abstract {
            namespace.insert("__abstractmethods__".to_string(), Attribute::Data);
        }

        let body = definition.child_by_field_name("body");
        if let Some(body) = body {
            self.collect_block(body, &qualified_name, &mut namespace, Some(globals));
        }

        ClassUnit {
            qualified_name,
            owner: owner.to_string(),
            docs: body.and_then(|body| self.docstring(body)),
            namespace,
        }
    }

    fn bind_import(&self, statement: Node, namespace: &mut Namespace) {
        let mut cursor = statement.walk();
        for imported in statement.children_by_field_name("name", &mut cursor) {
            if imported.kind() == "aliased_import" {
                let module = imported.child_by_field_name("name").map(|n| self.text(n));
                let alias = imported.child_by_field_name("alias").map(|n| self.text(n));
                if let (Some(module), Some(alias)) = (module, alias) {
                    namespace.insert(alias.to_string(), Attribute::Module(module.to_string()));
                }
            } else {
                // `import a.b.c` binds `a`
                let dotted = self.text(imported);
                let head = dotted.split('.').next().unwrap_or(dotted).trim();
                namespace.insert(head.to_string(), Attribute::Module(head.to_string()));
            }
        }
    }

    /// Star imports bind nothing; their names cannot be known without running
    /// the imported module.
    fn bind_from_import(&self, statement: Node, module: &str, namespace: &mut Namespace) {
        let mut cursor = statement.walk();
        for imported in statement.children_by_field_name("name", &mut cursor) {
            let (name, bound_as) = if imported.kind() == "aliased_import" {
                let name = imported.child_by_field_name("name").map(|n| self.text(n));
                let alias = imported.child_by_field_name("alias").map(|n| self.text(n));
                match (name, alias) {
                    (Some(name), Some(alias)) => (name, alias),
                    _ => continue,
                }
            } else {
                let name = self.text(imported);
                (name, name)
            };

            namespace.insert(
                bound_as.to_string(),
                Attribute::Imported {
                    module: module.to_string(),
                    name: name.to_string(),
                },
            );
        }
    }

    /// `a = b = value`, `x: int = 1`, `first, second = pair`
    fn bind_assignment(
        &self,
        assignment: Node,
        owner: &str,
        namespace: &mut Namespace,
        globals: Option<&Namespace>,
    ) {
        let mut targets = Vec::new();
        let mut current = assignment;
        let value = loop {
            let Some(left) = current.child_by_field_name("left") else {
                return;
            };
            // An annotation without a value binds nothing
            let Some(right) = current.child_by_field_name("right") else {
                return;
            };
            targets.push(left);
            if right.kind() == "assignment" {
                current = right;
            } else {
                break right;
            }
        };

        let value = self.evaluate(value, owner, namespace, globals);
        for target in targets {
            self.bind_targets(target, &value, namespace);
        }
    }

    fn bind_targets(&self, target: Node, value: &Attribute, namespace: &mut Namespace) {
        match target.kind() {
            "identifier" => {
                namespace.insert(self.text(target).to_string(), value.clone());
            }
            "pattern_list" | "tuple_pattern" | "list_pattern" | "expression_list" | "tuple"
            | "list" | "list_splat_pattern" | "parenthesized_expression" => {
                // Unpacked values are unknown statically
                let mut cursor = target.walk();
                for element in target.named_children(&mut cursor) {
                    self.bind_targets(element, &Attribute::Data, namespace);
                }
            }
            _ => {}
        }
    }

    /// `del a`, `del a, b`; subscripts and attributes leave the namespace alone
    fn unbind_targets(&self, target: Node, namespace: &mut Namespace) {
        match target.kind() {
            "identifier" => {
                namespace.remove(self.text(target));
            }
            "expression_list" | "tuple" | "list" | "parenthesized_expression" => {
                let mut cursor = target.walk();
                for element in target.named_children(&mut cursor) {
                    self.unbind_targets(element, namespace);
                }
            }
            _ => {}
        }
    }

    fn evaluate(
        &self,
        value: Node,
        owner: &str,
        namespace: &Namespace,
        globals: Option<&Namespace>,
    ) -> Attribute {
        match value.kind() {
            "identifier" => lookup(self.text(value), namespace, globals)
                .cloned()
                .unwrap_or(Attribute::Data),
            "lambda" => Attribute::Function(Rc::new(FunctionUnit {
                name: "<lambda>".to_string(),
                owner: owner.to_string(),
                parameters: value
                    .child_by_field_name("parameters")
                    .map(|params| self.parameters(params))
                    .unwrap_or_default(),
                docs: None,
            })),
            _ => Attribute::Data,
        }
    }

    /// Declared parameters of a `parameters` or `lambda_parameters` node
    fn parameters(&self, params: Node) -> Vec<Parameter> {
        let mut parameters = Vec::new();
        let mut cursor = params.walk();

        for param in params.children(&mut cursor) {
            let parameter = match param.kind() {
                "identifier" => Parameter::named(self.text(param)),
                "default_parameter" => {
                    let Some(name) = param.child_by_field_name("name") else {
                        continue;
                    };
                    let mut parameter = Parameter::named(self.text(name));
                    if let Some(value) = param.child_by_field_name("value") {
                        parameter = parameter.with_default(self.text(value));
                    }
                    parameter
                }
                "typed_parameter" => {
                    let Some(inner) = param.named_child(0) else {
                        continue;
                    };
                    let mut parameter = self.splat_or_named(inner);
                    if let Some(ty) = param.child_by_field_name("type") {
                        parameter = parameter.with_annotation(self.text(ty));
                    }
                    parameter
                }
                "typed_default_parameter" => {
                    let Some(name) = param.child_by_field_name("name") else {
                        continue;
                    };
                    let mut parameter = Parameter::named(self.text(name));
                    if let Some(ty) = param.child_by_field_name("type") {
                        parameter = parameter.with_annotation(self.text(ty));
                    }
                    if let Some(value) = param.child_by_field_name("value") {
                        parameter = parameter.with_default(self.text(value));
                    }
                    parameter
                }
                "list_splat_pattern" | "dictionary_splat_pattern" => self.splat_or_named(param),
                "keyword_separator" | "*" => Parameter::marker(ParameterKind::KeywordOnlyMarker),
                "positional_separator" | "/" => {
                    Parameter::marker(ParameterKind::PositionalOnlyMarker)
                }
                "tuple_pattern" => Parameter::named(self.text(param)),
                _ => continue,
            };
            parameters.push(parameter);
        }

        parameters
    }

    fn splat_or_named(&self, node: Node) -> Parameter {
        let text = self.text(node);
        match node.kind() {
            "list_splat_pattern" => {
                let mut parameter = Parameter::named(text.trim_start_matches('*').trim());
                parameter.kind = ParameterKind::VarPositional;
                parameter
            }
            "dictionary_splat_pattern" => {
                let mut parameter = Parameter::named(text.trim_start_matches('*').trim());
                parameter.kind = ParameterKind::VarKeyword;
                parameter
            }
            _ => Parameter::named(text),
        }
    }

    /// First statement of a body when it is a plain string expression
    fn docstring(&self, body: Node) -> Option<String> {
        let mut cursor = body.walk();
        let first = body
            .named_children(&mut cursor)
            .find(|child| child.kind() != "comment")?;
        if first.kind() != "expression_statement" || first.named_child_count() != 1 {
            return None;
        }

        let expression = first.named_child(0)?;
        match expression.kind() {
            "string" => decode_string_literal(self.text(expression)),
            "concatenated_string" => {
                let mut cursor = expression.walk();
                let parts: Vec<&str> = expression
                    .named_children(&mut cursor)
                    .filter(|part| part.kind() == "string")
                    .map(|part| self.text(part))
                    .collect();
                decode_concatenated(parts)
            }
            _ => None,
        }
    }
}

fn lookup<'n>(
    name: &str,
    namespace: &'n Namespace,
    globals: Option<&'n Namespace>,
) -> Option<&'n Attribute> {
    namespace
        .get(name)
        .or_else(|| globals.and_then(|globals| globals.get(name)))
}
