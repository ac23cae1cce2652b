#[cfg(test)]
mod formatting_tests {
    use std::path::Path;
    use std::rc::Rc;

    use crate::loader::parse_module;
    use crate::{
        Attribute, ClassUnit, DocError, FunctionUnit, Introspectable, MarkdownRenderer, Namespace,
        Parameter, Render, RenderContext, Result,
    };

    /// Unit that enumerates its attributes in insertion order
    struct FakeUnit {
        name: String,
        docs: Option<String>,
        attributes: Vec<(String, Attribute)>,
    }

    impl Introspectable for FakeUnit {
        fn name(&self) -> &str {
            &self.name
        }

        fn doc(&self) -> Option<&str> {
            self.docs.as_deref()
        }

        fn attribute_names(&self) -> Vec<String> {
            self.attributes.iter().map(|(name, _)| name.clone()).collect()
        }

        fn attribute(&self, name: &str) -> Result<&Attribute> {
            self.attributes
                .iter()
                .find(|(candidate, _)| candidate == name)
                .map(|(_, value)| value)
                .ok_or_else(|| DocError::attribute_not_found(&self.name, name))
        }
    }

    fn function(name: &str, owner: &str, docs: Option<&str>, parameters: Vec<Parameter>) -> Attribute {
        Attribute::Function(Rc::new(FunctionUnit {
            name: name.to_string(),
            owner: owner.to_string(),
            parameters,
            docs: docs.map(str::to_string),
        }))
    }

    fn class(name: &str, owner: &str, docs: Option<&str>, members: Vec<(&str, Attribute)>) -> Attribute {
        let namespace: Namespace = members
            .into_iter()
            .map(|(member, value)| (member.to_string(), value))
            .collect();
        Attribute::Class(Rc::new(ClassUnit {
            qualified_name: format!("{}.{}", owner, name),
            owner: owner.to_string(),
            docs: docs.map(str::to_string),
            namespace,
        }))
    }

    fn render_source(source: &str, name: &str) -> String {
        let module = parse_module(source, name, Path::new("test.py")).unwrap();
        MarkdownRenderer::new().render_to_string(&module, name).unwrap()
    }

    #[test]
    fn test_module_header_with_and_without_docstring() {
        let with_docs = FakeUnit {
            name: "mod".to_string(),
            docs: Some("Top module.".to_string()),
            attributes: vec![],
        };
        let without_docs = FakeUnit {
            name: "mod".to_string(),
            docs: None,
            attributes: vec![],
        };

        let renderer = MarkdownRenderer::new();
        assert_eq!(
            renderer.render_to_string(&with_docs, "mod").unwrap(),
            "# mod\n\nTop module.\n"
        );
        assert_eq!(renderer.render_to_string(&without_docs, "mod").unwrap(), "# mod\n\n");
    }

    #[test]
    fn test_display_name_is_independent_of_unit_name() {
        let unit = FakeUnit {
            name: "internal".to_string(),
            docs: None,
            attributes: vec![],
        };
        let output = MarkdownRenderer::new().render_to_string(&unit, "pkg.c").unwrap();
        assert!(output.starts_with("# pkg.c\n\n"));
    }

    #[test]
    fn test_members_follow_enumeration_order() {
        let unit = FakeUnit {
            name: "mod".to_string(),
            docs: None,
            attributes: vec![
                ("zeta".to_string(), function("zeta", "mod", Some("Last."), vec![])),
                ("alpha".to_string(), function("alpha", "mod", Some("First."), vec![])),
            ],
        };

        let output = MarkdownRenderer::new().render_to_string(&unit, "mod").unwrap();
        assert_eq!(
            output,
            "# mod\n\n## Function zeta()\nLast.\n## Function alpha()\nFirst.\n"
        );
    }

    #[test]
    fn test_foreign_and_plain_members_are_skipped() {
        let unit = FakeUnit {
            name: "mod".to_string(),
            docs: None,
            attributes: vec![
                ("imported".to_string(), function("imported", "other", Some("No."), vec![])),
                ("VALUE".to_string(), Attribute::Data),
                ("os".to_string(), Attribute::Module("os".to_string())),
                ("__name__".to_string(), Attribute::Data),
                ("own".to_string(), function("own", "mod", None, vec![])),
            ],
        };

        let output = MarkdownRenderer::new().render_to_string(&unit, "mod").unwrap();
        assert_eq!(output, "# mod\n\n## Function own()\n\n");
    }

    #[test]
    fn test_methods_have_no_signature() {
        let unit = FakeUnit {
            name: "mod".to_string(),
            docs: None,
            attributes: vec![(
                "Job".to_string(),
                class(
                    "Job",
                    "mod",
                    Some("A job."),
                    vec![(
                        "run",
                        function("run", "mod.Job", Some("Runs."), vec![Parameter::named("self")]),
                    )],
                ),
            )],
        };

        let output = MarkdownRenderer::new().render_to_string(&unit, "mod").unwrap();
        assert_eq!(output, "# mod\n\n## Class Job\nA job.\n### Method run\nRuns.\n");
    }

    #[test]
    fn test_empty_class_still_emits_heading() {
        let unit = FakeUnit {
            name: "mod".to_string(),
            docs: None,
            attributes: vec![("Empty".to_string(), class("Empty", "mod", None, vec![]))],
        };

        let output = MarkdownRenderer::new().render_to_string(&unit, "mod").unwrap();
        assert_eq!(output, "# mod\n\n## Class Empty\n\n");
    }

    #[test]
    fn test_render_trait_respects_mode() {
        let f = FunctionUnit {
            name: "f".to_string(),
            owner: "mod".to_string(),
            parameters: vec![Parameter::named("a"), Parameter::named("b").with_default("1")],
            docs: Some("Doc.".to_string()),
        };

        let top = RenderContext::new();
        assert_eq!(f.render("f", &top), "## Function f(a, b=1)\nDoc.\n");
        assert_eq!(f.render("f", &top.enter_class()), "### Method f\nDoc.\n");
        assert_eq!(
            f.render("f", &top.enter_class().enter_class()),
            "### Method f\nDoc.\n"
        );
    }

    #[test]
    fn test_lookup_failure_aborts_render() {
        struct Broken;

        impl Introspectable for Broken {
            fn name(&self) -> &str {
                "broken"
            }

            fn doc(&self) -> Option<&str> {
                None
            }

            fn attribute_names(&self) -> Vec<String> {
                vec!["ghost".to_string()]
            }

            fn attribute(&self, name: &str) -> Result<&Attribute> {
                Err(DocError::attribute_not_found("broken", name))
            }
        }

        let err = MarkdownRenderer::new().render_to_string(&Broken, "broken").unwrap_err();
        assert!(matches!(err, DocError::AttributeNotFound { .. }));
    }

    #[test]
    fn test_write_failure_propagates() {
        struct FailingSink;

        impl std::io::Write for FailingSink {
            fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
                Err(std::io::Error::new(std::io::ErrorKind::Other, "disk full"))
            }

            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let unit = FakeUnit {
            name: "mod".to_string(),
            docs: None,
            attributes: vec![],
        };
        let err = MarkdownRenderer::new()
            .render_module(&unit, &mut FailingSink, "mod")
            .unwrap_err();
        assert!(matches!(err, DocError::Io(_)));
    }

    #[test]
    fn test_add_scenario_from_source() {
        let output = render_source(
            "\"\"\"Top module.\"\"\"\n\ndef add(a, b=1):\n    \"\"\"Adds two numbers.\"\"\"\n    return a + b\n",
            "mod",
        );
        assert_eq!(
            output,
            "# mod\n\nTop module.\n## Function add(a, b=1)\nAdds two numbers.\n"
        );
    }

    #[test]
    fn test_imported_members_produce_no_heading() {
        let output = render_source(
            "from os.path import join\nfrom collections import OrderedDict\nimport json\n\ndef own():\n    pass\n",
            "mod",
        );
        assert_eq!(output, "# mod\n\n## Function own()\n\n");
    }

    #[test]
    fn test_nested_class_recursion_order() {
        let output = render_source(
            "class Outer:\n    \"\"\"Outer doc.\"\"\"\n\n    def act(self):\n        \"\"\"Acts.\"\"\"\n\n    class Inner:\n        \"\"\"Inner doc.\"\"\"\n\n        def step(self, n=2):\n            pass\n",
            "mod",
        );
        // dir() order puts `Inner` before `act`
        assert_eq!(
            output,
            "# mod\n\n\
             ## Class Outer\nOuter doc.\n\
             ## Class Inner\nInner doc.\n\
             ### Method step\n\n\
             ### Method act\nActs.\n"
        );
    }

    #[test]
    fn test_inherited_methods_are_not_repeated() {
        let output = render_source(
            "class Base:\n    def shared(self):\n        pass\n\nclass Child(Base):\n    def own(self):\n        pass\n",
            "mod",
        );
        assert_eq!(
            output,
            "# mod\n\n\
             ## Class Base\n\n### Method shared\n\n\
             ## Class Child\n\n### Method own\n\n"
        );
    }

    #[test]
    fn test_docstring_kept_verbatim() {
        let output = render_source(
            "def f():\n    \"\"\"\n    Summary.\n\n    Details.\n    \"\"\"\n",
            "mod",
        );
        assert_eq!(
            output,
            "# mod\n\n## Function f()\n\n    Summary.\n\n    Details.\n    \n"
        );
    }

    #[test]
    fn test_alias_documented_under_bound_name() {
        let output = render_source("def original():\n    \"\"\"Doc.\"\"\"\n\nshortcut = original\n", "mod");
        assert_eq!(
            output,
            "# mod\n\n## Function original()\nDoc.\n## Function shortcut()\nDoc.\n"
        );
    }

    #[test]
    fn test_module_docstring_ending_in_newline() {
        let output = render_source("\"\"\"Top.\n\"\"\"\n\ndef f():\n    pass\n", "mod");
        assert_eq!(output, "# mod\n\nTop.\n## Function f()\n\n");
    }

    #[test]
    fn test_deleted_names_produce_no_heading() {
        assert_eq!(render_source("def f():\n    pass\n\ndel f\n", "mod"), "# mod\n\n");

        let output = render_source(
            "class Job:\n    def m(self):\n        pass\n    m2 = m\n    del m\n",
            "mod",
        );
        assert_eq!(output, "# mod\n\n## Class Job\n\n### Method m2\n\n");
    }

    #[test]
    fn test_definitions_inside_match_cases_are_documented() {
        let output = render_source(
            "import sys\nmatch sys.platform:\n    case 'linux':\n        def g():\n            pass\n",
            "mod",
        );
        assert_eq!(output, "# mod\n\n## Function g()\n\n");

        let output = render_source(
            "class Job:\n    match 1:\n        case 1:\n            def run(self):\n                pass\n",
            "mod",
        );
        assert_eq!(output, "# mod\n\n## Class Job\n\n### Method run\n\n");
    }
}
