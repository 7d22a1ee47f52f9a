//! Call-site classification.
//!
//! A Lasso bundle registers everything through method calls on the loader
//! runtime object (`$_mod.def(...)`, `$_mod.installed(...)`, ...), plus one
//! immediately-invoked wrapper function around the whole bundle. The helpers
//! here inspect the callee shape of a `call_expression` node and map it onto
//! the closed [`CallKind`] vocabulary that drives extraction.

use tree_sitter::Node;

/// The loader vocabulary a call expression can resolve to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    /// `installed(...)` - an installed package dependency.
    Installed,
    /// `def(...)` - a module definition with a factory function.
    Def,
    /// `main(...)` - a package main-entry declaration.
    Main,
    /// `remap(...)` - a module specifier remap.
    Remap,
    /// `builtin(...)` - a builtin module registration.
    Builtin,
    /// `run(...)` - an entry-point invocation.
    Run,
    /// An unnamed function expression invoked immediately: the bundle's own
    /// top-level wrapper rather than a loader-registered module.
    ModuleWrapper,
    /// Any other callee shape.
    Unknown,
}

impl CallKind {
    /// Maps a member-access method name onto the loader vocabulary.
    pub fn from_method(name: &str) -> Self {
        match name {
            "installed" => CallKind::Installed,
            "def" => CallKind::Def,
            "main" => CallKind::Main,
            "remap" => CallKind::Remap,
            "builtin" => CallKind::Builtin,
            "run" => CallKind::Run,
            _ => CallKind::Unknown,
        }
    }
}

/// Returns the accessed method name when the call's callee is a plain
/// member expression (`x.y(...)` with `y` a plain identifier).
///
/// Computed member access (`x['y'](...)`) has a different node shape and
/// yields `None`.
pub(crate) fn member_method_name<'a>(call: &Node, source: &'a str) -> Option<&'a str> {
    let callee = call.child_by_field_name("function")?;
    if callee.kind() != "member_expression" {
        return None;
    }
    let property = callee.child_by_field_name("property")?;
    if property.kind() != "property_identifier" {
        return None;
    }
    node_text(&property, source)
}

/// Returns true when the call's callee is an unnamed function expression
/// invoked immediately (the IIFE pattern wrapping the whole bundle).
pub(crate) fn is_module_wrapper(call: &Node) -> bool {
    let Some(mut callee) = call.child_by_field_name("function") else {
        return false;
    };
    while callee.kind() == "parenthesized_expression" {
        match callee.named_child(0) {
            Some(inner) => callee = inner,
            None => return false,
        }
    }
    is_function_expression(&callee) && callee.child_by_field_name("name").is_none()
}

/// Returns true for any function-expression shape a factory can take.
pub(crate) fn is_function_expression(node: &Node) -> bool {
    matches!(
        node.kind(),
        "function_expression" | "function" | "generator_function" | "arrow_function"
    )
}

/// Collects the call's argument nodes in source order, comments excluded.
pub(crate) fn call_arguments<'tree>(call: &Node<'tree>) -> Vec<Node<'tree>> {
    let Some(arguments) = call.child_by_field_name("arguments") else {
        return Vec::new();
    };
    let mut cursor = arguments.walk();
    arguments
        .named_children(&mut cursor)
        .filter(|node| node.kind() != "comment")
        .collect()
}

/// Extract the text content of a node.
pub(crate) fn node_text<'a>(node: &Node, source: &'a str) -> Option<&'a str> {
    source.get(node.start_byte()..node.end_byte())
}

/// Extract a string literal's value (removes quotes). Non-string nodes
/// yield `None`.
pub(crate) fn string_literal_value(node: &Node, source: &str) -> Option<String> {
    if node.kind() != "string" {
        return None;
    }
    let text = node_text(node, source)?;
    let trimmed = text
        .trim_start_matches(['"', '\'', '`'])
        .trim_end_matches(['"', '\'', '`']);
    Some(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tree_sitter::Tree;

    fn parse(source: &str) -> Tree {
        let mut parser = tree_sitter::Parser::new();
        parser
            .set_language(&tree_sitter_javascript::LANGUAGE.into())
            .unwrap();
        parser.parse(source, None).unwrap()
    }

    fn first_call<'tree>(node: Node<'tree>) -> Option<Node<'tree>> {
        if node.kind() == "call_expression" {
            return Some(node);
        }
        let mut cursor = node.walk();
        let children: Vec<_> = node.children(&mut cursor).collect();
        children.into_iter().find_map(first_call)
    }

    fn call_in(tree: &Tree) -> Node<'_> {
        first_call(tree.root_node()).expect("no call expression in source")
    }

    #[test]
    fn test_call_kind_from_method() {
        assert_eq!(CallKind::from_method("installed"), CallKind::Installed);
        assert_eq!(CallKind::from_method("def"), CallKind::Def);
        assert_eq!(CallKind::from_method("main"), CallKind::Main);
        assert_eq!(CallKind::from_method("remap"), CallKind::Remap);
        assert_eq!(CallKind::from_method("builtin"), CallKind::Builtin);
        assert_eq!(CallKind::from_method("run"), CallKind::Run);
        assert_eq!(CallKind::from_method("require"), CallKind::Unknown);
    }

    #[test]
    fn test_member_method_name() {
        let tree = parse("$_mod.def('/a.js', function() {});");
        let call = call_in(&tree);
        assert_eq!(
            member_method_name(&call, "$_mod.def('/a.js', function() {});"),
            Some("def")
        );
    }

    #[test]
    fn test_member_method_name_rejects_plain_calls() {
        let source = "foo();";
        let tree = parse(source);
        assert_eq!(member_method_name(&call_in(&tree), source), None);
    }

    #[test]
    fn test_member_method_name_rejects_computed_access() {
        let source = "foo['bar']();";
        let tree = parse(source);
        assert_eq!(member_method_name(&call_in(&tree), source), None);
    }

    #[test]
    fn test_module_wrapper_detection() {
        let tree = parse("(function() { var x = 1; })();");
        assert!(is_module_wrapper(&call_in(&tree)));
    }

    #[test]
    fn test_module_wrapper_without_parens() {
        let tree = parse("!function() {}();");
        assert!(is_module_wrapper(&call_in(&tree)));
    }

    #[test]
    fn test_arrow_wrapper_detected() {
        let tree = parse("(() => {})();");
        assert!(is_module_wrapper(&call_in(&tree)));
    }

    #[test]
    fn test_named_function_is_not_a_wrapper() {
        let tree = parse("(function boot() {})();");
        assert!(!is_module_wrapper(&call_in(&tree)));
    }

    #[test]
    fn test_plain_call_is_not_a_wrapper() {
        let tree = parse("foo();");
        assert!(!is_module_wrapper(&call_in(&tree)));
    }

    #[test]
    fn test_call_arguments_in_order() {
        let source = "f(a, 'b', 3);";
        let tree = parse(source);
        let args = call_arguments(&call_in(&tree));
        assert_eq!(args.len(), 3);
        assert_eq!(args[0].kind(), "identifier");
        assert_eq!(args[1].kind(), "string");
        assert_eq!(args[2].kind(), "number");
    }

    #[test]
    fn test_call_arguments_empty() {
        let tree = parse("f();");
        assert!(call_arguments(&call_in(&tree)).is_empty());
    }

    #[test]
    fn test_string_literal_value() {
        let source = "f('hello', name);";
        let tree = parse(source);
        let args = call_arguments(&call_in(&tree));
        assert_eq!(
            string_literal_value(&args[0], source),
            Some("hello".to_string())
        );
        assert_eq!(string_literal_value(&args[1], source), None);
    }

    #[test]
    fn test_string_literal_value_double_quotes() {
        let source = "f(\"hello\");";
        let tree = parse(source);
        let args = call_arguments(&call_in(&tree));
        assert_eq!(
            string_literal_value(&args[0], source),
            Some("hello".to_string())
        );
    }
}
