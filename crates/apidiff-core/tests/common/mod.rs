use apidiff_core::syntax::{kind, role, SyntaxNode};

/// Module name used by the fixtures
#[allow(dead_code)]
pub const MODULE: &str = "Kit";

/// Wrap top-level declarations in a `SourceFile` root
#[allow(dead_code)]
pub fn source_file(statements: Vec<SyntaxNode>) -> SyntaxNode {
    SyntaxNode::new(kind::SOURCE_FILE).with_all(role::STATEMENT, statements)
}

#[allow(dead_code)]
pub fn simple_type(name: &str) -> SyntaxNode {
    SyntaxNode::new(kind::SIMPLE_TYPE_IDENTIFIER).with_token(role::NAME, name)
}

/// `Parent.Name`
#[allow(dead_code)]
pub fn member_type(parent: SyntaxNode, name: &str) -> SyntaxNode {
    SyntaxNode::new(kind::MEMBER_TYPE_IDENTIFIER)
        .with(role::BASE_TYPE, parent)
        .with_token(role::NAME, name)
}

/// `@name` or `@name(argument)`
#[allow(dead_code)]
pub fn attribute(name: &str, argument: Option<&str>) -> SyntaxNode {
    let node = SyntaxNode::new(kind::ATTRIBUTE).with_token(role::NAME, name);
    match argument {
        Some(argument) => node.with(role::ARGUMENT, SyntaxNode::expr(argument)),
        None => node,
    }
}

/// Parameter with an optional external label
#[allow(dead_code)]
pub fn parameter(label: Option<&str>, type_name: &str) -> SyntaxNode {
    let node = SyntaxNode::new(kind::FUNCTION_PARAMETER).with(role::TYPE, simple_type(type_name));
    match label {
        Some(label) => node.with_token(role::LABEL, label),
        None => node,
    }
}

/// `<visibility> func name()`
#[allow(dead_code)]
pub fn function_with(visibility: &str, name: &str) -> SyntaxNode {
    SyntaxNode::new(kind::FUNCTION_DECL)
        .with(role::MODIFIER, SyntaxNode::modifier(visibility))
        .with_token(role::NAME, name)
}

/// `public func name()`
#[allow(dead_code)]
pub fn function(name: &str) -> SyntaxNode {
    function_with("public", name)
}

/// `<visibility> struct name`
#[allow(dead_code)]
pub fn structure_with(visibility: &str, name: &str) -> SyntaxNode {
    SyntaxNode::new(kind::STRUCT_DECL)
        .with(role::MODIFIER, SyntaxNode::modifier(visibility))
        .with_token(role::NAME, name)
}

/// `public struct name`
#[allow(dead_code)]
pub fn structure(name: &str) -> SyntaxNode {
    structure_with("public", name)
}

/// `public class name`
#[allow(dead_code)]
pub fn class(name: &str) -> SyntaxNode {
    SyntaxNode::new(kind::CLASS_DECL)
        .with(role::MODIFIER, SyntaxNode::modifier("public"))
        .with_token(role::NAME, name)
}

/// `public init(...)`
#[allow(dead_code)]
pub fn initializer(parameters: Vec<SyntaxNode>) -> SyntaxNode {
    SyntaxNode::new(kind::INITIALIZER_DECL)
        .with(role::MODIFIER, SyntaxNode::modifier("public"))
        .with_all(role::PARAMETER, parameters)
}

/// `public <modifiers> var name: type_name`
#[allow(dead_code)]
pub fn variable(name: &str, type_name: &str, modifiers: &[&str]) -> SyntaxNode {
    let mut node = SyntaxNode::new(kind::VARIABLE_DECL)
        .with(role::MODIFIER, SyntaxNode::modifier("public"))
        .with_token(role::LET_OR_VAR, "var")
        .with(
            role::BINDING,
            SyntaxNode::new(kind::PATTERN_BINDING)
                .with(
                    role::PATTERN,
                    SyntaxNode::new(kind::IDENTIFIER_PATTERN).with_token(role::NAME, name),
                )
                .with(role::TYPE, simple_type(type_name)),
        );
    for modifier in modifiers {
        node = node.with(role::MODIFIER, SyntaxNode::modifier(*modifier));
    }
    node
}

/// `extension target`
#[allow(dead_code)]
pub fn extension(target: SyntaxNode) -> SyntaxNode {
    SyntaxNode::new(kind::EXTENSION_DECL).with(role::EXTENDED_TYPE, target)
}
