//! Deriving a child's identifier from its enclosing scope.
//!
//! The scope is passed explicitly: callers hold the parent identifier and
//! recurse with the child's, so nothing needs restoring on the way out.

use crate::errors::{ApiDiffError, Result};
use crate::identity::DeclarationIdentifier;
use crate::model::{DeclNode, FunctionParameterNode, ModifierNode, TypeNode};
use std::collections::BTreeSet;

/// Modifiers that make a member belong to the type rather than an instance.
pub const STATIC_MODIFIERS: [&str; 2] = ["class", "static"];

pub fn is_static(modifiers: &BTreeSet<ModifierNode>) -> bool {
    modifiers
        .iter()
        .any(|modifier| STATIC_MODIFIERS.contains(&modifier.name.as_str()))
}

fn labels(parameters: &[FunctionParameterNode]) -> Vec<String> {
    parameters
        .iter()
        .map(|parameter| parameter.identity_label().to_string())
        .collect()
}

fn nested(path: &[String], name: &str) -> Vec<String> {
    let mut path = path.to_vec();
    path.push(name.to_string());
    path
}

/// Path named by an extension target, relative to the module root.
///
/// Simple names and member chains resolve; generic arguments are ignored. A
/// leading component equal to `module` is dropped. Any other shape has no
/// path.
pub fn extension_target_path(target: &TypeNode, module: &str) -> Option<Vec<String>> {
    match target {
        TypeNode::Simple(node) if node.name == module => Some(Vec::new()),
        TypeNode::Simple(node) => Some(vec![node.name.clone()]),
        TypeNode::Member(node) => {
            let mut path = extension_target_path(&node.parent, module)?;
            path.push(node.name.clone());
            Some(path)
        }
        _ => None,
    }
}

/// Identifier of `node` declared directly inside `parent`.
///
/// Returns `Ok(None)` for declarations that never carry an identity:
/// directives, unknown declarations, variables bound by a non-identifier
/// pattern and extensions of a target shape with no path.
///
/// # Errors
///
/// `InvalidScope` when an identity-bearing declaration sits under a scope that
/// is not a type, or an extension sits anywhere but module scope.
pub fn child_identifier(
    parent: &DeclarationIdentifier,
    node: &DeclNode,
    module: &str,
) -> Result<Option<DeclarationIdentifier>> {
    let path = match (parent, node) {
        (
            _,
            DeclNode::IfConfig(_)
            | DeclNode::Import(_)
            | DeclNode::Operator(_)
            | DeclNode::PoundError(_)
            | DeclNode::PoundWarning(_)
            | DeclNode::PrecedenceGroup(_)
            | DeclNode::Unknown,
        ) => return Ok(None),
        (DeclarationIdentifier::Type { path }, _) => path,
        _ => return Err(invalid_scope(parent, node)),
    };

    let identifier = match node {
        DeclNode::Associatedtype(decl) => DeclarationIdentifier::Type {
            path: nested(path, &decl.name),
        },
        DeclNode::Class(decl) => DeclarationIdentifier::Type {
            path: nested(path, &decl.name),
        },
        DeclNode::Enum(decl) => DeclarationIdentifier::Type {
            path: nested(path, &decl.name),
        },
        DeclNode::Protocol(decl) => DeclarationIdentifier::Type {
            path: nested(path, &decl.name),
        },
        DeclNode::Struct(decl) => DeclarationIdentifier::Type {
            path: nested(path, &decl.name),
        },
        DeclNode::Typealias(decl) => DeclarationIdentifier::Type {
            path: nested(path, &decl.name),
        },
        DeclNode::Deinitializer(_) => DeclarationIdentifier::Deinitializer { path: path.clone() },
        DeclNode::EnumCase(decl) => DeclarationIdentifier::Function {
            path: path.clone(),
            name: decl.name.clone(),
            labels: labels(&decl.associated_value),
            is_static: true,
        },
        DeclNode::Extension(decl) => {
            if !path.is_empty() {
                return Err(invalid_scope(parent, node));
            }
            match extension_target_path(&decl.extended_type, module) {
                Some(target) => DeclarationIdentifier::Type { path: target },
                None => return Ok(None),
            }
        }
        DeclNode::Function(decl) => DeclarationIdentifier::Function {
            path: path.clone(),
            name: decl.name.clone(),
            labels: labels(&decl.parameters),
            is_static: is_static(&decl.modifiers),
        },
        DeclNode::Initializer(decl) => DeclarationIdentifier::Initializer {
            path: path.clone(),
            labels: labels(&decl.parameters),
        },
        DeclNode::Subscript(decl) => DeclarationIdentifier::Subscript {
            path: path.clone(),
            labels: labels(&decl.indices),
            is_static: is_static(&decl.modifiers),
        },
        DeclNode::Variable(decl) => match decl.pattern.identifier() {
            Some(name) => DeclarationIdentifier::Variable {
                path: path.clone(),
                name: name.to_string(),
                is_static: is_static(&decl.modifiers),
            },
            None => return Ok(None),
        },
        DeclNode::IfConfig(_)
        | DeclNode::Import(_)
        | DeclNode::Operator(_)
        | DeclNode::PoundError(_)
        | DeclNode::PoundWarning(_)
        | DeclNode::PrecedenceGroup(_)
        | DeclNode::Unknown => return Ok(None),
    };
    Ok(Some(identifier))
}

fn invalid_scope(parent: &DeclarationIdentifier, node: &DeclNode) -> ApiDiffError {
    ApiDiffError::InvalidScope {
        scope: parent.to_string(),
        declaration: node.discriminator().name().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{kind, role, SyntaxNode};

    fn parse(syntax: SyntaxNode) -> DeclNode {
        DeclNode::from_syntax(&syntax).unwrap().remove(0)
    }

    fn simple(name: &str) -> SyntaxNode {
        SyntaxNode::new(kind::SIMPLE_TYPE_IDENTIFIER).with_token(role::NAME, name)
    }

    fn member(parent: SyntaxNode, name: &str) -> SyntaxNode {
        SyntaxNode::new(kind::MEMBER_TYPE_IDENTIFIER)
            .with(role::BASE_TYPE, parent)
            .with_token(role::NAME, name)
    }

    fn parameter(label: Option<&str>) -> SyntaxNode {
        let node = SyntaxNode::new(kind::FUNCTION_PARAMETER).with(role::TYPE, simple("Int"));
        match label {
            Some(label) => node.with_token(role::LABEL, label),
            None => node,
        }
    }

    fn in_type(components: &[&str]) -> DeclarationIdentifier {
        DeclarationIdentifier::type_path(components.iter().copied())
    }

    #[test]
    fn test_function_identity_uses_labels_and_static() {
        let node = parse(
            SyntaxNode::new(kind::FUNCTION_DECL)
                .with(role::MODIFIER, SyntaxNode::modifier("class"))
                .with_token(role::NAME, "make")
                .with(role::PARAMETER, parameter(Some("with")))
                .with(role::PARAMETER, parameter(None)),
        );
        let identifier = child_identifier(&in_type(&["Foo"]), &node, "Kit")
            .unwrap()
            .unwrap();
        assert_eq!(identifier.to_string(), "Foo.make(with:_:) /* static */");
    }

    #[test]
    fn test_enum_case_is_static_function() {
        let node = parse(
            SyntaxNode::new(kind::ENUM_CASE_DECL).with(
                role::ELEMENT,
                SyntaxNode::new(kind::ENUM_CASE_ELEMENT)
                    .with_token(role::NAME, "custom")
                    .with(role::PARAMETER, parameter(Some("degrees"))),
            ),
        );
        let identifier = child_identifier(&in_type(&["Direction"]), &node, "Kit")
            .unwrap()
            .unwrap();
        assert_eq!(
            identifier,
            DeclarationIdentifier::Function {
                path: vec!["Direction".to_string()],
                name: "custom".to_string(),
                labels: vec!["degrees".to_string()],
                is_static: true,
            }
        );
    }

    #[test]
    fn test_nested_types_extend_path() {
        let node = parse(SyntaxNode::new(kind::TYPEALIAS_DECL).with_token(role::NAME, "Element"));
        let identifier = child_identifier(&in_type(&["Outer"]), &node, "Kit")
            .unwrap()
            .unwrap();
        assert_eq!(identifier, in_type(&["Outer", "Element"]));
    }

    #[test]
    fn test_extension_target_strips_module_name() {
        let node = parse(
            SyntaxNode::new(kind::EXTENSION_DECL)
                .with(role::EXTENDED_TYPE, member(member(simple("Kit"), "Outer"), "Inner")),
        );
        let identifier = child_identifier(&DeclarationIdentifier::root(), &node, "Kit")
            .unwrap()
            .unwrap();
        assert_eq!(identifier, in_type(&["Outer", "Inner"]));
    }

    #[test]
    fn test_extension_of_unsupported_shape_has_no_identity() {
        let node = parse(SyntaxNode::new(kind::EXTENSION_DECL).with(
            role::EXTENDED_TYPE,
            SyntaxNode::new(kind::OPTIONAL_TYPE).with(role::WRAPPED_TYPE, simple("Foo")),
        ));
        assert_eq!(
            child_identifier(&DeclarationIdentifier::root(), &node, "Kit").unwrap(),
            None
        );
    }

    #[test]
    fn test_nested_extension_is_invalid_scope() {
        let node = parse(SyntaxNode::new(kind::EXTENSION_DECL).with(role::EXTENDED_TYPE, simple("Foo")));
        let err = child_identifier(&in_type(&["Outer"]), &node, "Kit").unwrap_err();
        assert!(matches!(err, ApiDiffError::InvalidScope { .. }));
        assert!(err.is_invariant_violation());
    }

    #[test]
    fn test_member_under_function_scope_is_invalid() {
        let scope = DeclarationIdentifier::Function {
            path: Vec::new(),
            name: "f".to_string(),
            labels: Vec::new(),
            is_static: false,
        };
        let node = parse(SyntaxNode::new(kind::DEINITIALIZER_DECL));
        let err = child_identifier(&scope, &node, "Kit").unwrap_err();
        assert!(matches!(err, ApiDiffError::InvalidScope { .. }));
    }

    #[test]
    fn test_directives_have_no_identity() {
        let node = parse(SyntaxNode::new(kind::IMPORT_DECL).with_token(role::PATH_COMPONENT, "Foundation"));
        assert_eq!(child_identifier(&in_type(&["Foo"]), &node, "Kit").unwrap(), None);
        assert_eq!(
            child_identifier(&in_type(&["Foo"]), &DeclNode::Unknown, "Kit").unwrap(),
            None
        );
    }

    #[test]
    fn test_variable_needs_identifier_pattern() {
        let variable = |pattern: SyntaxNode| {
            parse(
                SyntaxNode::new(kind::VARIABLE_DECL)
                    .with(role::MODIFIER, SyntaxNode::modifier("static"))
                    .with_token(role::LET_OR_VAR, "let")
                    .with(
                        role::BINDING,
                        SyntaxNode::new(kind::PATTERN_BINDING).with(role::PATTERN, pattern),
                    ),
            )
        };

        let named = variable(SyntaxNode::new(kind::IDENTIFIER_PATTERN).with_token(role::NAME, "shared"));
        assert_eq!(
            child_identifier(&in_type(&["Foo"]), &named, "Kit")
                .unwrap()
                .map(|identifier| identifier.to_string()),
            Some("Foo.shared /* static */".to_string())
        );

        let wildcard = variable(SyntaxNode::new(kind::WILDCARD_PATTERN));
        assert_eq!(child_identifier(&in_type(&["Foo"]), &wildcard, "Kit").unwrap(), None);
    }
}
