use std::collections::BTreeSet;
use std::fmt;

use super::render::joined;
use super::support::{ArgumentNode, ExprNode};
use super::types::TypeNode;
use crate::errors::{ApiDiffError, Result};
use crate::syntax::{kind, role, SyntaxNode};

/// A declaration attribute, either built in (`@available(iOS 13, *)`) or a
/// custom attribute naming a type (`@MainActor`, `@Wrapper(x: 1)`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AttributeNode {
    Standard(StandardAttributeNode),
    Custom(CustomAttributeNode),
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StandardAttributeNode {
    pub name: String,
    /// Argument text between the parentheses, undecomposed
    pub argument: Option<ExprNode>,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CustomAttributeNode {
    pub type_name: TypeNode,
    pub arguments: Vec<ArgumentNode>,
}

impl AttributeNode {
    pub fn standard(name: impl Into<String>, argument: Option<&str>) -> Self {
        AttributeNode::Standard(StandardAttributeNode {
            name: name.into(),
            argument: argument.map(ExprNode::new),
        })
    }

    /// # Errors
    ///
    /// `UnexpectedToken` for node kinds that are not attributes, or any
    /// failure from the attribute's parts.
    pub fn from_syntax(syntax: &SyntaxNode) -> Result<Self> {
        match syntax.kind.as_str() {
            kind::ATTRIBUTE => Ok(AttributeNode::Standard(StandardAttributeNode {
                name: syntax.require_text(role::NAME)?.to_string(),
                argument: ExprNode::parse_optional(syntax, role::ARGUMENT)?,
            })),
            kind::CUSTOM_ATTRIBUTE => Ok(AttributeNode::Custom(CustomAttributeNode {
                type_name: TypeNode::from_syntax(syntax.require(role::TYPE)?)?,
                arguments: ArgumentNode::parse_list(syntax)?,
            })),
            other => Err(ApiDiffError::UnexpectedToken {
                context: "attribute".to_string(),
                token: other.to_string(),
            }),
        }
    }

    /// Attributes attached to `syntax`.
    pub(crate) fn parse_list(syntax: &SyntaxNode) -> Result<BTreeSet<Self>> {
        syntax.children(role::ATTRIBUTE).map(Self::from_syntax).collect()
    }

    /// Grouping key for attribute diffs: the attribute name, or the rendered
    /// type of a custom attribute.
    pub fn name(&self) -> String {
        match self {
            AttributeNode::Standard(node) => node.name.clone(),
            AttributeNode::Custom(node) => node.type_name.to_string(),
        }
    }
}

impl fmt::Display for AttributeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeNode::Standard(node) => {
                write!(f, "@{}", node.name)?;
                if let Some(argument) = &node.argument {
                    write!(f, "({})", argument)?;
                }
                Ok(())
            }
            AttributeNode::Custom(node) => {
                write!(f, "@{}", node.type_name)?;
                if !node.arguments.is_empty() {
                    write!(f, "({})", joined(&node.arguments, ", "))?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_attribute_rendering() {
        let syntax = SyntaxNode::new(kind::ATTRIBUTE)
            .with_token(role::NAME, "available")
            .with(role::ARGUMENT, SyntaxNode::expr("iOS 13"));
        let attribute = AttributeNode::from_syntax(&syntax).unwrap();
        assert_eq!(attribute.to_string(), "@available(iOS 13)");
        assert_eq!(attribute.name(), "available");
    }

    #[test]
    fn test_custom_attribute_rendering() {
        let syntax = SyntaxNode::new(kind::CUSTOM_ATTRIBUTE)
            .with(
                role::TYPE,
                SyntaxNode::new(kind::SIMPLE_TYPE_IDENTIFIER).with_token(role::NAME, "Wrapper"),
            )
            .with(
                role::ARGUMENT,
                SyntaxNode::new(kind::ARGUMENT)
                    .with_token(role::LABEL, "wrappedValue")
                    .with(role::EXPRESSION, SyntaxNode::expr("1")),
            );
        let attribute = AttributeNode::from_syntax(&syntax).unwrap();
        assert_eq!(attribute.to_string(), "@Wrapper(wrappedValue: 1)");
        assert_eq!(attribute.name(), "Wrapper");
    }

    #[test]
    fn test_non_attribute_kind_rejected() {
        let err = AttributeNode::from_syntax(&SyntaxNode::new("IfConfigAttribute")).unwrap_err();
        assert!(matches!(err, ApiDiffError::UnexpectedToken { .. }));
    }
}
