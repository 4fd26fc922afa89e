use std::collections::BTreeSet;
use std::fmt;

use super::types::TypeNode;
use crate::errors::Result;
use crate::syntax::{kind, role, SyntaxNode};

/// A generic constraint, either `Left: Right` or `Left == Right`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GenericRequirementNode {
    Conformance { left: TypeNode, right: TypeNode },
    SameType { left: TypeNode, right: TypeNode },
    Unknown,
}

impl GenericRequirementNode {
    /// # Errors
    ///
    /// Fails when a requirement lacks either side.
    pub fn from_syntax(syntax: &SyntaxNode) -> Result<Self> {
        let sides = |syntax: &SyntaxNode| -> Result<(TypeNode, TypeNode)> {
            Ok((
                TypeNode::from_syntax(syntax.require(role::LEFT)?)?,
                TypeNode::from_syntax(syntax.require(role::RIGHT)?)?,
            ))
        };
        let node = match syntax.kind.as_str() {
            kind::CONFORMANCE_REQUIREMENT => {
                let (left, right) = sides(syntax)?;
                GenericRequirementNode::Conformance { left, right }
            }
            kind::SAME_TYPE_REQUIREMENT => {
                let (left, right) = sides(syntax)?;
                GenericRequirementNode::SameType { left, right }
            }
            _ => GenericRequirementNode::Unknown,
        };
        Ok(node)
    }

    /// Requirements of a generic declaration: `T: P` for every generic
    /// parameter with an inherited type, unioned with the `where` clause.
    pub(crate) fn parse_list(syntax: &SyntaxNode) -> Result<BTreeSet<Self>> {
        let mut requirements = BTreeSet::new();
        for parameter in syntax.children(role::GENERIC_PARAMETER) {
            if let Some(inherited) = parameter.child(role::INHERITED_TYPE) {
                requirements.insert(GenericRequirementNode::Conformance {
                    left: TypeNode::simple(parameter.require_text(role::NAME)?),
                    right: TypeNode::from_syntax(inherited)?,
                });
            }
        }
        for requirement in syntax.children(role::REQUIREMENT) {
            requirements.insert(Self::from_syntax(requirement)?);
        }
        Ok(requirements)
    }
}

/// Generic parameter names in declaration order.
pub(crate) fn parse_generic_parameters(syntax: &SyntaxNode) -> Result<Vec<String>> {
    syntax
        .children(role::GENERIC_PARAMETER)
        .map(|parameter| parameter.require_text(role::NAME).map(str::to_string))
        .collect()
}

impl fmt::Display for GenericRequirementNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenericRequirementNode::Conformance { left, right } => write!(f, "{}: {}", left, right),
            GenericRequirementNode::SameType { left, right } => write!(f, "{} == {}", left, right),
            GenericRequirementNode::Unknown => f.write_str("<UNKNOWN>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn simple(name: &str) -> SyntaxNode {
        SyntaxNode::new(kind::SIMPLE_TYPE_IDENTIFIER).with_token(role::NAME, name)
    }

    #[test]
    fn test_parameter_clause_and_where_clause_are_unioned() {
        let decl = SyntaxNode::new(kind::FUNCTION_DECL)
            .with(
                role::GENERIC_PARAMETER,
                SyntaxNode::new(kind::GENERIC_PARAMETER)
                    .with_token(role::NAME, "T")
                    .with(role::INHERITED_TYPE, simple("Hashable")),
            )
            .with(
                role::GENERIC_PARAMETER,
                SyntaxNode::new(kind::GENERIC_PARAMETER).with_token(role::NAME, "U"),
            )
            .with(
                role::REQUIREMENT,
                SyntaxNode::new(kind::SAME_TYPE_REQUIREMENT)
                    .with(role::LEFT, simple("U"))
                    .with(role::RIGHT, simple("Int")),
            )
            .with(
                role::REQUIREMENT,
                SyntaxNode::new(kind::CONFORMANCE_REQUIREMENT)
                    .with(role::LEFT, simple("T"))
                    .with(role::RIGHT, simple("Hashable")),
            );

        let requirements = GenericRequirementNode::parse_list(&decl).unwrap();
        assert_eq!(requirements.len(), 2);
        let rendered: Vec<_> = requirements.iter().map(ToString::to_string).collect();
        assert!(rendered.contains(&"T: Hashable".to_string()));
        assert!(rendered.contains(&"U == Int".to_string()));

        assert_eq!(parse_generic_parameters(&decl).unwrap(), vec!["T", "U"]);
    }

    #[test]
    fn test_layout_requirement_is_unknown() {
        let node = GenericRequirementNode::from_syntax(&SyntaxNode::new("LayoutRequirement")).unwrap();
        assert_eq!(node.to_string(), "<UNKNOWN>");
    }
}
