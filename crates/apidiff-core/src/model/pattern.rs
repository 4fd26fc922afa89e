use std::fmt;

use super::render::joined;
use super::support::{ExprNode, LetOrVar};
use super::types::TypeNode;
use crate::errors::Result;
use crate::syntax::{kind, role, SyntaxNode};

/// A binding pattern, as found on the left of a variable declaration.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PatternNode {
    AsType(AsTypePatternNode),
    EnumCase(EnumCasePatternNode),
    Expression(ExprNode),
    Identifier(String),
    IsType(TypeNode),
    Optional(Box<PatternNode>),
    Tuple(TuplePatternNode),
    ValueBinding(ValueBindingPatternNode),
    Wildcard(Option<TypeNode>),
    Unknown,
}

/// `pattern as Type`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AsTypePatternNode {
    pub pattern: Box<PatternNode>,
    pub target: TypeNode,
}

/// `Type.caseName(associated)`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EnumCasePatternNode {
    pub parent: Option<TypeNode>,
    pub case_name: String,
    pub associated: Option<TuplePatternNode>,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TuplePatternNode {
    pub elements: Vec<TuplePatternElementNode>,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TuplePatternElementNode {
    pub label: Option<String>,
    pub pattern: PatternNode,
}

/// `let pattern`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ValueBindingPatternNode {
    pub let_or_var: LetOrVar,
    pub pattern: Box<PatternNode>,
}

impl PatternNode {
    /// # Errors
    ///
    /// Fails when a recognised pattern kind is missing a required child.
    pub fn from_syntax(syntax: &SyntaxNode) -> Result<Self> {
        let node = match syntax.kind.as_str() {
            kind::AS_TYPE_PATTERN => PatternNode::AsType(AsTypePatternNode {
                pattern: Box::new(Self::from_syntax(syntax.require(role::PATTERN)?)?),
                target: TypeNode::from_syntax(syntax.require(role::TYPE)?)?,
            }),
            kind::ENUM_CASE_PATTERN => PatternNode::EnumCase(EnumCasePatternNode {
                parent: TypeNode::parse_optional(syntax, role::TYPE)?,
                case_name: syntax.require_text(role::CASE_NAME)?.to_string(),
                associated: syntax
                    .child(role::ASSOCIATED_TUPLE)
                    .map(TuplePatternNode::from_syntax)
                    .transpose()?,
            }),
            kind::EXPRESSION_PATTERN => {
                PatternNode::Expression(ExprNode::from_syntax(syntax.require(role::EXPRESSION)?)?)
            }
            kind::IDENTIFIER_PATTERN => {
                PatternNode::Identifier(syntax.require_text(role::NAME)?.to_string())
            }
            kind::IS_TYPE_PATTERN => {
                PatternNode::IsType(TypeNode::from_syntax(syntax.require(role::TYPE)?)?)
            }
            kind::OPTIONAL_PATTERN => PatternNode::Optional(Box::new(Self::from_syntax(
                syntax.require(role::PATTERN)?,
            )?)),
            kind::TUPLE_PATTERN => PatternNode::Tuple(TuplePatternNode::from_syntax(syntax)?),
            kind::VALUE_BINDING_PATTERN => PatternNode::ValueBinding(ValueBindingPatternNode {
                let_or_var: LetOrVar::parse(syntax.require_text(role::LET_OR_VAR)?)?,
                pattern: Box::new(Self::from_syntax(syntax.require(role::PATTERN)?)?),
            }),
            kind::WILDCARD_PATTERN => {
                PatternNode::Wildcard(TypeNode::parse_optional(syntax, role::TYPE)?)
            }
            _ => PatternNode::Unknown,
        };
        Ok(node)
    }

    /// The bound name when the pattern is a plain identifier.
    pub fn identifier(&self) -> Option<&str> {
        match self {
            PatternNode::Identifier(name) => Some(name.as_str()),
            _ => None,
        }
    }
}

impl TuplePatternNode {
    /// # Errors
    ///
    /// Fails when an element lacks its pattern.
    pub fn from_syntax(syntax: &SyntaxNode) -> Result<Self> {
        let elements = syntax
            .children(role::ELEMENT)
            .map(|element| {
                Ok(TuplePatternElementNode {
                    label: element.text_of(role::LABEL).map(str::to_string),
                    pattern: PatternNode::from_syntax(element.require(role::PATTERN)?)?,
                })
            })
            .collect::<Result<_>>()?;
        Ok(Self { elements })
    }
}

impl fmt::Display for PatternNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternNode::AsType(node) => write!(f, "{} as {}", node.pattern, node.target),
            PatternNode::EnumCase(node) => {
                if let Some(parent) = &node.parent {
                    write!(f, "{}", parent)?;
                }
                write!(f, ".{}", node.case_name)?;
                if let Some(associated) = &node.associated {
                    write!(f, "{}", associated)?;
                }
                Ok(())
            }
            PatternNode::Expression(expression) => write!(f, "{}", expression),
            PatternNode::Identifier(name) => f.write_str(name),
            PatternNode::IsType(target) => write!(f, "is {}", target),
            PatternNode::Optional(pattern) => write!(f, "{}?", pattern),
            PatternNode::Tuple(node) => write!(f, "{}", node),
            PatternNode::ValueBinding(node) => write!(f, "{} {}", node.let_or_var, node.pattern),
            PatternNode::Wildcard(annotation) => {
                f.write_str("_")?;
                if let Some(annotation) = annotation {
                    write!(f, ": {}", annotation)?;
                }
                Ok(())
            }
            PatternNode::Unknown => f.write_str("<UNKNOWN>"),
        }
    }
}

impl fmt::Display for TuplePatternNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", joined(&self.elements, ", "))
    }
}

impl fmt::Display for TuplePatternElementNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(label) = &self.label {
            write!(f, "{}: ", label)?;
        }
        write!(f, "{}", self.pattern)
    }
}
