//! Type references.
//!
//! `TypeNode` is recursive; boxed payloads keep the enum sized. Unrecognised
//! type syntax becomes [`TypeNode::Unknown`], which renders as `<UNKNOWN>`.

use std::collections::BTreeSet;
use std::fmt;

use super::attribute::AttributeNode;
use super::render::{joined, sorted};
use super::support::{ExprNode, ThrowsOrRethrows, TypeOrProtocol};
use crate::errors::Result;
use crate::syntax::{kind, role, SyntaxNode};

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TypeNode {
    Simple(SimpleTypeNode),
    Optional(OptionalTypeNode),
    Member(MemberTypeNode),
    Tuple(TupleTypeNode),
    Function(FunctionTypeNode),
    Array(ArrayTypeNode),
    Dictionary(DictionaryTypeNode),
    Opaque(OpaqueTypeNode),
    ImplicitlyUnwrappedOptional(ImplicitlyUnwrappedOptionalTypeNode),
    Composition(CompositionTypeNode),
    Attributed(AttributedTypeNode),
    Metatype(MetatypeTypeNode),
    Unknown,
}

/// `Name<Args>`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SimpleTypeNode {
    pub name: String,
    pub generic_arguments: Vec<TypeNode>,
}

/// `T?`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OptionalTypeNode {
    pub wrapped: Box<TypeNode>,
}

/// `Parent.Name<Args>`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MemberTypeNode {
    pub parent: Box<TypeNode>,
    pub name: String,
    pub generic_arguments: Vec<TypeNode>,
}

/// `(A, label: B)`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TupleTypeNode {
    pub elements: Vec<TupleTypeElementNode>,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TupleTypeElementNode {
    pub is_inout: bool,
    pub name: Option<String>,
    pub element_type: TypeNode,
    pub is_variadic: bool,
    pub initializer: Option<ExprNode>,
}

/// `(Args) async throws -> Return`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FunctionTypeNode {
    pub arguments: Vec<TupleTypeElementNode>,
    pub is_async: bool,
    pub throws: Option<ThrowsOrRethrows>,
    pub return_type: Box<TypeNode>,
}

/// `[Element]`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ArrayTypeNode {
    pub element: Box<TypeNode>,
}

/// `[Key: Value]`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DictionaryTypeNode {
    pub key: Box<TypeNode>,
    pub value: Box<TypeNode>,
}

/// `some Base`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OpaqueTypeNode {
    pub base: Box<TypeNode>,
}

/// `T!`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ImplicitlyUnwrappedOptionalTypeNode {
    pub wrapped: Box<TypeNode>,
}

/// `A & B`, unordered
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CompositionTypeNode {
    pub types: BTreeSet<TypeNode>,
}

/// `inout @escaping Base`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AttributedTypeNode {
    pub specifier: Option<String>,
    pub attributes: BTreeSet<AttributeNode>,
    pub base: Box<TypeNode>,
}

/// `Base.Type` or `Base.Protocol`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MetatypeTypeNode {
    pub base: Box<TypeNode>,
    pub type_or_protocol: TypeOrProtocol,
}

impl TypeNode {
    /// Plain `Name` with no generic arguments.
    pub fn simple(name: impl Into<String>) -> Self {
        TypeNode::Simple(SimpleTypeNode {
            name: name.into(),
            generic_arguments: Vec::new(),
        })
    }

    /// Map a type syntax node to its variant.
    ///
    /// # Errors
    ///
    /// Fails when a recognised type kind is missing a required child.
    pub fn from_syntax(syntax: &SyntaxNode) -> Result<Self> {
        let node = match syntax.kind.as_str() {
            kind::SIMPLE_TYPE_IDENTIFIER => TypeNode::Simple(SimpleTypeNode {
                name: syntax.require_text(role::NAME)?.to_string(),
                generic_arguments: Self::parse_list(syntax, role::GENERIC_ARGUMENT)?,
            }),
            kind::OPTIONAL_TYPE => TypeNode::Optional(OptionalTypeNode {
                wrapped: Self::parse_boxed(syntax, role::WRAPPED_TYPE)?,
            }),
            kind::MEMBER_TYPE_IDENTIFIER => TypeNode::Member(MemberTypeNode {
                parent: Self::parse_boxed(syntax, role::BASE_TYPE)?,
                name: syntax.require_text(role::NAME)?.to_string(),
                generic_arguments: Self::parse_list(syntax, role::GENERIC_ARGUMENT)?,
            }),
            kind::TUPLE_TYPE => TypeNode::Tuple(TupleTypeNode {
                elements: TupleTypeElementNode::parse_list(syntax, role::ELEMENT)?,
            }),
            kind::FUNCTION_TYPE => TypeNode::Function(FunctionTypeNode {
                arguments: TupleTypeElementNode::parse_list(syntax, role::ARGUMENT)?,
                is_async: syntax.has(role::ASYNC_KEYWORD),
                throws: ThrowsOrRethrows::parse_optional(syntax, role::THROWS_KEYWORD)?,
                return_type: Self::parse_boxed(syntax, role::RETURN_TYPE)?,
            }),
            kind::ARRAY_TYPE => TypeNode::Array(ArrayTypeNode {
                element: Self::parse_boxed(syntax, role::ELEMENT)?,
            }),
            kind::DICTIONARY_TYPE => TypeNode::Dictionary(DictionaryTypeNode {
                key: Self::parse_boxed(syntax, role::KEY_TYPE)?,
                value: Self::parse_boxed(syntax, role::VALUE_TYPE)?,
            }),
            kind::SOME_TYPE => TypeNode::Opaque(OpaqueTypeNode {
                base: Self::parse_boxed(syntax, role::BASE_TYPE)?,
            }),
            kind::IMPLICITLY_UNWRAPPED_OPTIONAL_TYPE => {
                TypeNode::ImplicitlyUnwrappedOptional(ImplicitlyUnwrappedOptionalTypeNode {
                    wrapped: Self::parse_boxed(syntax, role::WRAPPED_TYPE)?,
                })
            }
            kind::COMPOSITION_TYPE => TypeNode::Composition(CompositionTypeNode {
                types: syntax
                    .children(role::ELEMENT)
                    .map(Self::from_syntax)
                    .collect::<Result<_>>()?,
            }),
            kind::ATTRIBUTED_TYPE => TypeNode::Attributed(AttributedTypeNode {
                specifier: syntax.text_of(role::SPECIFIER).map(str::to_string),
                attributes: AttributeNode::parse_list(syntax)?,
                base: Self::parse_boxed(syntax, role::BASE_TYPE)?,
            }),
            kind::METATYPE_TYPE => TypeNode::Metatype(MetatypeTypeNode {
                base: Self::parse_boxed(syntax, role::BASE_TYPE)?,
                type_or_protocol: TypeOrProtocol::parse(
                    syntax.require_text(role::TYPE_OR_PROTOCOL)?,
                )?,
            }),
            _ => TypeNode::Unknown,
        };
        Ok(node)
    }

    fn parse_boxed(syntax: &SyntaxNode, role: &str) -> Result<Box<Self>> {
        Ok(Box::new(Self::from_syntax(syntax.require(role)?)?))
    }

    pub(crate) fn parse_optional(syntax: &SyntaxNode, role: &str) -> Result<Option<Self>> {
        syntax.child(role).map(Self::from_syntax).transpose()
    }

    /// Types in `role`, in source order.
    pub(crate) fn parse_list(syntax: &SyntaxNode, role: &str) -> Result<Vec<Self>> {
        syntax.children(role).map(Self::from_syntax).collect()
    }

    /// Inheritance clause, in source order.
    pub(crate) fn parse_inheritance(syntax: &SyntaxNode) -> Result<Vec<Self>> {
        Self::parse_list(syntax, role::INHERITED_TYPE)
    }
}

impl TupleTypeElementNode {
    /// # Errors
    ///
    /// `MissingSyntaxField` if the element has no type.
    pub fn from_syntax(syntax: &SyntaxNode) -> Result<Self> {
        Ok(Self {
            is_inout: syntax.has(role::IN_OUT),
            name: syntax.text_of(role::NAME).map(str::to_string),
            element_type: TypeNode::from_syntax(syntax.require(role::TYPE)?)?,
            is_variadic: syntax.has(role::ELLIPSIS),
            initializer: ExprNode::parse_optional(syntax, role::INITIALIZER)?,
        })
    }

    fn parse_list(syntax: &SyntaxNode, role: &str) -> Result<Vec<Self>> {
        syntax.children(role).map(Self::from_syntax).collect()
    }
}

fn write_generic_arguments(f: &mut fmt::Formatter<'_>, arguments: &[TypeNode]) -> fmt::Result {
    if arguments.is_empty() {
        return Ok(());
    }
    write!(f, "<{}>", joined(arguments, ", "))
}

impl fmt::Display for TypeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeNode::Simple(node) => {
                f.write_str(&node.name)?;
                write_generic_arguments(f, &node.generic_arguments)
            }
            TypeNode::Optional(node) => write!(f, "{}?", node.wrapped),
            TypeNode::Member(node) => {
                write!(f, "{}.{}", node.parent, node.name)?;
                write_generic_arguments(f, &node.generic_arguments)
            }
            TypeNode::Tuple(node) => write!(f, "({})", joined(&node.elements, ", ")),
            TypeNode::Function(node) => {
                write!(f, "({})", joined(&node.arguments, ", "))?;
                if node.is_async {
                    f.write_str(" async")?;
                }
                if let Some(throws) = node.throws {
                    write!(f, " {}", throws)?;
                }
                write!(f, " -> {}", node.return_type)
            }
            TypeNode::Array(node) => write!(f, "[{}]", node.element),
            TypeNode::Dictionary(node) => write!(f, "[{}: {}]", node.key, node.value),
            TypeNode::Opaque(node) => write!(f, "some {}", node.base),
            TypeNode::ImplicitlyUnwrappedOptional(node) => write!(f, "{}!", node.wrapped),
            TypeNode::Composition(node) => f.write_str(&sorted(&node.types, " & ")),
            TypeNode::Attributed(node) => {
                if let Some(specifier) = &node.specifier {
                    write!(f, "{} ", specifier)?;
                }
                if !node.attributes.is_empty() {
                    write!(f, "{} ", sorted(&node.attributes, " "))?;
                }
                write!(f, "{}", node.base)
            }
            TypeNode::Metatype(node) => write!(f, "{}.{}", node.base, node.type_or_protocol),
            TypeNode::Unknown => f.write_str("<UNKNOWN>"),
        }
    }
}

impl fmt::Display for TupleTypeElementNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_inout {
            f.write_str("inout ")?;
        }
        match &self.name {
            Some(name) => write!(f, "{}: {}", name, self.element_type)?,
            None => write!(f, "{}", self.element_type)?,
        }
        if self.is_variadic {
            f.write_str("...")?;
        }
        if let Some(initializer) = &self.initializer {
            write!(f, " = {}", initializer)?;
        }
        Ok(())
    }
}
