use std::collections::BTreeSet;
use std::fmt;

use super::attribute::AttributeNode;
use super::directive::{
    IfConfigDeclNode, ImportDeclNode, OperatorDeclNode, PoundErrorDeclNode, PoundWarningDeclNode,
    PrecedenceGroupDeclNode,
};
use super::member::{
    DeinitializerDeclNode, EnumCaseDeclNode, FunctionDeclNode, InitializerDeclNode,
    SubscriptDeclNode, VariableDeclNode,
};
use super::nominal::{
    AssociatedtypeDeclNode, ClassDeclNode, EnumDeclNode, ExtensionDeclNode, ProtocolDeclNode,
    StructDeclNode, TypealiasDeclNode,
};
use super::support::ModifierNode;
use super::types::TypeNode;
use crate::errors::{ApiDiffError, Result};
use crate::syntax::{kind, role, SyntaxNode};

/// A declaration of the compared surface.
///
/// The set of kinds is closed. Syntax of any other kind maps to
/// [`DeclNode::Unknown`], which carries no content: two unknown declarations
/// are always equal.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DeclNode {
    Associatedtype(AssociatedtypeDeclNode),
    Class(ClassDeclNode),
    Deinitializer(DeinitializerDeclNode),
    Enum(EnumDeclNode),
    EnumCase(EnumCaseDeclNode),
    Extension(ExtensionDeclNode),
    Function(FunctionDeclNode),
    IfConfig(IfConfigDeclNode),
    Import(ImportDeclNode),
    Initializer(InitializerDeclNode),
    Operator(OperatorDeclNode),
    PoundError(PoundErrorDeclNode),
    PoundWarning(PoundWarningDeclNode),
    PrecedenceGroup(PrecedenceGroupDeclNode),
    Protocol(ProtocolDeclNode),
    Struct(StructDeclNode),
    Subscript(SubscriptDeclNode),
    Typealias(TypealiasDeclNode),
    Variable(VariableDeclNode),
    Unknown,
}

/// Fieldless tag of a [`DeclNode`] variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Discriminator {
    Associatedtype,
    Class,
    Deinitializer,
    Enum,
    EnumCase,
    Extension,
    Function,
    IfConfig,
    Import,
    Initializer,
    Operator,
    PoundError,
    PoundWarning,
    PrecedenceGroup,
    Protocol,
    Struct,
    Subscript,
    Typealias,
    Variable,
    Unknown,
}

impl Discriminator {
    /// Stable name used in errors and logs
    pub fn name(&self) -> &'static str {
        match self {
            Discriminator::Associatedtype => "associatedtype",
            Discriminator::Class => "class",
            Discriminator::Deinitializer => "deinitializer",
            Discriminator::Enum => "enum",
            Discriminator::EnumCase => "enumCase",
            Discriminator::Extension => "extension",
            Discriminator::Function => "function",
            Discriminator::IfConfig => "ifConfig",
            Discriminator::Import => "import",
            Discriminator::Initializer => "initializer",
            Discriminator::Operator => "operator",
            Discriminator::PoundError => "poundError",
            Discriminator::PoundWarning => "poundWarning",
            Discriminator::PrecedenceGroup => "precedenceGroup",
            Discriminator::Protocol => "protocol",
            Discriminator::Struct => "struct",
            Discriminator::Subscript => "subscript",
            Discriminator::Typealias => "typealias",
            Discriminator::Variable => "variable",
            Discriminator::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Discriminator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Declarations that carry an attribute set.
pub trait HasAttributes {
    fn attributes(&self) -> &BTreeSet<AttributeNode>;
    fn attributes_mut(&mut self) -> &mut BTreeSet<AttributeNode>;
}

/// Declarations that carry an inheritance (conformance) list.
pub trait HasConformances {
    fn conformances(&self) -> &[TypeNode];
    fn conformances_mut(&mut self) -> &mut Vec<TypeNode>;
}

macro_rules! impl_has_attributes {
    ($($node:ty),+ $(,)?) => {
        $(impl HasAttributes for $node {
            fn attributes(&self) -> &BTreeSet<AttributeNode> {
                &self.attributes
            }

            fn attributes_mut(&mut self) -> &mut BTreeSet<AttributeNode> {
                &mut self.attributes
            }
        })+
    };
}

macro_rules! impl_has_conformances {
    ($($node:ty),+ $(,)?) => {
        $(impl HasConformances for $node {
            fn conformances(&self) -> &[TypeNode] {
                &self.conformances
            }

            fn conformances_mut(&mut self) -> &mut Vec<TypeNode> {
                &mut self.conformances
            }
        })+
    };
}

impl_has_attributes!(
    AssociatedtypeDeclNode,
    ClassDeclNode,
    DeinitializerDeclNode,
    EnumDeclNode,
    EnumCaseDeclNode,
    ExtensionDeclNode,
    FunctionDeclNode,
    InitializerDeclNode,
    ProtocolDeclNode,
    StructDeclNode,
    SubscriptDeclNode,
    TypealiasDeclNode,
    VariableDeclNode,
);

impl_has_conformances!(
    AssociatedtypeDeclNode,
    ClassDeclNode,
    EnumDeclNode,
    ExtensionDeclNode,
    ProtocolDeclNode,
    StructDeclNode,
);

impl DeclNode {
    /// Map one declaration syntax node to the declarations it introduces.
    ///
    /// Almost every kind yields exactly one node. A `case` clause yields one
    /// node per case and a `let`/`var` statement one node per binding.
    ///
    /// # Errors
    ///
    /// `MissingSyntaxField` or `UnexpectedToken` for malformed syntax of a
    /// recognised kind.
    pub fn from_syntax(syntax: &SyntaxNode) -> Result<Vec<DeclNode>> {
        let node = match syntax.kind.as_str() {
            kind::ASSOCIATEDTYPE_DECL => {
                DeclNode::Associatedtype(AssociatedtypeDeclNode::from_syntax(syntax)?)
            }
            kind::CLASS_DECL => DeclNode::Class(ClassDeclNode::from_syntax(syntax)?),
            kind::DEINITIALIZER_DECL => {
                DeclNode::Deinitializer(DeinitializerDeclNode::from_syntax(syntax)?)
            }
            kind::ENUM_DECL => DeclNode::Enum(EnumDeclNode::from_syntax(syntax)?),
            kind::ENUM_CASE_DECL => {
                return Ok(EnumCaseDeclNode::parse_list(syntax)?
                    .into_iter()
                    .map(DeclNode::EnumCase)
                    .collect());
            }
            kind::EXTENSION_DECL => DeclNode::Extension(ExtensionDeclNode::from_syntax(syntax)?),
            kind::FUNCTION_DECL => DeclNode::Function(FunctionDeclNode::from_syntax(syntax)?),
            kind::IF_CONFIG_DECL => DeclNode::IfConfig(IfConfigDeclNode::from_syntax(syntax)?),
            kind::IMPORT_DECL => DeclNode::Import(ImportDeclNode::from_syntax(syntax)?),
            kind::INITIALIZER_DECL => {
                DeclNode::Initializer(InitializerDeclNode::from_syntax(syntax)?)
            }
            kind::OPERATOR_DECL => DeclNode::Operator(OperatorDeclNode::from_syntax(syntax)?),
            kind::POUND_ERROR_DECL => DeclNode::PoundError(PoundErrorDeclNode::from_syntax(syntax)?),
            kind::POUND_WARNING_DECL => {
                DeclNode::PoundWarning(PoundWarningDeclNode::from_syntax(syntax)?)
            }
            kind::PRECEDENCE_GROUP_DECL => {
                DeclNode::PrecedenceGroup(PrecedenceGroupDeclNode::from_syntax(syntax)?)
            }
            kind::PROTOCOL_DECL => DeclNode::Protocol(ProtocolDeclNode::from_syntax(syntax)?),
            kind::STRUCT_DECL => DeclNode::Struct(StructDeclNode::from_syntax(syntax)?),
            kind::SUBSCRIPT_DECL => DeclNode::Subscript(SubscriptDeclNode::from_syntax(syntax)?),
            kind::TYPEALIAS_DECL => DeclNode::Typealias(TypealiasDeclNode::from_syntax(syntax)?),
            kind::VARIABLE_DECL => {
                return Ok(VariableDeclNode::parse_list(syntax)?
                    .into_iter()
                    .map(DeclNode::Variable)
                    .collect());
            }
            _ => DeclNode::Unknown,
        };
        Ok(vec![node])
    }

    /// Declarations in `slot` of `syntax`, expanded and in source order.
    ///
    /// # Errors
    ///
    /// Propagates the first malformed declaration.
    pub fn parse_list(syntax: &SyntaxNode, slot: &str) -> Result<Vec<DeclNode>> {
        let mut nodes = Vec::new();
        for child in syntax.children(slot) {
            nodes.extend(Self::from_syntax(child)?);
        }
        Ok(nodes)
    }

    pub(crate) fn parse_members(syntax: &SyntaxNode) -> Result<BTreeSet<DeclNode>> {
        Ok(Self::parse_list(syntax, role::MEMBER)?.into_iter().collect())
    }

    /// Top-level declarations of a `SourceFile` tree.
    ///
    /// # Errors
    ///
    /// `UnexpectedToken` if the root is not a source file, otherwise the
    /// first malformed declaration.
    pub fn parse_source_file(syntax: &SyntaxNode) -> Result<Vec<DeclNode>> {
        if !syntax.is(kind::SOURCE_FILE) {
            return Err(ApiDiffError::UnexpectedToken {
                context: "source file root".to_string(),
                token: syntax.kind.clone(),
            });
        }
        Self::parse_list(syntax, role::STATEMENT)
    }

    pub fn discriminator(&self) -> Discriminator {
        match self {
            DeclNode::Associatedtype(_) => Discriminator::Associatedtype,
            DeclNode::Class(_) => Discriminator::Class,
            DeclNode::Deinitializer(_) => Discriminator::Deinitializer,
            DeclNode::Enum(_) => Discriminator::Enum,
            DeclNode::EnumCase(_) => Discriminator::EnumCase,
            DeclNode::Extension(_) => Discriminator::Extension,
            DeclNode::Function(_) => Discriminator::Function,
            DeclNode::IfConfig(_) => Discriminator::IfConfig,
            DeclNode::Import(_) => Discriminator::Import,
            DeclNode::Initializer(_) => Discriminator::Initializer,
            DeclNode::Operator(_) => Discriminator::Operator,
            DeclNode::PoundError(_) => Discriminator::PoundError,
            DeclNode::PoundWarning(_) => Discriminator::PoundWarning,
            DeclNode::PrecedenceGroup(_) => Discriminator::PrecedenceGroup,
            DeclNode::Protocol(_) => Discriminator::Protocol,
            DeclNode::Struct(_) => Discriminator::Struct,
            DeclNode::Subscript(_) => Discriminator::Subscript,
            DeclNode::Typealias(_) => Discriminator::Typealias,
            DeclNode::Variable(_) => Discriminator::Variable,
            DeclNode::Unknown => Discriminator::Unknown,
        }
    }

    pub fn as_has_attributes(&self) -> Option<&dyn HasAttributes> {
        match self {
            DeclNode::Associatedtype(node) => Some(node),
            DeclNode::Class(node) => Some(node),
            DeclNode::Deinitializer(node) => Some(node),
            DeclNode::Enum(node) => Some(node),
            DeclNode::EnumCase(node) => Some(node),
            DeclNode::Extension(node) => Some(node),
            DeclNode::Function(node) => Some(node),
            DeclNode::Initializer(node) => Some(node),
            DeclNode::Protocol(node) => Some(node),
            DeclNode::Struct(node) => Some(node),
            DeclNode::Subscript(node) => Some(node),
            DeclNode::Typealias(node) => Some(node),
            DeclNode::Variable(node) => Some(node),
            DeclNode::IfConfig(_)
            | DeclNode::Import(_)
            | DeclNode::Operator(_)
            | DeclNode::PoundError(_)
            | DeclNode::PoundWarning(_)
            | DeclNode::PrecedenceGroup(_)
            | DeclNode::Unknown => None,
        }
    }

    pub fn as_has_attributes_mut(&mut self) -> Option<&mut dyn HasAttributes> {
        match self {
            DeclNode::Associatedtype(node) => Some(node),
            DeclNode::Class(node) => Some(node),
            DeclNode::Deinitializer(node) => Some(node),
            DeclNode::Enum(node) => Some(node),
            DeclNode::EnumCase(node) => Some(node),
            DeclNode::Extension(node) => Some(node),
            DeclNode::Function(node) => Some(node),
            DeclNode::Initializer(node) => Some(node),
            DeclNode::Protocol(node) => Some(node),
            DeclNode::Struct(node) => Some(node),
            DeclNode::Subscript(node) => Some(node),
            DeclNode::Typealias(node) => Some(node),
            DeclNode::Variable(node) => Some(node),
            DeclNode::IfConfig(_)
            | DeclNode::Import(_)
            | DeclNode::Operator(_)
            | DeclNode::PoundError(_)
            | DeclNode::PoundWarning(_)
            | DeclNode::PrecedenceGroup(_)
            | DeclNode::Unknown => None,
        }
    }

    pub fn as_has_conformances(&self) -> Option<&dyn HasConformances> {
        match self {
            DeclNode::Associatedtype(node) => Some(node),
            DeclNode::Class(node) => Some(node),
            DeclNode::Enum(node) => Some(node),
            DeclNode::Extension(node) => Some(node),
            DeclNode::Protocol(node) => Some(node),
            DeclNode::Struct(node) => Some(node),
            DeclNode::Deinitializer(_)
            | DeclNode::EnumCase(_)
            | DeclNode::Function(_)
            | DeclNode::IfConfig(_)
            | DeclNode::Import(_)
            | DeclNode::Initializer(_)
            | DeclNode::Operator(_)
            | DeclNode::PoundError(_)
            | DeclNode::PoundWarning(_)
            | DeclNode::PrecedenceGroup(_)
            | DeclNode::Subscript(_)
            | DeclNode::Typealias(_)
            | DeclNode::Variable(_)
            | DeclNode::Unknown => None,
        }
    }

    pub fn as_has_conformances_mut(&mut self) -> Option<&mut dyn HasConformances> {
        match self {
            DeclNode::Associatedtype(node) => Some(node),
            DeclNode::Class(node) => Some(node),
            DeclNode::Enum(node) => Some(node),
            DeclNode::Extension(node) => Some(node),
            DeclNode::Protocol(node) => Some(node),
            DeclNode::Struct(node) => Some(node),
            DeclNode::Deinitializer(_)
            | DeclNode::EnumCase(_)
            | DeclNode::Function(_)
            | DeclNode::IfConfig(_)
            | DeclNode::Import(_)
            | DeclNode::Initializer(_)
            | DeclNode::Operator(_)
            | DeclNode::PoundError(_)
            | DeclNode::PoundWarning(_)
            | DeclNode::PrecedenceGroup(_)
            | DeclNode::Subscript(_)
            | DeclNode::Typealias(_)
            | DeclNode::Variable(_)
            | DeclNode::Unknown => None,
        }
    }

    pub fn attributes(&self) -> Option<&BTreeSet<AttributeNode>> {
        self.as_has_attributes().map(|node| node.attributes())
    }

    pub fn attributes_mut(&mut self) -> Option<&mut BTreeSet<AttributeNode>> {
        self.as_has_attributes_mut().map(|node| node.attributes_mut())
    }

    pub fn conformances(&self) -> Option<&[TypeNode]> {
        self.as_has_conformances().map(|node| node.conformances())
    }

    pub fn conformances_mut(&mut self) -> Option<&mut Vec<TypeNode>> {
        self.as_has_conformances_mut()
            .map(|node| node.conformances_mut())
    }

    /// Modifier set, for kinds that carry one.
    pub fn modifiers(&self) -> Option<&BTreeSet<ModifierNode>> {
        match self {
            DeclNode::Associatedtype(node) => Some(&node.modifiers),
            DeclNode::Class(node) => Some(&node.modifiers),
            DeclNode::Deinitializer(node) => Some(&node.modifiers),
            DeclNode::Enum(node) => Some(&node.modifiers),
            DeclNode::EnumCase(node) => Some(&node.modifiers),
            DeclNode::Extension(node) => Some(&node.modifiers),
            DeclNode::Function(node) => Some(&node.modifiers),
            DeclNode::Initializer(node) => Some(&node.modifiers),
            DeclNode::Operator(node) => Some(&node.modifiers),
            DeclNode::Protocol(node) => Some(&node.modifiers),
            DeclNode::Struct(node) => Some(&node.modifiers),
            DeclNode::Subscript(node) => Some(&node.modifiers),
            DeclNode::Typealias(node) => Some(&node.modifiers),
            DeclNode::Variable(node) => Some(&node.modifiers),
            DeclNode::IfConfig(_)
            | DeclNode::Import(_)
            | DeclNode::PoundError(_)
            | DeclNode::PoundWarning(_)
            | DeclNode::PrecedenceGroup(_)
            | DeclNode::Unknown => None,
        }
    }

    /// Nested declarations of a container kind.
    pub fn members(&self) -> Option<&BTreeSet<DeclNode>> {
        match self {
            DeclNode::Class(node) => Some(&node.members),
            DeclNode::Enum(node) => Some(&node.members),
            DeclNode::Extension(node) => Some(&node.members),
            DeclNode::Protocol(node) => Some(&node.members),
            DeclNode::Struct(node) => Some(&node.members),
            _ => None,
        }
    }

    /// Move the members out, leaving the container with none.
    ///
    /// Returns an empty set for kinds that are not containers.
    pub fn take_members(&mut self) -> BTreeSet<DeclNode> {
        match self {
            DeclNode::Class(node) => std::mem::take(&mut node.members),
            DeclNode::Enum(node) => std::mem::take(&mut node.members),
            DeclNode::Extension(node) => std::mem::take(&mut node.members),
            DeclNode::Protocol(node) => std::mem::take(&mut node.members),
            DeclNode::Struct(node) => std::mem::take(&mut node.members),
            _ => BTreeSet::new(),
        }
    }
}

impl fmt::Display for DeclNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeclNode::Associatedtype(node) => fmt::Display::fmt(node, f),
            DeclNode::Class(node) => fmt::Display::fmt(node, f),
            DeclNode::Deinitializer(node) => fmt::Display::fmt(node, f),
            DeclNode::Enum(node) => fmt::Display::fmt(node, f),
            DeclNode::EnumCase(node) => fmt::Display::fmt(node, f),
            DeclNode::Extension(node) => fmt::Display::fmt(node, f),
            DeclNode::Function(node) => fmt::Display::fmt(node, f),
            DeclNode::IfConfig(node) => fmt::Display::fmt(node, f),
            DeclNode::Import(node) => fmt::Display::fmt(node, f),
            DeclNode::Initializer(node) => fmt::Display::fmt(node, f),
            DeclNode::Operator(node) => fmt::Display::fmt(node, f),
            DeclNode::PoundError(node) => fmt::Display::fmt(node, f),
            DeclNode::PoundWarning(node) => fmt::Display::fmt(node, f),
            DeclNode::PrecedenceGroup(node) => fmt::Display::fmt(node, f),
            DeclNode::Protocol(node) => fmt::Display::fmt(node, f),
            DeclNode::Struct(node) => fmt::Display::fmt(node, f),
            DeclNode::Subscript(node) => fmt::Display::fmt(node, f),
            DeclNode::Typealias(node) => fmt::Display::fmt(node, f),
            DeclNode::Variable(node) => fmt::Display::fmt(node, f),
            DeclNode::Unknown => f.write_str("<UNKNOWN>"),
        }
    }
}
