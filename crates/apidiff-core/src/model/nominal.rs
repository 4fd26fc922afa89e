//! Type-like declarations and extensions.
//!
//! Container kinds (`class`, `enum`, `protocol`, `struct`, `extension`) keep
//! their members until the collector flattens them. Members never take part
//! in a rendering.

use std::collections::BTreeSet;
use std::fmt;

use super::attribute::AttributeNode;
use super::decl::DeclNode;
use super::generic::{parse_generic_parameters, GenericRequirementNode};
use super::render::{
    write_conformances, write_generic_parameters, write_header, write_requirements,
};
use super::support::ModifierNode;
use super::types::TypeNode;
use crate::errors::Result;
use crate::syntax::{role, SyntaxNode};

/// `associatedtype Name: Conformances = Default where ...`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AssociatedtypeDeclNode {
    pub attributes: BTreeSet<AttributeNode>,
    pub modifiers: BTreeSet<ModifierNode>,
    pub name: String,
    pub conformances: Vec<TypeNode>,
    pub default_type: Option<TypeNode>,
    pub generic_requirements: BTreeSet<GenericRequirementNode>,
}

impl AssociatedtypeDeclNode {
    pub(crate) fn from_syntax(syntax: &SyntaxNode) -> Result<Self> {
        Ok(Self {
            attributes: AttributeNode::parse_list(syntax)?,
            modifiers: ModifierNode::parse_list(syntax)?,
            name: syntax.require_text(role::NAME)?.to_string(),
            conformances: TypeNode::parse_inheritance(syntax)?,
            default_type: TypeNode::parse_optional(syntax, role::INITIALIZER)?,
            generic_requirements: GenericRequirementNode::parse_list(syntax)?,
        })
    }
}

impl fmt::Display for AssociatedtypeDeclNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_header(f, &self.attributes, &self.modifiers)?;
        write!(f, "associatedtype {}", self.name)?;
        write_conformances(f, &self.conformances)?;
        if let Some(default_type) = &self.default_type {
            write!(f, " = {}", default_type)?;
        }
        write_requirements(f, &self.generic_requirements)
    }
}

macro_rules! nominal_decl {
    ($(#[$meta:meta])* $name:ident, $keyword:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name {
            pub attributes: BTreeSet<AttributeNode>,
            pub modifiers: BTreeSet<ModifierNode>,
            pub name: String,
            pub generic_parameters: Vec<String>,
            pub conformances: Vec<TypeNode>,
            pub generic_requirements: BTreeSet<GenericRequirementNode>,
            pub members: BTreeSet<DeclNode>,
        }

        impl $name {
            pub(crate) fn from_syntax(syntax: &SyntaxNode) -> Result<Self> {
                Ok(Self {
                    attributes: AttributeNode::parse_list(syntax)?,
                    modifiers: ModifierNode::parse_list(syntax)?,
                    name: syntax.require_text(role::NAME)?.to_string(),
                    generic_parameters: parse_generic_parameters(syntax)?,
                    conformances: TypeNode::parse_inheritance(syntax)?,
                    generic_requirements: GenericRequirementNode::parse_list(syntax)?,
                    members: DeclNode::parse_members(syntax)?,
                })
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write_header(f, &self.attributes, &self.modifiers)?;
                write!(f, concat!($keyword, " {}"), self.name)?;
                write_generic_parameters(f, &self.generic_parameters)?;
                write_conformances(f, &self.conformances)?;
                write_requirements(f, &self.generic_requirements)
            }
        }
    };
}

nominal_decl!(
    /// `class Name<T>: Superclass, Protocols where ...`
    ClassDeclNode,
    "class"
);
nominal_decl!(
    /// `enum Name<T>: RawValue, Protocols where ...`
    EnumDeclNode,
    "enum"
);
nominal_decl!(
    /// `struct Name<T>: Protocols where ...`
    StructDeclNode,
    "struct"
);

/// `protocol Name: Protocols where ...`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProtocolDeclNode {
    pub attributes: BTreeSet<AttributeNode>,
    pub modifiers: BTreeSet<ModifierNode>,
    pub name: String,
    pub conformances: Vec<TypeNode>,
    pub generic_requirements: BTreeSet<GenericRequirementNode>,
    pub members: BTreeSet<DeclNode>,
}

impl ProtocolDeclNode {
    pub(crate) fn from_syntax(syntax: &SyntaxNode) -> Result<Self> {
        Ok(Self {
            attributes: AttributeNode::parse_list(syntax)?,
            modifiers: ModifierNode::parse_list(syntax)?,
            name: syntax.require_text(role::NAME)?.to_string(),
            conformances: TypeNode::parse_inheritance(syntax)?,
            generic_requirements: GenericRequirementNode::parse_list(syntax)?,
            members: DeclNode::parse_members(syntax)?,
        })
    }
}

impl fmt::Display for ProtocolDeclNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_header(f, &self.attributes, &self.modifiers)?;
        write!(f, "protocol {}", self.name)?;
        write_conformances(f, &self.conformances)?;
        write_requirements(f, &self.generic_requirements)
    }
}

/// `extension Target: Protocols where ...`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ExtensionDeclNode {
    pub attributes: BTreeSet<AttributeNode>,
    pub modifiers: BTreeSet<ModifierNode>,
    pub extended_type: TypeNode,
    pub conformances: Vec<TypeNode>,
    pub generic_requirements: BTreeSet<GenericRequirementNode>,
    pub members: BTreeSet<DeclNode>,
}

impl ExtensionDeclNode {
    pub(crate) fn from_syntax(syntax: &SyntaxNode) -> Result<Self> {
        Ok(Self {
            attributes: AttributeNode::parse_list(syntax)?,
            modifiers: ModifierNode::parse_list(syntax)?,
            extended_type: TypeNode::from_syntax(syntax.require(role::EXTENDED_TYPE)?)?,
            conformances: TypeNode::parse_inheritance(syntax)?,
            generic_requirements: GenericRequirementNode::parse_list(syntax)?,
            members: DeclNode::parse_members(syntax)?,
        })
    }
}

impl fmt::Display for ExtensionDeclNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_header(f, &self.attributes, &self.modifiers)?;
        write!(f, "extension {}", self.extended_type)?;
        write_conformances(f, &self.conformances)?;
        write_requirements(f, &self.generic_requirements)
    }
}

/// `typealias Name<T> = Aliased where ...`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypealiasDeclNode {
    pub attributes: BTreeSet<AttributeNode>,
    pub modifiers: BTreeSet<ModifierNode>,
    pub name: String,
    pub generic_parameters: Vec<String>,
    pub aliased: Option<TypeNode>,
    pub generic_requirements: BTreeSet<GenericRequirementNode>,
}

impl TypealiasDeclNode {
    pub(crate) fn from_syntax(syntax: &SyntaxNode) -> Result<Self> {
        Ok(Self {
            attributes: AttributeNode::parse_list(syntax)?,
            modifiers: ModifierNode::parse_list(syntax)?,
            name: syntax.require_text(role::NAME)?.to_string(),
            generic_parameters: parse_generic_parameters(syntax)?,
            aliased: TypeNode::parse_optional(syntax, role::INITIALIZER)?,
            generic_requirements: GenericRequirementNode::parse_list(syntax)?,
        })
    }
}

impl fmt::Display for TypealiasDeclNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_header(f, &self.attributes, &self.modifiers)?;
        write!(f, "typealias {}", self.name)?;
        write_generic_parameters(f, &self.generic_parameters)?;
        if let Some(aliased) = &self.aliased {
            write!(f, " = {}", aliased)?;
        }
        write_requirements(f, &self.generic_requirements)
    }
}
