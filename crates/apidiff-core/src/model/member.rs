//! Member-like declarations: functions, initializers, properties and friends.

use std::collections::BTreeSet;
use std::fmt;

use super::attribute::AttributeNode;
use super::generic::{parse_generic_parameters, GenericRequirementNode};
use super::pattern::PatternNode;
use super::render::{joined, write_generic_parameters, write_header, write_requirements};
use super::support::{
    write_accessors, AccessorDeclNode, AsyncOrReasync, ExprNode, FunctionParameterNode, LetOrVar,
    ModifierNode, ThrowsOrRethrows,
};
use super::types::TypeNode;
use crate::errors::Result;
use crate::syntax::{role, SyntaxNode};

fn write_parameters(
    f: &mut fmt::Formatter<'_>,
    parameters: &[FunctionParameterNode],
) -> fmt::Result {
    write!(f, "({})", joined(parameters, ", "))
}

/// `deinit`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DeinitializerDeclNode {
    pub attributes: BTreeSet<AttributeNode>,
    pub modifiers: BTreeSet<ModifierNode>,
}

impl DeinitializerDeclNode {
    pub(crate) fn from_syntax(syntax: &SyntaxNode) -> Result<Self> {
        Ok(Self {
            attributes: AttributeNode::parse_list(syntax)?,
            modifiers: ModifierNode::parse_list(syntax)?,
        })
    }
}

impl fmt::Display for DeinitializerDeclNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_header(f, &self.attributes, &self.modifiers)?;
        f.write_str("deinit")
    }
}

/// One element of a `case` clause: `case name(associated) = raw`.
///
/// A clause declaring several cases yields one node per case, each carrying
/// the clause's attributes and modifiers.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EnumCaseDeclNode {
    pub attributes: BTreeSet<AttributeNode>,
    pub modifiers: BTreeSet<ModifierNode>,
    pub name: String,
    pub associated_value: Vec<FunctionParameterNode>,
    pub raw_value: Option<ExprNode>,
}

impl EnumCaseDeclNode {
    pub(crate) fn parse_list(syntax: &SyntaxNode) -> Result<Vec<Self>> {
        let attributes = AttributeNode::parse_list(syntax)?;
        let modifiers = ModifierNode::parse_list(syntax)?;
        syntax
            .children(role::ELEMENT)
            .map(|element| {
                Ok(Self {
                    attributes: attributes.clone(),
                    modifiers: modifiers.clone(),
                    name: element.require_text(role::NAME)?.to_string(),
                    associated_value: FunctionParameterNode::parse_list(element, role::PARAMETER)?,
                    raw_value: ExprNode::parse_optional(element, role::RAW_VALUE)?,
                })
            })
            .collect()
    }
}

impl fmt::Display for EnumCaseDeclNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_header(f, &self.attributes, &self.modifiers)?;
        write!(f, "case {}", self.name)?;
        if !self.associated_value.is_empty() {
            write_parameters(f, &self.associated_value)?;
        }
        if let Some(raw_value) = &self.raw_value {
            write!(f, " = {}", raw_value)?;
        }
        Ok(())
    }
}

/// `func name<T>(params) async throws -> Return where ...`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FunctionDeclNode {
    pub attributes: BTreeSet<AttributeNode>,
    pub modifiers: BTreeSet<ModifierNode>,
    pub name: String,
    pub generic_parameters: Vec<String>,
    pub parameters: Vec<FunctionParameterNode>,
    pub asyncness: Option<AsyncOrReasync>,
    pub throws: Option<ThrowsOrRethrows>,
    pub return_type: Option<TypeNode>,
    pub generic_requirements: BTreeSet<GenericRequirementNode>,
}

impl FunctionDeclNode {
    pub(crate) fn from_syntax(syntax: &SyntaxNode) -> Result<Self> {
        Ok(Self {
            attributes: AttributeNode::parse_list(syntax)?,
            modifiers: ModifierNode::parse_list(syntax)?,
            name: syntax.require_text(role::NAME)?.to_string(),
            generic_parameters: parse_generic_parameters(syntax)?,
            parameters: FunctionParameterNode::parse_list(syntax, role::PARAMETER)?,
            asyncness: AsyncOrReasync::parse_optional(syntax, role::ASYNC_KEYWORD)?,
            throws: ThrowsOrRethrows::parse_optional(syntax, role::THROWS_KEYWORD)?,
            return_type: TypeNode::parse_optional(syntax, role::RETURN_TYPE)?,
            generic_requirements: GenericRequirementNode::parse_list(syntax)?,
        })
    }
}

impl fmt::Display for FunctionDeclNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_header(f, &self.attributes, &self.modifiers)?;
        write!(f, "func {}", self.name)?;
        write_generic_parameters(f, &self.generic_parameters)?;
        write_parameters(f, &self.parameters)?;
        if let Some(asyncness) = self.asyncness {
            write!(f, " {}", asyncness)?;
        }
        if let Some(throws) = self.throws {
            write!(f, " {}", throws)?;
        }
        if let Some(return_type) = &self.return_type {
            write!(f, " -> {}", return_type)?;
        }
        write_requirements(f, &self.generic_requirements)
    }
}

/// `init?<T>(params) throws where ...`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct InitializerDeclNode {
    pub attributes: BTreeSet<AttributeNode>,
    pub modifiers: BTreeSet<ModifierNode>,
    pub is_failable: bool,
    pub generic_parameters: Vec<String>,
    pub parameters: Vec<FunctionParameterNode>,
    pub throws: Option<ThrowsOrRethrows>,
    pub generic_requirements: BTreeSet<GenericRequirementNode>,
}

impl InitializerDeclNode {
    pub(crate) fn from_syntax(syntax: &SyntaxNode) -> Result<Self> {
        Ok(Self {
            attributes: AttributeNode::parse_list(syntax)?,
            modifiers: ModifierNode::parse_list(syntax)?,
            is_failable: syntax.has(role::OPTIONAL_MARK),
            generic_parameters: parse_generic_parameters(syntax)?,
            parameters: FunctionParameterNode::parse_list(syntax, role::PARAMETER)?,
            throws: ThrowsOrRethrows::parse_optional(syntax, role::THROWS_KEYWORD)?,
            generic_requirements: GenericRequirementNode::parse_list(syntax)?,
        })
    }
}

impl fmt::Display for InitializerDeclNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_header(f, &self.attributes, &self.modifiers)?;
        f.write_str("init")?;
        if self.is_failable {
            f.write_str("?")?;
        }
        write_generic_parameters(f, &self.generic_parameters)?;
        write_parameters(f, &self.parameters)?;
        if let Some(throws) = self.throws {
            write!(f, " {}", throws)?;
        }
        write_requirements(f, &self.generic_requirements)
    }
}

/// `subscript<T>(indices) -> Result where ...`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptDeclNode {
    pub attributes: BTreeSet<AttributeNode>,
    pub modifiers: BTreeSet<ModifierNode>,
    pub generic_parameters: Vec<String>,
    pub indices: Vec<FunctionParameterNode>,
    pub result: TypeNode,
    pub generic_requirements: BTreeSet<GenericRequirementNode>,
    pub accessors: BTreeSet<AccessorDeclNode>,
}

impl SubscriptDeclNode {
    pub(crate) fn from_syntax(syntax: &SyntaxNode) -> Result<Self> {
        Ok(Self {
            attributes: AttributeNode::parse_list(syntax)?,
            modifiers: ModifierNode::parse_list(syntax)?,
            generic_parameters: parse_generic_parameters(syntax)?,
            indices: FunctionParameterNode::parse_list(syntax, role::PARAMETER)?,
            result: TypeNode::from_syntax(syntax.require(role::RETURN_TYPE)?)?,
            generic_requirements: GenericRequirementNode::parse_list(syntax)?,
            accessors: AccessorDeclNode::parse_body(syntax, role::ACCESSOR)?,
        })
    }
}

impl fmt::Display for SubscriptDeclNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_header(f, &self.attributes, &self.modifiers)?;
        f.write_str("subscript")?;
        write_generic_parameters(f, &self.generic_parameters)?;
        write_parameters(f, &self.indices)?;
        write!(f, " -> {}", self.result)?;
        write_requirements(f, &self.generic_requirements)?;
        write_accessors(f, &self.accessors)
    }
}

/// One binding of a `let`/`var` statement.
///
/// A statement with several bindings yields one node per binding, each
/// carrying the statement's attributes and modifiers.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VariableDeclNode {
    pub attributes: BTreeSet<AttributeNode>,
    pub modifiers: BTreeSet<ModifierNode>,
    pub let_or_var: LetOrVar,
    pub pattern: PatternNode,
    pub type_annotation: Option<TypeNode>,
    pub initializer: Option<ExprNode>,
    pub accessors: BTreeSet<AccessorDeclNode>,
}

impl VariableDeclNode {
    pub(crate) fn parse_list(syntax: &SyntaxNode) -> Result<Vec<Self>> {
        let attributes = AttributeNode::parse_list(syntax)?;
        let modifiers = ModifierNode::parse_list(syntax)?;
        let let_or_var = LetOrVar::parse(syntax.require_text(role::LET_OR_VAR)?)?;
        syntax
            .children(role::BINDING)
            .map(|binding| {
                Ok(Self {
                    attributes: attributes.clone(),
                    modifiers: modifiers.clone(),
                    let_or_var,
                    pattern: PatternNode::from_syntax(binding.require(role::PATTERN)?)?,
                    type_annotation: TypeNode::parse_optional(binding, role::TYPE)?,
                    initializer: ExprNode::parse_optional(binding, role::INITIALIZER)?,
                    accessors: AccessorDeclNode::parse_body(binding, role::ACCESSOR)?,
                })
            })
            .collect()
    }
}

impl fmt::Display for VariableDeclNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_header(f, &self.attributes, &self.modifiers)?;
        write!(f, "{} {}", self.let_or_var, self.pattern)?;
        if let Some(type_annotation) = &self.type_annotation {
            write!(f, ": {}", type_annotation)?;
        }
        if let Some(initializer) = &self.initializer {
            write!(f, " = {}", initializer)?;
        }
        write_accessors(f, &self.accessors)
    }
}
