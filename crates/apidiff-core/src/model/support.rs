//! Small nodes shared by several declaration kinds.

use std::collections::BTreeSet;
use std::fmt;

use super::attribute::AttributeNode;
use super::render::{sorted, write_attributes};
use super::types::TypeNode;
use crate::errors::{ApiDiffError, Result};
use crate::syntax::{kind, role, SyntaxNode};

/// Source text of an expression or other construct the model does not
/// decompose.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ExprNode {
    pub text: String,
}

impl ExprNode {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// # Errors
    ///
    /// `MissingSyntaxField` if the node carries no source text.
    pub fn from_syntax(syntax: &SyntaxNode) -> Result<Self> {
        Ok(Self::new(syntax.require_own_text()?))
    }

    pub(crate) fn parse_optional(syntax: &SyntaxNode, role: &str) -> Result<Option<Self>> {
        syntax.child(role).map(Self::from_syntax).transpose()
    }
}

impl fmt::Display for ExprNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// A call argument, `label: expression`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ArgumentNode {
    pub label: Option<String>,
    pub expression: ExprNode,
}

impl ArgumentNode {
    /// # Errors
    ///
    /// `MissingSyntaxField` if the argument has no expression.
    pub fn from_syntax(syntax: &SyntaxNode) -> Result<Self> {
        Ok(Self {
            label: syntax.text_of(role::LABEL).map(str::to_string),
            expression: ExprNode::from_syntax(syntax.require(role::EXPRESSION)?)?,
        })
    }

    pub(crate) fn parse_list(syntax: &SyntaxNode) -> Result<Vec<Self>> {
        syntax.children(role::ARGUMENT).map(Self::from_syntax).collect()
    }
}

impl fmt::Display for ArgumentNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(label) = &self.label {
            write!(f, "{}: ", label)?;
        }
        write!(f, "{}", self.expression)
    }
}

/// A declaration modifier such as `public`, `static` or `private(set)`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ModifierNode {
    pub name: String,
    pub detail: Option<String>,
}

impl ModifierNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            detail: None,
        }
    }

    pub fn with_detail(name: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            detail: Some(detail.into()),
        }
    }

    /// # Errors
    ///
    /// `MissingSyntaxField` if the modifier has no name.
    pub fn from_syntax(syntax: &SyntaxNode) -> Result<Self> {
        Ok(Self {
            name: syntax.require_text(role::NAME)?.to_string(),
            detail: syntax.text_of(role::DETAIL).map(str::to_string),
        })
    }

    pub(crate) fn parse_list(syntax: &SyntaxNode) -> Result<BTreeSet<Self>> {
        syntax.children(role::MODIFIER).map(Self::from_syntax).collect()
    }

    pub fn is_named(&self, name: &str) -> bool {
        self.name == name
    }
}

impl fmt::Display for ModifierNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.detail {
            Some(detail) => write!(f, "{}({})", self.name, detail),
            None => f.write_str(&self.name),
        }
    }
}

/// Spelling of an absent external label
pub const WILDCARD_LABEL: &str = "_";

/// A function, initializer, subscript or enum case parameter.
///
/// The internal parameter name is not part of the API and is not modeled.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FunctionParameterNode {
    pub attributes: BTreeSet<AttributeNode>,
    /// External label; an explicit `_` is stored as `None`
    pub label: Option<String>,
    pub type_annotation: Option<TypeNode>,
    pub is_variadic: bool,
    pub default_value: Option<ExprNode>,
}

impl FunctionParameterNode {
    /// # Errors
    ///
    /// Propagates failures from the parameter's attributes, type and default value.
    pub fn from_syntax(syntax: &SyntaxNode) -> Result<Self> {
        Ok(Self {
            attributes: AttributeNode::parse_list(syntax)?,
            label: syntax
                .text_of(role::LABEL)
                .filter(|label| *label != WILDCARD_LABEL)
                .map(str::to_string),
            type_annotation: TypeNode::parse_optional(syntax, role::TYPE)?,
            is_variadic: syntax.has(role::ELLIPSIS),
            default_value: ExprNode::parse_optional(syntax, role::DEFAULT_VALUE)?,
        })
    }

    pub(crate) fn parse_list(syntax: &SyntaxNode, role: &str) -> Result<Vec<Self>> {
        syntax.children(role).map(Self::from_syntax).collect()
    }

    /// The label used for identity and visibility, `_` when absent.
    pub fn identity_label(&self) -> &str {
        self.label.as_deref().unwrap_or(WILDCARD_LABEL)
    }
}

impl fmt::Display for FunctionParameterNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_attributes(f, &self.attributes)?;
        f.write_str(self.identity_label())?;
        if let Some(ty) = &self.type_annotation {
            write!(f, ": {}", ty)?;
        }
        if self.is_variadic {
            f.write_str("...")?;
        }
        if let Some(default_value) = &self.default_value {
            write!(f, " = {}", default_value)?;
        }
        Ok(())
    }
}

/// A property or subscript accessor (`get`, `set`, `willSet`, ...).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AccessorDeclNode {
    pub attributes: BTreeSet<AttributeNode>,
    pub modifier: Option<ModifierNode>,
    pub kind: String,
}

impl AccessorDeclNode {
    /// The getter implied by a computed property's code block body.
    pub fn implicit_getter() -> Self {
        Self {
            attributes: BTreeSet::new(),
            modifier: None,
            kind: "get".to_string(),
        }
    }

    /// # Errors
    ///
    /// `MissingSyntaxField` if the accessor has no kind token.
    pub fn from_syntax(syntax: &SyntaxNode) -> Result<Self> {
        Ok(Self {
            attributes: AttributeNode::parse_list(syntax)?,
            modifier: syntax
                .child(role::MODIFIER)
                .map(ModifierNode::from_syntax)
                .transpose()?,
            kind: syntax.require_text(role::ACCESSOR_KIND)?.to_string(),
        })
    }

    /// Accessors of the body in `slot`: none without a body, an implicit
    /// getter for a plain code block, otherwise the listed accessors.
    pub(crate) fn parse_body(syntax: &SyntaxNode, slot: &str) -> Result<BTreeSet<Self>> {
        match syntax.child(slot) {
            None => Ok(BTreeSet::new()),
            Some(body) if body.is(kind::ACCESSOR_BLOCK) => body
                .children(role::ACCESSOR)
                .map(Self::from_syntax)
                .collect(),
            Some(_) => Ok(BTreeSet::from([Self::implicit_getter()])),
        }
    }
}

impl fmt::Display for AccessorDeclNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_attributes(f, &self.attributes)?;
        if let Some(modifier) = &self.modifier {
            write!(f, "{} ", modifier)?;
        }
        f.write_str(&self.kind)
    }
}

/// Render a set of accessors as ` { get set }`.
pub(crate) fn write_accessors(
    f: &mut fmt::Formatter<'_>,
    accessors: &BTreeSet<AccessorDeclNode>,
) -> fmt::Result {
    if accessors.is_empty() {
        return Ok(());
    }
    write!(f, " {{ {} }}", sorted(accessors, " "))
}

macro_rules! keyword_enum {
    ($(#[$meta:meta])* $name:ident, $context:literal { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// # Errors
            ///
            /// `UnexpectedToken` for text outside the keyword's vocabulary.
            pub fn parse(text: &str) -> Result<Self> {
                match text {
                    $($text => Ok(Self::$variant),)+
                    other => Err(ApiDiffError::UnexpectedToken {
                        context: $context.to_string(),
                        token: other.to_string(),
                    }),
                }
            }

            pub(crate) fn parse_optional(syntax: &SyntaxNode, role: &str) -> Result<Option<Self>> {
                syntax
                    .child(role)
                    .map(|token| token.require_own_text().and_then(Self::parse))
                    .transpose()
            }

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

keyword_enum!(LetOrVar, "let/var" { Let => "let", Var => "var" });
keyword_enum!(AsyncOrReasync, "async/reasync" { Async => "async", Reasync => "reasync" });
keyword_enum!(ThrowsOrRethrows, "throws/rethrows" { Throws => "throws", Rethrows => "rethrows" });
keyword_enum!(
    /// Suffix of a metatype, `T.Type` or `T.Protocol`
    TypeOrProtocol, "metatype" { Type => "Type", Protocol => "Protocol" }
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modifier_detail_is_parenthesized() {
        assert_eq!(ModifierNode::new("public").to_string(), "public");
        assert_eq!(
            ModifierNode::with_detail("private", "set").to_string(),
            "private(set)"
        );
    }

    #[test]
    fn test_parameter_without_label_renders_underscore() {
        let syntax = SyntaxNode::new(kind::FUNCTION_PARAMETER)
            .with(
                role::TYPE,
                SyntaxNode::new(kind::SIMPLE_TYPE_IDENTIFIER).with_token(role::NAME, "Int"),
            )
            .with_flag(role::ELLIPSIS)
            .with(role::DEFAULT_VALUE, SyntaxNode::expr("[]"));
        let parameter = FunctionParameterNode::from_syntax(&syntax).unwrap();
        assert_eq!(parameter.to_string(), "_: Int... = []");
    }

    #[test]
    fn test_explicit_wildcard_label_is_absent_label() {
        let ty = || SyntaxNode::new(kind::SIMPLE_TYPE_IDENTIFIER).with_token(role::NAME, "Int");
        let implicit = SyntaxNode::new(kind::FUNCTION_PARAMETER).with(role::TYPE, ty());
        let explicit = SyntaxNode::new(kind::FUNCTION_PARAMETER)
            .with_token(role::LABEL, "_")
            .with(role::TYPE, ty());

        let implicit = FunctionParameterNode::from_syntax(&implicit).unwrap();
        let explicit = FunctionParameterNode::from_syntax(&explicit).unwrap();
        assert_eq!(explicit.label, None);
        assert_eq!(implicit, explicit);
    }

    #[test]
    fn test_accessor_body_shapes() {
        let none = SyntaxNode::new(kind::PATTERN_BINDING);
        assert!(AccessorDeclNode::parse_body(&none, role::ACCESSOR)
            .unwrap()
            .is_empty());

        let computed =
            SyntaxNode::new(kind::PATTERN_BINDING).with(role::ACCESSOR, SyntaxNode::new(kind::CODE_BLOCK));
        let accessors = AccessorDeclNode::parse_body(&computed, role::ACCESSOR).unwrap();
        assert_eq!(accessors, BTreeSet::from([AccessorDeclNode::implicit_getter()]));

        let block = SyntaxNode::new(kind::PATTERN_BINDING).with(
            role::ACCESSOR,
            SyntaxNode::new(kind::ACCESSOR_BLOCK)
                .with(
                    role::ACCESSOR,
                    SyntaxNode::new(kind::ACCESSOR_DECL).with_token(role::ACCESSOR_KIND, "set"),
                )
                .with(
                    role::ACCESSOR,
                    SyntaxNode::new(kind::ACCESSOR_DECL).with_token(role::ACCESSOR_KIND, "get"),
                ),
        );
        let accessors = AccessorDeclNode::parse_body(&block, role::ACCESSOR).unwrap();
        let rendered: Vec<_> = accessors.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, vec!["get", "set"]);
    }

    #[test]
    fn test_keyword_outside_vocabulary_is_rejected() {
        let err = ThrowsOrRethrows::parse("maybe").unwrap_err();
        assert_eq!(
            err,
            ApiDiffError::UnexpectedToken {
                context: "throws/rethrows".to_string(),
                token: "maybe".to_string(),
            }
        );
        assert_eq!(LetOrVar::parse("var").unwrap(), LetOrVar::Var);
        assert_eq!(TypeOrProtocol::Protocol.to_string(), "Protocol");
    }
}
