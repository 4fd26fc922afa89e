//! Concrete syntax input.
//!
//! The syntax provider that tokenizes and parses interface source lives
//! outside this crate. What crosses the boundary is a generic, open-kinded
//! tree: every node has a grammar `kind`, optional token `text`, and children
//! tagged with the `role` they play in their parent. The closed declaration
//! model in [`crate::model`] is built from this tree.
//!
//! Tokens are leaf nodes of kind [`kind::TOKEN`] whose `text` is the token
//! text. Flags such as `optionalMark` are children whose presence is the
//! whole signal. List-valued slots repeat the same role.
//!
//! Trees can be built in process with the builder methods or decoded from
//! JSON produced by an out-of-process provider:
//!
//! ```
//! use apidiff_core::syntax::{kind, role, SyntaxNode};
//!
//! let decl = SyntaxNode::new(kind::STRUCT_DECL)
//!     .with(role::MODIFIER, SyntaxNode::modifier("public"))
//!     .with_token(role::NAME, "Foo");
//! let file = SyntaxNode::new(kind::SOURCE_FILE).with(role::STATEMENT, decl);
//!
//! let json = file.to_json().unwrap();
//! assert_eq!(SyntaxNode::from_json(&json).unwrap(), file);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{ApiDiffError, Result};

/// Grammar node kinds understood by the declaration model.
pub mod kind {
    pub const SOURCE_FILE: &str = "SourceFile";
    pub const TOKEN: &str = "Token";
    pub const EXPR: &str = "Expr";
    pub const CODE_BLOCK: &str = "CodeBlock";

    // Declarations
    pub const ASSOCIATEDTYPE_DECL: &str = "AssociatedtypeDecl";
    pub const CLASS_DECL: &str = "ClassDecl";
    pub const DEINITIALIZER_DECL: &str = "DeinitializerDecl";
    pub const ENUM_DECL: &str = "EnumDecl";
    pub const ENUM_CASE_DECL: &str = "EnumCaseDecl";
    pub const EXTENSION_DECL: &str = "ExtensionDecl";
    pub const FUNCTION_DECL: &str = "FunctionDecl";
    pub const IF_CONFIG_DECL: &str = "IfConfigDecl";
    pub const IMPORT_DECL: &str = "ImportDecl";
    pub const INITIALIZER_DECL: &str = "InitializerDecl";
    pub const OPERATOR_DECL: &str = "OperatorDecl";
    pub const POUND_ERROR_DECL: &str = "PoundErrorDecl";
    pub const POUND_WARNING_DECL: &str = "PoundWarningDecl";
    pub const PRECEDENCE_GROUP_DECL: &str = "PrecedenceGroupDecl";
    pub const PROTOCOL_DECL: &str = "ProtocolDecl";
    pub const STRUCT_DECL: &str = "StructDecl";
    pub const SUBSCRIPT_DECL: &str = "SubscriptDecl";
    pub const TYPEALIAS_DECL: &str = "TypealiasDecl";
    pub const VARIABLE_DECL: &str = "VariableDecl";

    // Declaration parts
    pub const ATTRIBUTE: &str = "Attribute";
    pub const CUSTOM_ATTRIBUTE: &str = "CustomAttribute";
    pub const ARGUMENT: &str = "Argument";
    pub const DECL_MODIFIER: &str = "DeclModifier";
    pub const GENERIC_PARAMETER: &str = "GenericParameter";
    pub const CONFORMANCE_REQUIREMENT: &str = "ConformanceRequirement";
    pub const SAME_TYPE_REQUIREMENT: &str = "SameTypeRequirement";
    pub const FUNCTION_PARAMETER: &str = "FunctionParameter";
    pub const ACCESSOR_BLOCK: &str = "AccessorBlock";
    pub const ACCESSOR_DECL: &str = "AccessorDecl";
    pub const ENUM_CASE_ELEMENT: &str = "EnumCaseElement";
    pub const PATTERN_BINDING: &str = "PatternBinding";
    pub const IF_CONFIG_CLAUSE: &str = "IfConfigClause";

    // Types
    pub const SIMPLE_TYPE_IDENTIFIER: &str = "SimpleTypeIdentifier";
    pub const OPTIONAL_TYPE: &str = "OptionalType";
    pub const MEMBER_TYPE_IDENTIFIER: &str = "MemberTypeIdentifier";
    pub const TUPLE_TYPE: &str = "TupleType";
    pub const TUPLE_TYPE_ELEMENT: &str = "TupleTypeElement";
    pub const FUNCTION_TYPE: &str = "FunctionType";
    pub const ARRAY_TYPE: &str = "ArrayType";
    pub const DICTIONARY_TYPE: &str = "DictionaryType";
    pub const SOME_TYPE: &str = "SomeType";
    pub const IMPLICITLY_UNWRAPPED_OPTIONAL_TYPE: &str = "ImplicitlyUnwrappedOptionalType";
    pub const COMPOSITION_TYPE: &str = "CompositionType";
    pub const ATTRIBUTED_TYPE: &str = "AttributedType";
    pub const METATYPE_TYPE: &str = "MetatypeType";

    // Patterns
    pub const AS_TYPE_PATTERN: &str = "AsTypePattern";
    pub const ENUM_CASE_PATTERN: &str = "EnumCasePattern";
    pub const EXPRESSION_PATTERN: &str = "ExpressionPattern";
    pub const IDENTIFIER_PATTERN: &str = "IdentifierPattern";
    pub const IS_TYPE_PATTERN: &str = "IsTypePattern";
    pub const OPTIONAL_PATTERN: &str = "OptionalPattern";
    pub const TUPLE_PATTERN: &str = "TuplePattern";
    pub const TUPLE_PATTERN_ELEMENT: &str = "TuplePatternElement";
    pub const VALUE_BINDING_PATTERN: &str = "ValueBindingPattern";
    pub const WILDCARD_PATTERN: &str = "WildcardPattern";
}

/// Child roles.
pub mod role {
    pub const STATEMENT: &str = "statement";
    pub const MEMBER: &str = "member";
    pub const ATTRIBUTE: &str = "attribute";
    pub const MODIFIER: &str = "modifier";
    pub const NAME: &str = "name";
    pub const DETAIL: &str = "detail";
    pub const LABEL: &str = "label";
    pub const ARGUMENT: &str = "argument";
    pub const EXPRESSION: &str = "expression";
    pub const TYPE: &str = "type";
    pub const GENERIC_PARAMETER: &str = "genericParameter";
    pub const GENERIC_ARGUMENT: &str = "genericArgument";
    pub const INHERITED_TYPE: &str = "inheritedType";
    pub const REQUIREMENT: &str = "requirement";
    pub const LEFT: &str = "left";
    pub const RIGHT: &str = "right";
    pub const PARAMETER: &str = "parameter";
    pub const ELLIPSIS: &str = "ellipsis";
    pub const DEFAULT_VALUE: &str = "defaultValue";
    pub const ASYNC_KEYWORD: &str = "asyncKeyword";
    pub const THROWS_KEYWORD: &str = "throwsKeyword";
    pub const RETURN_TYPE: &str = "returnType";
    pub const OPTIONAL_MARK: &str = "optionalMark";
    pub const ACCESSOR: &str = "accessor";
    pub const ACCESSOR_KIND: &str = "accessorKind";
    pub const ELEMENT: &str = "element";
    pub const RAW_VALUE: &str = "rawValue";
    pub const INITIALIZER: &str = "initializer";
    pub const EXTENDED_TYPE: &str = "extendedType";
    pub const BINDING: &str = "binding";
    pub const PATTERN: &str = "pattern";
    pub const LET_OR_VAR: &str = "letOrVar";
    pub const IMPORT_KIND: &str = "importKind";
    pub const PATH_COMPONENT: &str = "pathComponent";
    pub const PRECEDENCE_GROUP: &str = "precedenceGroup";
    pub const GROUP_ATTRIBUTE: &str = "groupAttribute";
    pub const MESSAGE: &str = "message";
    pub const CLAUSE: &str = "clause";
    pub const KEYWORD: &str = "keyword";
    pub const CONDITION: &str = "condition";
    pub const BASE_TYPE: &str = "baseType";
    pub const WRAPPED_TYPE: &str = "wrappedType";
    pub const KEY_TYPE: &str = "keyType";
    pub const VALUE_TYPE: &str = "valueType";
    pub const SPECIFIER: &str = "specifier";
    pub const TYPE_OR_PROTOCOL: &str = "typeOrProtocol";
    pub const IN_OUT: &str = "inOut";
    pub const CASE_NAME: &str = "caseName";
    pub const ASSOCIATED_TUPLE: &str = "associatedTuple";
}

/// A node of the concrete syntax tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyntaxNode {
    /// Grammar kind, e.g. `StructDecl`
    pub kind: String,
    /// Token text for leaves, source text for opaque expressions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Children in source order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<SyntaxChild>,
}

/// A child slot of a [`SyntaxNode`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyntaxChild {
    pub role: String,
    pub node: SyntaxNode,
}

impl SyntaxNode {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            text: None,
            children: Vec::new(),
        }
    }

    /// A token leaf carrying `text`.
    pub fn token(text: impl Into<String>) -> Self {
        Self {
            kind: kind::TOKEN.to_string(),
            text: Some(text.into()),
            children: Vec::new(),
        }
    }

    /// An opaque expression leaf carrying its source text.
    pub fn expr(text: impl Into<String>) -> Self {
        Self {
            kind: kind::EXPR.to_string(),
            text: Some(text.into()),
            children: Vec::new(),
        }
    }

    /// A `DeclModifier` node with the given name.
    pub fn modifier(name: impl Into<String>) -> Self {
        Self::new(kind::DECL_MODIFIER).with_token(role::NAME, name)
    }

    pub fn with(mut self, role: impl Into<String>, node: SyntaxNode) -> Self {
        self.children.push(SyntaxChild {
            role: role.into(),
            node,
        });
        self
    }

    pub fn with_all<I>(mut self, role: &str, nodes: I) -> Self
    where
        I: IntoIterator<Item = SyntaxNode>,
    {
        for node in nodes {
            self = self.with(role, node);
        }
        self
    }

    pub fn with_token(self, role: impl Into<String>, text: impl Into<String>) -> Self {
        self.with(role, SyntaxNode::token(text))
    }

    pub fn with_flag(self, role: impl Into<String>) -> Self {
        self.with(role, SyntaxNode::new(kind::TOKEN))
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn is(&self, kind: &str) -> bool {
        self.kind == kind
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// First child in `role`.
    pub fn child(&self, role: &str) -> Option<&SyntaxNode> {
        self.children
            .iter()
            .find(|c| c.role == role)
            .map(|c| &c.node)
    }

    /// All children in `role`, in source order.
    pub fn children<'a>(&'a self, role: &'a str) -> impl Iterator<Item = &'a SyntaxNode> + 'a {
        self.children
            .iter()
            .filter(move |c| c.role == role)
            .map(|c| &c.node)
    }

    pub fn has(&self, role: &str) -> bool {
        self.child(role).is_some()
    }

    /// Text of the first child in `role`.
    pub fn text_of(&self, role: &str) -> Option<&str> {
        self.child(role).and_then(SyntaxNode::text)
    }

    /// First child in `role`, or a `MissingSyntaxField` error.
    pub fn require(&self, role: &str) -> Result<&SyntaxNode> {
        self.child(role)
            .ok_or_else(|| ApiDiffError::MissingSyntaxField {
                kind: self.kind.clone(),
                role: role.to_string(),
            })
    }

    /// Text of the first child in `role`, or a `MissingSyntaxField` error.
    pub fn require_text(&self, role: &str) -> Result<&str> {
        self.require(role)?
            .text()
            .ok_or_else(|| ApiDiffError::MissingSyntaxField {
                kind: self.kind.clone(),
                role: role.to_string(),
            })
    }

    /// Own text, or a `MissingSyntaxField` error naming the text slot.
    pub fn require_own_text(&self) -> Result<&str> {
        self.text().ok_or_else(|| ApiDiffError::MissingSyntaxField {
            kind: self.kind.clone(),
            role: "text".to_string(),
        })
    }

    /// Decode a tree from JSON.
    ///
    /// # Errors
    ///
    /// `Serialization` if the input is not a valid tree.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Encode the tree as JSON.
    ///
    /// # Errors
    ///
    /// `Serialization` if encoding fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
