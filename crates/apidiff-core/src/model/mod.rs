//! Closed declaration model.
//!
//! Every value here is built once from a [`crate::syntax::SyntaxNode`] and
//! then treated as immutable. Equality, ordering and hashing are structural
//! and derived. `Display` produces the canonical rendering used for diff
//! payloads: unordered parts (attributes, modifiers, composition members,
//! generic requirements) are sorted first, so declarations that differ only
//! in source order render identically.

pub mod attribute;
pub mod decl;
pub mod directive;
pub mod generic;
pub mod member;
pub mod nominal;
pub mod pattern;
mod render;
pub mod support;
pub mod types;

pub use attribute::{AttributeNode, CustomAttributeNode, StandardAttributeNode};
pub use decl::{DeclNode, Discriminator, HasAttributes, HasConformances};
pub use directive::{
    IfConfigClauseNode, IfConfigDeclNode, ImportDeclNode, OperatorDeclNode, PoundErrorDeclNode,
    PoundWarningDeclNode, PrecedenceGroupDeclNode,
};
pub use generic::GenericRequirementNode;
pub use member::{
    DeinitializerDeclNode, EnumCaseDeclNode, FunctionDeclNode, InitializerDeclNode,
    SubscriptDeclNode, VariableDeclNode,
};
pub use nominal::{
    AssociatedtypeDeclNode, ClassDeclNode, EnumDeclNode, ExtensionDeclNode, ProtocolDeclNode,
    StructDeclNode, TypealiasDeclNode,
};
pub use pattern::PatternNode;
pub use support::{
    AccessorDeclNode, ArgumentNode, AsyncOrReasync, ExprNode, FunctionParameterNode, LetOrVar,
    ModifierNode, ThrowsOrRethrows, TypeOrProtocol,
};
pub use types::TypeNode;
