//! Declarations that never become part of the compared surface.
//!
//! They are still modeled so that a tree maps onto the closed set of kinds
//! without loss, and so that diagnostics can render them.

use std::collections::BTreeSet;
use std::fmt;

use super::decl::DeclNode;
use super::render::{sorted, write_modifiers};
use super::support::{ExprNode, ModifierNode};
use crate::errors::Result;
use crate::syntax::{role, SyntaxNode};

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IfConfigDeclNode {
    pub clauses: Vec<IfConfigClauseNode>,
}

/// `#if cond`, `#elseif cond` or `#else` with its declarations.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IfConfigClauseNode {
    pub keyword: String,
    pub condition: Option<ExprNode>,
    pub members: BTreeSet<DeclNode>,
}

impl IfConfigDeclNode {
    pub(crate) fn from_syntax(syntax: &SyntaxNode) -> Result<Self> {
        let clauses = syntax
            .children(role::CLAUSE)
            .map(|clause| {
                Ok(IfConfigClauseNode {
                    keyword: clause.require_text(role::KEYWORD)?.to_string(),
                    condition: ExprNode::parse_optional(clause, role::CONDITION)?,
                    members: DeclNode::parse_members(clause)?,
                })
            })
            .collect::<Result<_>>()?;
        Ok(Self { clauses })
    }
}

impl fmt::Display for IfConfigDeclNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for clause in &self.clauses {
            f.write_str(&clause.keyword)?;
            if let Some(condition) = &clause.condition {
                write!(f, " {}", condition)?;
            }
            f.write_str("\n")?;
            if !clause.members.is_empty() {
                writeln!(f, "{}", sorted(&clause.members, "\n"))?;
            }
        }
        f.write_str("#endif")
    }
}

/// `import kind A.B`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ImportDeclNode {
    pub import_kind: Option<String>,
    pub path: Vec<String>,
}

impl ImportDeclNode {
    pub(crate) fn from_syntax(syntax: &SyntaxNode) -> Result<Self> {
        Ok(Self {
            import_kind: syntax.text_of(role::IMPORT_KIND).map(str::to_string),
            path: syntax
                .children(role::PATH_COMPONENT)
                .map(|component| component.require_own_text().map(str::to_string))
                .collect::<Result<_>>()?,
        })
    }
}

impl fmt::Display for ImportDeclNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("import ")?;
        if let Some(import_kind) = &self.import_kind {
            write!(f, "{} ", import_kind)?;
        }
        f.write_str(&self.path.join("."))
    }
}

/// `prefix operator +++: Group`; fixity is carried as a modifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OperatorDeclNode {
    pub modifiers: BTreeSet<ModifierNode>,
    pub name: String,
    pub precedence_group: Option<String>,
}

impl OperatorDeclNode {
    pub(crate) fn from_syntax(syntax: &SyntaxNode) -> Result<Self> {
        Ok(Self {
            modifiers: ModifierNode::parse_list(syntax)?,
            name: syntax.require_text(role::NAME)?.to_string(),
            precedence_group: syntax.text_of(role::PRECEDENCE_GROUP).map(str::to_string),
        })
    }
}

impl fmt::Display for OperatorDeclNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_modifiers(f, &self.modifiers)?;
        write!(f, "operator {}", self.name)?;
        if let Some(group) = &self.precedence_group {
            write!(f, ": {}", group)?;
        }
        Ok(())
    }
}

/// `precedencegroup Name { associativity: left ... }`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PrecedenceGroupDeclNode {
    pub name: String,
    pub group_attributes: Vec<ExprNode>,
}

impl PrecedenceGroupDeclNode {
    pub(crate) fn from_syntax(syntax: &SyntaxNode) -> Result<Self> {
        Ok(Self {
            name: syntax.require_text(role::NAME)?.to_string(),
            group_attributes: syntax
                .children(role::GROUP_ATTRIBUTE)
                .map(ExprNode::from_syntax)
                .collect::<Result<_>>()?,
        })
    }
}

impl fmt::Display for PrecedenceGroupDeclNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "precedencegroup {} {{", self.name)?;
        for attribute in &self.group_attributes {
            write!(f, " {}", attribute)?;
        }
        f.write_str(" }")
    }
}

/// `#error("message")`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PoundErrorDeclNode {
    pub message: ExprNode,
}

/// `#warning("message")`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PoundWarningDeclNode {
    pub message: ExprNode,
}

impl PoundErrorDeclNode {
    pub(crate) fn from_syntax(syntax: &SyntaxNode) -> Result<Self> {
        Ok(Self {
            message: ExprNode::from_syntax(syntax.require(role::MESSAGE)?)?,
        })
    }
}

impl PoundWarningDeclNode {
    pub(crate) fn from_syntax(syntax: &SyntaxNode) -> Result<Self> {
        Ok(Self {
            message: ExprNode::from_syntax(syntax.require(role::MESSAGE)?)?,
        })
    }
}

impl fmt::Display for PoundErrorDeclNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#error({})", self.message)
    }
}

impl fmt::Display for PoundWarningDeclNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#warning({})", self.message)
    }
}
