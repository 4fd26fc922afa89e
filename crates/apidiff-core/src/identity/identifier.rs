use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable cross-version key of a declaration slot.
///
/// `path` is the chain of enclosing type names from the module root, with
/// the module name itself omitted. Two declarations occupy the same slot in
/// two versions exactly when their identifiers are equal.
///
/// Parameter labels are external labels, `_` for unlabeled parameters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DeclarationIdentifier {
    Type {
        path: Vec<String>,
    },
    Deinitializer {
        path: Vec<String>,
    },
    Function {
        path: Vec<String>,
        name: String,
        labels: Vec<String>,
        is_static: bool,
    },
    Initializer {
        path: Vec<String>,
        labels: Vec<String>,
    },
    Subscript {
        path: Vec<String>,
        labels: Vec<String>,
        is_static: bool,
    },
    Variable {
        path: Vec<String>,
        name: String,
        is_static: bool,
    },
}

impl DeclarationIdentifier {
    /// Module scope.
    pub fn root() -> Self {
        DeclarationIdentifier::Type { path: Vec::new() }
    }

    /// Type identifier for a path of names.
    pub fn type_path<I, S>(components: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        DeclarationIdentifier::Type {
            path: components.into_iter().map(Into::into).collect(),
        }
    }

    /// Enclosing type names. For a type this includes the type itself.
    pub fn path(&self) -> &[String] {
        match self {
            DeclarationIdentifier::Type { path }
            | DeclarationIdentifier::Deinitializer { path }
            | DeclarationIdentifier::Function { path, .. }
            | DeclarationIdentifier::Initializer { path, .. }
            | DeclarationIdentifier::Subscript { path, .. }
            | DeclarationIdentifier::Variable { path, .. } => path,
        }
    }

    /// `path` joined with `.`
    pub fn type_name(&self) -> String {
        self.path().join(".")
    }

    /// Identifier of the enclosing scope.
    pub fn parent(&self) -> DeclarationIdentifier {
        match self {
            DeclarationIdentifier::Type { path } => DeclarationIdentifier::Type {
                path: path[..path.len().saturating_sub(1)].to_vec(),
            },
            other => DeclarationIdentifier::Type {
                path: other.path().to_vec(),
            },
        }
    }

    pub fn is_static(&self) -> bool {
        match self {
            DeclarationIdentifier::Function { is_static, .. }
            | DeclarationIdentifier::Subscript { is_static, .. }
            | DeclarationIdentifier::Variable { is_static, .. } => *is_static,
            DeclarationIdentifier::Type { .. }
            | DeclarationIdentifier::Deinitializer { .. }
            | DeclarationIdentifier::Initializer { .. } => false,
        }
    }

    /// Position of the declaration kind within one type: types, then static
    /// variables, subscripts and functions, then initializers, deinitializers
    /// and finally instance variables, subscripts and functions.
    fn rank(&self) -> u8 {
        match self {
            DeclarationIdentifier::Type { .. } => 0,
            DeclarationIdentifier::Variable {
                is_static: true, ..
            } => 1,
            DeclarationIdentifier::Subscript {
                is_static: true, ..
            } => 2,
            DeclarationIdentifier::Function {
                is_static: true, ..
            } => 3,
            DeclarationIdentifier::Initializer { .. } => 4,
            DeclarationIdentifier::Deinitializer { .. } => 5,
            DeclarationIdentifier::Variable {
                is_static: false, ..
            } => 6,
            DeclarationIdentifier::Subscript {
                is_static: false, ..
            } => 7,
            DeclarationIdentifier::Function {
                is_static: false, ..
            } => 8,
        }
    }

    fn name(&self) -> Option<&str> {
        match self {
            DeclarationIdentifier::Function { name, .. }
            | DeclarationIdentifier::Variable { name, .. } => Some(name),
            _ => None,
        }
    }

    fn labels(&self) -> &[String] {
        match self {
            DeclarationIdentifier::Function { labels, .. }
            | DeclarationIdentifier::Initializer { labels, .. }
            | DeclarationIdentifier::Subscript { labels, .. } => labels,
            _ => &[],
        }
    }
}

fn write_prefix(f: &mut fmt::Formatter<'_>, path: &[String]) -> fmt::Result {
    for component in path {
        write!(f, "{}.", component)?;
    }
    Ok(())
}

fn write_labels(f: &mut fmt::Formatter<'_>, labels: &[String]) -> fmt::Result {
    f.write_str("(")?;
    for label in labels {
        write!(f, "{}:", label)?;
    }
    f.write_str(")")
}

fn write_static(f: &mut fmt::Formatter<'_>, is_static: bool) -> fmt::Result {
    if is_static {
        f.write_str(" /* static */")?;
    }
    Ok(())
}

impl fmt::Display for DeclarationIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeclarationIdentifier::Type { path } => f.write_str(&path.join(".")),
            DeclarationIdentifier::Deinitializer { path } => {
                write_prefix(f, path)?;
                f.write_str("deinit")
            }
            DeclarationIdentifier::Function {
                path,
                name,
                labels,
                is_static,
            } => {
                write_prefix(f, path)?;
                f.write_str(name)?;
                write_labels(f, labels)?;
                write_static(f, *is_static)
            }
            DeclarationIdentifier::Initializer { path, labels } => {
                write_prefix(f, path)?;
                f.write_str("init")?;
                write_labels(f, labels)
            }
            DeclarationIdentifier::Subscript {
                path,
                labels,
                is_static,
            } => {
                write_prefix(f, path)?;
                f.write_str("subscript")?;
                write_labels(f, labels)?;
                write_static(f, *is_static)
            }
            DeclarationIdentifier::Variable {
                path,
                name,
                is_static,
            } => {
                write_prefix(f, path)?;
                f.write_str(name)?;
                write_static(f, *is_static)
            }
        }
    }
}

impl Ord for DeclarationIdentifier {
    /// Type name, then kind rank, then rendering. The remaining fields only
    /// break ties between identifiers that render identically.
    fn cmp(&self, other: &Self) -> Ordering {
        self.type_name()
            .cmp(&other.type_name())
            .then_with(|| self.rank().cmp(&other.rank()))
            .then_with(|| self.to_string().cmp(&other.to_string()))
            .then_with(|| self.path().cmp(other.path()))
            .then_with(|| self.name().cmp(&other.name()))
            .then_with(|| self.labels().cmp(other.labels()))
    }
}

impl PartialOrd for DeclarationIdentifier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
