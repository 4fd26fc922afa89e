use apidiff_core_types::RunId;
use thiserror::Error;

/// Result type alias using ApiDiffError
pub type Result<T> = std::result::Result<T, ApiDiffError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that callers can match on without
/// parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Syntax input
    /// A recognised syntax node is missing a child it requires
    MissingField,
    /// A keyword token lies outside its closed vocabulary
    InvalidSyntax,

    // Modeling invariants
    /// Identity resolution, merge or comparison met a state the model rules out.
    /// Aborts the whole run.
    InvariantViolation,

    // Integration
    Serialization,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::MissingField => "ERR_MISSING_FIELD",
            ExErrorKind::InvalidSyntax => "ERR_INVALID_SYNTAX",
            ExErrorKind::InvariantViolation => "ERR_INVARIANT_VIOLATION",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries the classification used by callers plus the context (operation,
/// declaration identifier, run id) needed to locate the failure.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    identifier: Option<String>,
    run_id: Option<RunId>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            identifier: None,
            run_id: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add declaration identifier context
    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    /// Add run ID context
    pub fn with_run_id(mut self, run_id: RunId) -> Self {
        self.run_id = Some(run_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the identifier context, if any
    pub fn identifier(&self) -> Option<&str> {
        self.identifier.as_deref()
    }

    /// Get the run ID context, if any
    pub fn run_id(&self) -> Option<&RunId> {
        self.run_id.as_ref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(identifier) = &self.identifier {
            write!(f, " (identifier: {})", identifier)?;
        }
        if let Some(run_id) = &self.run_id {
            write!(f, " (run_id: {})", run_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Error taxonomy for diff operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiDiffError {
    // ===== Syntax Input =====
    /// A recognised node kind lacks a required child
    #[error("{kind} is missing required `{role}`")]
    MissingSyntaxField { kind: String, role: String },

    /// A keyword token outside its closed vocabulary
    #[error("Unexpected token `{token}` for {context}")]
    UnexpectedToken { context: String, token: String },

    // ===== Invariant Violations =====
    /// More than one primary declaration at an identity that has parked extensions
    #[error("Identity {identifier} has {count} primary declarations at merge time")]
    MultiplePrimaryDeclarations { identifier: String, count: usize },

    /// Parked conformances target a declaration kind that cannot carry them
    #[error("Cannot merge extension conformances into {kind} at {identifier}")]
    ConformanceMergeTarget { identifier: String, kind: String },

    /// A declaration appeared under a scope that cannot own it
    #[error("Cannot place {declaration} under scope {scope}")]
    InvalidScope { scope: String, declaration: String },

    /// Structural comparison was asked to compare two different kinds
    #[error("Cannot structurally compare {old} with {new} at {identifier}")]
    KindMismatch {
        identifier: String,
        old: String,
        new: String,
    },

    /// A modification with neither added nor removed declarations
    #[error("Modification for {identifier} has no added or removed declarations")]
    EmptyModification { identifier: String },

    // ===== Integration =====
    /// Syntax tree decoding failure
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl ApiDiffError {
    /// The structured kind this error maps to
    pub fn kind(&self) -> ExErrorKind {
        match self {
            ApiDiffError::MissingSyntaxField { .. } => ExErrorKind::MissingField,
            ApiDiffError::UnexpectedToken { .. } => ExErrorKind::InvalidSyntax,
            ApiDiffError::MultiplePrimaryDeclarations { .. }
            | ApiDiffError::ConformanceMergeTarget { .. }
            | ApiDiffError::InvalidScope { .. }
            | ApiDiffError::KindMismatch { .. }
            | ApiDiffError::EmptyModification { .. } => ExErrorKind::InvariantViolation,
            ApiDiffError::Serialization { .. } => ExErrorKind::Serialization,
        }
    }

    /// Whether this error signals a modeling defect rather than bad input
    pub fn is_invariant_violation(&self) -> bool {
        self.kind() == ExErrorKind::InvariantViolation
    }
}

impl From<ApiDiffError> for ExError {
    fn from(err: ApiDiffError) -> Self {
        let message = err.to_string();
        let ex = ExError::new(err.kind()).with_message(message);
        match err {
            ApiDiffError::MultiplePrimaryDeclarations { identifier, .. }
            | ApiDiffError::ConformanceMergeTarget { identifier, .. }
            | ApiDiffError::KindMismatch { identifier, .. }
            | ApiDiffError::EmptyModification { identifier } => ex.with_identifier(identifier),
            ApiDiffError::InvalidScope { scope, .. } => ex.with_identifier(scope),
            ApiDiffError::MissingSyntaxField { .. }
            | ApiDiffError::UnexpectedToken { .. }
            | ApiDiffError::Serialization { .. } => ex,
        }
    }
}

impl From<serde_json::Error> for ApiDiffError {
    fn from(err: serde_json::Error) -> Self {
        ApiDiffError::Serialization {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invariant_kinds_share_code() {
        let errors = [
            ApiDiffError::MultiplePrimaryDeclarations {
                identifier: "Foo".to_string(),
                count: 2,
            },
            ApiDiffError::InvalidScope {
                scope: "foo()".to_string(),
                declaration: "struct".to_string(),
            },
            ApiDiffError::KindMismatch {
                identifier: "Foo".to_string(),
                old: "struct".to_string(),
                new: "class".to_string(),
            },
        ];
        for err in errors {
            assert!(err.is_invariant_violation());
            let ex: ExError = err.into();
            assert_eq!(ex.code(), "ERR_INVARIANT_VIOLATION");
        }
    }

    #[test]
    fn test_ex_error_carries_identifier() {
        let ex: ExError = ApiDiffError::EmptyModification {
            identifier: "Foo.bar()".to_string(),
        }
        .into();
        assert_eq!(ex.identifier(), Some("Foo.bar()"));
        assert!(ex.message().contains("Foo.bar()"));
    }

    #[test]
    fn test_display_includes_op_and_run_id() {
        let run_id = RunId::from_string("run-7".to_string());
        let ex = ExError::new(ExErrorKind::MissingField)
            .with_op("parse_source_file")
            .with_message("StructDecl is missing required `name`")
            .with_run_id(run_id);
        let rendered = ex.to_string();
        assert!(rendered.starts_with("[ERR_MISSING_FIELD]"));
        assert!(rendered.contains("parse_source_file"));
        assert!(rendered.contains("run-7"));
    }

    #[test]
    fn test_serde_json_error_converts() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let converted: ApiDiffError = err.into();
        assert_eq!(converted.kind(), ExErrorKind::Serialization);
    }
}
