//! Canonical schema constants for structured logging and events
//!
//! Field names emitted by the `log_op_*` macros and by `compare_modules`.
//! tracing takes field names as identifiers, so emitters spell them inline
//! and consumers (capture layer, log assertions) look them up through these.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_RUN_ID: &str = "run_id";

// Comparison context
pub const FIELD_MODULE: &str = "module";
pub const FIELD_IDENTIFIER: &str = "identifier";
pub const FIELD_OLD_DIGEST: &str = "old_digest";
pub const FIELD_NEW_DIGEST: &str = "new_digest";

// Collection sizes
pub const FIELD_OLD_LEN: &str = "old_len";
pub const FIELD_NEW_LEN: &str = "new_len";
pub const FIELD_DIFF_LEN: &str = "diff_len";

// Error fields
pub const FIELD_ERR_KIND: &str = "err_kind";
pub const FIELD_ERR_CODE: &str = "err_code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants_accessibility() {
        assert!(!FIELD_COMPONENT.is_empty());
        assert!(!FIELD_OP.is_empty());
        assert!(!FIELD_MODULE.is_empty());
        assert!(!EVENT_START.is_empty());
        assert!(!EVENT_END.is_empty());
        assert!(!EVENT_END_ERROR.is_empty());
    }

    #[test]
    fn test_event_names_are_distinct() {
        assert_ne!(EVENT_START, EVENT_END);
        assert_ne!(EVENT_START, EVENT_END_ERROR);
        assert_ne!(EVENT_END, EVENT_END_ERROR);
    }
}
