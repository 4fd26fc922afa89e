//! Canonical logging macros
//!
//! These macros provide a structured, consistent way to log operations.

/// Log the start of an operation
///
/// # Example
///
/// ```
/// # use apidiff_core::log_op_start;
/// log_op_start!("compare_modules");
/// log_op_start!("compare_modules", module = "SwiftUI");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::apidiff_core_types::schema::EVENT_START,
        );
    };
    ($op:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::apidiff_core_types::schema::EVENT_START,
            $($field)*
        );
    };
}

/// Log the successful end of an operation
///
/// # Example
///
/// ```
/// # use apidiff_core::log_op_end;
/// log_op_end!("compare_modules", duration_ms = 42);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::apidiff_core_types::schema::EVENT_END,
            duration_ms = $duration,
        );
    };
    ($op:expr, duration_ms = $duration:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::apidiff_core_types::schema::EVENT_END,
            duration_ms = $duration,
            $($field)*
        );
    };
}

/// Log an operation error
///
/// `$err` is anything convertible into [`ExError`](crate::errors::ExError).
/// The error's run id and identifier context, when set, are emitted as the
/// `run_id` and `identifier` fields.
///
/// # Example
///
/// ```
/// # use apidiff_core::{log_op_error, errors::{ApiDiffError, ExError}};
/// # use apidiff_core::apidiff_core_types::RunId;
/// let err = ApiDiffError::EmptyModification { identifier: "Foo".to_string() };
/// log_op_error!("compare_modules", err.clone(), duration_ms = 10);
///
/// let err = ExError::from(err).with_run_id(RunId::new());
/// log_op_error!("compare_modules", err, duration_ms = 10, module = "Kit");
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr) => {
        $crate::log_op_error!($op, $err, duration_ms = $duration,)
    };
    ($op:expr, $err:expr, duration_ms = $duration:expr, $($field:tt)*) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::apidiff_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?ex_err.kind(),
            err_code = ex_err.code(),
            run_id = ex_err.run_id().map(|id| id.as_str()),
            identifier = ex_err.identifier(),
            $($field)*
        );
    }};
}
