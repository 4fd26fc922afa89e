//! Core types shared across apidiff facilities
//!
//! This crate provides foundational types used by both the error and
//! logging facilities of the diff core:
//!
//! - **Correlation types**: RunId for tagging one comparison run
//! - **Schema constants**: Canonical field keys and event names

pub mod correlation;
pub mod schema;

pub use correlation::RunId;
