//! Common types and utilities for the Quill compiler front end.
//!
//! This crate provides foundational types used across all quill crates:
//! - Source spans and byte positions (`Pos`, `Span`)
//! - The diagnostic model (`Diagnostic`, `DiagnosticCategory`, message codes)

// Span - source location tracking (byte offsets)
pub mod span;
pub use span::{Pos, Span};

// Diagnostic types and message lookup
pub mod diagnostics;
pub use diagnostics::{Diagnostic, DiagnosticCategory};
