//! Diagnostic types and message lookup for the binding resolver.
//!
//! Message templates use `{0}`, `{1}`, ... placeholders filled in with
//! `format_message`. Codes are stable and namespaced per phase; the binder
//! owns the `21xx` range.

use serde::Serialize;

// =============================================================================
// Diagnostic Types
// =============================================================================

/// Diagnostic category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum DiagnosticCategory {
    Warning = 0,
    Error = 1,
    Suggestion = 2,
    Message = 3,
}

/// A resolver diagnostic message.
#[derive(Clone, Debug, Serialize)]
pub struct Diagnostic {
    pub file: String,
    pub start: u32,
    pub length: u32,
    pub message_text: String,
    pub category: DiagnosticCategory,
    pub code: u32,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    #[must_use]
    pub const fn error(file: String, start: u32, length: u32, message: String, code: u32) -> Self {
        Self {
            file,
            start,
            length,
            message_text: message,
            category: DiagnosticCategory::Error,
            code,
        }
    }

    /// Create a new warning diagnostic.
    #[must_use]
    pub const fn warning(
        file: String,
        start: u32,
        length: u32,
        message: String,
        code: u32,
    ) -> Self {
        Self {
            file,
            start,
            length,
            message_text: message,
            category: DiagnosticCategory::Warning,
            code,
        }
    }
}

/// Format a diagnostic message by replacing {0}, {1}, etc. with arguments.
#[must_use]
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{i}}}"), arg);
    }
    result
}

/// A diagnostic message definition with code, default category, and template.
#[derive(Clone, Copy, Debug)]
pub struct DiagnosticMessage {
    pub code: u32,
    pub category: DiagnosticCategory,
    pub message: &'static str,
}

/// Stable diagnostic codes.
pub mod codes {
    /// Augmented/inline assignment target has no preceding binding.
    pub const TARGET_NOT_BOUND: u32 = 2101;
    /// Target shadows a parameter or loop variable on the resolution path.
    pub const SHADOWED_TARGET: u32 = 2102;
    /// Lambda/comprehension target resolution reached a class body.
    pub const CLASS_SCOPE_TARGET: u32 = 2103;
}

/// All binder diagnostic message definitions.
pub static DIAGNOSTIC_MESSAGES: &[DiagnosticMessage] = &[
    DiagnosticMessage {
        code: codes::TARGET_NOT_BOUND,
        category: DiagnosticCategory::Error,
        message: "Name '{0}' must be bound before it can be the target of an augmented or inline assignment.",
    },
    DiagnosticMessage {
        code: codes::SHADOWED_TARGET,
        category: DiagnosticCategory::Error,
        message: "Name '{0}' is a parameter or loop variable here and cannot be the target of an augmented or inline assignment.",
    },
    DiagnosticMessage {
        code: codes::CLASS_SCOPE_TARGET,
        category: DiagnosticCategory::Error,
        message: "Name '{0}' cannot be assigned from a lambda or comprehension inside a class body.",
    },
];

/// Look up a diagnostic message definition by code.
#[must_use]
pub fn get_diagnostic_message(code: u32) -> Option<&'static DiagnosticMessage> {
    DIAGNOSTIC_MESSAGES.iter().find(|m| m.code == code)
}

/// Get the message template for a diagnostic code.
///
/// Returns the template string with `{0}`, `{1}`, etc. placeholders.
/// Use `format_message()` to fill in the placeholders.
#[must_use]
pub fn get_message_template(code: u32) -> Option<&'static str> {
    get_diagnostic_message(code).map(|m| m.message)
}
