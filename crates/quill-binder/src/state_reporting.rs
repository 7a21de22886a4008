//! Diagnostic construction and compatibility-mode staging.

use quill_common::diagnostics::{codes, format_message, get_message_template};
use quill_common::{Diagnostic, DiagnosticCategory, Pos, Span};

use crate::state::{BindErrorKind, CompatMode, ResolverState};

impl ResolverState {
    /// Attach one staged diagnostic for a failed use site.
    pub(crate) fn report(&mut self, kind: BindErrorKind, name: &str, pos: Pos) {
        let (code, category) = stage(kind, self.mode);
        let template = get_message_template(code).unwrap_or("Cannot resolve name '{0}'.");
        let message = format_message(template, &[name]);
        let span = Span::at(pos, name.len() as u32);
        self.diagnostics.push(Diagnostic {
            file: self.file.clone(),
            start: span.start,
            length: span.len(),
            message_text: message,
            category,
            code,
        });
    }
}

/// Map an error kind to its code and mode-staged severity.
///
/// Shadowing and class-scope failures are hard errors in every mode. A
/// missing anchor is the deprecation-staged condition: a warning below
/// `strict`, an error at it.
#[must_use]
pub fn stage(kind: BindErrorKind, mode: CompatMode) -> (u32, DiagnosticCategory) {
    match kind {
        BindErrorKind::TargetNameError => {
            let category = match mode {
                CompatMode::Legacy | CompatMode::Warn => DiagnosticCategory::Warning,
                CompatMode::Strict => DiagnosticCategory::Error,
            };
            (codes::TARGET_NOT_BOUND, category)
        }
        BindErrorKind::ShadowedBindingTarget => {
            (codes::SHADOWED_TARGET, DiagnosticCategory::Error)
        }
        BindErrorKind::ClassScopeUnsupported => {
            (codes::CLASS_SCOPE_TARGET, DiagnosticCategory::Error)
        }
    }
}
