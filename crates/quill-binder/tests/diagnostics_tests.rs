//! Tests for diagnostic staging, codes, and whole-unit reporting.

use quill_binder::{
    BindErrorKind, BindingRole, CompatMode, ResolvedUnit, ResolverState, ScopeEvent, ScopeKind,
    TargetOp, stage,
};
use quill_common::DiagnosticCategory;
use quill_common::diagnostics::codes;

fn enter(kind: ScopeKind) -> ScopeEvent {
    ScopeEvent::Enter { kind }
}

fn exit() -> ScopeEvent {
    ScopeEvent::Exit
}

fn bind(name: &str, role: BindingRole, pos: u32) -> ScopeEvent {
    ScopeEvent::Bind {
        name: name.to_string(),
        role,
        pos,
    }
}

fn use_aug(name: &str, pos: u32) -> ScopeEvent {
    ScopeEvent::Use {
        name: name.to_string(),
        op: TargetOp::Augmented,
        pos,
    }
}

fn resolve_with(events: &[ScopeEvent], mode: CompatMode) -> ResolvedUnit {
    let mut state = ResolverState::from_events("main.qll".to_string(), events, mode).unwrap();
    state.resolve_unit()
}

fn missing_anchor_events() -> Vec<ScopeEvent> {
    vec![enter(ScopeKind::Function), use_aug("x", 7), exit()]
}

fn shadow_events() -> Vec<ScopeEvent> {
    vec![
        enter(ScopeKind::Function),
        bind("n", BindingRole::Param, 2),
        use_aug("n", 9),
        exit(),
    ]
}

fn class_scope_events() -> Vec<ScopeEvent> {
    vec![
        enter(ScopeKind::Class),
        bind("x", BindingRole::Plain, 3),
        enter(ScopeKind::Lambda),
        use_aug("x", 10),
        exit(),
        exit(),
    ]
}

#[test]
fn missing_anchor_warns_below_strict() {
    for mode in [CompatMode::Legacy, CompatMode::Warn] {
        let unit = resolve_with(&missing_anchor_events(), mode);
        assert_eq!(unit.diagnostics.len(), 1, "{mode:?}");
        let diag = &unit.diagnostics[0];
        assert_eq!(diag.category, DiagnosticCategory::Warning, "{mode:?}");
        assert_eq!(diag.code, codes::TARGET_NOT_BOUND);
        assert!(!unit.has_errors());
    }
}

#[test]
fn missing_anchor_errors_in_strict() {
    let unit = resolve_with(&missing_anchor_events(), CompatMode::Strict);
    assert_eq!(unit.diagnostics.len(), 1);
    assert_eq!(unit.diagnostics[0].category, DiagnosticCategory::Error);
    assert!(unit.has_errors());
}

#[test]
fn shadowing_is_a_hard_error_in_every_mode() {
    for mode in [CompatMode::Legacy, CompatMode::Warn, CompatMode::Strict] {
        let unit = resolve_with(&shadow_events(), mode);
        assert_eq!(unit.diagnostics.len(), 1, "{mode:?}");
        let diag = &unit.diagnostics[0];
        assert_eq!(diag.category, DiagnosticCategory::Error, "{mode:?}");
        assert_eq!(diag.code, codes::SHADOWED_TARGET);
    }
}

#[test]
fn class_scope_target_is_a_hard_error_in_every_mode() {
    for mode in [CompatMode::Legacy, CompatMode::Warn, CompatMode::Strict] {
        let unit = resolve_with(&class_scope_events(), mode);
        assert_eq!(unit.diagnostics.len(), 1, "{mode:?}");
        let diag = &unit.diagnostics[0];
        assert_eq!(diag.category, DiagnosticCategory::Error, "{mode:?}");
        assert_eq!(diag.code, codes::CLASS_SCOPE_TARGET);
    }
}

#[test]
fn stage_flips_only_the_missing_anchor_kind() {
    let (_, warn_cat) = stage(BindErrorKind::TargetNameError, CompatMode::Warn);
    let (_, strict_cat) = stage(BindErrorKind::TargetNameError, CompatMode::Strict);
    assert_ne!(warn_cat, strict_cat);
    for kind in [
        BindErrorKind::ShadowedBindingTarget,
        BindErrorKind::ClassScopeUnsupported,
    ] {
        let (_, warn_cat) = stage(kind, CompatMode::Warn);
        let (_, strict_cat) = stage(kind, CompatMode::Strict);
        assert_eq!(warn_cat, DiagnosticCategory::Error);
        assert_eq!(strict_cat, DiagnosticCategory::Error);
    }
}

#[test]
fn diagnostic_carries_file_position_and_name() {
    let unit = resolve_with(&missing_anchor_events(), CompatMode::Strict);
    let diag = &unit.diagnostics[0];
    assert_eq!(diag.file, "main.qll");
    assert_eq!(diag.start, 7);
    assert_eq!(diag.length, 1);
    assert!(diag.message_text.contains("'x'"));
}

#[test]
fn every_failed_site_gets_exactly_one_diagnostic() {
    let events = [
        enter(ScopeKind::Function),
        use_aug("a", 5),
        use_aug("b", 10),
        bind("c", BindingRole::Plain, 15),
        use_aug("c", 20),
        exit(),
    ];
    let unit = resolve_with(&events, CompatMode::Strict);
    assert_eq!(unit.use_sites.len(), 3);
    assert_eq!(unit.diagnostics.len(), 2);
}

#[test]
fn resolution_is_idempotent() {
    let events = [
        bind("total", BindingRole::Plain, 0),
        use_aug("fresh", 4),
        enter(ScopeKind::Function),
        bind("x", BindingRole::GlobalDecl, 10),
        use_aug("x", 20),
        use_aug("missing", 25),
        enter(ScopeKind::Lambda),
        bind("v", BindingRole::Param, 30),
        use_aug("total", 35),
        exit(),
        exit(),
    ];
    let mut state =
        ResolverState::from_events("main.qll".to_string(), &events, CompatMode::Warn).unwrap();
    let first = state.resolve_unit();
    let second = state.resolve_unit();
    assert_eq!(
        serde_json::to_value(&first).unwrap(),
        serde_json::to_value(&second).unwrap()
    );
}
