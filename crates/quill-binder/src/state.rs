//! Resolver state and public result types.

use serde::Serialize;
use tracing::debug;

use quill_common::{Diagnostic, Pos};

use crate::events::{ScopeEvent, ScopeTree, TargetOp, UseSite, build_scope_tree};
use crate::scope::{ScopeArena, ScopeId};

/// Compatibility staging for missing-anchor target diagnostics.
///
/// Threaded explicitly through the resolver so that independent compilation
/// units can run concurrently under different modes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CompatMode {
    /// Pre-transition behavior: missing anchors warn.
    Legacy,
    /// Transition behavior: missing anchors warn as deprecations.
    #[default]
    Warn,
    /// Missing anchors are hard errors.
    Strict,
}

/// Why a use site failed to resolve.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum BindErrorKind {
    /// No qualifying binding precedes the target in its owning scope.
    TargetNameError,
    /// The name is a parameter or iteration variable on the resolution path.
    ShadowedBindingTarget,
    /// Transparent-scope resolution reached a class body.
    ClassScopeUnsupported,
}

/// Outcome of resolving one use site.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Resolution {
    /// The block scope that owns the target.
    Bound(ScopeId),
    Fail(BindErrorKind, Pos),
}

impl Resolution {
    #[must_use]
    pub const fn is_bound(&self) -> bool {
        matches!(self, Resolution::Bound(_))
    }
}

/// A use site annotated with its resolution outcome.
#[derive(Clone, Debug, Serialize)]
pub struct ResolvedUseSite {
    pub name: String,
    pub pos: Pos,
    pub op: TargetOp,
    pub result: Resolution,
}

/// Everything downstream collaborators need from one compilation unit:
/// per-site annotations plus the staged diagnostic list.
#[derive(Clone, Debug, Serialize)]
pub struct ResolvedUnit {
    pub file: String,
    pub use_sites: Vec<ResolvedUseSite>,
    pub diagnostics: Vec<Diagnostic>,
}

impl ResolvedUnit {
    /// True when any diagnostic is a hard error.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.category == quill_common::DiagnosticCategory::Error)
    }
}

/// Per-unit resolver. Owns the unit's scope tree for the duration of
/// resolution; no state is shared between units.
pub struct ResolverState {
    pub(crate) file: String,
    pub(crate) arena: ScopeArena,
    pub(crate) use_sites: Vec<UseSite>,
    pub(crate) mode: CompatMode,
    pub(crate) diagnostics: Vec<Diagnostic>,
    pub(crate) resolved: Vec<ResolvedUseSite>,
}

impl ResolverState {
    /// Build a resolver from a materialized scope tree.
    #[must_use]
    pub fn new(file: String, tree: ScopeTree, mode: CompatMode) -> Self {
        Self {
            file,
            arena: tree.arena,
            use_sites: tree.use_sites,
            mode,
            diagnostics: Vec::new(),
            resolved: Vec::new(),
        }
    }

    /// Build a resolver straight from a parser event stream.
    pub fn from_events(
        file: String,
        events: &[ScopeEvent],
        mode: CompatMode,
    ) -> Result<Self, crate::events::EventError> {
        let tree = build_scope_tree(events)?;
        Ok(Self::new(file, tree, mode))
    }

    #[must_use]
    pub fn arena(&self) -> &ScopeArena {
        &self.arena
    }

    #[must_use]
    pub fn mode(&self) -> CompatMode {
        self.mode
    }

    /// Resolve every use site in the unit.
    ///
    /// Outer/global declarations are promoted first, then use sites resolve
    /// in program order. A failed site gets exactly one diagnostic; the rest
    /// of the unit keeps resolving so all diagnostics surface in one pass.
    /// Re-running on the same state yields identical output.
    #[tracing::instrument(level = "debug", skip(self), fields(file = %self.file))]
    pub fn resolve_unit(&mut self) -> ResolvedUnit {
        self.diagnostics.clear();
        self.resolved.clear();

        self.promote_declarations();

        for i in 0..self.use_sites.len() {
            let site = self.use_sites[i].clone();
            let result = self.resolve_use_site(&site);
            if let Resolution::Fail(kind, pos) = result {
                self.report(kind, &site.name, pos);
            }
            self.resolved.push(ResolvedUseSite {
                name: site.name,
                pos: site.pos,
                op: site.op,
                result,
            });
        }

        debug!(
            use_sites = self.resolved.len(),
            diagnostics = self.diagnostics.len(),
            "unit resolved"
        );
        ResolvedUnit {
            file: self.file.clone(),
            use_sites: self.resolved.clone(),
            diagnostics: self.diagnostics.clone(),
        }
    }
}
