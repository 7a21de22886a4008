//! Assignment-target name binder for the Quill compiler.
//!
//! Quill's augmented (`+=`) and inline (`:=`) assignment operators do not go
//! through ordinary name lookup: their target must belong to a block scope
//! (module, class, or function), and lambda/comprehension scopes between the
//! occurrence and that block scope are skipped. This crate takes the scope
//! tree a parser produced as an event stream and decides, for every such
//! target, which scope owns the name, whether that ownership is legal, and
//! how outer/module declarations chain across nested functions.
//!
//! The pipeline per compilation unit:
//! 1. [`events::build_scope_tree`] materializes the event stream into a
//!    [`scope::ScopeArena`] with classified binding records.
//! 2. [`ResolverState::resolve_unit`] promotes outer/global declarations,
//!    resolves each use site in program order, and stages diagnostics by
//!    [`CompatMode`].
//!
//! Units are independent: one `ResolverState` per unit, no shared state, so
//! callers may resolve units in parallel.

pub mod events;
pub mod scope;
pub mod state;

mod state_promotion;
mod state_reporting;
mod state_resolution;

pub use events::{EventError, ScopeEvent, ScopeTree, TargetOp, UseSite, build_scope_tree};
pub use scope::{BindingRecord, BindingRole, Scope, ScopeArena, ScopeId, ScopeKind};
pub use state::{
    BindErrorKind, CompatMode, Resolution, ResolvedUnit, ResolvedUseSite, ResolverState,
};
pub use state_reporting::stage;
