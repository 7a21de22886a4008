//! Parser event interface.
//!
//! The parser collaborator emits one ordered event stream per compilation
//! unit: scope enter/exit pairs bracketing the binding and target events that
//! occur inside. The stream is fully materialized into a [`ScopeArena`] plus
//! the ordered use-site list before any resolution starts; stream order is
//! pre-order program order, which resolution relies on.

use serde::{Deserialize, Serialize};
use tracing::debug;

use quill_common::Pos;

use crate::scope::{BindingRole, ScopeArena, ScopeId, ScopeKind};

/// The two target operators the binder resolves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetOp {
    /// `+=`, `-=`, and friends.
    Augmented,
    /// The `:=` inline-assignment operator.
    Inline,
}

/// An augmented/inline-assignment occurrence to be resolved.
#[derive(Clone, Debug, Serialize)]
pub struct UseSite {
    pub name: String,
    /// The scope lexically containing the occurrence.
    pub scope: ScopeId,
    pub op: TargetOp,
    pub pos: Pos,
}

/// One event in a parser scope stream.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScopeEvent {
    Enter {
        kind: ScopeKind,
    },
    Bind {
        name: String,
        role: BindingRole,
        pos: Pos,
    },
    Use {
        name: String,
        op: TargetOp,
        pos: Pos,
    },
    Exit,
}

/// A malformed event stream.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EventError {
    /// `Exit` with no matching `Enter` (the module scope is never exited).
    UnbalancedExit,
    /// Explicit `Enter` of a module scope; the root module scope is
    /// implicit and unique per unit.
    UnexpectedRootEnter,
    /// The stream ended while nested scopes were still open.
    UnclosedScopes(usize),
}

impl std::fmt::Display for EventError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventError::UnbalancedExit => write!(f, "scope exit without a matching enter"),
            EventError::UnexpectedRootEnter => {
                write!(f, "module scope entered explicitly; the root is implicit")
            }
            EventError::UnclosedScopes(n) => {
                write!(f, "event stream ended with {n} unclosed scope(s)")
            }
        }
    }
}

impl std::error::Error for EventError {}

/// The materialized form of one compilation unit's event stream.
#[derive(Clone, Debug)]
pub struct ScopeTree {
    pub arena: ScopeArena,
    /// Use sites in stream (pre-order program) order.
    pub use_sites: Vec<UseSite>,
}

/// Materialize an event stream into a scope tree.
///
/// The module scope is implicit: the stream starts inside it and must end
/// back at it. Binding events are classified into per-scope records as they
/// arrive; target occurrences with no binding record yet leave a
/// `TargetOnly` marker in their enclosing scope.
pub fn build_scope_tree(events: &[ScopeEvent]) -> Result<ScopeTree, EventError> {
    let mut arena = ScopeArena::new();
    let mut use_sites = Vec::new();
    let mut stack = vec![ScopeId::ROOT];

    for event in events {
        let current = *stack.last().ok_or(EventError::UnbalancedExit)?;
        match event {
            ScopeEvent::Enter { kind } => {
                if *kind == ScopeKind::Module {
                    return Err(EventError::UnexpectedRootEnter);
                }
                let id = arena.alloc(*kind, current);
                stack.push(id);
            }
            ScopeEvent::Bind { name, role, pos } => {
                arena.record_binding(current, name, *role, *pos);
            }
            ScopeEvent::Use { name, op, pos } => {
                if arena.get(current).binding(name).is_none() {
                    arena.record_binding(current, name, BindingRole::TargetOnly, *pos);
                }
                use_sites.push(UseSite {
                    name: name.clone(),
                    scope: current,
                    op: *op,
                    pos: *pos,
                });
            }
            ScopeEvent::Exit => {
                if stack.len() == 1 {
                    return Err(EventError::UnbalancedExit);
                }
                stack.pop();
            }
        }
    }

    if stack.len() != 1 {
        return Err(EventError::UnclosedScopes(stack.len() - 1));
    }

    debug!(
        scopes = arena.len(),
        use_sites = use_sites.len(),
        "materialized scope tree"
    );
    Ok(ScopeTree { arena, use_sites })
}
