//! Promotion of outer/global declarations to concrete owning scopes.
//!
//! Runs before use-site resolution: a nested closure's anchor may be an
//! outer declaration whose target scope must already be known when the
//! closure's use sites resolve.

use tracing::debug;

use crate::scope::{BindingRole, ScopeId};
use crate::state::ResolverState;

impl ResolverState {
    /// Resolve every `OuterDecl`/`GlobalDecl` record to the block scope that
    /// owns writes through it.
    ///
    /// `GlobalDecl` always targets the module scope. `OuterDecl` reaches the
    /// immediately enclosing function scope and chains through that scope's
    /// own outer/module declarations: a function that itself declared the
    /// same name module-scoped promotes the inner declaration transitively
    /// to module scope. Whether the name is ever bound along the chain is
    /// not checked here; an unbound target is a runtime lookup concern.
    pub(crate) fn promote_declarations(&mut self) {
        let mut pending: Vec<(ScopeId, String, BindingRole)> = Vec::new();
        for id in self.arena.ids() {
            for (name, record) in &self.arena.get(id).bindings {
                if record.effective_scope.is_none()
                    && matches!(record.role, BindingRole::OuterDecl | BindingRole::GlobalDecl)
                {
                    pending.push((id, name.clone(), record.role));
                }
            }
        }

        for (scope, name, role) in pending {
            let target = self.promotion_target(scope, &name, role);
            debug!(name = %name, ?scope, ?target, "promoted declaration");
            if let Some(record) = self.arena.get_mut(scope).bindings.get_mut(&name) {
                record.effective_scope = Some(target);
            }
        }
    }

    fn promotion_target(&self, scope: ScopeId, name: &str, role: BindingRole) -> ScopeId {
        if role == BindingRole::GlobalDecl {
            return ScopeId::ROOT;
        }
        let mut cur = scope;
        loop {
            let Some(func) = self.arena.enclosing_function(cur) else {
                // No enclosing function on the chain: the module scope is the
                // only frame left that could hold the name at runtime.
                return ScopeId::ROOT;
            };
            match self.arena.get(func).binding(name).map(|r| r.role) {
                Some(BindingRole::GlobalDecl) => return ScopeId::ROOT,
                Some(BindingRole::OuterDecl) => cur = func,
                _ => return func,
            }
        }
    }
}
