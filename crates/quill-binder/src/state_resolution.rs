//! Use-site resolution: from each augmented/inline target outward to the
//! block scope that owns the name.

use std::collections::hash_map::Entry;

use tracing::debug;

use crate::events::UseSite;
use crate::scope::{BindingRecord, BindingRole, ScopeId, ScopeKind};
use crate::state::{BindErrorKind, Resolution, ResolverState};

impl ResolverState {
    /// Resolve one use site. Exhaustive over the enclosing scope kind; the
    /// rule set is closed, so no dispatch indirection.
    pub(crate) fn resolve_use_site(&mut self, site: &UseSite) -> Resolution {
        let result = match self.arena.kind(site.scope) {
            ScopeKind::Module | ScopeKind::Class => self.resolve_in_owner_block(site, site.scope),
            ScopeKind::Function => self.resolve_in_function(site, site.scope),
            ScopeKind::Lambda | ScopeKind::Comprehension => self.resolve_through_transparent(site),
        };
        debug!(name = %site.name, pos = site.pos, ?result, "use site resolved");
        result
    }

    /// Module and class scopes own their targets directly and have no
    /// declared-before-use requirement: an unbound name is created on the
    /// spot, matching the implicit-declaration behavior of plain assignment.
    fn resolve_in_owner_block(&mut self, site: &UseSite, scope: ScopeId) -> Resolution {
        match self
            .arena
            .get_mut(scope)
            .bindings
            .entry(site.name.clone())
        {
            Entry::Occupied(mut entry) => {
                let record = entry.get_mut();
                if record.role.is_blocking() {
                    return Resolution::Fail(BindErrorKind::ShadowedBindingTarget, site.pos);
                }
                if record.role == BindingRole::TargetOnly {
                    record.role = BindingRole::Plain;
                }
                // Outer/global declarations redirect even module/class-level
                // writes to their promoted target scope.
                let target = match record.role {
                    BindingRole::OuterDecl | BindingRole::GlobalDecl => {
                        record.effective_scope.unwrap_or(ScopeId::ROOT)
                    }
                    _ => scope,
                };
                if record.effective_scope.is_none() {
                    record.effective_scope = Some(target);
                }
                Resolution::Bound(target)
            }
            Entry::Vacant(entry) => {
                entry.insert(BindingRecord {
                    role: BindingRole::Plain,
                    declared_at: site.pos,
                    effective_scope: Some(scope),
                });
                Resolution::Bound(scope)
            }
        }
    }

    /// Function scopes require an anchor: a plain binding or outer/global
    /// declaration lexically preceding the use site. Nothing is ever created
    /// implicitly here, for either operator.
    fn resolve_in_function(&mut self, site: &UseSite, func: ScopeId) -> Resolution {
        let Some(record) = self.arena.get(func).binding(&site.name) else {
            return Resolution::Fail(BindErrorKind::TargetNameError, site.pos);
        };
        let (role, declared_at, effective) = (record.role, record.declared_at, record.effective_scope);
        match role {
            BindingRole::Param | BindingRole::IterVar => {
                Resolution::Fail(BindErrorKind::ShadowedBindingTarget, site.pos)
            }
            BindingRole::TargetOnly => Resolution::Fail(BindErrorKind::TargetNameError, site.pos),
            BindingRole::Plain => {
                if declared_at < site.pos {
                    if effective.is_none()
                        && let Some(record) = self.arena.get_mut(func).bindings.get_mut(&site.name)
                    {
                        record.effective_scope = Some(func);
                    }
                    Resolution::Bound(func)
                } else {
                    Resolution::Fail(BindErrorKind::TargetNameError, site.pos)
                }
            }
            BindingRole::OuterDecl | BindingRole::GlobalDecl => {
                if declared_at < site.pos {
                    Resolution::Bound(effective.unwrap_or(ScopeId::ROOT))
                } else {
                    Resolution::Fail(BindErrorKind::TargetNameError, site.pos)
                }
            }
        }
    }

    /// Walk outward from a lambda/comprehension to the nearest block scope.
    ///
    /// Every transparent scope on the path gets a shadow check first: its
    /// parameters and iteration variables block the name even when an outer
    /// block scope binds it. The terminal block scope then applies its own
    /// rule, with the original use-site position for the precedes check.
    fn resolve_through_transparent(&mut self, site: &UseSite) -> Resolution {
        let mut cur = site.scope;
        while self.arena.kind(cur).is_transparent() {
            if self
                .arena
                .get(cur)
                .binding(&site.name)
                .is_some_and(|r| r.role.is_blocking())
            {
                return Resolution::Fail(BindErrorKind::ShadowedBindingTarget, site.pos);
            }
            match self.arena.parent(cur) {
                Some(parent) => cur = parent,
                None => break,
            }
        }
        match self.arena.kind(cur) {
            ScopeKind::Class => Resolution::Fail(BindErrorKind::ClassScopeUnsupported, site.pos),
            ScopeKind::Function => self.resolve_in_function(site, cur),
            _ => self.resolve_in_owner_block(site, cur),
        }
    }
}
