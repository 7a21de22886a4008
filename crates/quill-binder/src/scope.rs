//! Scope tree arena, scope kinds, and per-scope binding records.
//!
//! Scopes are arena-allocated and addressed by `ScopeId`; `parent` is a plain
//! index back-reference, never an owning link, so the parent/child cycle has
//! no ownership cycle.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::hash_map::Entry;

use quill_common::Pos;

/// Index of a scope in the [`ScopeArena`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScopeId(pub u32);

impl ScopeId {
    /// The module (root) scope of every compilation unit.
    pub const ROOT: ScopeId = ScopeId(0);
}

/// The kind of a lexical scope.
///
/// `Module`, `Class`, and `Function` are block scopes: they can own an
/// assignment target. `Lambda` and `Comprehension` are transparent: target
/// resolution always walks past them, though their parameters and iteration
/// variables still block same-named targets underneath.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScopeKind {
    Module,
    Class,
    Function,
    Lambda,
    Comprehension,
}

impl ScopeKind {
    #[must_use]
    pub const fn is_transparent(self) -> bool {
        matches!(self, ScopeKind::Lambda | ScopeKind::Comprehension)
    }

    #[must_use]
    pub const fn is_block(self) -> bool {
        !self.is_transparent()
    }
}

/// How a name was introduced into a scope.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BindingRole {
    /// Plain assignment or type-only declaration.
    Plain,
    /// Declared to live in the nearest enclosing function scope.
    OuterDecl,
    /// Declared to live in the module scope.
    GlobalDecl,
    /// Formal parameter.
    Param,
    /// Loop/comprehension iteration variable.
    IterVar,
    /// Name seen only as an assignment target, never bound.
    TargetOnly,
}

impl BindingRole {
    /// Parameters and iteration variables permanently block the name as an
    /// assignment target in their scope and all transparent descendants.
    #[must_use]
    pub const fn is_blocking(self) -> bool {
        matches!(self, BindingRole::Param | BindingRole::IterVar)
    }

    /// Roles that can anchor a later augmented/inline target in a function
    /// scope.
    #[must_use]
    pub const fn is_anchor(self) -> bool {
        matches!(
            self,
            BindingRole::Plain | BindingRole::OuterDecl | BindingRole::GlobalDecl
        )
    }
}

/// A name's binding state within one scope.
#[derive(Clone, Debug, Serialize)]
pub struct BindingRecord {
    pub role: BindingRole,
    /// Position of the earliest real binding event for this name.
    pub declared_at: Pos,
    /// The block scope that owns writes to this name. Filled in by the
    /// promotion pass for outer/global declarations and lazily during
    /// resolution otherwise; stable once set.
    pub effective_scope: Option<ScopeId>,
}

/// One lexical scope: kind, tree links, and its name bindings.
#[derive(Clone, Debug)]
pub struct Scope {
    pub kind: ScopeKind,
    pub parent: Option<ScopeId>,
    pub children: SmallVec<[ScopeId; 4]>,
    pub bindings: FxHashMap<String, BindingRecord>,
}

impl Scope {
    #[must_use]
    fn new(kind: ScopeKind, parent: Option<ScopeId>) -> Self {
        Self {
            kind,
            parent,
            children: SmallVec::new(),
            bindings: FxHashMap::default(),
        }
    }

    #[must_use]
    pub fn binding(&self, name: &str) -> Option<&BindingRecord> {
        self.bindings.get(name)
    }
}

/// Arena of scopes for one compilation unit. Index 0 is the module scope.
#[derive(Clone, Debug)]
pub struct ScopeArena {
    scopes: Vec<Scope>,
}

impl ScopeArena {
    /// Create an arena holding only the module (root) scope.
    #[must_use]
    pub fn new() -> Self {
        Self {
            scopes: vec![Scope::new(ScopeKind::Module, None)],
        }
    }

    /// Allocate a child scope under `parent`.
    pub fn alloc(&mut self, kind: ScopeKind, parent: ScopeId) -> ScopeId {
        let id = ScopeId(self.scopes.len() as u32);
        self.scopes.push(Scope::new(kind, Some(parent)));
        self.scopes[parent.0 as usize].children.push(id);
        id
    }

    #[must_use]
    pub fn get(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.0 as usize]
    }

    #[must_use]
    pub fn get_mut(&mut self, id: ScopeId) -> &mut Scope {
        &mut self.scopes[id.0 as usize]
    }

    #[must_use]
    pub fn kind(&self, id: ScopeId) -> ScopeKind {
        self.get(id).kind
    }

    #[must_use]
    pub fn parent(&self, id: ScopeId) -> Option<ScopeId> {
        self.get(id).parent
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    /// Iterate scope ids in allocation (pre-order) order.
    pub fn ids(&self) -> impl Iterator<Item = ScopeId> + '_ {
        (0..self.scopes.len()).map(|i| ScopeId(i as u32))
    }

    /// Record a binding event for `name` in `scope`.
    ///
    /// Re-declaration overwrites the role, with two exceptions: parameters
    /// and iteration variables are permanent, and a `TargetOnly` marker never
    /// displaces a real binding. The earliest real binding position is kept
    /// so declared-before-use checks anchor on the first introduction.
    pub fn record_binding(&mut self, scope: ScopeId, name: &str, role: BindingRole, pos: Pos) {
        match self.get_mut(scope).bindings.entry(name.to_string()) {
            Entry::Vacant(entry) => {
                entry.insert(BindingRecord {
                    role,
                    declared_at: pos,
                    effective_scope: None,
                });
            }
            Entry::Occupied(mut entry) => {
                let existing = entry.get_mut();
                if existing.role.is_blocking() || role == BindingRole::TargetOnly {
                    return;
                }
                if existing.role == BindingRole::TargetOnly {
                    // A real binding supersedes the marker; its position must
                    // not inherit the earlier target-only occurrence.
                    existing.role = role;
                    existing.declared_at = pos;
                } else {
                    existing.role = role;
                    existing.declared_at = existing.declared_at.min(pos);
                }
            }
        }
    }

    /// Nearest enclosing `Function` scope of `scope`, skipping transparent
    /// and class scopes. `None` when only the module scope remains.
    #[must_use]
    pub fn enclosing_function(&self, scope: ScopeId) -> Option<ScopeId> {
        let mut cur = self.parent(scope);
        while let Some(id) = cur {
            match self.kind(id) {
                ScopeKind::Function => return Some(id),
                ScopeKind::Module => return None,
                _ => cur = self.parent(id),
            }
        }
        None
    }
}

impl Default for ScopeArena {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_is_module() {
        let arena = ScopeArena::new();
        assert_eq!(arena.kind(ScopeId::ROOT), ScopeKind::Module);
        assert_eq!(arena.parent(ScopeId::ROOT), None);
    }

    #[test]
    fn alloc_links_parent_and_child() {
        let mut arena = ScopeArena::new();
        let f = arena.alloc(ScopeKind::Function, ScopeId::ROOT);
        assert_eq!(arena.parent(f), Some(ScopeId::ROOT));
        assert!(arena.get(ScopeId::ROOT).children.contains(&f));
    }

    #[test]
    fn param_binding_is_permanent() {
        let mut arena = ScopeArena::new();
        let f = arena.alloc(ScopeKind::Function, ScopeId::ROOT);
        arena.record_binding(f, "n", BindingRole::Param, 5);
        arena.record_binding(f, "n", BindingRole::Plain, 20);
        assert_eq!(arena.get(f).binding("n").unwrap().role, BindingRole::Param);
    }

    #[test]
    fn target_only_superseded_by_real_binding() {
        let mut arena = ScopeArena::new();
        let f = arena.alloc(ScopeKind::Function, ScopeId::ROOT);
        arena.record_binding(f, "x", BindingRole::TargetOnly, 10);
        arena.record_binding(f, "x", BindingRole::Plain, 40);
        let record = arena.get(f).binding("x").unwrap();
        assert_eq!(record.role, BindingRole::Plain);
        // The marker position is discarded: the anchor is the real binding.
        assert_eq!(record.declared_at, 40);
    }

    #[test]
    fn real_rebinding_keeps_earliest_position() {
        let mut arena = ScopeArena::new();
        let f = arena.alloc(ScopeKind::Function, ScopeId::ROOT);
        arena.record_binding(f, "x", BindingRole::Plain, 12);
        arena.record_binding(f, "x", BindingRole::Plain, 90);
        assert_eq!(arena.get(f).binding("x").unwrap().declared_at, 12);
    }

    #[test]
    fn enclosing_function_skips_transparent_and_class() {
        let mut arena = ScopeArena::new();
        let f = arena.alloc(ScopeKind::Function, ScopeId::ROOT);
        let c = arena.alloc(ScopeKind::Class, f);
        let lambda = arena.alloc(ScopeKind::Lambda, c);
        assert_eq!(arena.enclosing_function(lambda), Some(f));
        assert_eq!(arena.enclosing_function(f), None);
    }
}
