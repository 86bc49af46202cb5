//! Function and block scopes with hoisting.

use crate::binding::Binding;
use rustc_hash::FxHashMap;
use scopelab_common::{ScopeError, Symbol, SymbolInterner, Value};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// The declaration keyword a binding was introduced with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclKind {
    Var,
    Let,
    Const,
}

impl DeclKind {
    pub fn keyword(self) -> &'static str {
        match self {
            DeclKind::Var => "var",
            DeclKind::Let => "let",
            DeclKind::Const => "const",
        }
    }

    /// `var` bindings belong to the nearest function scope, not the block
    /// they are written in.
    pub fn is_hoisted(self) -> bool {
        matches!(self, DeclKind::Var)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    Function,
    Block,
}

#[derive(Debug)]
struct Slot {
    binding: Binding,
    kind: DeclKind,
}

#[derive(Debug)]
struct Scope {
    kind: ScopeKind,
    slots: FxHashMap<Symbol, Slot>,
}

impl Scope {
    fn new(kind: ScopeKind) -> Self {
        Self {
            kind,
            slots: FxHashMap::default(),
        }
    }
}

/// A stack of lexical scopes, innermost last.
///
/// The outermost scope is always a function scope and cannot be popped.
#[derive(Debug)]
pub struct ScopeChain {
    interner: SymbolInterner,
    scopes: Vec<Scope>,
}

impl ScopeChain {
    pub fn new() -> Self {
        Self {
            interner: SymbolInterner::new(),
            scopes: vec![Scope::new(ScopeKind::Function)],
        }
    }

    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    pub fn push_block(&mut self) {
        self.push(ScopeKind::Block);
    }

    pub fn push_function(&mut self) {
        self.push(ScopeKind::Function);
    }

    fn push(&mut self, kind: ScopeKind) {
        self.scopes.push(Scope::new(kind));
        trace!(?kind, depth = self.scopes.len(), "push scope");
    }

    /// Leave the innermost scope, dropping its bindings' handles.
    pub fn pop(&mut self) -> Result<ScopeKind, ScopeError> {
        if self.scopes.len() <= 1 {
            return Err(ScopeError::UnbalancedScope);
        }
        let scope = self.scopes.pop().ok_or(ScopeError::UnbalancedScope)?;
        trace!(kind = ?scope.kind, depth = self.scopes.len(), "pop scope");
        Ok(scope.kind)
    }

    /// Declare `name` and return the handle to its cell.
    ///
    /// `var` goes to the nearest function scope and may be redeclared, which
    /// reassigns the existing cell. `let` and `const` go to the innermost scope
    /// and may not share a name with anything already declared there.
    pub fn declare(
        &mut self,
        name: &str,
        kind: DeclKind,
        value: impl Into<Value>,
    ) -> Result<Binding, ScopeError> {
        let sym = self.interner.intern(name);
        let target = if kind.is_hoisted() {
            self.nearest_function_scope()
        } else {
            self.scopes.len() - 1
        };
        let value = value.into();
        debug!(binding = name, keyword = kind.keyword(), depth = target + 1, %value, "declare");

        let scope = &mut self.scopes[target];
        if let Some(existing) = scope.slots.get(&sym) {
            if kind == DeclKind::Var && existing.kind == DeclKind::Var {
                existing.binding.set(value);
                return Ok(existing.binding.clone());
            }
            return Err(ScopeError::Redeclared { name: name.into() });
        }

        let binding = Binding::new(value);
        scope.slots.insert(
            sym,
            Slot {
                binding: binding.clone(),
                kind,
            },
        );
        Ok(binding)
    }

    /// Find the cell `name` refers to from the innermost scope.
    pub fn resolve(&self, name: &str) -> Result<Binding, ScopeError> {
        self.slot(name).map(|slot| slot.binding.clone())
    }

    pub fn assign(&self, name: &str, value: impl Into<Value>) -> Result<(), ScopeError> {
        let slot = self.slot(name)?;
        if slot.kind == DeclKind::Const {
            return Err(ScopeError::AssignToConst { name: name.into() });
        }
        slot.binding.set(value);
        Ok(())
    }

    /// Replace the innermost binding of `name` with a copy of its current
    /// value. Handles taken before the call keep the old cell.
    pub fn rebind_fresh(&mut self, name: &str) -> Result<Binding, ScopeError> {
        let sym = self.interner.intern(name);
        let slot = self
            .scopes
            .iter_mut()
            .rev()
            .find_map(|scope| scope.slots.get_mut(&sym))
            .ok_or_else(|| ScopeError::Unresolved { name: name.into() })?;
        slot.binding = slot.binding.snapshot();
        trace!(binding = name, "rebind fresh");
        Ok(slot.binding.clone())
    }

    fn slot(&self, name: &str) -> Result<&Slot, ScopeError> {
        let sym = self.interner.intern(name);
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.slots.get(&sym))
            .ok_or_else(|| ScopeError::Unresolved { name: name.into() })
    }

    fn nearest_function_scope(&self) -> usize {
        self.scopes
            .iter()
            .rposition(|s| s.kind == ScopeKind::Function)
            .unwrap_or(0)
    }
}

impl Default for ScopeChain {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_var_hoists_out_of_blocks() {
        let mut chain = ScopeChain::new();
        chain.push_block();
        chain.declare("i", DeclKind::Var, 0).unwrap();
        chain.pop().unwrap();

        assert_eq!(chain.resolve("i").unwrap().get(), Value::from(0));
    }

    #[test]
    fn test_let_stays_in_its_block() {
        let mut chain = ScopeChain::new();
        chain.push_block();
        chain.declare("i", DeclKind::Let, 0).unwrap();
        chain.pop().unwrap();

        assert_eq!(
            chain.resolve("i").unwrap_err(),
            ScopeError::Unresolved { name: "i".into() }
        );
    }

    #[test]
    fn test_var_stops_at_nested_function() {
        let mut chain = ScopeChain::new();
        chain.push_function();
        chain.push_block();
        chain.declare("state", DeclKind::Var, "Data").unwrap();
        chain.pop().unwrap();
        assert!(chain.resolve("state").is_ok());

        chain.pop().unwrap();
        assert!(chain.resolve("state").is_err());
    }

    #[test]
    fn test_var_redeclaration_reuses_cell() {
        let mut chain = ScopeChain::new();
        let first = chain.declare("b", DeclKind::Var, 3).unwrap();
        let second = chain.declare("b", DeclKind::Var, 10).unwrap();

        assert!(first.same_cell(&second));
        assert_eq!(first.get(), Value::from(10));
    }

    #[test]
    fn test_let_redeclaration_is_rejected() {
        let mut chain = ScopeChain::new();
        chain.declare("b", DeclKind::Let, 3).unwrap();

        assert_eq!(
            chain.declare("b", DeclKind::Let, 4).unwrap_err(),
            ScopeError::Redeclared { name: "b".into() }
        );
        assert_eq!(
            chain.declare("b", DeclKind::Var, 4).unwrap_err(),
            ScopeError::Redeclared { name: "b".into() }
        );
    }

    #[test]
    fn test_inner_let_shadows_outer() {
        let mut chain = ScopeChain::new();
        chain.declare("x", DeclKind::Let, 1).unwrap();
        chain.push_block();
        chain.declare("x", DeclKind::Let, 2).unwrap();

        assert_eq!(chain.resolve("x").unwrap().get(), Value::from(2));
        chain.pop().unwrap();
        assert_eq!(chain.resolve("x").unwrap().get(), Value::from(1));
    }

    #[test]
    fn test_assign_respects_const() {
        let mut chain = ScopeChain::new();
        chain.declare("b", DeclKind::Let, 3).unwrap();
        chain.declare("message", DeclKind::Const, "Hi mom").unwrap();

        chain.assign("b", 10).unwrap();
        assert_eq!(chain.resolve("b").unwrap().get(), Value::from(10));
        assert_eq!(
            chain.assign("message", "bye").unwrap_err(),
            ScopeError::AssignToConst {
                name: "message".into()
            }
        );
        assert!(chain.assign("missing", 1).is_err());
    }

    #[test]
    fn test_cannot_pop_function_scope() {
        let mut chain = ScopeChain::new();
        chain.push_block();
        assert_eq!(chain.pop(), Ok(ScopeKind::Block));
        assert_eq!(chain.pop(), Err(ScopeError::UnbalancedScope));
        assert_eq!(chain.depth(), 1);
    }

    #[test]
    fn test_rebind_fresh_leaves_old_handles_alone() {
        let mut chain = ScopeChain::new();
        let old = chain.declare("i", DeclKind::Let, 0).unwrap();
        let new = chain.rebind_fresh("i").unwrap();
        new.set(1);

        assert_eq!(old.get(), Value::from(0));
        assert!(chain.resolve("i").unwrap().same_cell(&new));
    }
}
