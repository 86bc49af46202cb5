use crate::scope::DeclKind;
use scopelab_common::{ScopeError, Value};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// A shared mutable variable cell.
///
/// Clones are handles to the same cell. The cell lives as long as any handle,
/// including handles moved into closures.
#[derive(Clone, Default)]
pub struct Binding(Rc<RefCell<Value>>);

impl Binding {
    pub fn new(value: impl Into<Value>) -> Self {
        Self(Rc::new(RefCell::new(value.into())))
    }

    pub fn get(&self) -> Value {
        self.0.borrow().clone()
    }

    pub fn set(&self, value: impl Into<Value>) {
        *self.0.borrow_mut() = value.into();
    }

    /// Copy the current value into a new, independent cell.
    pub fn snapshot(&self) -> Binding {
        Binding::new(self.get())
    }

    /// Read the cell as a number; `name` is only used for the error.
    pub fn number(&self, name: &str) -> Result<f64, ScopeError> {
        let value = self.0.borrow();
        value.as_number().ok_or_else(|| ScopeError::NotANumber {
            name: name.into(),
            found: value.type_name(),
        })
    }

    pub fn same_cell(&self, other: &Binding) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Number of live handles to this cell.
    pub fn handle_count(&self) -> usize {
        Rc::strong_count(&self.0)
    }
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Binding").field(&*self.0.borrow()).finish()
    }
}

/// How a closure created inside a loop captures the loop counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BindingPolicy {
    /// One hoisted cell reused by every iteration (`var`).
    Shared,
    /// A new cell per iteration holding that iteration's value (`let`).
    Fresh,
}

impl BindingPolicy {
    pub const ALL: [BindingPolicy; 2] = [BindingPolicy::Shared, BindingPolicy::Fresh];

    pub fn decl_kind(self) -> DeclKind {
        match self {
            BindingPolicy::Shared => DeclKind::Var,
            BindingPolicy::Fresh => DeclKind::Let,
        }
    }

    pub fn keyword(self) -> &'static str {
        self.decl_kind().keyword()
    }

    /// The handle a closure should hold under this policy.
    pub fn capture(self, binding: &Binding) -> Binding {
        match self {
            BindingPolicy::Shared => binding.clone(),
            BindingPolicy::Fresh => binding.snapshot(),
        }
    }
}

impl fmt::Display for BindingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindingPolicy::Shared => f.write_str("shared"),
            BindingPolicy::Fresh => f.write_str("fresh"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_the_cell() {
        let b = Binding::new(3);
        let captured = b.clone();
        b.set(10);

        assert_eq!(captured.get(), Value::from(10));
        assert!(captured.same_cell(&b));
        assert_eq!(b.handle_count(), 2);
    }

    #[test]
    fn test_snapshot_is_independent() {
        let b = Binding::new(1);
        let snap = b.snapshot();
        b.set(2);

        assert_eq!(snap.get(), Value::from(1));
        assert!(!snap.same_cell(&b));
    }

    #[test]
    fn test_number_reports_type() {
        let b = Binding::new("Data");
        let err = b.number("state").unwrap_err();

        assert_eq!(
            err,
            ScopeError::NotANumber {
                name: "state".into(),
                found: "string"
            }
        );
        assert_eq!(Binding::new(4).number("b"), Ok(4.0));
    }

    #[test]
    fn test_policy_keywords() {
        assert_eq!(BindingPolicy::Shared.keyword(), "var");
        assert_eq!(BindingPolicy::Fresh.keyword(), "let");
        assert_eq!(BindingPolicy::Fresh.to_string(), "fresh");
    }
}
