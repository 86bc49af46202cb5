//! Scope diagnostics.
//!
//! These are setup defects rather than recoverable conditions: a correctly
//! wired illustration never produces one.

use miette::Diagnostic;
use smol_str::SmolStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error, Diagnostic)]
pub enum ScopeError {
    #[error("`{name}` is not declared in any enclosing scope")]
    #[diagnostic(
        code(scopelab::scope::unresolved),
        help("declare it with `var`, `let` or `const` before use")
    )]
    Unresolved { name: SmolStr },

    #[error("`{name}` is already declared in this block")]
    #[diagnostic(
        code(scopelab::scope::redeclared),
        help("block-scoped bindings cannot be redeclared in the same block; `var` can")
    )]
    Redeclared { name: SmolStr },

    #[error("cannot assign to `{name}` because it is a constant")]
    #[diagnostic(code(scopelab::scope::assign_to_const))]
    AssignToConst { name: SmolStr },

    #[error("cannot pop the function scope")]
    #[diagnostic(
        code(scopelab::scope::unbalanced),
        help("every `push_block` must be matched by exactly one `pop_block`")
    )]
    UnbalancedScope,

    #[error("`{name}` holds a {found}, expected a number")]
    #[diagnostic(code(scopelab::value::not_a_number))]
    NotANumber { name: SmolStr, found: &'static str },
}
