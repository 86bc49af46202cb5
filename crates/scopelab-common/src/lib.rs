//! Shared vocabulary for the scopelab crates: interned binding names, the
//! dynamic value type stored in bindings, and scope diagnostics.

mod error;
mod symbol;
mod value;

pub use error::ScopeError;
pub use symbol::{Symbol, SymbolInterner};
pub use value::Value;
