//! Runtime support for the scopelab illustrations.
//!
//! Closures in the illustrations never rely on implicit language scoping.
//! Everything they capture is an explicit handle from this crate:
//!
//! - [`Binding`]: a shared mutable cell. Cloning it shares the cell,
//!   [`Binding::snapshot`] copies the value into a new one.
//! - [`ScopeChain`]: function and block scopes with `var` hoisting and
//!   block-scoped `let`/`const`.
//! - [`CountingLoop`]: `for (<decl> i = 0; i < n; i++)`, with the per-iteration
//!   binding behaviour chosen by [`BindingPolicy`].
//! - [`EventLoop`]: a single-threaded timer queue standing in for
//!   `setTimeout`.
//! - [`Host`]: where log lines and alerts go.
//!
//! # Example
//!
//! ```
//! use scopelab_runtime::{Binding, BindingPolicy};
//!
//! let counter = Binding::new(0);
//! let shared = BindingPolicy::Shared.capture(&counter);
//! let fresh = BindingPolicy::Fresh.capture(&counter);
//! counter.set(3);
//!
//! assert_eq!(shared.get().to_string(), "3");
//! assert_eq!(fresh.get().to_string(), "0");
//! ```

mod binding;
mod event_loop;
mod host;
mod iteration;
mod scope;

pub use binding::{Binding, BindingPolicy};
pub use event_loop::{EventLoop, Pacing, Task, TimerId};
pub use host::{Host, HostEvent, RecordingHost, StdHost};
pub use iteration::CountingLoop;
pub use scope::{DeclKind, ScopeChain, ScopeKind};
