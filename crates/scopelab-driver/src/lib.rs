//! The scopelab demonstration runner.
//!
//! Five independent illustrations of closures and scoping, run top to
//! bottom by [`Runner`]:
//!
//! 1. [`pure_sum`]: no captured environment.
//! 2. [`impure_sum`]: reads a variable that lives outside the function.
//! 3. [`outer`]/[`encapsulate`]: a value reachable only through the returned
//!    closure.
//! 4. [`alert_function`]: a factory whose closures each keep their own
//!    message.
//! 5. [`DeferredLogging`]: loggers scheduled from a loop, observing either one
//!    shared counter or a fresh counter per iteration.
//!
//! Settings come from [`DemoConfig`], usually loaded from `scopelab.toml`:
//!
//! ```toml
//! [impure]
//! external = 3
//! argument = 1
//! reassignments = [10]
//!
//! [deferred]
//! iterations = 3
//! delay_ms = 100
//! policies = ["shared", "fresh"]
//! ```

mod config;
mod error;
mod illustrations;
mod runner;

pub use config::{
    DeferredConfig, DemoConfig, EncapsulationConfig, FactoryConfig, ImpureConfig, PureConfig,
    MAX_DELAY_MS, MAX_ITERATIONS,
};
pub use error::{DriverError, Result};
pub use illustrations::{
    alert_function, encapsulate, impure_sum, outer, pure_sum, DeferredLogging, Illustration,
    Observations,
};
pub use runner::{Report, Runner};
