mod deferred;
mod encapsulation;
mod factory;
mod impure;
mod pure;

pub use deferred::{DeferredLogging, Observations};
pub use encapsulation::{encapsulate, outer};
pub use factory::alert_function;
pub use impure::impure_sum;
pub use pure::pure_sum;

/// The illustrations, in the order they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Illustration {
    Pure,
    Impure,
    Encapsulation,
    Factory,
    Deferred,
}

impl Illustration {
    pub const ALL: [Illustration; 5] = [
        Illustration::Pure,
        Illustration::Impure,
        Illustration::Encapsulation,
        Illustration::Factory,
        Illustration::Deferred,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Illustration::Pure => "pure",
            Illustration::Impure => "impure",
            Illustration::Encapsulation => "encapsulation",
            Illustration::Factory => "factory",
            Illustration::Deferred => "deferred",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Illustration::Pure => "a sum that depends only on its arguments",
            Illustration::Impure => "a sum that reads a variable from the enclosing scope",
            Illustration::Encapsulation => "a value reachable only through the returned closure",
            Illustration::Factory => "a factory whose closures each keep their own message",
            Illustration::Deferred => "loggers scheduled from a loop over a shared or fresh counter",
        }
    }
}
