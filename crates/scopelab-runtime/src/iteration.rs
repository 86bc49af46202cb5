use crate::binding::{Binding, BindingPolicy};
use crate::scope::ScopeChain;
use scopelab_common::ScopeError;
use smol_str::SmolStr;
use tracing::trace;

/// `for (<decl> counter = 0; counter < iterations; counter++) { body }`
///
/// The loop head gets its own block scope. Under [`BindingPolicy::Shared`]
/// the counter is a `var`, so it hoists to the enclosing function scope and
/// every iteration increments the same cell; it is still readable after the
/// loop. Under [`BindingPolicy::Fresh`] the counter is a `let` in the head
/// scope; after each body the cell is copied and the copy is incremented, so
/// each body sees its own cell.
#[derive(Debug, Clone)]
pub struct CountingLoop {
    counter: SmolStr,
    policy: BindingPolicy,
    iterations: u32,
}

impl CountingLoop {
    pub fn new(counter: &str, policy: BindingPolicy, iterations: u32) -> Self {
        Self {
            counter: SmolStr::new(counter),
            policy,
            iterations,
        }
    }

    /// Run the loop. `body` receives the counter binding as the body would
    /// resolve it. Returns the number of iterations run.
    pub fn run<F>(&self, chain: &mut ScopeChain, mut body: F) -> Result<u32, ScopeError>
    where
        F: FnMut(&mut ScopeChain, Binding) -> Result<(), ScopeError>,
    {
        chain.push_block();
        let outcome = self.iterate(chain, &mut body);
        chain.pop()?;
        outcome
    }

    fn iterate<F>(&self, chain: &mut ScopeChain, body: &mut F) -> Result<u32, ScopeError>
    where
        F: FnMut(&mut ScopeChain, Binding) -> Result<(), ScopeError>,
    {
        let name = self.counter.as_str();
        let end = f64::from(self.iterations);
        let mut counter = chain.declare(name, self.policy.decl_kind(), 0)?;
        let mut ran = 0;

        while counter.number(name)? < end {
            trace!(counter = name, value = %counter.get(), policy = %self.policy, "iteration");
            chain.push_block();
            let seen = chain.resolve(name);
            let result = seen.and_then(|binding| body(chain, binding));
            chain.pop()?;
            result?;

            if self.policy == BindingPolicy::Fresh {
                counter = chain.rebind_fresh(name)?;
            }
            counter.set(counter.number(name)? + 1.0);
            ran += 1;
        }

        Ok(ran)
    }
}
