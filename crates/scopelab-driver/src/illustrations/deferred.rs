use scopelab_common::{ScopeError, Value};
use scopelab_runtime::{BindingPolicy, CountingLoop, EventLoop, Host, ScopeChain};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use tracing::debug;

/// Values seen by deferred loggers, in the order the loggers fired.
///
/// Empty until the event loop has run.
#[derive(Debug, Clone, Default)]
pub struct Observations(Rc<RefCell<Vec<Value>>>);

impl Observations {
    pub fn values(&self) -> Vec<Value> {
        self.0.borrow().clone()
    }

    pub fn numbers(&self) -> Vec<f64> {
        self.0.borrow().iter().filter_map(Value::as_number).collect()
    }

    fn record(&self, value: Value) {
        self.0.borrow_mut().push(value);
    }
}

/// A counting loop that schedules one logger per iteration.
///
/// Each logger captures the counter *binding* it resolves inside the loop
/// body, never a copy of the value. Whether those bindings are one cell or
/// one per iteration is decided by the policy, so the same logger yields
/// `3, 3, 3` under [`BindingPolicy::Shared`] and `0, 1, 2` under
/// [`BindingPolicy::Fresh`].
#[derive(Debug, Clone)]
pub struct DeferredLogging {
    policy: BindingPolicy,
    iterations: u32,
    delay: Duration,
}

impl DeferredLogging {
    pub fn new(policy: BindingPolicy, iterations: u32, delay: Duration) -> Self {
        Self {
            policy,
            iterations,
            delay,
        }
    }

    /// Run the loop and schedule the loggers on `event_loop`. Nothing is
    /// logged until the caller drains the loop.
    pub fn schedule(
        &self,
        chain: &mut ScopeChain,
        event_loop: &mut EventLoop,
        host: &Rc<dyn Host>,
    ) -> Result<Observations, ScopeError> {
        let observations = Observations::default();
        let keyword = self.policy.keyword();

        let scheduled = CountingLoop::new("i", self.policy, self.iterations).run(chain, |_, i| {
            let host = Rc::clone(host);
            let seen = observations.clone();
            let log = move |_: &mut EventLoop| {
                let value = i.get();
                host.log(&format!("{keyword} i = {value}"));
                seen.record(value);
            };
            event_loop.set_timeout(self.delay, log);
            Ok(())
        })?;

        debug!(policy = %self.policy, scheduled, "loggers scheduled");
        Ok(observations)
    }
}
