use crate::config::DemoConfig;
use crate::error::Result;
use crate::illustrations::{
    alert_function, encapsulate, impure_sum, pure_sum, DeferredLogging, Illustration, Observations,
};
use scopelab_common::Value;
use scopelab_runtime::{BindingPolicy, DeclKind, EventLoop, Host, Pacing, ScopeChain};
use std::rc::Rc;
use tracing::info;

/// What a run produced, besides the host output.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Report {
    /// Illustrations that ran, in order.
    pub ran: Vec<Illustration>,
    pub pure: Option<f64>,
    /// One result per impure call.
    pub impure: Vec<f64>,
    pub greeting: Option<String>,
    pub alerts_raised: usize,
    /// Values each policy's loggers observed, in firing order.
    pub deferred: Vec<(BindingPolicy, Vec<f64>)>,
    pub timers_run: usize,
}

/// Runs the illustrations top to bottom, then drains the event loop.
///
/// Every illustration gets its own function scope. Deferred work scheduled
/// by any of them fires only after all the synchronous illustrations have
/// finished.
pub struct Runner {
    config: DemoConfig,
    host: Rc<dyn Host>,
    pacing: Pacing,
}

impl Runner {
    pub fn new(config: DemoConfig, host: Rc<dyn Host>) -> Self {
        Self {
            config,
            host,
            pacing: Pacing::Virtual,
        }
    }

    pub fn with_pacing(mut self, pacing: Pacing) -> Self {
        self.pacing = pacing;
        self
    }

    pub fn run_all(&self) -> Result<Report> {
        self.run(&Illustration::ALL)
    }

    /// Run the selected illustrations. Order follows [`Illustration::ALL`],
    /// not the order of `selection`; an empty selection runs everything.
    pub fn run(&self, selection: &[Illustration]) -> Result<Report> {
        self.config.validate()?;

        let mut chain = ScopeChain::new();
        let mut event_loop = EventLoop::with_pacing(self.pacing);
        let mut report = Report::default();
        let mut pending = Vec::new();

        for illustration in Illustration::ALL {
            if !selection.is_empty() && !selection.contains(&illustration) {
                continue;
            }
            info!(illustration = illustration.name(), "running");

            chain.push_function();
            match illustration {
                Illustration::Pure => self.pure(&mut report),
                Illustration::Impure => self.impure(&mut chain, &mut report)?,
                Illustration::Encapsulation => self.encapsulation(&mut report),
                Illustration::Factory => self.factory(&mut report),
                Illustration::Deferred => {
                    pending = self.deferred(&mut chain, &mut event_loop)?;
                }
            }
            chain.pop()?;
            report.ran.push(illustration);
        }

        report.timers_run = event_loop.run_until_idle();
        report.deferred = pending
            .into_iter()
            .map(|(policy, observations)| (policy, observations.numbers()))
            .collect();
        info!(timers = report.timers_run, "event loop idle");

        Ok(report)
    }

    fn pure(&self, report: &mut Report) {
        let (a, b) = (self.config.pure.a, self.config.pure.b);
        let sum = pure_sum(a, b);
        self.host
            .log(&format!("pure_sum({}, {}) = {}", num(a), num(b), num(sum)));
        report.pure = Some(sum);
    }

    fn impure(&self, chain: &mut ScopeChain, report: &mut Report) -> Result<()> {
        let config = &self.config.impure;
        let b = chain.declare("b", DeclKind::Let, config.external)?;

        let call = |report: &mut Report| -> Result<()> {
            let sum = impure_sum(&b, config.argument)?;
            self.host.log(&format!(
                "impure_sum({}) = {} with b = {}",
                num(config.argument),
                num(sum),
                b.get()
            ));
            report.impure.push(sum);
            Ok(())
        };

        call(report)?;
        for &value in &config.reassignments {
            chain.assign("b", value)?;
            call(report)?;
        }
        Ok(())
    }

    fn encapsulation(&self, report: &mut Report) {
        let inner = encapsulate(self.config.encapsulation.state.as_str());
        let greeting = inner();
        self.host.log(&format!("inner() = {greeting}"));
        report.greeting = Some(greeting);
    }

    fn factory(&self, report: &mut Report) {
        for message in &self.config.factory.messages {
            let alert = alert_function(message, Rc::clone(&self.host));
            alert();
            report.alerts_raised += 1;
        }
    }

    fn deferred(
        &self,
        chain: &mut ScopeChain,
        event_loop: &mut EventLoop,
    ) -> Result<Vec<(BindingPolicy, Observations)>> {
        let config = &self.config.deferred;
        config
            .policies
            .iter()
            .map(|&policy| -> Result<(BindingPolicy, Observations)> {
                let observations = DeferredLogging::new(policy, config.iterations, config.delay())
                    .schedule(chain, event_loop, &self.host)?;
                Ok((policy, observations))
            })
            .collect()
    }
}

fn num(n: f64) -> Value {
    Value::Number(n)
}
