//! Run configuration (scopelab.toml format).
//!
//! Every section and field is optional; the defaults reproduce the classic
//! script: `pure_sum(1, 2)`, `b = 3`, `"Data"`, `"Hi mom"` and three loggers
//! scheduled 100 ms out under both binding policies.

use crate::error::{DriverError, Result};
use scopelab_runtime::BindingPolicy;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Upper bound on deferred loop iterations.
pub const MAX_ITERATIONS: u32 = 1000;

/// Upper bound on the deferred logger delay, one minute.
pub const MAX_DELAY_MS: u64 = 60_000;

/// Root run configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub pure: PureConfig,
    pub impure: ImpureConfig,
    pub encapsulation: EncapsulationConfig,
    pub factory: FactoryConfig,
    pub deferred: DeferredConfig,
}

/// Operands for the pure sum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PureConfig {
    pub a: f64,
    pub b: f64,
}

impl Default for PureConfig {
    fn default() -> Self {
        Self { a: 1.0, b: 2.0 }
    }
}

/// The external variable and the argument for the impure sum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImpureConfig {
    /// Initial value of the external variable `b`.
    pub external: f64,

    /// Argument passed on every call.
    pub argument: f64,

    /// Values assigned to `b` in turn, each followed by another call with
    /// the same argument.
    pub reassignments: Vec<f64>,
}

impl Default for ImpureConfig {
    fn default() -> Self {
        Self {
            external: 3.0,
            argument: 1.0,
            reassignments: vec![10.0],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncapsulationConfig {
    /// The value enclosed by the factory.
    pub state: String,
}

impl Default for EncapsulationConfig {
    fn default() -> Self {
        Self {
            state: "Data".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FactoryConfig {
    /// One closure is built and invoked per message.
    pub messages: Vec<String>,
}

impl Default for FactoryConfig {
    fn default() -> Self {
        Self {
            messages: vec!["Hi mom".to_string()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeferredConfig {
    pub iterations: u32,
    pub delay_ms: u64,
    /// Binding policies to demonstrate, in order.
    pub policies: Vec<BindingPolicy>,
}

impl Default for DeferredConfig {
    fn default() -> Self {
        Self {
            iterations: 3,
            delay_ms: 100,
            policies: BindingPolicy::ALL.to_vec(),
        }
    }
}

impl DeferredConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

impl DemoConfig {
    /// Load and validate configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse and validate configuration from TOML text.
    pub fn parse(content: &str) -> Result<Self> {
        let config: DemoConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        let operands = [
            ("pure.a", self.pure.a),
            ("pure.b", self.pure.b),
            ("impure.external", self.impure.external),
            ("impure.argument", self.impure.argument),
        ];
        for (field, value) in operands {
            if !value.is_finite() {
                return Err(DriverError::Validation(format!(
                    "{field} must be a finite number, got {value}"
                )));
            }
        }
        if self.impure.reassignments.iter().any(|v| !v.is_finite()) {
            return Err(DriverError::Validation(
                "impure.reassignments must all be finite numbers".to_string(),
            ));
        }

        if self.deferred.policies.is_empty() {
            return Err(DriverError::Validation(
                "deferred.policies must name at least one binding policy".to_string(),
            ));
        }
        if self.deferred.iterations > MAX_ITERATIONS {
            return Err(DriverError::Validation(format!(
                "deferred.iterations must be at most {MAX_ITERATIONS}, got {}",
                self.deferred.iterations
            )));
        }
        if self.deferred.delay_ms > MAX_DELAY_MS {
            return Err(DriverError::Validation(format!(
                "deferred.delay_ms must be at most {MAX_DELAY_MS}, got {}",
                self.deferred.delay_ms
            )));
        }

        Ok(())
    }
}
