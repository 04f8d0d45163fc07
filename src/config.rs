//! Integrator configuration
//!
//! Every numeric knob of a run lives here instead of in module-level
//! constants. The struct deserializes with `serde`; omitted fields take the
//! documented defaults, so a scenario file only needs to name what it
//! changes:
//!
//! ```yaml
//! tolerance: 1.0e-10
//! initial_dt: 1.0e-6
//! min_dt: 1.0e-12
//! max_dt: 10.0
//! end_time: 70.0
//! error_norm: euclidean
//! ```
//!
//! Reading the file is left to the caller.

use serde::{Deserialize, Serialize};

use crate::controller::StepController;
use crate::error::IntegrationError;
use crate::stepper::{ErrorNorm, Rk45Stepper};

/// Parameters of one integration run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntegratorConfig {
    /// Largest acceptable local error estimate per step (default: 1e-8)
    pub tolerance: f64,
    /// First step size to try (default: 1e-3)
    pub initial_dt: f64,
    /// Step-size floor (default: 1e-12)
    pub min_dt: f64,
    /// Step-size ceiling (default: unbounded)
    pub max_dt: f64,
    /// Stop once time reaches this value
    pub end_time: Option<f64>,
    /// Stop after this many accepted steps (default: 10 000 000)
    pub max_steps: Option<u64>,
    /// Step-size safety factor (default: 0.9)
    pub safety: f64,
    /// Step-size exponent (default: 1/5)
    pub exponent: f64,
    /// Per-step growth clamp (default: 5)
    pub max_growth: f64,
    /// Per-step shrink clamp (default: 0.2)
    pub min_shrink: f64,
    /// Error vector reduction (default: Euclidean)
    pub error_norm: ErrorNorm,
    /// Weight of velocity error relative to position error (default: 1)
    pub velocity_weight: f64,
}

impl Default for IntegratorConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-8,
            initial_dt: 1e-3,
            min_dt: 1e-12,
            max_dt: f64::INFINITY,
            end_time: None,
            max_steps: Some(10_000_000),
            safety: StepController::DEFAULT_SAFETY,
            exponent: StepController::DEFAULT_EXPONENT,
            max_growth: StepController::DEFAULT_MAX_GROWTH,
            min_shrink: StepController::DEFAULT_MIN_SHRINK,
            error_norm: ErrorNorm::Euclidean,
            velocity_weight: 1.0,
        }
    }
}

impl IntegratorConfig {
    /// Default configuration with the given tolerance
    pub fn new(tolerance: f64) -> Self {
        Self {
            tolerance,
            ..Default::default()
        }
    }

    /// Set initial, minimum and maximum step sizes
    pub fn with_step_limits(mut self, initial_dt: f64, min_dt: f64, max_dt: f64) -> Self {
        self.initial_dt = initial_dt;
        self.min_dt = min_dt;
        self.max_dt = max_dt;
        self
    }

    /// Stop when time reaches `end_time`
    pub fn with_end_time(mut self, end_time: f64) -> Self {
        self.end_time = Some(end_time);
        self
    }

    /// Stop after `max_steps` accepted steps; `None` removes the limit
    pub fn with_max_steps(mut self, max_steps: Option<u64>) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// Select the error norm and velocity weight
    pub fn with_error_norm(mut self, norm: ErrorNorm, velocity_weight: f64) -> Self {
        self.error_norm = norm;
        self.velocity_weight = velocity_weight;
        self
    }

    /// Step controller described by this configuration
    pub fn controller(&self) -> StepController {
        StepController {
            tolerance: self.tolerance,
            safety: self.safety,
            exponent: self.exponent,
            max_growth: self.max_growth,
            min_shrink: self.min_shrink,
            min_dt: self.min_dt,
            max_dt: self.max_dt,
        }
    }

    /// Stepper described by this configuration
    pub fn stepper(&self) -> Rk45Stepper {
        Rk45Stepper::new(self.error_norm, self.velocity_weight)
    }

    /// Check every parameter, given the time the run starts at
    pub fn validate(&self, start_time: f64) -> Result<(), IntegrationError> {
        fn positive(name: &str, value: f64) -> Result<(), IntegrationError> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(IntegrationError::invalid(format!(
                    "{} must be positive and finite, got {}",
                    name, value
                )))
            }
        }

        positive("tolerance", self.tolerance)?;
        positive("initial_dt", self.initial_dt)?;
        positive("min_dt", self.min_dt)?;
        positive("exponent", self.exponent)?;
        positive("velocity_weight", self.velocity_weight)?;

        if self.max_dt.is_nan() || self.max_dt < self.min_dt {
            return Err(IntegrationError::invalid(format!(
                "max_dt ({}) must not be below min_dt ({})",
                self.max_dt, self.min_dt
            )));
        }
        if !(self.safety > 0.0 && self.safety < 1.0) {
            return Err(IntegrationError::invalid(format!(
                "safety must lie in (0, 1), got {}",
                self.safety
            )));
        }
        if !(self.max_growth.is_finite() && self.max_growth > 1.0) {
            return Err(IntegrationError::invalid(format!(
                "max_growth must be finite and above 1, got {}",
                self.max_growth
            )));
        }
        if !(self.min_shrink > 0.0 && self.min_shrink < 1.0) {
            return Err(IntegrationError::invalid(format!(
                "min_shrink must lie in (0, 1), got {}",
                self.min_shrink
            )));
        }

        match (self.end_time, self.max_steps) {
            (None, None) => {
                return Err(IntegrationError::invalid(
                    "at least one of end_time and max_steps is required",
                ))
            }
            (_, Some(0)) => return Err(IntegrationError::invalid("max_steps must be at least 1")),
            _ => {}
        }
        if let Some(end_time) = self.end_time {
            if !(end_time.is_finite() && end_time > start_time) {
                return Err(IntegrationError::invalid(format!(
                    "end_time ({}) must be finite and after the start time ({})",
                    end_time, start_time
                )));
            }
        }

        Ok(())
    }
}
