//! Step-size control
//!
//! Classic I-controller on the embedded error estimate:
//!
//! dt_new = dt · safety · (tolerance / error)^exponent
//!
//! with exponent = 1/5 for the 4th-order error estimate of RKF45. The
//! factor is clamped per step so the step size cannot oscillate wildly.

use crate::coefficients::EMBEDDED_ORDER;

/// Outcome of judging one step attempt
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepDecision {
    /// Keep the candidate and continue with `next_dt` (never smaller than the step just taken)
    Accept {
        /// Step size for the next attempt
        next_dt: f64,
    },
    /// Discard the candidate and retry from the same state with a smaller step
    Reject {
        /// Step size for the retry, strictly smaller than the rejected one
        retry_dt: f64,
    },
    /// Rejected at the step-size floor: no smaller step is allowed
    Exhausted,
}

impl StepDecision {
    /// True for [`StepDecision::Accept`]
    pub fn is_accepted(&self) -> bool {
        matches!(self, StepDecision::Accept { .. })
    }

    /// The step size to use next, if the run can continue
    pub fn next_dt(&self) -> Option<f64> {
        match *self {
            StepDecision::Accept { next_dt } => Some(next_dt),
            StepDecision::Reject { retry_dt } => Some(retry_dt),
            StepDecision::Exhausted => None,
        }
    }
}

/// Accept/reject rule and step-size update
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepController {
    /// Largest acceptable error estimate
    pub tolerance: f64,
    /// Safety factor, strictly below one (0.9 typical)
    pub safety: f64,
    /// Exponent applied to tolerance / error; 1/(p+1) for an order-p estimate
    pub exponent: f64,
    /// Maximum growth factor per step
    pub max_growth: f64,
    /// Minimum reduction factor per step
    pub min_shrink: f64,
    /// Step-size floor
    pub min_dt: f64,
    /// Step-size ceiling
    pub max_dt: f64,
}

impl StepController {
    /// Default safety factor
    pub const DEFAULT_SAFETY: f64 = 0.9;
    /// Default exponent, 1/5 for the 4th-order embedded estimate
    pub const DEFAULT_EXPONENT: f64 = 1.0 / (EMBEDDED_ORDER as f64 + 1.0);
    /// Default growth clamp
    pub const DEFAULT_MAX_GROWTH: f64 = 5.0;
    /// Default shrink clamp
    pub const DEFAULT_MIN_SHRINK: f64 = 0.2;

    /// Controller with the standard Fehlberg constants
    pub fn new(tolerance: f64, min_dt: f64, max_dt: f64) -> Self {
        Self {
            tolerance,
            safety: Self::DEFAULT_SAFETY,
            exponent: Self::DEFAULT_EXPONENT,
            max_growth: Self::DEFAULT_MAX_GROWTH,
            min_shrink: Self::DEFAULT_MIN_SHRINK,
            min_dt,
            max_dt,
        }
    }

    /// Step size factor for a given error, before `min_dt`/`max_dt` apply
    ///
    /// Zero error maps to the growth clamp instead of dividing by zero;
    /// non-finite error maps to the shrink clamp.
    pub fn compute_factor(&self, error: f64) -> f64 {
        if error == 0.0 {
            return self.max_growth;
        }
        if !error.is_finite() {
            return self.min_shrink;
        }

        let factor = self.safety * (self.tolerance / error).powf(self.exponent);
        factor.clamp(self.min_shrink, self.max_growth)
    }

    /// Accept or reject a step of size `dt` with error estimate `error`
    pub fn decide(&self, error: f64, dt: f64) -> StepDecision {
        if error.is_finite() && error <= self.tolerance {
            // An accepted step never shrinks the next one
            let factor = self.compute_factor(error).max(1.0);
            let next_dt = (dt * factor).clamp(self.min_dt, self.max_dt).max(dt);
            return StepDecision::Accept { next_dt };
        }

        if dt <= self.min_dt {
            return StepDecision::Exhausted;
        }

        let factor = self.compute_factor(error).min(self.safety);
        let retry_dt = (dt * factor).max(self.min_dt);
        StepDecision::Reject { retry_dt }
    }

    /// Clamp a requested step size into `[min_dt, max_dt]`
    pub fn clamp_dt(&self, dt: f64) -> f64 {
        dt.clamp(self.min_dt, self.max_dt)
    }
}
