//! Error types
//!
//! Step rejections are not errors: the integrator retries them internally.
//! Only conditions that make forward progress impossible, or configurations
//! that must never start stepping, show up here.

use thiserror::Error;

/// The body came closer to the central mass than the force model allows
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("distance {distance:e} is below the minimum of {min_distance:e}")]
pub struct SingularityError {
    /// Distance from the central body at the offending evaluation
    pub distance: f64,
    /// Configured minimum distance
    pub min_distance: f64,
}

/// Errors that stop an integration run
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IntegrationError {
    /// Position magnitude dropped below the force model's minimum distance
    #[error("singularity at t = {time}: {source}")]
    Singularity {
        /// Time of the last accepted state
        time: f64,
        /// Underlying force-model failure
        #[source]
        source: SingularityError,
    },

    /// The step size is at its floor and the error is still above tolerance
    #[error("no convergence at t = {time}: step {dt:e} at the floor still gives error {error:e}")]
    NonConvergence {
        /// Time of the last accepted state
        time: f64,
        /// Step size that was rejected
        dt: f64,
        /// Error estimate of the rejected step
        error: f64,
    },

    /// The step is too small to move floating-point time forward
    #[error("step {dt:e} does not advance time past t = {time}")]
    TimeUnderflow {
        /// Time of the last accepted state
        time: f64,
        /// Step size that failed to advance time
        dt: f64,
    },

    /// A candidate state contained NaN or infinity
    #[error("non-finite state produced at t = {time}")]
    NonFiniteState {
        /// Time of the last accepted state
        time: f64,
    },

    /// Rejected before any stepping began
    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        /// What was wrong
        message: String,
    },
}

impl IntegrationError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        IntegrationError::InvalidConfiguration {
            message: message.into(),
        }
    }

    /// True for errors raised during stepping, as opposed to setup
    pub fn is_fatal_step_error(&self) -> bool {
        !matches!(self, IntegrationError::InvalidConfiguration { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_singularity_display_and_source() {
        let err = IntegrationError::Singularity {
            time: 1.5,
            source: SingularityError {
                distance: 1e-6,
                min_distance: 1e-3,
            },
        };
        let message = err.to_string();
        assert!(message.contains("t = 1.5"), "{}", message);
        assert!(err.source().is_some());
        assert!(err.is_fatal_step_error());
    }

    #[test]
    fn test_invalid_configuration_is_not_a_step_error() {
        let err = IntegrationError::invalid("tolerance must be positive");
        assert_eq!(
            err.to_string(),
            "invalid configuration: tolerance must be positive"
        );
        assert!(!err.is_fatal_step_error());
    }
}
