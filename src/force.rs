//! Force models
//!
//! A force model maps a position to an acceleration. Models are pure: the
//! stepper calls them six times per step and relies on identical inputs
//! giving identical outputs.

use serde::{Deserialize, Serialize};

use crate::error::{IntegrationError, SingularityError};
use crate::state::State;
use crate::vector::Vec2;

/// Acceleration field acting on the body: d²r/dt² = a(r)
pub trait ForceModel {
    /// Evaluate the acceleration at `position`
    ///
    /// Returns `Err` when the position is too close to a singularity of the
    /// field for the result to be meaningful.
    fn acceleration(&self, position: Vec2) -> Result<Vec2, SingularityError>;

    /// Check the model parameters before any stepping begins
    fn validate(&self) -> Result<(), IntegrationError> {
        Ok(())
    }
}

impl<F: ForceModel + ?Sized> ForceModel for &F {
    fn acceleration(&self, position: Vec2) -> Result<Vec2, SingularityError> {
        (**self).acceleration(position)
    }

    fn validate(&self) -> Result<(), IntegrationError> {
        (**self).validate()
    }
}

/// Keplerian central force: a = -μ r / |r|³
///
/// `mu` is the gravitational parameter G·M of the central body. Evaluations
/// closer than `min_distance` (or exactly at the origin) fail with a
/// [`SingularityError`] instead of returning huge or infinite values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InverseSquare {
    /// Gravitational parameter μ = G·M
    pub mu: f64,
    /// Collision / singularity guard radius
    #[serde(default)]
    pub min_distance: f64,
}

impl InverseSquare {
    /// Create a central force with no minimum distance beyond `|r| > 0`
    pub fn new(mu: f64) -> Self {
        Self {
            mu,
            min_distance: 0.0,
        }
    }

    /// Set the collision radius
    pub fn with_min_distance(mut self, min_distance: f64) -> Self {
        self.min_distance = min_distance;
        self
    }

    /// Specific orbital energy ½|v|² − μ/|r|
    pub fn specific_energy(&self, state: &State) -> f64 {
        0.5 * state.velocity.norm_squared() - self.mu / state.distance()
    }

    /// Specific angular momentum r × v (out-of-plane component)
    pub fn specific_angular_momentum(&self, state: &State) -> f64 {
        state.position.cross(state.velocity)
    }

    /// Speed of a circular orbit at radius `r`
    pub fn circular_speed(&self, r: f64) -> f64 {
        (self.mu / r).sqrt()
    }

    /// Period of an orbit with semi-major axis `a`: T = 2π √(a³/μ)
    pub fn orbital_period(&self, a: f64) -> f64 {
        std::f64::consts::TAU * (a.powi(3) / self.mu).sqrt()
    }
}

impl ForceModel for InverseSquare {
    fn acceleration(&self, position: Vec2) -> Result<Vec2, SingularityError> {
        let r2 = position.norm_squared();
        let r = r2.sqrt();

        if !(r > 0.0 && r >= self.min_distance && r.is_finite()) {
            return Err(SingularityError {
                distance: r,
                min_distance: self.min_distance,
            });
        }

        Ok(position * (-self.mu / (r2 * r)))
    }

    fn validate(&self) -> Result<(), IntegrationError> {
        if !self.mu.is_finite() || self.mu <= 0.0 {
            return Err(IntegrationError::invalid(
                "gravitational parameter mu must be positive and finite",
            ));
        }
        if !self.min_distance.is_finite() || self.min_distance < 0.0 {
            return Err(IntegrationError::invalid(
                "min_distance must be non-negative and finite",
            ));
        }
        Ok(())
    }
}
