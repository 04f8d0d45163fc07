//! Runge-Kutta-Fehlberg 4(5) step
//!
//! One call evaluates the six Fehlberg stages on the phase vector
//! (position, velocity), forms the 5th- and 4th-order solutions and the
//! local error estimate between them. Acceptance is left to the
//! [`StepController`](crate::controller::StepController).

use serde::{Deserialize, Serialize};

use crate::coefficients::{A, B4, B5, B_ERR, STAGES};
use crate::error::SingularityError;
use crate::force::ForceModel;
use crate::state::State;
use crate::vector::Vec2;

/// How the phase-space error vector is reduced to a scalar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorNorm {
    /// sqrt(|δr|² + w²|δv|²)
    #[default]
    Euclidean,
    /// max(|δr_i|, w|δv_i|) over all components
    MaxAbs,
}

/// Both embedded solutions of one step and their difference
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmbeddedSolution {
    /// 5th order solution, the candidate for acceptance
    pub fifth: State,
    /// 4th order solution
    pub fourth: State,
    /// Norm of `fifth - fourth` (always ≥ 0)
    pub error: f64,
}

/// Stateless RKF45 stepper
///
/// Stage storage lives on the stack of [`Rk45Stepper::step`], so the same
/// stepper can be shared freely and two calls with identical inputs give
/// bit-identical results.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rk45Stepper {
    /// Reduction of the error vector
    pub norm: ErrorNorm,
    /// Weight applied to velocity error components relative to position
    pub velocity_weight: f64,
}

impl Default for Rk45Stepper {
    fn default() -> Self {
        Self {
            norm: ErrorNorm::Euclidean,
            velocity_weight: 1.0,
        }
    }
}

impl Rk45Stepper {
    /// Create a stepper with the given error norm and velocity weight
    pub fn new(norm: ErrorNorm, velocity_weight: f64) -> Self {
        Self {
            norm,
            velocity_weight,
        }
    }

    /// Advance `state` by `dt`, returning both embedded solutions
    ///
    /// Fails only if the force model reports a singularity at one of the
    /// stage positions.
    #[allow(clippy::needless_range_loop)]
    pub fn step<F: ForceModel + ?Sized>(
        &self,
        force: &F,
        state: &State,
        dt: f64,
    ) -> Result<EmbeddedSolution, SingularityError> {
        // dr/dt and dv/dt at each stage
        let mut k_r = [Vec2::ZERO; STAGES];
        let mut k_v = [Vec2::ZERO; STAGES];

        k_r[0] = state.velocity;
        k_v[0] = force.acceleration(state.position)?;

        for i in 1..STAGES {
            let mut dr = Vec2::ZERO;
            let mut dv = Vec2::ZERO;
            for j in 0..i {
                dr += k_r[j] * A[i][j];
                dv += k_v[j] * A[i][j];
            }

            let r_i = state.position + dr * dt;
            k_r[i] = state.velocity + dv * dt;
            k_v[i] = force.acceleration(r_i)?;
        }

        let time = state.time + dt;
        let fifth = Self::combine(state, &k_r, &k_v, &B5, dt, time);
        let fourth = Self::combine(state, &k_r, &k_v, &B4, dt, time);

        let (err_r, err_v) = Self::weighted_sum(&k_r, &k_v, &B_ERR);
        let error = self.reduce(err_r * dt, err_v * dt);

        Ok(EmbeddedSolution {
            fifth,
            fourth,
            error,
        })
    }

    fn combine(
        state: &State,
        k_r: &[Vec2; STAGES],
        k_v: &[Vec2; STAGES],
        weights: &[f64; STAGES],
        dt: f64,
        time: f64,
    ) -> State {
        let (dr, dv) = Self::weighted_sum(k_r, k_v, weights);
        State::new(state.position + dr * dt, state.velocity + dv * dt, time)
    }

    #[allow(clippy::needless_range_loop)]
    fn weighted_sum(
        k_r: &[Vec2; STAGES],
        k_v: &[Vec2; STAGES],
        weights: &[f64; STAGES],
    ) -> (Vec2, Vec2) {
        let mut dr = Vec2::ZERO;
        let mut dv = Vec2::ZERO;
        for i in 0..STAGES {
            dr += k_r[i] * weights[i];
            dv += k_v[i] * weights[i];
        }
        (dr, dv)
    }

    fn reduce(&self, err_r: Vec2, err_v: Vec2) -> f64 {
        let w = self.velocity_weight;
        match self.norm {
            ErrorNorm::Euclidean => (err_r.norm_squared() + w * w * err_v.norm_squared()).sqrt(),
            ErrorNorm::MaxAbs => err_r.max_abs().max(w * err_v.max_abs()),
        }
    }
}
