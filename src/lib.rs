//! # RKF45: Runge-Kutta-Fehlberg 4(5) Orbit Integrator
//!
//! An adaptive-step integrator for a single body moving in a plane under an
//! inverse-square central force, built for highly eccentric orbits where the
//! right step size changes by orders of magnitude over one revolution.
//!
//! ## Features
//!
//! - 6-stage embedded RK4(5) pair (Fehlberg's coefficients), propagating the
//!   5th-order solution
//! - Adaptive step-size control from the difference of the two orders
//! - Typed failures: singularity, non-convergence at the step floor,
//!   time underflow
//! - Step-boundary cancellation and an exact landing on the end time
//! - Trajectory diagnostics: aphelion, perihelion, energy drift, step history
//! - Parallel batch runs for sensitivity studies (`parallel` feature)
//!
//! ## Basic Usage
//!
//! ```rust
//! use rkf45::{Integrator, IntegratorConfig, InverseSquare, State, Vec2};
//!
//! // Unit circular orbit around a body with μ = 1
//! let force = InverseSquare::new(1.0);
//! let initial = State::new(Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0), 0.0);
//!
//! let config = IntegratorConfig::new(1e-9)
//!     .with_step_limits(1e-3, 1e-10, 0.5)
//!     .with_end_time(10.0);
//!
//! let mut integrator = Integrator::new(config, force, initial).unwrap();
//! integrator.run().unwrap();
//!
//! let trajectory = integrator.trajectory();
//! assert_eq!(trajectory.last().time, 10.0);
//! ```
//!
//! ## Stepping by hand
//!
//! [`Integrator::step`] makes a single attempt and reports whether it was
//! accepted; rejected attempts leave the trajectory untouched.
//!
//! ```rust
//! use rkf45::{Integrator, IntegratorConfig, InverseSquare, State, Vec2};
//!
//! let initial = State::new(Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0), 0.0);
//! let config = IntegratorConfig::new(1e-12).with_step_limits(1.0, 1e-10, 1.0);
//! let mut integrator = Integrator::new(config, InverseSquare::new(1.0), initial).unwrap();
//!
//! let attempt = integrator.step().unwrap().unwrap();
//! if !attempt.accepted {
//!     assert_eq!(integrator.trajectory().len(), 1);
//!     assert!(attempt.next_dt < attempt.dt);
//! }
//! ```
//!
//! ## Tolerance Selection
//!
//! The tolerance bounds the local error estimate of each step, in the units
//! of position (and velocity, weighted by `velocity_weight`). In AU and
//! years, `1e-6` to `1e-10` covers most uses; the global error of a full
//! orbit is typically two to three orders of magnitude above the per-step
//! tolerance.
//!
//! ## References
//!
//! 1. Fehlberg, E. (1969). "Low-Order Classical Runge-Kutta Formulas with
//!    Stepsize Control and their Application to some Heat Transfer
//!    Problems". NASA TR R-315.
//!
//! 2. Hairer, E., Nørsett, S.P., & Wanner, G. (1993). "Solving
//!    Ordinary Differential Equations I: Nonstiff Problems".
//!    Springer.

#![deny(missing_docs)]
#![deny(unsafe_code)]

#[cfg(feature = "parallel")]
pub mod batch;
pub mod coefficients;
pub mod config;
pub mod controller;
pub mod error;
pub mod force;
pub mod integrator;
pub mod state;
pub mod stepper;
pub mod trajectory;
pub mod vector;

#[cfg(feature = "parallel")]
pub use batch::{final_separations, perturbed_states, propagate_batch};
pub use config::IntegratorConfig;
pub use controller::{StepController, StepDecision};
pub use error::{IntegrationError, SingularityError};
pub use force::{ForceModel, InverseSquare};
pub use integrator::{
    IntegrationReport, Integrator, Stats, Status, StepResult, StopReason, Termination,
};
pub use state::State;
pub use stepper::{EmbeddedSolution, ErrorNorm, Rk45Stepper};
pub use trajectory::{StepRecord, Trajectory};
pub use vector::Vec2;
