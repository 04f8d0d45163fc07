//! Adaptive integration driver
//!
//! The [`Integrator`] owns the current state, the step size and the
//! trajectory. Each call to [`Integrator::step`] makes one attempt: the
//! stepper proposes a 5th-order candidate, the controller accepts or
//! rejects it, and only an accepted candidate touches the trajectory.
//!
//! A run is a small state machine:
//!
//! ```text
//! Running ──accept/reject──▶ Running
//! Running ──end time / max steps / cancel──▶ Stopped
//! Running ──singularity / non-convergence──▶ Failed
//! ```
//!
//! Stopped and Failed are final. The trajectory accumulated up to that
//! point stays available through [`Integrator::trajectory`] or
//! [`Integrator::into_report`].

use tracing::{debug, info, warn};

use crate::coefficients::STAGES;
use crate::config::IntegratorConfig;
use crate::controller::{StepController, StepDecision};
use crate::error::IntegrationError;
use crate::force::ForceModel;
use crate::state::State;
use crate::stepper::Rk45Stepper;
use crate::trajectory::{StepRecord, Trajectory};

/// Why a run stopped normally
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Time reached the configured end time
    EndTime,
    /// The configured number of accepted steps was taken
    MaxSteps,
    /// The caller asked the run to stop
    Cancelled,
}

/// Lifecycle of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Steps can still be taken
    Running,
    /// Terminated normally
    Stopped(StopReason),
    /// Terminated by an error; see [`Integrator::failure`]
    Failed,
}

/// How a finished run ended
#[derive(Debug, Clone, PartialEq)]
pub enum Termination {
    /// Normal termination
    Stopped(StopReason),
    /// The run could not make progress
    Failed {
        /// What went wrong
        error: IntegrationError,
        /// Last accepted state before the failure
        at: State,
    },
    /// The run was handed over before reaching a terminal state
    Incomplete,
}

/// Result of a single step attempt
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepResult {
    /// 5th order candidate state
    pub candidate: State,
    /// 4th order embedded state
    pub embedded: State,
    /// Error estimate (≥ 0)
    pub error: f64,
    /// Step size that was attempted
    pub dt: f64,
    /// Step size proposed for the next attempt
    pub next_dt: f64,
    /// Whether the candidate was accepted into the trajectory
    pub accepted: bool,
}

/// Counters for diagnostics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    /// Number of force model evaluations in completed step attempts
    pub force_evals: u64,
    /// Number of accepted steps
    pub accepted_steps: u64,
    /// Number of rejected steps
    pub rejected_steps: u64,
}

/// Everything a finished run hands to reporting and plotting
#[derive(Debug, Clone, PartialEq)]
pub struct IntegrationReport {
    /// Accepted states
    pub trajectory: Trajectory,
    /// How the run ended
    pub termination: Termination,
    /// Step counters
    pub stats: Stats,
}

/// Adaptive RKF45 integrator for one body
///
/// # Example
/// ```
/// use rkf45::{Integrator, IntegratorConfig, InverseSquare, State, StopReason, Vec2};
///
/// let force = InverseSquare::new(1.0);
/// let initial = State::new(Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0), 0.0);
/// let config = IntegratorConfig::new(1e-10)
///     .with_step_limits(0.01, 1e-9, 0.5)
///     .with_end_time(std::f64::consts::TAU);
///
/// let mut integrator = Integrator::new(config, force, initial).unwrap();
/// assert_eq!(integrator.run().unwrap(), StopReason::EndTime);
///
/// let back = integrator.state().position;
/// assert!((back - initial.position).norm() < 1e-6);
/// ```
#[derive(Debug, Clone)]
pub struct Integrator<F: ForceModel> {
    force: F,
    stepper: Rk45Stepper,
    controller: StepController,
    end_time: Option<f64>,
    max_steps: Option<u64>,
    state: State,
    dt: f64,
    trajectory: Trajectory,
    status: Status,
    failure: Option<IntegrationError>,
    stats: Stats,
}

impl<F: ForceModel> Integrator<F> {
    /// Set up a run starting at `initial`
    ///
    /// Fails with [`IntegrationError::InvalidConfiguration`] if the
    /// configuration or force model is invalid, or if the initial state is
    /// non-finite or sits exactly at the origin. No step is taken here.
    pub fn new(
        config: IntegratorConfig,
        force: F,
        initial: State,
    ) -> Result<Self, IntegrationError> {
        config.validate(initial.time)?;
        force.validate()?;

        if !initial.is_finite() {
            return Err(IntegrationError::invalid("initial state must be finite"));
        }
        if initial.distance() == 0.0 {
            return Err(IntegrationError::invalid(
                "initial position must have non-zero magnitude",
            ));
        }

        let controller = config.controller();
        Ok(Self {
            force,
            stepper: config.stepper(),
            dt: controller.clamp_dt(config.initial_dt),
            controller,
            end_time: config.end_time,
            max_steps: config.max_steps,
            state: initial,
            trajectory: Trajectory::new(initial),
            status: Status::Running,
            failure: None,
            stats: Stats::default(),
        })
    }

    /// Current (last accepted) state
    pub fn state(&self) -> &State {
        &self.state
    }

    /// Step size the next attempt will use (before clipping to the end time)
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Lifecycle status
    pub fn status(&self) -> Status {
        self.status
    }

    /// The error that ended the run, if it failed
    pub fn failure(&self) -> Option<&IntegrationError> {
        self.failure.as_ref()
    }

    /// Accepted states so far
    pub fn trajectory(&self) -> &Trajectory {
        &self.trajectory
    }

    /// Step counters
    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    /// The force model driving this run
    pub fn force(&self) -> &F {
        &self.force
    }

    /// Make one step attempt
    ///
    /// Returns `Ok(None)` once the run has stopped, and the same error
    /// again on every call after a failure. A rejected attempt returns
    /// `Ok(Some(result))` with `result.accepted == false` and leaves the
    /// state and trajectory untouched.
    pub fn step(&mut self) -> Result<Option<StepResult>, IntegrationError> {
        match self.status {
            Status::Running => {}
            Status::Stopped(_) => return Ok(None),
            Status::Failed => return Err(self.stored_failure()),
        }

        let t = self.state.time;
        // Clip the last step so it lands exactly on the end time
        let (dt, landing) = match self.end_time {
            Some(end) if self.dt >= end - t => (end - t, Some(end)),
            _ => (self.dt, None),
        };

        let solution = match self.stepper.step(&self.force, &self.state, dt) {
            Ok(solution) => solution,
            Err(source) => return Err(self.fail(IntegrationError::Singularity { time: t, source })),
        };
        self.stats.force_evals += STAGES as u64;

        let decision = self.controller.decide(solution.error, dt);
        let mut result = StepResult {
            candidate: solution.fifth,
            embedded: solution.fourth,
            error: solution.error,
            dt,
            next_dt: decision.next_dt().unwrap_or(dt),
            accepted: decision.is_accepted(),
        };

        match decision {
            StepDecision::Accept { next_dt } => {
                let mut next = solution.fifth;
                if let Some(end) = landing {
                    next.time = end;
                }

                if !next.is_finite() {
                    return Err(self.fail(IntegrationError::NonFiniteState { time: t }));
                }
                if next.time <= t {
                    return Err(self.fail(IntegrationError::TimeUnderflow { time: t, dt }));
                }

                self.state = next;
                self.trajectory.push(next, StepRecord { dt, error: solution.error });
                self.dt = next_dt;
                self.stats.accepted_steps += 1;
                result.candidate = next;

                self.check_stop();
            }
            StepDecision::Reject { retry_dt } => {
                debug!(t, dt, error = solution.error, retry_dt, "step rejected");
                self.dt = retry_dt;
                self.stats.rejected_steps += 1;
            }
            StepDecision::Exhausted => {
                self.stats.rejected_steps += 1;
                return Err(self.fail(IntegrationError::NonConvergence {
                    time: t,
                    dt,
                    error: solution.error,
                }));
            }
        }

        Ok(Some(result))
    }

    /// Attempt steps until one is accepted
    ///
    /// Returns the newly accepted state, or `Ok(None)` if the run had
    /// already stopped.
    pub fn advance(&mut self) -> Result<Option<State>, IntegrationError> {
        loop {
            match self.step()? {
                Some(result) if result.accepted => return Ok(Some(self.state)),
                Some(_) => continue,
                None => return Ok(None),
            }
        }
    }

    /// Integrate until a stop condition is reached or the run fails
    pub fn run(&mut self) -> Result<StopReason, IntegrationError> {
        self.run_with(|_| false)
    }

    /// Integrate, asking `cancel` at every step boundary whether to stop
    ///
    /// `cancel` sees the last accepted state and is never called in the
    /// middle of a step, so a cancelled run leaves a consistent trajectory.
    pub fn run_with<C>(&mut self, mut cancel: C) -> Result<StopReason, IntegrationError>
    where
        C: FnMut(&State) -> bool,
    {
        loop {
            match self.status {
                Status::Stopped(reason) => return Ok(reason),
                Status::Failed => return Err(self.stored_failure()),
                Status::Running => {}
            }

            if cancel(&self.state) {
                self.stop(StopReason::Cancelled);
                continue;
            }

            self.advance()?;
        }
    }

    /// Finish the run and hand over its results
    pub fn into_report(self) -> IntegrationReport {
        let termination = match (self.status, self.failure) {
            (Status::Stopped(reason), _) => Termination::Stopped(reason),
            (Status::Failed, Some(error)) => Termination::Failed {
                error,
                at: self.state,
            },
            _ => Termination::Incomplete,
        };

        IntegrationReport {
            trajectory: self.trajectory,
            termination,
            stats: self.stats,
        }
    }

    fn check_stop(&mut self) {
        if let Some(end) = self.end_time {
            if self.state.time >= end {
                self.stop(StopReason::EndTime);
                return;
            }
        }
        if let Some(max) = self.max_steps {
            if self.stats.accepted_steps >= max {
                self.stop(StopReason::MaxSteps);
            }
        }
    }

    fn stop(&mut self, reason: StopReason) {
        info!(
            ?reason,
            t = self.state.time,
            accepted = self.stats.accepted_steps,
            rejected = self.stats.rejected_steps,
            "integration stopped"
        );
        self.status = Status::Stopped(reason);
    }

    fn fail(&mut self, error: IntegrationError) -> IntegrationError {
        warn!(t = self.state.time, %error, "integration failed");
        self.status = Status::Failed;
        self.failure = Some(error.clone());
        error
    }

    fn stored_failure(&self) -> IntegrationError {
        self.failure
            .clone()
            .unwrap_or_else(|| IntegrationError::invalid("run failed without a recorded error"))
    }
}
