//! Accepted-state history of a run
//!
//! The trajectory is append-only and owned by the integrator; callers get a
//! read-only view. Alongside every accepted state after the first it keeps
//! the step size and error estimate that produced it, which is what the
//! step-size and error plots of a run are drawn from.

use serde::{Deserialize, Serialize};

use crate::force::InverseSquare;
use crate::state::State;

/// Step size and error estimate of one accepted step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepRecord {
    /// Step size that was taken
    pub dt: f64,
    /// Error estimate of the accepted step
    pub error: f64,
}

/// Ordered sequence of accepted states, strictly increasing in time
///
/// Never empty: it always starts with the initial state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    states: Vec<State>,
    steps: Vec<StepRecord>,
}

impl Trajectory {
    pub(crate) fn new(initial: State) -> Self {
        Self {
            states: vec![initial],
            steps: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, state: State, record: StepRecord) {
        debug_assert!(state.time > self.last().time);
        self.states.push(state);
        self.steps.push(record);
    }

    /// All accepted states, initial state first
    pub fn states(&self) -> &[State] {
        &self.states
    }

    /// One record per accepted step; `steps()[i]` led to `states()[i + 1]`
    pub fn steps(&self) -> &[StepRecord] {
        &self.steps
    }

    /// Number of states, including the initial one
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Always false; present for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// The initial state
    pub fn first(&self) -> &State {
        &self.states[0]
    }

    /// The most recent accepted state
    pub fn last(&self) -> &State {
        &self.states[self.states.len() - 1]
    }

    /// Iterate over the states
    pub fn iter(&self) -> std::slice::Iter<'_, State> {
        self.states.iter()
    }

    /// Times of all states
    pub fn times(&self) -> impl Iterator<Item = f64> + '_ {
        self.states.iter().map(|s| s.time)
    }

    /// Time covered from the initial to the last state
    pub fn duration(&self) -> f64 {
        self.last().time - self.first().time
    }

    /// State farthest from the central body
    pub fn aphelion(&self) -> &State {
        self.states
            .iter()
            .max_by(|a, b| a.distance().total_cmp(&b.distance()))
            .unwrap_or(self.first())
    }

    /// State closest to the central body
    pub fn perihelion(&self) -> &State {
        self.states
            .iter()
            .min_by(|a, b| a.distance().total_cmp(&b.distance()))
            .unwrap_or(self.first())
    }

    /// Largest relative deviation of specific energy from its initial value
    ///
    /// A parabolic start has zero energy, so the drift is absolute there.
    pub fn max_energy_drift(&self, force: &InverseSquare) -> f64 {
        let e0 = force.specific_energy(self.first());
        let scale = if e0 == 0.0 { 1.0 } else { e0.abs() };
        self.states
            .iter()
            .map(|s| (force.specific_energy(s) - e0).abs() / scale)
            .fold(0.0, f64::max)
    }

    /// Smallest and largest accepted step size, if any step was taken
    pub fn dt_range(&self) -> Option<(f64, f64)> {
        let mut iter = self.steps.iter().map(|r| r.dt);
        let first = iter.next()?;
        Some(iter.fold((first, first), |(lo, hi), dt| (lo.min(dt), hi.max(dt))))
    }

    /// Consume the trajectory, returning the states
    pub fn into_states(self) -> Vec<State> {
        self.states
    }
}

impl<'a> IntoIterator for &'a Trajectory {
    type Item = &'a State;
    type IntoIter = std::slice::Iter<'a, State>;

    fn into_iter(self) -> Self::IntoIter {
        self.states.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::Vec2;

    fn state(x: f64, t: f64) -> State {
        State::new(Vec2::new(x, 0.0), Vec2::new(0.0, 1.0), t)
    }

    fn sample() -> Trajectory {
        let mut traj = Trajectory::new(state(1.0, 0.0));
        traj.push(state(3.0, 0.5), StepRecord { dt: 0.5, error: 1e-9 });
        traj.push(state(0.5, 0.7), StepRecord { dt: 0.2, error: 2e-9 });
        traj
    }

    #[test]
    fn test_starts_with_initial_state() {
        let traj = Trajectory::new(state(1.0, 2.0));
        assert_eq!(traj.len(), 1);
        assert!(!traj.is_empty());
        assert_eq!(traj.first(), traj.last());
        assert!(traj.steps().is_empty());
        assert_eq!(traj.dt_range(), None);
        assert_eq!(traj.duration(), 0.0);
    }

    #[test]
    fn test_extrema() {
        let traj = sample();
        assert_eq!(traj.aphelion().position.x, 3.0);
        assert_eq!(traj.perihelion().position.x, 0.5);
        assert_eq!(traj.dt_range(), Some((0.2, 0.5)));
        assert_eq!(traj.times().collect::<Vec<_>>(), vec![0.0, 0.5, 0.7]);
        assert_eq!(traj.duration(), 0.7);
    }

    #[test]
    fn test_energy_drift_of_fixed_radius_is_zero() {
        let force = InverseSquare::new(1.0);
        let mut traj = Trajectory::new(state(1.0, 0.0));
        traj.push(
            State::new(Vec2::new(0.0, 1.0), Vec2::new(-1.0, 0.0), 1.0),
            StepRecord { dt: 1.0, error: 0.0 },
        );
        assert_eq!(traj.max_energy_drift(&force), 0.0);
    }

    #[test]
    fn test_energy_drift_of_parabolic_start_is_absolute() {
        // |v| = sqrt(2 mu / r) gives zero specific energy
        let force = InverseSquare::new(2.0);
        let mut traj = Trajectory::new(State::new(Vec2::new(1.0, 0.0), Vec2::new(0.0, 2.0), 0.0));
        traj.push(
            State::new(Vec2::new(2.0, 0.0), Vec2::new(0.0, 1.0), 1.0),
            StepRecord { dt: 1.0, error: 0.0 },
        );

        // E = 0.5 - 1 = -0.5 at the second state
        let drift = traj.max_energy_drift(&force);
        assert!(drift.is_finite());
        assert!((drift - 0.5).abs() < 1e-15, "drift = {}", drift);
    }

    #[test]
    fn test_iteration() {
        let traj = sample();
        let xs: Vec<f64> = (&traj).into_iter().map(|s| s.position.x).collect();
        assert_eq!(xs, vec![1.0, 3.0, 0.5]);
        assert_eq!(traj.clone().into_states().len(), 3);
    }
}
