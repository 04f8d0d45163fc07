//! Phase-space state of the body

use serde::{Deserialize, Serialize};

use crate::vector::Vec2;

/// Position and velocity of the body at a given time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct State {
    /// Position relative to the central body
    pub position: Vec2,
    /// Velocity
    pub velocity: Vec2,
    /// Time at which this state holds
    pub time: f64,
}

impl State {
    /// Create a state from position, velocity and time
    pub const fn new(position: Vec2, velocity: Vec2, time: f64) -> Self {
        Self {
            position,
            velocity,
            time,
        }
    }

    /// Distance from the central body
    pub fn distance(&self) -> f64 {
        self.position.norm()
    }

    /// Speed, `|v|`
    pub fn speed(&self) -> f64 {
        self.velocity.norm()
    }

    /// True if every component and the time are finite
    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.velocity.is_finite() && self.time.is_finite()
    }
}
