//! Common test utilities for integration tests.

#![allow(dead_code)]

use rkf45::{InverseSquare, State, Vec2};

/// Gravitational parameter of the Sun in AU³/yr²
pub const GM_SUN_AU_YR: f64 = 1.327_124_400_42e20 * (31_556_952.0 * 31_556_952.0)
    / (149_597_870_691.0f64 * 149_597_870_691.0 * 149_597_870_691.0);

/// Halley's comet at perihelion: distance in AU
pub const HALLEY_PERIHELION_AU: f64 = 0.5871;

/// Halley's comet at perihelion: 122 000 mph in AU/yr
pub const HALLEY_PERIHELION_SPEED: f64 = 122_000.0 / 10_611.393_524;

/// Circular orbit of radius `r` around a body with parameter `mu`.
pub fn circular_orbit(mu: f64, r: f64) -> State {
    State::new(Vec2::new(r, 0.0), Vec2::new(0.0, (mu / r).sqrt()), 0.0)
}

/// Elliptical orbit starting at perihelion.
pub fn elliptical_orbit(mu: f64, perihelion: f64, eccentricity: f64) -> State {
    let a = semi_major_axis(perihelion, eccentricity);
    let v = (mu * (2.0 / perihelion - 1.0 / a)).sqrt();
    State::new(Vec2::new(perihelion, 0.0), Vec2::new(0.0, v), 0.0)
}

/// Semi-major axis from perihelion distance and eccentricity.
pub fn semi_major_axis(perihelion: f64, eccentricity: f64) -> f64 {
    perihelion / (1.0 - eccentricity)
}

/// Halley's comet at its 1986 perihelion, heliocentric.
pub fn halley() -> (InverseSquare, State) {
    (
        InverseSquare::new(GM_SUN_AU_YR),
        State::new(
            Vec2::new(HALLEY_PERIHELION_AU, 0.0),
            Vec2::new(0.0, HALLEY_PERIHELION_SPEED),
            0.0,
        ),
    )
}

/// Install a test subscriber so `RUST_LOG=rkf45=debug` shows step traces.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
