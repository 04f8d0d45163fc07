//! Halley's comet: one revolution from the 1986 perihelion.
//!
//! Units are AU and years. Starting from the measured perihelion distance
//! and speed, the comet should reach aphelion near 35 AU about 35 years
//! later, with the step size ranging over several orders of magnitude
//! between perihelion and aphelion.
//!
//! Run with:
//!   cargo run --example halley_comet
//!   RUST_LOG=rkf45=debug cargo run --example halley_comet   # show rejected steps

use rkf45::{Integrator, IntegratorConfig, InverseSquare, State, Vec2};

/// G·M of the Sun in AU³/yr²
fn gm_sun() -> f64 {
    let seconds_per_year: f64 = 31_556_952.0;
    let meters_per_au: f64 = 149_597_870_691.0;
    1.327_124_400_42e20 * seconds_per_year.powi(2) / meters_per_au.powi(3)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // 122 000 mph at 0.5871 AU
    let v_perihelion = 122_000.0 / 10_611.393_524;
    let r_perihelion = 0.5871;

    let force = InverseSquare::new(gm_sun());
    let initial = State::new(
        Vec2::new(r_perihelion, 0.0),
        Vec2::new(0.0, v_perihelion),
        0.0,
    );

    let config = IntegratorConfig::new(1e-12)
        .with_step_limits(1e-6, 5e-14, 10.0)
        .with_end_time(70.0);
    let mut integrator = Integrator::new(config, force, initial)?;
    integrator.run()?;

    let trajectory = integrator.trajectory();
    let aphelion = trajectory.aphelion();
    let stats = integrator.stats();
    let (dt_min, dt_max) = trajectory.dt_range().unwrap_or((0.0, 0.0));

    println!("Comet Halley");
    println!("  GM:         {:.6} AU^3/yr^2", force.mu);
    println!("  Perihelion: {r_perihelion} AU at {v_perihelion:.4} AU/yr");
    println!();
    println!(
        "  Aphelion:   {:.3} AU at t = {:.2} yr",
        aphelion.distance(),
        aphelion.time
    );
    println!("  Final time: {:.3} yr", integrator.state().time);
    println!(
        "  Energy drift (relative): {:.2e}",
        trajectory.max_energy_drift(&force)
    );
    println!();
    println!("  Accepted steps: {}", stats.accepted_steps);
    println!("  Rejected steps: {}", stats.rejected_steps);
    println!("  Step size:      {dt_min:.3e} .. {dt_max:.3e} yr");

    Ok(())
}
