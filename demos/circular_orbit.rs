//! Circular orbit: return-to-start and energy conservation check.
//!
//! Propagates a unit circular orbit (μ = 1, r = 1) for one period and
//! reports how closely the body returns to its starting point.
//!
//! Run with:
//!   cargo run --example circular_orbit

use rkf45::{Integrator, IntegratorConfig, InverseSquare, State, Vec2};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let force = InverseSquare::new(1.0);
    let r0 = 1.0;
    let v0 = force.circular_speed(r0);
    let initial = State::new(Vec2::new(r0, 0.0), Vec2::new(0.0, v0), 0.0);
    let period = force.orbital_period(r0);

    let config = IntegratorConfig::new(1e-10)
        .with_step_limits(1e-3, 1e-12, 1.0)
        .with_end_time(period);
    let mut integrator = Integrator::new(config, force, initial)?;
    integrator.run()?;

    let last = integrator.state();
    let pos_err = (last.position - initial.position).norm();
    let e0 = force.specific_energy(&initial);
    let ef = force.specific_energy(last);
    let stats = integrator.stats();

    println!("Circular Orbit (mu = 1, r = 1)");
    println!("  Velocity:  {v0:.6}");
    println!("  Period:    {period:.6}");
    println!();
    println!("  Final time: {:.6}", last.time);
    println!("  Position error (return to start): {pos_err:.2e}");
    println!(
        "  Energy drift: {:.2e}  (relative: {:.2e})",
        (ef - e0).abs(),
        ((ef - e0) / e0).abs()
    );
    println!();
    println!("  Accepted steps: {}", stats.accepted_steps);
    println!("  Rejected steps: {}", stats.rejected_steps);
    println!("  Force evals:    {}", stats.force_evals);

    Ok(())
}
