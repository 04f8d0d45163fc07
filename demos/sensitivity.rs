//! Sensitivity of Halley's orbit to a 0.5% error in the initial state.
//!
//! Runs the nominal comet and copies with position and velocity scaled by
//! ±0.1% and ±0.5% in parallel, then compares where each ends up.
//!
//! Run with:
//!   cargo run --example sensitivity

use rkf45::{
    final_separations, perturbed_states, propagate_batch, IntegratorConfig, InverseSquare, State,
    Termination, Vec2,
};

const GM_SUN: f64 = 39.475_305_216;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let force = InverseSquare::new(GM_SUN);
    let nominal = State::new(
        Vec2::new(0.5871, 0.0),
        Vec2::new(0.0, 122_000.0 / 10_611.393_524),
        0.0,
    );

    let fractions = [0.0, -0.005, -0.001, 0.001, 0.005];
    let states = perturbed_states(&nominal, &fractions);
    let config = IntegratorConfig::new(1e-10)
        .with_step_limits(1e-6, 1e-12, 100.0)
        .with_end_time(150.0);

    let reports = propagate_batch(&force, &config, &states)
        .into_iter()
        .collect::<Result<Vec<_>, _>>()?;
    let separations = final_separations(&reports);

    println!("Halley sensitivity over 150 yr");
    println!(
        "  {:>8}  {:>12}  {:>12}  {:>10}  {}",
        "scale", "aphelion AU", "final sep AU", "steps", "outcome"
    );
    for ((fraction, report), sep) in fractions.iter().zip(&reports).zip(&separations) {
        let outcome = match &report.termination {
            Termination::Stopped(reason) => format!("{reason:?}"),
            Termination::Failed { error, .. } => error.to_string(),
            Termination::Incomplete => "incomplete".to_string(),
        };
        println!(
            "  {:>+7.1}%  {:>12.3}  {:>12.3}  {:>10}  {}",
            fraction * 100.0,
            report.trajectory.aphelion().distance(),
            sep,
            report.stats.accepted_steps,
            outcome
        );
    }

    Ok(())
}
