//! Integration tests for parallel batch propagation.

#![cfg(feature = "parallel")]

mod common;

use rkf45::{
    final_separations, perturbed_states, propagate_batch, Integrator, IntegratorConfig,
    StopReason, Termination,
};

#[test]
fn test_batch_matches_sequential_runs() {
    let (force, nominal) = common::halley();
    let config = IntegratorConfig::new(1e-8)
        .with_step_limits(1e-3, 1e-12, 10.0)
        .with_end_time(10.0);
    let states = perturbed_states(&nominal, &[0.0, 0.001, -0.001, 0.005]);

    let batch = propagate_batch(&force, &config, &states);
    assert_eq!(batch.len(), states.len());

    for (initial, result) in states.iter().zip(&batch) {
        let report = result.as_ref().unwrap();
        assert_eq!(report.termination, Termination::Stopped(StopReason::EndTime));

        let mut integrator = Integrator::new(config.clone(), force, *initial).unwrap();
        integrator.run().unwrap();
        assert_eq!(*report, integrator.into_report());
    }
}

#[test]
fn test_half_percent_error_changes_the_orbit() {
    let (force, nominal) = common::halley();
    let config = IntegratorConfig::new(1e-9)
        .with_step_limits(1e-3, 1e-12, 10.0)
        .with_end_time(70.0);
    let states = perturbed_states(&nominal, &[0.0, 0.005]);

    let reports: Vec<_> = propagate_batch(&force, &config, &states)
        .into_iter()
        .map(Result::unwrap)
        .collect();

    // A 0.5% faster comet at perihelion is on a much wider orbit
    let nominal_aphelion = reports[0].trajectory.aphelion().distance();
    let perturbed_aphelion = reports[1].trajectory.aphelion().distance();
    println!(
        "Aphelion: nominal {:.2} AU, perturbed {:.2} AU",
        nominal_aphelion, perturbed_aphelion
    );
    assert!(perturbed_aphelion > nominal_aphelion + 1.0);

    let separations = final_separations(&reports);
    assert_eq!(separations[0], 0.0);
    assert!(separations[1] > 0.1);
}
