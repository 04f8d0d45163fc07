use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rkf45::{Integrator, IntegratorConfig, InverseSquare, Rk45Stepper, State, Vec2};

/// Gravitational parameter of the Sun in AU³/yr²
const GM_SUN: f64 = 39.475_305_216;

fn bench_single_step(c: &mut Criterion) {
    let force = InverseSquare::new(1.0);
    let state = State::new(Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0), 0.0);
    let stepper = Rk45Stepper::default();

    c.bench_function("rk45_single_step", |b| {
        b.iter(|| stepper.step(&force, black_box(&state), black_box(0.01)).unwrap())
    });
}

fn bench_circular_orbit_1period(c: &mut Criterion) {
    let force = InverseSquare::new(1.0);
    let initial = State::new(Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0), 0.0);
    let period = force.orbital_period(1.0);

    c.bench_function("circular_orbit_1period", |b| {
        b.iter(|| {
            let config = IntegratorConfig::new(1e-10)
                .with_step_limits(1e-3, 1e-12, 1.0)
                .with_end_time(period);
            let mut integrator = Integrator::new(config, force, black_box(initial)).unwrap();
            integrator.run().unwrap()
        })
    });
}

fn bench_halley_70_years(c: &mut Criterion) {
    let force = InverseSquare::new(GM_SUN);
    let initial = State::new(
        Vec2::new(0.5871, 0.0),
        Vec2::new(0.0, 122_000.0 / 10_611.393_524),
        0.0,
    );

    c.bench_function("halley_70_years", |b| {
        b.iter(|| {
            let config = IntegratorConfig::new(1e-9)
                .with_step_limits(1e-3, 1e-12, 10.0)
                .with_end_time(70.0);
            let mut integrator = Integrator::new(config, force, black_box(initial)).unwrap();
            integrator.run().unwrap()
        })
    });
}

criterion_group!(
    benches,
    bench_single_step,
    bench_circular_orbit_1period,
    bench_halley_70_years
);
criterion_main!(benches);
