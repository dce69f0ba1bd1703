use std::hint::black_box;
use std::time::Instant;

use crate::simulation::analytical::{analytical, time_grid, FieldScalars};
use crate::simulation::fields::FieldConfig;
use crate::simulation::forces::{Acceleration, Classical, Kinematics, Relativistic};
use crate::simulation::integrator::integrate;
use crate::simulation::params::{IntegrationConfig, ParticleParameters};
use crate::simulation::states::{NVec3, ParticleState};

/// Proton in a 1 T field along z with a weak in-plane E
fn make_setup() -> (ParticleParameters, ParticleState, FieldConfig) {
    let particle = ParticleParameters::new(1.602_176_634e-19, 1.672_621_924e-27);
    let state = ParticleState::launch(1.0e6, 0.3);
    let fields = FieldConfig::crossed(1.0e3, 1.0);
    (particle, state, fields)
}

pub fn bench_kinematics() {
    // Number of acceleration evaluations per law
    let ns = [10_000, 100_000, 1_000_000];
    let (particle, state, fields) = make_setup();

    let relativistic = Relativistic::default();
    let classical = Classical;

    for n in ns {
        // deterministic velocities, no rand needed
        let velocities: Vec<NVec3> = (0..n)
            .map(|i| {
                let i_f = i as f64;
                state.velocity * (1.0 + 0.5 * (i_f * 0.37).sin())
            })
            .collect();

        // Warm up
        for v in velocities.iter().take(100) {
            black_box(relativistic.acceleration(&particle, v, &fields.e, &fields.b));
            black_box(classical.acceleration(&particle, v, &fields.e, &fields.b));
        }

        // Time relativistic
        let t0 = Instant::now();
        for v in &velocities {
            black_box(relativistic.acceleration(&particle, v, &fields.e, &fields.b));
        }
        let dt_rel = t0.elapsed().as_secs_f64();

        // Time classical
        let t1 = Instant::now();
        for v in &velocities {
            black_box(classical.acceleration(&particle, v, &fields.e, &fields.b));
        }
        let dt_cls = t1.elapsed().as_secs_f64();

        println!("N = {n:8}, relativistic = {:8.6} s, classical = {:8.6} s", dt_rel, dt_cls);
    }
}

pub fn bench_rk4() {
    // Step budgets to test
    let ns = [1_000, 10_000, 100_000];
    let (particle, state, fields) = make_setup();

    for n in ns {
        let relativistic = IntegrationConfig::new(1.0e-11, n);
        let classical = relativistic.with_kinematics(Kinematics::Classical);

        // Warm-up
        black_box(
            integrate(&particle, &state, &fields, &IntegrationConfig::new(1.0e-11, 100))
                .expect("valid bench config"),
        );

        let t0 = Instant::now();
        let rel = integrate(&particle, &state, &fields, &relativistic).expect("valid bench config");
        let rel_per_step = t0.elapsed().as_secs_f64() / n as f64;

        let t1 = Instant::now();
        let cls = integrate(&particle, &state, &fields, &classical).expect("valid bench config");
        let cls_per_step = t1.elapsed().as_secs_f64() / n as f64;

        black_box((rel.len(), cls.len()));

        println!(
            "steps = {:7}, relativistic step = {:10.3e} s,   classical step = {:10.3e} s",
            n, rel_per_step, cls_per_step
        );
    }
}

/// Benchmark rk4 against the closed form for a range of sample counts
/// Paste output directly into excel to graph
pub fn bench_rk4_curve() {
    println!("samples,rk4_ms,analytical_ms");

    let (particle, state, fields) = make_setup();
    let scalars = FieldScalars::new(fields.e.x, fields.b.z);
    let dt = 1.0e-11;

    for n in (5_000..=100_000).step_by(5_000) {
        let config = IntegrationConfig::new(dt, n).with_kinematics(Kinematics::Classical);
        let times = time_grid(n as f64 * dt, n + 1);

        let t0 = Instant::now();
        let numerical = integrate(&particle, &state, &fields, &config).expect("valid bench config");
        let ms_rk4 = t0.elapsed().as_secs_f64() * 1000.0;

        let t1 = Instant::now();
        let closed = analytical(&particle, 1.0e6, 0.3, &scalars, &times).expect("valid bench config");
        let ms_analytical = t1.elapsed().as_secs_f64() * 1000.0;

        black_box((numerical.len(), closed.len()));

        println!("{},{:.6},{:.6}", n + 1, ms_rk4, ms_analytical);
    }
}
