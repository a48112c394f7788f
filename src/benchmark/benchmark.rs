use std::time::Instant;
use crate::simulation::states::{World, BodySpec, NVec2};
use crate::simulation::params::Parameters;
use crate::simulation::forces::{ForceSet, Force, NewtonianGravity};
use crate::simulation::integrator::verlet_step;

/// Build a world of `n` attractor bodies on deterministic positions
fn bench_world(n: usize) -> World {
    let mut world = World::new();

    for i in 0..n {
        let i_f = i as f64;
        // deterministic positions, no rand needed
        let x = NVec2::new(
            (i_f * 0.37).sin() * 500.0,
            (i_f * 0.13).cos() * 500.0,
        );

        world.insert(BodySpec {
            x,
            v: NVec2::zeros(),
            m: 1.0,
            radius: 1.0,
            anchor: false,
            attractor: true,
        });
    }

    world
}

fn bench_params() -> Parameters {
    Parameters {
        h0: 0.016,
        seed: 42,
        eps2: 1e-4,
        G: 9e-3,
    }
}

pub fn bench_gravity() {
    // Different population sizes to test
    let ns = [200, 400, 800, 1600, 3200, 6400];

    for n in ns {
        let parameters = bench_params();
        let world = bench_world(n);
        let mut out = vec![NVec2::zeros(); n];

        let gravity = NewtonianGravity {
            G: parameters.G,
            eps2: parameters.eps2,
        };

        // Warm up
        gravity.force(0.0, &world, &mut out);

        // Time the direct pairwise kernel
        let t0 = Instant::now();
        gravity.force(0.0, &world, &mut out);
        let dt_pair = t0.elapsed().as_secs_f64();

        println!("N = {n:5}, pairwise gravity = {:8.6} s", dt_pair);
    }
}

pub fn bench_step() {
    // Full verlet step (two force evaluations) per population size
    let ns = [200, 400, 800, 1600, 3200];
    let steps = 10;

    for n in ns {
        let parameters = bench_params();
        let mut world = bench_world(n);

        let forces = ForceSet::new().with(NewtonianGravity {
            G: parameters.G,
            eps2: parameters.eps2,
        });

        // Warm up
        verlet_step(&mut world, &forces, &parameters);

        let t0 = Instant::now();
        for _ in 0..steps {
            verlet_step(&mut world, &forces, &parameters);
        }
        let per_step = t0.elapsed().as_secs_f64() / steps as f64;

        println!("N = {n:5}, verlet step = {:8.6} s", per_step);
    }
}
