//! Fixed-step time integrator for the simulation
//!
//! Velocity-Verlet driven by `ForceSet` and `Parameters`. Forces are
//! converted to accelerations per body (`a = f / m`) and the static
//! anchor is never advanced.

use super::states::{World, NVec2};
use super::forces::ForceSet;
use super::params::Parameters;

/// Advance the world by one step using velocity-Verlet
/// Uses two force evaluations per step and updates positions, velocities,
/// and `world.t` in-place based on `params.h0`
///
/// All pair forces for a step are accumulated before any body moves
/// (accumulate-then-integrate). Bodies flagged `anchor` are skipped:
/// whatever force they accumulated is discarded
pub fn verlet_step(world: &mut World, forces: &ForceSet, params: &Parameters) {
    let n = world.bodies.len();
    if n == 0 { // no bodies, return
        return;
    }

    let dt = params.h0; // time step dt
    let half_dt = 0.5 * dt; // half step dt/2, half update for verlet

    // f_old[i] will hold f_n for body i at the current time t = world.t
    let mut f_old = vec![NVec2::zeros(); n];
    forces.accumulate_forces(world.t, &*world, &mut f_old);

    // Kick: v_n+1/2 = v_n + (1/2 * dt) * f_n / m
    for (b, f) in world.bodies.iter_mut().zip(f_old.iter()) {
        if b.anchor { // static body, accumulated force is discarded
            continue;
        }
        b.v += half_dt * (*f / b.m);
    }

    // Drift: x_n+1 = x_n + dt * v_n+1/2
    for b in world.bodies.iter_mut() {
        if b.anchor {
            continue;
        }
        b.x += dt * b.v;
    }

    // Increment the system time by one full step
    world.t += dt;

    // Recompute forces at the new time and positions x_n+1
    let mut f_new = vec![NVec2::zeros(); n];
    forces.accumulate_forces(world.t, &*world, &mut f_new);

    // Finish the velocity update: v_n+1 = v_n+1/2 + (1/2 * dt) * f_n+1 / m
    for (b, f) in world.bodies.iter_mut().zip(f_new.iter()) {
        if b.anchor {
            continue;
        }
        b.v += half_dt * (*f / b.m);
    }
}
