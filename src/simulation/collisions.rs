//! Circle-overlap collision detection
//!
//! Direct pairwise test producing the per-step batch of colliding pairs
//! consumed by the population manager. Pairs are reported at most once
//! per step, in storage order.

use crate::simulation::states::{World, BodyId};

/// Detect all overlapping body pairs
/// A pair collides when its centers are closer than the summed radii
pub fn detect_collisions(world: &World) -> Vec<(BodyId, BodyId)> {
    let n = world.bodies.len();
    let mut batch = Vec::new();

    for i in 0..n {
        let bi = &world.bodies[i];
        for j in (i + 1)..n {
            let bj = &world.bodies[j];
            let r = bj.x - bi.x;
            let reach = bi.radius + bj.radius;
            if r.dot(&r) < reach * reach {
                batch.push((bi.id, bj.id));
            }
        }
    }

    batch
}
