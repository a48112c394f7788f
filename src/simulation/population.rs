//! Spawn/remove policy for the body population
//!
//! The population manager is the only writer of the body set besides
//! startup: it spawns the anchor and the initial planets, and turns each
//! step's collision batch into a list of intended mutations the driver
//! applies after the step.
//!
//! Under the `respawn` policy the live planet count never decreases
//! across a collision event: an anchor collision consumes one planet and
//! spawns one replacement, a planet-planet collision consumes two and
//! spawns two (one merge body carrying the mean mass, one fresh default).
//! Under the `static` policy collisions are not handled at all.

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;
use tracing::debug;

use crate::configuration::config::PolicyConfig;
use crate::simulation::engine::Engine;
use crate::simulation::params::Viewport;
use crate::simulation::states::{World, BodyId, BodySpec, NVec2};

/// Spawn parameters for the anchor and the planet population
#[derive(Debug, Clone)]
pub struct SpawnParams {
    pub count: usize, // initial planet count
    pub mass_range: (f64, f64), // planet mass, uniform
    pub speed_range: (f64, f64), // initial velocity components, uniform
    pub radius_scale: f64, // planet radius = mass * radius_scale
    pub viewport: Viewport, // spawn region and anchor placement
    pub anchor_mass: f64,
    pub anchor_radius: f64,
}

#[derive(Debug, Error)]
pub enum SpawnError {
    /// A caller-supplied mass must be strictly positive and finite,
    /// otherwise the force law's magnitude diverges instead of erroring
    #[error("invalid spawn mass {0}: must be finite and > 0")]
    InvalidMass(f64),
}

/// Intended change to the world, produced by
/// [`PopulationManager::handle_collisions`] and applied by the driver
/// between steps
#[derive(Debug, Clone)]
pub enum Mutation {
    Remove(BodyId),
    Spawn(BodySpec),
}

/// Apply a mutation list: removals first, then spawns
/// Removal of an id that is already gone is ignored
pub fn apply_mutations(world: &mut World, mutations: Vec<Mutation>) {
    for m in &mutations {
        if let Mutation::Remove(id) = m {
            world.remove(*id);
        }
    }
    for m in mutations {
        if let Mutation::Spawn(spec) = m {
            world.insert(spec);
        }
    }
}

/// Owner of spawn/remove decisions for the non-anchor population
pub struct PopulationManager {
    pub spawn: SpawnParams,
    rng: StdRng, // seeded, so runs are reproducible
}

impl PopulationManager {
    pub fn new(spawn: SpawnParams, seed: u64) -> Self {
        Self {
            spawn,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Insert the single static anchor at the viewport center
    /// Called exactly once, at startup
    pub fn spawn_anchor(&mut self, world: &mut World) -> BodyId {
        world.insert(BodySpec {
            x: self.spawn.viewport.center(),
            v: NVec2::zeros(),
            m: self.spawn.anchor_mass,
            radius: self.spawn.anchor_radius,
            anchor: true,
            attractor: true,
        })
    }

    /// Spawn one planet
    /// Position and mass default to random values in the configured
    /// ranges when omitted; velocity components are always random.
    /// A caller-supplied non-positive or non-finite mass is rejected
    /// and nothing is spawned
    pub fn spawn_planet(
        &mut self,
        world: &mut World,
        x: Option<NVec2>,
        m: Option<f64>,
    ) -> Result<BodyId, SpawnError> {
        if let Some(m) = m {
            if !(m.is_finite() && m > 0.0) {
                return Err(SpawnError::InvalidMass(m));
            }
        }
        let spec = self.planet_spec(x, m);
        Ok(world.insert(spec))
    }

    /// Startup population: `count` planets with default random parameters
    pub fn populate(&mut self, world: &mut World) {
        for _ in 0..self.spawn.count {
            let spec = self.planet_spec(None, None);
            world.insert(spec);
        }
    }

    /// Roll a planet spec, filling omitted position/mass with defaults
    fn planet_spec(&mut self, x: Option<NVec2>, m: Option<f64>) -> BodySpec {
        let (m_lo, m_hi) = self.spawn.mass_range;
        let (v_lo, v_hi) = self.spawn.speed_range;

        let m = m.unwrap_or_else(|| self.rng.gen_range(m_lo..m_hi));
        let x = x.unwrap_or_else(|| {
            NVec2::new(
                self.rng.gen_range(0.0..self.spawn.viewport.width),
                self.rng.gen_range(0.0..self.spawn.viewport.height),
            )
        });
        let v = NVec2::new(
            self.rng.gen_range(v_lo..v_hi),
            self.rng.gen_range(v_lo..v_hi),
        );

        BodySpec {
            x,
            v,
            m,
            radius: m * self.spawn.radius_scale,
            anchor: false,
            attractor: true,
        }
    }

    /// Turn one step's collision batch into the mutations it implies
    ///
    /// Reads the world, never writes it. Each body is consumed at most
    /// once per batch: a pair in which either body was already consumed
    /// earlier in the same batch is skipped whole, so a three-body
    /// pileup reported as two pairs does not double-process the shared
    /// body
    pub fn handle_collisions(
        &mut self,
        engine: &Engine,
        world: &World,
        batch: &[(BodyId, BodyId)],
    ) -> Vec<Mutation> {
        let mut out = Vec::new();

        // Static policy: collisions are not handled at all
        if matches!(engine.policy, PolicyConfig::Static) {
            return out;
        }

        let mut consumed: HashSet<BodyId> = HashSet::new();
        for &(a, b) in batch {
            if consumed.contains(&a) || consumed.contains(&b) {
                continue;
            }
            // Stale ids in the batch name nothing and are skipped
            let (Some(ba), Some(bb)) = (world.get(a), world.get(b)) else {
                continue;
            };

            if ba.anchor && bb.anchor {
                // only one anchor exists
                continue;
            }

            if ba.anchor || bb.anchor {
                // The anchor survives unconditionally; its partner is
                // consumed and replaced by one fresh default planet
                let planet = if ba.anchor { bb } else { ba };
                debug!(id = planet.id.0, "planet consumed by anchor");
                consumed.insert(planet.id);
                out.push(Mutation::Remove(planet.id));
                out.push(Mutation::Spawn(self.planet_spec(None, None)));
            } else {
                // Planet-planet: remove both, spawn a merge body at the
                // first body's position carrying the mean mass, plus one
                // fully default replacement
                debug!(a = a.0, b = b.0, "planets merged");
                consumed.insert(a);
                consumed.insert(b);
                let merged_x = ba.x;
                let merged_m = 0.5 * (ba.m + bb.m);
                out.push(Mutation::Remove(a));
                out.push(Mutation::Remove(b));
                out.push(Mutation::Spawn(self.planet_spec(Some(merged_x), Some(merged_m))));
                out.push(Mutation::Spawn(self.planet_spec(None, None)));
            }
        }

        out
    }
}
