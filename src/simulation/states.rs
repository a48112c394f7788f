//! Core state types for the gravity simulation.
//!
//! Defines the body record and the world that owns it:
//! - `Body` with `NVec2` position/velocity, mass, radius, and the
//!   anchor/attractor capability flags
//! - `BodyId` stable identifiers that survive removals of other bodies
//! - `World` holding the live body set and the current simulation time `t`
//!
//! Spawn (`insert`) and removal are the only mutators of the body set;
//! everything else reads it.

use nalgebra::Vector2;
pub type NVec2 = Vector2<f64>;

/// Stable identifier for a body
/// Allocated monotonically by [`World`] and never reused, so an id held
/// across a removal either still names the same body or names nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub u64);

#[derive(Debug, Clone)]
pub struct Body {
    pub id: BodyId, // stable identity
    pub x: NVec2, // position
    pub v: NVec2, // velocity
    pub m: f64, // mass
    pub radius: f64, // collision/render footprint
    pub anchor: bool, // immovable high-mass body ("the sun"), exactly one exists
    pub attractor: bool, // participates in the pairwise gravity law
}

/// Everything needed to create a body except its id
/// The [`World`] assigns the id at insertion
#[derive(Debug, Clone)]
pub struct BodySpec {
    pub x: NVec2, // position
    pub v: NVec2, // velocity
    pub m: f64, // mass
    pub radius: f64, // collision/render footprint
    pub anchor: bool,
    pub attractor: bool,
}

#[derive(Debug, Clone, Default)]
pub struct World {
    pub bodies: Vec<Body>, // live body set
    pub t: f64, // time
    next_id: u64, // id allocator, monotonic
}

impl World {
    pub fn new() -> Self {
        Self {
            bodies: Vec::new(),
            t: 0.0,
            next_id: 0,
        }
    }

    /// Insert a body, assigning it a fresh id
    pub fn insert(&mut self, spec: BodySpec) -> BodyId {
        let id = BodyId(self.next_id);
        self.next_id += 1;
        self.bodies.push(Body {
            id,
            x: spec.x,
            v: spec.v,
            m: spec.m,
            radius: spec.radius,
            anchor: spec.anchor,
            attractor: spec.attractor,
        });
        id
    }

    /// Remove a body by id and return it
    /// Removing an id that is no longer live is a no-op returning `None`,
    /// so a second removal of the same body is harmless
    pub fn remove(&mut self, id: BodyId) -> Option<Body> {
        let i = self.bodies.iter().position(|b| b.id == id)?;
        Some(self.bodies.swap_remove(i))
    }

    pub fn get(&self, id: BodyId) -> Option<&Body> {
        self.bodies.iter().find(|b| b.id == id)
    }

    pub fn get_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.bodies.iter_mut().find(|b| b.id == id)
    }

    pub fn contains(&self, id: BodyId) -> bool {
        self.bodies.iter().any(|b| b.id == id)
    }

    /// The single anchor body, if one has been spawned
    pub fn anchor(&self) -> Option<&Body> {
        self.bodies.iter().find(|b| b.anchor)
    }

    /// Count of live non-anchor bodies
    pub fn planet_count(&self) -> usize {
        self.bodies.iter().filter(|b| !b.anchor).count()
    }
}
