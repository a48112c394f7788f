//! Numerical and physical parameters for the simulation
//!
//! `Parameters` holds runtime settings:
//! - integration step size (`h0`),
//! - gravitational constant and coincidence floor (`G`, `eps2`),
//! - random seed for reproducible spawns
//!
//! `Viewport` is the rectangle bodies are spawned over and the window
//! the viewer opens.

use crate::simulation::states::NVec2;

#[derive(Debug, Clone)]
pub struct Parameters {
    pub h0: f64, // step size
    pub seed: u64, // deterministic seed
    pub eps2: f64, // squared-distance floor for coincident bodies
    pub G: f64, // gravitational constant
}

/// Spawn region and window dimensions
/// Simulation coordinates have the origin at the top-left corner
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    /// Center point, where the anchor sits by default
    pub fn center(&self) -> NVec2 {
        NVec2::new(0.5 * self.width, 0.5 * self.height)
    }
}
