//! Force contributors for the gravity simulation
//!
//! Defines the 2D force trait and the pairwise Newtonian gravity law
//! applied between attractor-tagged bodies

use crate::simulation::states::{World, NVec2};

/// Collection of force terms (gravity, drag, etc.)
/// Each term implements [`Force`] and their contributions are summed
/// into a single force vector per body
pub struct ForceSet {
    terms: Vec<Box<dyn Force + Send + Sync>>,
}

impl ForceSet {
    /// Create an empty force set
    pub fn new() -> Self {
        Self {
            terms: Vec::new()
        }
    }

    /// Add a force term
    pub fn with<T>(mut self, term: T) -> Self
    where
        T: Force + Send + Sync + 'static,
    {
        self.terms.push(Box::new(term));
        self
    }

    /// Compute total forces at time `t` for all bodies in `world`
    /// - `out[i]` will be set to the sum of contributions from all terms
    ///
    /// `out` is parallel to `world.bodies`. All contributions for a step
    /// are accumulated here before the integrator advances any body
    pub fn accumulate_forces(&self, t: f64, world: &World, out: &mut [NVec2]) {
        // Zero buffer
        for f in out.iter_mut() {
            *f = NVec2::zeros();
        }
        // Iterate over all force contributors
        for term in &self.terms {
            term.force(t, world, out);
        }
    }
}

/// Trait for force sources operating on [`World`]
/// Implementations add their contribution into `out[i]` for each body
pub trait Force {
    fn force(&self, t: f64, world: &World, out: &mut [NVec2]);
}

/// Pairwise Newtonian gravity between attractor-tagged bodies
/// Coincident bodies fall back to the `eps2` squared-distance floor so
/// the computed force stays finite
pub struct NewtonianGravity {
    pub G: f64, // gravitional constant, a visual-tightness knob rather than a calibrated value
    pub eps2: f64, // squared-distance floor
}

impl Force for NewtonianGravity {
    fn force(&self, _t: f64, world: &World, out: &mut [NVec2]) {
        let n = world.bodies.len();
        if n == 0 { // No bodies, return
            return;
        }

        // Loop over each unordered pair (i, j) with i < j
        // Each pair is visited exactly once per step; visiting a pair
        // twice would double-count the force
        for i in 0..n {
            // bi: body i (left side of the pair)
            let bi = &world.bodies[i];
            if !bi.attractor {
                continue;
            }

            for j in (i + 1)..n {
                // bj: body j (right side of the pair)
                let bj = &world.bodies[j];
                if !bj.attractor {
                    continue;
                }

                // r is the displacement vector from i to j
                // If r points from i to j, then i feels a pull along +r,
                // j feels a pull along -r
                let r = bj.x - bi.x;

                // Squared separation distance |r|^2
                let r2 = r.dot(&r);

                // Coincident bodies: substitute the eps2 floor for the
                // squared distance and drop the direction entirely, so
                // the result is a finite (zero) force instead of NaN
                let d2 = if r2 > 0.0 { r2 } else { self.eps2 };
                let unit = if r2 > 0.0 {
                    r * d2.sqrt().recip()
                } else {
                    NVec2::zeros()
                };

                // -------------------------
                // Apply Newton's law:
                // f_i +=  G * m_i * m_j * unit / d2
                // f_j -=  G * m_i * m_j * unit / d2
                // (equal and opposite, attractive)
                // -------------------------
                let f = unit * (self.G * bi.m * bj.m / d2);

                // Force on body i points toward j
                out[i] += f;

                // Force on body j points toward i
                // The anchor accumulates its share like any other body;
                // the integrator discards it via the static flag
                out[j] -= f;
            }
        }
    }
}
