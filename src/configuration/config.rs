//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! simulation scenario. A scenario consists of:
//!
//! - [`EngineConfig`]     – population policy switch
//! - [`ParametersConfig`] – numerical parameters and physical constants
//! - [`ViewportConfig`]   – spawn region / window dimensions
//! - [`AnchorConfig`]     – the static central body
//! - [`PopulationConfig`] – planet count and spawn ranges
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//! An example scenario YAML matching these types:
//!
//! ```yaml
//! engine:
//!   policy: "respawn"     # or "static"
//!
//! parameters:
//!   h0: 0.016             # fixed step size
//!   seed: 42              # deterministic seed
//!   eps2: 1.0e-4          # squared-distance floor for coincident bodies
//!   G: 9.0e-3             # gravitational constant
//!
//! viewport:
//!   width: 1280.0
//!   height: 720.0
//!
//! anchor:
//!   mass: 50.0
//!   radius: 20.0
//!
//! population:
//!   count: 30
//!   mass_range: [ 1.0, 5.0 ]
//!   speed_range: [ -1.0, 1.0 ]
//!   radius_scale: 1.0
//! ```
//!
//! The engine then maps this configuration into its internal runtime
//! scenario representation.

use serde::Deserialize;

/// Which population policy the engine runs
/// `policy: "static"` or `policy: "respawn"`
#[derive(Deserialize, Debug, Clone)]
pub enum PolicyConfig {
    #[serde(rename = "static")] // fixed population spawned once at startup, collisions ignored
    Static,

    #[serde(rename = "respawn")] // collisions consume bodies and spawn replacements, population self-sustaining
    Respawn,
}

/// High-level engine configuration
#[derive(Deserialize, Debug)]
pub struct EngineConfig {
    pub policy: PolicyConfig, // population policy applied to collision batches
}

/// Global numerical and physical parameters for a scenario
#[derive(Deserialize, Debug, Clone)]
pub struct ParametersConfig {
    pub h0: f64,   // time step size
    pub seed: u64, // deterministic seed to make runs reproducable
    pub eps2: f64, // squared-distance floor - prevent singular forces for coincident bodies
    pub G: f64,    // gravitational constant
}

/// Spawn region and window dimensions
#[derive(Deserialize, Debug)]
pub struct ViewportConfig {
    pub width: f64,
    pub height: f64,
}

/// The single static central body ("the sun")
#[derive(Deserialize, Debug)]
pub struct AnchorConfig {
    pub mass: f64,   // gravitational influence of the anchor
    pub radius: f64, // collision/render footprint
}

/// Planet count and spawn ranges
#[derive(Deserialize, Debug)]
pub struct PopulationConfig {
    pub count: usize,          // initial planet count
    pub mass_range: Vec<f64>,  // [lo, hi], uniform planet mass
    pub speed_range: Vec<f64>, // [lo, hi], uniform initial velocity components
    pub radius_scale: f64,     // planet radius = mass * radius_scale
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug)]
pub struct ScenarioConfig {
    pub engine: EngineConfig, // population policy
    pub parameters: ParametersConfig, // global numerical and physical parameters
    pub viewport: ViewportConfig, // spawn region / window dimensions
    pub anchor: AnchorConfig, // the static central body
    pub population: PopulationConfig, // planet count and spawn ranges
}
