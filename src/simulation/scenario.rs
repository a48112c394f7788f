//! Build fully-initialized simulation scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces the runtime
//! bundle (`Scenario`) containing:
//! - engine settings (`Engine`)
//! - numerical parameters (`Parameters`)
//! - world state (anchor + initial population at t = 0)
//! - active force set (`ForceSet`)
//! - the population manager owning spawn/remove decisions
//!
//! The scenario is inserted into Bevy as a `Resource` and consumed by
//! the physics and visualization systems

use bevy::prelude::Resource;

use crate::configuration::config::ScenarioConfig;
use crate::simulation::engine::Engine;
use crate::simulation::params::{Parameters, Viewport};
use crate::simulation::states::World;
use crate::simulation::forces::{ForceSet, NewtonianGravity};
use crate::simulation::population::{PopulationManager, SpawnParams};

/// Bevy resource representing a fully-initialized simulation scenario
///
/// This is the main "runtime bundle" constructed from a [`ScenarioConfig`]:
/// it contains the engine settings, parameters, current world state,
/// the set of active force laws, and the population manager
#[derive(Resource)]
pub struct Scenario {
    pub engine: Engine,
    pub parameters: Parameters,
    pub world: World,
    pub forces: ForceSet,
    pub population: PopulationManager,
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> Self {
        // Parameters (runtime) from ParametersConfig
        let p_cfg = cfg.parameters;
        let parameters = Parameters {
            h0: p_cfg.h0,
            seed: p_cfg.seed,
            eps2: p_cfg.eps2,
            G: p_cfg.G,
        };

        // Engine (runtime) from EngineConfig
        let engine = Engine {
            policy: cfg.engine.policy,
        };

        // Spawn parameters: viewport, anchor, and planet ranges
        let spawn = SpawnParams {
            count: cfg.population.count,
            mass_range: (cfg.population.mass_range[0], cfg.population.mass_range[1]),
            speed_range: (cfg.population.speed_range[0], cfg.population.speed_range[1]),
            radius_scale: cfg.population.radius_scale,
            viewport: Viewport {
                width: cfg.viewport.width,
                height: cfg.viewport.height,
            },
            anchor_mass: cfg.anchor.mass,
            anchor_radius: cfg.anchor.radius,
        };

        // World state: the anchor plus the initial population at t = 0
        let mut population = PopulationManager::new(spawn, parameters.seed);
        let mut world = World::new();
        population.spawn_anchor(&mut world);
        population.populate(&mut world);

        // Forces: construct a ForceSet and register Newtonian gravity
        let mut forces = ForceSet::new();
        forces = forces.with(NewtonianGravity {
            G: parameters.G,
            eps2: parameters.eps2,
        });

        Self {
            engine,
            parameters,
            world,
            forces,
            population,
        }
    }
}
