pub mod simulation;
pub mod configuration;
pub mod visualization;
pub mod benchmark;

pub use simulation::states::{Body, BodySpec, BodyId, World, NVec2};
pub use simulation::params::{Parameters, Viewport};
pub use simulation::engine::Engine;
pub use simulation::forces::{Force, ForceSet, NewtonianGravity};
pub use simulation::integrator::verlet_step;
pub use simulation::collisions::detect_collisions;
pub use simulation::population::{PopulationManager, SpawnParams, SpawnError, Mutation, apply_mutations};
pub use simulation::scenario::Scenario;

pub use configuration::config::{PolicyConfig, EngineConfig, ParametersConfig, ViewportConfig, AnchorConfig, PopulationConfig, ScenarioConfig};

pub use visualization::vis2d::run_2d;

pub use benchmark::benchmark::{bench_gravity, bench_step};
