//! High-level runtime engine settings
//!
//! Selects the population policy used when building and running a
//! `Scenario`

use crate::configuration::config::PolicyConfig;

#[derive(Debug, Clone)]
pub struct Engine {
    pub policy: PolicyConfig, // static = collisions ignored, respawn = consume and replace
}
