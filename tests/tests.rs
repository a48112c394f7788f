use solsim::{World, BodySpec, NVec2};
use solsim::{Parameters, Viewport, Engine, PolicyConfig};
use solsim::{ForceSet, NewtonianGravity, verlet_step, detect_collisions};
use solsim::{PopulationManager, SpawnParams, SpawnError, Mutation, apply_mutations};
use solsim::{Scenario, ScenarioConfig};

/// Build a simple two-planet world separated along the x-axis
pub fn two_body_world(dist: f64, m1: f64, m2: f64) -> World {
    let mut world = World::new();
    world.insert(BodySpec {
        x: NVec2::new(-dist / 2.0, 0.0),
        v: NVec2::zeros(),
        m: m1,
        radius: 0.0,
        anchor: false,
        attractor: true,
    });
    world.insert(BodySpec {
        x: NVec2::new(dist / 2.0, 0.0),
        v: NVec2::zeros(),
        m: m2,
        radius: 0.0,
        anchor: false,
        attractor: true,
    });
    world
}

/// Default physics parameters for tests
pub fn test_params() -> Parameters {
    Parameters {
        h0: 0.016,
        seed: 42,
        eps2: 1e-4,
        G: 9e-3,
    }
}

/// Build a gravity term + ForceSet
pub fn gravity_set(p: &Parameters) -> ForceSet {
    ForceSet::new().with(NewtonianGravity {
        G: p.G,
        eps2: p.eps2,
    })
}

/// Spawn parameters matching the respawn scenario defaults
pub fn test_spawn_params(count: usize) -> SpawnParams {
    SpawnParams {
        count,
        mass_range: (1.0, 5.0),
        speed_range: (-1.0, 1.0),
        radius_scale: 1.0,
        viewport: Viewport {
            width: 1280.0,
            height: 720.0,
        },
        anchor_mass: 50.0,
        anchor_radius: 20.0,
    }
}

pub fn test_manager(count: usize) -> PopulationManager {
    PopulationManager::new(test_spawn_params(count), 42)
}

pub fn respawn_engine() -> Engine {
    Engine {
        policy: PolicyConfig::Respawn,
    }
}

pub fn static_engine() -> Engine {
    Engine {
        policy: PolicyConfig::Static,
    }
}

// ==================================================================================
// Gravity tests
// ==================================================================================

#[test]
fn gravity_newton_third_law() {
    let world = two_body_world(1.0, 2.0, 3.0);
    let p = test_params();
    let forces = gravity_set(&p);

    let mut out = vec![Default::default(); 2];
    forces.accumulate_forces(world.t, &world, &mut out);

    let net = out[0] + out[1];
    assert!(net.norm() < 1e-15, "Pair forces not equal and opposite: {:?}", net);
    assert!(out[0].norm() > 0.0, "Expected a nonzero attraction");
}

#[test]
fn gravity_points_toward_other_body() {
    let world = two_body_world(2.0, 1.0, 1.0);
    let p = test_params();
    let forces = gravity_set(&p);

    let mut out = vec![Default::default(); 2];
    forces.accumulate_forces(world.t, &world, &mut out);

    let dx = world.bodies[1].x - world.bodies[0].x;

    // Attraction: the first body is pulled along +dx
    assert!(dx.norm() > 0.0);
    assert!(out[0].dot(&dx) > 0.0, "Force is not toward the second body");
}

#[test]
fn gravity_inverse_square_law() {
    let world_r = two_body_world(1.0, 1.0, 1.0);
    let world_2r = two_body_world(2.0, 1.0, 1.0);
    let p = test_params();
    let forces = gravity_set(&p);

    let mut out_r = vec![Default::default(); 2];
    let mut out_2r = vec![Default::default(); 2];

    forces.accumulate_forces(world_r.t, &world_r, &mut out_r);
    forces.accumulate_forces(world_2r.t, &world_2r, &mut out_2r);

    let ratio = out_r[0].norm() / out_2r[0].norm();
    assert!((ratio - 4.0).abs() < 1e-9, "Expected ~4x, got {}", ratio);
}

#[test]
fn gravity_scales_with_mass_product() {
    let world_1 = two_body_world(1.0, 1.0, 1.0);
    let world_6 = two_body_world(1.0, 2.0, 3.0);
    let p = test_params();
    let forces = gravity_set(&p);

    let mut out_1 = vec![Default::default(); 2];
    let mut out_6 = vec![Default::default(); 2];

    forces.accumulate_forces(world_1.t, &world_1, &mut out_1);
    forces.accumulate_forces(world_6.t, &world_6, &mut out_6);

    let ratio = out_6[0].norm() / out_1[0].norm();
    assert!((ratio - 6.0).abs() < 1e-9, "Expected ~6x, got {}", ratio);
}

#[test]
fn gravity_coincident_bodies_stay_finite() {
    // Both bodies on the same point: squared distance would be zero
    let world = two_body_world(0.0, 1.0, 1.0);
    let p = test_params();
    let forces = gravity_set(&p);

    let mut out = vec![Default::default(); 2];
    forces.accumulate_forces(world.t, &world, &mut out);

    for f in &out {
        assert!(f.x.is_finite() && f.y.is_finite(), "Non-finite force: {:?}", f);
    }
}

#[test]
fn gravity_skips_non_attractors() {
    let mut world = World::new();
    world.insert(BodySpec {
        x: NVec2::new(0.0, 0.0),
        v: NVec2::zeros(),
        m: 1.0,
        radius: 0.0,
        anchor: false,
        attractor: true,
    });
    world.insert(BodySpec {
        x: NVec2::new(1.0, 0.0),
        v: NVec2::zeros(),
        m: 1.0,
        radius: 0.0,
        anchor: false,
        attractor: false, // opted out of the gravity law
    });

    let p = test_params();
    let forces = gravity_set(&p);
    let mut out = vec![Default::default(); 2];
    forces.accumulate_forces(world.t, &world, &mut out);

    assert!(out[0].norm() == 0.0 && out[1].norm() == 0.0, "Non-attractor pair got a force");
}

// ==================================================================================
// World tests
// ==================================================================================

#[test]
fn world_ids_stable_across_removal() {
    let mut world = two_body_world(1.0, 1.0, 1.0);
    let third = world.insert(BodySpec {
        x: NVec2::new(0.0, 5.0),
        v: NVec2::zeros(),
        m: 1.0,
        radius: 0.0,
        anchor: false,
        attractor: true,
    });
    let first = world.bodies[0].id;
    let second = world.bodies[1].id;

    assert!(world.remove(second).is_some());
    // Ids held across the removal still name their bodies
    assert!(world.contains(first));
    assert!(world.contains(third));
    // A second removal of the same id is a no-op
    assert!(world.remove(second).is_none());
    assert_eq!(world.bodies.len(), 2);
}

// ==================================================================================
// Integrator tests
// ==================================================================================

#[test]
fn anchor_never_moves() {
    let mut world = World::new();
    world.insert(BodySpec {
        x: NVec2::new(640.0, 360.0),
        v: NVec2::zeros(),
        m: 50.0,
        radius: 20.0,
        anchor: true,
        attractor: true,
    });
    let planet = world.insert(BodySpec {
        x: NVec2::new(800.0, 360.0),
        v: NVec2::new(0.0, 0.5),
        m: 2.0,
        radius: 2.0,
        anchor: false,
        attractor: true,
    });

    let p = test_params();
    let forces = gravity_set(&p);

    let planet_x0 = world.get(planet).unwrap().x;
    for _ in 0..100 {
        verlet_step(&mut world, &forces, &p);
    }

    let anchor = world.anchor().expect("anchor must stay live");
    assert_eq!(anchor.x, NVec2::new(640.0, 360.0), "Anchor moved");
    assert_eq!(anchor.v, NVec2::zeros(), "Anchor gained velocity");
    assert_eq!(anchor.m, 50.0, "Anchor mass changed");
    assert!(
        (world.get(planet).unwrap().x - planet_x0).norm() > 0.0,
        "Planet did not move"
    );
    assert!((world.t - 100.0 * p.h0).abs() < 1e-12, "Time did not advance");
}

// ==================================================================================
// Collision detection tests
// ==================================================================================

#[test]
fn detect_collisions_reports_overlapping_pairs_once() {
    let mut world = World::new();
    let a = world.insert(BodySpec {
        x: NVec2::new(0.0, 0.0),
        v: NVec2::zeros(),
        m: 5.0,
        radius: 5.0,
        anchor: false,
        attractor: true,
    });
    let b = world.insert(BodySpec {
        x: NVec2::new(6.0, 0.0), // overlapping: 6 < 5 + 5
        v: NVec2::zeros(),
        m: 5.0,
        radius: 5.0,
        anchor: false,
        attractor: true,
    });
    world.insert(BodySpec {
        x: NVec2::new(500.0, 500.0), // far away
        v: NVec2::zeros(),
        m: 5.0,
        radius: 5.0,
        anchor: false,
        attractor: true,
    });

    let batch = detect_collisions(&world);
    assert_eq!(batch, vec![(a, b)]);
}

// ==================================================================================
// Population tests
// ==================================================================================

#[test]
fn populate_spawns_requested_count_within_ranges() {
    let mut world = World::new();
    let mut manager = test_manager(30);
    manager.spawn_anchor(&mut world);
    manager.populate(&mut world);

    assert_eq!(world.planet_count(), 30);
    for b in world.bodies.iter().filter(|b| !b.anchor) {
        assert!(b.m >= 1.0 && b.m < 5.0, "Mass out of range: {}", b.m);
        assert!(b.radius == b.m, "Radius not scaled from mass");
        assert!(b.x.x >= 0.0 && b.x.x < 1280.0, "x out of viewport: {}", b.x.x);
        assert!(b.x.y >= 0.0 && b.x.y < 720.0, "y out of viewport: {}", b.x.y);
        assert!(b.v.x >= -1.0 && b.v.x < 1.0, "vx out of range: {}", b.v.x);
        assert!(b.v.y >= -1.0 && b.v.y < 1.0, "vy out of range: {}", b.v.y);
        assert!(b.attractor, "Planet must participate in the gravity law");
    }
}

#[test]
fn spawn_planet_rejects_invalid_mass() {
    let mut world = World::new();
    let mut manager = test_manager(0);

    for bad in [0.0, -3.0, f64::NAN, f64::INFINITY] {
        let res = manager.spawn_planet(&mut world, None, Some(bad));
        assert!(
            matches!(res, Err(SpawnError::InvalidMass(_))),
            "Mass {bad} was not rejected"
        );
    }
    assert_eq!(world.planet_count(), 0, "A rejected spawn mutated the world");
}

#[test]
fn spawn_planet_honors_explicit_position_and_mass() {
    let mut world = World::new();
    let mut manager = test_manager(0);

    let id = manager
        .spawn_planet(&mut world, Some(NVec2::new(10.0, 20.0)), Some(3.5))
        .expect("valid spawn");

    let b = world.get(id).unwrap();
    assert_eq!(b.x, NVec2::new(10.0, 20.0));
    assert_eq!(b.m, 3.5);
    assert_eq!(b.radius, 3.5);
    assert!(!b.anchor && b.attractor);
}

#[test]
fn merge_collision_conserves_count_and_means_mass() {
    let mut world = World::new();
    let mut manager = test_manager(0);
    let engine = respawn_engine();
    manager.spawn_anchor(&mut world);

    let a = manager
        .spawn_planet(&mut world, Some(NVec2::new(100.0, 100.0)), Some(3.0))
        .unwrap();
    let b = manager
        .spawn_planet(&mut world, Some(NVec2::new(200.0, 200.0)), Some(5.0))
        .unwrap();
    let before = world.planet_count();

    let mutations = manager.handle_collisions(&engine, &world, &[(a, b)]);
    apply_mutations(&mut world, mutations);

    assert_eq!(world.planet_count(), before, "Planet count changed across a merge");
    assert!(!world.contains(a) && !world.contains(b), "Consumed bodies still live");

    // One spawned body carries the exact arithmetic mean at the first
    // body's pre-removal position
    let merged = world
        .bodies
        .iter()
        .find(|p| !p.anchor && (p.m - 4.0).abs() < 1e-12)
        .expect("merge body of mass 4 must exist");
    assert_eq!(merged.x, NVec2::new(100.0, 100.0));
}

#[test]
fn anchor_collision_replaces_planet_keeps_anchor() {
    let mut world = World::new();
    let mut manager = test_manager(0);
    let engine = respawn_engine();
    let sun = manager.spawn_anchor(&mut world);
    let planet = manager
        .spawn_planet(&mut world, Some(NVec2::new(641.0, 360.0)), Some(2.0))
        .unwrap();
    let before = world.planet_count();

    let mutations = manager.handle_collisions(&engine, &world, &[(sun, planet)]);
    apply_mutations(&mut world, mutations);

    assert_eq!(world.planet_count(), before, "Planet count changed across an anchor hit");
    assert!(!world.contains(planet), "Consumed planet still live");
    let anchor = world.anchor().expect("anchor must survive unconditionally");
    assert_eq!(anchor.id, sun);
    assert_eq!(anchor.m, 50.0);
}

#[test]
fn static_policy_ignores_collisions() {
    let mut world = World::new();
    let mut manager = test_manager(0);
    let engine = static_engine();
    manager.spawn_anchor(&mut world);
    let a = manager.spawn_planet(&mut world, None, Some(3.0)).unwrap();
    let b = manager.spawn_planet(&mut world, None, Some(5.0)).unwrap();

    let mutations = manager.handle_collisions(&engine, &world, &[(a, b)]);
    assert!(mutations.is_empty(), "Static policy produced mutations");
    assert!(world.contains(a) && world.contains(b));
}

#[test]
fn same_batch_shared_body_processed_once() {
    let mut world = World::new();
    let mut manager = test_manager(0);
    let engine = respawn_engine();
    manager.spawn_anchor(&mut world);

    let a = manager.spawn_planet(&mut world, Some(NVec2::new(10.0, 10.0)), Some(2.0)).unwrap();
    let b = manager.spawn_planet(&mut world, Some(NVec2::new(11.0, 10.0)), Some(4.0)).unwrap();
    let c = manager.spawn_planet(&mut world, Some(NVec2::new(12.0, 10.0)), Some(6.0)).unwrap();
    let before = world.planet_count();

    // Three-body pileup reported as two pairs sharing b
    let mutations = manager.handle_collisions(&engine, &world, &[(a, b), (b, c)]);
    apply_mutations(&mut world, mutations);

    assert!(!world.contains(a) && !world.contains(b), "First pair not consumed");
    assert!(world.contains(c), "Body from the skipped pair was consumed");
    assert_eq!(world.planet_count(), before, "Count not conserved under a shared-body batch");
}

#[test]
fn duplicate_removal_is_ignored() {
    let mut world = World::new();
    let mut manager = test_manager(0);
    let id = manager.spawn_planet(&mut world, None, None).unwrap();

    apply_mutations(
        &mut world,
        vec![Mutation::Remove(id), Mutation::Remove(id)],
    );
    assert_eq!(world.planet_count(), 0);
}

// ==================================================================================
// Scenario walks
// ==================================================================================

#[test]
fn thirty_planets_survive_a_merge() {
    // Anchor of mass 50 at the viewport center, then 30 planets, two of
    // them with known masses 2 and 4
    let mut world = World::new();
    let mut manager = test_manager(28);
    let engine = respawn_engine();
    manager.spawn_anchor(&mut world);
    manager.populate(&mut world);
    let a = manager.spawn_planet(&mut world, Some(NVec2::new(300.0, 300.0)), Some(2.0)).unwrap();
    let b = manager.spawn_planet(&mut world, Some(NVec2::new(301.0, 300.0)), Some(4.0)).unwrap();
    assert_eq!(world.planet_count(), 30);

    let mutations = manager.handle_collisions(&engine, &world, &[(a, b)]);
    apply_mutations(&mut world, mutations);

    assert_eq!(world.planet_count(), 30, "Free-body count changed");
    assert!(
        world.bodies.iter().any(|p| !p.anchor && (p.m - 3.0).abs() < 1e-12),
        "No merge body of mass 3 in the population"
    );
    assert_eq!(world.anchor().unwrap().m, 50.0);
}

#[test]
fn anchor_hit_leaves_population_size_unchanged() {
    let mut world = World::new();
    let mut manager = test_manager(30);
    let engine = respawn_engine();
    let sun = manager.spawn_anchor(&mut world);
    manager.populate(&mut world);

    let victim = world.bodies.iter().find(|b| !b.anchor).unwrap().id;
    let mutations = manager.handle_collisions(&engine, &world, &[(sun, victim)]);
    apply_mutations(&mut world, mutations);

    assert_eq!(world.planet_count(), 30, "Free-body count changed");
    assert_eq!(world.anchor().unwrap().m, 50.0, "Anchor mass changed");
}

#[test]
fn build_scenario_from_yaml() {
    let yaml = r#"
engine:
  policy: "respawn"

parameters:
  h0: 0.016
  seed: 7
  eps2: 1.0e-4
  G: 9.0e-3

viewport:
  width: 1280.0
  height: 720.0

anchor:
  mass: 50.0
  radius: 20.0

population:
  count: 30
  mass_range: [ 1.0, 5.0 ]
  speed_range: [ -1.0, 1.0 ]
  radius_scale: 1.0
"#;

    let cfg: ScenarioConfig = serde_yaml::from_str(yaml).expect("scenario YAML parses");
    let scenario = Scenario::build_scenario(cfg);

    assert_eq!(scenario.world.planet_count(), 30);
    let anchor = scenario.world.anchor().expect("anchor spawned at startup");
    assert_eq!(anchor.m, 50.0);
    assert_eq!(anchor.x, NVec2::new(640.0, 360.0));
    assert!(anchor.attractor, "Anchor participates in the gravity law");
    assert_eq!(scenario.world.t, 0.0);
}
