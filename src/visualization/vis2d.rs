use bevy::prelude::*;
use bevy::sprite::{MaterialMesh2dBundle, Mesh2dHandle};
use bevy::math::primitives::Circle;
use bevy::window::PrimaryWindow;

use std::collections::HashSet;

use crate::simulation::scenario::Scenario;
use crate::simulation::integrator::verlet_step;
use crate::simulation::collisions::detect_collisions;
use crate::simulation::population::apply_mutations;
use crate::simulation::params::Viewport;
use crate::simulation::states::{Body, BodyId, NVec2};

/// Component tagging each circle with the id of the body it renders
/// Ids instead of indices: the population is dynamic, indices are not
#[derive(Component)]
struct BodyRef(pub BodyId);

/// Minimum on-screen radius so tiny bodies are still visible
const MIN_RADIUS: f32 = 1.0;

/// Reach (in world units) within which a click grabs the nearest body
const GRAB_RADIUS: f64 = 40.0;

/// Fraction of the cursor offset a grabbed body closes per frame
const DRAG_EASE: f64 = 0.25;

pub fn run_2d(scenario: Scenario) {
    println!("run_2d: starting Bevy 2D viewer with {} bodies", scenario.world.bodies.len());

    let viewport = scenario.population.spawn.viewport;

    App::new()
        .insert_resource(scenario)
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "solsim".into(),
                resolution: (viewport.width as f32, viewport.height as f32).into(),
                ..Default::default()
            }),
            ..Default::default()
        }))
        .add_systems(Startup, setup_bodies_system)
        .add_systems(
            Update,
            (
                physics_step_system,
                reconcile_entities_system,
                sync_transforms_system,
                mouse_drag_system,
            )
                .chain(),
        )
        .run();
}

/// Simulation coordinates have the origin at the viewport's top-left
/// corner; bevy's 2D camera is centered on the origin with +y up
fn to_screen(x: NVec2, viewport: &Viewport) -> Vec3 {
    Vec3::new(
        (x.x - 0.5 * viewport.width) as f32,
        (0.5 * viewport.height - x.y) as f32,
        0.0,
    )
}

fn from_screen(p: Vec2, viewport: &Viewport) -> NVec2 {
    NVec2::new(
        p.x as f64 + 0.5 * viewport.width,
        0.5 * viewport.height - p.y as f64,
    )
}

fn spawn_body_entity(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<ColorMaterial>,
    body: &Body,
    viewport: &Viewport,
) {
    let color = if body.anchor {
        Color::srgb(1.0, 0.85, 0.2) // the sun
    } else {
        Color::WHITE
    };
    let radius_screen = (body.radius as f32).max(MIN_RADIUS);

    commands.spawn((
        MaterialMesh2dBundle {
            mesh: Mesh2dHandle(meshes.add(Circle::new(radius_screen))),
            material: materials.add(ColorMaterial::from(color)),
            transform: Transform::from_translation(to_screen(body.x, viewport)),
            ..Default::default()
        },
        BodyRef(body.id),
    ));
}

fn setup_bodies_system(
    mut commands: Commands,
    scenario: Res<Scenario>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    // 2D camera on a black sky
    commands.spawn(Camera2dBundle {
        camera: Camera {
            clear_color: ClearColorConfig::Custom(Color::BLACK),
            ..Default::default()
        },
        ..Default::default()
    });

    let viewport = scenario.population.spawn.viewport;
    for body in scenario.world.bodies.iter() {
        spawn_body_entity(&mut commands, &mut meshes, &mut materials, body, &viewport);
    }

    info!(bodies = scenario.world.bodies.len(), "spawned body entities");
}

/// One frame of simulation: collision batch -> population mutations ->
/// verlet step. The batch is handled fully before the step begins, and
/// all pair forces are accumulated before any body moves
fn physics_step_system(mut scenario: ResMut<Scenario>) {
    // Split &mut Scenario into &mut fields in one destructuring step
    let Scenario {
        engine,
        parameters,
        world,
        forces,
        population,
    } = &mut *scenario;

    let batch = detect_collisions(world);
    if !batch.is_empty() {
        let mutations = population.handle_collisions(engine, world, &batch);
        apply_mutations(world, mutations);
    }

    verlet_step(world, forces, parameters);
}

/// Keep one entity per live body: despawn circles whose body is gone,
/// spawn circles for bodies the respawn policy just created
fn reconcile_entities_system(
    mut commands: Commands,
    scenario: Res<Scenario>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    query: Query<(Entity, &BodyRef)>,
) {
    let mut rendered: HashSet<BodyId> = HashSet::new();
    for (entity, BodyRef(id)) in &query {
        if scenario.world.contains(*id) {
            rendered.insert(*id);
        } else {
            commands.entity(entity).despawn();
        }
    }

    let viewport = scenario.population.spawn.viewport;
    for body in scenario.world.bodies.iter() {
        if !rendered.contains(&body.id) {
            spawn_body_entity(&mut commands, &mut meshes, &mut materials, body, &viewport);
        }
    }
}

fn sync_transforms_system(
    scenario: Res<Scenario>,
    mut query: Query<(&BodyRef, &mut Transform)>,
) {
    let viewport = scenario.population.spawn.viewport;
    for (BodyRef(id), mut transform) in &mut query {
        if let Some(b) = scenario.world.get(*id) {
            transform.translation = to_screen(b.x, &viewport);
        }
    }
}

/// Drag bodies with the mouse: while the left button is held, the
/// nearest body within grab range eases toward the cursor
fn mouse_drag_system(
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform)>,
    mut scenario: ResMut<Scenario>,
    mut dragged: Local<Option<BodyId>>,
) {
    if !buttons.pressed(MouseButton::Left) {
        *dragged = None;
        return;
    }

    let Ok(window) = windows.get_single() else {
        return;
    };
    let Some(cursor) = window.cursor_position() else {
        return;
    };
    let Ok((camera, cam_tf)) = cameras.get_single() else {
        return;
    };
    let Some(point) = camera.viewport_to_world_2d(cam_tf, cursor) else {
        return;
    };

    let viewport = scenario.population.spawn.viewport;
    let target = from_screen(point, &viewport);

    // Grab the nearest body on the initial press, then keep it until
    // the button is released
    if dragged.is_none() {
        *dragged = scenario
            .world
            .bodies
            .iter()
            .filter(|b| !b.anchor) // the anchor never moves
            .map(|b| (b.id, (b.x - target).norm()))
            .filter(|(_, d)| *d <= GRAB_RADIUS)
            .min_by(|(_, d1), (_, d2)| d1.total_cmp(d2))
            .map(|(id, _)| id);
    }

    if let Some(id) = *dragged {
        match scenario.world.get_mut(id) {
            Some(b) => {
                // Ease the body toward the cursor and bleed off its
                // velocity so it does not slingshot on release
                let delta = target - b.x;
                b.x += DRAG_EASE * delta;
                b.v *= 0.5;
            }
            None => {
                // consumed by a collision mid-drag
                *dragged = None;
            }
        }
    }
}
