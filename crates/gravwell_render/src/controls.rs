use bevy::prelude::*;
use gravwell_physics::Body;
use gravwell_sim::{ParticleEngine, SceneDrawables};
use rand::Rng;

use super::particles::{self, BodyVisual, MembershipFeed, VisualIndex};

/// R: tear the engine down and rebuild it with a new seed
#[allow(clippy::too_many_arguments)]
pub fn reset_scene(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut engine: ResMut<ParticleEngine>,
    mut drawables: ResMut<SceneDrawables>,
    mut feed: ResMut<MembershipFeed>,
    mut index: ResMut<VisualIndex>,
    visuals: Query<Entity, With<BodyVisual>>,
) {
    if !keyboard.just_pressed(KeyCode::KeyR) {
        return;
    }

    engine.detach();
    for entity in visuals.iter() {
        commands.entity(entity).despawn();
    }
    index.0.clear();
    drawables.0.clear();

    let mut config = engine.config().clone();
    config.seed = config.seed.wrapping_add(1);
    let (fresh, fresh_feed) = super::build_engine(config, &mut drawables.0);

    for body in fresh.bodies() {
        let id = body.drawable();
        if let Some(drawable) = drawables.0.get(id) {
            let entity =
                particles::spawn_visual(&mut commands, &mut meshes, &mut materials, id, drawable);
            index.0.insert(id, entity);
        }
    }

    info!("Scene reset: {} bodies (seed {})", fresh.len(), fresh.config().seed);
    *engine = fresh;
    *feed = fresh_feed;
}

/// G: drop a gravity well at a random spot inside the domain
pub fn drop_attractor(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut engine: ResMut<ParticleEngine>,
    mut drawables: ResMut<SceneDrawables>,
) {
    if !keyboard.just_pressed(KeyCode::KeyG) {
        return;
    }

    let domain = *engine.domain();
    let mut rng = rand::thread_rng();
    let position = Vec3::new(
        domain.center.x + rng.gen_range(-domain.max_distance..domain.max_distance),
        domain.center.y,
        domain.center.z + rng.gen_range(-domain.max_distance..domain.max_distance),
    );
    let well = Body::attractor(&mut drawables.0, position);
    debug!(
        "Dropping attractor {:?} at ({:.1}, {:.1})",
        well.drawable(),
        position.x,
        position.z
    );
    engine.add_particle(well);
}
