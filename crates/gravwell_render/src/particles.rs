use std::collections::HashMap;

use bevy::color::Alpha;
use bevy::prelude::*;
use crossbeam_channel::Receiver;
use gravwell_core::{DrawableId, Material};
use gravwell_physics::{Drawable, Shape};
use gravwell_sim::{MembershipChange, ParticleEngine, SceneDrawables};

/// Fraction of a material's ambient color rendered as glow
const AMBIENT_GLOW: f32 = 0.3;

/// Marker tying an entity to its drawable
#[derive(Component)]
pub struct BodyVisual {
    pub drawable: DrawableId,
}

/// Membership changes sent by the engine's channel observer
#[derive(Resource)]
pub struct MembershipFeed(pub Receiver<MembershipChange>);

/// Drawable -> entity lookup
#[derive(Resource, Default)]
pub struct VisualIndex(pub HashMap<DrawableId, Entity>);

/// Spawn one entity per body the engine starts with
pub fn spawn_body_visuals(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    engine: Res<ParticleEngine>,
    drawables: Res<SceneDrawables>,
    mut index: ResMut<VisualIndex>,
) {
    for body in engine.bodies() {
        let id = body.drawable();
        if let Some(drawable) = drawables.0.get(id) {
            let entity = spawn_visual(&mut commands, &mut meshes, &mut materials, id, drawable);
            index.0.insert(id, entity);
        }
    }
    info!("Spawned {} body visuals", index.0.len());
}

pub(crate) fn spawn_visual(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    id: DrawableId,
    drawable: &Drawable,
) -> Entity {
    let mesh = match drawable.shape {
        Shape::Sphere { radius } => meshes.add(Sphere::new(radius).mesh().uv(32, 16)),
    };
    commands
        .spawn((
            Mesh3d(mesh),
            MeshMaterial3d(materials.add(standard_material(&drawable.material))),
            Transform::from_translation(drawable.translation).with_rotation(drawable.rotation),
            BodyVisual { drawable: id },
        ))
        .id()
}

fn standard_material(material: &Material) -> StandardMaterial {
    let d = material.diffuse;
    let a = material.ambient * AMBIENT_GLOW;
    StandardMaterial {
        base_color: Color::srgba(d.x, d.y, d.z, material.alpha),
        emissive: LinearRgba::rgb(a.x, a.y, a.z),
        perceptual_roughness: 1.0 - (material.shininess / 100.0).clamp(0.0, 0.9),
        alpha_mode: AlphaMode::Blend,
        ..default()
    }
}

/// Drain the membership feed in order: despawn removed bodies, spawn added ones
pub fn apply_membership_changes(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    feed: Res<MembershipFeed>,
    drawables: Res<SceneDrawables>,
    mut index: ResMut<VisualIndex>,
) {
    for change in feed.0.try_iter() {
        match change {
            MembershipChange::Removed(id) => {
                if let Some(entity) = index.0.remove(&id) {
                    commands.entity(entity).despawn();
                }
            }
            MembershipChange::Added(id) => {
                let Some(drawable) = drawables.0.get(id) else {
                    continue;
                };
                let entity = spawn_visual(&mut commands, &mut meshes, &mut materials, id, drawable);
                index.0.insert(id, entity);
            }
        }
    }
}

/// Copy translation, rotation and fade from the drawable table
pub fn sync_body_visuals(
    drawables: Res<SceneDrawables>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut query: Query<(&BodyVisual, &mut Transform, &MeshMaterial3d<StandardMaterial>)>,
) {
    for (visual, mut transform, handle) in query.iter_mut() {
        let Some(drawable) = drawables.0.get(visual.drawable) else {
            continue;
        };
        transform.translation = drawable.translation;
        transform.rotation = drawable.rotation;

        let alpha = drawable.material.alpha;
        let stale = materials
            .get(&handle.0)
            .is_some_and(|m| (m.base_color.alpha() - alpha).abs() > f32::EPSILON);
        if stale {
            if let Some(material) = materials.get_mut(&handle.0) {
                material.base_color.set_alpha(alpha);
            }
        }
    }
}
