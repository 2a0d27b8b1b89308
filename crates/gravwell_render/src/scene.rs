use bevy::prelude::*;
use gravwell_sim::ParticleEngine;

/// Side length of the floor quad
const FLOOR_SIZE: f32 = 20.0;

/// Camera, lights, the sun at the domain center and the floor
pub fn spawn_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    engine: Res<ParticleEngine>,
) {
    let center = engine.center();

    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(-25.0, 25.0, -25.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    for position in [center, Vec3::new(0.0, 10.0, 0.0)] {
        commands.spawn((
            PointLight {
                intensity: 2_000_000.0,
                range: 100.0,
                ..default()
            },
            Transform::from_translation(position),
        ));
    }

    // The sun is drawn here; its mass lives in the engine's domain
    let sun = Color::srgb(1.0, 1.0, 0.0);
    commands.spawn((
        Mesh3d(meshes.add(Sphere::new(1.0).mesh().uv(32, 16))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: sun,
            emissive: LinearRgba::from(sun) * 4.0,
            ..default()
        })),
        Transform::from_translation(center),
    ));

    commands.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(FLOOR_SIZE, FLOOR_SIZE))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgba(0.2, 0.2, 0.2, 0.4),
            alpha_mode: AlphaMode::Blend,
            ..default()
        })),
        Transform::IDENTITY,
    ));

    info!(
        "Scene ready: {} bodies around ({:.1}, {:.1}, {:.1})",
        engine.len(),
        center.x,
        center.y,
        center.z
    );
}
