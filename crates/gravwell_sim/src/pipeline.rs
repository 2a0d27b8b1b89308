use bevy::prelude::*;
use gravwell_physics::DrawableTable;

use super::engine::ParticleEngine;

/// Renderer-owned drawable table the engine writes transforms into
#[derive(Resource, Debug, Default)]
pub struct SceneDrawables(pub DrawableTable);

/// Bevy plugin for the simulation pipeline
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SceneDrawables>().add_systems(
            Update,
            simulation_tick.run_if(resource_exists::<ParticleEngine>),
        );
    }
}

/// Main simulation tick: one engine step per frame, fed the frame clock in ms.
/// A stopped engine ignores the callback.
fn simulation_tick(
    mut engine: ResMut<ParticleEngine>,
    mut drawables: ResMut<SceneDrawables>,
    time: Res<Time>,
) {
    let now_ms = time.elapsed_secs_f64() * 1000.0;
    engine.advance_to(now_ms, &mut drawables.0);
}
