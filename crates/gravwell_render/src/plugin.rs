use bevy::prelude::*;

use super::controls;
use super::particles::{self, VisualIndex};
use super::scene;

/// Draws the simulation: one entity per drawable, kept in step with the table
pub struct GravwellRenderPlugin;

impl Plugin for GravwellRenderPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<VisualIndex>()
            .add_systems(Startup, (scene::spawn_scene, particles::spawn_body_visuals))
            .add_systems(
                Update,
                (
                    controls::reset_scene,
                    controls::drop_attractor,
                    particles::apply_membership_changes,
                    particles::sync_body_visuals,
                )
                    .chain(),
            );
    }
}
