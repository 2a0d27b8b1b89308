use bevy::prelude::*;
use gravwell_core::SimConfig;
use gravwell_render::{GravwellRenderPlugin, build_engine};
use gravwell_sim::{SceneDrawables, SimulationPlugin};

fn main() {
    let mut drawables = SceneDrawables::default();
    let (engine, feed) = build_engine(SimConfig::default(), &mut drawables.0);

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Gravwell".into(),
                resolution: (1600.0, 900.0).into(),
                ..default()
            }),
            ..default()
        }))
        .insert_resource(ClearColor(Color::srgb(0.0, 0.0, 0.02)))
        .insert_resource(drawables)
        .insert_resource(feed)
        .insert_resource(engine)
        .add_plugins(SimulationPlugin)
        .add_plugins(GravwellRenderPlugin)
        .run();
}
