pub mod controls;
pub mod particles;
pub mod plugin;
pub mod scene;

pub use particles::MembershipFeed;
pub use plugin::GravwellRenderPlugin;

use bevy::log::warn;
use gravwell_core::SimConfig;
use gravwell_physics::DrawableTable;
use gravwell_sim::{ChannelObserver, ParticleEngine};

/// Build an engine wired to a fresh membership feed. An invalid config is
/// replaced by the defaults.
pub fn build_engine(config: SimConfig, drawables: &mut DrawableTable) -> (ParticleEngine, MembershipFeed) {
    let config = match config.validate() {
        Ok(()) => config,
        Err(e) => {
            warn!("Invalid simulation config ({e}), falling back to defaults");
            SimConfig::default()
        }
    };
    let (tx, rx) = crossbeam_channel::unbounded();
    let mut engine = ParticleEngine::new(config, drawables);
    engine.add_observer(Box::new(ChannelObserver::new(tx)));
    (engine, MembershipFeed(rx))
}
