pub mod engine;
pub mod observer;
pub mod pipeline;

pub use engine::ParticleEngine;
pub use observer::{ChannelObserver, MembershipChange, MembershipObserver, ObserverHandle};
pub use pipeline::{SceneDrawables, SimulationPlugin};
