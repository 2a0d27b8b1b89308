pub mod config;
pub mod constants;
pub mod types;

pub use config::SimConfig;
pub use constants::*;
pub use types::*;
