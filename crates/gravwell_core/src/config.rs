use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::constants::{G, MASS_OF_SUN};
use crate::types::{ParticleColor, ParticleSize};

/// Simulation configuration
///
/// Gravity, speed and wind are read every tick and may be tuned live.
/// Changing the population, collisions or the size/color policy is expected
/// to go through a full engine rebuild.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    /// Gravitational coefficient used by every pairwise and central pull
    pub gravitational_coefficient: f32,
    /// Speed cap in units per millisecond
    pub max_speed: f32,
    /// Horizontal wind components
    pub wind_x: f32,
    pub wind_z: f32,
    /// Whether overlapping bodies kill each other
    pub particle_collisions: bool,
    pub particle_size: ParticleSize,
    pub particle_color: ParticleColor,
    /// Number of bodies kept alive by the engine
    pub total_particles: u32,
    /// Height of the orbital plane (the domain center sits at (0, center_y, 0))
    pub center_y: f32,
    /// Half-width of the square domain on the XZ plane
    pub max_distance: f32,
    /// Mass of the fixed central point
    pub center_mass: f32,
    /// Random seed for deterministic simulation
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            gravitational_coefficient: G,
            max_speed: 0.001,
            wind_x: 0.0,
            wind_z: 0.0,
            particle_collisions: false,
            particle_size: ParticleSize::Random,
            particle_color: ParticleColor::Random,
            total_particles: 50,
            center_y: 1.0,
            max_distance: 10.0,
            center_mass: MASS_OF_SUN,
            seed: 42,
        }
    }
}

impl SimConfig {
    /// Domain center point
    pub fn center(&self) -> Vec3 {
        Vec3::new(0.0, self.center_y, 0.0)
    }

    /// Reject values the integrator cannot work with
    pub fn validate(&self) -> Result<(), String> {
        if !self.gravitational_coefficient.is_finite() || self.gravitational_coefficient < 0.0 {
            return Err(format!(
                "gravitational_coefficient must be finite and >= 0, got {}",
                self.gravitational_coefficient
            ));
        }
        if !self.max_speed.is_finite() || self.max_speed <= 0.0 {
            return Err(format!("max_speed must be > 0, got {}", self.max_speed));
        }
        if !self.wind_x.is_finite() || !self.wind_z.is_finite() {
            return Err(format!("wind must be finite, got ({}, {})", self.wind_x, self.wind_z));
        }
        if !self.center_y.is_finite() {
            return Err(format!("center_y must be finite, got {}", self.center_y));
        }
        if !self.max_distance.is_finite() || self.max_distance <= 0.0 {
            return Err(format!("max_distance must be > 0, got {}", self.max_distance));
        }
        if !self.center_mass.is_finite() || self.center_mass <= 0.0 {
            return Err(format!("center_mass must be > 0, got {}", self.center_mass));
        }
        if let ParticleSize::Fixed(radius) = self.particle_size {
            if !radius.is_finite() || radius <= 0.0 {
                return Err(format!("fixed particle size must be > 0, got {radius}"));
            }
        }
        if let ParticleColor::Rgb(rgb) = self.particle_color {
            if rgb.iter().any(|c| !(0.0..=1.0).contains(c)) {
                return Err(format!("particle color channels must be in [0, 1], got {rgb:?}"));
            }
        }
        Ok(())
    }
}
