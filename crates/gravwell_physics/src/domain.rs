use glam::Vec3;
use gravwell_core::{OrbitDirection, SimConfig};

use crate::forces::PointMass;

/// Fixed center point plus a square bound on the XZ plane
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Domain {
    pub center: Vec3,
    /// Half-width of the square; positions are clipped to [-max_distance, max_distance]
    pub max_distance: f32,
    pub center_mass: f32,
}

impl Domain {
    pub fn new(center: Vec3, max_distance: f32, center_mass: f32) -> Self {
        Self {
            center,
            max_distance,
            center_mass,
        }
    }

    pub fn from_config(config: &SimConfig) -> Self {
        Self::new(config.center(), config.max_distance, config.center_mass)
    }

    /// The center as a gravity source
    pub fn center_source(&self) -> PointMass {
        PointMass::new(self.center, self.center_mass)
    }

    /// Unit vector perpendicular to the center direction on the orbital plane.
    /// Zero when `position` sits on the vertical through the center.
    pub fn tangent(&self, position: Vec3, direction: OrbitDirection) -> Vec3 {
        let to_center = (self.center - position).normalize_or_zero();
        (to_center.cross(Vec3::Y) * direction.sign()).normalize_or_zero()
    }

    /// Inelastic walls on X and Z: a coordinate past the bound is clipped and
    /// the matching velocity component zeroed.
    pub fn clamp(&self, mut position: Vec3, mut velocity: Vec3) -> (Vec3, Vec3) {
        let bound = self.max_distance;
        if position.x < -bound || position.x > bound {
            position.x = position.x.clamp(-bound, bound);
            velocity.x = 0.0;
        }
        if position.z < -bound || position.z > bound {
            position.z = position.z.clamp(-bound, bound);
            velocity.z = 0.0;
        }
        (position, velocity)
    }
}
