use glam::Vec3;
use gravwell_core::constants::{MIN_GRAVITY_DISTANCE, WIND_WEIGHT};

/// Anything that pulls: another body, the domain center, an attractor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointMass {
    pub position: Vec3,
    pub mass: f32,
}

impl PointMass {
    pub fn new(position: Vec3, mass: f32) -> Self {
        Self { position, mass }
    }
}

/// Acceleration that `source` induces on a body at `position`.
/// Returns `None` when the two are closer than `MIN_GRAVITY_DISTANCE`.
pub fn gravity_acceleration(g: f32, position: Vec3, source: PointMass) -> Option<Vec3> {
    let direction = source.position - position;
    let distance = direction.length();
    if distance < MIN_GRAVITY_DISTANCE {
        return None;
    }
    // F = G * m_self * m_source / d^2, a = F / m_self; m_self cancels
    let magnitude = g * source.mass / (distance * distance);
    Some(direction / distance * magnitude)
}

/// Constant horizontal push
pub fn wind_acceleration(wind_x: f32, wind_z: f32) -> Vec3 {
    Vec3::new(wind_x, 0.0, wind_z) * WIND_WEIGHT
}
