use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::{MIN_PARTICLE_RADIUS, PARTICLE_RADIUS_RANGE};

/// Opaque key into a renderer-owned drawable table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DrawableId(pub u64);

/// Identity of a death subscriber registered on a body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(pub u64);

/// Lifecycle of a body. Transitions only run forward:
/// `Alive -> Dying -> Dead`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Alive,
    /// Fading out. A collided body is frozen in place while it fades.
    Dying { collided: bool },
    /// Fully faded; the owner is expected to drop and replace it.
    Dead,
}

impl Phase {
    pub fn is_alive(&self) -> bool {
        matches!(self, Self::Alive)
    }

    /// Ordinal used to check that phases never move backward
    pub fn rank(&self) -> u8 {
        match self {
            Self::Alive => 0,
            Self::Dying { .. } => 1,
            Self::Dead => 2,
        }
    }
}

/// Which way a body circles the center, fixed at creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrbitDirection {
    Forward,
    Reverse,
}

impl OrbitDirection {
    /// Coin flip
    pub fn random(rng: &mut impl Rng) -> Self {
        if rng.gen_bool(0.5) {
            Self::Reverse
        } else {
            Self::Forward
        }
    }

    pub fn sign(&self) -> f32 {
        match self {
            Self::Forward => 1.0,
            Self::Reverse => -1.0,
        }
    }
}

/// Surface description handed to the renderer
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
    pub shininess: f32,
    /// Opacity in [0, 1]; decremented while a body fades out
    pub alpha: f32,
    /// Optional texture path, resolved by the renderer
    pub texture: Option<String>,
}

impl Material {
    /// Single color used for ambient, diffuse and specular
    pub fn solid(color: Vec3, shininess: f32) -> Self {
        Self {
            ambient: color,
            diffuse: color,
            specular: color,
            shininess,
            alpha: 1.0,
            texture: None,
        }
    }
}

/// Particle radius policy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ParticleSize {
    /// Uniform in [0.2, 0.5)
    Random,
    Fixed(f32),
}

impl ParticleSize {
    pub fn sample(&self, rng: &mut impl Rng) -> f32 {
        match *self {
            Self::Random => rng.gen_range(0.0..1.0f32) * PARTICLE_RADIUS_RANGE + MIN_PARTICLE_RADIUS,
            Self::Fixed(radius) => radius,
        }
    }
}

/// Particle color policy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ParticleColor {
    /// Independent uniform channels
    Random,
    Rgb([f32; 3]),
}

impl ParticleColor {
    pub fn sample(&self, rng: &mut impl Rng) -> Vec3 {
        match *self {
            Self::Random => Vec3::new(
                rng.gen_range(0.0..1.0),
                rng.gen_range(0.0..1.0),
                rng.gen_range(0.0..1.0),
            ),
            Self::Rgb(rgb) => Vec3::from_array(rgb),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_phase_rank_is_forward_only() {
        assert!(Phase::Alive.rank() < Phase::Dying { collided: false }.rank());
        assert_eq!(
            Phase::Dying { collided: false }.rank(),
            Phase::Dying { collided: true }.rank()
        );
        assert!(Phase::Dying { collided: true }.rank() < Phase::Dead.rank());
    }

    #[test]
    fn test_random_size_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..1000 {
            let r = ParticleSize::Random.sample(&mut rng);
            assert!((0.2..0.5).contains(&r), "radius {} out of range", r);
        }
        assert_eq!(ParticleSize::Fixed(0.75).sample(&mut rng), 0.75);
    }

    #[test]
    fn test_orbit_direction_is_roughly_even() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let reverse = (0..2000)
            .filter(|_| OrbitDirection::random(&mut rng) == OrbitDirection::Reverse)
            .count();
        assert!((800..1200).contains(&reverse), "reverse = {}", reverse);
    }
}
