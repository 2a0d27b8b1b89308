//! Ring-based spawn placement.
//!
//! Bodies sit in concentric rings around the center. Ring `k` (1-indexed)
//! offers `6k` candidate slots, each left empty with 10% probability; kept
//! candidates get a random angle and a radius within ±1 of the ring's
//! nominal radius.

use std::f32::consts::TAU;

use glam::Vec3;
use gravwell_core::constants::{
    INITIAL_RING_GROWTH, INITIAL_RING_RADIUS, REPLACEMENT_RING_GAP, RING_JITTER, RING_SKIP_CHANCE,
    RING_SLOTS,
};
use rand::Rng;

/// A chosen spawn point and the ring it came from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingSlot {
    pub position: Vec3,
    /// 1-indexed ring number
    pub ring: usize,
    pub nominal_radius: f32,
}

/// Place exactly `count` bodies on rings around `center`.
///
/// Terminates in O(count) rings: once the ring index exceeds `count`, no
/// more candidates are skipped, so every further ring contributes at least
/// one slot.
pub fn generate_rings(count: usize, center: Vec3, rng: &mut impl Rng) -> Vec<RingSlot> {
    let mut slots = Vec::with_capacity(count);
    let mut ring = 1;
    let mut radius = INITIAL_RING_RADIUS;

    while slots.len() < count {
        let candidates = (RING_SLOTS * ring).min(count - slots.len());
        let may_skip = ring <= count;
        for _ in 0..candidates {
            if may_skip && rng.gen_bool(RING_SKIP_CHANCE) {
                continue;
            }
            slots.push(RingSlot {
                position: place_on_ring(center, radius, rng),
                ring,
                nominal_radius: radius,
            });
        }
        radius += INITIAL_RING_GROWTH * ring as f32;
        ring += 1;
    }

    slots
}

/// Nominal radius of ring `ring` in the initial layout:
/// `3 + 0.5 * (1 + 2 + ... + (ring - 1))`
pub fn initial_ring_radius(ring: usize) -> f32 {
    let ring = ring.max(1) as f32;
    INITIAL_RING_RADIUS + INITIAL_RING_GROWTH * ring * (ring - 1.0) / 2.0
}

/// Ring that the `population`-th body would land on with full rings
pub fn ring_for_population(population: usize) -> usize {
    let mut ring = 1;
    let mut capacity = RING_SLOTS;
    while capacity < population {
        ring += 1;
        capacity += RING_SLOTS * ring;
    }
    ring
}

/// Nominal radius for a replacement spawn on the ring the current
/// population reaches: `3 + sum over j < ring of (2 + j)`. These rings are
/// wider apart than the initial layout's; the domain walls catch anything
/// placed past `max_distance`.
pub fn replacement_ring_radius(population: usize) -> f32 {
    let ring = ring_for_population(population) as f32;
    INITIAL_RING_RADIUS + REPLACEMENT_RING_GAP * (ring - 1.0) + ring * (ring - 1.0) / 2.0
}

/// Single replacement slot for a population of `population` bodies
pub fn replacement_slot(population: usize, center: Vec3, rng: &mut impl Rng) -> RingSlot {
    let ring = ring_for_population(population);
    let radius = replacement_ring_radius(population);
    RingSlot {
        position: place_on_ring(center, radius, rng),
        ring,
        nominal_radius: radius,
    }
}

/// One candidate on a ring: uniform angle, radius jittered by ±`RING_JITTER`
pub fn place_on_ring(center: Vec3, nominal_radius: f32, rng: &mut impl Rng) -> Vec3 {
    let angle = rng.gen_range(0.0..TAU);
    let radius = nominal_radius + (rng.gen_range(0.0..1.0f32) - 0.5) * 2.0 * RING_JITTER;
    Vec3::new(
        center.x + radius * angle.cos(),
        center.y,
        center.z + radius * angle.sin(),
    )
}

/// Distance from `center` on the XZ plane
pub fn planar_distance(center: Vec3, position: Vec3) -> f32 {
    let d = position - center;
    (d.x * d.x + d.z * d.z).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_exact_count() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for count in [0, 1, 5, 6, 7, 50, 200] {
            assert_eq!(generate_rings(count, Vec3::ZERO, &mut rng).len(), count);
        }
    }

    #[test]
    fn test_seven_bodies_stay_in_their_bands() {
        let center = Vec3::new(0.0, 1.0, 0.0);
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let slots = generate_rings(7, center, &mut rng);
        assert_eq!(slots.len(), 7);
        for slot in &slots {
            let r = planar_distance(center, slot.position);
            assert!(
                (slot.nominal_radius - RING_JITTER..=slot.nominal_radius + RING_JITTER).contains(&r),
                "ring {} nominal {} got {}",
                slot.ring,
                slot.nominal_radius,
                r
            );
            assert_eq!(slot.position.y, 1.0);
            assert!((slot.nominal_radius - initial_ring_radius(slot.ring)).abs() < 1e-5);
        }
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let a = generate_rings(30, Vec3::ZERO, &mut ChaCha8Rng::seed_from_u64(9));
        let b = generate_rings(30, Vec3::ZERO, &mut ChaCha8Rng::seed_from_u64(9));
        assert_eq!(a, b);
    }

    #[test]
    fn test_terminates_when_every_candidate_is_skipped() {
        // An rng stuck at 0 makes gen_bool(0.1) always true
        let mut rng = rand::rngs::mock::StepRng::new(0, 0);
        let slots = generate_rings(5, Vec3::ZERO, &mut rng);
        assert_eq!(slots.len(), 5);
        assert!(slots.iter().all(|s| s.ring > 5));
    }

    #[test]
    fn test_ring_for_population() {
        assert_eq!(ring_for_population(0), 1);
        assert_eq!(ring_for_population(6), 1);
        assert_eq!(ring_for_population(7), 2);
        assert_eq!(ring_for_population(18), 2);
        assert_eq!(ring_for_population(19), 3);
    }

    #[test]
    fn test_initial_and_replacement_growth_differ() {
        assert_eq!(initial_ring_radius(1), 3.0);
        assert_eq!(initial_ring_radius(2), 3.5);
        assert_eq!(initial_ring_radius(3), 4.5);

        // 3, then +3, +4, +5 ...
        assert_eq!(replacement_ring_radius(6), 3.0);
        assert_eq!(replacement_ring_radius(7), 6.0);
        assert_eq!(replacement_ring_radius(19), 10.0);
        assert_eq!(replacement_ring_radius(37), 15.0);
        for population in [7, 19, 37, 100] {
            let ring = ring_for_population(population);
            assert!(replacement_ring_radius(population) > initial_ring_radius(ring));
        }
    }

    #[test]
    fn test_replacement_slot_in_band() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        for _ in 0..100 {
            let slot = replacement_slot(40, Vec3::ZERO, &mut rng);
            let r = planar_distance(Vec3::ZERO, slot.position);
            assert!((r - slot.nominal_radius).abs() <= RING_JITTER);
        }
    }
}
