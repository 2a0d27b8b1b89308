// Simulation units:
// - Distance: 1 unit = one floor tile; the domain spans [-MAX_DISTANCE, MAX_DISTANCE]
// - Time: 1 unit = 1 millisecond (frame deltas are fed in ms)
// - Mass: arbitrary, tuned so orbits stay visually plausible with the default G

/// Default gravitational coefficient
pub const G: f32 = 6.674_3e-10;

/// Mass of the fixed point at the domain center
pub const MASS_OF_SUN: f32 = 1.0e5;

/// Mass of a user-placed attractor (gravity well)
pub const MASS_OF_BLACK_HOLE: f32 = 1.0e6;

/// Pairs closer than this skip gravity entirely (no singularity at contact range)
pub const MIN_GRAVITY_DISTANCE: f32 = 1.0;

/// Scale applied to the (wind_x, 0, wind_z) vector before it is accumulated
pub const WIND_WEIGHT: f32 = 1.0e-7;

/// Fraction of the gap between current and tangential velocity closed per tick
pub const ORBIT_WEIGHT: f32 = 0.01;

/// Spin per motion update is PI / ROTATION_DENOMINATOR radians
pub const ROTATION_DENOMINATOR: f32 = 360.0;

/// Alpha removed from a dying body's material every tick
pub const FADE_STEP: f32 = 0.001;

/// Base lifetime in ticks, before the mass-dependent bonus
pub const BASE_LIFETIME: f32 = 1000.0;

/// Lifetime bonus per unit of mass, scaled by a uniform random factor
pub const LIFETIME_PER_MASS: f32 = 10_000.0;

/// Radius of the innermost spawn ring
pub const INITIAL_RING_RADIUS: f32 = 3.0;

/// Candidate slots per ring index (ring k holds RING_SLOTS * k)
pub const RING_SLOTS: usize = 6;

/// Probability that a ring candidate is left empty
pub const RING_SKIP_CHANCE: f64 = 0.1;

/// Radial jitter around a ring's nominal radius (±)
pub const RING_JITTER: f32 = 1.0;

/// Initial population: ring k+1 sits INITIAL_RING_GROWTH * k beyond ring k
pub const INITIAL_RING_GROWTH: f32 = 0.5;

/// Replacements: ring k+1 sits REPLACEMENT_RING_GAP + k beyond ring k
pub const REPLACEMENT_RING_GAP: f32 = 2.0;

/// Random particle radius is drawn from [MIN_PARTICLE_RADIUS, MIN_PARTICLE_RADIUS + PARTICLE_RADIUS_RANGE)
pub const MIN_PARTICLE_RADIUS: f32 = 0.2;
pub const PARTICLE_RADIUS_RANGE: f32 = 0.3;

/// Radius of a dropped attractor
pub const ATTRACTOR_RADIUS: f32 = 1.0;

/// Specular exponent given to every body material
pub const DEFAULT_SHININESS: f32 = 10.0;
