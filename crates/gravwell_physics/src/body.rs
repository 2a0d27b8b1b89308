use std::f32::consts::PI;

use glam::Vec3;
use gravwell_core::constants::{
    ATTRACTOR_RADIUS, BASE_LIFETIME, DEFAULT_SHININESS, FADE_STEP, LIFETIME_PER_MASS,
    MASS_OF_BLACK_HOLE, ORBIT_WEIGHT, ROTATION_DENOMINATOR,
};
use gravwell_core::{DrawableId, Material, OrbitDirection, Phase, SimConfig, SubscriberId};
use rand::Rng;

use crate::domain::Domain;
use crate::drawable::{DrawableDesc, DrawableStore, Shape};
use crate::forces::{self, PointMass};

/// Axis-aligned box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl Bounds {
    /// Extents of a flat `[x, y, z, ...]` vertex list. Empty input yields a
    /// degenerate box at the origin.
    pub fn from_vertices(vertices: &[f32]) -> Self {
        let mut min = Vec3::splat(f32::MAX);
        let mut max = Vec3::splat(f32::MIN);
        for v in vertices.chunks_exact(3) {
            let vertex = Vec3::new(v[0], v[1], v[2]);
            min = min.min(vertex);
            max = max.max(vertex);
        }
        if min.x > max.x {
            return Self {
                min: Vec3::ZERO,
                max: Vec3::ZERO,
            };
        }
        Self { min, max }
    }

    pub fn translated(&self, offset: Vec3) -> Self {
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    /// Strictly positive overlap on all three axes
    pub fn overlaps(&self, other: &Bounds) -> bool {
        let overlap = self.max.min(other.max) - self.min.max(other.min);
        overlap.x > 0.0 && overlap.y > 0.0 && overlap.z > 0.0
    }
}

/// Ordinary orbiting particle, or a fixed gravity well
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    Orbiting,
    /// Exerts gravity with `MASS_OF_BLACK_HOLE` but never moves, ages or dies
    Attractor,
}

/// What a call to `Body::update` did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyUpdate {
    Moved,
    /// Collided and fading: position untouched this tick
    Frozen,
    /// Attractors only drop their accumulated forces
    Fixed,
    /// Fade finished this tick; the body is now `Phase::Dead` and its
    /// subscribers must be told
    Expired,
}

/// One simulated entity. Position lives in the drawable store; the body keeps
/// only the key.
#[derive(Debug, Clone)]
pub struct Body {
    kind: BodyKind,
    drawable: DrawableId,
    velocity: Vec3,
    acceleration: Vec3,
    mass: f32,
    orbit: OrbitDirection,
    life_remaining: i64,
    phase: Phase,
    local_bounds: Bounds,
    subscribers: Vec<SubscriberId>,
}

impl Body {
    /// Create an orbiting body and its sphere drawable.
    ///
    /// Density is uniform in [0, 1) and mass is `4/3 pi r^3 * density`.
    /// The body starts on the tangent through `position`.
    pub fn spawn(
        store: &mut impl DrawableStore,
        domain: &Domain,
        position: Vec3,
        radius: f32,
        color: Vec3,
        rng: &mut impl Rng,
    ) -> Self {
        let orbit = OrbitDirection::random(rng);
        let velocity = (domain.center - position).cross(Vec3::Y) * orbit.sign();

        let volume = 4.0 / 3.0 * PI * radius.powi(3);
        let density = rng.gen_range(0.0..1.0f32);
        let mass = volume * density;
        let life_remaining =
            (BASE_LIFETIME + rng.gen_range(0.0..1.0f32) * LIFETIME_PER_MASS * mass) as i64;

        let drawable = store.create(DrawableDesc {
            shape: Shape::Sphere { radius },
            translation: position,
            material: Material::solid(color, DEFAULT_SHININESS),
        });
        let local_bounds = Bounds::from_vertices(store.vertices(drawable));

        Self {
            kind: BodyKind::Orbiting,
            drawable,
            velocity,
            acceleration: Vec3::ZERO,
            mass,
            orbit,
            life_remaining,
            phase: Phase::Alive,
            local_bounds,
            subscribers: Vec::new(),
        }
    }

    /// Create a fixed gravity well: black body with a faint blue glow
    pub fn attractor(store: &mut impl DrawableStore, position: Vec3) -> Self {
        let black = Vec3::ZERO;
        let material = Material {
            ambient: Vec3::new(0.1, 0.1, 0.2),
            diffuse: black,
            specular: black,
            ..Material::solid(black, DEFAULT_SHININESS)
        };
        let drawable = store.create(DrawableDesc {
            shape: Shape::Sphere {
                radius: ATTRACTOR_RADIUS,
            },
            translation: position,
            material,
        });
        let local_bounds = Bounds::from_vertices(store.vertices(drawable));

        Self {
            kind: BodyKind::Attractor,
            drawable,
            velocity: Vec3::ZERO,
            acceleration: Vec3::ZERO,
            mass: MASS_OF_BLACK_HOLE,
            orbit: OrbitDirection::Forward,
            life_remaining: i64::MAX,
            phase: Phase::Alive,
            local_bounds,
            subscribers: Vec::new(),
        }
    }

    pub fn is_attractor(&self) -> bool {
        self.kind == BodyKind::Attractor
    }

    pub fn drawable(&self) -> DrawableId {
        self.drawable
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn mass(&self) -> f32 {
        match self.kind {
            BodyKind::Orbiting => self.mass,
            BodyKind::Attractor => MASS_OF_BLACK_HOLE,
        }
    }

    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    pub fn acceleration(&self) -> Vec3 {
        self.acceleration
    }

    pub fn life_remaining(&self) -> i64 {
        self.life_remaining
    }

    /// World position, read from the drawable. A body whose drawable is gone
    /// reads as the origin.
    pub fn position(&self, store: &impl DrawableStore) -> Vec3 {
        store.translation(self.drawable).unwrap_or(Vec3::ZERO)
    }

    pub fn as_source(&self, store: &impl DrawableStore) -> PointMass {
        PointMass::new(self.position(store), self.mass())
    }

    /// Local bounds moved to the current world position
    pub fn bounds(&self, store: &impl DrawableStore) -> Bounds {
        self.local_bounds.translated(self.position(store))
    }

    pub fn intersects(&self, other: &Body, store: &impl DrawableStore) -> bool {
        self.bounds(store).overlaps(&other.bounds(store))
    }

    /// Accumulate the pull of `source`. Sources closer than one unit are ignored.
    pub fn apply_gravity(
        &mut self,
        store: &impl DrawableStore,
        source: PointMass,
        config: &SimConfig,
    ) {
        let position = self.position(store);
        if let Some(a) =
            forces::gravity_acceleration(config.gravitational_coefficient, position, source)
        {
            self.acceleration += a;
        }
    }

    pub fn apply_wind(&mut self, config: &SimConfig) {
        self.acceleration += forces::wind_acceleration(config.wind_x, config.wind_z);
    }

    /// Start fading. `collided` freezes the body in place until it is gone.
    /// Dead bodies and attractors ignore this.
    pub fn kill(&mut self, collided: bool) {
        if self.is_attractor() {
            return;
        }
        self.phase = match self.phase {
            Phase::Alive => Phase::Dying { collided },
            Phase::Dying { collided: was } => Phase::Dying {
                collided: was || collided,
            },
            Phase::Dead => Phase::Dead,
        };
    }

    /// Advance one tick of `dt` milliseconds
    pub fn update(
        &mut self,
        dt: f32,
        store: &mut impl DrawableStore,
        domain: &Domain,
        config: &SimConfig,
    ) -> BodyUpdate {
        if self.is_attractor() {
            self.acceleration = Vec3::ZERO;
            return BodyUpdate::Fixed;
        }

        match self.phase {
            Phase::Dead => return BodyUpdate::Expired,
            Phase::Dying { collided } => {
                let Some(mut material) = store.material(self.drawable).cloned() else {
                    self.phase = Phase::Dead;
                    return BodyUpdate::Expired;
                };
                material.alpha -= FADE_STEP;
                if material.alpha <= 0.0 {
                    self.phase = Phase::Dead;
                    return BodyUpdate::Expired;
                }
                store.set_material(self.drawable, material);
                if collided {
                    self.acceleration = Vec3::ZERO;
                    return BodyUpdate::Frozen;
                }
            }
            Phase::Alive => {}
        }

        // Steer toward the tangent at the current speed
        let position = self.position(&*store);
        let desired = domain.tangent(position, self.orbit) * self.velocity.length();
        self.velocity += (desired - self.velocity) * ORBIT_WEIGHT;

        self.velocity += self.acceleration * dt;
        self.velocity = self.velocity.clamp_length_max(config.max_speed);

        let (position, velocity) = domain.clamp(position + self.velocity * dt, self.velocity);
        self.velocity = velocity;

        store.set_translation(self.drawable, position);
        store.rotate(
            self.drawable,
            Vec3::Y,
            PI / ROTATION_DENOMINATOR * self.orbit.sign(),
        );
        self.acceleration = Vec3::ZERO;
        self.life_remaining -= 1;
        if self.phase.is_alive() && self.life_remaining < 0 {
            self.kill(false);
        }
        BodyUpdate::Moved
    }

    /// Register for the death notice. Returns false if already subscribed.
    pub fn subscribe(&mut self, subscriber: SubscriberId) -> bool {
        if self.subscribers.contains(&subscriber) {
            return false;
        }
        self.subscribers.push(subscriber);
        true
    }

    /// O(n) in the subscriber count, which is one or two in practice
    pub fn unsubscribe(&mut self, subscriber: SubscriberId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|s| *s != subscriber);
        self.subscribers.len() != before
    }

    pub fn is_watched_by(&self, subscriber: SubscriberId) -> bool {
        self.subscribers.contains(&subscriber)
    }

    pub fn subscribers(&self) -> &[SubscriberId] {
        &self.subscribers
    }

    #[cfg(test)]
    pub(crate) fn set_velocity(&mut self, velocity: Vec3) {
        self.velocity = velocity;
    }

    #[cfg(test)]
    pub(crate) fn set_life_remaining(&mut self, ticks: i64) {
        self.life_remaining = ticks;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drawable::DrawableTable;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn setup() -> (DrawableTable, Domain, SimConfig, ChaCha8Rng) {
        let config = SimConfig::default();
        (
            DrawableTable::new(),
            Domain::from_config(&config),
            config,
            ChaCha8Rng::seed_from_u64(1),
        )
    }

    fn spawn_at(
        store: &mut DrawableTable,
        domain: &Domain,
        rng: &mut ChaCha8Rng,
        position: Vec3,
    ) -> Body {
        Body::spawn(store, domain, position, 0.3, Vec3::ONE, rng)
    }

    #[test]
    fn test_spawn_mass_and_lifetime() {
        let (mut store, domain, _, mut rng) = setup();
        for _ in 0..50 {
            let body = spawn_at(&mut store, &domain, &mut rng, Vec3::new(4.0, 1.0, 0.0));
            let max_mass = 4.0 / 3.0 * PI * 0.3f32.powi(3);
            assert!(body.mass() >= 0.0 && body.mass() < max_mass);
            assert!(body.life_remaining() >= 1000);
            assert!(body.life_remaining() <= 1000 + (10_000.0 * max_mass) as i64 + 1);
            assert_eq!(body.phase(), Phase::Alive);
        }
    }

    #[test]
    fn test_spawn_bounds_come_from_vertices() {
        let (mut store, domain, _, mut rng) = setup();
        let body = spawn_at(&mut store, &domain, &mut rng, Vec3::new(4.0, 1.0, 0.0));
        let b = body.bounds(&store);
        assert!((b.min - Vec3::new(3.7, 0.7, -0.3)).length() < 1e-4, "{:?}", b);
        assert!((b.max - Vec3::new(4.3, 1.3, 0.3)).length() < 1e-4, "{:?}", b);
    }

    #[test]
    fn test_gravity_short_circuits_at_half_unit() {
        let (mut store, domain, config, mut rng) = setup();
        let mut a = spawn_at(&mut store, &domain, &mut rng, Vec3::new(4.0, 1.0, 0.0));
        let b = spawn_at(&mut store, &domain, &mut rng, Vec3::new(4.5, 1.0, 0.0));

        a.apply_wind(&SimConfig {
            wind_x: 2.0,
            ..config.clone()
        });
        let before = a.acceleration();
        a.apply_gravity(&store, b.as_source(&store), &config);
        assert_eq!(a.acceleration(), before);
    }

    #[test]
    fn test_gravity_pulls_toward_source() {
        let (mut store, domain, config, mut rng) = setup();
        let mut a = spawn_at(&mut store, &domain, &mut rng, Vec3::new(4.0, 1.0, 0.0));
        a.apply_gravity(&store, domain.center_source(), &config);
        assert!(a.acceleration().x < 0.0);
        assert_eq!(a.acceleration().y, 0.0);
    }

    #[test]
    fn test_domain_clamp_on_update() {
        let (mut store, domain, mut config, mut rng) = setup();
        config.max_speed = 10_000.0;
        let mut body = spawn_at(&mut store, &domain, &mut rng, Vec3::new(9.5, 1.0, 0.0));
        body.set_velocity(Vec3::new(1000.0, 0.0, 0.0));

        assert_eq!(body.update(1.0, &mut store, &domain, &config), BodyUpdate::Moved);
        let p = body.position(&store);
        assert_eq!(p.x, domain.max_distance);
        assert_eq!(body.velocity().x, 0.0);
    }

    #[test]
    fn test_speed_is_capped() {
        let (mut store, domain, config, mut rng) = setup();
        let mut body = spawn_at(&mut store, &domain, &mut rng, Vec3::new(4.0, 1.0, 0.0));
        body.update(16.0, &mut store, &domain, &config);
        assert!(body.velocity().length() <= config.max_speed * 1.0001);
        assert_eq!(body.acceleration(), Vec3::ZERO);
    }

    #[test]
    fn test_lifetime_expiry_starts_uncollided_fade() {
        let (mut store, domain, config, mut rng) = setup();
        let mut body = spawn_at(&mut store, &domain, &mut rng, Vec3::new(4.0, 1.0, 0.0));
        body.set_life_remaining(1);

        body.update(16.0, &mut store, &domain, &config);
        assert_eq!(body.phase(), Phase::Alive);
        assert_eq!(body.life_remaining(), 0);
        body.update(16.0, &mut store, &domain, &config);
        assert_eq!(body.life_remaining(), -1);
        assert_eq!(body.phase(), Phase::Dying { collided: false });

        // Still moves while fading
        let before = body.position(&store);
        body.update(16.0, &mut store, &domain, &config);
        assert_ne!(body.position(&store), before);
    }

    #[test]
    fn test_collided_body_is_frozen_until_dead() {
        let (mut store, domain, config, mut rng) = setup();
        let mut body = spawn_at(&mut store, &domain, &mut rng, Vec3::new(4.0, 1.0, 0.0));
        body.update(16.0, &mut store, &domain, &config);
        body.kill(true);

        let frozen_at = body.position(&store);
        let mut ticks = 0;
        loop {
            ticks += 1;
            let outcome = body.update(16.0, &mut store, &domain, &config);
            if outcome == BodyUpdate::Expired {
                break;
            }
            assert_eq!(outcome, BodyUpdate::Frozen);
            assert_eq!(body.position(&store), frozen_at);
            assert!(ticks < 2000, "fade never finished");
        }
        assert_eq!(body.phase(), Phase::Dead);
        assert!((995..=1005).contains(&ticks), "faded in {} ticks", ticks);
    }

    #[test]
    fn test_kill_never_goes_backward() {
        let (mut store, domain, _, mut rng) = setup();
        let mut body = spawn_at(&mut store, &domain, &mut rng, Vec3::new(4.0, 1.0, 0.0));
        body.kill(true);
        body.kill(false);
        assert_eq!(body.phase(), Phase::Dying { collided: true });
    }

    #[test]
    fn test_attractor_is_inert() {
        let (mut store, domain, config, _) = setup();
        let position = Vec3::new(2.0, 1.0, 2.0);
        let mut well = Body::attractor(&mut store, position);
        well.apply_gravity(&store, domain.center_source(), &config);
        well.kill(true);
        for _ in 0..10 {
            assert_eq!(well.update(16.0, &mut store, &domain, &config), BodyUpdate::Fixed);
        }
        assert_eq!(well.phase(), Phase::Alive);
        assert_eq!(well.position(&store), position);
        assert_eq!(well.mass(), MASS_OF_BLACK_HOLE);
    }

    #[test]
    fn test_attractor_drops_accumulated_forces() {
        let (mut store, domain, config, _) = setup();
        let windy = SimConfig {
            wind_x: 1.0,
            ..config
        };
        let mut well = Body::attractor(&mut store, Vec3::new(5.0, 1.0, 0.0));
        for _ in 0..100 {
            well.apply_gravity(&store, domain.center_source(), &windy);
            well.apply_wind(&windy);
            assert_ne!(well.acceleration(), Vec3::ZERO);
            well.update(16.0, &mut store, &domain, &windy);
            assert_eq!(well.acceleration(), Vec3::ZERO);
        }
    }

    #[test]
    fn test_lifetime_counts_down_while_alive() {
        let (mut store, domain, config, mut rng) = setup();
        let mut body = spawn_at(&mut store, &domain, &mut rng, Vec3::new(4.0, 1.0, 0.0));
        let mut previous = body.life_remaining();
        while body.phase().is_alive() {
            body.apply_gravity(&store, domain.center_source(), &config);
            body.update(16.0, &mut store, &domain, &config);
            assert_eq!(body.life_remaining(), previous - 1);
            previous = body.life_remaining();
        }
        assert!(previous < 0);
        assert_eq!(body.phase(), Phase::Dying { collided: false });
    }

    #[test]
    fn test_intersection_requires_overlap() {
        let (mut store, domain, _, mut rng) = setup();
        let a = spawn_at(&mut store, &domain, &mut rng, Vec3::new(4.0, 1.0, 0.0));
        let b = spawn_at(&mut store, &domain, &mut rng, Vec3::new(4.2, 1.0, 0.0));
        let c = spawn_at(&mut store, &domain, &mut rng, Vec3::new(4.7, 1.0, 0.0));
        assert!(a.intersects(&b, &store));
        assert!(b.intersects(&a, &store));
        assert!(!a.intersects(&c, &store));
    }

    #[test]
    fn test_subscriptions() {
        let (mut store, domain, _, mut rng) = setup();
        let mut body = spawn_at(&mut store, &domain, &mut rng, Vec3::new(4.0, 1.0, 0.0));
        assert!(body.subscribe(SubscriberId(1)));
        assert!(!body.subscribe(SubscriberId(1)));
        assert!(body.subscribe(SubscriberId(2)));
        assert!(body.unsubscribe(SubscriberId(1)));
        assert!(!body.unsubscribe(SubscriberId(1)));
        assert_eq!(body.subscribers(), &[SubscriberId(2)]);
        assert!(body.is_watched_by(SubscriberId(2)));
    }
}
