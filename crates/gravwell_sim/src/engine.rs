use std::sync::atomic::{AtomicU64, Ordering};

use bevy::log::{debug, info};
use bevy::prelude::Resource;
use glam::Vec3;
use gravwell_core::{DrawableId, Phase, SimConfig, SubscriberId};
use gravwell_physics::placement;
use gravwell_physics::{Body, BodyUpdate, Bounds, Domain, DrawableStore, PointMass};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::observer::{MembershipObserver, ObserverHandle, ObserverRegistry};

/// Every engine subscribes to its bodies under its own id
static NEXT_ENGINE_ID: AtomicU64 = AtomicU64::new(1);

/// Owns the live bodies and advances them once per frame.
///
/// Each tick runs a force phase over a frozen snapshot of positions, then
/// integrates every body. Bodies that finish fading are swapped for a new
/// body on a ring, so the population never changes across ticks.
#[derive(Resource, Debug)]
pub struct ParticleEngine {
    bodies: Vec<Body>,
    domain: Domain,
    config: SimConfig,
    rng: ChaCha8Rng,
    observers: ObserverRegistry,
    subscriber: SubscriberId,
    running: bool,
    /// Timestamp (ms) of the previous frame callback
    last_frame: Option<f64>,
    ticks: u64,
}

impl ParticleEngine {
    /// Build `config.total_particles` bodies around `config.center()`, seeded
    /// from `config.seed`
    pub fn new(config: SimConfig, store: &mut impl DrawableStore) -> Self {
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        let count = config.total_particles as usize;
        let center = config.center();
        Self::with_rng(count, center, config, rng, store)
    }

    /// Build `target_count` bodies around `center` using an explicit rng
    pub fn with_rng(
        target_count: usize,
        center: Vec3,
        config: SimConfig,
        mut rng: ChaCha8Rng,
        store: &mut impl DrawableStore,
    ) -> Self {
        let domain = Domain::new(center, config.max_distance, config.center_mass);
        let subscriber = SubscriberId(NEXT_ENGINE_ID.fetch_add(1, Ordering::Relaxed));
        let slots = placement::generate_rings(target_count, center, &mut rng);

        let mut engine = Self {
            bodies: Vec::with_capacity(target_count),
            domain,
            config,
            rng,
            observers: ObserverRegistry::default(),
            subscriber,
            running: true,
            last_frame: None,
            ticks: 0,
        };
        for slot in slots {
            let body = engine.spawn_body(slot.position, store);
            engine.bodies.push(body);
        }

        info!(
            "Particle engine {} started with {} bodies around ({:.1}, {:.1}, {:.1})",
            subscriber.0,
            engine.bodies.len(),
            center.x,
            center.y,
            center.z
        );
        engine
    }

    fn spawn_body(&mut self, position: Vec3, store: &mut impl DrawableStore) -> Body {
        let radius = self.config.particle_size.sample(&mut self.rng);
        let color = self.config.particle_color.sample(&mut self.rng);
        let mut body = Body::spawn(store, &self.domain, position, radius, color, &mut self.rng);
        body.subscribe(self.subscriber);
        body
    }

    /// Advance the simulation by `dt` milliseconds.
    ///
    /// O(n^2) in the population; populations are kept to tens or low hundreds.
    pub fn tick(&mut self, dt: f32, store: &mut impl DrawableStore) {
        self.ticks += 1;
        let n = self.bodies.len();

        // Force phase: every pull is computed against the same positions
        let sources: Vec<PointMass> = self.bodies.iter().map(|b| b.as_source(&*store)).collect();
        let mut collided = vec![false; n];
        if self.config.particle_collisions {
            let bounds: Vec<Bounds> = self.bodies.iter().map(|b| b.bounds(&*store)).collect();
            for i in 0..n {
                for j in (i + 1)..n {
                    if bounds[i].overlaps(&bounds[j]) {
                        collided[i] = true;
                        collided[j] = true;
                    }
                }
            }
        }

        let center = self.domain.center_source();
        for (i, body) in self.bodies.iter_mut().enumerate() {
            if collided[i] {
                body.kill(true);
            }
            if body.is_attractor() {
                continue;
            }
            for (j, source) in sources.iter().enumerate() {
                if i != j {
                    body.apply_gravity(&*store, *source, &self.config);
                }
            }
            body.apply_gravity(&*store, center, &self.config);
            body.apply_wind(&self.config);
        }

        // Integration phase
        let mut expired: Vec<(DrawableId, bool)> = Vec::new();
        for body in &mut self.bodies {
            if body.update(dt, store, &self.domain, &self.config) == BodyUpdate::Expired {
                expired.push((body.drawable(), body.is_watched_by(self.subscriber)));
            }
        }

        // Bodies this engine watches are replaced; the rest are only dropped
        for (drawable, watched) in expired {
            if watched {
                self.handle_particle_death(drawable, store);
            } else {
                self.retire(drawable, store);
            }
        }
    }

    /// Frame callback: ticks by the time elapsed since the previous call.
    /// The first call ticks with zero elapsed time. Returns false once stopped.
    pub fn advance_to(&mut self, now_ms: f64, store: &mut impl DrawableStore) -> bool {
        if !self.running {
            return false;
        }
        let dt = self.last_frame.map_or(0.0, |last| (now_ms - last).max(0.0));
        self.last_frame = Some(now_ms);
        self.tick(dt as f32, store);
        true
    }

    /// Swap a fully faded body for a new one. Observers see the removal and
    /// then the addition. Does nothing unless the body is `Phase::Dead`.
    pub fn handle_particle_death(
        &mut self,
        drawable: DrawableId,
        store: &mut impl DrawableStore,
    ) -> bool {
        let Some(index) = self.bodies.iter().position(|b| b.drawable() == drawable) else {
            return false;
        };
        if self.bodies[index].phase() != Phase::Dead {
            return false;
        }

        let population = self.bodies.len();
        let old = self.bodies.remove(index);
        let slot = placement::replacement_slot(population, self.domain.center, &mut self.rng);
        let replacement = self.spawn_body(slot.position, store);

        self.observers.notify_replaced(&old, &replacement);
        store.remove(old.drawable());

        debug!(
            "Body {:?} replaced by {:?} on ring {} (r = {:.2})",
            old.drawable(),
            replacement.drawable(),
            slot.ring,
            slot.nominal_radius
        );
        self.bodies.push(replacement);
        true
    }

    /// Drop a dead body without a replacement. Observers see only the removal.
    fn retire(&mut self, drawable: DrawableId, store: &mut impl DrawableStore) -> bool {
        let Some(index) = self.bodies.iter().position(|b| b.drawable() == drawable) else {
            return false;
        };
        if self.bodies[index].phase() != Phase::Dead {
            return false;
        }

        let old = self.bodies.remove(index);
        self.observers.notify_removed(&old);
        store.remove(old.drawable());
        debug!("Body {:?} retired without replacement", old.drawable());
        true
    }

    /// Inject a body (normally an attractor) directly; it takes part in the
    /// next tick's force phase. Observers get an `on_add`.
    pub fn add_particle(&mut self, mut body: Body) {
        body.subscribe(self.subscriber);
        self.observers.notify_added(&body);
        if body.is_attractor() {
            info!("Attractor {:?} added", body.drawable());
        }
        self.bodies.push(body);
    }

    /// Stop accepting frame callbacks. Idempotent.
    pub fn stop(&mut self) {
        if self.running {
            self.running = false;
            info!(
                "Particle engine {} stopped after {} ticks",
                self.subscriber.0, self.ticks
            );
        }
    }

    /// Tear-down: stop and drop every death subscription. Bodies that still
    /// finish fading are removed but no longer replaced.
    pub fn detach(&mut self) {
        for body in &mut self.bodies {
            body.unsubscribe(self.subscriber);
        }
        self.stop();
    }

    pub fn add_observer(&mut self, observer: Box<dyn MembershipObserver>) -> ObserverHandle {
        self.observers.add(observer)
    }

    pub fn remove_observer(&mut self, handle: ObserverHandle) -> bool {
        self.observers.remove(handle).is_some()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn center(&self) -> Vec3 {
        self.domain.center
    }

    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Live-tunable values (gravity, speed cap, wind) are read every tick
    pub fn config_mut(&mut self) -> &mut SimConfig {
        &mut self.config
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    #[cfg(test)]
    fn bodies_mut(&mut self) -> &mut [Body] {
        &mut self.bodies
    }
}
