// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Tick driver for the N-body model
//!
//! Each call to [`Simulation::tick`] runs three phases, always in this order:
//!
//! 1. **Prune**: remove every body outside the domain (bounds inclusive;
//!    non-finite positions are always outside), then evict the oldest bodies
//!    while more than `capacity` remain.
//! 2. **Spawn**: if fewer than `capacity` bodies remain, add exactly one
//!    random body.
//! 3. **Step**: advance the whole set once under mutual gravity.
//!
//! The host owns the timer and calls `tick` on its own cadence (see
//! [`SimulationConfig::tick_interval`]); calls must not overlap. The random
//! generator is passed in on every tick, so a seeded generator makes a run
//! reproducible.

use crate::color::{Appearance, Rgba};
use crate::config::{random_point_in, SimulationConfig};
use crate::error::Result;
use crate::math::{Size2, Vector2};
use crate::nbody::{Body, BodySet};
use crate::observer::{Observer, SetEvent, SubscriptionId};
use crate::Domain;
use log::{debug, trace, warn};
use rand::Rng;

/// Outcome of one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickReport {
    /// Bodies removed for leaving the domain
    pub pruned: usize,
    /// Oldest bodies removed because the capacity was lowered below the live count
    pub evicted: usize,
    /// Whether a new body was spawned
    pub spawned: bool,
    /// Bodies whose position changed during the step
    pub moved: usize,
    /// Live bodies after the tick
    pub bodies: usize,
}

/// N-body simulation with pruning and spawning
///
/// # Example
///
/// ```
/// use canvas_sim::{Simulation, SimulationConfig};
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
///
/// let mut config = SimulationConfig::default();
/// config.capacity = 3;
/// let mut sim = Simulation::new(config);
/// let mut rng = StdRng::seed_from_u64(1);
///
/// for _ in 0..10 {
///     sim.tick(&mut rng);
/// }
/// assert!(sim.bodies().len() <= 3);
/// ```
#[derive(Debug)]
pub struct Simulation {
    bodies: BodySet,
    config: SimulationConfig,
}

impl Simulation {
    /// Create an empty simulation
    ///
    /// # Panics
    ///
    /// Panics if the configuration fails validation. Use `try_new` for
    /// fallible construction.
    pub fn new(config: SimulationConfig) -> Self {
        if let Err(err) = config.validate() {
            panic!("Invalid simulation configuration: {err}");
        }
        Self::with_valid_config(config)
    }

    /// Try to create an empty simulation
    pub fn try_new(config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_valid_config(config))
    }

    fn with_valid_config(config: SimulationConfig) -> Self {
        let mut bodies = BodySet::new();
        bodies.set_gravitational_constant(config.gravitational_constant);
        Simulation { bodies, config }
    }

    /// Advance by one tick: prune, maybe spawn, step
    pub fn tick<R: Rng + ?Sized>(&mut self, rng: &mut R) -> TickReport {
        self.sync_gravitational_constant();

        let pruned = self.prune();
        let evicted = self.evict_over_capacity();

        let mut spawned = false;
        if self.bodies.len() < self.config.capacity {
            match spawn_body(&self.config, rng) {
                Ok(body) => {
                    trace!(
                        "Spawned body mass={:.3} at ({:.1}, {:.1})",
                        body.mass(),
                        body.position().x,
                        body.position().y
                    );
                    self.bodies.add(body);
                    spawned = true;
                }
                Err(err) => warn!("Skipping spawn: {}", err),
            }
        }

        let moved = self.bodies.move_bodies();

        let report = TickReport {
            pruned,
            evicted,
            spawned,
            moved,
            bodies: self.bodies.len(),
        };
        debug!(
            "Tick: pruned {}, evicted {}, spawned {}, moved {}, {} live",
            report.pruned, report.evicted, report.spawned, report.moved, report.bodies
        );
        report
    }

    /// Remove every body outside the domain; returns how many were removed
    pub fn prune(&mut self) -> usize {
        let domain = self.config.domain;
        self.bodies.remove_where(|body| !domain.contains(body.position()))
    }

    /// Remove the oldest bodies until at most `capacity` remain; returns how many were removed
    pub fn evict_over_capacity(&mut self) -> usize {
        let capacity = self.config.capacity;
        let mut evicted = 0;
        while self.bodies.len() > capacity {
            self.bodies.remove(0);
            evicted += 1;
        }
        if evicted > 0 {
            debug!("Evicted {} bodies over capacity {}", evicted, capacity);
        }
        evicted
    }

    // The config is host-editable between ticks; an invalid constant keeps the previous one.
    fn sync_gravitational_constant(&mut self) {
        let g = self.config.gravitational_constant;
        if g == self.bodies.gravitational_constant() {
            return;
        }
        if g >= 0.0 && g.is_finite() {
            self.bodies.set_gravitational_constant(g);
        } else {
            warn!(
                "Ignoring invalid gravitational constant {}; keeping {}",
                g,
                self.bodies.gravitational_constant()
            );
        }
    }

    /// Add a body directly, bypassing the spawn policy
    pub fn add(&mut self, body: Body) -> usize {
        self.bodies.add(body)
    }

    /// Read-only view of the live bodies
    pub fn bodies(&self) -> &BodySet {
        &self.bodies
    }

    /// Get the configuration
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Mutable access to the configuration, read again on the next tick
    pub fn config_mut(&mut self) -> &mut SimulationConfig {
        &mut self.config
    }

    /// Resize the domain; takes effect on the next tick
    pub fn set_domain(&mut self, domain: Domain) {
        self.config.domain = domain;
    }

    /// Subscribe to body set events
    pub fn subscribe<O>(&mut self, observer: O) -> SubscriptionId
    where
        O: Observer<SetEvent> + 'static,
    {
        self.bodies.subscribe(observer)
    }

    /// Unsubscribe from body set events
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.bodies.unsubscribe(id)
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Simulation::new(SimulationConfig::default())
    }
}

/// Create a random body according to the spawn policy
///
/// Draws, in order: position (uniform in the domain), velocity (difference
/// of two uniform points in `[0, v_max]²`, giving each component a
/// triangular distribution on `[-v_max, v_max]`), mass (uniform in
/// `[mass_min, mass_max]`), fill color, stroke color.
///
/// Fails only if the spawn parameters would produce an invalid body, which
/// can happen when the host edits the config without validating it.
pub fn spawn_body<R: Rng + ?Sized>(config: &SimulationConfig, rng: &mut R) -> Result<Body> {
    let spawn = &config.spawn;

    let position = config.domain.random_point(rng);
    let velocity = random_velocity(spawn.max_velocity, rng);
    let mass = rng.random::<f64>() * (spawn.mass_max - spawn.mass_min) + spawn.mass_min;
    let fill = Rgba::random(rng);
    let stroke = Rgba::random(rng);

    let body = Body::try_new(mass, spawn.density, position, velocity)?;
    Ok(body.with_appearance(Appearance::new(stroke, fill, 1.0)))
}

fn random_velocity<R: Rng + ?Sized>(max_velocity: f64, rng: &mut R) -> Vector2 {
    let bound = Size2::new(max_velocity, max_velocity);
    let a = random_point_in(bound, rng);
    let b = random_point_in(bound, rng);
    a - b
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn config_with_capacity(capacity: usize) -> SimulationConfig {
        SimulationConfig {
            capacity,
            ..SimulationConfig::default()
        }
    }

    #[test]
    fn test_first_tick_spawns() {
        let mut sim = Simulation::default();
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        let report = sim.tick(&mut rng);
        assert_eq!(report.pruned, 0);
        assert!(report.spawned);
        assert_eq!(report.bodies, 1);
    }

    #[test]
    fn test_spawned_bodies_respect_config() {
        let config = SimulationConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        for _ in 0..500 {
            let body = spawn_body(&config, &mut rng).unwrap();
            assert!(config.domain.contains(body.position()));
            assert!(body.mass() >= 1.0 && body.mass() <= 10.0);
            assert!(body.velocity().x.abs() <= 1.0);
            assert!(body.velocity().y.abs() <= 1.0);
            assert_eq!(body.density(), 0.001);
        }
    }

    #[test]
    fn test_spawn_velocity_is_zero_mean() {
        let config = SimulationConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(99);

        let n = 5000;
        let mean = Vector2::sum((0..n).map(|_| spawn_body(&config, &mut rng).unwrap().velocity())) / n as f64;
        // Triangular on [-1, 1] has standard deviation 1/sqrt(6); the mean of
        // 5000 samples is within 0.05 with overwhelming probability.
        assert!(mean.x.abs() < 0.05);
        assert!(mean.y.abs() < 0.05);
    }

    #[test]
    fn test_capacity_is_respected() {
        let mut sim = Simulation::new(config_with_capacity(5));
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        for _ in 0..50 {
            let before = sim.bodies().len();
            let report = sim.tick(&mut rng);
            assert!(report.bodies <= 5);
            assert_eq!(report.spawned, before - report.pruned < 5);
        }
    }

    #[test]
    fn test_lowered_capacity_evicts_oldest_first() {
        let mut sim = Simulation::default();
        for x in 1..=5 {
            sim.add(Body::new(1.0, 0.001, Vector2::new(x as f64 * 100.0, 300.0), Vector2::zero()));
        }
        sim.config_mut().capacity = 2;

        assert_eq!(sim.evict_over_capacity(), 3);
        let xs: Vec<f64> = sim.bodies().iter().map(|b| b.position().x).collect();
        assert_eq!(xs, vec![400.0, 500.0]);
        assert_eq!(sim.evict_over_capacity(), 0);
    }

    #[test]
    fn test_zero_capacity_never_spawns() {
        let mut sim = Simulation::new(config_with_capacity(0));
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let report = sim.tick(&mut rng);
        assert!(!report.spawned);
        assert_eq!(report.bodies, 0);
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let mut a = Simulation::default();
        let mut b = Simulation::default();
        let mut rng_a = ChaCha8Rng::seed_from_u64(2024);
        let mut rng_b = ChaCha8Rng::seed_from_u64(2024);

        for _ in 0..30 {
            assert_eq!(a.tick(&mut rng_a), b.tick(&mut rng_b));
        }
        assert_eq!(a.bodies().as_slice(), b.bodies().as_slice());
    }

    #[test]
    fn test_prune_uses_current_domain() {
        let mut sim = Simulation::default();
        sim.add(Body::new(1.0, 0.001, Vector2::new(700.0, 500.0), Vector2::zero()));
        sim.add(Body::new(1.0, 0.001, Vector2::new(10.0, 10.0), Vector2::zero()));

        sim.set_domain(Domain::new(100.0, 100.0));
        assert_eq!(sim.prune(), 1);
        assert_eq!(sim.bodies().get(0).unwrap().position(), Vector2::new(10.0, 10.0));
    }

    #[test]
    fn test_invalid_constant_from_host_is_ignored() {
        let mut sim = Simulation::default();
        sim.config_mut().gravitational_constant = f64::NAN;
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        sim.tick(&mut rng);
        assert_eq!(sim.bodies().gravitational_constant(), 100.0);

        sim.config_mut().gravitational_constant = 5.0;
        sim.tick(&mut rng);
        assert_eq!(sim.bodies().gravitational_constant(), 5.0);
    }

    #[test]
    fn test_unvalidated_density_skips_spawn() {
        let mut sim = Simulation::default();
        sim.config_mut().spawn.density = 0.0;
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let report = sim.tick(&mut rng);
        assert!(!report.spawned);
        assert_eq!(report.bodies, 0);
    }

    #[test]
    fn test_try_new_rejects_bad_config() {
        let mut config = SimulationConfig::default();
        config.spawn.density = 0.0;
        assert!(Simulation::try_new(config).is_err());
    }

    #[test]
    #[should_panic(expected = "Invalid simulation configuration")]
    fn test_new_panics_on_bad_config() {
        let mut config = SimulationConfig::default();
        config.gravitational_constant = -1.0;
        Simulation::new(config);
    }
}
