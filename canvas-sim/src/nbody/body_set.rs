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
//! Ordered collection of bodies advanced together under mutual gravity
//!
//! # Simultaneous update
//!
//! [`BodySet::move_bodies`] works in two phases:
//!
//! 1. Clone every body into a snapshot.
//! 2. For each body, sum the forces from every *other* snapshot body, then
//!    step the *live* body.
//!
//! No body ever sees another body's post-step position, so the result is
//! the same whatever order the bodies are processed in. With the `parallel`
//! feature the force phase runs on the Rayon pool; each body still sums its
//! contributions in index order, so the output is bit-identical to the
//! sequential path.
//!
//! # Notifications
//!
//! Subscribers receive [`SetEvent::Added`] / [`SetEvent::Removed`] for
//! structural changes and [`SetEvent::Changed`] for every body whose position
//! moved during a step.

use super::gravity::{self, GRAVITATIONAL_CONSTANT};
use super::Body;
use crate::math::Vector2;
use crate::observer::{Observer, Observers, SetEvent, SubscriptionId};
use log::warn;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Minimum number of bodies handed to one Rayon task
#[cfg(feature = "parallel")]
const PARALLEL_MIN_LEN: usize = 16;

/// Live set of bodies
#[derive(Debug)]
pub struct BodySet {
    bodies: Vec<Body>,
    observers: Observers<SetEvent>,
    gravitational_constant: f64,
    // Scratch buffers reused across steps
    snapshot: Vec<Body>,
    forces: Vec<Vector2>,
}

impl BodySet {
    /// Create an empty set using [`GRAVITATIONAL_CONSTANT`]
    pub fn new() -> Self {
        BodySet {
            bodies: Vec::new(),
            observers: Observers::new(),
            gravitational_constant: GRAVITATIONAL_CONSTANT,
            snapshot: Vec::new(),
            forces: Vec::new(),
        }
    }

    /// Get the gravitational constant
    pub fn gravitational_constant(&self) -> f64 {
        self.gravitational_constant
    }

    /// Set the gravitational constant
    ///
    /// # Panics
    ///
    /// Panics if `g` is negative or not finite.
    pub fn set_gravitational_constant(&mut self, g: f64) {
        assert!(
            g >= 0.0 && g.is_finite(),
            "Gravitational constant must be non-negative and finite"
        );
        self.gravitational_constant = g;
    }

    /// Subscribe to added / removed / changed events
    pub fn subscribe<O>(&mut self, observer: O) -> SubscriptionId
    where
        O: Observer<SetEvent> + 'static,
    {
        self.observers.subscribe(observer)
    }

    /// Unsubscribe; returns `false` if the id is unknown
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Append a body and return its index
    pub fn add(&mut self, body: Body) -> usize {
        let index = self.bodies.len();
        self.bodies.push(body);
        self.observers.notify(&SetEvent::Added { index });
        index
    }

    /// Remove the body at `index`, shifting later bodies down
    ///
    /// Returns `None` (and emits nothing) if `index` is out of bounds.
    pub fn remove(&mut self, index: usize) -> Option<Body> {
        if index >= self.bodies.len() {
            return None;
        }
        let body = self.bodies.remove(index);
        self.observers.notify(&SetEvent::Removed { index });
        Some(body)
    }

    /// Remove every body matching `predicate`, front to back
    ///
    /// Each removal emits [`SetEvent::Removed`] with the index the body had
    /// at the moment it was removed. Returns the number of bodies removed.
    pub fn remove_where<P>(&mut self, mut predicate: P) -> usize
    where
        P: FnMut(&Body) -> bool,
    {
        let mut removed = 0;
        let mut index = 0;
        while index < self.bodies.len() {
            if predicate(&self.bodies[index]) {
                self.bodies.remove(index);
                self.observers.notify(&SetEvent::Removed { index });
                removed += 1;
            } else {
                index += 1;
            }
        }
        removed
    }

    /// Advance every body by one step under mutual gravity
    ///
    /// Returns the number of bodies whose position changed. An empty set is
    /// a no-op; a lone body feels no force and simply drifts.
    pub fn move_bodies(&mut self) -> usize {
        self.take_snapshot();
        self.compute_forces();

        let mut moved = 0;
        for index in 0..self.bodies.len() {
            let force = self.forces[index];
            if self.apply(index, force) {
                moved += 1;
            }
        }
        moved
    }

    /// Sequential update visiting bodies in the given order
    ///
    /// Force evaluation and stepping are interleaved per body, which is only
    /// correct because forces read from the snapshot. Every index must appear
    /// exactly once.
    #[cfg(test)]
    pub(crate) fn move_in_order<I>(&mut self, order: I) -> usize
    where
        I: IntoIterator<Item = usize>,
    {
        self.take_snapshot();
        let g = self.gravitational_constant;

        let mut moved = 0;
        for index in order {
            let force = gravity::force_on(&self.snapshot, index, g);
            if self.apply(index, force) {
                moved += 1;
            }
        }
        moved
    }

    fn take_snapshot(&mut self) {
        self.snapshot.clear();
        self.snapshot.extend(self.bodies.iter().cloned());
    }

    #[cfg(feature = "parallel")]
    fn compute_forces(&mut self) {
        let g = self.gravitational_constant;
        let snapshot = &self.snapshot;
        self.forces.clear();
        self.forces.par_extend(
            (0..snapshot.len())
                .into_par_iter()
                .with_min_len(PARALLEL_MIN_LEN)
                .map(|index| gravity::force_on(snapshot, index, g)),
        );
    }

    #[cfg(not(feature = "parallel"))]
    fn compute_forces(&mut self) {
        let g = self.gravitational_constant;
        let snapshot = &self.snapshot;
        self.forces.clear();
        self.forces
            .extend((0..snapshot.len()).map(|index| gravity::force_on(snapshot, index, g)));
    }

    fn apply(&mut self, index: usize, force: Vector2) -> bool {
        if !force.is_finite() {
            warn!(
                "Non-finite gravitational force {:?} on body {}; coincident bodies will leave the domain",
                force, index
            );
        }

        let body = &mut self.bodies[index];
        body.set_force(force);
        let changed = body.step();
        if changed {
            self.observers.notify(&SetEvent::Changed { index });
        }
        changed
    }

    /// Get the number of bodies
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    /// Check if the set is empty
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Get the body at `index`
    pub fn get(&self, index: usize) -> Option<&Body> {
        self.bodies.get(index)
    }

    /// Iterate over bodies in live order
    pub fn iter(&self) -> std::slice::Iter<'_, Body> {
        self.bodies.iter()
    }

    /// View the bodies as a slice
    pub fn as_slice(&self) -> &[Body] {
        &self.bodies
    }

    /// Sum of body momenta
    pub fn total_momentum(&self) -> Vector2 {
        Vector2::sum(self.bodies.iter().map(Body::momentum))
    }

    /// Sum of body kinetic energies
    pub fn total_kinetic_energy(&self) -> f64 {
        self.bodies.iter().map(Body::kinetic_energy).sum()
    }
}

impl Default for BodySet {
    fn default() -> Self {
        Self::new()
    }
}

impl FromIterator<Body> for BodySet {
    /// Build a set without emitting notifications
    fn from_iter<I: IntoIterator<Item = Body>>(iter: I) -> Self {
        let mut set = BodySet::new();
        set.bodies.extend(iter);
        set
    }
}

impl<'a> IntoIterator for &'a BodySet {
    type Item = &'a Body;
    type IntoIter = std::slice::Iter<'a, Body>;

    fn into_iter(self) -> Self::IntoIter {
        self.bodies.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn body(mass: f64, x: f64, y: f64, vx: f64, vy: f64) -> Body {
        Body::new(mass, 0.001, Vector2::new(x, y), Vector2::new(vx, vy))
    }

    fn cluster() -> Vec<Body> {
        vec![
            body(3.0, 100.0, 120.0, 0.25, -0.5),
            body(7.5, 180.0, 90.0, -0.75, 0.125),
            body(1.25, 140.0, 200.0, 0.0, 0.0),
            body(9.0, 60.0, 40.0, 0.5, 0.5),
            body(4.0, 220.0, 160.0, -0.3, 0.9),
        ]
    }

    fn recorder(set: &mut BodySet) -> Arc<Mutex<Vec<SetEvent>>> {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        set.subscribe(move |event: &SetEvent| sink.lock().unwrap().push(*event));
        events
    }

    #[test]
    fn test_empty_move_is_noop() {
        let mut set = BodySet::new();
        assert_eq!(set.move_bodies(), 0);
        assert!(set.is_empty());
    }

    #[test]
    fn test_single_body_drifts() {
        let mut set: BodySet = vec![body(5.0, 10.0, 10.0, 1.5, -2.0)].into_iter().collect();
        assert_eq!(set.move_bodies(), 1);

        let b = set.get(0).unwrap();
        assert_eq!(b.force(), Vector2::zero());
        assert_eq!(b.velocity(), Vector2::new(1.5, -2.0));
        assert_eq!(b.position(), Vector2::new(11.5, 8.0));
    }

    #[test]
    fn test_two_body_step() {
        let mut set: BodySet = vec![body(10.0, 0.0, 0.0, 0.0, 0.0), body(10.0, 10.0, 0.0, 0.0, 0.0)]
            .into_iter()
            .collect();
        set.move_bodies();

        let a = set.get(0).unwrap();
        let b = set.get(1).unwrap();
        assert_eq!(a.force(), Vector2::new(100.0, 0.0));
        assert_eq!(b.force(), Vector2::new(-100.0, 0.0));
        assert_eq!(a.velocity(), Vector2::new(10.0, 0.0));
        assert_eq!(a.position(), Vector2::new(10.0, 0.0));
        assert_eq!(b.velocity(), Vector2::new(-10.0, 0.0));
        assert_eq!(b.position(), Vector2::new(0.0, 0.0));
    }

    #[test]
    fn test_processing_order_does_not_matter() {
        let mut forward: BodySet = cluster().into_iter().collect();
        let mut backward: BodySet = cluster().into_iter().collect();
        let mut shuffled: BodySet = cluster().into_iter().collect();
        let mut batched: BodySet = cluster().into_iter().collect();

        for _ in 0..10 {
            forward.move_in_order(0..5);
            backward.move_in_order((0..5).rev());
            shuffled.move_in_order([3, 0, 4, 2, 1]);
            batched.move_bodies();
        }

        assert_eq!(forward.as_slice(), backward.as_slice());
        assert_eq!(forward.as_slice(), shuffled.as_slice());
        assert_eq!(forward.as_slice(), batched.as_slice());
    }

    #[test]
    fn test_snapshot_isolates_bodies() {
        // Without a snapshot, body 1 would see body 0 already at x = 10 and
        // feel a NaN force from the coincident position.
        let mut set: BodySet = vec![body(10.0, 0.0, 0.0, 0.0, 0.0), body(10.0, 10.0, 0.0, 0.0, 0.0)]
            .into_iter()
            .collect();
        set.move_in_order([0, 1]);
        assert!(set.get(1).unwrap().force().is_finite());
    }

    #[test]
    fn test_add_and_remove_notify() {
        let mut set = BodySet::new();
        let events = recorder(&mut set);

        assert_eq!(set.add(Body::default()), 0);
        assert_eq!(set.add(Body::default()), 1);
        assert!(set.remove(0).is_some());
        assert!(set.remove(5).is_none());

        assert_eq!(
            *events.lock().unwrap(),
            vec![
                SetEvent::Added { index: 0 },
                SetEvent::Added { index: 1 },
                SetEvent::Removed { index: 0 },
            ]
        );
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_remove_where_reports_live_indices() {
        let mut set: BodySet = (0..5)
            .map(|i| body(1.0, i as f64, 0.0, 0.0, 0.0))
            .collect();
        let events = recorder(&mut set);

        // Remove x = 1, 2 and 4
        let removed = set.remove_where(|b| {
            let x = b.position().x;
            x == 1.0 || (x >= 2.0 && x != 3.0)
        });
        assert_eq!(removed, 3);

        let remaining: Vec<f64> = set.iter().map(|b| b.position().x).collect();
        assert_eq!(remaining, vec![0.0, 3.0]);
        assert_eq!(
            *events.lock().unwrap(),
            vec![
                SetEvent::Removed { index: 1 },
                SetEvent::Removed { index: 1 },
                SetEvent::Removed { index: 2 },
            ]
        );
    }

    #[test]
    fn test_changed_only_for_moving_bodies() {
        let mut set: BodySet = vec![body(1.0, 5.0, 5.0, 1.0, 0.0)].into_iter().collect();
        set.set_gravitational_constant(0.0);
        set.add(body(1.0, 50.0, 50.0, 0.0, 0.0));
        let events = recorder(&mut set);

        assert_eq!(set.move_bodies(), 1);
        assert_eq!(*events.lock().unwrap(), vec![SetEvent::Changed { index: 0 }]);
    }

    #[test]
    fn test_unsubscribed_observer_is_silent() {
        let mut set = BodySet::new();
        let events = Arc::new(Mutex::new(0usize));
        let sink = Arc::clone(&events);
        let id = set.subscribe(move |_: &SetEvent| *sink.lock().unwrap() += 1);

        set.add(Body::default());
        assert!(set.unsubscribe(id));
        set.add(Body::default());
        assert_eq!(*events.lock().unwrap(), 1);
    }

    #[test]
    fn test_coincident_bodies_go_non_finite() {
        let mut set: BodySet = vec![body(1.0, 5.0, 5.0, 0.0, 0.0), body(2.0, 5.0, 5.0, 0.0, 0.0)]
            .into_iter()
            .collect();
        set.move_bodies();
        assert!(set.iter().all(|b| !b.position().is_finite()));
    }

    #[test]
    #[should_panic(expected = "Gravitational constant must be non-negative and finite")]
    fn test_negative_g_panics() {
        BodySet::new().set_gravitational_constant(-1.0);
    }

    #[test]
    fn test_two_body_momentum_is_conserved() {
        let mut set: BodySet = vec![body(3.0, 10.0, 10.0, 0.5, 0.0), body(6.0, 40.0, 50.0, 0.0, -0.25)]
            .into_iter()
            .collect();
        let before = set.total_momentum();
        for _ in 0..20 {
            set.move_bodies();
        }
        let after = set.total_momentum();
        assert!((after - before).magnitude() < 1e-9);
    }
}
