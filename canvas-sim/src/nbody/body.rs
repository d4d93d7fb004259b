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
//! Point-mass body
//!
//! A body carries its physical state (mass, density, position, velocity and
//! the force accumulated for the current step) plus the cosmetic attributes
//! the renderer needs. Radius, area and acceleration are always derived,
//! never stored.

use super::gravity;
use crate::color::Appearance;
use crate::error::{ensure_positive, Result};
use crate::math::{Size2, Vector2};
use std::f64::consts::PI;

/// Default density; a mass-1 body then has area 1000 (radius ~12.6)
pub const DEFAULT_DENSITY: f64 = 0.001;

/// Point mass rendered as a circle
///
/// `Clone` produces an independent value snapshot; the body set relies on
/// this to evaluate all forces against the same pre-step state.
///
/// # Examples
///
/// ```
/// use canvas_sim::{Body, Vector2};
///
/// let body = Body::new(2.0 * std::f64::consts::PI, 1.0, Vector2::new(5.0, 5.0), Vector2::zero());
/// assert!((body.radius() - 1.0).abs() < 1e-12);
/// assert_eq!(body.top_left(), Vector2::new(4.0, 4.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    mass: f64,
    density: f64,
    position: Vector2,
    velocity: Vector2,
    force: Vector2,
    appearance: Appearance,
}

impl Body {
    /// Create a body with zero force and the default appearance
    ///
    /// # Panics
    ///
    /// Panics if mass or density is not positive and finite. For fallible
    /// construction, use `try_new`.
    pub fn new(mass: f64, density: f64, position: Vector2, velocity: Vector2) -> Self {
        assert!(mass > 0.0 && mass.is_finite(), "Mass must be positive and finite");
        assert!(
            density > 0.0 && density.is_finite(),
            "Density must be positive and finite"
        );
        Body {
            mass,
            density,
            position,
            velocity,
            force: Vector2::zero(),
            appearance: Appearance::default(),
        }
    }

    /// Try to create a body, rejecting non-positive or non-finite mass and density
    pub fn try_new(mass: f64, density: f64, position: Vector2, velocity: Vector2) -> Result<Self> {
        ensure_positive("mass", mass)?;
        ensure_positive("density", density)?;
        Ok(Body::new(mass, density, position, velocity))
    }

    /// Replace the appearance
    pub fn with_appearance(mut self, appearance: Appearance) -> Self {
        self.appearance = appearance;
        self
    }

    /// Get the mass
    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Set the mass
    ///
    /// # Panics
    ///
    /// Panics if the mass is not positive and finite.
    pub fn set_mass(&mut self, mass: f64) {
        assert!(mass > 0.0 && mass.is_finite(), "Mass must be positive and finite");
        self.mass = mass;
    }

    /// Get the density
    pub fn density(&self) -> f64 {
        self.density
    }

    /// Set the density
    ///
    /// # Panics
    ///
    /// Panics if the density is not positive and finite.
    pub fn set_density(&mut self, density: f64) {
        assert!(
            density > 0.0 && density.is_finite(),
            "Density must be positive and finite"
        );
        self.density = density;
    }

    /// Disc area, `mass / density`
    pub fn area(&self) -> f64 {
        self.mass / self.density
    }

    /// Disc radius, `sqrt(area / 2π)`
    pub fn radius(&self) -> f64 {
        (self.area() / (2.0 * PI)).sqrt()
    }

    /// Get the position
    pub fn position(&self) -> Vector2 {
        self.position
    }

    /// Move the body
    ///
    /// Returns `true` if the position actually changed (exact component-wise
    /// comparison). Setting the current value again is not a change.
    pub fn set_position(&mut self, position: Vector2) -> bool {
        if self.position.is_exactly(position) {
            return false;
        }
        self.position = position;
        true
    }

    /// Get the velocity
    pub fn velocity(&self) -> Vector2 {
        self.velocity
    }

    /// Set the velocity
    pub fn set_velocity(&mut self, velocity: Vector2) {
        self.velocity = velocity;
    }

    /// Force accumulated for the current step
    pub fn force(&self) -> Vector2 {
        self.force
    }

    /// Set the force for the next step
    pub fn set_force(&mut self, force: Vector2) {
        self.force = force;
    }

    /// Acceleration from the current force, `force / mass`
    pub fn acceleration(&self) -> Vector2 {
        self.force.divide(self.mass)
    }

    /// Gravitational pull of `others` on this body
    ///
    /// `others` must not include this body.
    pub fn compute_force<'a, I>(&self, others: I, g: f64) -> Vector2
    where
        I: IntoIterator<Item = &'a Body>,
    {
        gravity::net_force(self, others, g)
    }

    /// Advance one unit step with semi-implicit Euler
    ///
    /// The velocity is updated from the current force first, then the
    /// position from the new velocity. Returns `true` if the position changed.
    pub fn step(&mut self) -> bool {
        self.velocity += self.acceleration();
        let next = self.position + self.velocity;
        self.set_position(next)
    }

    /// Get the appearance
    pub fn appearance(&self) -> &Appearance {
        &self.appearance
    }

    /// Set the appearance
    pub fn set_appearance(&mut self, appearance: Appearance) {
        self.appearance = appearance;
    }

    /// Top-left corner of the bounding square
    pub fn top_left(&self) -> Vector2 {
        let r = self.radius();
        self.position - Vector2::new(r, r)
    }

    /// Size of the bounding square
    pub fn size(&self) -> Size2 {
        let diameter = self.radius() * 2.0;
        Size2::new(diameter, diameter)
    }

    /// Linear momentum, `m * v`
    pub fn momentum(&self) -> Vector2 {
        self.velocity.scale(self.mass)
    }

    /// Kinetic energy, `0.5 * m * |v|²`
    pub fn kinetic_energy(&self) -> f64 {
        let speed = self.velocity.magnitude();
        0.5 * self.mass * speed * speed
    }
}

impl Default for Body {
    fn default() -> Self {
        Body::new(1.0, DEFAULT_DENSITY, Vector2::zero(), Vector2::zero())
    }
}
