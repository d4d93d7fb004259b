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
//! Simulation and gallery configuration
//!
//! Configuration is owned by the host and may be changed between ticks; the
//! core reads it at the start of every tick. Both config types deserialize
//! from any serde format with missing fields falling back to the defaults,
//! and both can be checked with `validate()` before use.
//!
//! The tick interval is carried for the host's timer only. The core never
//! sleeps or schedules anything itself.

use crate::error::{ensure_positive, Error, Result};
use crate::math::{Size2, Vector2};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default domain width
pub const DEFAULT_WIDTH: f64 = 800.0;

/// Default domain height
pub const DEFAULT_HEIGHT: f64 = 600.0;

/// Default live entity limit for both models
pub const DEFAULT_CAPACITY: usize = 100;

/// Rectangular region `[0, width] x [0, height]`
///
/// Used both as the spawn range and as the pruning boundary. Every `Domain`
/// is valid: deserialization goes through [`Domain::try_new`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Extents")]
pub struct Domain {
    width: f64,
    height: f64,
}

/// Unchecked wire form of a [`Domain`]
#[derive(Deserialize)]
struct Extents {
    width: f64,
    height: f64,
}

impl TryFrom<Extents> for Domain {
    type Error = Error;

    fn try_from(extents: Extents) -> Result<Self> {
        Domain::try_new(extents.width, extents.height)
    }
}

impl Domain {
    /// Create a domain
    ///
    /// # Panics
    ///
    /// Panics if either extent is negative or not finite. Use `try_new` for
    /// fallible construction.
    pub fn new(width: f64, height: f64) -> Self {
        assert!(
            is_extent(width) && is_extent(height),
            "Domain extents must be non-negative and finite"
        );
        Domain { width, height }
    }

    /// Try to create a domain
    pub fn try_new(width: f64, height: f64) -> Result<Self> {
        if is_extent(width) && is_extent(height) {
            Ok(Domain { width, height })
        } else {
            Err(Error::InvalidDomain { width, height })
        }
    }

    /// Get the width
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Get the height
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Get the extents as a size
    pub fn size(&self) -> Size2 {
        Size2::new(self.width, self.height)
    }

    /// Check if a point lies in the domain, bounds inclusive
    pub fn contains(&self, point: Vector2) -> bool {
        point.is_in_range(self.size())
    }

    /// Draw a point uniformly from the domain, x first
    pub fn random_point<R: Rng + ?Sized>(&self, rng: &mut R) -> Vector2 {
        random_point_in(self.size(), rng)
    }

    fn validate(&self) -> Result<()> {
        Domain::try_new(self.width, self.height).map(|_| ())
    }
}

impl Default for Domain {
    fn default() -> Self {
        Domain::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

impl From<Domain> for Size2 {
    fn from(domain: Domain) -> Size2 {
        domain.size()
    }
}

fn is_extent(value: f64) -> bool {
    value >= 0.0 && value.is_finite()
}

/// Uniform point in `[0, width) x [0, height)`, drawing x then y
pub(crate) fn random_point_in<R: Rng + ?Sized>(size: Size2, rng: &mut R) -> Vector2 {
    let x = rng.random::<f64>() * size.width;
    let y = rng.random::<f64>() * size.height;
    Vector2::new(x, y)
}

/// Parameters for bodies created by the spawn policy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    /// Smallest spawn mass
    pub mass_min: f64,
    /// Largest spawn mass
    pub mass_max: f64,
    /// Per-axis velocity bound `v_max`; spawn velocity components land in `[-v_max, v_max]`
    pub max_velocity: f64,
    /// Density of spawned bodies
    pub density: f64,
}

impl SpawnConfig {
    /// Check every field
    pub fn validate(&self) -> Result<()> {
        ensure_positive("mass_min", self.mass_min)?;
        ensure_positive("mass_max", self.mass_max)?;
        if self.mass_min > self.mass_max {
            return Err(Error::InvalidMassRange {
                min: self.mass_min,
                max: self.mass_max,
            });
        }
        if !(self.max_velocity >= 0.0 && self.max_velocity.is_finite()) {
            return Err(Error::InvalidParam {
                name: "max_velocity",
                value: self.max_velocity,
                reason: "must be non-negative and finite",
            });
        }
        ensure_positive("density", self.density)?;
        Ok(())
    }
}

impl Default for SpawnConfig {
    fn default() -> Self {
        SpawnConfig {
            mass_min: 1.0,
            mass_max: 10.0,
            max_velocity: 1.0,
            density: crate::nbody::DEFAULT_DENSITY,
        }
    }
}

/// Configuration of the N-body [`Simulation`](crate::Simulation)
///
/// # Example
///
/// ```
/// use canvas_sim::{Domain, SimulationConfig};
///
/// let mut config = SimulationConfig::default();
/// config.domain = Domain::new(1024.0, 768.0);
/// config.capacity = 50;
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Spawn range and pruning boundary
    pub domain: Domain,
    /// Live body limit; spawning stops at this count
    pub capacity: usize,
    /// Host timer period in milliseconds
    pub tick_interval_ms: u64,
    /// Spawn policy parameters
    pub spawn: SpawnConfig,
    /// Gravitational constant `G`
    pub gravitational_constant: f64,
}

impl SimulationConfig {
    /// Host timer period
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Check every field
    pub fn validate(&self) -> Result<()> {
        self.domain.validate()?;
        self.spawn.validate()?;
        if !(self.gravitational_constant >= 0.0 && self.gravitational_constant.is_finite()) {
            return Err(Error::InvalidParam {
                name: "gravitational_constant",
                value: self.gravitational_constant,
                reason: "must be non-negative and finite",
            });
        }
        Ok(())
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            domain: Domain::default(),
            capacity: DEFAULT_CAPACITY,
            tick_interval_ms: 100,
            spawn: SpawnConfig::default(),
            gravitational_constant: crate::nbody::GRAVITATIONAL_CONSTANT,
        }
    }
}

/// Configuration of the [`FigureGallery`](crate::figures::FigureGallery)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GalleryConfig {
    /// Range figure coordinates are drawn from
    pub domain: Domain,
    /// Figure limit; the oldest figure is evicted once reached. Ticks treat 0 as 1.
    pub capacity: usize,
    /// Host timer period in milliseconds
    pub tick_interval_ms: u64,
    /// Upper bound (inclusive) on polygon vertex count; the lower bound is 3
    pub max_polygon_points: usize,
    /// Exclusive upper bound on outline thickness
    pub max_thickness: f64,
}

impl GalleryConfig {
    /// Smallest polygon a gallery will generate
    pub const MIN_POLYGON_POINTS: usize = 3;

    /// Host timer period
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Check every field
    pub fn validate(&self) -> Result<()> {
        self.domain.validate()?;
        if self.capacity == 0 {
            return Err(Error::InvalidParam {
                name: "capacity",
                value: 0.0,
                reason: "a gallery must hold at least one figure",
            });
        }
        if self.max_polygon_points < Self::MIN_POLYGON_POINTS {
            return Err(Error::InvalidParam {
                name: "max_polygon_points",
                value: self.max_polygon_points as f64,
                reason: "polygons need at least 3 points",
            });
        }
        ensure_positive("max_thickness", self.max_thickness)?;
        Ok(())
    }
}

impl Default for GalleryConfig {
    fn default() -> Self {
        GalleryConfig {
            domain: Domain::default(),
            capacity: DEFAULT_CAPACITY,
            tick_interval_ms: 10,
            max_polygon_points: 7,
            max_thickness: 3.0,
        }
    }
}
