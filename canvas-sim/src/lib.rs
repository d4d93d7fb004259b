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
//! # Canvas Sim
//!
//! Simulation core behind a reactive shape canvas. Two models are provided,
//! each advanced one tick at a time by an external timer and observed by an
//! external renderer:
//!
//! - **N-body gravity**: point masses attract each other, are integrated with
//!   semi-implicit Euler, and are pruned once they leave the bounded domain
//!   while new random bodies keep spawning up to a capacity limit.
//! - **Figure gallery**: a rolling collection of random lines, rectangles,
//!   ellipses and polygons.
//!
//! ## Features
//!
//! - **Simultaneous force evaluation**: every body sees the same pre-step
//!   snapshot, so results do not depend on update order
//! - **Observer channels**: entity added / removed / changed notifications,
//!   delivered synchronously at the end of each mutation
//! - **Explicit randomness**: every random draw goes through a caller-supplied
//!   [`rand::Rng`], so a seeded generator gives reproducible runs
//! - **Parallelization**: optional Rayon integration for the force phase
//!
//! ## Example
//!
//! ```rust
//! use canvas_sim::{Simulation, SimulationConfig};
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let mut sim = Simulation::new(SimulationConfig::default());
//!
//! let report = sim.tick(&mut rng);
//! assert!(report.spawned);
//! assert_eq!(sim.bodies().len(), 1);
//! ```

#![warn(missing_docs)]

/// Crate error type
pub mod error;

/// Simulation and gallery configuration
pub mod config;

/// Colors and rendering attributes
pub mod color;

/// Synchronous notification channels
pub mod observer;

/// 2D vector math
pub mod math;

/// Bodies, pairwise gravity and the body set
pub mod nbody;

/// Tick driver for the N-body model
pub mod simulation;

/// Random static figures
pub mod figures;

pub use color::{Appearance, Rgba};
pub use config::{Domain, GalleryConfig, SimulationConfig, SpawnConfig};
pub use error::{Error, Result};
pub use figures::{Figure, FigureGallery, Shape, ShapeKind};
pub use math::{Size2, Vector2};
pub use nbody::{Body, BodySet};
pub use observer::{Observer, Observers, SetEvent, SubscriptionId};
pub use simulation::{Simulation, TickReport};
