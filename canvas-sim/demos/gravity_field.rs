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
//! Headless run of the N-body model
//!
//! Drives the simulation the way a UI timer would and prints what a
//! renderer would have been told. Pass a seed as the first argument to get
//! a different (but reproducible) run.
//!
//! ```bash
//! cargo run --example gravity_field -- 2024
//! ```

use canvas_sim::{SetEvent, Simulation, SimulationConfig};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

const TICKS: usize = 600;
const REPORT_EVERY: usize = 50;

fn main() {
    println!("Canvas Sim - Gravity Field");
    println!("==========================\n");

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse::<u64>().ok())
        .unwrap_or(42);

    let config = SimulationConfig::default();
    println!("Seed:           {}", seed);
    println!(
        "Domain:         {} x {}",
        config.domain.width(),
        config.domain.height()
    );
    println!("Capacity:       {}", config.capacity);
    println!("Tick interval:  {:?}", config.tick_interval());
    println!("G:              {}\n", config.gravitational_constant);

    let mut sim = Simulation::new(config);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    // Count what a renderer would redraw
    let added = Arc::new(AtomicUsize::new(0));
    let removed = Arc::new(AtomicUsize::new(0));
    let redraws = Arc::new(AtomicUsize::new(0));
    {
        let (added, removed, redraws) = (Arc::clone(&added), Arc::clone(&removed), Arc::clone(&redraws));
        sim.subscribe(move |event: &SetEvent| {
            let counter = match event {
                SetEvent::Added { .. } => &added,
                SetEvent::Removed { .. } => &removed,
                SetEvent::Changed { .. } => &redraws,
            };
            counter.fetch_add(1, Ordering::Relaxed);
        });
    }

    println!("{:>6}  {:>6}  {:>8}  {:>12}  {:>12}", "tick", "live", "pruned", "momentum", "kinetic");
    let mut pruned_total = 0;
    for tick in 1..=TICKS {
        let report = sim.tick(&mut rng);
        pruned_total += report.pruned;

        if tick % REPORT_EVERY == 0 {
            let bodies = sim.bodies();
            println!(
                "{:>6}  {:>6}  {:>8}  {:>12.4}  {:>12.4}",
                tick,
                report.bodies,
                pruned_total,
                bodies.total_momentum().magnitude(),
                bodies.total_kinetic_energy()
            );
        }
    }

    println!("\nNotifications:");
    println!("  added:   {}", added.load(Ordering::Relaxed));
    println!("  removed: {}", removed.load(Ordering::Relaxed));
    println!("  moved:   {}", redraws.load(Ordering::Relaxed));

    if let Some(heaviest) = sim
        .bodies()
        .iter()
        .max_by(|a, b| a.mass().total_cmp(&b.mass()))
    {
        println!(
            "\nHeaviest body: mass {:.2}, radius {:.2}, at ({:.1}, {:.1})",
            heaviest.mass(),
            heaviest.radius(),
            heaviest.position().x,
            heaviest.position().y
        );
    }
}
