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
//! Rolling gallery of random figures
//!
//! Ticks the gallery past its capacity and prints a summary of what is on
//! the canvas at the end.
//!
//! ```bash
//! cargo run --example figure_gallery
//! ```

use canvas_sim::{FigureGallery, GalleryConfig, Shape, ShapeKind};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn main() {
    println!("Canvas Sim - Figure Gallery");
    println!("===========================\n");

    let config = GalleryConfig::default();
    let ticks = config.capacity * 3;
    println!("Capacity:       {}", config.capacity);
    println!("Tick interval:  {:?}", config.tick_interval());
    println!("Ticks:          {}\n", ticks);

    let mut gallery = FigureGallery::new(config);
    let mut rng = ChaCha8Rng::seed_from_u64(7);

    let mut evicted = 0;
    for _ in 0..ticks {
        evicted += gallery.tick(&mut rng).evicted;
    }
    println!("Figures on canvas: {} ({} evicted)\n", gallery.len(), evicted);

    for kind in ShapeKind::ALL {
        let count = gallery.iter().filter(|f| f.kind() == kind).count();
        println!("  {:<10} {}", format!("{:?}", kind), count);
    }

    println!("\nNewest five:");
    for figure in gallery.iter().rev().take(5) {
        let (position, size) = figure.shape.bounds();
        let detail = match &figure.shape {
            Shape::Polygon { points } => format!("{} points", points.len()),
            _ => String::new(),
        };
        println!(
            "  {:<10} at ({:>6.1}, {:>6.1}) size {:>6.1} x {:>6.1}  thickness {:.2} {}",
            format!("{:?}", figure.kind()),
            position.x,
            position.y,
            size.width,
            size.height,
            figure.appearance.thickness,
            detail
        );
    }
}
