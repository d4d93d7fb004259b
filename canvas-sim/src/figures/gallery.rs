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

use super::{Figure, Shape, ShapeKind};
use crate::color::{Appearance, Rgba};
use crate::config::{Domain, GalleryConfig};
use crate::error::Result;
use crate::math::Vector2;
use crate::observer::{Observer, Observers, SetEvent, SubscriptionId};
use log::debug;
use rand::Rng;

/// Outcome of one gallery tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GalleryTickReport {
    /// Figures evicted from the front to make room
    pub evicted: usize,
    /// Kind of the figure that was added
    pub added: ShapeKind,
    /// Figures held after the tick
    pub figures: usize,
}

/// Bounded, insertion-ordered collection of figures
///
/// # Example
///
/// ```
/// use canvas_sim::figures::FigureGallery;
/// use canvas_sim::GalleryConfig;
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
///
/// let config = GalleryConfig { capacity: 2, ..GalleryConfig::default() };
/// let mut gallery = FigureGallery::new(config);
/// let mut rng = StdRng::seed_from_u64(5);
///
/// gallery.tick(&mut rng);
/// gallery.tick(&mut rng);
/// let report = gallery.tick(&mut rng);
/// assert_eq!(report.evicted, 1);
/// assert_eq!(gallery.len(), 2);
/// ```
#[derive(Debug)]
pub struct FigureGallery {
    figures: Vec<Figure>,
    observers: Observers<SetEvent>,
    config: GalleryConfig,
}

impl FigureGallery {
    /// Create an empty gallery
    ///
    /// # Panics
    ///
    /// Panics if the configuration fails validation. Use `try_new` for
    /// fallible construction.
    pub fn new(config: GalleryConfig) -> Self {
        if let Err(err) = config.validate() {
            panic!("Invalid gallery configuration: {err}");
        }
        Self::with_valid_config(config)
    }

    /// Try to create an empty gallery
    pub fn try_new(config: GalleryConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_valid_config(config))
    }

    fn with_valid_config(config: GalleryConfig) -> Self {
        FigureGallery {
            figures: Vec::new(),
            observers: Observers::new(),
            config,
        }
    }

    /// Evict the oldest figures while full, then append one random figure
    ///
    /// A capacity of 0 set through `config_mut` behaves like 1: the gallery
    /// always shows the figure added by the latest tick.
    pub fn tick<R: Rng + ?Sized>(&mut self, rng: &mut R) -> GalleryTickReport {
        let capacity = self.config.capacity.max(1);
        let mut evicted = 0;
        while self.figures.len() >= capacity {
            self.remove(0);
            evicted += 1;
        }

        let figure = random_figure(&self.config, rng);
        let added = figure.kind();
        self.add(figure);

        debug!("Gallery tick: evicted {}, added {:?}, {} held", evicted, added, self.figures.len());
        GalleryTickReport {
            evicted,
            added,
            figures: self.figures.len(),
        }
    }

    /// Append a figure and return its index
    pub fn add(&mut self, figure: Figure) -> usize {
        let index = self.figures.len();
        self.figures.push(figure);
        self.observers.notify(&SetEvent::Added { index });
        index
    }

    /// Remove the figure at `index`
    pub fn remove(&mut self, index: usize) -> Option<Figure> {
        if index >= self.figures.len() {
            return None;
        }
        let figure = self.figures.remove(index);
        self.observers.notify(&SetEvent::Removed { index });
        Some(figure)
    }

    /// Subscribe to added / removed events
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

    /// Get the number of figures
    pub fn len(&self) -> usize {
        self.figures.len()
    }

    /// Check if the gallery is empty
    pub fn is_empty(&self) -> bool {
        self.figures.is_empty()
    }

    /// Get the figure at `index`
    pub fn get(&self, index: usize) -> Option<&Figure> {
        self.figures.get(index)
    }

    /// Iterate over figures, oldest first
    pub fn iter(&self) -> std::slice::Iter<'_, Figure> {
        self.figures.iter()
    }

    /// Get the configuration
    pub fn config(&self) -> &GalleryConfig {
        &self.config
    }

    /// Mutable access to the configuration, read again on the next tick
    pub fn config_mut(&mut self) -> &mut GalleryConfig {
        &mut self.config
    }
}

impl Default for FigureGallery {
    fn default() -> Self {
        FigureGallery::new(GalleryConfig::default())
    }
}

impl<'a> IntoIterator for &'a FigureGallery {
    type Item = &'a Figure;
    type IntoIter = std::slice::Iter<'a, Figure>;

    fn into_iter(self) -> Self::IntoIter {
        self.figures.iter()
    }
}

/// Generate one random figure
///
/// Draws, in order: the kind (uniform over the four kinds), the geometry
/// (points uniform in the domain; polygons get a uniform vertex count in
/// `3..=max_polygon_points`), fill color, stroke color, and thickness
/// (uniform in `[0, max_thickness)`).
pub fn random_figure<R: Rng + ?Sized>(config: &GalleryConfig, rng: &mut R) -> Figure {
    let domain = config.domain;
    let kind = ShapeKind::ALL[rng.random_range(0..ShapeKind::COUNT)];

    let shape = match kind {
        ShapeKind::Line => Shape::Line {
            start: domain.random_point(rng),
            end: domain.random_point(rng),
        },
        ShapeKind::Rectangle => {
            let (a, b) = random_corners(&domain, rng);
            Shape::rectangle_from_corners(a, b)
        }
        ShapeKind::Ellipse => {
            let (a, b) = random_corners(&domain, rng);
            Shape::ellipse_from_corners(a, b)
        }
        ShapeKind::Polygon => {
            let max_points = config.max_polygon_points.max(GalleryConfig::MIN_POLYGON_POINTS);
            let count = rng.random_range(GalleryConfig::MIN_POLYGON_POINTS..=max_points);
            Shape::Polygon {
                points: (0..count).map(|_| domain.random_point(rng)).collect(),
            }
        }
    };

    let fill = Rgba::random(rng);
    let stroke = Rgba::random(rng);
    let thickness = rng.random::<f64>() * config.max_thickness;

    Figure::new(shape).with_appearance(Appearance::new(stroke, fill, thickness))
}

fn random_corners<R: Rng + ?Sized>(domain: &Domain, rng: &mut R) -> (Vector2, Vector2) {
    let a = domain.random_point(rng);
    let b = domain.random_point(rng);
    (a, b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashSet;
    use std::sync::{Arc, Mutex};

    fn small_gallery(capacity: usize) -> FigureGallery {
        FigureGallery::new(GalleryConfig {
            capacity,
            ..GalleryConfig::default()
        })
    }

    #[test]
    fn test_zero_capacity_from_host_holds_one_figure() {
        let mut gallery = small_gallery(4);
        let mut rng = ChaCha8Rng::seed_from_u64(12);
        for _ in 0..4 {
            gallery.tick(&mut rng);
        }

        gallery.config_mut().capacity = 0;
        let report = gallery.tick(&mut rng);
        assert_eq!(report.evicted, 4);
        assert_eq!(report.figures, 1);

        let report = gallery.tick(&mut rng);
        assert_eq!(report.evicted, 1);
        assert_eq!(gallery.len(), 1);
    }

    #[test]
    fn test_fills_then_rolls() {
        let mut gallery = small_gallery(3);
        let mut rng = ChaCha8Rng::seed_from_u64(8);

        for expected in 1..=3 {
            let report = gallery.tick(&mut rng);
            assert_eq!(report.evicted, 0);
            assert_eq!(report.figures, expected);
        }

        let second = gallery.get(1).cloned();
        let report = gallery.tick(&mut rng);
        assert_eq!(report.evicted, 1);
        assert_eq!(gallery.len(), 3);
        // The oldest figure left; the previous second is now first
        assert_eq!(gallery.get(0).cloned(), second);
    }

    #[test]
    fn test_events_on_roll() {
        let mut gallery = small_gallery(1);
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        gallery.subscribe(move |event: &SetEvent| sink.lock().unwrap().push(*event));

        let mut rng = ChaCha8Rng::seed_from_u64(1);
        gallery.tick(&mut rng);
        gallery.tick(&mut rng);

        assert_eq!(
            *events.lock().unwrap(),
            vec![
                SetEvent::Added { index: 0 },
                SetEvent::Removed { index: 0 },
                SetEvent::Added { index: 0 },
            ]
        );
    }

    #[test]
    fn test_lowered_capacity_shrinks_gallery() {
        let mut gallery = small_gallery(10);
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        for _ in 0..10 {
            gallery.tick(&mut rng);
        }

        gallery.config_mut().capacity = 4;
        let report = gallery.tick(&mut rng);
        assert_eq!(report.evicted, 7);
        assert_eq!(gallery.len(), 4);
    }

    #[test]
    fn test_random_figures_stay_in_bounds() {
        let config = GalleryConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(12);
        let mut kinds = HashSet::new();

        for _ in 0..400 {
            let figure = random_figure(&config, &mut rng);
            kinds.insert(figure.kind());

            let (position, size) = figure.shape.bounds();
            assert!(config.domain.contains(position));
            assert!(size.width >= 0.0 && size.height >= 0.0);
            assert!(figure.appearance.thickness >= 0.0 && figure.appearance.thickness < 3.0);

            if let Shape::Polygon { points } = &figure.shape {
                assert!((3..=7).contains(&points.len()));
                assert!(points.iter().all(|p| config.domain.contains(*p)));
            }
        }
        assert_eq!(kinds.len(), ShapeKind::COUNT);
    }

    #[test]
    fn test_remove_out_of_bounds() {
        let mut gallery = FigureGallery::default();
        assert!(gallery.remove(0).is_none());
        assert!(gallery.is_empty());
    }

    #[test]
    #[should_panic(expected = "Invalid gallery configuration")]
    fn test_zero_capacity_panics() {
        small_gallery(0);
    }
}
