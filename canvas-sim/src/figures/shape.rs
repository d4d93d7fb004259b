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
//! Shape variants and figures

use crate::color::Appearance;
use crate::math::{Size2, Vector2};
use serde::{Deserialize, Serialize};

/// Discriminant of a [`Shape`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    /// Straight segment
    Line,
    /// Axis-aligned rectangle
    Rectangle,
    /// Axis-aligned ellipse
    Ellipse,
    /// Closed polygon
    Polygon,
}

impl ShapeKind {
    /// Number of shape kinds
    pub const COUNT: usize = 4;

    /// All kinds, in generation order
    pub const ALL: [ShapeKind; ShapeKind::COUNT] = [
        ShapeKind::Line,
        ShapeKind::Rectangle,
        ShapeKind::Ellipse,
        ShapeKind::Polygon,
    ];

    /// Kind for a draw in `0..COUNT`
    pub fn from_index(index: usize) -> Option<ShapeKind> {
        ShapeKind::ALL.get(index).copied()
    }
}

/// Geometry of a figure
///
/// Rectangles and ellipses are stored as top-left position plus a
/// non-negative size; use [`Shape::rectangle_from_corners`] and
/// [`Shape::ellipse_from_corners`] to build them from any two opposite
/// corners.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    /// Segment from `start` to `end`
    Line {
        /// First endpoint
        start: Vector2,
        /// Second endpoint
        end: Vector2,
    },
    /// Rectangle with top-left corner at `position`
    Rectangle {
        /// Top-left corner
        position: Vector2,
        /// Extent
        size: Size2,
    },
    /// Ellipse inscribed in the rectangle at `position` with `size`
    Ellipse {
        /// Top-left corner of the bounding box
        position: Vector2,
        /// Extent of the bounding box
        size: Size2,
    },
    /// Polygon through `points`, closed back to the first point
    Polygon {
        /// Vertices in drawing order
        points: Vec<Vector2>,
    },
}

impl Shape {
    /// Rectangle spanning two opposite corners
    ///
    /// ```
    /// use canvas_sim::figures::Shape;
    /// use canvas_sim::{Size2, Vector2};
    ///
    /// let shape = Shape::rectangle_from_corners(Vector2::new(30.0, 5.0), Vector2::new(10.0, 25.0));
    /// assert_eq!(
    ///     shape,
    ///     Shape::Rectangle { position: Vector2::new(10.0, 5.0), size: Size2::new(20.0, 20.0) }
    /// );
    /// ```
    pub fn rectangle_from_corners(a: Vector2, b: Vector2) -> Shape {
        let (position, size) = normalize_corners(a, b);
        Shape::Rectangle { position, size }
    }

    /// Ellipse inscribed in the box spanning two opposite corners
    pub fn ellipse_from_corners(a: Vector2, b: Vector2) -> Shape {
        let (position, size) = normalize_corners(a, b);
        Shape::Ellipse { position, size }
    }

    /// Get the kind
    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Line { .. } => ShapeKind::Line,
            Shape::Rectangle { .. } => ShapeKind::Rectangle,
            Shape::Ellipse { .. } => ShapeKind::Ellipse,
            Shape::Polygon { .. } => ShapeKind::Polygon,
        }
    }

    /// Axis-aligned bounding box as top-left corner and size
    ///
    /// An empty polygon has a zero box at the origin.
    pub fn bounds(&self) -> (Vector2, Size2) {
        match self {
            Shape::Line { start, end } => normalize_corners(*start, *end),
            Shape::Rectangle { position, size } | Shape::Ellipse { position, size } => (*position, *size),
            Shape::Polygon { points } => {
                let Some(first) = points.first() else {
                    return (Vector2::zero(), Size2::default());
                };
                let (min, max) = points.iter().fold((*first, *first), |(min, max), p| {
                    (
                        Vector2::new(min.x.min(p.x), min.y.min(p.y)),
                        Vector2::new(max.x.max(p.x), max.y.max(p.y)),
                    )
                });
                normalize_corners(min, max)
            }
        }
    }
}

fn normalize_corners(a: Vector2, b: Vector2) -> (Vector2, Size2) {
    let minimum = Vector2::new(a.x.min(b.x), a.y.min(b.y));
    let maximum = Vector2::new(a.x.max(b.x), a.y.max(b.y));
    let extent = maximum - minimum;
    (minimum, Size2::new(extent.x, extent.y))
}

/// A shape with its stroke, fill and thickness
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Figure {
    /// Geometry
    pub shape: Shape,
    /// Colors and outline thickness
    pub appearance: Appearance,
}

impl Figure {
    /// Create a figure with the default appearance
    pub fn new(shape: Shape) -> Self {
        Figure {
            shape,
            appearance: Appearance::default(),
        }
    }

    /// Replace the appearance
    pub fn with_appearance(mut self, appearance: Appearance) -> Self {
        self.appearance = appearance;
        self
    }

    /// Get the shape kind
    pub fn kind(&self) -> ShapeKind {
        self.shape.kind()
    }
}
