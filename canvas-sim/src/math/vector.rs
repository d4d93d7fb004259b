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
//! Value types for planar geometry
//!
//! [`Vector2`] uses double-precision coordinates. Division follows IEEE-754
//! semantics: dividing by zero yields `±inf` or `NaN` rather than panicking,
//! which is what lets coincident bodies drift out of the domain and get
//! pruned instead of aborting a tick.

use serde::{Deserialize, Serialize};
use std::iter::Sum;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub};

/// 2D vector with double-precision components
///
/// # Examples
///
/// ```
/// use canvas_sim::Vector2;
///
/// let a = Vector2::new(3.0, 4.0);
/// assert_eq!(a.magnitude(), 5.0);
/// assert_eq!(a.distance(Vector2::zero()), 5.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector2 {
    /// X component
    pub x: f64,
    /// Y component
    pub y: f64,
}

impl Vector2 {
    /// Create a new vector
    pub const fn new(x: f64, y: f64) -> Self {
        Vector2 { x, y }
    }

    /// The zero vector
    pub const fn zero() -> Self {
        Vector2::new(0.0, 0.0)
    }

    /// Component-wise sum
    pub fn add(self, other: Vector2) -> Vector2 {
        Vector2::new(self.x + other.x, self.y + other.y)
    }

    /// Component-wise difference `self - other`
    pub fn subtract(self, other: Vector2) -> Vector2 {
        Vector2::new(self.x - other.x, self.y - other.y)
    }

    /// Multiply both components by `k`
    pub fn scale(self, k: f64) -> Vector2 {
        Vector2::new(self.x * k, self.y * k)
    }

    /// Divide both components by `k`
    ///
    /// `k == 0.0` propagates infinity or NaN.
    pub fn divide(self, k: f64) -> Vector2 {
        Vector2::new(self.x / k, self.y / k)
    }

    /// Euclidean length
    pub fn magnitude(self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Euclidean distance between two points
    pub fn distance(self, other: Vector2) -> f64 {
        self.subtract(other).magnitude()
    }

    /// Sum a sequence of vectors; the empty sum is the zero vector
    pub fn sum<I>(vectors: I) -> Vector2
    where
        I: IntoIterator<Item = Vector2>,
    {
        vectors.into_iter().fold(Vector2::zero(), Vector2::add)
    }

    /// Check if both components are finite (not NaN or infinite)
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Exact component-wise equality
    ///
    /// Same as `==`; spelled out where change detection depends on it.
    pub fn is_exactly(self, other: Vector2) -> bool {
        self.x == other.x && self.y == other.y
    }

    /// Check if the point lies inside `[0, width] x [0, height]`, bounds inclusive
    ///
    /// NaN components are never in range.
    pub fn is_in_range(self, size: Size2) -> bool {
        in_closed_range(self.x, 0.0, size.width) && in_closed_range(self.y, 0.0, size.height)
    }
}

#[inline]
fn in_closed_range(value: f64, minimum: f64, maximum: f64) -> bool {
    value >= minimum && value <= maximum
}

impl Add for Vector2 {
    type Output = Vector2;

    fn add(self, rhs: Vector2) -> Vector2 {
        Vector2::add(self, rhs)
    }
}

impl AddAssign for Vector2 {
    fn add_assign(&mut self, rhs: Vector2) {
        *self = Vector2::add(*self, rhs);
    }
}

impl Sub for Vector2 {
    type Output = Vector2;

    fn sub(self, rhs: Vector2) -> Vector2 {
        self.subtract(rhs)
    }
}

impl Neg for Vector2 {
    type Output = Vector2;

    fn neg(self) -> Vector2 {
        Vector2::new(-self.x, -self.y)
    }
}

impl Mul<f64> for Vector2 {
    type Output = Vector2;

    fn mul(self, k: f64) -> Vector2 {
        self.scale(k)
    }
}

impl Div<f64> for Vector2 {
    type Output = Vector2;

    fn div(self, k: f64) -> Vector2 {
        self.divide(k)
    }
}

impl Sum for Vector2 {
    fn sum<I: Iterator<Item = Vector2>>(iter: I) -> Vector2 {
        Vector2::sum(iter)
    }
}

impl<'a> Sum<&'a Vector2> for Vector2 {
    fn sum<I: Iterator<Item = &'a Vector2>>(iter: I) -> Vector2 {
        Vector2::sum(iter.copied())
    }
}

/// Width and height of a rectangular extent
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size2 {
    /// Horizontal extent
    pub width: f64,
    /// Vertical extent
    pub height: f64,
}

impl Size2 {
    /// Create a new size
    pub const fn new(width: f64, height: f64) -> Self {
        Size2 { width, height }
    }

    /// The size as a vector `(width, height)`
    pub fn as_vector(self) -> Vector2 {
        Vector2::new(self.width, self.height)
    }
}
