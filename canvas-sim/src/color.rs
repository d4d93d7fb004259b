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
//! Colors and stroke/fill attributes
//!
//! These are cosmetic: nothing in the physics reads them, but they are part
//! of what the renderer draws and they consume draws from the random stream,
//! so generation order matters for reproducibility.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// 32-bit color with alpha
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba {
    /// Alpha channel
    pub a: u8,
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Rgba {
    /// Opaque black
    pub const BLACK: Rgba = Rgba::new(0xFF, 0x00, 0x00, 0x00);

    /// Opaque white
    pub const WHITE: Rgba = Rgba::new(0xFF, 0xFF, 0xFF, 0xFF);

    /// Create a color from alpha, red, green and blue channels
    pub const fn new(a: u8, r: u8, g: u8, b: u8) -> Self {
        Rgba { a, r, g, b }
    }

    /// Draw a uniformly random color, channels drawn in `a, r, g, b` order
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let a = rng.random::<u8>();
        let r = rng.random::<u8>();
        let g = rng.random::<u8>();
        let b = rng.random::<u8>();
        Rgba::new(a, r, g, b)
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Rgba::BLACK
    }
}

/// How a shape is drawn
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Appearance {
    /// Outline color
    pub stroke: Rgba,
    /// Interior color
    pub fill: Rgba,
    /// Outline thickness
    pub thickness: f64,
}

impl Appearance {
    /// Create an appearance
    pub const fn new(stroke: Rgba, fill: Rgba, thickness: f64) -> Self {
        Appearance {
            stroke,
            fill,
            thickness,
        }
    }
}

impl Default for Appearance {
    fn default() -> Self {
        Appearance::new(Rgba::BLACK, Rgba::WHITE, 1.0)
    }
}
