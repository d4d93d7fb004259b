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
//! Random static figures
//!
//! The gallery model keeps a rolling window of randomly generated shapes:
//! every tick appends one new figure, evicting the oldest once the gallery
//! is full. Shapes are a tagged [`Shape`] enum; the renderer matches on the
//! variant.

mod gallery;
mod shape;

pub use gallery::{random_figure, FigureGallery, GalleryTickReport};
pub use shape::{Figure, Shape, ShapeKind};
