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
//! 2D vector math
//!
//! Every quantity in the simulation (position, velocity, force) is a
//! [`Vector2`]. All operations return new values; nothing mutates in place
//! except the compound-assignment operators.

mod vector;

pub use vector::{Size2, Vector2};
