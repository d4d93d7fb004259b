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
//! N-body gravity model
//!
//! Bodies are point masses drawn as circles whose area is proportional to
//! their mass. Each step every body feels the Newtonian pull of every other
//! body, evaluated against a single pre-step snapshot so the outcome does not
//! depend on the order bodies are updated in.

mod body;
mod body_set;
pub mod gravity;

pub use body::{Body, DEFAULT_DENSITY};
pub use body_set::BodySet;
pub use gravity::GRAVITATIONAL_CONSTANT;
