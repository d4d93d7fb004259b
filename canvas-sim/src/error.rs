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
//! Error types
//!
//! The physics hot path never fails; errors only come from constructing
//! bodies or configuration from untrusted values.

use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while validating bodies and configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A scalar parameter is out of its allowed range.
    #[error("invalid parameter `{name}`: {value} ({reason})")]
    InvalidParam {
        /// Parameter name
        name: &'static str,
        /// Offending value
        value: f64,
        /// Constraint that was violated
        reason: &'static str,
    },

    /// The bounded domain has a negative or non-finite extent.
    #[error("invalid domain {width} x {height}: extents must be non-negative and finite")]
    InvalidDomain {
        /// Requested width
        width: f64,
        /// Requested height
        height: f64,
    },

    /// Minimum spawn mass exceeds the maximum.
    #[error("invalid mass range [{min}, {max}]: minimum must not exceed maximum")]
    InvalidMassRange {
        /// Minimum mass
        min: f64,
        /// Maximum mass
        max: f64,
    },
}

impl Error {
    /// Shorthand for a parameter that must be strictly positive and finite.
    pub(crate) fn not_positive(name: &'static str, value: f64) -> Self {
        Error::InvalidParam {
            name,
            value,
            reason: "must be positive and finite",
        }
    }
}

/// Check that `value` is strictly positive and finite.
pub(crate) fn ensure_positive(name: &'static str, value: f64) -> Result<f64> {
    if value > 0.0 && value.is_finite() {
        Ok(value)
    } else {
        Err(Error::not_positive(name, value))
    }
}
