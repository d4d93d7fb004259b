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
//! Pairwise Newtonian gravity
//!
//! The force on body `i` from body `j` is
//!
//! **F_ij = (p_j - p_i) / d * (G * m_i * m_j) / d²**
//!
//! where `d = |p_j - p_i|`. Dividing the displacement by `d` normalizes it,
//! so the magnitude is the familiar `G * m_i * m_j / d²`.
//!
//! There is no softening term. Two bodies at exactly the same position
//! produce a `NaN` force, which turns both positions into `NaN`; a `NaN`
//! position is never inside the domain, so both bodies are pruned on the
//! next tick.
//!
//! The mass product is formed before multiplying by `G` so that `F_ij` is
//! the exact bitwise negation of `F_ji`.

use super::Body;
use crate::math::Vector2;

/// Gravitational constant in simulation units
///
/// Scaled so that bodies of mass 1-10 a few hundred units apart visibly
/// attract within a few hundred ticks.
pub const GRAVITATIONAL_CONSTANT: f64 = 100.0;

/// Force exerted on `subject` by `other`
///
/// # Example
///
/// ```
/// use canvas_sim::{Body, Vector2};
/// use canvas_sim::nbody::gravity::{pairwise_force, GRAVITATIONAL_CONSTANT};
///
/// let a = Body::new(10.0, 0.001, Vector2::new(0.0, 0.0), Vector2::zero());
/// let b = Body::new(10.0, 0.001, Vector2::new(10.0, 0.0), Vector2::zero());
///
/// let f = pairwise_force(&a, &b, GRAVITATIONAL_CONSTANT);
/// assert_eq!(f, Vector2::new(100.0, 0.0));
/// ```
pub fn pairwise_force(subject: &Body, other: &Body, g: f64) -> Vector2 {
    let distance = subject.position().distance(other.position());
    let mass_product = subject.mass() * other.mass();
    (other.position() - subject.position())
        .divide(distance)
        .scale(g * mass_product)
        .divide(distance * distance)
}

/// Total force exerted on `subject` by every body in `others`
///
/// Contributions are summed in iteration order. `others` must not contain
/// `subject` itself; a body at zero distance from the subject yields `NaN`.
pub fn net_force<'a, I>(subject: &Body, others: I, g: f64) -> Vector2
where
    I: IntoIterator<Item = &'a Body>,
{
    Vector2::sum(others.into_iter().map(|other| pairwise_force(subject, other, g)))
}

/// Net force on `snapshot[index]` from every other body in `snapshot`
pub(crate) fn force_on(snapshot: &[Body], index: usize, g: f64) -> Vector2 {
    let subject = &snapshot[index];
    let others = snapshot
        .iter()
        .enumerate()
        .filter(|&(other_index, _)| other_index != index)
        .map(|(_, other)| other);
    net_force(subject, others, g)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn body_at(mass: f64, x: f64, y: f64) -> Body {
        Body::new(mass, 0.001, Vector2::new(x, y), Vector2::zero())
    }

    #[test]
    fn test_gravitational_constant() {
        assert_eq!(GRAVITATIONAL_CONSTANT, 100.0);
    }

    #[test]
    fn test_pairwise_force_magnitude_and_direction() {
        let a = body_at(10.0, 0.0, 0.0);
        let b = body_at(10.0, 10.0, 0.0);

        let f = pairwise_force(&a, &b, GRAVITATIONAL_CONSTANT);
        // G * m1 * m2 / d² = 100 * 10 * 10 / 100
        assert_eq!(f, Vector2::new(100.0, 0.0));
    }

    #[test]
    fn test_inverse_square_falloff() {
        let a = body_at(2.0, 0.0, 0.0);
        let near = body_at(3.0, 0.0, 5.0);
        let far = body_at(3.0, 0.0, 10.0);

        let f_near = pairwise_force(&a, &near, 1.0).magnitude();
        let f_far = pairwise_force(&a, &far, 1.0).magnitude();
        assert_relative_eq!(f_near / f_far, 4.0, epsilon = 1e-12);
        assert_relative_eq!(f_near, 1.0 * 2.0 * 3.0 / 25.0, epsilon = 1e-12);
    }

    #[test]
    fn test_pairwise_force_is_antisymmetric() {
        let a = body_at(3.7, 12.25, -4.5);
        let b = body_at(8.1, -7.0, 33.3);

        let f_ab = pairwise_force(&a, &b, GRAVITATIONAL_CONSTANT);
        let f_ba = pairwise_force(&b, &a, GRAVITATIONAL_CONSTANT);
        assert_eq!(f_ab, -f_ba);
    }

    #[test]
    fn test_net_force_of_nothing_is_zero() {
        let a = body_at(1.0, 5.0, 5.0);
        assert_eq!(net_force(&a, std::iter::empty(), GRAVITATIONAL_CONSTANT), Vector2::zero());
    }

    #[test]
    fn test_net_force_cancels_between_equal_neighbours() {
        let centre = body_at(1.0, 50.0, 50.0);
        let left = body_at(4.0, 40.0, 50.0);
        let right = body_at(4.0, 60.0, 50.0);

        let f = net_force(&centre, [&left, &right], GRAVITATIONAL_CONSTANT);
        assert_eq!(f, Vector2::zero());
    }

    #[test]
    fn test_zero_distance_yields_nan() {
        let a = body_at(1.0, 5.0, 5.0);
        let b = body_at(1.0, 5.0, 5.0);

        let f = pairwise_force(&a, &b, GRAVITATIONAL_CONSTANT);
        assert!(f.x.is_nan());
        assert!(f.y.is_nan());
    }

    #[test]
    fn test_force_on_skips_self() {
        let snapshot = vec![body_at(10.0, 0.0, 0.0), body_at(10.0, 10.0, 0.0)];
        assert_eq!(force_on(&snapshot, 0, GRAVITATIONAL_CONSTANT), Vector2::new(100.0, 0.0));
        assert_eq!(force_on(&snapshot, 1, GRAVITATIONAL_CONSTANT), Vector2::new(-100.0, 0.0));
    }
}
