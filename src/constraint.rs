//! Distance constraints between pairs of cloth particles.

use crate::float::Float;
use crate::particle::Particle;

/// The constraint family a distance constraint belongs to.
///
/// Families differ only in which neighbours they connect and in their
/// rest length; they are solved identically.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ConstraintKind {
    /// Grid edges along the outer boundary.
    Border,
    /// Grid edges in the interior.
    CrossGrain,
    /// Skip-one links resisting bending (rest = 2 × spacing).
    Bend,
    /// Cell diagonals resisting shear (rest = √2 × spacing).
    Bias,
}

/// Keeps particles `a` and `b` at `rest_length` apart.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DistanceConstraint<F: Float> {
    pub a: usize,
    pub b: usize,
    pub rest_length: F,
    pub kind: ConstraintKind,
}

impl<F: Float> DistanceConstraint<F> {
    pub fn new(a: usize, b: usize, rest_length: F, kind: ConstraintKind) -> Self {
        debug_assert!(rest_length > F::zero(), "rest length must be positive");
        DistanceConstraint { a, b, rest_length, kind }
    }

    /// Move both endpoints halfway toward the rest length.
    ///
    /// Each side takes half the correction regardless of mass, so the
    /// midpoint is preserved. Returns `false` when the particles coincide
    /// and no direction can be derived.
    pub fn relax(&self, particles: &mut [Particle<F>]) -> bool {
        let delta = particles[self.b].position - particles[self.a].position;
        let dist = delta.length();
        if dist == F::zero() {
            return false; // degenerate
        }

        let correction = delta.scale((dist - self.rest_length) / dist);
        let half = correction.scale(F::half());
        particles[self.a].position += half;
        particles[self.b].position -= half;
        true
    }

    /// Signed stretch: current length minus rest length.
    pub fn error(&self, particles: &[Particle<F>]) -> F {
        particles[self.a].position.distance(particles[self.b].position) - self.rest_length
    }
}
