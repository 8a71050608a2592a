//! External forces: gravity and per-face aerodynamic wind.

use crate::float::Float;
use crate::particle::Particle;
use crate::vec::Vec3;

/// A constant wind, stored as its force vector.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Wind<F: Float> {
    pub force: Vec3<F>,
}

impl<F: Float> Wind<F> {
    /// Wind blowing along `direction` (normalized) with the given strength.
    pub fn new(direction: Vec3<F>, strength: F) -> Self {
        Wind { force: direction.normalize().scale(strength) }
    }

    /// Strength 100 along `(-1, -1, 0)`.
    pub fn gust() -> Self {
        Self::new(
            Vec3::new(F::from_f32(-10.0), F::from_f32(-10.0), F::zero()),
            F::from_f32(100.0),
        )
    }
}

/// Accelerate every movable particle by `gravity`.
///
/// Applied as the force `gravity * mass` so it flows through `add_force`
/// like any other force.
pub fn apply_gravity<F: Float>(particles: &mut [Particle<F>], gravity: Vec3<F>) {
    for p in particles.iter_mut() {
        let force = gravity.scale(p.mass);
        p.add_force(force);
    }
}

/// Push each face along its normal by the wind's normal component.
///
/// Every face adds the same force to each of its three particles.
/// Faces with a degenerate normal contribute nothing.
pub fn apply_wind<F: Float>(particles: &mut [Particle<F>], faces: &[[usize; 3]], wind: &Wind<F>) {
    for &[a, b, c] in faces {
        let normal = face_normal(particles, a, b, c);
        let force = normal.scale(normal.dot(wind.force));
        particles[a].add_force(force);
        particles[b].add_force(force);
        particles[c].add_force(force);
    }
}

/// Unit normal of triangle `(a, b, c)` from current positions.
pub fn face_normal<F: Float>(particles: &[Particle<F>], a: usize, b: usize, c: usize) -> Vec3<F> {
    let pa = particles[a].position;
    let ab = particles[b].position - pa;
    let ac = particles[c].position - pa;
    ab.cross(ac).normalize()
}

/// Advance every particle one fixed step.
pub fn integrate_all<F: Float>(particles: &mut [Particle<F>], dt_sq: F, drag: F) {
    for p in particles.iter_mut() {
        p.integrate(dt_sq, drag);
    }
}
