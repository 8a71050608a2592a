//! Verlet particles with implicit velocity.

use crate::error::ClothError;
use crate::float::Float;
use crate::vec::Vec3;

/// A cloth particle: point mass carrying Verlet state.
///
/// Velocity is implicit (`position - previous`). `original` is the rest
/// position from the undeformed grid and is only read when the particle is
/// reset. An `inv_mass` of zero marks an immovable particle.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle<F: Float> {
    pub position: Vec3<F>,
    pub previous: Vec3<F>,
    pub original: Vec3<F>,
    pub accel: Vec3<F>,
    pub mass: F,
    pub inv_mass: F,
}

impl<F: Float> Particle<F> {
    /// Create a movable particle at rest. Mass must be positive and finite.
    pub fn new(position: Vec3<F>, mass: F) -> Result<Self, ClothError> {
        if !mass.is_finite() || mass <= F::zero() {
            return Err(ClothError::InvalidMass);
        }
        Ok(Particle {
            position,
            previous: position,
            original: position,
            accel: Vec3::zero(),
            mass,
            inv_mass: F::one() / mass,
        })
    }

    /// Create an immovable particle. Forces have no effect on it.
    pub fn fixed(position: Vec3<F>) -> Self {
        Particle {
            position,
            previous: position,
            original: position,
            accel: Vec3::zero(),
            mass: F::zero(),
            inv_mass: F::zero(),
        }
    }

    pub fn is_fixed(&self) -> bool {
        self.inv_mass == F::zero()
    }

    /// Accumulate a force for the current step: `accel += force / mass`.
    pub fn add_force(&mut self, force: Vec3<F>) {
        self.accel += force.scale(self.inv_mass);
    }

    /// Advance one fixed step.
    ///
    /// Drag scales the implicit velocity only; the acceleration term is
    /// applied undamped. Clears `accel`.
    pub fn integrate(&mut self, dt_sq: F, drag: F) {
        let velocity = self.velocity_raw().scale(drag);
        let new_pos = self.position + velocity + self.accel.scale(dt_sq);
        self.previous = self.position;
        self.position = new_pos;
        self.accel = Vec3::zero();
    }

    /// Per-step displacement (`position - previous`).
    pub fn velocity_raw(&self) -> Vec3<F> {
        self.position - self.previous
    }

    /// Undo this step's motion by snapping back to `previous`.
    pub fn lock(&mut self) {
        self.position = self.previous;
    }

    /// Return to the rest position with zero velocity.
    pub fn lock_to_original(&mut self) {
        self.position = self.original;
        self.previous = self.original;
        self.accel = Vec3::zero();
    }
}
