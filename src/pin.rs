//! Which particles are held in place after each step.

use crate::error::ClothError;
use crate::float::Float;
use crate::mesh::ClothMesh;
use alloc::vec::Vec as AllocVec;

/// Particles re-locked to their pre-step position at the end of every step.
///
/// Locking overwrites whatever the integrator, solver and collision did to
/// these particles, so a flagpole edge never drifts.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PinSpec {
    #[default]
    None,
    /// Every particle with grid coordinate `u == column`.
    Column(usize),
    /// Every particle with grid coordinate `v == row`.
    Row(usize),
    /// Explicit particle indices.
    Particles(AllocVec<usize>),
}

impl PinSpec {
    pub fn is_active(&self) -> bool {
        !matches!(self, PinSpec::None)
    }

    /// Check every pinned particle exists in `mesh`.
    pub fn validate<F: Float>(&self, mesh: &ClothMesh<F>) -> Result<(), ClothError> {
        let count = mesh.particle_count();
        match self {
            PinSpec::None => Ok(()),
            PinSpec::Column(u) if *u > mesh.width() => {
                Err(ClothError::ColumnOutOfBounds { column: *u, width: mesh.width() })
            }
            PinSpec::Row(v) if *v > mesh.height() => {
                Err(ClothError::RowOutOfBounds { row: *v, height: mesh.height() })
            }
            PinSpec::Particles(indices) => match indices.iter().find(|&&i| i >= count) {
                Some(&index) => Err(ClothError::ParticleOutOfBounds { index, count }),
                None => Ok(()),
            },
            _ => Ok(()),
        }
    }

    /// Snap pinned particles back to `previous`.
    pub fn apply<F: Float>(&self, mesh: &mut ClothMesh<F>) {
        match self {
            PinSpec::None => {}
            PinSpec::Column(u) => {
                for v in 0..=mesh.height() {
                    let i = mesh.index(*u, v);
                    mesh.particle_mut(i).lock();
                }
            }
            PinSpec::Row(v) => {
                for u in 0..=mesh.width() {
                    let i = mesh.index(u, *v);
                    mesh.particle_mut(i).lock();
                }
            }
            PinSpec::Particles(indices) => {
                for &i in indices {
                    mesh.particle_mut(i).lock();
                }
            }
        }
    }
}
