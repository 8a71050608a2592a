//! Cloth mesh topology: particle grid, constraint families and faces.

use crate::constraint::{ConstraintKind, DistanceConstraint};
use crate::error::ClothError;
use crate::float::Float;
use crate::particle::Particle;
use crate::vec::Vec3;
use alloc::vec::Vec as AllocVec;

/// Maps normalized grid coordinates `(u, v) ∈ [0, 1]²` to a world-space
/// rest position.
pub trait RestShape<F: Float> {
    fn position(&self, u: F, v: F) -> Vec3<F>;
}

impl<F: Float, S: Fn(F, F) -> Vec3<F>> RestShape<F> for S {
    fn position(&self, u: F, v: F) -> Vec3<F> {
        self(u, v)
    }
}

/// Horizontal rectangle centred on the y axis.
///
/// `u` runs along x and `v` along z.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FlatPlane<F: Float> {
    pub width: F,
    pub depth: F,
    pub elevation: F,
}

impl<F: Float> FlatPlane<F> {
    pub fn new(width: F, depth: F, elevation: F) -> Self {
        FlatPlane { width, depth, elevation }
    }

    /// A plane at `y = 0` whose spacing matches the rest distance of a
    /// `width × height` cloth of the given length, so every constraint is
    /// satisfied at rest.
    pub fn for_cloth(width: usize, height: usize, length: F) -> Self {
        let depth = if width == 0 {
            length
        } else {
            length * F::from_usize(height) / F::from_usize(width)
        };
        FlatPlane { width: length, depth, elevation: F::zero() }
    }

    /// The 500 × 500 blanket held 150 units above the origin.
    pub fn blanket() -> Self {
        FlatPlane {
            width: F::from_f32(500.0),
            depth: F::from_f32(500.0),
            elevation: F::from_f32(150.0),
        }
    }
}

impl<F: Float> RestShape<F> for FlatPlane<F> {
    fn position(&self, u: F, v: F) -> Vec3<F> {
        Vec3::new(
            u * self.width - self.width * F::half(),
            self.elevation,
            v * self.depth - self.depth * F::half(),
        )
    }
}

/// A cloth built from a `(width + 1) × (height + 1)` particle grid.
///
/// Particle `(u, v)` lives at index `u + v * (width + 1)`. Topology is fixed
/// at construction; rebuilding discards all particle history.
#[derive(Clone, Debug)]
pub struct ClothMesh<F: Float> {
    particles: AllocVec<Particle<F>>,
    constraints: AllocVec<DistanceConstraint<F>>,
    faces: AllocVec<[usize; 3]>,
    width: usize,
    height: usize,
    length: F,
    mass: F,
    rest_distance: F,
}

impl<F: Float> ClothMesh<F> {
    /// Build a cloth of `width × height` segments spanning `length` along u.
    ///
    /// Constraints are appended family by family: border, cross-grain,
    /// bend, bias. The order is part of the solver's behavior.
    pub fn build<S: RestShape<F>>(
        width: usize,
        height: usize,
        length: F,
        mass: F,
        rest_shape: &S,
    ) -> Result<Self, ClothError> {
        if width == 0 || height == 0 {
            return Err(ClothError::InvalidGridDimensions { width, height });
        }
        if !length.is_finite() || length <= F::zero() {
            return Err(ClothError::InvalidLength);
        }

        let rest_distance = length / F::from_usize(width);
        let bias_length = (rest_distance * rest_distance + rest_distance * rest_distance).sqrt();
        if rest_distance <= F::zero() || !bias_length.is_finite() {
            return Err(ClothError::InvalidLength);
        }
        let stride = width + 1;
        let index = |u: usize, v: usize| u + v * stride;

        let mut particles = AllocVec::with_capacity(stride * (height + 1));
        for v in 0..=height {
            for u in 0..=width {
                let pos = rest_shape.position(
                    F::from_usize(u) / F::from_usize(width),
                    F::from_usize(v) / F::from_usize(height),
                );
                particles.push(Particle::new(pos, mass)?);
            }
        }

        let bend_length = rest_distance * F::two();
        let mut constraints = AllocVec::new();

        // Border: outer columns and rows
        for v in 0..=height {
            for u in 0..=width {
                if v < height && (u == 0 || u == width) {
                    constraints.push(DistanceConstraint::new(
                        index(u, v), index(u, v + 1), rest_distance, ConstraintKind::Border,
                    ));
                }
                if u < width && (v == 0 || v == height) {
                    constraints.push(DistanceConstraint::new(
                        index(u, v), index(u + 1, v), rest_distance, ConstraintKind::Border,
                    ));
                }
            }
        }

        // Cross-grain: interior grid edges
        for v in 0..height {
            for u in 0..width {
                if u != 0 {
                    constraints.push(DistanceConstraint::new(
                        index(u, v), index(u, v + 1), rest_distance, ConstraintKind::CrossGrain,
                    ));
                }
                if v != 0 {
                    constraints.push(DistanceConstraint::new(
                        index(u, v), index(u + 1, v), rest_distance, ConstraintKind::CrossGrain,
                    ));
                }
            }
        }

        // Bend: skip-one links
        for v in 0..height {
            for u in 0..width {
                if v + 1 < height {
                    constraints.push(DistanceConstraint::new(
                        index(u, v), index(u, v + 2), bend_length, ConstraintKind::Bend,
                    ));
                }
                if u + 1 < width {
                    constraints.push(DistanceConstraint::new(
                        index(u, v), index(u + 2, v), bend_length, ConstraintKind::Bend,
                    ));
                }
            }
        }

        // Bias: both diagonals of every cell
        for v in 0..height {
            for u in 0..width {
                constraints.push(DistanceConstraint::new(
                    index(u, v), index(u + 1, v + 1), bias_length, ConstraintKind::Bias,
                ));
                constraints.push(DistanceConstraint::new(
                    index(u + 1, v), index(u, v + 1), bias_length, ConstraintKind::Bias,
                ));
            }
        }

        let mut faces = AllocVec::with_capacity(2 * width * height);
        for v in 0..height {
            for u in 0..width {
                let a = index(u, v);
                let b = index(u + 1, v);
                let c = index(u + 1, v + 1);
                let d = index(u, v + 1);
                faces.push([a, b, d]);
                faces.push([b, c, d]);
            }
        }

        log::debug!(
            "built {}x{} cloth: {} particles, {} constraints, {} faces",
            width, height, particles.len(), constraints.len(), faces.len(),
        );

        Ok(ClothMesh { particles, constraints, faces, width, height, length, mass, rest_distance })
    }

    /// Build on a plane sized so the rest state satisfies every constraint.
    pub fn flat(width: usize, height: usize, length: F, mass: F) -> Result<Self, ClothError> {
        Self::build(width, height, length, mass, &FlatPlane::for_cloth(width, height, length))
    }

    /// Rebuild with the same dimensions over a new rest shape.
    pub fn rebuild<S: RestShape<F>>(&self, rest_shape: &S) -> Result<Self, ClothError> {
        Self::build(self.width, self.height, self.length, self.mass, rest_shape)
    }

    /// Return every particle to its rest position with zero velocity.
    pub fn reset_to_rest(&mut self) {
        for p in self.particles.iter_mut() {
            p.lock_to_original();
        }
    }

    pub fn index(&self, u: usize, v: usize) -> usize {
        u + v * (self.width + 1)
    }

    pub fn particle(&self, index: usize) -> &Particle<F> {
        &self.particles[index]
    }

    pub fn particle_mut(&mut self, index: usize) -> &mut Particle<F> {
        &mut self.particles[index]
    }

    pub fn particle_at(&self, u: usize, v: usize) -> &Particle<F> {
        &self.particles[self.index(u, v)]
    }

    pub fn particles(&self) -> &[Particle<F>] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut [Particle<F>] {
        &mut self.particles
    }

    pub fn constraints(&self) -> &[DistanceConstraint<F>] {
        &self.constraints
    }

    /// Triangles as particle index triples, two per grid cell.
    pub fn faces(&self) -> &[[usize; 3]] {
        &self.faces
    }

    /// Split borrow used by the step: particles mutable, topology shared.
    pub(crate) fn parts_mut(
        &mut self,
    ) -> (&mut [Particle<F>], &[DistanceConstraint<F>], &[[usize; 3]]) {
        (&mut self.particles, &self.constraints, &self.faces)
    }

    pub fn positions(&self) -> AllocVec<Vec3<F>> {
        self.particles.iter().map(|p| p.position).collect()
    }

    /// Copy positions as `[x0, y0, z0, x1, ...]` into `out`.
    pub fn write_positions(&self, out: &mut [F]) -> Result<(), ClothError> {
        let needed = self.particles.len() * 3;
        if out.len() < needed {
            return Err(ClothError::BufferTooSmall { needed, len: out.len() });
        }
        for (p, chunk) in self.particles.iter().zip(out.chunks_exact_mut(3)) {
            chunk[0] = p.position.x;
            chunk[1] = p.position.y;
            chunk[2] = p.position.z;
        }
        Ok(())
    }

    pub fn width(&self) -> usize { self.width }
    pub fn height(&self) -> usize { self.height }
    pub fn length(&self) -> F { self.length }
    pub fn mass(&self) -> F { self.mass }
    pub fn rest_distance(&self) -> F { self.rest_distance }
    pub fn particle_count(&self) -> usize { self.particles.len() }
    pub fn constraint_count(&self) -> usize { self.constraints.len() }
    pub fn face_count(&self) -> usize { self.faces.len() }

    pub fn constraint_count_of(&self, kind: ConstraintKind) -> usize {
        self.constraints.iter().filter(|c| c.kind == kind).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_by_two_counts() {
        let mesh = ClothMesh::<f64>::flat(2, 2, 10.0, 1.0).unwrap();
        assert_eq!(mesh.particle_count(), 9);
        assert_eq!(mesh.constraint_count_of(ConstraintKind::Border), 8);
        assert_eq!(mesh.constraint_count_of(ConstraintKind::CrossGrain), 4);
        assert_eq!(mesh.constraint_count_of(ConstraintKind::Bend), 4);
        assert_eq!(mesh.constraint_count_of(ConstraintKind::Bias), 8);
        assert_eq!(mesh.constraint_count(), 24);
        assert_eq!(mesh.face_count(), 8);
    }

    #[test]
    fn rejects_zero_segments() {
        let err = ClothMesh::<f32>::flat(0, 3, 10.0, 1.0).unwrap_err();
        assert_eq!(err, ClothError::InvalidGridDimensions { width: 0, height: 3 });
    }

    #[test]
    fn rejects_bad_length_and_mass() {
        assert_eq!(ClothMesh::<f32>::flat(2, 2, 0.0, 1.0).unwrap_err(), ClothError::InvalidLength);
        assert_eq!(ClothMesh::<f32>::flat(2, 2, 10.0, 0.0).unwrap_err(), ClothError::InvalidMass);
    }

    #[test]
    fn rejects_spacing_outside_float_range() {
        // spacing rounds to zero
        assert_eq!(
            ClothMesh::<f32>::flat(4, 4, 1e-45, 1.0).unwrap_err(),
            ClothError::InvalidLength,
        );
        // diagonal overflows
        assert_eq!(
            ClothMesh::<f32>::flat(1, 1, 1e38, 1.0).unwrap_err(),
            ClothError::InvalidLength,
        );
    }

    #[test]
    fn closure_rest_shape() {
        let wall = |u: f32, v: f32| Vec3::new(u * 4.0, v * -4.0, 1.0);
        let mesh = ClothMesh::<f32>::build(2, 2, 4.0, 1.0, &wall).unwrap();
        assert_eq!(mesh.particle_at(2, 2).position, Vec3::new(4.0, -4.0, 1.0));
        assert_eq!(mesh.particle_at(1, 0).original, Vec3::new(2.0, 0.0, 1.0));
    }

    #[test]
    fn faces_reference_cell_corners() {
        let mesh = ClothMesh::<f32>::flat(1, 1, 1.0, 1.0).unwrap();
        assert_eq!(mesh.faces(), &[[0, 1, 2], [1, 3, 2]]);
    }

    #[test]
    fn write_positions_checks_length() {
        let mesh = ClothMesh::<f32>::flat(1, 1, 1.0, 1.0).unwrap();
        let mut short = [0.0f32; 11];
        assert_eq!(
            mesh.write_positions(&mut short).unwrap_err(),
            ClothError::BufferTooSmall { needed: 12, len: 11 },
        );
        let mut buf = [0.0f32; 12];
        mesh.write_positions(&mut buf).unwrap();
        assert_eq!(&buf[9..12], &[0.5, 0.0, 0.5]);
    }
}
