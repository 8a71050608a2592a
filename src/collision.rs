//! Collision response against a static box and a floor plane.

use crate::error::ClothError;
use crate::float::Float;
use crate::particle::Particle;
use crate::vec::Vec3;

/// Static axis-aligned box, e.g. a table the cloth falls onto.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Aabb<F: Float> {
    pub min: Vec3<F>,
    pub max: Vec3<F>,
}

impl<F: Float> Aabb<F> {
    pub fn new(min: Vec3<F>, max: Vec3<F>) -> Result<Self, ClothError> {
        if !min.is_finite() || !max.is_finite() || min.x > max.x || min.y > max.y || min.z > max.z {
            return Err(ClothError::InvalidBounds);
        }
        Ok(Aabb { min, max })
    }

    /// Box of the given size centred on `center`.
    pub fn from_center(center: Vec3<F>, size: Vec3<F>) -> Result<Self, ClothError> {
        let half = size.scale(F::half());
        Self::new(center - half, center + half)
    }

    /// The 250 × 100 × 250 table volume centred at the origin.
    pub fn table() -> Self {
        Aabb {
            min: Vec3::new(F::from_f32(-125.0), F::from_f32(-50.0), F::from_f32(-125.0)),
            max: Vec3::new(F::from_f32(125.0), F::from_f32(50.0), F::from_f32(125.0)),
        }
    }

    pub fn center(&self) -> Vec3<F> {
        (self.min + self.max).scale(F::half())
    }

    /// Inclusive on every face.
    pub fn contains(&self, p: Vec3<F>) -> bool {
        p.x >= self.min.x && p.x <= self.max.x
            && p.y >= self.min.y && p.y <= self.max.y
            && p.z >= self.min.z && p.z <= self.max.z
    }

    /// Project an interior point onto the face it is closest to.
    ///
    /// Each axis picks the face on the point's side of the centre; the point
    /// then moves along the axis with the smallest escape distance. Ties
    /// prefer z, then y, then x.
    pub fn push_out(&self, p: Vec3<F>) -> Vec3<F> {
        let c = self.center();
        let near_x = if p.x <= c.x { self.min.x } else { self.max.x };
        let near_y = if p.y <= c.y { self.min.y } else { self.max.y };
        let near_z = if p.z <= c.z { self.min.z } else { self.max.z };

        let dx = (near_x - p.x).abs();
        let dy = (near_y - p.y).abs();
        let dz = (near_z - p.z).abs();

        let mut out = p;
        if dz <= dx && dz <= dy {
            out.z = near_z;
        } else if dy <= dx && dy <= dz {
            out.y = near_y;
        } else {
            out.x = near_x;
        }
        out
    }

    /// Resolve one particle against the box. Returns `true` if it was inside.
    ///
    /// A fresh penetration snaps straight to the nearest face. When the
    /// previous position was already inside, the result is blended toward
    /// `previous` by `friction` (0 = slide freely, 1 = stick in place).
    pub fn resolve(&self, particle: &mut Particle<F>, friction: F) -> bool {
        if !self.contains(particle.position) {
            return false;
        }
        let surface = self.push_out(particle.position);
        particle.position = if self.contains(particle.previous) {
            surface.lerp(particle.previous, friction)
        } else {
            surface
        };
        true
    }

    /// Resolve every particle; returns how many were inside.
    pub fn resolve_all(&self, particles: &mut [Particle<F>], friction: F) -> usize {
        let mut resolved = 0;
        for p in particles.iter_mut() {
            if self.resolve(p, friction) {
                resolved += 1;
            }
        }
        resolved
    }
}

/// Raise a particle below `floor_y` onto the floor. Returns `true` if clamped.
pub fn clamp_to_floor<F: Float>(particle: &mut Particle<F>, floor_y: F) -> bool {
    if particle.position.y < floor_y {
        particle.position.y = floor_y;
        true
    } else {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box() -> Aabb<f64> {
        Aabb::new(Vec3::new(-1.0, -1.0, -1.0), Vec3::new(1.0, 1.0, 1.0)).unwrap()
    }

    fn particle_at(pos: Vec3<f64>, prev: Vec3<f64>) -> Particle<f64> {
        let mut p = Particle::new(pos, 1.0).unwrap();
        p.previous = prev;
        p
    }

    #[test]
    fn rejects_inverted_bounds() {
        let err = Aabb::new(Vec3::new(1.0f32, 0.0, 0.0), Vec3::new(0.0, 1.0, 1.0));
        assert_eq!(err.unwrap_err(), ClothError::InvalidBounds);
    }

    #[test]
    fn contains_is_inclusive() {
        let b = unit_box();
        assert!(b.contains(Vec3::new(1.0, 1.0, 1.0)));
        assert!(!b.contains(Vec3::new(1.0, 1.0, 1.0001)));
    }

    #[test]
    fn pushes_out_along_least_penetration() {
        let b = unit_box();
        assert_eq!(b.push_out(Vec3::new(0.9, 0.1, -0.2)), Vec3::new(1.0, 0.1, -0.2));
        assert_eq!(b.push_out(Vec3::new(0.0, 0.8, 0.5)), Vec3::new(0.0, 1.0, 0.5));
        assert_eq!(b.push_out(Vec3::new(0.3, 0.0, -0.95)), Vec3::new(0.3, 0.0, -1.0));
    }

    #[test]
    fn ties_prefer_z_then_y() {
        let b = unit_box();
        assert_eq!(b.push_out(Vec3::new(0.5, 0.5, 0.5)), Vec3::new(0.5, 0.5, 1.0));
        assert_eq!(b.push_out(Vec3::new(0.5, 0.5, 0.0)), Vec3::new(0.5, 1.0, 0.0));
    }

    #[test]
    fn fresh_penetration_snaps_to_surface() {
        let b = unit_box();
        let mut p = particle_at(Vec3::new(0.0, 0.9, 0.0), Vec3::new(0.0, 1.5, 0.0));
        assert!(b.resolve(&mut p, 0.9));
        assert_eq!(p.position, Vec3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn sustained_contact_blends_toward_previous() {
        let b = unit_box();
        let prev = Vec3::new(0.5, 0.95, 0.0);
        let mut p = particle_at(Vec3::new(0.0, 0.9, 0.0), prev);
        b.resolve(&mut p, 0.9);
        // surface point (0, 1, 0); 0.9 * prev + 0.1 * surface
        assert!((p.position.x - 0.45).abs() < 1e-12);
        assert!((p.position.y - 0.955).abs() < 1e-12);
    }

    #[test]
    fn frictionless_contact_matches_surface() {
        let b = unit_box();
        let mut p = particle_at(Vec3::new(0.0, 0.9, 0.0), Vec3::new(0.2, 0.8, 0.0));
        b.resolve(&mut p, 0.0);
        assert_eq!(p.position, Vec3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn outside_particle_untouched() {
        let b = unit_box();
        let mut p = particle_at(Vec3::new(3.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 0.0));
        assert!(!b.resolve(&mut p, 0.9));
        assert_eq!(p.position, Vec3::new(3.0, 0.0, 0.0));
    }

    #[test]
    fn floor_clamp() {
        let mut p = particle_at(Vec3::new(0.0, -300.0, 0.0), Vec3::zero());
        assert!(clamp_to_floor(&mut p, -249.0));
        assert_eq!(p.position.y, -249.0);
        assert!(!clamp_to_floor(&mut p, -249.0));
        assert_eq!(p.position.y, -249.0);
    }

    #[test]
    fn from_center_spans_size() {
        let b = Aabb::from_center(Vec3::new(0.0f64, 10.0, 0.0), Vec3::new(4.0, 2.0, 6.0)).unwrap();
        assert_eq!(b.min, Vec3::new(-2.0, 9.0, -3.0));
        assert_eq!(b.max, Vec3::new(2.0, 11.0, 3.0));
        assert_eq!(b.center(), Vec3::new(0.0, 10.0, 0.0));
        assert_eq!(
            Aabb::from_center(Vec3::zero(), Vec3::new(-1.0f32, 1.0, 1.0)).unwrap_err(),
            ClothError::InvalidBounds,
        );
    }

    #[test]
    fn table_preset_dimensions() {
        let t = Aabb::<f32>::table();
        assert_eq!(t.max - t.min, Vec3::new(250.0, 100.0, 250.0));
        assert_eq!(t.center(), Vec3::zero());
    }
}
