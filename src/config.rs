//! Configuration for the cloth simulation.

use crate::error::ClothError;
use crate::float::Float;
use crate::forces::Wind;
use crate::vec::Vec3;

/// Earth gravity scaled to scene units (140 units per metre).
pub const SCENE_GRAVITY: f32 = 9.81 * 140.0;

/// Configuration for the integrator, solver and collision response.
///
/// # Builder Pattern
/// ```
/// use drape::config::SimulationConfig;
/// use drape::vec::Vec3;
///
/// let config: SimulationConfig<f32> = SimulationConfig::new()
///     .with_timestep(1.0 / 60.0)
///     .with_gravity(Vec3::new(0.0, -9.81, 0.0))
///     .with_drag(0.99)
///     .with_solver_iterations(4);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimulationConfig<F: Float> {
    /// Fixed step length in seconds; only its square is used. Default: 0.018.
    pub timestep: F,
    /// Fraction of the implicit velocity kept each step, in (0, 1]. Default: 0.97.
    pub drag: F,
    /// Gravity acceleration. Default: `(0, -9.81 * 140, 0)`.
    pub gravity: Vec3<F>,
    /// Mass of every particle. Default: 0.1.
    pub particle_mass: F,
    /// Optional constant wind applied per face. Default: none.
    pub wind: Option<Wind<F>>,
    /// Box contact friction in [0, 1]. Default: 0.9.
    pub friction: F,
    /// Floor height; `None` disables the clamp. Default: -249.
    pub floor_y: Option<F>,
    /// Constraint passes per step. Default: 1.
    pub solver_iterations: usize,
}

impl<F: Float> SimulationConfig<F> {
    /// Create a new config with default values.
    pub fn new() -> Self {
        SimulationConfig {
            timestep: F::from_f32(0.018),
            drag: F::from_f32(0.97),
            gravity: Vec3::new(F::zero(), F::from_f32(-SCENE_GRAVITY), F::zero()),
            particle_mass: F::from_f32(0.1),
            wind: None,
            friction: F::from_f32(0.9),
            floor_y: Some(F::from_f32(-249.0)),
            solver_iterations: 1,
        }
    }

    /// Cloth dropped onto a table: gravity along -y, no wind.
    pub fn blanket() -> Self {
        Self::new()
    }

    /// Flag on a pole: gravity along +z of the unrotated cloth, wind on.
    pub fn flag() -> Self {
        Self::new()
            .with_gravity(Vec3::new(F::zero(), F::zero(), F::from_f32(SCENE_GRAVITY)))
            .with_wind(Some(Wind::gust()))
    }

    pub fn with_timestep(mut self, timestep: F) -> Self {
        self.timestep = timestep;
        self
    }

    pub fn with_drag(mut self, drag: F) -> Self {
        self.drag = drag;
        self
    }

    pub fn with_gravity(mut self, gravity: Vec3<F>) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_particle_mass(mut self, mass: F) -> Self {
        self.particle_mass = mass;
        self
    }

    pub fn with_wind(mut self, wind: Option<Wind<F>>) -> Self {
        self.wind = wind;
        self
    }

    pub fn with_friction(mut self, friction: F) -> Self {
        self.friction = friction;
        self
    }

    pub fn with_floor(mut self, floor_y: Option<F>) -> Self {
        self.floor_y = floor_y;
        self
    }

    /// Set the number of constraint passes per step.
    pub fn with_solver_iterations(mut self, iterations: usize) -> Self {
        self.solver_iterations = iterations;
        self
    }

    /// Square of the fixed timestep, the only form the integrator uses.
    pub fn dt_sq(&self) -> F {
        self.timestep * self.timestep
    }

    /// Reject values the integrator or solver cannot work with.
    pub fn validate(&self) -> Result<(), ClothError> {
        if !self.timestep.is_finite() || self.timestep <= F::zero() {
            return Err(ClothError::InvalidTimestep);
        }
        if !self.drag.is_finite() || self.drag <= F::zero() || self.drag > F::one() {
            return Err(ClothError::InvalidDrag);
        }
        if !self.particle_mass.is_finite() || self.particle_mass <= F::zero() {
            return Err(ClothError::InvalidMass);
        }
        if !self.friction.is_finite() || self.friction < F::zero() || self.friction > F::one() {
            return Err(ClothError::InvalidFriction);
        }
        if self.solver_iterations == 0 {
            return Err(ClothError::InvalidIterations);
        }
        Ok(())
    }
}

impl<F: Float> Default for SimulationConfig<F> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let c = SimulationConfig::<f32>::default();
        assert!(c.validate().is_ok());
        assert!((c.dt_sq() - 0.000324).abs() < 1e-9);
        assert_eq!(c.floor_y, Some(-249.0));
    }

    #[test]
    fn validation_errors() {
        let base = SimulationConfig::<f64>::new();
        assert_eq!(base.clone().with_drag(0.0).validate(), Err(ClothError::InvalidDrag));
        assert_eq!(base.clone().with_drag(1.5).validate(), Err(ClothError::InvalidDrag));
        assert_eq!(base.clone().with_friction(-0.1).validate(), Err(ClothError::InvalidFriction));
        assert_eq!(base.clone().with_timestep(0.0).validate(), Err(ClothError::InvalidTimestep));
        assert_eq!(base.clone().with_particle_mass(0.0).validate(), Err(ClothError::InvalidMass));
        assert_eq!(base.with_solver_iterations(0).validate(), Err(ClothError::InvalidIterations));
    }

    #[test]
    fn flag_preset_blows_sideways() {
        let c = SimulationConfig::<f32>::flag();
        assert!(c.wind.is_some());
        assert_eq!(c.gravity.y, 0.0);
        assert!(c.gravity.z > 0.0);
    }
}
