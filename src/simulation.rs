//! Per-frame step orchestration over an explicit, caller-owned state.

use crate::collision::{clamp_to_floor, Aabb};
use crate::config::SimulationConfig;
use crate::error::ClothError;
use crate::float::Float;
use crate::forces::{apply_gravity, apply_wind, integrate_all};
use crate::mesh::{ClothMesh, RestShape};
use crate::observer::StepObserver;
use crate::pin::PinSpec;
use crate::solver::ConstraintSolver;
use crate::vec::Vec3;
use alloc::vec::Vec as AllocVec;

/// One independent cloth simulation.
///
/// Holds the mesh, configuration, optional collision box and pin spec. The
/// first [`tick`](Simulation::tick) only records its timestamp; every later
/// tick advances by one fixed step, regardless of how much wall-clock time
/// passed in between.
#[derive(Clone, Debug)]
pub struct Simulation<F: Float> {
    mesh: ClothMesh<F>,
    config: SimulationConfig<F>,
    collision: Option<Aabb<F>>,
    pin: PinSpec,
    last_tick: Option<f64>,
    steps: u64,
}

impl<F: Float> Simulation<F> {
    /// Wrap an existing mesh. Fails if `config` is invalid.
    pub fn new(mesh: ClothMesh<F>, config: SimulationConfig<F>) -> Result<Self, ClothError> {
        config.validate()?;
        Ok(Simulation {
            mesh,
            config,
            collision: None,
            pin: PinSpec::None,
            last_tick: None,
            steps: 0,
        })
    }

    /// Build a `width × height` cloth over `rest_shape`, using the
    /// configured particle mass.
    pub fn build<S: RestShape<F>>(
        width: usize,
        height: usize,
        length: F,
        rest_shape: &S,
        config: SimulationConfig<F>,
    ) -> Result<Self, ClothError> {
        config.validate()?;
        let mesh = ClothMesh::build(width, height, length, config.particle_mass, rest_shape)?;
        Self::new(mesh, config)
    }

    pub fn with_collision(mut self, collision: Option<Aabb<F>>) -> Self {
        self.set_collision(collision);
        self
    }

    pub fn with_pin(mut self, pin: PinSpec) -> Result<Self, ClothError> {
        self.set_pin(pin)?;
        Ok(self)
    }

    /// Set or clear the collision box.
    pub fn set_collision(&mut self, collision: Option<Aabb<F>>) {
        match &collision {
            Some(b) => log::debug!("collision box set: {:?} .. {:?}", b.min, b.max),
            None => log::debug!("collision box cleared"),
        }
        self.collision = collision;
    }

    pub fn set_pin(&mut self, pin: PinSpec) -> Result<(), ClothError> {
        pin.validate(&self.mesh)?;
        log::debug!("pin spec set: {:?}", pin);
        self.pin = pin;
        Ok(())
    }

    pub fn set_config(&mut self, config: SimulationConfig<F>) -> Result<(), ClothError> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// Replace the mesh with a fresh one of the same dimensions and mass.
    ///
    /// All velocity and history is discarded and the next tick is treated
    /// as the first. The pin spec is kept since the grid is unchanged.
    pub fn restart<S: RestShape<F>>(&mut self, rest_shape: &S) -> Result<(), ClothError> {
        self.mesh = self.mesh.rebuild(rest_shape)?;
        self.last_tick = None;
        self.steps = 0;
        log::debug!("simulation restarted");
        Ok(())
    }

    /// Frame callback. Returns `false` for the first call, which only
    /// records `timestamp`.
    pub fn tick<O: StepObserver>(&mut self, timestamp: f64, observer: &mut O) -> bool {
        let first = self.last_tick.is_none();
        self.last_tick = Some(timestamp);
        if first {
            return false;
        }
        self.step(observer);
        true
    }

    /// Advance one fixed step unconditionally.
    pub fn step<O: StepObserver>(&mut self, observer: &mut O) {
        let config = &self.config;
        let (particles, constraints, faces) = self.mesh.parts_mut();

        if let Some(wind) = &config.wind {
            apply_wind(particles, faces, wind);
        }
        apply_gravity(particles, config.gravity);
        observer.on_forces_applied();

        integrate_all(particles, config.dt_sq(), config.drag);
        observer.on_integrate();

        let skipped = ConstraintSolver::new(config.solver_iterations)
            .solve(particles, constraints, observer);

        let resolved = match &self.collision {
            Some(aabb) => {
                let resolved = aabb.resolve_all(particles, config.friction);
                observer.on_collisions(resolved);
                resolved
            }
            None => 0,
        };

        self.pin.apply(&mut self.mesh);

        if let Some(floor_y) = self.config.floor_y {
            for p in self.mesh.particles_mut() {
                clamp_to_floor(p, floor_y);
            }
        }

        self.steps += 1;
        log::trace!(
            "step {}: {} degenerate constraints, {} box contacts",
            self.steps, skipped, resolved,
        );
        observer.on_step_complete();
    }

    pub fn positions(&self) -> AllocVec<Vec3<F>> {
        self.mesh.positions()
    }

    /// Flat `[x, y, z, ...]` positions for a vertex buffer, without allocating.
    pub fn write_positions(&self, out: &mut [F]) -> Result<(), ClothError> {
        self.mesh.write_positions(out)
    }

    pub fn mesh(&self) -> &ClothMesh<F> { &self.mesh }
    pub fn config(&self) -> &SimulationConfig<F> { &self.config }
    pub fn collision(&self) -> Option<&Aabb<F>> { self.collision.as_ref() }
    pub fn pin(&self) -> &PinSpec { &self.pin }
    pub fn steps(&self) -> u64 { self.steps }
    pub fn is_running(&self) -> bool { self.last_tick.is_some() }
}
