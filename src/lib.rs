//! Mass-spring cloth simulation with Verlet integration.
//!
//! `drape` builds a particle grid tied together by distance constraints and
//! advances it one fixed step per frame: forces, Verlet integration,
//! constraint relaxation, box and floor collision, edge pinning. A renderer
//! reads the resulting positions and the face list after every step.
//!
//! # Features
//!
//! - **Topology builder**: border, cross-grain, bend and bias constraints plus
//!   a triangle face list, from grid size and physical length
//! - **Verlet integration**: implicit velocity with drag on the velocity term only
//! - **Constraint solver**: ordered relaxation, one pass by default
//! - **Collision**: axis-aligned box with two-tier friction, floor clamp
//! - **Wind**: per-face aerodynamic force from the current face normals
//! - **Observable**: Monitor physics steps via the `StepObserver` trait
//! - **`no_std` compatible**: Works in embedded and WASM environments
//!
//! ```
//! use drape::{ClothMesh, Simulation, SimulationConfig, Aabb, NoOpStepObserver};
//!
//! let mesh = ClothMesh::<f32>::flat(10, 10, 200.0, 0.1).unwrap();
//! let mut sim = Simulation::new(mesh, SimulationConfig::blanket())
//!     .unwrap()
//!     .with_collision(Some(Aabb::table()));
//! for frame in 0..60 {
//!     sim.tick(frame as f64 * 16.0, &mut NoOpStepObserver);
//! }
//! let mut buffer = vec![0.0f32; sim.mesh().particle_count() * 3];
//! sim.write_positions(&mut buffer).unwrap();
//! ```

#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod float;
pub mod vec;
pub mod particle;
pub mod constraint;
pub mod mesh;
pub mod solver;
pub mod forces;
pub mod collision;
pub mod pin;
pub mod simulation;
pub mod observer;
pub mod config;
pub mod error;

// Re-export primary API
pub use float::Float;
pub use vec::Vec3;
pub use particle::Particle;
pub use constraint::{ConstraintKind, DistanceConstraint};
pub use mesh::{ClothMesh, FlatPlane, RestShape};
pub use solver::ConstraintSolver;
pub use forces::Wind;
pub use collision::Aabb;
pub use pin::PinSpec;
pub use simulation::Simulation;
pub use config::SimulationConfig;
pub use observer::{StepObserver, NoOpStepObserver, LogObserver};
pub use error::ClothError;
