//! Gauss-Seidel style relaxation of distance constraints.

use crate::constraint::DistanceConstraint;
use crate::float::Float;
use crate::observer::StepObserver;
use crate::particle::Particle;

/// Runs ordered relaxation passes over a constraint list.
///
/// Each pass visits every constraint once, in order, applying corrections
/// immediately. One pass leaves the cloth visibly elastic; more passes
/// stiffen it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ConstraintSolver {
    pub iterations: usize,
}

impl ConstraintSolver {
    pub fn new(iterations: usize) -> Self {
        ConstraintSolver { iterations: iterations.max(1) }
    }

    /// Relax all constraints `iterations` times.
    ///
    /// Returns the number of degenerate (skipped) relaxations over all passes.
    pub fn solve<F: Float, O: StepObserver>(
        &self,
        particles: &mut [Particle<F>],
        constraints: &[DistanceConstraint<F>],
        observer: &mut O,
    ) -> usize {
        let mut skipped_total = 0;
        for i in 0..self.iterations {
            let skipped = relax_pass(particles, constraints);
            observer.on_constraint_iteration(i, skipped);
            skipped_total += skipped;
        }
        skipped_total
    }
}

impl Default for ConstraintSolver {
    fn default() -> Self {
        ConstraintSolver { iterations: 1 }
    }
}

/// One ordered pass. Returns how many constraints were skipped.
pub fn relax_pass<F: Float>(
    particles: &mut [Particle<F>],
    constraints: &[DistanceConstraint<F>],
) -> usize {
    let mut skipped = 0;
    for c in constraints {
        if !c.relax(particles) {
            skipped += 1;
        }
    }
    skipped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraint::ConstraintKind;
    use crate::observer::NoOpStepObserver;
    use crate::vec::Vec3;

    fn chain() -> ([Particle<f64>; 3], [DistanceConstraint<f64>; 2]) {
        let particles = [
            Particle::new(Vec3::new(0.0, 0.0, 0.0), 1.0).unwrap(),
            Particle::new(Vec3::new(3.0, 0.0, 0.0), 1.0).unwrap(),
            Particle::new(Vec3::new(6.0, 0.0, 0.0), 1.0).unwrap(),
        ];
        let constraints = [
            DistanceConstraint::new(0, 1, 1.0, ConstraintKind::Border),
            DistanceConstraint::new(1, 2, 1.0, ConstraintKind::Border),
        ];
        (particles, constraints)
    }

    fn total_error(p: &[Particle<f64>], c: &[DistanceConstraint<f64>]) -> f64 {
        c.iter().map(|c| c.error(p).abs()).sum()
    }

    #[test]
    fn more_iterations_reduce_stretch() {
        let (mut one, constraints) = chain();
        let (mut many, _) = chain();
        ConstraintSolver::new(1).solve(&mut one, &constraints, &mut NoOpStepObserver);
        ConstraintSolver::new(20).solve(&mut many, &constraints, &mut NoOpStepObserver);
        assert!(total_error(&many, &constraints) < total_error(&one, &constraints));
    }

    #[test]
    fn zero_iterations_clamped_to_one() {
        assert_eq!(ConstraintSolver::new(0).iterations, 1);
    }

    #[test]
    fn observer_sees_every_pass() {
        struct Count(usize);
        impl StepObserver for Count {
            fn on_constraint_iteration(&mut self, _i: usize, _skipped: usize) {
                self.0 += 1;
            }
        }
        let (mut p, c) = chain();
        let mut count = Count(0);
        ConstraintSolver::new(4).solve(&mut p, &c, &mut count);
        assert_eq!(count.0, 4);
    }
}
