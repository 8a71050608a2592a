//! Step observer trait for monitoring cloth simulation progress.

/// Trait for observing simulation steps.
///
/// Implement this trait to monitor solver progress (e.g., for debugging,
/// visualization, or performance profiling). All methods have default
/// no-op implementations.
pub trait StepObserver {
    /// Called after wind and gravity have been accumulated.
    fn on_forces_applied(&mut self) {}

    /// Called after all particles have been integrated (Verlet step).
    fn on_integrate(&mut self) {}

    /// Called after each constraint pass with the number of constraints
    /// skipped because their endpoints coincided.
    fn on_constraint_iteration(&mut self, _iteration: usize, _skipped: usize) {}

    /// Called after box collision with the number of particles pushed out.
    fn on_collisions(&mut self, _resolved: usize) {}

    /// Called when a simulation step is fully complete.
    fn on_step_complete(&mut self) {}
}

/// A no-op observer that does nothing. Use as default when no observation needed.
pub struct NoOpStepObserver;

impl StepObserver for NoOpStepObserver {}

/// Forwards every hook to the `log` facade at trace level.
#[derive(Default)]
pub struct LogObserver {
    step: u64,
}

impl LogObserver {
    pub fn new() -> Self {
        LogObserver { step: 0 }
    }

    /// Number of completed steps seen so far.
    pub fn steps(&self) -> u64 {
        self.step
    }
}

impl StepObserver for LogObserver {
    fn on_forces_applied(&mut self) {
        log::trace!("step {}: forces applied", self.step);
    }

    fn on_integrate(&mut self) {
        log::trace!("step {}: integrated", self.step);
    }

    fn on_constraint_iteration(&mut self, iteration: usize, skipped: usize) {
        log::trace!("step {}: pass {} done, {} degenerate", self.step, iteration, skipped);
    }

    fn on_collisions(&mut self, resolved: usize) {
        log::trace!("step {}: {} particles pushed out of box", self.step, resolved);
    }

    fn on_step_complete(&mut self) {
        log::trace!("step {} complete", self.step);
        self.step += 1;
    }
}
