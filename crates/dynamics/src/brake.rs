//! Brake-command capability injected into the vehicle model.

use std::cell::Cell;
use std::rc::Rc;

/// Read-only source of the current braking command in `[0, 1]`.
///
/// The host owns the value and its update cadence; the simulation reads it
/// once per tick and caches the snapshot for all sub-stage evaluations of
/// that tick, so a mid-tick change can never split an RK2/RK4 step.
pub trait BrakeSource {
    /// Current braking command, 0 = released, 1 = full braking.
    fn brake_command(&self) -> f64;
}

/// A brake that is never applied.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoBrake;

impl BrakeSource for NoBrake {
    fn brake_command(&self) -> f64 {
        0.0
    }
}

/// A shared brake-command handle for single-threaded hosts.
///
/// Clone one end into the simulation and keep the other; `set` between
/// ticks to drive the brake.
///
/// # Example
///
/// ```
/// use racer_dynamics::{BrakeSignal, BrakeSource};
///
/// let pedal = BrakeSignal::new();
/// let sim_end = pedal.clone();
/// pedal.set(0.4);
/// assert_eq!(sim_end.brake_command(), 0.4);
/// ```
#[derive(Debug, Clone, Default)]
pub struct BrakeSignal(Rc<Cell<f64>>);

impl BrakeSignal {
    /// Creates a released (0.0) brake signal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the current braking command.
    pub fn set(&self, command: f64) {
        self.0.set(command);
    }
}

impl BrakeSource for BrakeSignal {
    fn brake_command(&self) -> f64 {
        self.0.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_brake_is_zero() {
        assert_eq!(NoBrake.brake_command(), 0.0);
    }

    #[test]
    fn signal_clones_share_state() {
        let a = BrakeSignal::new();
        let b = a.clone();
        assert_eq!(b.brake_command(), 0.0);
        a.set(1.0);
        assert_eq!(b.brake_command(), 1.0);
        b.set(0.25);
        assert_eq!(a.brake_command(), 0.25);
    }
}
