//! The right-hand-side evaluation seam between integrator and model.

/// A right-hand-side function `f(state, time) -> derivative`.
///
/// Implementors map the current state vector and time to the instantaneous
/// rate of change of every state component, written into `deriv` (same
/// length as `state`, never aliasing it). `eval` takes `&mut self` so a
/// model may keep private bookkeeping (lifecycle latches, solver scratch),
/// but it must not retain call-local intermediates across evaluations:
/// within one integration step the integrator may evaluate up to four
/// times at perturbed states, and each evaluation must be a pure function
/// of its arguments.
pub trait Derivative {
    /// Error produced when an evaluation cannot complete (for example a
    /// degenerate linear system inside a constrained model).
    type Error: std::error::Error;

    /// Writes `f(state, time)` into `deriv`.
    fn eval(&mut self, state: &[f64], time: f64, deriv: &mut [f64]) -> Result<(), Self::Error>;
}
