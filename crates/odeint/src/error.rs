//! Error types for the racer-odeint crate.

/// Error type for integrator construction.
///
/// Step failures are not represented here: each step call takes the
/// derivative object as an argument and propagates that object's own error
/// type, so the only failure the integrator itself can produce is a bad
/// construction size.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OdeError {
    /// Returned when an integrator is constructed with zero state length.
    #[error("state vector length must be at least 1, got {n}")]
    InvalidSize {
        /// Requested state vector length.
        n: usize,
    },
}
