//! # racer-odeint
//!
//! Generic fixed-step ODE integration: an [`Integrator`] owns a
//! runtime-sized state vector and advances it with one of three schemes,
//! calling a pluggable [`Derivative`] right-hand side once per stage.
//!
//! | Scheme | Stages | Local error |
//! |--------|--------|-------------|
//! | [`Scheme::Euler`] | 1 | O(dt²) |
//! | [`Scheme::Rk2`] | 2 | O(dt³) |
//! | [`Scheme::Rk4`] | 4 | O(dt⁵) |
//!
//! The integrator knows nothing about what the state means; the vehicle
//! model in `racer-dynamics` is one client, and any other ODE system can
//! reuse it by implementing [`Derivative`].

mod derivative;
mod error;
mod integrator;

pub use derivative::Derivative;
pub use error::OdeError;
pub use integrator::{Integrator, Scheme};
