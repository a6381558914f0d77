//! # racer-dynamics
//!
//! Constrained dynamics of a roller racer: a planar vehicle with two fixed
//! rear wheels and a caster-mounted steered front wheel, propelled and
//! turned through its non-holonomic rolling constraints.
//!
//! ## State vector
//!
//! | Index | Meaning |
//! |-------|---------|
//! | 0, 1  | x position, x velocity |
//! | 2, 3  | z position, z velocity |
//! | 4, 5  | heading ψ, yaw rate ψ̇ |
//! | 6, 7  | left / right rear wheel rotation angle |
//! | 8     | front wheel rotation angle |
//! | 9, 10 | steer angle δ, steer rate δ̇ |
//!
//! ## Usage
//!
//! ```
//! use racer_dynamics::{NoBrake, RollerRacer, VehicleParams};
//! use racer_odeint::Scheme;
//!
//! let mut racer = RollerRacer::new(VehicleParams::default(), NoBrake)?;
//! racer.set_initial_speed(2.0)?;
//! racer.set_steer_target(0.1)?;
//! for k in 0..100 {
//!     racer.advance(k as f64 * 0.01, 0.01, Scheme::Rk4)?;
//! }
//! println!("at {:?}, heading {}", racer.position(), racer.heading());
//! # Ok::<(), racer_dynamics::VehicleError>(())
//! ```

mod brake;
mod error;
mod params;
mod racer;

pub mod model;

pub use brake::{BrakeSignal, BrakeSource, NoBrake};
pub use error::VehicleError;
pub use model::{Phase, RacerDynamics, STATE_DIM};
pub use params::VehicleParams;
pub use racer::RollerRacer;
