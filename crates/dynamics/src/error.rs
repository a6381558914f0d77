//! Error types for the racer-dynamics crate.

use racer_linsolve::LinSolveError;
use racer_odeint::OdeError;

/// Error type for all fallible operations in the racer-dynamics crate.
///
/// Parameter errors are reported at the API boundary and never corrupt the
/// previously valid parameter set; numerical errors abort the offending
/// step and surface to the caller.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum VehicleError {
    /// Returned when a supplied value is NaN or infinite.
    #[error("{input} must be finite, got {value}")]
    NonFinite {
        /// Name of the offending input.
        input: &'static str,
        /// The value supplied.
        value: f64,
    },

    /// Returned when the mass is at or below the 0.1 kg lower bound.
    #[error("mass {mass} kg is at or below the 0.1 kg lower bound")]
    MassTooSmall {
        /// Rejected mass in kilograms.
        mass: f64,
    },

    /// Returned when the radius of gyration is below the 0.03 m lower bound.
    #[error("radius of gyration {radius} m is below the 0.03 m lower bound")]
    GyrationRadiusTooSmall {
        /// Rejected radius of gyration in meters.
        radius: f64,
    },

    /// Returned when the wheel base is below the 0.01 m lower bound.
    #[error("wheel base {wheel_base} m is below the 0.01 m lower bound")]
    WheelBaseTooShort {
        /// Rejected wheel base in meters.
        wheel_base: f64,
    },

    /// Returned when the rear-axle-to-center-of-mass distance is not positive.
    #[error("center-of-mass distance {distance} m must be positive")]
    CgDistanceNotPositive {
        /// Rejected distance in meters.
        distance: f64,
    },

    /// Returned when the caster length is negative.
    #[error("caster length {caster} m must not be negative")]
    CasterLengthNegative {
        /// Rejected caster length in meters.
        caster: f64,
    },

    /// Returned when the rear track width is below the 0.05 m lower bound.
    #[error("track width {track} m is below the 0.05 m lower bound")]
    TrackWidthTooNarrow {
        /// Rejected track width in meters.
        track: f64,
    },

    /// Returned when a wheel radius is below the 0.05 m lower bound.
    #[error("{wheel} wheel radius {radius} m is below the 0.05 m lower bound")]
    WheelRadiusTooSmall {
        /// Which wheel the radius belongs to.
        wheel: &'static str,
        /// Rejected radius in meters.
        radius: f64,
    },

    /// Returned when the center of mass would not lie between the rear
    /// axle and the steered-wheel contact point.
    #[error(
        "center of mass at {cg_distance} m lies beyond the steer contact \
         (wheel base {wheel_base} m minus caster {caster} m)"
    )]
    CgOutsideWheelbase {
        /// Rejected wheel base in meters.
        wheel_base: f64,
        /// Rejected caster length in meters.
        caster: f64,
        /// Rejected center-of-mass distance in meters.
        cg_distance: f64,
    },

    /// Returned when a steering gain is negative.
    #[error("steering gain {gain} must not be negative, got {value}")]
    NegativeGain {
        /// Which gain was rejected.
        gain: &'static str,
        /// The value supplied.
        value: f64,
    },

    /// Returned when the braking force limit is negative.
    #[error("braking force limit {limit} N must not be negative")]
    BrakeLimitNegative {
        /// Rejected limit in newtons.
        limit: f64,
    },

    /// Returned when the slip-penalty gain is not strictly positive.
    #[error("slip penalty gain {gain} must be positive")]
    SlipGainNotPositive {
        /// Rejected gain.
        gain: f64,
    },

    /// Returned when the static friction lower bound is not strictly positive.
    #[error("static friction bound {mu} must be positive")]
    FrictionBoundNotPositive {
        /// Rejected coefficient.
        mu: f64,
    },

    /// Returned when an initial-condition setter is called after the first
    /// derivative evaluation.
    #[error("initial conditions cannot change once the simulation has started")]
    SimulationStarted,

    /// The equations-of-motion system was degenerate.
    #[error(transparent)]
    Singular(#[from] LinSolveError),

    /// Integrator construction failed.
    #[error(transparent)]
    Integrator(#[from] OdeError),
}
