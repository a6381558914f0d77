//! Equations of motion for the roller racer.
//!
//! The vehicle is a planar body with two fixed rear wheels and one steered
//! front wheel on a caster. Rolling without slipping at the rear axle and
//! at the front contact point gives two non-holonomic velocity constraints;
//! each is regularized by a proportional slip-rate penalty so constraint
//! drift is corrected rather than exactly enforced. Every derivative
//! evaluation assembles a 5×5 linear system in the unknowns
//! `[ẍ, z̈, ψ̈, F_rear, F_front]` (the two F's are the constraint forces at
//! the contact normals) and solves it by Gaussian elimination.

use racer_linsolve::LinearSystem;
use racer_odeint::Derivative;
use tracing::warn;

use crate::error::VehicleError;
use crate::params::VehicleParams;

/// Length of the vehicle state vector.
pub const STATE_DIM: usize = 11;

/// Named state-vector indices.
pub mod state {
    /// x position of the center of mass.
    pub const X_POS: usize = 0;
    /// x velocity.
    pub const X_VEL: usize = 1;
    /// z position of the center of mass.
    pub const Z_POS: usize = 2;
    /// z velocity.
    pub const Z_VEL: usize = 3;
    /// Heading angle ψ.
    pub const HEADING: usize = 4;
    /// Yaw rate ψ̇.
    pub const YAW_RATE: usize = 5;
    /// Rotation angle of the left rear wheel.
    pub const WHEEL_L: usize = 6;
    /// Rotation angle of the right rear wheel.
    pub const WHEEL_R: usize = 7;
    /// Rotation angle of the front steered wheel.
    pub const WHEEL_F: usize = 8;
    /// Steer angle δ.
    pub const STEER_ANGLE: usize = 9;
    /// Steer rate δ̇.
    pub const STEER_RATE: usize = 10;
}

/// Dimension of the equations-of-motion linear system.
const EOM_DIM: usize = 5;

/// Simulation lifecycle.
///
/// Transitions once and irreversibly from `NotStarted` to `Running` on the
/// first derivative evaluation; afterwards initial-condition setters are
/// rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No derivative evaluation has run yet.
    NotStarted,
    /// The simulation has begun; initial conditions are frozen.
    Running,
}

/// Sign with `sign(0) = 0`, so a stationary vehicle feels no brake force.
fn sign(v: f64) -> f64 {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// The vehicle right-hand side: parameters, steering target, cached brake
/// command, lifecycle latch, and the reusable linear-system scratch.
#[derive(Debug, Clone)]
pub struct RacerDynamics {
    params: VehicleParams,
    /// Desired steer angle consumed by the PD tracking filter.
    steer_target: f64,
    /// Brake command snapshot for the current tick, already clamped.
    brake_input: f64,
    phase: Phase,
    system: LinearSystem,
}

impl RacerDynamics {
    /// Creates the model with the given parameters, zero steer target, and
    /// released brake.
    pub fn new(params: VehicleParams) -> Result<Self, VehicleError> {
        Ok(Self {
            params,
            steer_target: 0.0,
            brake_input: 0.0,
            phase: Phase::NotStarted,
            system: LinearSystem::new(EOM_DIM)?,
        })
    }

    /// Returns the current parameter set.
    pub fn params(&self) -> &VehicleParams {
        &self.params
    }

    /// Returns the parameter set for reconfiguration.
    pub fn params_mut(&mut self) -> &mut VehicleParams {
        &mut self.params
    }

    /// Returns the desired steer angle.
    pub fn steer_target(&self) -> f64 {
        self.steer_target
    }

    /// Sets the desired steer angle.
    ///
    /// # Errors
    ///
    /// Rejects non-finite angles.
    pub fn set_steer_target(&mut self, angle: f64) -> Result<(), VehicleError> {
        if !angle.is_finite() {
            return Err(VehicleError::NonFinite {
                input: "steer target",
                value: angle,
            });
        }
        self.steer_target = angle;
        Ok(())
    }

    /// Caches the brake command for the upcoming tick, clamped to `[0, 1]`.
    ///
    /// Called once per tick so all sub-stage evaluations of an RK2/RK4 step
    /// see the same command.
    pub fn set_brake_input(&mut self, command: f64) {
        if !command.is_finite() {
            warn!(command, "non-finite brake command, treating as released");
            self.brake_input = 0.0;
            return;
        }
        self.brake_input = command.clamp(0.0, 1.0);
    }

    /// Returns the cached brake command.
    pub fn brake_input(&self) -> f64 {
        self.brake_input
    }

    /// Returns the lifecycle phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }
}

impl Derivative for RacerDynamics {
    type Error = VehicleError;

    fn eval(&mut self, x: &[f64], _time: f64, deriv: &mut [f64]) -> Result<(), VehicleError> {
        use state::*;

        let x_dot = x[X_VEL];
        let z_dot = x[Z_VEL];
        let psi = x[HEADING];
        let psi_dot = x[YAW_RATE];
        let delta = x[STEER_ANGLE];
        let delta_dot = x[STEER_RATE];

        let (sin_psi, cos_psi) = psi.sin_cos();
        let (sin_delta, cos_delta) = delta.sin_cos();
        let (sin_pd, cos_pd) = (psi + delta).sin_cos();

        let p = &self.params;
        let m = p.mass();
        let ig = p.yaw_inertia();
        let b = p.cg_distance();
        let c = p.half_track();
        let d = p.caster_length();
        let h = p.steer_offset();
        let kp_slip = p.slip_gain();

        // Braking force along the heading, sign-matched to the forward
        // velocity so it always opposes motion.
        let v = x_dot * cos_psi - z_dot * sin_psi;
        let brake = self.brake_input * p.brake_limit() * sign(v);

        // Steer PD law; also feeds the front constraint row below.
        let steer_acc = -p.steer_kd() * delta_dot - p.steer_kp() * (delta - self.steer_target);

        let sys = &mut self.system;
        sys.clear();

        // Force balance along x: m·ẍ − sinψ·F_r − sin(ψ+δ)·F_f = −B·cosψ.
        sys.set(0, 0, m);
        sys.set(0, 3, -sin_psi);
        sys.set(0, 4, -sin_pd);
        sys.set_rhs(0, -brake * cos_psi);

        // Force balance along z: m·z̈ − cosψ·F_r − cos(ψ+δ)·F_f = B·sinψ.
        sys.set(1, 1, m);
        sys.set(1, 3, -cos_psi);
        sys.set(1, 4, -cos_pd);
        sys.set_rhs(1, brake * sin_psi);

        // Yaw moment balance about the center of mass.
        sys.set(2, 2, ig);
        sys.set(2, 3, -b);
        sys.set(2, 4, h * cos_delta - d);

        // Rear rolling constraint, slip-rate penalized.
        sys.set(3, 0, sin_psi);
        sys.set(3, 1, cos_psi);
        sys.set(3, 2, b);
        sys.set_rhs(
            3,
            -kp_slip * (x_dot * sin_psi + z_dot * cos_psi + b * psi_dot)
                + z_dot * psi_dot * sin_psi
                - x_dot * psi_dot * cos_psi,
        );

        // Front rolling constraint at the caster contact, slip-rate penalized.
        sys.set(4, 0, sin_pd);
        sys.set(4, 1, cos_pd);
        sys.set(4, 2, -(h * cos_delta) + d);
        sys.set_rhs(
            4,
            -kp_slip
                * (x_dot * sin_pd + z_dot * cos_pd - h * psi_dot * cos_delta
                    + (psi_dot + delta_dot) * d)
                - steer_acc * d
                - x_dot * (psi_dot + delta_dot) * cos_pd
                + z_dot * (psi_dot + delta_dot) * sin_pd
                - h * psi_dot * delta_dot * sin_delta,
        );

        let accel = sys.solve()?;

        deriv[X_POS] = x_dot;
        deriv[X_VEL] = accel[0];
        deriv[Z_POS] = z_dot;
        deriv[Z_VEL] = accel[1];
        deriv[HEADING] = psi_dot;
        deriv[YAW_RATE] = accel[2];
        // Kinematic wheel rotation from rolling without slip.
        deriv[WHEEL_L] = -(x_dot * cos_psi + z_dot * sin_psi + c * psi_dot) / p.rear_wheel_radius();
        deriv[WHEEL_R] = (-x_dot * cos_psi + z_dot * sin_psi - c * psi_dot) / p.rear_wheel_radius();
        deriv[WHEEL_F] =
            (-x_dot * cos_pd + z_dot * sin_pd - h * psi_dot * sin_delta) / p.steer_wheel_radius();
        deriv[STEER_ANGLE] = delta_dot;
        deriv[STEER_RATE] = steer_acc;

        self.phase = Phase::Running;
        Ok(())
    }
}
