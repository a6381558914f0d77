//! The simulation facade: integrator + model + brake capability.

use racer_odeint::{Integrator, Scheme};

use crate::brake::BrakeSource;
use crate::error::VehicleError;
use crate::model::{state, Phase, RacerDynamics, STATE_DIM};
use crate::params::VehicleParams;

/// A roller-racer simulation.
///
/// Composes an [`Integrator`] (which owns the 11-component state vector
/// and stage buffers) with the [`RacerDynamics`] right-hand side (which
/// owns parameters and solver scratch) and a brake-command capability
/// injected at construction. The integrator is reusable for any other
/// ODE; everything vehicle-specific lives here and in the model.
#[derive(Debug, Clone)]
pub struct RollerRacer<B> {
    integrator: Integrator,
    dynamics: RacerDynamics,
    brake: B,
}

impl<B: BrakeSource> RollerRacer<B> {
    /// Creates a simulation at rest at the origin.
    pub fn new(params: VehicleParams, brake: B) -> Result<Self, VehicleError> {
        Ok(Self {
            integrator: Integrator::new(STATE_DIM)?,
            dynamics: RacerDynamics::new(params)?,
            brake,
        })
    }

    /// Advances one tick of size `dt` at simulation time `time`.
    ///
    /// The brake command is read from the injected source exactly once and
    /// cached, so every sub-stage evaluation of the step sees the same
    /// value.
    ///
    /// # Errors
    ///
    /// Propagates a degenerate equations-of-motion system; the state is
    /// left unchanged in that case.
    pub fn advance(&mut self, time: f64, dt: f64, scheme: Scheme) -> Result<(), VehicleError> {
        self.dynamics.set_brake_input(self.brake.brake_command());
        self.integrator.step(&mut self.dynamics, scheme, time, dt)
    }

    /// Sets the initial speed along the current heading.
    ///
    /// # Errors
    ///
    /// Returns [`VehicleError::SimulationStarted`] once the first
    /// derivative evaluation has run, and rejects non-finite speeds.
    pub fn set_initial_speed(&mut self, speed: f64) -> Result<(), VehicleError> {
        if !speed.is_finite() {
            return Err(VehicleError::NonFinite {
                input: "initial speed",
                value: speed,
            });
        }
        if self.dynamics.phase() == Phase::Running {
            return Err(VehicleError::SimulationStarted);
        }
        let psi = self.integrator.state()[state::HEADING];
        let st = self.integrator.state_mut();
        st[state::X_VEL] = speed * psi.cos();
        st[state::Z_VEL] = -speed * psi.sin();
        Ok(())
    }

    /// Sets the desired steer angle tracked by the PD filter.
    pub fn set_steer_target(&mut self, angle: f64) -> Result<(), VehicleError> {
        self.dynamics.set_steer_target(angle)
    }

    /// Sets mass and radius of gyration. See [`VehicleParams::set_inertia`].
    pub fn set_inertia(&mut self, mass: f64, radius_of_gyration: f64) -> Result<(), VehicleError> {
        self.dynamics.params_mut().set_inertia(mass, radius_of_gyration)
    }

    /// Sets the vehicle geometry. See [`VehicleParams::set_geometry`].
    pub fn set_geometry(
        &mut self,
        wheel_base: f64,
        cg_distance: f64,
        caster_length: f64,
        track_width: f64,
        rear_wheel_radius: f64,
        steer_wheel_radius: f64,
    ) -> Result<(), VehicleError> {
        self.dynamics.params_mut().set_geometry(
            wheel_base,
            cg_distance,
            caster_length,
            track_width,
            rear_wheel_radius,
            steer_wheel_radius,
        )
    }

    /// Sets the steering PD gains. See [`VehicleParams::set_steer_gains`].
    pub fn set_steer_gains(&mut self, kp: f64, kd: f64) -> Result<(), VehicleError> {
        self.dynamics.params_mut().set_steer_gains(kp, kd)
    }

    /// Sets the braking force limit. See [`VehicleParams::set_brake_limit`].
    pub fn set_brake_limit(&mut self, limit: f64) -> Result<(), VehicleError> {
        self.dynamics.params_mut().set_brake_limit(limit)
    }

    /// Sets the slip-penalty gain. See [`VehicleParams::set_slip_gain`].
    pub fn set_slip_gain(&mut self, gain: f64) -> Result<(), VehicleError> {
        self.dynamics.params_mut().set_slip_gain(gain)
    }

    /// Sets the static friction lower bound. See
    /// [`VehicleParams::set_friction_bound`].
    pub fn set_friction_bound(&mut self, mu: f64) -> Result<(), VehicleError> {
        self.dynamics.params_mut().set_friction_bound(mu)
    }

    /// Current parameter set.
    pub fn params(&self) -> &VehicleParams {
        self.dynamics.params()
    }

    /// Lifecycle phase.
    pub fn phase(&self) -> Phase {
        self.dynamics.phase()
    }

    /// Desired steer angle.
    pub fn steer_target(&self) -> f64 {
        self.dynamics.steer_target()
    }

    /// The full state vector, in the layout of [`crate::model::state`].
    pub fn state(&self) -> &[f64] {
        self.integrator.state()
    }

    /// Center-of-mass position `(x, z)`.
    pub fn position(&self) -> (f64, f64) {
        (self.state()[state::X_POS], self.state()[state::Z_POS])
    }

    /// Heading angle ψ.
    pub fn heading(&self) -> f64 {
        self.state()[state::HEADING]
    }

    /// Yaw rate ψ̇.
    pub fn yaw_rate(&self) -> f64 {
        self.state()[state::YAW_RATE]
    }

    /// Steer angle δ.
    pub fn steer_angle(&self) -> f64 {
        self.state()[state::STEER_ANGLE]
    }

    /// Steer rate δ̇.
    pub fn steer_rate(&self) -> f64 {
        self.state()[state::STEER_RATE]
    }

    /// Rotation angle of the left rear wheel.
    pub fn wheel_angle_left(&self) -> f64 {
        self.state()[state::WHEEL_L]
    }

    /// Rotation angle of the right rear wheel.
    pub fn wheel_angle_right(&self) -> f64 {
        self.state()[state::WHEEL_R]
    }

    /// Rotation angle of the front steered wheel.
    pub fn wheel_angle_front(&self) -> f64 {
        self.state()[state::WHEEL_F]
    }

    /// Planar speed of the center of mass.
    pub fn speed(&self) -> f64 {
        let st = self.state();
        st[state::X_VEL].hypot(st[state::Z_VEL])
    }

    /// Kinetic energy: translational plus yaw-rotational.
    pub fn kinetic_energy(&self) -> f64 {
        let p = self.params();
        let speed = self.speed();
        let yaw_rate = self.yaw_rate();
        0.5 * p.mass() * speed * speed + 0.5 * p.yaw_inertia() * yaw_rate * yaw_rate
    }

    /// Lateral (slip) velocity at the rear contact point; zero under pure
    /// rolling.
    pub fn slip_rate_rear(&self) -> f64 {
        let st = self.state();
        let psi = st[state::HEADING];
        st[state::X_VEL] * psi.sin()
            + st[state::Z_VEL] * psi.cos()
            + self.params().cg_distance() * st[state::YAW_RATE]
    }

    /// Lateral (slip) velocity at the front contact point; zero under pure
    /// rolling.
    pub fn slip_rate_front(&self) -> f64 {
        let st = self.state();
        let p = self.params();
        let pd = st[state::HEADING] + st[state::STEER_ANGLE];
        st[state::X_VEL] * pd.sin() + st[state::Z_VEL] * pd.cos()
            - p.steer_offset() * st[state::YAW_RATE] * st[state::STEER_ANGLE].cos()
            + (st[state::YAW_RATE] + st[state::STEER_RATE]) * p.caster_length()
    }
}
