//! Validated vehicle parameters.

use crate::error::VehicleError;

/// Physical and tuning parameters of the roller racer.
///
/// Every setter validates its documented bounds and either commits all of
/// its values or rejects the whole call, leaving the previous valid set
/// untouched. Derived quantities (yaw inertia, half track, steer-axis
/// offset) are recomputed on commit and exposed read-only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VehicleParams {
    /// Total mass, kg.
    mass: f64,
    /// Yaw moment of inertia about the center of mass, kg·m².
    yaw_inertia: f64,
    /// Distance of the center of mass ahead of the rear axle, m.
    cg_distance: f64,
    /// Half the rear track width, m.
    half_track: f64,
    /// Caster length of the steered wheel, m.
    caster_length: f64,
    /// Longitudinal distance from center of mass to steer axis, m.
    steer_offset: f64,
    /// Rear wheel radius, m.
    rear_wheel_radius: f64,
    /// Steered wheel radius, m.
    steer_wheel_radius: f64,
    /// Proportional gain of the steer tracking filter.
    steer_kp: f64,
    /// Derivative gain of the steer tracking filter.
    steer_kd: f64,
    /// Maximum braking force magnitude, N.
    brake_limit: f64,
    /// Static friction coefficient lower bound.
    friction_bound: f64,
    /// Rolling-constraint slip-rate penalty gain, 1/s.
    ///
    /// A numerical stabilization constant, not a physical parameter:
    /// larger values correct constraint drift faster at the cost of
    /// stiffer dynamics.
    slip_gain: f64,
}

impl Default for VehicleParams {
    fn default() -> Self {
        Self {
            mass: 25.0,
            yaw_inertia: 25.0 * 0.3 * 0.3,
            cg_distance: 0.6,
            half_track: 0.5,
            caster_length: 0.3,
            steer_offset: 1.3 - 0.6,
            rear_wheel_radius: 0.5 * 0.75,
            steer_wheel_radius: 0.15,
            steer_kp: 10.0,
            steer_kd: 4.0,
            brake_limit: 225.0,
            friction_bound: 0.9,
            slip_gain: 2.0,
        }
    }
}

fn ensure_finite(input: &'static str, value: f64) -> Result<(), VehicleError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(VehicleError::NonFinite { input, value })
    }
}

impl VehicleParams {
    /// Sets the inertia properties.
    ///
    /// `mass` is the total mass in kilograms, `radius_of_gyration` the
    /// geometric radius in meters from which the yaw inertia
    /// `mass · radius²` is derived.
    ///
    /// # Errors
    ///
    /// Rejects `mass <= 0.1` kg and `radius_of_gyration < 0.03` m.
    pub fn set_inertia(&mut self, mass: f64, radius_of_gyration: f64) -> Result<(), VehicleError> {
        ensure_finite("mass", mass)?;
        ensure_finite("radius of gyration", radius_of_gyration)?;
        if mass <= 0.1 {
            return Err(VehicleError::MassTooSmall { mass });
        }
        if radius_of_gyration < 0.03 {
            return Err(VehicleError::GyrationRadiusTooSmall {
                radius: radius_of_gyration,
            });
        }

        self.mass = mass;
        self.yaw_inertia = mass * radius_of_gyration * radius_of_gyration;
        Ok(())
    }

    /// Sets the vehicle geometry.
    ///
    /// `wheel_base` is the rear-axle-to-steer-axis distance, `cg_distance`
    /// the rear-axle-to-center-of-mass distance, `track_width` the full
    /// distance between the rear wheels.
    ///
    /// # Errors
    ///
    /// Rejects `wheel_base < 0.01`, `cg_distance <= 0`,
    /// `caster_length < 0`, `track_width < 0.05`, either wheel radius
    /// below 0.05, and any combination where the center of mass would not
    /// lie between the rear axle and the steer contact point
    /// (`wheel_base − caster_length < cg_distance`).
    pub fn set_geometry(
        &mut self,
        wheel_base: f64,
        cg_distance: f64,
        caster_length: f64,
        track_width: f64,
        rear_wheel_radius: f64,
        steer_wheel_radius: f64,
    ) -> Result<(), VehicleError> {
        ensure_finite("wheel base", wheel_base)?;
        ensure_finite("cg distance", cg_distance)?;
        ensure_finite("caster length", caster_length)?;
        ensure_finite("track width", track_width)?;
        ensure_finite("rear wheel radius", rear_wheel_radius)?;
        ensure_finite("steer wheel radius", steer_wheel_radius)?;

        if wheel_base < 0.01 {
            return Err(VehicleError::WheelBaseTooShort { wheel_base });
        }
        if cg_distance <= 0.0 {
            return Err(VehicleError::CgDistanceNotPositive {
                distance: cg_distance,
            });
        }
        if caster_length < 0.0 {
            return Err(VehicleError::CasterLengthNegative {
                caster: caster_length,
            });
        }
        if track_width < 0.05 {
            return Err(VehicleError::TrackWidthTooNarrow { track: track_width });
        }
        if rear_wheel_radius < 0.05 {
            return Err(VehicleError::WheelRadiusTooSmall {
                wheel: "rear",
                radius: rear_wheel_radius,
            });
        }
        if steer_wheel_radius < 0.05 {
            return Err(VehicleError::WheelRadiusTooSmall {
                wheel: "steered",
                radius: steer_wheel_radius,
            });
        }
        if wheel_base - caster_length < cg_distance {
            return Err(VehicleError::CgOutsideWheelbase {
                wheel_base,
                caster: caster_length,
                cg_distance,
            });
        }

        self.cg_distance = cg_distance;
        self.half_track = 0.5 * track_width;
        self.caster_length = caster_length;
        self.steer_offset = wheel_base - cg_distance;
        self.rear_wheel_radius = rear_wheel_radius;
        self.steer_wheel_radius = steer_wheel_radius;
        Ok(())
    }

    /// Sets the steering PD gains. Zero gains are allowed and decouple the
    /// steer filter entirely.
    ///
    /// # Errors
    ///
    /// Rejects negative or non-finite gains.
    pub fn set_steer_gains(&mut self, kp: f64, kd: f64) -> Result<(), VehicleError> {
        ensure_finite("steer kp", kp)?;
        ensure_finite("steer kd", kd)?;
        if kp < 0.0 {
            return Err(VehicleError::NegativeGain {
                gain: "kp",
                value: kp,
            });
        }
        if kd < 0.0 {
            return Err(VehicleError::NegativeGain {
                gain: "kd",
                value: kd,
            });
        }

        self.steer_kp = kp;
        self.steer_kd = kd;
        Ok(())
    }

    /// Sets the maximum braking force magnitude in newtons.
    ///
    /// # Errors
    ///
    /// Rejects negative or non-finite limits.
    pub fn set_brake_limit(&mut self, limit: f64) -> Result<(), VehicleError> {
        ensure_finite("brake limit", limit)?;
        if limit < 0.0 {
            return Err(VehicleError::BrakeLimitNegative { limit });
        }
        self.brake_limit = limit;
        Ok(())
    }

    /// Sets the rolling-constraint slip-rate penalty gain.
    ///
    /// # Errors
    ///
    /// Rejects non-positive or non-finite gains.
    pub fn set_slip_gain(&mut self, gain: f64) -> Result<(), VehicleError> {
        ensure_finite("slip gain", gain)?;
        if gain <= 0.0 {
            return Err(VehicleError::SlipGainNotPositive { gain });
        }
        self.slip_gain = gain;
        Ok(())
    }

    /// Sets the static friction coefficient lower bound.
    ///
    /// # Errors
    ///
    /// Rejects non-positive or non-finite coefficients.
    pub fn set_friction_bound(&mut self, mu: f64) -> Result<(), VehicleError> {
        ensure_finite("friction bound", mu)?;
        if mu <= 0.0 {
            return Err(VehicleError::FrictionBoundNotPositive { mu });
        }
        self.friction_bound = mu;
        Ok(())
    }

    /// Total mass, kg.
    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Yaw moment of inertia about the center of mass, kg·m².
    pub fn yaw_inertia(&self) -> f64 {
        self.yaw_inertia
    }

    /// Distance of the center of mass ahead of the rear axle, m.
    pub fn cg_distance(&self) -> f64 {
        self.cg_distance
    }

    /// Half the rear track width, m.
    pub fn half_track(&self) -> f64 {
        self.half_track
    }

    /// Caster length of the steered wheel, m.
    pub fn caster_length(&self) -> f64 {
        self.caster_length
    }

    /// Longitudinal distance from center of mass to steer axis, m.
    pub fn steer_offset(&self) -> f64 {
        self.steer_offset
    }

    /// Rear wheel radius, m.
    pub fn rear_wheel_radius(&self) -> f64 {
        self.rear_wheel_radius
    }

    /// Steered wheel radius, m.
    pub fn steer_wheel_radius(&self) -> f64 {
        self.steer_wheel_radius
    }

    /// Proportional steering gain.
    pub fn steer_kp(&self) -> f64 {
        self.steer_kp
    }

    /// Derivative steering gain.
    pub fn steer_kd(&self) -> f64 {
        self.steer_kd
    }

    /// Maximum braking force magnitude, N.
    pub fn brake_limit(&self) -> f64 {
        self.brake_limit
    }

    /// Static friction coefficient lower bound.
    pub fn friction_bound(&self) -> f64 {
        self.friction_bound
    }

    /// Rolling-constraint slip-rate penalty gain, 1/s.
    pub fn slip_gain(&self) -> f64 {
        self.slip_gain
    }
}
