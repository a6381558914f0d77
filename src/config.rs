use std::path::PathBuf;

use serde::Deserialize;

/// Top-level simulation configuration.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct RacerConfig {
    /// Integration settings.
    #[serde(default)]
    pub integration: IntegrationToml,

    /// Vehicle parameters.
    #[serde(default)]
    pub vehicle: VehicleToml,

    /// Steer and brake schedules.
    #[serde(default)]
    pub schedule: ScheduleToml,

    /// I/O settings.
    #[serde(default)]
    pub io: IoToml,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IntegrationToml {
    /// Stepping scheme: "euler", "rk2", or "rk4".
    #[serde(default = "default_scheme")]
    pub scheme: String,
    /// Fixed step size in seconds.
    #[serde(default = "default_dt")]
    pub dt: f64,
    /// Simulated duration in seconds.
    #[serde(default = "default_duration")]
    pub duration: f64,
    /// Write one telemetry row every this many ticks.
    #[serde(default = "default_sample_stride")]
    pub sample_stride: usize,
}

impl Default for IntegrationToml {
    fn default() -> Self {
        Self {
            scheme: default_scheme(),
            dt: default_dt(),
            duration: default_duration(),
            sample_stride: default_sample_stride(),
        }
    }
}

fn default_scheme() -> String {
    "rk4".to_string()
}
fn default_dt() -> f64 {
    0.01
}
fn default_duration() -> f64 {
    10.0
}
fn default_sample_stride() -> usize {
    10
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VehicleToml {
    #[serde(default = "default_mass")]
    pub mass: f64,
    #[serde(default = "default_radius_of_gyration")]
    pub radius_of_gyration: f64,
    #[serde(default = "default_wheel_base")]
    pub wheel_base: f64,
    #[serde(default = "default_cg_distance")]
    pub cg_distance: f64,
    #[serde(default = "default_caster_length")]
    pub caster_length: f64,
    #[serde(default = "default_track_width")]
    pub track_width: f64,
    #[serde(default = "default_rear_wheel_radius")]
    pub rear_wheel_radius: f64,
    #[serde(default = "default_steer_wheel_radius")]
    pub steer_wheel_radius: f64,
    #[serde(default = "default_steer_kp")]
    pub steer_kp: f64,
    #[serde(default = "default_steer_kd")]
    pub steer_kd: f64,
    #[serde(default = "default_brake_limit")]
    pub brake_limit: f64,
    #[serde(default = "default_slip_gain")]
    pub slip_gain: f64,
    #[serde(default = "default_friction_bound")]
    pub friction_bound: f64,
    #[serde(default)]
    pub initial_speed: f64,
}

impl Default for VehicleToml {
    fn default() -> Self {
        Self {
            mass: default_mass(),
            radius_of_gyration: default_radius_of_gyration(),
            wheel_base: default_wheel_base(),
            cg_distance: default_cg_distance(),
            caster_length: default_caster_length(),
            track_width: default_track_width(),
            rear_wheel_radius: default_rear_wheel_radius(),
            steer_wheel_radius: default_steer_wheel_radius(),
            steer_kp: default_steer_kp(),
            steer_kd: default_steer_kd(),
            brake_limit: default_brake_limit(),
            slip_gain: default_slip_gain(),
            friction_bound: default_friction_bound(),
            initial_speed: 0.0,
        }
    }
}

fn default_mass() -> f64 {
    25.0
}
fn default_radius_of_gyration() -> f64 {
    0.3
}
fn default_wheel_base() -> f64 {
    1.3
}
fn default_cg_distance() -> f64 {
    0.6
}
fn default_caster_length() -> f64 {
    0.3
}
fn default_track_width() -> f64 {
    1.0
}
fn default_rear_wheel_radius() -> f64 {
    0.375
}
fn default_steer_wheel_radius() -> f64 {
    0.15
}
fn default_steer_kp() -> f64 {
    10.0
}
fn default_steer_kd() -> f64 {
    4.0
}
fn default_brake_limit() -> f64 {
    225.0
}
fn default_slip_gain() -> f64 {
    2.0
}
fn default_friction_bound() -> f64 {
    0.9
}

/// Piecewise-constant command schedules: `[time, value]` breakpoints,
/// sorted by time, each value held until the next breakpoint.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ScheduleToml {
    /// Desired steer angle breakpoints (radians).
    #[serde(default)]
    pub steer: Vec<[f64; 2]>,
    /// Brake command breakpoints in [0, 1].
    #[serde(default)]
    pub brake: Vec<[f64; 2]>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IoToml {
    /// Output CSV path.
    #[serde(default = "default_output")]
    pub output: PathBuf,
}

impl Default for IoToml {
    fn default() -> Self {
        Self {
            output: default_output(),
        }
    }
}

fn default_output() -> PathBuf {
    PathBuf::from("telemetry.csv")
}
