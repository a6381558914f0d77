use std::fs::{self, File};
use std::io::{BufWriter, Write};

use anyhow::{Context, Result, bail, ensure};
use racer_dynamics::{BrakeSignal, RollerRacer, VehicleParams};
use racer_odeint::Scheme;
use tracing::info;

use crate::cli::SimulateArgs;
use crate::config::RacerConfig;

pub fn run(args: SimulateArgs) -> Result<()> {
    let raw = fs::read_to_string(&args.config)
        .with_context(|| format!("reading config {}", args.config.display()))?;
    let mut config: RacerConfig =
        toml::from_str(&raw).with_context(|| format!("parsing {}", args.config.display()))?;

    if let Some(duration) = args.duration {
        config.integration.duration = duration;
    }
    let output = args.output.unwrap_or_else(|| config.io.output.clone());

    let scheme = parse_scheme(&config.integration.scheme)?;
    let dt = config.integration.dt;
    let duration = config.integration.duration;
    let stride = config.integration.sample_stride;
    ensure!(dt.is_finite() && dt > 0.0, "step size must be positive, got {dt}");
    ensure!(
        duration.is_finite() && duration > 0.0,
        "duration must be positive, got {duration}"
    );
    ensure!(stride >= 1, "sample stride must be at least 1");
    ensure_sorted("schedule.steer", &config.schedule.steer)?;
    ensure_sorted("schedule.brake", &config.schedule.brake)?;

    let params = build_params(&config).context("invalid [vehicle] parameters")?;
    let pedal = BrakeSignal::new();
    let mut racer =
        RollerRacer::new(params, pedal.clone()).context("constructing the simulation")?;
    racer
        .set_initial_speed(config.vehicle.initial_speed)
        .context("setting initial speed")?;

    let steps = (duration / dt).round() as usize;
    info!(
        scheme = %config.integration.scheme,
        dt,
        duration,
        steps,
        initial_speed = config.vehicle.initial_speed,
        "starting simulation"
    );

    let file = File::create(&output)
        .with_context(|| format!("creating output {}", output.display()))?;
    let mut csv = BufWriter::new(file);
    writeln!(
        csv,
        "time,x,z,heading,speed,steer_angle,kinetic_energy,slip_front,slip_rear"
    )?;

    let mut rows = 0usize;
    for k in 0..steps {
        let t = k as f64 * dt;
        pedal.set(schedule_value(&config.schedule.brake, t));
        racer.set_steer_target(schedule_value(&config.schedule.steer, t))?;
        racer
            .advance(t, dt, scheme)
            .with_context(|| format!("step failed at t = {t:.4} s"))?;

        if k % stride == 0 {
            let (x, z) = racer.position();
            writeln!(
                csv,
                "{:.6},{x:.6},{z:.6},{:.6},{:.6},{:.6},{:.6},{:.6},{:.6}",
                t + dt,
                racer.heading(),
                racer.speed(),
                racer.steer_angle(),
                racer.kinetic_energy(),
                racer.slip_rate_front(),
                racer.slip_rate_rear(),
            )?;
            rows += 1;
        }
    }
    csv.flush()?;

    let (x, z) = racer.position();
    info!(
        rows,
        output = %output.display(),
        x,
        z,
        heading = racer.heading(),
        speed = racer.speed(),
        "simulation finished"
    );
    Ok(())
}

fn parse_scheme(name: &str) -> Result<Scheme> {
    match name {
        "euler" => Ok(Scheme::Euler),
        "rk2" => Ok(Scheme::Rk2),
        "rk4" => Ok(Scheme::Rk4),
        other => bail!("unknown integration scheme {other:?} (expected euler, rk2, or rk4)"),
    }
}

fn build_params(config: &RacerConfig) -> Result<VehicleParams> {
    let v = &config.vehicle;
    let mut params = VehicleParams::default();
    params.set_inertia(v.mass, v.radius_of_gyration)?;
    params.set_geometry(
        v.wheel_base,
        v.cg_distance,
        v.caster_length,
        v.track_width,
        v.rear_wheel_radius,
        v.steer_wheel_radius,
    )?;
    params.set_steer_gains(v.steer_kp, v.steer_kd)?;
    params.set_brake_limit(v.brake_limit)?;
    params.set_slip_gain(v.slip_gain)?;
    params.set_friction_bound(v.friction_bound)?;
    Ok(params)
}

fn ensure_sorted(name: &str, points: &[[f64; 2]]) -> Result<()> {
    for pair in points.windows(2) {
        ensure!(
            pair[0][0] <= pair[1][0],
            "{name} breakpoints must be sorted by time ({} after {})",
            pair[1][0],
            pair[0][0]
        );
    }
    Ok(())
}

/// Value of a piecewise-constant schedule at time `t`: the last breakpoint
/// at or before `t`, or 0.0 before the first one.
fn schedule_value(points: &[[f64; 2]], t: f64) -> f64 {
    points
        .iter()
        .take_while(|p| p[0] <= t)
        .last()
        .map_or(0.0, |p| p[1])
}
