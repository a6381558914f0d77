//! End-to-end steering and braking behavior.

use approx::assert_abs_diff_eq;
use racer_dynamics::{BrakeSignal, NoBrake, RollerRacer, VehicleParams};
use racer_odeint::Scheme;

const DT: f64 = 0.005;

#[test]
fn steer_filter_tracks_the_target() {
    let mut racer = RollerRacer::new(VehicleParams::default(), NoBrake).unwrap();
    racer.set_initial_speed(2.0).unwrap();
    racer.set_steer_target(0.3).unwrap();

    let steps = (4.0 / DT).round() as usize;
    for k in 0..steps {
        racer.advance(k as f64 * DT, DT, Scheme::Rk4).unwrap();
    }

    // kP = 10, kD = 4 settles well within 4 s.
    assert_abs_diff_eq!(racer.steer_angle(), 0.3, epsilon = 0.01);
    // A held steer angle at forward speed turns the vehicle.
    assert!(
        racer.heading().abs() > 0.1,
        "heading barely moved: {}",
        racer.heading()
    );
    // The slip penalty keeps the rolling constraints nearly satisfied.
    assert!(racer.slip_rate_rear().abs() < 0.1);
    assert!(racer.slip_rate_front().abs() < 0.1);
}

#[test]
fn zero_gains_leave_the_steer_angle_untouched() {
    let mut params = VehicleParams::default();
    params.set_steer_gains(0.0, 0.0).unwrap();
    let mut racer = RollerRacer::new(params, NoBrake).unwrap();
    racer.set_initial_speed(2.0).unwrap();
    racer.set_steer_target(0.5).unwrap();

    for k in 0..400 {
        racer.advance(k as f64 * DT, DT, Scheme::Rk4).unwrap();
    }
    // No corrective torque at all: the steer angle never moves.
    assert_eq!(racer.steer_angle(), 0.0);
    assert_eq!(racer.steer_rate(), 0.0);
}

#[test]
fn full_brake_stops_the_vehicle() {
    let pedal = BrakeSignal::new();
    let mut racer = RollerRacer::new(VehicleParams::default(), pedal.clone()).unwrap();
    racer.set_initial_speed(2.0).unwrap();

    pedal.set(1.0);
    let mut t = 0.0;
    for _ in 0..((0.5 / DT) as usize) {
        racer.advance(t, DT, Scheme::Rk4).unwrap();
        t += DT;
    }
    // 225 N on 25 kg stops 2 m/s in ~0.22 s; allow sign-flip chatter
    // around zero afterwards.
    assert!(racer.speed() < 0.1, "still moving at {}", racer.speed());
}

#[test]
fn partial_brake_decelerates_proportionally() {
    let pedal = BrakeSignal::new();
    let mut racer = RollerRacer::new(VehicleParams::default(), pedal.clone()).unwrap();
    racer.set_initial_speed(2.0).unwrap();

    pedal.set(0.5);
    let mut t = 0.0;
    for _ in 0..((0.1 / DT) as usize) {
        racer.advance(t, DT, Scheme::Rk4).unwrap();
        t += DT;
    }
    // Half brake: 4.5 m/s² for 0.1 s.
    assert_abs_diff_eq!(racer.speed(), 2.0 - 0.45, epsilon = 1e-6);
}

#[test]
fn brake_released_mid_run_stops_decelerating() {
    let pedal = BrakeSignal::new();
    let mut racer = RollerRacer::new(VehicleParams::default(), pedal.clone()).unwrap();
    racer.set_initial_speed(2.0).unwrap();

    pedal.set(1.0);
    racer.advance(0.0, 0.05, Scheme::Rk4).unwrap();
    let after_braking = racer.speed();
    assert!(after_braking < 2.0);

    pedal.set(0.0);
    for k in 0..40 {
        racer.advance(0.05 + k as f64 * DT, DT, Scheme::Rk4).unwrap();
    }
    assert_abs_diff_eq!(racer.speed(), after_braking, epsilon = 1e-9);
}

#[test]
fn backward_motion_brakes_toward_zero() {
    let pedal = BrakeSignal::new();
    let mut racer = RollerRacer::new(VehicleParams::default(), pedal.clone()).unwrap();
    racer.set_initial_speed(-2.0).unwrap();

    pedal.set(1.0);
    let mut t = 0.0;
    for _ in 0..20 {
        racer.advance(t, DT, Scheme::Rk4).unwrap();
        t += DT;
    }
    // 9 m/s² toward zero from -2 m/s over 0.1 s.
    assert_abs_diff_eq!(racer.speed(), 1.1, epsilon = 1e-6);
}
