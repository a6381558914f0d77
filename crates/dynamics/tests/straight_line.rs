//! End-to-end: with no braking and no steering the racer holds a straight
//! line at constant speed.

use approx::assert_abs_diff_eq;
use racer_dynamics::{NoBrake, RollerRacer, VehicleParams};
use racer_odeint::Scheme;

const DT: f64 = 0.01;

fn run(scheme: Scheme, seconds: f64) -> RollerRacer<NoBrake> {
    let mut racer = RollerRacer::new(VehicleParams::default(), NoBrake).unwrap();
    racer.set_initial_speed(2.0).unwrap();
    let steps = (seconds / DT).round() as usize;
    for k in 0..steps {
        racer.advance(k as f64 * DT, DT, scheme).unwrap();
    }
    racer
}

#[test]
fn straight_line_rk4() {
    let racer = run(Scheme::Rk4, 6.0);
    let (x, z) = racer.position();

    assert_abs_diff_eq!(x, 12.0, epsilon = 1e-6);
    assert_abs_diff_eq!(z, 0.0, epsilon = 1e-9);
    assert_eq!(racer.heading(), 0.0);
    assert_eq!(racer.steer_angle(), 0.0);
    assert_abs_diff_eq!(racer.speed(), 2.0, epsilon = 1e-9);
}

#[test]
fn straight_line_all_schemes_agree() {
    // The straight-line solution has zero acceleration everywhere, so even
    // forward Euler reproduces it.
    for scheme in [Scheme::Euler, Scheme::Rk2, Scheme::Rk4] {
        let racer = run(scheme, 3.0);
        let (x, z) = racer.position();
        assert_abs_diff_eq!(x, 6.0, epsilon = 1e-6);
        assert_abs_diff_eq!(z, 0.0, epsilon = 1e-9);
    }
}

#[test]
fn no_slip_while_rolling_straight() {
    let racer = run(Scheme::Rk4, 4.0);
    assert_abs_diff_eq!(racer.slip_rate_rear(), 0.0, epsilon = 1e-9);
    assert_abs_diff_eq!(racer.slip_rate_front(), 0.0, epsilon = 1e-9);
}

#[test]
fn kinetic_energy_is_conserved_without_braking() {
    let racer = run(Scheme::Rk4, 5.0);
    assert_abs_diff_eq!(racer.kinetic_energy(), 50.0, epsilon = 1e-6);
}

#[test]
fn wheel_angles_accumulate_rolling() {
    let racer = run(Scheme::Rk4, 2.0);
    // 2 m/s over 2 s at r = 0.375 m: 4 m / 0.375 m of rotation.
    let expected = -4.0 / 0.375;
    assert_abs_diff_eq!(racer.wheel_angle_left(), expected, epsilon = 1e-6);
    assert_abs_diff_eq!(racer.wheel_angle_right(), expected, epsilon = 1e-6);
    assert_abs_diff_eq!(racer.wheel_angle_front(), -4.0 / 0.15, epsilon = 1e-6);
}
