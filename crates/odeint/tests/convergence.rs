//! Accuracy and order-of-convergence tests against dx/dt = -x.
//!
//! The analytic solution x(t) = x0·e^{-t} gives exact references for both
//! single-step (local) error and integrated (global) error.

use racer_odeint::{Derivative, Integrator, Scheme};
use std::convert::Infallible;

struct ExpDecay;

impl Derivative for ExpDecay {
    type Error = Infallible;

    fn eval(&mut self, state: &[f64], _time: f64, deriv: &mut [f64]) -> Result<(), Infallible> {
        for (d, x) in deriv.iter_mut().zip(state) {
            *d = -x;
        }
        Ok(())
    }
}

/// Single-step error against e^{-dt} starting from x = 1.
fn local_error(scheme: Scheme, dt: f64) -> f64 {
    let mut integ = Integrator::new(1).unwrap();
    integ.state_mut()[0] = 1.0;
    integ.step(&mut ExpDecay, scheme, 0.0, dt).unwrap();
    (integ.state()[0] - (-dt).exp()).abs()
}

/// Error at t = 2 after integrating from x = 1 with the given step size.
fn global_error(scheme: Scheme, dt: f64) -> f64 {
    let steps = (2.0 / dt).round() as usize;
    let mut integ = Integrator::new(1).unwrap();
    integ.state_mut()[0] = 1.0;
    for k in 0..steps {
        integ.step(&mut ExpDecay, scheme, k as f64 * dt, dt).unwrap();
    }
    (integ.state()[0] - (-2.0f64).exp()).abs()
}

#[test]
fn higher_order_schemes_are_strictly_more_accurate() {
    let dt = 0.1;
    let e_euler = local_error(Scheme::Euler, dt);
    let e_rk2 = local_error(Scheme::Rk2, dt);
    let e_rk4 = local_error(Scheme::Rk4, dt);

    assert!(e_rk4 < e_rk2, "rk4 {e_rk4:e} not below rk2 {e_rk2:e}");
    assert!(e_rk2 < e_euler, "rk2 {e_rk2:e} not below euler {e_euler:e}");
    assert!(e_rk4 < 1e-6, "rk4 local error too large: {e_rk4:e}");
}

#[test]
fn local_error_scales_with_scheme_order() {
    // Halving dt should shrink the local error by ~2^(order+1).
    let cases = [
        (Scheme::Euler, 3.3, 4.5),  // O(dt²): ratio near 4
        (Scheme::Rk2, 6.5, 9.5),    // O(dt³): ratio near 8
        (Scheme::Rk4, 24.0, 40.0),  // O(dt⁵): ratio near 32
    ];
    for (scheme, lo, hi) in cases {
        let ratio = local_error(scheme, 0.2) / local_error(scheme, 0.1);
        assert!(
            ratio > lo && ratio < hi,
            "{scheme:?}: error ratio {ratio} outside [{lo}, {hi}]"
        );
    }
}

#[test]
fn global_error_ordering_holds_over_an_interval() {
    let dt = 0.05;
    let e_euler = global_error(Scheme::Euler, dt);
    let e_rk2 = global_error(Scheme::Rk2, dt);
    let e_rk4 = global_error(Scheme::Rk4, dt);

    assert!(e_rk4 < e_rk2 && e_rk2 < e_euler);
    assert!(e_rk4 < 1e-7, "rk4 global error too large: {e_rk4:e}");
}

#[test]
fn rk4_tracks_analytic_solution_closely() {
    let dt = 0.01;
    let steps = 500;
    let mut integ = Integrator::new(1).unwrap();
    integ.state_mut()[0] = 3.0;
    for k in 0..steps {
        integ.step_rk4(&mut ExpDecay, k as f64 * dt, dt).unwrap();
    }
    let expected = 3.0 * (-(steps as f64) * dt).exp();
    assert!((integ.state()[0] - expected).abs() < 1e-10);
}
