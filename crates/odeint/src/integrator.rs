//! Fixed-step integration over a runtime-sized state vector.

use crate::derivative::Derivative;
use crate::error::OdeError;

/// Fixed-step integration scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    /// Forward Euler: one derivative evaluation per step.
    Euler,
    /// Trapezoidal predictor/corrector: two evaluations per step.
    Rk2,
    /// Classical fourth-order Runge-Kutta: four evaluations per step.
    Rk4,
}

impl Scheme {
    /// Number of derivative evaluations one step performs.
    pub fn stages(self) -> usize {
        match self {
            Scheme::Euler => 1,
            Scheme::Rk2 => 2,
            Scheme::Rk4 => 4,
        }
    }
}

/// A fixed-step ODE integrator owning its state and stage buffers.
///
/// The state vector length is fixed at construction. Stage and
/// intermediate buffers are allocated once and reused every step, so
/// stepping never touches the heap. The derivative function is passed
/// into each step call rather than stored, which makes the
/// "stepping with no derivative installed" failure mode of ancestor
/// designs unrepresentable.
///
/// All step methods mutate the state in place and are deterministic
/// given state, time, and step size. If a derivative evaluation fails
/// mid-step, the error is returned and the state is left exactly as it
/// was before the step: the predictor stages write only into internal
/// buffers, and the state is committed in a single final pass.
#[derive(Debug, Clone)]
pub struct Integrator {
    /// Current state `[n]`.
    state: Vec<f64>,
    /// Intermediate (predictor) state `[n]`.
    xi: Vec<f64>,
    /// Stage derivative buffers `[4][n]`.
    stages: [Vec<f64>; 4],
}

impl Integrator {
    /// Creates an integrator with an all-zero state of length `n`.
    ///
    /// # Errors
    ///
    /// Returns [`OdeError::InvalidSize`] if `n == 0`.
    pub fn new(n: usize) -> Result<Self, OdeError> {
        if n == 0 {
            return Err(OdeError::InvalidSize { n });
        }
        Ok(Self {
            state: vec![0.0; n],
            xi: vec![0.0; n],
            stages: [vec![0.0; n], vec![0.0; n], vec![0.0; n], vec![0.0; n]],
        })
    }

    /// Returns the state vector length.
    pub fn n(&self) -> usize {
        self.state.len()
    }

    /// Returns the current state vector.
    pub fn state(&self) -> &[f64] {
        &self.state
    }

    /// Returns the current state vector mutably.
    ///
    /// Intended for setting initial conditions; the length is fixed.
    pub fn state_mut(&mut self) -> &mut [f64] {
        &mut self.state
    }

    /// Advances one step with the given scheme.
    ///
    /// # Errors
    ///
    /// Propagates the first derivative-evaluation error; the state is
    /// unchanged in that case.
    pub fn step<F: Derivative>(
        &mut self,
        rhs: &mut F,
        scheme: Scheme,
        time: f64,
        dt: f64,
    ) -> Result<(), F::Error> {
        match scheme {
            Scheme::Euler => self.step_euler(rhs, time, dt),
            Scheme::Rk2 => self.step_rk2(rhs, time, dt),
            Scheme::Rk4 => self.step_rk4(rhs, time, dt),
        }
    }

    /// Forward Euler: `x <- x + f(x, t)·dt`.
    pub fn step_euler<F: Derivative>(
        &mut self,
        rhs: &mut F,
        time: f64,
        dt: f64,
    ) -> Result<(), F::Error> {
        rhs.eval(&self.state, time, &mut self.stages[0])?;
        for (x, f0) in self.state.iter_mut().zip(&self.stages[0]) {
            *x += f0 * dt;
        }
        Ok(())
    }

    /// Trapezoidal predictor/corrector (RK2).
    ///
    /// Predict `x~ = x + f(x, t)·dt`, then correct with the average of the
    /// slopes at both ends: `x <- x + 0.5·(f(x, t) + f(x~, t + dt))·dt`.
    pub fn step_rk2<F: Derivative>(
        &mut self,
        rhs: &mut F,
        time: f64,
        dt: f64,
    ) -> Result<(), F::Error> {
        rhs.eval(&self.state, time, &mut self.stages[0])?;
        for i in 0..self.state.len() {
            self.xi[i] = self.state[i] + self.stages[0][i] * dt;
        }

        rhs.eval(&self.xi, time + dt, &mut self.stages[1])?;
        for i in 0..self.state.len() {
            self.state[i] += 0.5 * (self.stages[0][i] + self.stages[1][i]) * dt;
        }
        Ok(())
    }

    /// Classical fourth-order Runge-Kutta.
    ///
    /// Evaluates at `t`, `t + dt/2`, `t + dt/2`, `t + dt` and combines the
    /// four slopes with weights 1, 2, 2, 1 scaled by `dt/6`.
    pub fn step_rk4<F: Derivative>(
        &mut self,
        rhs: &mut F,
        time: f64,
        dt: f64,
    ) -> Result<(), F::Error> {
        let n = self.state.len();
        let half = 0.5 * dt;

        rhs.eval(&self.state, time, &mut self.stages[0])?;
        for i in 0..n {
            self.xi[i] = self.state[i] + self.stages[0][i] * half;
        }

        rhs.eval(&self.xi, time + half, &mut self.stages[1])?;
        for i in 0..n {
            self.xi[i] = self.state[i] + self.stages[1][i] * half;
        }

        rhs.eval(&self.xi, time + half, &mut self.stages[2])?;
        for i in 0..n {
            self.xi[i] = self.state[i] + self.stages[2][i] * dt;
        }

        rhs.eval(&self.xi, time + dt, &mut self.stages[3])?;
        for i in 0..n {
            self.state[i] += (self.stages[0][i]
                + 2.0 * self.stages[1][i]
                + 2.0 * self.stages[2][i]
                + self.stages[3][i])
                * (dt / 6.0);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::convert::Infallible;

    /// f(x, t) = 0 for every component.
    struct Still;

    impl Derivative for Still {
        type Error = Infallible;

        fn eval(&mut self, _state: &[f64], _time: f64, deriv: &mut [f64]) -> Result<(), Infallible> {
            deriv.fill(0.0);
            Ok(())
        }
    }

    /// dx/dt = -x, component-wise.
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

    #[test]
    fn zero_size_rejected() {
        assert!(matches!(Integrator::new(0), Err(OdeError::InvalidSize { n: 0 })));
    }

    #[test]
    fn state_starts_zeroed() {
        let integ = Integrator::new(7).unwrap();
        assert_eq!(integ.n(), 7);
        assert!(integ.state().iter().all(|&x| x == 0.0));
    }

    #[test]
    fn zero_derivative_leaves_state_unchanged() {
        for scheme in [Scheme::Euler, Scheme::Rk2, Scheme::Rk4] {
            let mut integ = Integrator::new(3).unwrap();
            integ.state_mut().copy_from_slice(&[1.0, -2.5, 4.0]);
            for step in 0..10 {
                integ.step(&mut Still, scheme, step as f64 * 0.1, 0.1).unwrap();
            }
            assert_eq!(integ.state(), &[1.0, -2.5, 4.0]);
        }
    }

    #[test]
    fn euler_single_step_matches_formula() {
        let mut integ = Integrator::new(1).unwrap();
        integ.state_mut()[0] = 2.0;
        integ.step_euler(&mut ExpDecay, 0.0, 0.25).unwrap();
        // x + (-x)·dt = 2.0 · (1 - 0.25)
        assert_abs_diff_eq!(integ.state()[0], 1.5, epsilon = 1e-15);
    }

    #[test]
    fn rk2_single_step_matches_formula() {
        let mut integ = Integrator::new(1).unwrap();
        integ.state_mut()[0] = 1.0;
        let dt = 0.5;
        integ.step_rk2(&mut ExpDecay, 0.0, dt).unwrap();
        // Heun on dx/dt = -x: x·(1 - dt + dt²/2)
        assert_abs_diff_eq!(integ.state()[0], 1.0 - dt + dt * dt / 2.0, epsilon = 1e-15);
    }

    #[test]
    fn scheme_stage_counts() {
        assert_eq!(Scheme::Euler.stages(), 1);
        assert_eq!(Scheme::Rk2.stages(), 2);
        assert_eq!(Scheme::Rk4.stages(), 4);
    }
}
