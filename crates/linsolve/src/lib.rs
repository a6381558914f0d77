//! # racer-linsolve
//!
//! Dense `A·x = b` solver for the small linear systems that show up once
//! per right-hand-side evaluation of the vehicle dynamics (n = 5 there,
//! but the dimension is a runtime parameter).
//!
//! [`LinearSystem`] owns its coefficient, right-hand-side, solution, and
//! elimination buffers, all allocated once at construction and reused
//! across solves. Refill the coefficients with [`LinearSystem::set`] /
//! [`LinearSystem::set_rhs`] and call [`LinearSystem::solve`] again; the
//! elimination runs on an internal working copy, so the stored
//! coefficients are never destroyed.
//!
//! Elimination uses partial pivoting: each column picks the
//! largest-magnitude candidate row before eliminating, and a pivot below
//! [`PIVOT_EPS`] reports [`LinSolveError::SingularSystem`] instead of
//! dividing through by noise.

mod error;

pub use error::LinSolveError;

/// Pivot magnitudes below this are treated as zero.
///
/// The equation-of-motion matrices this crate serves are well-conditioned
/// for physically valid parameters; a pivot this small means the caller
/// handed over a genuinely degenerate system.
pub const PIVOT_EPS: f64 = 1e-12;

/// A dense n×n linear system with reusable solve scratch.
#[derive(Debug, Clone)]
pub struct LinearSystem {
    n: usize,
    /// Coefficient matrix, row-major `[n * n]`.
    coeffs: Vec<f64>,
    /// Right-hand side `[n]`.
    rhs: Vec<f64>,
    /// Most recent solution `[n]`.
    solution: Vec<f64>,
    /// Augmented elimination buffer `[n * (n + 1)]`.
    work: Vec<f64>,
}

impl LinearSystem {
    /// Creates a zero-initialized n×n system.
    ///
    /// # Errors
    ///
    /// Returns [`LinSolveError::InvalidDimension`] if `n == 0`.
    pub fn new(n: usize) -> Result<Self, LinSolveError> {
        if n == 0 {
            return Err(LinSolveError::InvalidDimension { n });
        }
        Ok(Self {
            n,
            coeffs: vec![0.0; n * n],
            rhs: vec![0.0; n],
            solution: vec![0.0; n],
            work: vec![0.0; n * (n + 1)],
        })
    }

    /// Returns the system dimension.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Sets coefficient `A[row][col]`.
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self.coeffs[row * self.n + col] = value;
    }

    /// Returns coefficient `A[row][col]`.
    pub fn coeff(&self, row: usize, col: usize) -> f64 {
        self.coeffs[row * self.n + col]
    }

    /// Sets right-hand-side entry `b[row]`.
    pub fn set_rhs(&mut self, row: usize, value: f64) {
        self.rhs[row] = value;
    }

    /// Returns right-hand-side entry `b[row]`.
    pub fn rhs(&self, row: usize) -> f64 {
        self.rhs[row]
    }

    /// Zeroes the coefficients and right-hand side.
    pub fn clear(&mut self) {
        self.coeffs.fill(0.0);
        self.rhs.fill(0.0);
    }

    /// Returns the most recent solution vector.
    ///
    /// All zeros until the first successful [`solve`](Self::solve).
    pub fn solution(&self) -> &[f64] {
        &self.solution
    }

    /// Solves `A·x = b` by Gaussian elimination with partial pivoting.
    ///
    /// The stored coefficients and right-hand side are left intact; only
    /// the internal working buffer and the solution vector are mutated.
    ///
    /// # Errors
    ///
    /// Returns [`LinSolveError::SingularSystem`] when the best available
    /// pivot in some column has magnitude below [`PIVOT_EPS`].
    pub fn solve(&mut self) -> Result<&[f64], LinSolveError> {
        let n = self.n;
        let w = n + 1;

        // Build the augmented matrix [A | b] in the working buffer.
        for row in 0..n {
            self.work[row * w..row * w + n].copy_from_slice(&self.coeffs[row * n..(row + 1) * n]);
            self.work[row * w + n] = self.rhs[row];
        }

        // Forward elimination.
        for col in 0..n {
            // Partial pivoting: pick the largest-magnitude candidate at or
            // below the diagonal.
            let mut pivot_row = col;
            let mut pivot_mag = self.work[col * w + col].abs();
            for row in col + 1..n {
                let mag = self.work[row * w + col].abs();
                if mag > pivot_mag {
                    pivot_row = row;
                    pivot_mag = mag;
                }
            }
            if pivot_mag < PIVOT_EPS {
                return Err(LinSolveError::SingularSystem {
                    column: col,
                    pivot: pivot_mag,
                });
            }
            if pivot_row != col {
                for k in 0..w {
                    self.work.swap(col * w + k, pivot_row * w + k);
                }
            }

            let pivot = self.work[col * w + col];
            for row in col + 1..n {
                let factor = self.work[row * w + col] / pivot;
                if factor == 0.0 {
                    continue;
                }
                for k in col..w {
                    self.work[row * w + k] -= factor * self.work[col * w + k];
                }
            }
        }

        // Back substitution.
        for row in (0..n).rev() {
            let mut acc = self.work[row * w + n];
            for k in row + 1..n {
                acc -= self.work[row * w + k] * self.solution[k];
            }
            self.solution[row] = acc / self.work[row * w + row];
        }

        Ok(&self.solution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn zero_dimension_rejected() {
        let result = LinearSystem::new(0);
        assert!(matches!(result, Err(LinSolveError::InvalidDimension { n: 0 })));
    }

    #[test]
    fn identity_returns_rhs() {
        let mut sys = LinearSystem::new(4).unwrap();
        for i in 0..4 {
            sys.set(i, i, 1.0);
            sys.set_rhs(i, (i as f64) - 1.5);
        }
        let x = sys.solve().unwrap();
        for i in 0..4 {
            assert_abs_diff_eq!(x[i], (i as f64) - 1.5, epsilon = 1e-14);
        }
    }

    #[test]
    fn known_2x2() {
        // 2x + y = 5, x - y = 1  =>  x = 2, y = 1
        let mut sys = LinearSystem::new(2).unwrap();
        sys.set(0, 0, 2.0);
        sys.set(0, 1, 1.0);
        sys.set(1, 0, 1.0);
        sys.set(1, 1, -1.0);
        sys.set_rhs(0, 5.0);
        sys.set_rhs(1, 1.0);
        let x = sys.solve().unwrap();
        assert_abs_diff_eq!(x[0], 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(x[1], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn zero_leading_pivot_recovers_via_row_swap() {
        // A[0][0] == 0 forces a pivot swap; without partial pivoting this
        // system would divide by zero.
        let mut sys = LinearSystem::new(2).unwrap();
        sys.set(0, 0, 0.0);
        sys.set(0, 1, 1.0);
        sys.set(1, 0, 1.0);
        sys.set(1, 1, 0.0);
        sys.set_rhs(0, 3.0);
        sys.set_rhs(1, 7.0);
        let x = sys.solve().unwrap();
        assert_abs_diff_eq!(x[0], 7.0, epsilon = 1e-12);
        assert_abs_diff_eq!(x[1], 3.0, epsilon = 1e-12);
    }

    #[test]
    fn zero_row_is_singular() {
        let mut sys = LinearSystem::new(3).unwrap();
        sys.set(0, 0, 1.0);
        sys.set(1, 1, 1.0);
        // Row 2 stays all zeros.
        sys.set_rhs(2, 1.0);
        let result = sys.solve();
        assert!(matches!(result, Err(LinSolveError::SingularSystem { .. })));
    }

    #[test]
    fn solve_preserves_inputs() {
        let mut sys = LinearSystem::new(2).unwrap();
        sys.set(0, 0, 3.0);
        sys.set(0, 1, 1.0);
        sys.set(1, 0, 1.0);
        sys.set(1, 1, 2.0);
        sys.set_rhs(0, 9.0);
        sys.set_rhs(1, 8.0);
        sys.solve().unwrap();
        assert_eq!(sys.coeff(0, 0), 3.0);
        assert_eq!(sys.coeff(1, 1), 2.0);
        assert_eq!(sys.rhs(0), 9.0);
        assert_eq!(sys.rhs(1), 8.0);
    }
}
