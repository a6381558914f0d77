//! Error types for the racer-linsolve crate.

/// Error type for all fallible operations in the racer-linsolve crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LinSolveError {
    /// Returned when a system is constructed with zero dimension.
    #[error("linear system dimension must be at least 1, got {n}")]
    InvalidDimension {
        /// Requested dimension.
        n: usize,
    },

    /// Returned when elimination cannot find a usable pivot.
    ///
    /// Even after partial pivoting, the largest candidate in the active
    /// column had magnitude below the pivot tolerance, so the coefficient
    /// matrix is singular (or numerically indistinguishable from singular).
    #[error("singular system: pivot magnitude {pivot:.3e} in column {column}")]
    SingularSystem {
        /// Column at which elimination broke down.
        column: usize,
        /// Magnitude of the best available pivot.
        pivot: f64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_invalid_dimension() {
        let err = LinSolveError::InvalidDimension { n: 0 };
        assert_eq!(err.to_string(), "linear system dimension must be at least 1, got 0");
    }

    #[test]
    fn error_singular_system() {
        let err = LinSolveError::SingularSystem {
            column: 2,
            pivot: 0.0,
        };
        assert_eq!(
            err.to_string(),
            "singular system: pivot magnitude 0.000e0 in column 2"
        );
    }

    #[test]
    fn error_is_std_error() {
        fn assert_impl<T: std::error::Error>() {}
        assert_impl::<LinSolveError>();
    }
}
