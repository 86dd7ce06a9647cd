//! Error types for circuit generation

use thiserror::Error;

/// Errors raised while turning a matrix description into gates.
///
/// Circuit generation itself has no failure modes; everything here comes
/// from validating the numeric inputs before any gate is produced.
#[derive(Debug, Error)]
pub enum CircuitError {
    /// The transformation matrix matches neither accepted shape.
    #[error(
        "bad shape for transformation matrix: expected {expected_square:?} \
         or {expected_general:?} but got {actual:?}"
    )]
    BadTransformationShape {
        /// Shape of a particle-number-conserving transformation.
        expected_square: (usize, usize),
        /// Shape of a general Bogoliubov transformation.
        expected_general: (usize, usize),
        /// Shape actually supplied.
        actual: (usize, usize),
    },

    /// A square decomposition was asked of a non-square matrix.
    #[error("expected a square matrix but got shape ({rows}, {cols})")]
    NotSquare { rows: usize, cols: usize },

    /// A Gaussian decomposition was asked of a matrix that is not n x 2n.
    #[error("expected a matrix of shape (n, 2n) but got shape ({rows}, {cols})")]
    NotDoubledSquare { rows: usize, cols: usize },

    /// The rows of the input matrix are not orthonormal.
    #[error("matrix rows are not orthonormal (max deviation {deviation:.3e})")]
    NonOrthonormalRows { deviation: f64 },

    /// The matrix does not describe valid fermionic ladder operators.
    #[error(
        "matrix violates the canonical anticommutation constraints \
         (max deviation {deviation:.3e})"
    )]
    CanonicalConstraintViolation { deviation: f64 },
}

impl CircuitError {
    /// Build the shape error for a transformation matrix over `n` qubits.
    pub fn bad_transformation_shape(n_qubits: usize, actual: (usize, usize)) -> Self {
        Self::BadTransformationShape {
            expected_square: (n_qubits, n_qubits),
            expected_general: (n_qubits, 2 * n_qubits),
            actual,
        }
    }
}
