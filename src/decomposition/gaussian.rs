//! Decomposition of general Bogoliubov transformations
//!
//! The input is an `n x 2n` matrix `M = [L | R]` describing new ladder
//! operators with the creation coefficients on the left,
//! `b_p = sum_q L_pq a^dag_q + R_pq a_q`, subject to the canonical
//! constraints `L L^dag + R R^dag = I` and `L R^T + R L^T = 0`.
//!
//! The routine clears the creation block `L` one row at a time, bottom row
//! first. Adjacent-mode double Givens rotations push the remaining weight of
//! a row to the last mode, where the canonical constraints guarantee the
//! matching annihilation-block entry vanishes, so a particle-hole
//! transformation on that mode moves the weight across blocks without
//! disturbing rows already cleared. What remains is `[0 | R']`: every `b_p`
//! becomes a pure annihilation combination once the sweep is undone, which
//! is what makes the rendered circuit prepare the state they annihilate.
//! Reducing the conjugate of `R'` with the square Givens decomposition
//! yields the particle-conserving ("left") part of the factorization; the
//! conjugate because the rendered gates act on annihilation coefficients as
//! the conjugates of the recorded rotations.
//!
//! A double Givens rotation of modes `i` and `j` applies `G(theta, phi)` to
//! the creation columns and its complex conjugate to the annihilation
//! columns, so that the transformation stays in the Bogoliubov group.

use super::{
    angles_to_zero_first, givens_decomposition_square, orthonormality_deviation, rotate_columns,
    CircuitDescription, GivensOp, CONSTRAINT_TOLERANCE, EPSILON,
};
use crate::error::CircuitError;
use crate::Result;
use ndarray::{s, ArrayView2};
use num_complex::Complex64;

/// Output of [`fermionic_gaussian_decomposition`].
#[derive(Debug, Clone)]
pub struct FermionicGaussianDecomposition {
    /// Bogoliubov part: double Givens rotations and particle-hole markers,
    /// in elimination order.
    pub decomposition: CircuitDescription,

    /// Particle-conserving reduction of the residual annihilation block.
    pub left_decomposition: CircuitDescription,

    /// Unit-modulus phase left on each mode after both reductions.
    pub diagonal: Vec<Complex64>,

    /// Diagonal of the annihilation block after the Bogoliubov sweep alone.
    pub left_diagonal: Vec<Complex64>,
}

/// Max violation of `L R^T + R L^T = 0` over all row pairs.
fn anticommutation_deviation(matrix: ArrayView2<'_, Complex64>) -> f64 {
    let n = matrix.nrows();
    let mut worst = 0.0_f64;
    for p in 0..n {
        for r in 0..n {
            let mut acc = Complex64::new(0.0, 0.0);
            for q in 0..n {
                acc += matrix[[p, q]] * matrix[[r, n + q]] + matrix[[p, n + q]] * matrix[[r, q]];
            }
            worst = worst.max(acc.norm());
        }
    }
    worst
}

/// Decompose an `n x 2n` canonical transformation matrix into a Bogoliubov
/// circuit description and a particle-conserving remainder.
///
/// Both descriptions are produced in elimination order; circuit assembly
/// reverses them. The two diagonals are auxiliary outputs.
///
/// # Errors
///
/// Rejects matrices that are not `n x 2n`, whose rows are not orthonormal,
/// or that violate the canonical anticommutation constraints.
pub fn fermionic_gaussian_decomposition(
    matrix: ArrayView2<'_, Complex64>,
) -> Result<FermionicGaussianDecomposition> {
    let (n, cols) = matrix.dim();
    if cols != 2 * n {
        return Err(CircuitError::NotDoubledSquare { rows: n, cols });
    }
    let deviation = orthonormality_deviation(matrix);
    if deviation > CONSTRAINT_TOLERANCE {
        return Err(CircuitError::NonOrthonormalRows { deviation });
    }
    let deviation = anticommutation_deviation(matrix);
    if deviation > CONSTRAINT_TOLERANCE {
        return Err(CircuitError::CanonicalConstraintViolation { deviation });
    }

    let mut work = matrix.to_owned();
    let mut decomposition = CircuitDescription::new();

    // Clear the creation block, bottom row first. Each rotation here
    // shares a mode with its successor, so every operation is its own layer.
    for l in (0..n).rev() {
        for k in 0..n.saturating_sub(1) {
            let a = work[[l, k]];
            if a.norm() < EPSILON {
                continue;
            }
            let b = work[[l, k + 1]];
            let (theta, phi) = angles_to_zero_first(a, b);
            rotate_columns(work.view_mut(), k, k + 1, theta, phi);
            rotate_columns(work.view_mut(), n + k, n + k + 1, theta, -phi);
            decomposition.push(vec![GivensOp::Rotation {
                i: k,
                j: k + 1,
                theta,
                phi,
            }]);
        }
        if work[[l, n - 1]].norm() > EPSILON {
            for row in 0..n {
                work.swap([row, n - 1], [row, 2 * n - 1]);
            }
            decomposition.push(vec![GivensOp::ParticleHole]);
        }
    }

    let right = work.slice(s![.., n..]).to_owned();
    let left_diagonal = (0..n).map(|p| right[[p, p]]).collect();
    // The renderer emits the conjugate of each recorded rotation, so the
    // remainder is reduced through its conjugate.
    let conjugated = right.mapv(|z| z.conj());
    let (left_decomposition, diagonal) = givens_decomposition_square(conjugated.view())?;

    Ok(FermionicGaussianDecomposition {
        decomposition,
        left_decomposition,
        diagonal,
        left_diagonal,
    })
}
