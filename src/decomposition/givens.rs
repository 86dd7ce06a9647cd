//! Givens decompositions of particle-number-conserving transformations
//!
//! Both routines here reduce a matrix with orthonormal rows to canonical form
//! by eliminating entries with Givens rotations on adjacent column pairs.
//! Entry `(l, k)` is eliminated by mixing columns `k-1` and `k`; eliminations
//! are scheduled along anti-diagonal waves so that every layer of the
//! resulting circuit description acts on disjoint mode pairs. Within one row
//! elimination proceeds right to left, which a wave index of
//! `2*l + (n - 1 - k)` encodes directly.
//!
//! # References
//!
//! - Jiang, Sung, Kechedzhi, Smelyanskiy, Boixo, "Quantum algorithms to
//!   simulate many-body physics of correlated fermions" (arXiv:1711.05395)
//! - Clements et al., "Optimal design for universal multiport
//!   interferometers" (2016)

use super::{
    angles_to_zero_second, orthonormality_deviation, rotate_columns, CircuitDescription, GivensOp,
    CONSTRAINT_TOLERANCE, EPSILON,
};
use crate::error::CircuitError;
use crate::Result;
use ndarray::{Array2, ArrayView2};
use num_complex::Complex64;

/// Eliminate all entries `(l, k)` with `k > l`, `l < rows_to_reduce`,
/// recording one description layer per anti-diagonal wave.
fn eliminate_upper_entries(
    matrix: &mut Array2<Complex64>,
    rows_to_reduce: usize,
) -> CircuitDescription {
    let n = matrix.ncols();
    let mut description = CircuitDescription::new();
    if n < 2 || rows_to_reduce == 0 {
        return description;
    }

    for wave in 0..(n + rows_to_reduce - 2) {
        let mut layer = Vec::new();
        for l in 0..rows_to_reduce {
            // Solve wave = 2*l + (n - 1 - k) for the column being cleared.
            let k = match (2 * l + n - 1).checked_sub(wave) {
                Some(k) if k > l && k < n => k,
                _ => continue,
            };
            let a = matrix[[l, k - 1]];
            let b = matrix[[l, k]];
            if b.norm() < EPSILON {
                continue;
            }
            let (theta, phi) = angles_to_zero_second(a, b);
            rotate_columns(matrix.view_mut(), k - 1, k, theta, phi);
            layer.push(GivensOp::Rotation {
                i: k - 1,
                j: k,
                theta,
                phi,
            });
        }
        if !layer.is_empty() {
            description.push(layer);
        }
    }
    description
}

/// Decompose a square unitary into layers of adjacent-mode Givens rotations.
///
/// Returns the circuit description together with the diagonal that remains
/// once every off-diagonal entry has been eliminated. The description is
/// produced in elimination order; circuit assembly reverses it.
///
/// # Errors
///
/// Rejects matrices that are not square or whose rows are not orthonormal.
pub fn givens_decomposition_square(
    matrix: ArrayView2<'_, Complex64>,
) -> Result<(CircuitDescription, Vec<Complex64>)> {
    let (rows, cols) = matrix.dim();
    if rows != cols {
        return Err(CircuitError::NotSquare { rows, cols });
    }
    let deviation = orthonormality_deviation(matrix);
    if deviation > CONSTRAINT_TOLERANCE {
        return Err(CircuitError::NonOrthonormalRows { deviation });
    }

    let mut work = matrix.to_owned();
    let description = eliminate_upper_entries(&mut work, rows);
    let diagonal = (0..rows).map(|p| work[[p, p]]).collect();
    Ok((description, diagonal))
}

/// Circuit description preparing the Slater determinant of an orthonormal-row
/// matrix, assuming the first `eta` modes start out occupied.
///
/// The returned layers are already in gate-application order.
///
/// # Errors
///
/// Rejects matrices whose rows are not orthonormal (this includes any matrix
/// with more rows than columns).
pub fn slater_determinant_preparation_circuit(
    matrix: ArrayView2<'_, Complex64>,
) -> Result<CircuitDescription> {
    let deviation = orthonormality_deviation(matrix);
    if deviation > CONSTRAINT_TOLERANCE {
        return Err(CircuitError::NonOrthonormalRows { deviation });
    }

    let mut work = matrix.to_owned();
    let mut description = eliminate_upper_entries(&mut work, matrix.nrows());
    // Elimination order is the reverse of the order the gates must act in.
    description.reverse();
    Ok(description)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decomposition::testing::random_unitary;

    fn replay(description: &CircuitDescription, matrix: &mut Array2<Complex64>) {
        for layer in description {
            for op in layer {
                match *op {
                    GivensOp::Rotation { i, j, theta, phi } => {
                        rotate_columns(matrix.view_mut(), i, j, theta, phi);
                    }
                    GivensOp::ParticleHole => unreachable!("no particle-hole here"),
                }
            }
        }
    }

    #[test]
    fn square_decomposition_diagonalizes_random_unitary() {
        let u = random_unitary(5, 11);
        let (description, diagonal) = givens_decomposition_square(u.view()).unwrap();

        let mut replayed = u.clone();
        replay(&description, &mut replayed);
        for r in 0..5 {
            for c in 0..5 {
                if r == c {
                    assert!((replayed[[r, c]] - diagonal[r]).norm() < 1e-9);
                    assert!((diagonal[r].norm() - 1.0).abs() < 1e-9);
                } else {
                    assert!(
                        replayed[[r, c]].norm() < 1e-9,
                        "entry ({r}, {c}) = {}",
                        replayed[[r, c]]
                    );
                }
            }
        }
    }

    #[test]
    fn square_decomposition_of_identity_is_empty() {
        let eye = Array2::<Complex64>::eye(4);
        let (description, diagonal) = givens_decomposition_square(eye.view()).unwrap();
        assert!(description.is_empty());
        assert!(diagonal.iter().all(|d| (*d - 1.0).norm() < 1e-12));
    }

    #[test]
    fn square_decomposition_rejects_rectangular_input() {
        let m = Array2::<Complex64>::zeros((3, 4));
        assert!(matches!(
            givens_decomposition_square(m.view()),
            Err(CircuitError::NotSquare { rows: 3, cols: 4 })
        ));
    }

    #[test]
    fn layers_act_on_disjoint_mode_pairs() {
        let u = random_unitary(6, 23);
        let (description, _) = givens_decomposition_square(u.view()).unwrap();
        assert!(!description.is_empty());
        for layer in &description {
            let mut seen = std::collections::HashSet::new();
            for op in layer {
                if let GivensOp::Rotation { i, j, .. } = *op {
                    assert_eq!(j, i + 1);
                    assert!(seen.insert(i), "mode {i} reused inside one layer");
                    assert!(seen.insert(j), "mode {j} reused inside one layer");
                }
            }
        }
    }

    #[test]
    fn slater_circuit_clears_entries_right_of_the_diagonal() {
        let u = random_unitary(5, 7);
        let q = u.slice(ndarray::s![..2, ..]).to_owned();
        let description = slater_determinant_preparation_circuit(q.view()).unwrap();

        // Application order reversed is the elimination order.
        let elimination: CircuitDescription = description.iter().rev().cloned().collect();
        let mut replayed = q.clone();
        replay(&elimination, &mut replayed);
        for l in 0..2 {
            for k in (l + 1)..5 {
                assert!(
                    replayed[[l, k]].norm() < 1e-9,
                    "entry ({l}, {k}) = {}",
                    replayed[[l, k]]
                );
            }
        }
    }

    #[test]
    fn slater_circuit_rejects_non_orthonormal_rows() {
        let mut q = Array2::<Complex64>::zeros((2, 4));
        q[[0, 0]] = Complex64::new(1.0, 0.0);
        q[[1, 0]] = Complex64::new(1.0, 0.0);
        assert!(matches!(
            slater_determinant_preparation_circuit(q.view()),
            Err(CircuitError::NonOrthonormalRows { .. })
        ));
    }
}
