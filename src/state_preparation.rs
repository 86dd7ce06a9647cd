//! Circuits that prepare fermionic Gaussian states
//!
//! All three entry points assume the Jordan-Wigner encoding on a linear
//! qubit array and produce their gates lazily: each returns a finite,
//! single-pass iterator of [`GateOp`] values in strict application order.
//! The shared translation point is [`render_givens_circuit`], which turns a
//! circuit description from the decomposition routines into concrete gates.
//!
//! The algorithms implemented by the decompositions are described in
//! arXiv:1711.05395.

use crate::decomposition::{
    fermionic_gaussian_decomposition, givens_decomposition_square,
    slater_determinant_preparation_circuit, CircuitDescription, GivensOp,
};
use crate::error::CircuitError;
use crate::hamiltonian::QuadraticHamiltonian;
use crate::{GateOp, QubitId, Result};
use ndarray::{Array2, ArrayView2, Axis};
use num_complex::Complex64;
use smallvec::{smallvec, SmallVec};
use std::collections::BTreeSet;
use std::f64::consts::PI;

/// Perform a Bogoliubov transformation.
///
/// The transformation is to a basis determined by a new set of fermionic
/// ladder operators. With an `N x N` transformation matrix `W` the new
/// creation operators are
///
/// ```text
/// b^dag_p = sum_q W_pq a^dag_q
/// ```
///
/// and the transformation conserves particle number. With an `N x 2N`
/// matrix the sums also run over annihilation operators,
///
/// ```text
/// b^dag_p = sum_q W_pq a^dag_q + W_p(N+q) a_q
/// ```
///
/// and the transformation is a general Gaussian unitary.
///
/// `initial_state`, if given, is the computational basis state (big-endian)
/// the qubits are currently in; knowing it enables shorter circuits. The
/// value is not range-checked against `2^N`.
///
/// # Errors
///
/// Fails with [`CircuitError::BadTransformationShape`] when the matrix is
/// neither `N x N` nor `N x 2N` for the supplied `N` qubits, before any gate
/// is produced. Constraint violations reported by the decomposition
/// routines are propagated unchanged.
///
/// # Example
/// ```
/// use fermiprep::{bogoliubov_transform, GateOp, QubitId};
/// use ndarray::Array2;
/// use num_complex::Complex64;
///
/// let qubits = QubitId::line(2);
/// let w = Array2::<Complex64>::eye(2);
/// let ops: Vec<GateOp> = bogoliubov_transform(&qubits, w.view(), None)
///     .unwrap()
///     .collect();
/// // The identity transformation needs no gates.
/// assert!(ops.is_empty());
/// ```
pub fn bogoliubov_transform<'a>(
    qubits: &'a [QubitId],
    transformation_matrix: ArrayView2<'_, Complex64>,
    initial_state: Option<u64>,
) -> Result<impl Iterator<Item = GateOp> + 'a> {
    let n = qubits.len();
    let shape = transformation_matrix.dim();

    let (flips, description) = if shape == (n, n) {
        slater_basis_change(qubits, transformation_matrix, initial_state)?
    } else if shape == (n, 2 * n) {
        let description = gaussian_basis_change(transformation_matrix, initial_state)?;
        (Vec::new(), description)
    } else {
        return Err(CircuitError::bad_transformation_shape(n, shape));
    };
    Ok(assemble(qubits, flips, description))
}

/// Prepare an eigenstate of a quadratic Hamiltonian.
///
/// `occupied_orbitals` lists the pseudoparticle orbitals to occupy, in
/// ascending order of energy; `None` fills every negative-energy orbital
/// and therefore prepares the ground state. The Hamiltonian supplies its
/// own preparation circuit (see [`QuadraticHamiltonian`]); this function
/// flips the start orbitals it names and renders the description as-is.
pub fn prepare_gaussian_state<'a, H>(
    qubits: &'a [QubitId],
    hamiltonian: &H,
    occupied_orbitals: Option<&[usize]>,
) -> impl Iterator<Item = GateOp> + 'a
where
    H: QuadraticHamiltonian + ?Sized,
{
    let (description, start_orbitals) = hamiltonian.preparation_circuit(occupied_orbitals);
    let flips = start_orbitals.into_iter().map(|mode| qubits[mode]).collect();
    assemble(qubits, flips, description)
}

/// Prepare a Slater determinant from an orthonormal-row matrix.
///
/// The determinant of an `eta x N` matrix `Q` with orthonormal rows is the
/// state `b^dag_1 ... b^dag_eta |vac>` with
/// `b^dag_j = sum_k Q_jk a^dag_k`. The circuit first occupies the first
/// `eta` modes, then applies the preparation rotations.
///
/// # Errors
///
/// Propagates [`CircuitError::NonOrthonormalRows`] from the decomposition.
pub fn prepare_slater_determinant<'a>(
    qubits: &'a [QubitId],
    slater_determinant_matrix: ArrayView2<'_, Complex64>,
) -> Result<impl Iterator<Item = GateOp> + 'a> {
    let description = slater_determinant_preparation_circuit(slater_determinant_matrix)?;
    let flips = (0..slater_determinant_matrix.nrows())
        .map(|mode| qubits[mode])
        .collect();
    Ok(assemble(qubits, flips, description))
}

/// Turn a circuit description into gate operations.
///
/// Layers are consumed in order and items within a layer in order. The
/// particle-hole marker becomes a bit flip on the last qubit of the slice;
/// a rotation item `(i, j, theta, phi)` becomes the excitation-exchange
/// interaction on qubits `i` and `j` with exponent `2 theta / pi`, followed
/// by a phase gate on qubit `j` with exponent `phi / pi`.
///
/// Mode indices outside the qubit slice are a violation of the description
/// contract and panic on iteration.
pub fn render_givens_circuit<'a>(
    qubits: &'a [QubitId],
    description: CircuitDescription,
) -> impl Iterator<Item = GateOp> + 'a {
    description
        .into_iter()
        .flatten()
        .flat_map(move |op| -> SmallVec<[GateOp; 2]> {
            match op {
                GivensOp::ParticleHole => smallvec![GateOp::X(qubits[qubits.len() - 1])],
                GivensOp::Rotation { i, j, theta, phi } => smallvec![
                    GateOp::YxxyPow {
                        i: qubits[i],
                        j: qubits[j],
                        exponent: 2.0 * theta / PI,
                    },
                    GateOp::ZPow {
                        qubit: qubits[j],
                        exponent: phi / PI,
                    },
                ],
            }
        })
}

/// Population flips first, then the rendered description.
fn assemble<'a>(
    qubits: &'a [QubitId],
    flips: Vec<QubitId>,
    description: CircuitDescription,
) -> impl Iterator<Item = GateOp> + 'a {
    flips
        .into_iter()
        .map(GateOp::X)
        .chain(render_givens_circuit(qubits, description))
}

/// Particle-number-conserving basis change.
fn slater_basis_change<'a>(
    qubits: &'a [QubitId],
    transformation_matrix: ArrayView2<'_, Complex64>,
    initial_state: Option<u64>,
) -> Result<(Vec<QubitId>, CircuitDescription)> {
    let n = qubits.len();
    match initial_state {
        None => {
            let (decomposition, _diagonal) = givens_decomposition_square(transformation_matrix)?;
            let mut description = decomposition;
            // The decomposition comes out in elimination order, opposite to
            // the order gates must be applied in.
            description.reverse();
            Ok((Vec::new(), description))
        }
        Some(state) => {
            let occupied = occupied_orbitals(state, n);
            let rows: Vec<usize> = occupied.iter().copied().collect();
            let restricted = transformation_matrix.select(Axis(0), &rows);
            let n_occupied = rows.len();
            // Flip so that the first n_occupied qubits are 1 and the rest 0.
            let flips = (0..n)
                .filter(|&j| (j < n_occupied) != occupied.contains(&j))
                .map(|j| qubits[j])
                .collect();
            let description = slater_determinant_preparation_circuit(restricted.view())?;
            Ok((flips, description))
        }
    }
}

/// General Gaussian basis change.
fn gaussian_basis_change(
    transformation_matrix: ArrayView2<'_, Complex64>,
    initial_state: Option<u64>,
) -> Result<CircuitDescription> {
    let n = transformation_matrix.nrows();

    // The public contract describes b^dag; the decomposition routine takes
    // the rows of b with creation coefficients first, so swap the blocks
    // and conjugate.
    let rearranged = Array2::from_shape_fn((n, 2 * n), |(row, col)| {
        if col < n {
            transformation_matrix[[row, n + col]].conj()
        } else {
            transformation_matrix[[row, col - n]].conj()
        }
    });

    let result = fermionic_gaussian_decomposition(rearranged.view())?;
    let mut description = result.decomposition;
    if initial_state != Some(0) {
        // Starting from the vacuum state yields additional symmetry that
        // makes the left decomposition unnecessary.
        description.extend(result.left_decomposition);
    }
    description.reverse();
    Ok(description)
}

/// Indices of ones in the big-endian `n_modes`-bit expansion of `state`.
///
/// E.g. `0b010110` over six modes gives `{1, 3, 4}`. Values with bits above
/// `n_modes` are a caller-contract violation and are silently truncated.
fn occupied_orbitals(state: u64, n_modes: usize) -> BTreeSet<usize> {
    (0..n_modes)
        .filter(|&j| {
            state
                .checked_shr((n_modes - 1 - j) as u32)
                .map_or(0, |bits| bits & 1)
                == 1
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(i: usize) -> QubitId {
        QubitId::new(i)
    }

    #[test]
    fn occupied_orbitals_is_big_endian() {
        let occupied = occupied_orbitals(0b010110, 6);
        assert_eq!(occupied, BTreeSet::from([1, 3, 4]));
    }

    #[test]
    fn occupied_orbitals_empty_and_full() {
        assert!(occupied_orbitals(0, 6).is_empty());
        assert_eq!(occupied_orbitals(63, 6), BTreeSet::from([0, 1, 2, 3, 4, 5]));
    }

    #[test]
    fn renderer_marker_flips_last_qubit() {
        let qubits = QubitId::line(4);
        let description = vec![vec![GivensOp::ParticleHole]];
        let ops: Vec<GateOp> = render_givens_circuit(&qubits, description).collect();
        assert_eq!(ops, vec![GateOp::X(q(3))]);
    }

    #[test]
    fn renderer_rotation_rescales_angles_to_exponents() {
        let qubits = QubitId::line(3);
        let description = vec![vec![GivensOp::Rotation {
            i: 0,
            j: 1,
            theta: PI / 4.0,
            phi: PI / 2.0,
        }]];
        let ops: Vec<GateOp> = render_givens_circuit(&qubits, description).collect();
        assert_eq!(
            ops,
            vec![
                GateOp::YxxyPow {
                    i: q(0),
                    j: q(1),
                    exponent: 0.5,
                },
                GateOp::ZPow {
                    qubit: q(1),
                    exponent: 0.5,
                },
            ]
        );
    }

    #[test]
    fn renderer_preserves_layer_and_item_order() {
        let qubits = QubitId::line(5);
        let description = vec![
            vec![
                GivensOp::Rotation {
                    i: 0,
                    j: 1,
                    theta: 0.1,
                    phi: 0.0,
                },
                GivensOp::Rotation {
                    i: 2,
                    j: 3,
                    theta: 0.2,
                    phi: 0.0,
                },
            ],
            vec![GivensOp::ParticleHole],
        ];
        let ops: Vec<GateOp> = render_givens_circuit(&qubits, description).collect();
        assert_eq!(ops.len(), 5);
        assert!(matches!(ops[0], GateOp::YxxyPow { i, .. } if i == q(0)));
        assert!(matches!(ops[2], GateOp::YxxyPow { i, .. } if i == q(2)));
        assert_eq!(ops[4], GateOp::X(q(4)));
    }
}
