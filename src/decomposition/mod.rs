//! Givens-rotation circuit descriptions
//!
//! A decomposition routine reduces a matrix to canonical form with a sequence
//! of plane (Givens) rotations on adjacent mode pairs, and reports that
//! sequence as a *circuit description*: ordered layers, each layer an ordered
//! list of items. An item is either a rotation with its mode pair and angles,
//! or the particle-hole marker for the last mode. Layer order is temporal;
//! items within one layer act on disjoint mode pairs, so their relative order
//! carries no meaning.
//!
//! The rotation convention used throughout is the unitary
//!
//! ```text
//! G(θ, φ) = | cos θ             -sin θ        |
//!           | e^{-iφ} sin θ      e^{-iφ} cos θ |
//! ```
//!
//! applied to a pair of adjacent columns from the right. Helpers below solve
//! for the angles that eliminate one member of a column pair and apply the
//! resulting rotation in place.
//!
//! The conjugate of `G(θ, φ)` is exactly the single-particle action of the
//! rendered gate pair (the excitation exchange followed by the phase gate on
//! mode `j`), so a description replayed in reverse through the renderer
//! undoes the elimination.

mod gaussian;
mod givens;

pub use gaussian::{fermionic_gaussian_decomposition, FermionicGaussianDecomposition};
pub use givens::{givens_decomposition_square, slater_determinant_preparation_circuit};

use ndarray::{ArrayView2, ArrayViewMut2};
use num_complex::Complex64;

/// Entries below this magnitude are treated as already eliminated.
pub(crate) const EPSILON: f64 = 1e-12;

/// Tolerance for orthonormality and anticommutation checks on inputs.
pub(crate) const CONSTRAINT_TOLERANCE: f64 = 1e-8;

/// One item of a circuit description.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GivensOp {
    /// Particle-hole transformation on the last mode.
    ParticleHole,

    /// Givens rotation of modes `i` and `j` by angle `theta`, followed by a
    /// phase of `phi` on mode `j`.
    Rotation {
        i: usize,
        j: usize,
        theta: f64,
        phi: f64,
    },
}

/// One layer of operations acting on disjoint mode pairs.
pub type Layer = Vec<GivensOp>;

/// Ordered layers of elementary operations.
pub type CircuitDescription = Vec<Layer>;

/// Angles `(theta, phi)` such that rotating a column pair holding `(a, b)`
/// sends it to `(r, 0)` with `|r|^2 = |a|^2 + |b|^2`.
pub(crate) fn angles_to_zero_second(a: Complex64, b: Complex64) -> (f64, f64) {
    if b.norm() < EPSILON {
        return (0.0, 0.0);
    }
    let theta = b.norm().atan2(a.norm());
    let phi = (b * a.conj()).arg();
    (theta, phi)
}

/// Angles `(theta, phi)` such that rotating a column pair holding `(a, b)`
/// sends it to `(0, r)`.
pub(crate) fn angles_to_zero_first(a: Complex64, b: Complex64) -> (f64, f64) {
    if a.norm() < EPSILON {
        return (0.0, 0.0);
    }
    let theta = a.norm().atan2(b.norm());
    let phi = -(-a * b.conj()).arg();
    (theta, phi)
}

/// Apply `G(theta, phi)` to columns `i` and `j` of `matrix`, in place.
pub(crate) fn rotate_columns(
    mut matrix: ArrayViewMut2<'_, Complex64>,
    i: usize,
    j: usize,
    theta: f64,
    phi: f64,
) {
    let cos = Complex64::new(theta.cos(), 0.0);
    let sin = Complex64::new(theta.sin(), 0.0);
    let phase = Complex64::from_polar(1.0, -phi);
    for row in 0..matrix.nrows() {
        let a = matrix[[row, i]];
        let b = matrix[[row, j]];
        matrix[[row, i]] = cos * a + phase * sin * b;
        matrix[[row, j]] = -sin * a + phase * cos * b;
    }
}

/// Max deviation of `M M^dagger` from the identity.
pub(crate) fn orthonormality_deviation(matrix: ArrayView2<'_, Complex64>) -> f64 {
    let rows = matrix.nrows();
    let mut worst = 0.0_f64;
    for p in 0..rows {
        for q in 0..rows {
            let mut acc = Complex64::new(0.0, 0.0);
            for k in 0..matrix.ncols() {
                acc += matrix[[p, k]] * matrix[[q, k]].conj();
            }
            let expected = if p == q { 1.0 } else { 0.0 };
            worst = worst.max((acc - expected).norm());
        }
    }
    worst
}
