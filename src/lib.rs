//! Circuits that prepare fermionic Gaussian states on a line of qubits
//!
//! This crate turns linear-algebraic descriptions of fermionic basis
//! changes into concrete gate sequences under the Jordan-Wigner encoding:
//!
//! - [`bogoliubov_transform`]: basis change for an `N x N`
//!   (particle-number-conserving) or `N x 2N` (general Bogoliubov)
//!   transformation matrix.
//! - [`prepare_gaussian_state`]: eigenstate of a [`QuadraticHamiltonian`].
//! - [`prepare_slater_determinant`]: state of an orthonormal-row matrix.
//!
//! Each entry produces a lazy, finite iterator of [`GateOp`] values built
//! from just three gate kinds: Pauli-X population flips, two-mode
//! excitation-exchange rotations, and single-qubit phase gates. The
//! underlying Givens-rotation decompositions live in [`decomposition`] and
//! follow arXiv:1711.05395.
//!
//! # Example
//! ```
//! use fermiprep::{bogoliubov_transform, QubitId};
//! use ndarray::Array2;
//! use num_complex::Complex64;
//!
//! let qubits = QubitId::line(3);
//! let w = Array2::<Complex64>::eye(3);
//! let circuit: Vec<_> = bogoliubov_transform(&qubits, w.view(), None)
//!     .unwrap()
//!     .collect();
//! assert!(circuit.is_empty());
//! ```

pub mod decomposition;
pub mod error;
pub mod gate;
pub mod hamiltonian;
pub mod qubit;
pub mod state_preparation;

// Re-exports for convenience
pub use decomposition::{CircuitDescription, GivensOp, Layer};
pub use error::CircuitError;
pub use gate::GateOp;
pub use hamiltonian::QuadraticHamiltonian;
pub use num_complex::Complex64;
pub use qubit::QubitId;
pub use state_preparation::{
    bogoliubov_transform, prepare_gaussian_state, prepare_slater_determinant,
    render_givens_circuit,
};

/// Type alias for results in this crate
pub type Result<T> = std::result::Result<T, CircuitError>;
