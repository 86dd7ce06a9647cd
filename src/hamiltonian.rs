//! Quadratic Hamiltonians as circuit-description sources

use crate::decomposition::CircuitDescription;

/// A Hamiltonian that is quadratic in the fermionic ladder operators.
///
/// The crate treats Hamiltonians as opaque: all it needs is the
/// diagonalizing circuit description for a chosen set of occupied
/// pseudoparticle orbitals, which the Hamiltonian type supplies through this
/// trait. Orbital indices are given in ascending order of energy; `None`
/// selects every negative-energy orbital, i.e. the ground state.
pub trait QuadraticHamiltonian {
    /// Circuit description of the eigenstate-preparation circuit, together
    /// with the list of modes that must be flipped to one before it runs.
    ///
    /// The returned layers are expected in gate-application order.
    fn preparation_circuit(
        &self,
        occupied_orbitals: Option<&[usize]>,
    ) -> (CircuitDescription, Vec<usize>);
}
