//! Gate operations emitted by the circuit generators
//!
//! The generators in this crate only ever emit three kinds of gates, so the
//! operation type is a closed enum rather than a trait object: population
//! flips (Pauli-X), the two-mode excitation-exchange interaction raised to a
//! fractional power (the YXXY gate), and fractional powers of Pauli-Z.
//!
//! Exponent conventions follow the fractional-power form: for YXXY an
//! exponent of 1 rotates the span of |01⟩ and |10⟩ by π/2, and for Z an
//! exponent of 1 is a full Pauli-Z.

use crate::QubitId;
use num_complex::Complex64;
use smallvec::{smallvec, SmallVec};
use std::f64::consts::PI;
use std::fmt;

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);

/// A single gate applied to concrete qubits.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GateOp {
    /// Pauli-X (bit flip) on one qubit.
    X(QubitId),

    /// Two-qubit excitation-exchange interaction, `YXXY^exponent`.
    ///
    /// `YXXY^t = exp(i π t (Y⊗X - X⊗Y) / 4)`: identity on |00⟩ and |11⟩,
    /// and a rotation of the {|01⟩, |10⟩} subspace by `exponent · π/2`
    /// sending |10⟩ towards |01⟩.
    YxxyPow {
        i: QubitId,
        j: QubitId,
        exponent: f64,
    },

    /// Single-qubit phase gate, `Z^exponent`.
    ZPow { qubit: QubitId, exponent: f64 },
}

impl GateOp {
    /// Gate name, without parameters.
    pub fn name(&self) -> &'static str {
        match self {
            GateOp::X(_) => "X",
            GateOp::YxxyPow { .. } => "YXXY",
            GateOp::ZPow { .. } => "Z",
        }
    }

    /// Qubits this operation acts on, in gate order.
    pub fn qubits(&self) -> SmallVec<[QubitId; 2]> {
        match *self {
            GateOp::X(q) => smallvec![q],
            GateOp::YxxyPow { i, j, .. } => smallvec![i, j],
            GateOp::ZPow { qubit, .. } => smallvec![qubit],
        }
    }

    /// Unitary matrix of the operation, row major.
    ///
    /// 2x2 for single-qubit gates and 4x4 for the two-qubit interaction,
    /// in the computational basis ordered |00⟩, |01⟩, |10⟩, |11⟩ with the
    /// first listed qubit as the more significant one.
    pub fn matrix(&self) -> Vec<Complex64> {
        match *self {
            GateOp::X(_) => vec![ZERO, ONE, ONE, ZERO],
            GateOp::ZPow { exponent, .. } => {
                let phase = Complex64::from_polar(1.0, PI * exponent);
                vec![ONE, ZERO, ZERO, phase]
            }
            GateOp::YxxyPow { exponent, .. } => {
                // Rotation by exponent * pi/2 in the {|01>, |10>} subspace,
                // sending |10> to cos|10> + sin|01>.
                let half_turns = exponent * PI / 2.0;
                let c = Complex64::new(half_turns.cos(), 0.0);
                let s = Complex64::new(half_turns.sin(), 0.0);
                vec![
                    ONE, ZERO, ZERO, ZERO, //
                    ZERO, c, s, ZERO, //
                    ZERO, -s, c, ZERO, //
                    ZERO, ZERO, ZERO, ONE,
                ]
            }
        }
    }
}

impl fmt::Display for GateOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            GateOp::X(q) => write!(f, "X({q})"),
            GateOp::YxxyPow { i, j, exponent } => {
                write!(f, "YXXY^{exponent:.4}({i}, {j})")
            }
            GateOp::ZPow { qubit, exponent } => write!(f, "Z^{exponent:.4}({qubit})"),
        }
    }
}
