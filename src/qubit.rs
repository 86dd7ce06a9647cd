//! Qubit addressing for linear registers

use std::fmt;

/// Handle for a qubit on a linear array.
///
/// The crate never creates or destroys qubits; callers supply an ordered
/// slice of handles and every emitted gate refers to entries of that slice.
/// The wrapper exists so that mode indices and qubit handles cannot be
/// confused at compile time.
///
/// # Example
/// ```
/// use fermiprep::QubitId;
///
/// let q2 = QubitId::new(2);
/// assert_eq!(q2.index(), 2);
/// assert!(QubitId::new(0) < q2);
/// ```
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QubitId(usize);

impl QubitId {
    /// Create a handle for the qubit at position `index`.
    #[inline]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Position of this qubit on the line.
    #[inline]
    pub const fn index(&self) -> usize {
        self.0
    }

    /// The linear register `q0, q1, ..., q(n-1)`.
    ///
    /// This is the register layout assumed by the Jordan-Wigner encoding:
    /// mode `i` lives on the `i`-th qubit of the line.
    ///
    /// # Example
    /// ```
    /// use fermiprep::QubitId;
    ///
    /// let qubits = QubitId::line(3);
    /// assert_eq!(qubits, vec![QubitId::new(0), QubitId::new(1), QubitId::new(2)]);
    /// ```
    pub fn line(n: usize) -> Vec<QubitId> {
        (0..n).map(QubitId::new).collect()
    }
}

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

impl From<usize> for QubitId {
    #[inline]
    fn from(index: usize) -> Self {
        Self::new(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_follows_position() {
        assert!(QubitId::new(0) < QubitId::new(1));
        assert!(QubitId::new(7) > QubitId::new(3));
    }

    #[test]
    fn display_format() {
        assert_eq!(format!("{}", QubitId::new(5)), "q5");
    }

    #[test]
    fn line_is_ascending() {
        let qubits = QubitId::line(4);
        assert_eq!(qubits.len(), 4);
        for (i, q) in qubits.iter().enumerate() {
            assert_eq!(q.index(), i);
        }
    }
}
