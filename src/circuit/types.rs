//! Handle types for the circuit graph.

use std::fmt;

/// A stable handle to a node in a [`Network`](super::Network).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "N{}", self.0)
    }
}

/// A stable handle to a bipole in a [`Network`](super::Network).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BipoleId(pub usize);

impl fmt::Display for BipoleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "B{}", self.0)
    }
}

/// One of the two terminals of a bipole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pin {
    A,
    B,
}

impl Pin {
    /// The opposite terminal.
    pub fn other(self) -> Pin {
        match self {
            Pin::A => Pin::B,
            Pin::B => Pin::A,
        }
    }

    /// Index into a `[NodeId; 2]` pin array.
    pub fn index(self) -> usize {
        match self {
            Pin::A => 0,
            Pin::B => 1,
        }
    }
}

impl fmt::Display for Pin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pin::A => write!(f, "pinA"),
            Pin::B => write!(f, "pinB"),
        }
    }
}

/// Variable index in the MNA solution vector.
/// Either a node voltage or a voltage-source branch current.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VarIndex {
    /// Position of a node in the circuit's node order
    Voltage(usize),
    /// Position of a voltage source in the circuit's source order
    Current(usize),
}

impl VarIndex {
    /// Get the raw index into the solution vector.
    /// Node voltages come first, then voltage-source currents.
    pub fn to_index(&self, num_nodes: usize) -> usize {
        match self {
            VarIndex::Voltage(n) => *n,
            VarIndex::Current(k) => num_nodes + k,
        }
    }
}
