//! Ideal voltage and current sources.
//!
//! Both store their value oriented so that pin A is the positive terminal:
//! a source declared with pin B positive is stored with its value negated.

use crate::circuit::Pin;
use crate::units::{Current, Voltage};

/// An ideal voltage source.
///
/// Voltage sources require an extra row/column in the MNA matrix for the
/// branch current. The source enforces: V[pinA] - V[pinB] = voltage
#[derive(Debug, Clone, PartialEq)]
pub struct VoltageSource {
    /// Fixed voltage, positive at pin A
    pub voltage: Voltage,
}

impl VoltageSource {
    /// Create a new voltage source with `positive` as its positive terminal.
    pub fn new(voltage: Voltage, positive: Pin) -> Self {
        let voltage = match positive {
            Pin::A => voltage,
            Pin::B => -voltage,
        };
        Self { voltage }
    }

    /// Angular frequency of the source.
    pub fn omega(&self) -> f64 {
        self.voltage.omega
    }
}

/// An ideal current source.
///
/// The fixed current leaves the source through pin A into the attached node
/// and returns through pin B. Current sources add directly to the RHS vector
/// of the MNA equations.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentSource {
    /// Fixed current, delivered out of pin A
    pub current: Current,
}

impl CurrentSource {
    /// Create a new current source with `positive` as its positive terminal.
    pub fn new(current: Current, positive: Pin) -> Self {
        let current = match positive {
            Pin::A => current,
            Pin::B => -current,
        };
        Self { current }
    }

    /// Angular frequency of the source.
    pub fn omega(&self) -> f64 {
        self.current.omega
    }
}
