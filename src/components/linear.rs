//! Linear passive components: Resistor, Capacitor, Inductor.
//!
//! Each exposes its impedance and admittance at an angular frequency `omega`
//! (rad/s). Admittances are computed directly rather than by inverting the
//! impedance, so a capacitor stays well-defined at DC.

use crate::algebra::{Complex, ImaginaryUnit};
use crate::units::{Admittance, Impedance};

/// An ideal resistor. Frequency-independent.
#[derive(Debug, Clone, PartialEq)]
pub struct Resistor {
    /// Resistance in ohms
    pub resistance: f64,
}

impl Resistor {
    /// Create a new resistor.
    pub fn new(resistance: f64) -> Self {
        Self { resistance }
    }

    /// Z = R
    pub fn impedance(&self, _omega: f64) -> Impedance {
        Impedance(Complex::from(self.resistance))
    }

    /// Y = 1/R
    pub fn admittance(&self, _omega: f64) -> Admittance {
        Admittance(Complex::from(1.0 / self.resistance))
    }
}

/// An ideal capacitor.
#[derive(Debug, Clone, PartialEq)]
pub struct Capacitor {
    /// Capacitance in farads
    pub capacitance: f64,
}

impl Capacitor {
    /// Create a new capacitor.
    pub fn new(capacitance: f64) -> Self {
        Self { capacitance }
    }

    /// Z = 1/(jωC)
    pub fn impedance(&self, omega: f64) -> Impedance {
        Impedance(1.0 / (omega * self.capacitance).j())
    }

    /// Y = jωC
    pub fn admittance(&self, omega: f64) -> Admittance {
        Admittance((omega * self.capacitance).j())
    }
}

/// An ideal inductor.
#[derive(Debug, Clone, PartialEq)]
pub struct Inductor {
    /// Inductance in henries
    pub inductance: f64,
}

impl Inductor {
    /// Create a new inductor.
    pub fn new(inductance: f64) -> Self {
        Self { inductance }
    }

    /// Z = jωL
    pub fn impedance(&self, omega: f64) -> Impedance {
        Impedance((omega * self.inductance).j())
    }

    /// Y = 1/(jωL). Infinite at DC.
    pub fn admittance(&self, omega: f64) -> Admittance {
        Admittance(1.0 / (omega * self.inductance).j())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::hertz;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_resistor_conductance() {
        let r = Resistor::new(1000.0);
        assert_abs_diff_eq!(r.admittance(0.0).0.real(), 0.001, epsilon = 1e-15);
        assert_eq!(r.impedance(hertz(1e6)), Impedance(Complex::from(1000.0)));
    }

    #[test]
    fn test_capacitor_impedance() {
        let omega = hertz(37.0);
        let c = Capacitor::new(42e-6);
        let expected = 1.0 / (1.0.j() * omega * 42e-6);
        assert_eq!(c.impedance(omega).0, expected);
        assert_abs_diff_eq!(c.impedance(omega).0.argument(), -std::f64::consts::FRAC_PI_2);
        assert_eq!(c.admittance(omega).to_impedance(), c.impedance(omega));
    }

    #[test]
    fn test_capacitor_open_at_dc() {
        let c = Capacitor::new(1e-6);
        assert_eq!(c.admittance(0.0).0, Complex::ZERO);
        assert!(!c.impedance(0.0).0.is_finite());
    }

    #[test]
    fn test_inductor_impedance() {
        let omega = hertz(50.0);
        let l = Inductor::new(0.1);
        assert_abs_diff_eq!(l.impedance(omega).0.imaginary(), omega * 0.1, epsilon = 1e-12);
        assert!(!l.admittance(0.0).0.is_finite());
    }
}
