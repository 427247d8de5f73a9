//! Component models for AC circuit analysis.
//!
//! This module provides models for all supported two-terminal components:
//! - Linear: Resistor, Capacitor, Inductor
//! - Sources: Voltage Source, Current Source
//!
//! Passive components expose a frequency-dependent impedance and are stamped
//! into the conductance block of the MNA matrix. Sources expose a fixed value
//! independent of the solution and drive the right-hand side.

mod linear;
mod sources;

pub use linear::{Capacitor, Inductor, Resistor};
pub use sources::{CurrentSource, VoltageSource};

use crate::circuit::Pin;
use crate::error::{PhasorError, Result};
use crate::units::{Admittance, Current, Impedance, Voltage};

/// A circuit component.
#[derive(Debug, Clone, PartialEq)]
pub enum Component {
    Resistor(Resistor),
    Capacitor(Capacitor),
    Inductor(Inductor),
    VoltageSource(VoltageSource),
    CurrentSource(CurrentSource),
}

impl Component {
    /// A resistor of `ohms`.
    pub fn resistor(ohms: f64) -> Self {
        Component::Resistor(Resistor::new(ohms))
    }

    /// A capacitor of `farads`.
    pub fn capacitor(farads: f64) -> Self {
        Component::Capacitor(Capacitor::new(farads))
    }

    /// An inductor of `henries`.
    pub fn inductor(henries: f64) -> Self {
        Component::Inductor(Inductor::new(henries))
    }

    /// An ideal voltage source with `positive` as its positive terminal.
    pub fn voltage_source(voltage: Voltage, positive: Pin) -> Self {
        Component::VoltageSource(VoltageSource::new(voltage, positive))
    }

    /// An ideal current source with `positive` as its positive terminal.
    pub fn current_source(current: Current, positive: Pin) -> Self {
        Component::CurrentSource(CurrentSource::new(current, positive))
    }

    /// Check that the component parameters are physically meaningful.
    pub fn validate(&self) -> Result<()> {
        let positive = |param: &'static str, value: f64| {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(PhasorError::invalid_parameter(
                    param,
                    value,
                    "must be finite and greater than zero",
                ))
            }
        };
        let source = |omega: f64, finite: bool| {
            if !omega.is_finite() || omega < 0.0 {
                Err(PhasorError::invalid_parameter(
                    "omega",
                    omega,
                    "must be finite and non-negative",
                ))
            } else if !finite {
                Err(PhasorError::invalid_parameter(
                    "amplitude",
                    f64::NAN,
                    "source value must be finite",
                ))
            } else {
                Ok(())
            }
        };

        match self {
            Component::Resistor(r) => positive("resistance", r.resistance),
            Component::Capacitor(c) => positive("capacitance", c.capacitance),
            Component::Inductor(l) => positive("inductance", l.inductance),
            Component::VoltageSource(v) => source(v.omega(), v.voltage.value.is_finite()),
            Component::CurrentSource(i) => source(i.omega(), i.current.value.is_finite()),
        }
    }

    /// Impedance at `omega`, for components that have one.
    pub fn impedance(&self, omega: f64) -> Option<Impedance> {
        match self {
            Component::Resistor(r) => Some(r.impedance(omega)),
            Component::Capacitor(c) => Some(c.impedance(omega)),
            Component::Inductor(l) => Some(l.impedance(omega)),
            Component::VoltageSource(_) | Component::CurrentSource(_) => None,
        }
    }

    /// Admittance at `omega`, for components that have one.
    pub fn admittance(&self, omega: f64) -> Option<Admittance> {
        match self {
            Component::Resistor(r) => Some(r.admittance(omega)),
            Component::Capacitor(c) => Some(c.admittance(omega)),
            Component::Inductor(l) => Some(l.admittance(omega)),
            Component::VoltageSource(_) | Component::CurrentSource(_) => None,
        }
    }

    /// Angular frequency of an independent source.
    pub fn source_omega(&self) -> Option<f64> {
        match self {
            Component::VoltageSource(v) => Some(v.omega()),
            Component::CurrentSource(i) => Some(i.omega()),
            _ => None,
        }
    }

    /// Check if this component is an independent source.
    pub fn is_source(&self) -> bool {
        self.source_omega().is_some()
    }

    /// Short type name, used in logs and CLI output.
    pub fn kind(&self) -> &'static str {
        match self {
            Component::Resistor(_) => "resistor",
            Component::Capacitor(_) => "capacitor",
            Component::Inductor(_) => "inductor",
            Component::VoltageSource(_) => "voltage source",
            Component::CurrentSource(_) => "current source",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate() {
        assert!(Component::resistor(10.0).validate().is_ok());
        assert!(matches!(
            Component::capacitor(0.0).validate(),
            Err(PhasorError::InvalidParameter {
                param: "capacitance",
                ..
            })
        ));
        assert!(Component::inductor(f64::INFINITY).validate().is_err());
        assert!(Component::voltage_source(Voltage::from_peak(1.0, 0.0, -1.0), Pin::A)
            .validate()
            .is_err());
        assert!(Component::current_source(Current::from_peak(1.0, 0.0, 0.0), Pin::A)
            .validate()
            .is_ok());
    }

    #[test]
    fn test_capabilities() {
        let r = Component::resistor(50.0);
        assert!(r.impedance(1.0).is_some());
        assert!(!r.is_source());

        let v = Component::voltage_source(Voltage::from_peak(1.0, 0.0, 3.0), Pin::A);
        assert!(v.impedance(3.0).is_none());
        assert_eq!(v.source_omega(), Some(3.0));
        assert_eq!(v.kind(), "voltage source");
    }
}
