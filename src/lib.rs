//! # Phasor Core
//!
//! A steady-state AC circuit solver for linear networks.
//!
//! This library provides:
//! - Complex phasor arithmetic with rectangular and polar representations
//! - Sparse block matrices with a real embedding for complex systems
//! - An arena-based circuit graph with ground merging
//! - Modified Nodal Analysis (MNA) for resistors, capacitors, inductors and
//!   ideal independent sources at a single frequency
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`algebra`] - Complex scalars and sparse block matrices
//! - [`units`] - Frequency-tagged voltages and currents, impedances
//! - [`components`] - Component models (resistors, capacitors, sources, etc.)
//! - [`circuit`] - Circuit graph, discovery and validation
//! - [`solver`] - MNA assembly and the AC solve
//!
//! ## Usage
//!
//! ```
//! use phasor_core::circuit::{Circuit, Network, Pin};
//! use phasor_core::components::Component;
//! use phasor_core::units::Voltage;
//! use phasor_core::AcSolver;
//!
//! let mut net = Network::new();
//! let a = net.add_node("A");
//! let b = net.add_node("B");
//! let gnd = net.add_ground();
//! net.add(Component::voltage_source(Voltage::from_peak(50.0, 0.0, 0.0), Pin::A), a, gnd)?;
//! net.add(Component::resistor(10.0), a, b)?;
//! net.add(Component::resistor(10.0), b, gnd)?;
//!
//! let mut circuit = Circuit::auto_discover(net, a)?;
//! AcSolver::new().solve(&mut circuit)?;
//!
//! let vb = circuit.node_voltage(b)?.unwrap();
//! assert!((vb.peak() - 25.0).abs() < 1e-9);
//! # Ok::<(), phasor_core::PhasorError>(())
//! ```
//!
//! ## Logging
//!
//! Discovery and solving emit `tracing` events. The library never installs
//! a subscriber.

pub mod algebra;
pub mod circuit;
pub mod components;
pub mod error;
pub mod solver;
pub mod units;

// Re-export main types for convenience
pub use algebra::{Complex, ImaginaryUnit, Matrix};
pub use circuit::{Circuit, Network};
pub use error::{PhasorError, Result};
pub use solver::{AcSolver, SolverConfig};

/// Tolerance for approximate equality of complex values
pub const APPROX_TOLERANCE: f64 = 1e-11;
