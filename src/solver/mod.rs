//! MNA (Modified Nodal Analysis) solver.
//!
//! This module provides the numerical engine for single-frequency AC
//! analysis.
//!
//! ## Modified Nodal Analysis
//!
//! MNA assembles a complex system of equations Ax = z where:
//! - x contains node voltages and voltage-source branch currents
//! - A is the admittance/coefficient matrix
//! - z is the source vector
//!
//! The matrix structure is:
//! ```text
//! [ G   B ] [ v ]   [ i ]
//! [ C   D ] [ j ] = [ e ]
//! ```
//!
//! where:
//! - G is the admittance matrix (node equations)
//! - B, C connect voltage sources to nodes (C is the transpose of B)
//! - D is absent (ideal independent voltage sources only)
//! - v is the vector of node voltage phasors
//! - j is the vector of voltage source currents
//! - i is the sum of current sources into each node
//! - e is the vector of voltage source phasors
//!
//! ## Real embedding
//!
//! The complex system is handed to a real [`LinearSolver`] as the doubled
//! system `[[Re(A), -Im(A)], [Im(A), Re(A)]] [Re(x); Im(x)] = [Re(z); Im(z)]`.

mod ac;
mod linear;
mod mna;

pub use ac::{AcSolution, AcSolver, SolverConfig};
pub use linear::{DenseLu, LinearSolver};
pub use mna::{build_a, build_b, build_c, build_d, build_g, build_z, MnaSystem};
