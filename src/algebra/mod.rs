//! Numeric building blocks: complex scalars and sparse block matrices.

mod complex;
mod hermitian;
mod matrix;

pub use complex::{Complex, ImaginaryUnit};
pub use hermitian::complex_from_doubled;
pub use matrix::Matrix;
