//! Frequency-tagged phasor quantities.
//!
//! A [`Voltage`] or [`Current`] is a complex amplitude (peak value and phase)
//! together with the angular frequency it oscillates at. [`Impedance`] and
//! [`Admittance`] are plain complex quantities evaluated at some frequency.
//!
//! Angular frequencies are always in rad/s; use [`hertz`] to convert.

use std::f64::consts::{PI, SQRT_2};
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

use crate::algebra::Complex;

/// Angular frequency (rad/s) of a signal at `frequency` Hz.
pub fn hertz(frequency: f64) -> f64 {
    2.0 * PI * frequency
}

macro_rules! impl_phasor {
    ($type:ident, $symbol:literal) => {
        impl $type {
            /// Create a phasor from its complex amplitude.
            pub fn new(omega: f64, value: Complex) -> Self {
                Self { omega, value }
            }

            /// Create a phasor from its peak amplitude and phase (radians).
            pub fn from_peak(peak: f64, phase: f64, omega: f64) -> Self {
                Self::new(omega, Complex::from_polar(peak, phase))
            }

            /// Create a phasor from its RMS amplitude and phase (radians).
            pub fn from_rms(rms: f64, phase: f64, omega: f64) -> Self {
                Self::from_peak(rms * SQRT_2, phase, omega)
            }

            /// A zero-amplitude phasor at `omega`.
            pub fn zero(omega: f64) -> Self {
                Self::new(omega, Complex::ZERO)
            }

            /// Peak amplitude.
            pub fn peak(&self) -> f64 {
                self.value.modulus()
            }

            /// RMS amplitude.
            pub fn rms(&self) -> f64 {
                self.value.modulus() / SQRT_2
            }

            /// Phase in radians.
            pub fn phase(&self) -> f64 {
                self.value.argument()
            }

            /// Frequency in Hz.
            pub fn hertz(&self) -> f64 {
                self.omega / (2.0 * PI)
            }
        }

        impl Add for $type {
            type Output = $type;

            fn add(self, rhs: $type) -> $type {
                $type::new(self.omega, self.value + rhs.value)
            }
        }

        impl Sub for $type {
            type Output = $type;

            fn sub(self, rhs: $type) -> $type {
                $type::new(self.omega, self.value - rhs.value)
            }
        }

        impl Neg for $type {
            type Output = $type;

            fn neg(self) -> $type {
                $type::new(self.omega, -self.value)
            }
        }

        impl PartialEq for $type {
            fn eq(&self, other: &$type) -> bool {
                self.omega == other.omega && self.value == other.value
            }
        }

        impl fmt::Display for $type {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(
                    f,
                    "{:.4} {} peak @ {:.4} Hz with {:.4}° phase",
                    self.peak(),
                    $symbol,
                    self.hertz(),
                    self.phase().to_degrees()
                )
            }
        }
    };
}

/// A sinusoidal voltage.
#[derive(Debug, Clone, Copy)]
pub struct Voltage {
    /// Angular frequency (rad/s)
    pub omega: f64,
    /// Complex peak amplitude (V)
    pub value: Complex,
}

/// A sinusoidal current.
#[derive(Debug, Clone, Copy)]
pub struct Current {
    /// Angular frequency (rad/s)
    pub omega: f64,
    /// Complex peak amplitude (A)
    pub value: Complex,
}

impl_phasor!(Voltage, "V");
impl_phasor!(Current, "A");

/// Complex impedance (Ω) at some frequency.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Impedance(pub Complex);

/// Complex admittance (S) at some frequency.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Admittance(pub Complex);

impl Impedance {
    /// Convert to the equivalent admittance.
    pub fn to_admittance(self) -> Admittance {
        Admittance(self.0.recip())
    }

    /// Total impedance of elements in series.
    pub fn series<I: IntoIterator<Item = Impedance>>(items: I) -> Impedance {
        Impedance(items.into_iter().map(|z| z.0).sum())
    }

    /// Total impedance of elements in parallel.
    pub fn parallel<I: IntoIterator<Item = Impedance>>(items: I) -> Impedance {
        Admittance::parallel(items.into_iter().map(Impedance::to_admittance)).to_impedance()
    }
}

impl Admittance {
    /// Convert to the equivalent impedance.
    pub fn to_impedance(self) -> Impedance {
        Impedance(self.0.recip())
    }

    /// Total admittance of elements in parallel.
    pub fn parallel<I: IntoIterator<Item = Admittance>>(items: I) -> Admittance {
        Admittance(items.into_iter().map(|y| y.0).sum())
    }
}

impl fmt::Display for Impedance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}Ω", self.0)
    }
}

impl fmt::Display for Admittance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}S", self.0)
    }
}

// I = V / Z
impl Div<Impedance> for Voltage {
    type Output = Current;

    fn div(self, rhs: Impedance) -> Current {
        Current::new(self.omega, self.value / rhs.0)
    }
}

// V = I * Z
impl Mul<Impedance> for Current {
    type Output = Voltage;

    fn mul(self, rhs: Impedance) -> Voltage {
        Voltage::new(self.omega, self.value * rhs.0)
    }
}

// I = V * Y
impl Mul<Admittance> for Voltage {
    type Output = Current;

    fn mul(self, rhs: Admittance) -> Current {
        Current::new(self.omega, self.value * rhs.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_rms_and_peak() {
        let v = Voltage::from_rms(12.0, 0.0, hertz(15_000.0));
        assert_abs_diff_eq!(v.peak(), 12.0 * SQRT_2, epsilon = 1e-12);
        assert_abs_diff_eq!(v.rms(), 12.0, epsilon = 1e-12);
        assert_abs_diff_eq!(v.hertz(), 15_000.0, epsilon = 1e-9);
    }

    #[test]
    fn test_ohms_law() {
        let omega = hertz(50.0);
        let v = Voltage::from_peak(10.0, 0.5, omega);
        let z = Impedance(Complex::new(3.0, 4.0));
        let i = v / z;
        assert_abs_diff_eq!(i.peak(), 2.0, epsilon = 1e-12);
        assert_eq!(i * z, v);
        assert_eq!(v * z.to_admittance(), i);
    }

    #[test]
    fn test_series_and_parallel() {
        let r = Impedance(Complex::from(100.0));
        assert_eq!(Impedance::series([r, r]), Impedance(Complex::from(200.0)));
        assert_eq!(Impedance::parallel([r, r]), Impedance(Complex::from(50.0)));
    }

    #[test]
    fn test_difference_keeps_frequency() {
        let omega = hertz(1_000.0);
        let a = Voltage::new(omega, Complex::new(5.0, 1.0));
        let b = Voltage::new(omega, Complex::new(2.0, -1.0));
        let d = a - b;
        assert_eq!(d.omega, omega);
        assert_eq!(d.value, Complex::new(3.0, 2.0));
        assert_eq!(-d + d, Voltage::zero(omega));
    }
}
