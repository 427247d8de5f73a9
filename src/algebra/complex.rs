//! Complex scalar with rectangular and polar views.
//!
//! A [`Complex`] is built from either coordinate pair and derives the other on
//! demand. Addition and subtraction work on the rectangular pair, while
//! multiplication, division and powers work on the polar pair, so a value
//! keeps whichever representation its last operation produced.
//!
//! Equality is approximate: two values are equal when either their
//! rectangular pairs or their polar pairs agree within [`APPROX_TOLERANCE`].

use std::f64::consts::{PI, TAU};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

use crate::APPROX_TOLERANCE;

/// Internal storage. `Both` is a cache of a value whose second pair has
/// already been derived.
#[derive(Debug, Clone, Copy)]
enum Repr {
    Rectangular {
        re: f64,
        im: f64,
    },
    Polar {
        modulus: f64,
        argument: f64,
    },
    Both {
        re: f64,
        im: f64,
        modulus: f64,
        argument: f64,
    },
}

/// A complex number.
#[derive(Debug, Clone, Copy)]
pub struct Complex {
    repr: Repr,
}

/// Compare two reals within [`APPROX_TOLERANCE`].
fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < APPROX_TOLERANCE
}

/// Wrap an angle into (-π, π].
fn normalize_argument(argument: f64) -> f64 {
    if argument > -PI && argument <= PI {
        return argument;
    }
    let wrapped = (argument + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI {
        PI
    } else {
        wrapped
    }
}

impl Complex {
    /// 0 + 0j
    pub const ZERO: Complex = Complex::new(0.0, 0.0);
    /// 1 + 0j
    pub const ONE: Complex = Complex::new(1.0, 0.0);
    /// The imaginary unit.
    pub const J: Complex = Complex::new(0.0, 1.0);

    /// Create a complex number from rectangular coordinates.
    pub const fn new(re: f64, im: f64) -> Self {
        Self {
            repr: Repr::Rectangular { re, im },
        }
    }

    /// Create a complex number from polar coordinates.
    ///
    /// A negative modulus is folded into a half-turn of the argument, and the
    /// argument is wrapped into (-π, π].
    pub fn from_polar(modulus: f64, argument: f64) -> Self {
        let (modulus, argument) = if modulus < 0.0 {
            (-modulus, argument + PI)
        } else {
            (modulus, argument)
        };
        Self {
            repr: Repr::Polar {
                modulus,
                argument: normalize_argument(argument),
            },
        }
    }

    /// Real part.
    pub fn real(&self) -> f64 {
        match self.repr {
            Repr::Rectangular { re, .. } | Repr::Both { re, .. } => re,
            Repr::Polar { modulus, argument } => modulus * argument.cos(),
        }
    }

    /// Imaginary part.
    pub fn imaginary(&self) -> f64 {
        match self.repr {
            Repr::Rectangular { im, .. } | Repr::Both { im, .. } => im,
            Repr::Polar { modulus, argument } => modulus * argument.sin(),
        }
    }

    /// Modulus (absolute value).
    pub fn modulus(&self) -> f64 {
        match self.repr {
            Repr::Polar { modulus, .. } | Repr::Both { modulus, .. } => modulus,
            Repr::Rectangular { re, im } => (re * re + im * im).sqrt(),
        }
    }

    /// Argument in (-π, π].
    pub fn argument(&self) -> f64 {
        match self.repr {
            Repr::Polar { argument, .. } | Repr::Both { argument, .. } => argument,
            Repr::Rectangular { re, im } => im.atan2(re),
        }
    }

    /// Rectangular pair `(re, im)`.
    pub fn rectangular(&self) -> (f64, f64) {
        (self.real(), self.imaginary())
    }

    /// Polar pair `(modulus, argument)`.
    pub fn polar(&self) -> (f64, f64) {
        (self.modulus(), self.argument())
    }

    /// Return the same value with both representations cached.
    pub fn synced(self) -> Self {
        match self.repr {
            Repr::Both { .. } => self,
            _ => Self {
                repr: Repr::Both {
                    re: self.real(),
                    im: self.imaginary(),
                    modulus: self.modulus(),
                    argument: self.argument(),
                },
            },
        }
    }

    /// Complex conjugate.
    pub fn conj(self) -> Self {
        match self.repr {
            Repr::Rectangular { re, im } => Self::new(re, -im),
            Repr::Polar { modulus, argument } => Self::from_polar(modulus, -argument),
            Repr::Both {
                re,
                im,
                modulus,
                argument,
            } => Self {
                repr: Repr::Both {
                    re,
                    im: -im,
                    modulus,
                    argument: normalize_argument(-argument),
                },
            },
        }
    }

    /// Raise to a real power.
    pub fn powf(self, exponent: f64) -> Self {
        Self::from_polar(self.modulus().powf(exponent), self.argument() * exponent)
    }

    /// Multiplicative inverse.
    pub fn recip(self) -> Self {
        Self::from_polar(1.0 / self.modulus(), -self.argument())
    }

    /// Check that both coordinates are finite.
    pub fn is_finite(&self) -> bool {
        let (re, im) = self.rectangular();
        re.is_finite() && im.is_finite()
    }

    #[cfg(test)]
    fn is_polar(&self) -> bool {
        matches!(self.repr, Repr::Polar { .. })
    }
}

impl Default for Complex {
    fn default() -> Self {
        Self::ZERO
    }
}

impl From<f64> for Complex {
    fn from(value: f64) -> Self {
        Self::new(value, 0.0)
    }
}

/// Build purely imaginary values, e.g. `2.0.j()` is `0 + 2j`.
pub trait ImaginaryUnit {
    fn j(self) -> Complex;
}

impl ImaginaryUnit for f64 {
    fn j(self) -> Complex {
        Complex::new(0.0, self)
    }
}

impl ImaginaryUnit for i32 {
    fn j(self) -> Complex {
        Complex::new(0.0, self as f64)
    }
}

// ============ Rectangular arithmetic ============

impl Add for Complex {
    type Output = Complex;

    fn add(self, rhs: Complex) -> Complex {
        Complex::new(self.real() + rhs.real(), self.imaginary() + rhs.imaginary())
    }
}

impl Add<f64> for Complex {
    type Output = Complex;

    fn add(self, rhs: f64) -> Complex {
        self + Complex::from(rhs)
    }
}

impl Add<Complex> for f64 {
    type Output = Complex;

    fn add(self, rhs: Complex) -> Complex {
        Complex::from(self) + rhs
    }
}

impl AddAssign for Complex {
    fn add_assign(&mut self, rhs: Complex) {
        *self = *self + rhs;
    }
}

impl Neg for Complex {
    type Output = Complex;

    /// Negate without switching representation.
    fn neg(self) -> Complex {
        match self.repr {
            Repr::Rectangular { re, im } => Complex::new(-re, -im),
            Repr::Polar { modulus, argument } => Complex::from_polar(-modulus, argument),
            Repr::Both {
                re,
                im,
                modulus,
                argument,
            } => Complex {
                repr: Repr::Both {
                    re: -re,
                    im: -im,
                    modulus,
                    argument: normalize_argument(argument + PI),
                },
            },
        }
    }
}

impl Sub for Complex {
    type Output = Complex;

    fn sub(self, rhs: Complex) -> Complex {
        self + (-rhs)
    }
}

impl Sub<f64> for Complex {
    type Output = Complex;

    fn sub(self, rhs: f64) -> Complex {
        self + (-rhs)
    }
}

impl Sub<Complex> for f64 {
    type Output = Complex;

    fn sub(self, rhs: Complex) -> Complex {
        self + (-rhs)
    }
}

impl SubAssign for Complex {
    fn sub_assign(&mut self, rhs: Complex) {
        *self = *self - rhs;
    }
}

// ============ Polar arithmetic ============

impl Mul for Complex {
    type Output = Complex;

    fn mul(self, rhs: Complex) -> Complex {
        Complex::from_polar(
            self.modulus() * rhs.modulus(),
            self.argument() + rhs.argument(),
        )
    }
}

impl Mul<f64> for Complex {
    type Output = Complex;

    fn mul(self, rhs: f64) -> Complex {
        Complex::from_polar(self.modulus() * rhs, self.argument())
    }
}

impl Mul<Complex> for f64 {
    type Output = Complex;

    fn mul(self, rhs: Complex) -> Complex {
        rhs * self
    }
}

impl Div for Complex {
    type Output = Complex;

    fn div(self, rhs: Complex) -> Complex {
        Complex::from_polar(
            self.modulus() / rhs.modulus(),
            self.argument() - rhs.argument(),
        )
    }
}

impl Div<f64> for Complex {
    type Output = Complex;

    fn div(self, rhs: f64) -> Complex {
        Complex::from_polar(self.modulus() / rhs, self.argument())
    }
}

impl Div<Complex> for f64 {
    type Output = Complex;

    fn div(self, rhs: Complex) -> Complex {
        Complex::from_polar(self / rhs.modulus(), -rhs.argument())
    }
}

impl Sum for Complex {
    fn sum<I: Iterator<Item = Complex>>(iter: I) -> Complex {
        iter.fold(Complex::ZERO, |acc, c| acc + c)
    }
}

// ============ Comparison ============

impl PartialEq for Complex {
    fn eq(&self, other: &Complex) -> bool {
        (approx_eq(self.real(), other.real()) && approx_eq(self.imaginary(), other.imaginary()))
            || (approx_eq(self.modulus(), other.modulus())
                && approx_eq(self.argument(), other.argument()))
    }
}

impl PartialEq<f64> for Complex {
    fn eq(&self, other: &f64) -> bool {
        *self == Complex::from(*other)
    }
}

impl PartialEq<Complex> for f64 {
    fn eq(&self, other: &Complex) -> bool {
        Complex::from(*self) == *other
    }
}

impl fmt::Display for Complex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (re, im) = self.rectangular();
        let sign = if im >= 0.0 { '+' } else { '-' };
        write!(f, "{:.4}{}{:.4}j", re, sign, im.abs())
    }
}
