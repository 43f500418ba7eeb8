//! Cartesian complex numbers.

use crate::error::IdentError;

/// A complex number in Cartesian form.
///
/// Operations produce new values rather than mutating in place.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Complex {
    pub re: f64,
    pub im: f64,
}

impl Complex {
    pub const ZERO: Complex = Complex { re: 0.0, im: 0.0 };
    pub const ONE: Complex = Complex { re: 1.0, im: 0.0 };

    pub fn new(re: f64, im: f64) -> Self {
        Complex { re, im }
    }

    /// Builds `r * (cos theta + j sin theta)`.
    pub fn polar(r: f64, theta: f64) -> Self {
        Complex::new(r * theta.cos(), r * theta.sin())
    }

    pub fn abs(&self) -> f64 {
        self.re.hypot(self.im)
    }

    /// Argument in `(-pi, pi]`.
    pub fn arg(&self) -> f64 {
        self.im.atan2(self.re)
    }

    pub fn add(&self, other: &Complex) -> Complex {
        Complex::new(self.re + other.re, self.im + other.im)
    }

    pub fn sub(&self, other: &Complex) -> Complex {
        Complex::new(self.re - other.re, self.im - other.im)
    }

    pub fn mul(&self, other: &Complex) -> Complex {
        Complex::new(
            self.re * other.re - self.im * other.im,
            self.re * other.im + self.im * other.re,
        )
    }

    pub fn scale(&self, k: f64) -> Complex {
        Complex::new(self.re * k, self.im * k)
    }

    pub fn div(&self, other: &Complex) -> Result<Complex, IdentError> {
        let denom = other.re * other.re + other.im * other.im;
        if denom == 0.0 {
            return Err(IdentError::NumericDomain(
                "division by zero complex number".to_string(),
            ));
        }
        Ok(Complex::new(
            (self.re * other.re + self.im * other.im) / denom,
            (self.im * other.re - self.re * other.im) / denom,
        ))
    }
}
