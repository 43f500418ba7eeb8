//! A single measured frequency-response sample and its pointwise transforms.

use crate::complex::Complex;
use crate::error::IdentError;
use crate::transfer_function::TransferFunction;

const TWO_PI: f64 = std::f64::consts::TAU;

/// One measured point: frequency in hertz, gain in decibels, phase in
/// degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FreqResponse {
    pub f: f64,
    pub g: f64,
    pub p: f64,
}

impl FreqResponse {
    pub fn new(f: f64, g: f64, p: f64) -> Self {
        FreqResponse { f, g, p }
    }

    /// Converts to complex gain and angular frequency:
    /// `c = 10^(g/20) * (cos p + j sin p)`, `omega = 2*pi*f`.
    pub fn to_complex(&self) -> (Complex, f64) {
        let mag = 10f64.powf(self.g / 20.0);
        let theta = self.p.to_radians();
        (Complex::polar(mag, theta), TWO_PI * self.f)
    }

    /// Inverse of [`FreqResponse::to_complex`]: `f = omega/2pi`,
    /// `g = 20 log10 |c|`, `p = arg(c)` in degrees.
    pub fn from_complex(c: Complex, omega: f64) -> Self {
        FreqResponse {
            f: omega / TWO_PI,
            g: 20.0 * c.abs().log10(),
            p: c.arg().to_degrees(),
        }
    }

    /// Cascades this sample through an existing transfer function:
    /// `G_out = tf(j*omega) * G_in`, `omega` unchanged.
    pub fn connect_with_tf(&self, tf: &TransferFunction) -> Result<FreqResponse, IdentError> {
        let (g_in, omega) = self.to_complex();
        let cg = tf.freq_res(omega)?;
        Ok(FreqResponse::from_complex(cg.mul(&g_in), omega))
    }

    /// `G_out = G_in / (1 + G_in)`.
    pub fn open_to_closed(&self) -> Result<FreqResponse, IdentError> {
        let (g_in, omega) = self.to_complex();
        let denom = Complex::new(1.0 + g_in.re, g_in.im);
        let g_out = g_in.div(&denom).map_err(|_| {
            IdentError::NumericDomain("open loop gain equals -1, closed loop undefined".into())
        })?;
        Ok(FreqResponse::from_complex(g_out, omega))
    }

    /// `G_out = G_in / (1 - G_in)`.
    pub fn closed_to_open(&self) -> Result<FreqResponse, IdentError> {
        let (g_in, omega) = self.to_complex();
        let denom = Complex::new(1.0 - g_in.re, -g_in.im);
        let g_out = g_in.div(&denom).map_err(|_| {
            IdentError::NumericDomain("closed loop gain equals 1, open loop undefined".into())
        })?;
        Ok(FreqResponse::from_complex(g_out, omega))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polar_round_trip() {
        let fr = FreqResponse::new(5.0, -3.0103, 45.0);
        let (c, omega) = fr.to_complex();
        assert!((c.re - 0.5).abs() < 1e-9);
        assert!((c.im - 0.5).abs() < 1e-9);
        assert!((omega - 10.0 * std::f64::consts::PI).abs() < 1e-9);

        let back = FreqResponse::from_complex(c, omega);
        assert!((back.f - fr.f).abs() < 1e-9);
        assert!((back.g - fr.g).abs() < 1e-9);
        assert!((back.p - fr.p).abs() < 1e-9);
    }

    #[test]
    fn open_to_closed_sanity() {
        let fr = FreqResponse::new(1.0, 0.0, 0.0); // G_in = 1 + 0j
        let closed = fr.open_to_closed().unwrap();
        assert!((closed.g - (-6.0205999))
            .abs()
            < 1e-5);
        assert!(closed.p.abs() < 1e-9);
    }

    #[test]
    fn open_closed_duality_round_trips() {
        let fr = FreqResponse::new(2.0, 3.0, 20.0);
        let closed = fr.open_to_closed().unwrap();
        let back = closed.closed_to_open().unwrap();
        assert!((back.g - fr.g).abs() / fr.g.abs().max(1.0) < 1e-9);
        assert!((back.p - fr.p).abs() / fr.p.abs().max(1.0) < 1e-9);
    }

    #[test]
    fn cascade_with_identity_is_no_op() {
        let fr = FreqResponse::new(2.0, 3.0, 20.0);
        let tf = TransferFunction::one();
        let out = fr.connect_with_tf(&tf).unwrap();
        assert!((out.g - fr.g).abs() < 1e-9);
        assert!((out.p - fr.p).abs() < 1e-9);
    }
}
