//! Transfer functions as a ratio of two polynomials in the Laplace variable.

use crate::complex::Complex;
use crate::error::IdentError;
use crate::polynomial::Polynomial;

/// `G(s) = num(s) / den(s)`.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferFunction {
    num: Polynomial,
    den: Polynomial,
}

impl TransferFunction {
    pub fn new(num: Polynomial, den: Polynomial) -> Self {
        TransferFunction { num, den }
    }

    /// The transfer function `G(s) = 1`, the identity of cascade connection.
    pub fn one() -> Self {
        TransferFunction {
            num: Polynomial::from_coeffs(vec![1.0], 0).unwrap(),
            den: Polynomial::from_coeffs(vec![1.0], 0).unwrap(),
        }
    }

    pub fn num(&self) -> &Polynomial {
        &self.num
    }

    pub fn den(&self) -> &Polynomial {
        &self.den
    }

    /// `G(j*omega) = num(j*omega) / den(j*omega)`. Fails with
    /// `NumericDomain` if `omega` lands exactly on a pole.
    pub fn freq_res(&self, omega: f64) -> Result<Complex, IdentError> {
        let n = self.num.eval_j_omega(omega);
        let d = self.den.eval_j_omega(omega);
        n.div(&d).map_err(|_| {
            IdentError::NumericDomain(format!(
                "denominator vanishes at omega = {omega} (sample lands on a pole)"
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_tf_passes_input_through() {
        let tf = TransferFunction::one();
        let g = tf.freq_res(10.0).unwrap();
        assert_eq!(g, Complex::new(1.0, 0.0));
    }

    #[test]
    fn pole_on_sample_is_numeric_domain_error() {
        // den(s) = s -> den(j*0) = 0
        let num = Polynomial::from_coeffs(vec![1.0], 0).unwrap();
        let den = Polynomial::from_coeffs(vec![0.0, 1.0], 1).unwrap();
        let tf = TransferFunction::new(num, den);
        assert!(tf.freq_res(0.0).is_err());
    }

    #[test]
    fn first_order_low_pass_matches_closed_form() {
        // G(s) = 1 / (1 + s/10)
        let num = Polynomial::from_coeffs(vec![1.0], 0).unwrap();
        let den = Polynomial::from_coeffs(vec![1.0, 0.1], 1).unwrap();
        let tf = TransferFunction::new(num, den);
        let g = tf.freq_res(10.0).unwrap();
        // expected: 1 / (1 + j) = 0.5 - 0.5j
        assert!((g.re - 0.5).abs() < 1e-12);
        assert!((g.im + 0.5).abs() < 1e-12);
    }
}
