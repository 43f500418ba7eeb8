//! The Sanathanan-Koerner iteratively reweighted least-squares identifier.
//!
//! Fits `G(s) = (b0 + b1 s + ... + bN s^N) / (1 + a1 s + ... + aD s^D)` to a
//! list of measured frequency-response samples.

use crate::complex::Complex;
use crate::config::Settings;
use crate::error::IdentError;
use crate::freq_response_list::FreqResponseList;
use crate::linalg;
use crate::polynomial::Polynomial;
use crate::transfer_function::TransferFunction;

/// Per-sample precomputed power series, built once before iterating.
struct WorkingSet {
    /// `weight[k]`: current re-weighting factor for sample k.
    weight: Vec<f64>,
    /// `ps_re[k][j]`, `ps_im[k][j]`: real/imag parts of `(j*omega_k)^j`.
    ps_re: Vec<Vec<f64>>,
    ps_im: Vec<Vec<f64>>,
    /// `fr_re[k][j]`, `fr_im[k][j]`: real/imag parts of `G_k * (j*omega_k)^j`.
    fr_re: Vec<Vec<f64>>,
    fr_im: Vec<Vec<f64>>,
}

impl WorkingSet {
    /// Builds the power-series tables by incremental complex
    /// multiplication (`pow` starts at `1+0j` and is multiplied by
    /// `j*omega` each step), rather than the sign-table-by-`j mod 4`
    /// formulation; the two agree to floating-point tolerance.
    fn build(samples: &FreqResponseList, m: usize) -> (Self, Vec<f64>) {
        let n = samples.len();
        let mut ps_re = vec![vec![0.0; m + 1]; n];
        let mut ps_im = vec![vec![0.0; m + 1]; n];
        let mut fr_re = vec![vec![0.0; m + 1]; n];
        let mut fr_im = vec![vec![0.0; m + 1]; n];
        let mut ang_freq = vec![0.0; n];

        for (k, fr) in samples.iter().enumerate() {
            let (g_k, omega) = fr.to_complex();
            ang_freq[k] = omega;
            let j_omega = Complex::new(0.0, omega);
            let mut pow = Complex::ONE;
            for j in 0..=m {
                ps_re[k][j] = pow.re;
                ps_im[k][j] = pow.im;
                let c = g_k.mul(&pow);
                fr_re[k][j] = c.re;
                fr_im[k][j] = c.im;
                pow = pow.mul(&j_omega);
            }
        }

        (
            WorkingSet {
                weight: vec![1.0; n],
                ps_re,
                ps_im,
                fr_re,
                fr_im,
            },
            ang_freq,
        )
    }

    /// Assembles the normal-equation matrix `Q` and vector `P` for the
    /// current weights.
    fn normal_equations(&self, n_n: usize, n_d: usize) -> (Vec<Vec<f64>>, Vec<f64>) {
        let width = n_n + n_d + 1;
        let mut q = vec![vec![0.0; width]; width];
        let mut p = vec![0.0; width];

        for k in 0..self.weight.len() {
            let w = self.weight[k];
            let mut xr = vec![0.0; width];
            let mut xi = vec![0.0; width];
            for j in 0..=n_n {
                xr[j] = self.ps_re[k][j] * w;
                xi[j] = self.ps_im[k][j] * w;
            }
            for j in 1..=n_d {
                xr[n_n + j] = -self.fr_re[k][j] * w;
                xi[n_n + j] = -self.fr_im[k][j] * w;
            }
            let gr = self.fr_re[k][0] * w;
            let gi = self.fr_im[k][0] * w;

            for a in 0..width {
                for b in 0..width {
                    q[a][b] += xr[a] * xr[b] + xi[a] * xi[b];
                }
                p[a] += gr * xr[a] + gi * xi[a];
            }
        }
        (q, p)
    }

    /// Re-weights every sample by `1 / |D(j*omega_k; a)|^2` under the
    /// current denominator estimate `phi[n_n+1 ..= n_n+n_d]`.
    fn reweight(&mut self, phi: &[f64], n_n: usize, n_d: usize) {
        for k in 0..self.weight.len() {
            let mut rr = self.ps_re[k][0];
            let mut ri = self.ps_im[k][0];
            for j in 1..=n_d {
                rr += self.ps_re[k][j] * phi[n_n + j];
                ri += self.ps_im[k][j] * phi[n_n + j];
            }
            let mag2 = rr * rr + ri * ri;
            self.weight[k] = if mag2 > 0.0 { 1.0 / mag2 } else { f64::MAX };
        }
    }
}

fn euclidean_dist(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            if x.is_infinite() || y.is_infinite() {
                f64::INFINITY
            } else {
                (x - y) * (x - y)
            }
        })
        .sum::<f64>()
        .sqrt()
}

fn build_tf(phi: &[f64], n_n: usize, n_d: usize) -> TransferFunction {
    let mut num = Polynomial::zeros(n_n);
    for i in 0..=n_n {
        num.set_coeff(i, phi[i]);
    }
    let mut den = Polynomial::zeros(n_d);
    den.set_coeff(0, 1.0);
    for i in 1..=n_d {
        den.set_coeff(i, phi[n_n + i]);
    }
    TransferFunction::new(num, den)
}

/// Fits a rational transfer function of numerator degree `n_n` and
/// denominator degree `n_d` to `samples` by iteratively reweighted complex
/// least squares.
///
/// `max_iter == 0` falls back to `settings.default_max_iter`. Returns the
/// fitted transfer function with `den[0] == 1.0`.
pub fn identify(
    samples: &FreqResponseList,
    n_n: i64,
    n_d: i64,
    max_iter: usize,
    settings: &Settings,
) -> Result<TransferFunction, IdentError> {
    if n_n < 0 || n_d < 1 {
        return Err(IdentError::DegreeOutOfRange { n_n, n_d });
    }
    let n_n = n_n as usize;
    let n_d = n_d as usize;
    let width = n_n + n_d + 1;

    if samples.is_empty() || samples.len() < width {
        return Err(IdentError::InsufficientData {
            have: samples.len(),
            need: width,
        });
    }

    let max_iter = if max_iter == 0 {
        settings.default_max_iter
    } else {
        max_iter
    };

    let m = n_n.max(n_d);
    let (mut working, _ang_freq) = WorkingSet::build(samples, m);

    let mut phi_prev = vec![f64::INFINITY; width];
    let mut dist_prev = f64::INFINITY;
    let mut phi = phi_prev.clone();

    for iter in 0..max_iter {
        let (q, p) = working.normal_equations(n_n, n_d);
        phi = linalg::solve(&q, &p)?;

        let dist = euclidean_dist(&phi, &phi_prev);
        log::debug!("identify: iteration {iter}, step distance {dist:e}");

        if (dist - dist_prev).abs() < settings.tolerance {
            return Ok(build_tf(&phi, n_n, n_d));
        }

        working.reweight(&phi, n_n, n_d);
        phi_prev = phi.clone();
        dist_prev = dist;
    }

    log::warn!(
        "identify: did not converge within {max_iter} iterations (last step distance {dist_prev:e})"
    );
    Err(IdentError::Nonconvergent {
        max_iter,
        last_delta: dist_prev,
        best: Box::new(build_tf(&phi, n_n, n_d)),
    })
}
