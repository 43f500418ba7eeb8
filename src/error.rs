//! Error types shared by every component in this crate.

use thiserror::Error;

use crate::transfer_function::TransferFunction;

/// Every failure mode the identification core can report.
#[derive(Debug, Error)]
pub enum IdentError {
    #[error("insufficient data: have {have} sample(s), need at least {need}")]
    InsufficientData { have: usize, need: usize },

    #[error("degree out of range: numerator degree {n_n} and denominator degree {n_d} are not both valid (numerator >= 0, denominator >= 1)")]
    DegreeOutOfRange { n_n: i64, n_d: i64 },

    /// Never constructed by this crate on a safe-Rust allocation path
    /// (ordinary `Vec` growth aborts rather than returning `Err`); kept for
    /// API completeness against the identifier's documented failure modes
    /// and for callers built against a `no_std`/fallible-allocation target.
    #[error("failed to allocate working set of size {size}")]
    AllocationFailed { size: usize },

    #[error("numeric domain error: {0}")]
    NumericDomain(String),

    #[error("linear solver found the normal-equation matrix singular at row {row}")]
    Singular { row: usize },

    #[error("identification did not converge within {max_iter} iterations (last step delta {last_delta:e})")]
    Nonconvergent {
        max_iter: usize,
        last_delta: f64,
        /// Best parameter estimate at the point iteration was cut off.
        best: Box<TransferFunction>,
    },

    #[error("could not open file {path}: {source}")]
    FileOpen {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Not raised by [`crate::freq_response_list::FreqResponseList::parse`]:
    /// a malformed line silently stops the scan per §6, returning whatever
    /// was read so far rather than an `Err`. Kept for a caller that wants a
    /// stricter, all-or-nothing parse.
    #[error("malformed sample file {path} at line {line}")]
    FileFormat { path: String, line: usize },

    #[error("could not parse configuration file {path}: {source}")]
    ConfigFormat {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}
