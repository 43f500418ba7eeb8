//! Dense real linear solver: Gaussian elimination with partial pivoting.
//!
//! The identifier's normal-equation matrix is symmetric positive
//! semidefinite by construction; this solver makes no assumption beyond
//! that, and reports `Singular` when a pivot vanishes (up to a small
//! tolerance relative to the matrix's scale).

use crate::error::IdentError;

const PIVOT_EPS: f64 = 1e-12;

/// Solves `q * x = p` for `x`, where `q` is `n x n` (row-major `Vec<Vec<f64>>`)
/// and `p` has length `n`. Fails with `Singular` if elimination cannot find
/// a usable pivot in some column.
pub fn solve(q: &[Vec<f64>], p: &[f64]) -> Result<Vec<f64>, IdentError> {
    let n = p.len();
    debug_assert_eq!(q.len(), n);

    // Augmented matrix: n rows of (n coefficients + 1 rhs column).
    let mut a: Vec<Vec<f64>> = q
        .iter()
        .zip(p.iter())
        .map(|(row, &rhs)| {
            let mut r = row.clone();
            r.push(rhs);
            r
        })
        .collect();

    for col in 0..n {
        // Partial pivoting: swap in the row with the largest magnitude
        // entry in this column.
        let (pivot_row, pivot_val) = (col..n)
            .map(|r| (r, a[r][col].abs()))
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .unwrap();
        if pivot_val < PIVOT_EPS {
            return Err(IdentError::Singular { row: col });
        }
        if pivot_row != col {
            a.swap(col, pivot_row);
        }

        let pivot = a[col][col];
        for j in col..=n {
            a[col][j] /= pivot;
        }
        for r in 0..n {
            if r == col {
                continue;
            }
            let factor = a[r][col];
            if factor == 0.0 {
                continue;
            }
            for j in col..=n {
                a[r][j] -= factor * a[col][j];
            }
        }
    }

    Ok(a.iter().map(|row| row[n]).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solves_simple_system() {
        // [2 1; 1 3] x = [3; 5] -> x = [0.8, 1.4]
        let q = vec![vec![2.0, 1.0], vec![1.0, 3.0]];
        let p = vec![3.0, 5.0];
        let x = solve(&q, &p).unwrap();
        assert!((x[0] - 0.8).abs() < 1e-9);
        assert!((x[1] - 1.4).abs() < 1e-9);
    }

    #[test]
    fn needs_pivoting_when_leading_entry_is_zero() {
        // [0 1; 1 1] x = [2; 3] -> x = [1, 2]
        let q = vec![vec![0.0, 1.0], vec![1.0, 1.0]];
        let p = vec![2.0, 3.0];
        let x = solve(&q, &p).unwrap();
        assert!((x[0] - 1.0).abs() < 1e-9);
        assert!((x[1] - 2.0).abs() < 1e-9);
    }

    #[test]
    fn singular_matrix_is_rejected() {
        let q = vec![vec![1.0, 2.0], vec![2.0, 4.0]];
        let p = vec![1.0, 2.0];
        assert!(matches!(solve(&q, &p), Err(IdentError::Singular { .. })));
    }

    #[test]
    fn identity_system_returns_rhs() {
        let q = vec![
            vec![1.0, 0.0, 0.0],
            vec![0.0, 1.0, 0.0],
            vec![0.0, 0.0, 1.0],
        ];
        let p = vec![7.0, -2.0, 0.5];
        let x = solve(&q, &p).unwrap();
        assert_eq!(x, p);
    }
}
