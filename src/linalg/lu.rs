//! Inversão via fatoração LU com pivotamento parcial do `faer`.

use faer::linalg::solvers::SolverCore;

use crate::types::errors::{NotInvertibleError, NotInvertibleKind};
use crate::types::matrix::Matrix;

use super::InverseSolver;

/// Tolerância relativa padrão para considerar um pivô nulo.
pub const DEFAULT_TOLERANCE: f64 = 1e-12;

/// Solver baseado em LU com pivotamento parcial por linhas.
///
/// Um pivô com valor absoluto `<= tolerance * max_abs(m)` é tratado como zero
/// e a matriz é considerada singular. O teste é relativo à escala da matriz:
/// `c * M` é inversível para qualquer `c != 0` sempre que `M` for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LuSolver {
    pub tolerance: f64,
}

impl LuSolver {
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }
}

impl Default for LuSolver {
    fn default() -> Self {
        Self::new(DEFAULT_TOLERANCE)
    }
}

impl InverseSolver for LuSolver {
    fn invert(&self, matrix: &Matrix) -> Result<Matrix, NotInvertibleError> {
        if matrix.is_empty() {
            return Err(NotInvertibleError::new(NotInvertibleKind::Empty));
        }
        if !matrix.is_square() {
            return Err(NotInvertibleError::not_square(
                matrix.nrows(),
                matrix.ncols(),
            ));
        }
        if !matrix.is_finite() {
            return Err(NotInvertibleError::new(NotInvertibleKind::NonFinite));
        }

        let a = matrix.as_faer();
        let lu = a.partial_piv_lu();
        let threshold = self.tolerance * matrix.max_abs();

        // Um dos fatores tem diagonal unitária; o produto das diagonais são os pivôs
        let l = lu.compute_l();
        let u = lu.compute_u();
        for k in 0..matrix.nrows() {
            let pivot = (l.read(k, k) * u.read(k, k)).abs();
            // NaN conta como pivô nulo: aparece depois de uma divisão por zero
            if !(pivot > threshold) {
                tracing::trace!(column = k, pivot, threshold, "pivô abaixo da tolerância");
                return Err(NotInvertibleError::singular(k));
            }
        }

        Ok(Matrix::from(lu.inverse()))
    }
}

/// Inverte `matrix` com o solver padrão.
pub fn invert(matrix: &Matrix) -> Result<Matrix, NotInvertibleError> {
    LuSolver::default().invert(matrix)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(rows: &[&[f64]]) -> Matrix {
        Matrix::from_rows(rows.iter().map(|r| r.to_vec()).collect()).unwrap()
    }

    fn scaled(a: &Matrix, c: f64) -> Matrix {
        Matrix::from_rows(
            a.to_rows()
                .into_iter()
                .map(|r| r.into_iter().map(|x| x * c).collect())
                .collect(),
        )
        .unwrap()
    }

    fn assert_is_inverse(a: &Matrix, inv: &Matrix) {
        let prod = a.matmul(inv).unwrap();
        assert!(
            prod.approx_eq(&Matrix::identity(a.nrows()), 1e-9),
            "A * A^-1 não é identidade:\n{}",
            prod
        );
    }

    #[test]
    fn test_invert_2x2() {
        let a = m(&[&[1.0, 2.0], &[3.0, 4.0]]);
        let inv = invert(&a).unwrap();

        let expected = m(&[&[-2.0, 1.0], &[1.5, -0.5]]);
        assert!(inv.approx_eq(&expected, 1e-12));
        assert_is_inverse(&a, &inv);
    }

    #[test]
    fn test_invert_requires_pivoting() {
        // Zero na diagonal: só funciona com troca de linhas
        let a = m(&[&[0.0, 1.0], &[1.0, 0.0]]);
        let inv = invert(&a).unwrap();
        assert!(inv.approx_eq(&a, 1e-15));
    }

    #[test]
    fn test_invert_3x3() {
        let a = m(&[&[4.0, 7.0, 2.0], &[3.0, 6.0, 1.0], &[2.0, 5.0, 3.0]]);
        let inv = invert(&a).unwrap();
        assert_is_inverse(&a, &inv);
    }

    #[test]
    fn test_invert_1x1_and_identity() {
        let inv = invert(&m(&[&[4.0]])).unwrap();
        assert!(inv.approx_eq(&m(&[&[0.25]]), 1e-15));

        let id = Matrix::identity(5);
        assert!(invert(&id).unwrap().approx_eq(&id, 1e-15));
    }

    #[test]
    fn test_tiny_and_huge_scales_are_invertible() {
        let a = m(&[&[4.0, 7.0], &[2.0, 6.0]]);

        for c in [1e-15, 1e-13, 1e15] {
            let ca = scaled(&a, c);
            let inv = invert(&ca).unwrap_or_else(|e| panic!("c = {}: {}", c, e));
            assert_is_inverse(&ca, &inv);
        }

        let tiny_identity = scaled(&Matrix::identity(2), 1e-13);
        assert!(invert(&tiny_identity).is_ok());

        let inv = invert(&m(&[&[1e-20]])).unwrap();
        assert!((inv.get(0, 0).unwrap() - 1e20).abs() <= 1e5);
    }

    #[test]
    fn test_singular_matrix() {
        let err = invert(&m(&[&[1.0, 2.0], &[2.0, 4.0]])).unwrap_err();
        assert_eq!(err.kind, NotInvertibleKind::Singular { column: 1 });
    }

    #[test]
    fn test_tiny_singular_matrix_stays_singular() {
        let a = scaled(&m(&[&[1.0, 2.0], &[2.0, 4.0]]), 1e-15);
        assert!(invert(&a).unwrap_err().is_singular());
    }

    #[test]
    fn test_zero_matrix_is_singular() {
        let err = invert(&Matrix::zeros(3, 3)).unwrap_err();
        assert_eq!(err.kind, NotInvertibleKind::Singular { column: 0 });
    }

    #[test]
    fn test_not_square() {
        let err = invert(&m(&[&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]])).unwrap_err();
        assert_eq!(err.kind, NotInvertibleKind::NotSquare { rows: 2, cols: 3 });
    }

    #[test]
    fn test_empty() {
        let err = invert(&Matrix::empty()).unwrap_err();
        assert_eq!(err.kind, NotInvertibleKind::Empty);
    }

    #[test]
    fn test_non_finite() {
        let err = invert(&m(&[&[1.0, f64::NAN], &[0.0, 1.0]])).unwrap_err();
        assert_eq!(err.kind, NotInvertibleKind::NonFinite);
    }

    #[test]
    fn test_tolerance_is_configurable() {
        let nearly_singular = m(&[&[1.0, 1.0], &[1.0, 1.0 + 1e-9]]);

        assert!(LuSolver::default().invert(&nearly_singular).is_ok());

        let strict = LuSolver::new(1e-6);
        assert!(strict.invert(&nearly_singular).unwrap_err().is_singular());
    }
}
