//! Cache da inversa de uma única matriz.

use chrono::{DateTime, Utc};

use crate::linalg::{InverseSolver, LuSolver};
use crate::types::errors::NotInvertibleError;
use crate::types::matrix::Matrix;

/// Estatísticas do cache.
#[derive(Debug, Clone, Default)]
pub struct CacheStats {
    /// Número de acertos (cache hits).
    pub hits: u64,

    /// Número de erros (cache misses).
    pub misses: u64,

    /// Se há uma inversa armazenada no momento.
    pub cached: bool,

    /// Momento em que a inversa atual foi armazenada.
    pub computed_at: Option<DateTime<Utc>>,
}

impl CacheStats {
    /// Calcula a taxa de acerto.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Matriz com sua inversa memoizada.
///
/// Trocar a matriz via [`MatrixCache::set_matrix`] descarta a inversa. Os campos
/// são privados: o setter é o único caminho de escrita, então uma inversa
/// presente sempre corresponde à matriz em que foi calculada (ou ao valor
/// injetado por [`MatrixCache::set_inverse`], que não é validado).
///
/// Uso sequencial em uma única thread. [`cached_inverse`] exige `&mut`, e
/// quem compartilhar o cache entre threads é responsável pela sincronização.
#[derive(Debug, Clone, Default)]
pub struct MatrixCache {
    matrix: Matrix,
    inverse: Option<Matrix>,
    computed_at: Option<DateTime<Utc>>,
    hits: u64,
    misses: u64,
}

impl MatrixCache {
    /// Cria um cache para `matrix`, sem inversa.
    pub fn new(matrix: Matrix) -> Self {
        Self {
            matrix,
            ..Self::default()
        }
    }

    /// Substitui a matriz e invalida a inversa.
    pub fn set_matrix(&mut self, matrix: Matrix) {
        self.matrix = matrix;
        self.inverse = None;
        self.computed_at = None;
    }

    /// Matriz atual.
    pub fn matrix(&self) -> &Matrix {
        &self.matrix
    }

    /// Armazena `inverse` sem verificar se é de fato a inversa da matriz atual.
    pub fn set_inverse(&mut self, inverse: Matrix) {
        self.inverse = Some(inverse);
        self.computed_at = Some(Utc::now());
    }

    /// Inversa armazenada, ou `None` se ausente desde o último `set_matrix`.
    pub fn inverse(&self) -> Option<&Matrix> {
        self.inverse.as_ref()
    }

    /// Se há uma inversa armazenada.
    pub fn is_cached(&self) -> bool {
        self.inverse.is_some()
    }

    /// Retorna estatísticas do cache.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            cached: self.inverse.is_some(),
            computed_at: self.computed_at,
        }
    }
}

/// Retorna a inversa da matriz do cache, calculando-a apenas na primeira chamada.
///
/// Usa [`LuSolver`] com tolerância padrão. O erro de matriz não inversível é
/// devolvido como veio do solver.
pub fn cached_inverse(cache: &mut MatrixCache) -> Result<&Matrix, NotInvertibleError> {
    cached_inverse_with(cache, &LuSolver::default())
}

/// Como [`cached_inverse`], com um solver explícito.
pub fn cached_inverse_with<'a, S>(
    cache: &'a mut MatrixCache,
    solver: &S,
) -> Result<&'a Matrix, NotInvertibleError>
where
    S: InverseSolver + ?Sized,
{
    let inverse = match cache.inverse.take() {
        Some(inverse) => {
            cache.hits += 1;
            tracing::debug!(hits = cache.hits, "inversa servida do cache");
            inverse
        }
        None => {
            cache.misses += 1;
            tracing::debug!(
                rows = cache.matrix.nrows(),
                cols = cache.matrix.ncols(),
                "inversa ausente, calculando"
            );
            let inverse = solver.invert(&cache.matrix)?;
            cache.computed_at = Some(Utc::now());
            inverse
        }
    };

    let stored: &Matrix = cache.inverse.insert(inverse);
    Ok(stored)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::errors::NotInvertibleKind;
    use std::cell::Cell;

    /// Solver que conta quantas vezes foi chamado.
    struct CountingSolver {
        calls: Cell<usize>,
    }

    impl CountingSolver {
        fn new() -> Self {
            Self {
                calls: Cell::new(0),
            }
        }
    }

    impl InverseSolver for CountingSolver {
        fn invert(&self, matrix: &Matrix) -> Result<Matrix, NotInvertibleError> {
            self.calls.set(self.calls.get() + 1);
            LuSolver::default().invert(matrix)
        }
    }

    fn m(rows: &[&[f64]]) -> Matrix {
        Matrix::from_rows(rows.iter().map(|r| r.to_vec()).collect()).unwrap()
    }

    #[test]
    fn test_new_cache_has_no_inverse() {
        let cache = MatrixCache::new(m(&[&[1.0, 2.0], &[3.0, 4.0]]));
        assert!(cache.inverse().is_none());
        assert!(!cache.is_cached());
        assert_eq!(cache.matrix().get(1, 1), Some(4.0));
    }

    #[test]
    fn test_default_cache_holds_empty_matrix() {
        let cache = MatrixCache::default();
        assert!(cache.matrix().is_empty());
        assert!(cache.inverse().is_none());
    }

    #[test]
    fn test_cache_miss_then_hit() {
        let mut cache = MatrixCache::new(m(&[&[1.0, 2.0], &[3.0, 4.0]]));
        let solver = CountingSolver::new();

        let first = cached_inverse_with(&mut cache, &solver).unwrap() as *const Matrix;
        let second = cached_inverse_with(&mut cache, &solver).unwrap() as *const Matrix;

        assert_eq!(solver.calls.get(), 1);
        assert!(std::ptr::eq(first, second));

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert!(stats.cached);
        assert!(stats.computed_at.is_some());
    }

    #[test]
    fn test_expected_inverse() {
        let mut cache = MatrixCache::new(m(&[&[1.0, 2.0], &[3.0, 4.0]]));
        let inv = cached_inverse(&mut cache).unwrap();
        assert!(inv.approx_eq(&m(&[&[-2.0, 1.0], &[1.5, -0.5]]), 1e-12));
    }

    #[test]
    fn test_set_matrix_invalidates() {
        let mut cache = MatrixCache::new(m(&[&[1.0, 2.0], &[3.0, 4.0]]));
        let solver = CountingSolver::new();
        cached_inverse_with(&mut cache, &solver).unwrap();

        cache.set_matrix(m(&[&[2.0, 0.0], &[0.0, 4.0]]));
        assert!(cache.inverse().is_none());
        assert!(cache.stats().computed_at.is_none());

        let inv = cached_inverse_with(&mut cache, &solver).unwrap();
        assert!(inv.approx_eq(&m(&[&[0.5, 0.0], &[0.0, 0.25]]), 1e-12));
        assert_eq!(solver.calls.get(), 2);
    }

    #[test]
    fn test_set_inverse_is_not_validated() {
        let mut cache = MatrixCache::new(m(&[&[1.0, 2.0], &[3.0, 4.0]]));
        let bogus = m(&[&[9.0, 9.0], &[9.0, 9.0]]);

        cache.set_inverse(bogus.clone());
        assert_eq!(cache.inverse(), Some(&bogus));

        // Um valor injetado conta como hit
        let solver = CountingSolver::new();
        assert_eq!(cached_inverse_with(&mut cache, &solver).unwrap(), &bogus);
        assert_eq!(solver.calls.get(), 0);
    }

    #[test]
    fn test_singular_matrix_leaves_cache_empty() {
        let mut cache = MatrixCache::new(m(&[&[1.0, 2.0], &[2.0, 4.0]]));

        let err = cached_inverse(&mut cache).unwrap_err();
        assert!(err.is_singular());
        assert!(cache.inverse().is_none());

        let stats = cache.stats();
        assert_eq!(stats.misses, 1);
        assert!(!stats.cached);
    }

    #[test]
    fn test_default_placeholder_is_not_invertible() {
        let mut cache = MatrixCache::default();
        let err = cached_inverse(&mut cache).unwrap_err();
        assert_eq!(err.kind, NotInvertibleKind::Empty);
    }

    #[test]
    fn test_hit_rate() {
        let mut cache = MatrixCache::new(Matrix::identity(3));
        for _ in 0..3 {
            cached_inverse(&mut cache).unwrap();
        }

        let stats = cache.stats();
        assert_eq!(stats.hits, 2);
        assert_eq!(stats.misses, 1);
        assert!((stats.hit_rate() - 0.666).abs() < 0.01);
        assert_eq!(CacheStats::default().hit_rate(), 0.0);
    }
}
