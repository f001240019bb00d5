//! Cache da inversa de matriz.
//!
//! Este módulo guarda uma matriz junto com sua inversa e evita recalcular a
//! inversa enquanto a matriz não for trocada.

mod matrix_cache;

pub use matrix_cache::{cached_inverse, cached_inverse_with, CacheStats, MatrixCache};
