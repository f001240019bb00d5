//! Rotinas de álgebra linear usadas pelo cache.
//!
//! O cálculo da inversa fica atrás do trait [`InverseSolver`], de modo que o
//! cache não depende de uma rotina específica.

mod lu;

pub use lu::{invert, LuSolver, DEFAULT_TOLERANCE};

use crate::types::errors::NotInvertibleError;
use crate::types::matrix::Matrix;

/// Rotina capaz de calcular a inversa de uma matriz.
pub trait InverseSolver {
    /// Calcula a inversa de `matrix`.
    fn invert(&self, matrix: &Matrix) -> Result<Matrix, NotInvertibleError>;
}
