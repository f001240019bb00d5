//! Matriz densa de `f64` sobre [`faer::Mat`].

use std::fmt;
use std::path::Path;

use faer::Mat;
use serde::{Deserialize, Serialize};

use crate::{InvCacheError, InvCacheResult};

/// Matriz densa de `f64`.
///
/// Serializa como uma lista de linhas: `[[1.0, 2.0], [3.0, 4.0]]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<f64>>", into = "Vec<Vec<f64>>")]
pub struct Matrix {
    inner: Mat<f64>,
}

impl Matrix {
    /// Cria uma matriz a partir de linhas. Linhas de tamanhos diferentes são rejeitadas.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> InvCacheResult<Self> {
        let nrows = rows.len();
        let ncols = rows.first().map_or(0, Vec::len);

        if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != ncols) {
            return Err(InvCacheError::shape(format!(
                "linha {} tem {} colunas, esperado {}",
                i,
                row.len(),
                ncols
            )));
        }

        // Uma lista de linhas vazias ainda é uma matriz sem elementos
        if ncols == 0 {
            return Ok(Self::empty());
        }

        Ok(Self {
            inner: Mat::from_fn(nrows, ncols, |i, j| rows[i][j]),
        })
    }

    /// Cria uma matriz a partir de um buffer row-major.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<f64>) -> InvCacheResult<Self> {
        if data.len() != rows * cols {
            return Err(InvCacheError::shape(format!(
                "{} valores não preenchem uma matriz {}x{}",
                data.len(),
                rows,
                cols
            )));
        }
        Ok(Self {
            inner: Mat::from_fn(rows, cols, |i, j| data[i * cols + j]),
        })
    }

    /// Matriz de zeros.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            inner: Mat::zeros(rows, cols),
        }
    }

    /// Matriz identidade `n x n`.
    pub fn identity(n: usize) -> Self {
        Self {
            inner: Mat::identity(n, n),
        }
    }

    /// Matriz 0x0, usada como placeholder.
    pub fn empty() -> Self {
        Self::zeros(0, 0)
    }

    /// Carrega uma matriz de arquivo.
    ///
    /// `.toml` espera `rows = [[...], ...]`; qualquer outra extensão é lida como JSON
    /// contendo a lista de linhas.
    pub fn load<P: AsRef<Path>>(path: P) -> InvCacheResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;

        let is_toml = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("toml"));

        let matrix = if is_toml {
            let file: MatrixFile = toml::from_str(&content)?;
            file.rows
        } else {
            serde_json::from_str(&content)?
        };

        tracing::debug!(
            "Matriz {}x{} carregada de {}",
            matrix.nrows(),
            matrix.ncols(),
            path.display()
        );
        Ok(matrix)
    }

    pub fn nrows(&self) -> usize {
        self.inner.nrows()
    }

    pub fn ncols(&self) -> usize {
        self.inner.ncols()
    }

    pub fn is_square(&self) -> bool {
        self.nrows() == self.ncols()
    }

    pub fn is_empty(&self) -> bool {
        self.nrows() == 0 || self.ncols() == 0
    }

    /// Se todos os elementos são finitos (sem NaN nem infinito).
    pub fn is_finite(&self) -> bool {
        (0..self.nrows()).all(|i| (0..self.ncols()).all(|j| self.inner.read(i, j).is_finite()))
    }

    /// Elemento `(i, j)`, ou `None` fora dos limites.
    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        if i < self.nrows() && j < self.ncols() {
            Some(self.inner.read(i, j))
        } else {
            None
        }
    }

    /// Linha `i` copiada, ou `None` fora dos limites.
    pub fn row(&self, i: usize) -> Option<Vec<f64>> {
        if i < self.nrows() {
            Some((0..self.ncols()).map(|j| self.inner.read(i, j)).collect())
        } else {
            None
        }
    }

    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        (0..self.nrows())
            .map(|i| (0..self.ncols()).map(|j| self.inner.read(i, j)).collect())
            .collect()
    }

    /// Matriz `faer` subjacente.
    pub fn as_faer(&self) -> &Mat<f64> {
        &self.inner
    }

    /// Produto `self * rhs`. Retorna `None` se as dimensões não forem compatíveis.
    pub fn matmul(&self, rhs: &Matrix) -> Option<Matrix> {
        if self.ncols() != rhs.nrows() {
            return None;
        }
        Some(Self::from(&self.inner * &rhs.inner))
    }

    /// Maior valor absoluto entre os elementos (0 para matriz vazia).
    pub fn max_abs(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        self.inner.norm_max()
    }

    /// Maior desvio absoluto elemento a elemento. `None` se as formas diferem.
    pub fn max_deviation(&self, other: &Matrix) -> Option<f64> {
        if self.nrows() != other.nrows() || self.ncols() != other.ncols() {
            return None;
        }
        if self.is_empty() {
            return Some(0.0);
        }
        Some((&self.inner - &other.inner).norm_max())
    }

    /// Compara com tolerância absoluta.
    pub fn approx_eq(&self, other: &Matrix, tol: f64) -> bool {
        self.max_deviation(other).is_some_and(|d| d <= tol)
    }

    /// Formata com precisão fixa, uma linha por linha da matriz.
    pub fn format_with_precision(&self, precision: usize) -> String {
        self.to_rows()
            .iter()
            .map(|row| {
                row.iter()
                    .map(|v| format!("{:.*}", precision, v))
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<Mat<f64>> for Matrix {
    fn from(inner: Mat<f64>) -> Self {
        Self { inner }
    }
}

impl TryFrom<Vec<Vec<f64>>> for Matrix {
    type Error = InvCacheError;

    fn try_from(rows: Vec<Vec<f64>>) -> Result<Self, Self::Error> {
        Self::from_rows(rows)
    }
}

impl From<Matrix> for Vec<Vec<f64>> {
    fn from(m: Matrix) -> Self {
        m.to_rows()
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.to_rows().iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            let row = row
                .iter()
                .map(|v| v.to_string())
                .collect::<Vec<_>>()
                .join(" ");
            write!(f, "{}", row)?;
        }
        Ok(())
    }
}

/// Formato TOML de arquivo de matriz.
#[derive(Debug, Deserialize)]
struct MatrixFile {
    rows: Matrix,
}
