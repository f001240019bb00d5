//! # invcache
//!
//! Memoização da inversa de uma matriz.
//!
//! Um [`MatrixCache`] guarda uma matriz e, opcionalmente, sua inversa. A
//! função [`cached_inverse`] calcula a inversa na primeira chamada e devolve o
//! valor armazenado nas seguintes, até que a matriz seja trocada.
//!
//! ```
//! use invcache::{cached_inverse, Matrix, MatrixCache};
//!
//! let m = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
//! let mut cache = MatrixCache::new(m);
//!
//! let inv = cached_inverse(&mut cache).unwrap().clone();
//! assert!((inv.get(0, 0).unwrap() + 2.0).abs() < 1e-12);
//!
//! // Segunda chamada não recalcula
//! cached_inverse(&mut cache).unwrap();
//! assert_eq!(cache.stats().hits, 1);
//! ```
//!
//! ## Módulos
//!
//! - [`cache`] - Cache da inversa e estatísticas
//! - [`linalg`] - Cálculo da inversa (LU com pivotamento parcial)
//! - [`cli`] - Interface de linha de comando
//! - [`types`] - Tipos compartilhados (matriz, erros, configuração)

pub mod cache;
#[cfg(feature = "cli")]
pub mod cli;
pub mod linalg;
pub mod types;

pub use cache::{cached_inverse, cached_inverse_with, CacheStats, MatrixCache};
pub use linalg::{InverseSolver, LuSolver};
pub use types::config::Config;
pub use types::errors::{InvCacheError, InvCacheResult, NotInvertibleError, NotInvertibleKind};
pub use types::matrix::Matrix;
