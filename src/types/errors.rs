//! Tipos de erro do invcache.

use thiserror::Error;

/// Tipo de resultado padrão do invcache.
pub type InvCacheResult<T> = Result<T, InvCacheError>;

/// Motivo pelo qual uma matriz não pôde ser invertida.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotInvertibleKind {
    /// A matriz não é quadrada.
    NotSquare { rows: usize, cols: usize },

    /// Pivô nulo encontrado na coluna indicada (determinante zero).
    Singular { column: usize },

    /// Matriz vazia (0x0), como o placeholder padrão do cache.
    Empty,

    /// A matriz contém NaN ou infinito.
    NonFinite,
}

/// Erro único do caminho de cálculo da inversa.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("{}", describe(.kind))]
pub struct NotInvertibleError {
    pub kind: NotInvertibleKind,
}

fn describe(kind: &NotInvertibleKind) -> String {
    match kind {
        NotInvertibleKind::NotSquare { rows, cols } => {
            format!("Matriz não inversível: não é quadrada ({}x{})", rows, cols)
        }
        NotInvertibleKind::Singular { column } => {
            format!("Matriz não inversível: singular (pivô nulo na coluna {})", column)
        }
        NotInvertibleKind::Empty => "Matriz não inversível: matriz vazia".to_string(),
        NotInvertibleKind::NonFinite => {
            "Matriz não inversível: contém valores não finitos".to_string()
        }
    }
}

impl NotInvertibleError {
    pub fn new(kind: NotInvertibleKind) -> Self {
        Self { kind }
    }

    pub fn not_square(rows: usize, cols: usize) -> Self {
        Self::new(NotInvertibleKind::NotSquare { rows, cols })
    }

    pub fn singular(column: usize) -> Self {
        Self::new(NotInvertibleKind::Singular { column })
    }

    pub fn is_singular(&self) -> bool {
        matches!(self.kind, NotInvertibleKind::Singular { .. })
    }
}

/// Erros possíveis no invcache.
#[derive(Error, Debug)]
pub enum InvCacheError {
    #[error(transparent)]
    NotInvertible(#[from] NotInvertibleError),

    #[error("Formato de matriz inválido: {0}")]
    Shape(String),

    #[error("Erro de configuração: {0}")]
    Config(String),

    #[error("Erro de IO: {0}")]
    Io(#[from] std::io::Error),

    #[error("Erro ao parsear TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Erro ao serializar TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Erro de JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl InvCacheError {
    /// Cria um erro genérico.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Self::Other(msg.into())
    }

    /// Cria um erro de configuração.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Cria um erro de formato de matriz.
    pub fn shape<S: Into<String>>(msg: S) -> Self {
        Self::Shape(msg.into())
    }
}
