//! Interface de linha de comando do invcache.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// invcache - inversão de matrizes com cache.
#[derive(Parser, Debug)]
#[command(name = "invcache")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Arquivo de configuração.
    #[arg(short, long, default_value = "invcache.toml")]
    pub config: PathBuf,

    /// Modo verbose.
    #[arg(short, long)]
    pub verbose: bool,

    /// Modo silencioso.
    #[arg(short, long)]
    pub quiet: bool,

    /// Comando a executar.
    #[command(subcommand)]
    pub command: Commands,
}

/// Comandos disponíveis.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Inicializa configuração no diretório atual.
    Init {
        /// Diretório de destino (padrão: diretório atual).
        #[arg(short, long)]
        path: Option<PathBuf>,
    },

    /// Calcula a inversa de uma matriz (JSON ou TOML) usando o cache.
    Invert {
        /// Arquivo da matriz.
        file: PathBuf,

        /// Quantas vezes pedir a inversa ao cache.
        #[arg(short, long, default_value_t = 1)]
        repeat: u32,

        /// Casas decimais na saída (padrão: valor do config).
        #[arg(short, long)]
        precision: Option<usize>,
    },

    /// Verifica o quão próximo M * M^-1 fica da identidade.
    Check {
        /// Arquivo da matriz.
        file: PathBuf,
    },

    /// Mostra versão.
    Version,
}
