//! Implementação dos comandos CLI do invcache.

use std::path::{Path, PathBuf};

use crate::cache::{cached_inverse_with, MatrixCache};
use crate::types::config::Config;
use crate::types::matrix::Matrix;
use crate::{InvCacheError, InvCacheResult};

/// Initializes configuration in the specified directory.
pub fn init(path: Option<PathBuf>) -> InvCacheResult<()> {
    let target_dir = path.unwrap_or_else(|| PathBuf::from("."));

    if !target_dir.exists() {
        std::fs::create_dir_all(&target_dir)?;
        tracing::info!("Directory created: {}", target_dir.display());
    }

    let config_path = target_dir.join("invcache.toml");

    if config_path.exists() {
        println!("Configuration already exists at: {}", config_path.display());
        return Ok(());
    }

    Config::default_config().save(&config_path)?;

    println!("invcache initialized successfully!");
    println!("Configuration created at: {}", config_path.display());

    Ok(())
}

/// Carrega a matriz, pede a inversa ao cache `repeat` vezes e imprime o resultado.
pub fn invert(
    file: &Path,
    repeat: u32,
    precision: Option<usize>,
    config: &Config,
) -> InvCacheResult<()> {
    if repeat == 0 {
        return Err(InvCacheError::other("--repeat must be at least 1"));
    }

    let matrix = Matrix::load(file)?;
    let solver = config.solver.solver();
    let precision = precision.unwrap_or(config.output.precision);

    tracing::info!(
        "Invertendo matriz {}x{} de {}",
        matrix.nrows(),
        matrix.ncols(),
        file.display()
    );

    let mut cache = MatrixCache::new(matrix);
    for _ in 0..repeat {
        cached_inverse_with(&mut cache, &solver)?;
    }

    let stats = cache.stats();
    if let Some(inverse) = cache.inverse() {
        println!("{}", inverse.format_with_precision(precision));
    }
    println!();
    println!(
        "Cache: {} hit(s), {} miss(es), taxa de acerto {:.0}%",
        stats.hits,
        stats.misses,
        stats.hit_rate() * 100.0
    );
    if let Some(at) = stats.computed_at {
        println!("Calculada em: {}", at.to_rfc3339());
    }

    Ok(())
}

/// Mostra o desvio máximo de `M * M^-1` em relação à identidade.
pub fn check(file: &Path, config: &Config) -> InvCacheResult<()> {
    let matrix = Matrix::load(file)?;
    let solver = config.solver.solver();

    let mut cache = MatrixCache::new(matrix);
    let inverse = cached_inverse_with(&mut cache, &solver)?.clone();

    let product = cache
        .matrix()
        .matmul(&inverse)
        .ok_or_else(|| InvCacheError::shape("inverse has incompatible dimensions"))?;
    let deviation = product
        .max_deviation(&Matrix::identity(cache.matrix().nrows()))
        .ok_or_else(|| InvCacheError::shape("product is not square"))?;

    tracing::debug!(deviation, "verificação concluída");

    println!("✓ Matriz inversível ({}x{})", inverse.nrows(), inverse.ncols());
    println!("  max |M * M^-1 - I| = {:e}", deviation);

    Ok(())
}

/// Mostra versão.
pub fn version() {
    println!("invcache {}", env!("CARGO_PKG_VERSION"));
}
