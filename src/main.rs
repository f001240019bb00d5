use clap::Parser;
use invcache::cli::{Cli, Commands};
use invcache::types::config::Config;
use invcache::InvCacheResult;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> InvCacheResult<()> {
    let cli = Cli::parse();

    // Load configuration first (no logging yet)
    let (config, load_error) = if cli.config.exists() {
        match Config::load(&cli.config) {
            Ok(config) => (config, None),
            Err(e) => (Config::default_config(), Some(e)),
        }
    } else {
        (Config::default_config(), None)
    };

    // Determine log level: CLI flags take precedence over config
    let log_level = if cli.quiet {
        "error".to_string()
    } else if cli.verbose {
        "debug".to_string()
    } else {
        config.general.log_level.clone()
    };

    let filter = EnvFilter::from_default_env().add_directive(
        format!("invcache={}", log_level)
            .parse()
            .unwrap_or_else(|_| "invcache=info".parse().expect("fallback directive is valid")),
    );

    if config.general.log_format == "json" {
        tracing_subscriber::registry()
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .with(filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr))
            .with(filter)
            .init();
    }

    match load_error {
        Some(e) => tracing::warn!(
            "Falha ao carregar {}: {} (usando configuração padrão)",
            cli.config.display(),
            e
        ),
        None => tracing::debug!("Configuration loaded from: {}", cli.config.display()),
    }

    match cli.command {
        Commands::Init { path } => {
            invcache::cli::commands::init(path)?;
        }
        Commands::Invert {
            file,
            repeat,
            precision,
        } => {
            invcache::cli::commands::invert(&file, repeat, precision, &config)?;
        }
        Commands::Check { file } => {
            invcache::cli::commands::check(&file, &config)?;
        }
        Commands::Version => {
            invcache::cli::commands::version();
        }
    }

    Ok(())
}
