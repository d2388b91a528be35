//! Point d'entrée CLI pour tigerpoly

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::{fmt, EnvFilter};

/// Assembler les polygones TIGER depuis la topologie de chaînes
#[derive(Parser)]
#[command(name = "tigerpoly")]
#[command(author, version)]
#[command(about = "Assemble TIGER polygon and area-landmark geometries from chain topology")]
struct Cli {
    /// Dataset TIGER en entrée (répertoire de couches GeoJSON)
    input: PathBuf,

    /// Préfixe des fichiers de sortie (défaut: répertoire courant)
    output: Option<String>,
}

fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();
    let report = tigerpoly::run(&cli.input, cli.output.as_deref().unwrap_or(""))?;
    report.display();

    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::from_default_env().add_directive(Level::INFO.into());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .init();
}
