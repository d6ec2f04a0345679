use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

pub mod commands;
pub mod manifest;

#[derive(Parser)]
#[command(name = "compass-run", version, about = "Compile des feuilles Sass/SCSS via Compass", long_about = None)]
pub struct Cli {
    /// Verbosité (répéter pour plus de bruit, ou RUST_LOG)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Compiler un ou plusieurs fichiers (en parallèle)
    Compile(commands::compile::Args),

    /// Afficher la ligne de commande et le CSS prédit sans rien lancer
    Args(commands::args::Args),

    /// Générer autocomplétions shell
    Completions(commands::completions::Args),
}

fn main() -> color_eyre::Result<ExitCode> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.cmd {
        Cmd::Compile(a)     => commands::compile::exec(a),
        Cmd::Args(a)        => commands::args::exec(a).map(|()| ExitCode::SUCCESS),
        Cmd::Completions(a) => commands::completions::exec(a).map(|()| ExitCode::SUCCESS),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
