//! Tractus CLI - swept-sine cavity measurement tool.

mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tractus")]
#[command(author, version, about = "Swept-sine cavity transfer-function measurement", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a chirp excitation and its parameter sidecar
    Generate(commands::generate::GenerateArgs),

    /// Process a calibration/measurement pair into an FRF report
    Process(commands::process::ProcessArgs),

    /// Align a recording to a reference excitation
    Align(commands::align::AlignArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate(args) => commands::generate::run(args),
        Commands::Process(args) => commands::process::run(args),
        Commands::Align(args) => commands::align::run(args),
    }
}
