use anyhow::Result;
use clap::{Parser, Subcommand};
use domap::pipeline::{self, args};

#[derive(Parser)]
#[command(name = "domap")]
#[command(version = "0.1.0")]
#[command(about = "Assign ECOD structural domains from homology-search evidence", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Cull redundant structural hits under a per-residue coverage budget
    Cull(args::CullArgs),

    /// Iteratively decompose the query against each surviving template
    Decompose(args::DecomposeArgs),

    /// Reconcile called domains with sequence and structural evidence
    Map(args::MapArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Cull(args) => {
            pipeline::run_cull(args)?;
        }
        Commands::Decompose(args) => {
            pipeline::run_decompose(args)?;
        }
        Commands::Map(args) => {
            pipeline::run_map(args)?;
        }
    }
    Ok(())
}
