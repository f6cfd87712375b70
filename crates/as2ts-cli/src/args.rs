use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for the as2ts binary.
#[derive(Parser, Debug)]
#[command(
    name = "as2ts",
    version,
    about = "Translate ActionScript 3 source trees into TypeScript"
)]
pub struct CliArgs {
    /// Path to an as2ts.json configuration file.
    #[arg(short = 'c', long, global = true)]
    pub config: Option<PathBuf>,

    /// Emit files of the Make phase on all cores.
    #[arg(long, global = true)]
    pub parallel: bool,

    /// Disable colored diagnostics.
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Run Analyse and then Make.
    Translate(PhaseArgs),
    /// Normalize and parse every source file, and build the member index.
    Analyse(PhaseArgs),
    /// Emit TypeScript from the trees a previous Analyse persisted.
    Make(PhaseArgs),
    /// Print the normalized text of a single file.
    Normalize {
        /// The `.as` file to normalize.
        file: PathBuf,
    },
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct PhaseArgs {
    /// Source directory (or a single `.as` file).
    pub input: PathBuf,
    /// Output directory (or output file for a single input file).
    pub output: PathBuf,
}
