mod cmd;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::output::{OutputFormat, print_error};

/// fstyle - deduplicated CSS from JSON style sheets
#[derive(Parser)]
#[command(name = "fstyle")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable debug logging (overrides RUST_LOG)
  #[arg(short, long, global = true)]
  verbose: bool,

  /// Output format
  #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
  output: OutputFormat,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Compile one or more sheets into a single stylesheet
  Build {
    /// Sheet files (JSON)
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Write the stylesheet to a file instead of stdout
    #[arg(long)]
    out: Option<PathBuf>,
  },

  /// Show the canonical tree, identifier and CSS of every sheet entry
  Inspect {
    /// Sheet file (JSON)
    file: PathBuf,
  },

  /// Print the content hash of a string
  Hash {
    /// The string to hash
    input: String,
  },
}

fn main() -> ExitCode {
  let cli = Cli::parse();

  let filter = if cli.verbose {
    EnvFilter::new("debug")
  } else {
    EnvFilter::from_default_env()
  };
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  let result = match cli.command {
    Commands::Build { files, out } => cmd::cmd_build(&files, out.as_deref(), cli.output),
    Commands::Inspect { file } => cmd::cmd_inspect(&file, cli.output),
    Commands::Hash { input } => cmd::cmd_hash(&input, cli.output),
  };

  match result {
    Ok(()) => ExitCode::SUCCESS,
    Err(err) => {
      print_error(&format!("{err:#}"));
      ExitCode::FAILURE
    }
  }
}
