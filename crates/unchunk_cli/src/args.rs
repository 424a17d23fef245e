use std::path::PathBuf;

use clap::Args;

use crate::types::output_format::OutputFormat;

#[derive(Args)]
pub struct InputArgs {
  /// Chunk files to unpack.
  #[clap(long, short = 'i', action = clap::ArgAction::Append, required = true)]
  pub input: Vec<PathBuf>,

  /// JSON file of per-module overrides, keyed by raw module key.
  #[clap(long)]
  pub overrides: Option<PathBuf>,
}

#[derive(Args)]
pub struct OutputArgs {
  #[clap(long, short = 'd', default_value = "dist")]
  pub dir: PathBuf,

  #[clap(long)]
  pub format: Option<OutputFormat>,

  /// Append a `// #n name` comment for every binding of each module.
  #[clap(long)]
  pub annotate: bool,

  /// Write the dependency graph of all chunks as JSON.
  #[clap(long)]
  pub graph: Option<PathBuf>,

  #[clap(long, short = 's')]
  pub silent: bool,
}
