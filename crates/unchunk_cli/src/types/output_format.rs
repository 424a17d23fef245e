use clap::ValueEnum;

#[derive(PartialEq, Eq, Clone, ValueEnum)]
#[clap(rename_all = "lower")]
pub enum OutputFormat {
  Esm,
  Cjs,
}

impl From<OutputFormat> for unchunk::OutputFormat {
  fn from(value: OutputFormat) -> Self {
    match value {
      OutputFormat::Esm => unchunk::OutputFormat::Esm,
      OutputFormat::Cjs => unchunk::OutputFormat::Cjs,
    }
  }
}
