mod args;
mod types;

use std::{
  path::{Path, PathBuf},
  time::Instant,
};

use ansi_term::Colour;
use anyhow::Context;
use args::{InputArgs, OutputArgs};
use clap::Parser;
use futures::future::try_join_all;

use unchunk::{DependencyGraph, DiagnosticKind, ModuleOverrides, UnpackOptions, UnpackOutput, Unpacker};

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Commands {
  #[clap(flatten)]
  input: InputArgs,

  #[clap(flatten)]
  output: OutputArgs,
}

async fn read_inputs(paths: &[PathBuf]) -> anyhow::Result<Vec<String>> {
  try_join_all(paths.iter().map(|path| async move {
    tokio::fs::read_to_string(path).await.with_context(|| format!("failed to read {path:?}"))
  }))
  .await
}

async fn read_overrides(path: &Path) -> anyhow::Result<ModuleOverrides> {
  let content = tokio::fs::read_to_string(path)
    .await
    .with_context(|| format!("failed to read overrides {path:?}"))?;
  serde_json::from_str(&content).with_context(|| format!("invalid overrides file {path:?}"))
}

/// Writes `<dir>/<module id>.js` for every module, returns the written paths.
async fn write_modules(dir: &Path, output: &UnpackOutput) -> anyhow::Result<Vec<PathBuf>> {
  let writes = output.modules.values().map(|module| {
    let path = dir.join(format!("{}.js", module.id));
    async move {
      if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
      }
      tokio::fs::write(&path, &module.source)
        .await
        .with_context(|| format!("failed to write {path:?}"))?;
      anyhow::Ok(path)
    }
  });
  try_join_all(writes).await
}

async fn write_graph(path: &Path, graph: &DependencyGraph) -> anyhow::Result<()> {
  let json = serde_json::to_string_pretty(graph)?;
  tokio::fs::write(path, json).await.with_context(|| format!("failed to write {path:?}"))
}

/// Unsupported shapes are known gaps, not problems with the input.
fn diagnostic_label(kind: DiagnosticKind) -> (Colour, &'static str) {
  match kind {
    DiagnosticKind::NotImplemented => (Colour::Purple, "Not implemented:"),
    DiagnosticKind::Skipped | DiagnosticKind::Warning => (Colour::Yellow, "Warning:"),
  }
}

fn print_outputs(inputs: &[PathBuf], outputs: &[Option<UnpackOutput>]) {
  let dim = Colour::White.dimmed();
  let color = Colour::Cyan;

  for (input, output) in inputs.iter().zip(outputs) {
    let Some(output) = output else {
      println!("{} {} is not a webpack chunk", Colour::Yellow.paint("Warning:"), input.display());
      continue;
    };

    for diagnostic in &output.diagnostics {
      let (colour, label) = diagnostic_label(diagnostic.kind);
      println!("{} {diagnostic}", colour.paint(label));
    }

    println!(
      "{}{} {}",
      color.paint(input.display().to_string()),
      dim.paint(format!(" │ chunk {}", output.chunk.id)),
      dim.paint(format!("│ modules: {}", output.modules.len())),
    );
  }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  let args = Commands::parse();
  let InputArgs { input, overrides } = args.input;
  let OutputArgs { dir, format, annotate, graph: graph_path, silent } = args.output;

  let overrides = match overrides {
    Some(path) => Some(read_overrides(&path).await?),
    None => None,
  };
  let unpacker = Unpacker::new(UnpackOptions {
    format: format.map(Into::into),
    annotate_variables: Some(annotate),
    overrides,
  });

  let start = Instant::now();
  let sources = read_inputs(&input).await?;
  let (outputs, graph) = unpacker.unpack_all(&sources);

  for output in outputs.iter().flatten() {
    write_modules(&dir, output).await?;
  }
  if let Some(path) = graph_path {
    write_graph(&path, &graph).await?;
  }

  if !silent {
    print_outputs(&input, &outputs);

    let undeclared = graph.undeclared_modules();
    if !undeclared.is_empty() {
      let ids = undeclared.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ");
      println!(
        "{} {} module(s) are required but missing from the inputs: {ids}",
        Colour::Yellow.paint("Warning:"),
        undeclared.len()
      );
    }
  }

  let elapsed = format!("{:.2} ms", start.elapsed().as_secs_f64() * 1000.0);
  println!("\n{} Finished in {}", Colour::Green.paint("✔"), Colour::White.bold().paint(elapsed));
  Ok(())
}

#[test]
fn test_diagnostic_label() {
  assert_eq!(diagnostic_label(DiagnosticKind::NotImplemented), (Colour::Purple, "Not implemented:"));
  assert_eq!(diagnostic_label(DiagnosticKind::Skipped), (Colour::Yellow, "Warning:"));
  assert_eq!(diagnostic_label(DiagnosticKind::Warning), (Colour::Yellow, "Warning:"));
}
