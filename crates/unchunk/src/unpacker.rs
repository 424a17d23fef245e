use std::sync::Arc;

use unchunk_common::UnpackOptions;
use unchunk_error::BuildDiagnostic;
use unchunk_utils::rayon::{IntoParallelRefIterator, ParallelIterator};

use crate::{
  annotate_stage::AnnotateStage,
  graph::DependencyGraph,
  match_stage::{chunk_matcher::match_chunk, table_extractor::extract_module_table},
  rewrite_stage::RewriteStage,
  scan_stage::{ScanStage, ScanStageOutput},
  types::{
    SharedOptions,
    unpack_output::{ChunkInfo, UnpackOutput, UnpackedModule},
  },
  utils::{normalize_options::normalize_options, render_module::render_module},
};

pub struct Unpacker {
  options: SharedOptions,
}

impl Unpacker {
  pub fn new(options: UnpackOptions) -> Self {
    Self { options: Arc::new(normalize_options(options)) }
  }

  /// Unpacks one chunk. `None` if `source` isn't a webpack chunk.
  ///
  /// The modules and edges of the chunk are merged into `graph` when one is given.
  pub fn unpack(&self, source: &str, graph: Option<&mut DependencyGraph>) -> Option<UnpackOutput> {
    let (output, chunk_graph) = self.unpack_chunk(source)?;
    if let Some(graph) = graph {
      graph.merge(chunk_graph);
    }
    Some(output)
  }

  /// Unpacks independent chunks in parallel, outputs keep the order of `sources`.
  pub fn unpack_all<S>(&self, sources: &[S]) -> (Vec<Option<UnpackOutput>>, DependencyGraph)
  where
    S: AsRef<str> + Sync,
  {
    let results =
      sources.par_iter().map(|source| self.unpack_chunk(source.as_ref())).collect::<Vec<_>>();

    let mut graph = DependencyGraph::new();
    let outputs = results
      .into_iter()
      .map(|result| {
        result.map(|(output, chunk_graph)| {
          graph.merge(chunk_graph);
          output
        })
      })
      .collect();
    (outputs, graph)
  }

  fn unpack_chunk(&self, source: &str) -> Option<(UnpackOutput, DependencyGraph)> {
    let matched = match_chunk(source)?;
    let mut diagnostics: Vec<BuildDiagnostic> = vec![];
    let factories = extract_module_table(matched.table, &mut diagnostics)?;
    let chunk = ChunkInfo { id: matched.ids.first()?.clone(), bundle_ids: matched.ids };

    let ScanStageOutput { mut modules, mut graph } =
      ScanStage::new(&self.options, &chunk.id).scan(factories, &mut diagnostics);
    RewriteStage::new(&self.options).rewrite(&mut modules, &mut diagnostics);
    AnnotateStage::new(&self.options).annotate(&mut modules, &mut diagnostics);

    let modules = modules
      .into_iter()
      .map(|mut module| {
        let source = render_module(&mut module, self.options.annotate_variables);
        graph.set_source(&module.resolved.id, source.as_str().into());
        let unpacked = UnpackedModule {
          raw_key: module.key,
          id: module.resolved.id.clone(),
          chunk_id: chunk.id.clone(),
          ast: module.ast,
          source,
          meta: module.meta,
          imports: module.imports.into_iter().map(|import| import.id).collect(),
          annotations: module.annotations,
        };
        (module.resolved.id, unpacked)
      })
      .collect();

    Some((UnpackOutput { chunk, modules, diagnostics }, graph))
  }
}
