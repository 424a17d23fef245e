mod annotate_stage;
mod graph;
mod match_stage;
mod rewrite_stage;
mod scan_stage;
mod types;
mod unpacker;
mod utils;

pub use crate::{
  graph::{DependencyGraph, GraphEdge, GraphNode},
  match_stage::{
    chunk_matcher::{ChunkMatch, match_chunk},
    table_extractor::extract_module_table,
  },
  types::{
    module_factory::{FactoryParam, ModuleFactory},
    unpack_output::{ChunkInfo, UnpackOutput, UnpackedModule},
  },
  unpacker::Unpacker,
  utils::{
    resolve_id::resolve_id,
    symbol_table::{RenameError, SymbolTable},
  },
};
pub use unchunk_common::*;
pub use unchunk_error::{BuildDiagnostic, DiagnosticKind};
