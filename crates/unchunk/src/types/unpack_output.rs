use unchunk_common::{ChunkId, ModuleId, ModuleKey, ModuleMeta, VariableAnnotation};
use unchunk_ecmascript::EcmaAst;
use unchunk_error::BuildDiagnostic;
use unchunk_utils::indexmap::FxIndexMap;

#[derive(Debug, Clone)]
pub struct ChunkInfo {
  pub id: ChunkId,
  /// Every id listed in the `push` call, `id` first.
  pub bundle_ids: Vec<ChunkId>,
}

#[derive(Debug)]
pub struct UnpackedModule {
  pub raw_key: ModuleKey,
  pub id: ModuleId,
  pub chunk_id: ChunkId,
  pub ast: EcmaAst,
  pub source: String,
  pub meta: ModuleMeta,
  pub imports: Vec<ModuleId>,
  pub annotations: Vec<VariableAnnotation>,
}

#[derive(Debug)]
pub struct UnpackOutput {
  pub chunk: ChunkInfo,
  pub modules: FxIndexMap<ModuleId, UnpackedModule>,
  pub diagnostics: Vec<BuildDiagnostic>,
}
