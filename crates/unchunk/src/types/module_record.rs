use unchunk_common::{
  FactorySlots, ModuleKey, ModuleMeta, RawImportRecord, ResolvedModuleId, VariableAnnotation,
};
use unchunk_ecmascript::EcmaAst;

use crate::utils::symbol_table::SymbolTable;

/// A module while it moves through the stages of one chunk.
#[derive(Debug)]
pub struct ModuleRecord {
  pub key: ModuleKey,
  pub resolved: ResolvedModuleId,
  /// Chunk slots restricted to the parameters this factory declares.
  pub slots: FactorySlots,
  pub ast: EcmaAst,
  pub symbols: SymbolTable,
  pub meta: ModuleMeta,
  pub import_records: Vec<RawImportRecord>,
  /// Resolved imports, deduplicated, in first reference order.
  pub imports: Vec<ResolvedModuleId>,
  pub annotations: Vec<VariableAnnotation>,
}

impl ModuleRecord {
  #[inline]
  pub fn emits_esm(&self, prefers_esm: bool) -> bool {
    prefers_esm && !self.meta.is_commonjs()
  }
}
