use arcstr::ArcStr;
use rustc_hash::FxHashMap;
use unchunk_common::{FactorySlots, ModuleKey, ModuleMeta, NormalizedUnpackOptions};

use crate::utils::resolve_id::resolve_id;

/// What the rewriter of one module may read about the rest of the chunk.
pub struct RewriterContext<'a> {
  pub key: &'a ModuleKey,
  pub slots: &'a FactorySlots,
  pub options: &'a NormalizedUnpackOptions,
  /// Pass 1 classification of every module of the chunk, by raw key.
  pub module_metas: &'a FxHashMap<ModuleKey, ModuleMeta>,
  pub emits_esm: bool,
}

impl RewriterContext<'_> {
  pub fn import_path(&self, key: &ModuleKey) -> ArcStr {
    resolve_id(key, self.options.override_for(key)).import_path
  }

  /// Modules outside the chunk are unknown and imported as namespaces.
  pub fn has_default_export(&self, key: &ModuleKey) -> bool {
    self.module_metas.get(key).is_some_and(|meta| meta.has_default_export())
  }
}
