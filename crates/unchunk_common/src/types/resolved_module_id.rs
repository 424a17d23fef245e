use arcstr::ArcStr;

use crate::ModuleId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedModuleId {
  pub id: ModuleId,
  /// Specifier written into `import`/`require` sites, e.g. `./123` or `react`.
  pub import_path: ArcStr,
}
