use oxc::span::Span;

use crate::ModuleKey;

/// A `require(<literal>)` reference found by the scan stage, before resolution.
#[derive(Debug, Clone)]
pub struct RawImportRecord {
  /// Raw key of the required module, normalized the same way table keys are.
  pub module_key: ModuleKey,
  /// Span of the whole call expression.
  pub span: Span,
}

impl RawImportRecord {
  pub fn new(module_key: ModuleKey, span: Span) -> Self {
    Self { module_key, span }
  }
}
