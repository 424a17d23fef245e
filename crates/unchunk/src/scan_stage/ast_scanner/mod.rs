mod impl_visit;
mod pre_processor;

use oxc::{ast::ast::Program, ast_visit::Visit as _};
use rustc_hash::FxHashSet;
use unchunk_common::{FactorySlots, ModuleKey, ModuleMeta, RawImportRecord};
use unchunk_error::BuildDiagnostic;

pub use self::pre_processor::PreProcessor;
use crate::utils::{slot_matcher::SlotMatcher, symbol_table::SymbolTable};

#[derive(Debug)]
pub struct ScanResult {
  pub symbols: SymbolTable,
  pub meta: ModuleMeta,
  /// Every literal require site, in source order.
  pub import_records: Vec<RawImportRecord>,
  pub diagnostics: Vec<BuildDiagnostic>,
}

/// Pass 1, a read-only walk over one module that classifies it and collects its requires.
pub struct AstScanner<'me> {
  key: &'me ModuleKey,
  slots: &'me FactorySlots,
  symbols: SymbolTable,
  import_records: Vec<RawImportRecord>,
  diagnostics: Vec<BuildDiagnostic>,
  /// `module.exports = ...` assignments.
  default_export_candidates: u32,
  assigns_object_literal: bool,
  reported_helpers: FxHashSet<String>,
}

impl<'me> AstScanner<'me> {
  pub fn new(key: &'me ModuleKey, slots: &'me FactorySlots, symbols: SymbolTable) -> Self {
    Self {
      key,
      slots,
      symbols,
      import_records: Vec::new(),
      diagnostics: Vec::new(),
      default_export_candidates: 0,
      assigns_object_literal: false,
      reported_helpers: FxHashSet::default(),
    }
  }

  pub fn scan(mut self, program: &Program<'_>) -> ScanResult {
    self.visit_program(program);

    let mut meta = ModuleMeta::empty();
    if self.default_export_candidates > 0 {
      meta |= ModuleMeta::HAS_DEFAULT_EXPORT;
    }
    if self.default_export_candidates > 1 || self.assigns_object_literal {
      meta |= ModuleMeta::IS_COMMONJS;
    }

    ScanResult {
      symbols: self.symbols,
      meta,
      import_records: self.import_records,
      diagnostics: self.diagnostics,
    }
  }

  #[inline]
  fn matcher(&self) -> SlotMatcher<'_> {
    SlotMatcher::new(self.slots, &self.symbols)
  }
}

#[cfg(test)]
mod tests {
  use unchunk_error::DiagnosticKind;

  use super::*;
  use crate::utils::parse_to_ecma_ast::parse_to_ecma_ast;

  fn scan(source: &str) -> ScanResult {
    let mut slots = FactorySlots::default();
    slots.unify(&["e", "t", "n"]).unwrap();
    let key = ModuleKey::from("1");
    let (ast, scoping) = parse_to_ecma_ast(source.into()).unwrap();
    AstScanner::new(&key, &slots, SymbolTable::new(scoping)).scan(ast.program())
  }

  #[test]
  fn classifies_default_export_assignments() {
    assert_eq!(scan("n.r(t); n.d(t, { a: () => a }); var a = 1;").meta, ModuleMeta::empty());

    let result = scan("e.exports = function () {};");
    assert_eq!(result.meta, ModuleMeta::HAS_DEFAULT_EXPORT);

    let result = scan("e.exports = { a: 1 };");
    assert_eq!(result.meta, ModuleMeta::HAS_DEFAULT_EXPORT | ModuleMeta::IS_COMMONJS);

    let result = scan("if (x) { e.exports = 1 } else { e.exports = 2 }");
    assert!(result.meta.is_commonjs());
  }

  #[test]
  fn shadowed_slots_are_not_exports() {
    let result = scan("function f(e) { e.exports = {}; } var n = require; n(5);");
    assert_eq!(result.meta, ModuleMeta::empty());
    assert!(result.import_records.is_empty());
  }

  #[test]
  fn compound_assignment_is_a_warning() {
    let result = scan("e.exports += 1;");
    assert_eq!(result.meta, ModuleMeta::empty());
    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(result.diagnostics[0].kind, DiagnosticKind::Warning);
  }

  #[test]
  fn collects_require_sites_in_order() {
    let result = scan(r#"var a = n(12); function f() { return n("lib").x; } n(12); n(a);"#);
    let keys = result.import_records.iter().map(|r| r.module_key.as_str()).collect::<Vec<_>>();
    assert_eq!(keys, ["12", "lib", "12"]);
  }

  #[test]
  fn unknown_helpers_are_reported_once() {
    let result = scan("n.d(t, {}); var a = n.n(n(1)); var b = n.n(n(2)); n.r(t);");
    assert_eq!(result.diagnostics.len(), 1);
    assert!(result.diagnostics[0].is_not_implemented());
  }
}
