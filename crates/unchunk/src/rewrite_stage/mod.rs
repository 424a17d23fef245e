mod module_rewriter;
mod rewriter_context;

use oxc::ast_visit::VisitMut as _;
use rustc_hash::FxHashMap;
use unchunk_error::BuildDiagnostic;

use self::{module_rewriter::ModuleRewriter, rewriter_context::RewriterContext};
use crate::types::{IndexModules, SharedOptions};

/// Pass 2. Starts only once every module of the chunk is classified, since a module's imports
/// depend on the classification of the modules it requires.
pub struct RewriteStage<'a> {
  options: &'a SharedOptions,
}

impl<'a> RewriteStage<'a> {
  pub fn new(options: &'a SharedOptions) -> Self {
    Self { options }
  }

  pub fn rewrite(&self, modules: &mut IndexModules, diagnostics: &mut Vec<BuildDiagnostic>) {
    let module_metas =
      modules.iter().map(|module| (module.key.clone(), module.meta)).collect::<FxHashMap<_, _>>();
    let prefers_esm = self.options.format.prefers_esm();

    for module in modules.iter_mut() {
      let ctx = RewriterContext {
        key: &module.key,
        slots: &module.slots,
        options: self.options,
        module_metas: &module_metas,
        emits_esm: module.emits_esm(prefers_esm),
      };
      let symbols = &mut module.symbols;
      module.ast.program.with_mut(|fields| {
        ModuleRewriter::new(ctx, symbols, fields.allocator, diagnostics)
          .visit_program(fields.program);
      });
    }
  }
}

#[cfg(test)]
mod tests {
  use std::sync::Arc;

  use oxc::{semantic::SemanticBuilder, span::SourceType};
  use unchunk_common::{ChunkId, ModuleMeta, NormalizedUnpackOptions};
  use unchunk_ecmascript::EcmaCompiler;

  use super::*;
  use crate::{
    match_stage::table_extractor::extract_module_table,
    scan_stage::{ScanStage, ast_scanner::AstScanner},
    utils::{render_module::render_module, symbol_table::SymbolTable},
  };

  #[test]
  fn rewriting_keeps_classification() {
    let options: SharedOptions = Arc::new(NormalizedUnpackOptions::default());
    let mut diagnostics = vec![];
    let factories = extract_module_table(
      r#"{ 1: function (e, t, n) {
        "use strict";
        n.r(t);
        n.d(t, { a: () => a, b: function () { return b; } });
        var a = n(2), b = a.x + 1;
      } }"#,
      &mut diagnostics,
    )
    .unwrap();
    let chunk_id = ChunkId::Int(0);
    let mut modules = ScanStage::new(&options, &chunk_id).scan(factories, &mut diagnostics).modules;
    RewriteStage::new(&options).rewrite(&mut modules, &mut diagnostics);
    assert!(diagnostics.is_empty(), "{diagnostics:?}");

    let module = modules.iter_mut().next().unwrap();
    assert_eq!(module.meta, ModuleMeta::empty());
    let source = render_module(module, false);
    assert!(!source.contains("use strict"));

    let ast = EcmaCompiler::parse(source, SourceType::mjs()).unwrap();
    let scoping = SemanticBuilder::new().build(ast.program()).semantic.into_scoping();
    let rescanned = AstScanner::new(&module.key, &module.slots, SymbolTable::new(scoping))
      .scan(ast.program());
    assert_eq!(rescanned.meta, module.meta);
    assert!(rescanned.import_records.is_empty());
  }
}
