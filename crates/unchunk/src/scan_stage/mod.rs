pub mod ast_scanner;
pub mod factory_validator;

use itertools::Itertools;
use rustc_hash::{FxHashMap, FxHashSet};
use unchunk_common::{ChunkId, ModuleId, ModuleKey};
use unchunk_error::BuildDiagnostic;

use self::{ast_scanner::AstScanner, factory_validator::FactoryValidator};
use crate::{
  graph::DependencyGraph,
  types::{
    IndexModules, SharedOptions, module_factory::ModuleFactory, module_record::ModuleRecord,
  },
  utils::{resolve_id::resolve_id, symbol_table::SymbolTable},
};

pub struct ScanStageOutput {
  pub modules: IndexModules,
  /// Edges of every scanned module, with the modules declared in this chunk.
  pub graph: DependencyGraph,
}

pub struct ScanStage<'a> {
  options: &'a SharedOptions,
  chunk_id: &'a ChunkId,
}

impl<'a> ScanStage<'a> {
  pub fn new(options: &'a SharedOptions, chunk_id: &'a ChunkId) -> Self {
    Self { options, chunk_id }
  }

  /// Validates, parses and scans every factory. Modules that fail any step are reported and
  /// dropped, the rest come back in table order.
  pub fn scan(
    &self,
    factories: Vec<ModuleFactory>,
    diagnostics: &mut Vec<BuildDiagnostic>,
  ) -> ScanStageOutput {
    let mut validator = FactoryValidator::default();
    let mut modules = IndexModules::with_capacity(factories.len());
    let mut graph = DependencyGraph::new();
    let mut seen_keys = FxHashSet::<ModuleKey>::default();
    let mut seen_ids = FxHashMap::<ModuleId, ModuleKey>::default();

    for factory in factories {
      let key = factory.key.clone();
      if !seen_keys.insert(key.clone()) {
        diagnostics.push(BuildDiagnostic::skipped(
          Some(key.as_str()),
          "duplicate key in module table, the first entry is kept",
        ));
        continue;
      }
      let resolved = resolve_id(&key, self.options.override_for(&key));
      if let Some(owner) = seen_ids.get(&resolved.id) {
        diagnostics.push(BuildDiagnostic::skipped(
          Some(key.as_str()),
          format!("module id `{}` is already used by module {owner:?}", resolved.id),
        ));
        continue;
      }

      let validated = match validator.validate(factory) {
        Ok(validated) => validated,
        Err(diagnostic) => {
          diagnostics.push(diagnostic);
          continue;
        }
      };
      seen_ids.insert(resolved.id.clone(), key.clone());

      let scanned = AstScanner::new(&key, &validated.slots, SymbolTable::new(validated.scoping))
        .scan(validated.ast.program());
      diagnostics.extend(scanned.diagnostics);

      let targets = scanned
        .import_records
        .iter()
        .map(|record| resolve_id(&record.module_key, self.options.override_for(&record.module_key)))
        .collect::<Vec<_>>();
      graph.add_module(
        resolved.id.clone(),
        Some(self.chunk_id.clone()),
        scanned.meta.is_commonjs(),
        None,
      );
      targets.iter().for_each(|target| graph.add_edge(&resolved.id, &target.id));

      modules.push(ModuleRecord {
        key,
        resolved,
        slots: validated.slots,
        ast: validated.ast,
        symbols: scanned.symbols,
        meta: scanned.meta,
        import_records: scanned.import_records,
        imports: targets.into_iter().unique_by(|target| target.id.clone()).collect(),
        annotations: Vec::new(),
      });
    }

    ScanStageOutput { modules, graph }
  }
}
