use arcstr::ArcStr;
use oxc::{ast::ast::BindingIdentifier, ast_visit::Visit, semantic::SymbolId};
use rustc_hash::FxHashSet;

/// Collects every symbol of a module at its first binding identifier, in source order.
#[derive(Default)]
pub struct VariableCollector {
  seen: FxHashSet<SymbolId>,
  bindings: Vec<(SymbolId, ArcStr)>,
}

impl VariableCollector {
  pub fn into_bindings(self) -> Vec<(SymbolId, ArcStr)> {
    self.bindings
  }
}

impl<'ast> Visit<'ast> for VariableCollector {
  fn visit_binding_identifier(&mut self, ident: &BindingIdentifier<'ast>) {
    if let Some(symbol) = ident.symbol_id.get() {
      if self.seen.insert(symbol) {
        self.bindings.push((symbol, ident.name.as_str().into()));
      }
    }
  }
}
