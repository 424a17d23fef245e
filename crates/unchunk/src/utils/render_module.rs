use oxc::ast_visit::VisitMut as _;
use unchunk_ecmascript::EcmaCompiler;

use super::rename_applier::RenameApplier;
use crate::types::module_record::ModuleRecord;

/// Writes the recorded renames into the tree and prints it. With `annotate`, the source ends
/// with one `// #<ordinal> <name>` line per binding.
pub fn render_module(module: &mut ModuleRecord, annotate: bool) -> String {
  if module.symbols.has_renames() {
    let symbols = &module.symbols;
    module.ast.program.with_mut(|fields| {
      RenameApplier::new(symbols, fields.allocator).visit_program(fields.program);
    });
  }

  let mut source = EcmaCompiler::print(&module.ast).code;
  if annotate && !module.annotations.is_empty() {
    if !source.is_empty() && !source.ends_with('\n') {
      source.push('\n');
    }
    for annotation in &module.annotations {
      source.push_str("// ");
      source.push_str(&annotation.to_string());
      source.push('\n');
    }
  }
  source
}
