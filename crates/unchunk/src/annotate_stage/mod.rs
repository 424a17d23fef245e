mod variable_collector;

use std::collections::BTreeMap;

use oxc::ast_visit::Visit as _;
use unchunk_common::VariableAnnotation;
use unchunk_error::BuildDiagnostic;

use self::variable_collector::VariableCollector;
use crate::types::{IndexModules, SharedOptions, module_record::ModuleRecord};

/// Pass 3. Numbers the bindings of each module and applies the `rename_locals` overrides, which
/// refer to bindings by those numbers.
pub struct AnnotateStage<'a> {
  options: &'a SharedOptions,
}

impl<'a> AnnotateStage<'a> {
  pub fn new(options: &'a SharedOptions) -> Self {
    Self { options }
  }

  pub fn annotate(&self, modules: &mut IndexModules, diagnostics: &mut Vec<BuildDiagnostic>) {
    for module in modules.iter_mut() {
      let rename_locals = self
        .options
        .override_for(&module.key)
        .map(|module_override| &module_override.rename_locals)
        .filter(|rename_locals| !rename_locals.is_empty());
      if self.options.annotate_variables || rename_locals.is_some() {
        module.annotations = Self::annotate_module(module, rename_locals, diagnostics);
      }
    }
  }

  fn annotate_module(
    module: &mut ModuleRecord,
    rename_locals: Option<&BTreeMap<u32, String>>,
    diagnostics: &mut Vec<BuildDiagnostic>,
  ) -> Vec<VariableAnnotation> {
    let mut collector = VariableCollector::default();
    collector.visit_program(module.ast.program());
    let bindings = collector.into_bindings();

    for (&ordinal, name) in rename_locals.into_iter().flatten() {
      let Some((symbol, original)) = usize::try_from(ordinal).ok().and_then(|idx| bindings.get(idx))
      else {
        diagnostics.push(BuildDiagnostic::skipped(
          Some(module.key.as_str()),
          format!("can't rename #{ordinal} to `{name}`, the module has no such binding"),
        ));
        continue;
      };
      if let Err(err) = module.symbols.try_rename(*symbol, name) {
        diagnostics.push(BuildDiagnostic::skipped(
          Some(module.key.as_str()),
          format!("can't rename #{ordinal} `{original}` to `{name}`: {err}"),
        ));
      }
    }

    bindings
      .into_iter()
      .zip(0u32..)
      .map(|((symbol, name), ordinal)| VariableAnnotation {
        ordinal,
        renamed_to: module.symbols.renamed(symbol).cloned(),
        name,
      })
      .collect()
  }
}
