use arcstr::ArcStr;
use oxc::{
  ast_visit::VisitMut as _,
  semantic::{Scoping, SemanticBuilder},
};
use unchunk_ecmascript::{EcmaAst, EcmaCompiler};
use unchunk_error::BuildResult;

use crate::scan_stage::ast_scanner::PreProcessor;

/// Parses a factory body into its own tree, normalizes the top level and builds the scopes.
pub fn parse_to_ecma_ast(body: ArcStr) -> BuildResult<(EcmaAst, Scoping)> {
  let mut ast = EcmaCompiler::parse_factory_body(body)?;

  ast.program.with_mut(|fields| PreProcessor::new(fields.allocator).visit_program(fields.program));

  let semantic_ret = SemanticBuilder::new().build(ast.program());
  if !semantic_ret.errors.is_empty() {
    Err(
      semantic_ret
        .errors
        .iter()
        .map(|error| anyhow::anyhow!("Semantic analysis failed, got: {:?}", error.message))
        .collect::<Vec<_>>(),
    )?;
  }

  let scoping = semantic_ret.semantic.into_scoping();
  Ok((ast, scoping))
}
