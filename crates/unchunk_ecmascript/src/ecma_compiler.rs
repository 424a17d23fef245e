use arcstr::ArcStr;
use oxc::{
  allocator::Allocator,
  codegen::{Codegen, CodegenReturn},
  parser::{ParseOptions, Parser},
  span::SourceType,
};
use unchunk_error::BuildResult;

use crate::ecma_ast::{EcmaAst, ProgramCell, ProgramDependent, ProgramOwner};

pub struct EcmaCompiler;

impl EcmaCompiler {
  pub fn parse(source: impl Into<ArcStr>, source_type: SourceType) -> BuildResult<EcmaAst> {
    Self::parse_with_options(source.into(), source_type, ParseOptions::default())
  }

  /// Parses the body of a module factory as a standalone program.
  ///
  /// Factories are plain functions, so their bodies are sloppy-mode scripts that may `return`
  /// at the top level.
  pub fn parse_factory_body(source: impl Into<ArcStr>) -> BuildResult<EcmaAst> {
    Self::parse_with_options(
      source.into(),
      SourceType::cjs(),
      ParseOptions { allow_return_outside_function: true, ..ParseOptions::default() },
    )
  }

  fn parse_with_options(
    source: ArcStr,
    source_type: SourceType,
    options: ParseOptions,
  ) -> BuildResult<EcmaAst> {
    let owner = ProgramOwner { source, allocator: Allocator::default() };
    let program = ProgramCell::try_new(owner, |owner| {
      let ret =
        Parser::new(&owner.allocator, &owner.source, source_type).with_options(options).parse();
      if ret.panicked || !ret.errors.is_empty() {
        Err(
          ret
            .errors
            .iter()
            .map(|error| anyhow::anyhow!("Parse failed, got: {:?}", error.message))
            .collect::<Vec<_>>(),
        )
      } else {
        Ok(ProgramDependent { program: ret.program })
      }
    })
    .map_err(|errors| {
      if errors.is_empty() { vec![anyhow::anyhow!("Parse failed")] } else { errors }
    })?;

    Ok(EcmaAst { program, source_type })
  }

  pub fn print(ast: &EcmaAst) -> CodegenReturn {
    Codegen::new().build(ast.program())
  }
}

#[test]
fn basic_test() {
  let ast = EcmaCompiler::parse("const a = 1;".to_string(), SourceType::default()).unwrap();
  let code = EcmaCompiler::print(&ast).code;
  assert_eq!(code, "const a = 1;\n");
}

#[test]
fn factory_body_allows_top_level_return() {
  let ast = EcmaCompiler::parse_factory_body("if (a) return;\nb();").unwrap();
  assert_eq!(ast.program().body.len(), 2);
  assert!(EcmaCompiler::parse("if (a) return;", SourceType::cjs()).is_err());
}

#[test]
fn parse_error_is_reported() {
  let err = EcmaCompiler::parse_factory_body("var = ;").unwrap_err();
  assert!(!err.is_empty());
}
