use oxc::{
  allocator::{Allocator, TakeIn},
  ast::ast::{self, Expression, Statement},
  ast_visit::VisitMut,
  span::GetSpan,
};
use unchunk_ecmascript::AstSnippet;

/// Normalizes the top level of a factory body so every rewrite site is a statement of its own.
pub struct PreProcessor<'ast> {
  snippet: AstSnippet<'ast>,
}

impl<'ast> PreProcessor<'ast> {
  pub fn new(alloc: &'ast Allocator) -> Self {
    Self { snippet: AstSnippet::new(alloc) }
  }
}

impl<'ast> VisitMut<'ast> for PreProcessor<'ast> {
  fn visit_program(&mut self, program: &mut ast::Program<'ast>) {
    let body = program.body.take_in(self.snippet.alloc());
    program.body.reserve(body.len());

    for stmt in body {
      match stmt {
        // split `n.r(t), n.d(t, {...});` into `n.r(t); n.d(t, {...});`
        Statement::ExpressionStatement(mut stmt) => {
          if let Expression::SequenceExpression(seq) = &mut stmt.expression {
            program.body.extend(
              seq
                .expressions
                .take_in(self.snippet.alloc())
                .into_iter()
                .map(|expr| self.snippet.builder.statement_expression(expr.span(), expr)),
            );
          } else {
            program.body.push(Statement::ExpressionStatement(stmt));
          }
        }
        // split `var a = 1, b = 2;` into `var a = 1; var b = 2;`
        Statement::VariableDeclaration(mut decl) if decl.declarations.len() > 1 => {
          let (kind, declare) = (decl.kind, decl.declare);
          program.body.extend(
            decl.declarations.take_in(self.snippet.alloc()).into_iter().map(|declarator| {
              Statement::VariableDeclaration(self.snippet.builder.alloc_variable_declaration(
                declarator.span,
                kind,
                self.snippet.builder.vec1(declarator),
                declare,
              ))
            }),
          );
        }
        stmt => program.body.push(stmt),
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use oxc::ast_visit::VisitMut as _;
  use unchunk_ecmascript::EcmaCompiler;

  use super::*;

  fn pre_process(source: &str) -> String {
    let mut ast = EcmaCompiler::parse_factory_body(source).unwrap();
    ast.program.with_mut(|fields| PreProcessor::new(fields.allocator).visit_program(fields.program));
    EcmaCompiler::print(&ast).code
  }

  #[test]
  fn splits_top_level_sequences_and_declarations() {
    assert_eq!(pre_process("n.r(t), n.d(t, {});"), "n.r(t);\nn.d(t, {});\n");
    assert_eq!(pre_process("var a = n(1), b = a.x;"), "var a = n(1);\nvar b = a.x;\n");
  }

  #[test]
  fn nested_statements_are_left_alone() {
    assert_eq!(
      pre_process("function f() { var a = 1, b = 2; }"),
      "function f() {\n\tvar a = 1, b = 2;\n}\n"
    );
  }
}
