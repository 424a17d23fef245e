use oxc::{
  allocator::TakeIn,
  ast::ast::{self, Expression},
  ast_visit::{VisitMut, walk_mut},
  semantic::ScopeFlags,
  span::GetSpan,
  syntax::operator::AssignmentOperator,
};
use unchunk_common::FactorySlots;

use super::ModuleRewriter;

impl<'ast> VisitMut<'ast> for ModuleRewriter<'_, 'ast> {
  fn visit_program(&mut self, program: &mut ast::Program<'ast>) {
    if self.ctx.emits_esm {
      program.directives.retain(|directive| directive.directive.as_str() != "use strict");
    }

    let body = program.body.take_in(self.alloc());
    program.body.reserve(body.len());
    for stmt in body {
      for mut stmt in self.rewrite_top_level_statement(stmt) {
        self.visit_statement(&mut stmt);
        program.body.extend(self.hoisted.drain(..));
        program.body.push(stmt);
      }
    }
  }

  fn visit_function(&mut self, func: &mut ast::Function<'ast>, flags: ScopeFlags) {
    self.enter_function_like(func.r#async);
    walk_mut::walk_function(self, func, flags);
    self.leave_function_like();
  }

  fn visit_arrow_function_expression(&mut self, arrow: &mut ast::ArrowFunctionExpression<'ast>) {
    self.enter_function_like(arrow.r#async);
    walk_mut::walk_arrow_function_expression(self, arrow);
    self.leave_function_like();
  }

  // `await` is invalid in the parameters of an async function as well
  fn visit_formal_parameters(&mut self, params: &mut ast::FormalParameters<'ast>) {
    self.async_stack.push(false);
    walk_mut::walk_formal_parameters(self, params);
    self.async_stack.pop();
  }

  // `await` is invalid in field initializers and static blocks
  fn visit_class_body(&mut self, body: &mut ast::ClassBody<'ast>) {
    self.enter_function_like(false);
    walk_mut::walk_class_body(self, body);
    self.leave_function_like();
  }

  fn visit_expression(&mut self, expr: &mut Expression<'ast>) {
    if let Some(key) = self.matcher().as_require_call_expr(expr) {
      let path = self.ctx.import_path(&key);
      let span = expr.span();
      *expr = if self.ctx.emits_esm && self.in_async_function() {
        self.snippet.await_import_expr(&path, span)
      } else {
        self.snippet.require_call_expr(&path, span)
      };
      return;
    }

    if let Expression::AssignmentExpression(assign) = &mut *expr {
      if self.ctx.emits_esm
        && assign.operator == AssignmentOperator::Assign
        && self.matcher().is_module_exports_assignment(assign)
      {
        if self.function_depth == 0 {
          self.visit_expression(&mut assign.right);
          let span = assign.span;
          let value = assign.right.take_in(self.alloc());
          *expr = self.hoist_default_export(value, span);
          return;
        }
        self.warning(
          "`module.exports` assigned inside a function is kept in the ESM output".to_string(),
        );
      }
    }

    walk_mut::walk_expression(self, expr);
  }

  fn visit_call_expression(&mut self, call: &mut ast::CallExpression<'ast>) {
    let matcher = self.matcher();
    if matcher.as_exports_definer(call).is_some() {
      self.skipped("exports definer is not a top-level statement, left as is".to_string());
    } else if matcher.is_slot_expr(&call.callee, FactorySlots::REQUIRE)
      && matcher.as_require_call(call).is_none()
    {
      self.skipped("require of a non-literal id is left as is".to_string());
    }
    walk_mut::walk_call_expression(self, call);
  }

  fn visit_identifier_reference(&mut self, ident: &mut ast::IdentifierReference<'ast>) {
    let Some((idx, replacement)) = self.slot_replacement(ident) else {
      return;
    };
    if self.symbols.is_bound(replacement) {
      if !self.reported_bound_slot[idx] {
        self.reported_bound_slot[idx] = true;
        self.skipped(format!(
          "`{}` isn't renamed to `{replacement}`, the module declares `{replacement}` itself",
          ident.name
        ));
      }
      return;
    }
    ident.name = self.snippet.atom(replacement);
  }
}
