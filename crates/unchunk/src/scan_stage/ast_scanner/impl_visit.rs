use oxc::{
  ast::ast,
  ast_visit::{Visit, walk},
  syntax::operator::AssignmentOperator,
};
use unchunk_common::RawImportRecord;
use unchunk_ecmascript::ExpressionExt;
use unchunk_error::BuildDiagnostic;

use super::AstScanner;

impl<'ast> Visit<'ast> for AstScanner<'_> {
  fn visit_binding_identifier(&mut self, ident: &ast::BindingIdentifier<'ast>) {
    let Some(symbol) = ident.symbol_id.get() else {
      return;
    };
    // `var a = n(1); var a = 2;` declares `a` twice, it can't become an import
    if self.symbols.name_of(symbol).is_some() {
      self.symbols.mark_written(symbol);
    }
    self.symbols.declare(symbol, &ident.name);
  }

  fn visit_identifier_reference(&mut self, ident: &ast::IdentifierReference<'ast>) {
    if self.symbols.is_free(ident) {
      self.symbols.add_free_name(&ident.name);
    } else if self.symbols.is_write(ident) {
      if let Some(symbol) = self.symbols.symbol_of_reference(ident) {
        self.symbols.mark_written(symbol);
      }
    }
  }

  fn visit_assignment_expression(&mut self, expr: &ast::AssignmentExpression<'ast>) {
    if self.matcher().is_module_exports_assignment(expr) {
      if expr.operator == AssignmentOperator::Assign {
        self.default_export_candidates += 1;
        self.assigns_object_literal |= expr.right.is_object_expression();
      } else {
        self.diagnostics.push(BuildDiagnostic::warning(
          Some(self.key.as_str()),
          format!("`module.exports {} ...` is not an export", expr.operator.as_str()),
        ));
      }
    }
    walk::walk_assignment_expression(self, expr);
  }

  fn visit_call_expression(&mut self, call: &ast::CallExpression<'ast>) {
    if let Some(module_key) = self.matcher().as_require_call(call) {
      self.import_records.push(RawImportRecord::new(module_key, call.span));
    }
    walk::walk_call_expression(self, call);
  }

  fn visit_static_member_expression(&mut self, member: &ast::StaticMemberExpression<'ast>) {
    if let Some(helper) = self.matcher().as_runtime_helper(member) {
      if !matches!(helper, "d" | "r") && !self.reported_helpers.contains(helper) {
        self.reported_helpers.insert(helper.to_string());
        let require = self.slots.require().unwrap_or_default();
        self.diagnostics.push(BuildDiagnostic::not_implemented(
          Some(self.key.as_str()),
          format!("runtime helper `{require}.{helper}` is not supported"),
        ));
      }
    }
    walk::walk_static_member_expression(self, member);
  }
}
