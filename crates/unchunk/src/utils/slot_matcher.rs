use oxc::ast::ast::{self, Argument, Expression};
use unchunk_common::{FactorySlots, ModuleKey};
use unchunk_ecmascript::ExpressionExt;

use super::symbol_table::SymbolTable;

/// Recognizes the uses of factory parameters that the scan and rewrite stages care about.
///
/// A parameter use only counts when the reference is free, so a local that shadows a
/// parameter is never mistaken for it.
#[derive(Clone, Copy)]
pub struct SlotMatcher<'me> {
  slots: &'me FactorySlots,
  symbols: &'me SymbolTable,
}

impl<'me> SlotMatcher<'me> {
  pub fn new(slots: &'me FactorySlots, symbols: &'me SymbolTable) -> Self {
    Self { slots, symbols }
  }

  /// `ident` is a free reference to the parameter in `slot`.
  pub fn is_slot(self, ident: &ast::IdentifierReference, slot: usize) -> bool {
    self.slots.get(slot).is_some_and(|name| ident.name.as_str() == name)
      && self.symbols.is_free(ident)
  }

  pub fn is_slot_expr(self, expr: &Expression, slot: usize) -> bool {
    expr.as_identifier().is_some_and(|ident| self.is_slot(ident, slot))
  }

  /// `n(123)` or `n("abc")`, returns the required key.
  pub fn as_require_call(self, call: &ast::CallExpression) -> Option<ModuleKey> {
    if !self.is_slot_expr(&call.callee, FactorySlots::REQUIRE) || call.arguments.len() != 1 {
      return None;
    }
    match &call.arguments[0] {
      Argument::NumericLiteral(lit) => Some(ModuleKey::from_number(lit.value)),
      Argument::StringLiteral(lit) => Some(ModuleKey::from(lit.value.as_str())),
      _ => None,
    }
  }

  pub fn as_require_call_expr(self, expr: &Expression) -> Option<ModuleKey> {
    expr.as_call_expression().and_then(|call| self.as_require_call(call))
  }

  /// `n.d` in `n.d(...)`, returns the helper name.
  pub fn as_runtime_helper<'a>(self, member: &'a ast::StaticMemberExpression) -> Option<&'a str> {
    let object = member.object.as_identifier()?;
    self.is_slot(object, FactorySlots::REQUIRE).then_some(member.property.name.as_str())
  }

  /// `n.<helper>(...)`, returns the helper name.
  pub fn as_runtime_helper_call<'a>(self, call: &'a ast::CallExpression) -> Option<&'a str> {
    call.callee.as_static_member_expression().and_then(|member| self.as_runtime_helper(member))
  }

  /// `e.exports`
  pub fn is_module_exports(self, member: &ast::StaticMemberExpression) -> bool {
    member.property.name.as_str() == "exports"
      && self.is_slot_expr(&member.object, FactorySlots::MODULE)
  }

  /// `e.exports = ...` or any other assignment operator.
  pub fn is_module_exports_assignment(self, expr: &ast::AssignmentExpression) -> bool {
    matches!(
      &expr.left,
      ast::AssignmentTarget::StaticMemberExpression(member) if self.is_module_exports(member)
    )
  }

  /// `n.r(t)`
  pub fn is_namespace_marker(self, call: &ast::CallExpression) -> bool {
    self.as_runtime_helper_call(call) == Some("r")
      && call.arguments.len() == 1
      && call.arguments[0]
        .as_expression()
        .is_some_and(|arg| self.is_slot_expr(arg, FactorySlots::EXPORTS))
  }

  /// `n.d(t, { ... })`, returns the object of export getters.
  pub fn as_exports_definer<'a, 'ast>(
    self,
    call: &'a ast::CallExpression<'ast>,
  ) -> Option<&'a ast::ObjectExpression<'ast>> {
    if self.as_runtime_helper_call(call) != Some("d") || call.arguments.len() != 2 {
      return None;
    }
    let target = call.arguments[0].as_expression()?;
    if !self.is_slot_expr(target, FactorySlots::EXPORTS) {
      return None;
    }
    match &call.arguments[1] {
      Argument::ObjectExpression(object) => Some(object),
      _ => None,
    }
  }
}
