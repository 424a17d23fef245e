use oxc::ast::ast;

pub trait ExpressionExt<'ast> {
  fn as_identifier(&self) -> Option<&ast::IdentifierReference<'ast>>;
  fn as_call_expression(&self) -> Option<&ast::CallExpression<'ast>>;
  fn as_static_member_expression(&self) -> Option<&ast::StaticMemberExpression<'ast>>;

  fn is_object_expression(&self) -> bool;
}

impl<'ast> ExpressionExt<'ast> for ast::Expression<'ast> {
  fn as_identifier(&self) -> Option<&ast::IdentifierReference<'ast>> {
    if let ast::Expression::Identifier(ident) = self { Some(ident) } else { None }
  }

  fn as_call_expression(&self) -> Option<&ast::CallExpression<'ast>> {
    let ast::Expression::CallExpression(expr) = self else {
      return None;
    };
    Some(expr)
  }

  fn as_static_member_expression(&self) -> Option<&ast::StaticMemberExpression<'ast>> {
    let ast::Expression::StaticMemberExpression(expr) = self else {
      return None;
    };
    Some(expr)
  }

  fn is_object_expression(&self) -> bool {
    matches!(self.without_parentheses(), ast::Expression::ObjectExpression(_))
  }
}
