use oxc::{
  allocator::{Allocator, Box, Dummy},
  ast::{
    AstBuilder, NONE,
    ast::{
      self, Argument, BindingIdentifier, Expression, IdentifierReference,
      ImportDeclarationSpecifier, ImportOrExportKind, ModuleExportName, Statement,
      VariableDeclarationKind,
    },
  },
  span::{Atom, SPAN, Span},
};
use unchunk_utils::ecmascript::is_validate_identifier_name;

type PassedStr<'a> = &'a str;

// `AstBuilder` is more suitable name, but it's already used in oxc.
pub struct AstSnippet<'ast> {
  pub builder: AstBuilder<'ast>,
}

impl<'ast> AstSnippet<'ast> {
  pub fn new(alloc: &'ast Allocator) -> Self {
    Self { builder: AstBuilder::new(alloc) }
  }

  #[inline]
  pub fn alloc(&self) -> &'ast Allocator {
    self.builder.allocator
  }

  pub fn atom(&self, value: &str) -> Atom<'ast> {
    self.builder.atom(value)
  }

  #[inline]
  pub fn id(&self, name: PassedStr, span: Span) -> BindingIdentifier<'ast> {
    self.builder.binding_identifier(span, self.atom(name))
  }

  #[inline]
  pub fn id_name(&self, name: PassedStr, span: Span) -> ast::IdentifierName<'ast> {
    self.builder.identifier_name(span, self.atom(name))
  }

  #[inline]
  pub fn id_ref_expr(&self, name: PassedStr, span: Span) -> Expression<'ast> {
    self.builder.expression_identifier(span, self.atom(name))
  }

  /// A copy of `ident` that still resolves to the same binding.
  pub fn id_ref_like(
    &self,
    ident: &IdentifierReference<'ast>,
    span: Span,
  ) -> IdentifierReference<'ast> {
    match ident.reference_id.get() {
      Some(reference_id) => {
        self.builder.identifier_reference_with_reference_id(span, ident.name, reference_id)
      }
      None => self.builder.identifier_reference(span, ident.name),
    }
  }

  pub fn string_literal_expr(&self, value: PassedStr, span: Span) -> Expression<'ast> {
    self.builder.expression_string_literal(span, self.atom(value), None)
  }

  /// `[object].[property]`
  pub fn literal_prop_access_member_expr_expr(
    &self,
    object: PassedStr,
    property: PassedStr,
  ) -> Expression<'ast> {
    Expression::StaticMemberExpression(self.builder.alloc_static_member_expression(
      SPAN,
      self.id_ref_expr(object, SPAN),
      self.id_name(property, SPAN),
      false,
    ))
  }

  /// `require([source])`
  pub fn require_call_expr(&self, source: PassedStr, span: Span) -> Expression<'ast> {
    self.builder.expression_call(
      span,
      self.builder.expression_identifier(SPAN, "require"),
      NONE,
      self.builder.vec1(Argument::from(self.string_literal_expr(source, SPAN))),
      false,
    )
  }

  /// `(await import([source]))`
  pub fn await_import_expr(&self, source: PassedStr, span: Span) -> Expression<'ast> {
    let import_expr =
      self.builder.expression_import(SPAN, self.string_literal_expr(source, SPAN), None, None);
    self.builder.expression_parenthesized(span, self.builder.expression_await(SPAN, import_expr))
  }

  fn import_decl_stmt(
    &self,
    source: PassedStr,
    specifier: Option<ImportDeclarationSpecifier<'ast>>,
    span: Span,
  ) -> Statement<'ast> {
    Statement::ImportDeclaration(self.builder.alloc_import_declaration(
      span,
      specifier.map(|specifier| self.builder.vec1(specifier)),
      self.builder.string_literal(SPAN, self.atom(source), None),
      None,
      NONE,
      ImportOrExportKind::Value,
    ))
  }

  /// `import [source]`
  pub fn import_side_effect_stmt(&self, source: PassedStr, span: Span) -> Statement<'ast> {
    self.import_decl_stmt(source, None, span)
  }

  /// `import * as [local] from [source]`
  pub fn import_star_stmt(
    &self,
    source: PassedStr,
    local: BindingIdentifier<'ast>,
    span: Span,
  ) -> Statement<'ast> {
    let specifier = ImportDeclarationSpecifier::ImportNamespaceSpecifier(
      self.builder.alloc_import_namespace_specifier(SPAN, local),
    );
    self.import_decl_stmt(source, Some(specifier), span)
  }

  /// `import [local] from [source]`
  pub fn import_default_stmt(
    &self,
    source: PassedStr,
    local: BindingIdentifier<'ast>,
    span: Span,
  ) -> Statement<'ast> {
    let specifier = ImportDeclarationSpecifier::ImportDefaultSpecifier(
      self.builder.alloc_import_default_specifier(SPAN, local),
    );
    self.import_decl_stmt(source, Some(specifier), span)
  }

  /// `import { [imported] as [local] } from [source]`
  pub fn import_named_stmt(
    &self,
    source: PassedStr,
    imported: PassedStr,
    local: BindingIdentifier<'ast>,
    span: Span,
  ) -> Statement<'ast> {
    let specifier =
      ImportDeclarationSpecifier::ImportSpecifier(self.builder.alloc_import_specifier(
        SPAN,
        self.module_export_name(imported),
        local,
        ImportOrExportKind::Value,
      ));
    self.import_decl_stmt(source, Some(specifier), span)
  }

  /// Names that aren't legal identifiers are emitted as string literals, e.g. `export { a as "b-c" }`.
  pub fn module_export_name(&self, name: PassedStr) -> ModuleExportName<'ast> {
    if is_validate_identifier_name(name) {
      self.builder.module_export_name_identifier_name(SPAN, self.atom(name))
    } else {
      self.builder.module_export_name_string_literal(SPAN, self.atom(name), None)
    }
  }

  /// convert `Expression` to
  /// export default ${Expression}
  pub fn export_default_expr_stmt(&self, expr: Expression<'ast>, span: Span) -> Statement<'ast> {
    Statement::from(self.builder.module_declaration_export_default_declaration(
      span,
      self.builder.module_export_name_identifier_name(SPAN, "default"),
      ast::ExportDefaultDeclarationKind::from(expr),
    ))
  }

  /// `export { [local] as [exported] }`
  ///
  /// `local` is moved in rather than rebuilt so it keeps pointing at its symbol.
  pub fn export_local_stmt(
    &self,
    local: IdentifierReference<'ast>,
    exported: PassedStr,
    span: Span,
  ) -> Statement<'ast> {
    let specifier = self.builder.export_specifier(
      SPAN,
      ModuleExportName::IdentifierReference(local),
      self.module_export_name(exported),
      ImportOrExportKind::Value,
    );
    Statement::from(self.builder.module_declaration_export_named_declaration(
      span,
      None,
      self.builder.vec1(specifier),
      None,
      ImportOrExportKind::Value,
      NONE,
    ))
  }

  /// `Object.defineProperty([target], "[key]", { enumerable: true, get: [getter] })`
  pub fn define_getter_stmt(
    &self,
    target: PassedStr,
    key: PassedStr,
    getter: Expression<'ast>,
    span: Span,
  ) -> Statement<'ast> {
    let mut descriptor = ast::ObjectExpression::dummy(self.alloc());
    descriptor
      .properties
      .push(self.init_property("enumerable", self.builder.expression_boolean_literal(SPAN, true)));
    descriptor.properties.push(self.init_property("get", getter));

    let call = self.builder.expression_call(
      SPAN,
      self.literal_prop_access_member_expr_expr("Object", "defineProperty"),
      NONE,
      self.builder.vec_from_iter([
        Argument::from(self.id_ref_expr(target, SPAN)),
        Argument::from(self.string_literal_expr(key, SPAN)),
        Argument::ObjectExpression(Box::new_in(descriptor, self.alloc())),
      ]),
      false,
    );
    self.builder.statement_expression(span, call)
  }

  /// `[key]: [value]`
  fn init_property(
    &self,
    key: PassedStr,
    value: Expression<'ast>,
  ) -> ast::ObjectPropertyKind<'ast> {
    ast::ObjectPropertyKind::ObjectProperty(Box::new_in(
      ast::ObjectProperty {
        key: self.builder.property_key_static_identifier(SPAN, self.atom(key)),
        value,
        ..ast::ObjectProperty::dummy(self.alloc())
      },
      self.alloc(),
    ))
  }

  /// `const [binding] = [init]`
  pub fn const_decl_stmt(
    &self,
    binding: BindingIdentifier<'ast>,
    init: Expression<'ast>,
    span: Span,
  ) -> Statement<'ast> {
    let kind = VariableDeclarationKind::Const;
    Statement::from(self.builder.declaration_variable(
      span,
      kind,
      self.builder.vec1(self.builder.variable_declarator(
        SPAN,
        kind,
        self.builder.binding_pattern(
          ast::BindingPatternKind::BindingIdentifier(self.builder.alloc(binding)),
          NONE,
          false,
        ),
        Some(init),
        false,
      )),
      false,
    ))
  }
}
