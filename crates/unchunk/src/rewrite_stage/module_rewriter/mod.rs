mod impl_visit_mut;

use oxc::{
  allocator::{Allocator, TakeIn},
  ast::ast::{self, Argument, BindingPatternKind, Expression, ObjectPropertyKind, Statement},
  span::{SPAN, Span},
  syntax::operator::AssignmentOperator,
};
use smallvec::{SmallVec, smallvec};
use unchunk_common::FactorySlots;
use unchunk_ecmascript::{AstSnippet, ExpressionExt};
use unchunk_error::BuildDiagnostic;
use unchunk_utils::ecmascript::to_binding_name;

use super::rewriter_context::RewriterContext;
use crate::utils::{slot_matcher::SlotMatcher, symbol_table::SymbolTable};

type Statements<'ast> = SmallVec<[Statement<'ast>; 1]>;

enum GetterError {
  /// `() => {}`
  Void,
  Unsupported,
}

/// Pass 2 over one module.
///
/// Top-level statements are matched against the rewrite rules first, then every resulting
/// statement is walked for the rules that apply at any depth.
pub struct ModuleRewriter<'me, 'ast> {
  ctx: RewriterContext<'me>,
  snippet: AstSnippet<'ast>,
  symbols: &'me mut SymbolTable,
  diagnostics: &'me mut Vec<BuildDiagnostic>,
  /// Enclosing functions and class bodies.
  function_depth: u32,
  /// `async` flag of each enclosing function, class bodies push `false`.
  async_stack: Vec<bool>,
  /// Statements emitted before the top-level statement being walked.
  hoisted: Vec<Statement<'ast>>,
  /// `[exports, module]`, set once the module is reported for binding the name itself.
  reported_bound_slot: [bool; 2],
}

impl<'me, 'ast> ModuleRewriter<'me, 'ast> {
  pub fn new(
    ctx: RewriterContext<'me>,
    symbols: &'me mut SymbolTable,
    alloc: &'ast Allocator,
    diagnostics: &'me mut Vec<BuildDiagnostic>,
  ) -> Self {
    Self {
      ctx,
      snippet: AstSnippet::new(alloc),
      symbols,
      diagnostics,
      function_depth: 0,
      async_stack: Vec::new(),
      hoisted: Vec::new(),
      reported_bound_slot: [false; 2],
    }
  }

  #[inline]
  fn matcher(&self) -> SlotMatcher<'_> {
    SlotMatcher::new(self.ctx.slots, self.symbols)
  }

  #[inline]
  fn alloc(&self) -> &'ast Allocator {
    self.snippet.alloc()
  }

  fn skipped(&mut self, message: String) {
    self.diagnostics.push(BuildDiagnostic::skipped(Some(self.ctx.key.as_str()), message));
  }

  fn warning(&mut self, message: String) {
    self.diagnostics.push(BuildDiagnostic::warning(Some(self.ctx.key.as_str()), message));
  }

  fn in_async_function(&self) -> bool {
    self.async_stack.last().copied().unwrap_or(false)
  }

  fn enter_function_like(&mut self, is_async: bool) {
    self.function_depth += 1;
    self.async_stack.push(is_async);
  }

  fn leave_function_like(&mut self) {
    self.function_depth -= 1;
    self.async_stack.pop();
  }

  fn rewrite_top_level_statement(&mut self, mut stmt: Statement<'ast>) -> Statements<'ast> {
    let esm = self.ctx.emits_esm;
    match &mut stmt {
      Statement::ExpressionStatement(expr_stmt) => {
        let span = expr_stmt.span;
        match &mut expr_stmt.expression {
          Expression::CallExpression(call) => {
            let matcher = self.matcher();
            if matcher.is_namespace_marker(call) {
              return smallvec![];
            }
            if matcher.as_exports_definer(call).is_some() {
              return self.rewrite_exports_definer(call);
            }
            if let Some(key) = matcher.as_require_call(call).filter(|_| esm) {
              let path = self.ctx.import_path(&key);
              return smallvec![self.snippet.import_side_effect_stmt(&path, span)];
            }
          }
          Expression::AssignmentExpression(assign)
            if esm
              && assign.operator == AssignmentOperator::Assign
              && self.matcher().is_module_exports_assignment(assign) =>
          {
            let value = assign.right.take_in(self.alloc());
            return smallvec![self.snippet.export_default_expr_stmt(value, span)];
          }
          _ => {}
        }
      }
      Statement::VariableDeclaration(decl) if esm => {
        if let Some(import) = self.rewrite_require_declaration(decl) {
          return smallvec![import];
        }
      }
      _ => {}
    }
    smallvec![stmt]
  }

  /// `var x = n(1)` -> `import * as x from "./1"` or `import x from "./1"`
  ///
  /// `var x = n(1).foo` -> `import { foo as x } from "./1"`, then `x` is renamed to `foo`.
  fn rewrite_require_declaration(
    &mut self,
    decl: &mut ast::VariableDeclaration<'ast>,
  ) -> Option<Statement<'ast>> {
    if decl.declarations.len() != 1 {
      return None;
    }
    let span = decl.span;
    let declarator = decl.declarations.first_mut()?;
    let BindingPatternKind::BindingIdentifier(binding) = &mut declarator.id.kind else {
      return None;
    };
    let symbol = binding.symbol_id.get()?;
    if self.symbols.is_written(symbol) {
      return None;
    }
    let init = declarator.init.as_ref()?.without_parentheses();
    let matcher = self.matcher();

    if let Some(key) = matcher.as_require_call_expr(init) {
      let path = self.ctx.import_path(&key);
      let local = (**binding).take_in(self.alloc());
      return Some(if self.ctx.has_default_export(&key) {
        self.snippet.import_default_stmt(&path, local, span)
      } else {
        self.snippet.import_star_stmt(&path, local, span)
      });
    }

    let member = init.as_static_member_expression()?;
    let key = matcher.as_require_call_expr(member.object.without_parentheses())?;
    let imported = member.property.name.as_str();
    let path = self.ctx.import_path(&key);
    let local = (**binding).take_in(self.alloc());
    let import = self.snippet.import_named_stmt(&path, imported, local, span);

    let name = to_binding_name(imported);
    if let Err(err) = self.symbols.try_rename(symbol, &name) {
      self.warning(format!("can't rename the import of `{imported}` to `{name}`: {err}"));
    }
    Some(import)
  }

  /// `n.d(t, { a: () => b })` -> `export { b as a }`, or
  /// `Object.defineProperty(exports, "a", { enumerable: true, get: () => b })` for CommonJS.
  fn rewrite_exports_definer(
    &mut self,
    call: &mut ast::CallExpression<'ast>,
  ) -> Statements<'ast> {
    let Some(Argument::ObjectExpression(object)) = call.arguments.get_mut(1) else {
      return smallvec![];
    };

    let mut stmts = Statements::new();
    for property in object.properties.take_in(self.alloc()) {
      let ObjectPropertyKind::ObjectProperty(mut prop) = property else {
        self.skipped("spread element in exports definer".to_string());
        continue;
      };
      let key = if prop.computed { None } else { prop.key.static_name() };
      let Some(key) = key.map(|key| key.to_string()) else {
        self.skipped("computed key in exports definer".to_string());
        continue;
      };
      let span = prop.span;
      if let Some(stmt) = self.rewrite_export_property(&key, &mut prop.value, span) {
        stmts.push(stmt);
      }
    }
    stmts
  }

  fn rewrite_export_property(
    &mut self,
    key: &str,
    getter: &mut Expression<'ast>,
    span: Span,
  ) -> Option<Statement<'ast>> {
    let local = match Self::exported_local(getter) {
      Ok(local) => local,
      Err(GetterError::Void) => {
        self.diagnostics.push(BuildDiagnostic::not_implemented(
          Some(self.ctx.key.as_str()),
          format!("void export `{key}`"),
        ));
        return None;
      }
      Err(GetterError::Unsupported) => {
        self.skipped(format!("export `{key}` has an unsupported getter"));
        return None;
      }
    };

    if !self.ctx.emits_esm {
      let getter = getter.take_in(self.alloc());
      return Some(self.snippet.define_getter_stmt("exports", key, getter, span));
    }

    if self.symbols.is_free(local) {
      let name = local.name.as_str();
      self.skipped(format!("export `{key}` refers to `{name}`, which is never declared"));
      return None;
    }
    let symbol = self.symbols.symbol_of_reference(local);
    let local = self.snippet.id_ref_like(local, SPAN);
    if let Some(symbol) = symbol.filter(|_| key != "default") {
      let name = to_binding_name(key);
      if let Err(err) = self.symbols.try_rename(symbol, &name) {
        let local = &local.name;
        self.warning(format!("can't rename `{local}` to `{name}` for export `{key}`: {err}"));
      }
    }
    Some(self.snippet.export_local_stmt(local, key, span))
  }

  /// `() => a`, `() => { return a }` or `function () { return a }`, returns `a`.
  fn exported_local<'g>(
    getter: &'g Expression<'ast>,
  ) -> Result<&'g ast::IdentifierReference<'ast>, GetterError> {
    let (params, body) = match getter.without_parentheses() {
      Expression::ArrowFunctionExpression(arrow) if !arrow.r#async => (&arrow.params, &arrow.body),
      Expression::FunctionExpression(func) if !func.r#async && !func.generator => {
        (&func.params, func.body.as_ref().ok_or(GetterError::Unsupported)?)
      }
      _ => return Err(GetterError::Unsupported),
    };
    if !params.items.is_empty() || params.rest.is_some() {
      return Err(GetterError::Unsupported);
    }

    let value = match &body.statements[..] {
      [] => return Err(GetterError::Void),
      [Statement::ExpressionStatement(stmt)] => Some(&stmt.expression),
      [Statement::ReturnStatement(ret)] => ret.argument.as_ref(),
      _ => None,
    };
    value.and_then(|value| value.as_identifier()).ok_or(GetterError::Unsupported)
  }

  /// `e.exports = v` nested in a top-level expression of an ESM module. The value moves into
  /// `const _default = v; export default _default;` ahead of the statement.
  fn hoist_default_export(&mut self, value: Expression<'ast>, span: Span) -> Expression<'ast> {
    let name = self.symbols.create_conflictless_name("_default");
    let decl = self.snippet.const_decl_stmt(self.snippet.id(&name, SPAN), value, SPAN);
    let export = self.snippet.export_default_expr_stmt(self.snippet.id_ref_expr(&name, SPAN), SPAN);
    self.hoisted.extend([decl, export]);
    self.snippet.id_ref_expr(&name, span)
  }

  /// `exports` for the exports slot, `module` for the module slot.
  fn slot_replacement(
    &self,
    ident: &ast::IdentifierReference<'ast>,
  ) -> Option<(usize, &'static str)> {
    let matcher = self.matcher();
    if matcher.is_slot(ident, FactorySlots::EXPORTS) {
      Some((0, "exports"))
    } else if matcher.is_slot(ident, FactorySlots::MODULE) {
      Some((1, "module"))
    } else {
      None
    }
  }
}
