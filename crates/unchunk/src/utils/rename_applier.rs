use oxc::{
  allocator::{Allocator, Box as ArenaBox, TakeIn},
  ast::ast::{self, BindingPatternKind},
  ast_visit::{VisitMut, walk_mut},
  span::Span,
};
use unchunk_ecmascript::AstSnippet;

use super::symbol_table::SymbolTable;

/// Writes the renames recorded in a `SymbolTable` into the tree.
///
/// Shorthands are expanded so property keys keep their names: `{ a }` becomes `{ a: a$1 }`.
pub struct RenameApplier<'me, 'ast> {
  symbols: &'me SymbolTable,
  snippet: AstSnippet<'ast>,
  alloc: &'ast Allocator,
}

impl<'me, 'ast> RenameApplier<'me, 'ast> {
  pub fn new(symbols: &'me SymbolTable, alloc: &'ast Allocator) -> Self {
    Self { symbols, snippet: AstSnippet::new(alloc), alloc }
  }

  fn is_renamed_reference(&self, ident: &ast::IdentifierReference) -> bool {
    self
      .symbols
      .symbol_of_reference(ident)
      .is_some_and(|symbol| self.symbols.renamed(symbol).is_some())
  }

  fn is_renamed_binding(&self, pattern: &ast::BindingPattern) -> bool {
    let ident = match &pattern.kind {
      BindingPatternKind::BindingIdentifier(ident) => ident,
      BindingPatternKind::AssignmentPattern(assign) => match &assign.left.kind {
        BindingPatternKind::BindingIdentifier(ident) => ident,
        _ => return false,
      },
      _ => return false,
    };
    ident.symbol_id.get().is_some_and(|symbol| self.symbols.renamed(symbol).is_some())
  }
}

impl<'ast> VisitMut<'ast> for RenameApplier<'_, 'ast> {
  fn visit_binding_identifier(&mut self, ident: &mut ast::BindingIdentifier<'ast>) {
    if let Some(name) = ident.symbol_id.get().and_then(|symbol| self.symbols.renamed(symbol)) {
      ident.name = self.snippet.atom(name);
    }
  }

  fn visit_identifier_reference(&mut self, ident: &mut ast::IdentifierReference<'ast>) {
    if let Some(name) =
      self.symbols.symbol_of_reference(ident).and_then(|symbol| self.symbols.renamed(symbol))
    {
      ident.name = self.snippet.atom(name);
    }
  }

  fn visit_object_property(&mut self, prop: &mut ast::ObjectProperty<'ast>) {
    if prop.shorthand {
      if let ast::Expression::Identifier(ident) = &prop.value {
        if self.is_renamed_reference(ident) {
          prop.shorthand = false;
        }
      }
    }
    walk_mut::walk_object_property(self, prop);
  }

  fn visit_binding_property(&mut self, prop: &mut ast::BindingProperty<'ast>) {
    if prop.shorthand && self.is_renamed_binding(&prop.value) {
      prop.shorthand = false;
    }
    walk_mut::walk_binding_property(self, prop);
  }

  // `({ a } = obj)` -> `({ a: a$1 } = obj)`
  fn visit_assignment_target_property(
    &mut self,
    property: &mut ast::AssignmentTargetProperty<'ast>,
  ) {
    if let ast::AssignmentTargetProperty::AssignmentTargetPropertyIdentifier(prop) = property {
      if self.is_renamed_reference(&prop.binding) {
        let span = prop.span;
        let key = self.snippet.id_name(&prop.binding.name, span);
        let ident = ArenaBox::new_in(prop.binding.take_in(self.alloc), self.alloc);
        let binding = match prop.init.take() {
          Some(init) => {
            ast::AssignmentTargetMaybeDefault::AssignmentTargetWithDefault(ArenaBox::new_in(
              ast::AssignmentTargetWithDefault {
                span: Span::default(),
                binding: ast::AssignmentTarget::AssignmentTargetIdentifier(ident),
                init,
              },
              self.alloc,
            ))
          }
          None => ast::AssignmentTargetMaybeDefault::AssignmentTargetIdentifier(ident),
        };
        *property = ast::AssignmentTargetProperty::AssignmentTargetPropertyProperty(
          ArenaBox::new_in(
            ast::AssignmentTargetPropertyProperty {
              name: ast::PropertyKey::StaticIdentifier(ArenaBox::new_in(key, self.alloc)),
              binding,
              span,
              computed: false,
            },
            self.alloc,
          ),
        );
      }
    }
    walk_mut::walk_assignment_target_property(self, property);
  }
}

#[test]
fn test_rename_applier_expands_shorthands() {
  use unchunk_common::{FactorySlots, ModuleKey};
  use unchunk_ecmascript::EcmaCompiler;

  use super::parse_to_ecma_ast::parse_to_ecma_ast;
  use crate::scan_stage::ast_scanner::AstScanner;

  let (mut tree, scoping) =
    parse_to_ecma_ast("var a = 1; var o = { a }; ({ a } = o); var { a: b = a } = o;".into())
      .unwrap();
  let (key, slots) = (ModuleKey::from("1"), FactorySlots::default());
  let mut symbols =
    AstScanner::new(&key, &slots, SymbolTable::new(scoping)).scan(tree.program()).symbols;
  let a = tree.program().body.first().and_then(|stmt| match stmt {
    ast::Statement::VariableDeclaration(decl) => decl.declarations[0].id.get_binding_identifier(),
    _ => None,
  });
  let a = a.and_then(|ident| ident.symbol_id.get()).unwrap();
  symbols.try_rename(a, "value").unwrap();

  tree.program.with_mut(|fields| {
    RenameApplier::new(&symbols, fields.allocator).visit_program(fields.program);
  });
  let code = EcmaCompiler::print(&tree).code.split_whitespace().collect::<String>();
  assert_eq!(code, "varvalue=1;varo={a:value};({a:value}=o);var{a:b=value}=o;");
}
