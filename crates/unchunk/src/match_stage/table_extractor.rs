use arcstr::ArcStr;
use oxc::{
  ast::ast::{self, ArrayExpressionElement, BindingPatternKind, Expression, ObjectPropertyKind},
  span::{GetSpan, SourceType, Span},
};
use unchunk_common::ModuleKey;
use unchunk_ecmascript::{EcmaAst, EcmaCompiler};
use unchunk_error::BuildDiagnostic;

use crate::types::module_factory::{FactoryParam, ModuleFactory};

const FUSION_PREFIX: &str = "__fusion__";

/// Parses the module table of a chunk and yields one factory per valid entry, in source
/// order. `None` means the table isn't an object or array literal.
pub fn extract_module_table(
  table: &str,
  diagnostics: &mut Vec<BuildDiagnostic>,
) -> Option<Vec<ModuleFactory>> {
  let source = ArcStr::from(unchunk_utils::concat_string!("(", table, ")"));
  let ast = EcmaCompiler::parse(source, SourceType::cjs()).ok()?;
  let extractor = TableExtractor { ast: &ast, diagnostics };
  extractor.extract()
}

struct TableExtractor<'me> {
  ast: &'me EcmaAst,
  diagnostics: &'me mut Vec<BuildDiagnostic>,
}

impl TableExtractor<'_> {
  fn extract(mut self) -> Option<Vec<ModuleFactory>> {
    let ast = self.ast;
    let program = ast.program();
    let [ast::Statement::ExpressionStatement(stmt)] = &program.body[..] else {
      return None;
    };

    // `({...}, function (e) {...})`, the runtime callback is dropped
    let mut table = stmt.expression.without_parentheses();
    if let Expression::SequenceExpression(seq) = table {
      table = seq.expressions.first()?.without_parentheses();
    }

    match table {
      Expression::ObjectExpression(object) => {
        Some(object.properties.iter().filter_map(|prop| self.extract_property(prop)).collect())
      }
      Expression::ArrayExpression(array) => Some(
        array
          .elements
          .iter()
          .enumerate()
          .filter_map(|(idx, element)| self.extract_element(idx, element))
          .collect(),
      ),
      _ => None,
    }
  }

  fn extract_property(&mut self, prop: &ObjectPropertyKind) -> Option<ModuleFactory> {
    let ObjectPropertyKind::ObjectProperty(prop) = prop else {
      self.skip(None, "spread element in module table");
      return None;
    };
    if prop.computed {
      self.skip(None, "computed key in module table");
      return None;
    }

    let key = match &prop.key {
      ast::PropertyKey::StaticIdentifier(ident) => {
        if ident.name.starts_with(FUSION_PREFIX) {
          self.diagnostics.push(BuildDiagnostic::not_implemented(
            Some(ident.name.as_str()),
            "fusion sub-modules are not supported",
          ));
          return None;
        }
        ModuleKey::from(ident.name.as_str())
      }
      ast::PropertyKey::NumericLiteral(lit) => ModuleKey::from_number(lit.value),
      ast::PropertyKey::StringLiteral(lit) => ModuleKey::from(lit.value.as_str()),
      other => {
        let key = self.ast.slice(other.span()).to_string();
        self.skip(Some(&key), "unsupported key in module table");
        return None;
      }
    };
    if prop.kind != ast::PropertyKind::Init {
      self.skip(Some(&key), "module factory can't be an accessor");
      return None;
    }

    self.extract_factory(key, &prop.value)
  }

  fn extract_element(
    &mut self,
    idx: usize,
    element: &ArrayExpressionElement,
  ) -> Option<ModuleFactory> {
    let key = ModuleKey::from(itoa::Buffer::new().format(idx));
    match element {
      ArrayExpressionElement::Elision(_) => None,
      ArrayExpressionElement::SpreadElement(_) => {
        self.skip(Some(&key), "spread element in module table");
        None
      }
      element => self.extract_factory(key, element.as_expression()?),
    }
  }

  fn extract_factory(&mut self, key: ModuleKey, value: &Expression) -> Option<ModuleFactory> {
    let (params, body) = match value.without_parentheses() {
      Expression::FunctionExpression(func) if !func.r#async && !func.generator => {
        let body = func.body.as_ref()?;
        (&func.params, Self::inner_span(body.span))
      }
      Expression::ArrowFunctionExpression(arrow) if !arrow.r#async => {
        let body = if arrow.expression {
          arrow.body.statements.first().map_or(arrow.body.span, GetSpan::span)
        } else {
          Self::inner_span(arrow.body.span)
        };
        (&arrow.params, body)
      }
      _ => {
        self.skip(Some(&key), "module factory is not a plain function");
        return None;
      }
    };

    let mut factory_params = params
      .items
      .iter()
      .map(|param| match &param.pattern.kind {
        BindingPatternKind::BindingIdentifier(ident) => {
          FactoryParam::Identifier(ident.name.as_str().into())
        }
        _ => FactoryParam::Pattern,
      })
      .collect::<Vec<_>>();
    if params.rest.is_some() {
      factory_params.push(FactoryParam::Rest);
    }

    Some(ModuleFactory { key, params: factory_params, body: self.ast.slice(body).into() })
  }

  /// `{ ... }` -> `...`
  fn inner_span(span: Span) -> Span {
    if span.end - span.start >= 2 { Span::new(span.start + 1, span.end - 1) } else { span }
  }

  fn skip(&mut self, key: Option<&str>, message: &str) {
    self.diagnostics.push(BuildDiagnostic::skipped(key, message));
  }
}

#[cfg(test)]
mod tests {
  use unchunk_error::DiagnosticKind;

  use super::*;

  #[test]
  fn extracts_object_table() {
    let mut diagnostics = vec![];
    let factories = extract_module_table(
      r#"{
        123: function (e, t, n) { "use strict"; n.r(t); },
        "abc": (e) => { e.exports = 1 },
        foo(e, t) { t.a = 1 },
        456: (e) => e.exports = 2,
      }"#,
      &mut diagnostics,
    )
    .unwrap();
    assert!(diagnostics.is_empty());

    let keys = factories.iter().map(|f| f.key.as_str()).collect::<Vec<_>>();
    assert_eq!(keys, ["123", "abc", "foo", "456"]);
    assert_eq!(factories[0].body.trim(), r#""use strict"; n.r(t);"#);
    assert_eq!(factories[0].params.len(), 3);
    assert_eq!(factories[1].body.trim(), "e.exports = 1");
    assert_eq!(factories[2].params, vec![
      FactoryParam::Identifier("e".into()),
      FactoryParam::Identifier("t".into())
    ]);
    assert_eq!(factories[3].body.as_str(), "e.exports = 2");
  }

  #[test]
  fn extracts_array_table_and_skips_holes() {
    let mut diagnostics = vec![];
    let factories =
      extract_module_table("[function (e) {}, , function (e, t) {}], [[0]]", &mut diagnostics)
        .unwrap();
    let keys = factories.iter().map(|f| f.key.as_str()).collect::<Vec<_>>();
    assert_eq!(keys, ["0", "2"]);
    assert!(diagnostics.is_empty());
  }

  #[test]
  fn invalid_entries_are_local_failures() {
    let mut diagnostics = vec![];
    let factories = extract_module_table(
      "{ 1: 42, [k]: function () {}, __fusion__1: function () {}, 2: function (e, ...r) {} }",
      &mut diagnostics,
    )
    .unwrap();
    assert_eq!(factories.len(), 1);
    assert_eq!(factories[0].params.last(), Some(&FactoryParam::Rest));

    let kinds = diagnostics.iter().map(|d| d.kind).collect::<Vec<_>>();
    assert_eq!(kinds, [
      DiagnosticKind::Skipped,
      DiagnosticKind::Skipped,
      DiagnosticKind::NotImplemented
    ]);
  }

  #[test]
  fn rejects_non_table_shapes() {
    let mut diagnostics = vec![];
    assert!(extract_module_table("foo()", &mut diagnostics).is_none());
    assert!(extract_module_table("{ 1: function () {} ", &mut diagnostics).is_none());
    assert!(extract_module_table("1; 2", &mut diagnostics).is_none());
  }
}
