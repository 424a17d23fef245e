mod common;

use common::{squashed, unpack, unpack_with};
use unchunk::{DiagnosticKind, ModuleMeta, OutputFormat, UnpackOptions};

#[test]
fn exports_definer_becomes_named_exports_in_order() {
  let output = unpack(
    r#"{
      1: function (e, t, n) {
        "use strict";
        n.r(t);
        n.d(t, { foo: () => bar, default: () => baz });
        var bar = 1, baz = 2;
      }
    }"#,
  );
  assert!(output.diagnostics.is_empty(), "{:?}", output.diagnostics);

  let source = squashed(&output, "1");
  let named = source.find("export{foo};").expect("named export");
  let default = source.find("export{bazasdefault};").expect("default export");
  assert!(named < default);
  // `bar` takes its export name
  assert!(source.contains("varfoo=1;"));
  assert!(!source.contains("n.d(") && !source.contains("n.r(") && !source.contains("usestrict"));
}

#[test]
fn reserved_export_names_get_a_safe_local() {
  let output = unpack("{ 1: function (e, t, n) { n.d(t, { delete: () => a }); var a = 1; } }");
  assert!(output.diagnostics.is_empty(), "{:?}", output.diagnostics);
  assert_eq!(squashed(&output, "1"), "export{_deleteasdelete};var_delete=1;");
}

#[test]
fn exports_definer_in_commonjs_output() {
  let options = UnpackOptions { format: Some(OutputFormat::Cjs), ..Default::default() };
  let output =
    unpack_with(options, "{ 1: function (e, t, n) { n.r(t); n.d(t, { a: () => b }); var b = 1; } }");
  let source = squashed(&output, "1");
  assert!(source.contains(r#"Object.defineProperty(exports,"a",{enumerable:true,get:()=>b"#));
  assert!(!source.contains("n.r("));
}

#[test]
fn invalid_getters_skip_only_their_property() {
  let output = unpack(
    r#"{ 1: function (e, t, n) {
      n.d(t, { a: () => {}, b: (x) => x, c: () => undeclared, d: () => d });
      var d = 1;
    } }"#,
  );
  let kinds = output.diagnostics.iter().map(|d| d.kind).collect::<Vec<_>>();
  assert_eq!(kinds, [
    DiagnosticKind::NotImplemented,
    DiagnosticKind::Skipped,
    DiagnosticKind::Skipped
  ]);
  let source = squashed(&output, "1");
  assert!(source.starts_with("export{d};"));
}

#[test]
fn default_export_assignment() {
  let output = unpack(
    r#"{
      1: function (e) { e.exports = function () { return 1; }; },
      2: function (e) { e.exports = { a: 1 }; },
      3: function (e, t) { foo(e.exports = 42); }
    }"#,
  );
  assert!(output.modules["1"].meta.has_default_export());
  let source = squashed(&output, "1");
  assert!(source.starts_with("exportdefault") && source.contains("return1;"));

  // an object literal makes the module CommonJS
  assert!(output.modules["2"].meta.contains(ModuleMeta::IS_COMMONJS));
  assert_eq!(squashed(&output, "2"), "module.exports={a:1};");

  let source = squashed(&output, "3");
  assert_eq!(source, "const_default=42;exportdefault_default;foo(_default);");
}

#[test]
fn default_export_inside_function_falls_back() {
  let output = unpack("{ 1: function (e) { function init() { e.exports = 1; } init(); } }");
  assert_eq!(output.diagnostics.len(), 1);
  assert_eq!(output.diagnostics[0].kind, DiagnosticKind::Warning);
  assert!(squashed(&output, "1").contains("module.exports=1;"));
}

#[test]
fn slot_references_are_renamed() {
  let output = unpack_with(
    UnpackOptions { format: Some(OutputFormat::Cjs), ..Default::default() },
    r#"{
      1: function (e, t) { t.a = 1; e.id; },
      2: function (e, t) { var exports = 1; t.a = exports; t.b = 2; }
    }"#,
  );
  assert_eq!(squashed(&output, "1"), "exports.a=1;module.id;");

  // the module binds `exports` itself, reported once
  assert_eq!(squashed(&output, "2"), "varexports=1;t.a=exports;t.b=2;");
  assert_eq!(output.diagnostics.len(), 1);
  assert_eq!(output.diagnostics[0].module.as_deref(), Some("2"));
}
