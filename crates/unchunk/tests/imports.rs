mod common;

use common::{squashed, unpack, unpack_with};
use unchunk::{DiagnosticKind, ModuleKey, ModuleOverride, OutputFormat, UnpackOptions};

const REQUIRE_TABLE: &str = r#"{
  1: function (e, t, n) {
    var b = n(2), c = n(3), d = n(4);
    console.log(b.x, c(), d);
  },
  2: function (e, t, n) { n.r(t); n.d(t, { x: () => x }); var x = 1; },
  3: function (e) { e.exports = function () {}; },
}"#;

#[test]
fn namespace_and_default_imports() {
  let output = unpack(REQUIRE_TABLE);
  let source = squashed(&output, "1");
  assert!(source.contains(r#"import*asbfrom"./2";"#));
  assert!(source.contains(r#"importcfrom"./3";"#));
  // not part of the chunk, imported as a namespace
  assert!(source.contains(r#"import*asdfrom"./4";"#));

  let imports = output.modules["1"].imports.iter().map(|id| &**id).collect::<Vec<_>>();
  assert_eq!(imports, ["2", "3", "4"]);
}

#[test]
fn commonjs_output_keeps_requires() {
  let options = UnpackOptions { format: Some(OutputFormat::Cjs), ..Default::default() };
  let output = unpack_with(options, REQUIRE_TABLE);
  let source = squashed(&output, "1");
  assert!(source.starts_with(r#"varb=require("./2");varc=require("./3");"#));
}

#[test]
fn requires_in_functions() {
  let table = r#"{
    1: function (e, t, n) {
      function f() { return n(2); }
      async function g() { return n(2); }
      var h = async () => { class K { x = n(2); } };
      var i = async function () { return () => n(2); };
      async function j(a = n(2)) { return a; }
      var k = async (b = n(2)) => b;
    }
  }"#;
  let source = squashed(&unpack(table), "1");
  assert_eq!(source.matches(r#"require("./2")"#).count(), 5);
  assert_eq!(source.matches(r#"awaitimport("./2")"#).count(), 1);
  assert!(source.contains(r#"asyncfunctionj(a=require("./2"))"#));

  let options = UnpackOptions { format: Some(OutputFormat::Cjs), ..Default::default() };
  let source = squashed(&unpack_with(options, table), "1");
  assert_eq!(source.matches(r#"require("./2")"#).count(), 6);
  assert!(!source.contains("await"));
}

#[test]
fn side_effect_and_member_imports() {
  let output = unpack(
    "{ 1: function (e, t, n) { n(2); var a = n(3).useState, b = n(3).default; a(b); } }",
  );
  let source = squashed(&output, "1");
  assert!(source.starts_with(r#"import"./2";"#));
  assert!(source.contains(r#"import{useState}from"./3";"#));
  assert!(source.contains(r#"import{defaultas_default}from"./3";"#));
  assert!(source.ends_with("useState(_default);"));
}

#[test]
fn reassigned_bindings_stay_requires() {
  let output = unpack("{ 1: function (e, t, n) { var a = n(2); a = a || {}; } }");
  assert!(squashed(&output, "1").starts_with(r#"vara=require("./2");"#));
}

#[test]
fn rename_collisions_keep_the_original_name() {
  let output = unpack("{ 1: function (e, t, n) { var a = n(2).foo; var foo = 1; a(foo); } }");
  let source = squashed(&output, "1");
  assert!(source.contains(r#"import{fooasa}from"./2";"#));
  assert!(source.ends_with("varfoo=1;a(foo);"));
  assert_eq!(output.diagnostics.len(), 1);
  assert_eq!(output.diagnostics[0].kind, DiagnosticKind::Warning);
}

#[test]
fn overrides_rename_modules_and_locals() {
  let react = ModuleOverride { rename: Some("react".into()), absolute: true, ..Default::default() };
  let app = ModuleOverride {
    rename: Some("app".into()),
    rename_locals: [(0, "React".to_string()), (1, "o".to_string())].into_iter().collect(),
    ..Default::default()
  };
  let overrides = [(ModuleKey::from("2"), react), (ModuleKey::from("1"), app)];
  let options =
    UnpackOptions { overrides: Some(overrides.into_iter().collect()), ..Default::default() };
  let output =
    unpack_with(options, "{ 1: function (e, t, n) { var r = n(2); var value = 1; var o = r; } }");

  let module = &output.modules["app"];
  assert_eq!(module.raw_key.as_str(), "1");
  let source = squashed(&output, "app");
  assert!(source.starts_with(r#"import*asReactfrom"react";"#));
  assert!(source.ends_with("varo=React;"));

  // `o` is taken, the second rename is refused
  let renamed = module.annotations.iter().map(|a| a.renamed_to.as_deref()).collect::<Vec<_>>();
  assert_eq!(renamed, [Some("React"), None, None]);
  assert_eq!(output.diagnostics.len(), 1);
  assert_eq!(output.diagnostics[0].kind, DiagnosticKind::Skipped);
}
