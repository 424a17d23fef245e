mod common;

use common::{chunk, unpack, unpack_with};
use unchunk::{ChunkId, DependencyGraph, DiagnosticKind, UnpackOptions, Unpacker};

#[test]
fn corrupted_wrappers_are_not_chunks() {
  let unpacker = Unpacker::new(UnpackOptions::default());
  let table = "{ 1: function (e) { e.exports = 1; } }";
  assert!(unpacker.unpack(&chunk(7, table), None).is_some());
  for source in [
    format!("(self.webpackChunk_app = self.webpackChunk_app && []).push([[7], {table}]);"),
    format!("(self.webpackChunk_app = self.webpackChunk_app).push([[7], {table}]);"),
    format!("(self.webpackChunk_app = self.webpackChunk_app || []).push([[x], {table}]);"),
    format!("(self.webpackChunk_app = self.webpackChunk_app || []).push([[7], foo({table})]);"),
  ] {
    assert!(unpacker.unpack(&source, None).is_none(), "{source}");
  }
}

#[test]
fn chunk_info_and_array_tables() {
  let unpacker = Unpacker::new(UnpackOptions::default());
  let source = r#"(window["webpackJsonp"] = window["webpackJsonp"] || []).push([[3, "vendor"], [
    function (e) { e.exports = 1; },
    ,
    function (e, t, n) { n(0); }
  ]]);"#;
  let output = unpacker.unpack(source, None).unwrap();
  assert_eq!(output.chunk.id, ChunkId::Int(3));
  assert_eq!(output.chunk.bundle_ids, [ChunkId::Int(3), ChunkId::from("vendor")]);
  assert_eq!(output.modules.keys().map(|id| &**id).collect::<Vec<_>>(), ["0", "2"]);
  assert!(output.modules.values().all(|module| module.chunk_id == ChunkId::Int(3)));
}

#[test]
fn slot_mismatch_rejects_only_that_module() {
  let output = unpack(
    r#"{
      1: function (e, t, n) { t.a = 1; },
      2: function (e, r, n) { r.a = 1; },
      3: function (e, t) { t.b = 2; },
      4: function ({ a }) {},
      1: function (e) {}
    }"#,
  );
  assert_eq!(output.modules.keys().map(|id| &**id).collect::<Vec<_>>(), ["1", "3"]);
  let modules = output.diagnostics.iter().map(|d| d.module.as_deref()).collect::<Vec<_>>();
  assert_eq!(modules, [Some("2"), Some("4"), Some("1")]);
  assert!(output.diagnostics.iter().all(|d| d.kind == DiagnosticKind::Skipped));
}

#[test]
fn unparsable_factories_are_dropped() {
  // a redeclaration only fails once the body is analyzed on its own
  let output = unpack("{ 1: function (e) { let a; let a; }, 2: function (e) { e.exports = 2; } }");
  assert_eq!(output.modules.len(), 1);
  assert_eq!(output.diagnostics.len(), 1);
}

#[test]
fn undeclared_modules_are_reported_once() {
  let unpacker = Unpacker::new(UnpackOptions::default());
  let sources = [
    chunk(1, "{ 1: function (e, t, n) { n(9); n(9); }, 2: function (e, t, n) { n(9); n(1); } }"),
    chunk(2, "{ 3: function (e, t, n) { var a = n(9); var b = n(4); } }"),
    chunk(3, "{ 4: function (e) {} }"),
  ];
  let (outputs, graph) = unpacker.unpack_all(&sources);
  assert!(outputs.iter().all(Option::is_some));
  assert_eq!(graph.undeclared_modules().iter().map(|id| &***id).collect::<Vec<_>>(), ["9"]);

  let edge = graph.edges().find(|edge| &**edge.importer == "1").unwrap();
  assert_eq!((&**edge.importee, edge.count), ("9", 2));
  assert_eq!(graph.node("4").and_then(|node| node.chunk_id.clone()), Some(ChunkId::Int(3)));
}

#[test]
fn unpack_merges_into_a_shared_graph() {
  let unpacker = Unpacker::new(UnpackOptions::default());
  let mut graph = DependencyGraph::new();
  unpacker.unpack(&chunk(1, "{ 1: function (e, t, n) { n(2); } }"), Some(&mut graph)).unwrap();
  assert_eq!(graph.undeclared_modules().len(), 1);
  unpacker.unpack(&chunk(2, "{ 2: function (e) { e.exports = 1; } }"), Some(&mut graph)).unwrap();
  assert!(graph.undeclared_modules().is_empty());
  let source = graph.node("2").and_then(|node| node.source.as_deref());
  assert!(source.is_some_and(|source| source.contains("export default")));
}

#[test]
fn annotation_comments() {
  let options = UnpackOptions { annotate_variables: Some(true), ..Default::default() };
  let output = unpack_with(
    options,
    "{ 1: function (e, t, n) { var a = 1; function f(b) { return a + b; } } }",
  );
  let module = &output.modules["1"];
  assert_eq!(module.annotations.len(), 3);
  assert!(module.source.ends_with("// #0 a\n// #1 f\n// #2 b\n"));
}

#[test]
fn banner_and_source_map_comments_are_allowed() {
  let unpacker = Unpacker::new(UnpackOptions::default());
  let source = chunk(1, "{ 2: function (e) { e.exports = 1; } }");
  let banner = format!("/*! For license information please see 1.js.LICENSE.txt */\n{source}");
  let trailer = format!("{source}\n//# sourceMappingURL=1.js.map");
  for source in [banner, trailer] {
    let output = unpacker.unpack(&source, None).unwrap();
    assert_eq!(output.chunk.id, ChunkId::Int(1));
    assert!(output.modules.contains_key("2"));
  }
}
