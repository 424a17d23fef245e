use std::sync::LazyLock;

use regex::Regex;
use unchunk_common::ChunkId;

static CHUNK_WRAPPER_RE: LazyLock<Regex> = LazyLock::new(|| {
  // `self.webpackChunk_app` or `window["webpackJsonp"]`
  let target = r#"[A-Za-z_$][\w$]*(?:\s*\.\s*[A-Za-z_$][\w$]*|\s*\[\s*(?:"[^"]*"|'[^']*')\s*\])+"#;
  let id = r#"(?:\d+|"[^"]*"|'[^']*')"#;
  // license banners and `//# sourceMappingURL=` trailers
  let trivia = r"(?:\s|/\*[\s\S]*?\*/|//[^\n]*)*";
  Regex::new(&format!(
    r#"^{trivia}(?:(?:"use strict"|'use strict')\s*;?{trivia})?\(\s*(?P<lhs>{target})\s*=\s*(?P<rhs>{target})\s*\|\|\s*\[\s*\]\s*\)\s*\.\s*push\s*\(\s*\[\s*(?P<ids>{id}|\[\s*{id}(?:\s*,\s*{id})*\s*\])\s*,(?P<table>[\s\S]*)\]\s*\)\s*;?{trivia}$"#
  ))
  .unwrap()
});

static CHUNK_ID_RE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r#"(\d+)|"([^"]*)"|'([^']*)'"#).unwrap());

/// The parts of a chunk wrapper, borrowed from the chunk source.
#[derive(Debug, PartialEq, Eq)]
pub struct ChunkMatch<'a> {
  /// Never empty, the first id names the chunk.
  pub ids: Vec<ChunkId>,
  /// The module table, possibly followed by `, <runtime callback>`.
  pub table: &'a str,
}

/// Recognizes
///
/// ```js
/// (self.webpackChunk = self.webpackChunk || []).push([[179], { 123: function (e, t, n) {} }]);
/// ```
///
/// Anything else, including a wrapper whose two targets differ, is not a chunk.
pub fn match_chunk(source: &str) -> Option<ChunkMatch<'_>> {
  let captures = CHUNK_WRAPPER_RE.captures(source)?;
  let (lhs, rhs) = (captures.name("lhs")?.as_str(), captures.name("rhs")?.as_str());
  if !lhs.chars().filter(|c| !c.is_whitespace()).eq(rhs.chars().filter(|c| !c.is_whitespace())) {
    return None;
  }

  let ids = CHUNK_ID_RE
    .captures_iter(captures.name("ids")?.as_str())
    .map(|id| match (id.get(1), id.get(2).or_else(|| id.get(3))) {
      (Some(int), _) => int.as_str().parse::<i64>().ok().map(ChunkId::Int),
      (None, Some(string)) => Some(ChunkId::from(string.as_str())),
      (None, None) => None,
    })
    .collect::<Option<Vec<_>>>()?;
  if ids.is_empty() {
    return None;
  }

  Some(ChunkMatch { ids, table: captures.name("table")?.as_str().trim() })
}

#[test]
fn test_match_chunk() {
  let matched = match_chunk(
    r#"(self.webpackChunk_app = self.webpackChunk_app || []).push([[179, "vendors"], {
      1: function (e, t, n) {}
    }]);"#,
  )
  .unwrap();
  assert_eq!(matched.ids, vec![ChunkId::Int(179), ChunkId::from("vendors")]);
  assert!(matched.table.starts_with('{') && matched.table.ends_with('}'));

  let matched = match_chunk(
    r#""use strict";(window["webpackJsonp"] = window[ "webpackJsonp" ] || []).push(["main", [function(){}], [[0, 1]]])"#,
  )
  .unwrap();
  assert_eq!(matched.ids, vec![ChunkId::from("main")]);
  assert_eq!(matched.table, "[function(){}], [[0, 1]]");

  let matched = match_chunk(
    "/*! For license information please see 1.js.LICENSE.txt */\n\
     (self.webpackChunk = self.webpackChunk || []).push([[1], { 2: function (e) {} }]);\n\
     //# sourceMappingURL=1.js.map\n",
  )
  .unwrap();
  assert_eq!(matched.ids, vec![ChunkId::Int(1)]);
  assert_eq!(matched.table, "{ 2: function (e) {} }");
}

#[test]
fn test_match_chunk_rejects_corrupted_wrappers() {
  // guard removed
  assert!(match_chunk("(self.webpackChunk = self.webpackChunk).push([[1], {}])").is_none());
  // wrong default operator
  assert!(match_chunk("(self.webpackChunk = self.webpackChunk && []).push([[1], {}])").is_none());
  // targets differ
  assert!(match_chunk("(self.webpackChunk = self.other || []).push([[1], {}])").is_none());
  // non-literal id
  assert!(match_chunk("(self.webpackChunk = self.webpackChunk || []).push([[a], {}])").is_none());
  // bare identifier target
  assert!(match_chunk("(chunks = chunks || []).push([[1], {}])").is_none());
  assert!(match_chunk("console.log(1)").is_none());
}
