#![allow(dead_code)]

use unchunk::{UnpackOptions, UnpackOutput, Unpacker};

/// Wraps a module table in the `push` idiom of a chunk with id `id`.
pub fn chunk(id: u32, table: &str) -> String {
  format!("(self.webpackChunk_app = self.webpackChunk_app || []).push([[{id}], {table}]);")
}

pub fn unpack(table: &str) -> UnpackOutput {
  unpack_with(UnpackOptions::default(), table)
}

pub fn unpack_with(options: UnpackOptions, table: &str) -> UnpackOutput {
  Unpacker::new(options).unpack(&chunk(0, table), None).expect("fixture should be a chunk")
}

/// Module source with every whitespace removed, so assertions don't depend on formatting.
pub fn squashed(output: &UnpackOutput, id: &str) -> String {
  let module = output.modules.get(id).unwrap_or_else(|| panic!("module {id} is missing"));
  module.source.chars().filter(|c| !c.is_whitespace()).collect()
}
