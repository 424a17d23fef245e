use std::fmt::Display;

use arcstr::ArcStr;
use serde::Serialize;

/// Id of a chunk as written in its `push([[ids], ...])` call.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum ChunkId {
  Int(i64),
  Str(ArcStr),
}

impl Display for ChunkId {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Int(value) => write!(f, "{value}"),
      Self::Str(value) => write!(f, "{value}"),
    }
  }
}

impl From<i64> for ChunkId {
  fn from(value: i64) -> Self {
    Self::Int(value)
  }
}

impl From<&str> for ChunkId {
  fn from(value: &str) -> Self {
    Self::Str(value.into())
  }
}
