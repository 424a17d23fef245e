use std::fmt::Display;

use serde::Deserialize;

/// Preferred module syntax of the rewritten modules. Modules classified as CommonJS are
/// always emitted as CommonJS.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
  #[default]
  Esm,
  Cjs,
}

impl OutputFormat {
  #[inline]
  pub fn prefers_esm(self) -> bool {
    matches!(self, Self::Esm)
  }
}

impl Display for OutputFormat {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Esm => write!(f, "esm"),
      Self::Cjs => write!(f, "cjs"),
    }
  }
}
