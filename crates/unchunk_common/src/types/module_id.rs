use std::fmt::Display;

use arcstr::ArcStr;
use serde::Serialize;

use crate::ModuleKey;

/// `ModuleId` is the final identifier of a recovered module.
/// - It's the raw table key unless an override renames the module.
/// - Graph nodes, output files and import paths are all derived from it.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Serialize)]
#[serde(transparent)]
pub struct ModuleId(ArcStr);

impl ModuleId {
  pub fn new(value: impl Into<ArcStr>) -> Self {
    Self(value.into())
  }
}

impl std::ops::Deref for ModuleId {
  type Target = str;

  fn deref(&self) -> &Self::Target {
    &self.0
  }
}

impl std::borrow::Borrow<str> for ModuleId {
  fn borrow(&self) -> &str {
    &self.0
  }
}

impl AsRef<str> for ModuleId {
  fn as_ref(&self) -> &str {
    self
  }
}

impl Display for ModuleId {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(&self.0)
  }
}

impl From<ArcStr> for ModuleId {
  fn from(value: ArcStr) -> Self {
    Self::new(value)
  }
}

impl From<&ModuleKey> for ModuleId {
  fn from(value: &ModuleKey) -> Self {
    Self::new(value.as_str())
  }
}
