use std::fmt::Display;

use arcstr::ArcStr;
use serde::{Deserialize, Serialize};

/// The key a module factory is registered under in the module table, stringified.
///
/// `123`, `"123"` and `123.0` all normalize to `123`, so a `require(123)` finds the entry
/// keyed `"123"`.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModuleKey(ArcStr);

impl ModuleKey {
  pub fn new(value: impl Into<ArcStr>) -> Self {
    Self(value.into())
  }

  #[allow(clippy::float_cmp, clippy::cast_possible_truncation)]
  pub fn from_number(value: f64) -> Self {
    // 2^53, beyond it integral floats no longer map to distinct integers.
    if value.trunc() == value && value.abs() < 9_007_199_254_740_992.0 {
      Self::new(itoa::Buffer::new().format(value as i64))
    } else {
      Self::new(value.to_string())
    }
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl std::ops::Deref for ModuleKey {
  type Target = str;

  fn deref(&self) -> &Self::Target {
    &self.0
  }
}

impl std::borrow::Borrow<str> for ModuleKey {
  fn borrow(&self) -> &str {
    &self.0
  }
}

impl AsRef<str> for ModuleKey {
  fn as_ref(&self) -> &str {
    self
  }
}

impl Display for ModuleKey {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(&self.0)
  }
}

impl From<&str> for ModuleKey {
  fn from(value: &str) -> Self {
    Self::new(value)
  }
}

impl From<String> for ModuleKey {
  fn from(value: String) -> Self {
    Self::new(value)
  }
}

#[test]
fn test_module_key_from_number() {
  assert_eq!(ModuleKey::from_number(123.0).as_str(), "123");
  assert_eq!(ModuleKey::from_number(0.0).as_str(), "0");
  assert_eq!(ModuleKey::from_number(1.5).as_str(), "1.5");
  assert_eq!(ModuleKey::from_number(1e3).as_str(), "1000");
}
