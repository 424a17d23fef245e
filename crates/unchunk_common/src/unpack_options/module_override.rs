use std::collections::BTreeMap;

use rustc_hash::FxHashMap;
use serde::Deserialize;

use crate::ModuleKey;

/// Per-module instructions supplied by the user, keyed by raw module key.
///
/// ```json
/// { "123": { "rename": "react", "absolute": true, "rename_locals": { "0": "useState" } } }
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ModuleOverride {
  /// New module id, used for the output file and every import of the module.
  pub rename: Option<String>,
  /// Import the module by `rename` as is (a package name) instead of `./<rename>`.
  pub absolute: bool,
  /// Binding ordinal, as reported by variable annotations, to the new local name.
  pub rename_locals: BTreeMap<u32, String>,
}

pub type ModuleOverrides = FxHashMap<ModuleKey, ModuleOverride>;

#[test]
fn test_deserialize_overrides() {
  let overrides: ModuleOverrides = serde_json::from_str(
    r#"{ "123": { "rename": "react", "absolute": true, "rename_locals": { "0": "useState" } },
         "7": {} }"#,
  )
  .unwrap();
  let react = &overrides[&ModuleKey::from("123")];
  assert_eq!(react.rename.as_deref(), Some("react"));
  assert!(react.absolute);
  assert_eq!(react.rename_locals.get(&0).map(String::as_str), Some("useState"));
  assert_eq!(overrides[&ModuleKey::from("7")], ModuleOverride::default());
}
