use oxc::syntax::{identifier, keyword};

use crate::concat_string;

/// Names a rewritten module may introduce on its own, so user bindings must never be renamed
/// to them.
pub const MODULE_SCOPE_NAMES: [&str; 3] = ["module", "exports", "require"];

pub fn is_validate_identifier_name(name: &str) -> bool {
  identifier::is_identifier_name(name)
}

/// `true` if `name` can't be used as a local binding name.
pub fn is_reserved_binding_name(name: &str) -> bool {
  keyword::is_reserved_keyword_or_global_object(name)
    || matches!(name, "arguments" | "eval" | "await" | "yield" | "let" | "static")
}

/// `default` -> `_default`, `foo` -> `foo`.
pub fn to_binding_name(name: &str) -> String {
  if is_reserved_binding_name(name) { concat_string!("_", name) } else { name.to_string() }
}

#[test]
fn test_is_validate_identifier_name() {
  assert!(is_validate_identifier_name("foo"));
  assert!(is_validate_identifier_name("$foo_1"));
  assert!(!is_validate_identifier_name("1aaaa"));
  assert!(!is_validate_identifier_name("foo-bar"));
}

#[test]
fn test_to_binding_name() {
  assert_eq!(to_binding_name("default"), "_default");
  assert_eq!(to_binding_name("class"), "_class");
  assert_eq!(to_binding_name("useState"), "useState");
}
