use arcstr::ArcStr;
use unchunk_common::{ModuleId, ModuleKey, ModuleOverride, ResolvedModuleId};
use unchunk_utils::concat_string;

/// Final id and import path of the module registered under `key`.
pub fn resolve_id(key: &ModuleKey, module_override: Option<&ModuleOverride>) -> ResolvedModuleId {
  let renamed = module_override
    .and_then(|o| o.rename.as_deref().filter(|rename| !rename.is_empty()).map(|r| (r, o.absolute)));

  match renamed {
    Some((rename, true)) => {
      ResolvedModuleId { id: ModuleId::new(rename), import_path: ArcStr::from(rename) }
    }
    Some((rename, false)) => ResolvedModuleId {
      id: ModuleId::new(rename),
      import_path: concat_string!("./", rename).into(),
    },
    None => ResolvedModuleId {
      id: ModuleId::from(key),
      import_path: concat_string!("./", key.as_str()).into(),
    },
  }
}

#[test]
fn test_resolve_id() {
  let key = ModuleKey::from("123");
  let resolved = resolve_id(&key, None);
  assert_eq!(&*resolved.id, "123");
  assert_eq!(resolved.import_path.as_str(), "./123");

  let relative = ModuleOverride { rename: Some("utils/math".to_string()), ..Default::default() };
  let resolved = resolve_id(&key, Some(&relative));
  assert_eq!(&*resolved.id, "utils/math");
  assert_eq!(resolved.import_path.as_str(), "./utils/math");

  let absolute =
    ModuleOverride { rename: Some("react".to_string()), absolute: true, ..Default::default() };
  let resolved = resolve_id(&key, Some(&absolute));
  assert_eq!(&*resolved.id, "react");
  assert_eq!(resolved.import_path.as_str(), "react");
  assert_eq!(resolve_id(&key, Some(&absolute)), resolved);

  // `absolute` alone doesn't rename anything
  let flag_only = ModuleOverride { absolute: true, ..Default::default() };
  assert_eq!(resolve_id(&key, Some(&flag_only)).import_path.as_str(), "./123");
}
