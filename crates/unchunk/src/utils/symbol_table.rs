use std::fmt::{Debug, Display};

use arcstr::ArcStr;
use oxc::{
  ast::ast::IdentifierReference,
  semantic::{Scoping, SymbolId},
};
use rustc_hash::{FxHashMap, FxHashSet};
use unchunk_utils::{
  concat_string,
  ecmascript::{MODULE_SCOPE_NAMES, is_reserved_binding_name, is_validate_identifier_name},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenameError {
  UnknownSymbol,
  InvalidName(String),
  ReservedName(String),
  AlreadyRenamed { to: ArcStr },
  NameTaken(String),
}

impl Display for RenameError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::UnknownSymbol => write!(f, "symbol is not declared in this module"),
      Self::InvalidName(name) => write!(f, "`{name}` is not a valid identifier"),
      Self::ReservedName(name) => write!(f, "`{name}` is a reserved name"),
      Self::AlreadyRenamed { to } => write!(f, "symbol is already renamed to `{to}`"),
      Self::NameTaken(name) => write!(f, "`{name}` is already used in this module"),
    }
  }
}

/// Bindings and names of one module, with collision-safe renaming.
///
/// Collisions are checked module-wide rather than per scope: a new name must not be bound in
/// any scope, referenced as a global, or handed out before. Renames are only recorded here and
/// written into the tree by `RenameApplier`.
pub struct SymbolTable {
  scoping: Scoping,
  /// Declared name of each symbol.
  names: FxHashMap<SymbolId, ArcStr>,
  /// Every name that is bound, referenced or handed out in the module.
  used_names: FxHashSet<ArcStr>,
  bound_names: FxHashSet<ArcStr>,
  written: FxHashSet<SymbolId>,
  renames: FxHashMap<SymbolId, ArcStr>,
}

impl SymbolTable {
  pub fn new(scoping: Scoping) -> Self {
    Self {
      scoping,
      names: FxHashMap::default(),
      used_names: MODULE_SCOPE_NAMES.iter().map(|name| ArcStr::from(*name)).collect(),
      bound_names: FxHashSet::default(),
      written: FxHashSet::default(),
      renames: FxHashMap::default(),
    }
  }

  pub fn declare(&mut self, symbol: SymbolId, name: &str) {
    self.names.entry(symbol).or_insert_with(|| ArcStr::from(name));
    if !self.bound_names.contains(name) {
      self.bound_names.insert(ArcStr::from(name));
    }
    self.add_used_name(name);
  }

  pub fn add_free_name(&mut self, name: &str) {
    self.add_used_name(name);
  }

  fn add_used_name(&mut self, name: &str) {
    if !self.used_names.contains(name) {
      self.used_names.insert(ArcStr::from(name));
    }
  }

  pub fn mark_written(&mut self, symbol: SymbolId) {
    self.written.insert(symbol);
  }

  /// `true` if the symbol is ever assigned to after its declaration.
  #[inline]
  pub fn is_written(&self, symbol: SymbolId) -> bool {
    self.written.contains(&symbol)
  }

  /// `true` if any scope of the module declares `name`.
  #[inline]
  pub fn is_bound(&self, name: &str) -> bool {
    self.bound_names.contains(name)
  }

  pub fn symbol_of_reference(&self, ident: &IdentifierReference) -> Option<SymbolId> {
    let reference_id = ident.reference_id.get()?;
    self.scoping.get_reference(reference_id).symbol_id()
  }

  /// The reference resolves to no binding of the module, i.e. it names a factory parameter or
  /// a global. Synthesized references aren't considered free.
  pub fn is_free(&self, ident: &IdentifierReference) -> bool {
    ident
      .reference_id
      .get()
      .is_some_and(|reference_id| self.scoping.get_reference(reference_id).symbol_id().is_none())
  }

  /// `true` if the reference writes to the binding it resolves to.
  pub fn is_write(&self, ident: &IdentifierReference) -> bool {
    ident
      .reference_id
      .get()
      .is_some_and(|reference_id| self.scoping.get_reference(reference_id).is_write())
  }

  #[inline]
  pub fn name_of(&self, symbol: SymbolId) -> Option<&str> {
    self.names.get(&symbol).map(ArcStr::as_str)
  }

  #[inline]
  pub fn renamed(&self, symbol: SymbolId) -> Option<&ArcStr> {
    self.renames.get(&symbol)
  }

  #[inline]
  pub fn has_renames(&self) -> bool {
    !self.renames.is_empty()
  }

  /// Records that `symbol` should be called `name`. Fails closed: nothing is recorded unless
  /// the new name can't collide with anything in the module.
  pub fn try_rename(&mut self, symbol: SymbolId, name: &str) -> Result<(), RenameError> {
    let Some(current) = self.names.get(&symbol) else {
      return Err(RenameError::UnknownSymbol);
    };
    if current.as_str() == name && !self.renames.contains_key(&symbol) {
      return Ok(());
    }
    if let Some(to) = self.renames.get(&symbol) {
      return if to.as_str() == name {
        Ok(())
      } else {
        Err(RenameError::AlreadyRenamed { to: to.clone() })
      };
    }
    if !is_validate_identifier_name(name) {
      return Err(RenameError::InvalidName(name.to_string()));
    }
    if is_reserved_binding_name(name) {
      return Err(RenameError::ReservedName(name.to_string()));
    }
    if self.used_names.contains(name) {
      return Err(RenameError::NameTaken(name.to_string()));
    }

    let name = ArcStr::from(name);
    self.used_names.insert(name.clone());
    self.renames.insert(symbol, name);
    Ok(())
  }

  /// Hands out `hint`, or `hint$1`, `hint$2`, ... if it's taken.
  pub fn create_conflictless_name(&mut self, hint: &str) -> ArcStr {
    let mut candidate = ArcStr::from(hint);
    let mut count = 0u32;
    while self.used_names.contains(candidate.as_str()) {
      count += 1;
      candidate = concat_string!(hint, "$", itoa::Buffer::new().format(count)).into();
    }
    self.used_names.insert(candidate.clone());
    candidate
  }
}

impl Debug for SymbolTable {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("SymbolTable")
      .field("symbols", &self.names.len())
      .field("renames", &self.renames)
      .finish_non_exhaustive()
  }
}

#[cfg(test)]
mod tests {
  use oxc::semantic::SemanticBuilder;
  use unchunk_ecmascript::EcmaCompiler;

  use super::*;

  fn symbol_table(source: &str) -> SymbolTable {
    let ast = EcmaCompiler::parse_factory_body(source).unwrap();
    let scoping = SemanticBuilder::new().build(ast.program()).semantic.into_scoping();
    let mut table = SymbolTable::new(scoping);
    let declared = table
      .scoping
      .symbol_ids()
      .map(|symbol| (symbol, table.scoping.symbol_name(symbol).to_string()))
      .collect::<Vec<_>>();
    for (symbol, name) in declared {
      table.declare(symbol, &name);
    }
    table
  }

  fn symbol(table: &SymbolTable, name: &str) -> SymbolId {
    table.names.iter().find(|(_, n)| n.as_str() == name).map(|(symbol, _)| *symbol).unwrap()
  }

  #[test]
  fn rename_rejects_collisions() {
    let mut table = symbol_table("var a = 1; function f() { var b = a; }");
    table.add_free_name("window");
    let a = symbol(&table, "a");

    assert_eq!(table.try_rename(a, "b"), Err(RenameError::NameTaken("b".to_string())));
    assert_eq!(table.try_rename(a, "window"), Err(RenameError::NameTaken("window".to_string())));
    assert_eq!(table.try_rename(a, "exports"), Err(RenameError::NameTaken("exports".to_string())));
    assert_eq!(table.try_rename(a, "class"), Err(RenameError::ReservedName("class".to_string())));
    assert_eq!(table.try_rename(a, "1x"), Err(RenameError::InvalidName("1x".to_string())));
    assert!(table.renamed(a).is_none());

    assert_eq!(table.try_rename(a, "value"), Ok(()));
    assert_eq!(table.renamed(a).map(ArcStr::as_str), Some("value"));
    let b = symbol(&table, "b");
    assert_eq!(table.try_rename(b, "value"), Err(RenameError::NameTaken("value".to_string())));
    assert!(matches!(table.try_rename(a, "other"), Err(RenameError::AlreadyRenamed { .. })));
  }

  #[test]
  fn conflictless_name_skips_used_names() {
    let mut table = symbol_table("var _default = 1;");
    assert_eq!(table.create_conflictless_name("_default").as_str(), "_default$1");
    assert_eq!(table.create_conflictless_name("_default").as_str(), "_default$2");
    assert_eq!(table.create_conflictless_name("other").as_str(), "other");
  }
}
