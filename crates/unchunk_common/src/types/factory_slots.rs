use std::fmt::Display;

use arcstr::ArcStr;

/// Parameter names of the module factories of one chunk.
///
/// Minifiers name the factory parameters once per chunk, so every factory is expected to
/// agree on them:
/// - slot 0 is the module object, `e.exports = ...`
/// - slot 1 is the exports object, `n.d(t, {...})`
/// - slot 2 is the internal require function, `n(123)`
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FactorySlots {
  names: [Option<ArcStr>; 3],
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotError {
  TooManyParams(usize),
  Mismatch { slot: usize, expected: ArcStr, found: String },
}

impl Display for SlotError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::TooManyParams(count) => write!(f, "factory takes {count} parameters, expected <= 3"),
      Self::Mismatch { slot, expected, found } => {
        write!(f, "parameter {slot} is named `{found}`, other factories use `{expected}`")
      }
    }
  }
}

impl FactorySlots {
  pub const MODULE: usize = 0;
  pub const EXPORTS: usize = 1;
  pub const REQUIRE: usize = 2;

  #[inline]
  pub fn module(&self) -> Option<&str> {
    self.get(Self::MODULE)
  }

  #[inline]
  pub fn exports(&self) -> Option<&str> {
    self.get(Self::EXPORTS)
  }

  #[inline]
  pub fn require(&self) -> Option<&str> {
    self.get(Self::REQUIRE)
  }

  pub fn get(&self, slot: usize) -> Option<&str> {
    self.names.get(slot).and_then(|name| name.as_deref())
  }

  /// Checks `params` against the recorded names and fills the empty slots with them.
  ///
  /// Nothing is recorded unless every parameter agrees.
  pub fn unify(&mut self, params: &[&str]) -> Result<(), SlotError> {
    if params.len() > self.names.len() {
      return Err(SlotError::TooManyParams(params.len()));
    }
    for (slot, param) in params.iter().enumerate() {
      if let Some(expected) = &self.names[slot] {
        if expected.as_str() != *param {
          return Err(SlotError::Mismatch {
            slot,
            expected: expected.clone(),
            found: (*param).to_string(),
          });
        }
      }
    }
    for (slot, param) in params.iter().enumerate() {
      self.names[slot].get_or_insert_with(|| ArcStr::from(*param));
    }
    Ok(())
  }

  /// The slots a factory with `arity` parameters really binds. Past its arity, a slot name is
  /// just a global to that factory.
  pub fn for_arity(&self, arity: usize) -> Self {
    let mut names = self.names.clone();
    names.iter_mut().skip(arity).for_each(|name| *name = None);
    Self { names }
  }
}

#[test]
fn test_unify_fills_empty_slots() {
  let mut slots = FactorySlots::default();
  assert!(slots.unify(&["e"]).is_ok());
  assert!(slots.unify(&["e", "t", "n"]).is_ok());
  assert_eq!(slots.module(), Some("e"));
  assert_eq!(slots.exports(), Some("t"));
  assert_eq!(slots.require(), Some("n"));
}

#[test]
fn test_unify_mismatch_leaves_slots_untouched() {
  let mut slots = FactorySlots::default();
  slots.unify(&["e", "t"]).unwrap();
  let err = slots.unify(&["e", "r", "n"]).unwrap_err();
  assert_eq!(err, SlotError::Mismatch { slot: 1, expected: "t".into(), found: "r".into() });
  assert_eq!(slots.require(), None);
  assert!(matches!(slots.unify(&["a", "b", "c", "d"]), Err(SlotError::TooManyParams(4))));
}

#[test]
fn test_for_arity() {
  let mut slots = FactorySlots::default();
  slots.unify(&["e", "t", "n"]).unwrap();
  let slots = slots.for_arity(1);
  assert_eq!(slots.module(), Some("e"));
  assert_eq!(slots.exports(), None);
}
