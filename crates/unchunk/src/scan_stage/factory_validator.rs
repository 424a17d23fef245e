use oxc::semantic::Scoping;
use unchunk_common::{FactorySlots, ModuleKey, SlotError};
use unchunk_ecmascript::EcmaAst;
use unchunk_error::BuildDiagnostic;

use crate::{
  types::module_factory::{FactoryParam, ModuleFactory},
  utils::parse_to_ecma_ast::parse_to_ecma_ast,
};

pub struct ValidatedFactory {
  pub key: ModuleKey,
  /// Chunk slots restricted to the parameters the factory declares.
  pub slots: FactorySlots,
  pub ast: EcmaAst,
  pub scoping: Scoping,
}

/// Validates the factories of one chunk in table order. The first factory that declares a
/// parameter position names that slot for the whole chunk.
#[derive(Debug, Default)]
pub struct FactoryValidator {
  slots: FactorySlots,
}

impl FactoryValidator {
  #[inline]
  pub fn slots(&self) -> &FactorySlots {
    &self.slots
  }

  pub fn validate(&mut self, factory: ModuleFactory) -> Result<ValidatedFactory, BuildDiagnostic> {
    let ModuleFactory { key, params, body } = factory;
    let skipped = |message: String| BuildDiagnostic::skipped(Some(key.as_str()), message);

    if params.len() > 3 {
      return Err(skipped(SlotError::TooManyParams(params.len()).to_string()));
    }
    let names = params
      .iter()
      .enumerate()
      .map(|(idx, param)| match param {
        FactoryParam::Identifier(name) => Ok(name.as_str()),
        FactoryParam::Pattern => Err(skipped(format!("parameter {idx} is not a plain identifier"))),
        FactoryParam::Rest => Err(skipped(format!("parameter {idx} is a rest parameter"))),
      })
      .collect::<Result<Vec<_>, _>>()?;

    // parse before unifying, a broken body must not name any slot
    let (ast, scoping) = parse_to_ecma_ast(body)
      .map_err(|errors| skipped(format!("factory body failed to parse: {}", errors.join())))?;
    self.slots.unify(&names).map_err(|err| skipped(err.to_string()))?;

    let slots = self.slots.for_arity(names.len());
    Ok(ValidatedFactory { key, slots, ast, scoping })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn factory(key: &str, params: &[&str], body: &str) -> ModuleFactory {
    ModuleFactory {
      key: key.into(),
      params: params.iter().map(|name| FactoryParam::Identifier((*name).into())).collect(),
      body: body.into(),
    }
  }

  #[test]
  fn mismatch_rejects_only_that_module() {
    let mut validator = FactoryValidator::default();
    assert!(validator.validate(factory("1", &["e", "t"], "t.a = 1;")).is_ok());

    let err = validator.validate(factory("2", &["e", "r", "n"], "")).err().unwrap();
    assert_eq!(err.module.as_deref(), Some("2"));
    assert_eq!(validator.slots().exports(), Some("t"));
    assert_eq!(validator.slots().require(), None);

    let validated = validator.validate(factory("3", &["e", "t", "n"], "n(1);")).ok().unwrap();
    assert_eq!(validated.slots.require(), Some("n"));
    let validated = validator.validate(factory("4", &["e"], "")).ok().unwrap();
    assert_eq!(validated.slots.exports(), None);
  }

  #[test]
  fn broken_factories_name_no_slots() {
    let mut validator = FactoryValidator::default();
    assert!(validator.validate(factory("1", &["a", "b"], "var = ;")).is_err());
    assert!(validator.validate(factory("2", &["a", "b", "c", "d"], "")).is_err());

    let mut pattern = factory("3", &["a"], "");
    pattern.params.push(FactoryParam::Pattern);
    assert!(validator.validate(pattern).is_err());

    assert_eq!(validator.slots(), &FactorySlots::default());
  }
}
