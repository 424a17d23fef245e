use arcstr::ArcStr;
use unchunk_common::ModuleKey;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FactoryParam {
  Identifier(ArcStr),
  /// Destructuring or a default value.
  Pattern,
  Rest,
}

/// One entry of the module table, before validation.
#[derive(Debug, Clone)]
pub struct ModuleFactory {
  pub key: ModuleKey,
  pub params: Vec<FactoryParam>,
  /// Source of the factory body: the statements between the braces, or the expression of an
  /// expression-bodied arrow.
  pub body: ArcStr,
}
