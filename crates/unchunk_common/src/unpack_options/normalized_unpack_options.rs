use crate::{ModuleKey, ModuleOverride, ModuleOverrides, OutputFormat};

#[derive(Debug, Default)]
pub struct NormalizedUnpackOptions {
  // --- Output
  pub format: OutputFormat,
  pub annotate_variables: bool,

  // --- Overrides
  pub overrides: ModuleOverrides,
}

impl NormalizedUnpackOptions {
  #[inline]
  pub fn override_for(&self, key: &ModuleKey) -> Option<&ModuleOverride> {
    self.overrides.get(key)
  }
}
