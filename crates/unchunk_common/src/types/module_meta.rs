bitflags::bitflags! {
  /// Classification written by the scan stage and read by the rewrite stage.
  #[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
  pub struct ModuleMeta: u8 {
    /// More than one `module.exports = ...`, or one that assigns an object literal.
    const IS_COMMONJS = 1;
    /// At least one `module.exports = ...`.
    const HAS_DEFAULT_EXPORT = 1 << 1;
  }
}

impl ModuleMeta {
  #[inline]
  pub fn is_commonjs(self) -> bool {
    self.contains(Self::IS_COMMONJS)
  }

  #[inline]
  pub fn has_default_export(self) -> bool {
    self.contains(Self::HAS_DEFAULT_EXPORT)
  }
}
