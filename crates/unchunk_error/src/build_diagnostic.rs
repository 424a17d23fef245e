use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
  /// A table entry, module, export property or rewrite site failed validation and was dropped
  /// or left unmodified.
  Skipped,
  /// A shape that is recognized but has no rewrite yet, e.g. void exports or fusion sub-modules.
  NotImplemented,
  /// Something suspicious that did not change the output, e.g. `module.exports += x`.
  Warning,
}

impl Display for DiagnosticKind {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Skipped => write!(f, "skipped"),
      Self::NotImplemented => write!(f, "not implemented"),
      Self::Warning => write!(f, "warning"),
    }
  }
}

/// A non-fatal problem found while unpacking one chunk. Diagnostics never cross a module
/// boundary as errors, they are collected and handed back with the output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildDiagnostic {
  pub kind: DiagnosticKind,
  /// Raw key of the module the diagnostic belongs to, `None` for table-level problems.
  pub module: Option<String>,
  pub message: String,
}

impl BuildDiagnostic {
  pub fn skipped(module: Option<&str>, message: impl Into<String>) -> Self {
    Self::new(DiagnosticKind::Skipped, module, message)
  }

  pub fn not_implemented(module: Option<&str>, message: impl Into<String>) -> Self {
    Self::new(DiagnosticKind::NotImplemented, module, message)
  }

  pub fn warning(module: Option<&str>, message: impl Into<String>) -> Self {
    Self::new(DiagnosticKind::Warning, module, message)
  }

  fn new(kind: DiagnosticKind, module: Option<&str>, message: impl Into<String>) -> Self {
    Self { kind, module: module.map(ToString::to_string), message: message.into() }
  }

  #[inline]
  pub fn is_not_implemented(&self) -> bool {
    matches!(self.kind, DiagnosticKind::NotImplemented)
  }
}

impl Display for BuildDiagnostic {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match &self.module {
      Some(module) => write!(f, "[{}] module {module:?}: {}", self.kind, self.message),
      None => write!(f, "[{}] {}", self.kind, self.message),
    }
  }
}

#[test]
fn test_display_build_diagnostic() {
  let diagnostic = BuildDiagnostic::not_implemented(Some("12"), "void export `foo`");
  assert_eq!(diagnostic.to_string(), "[not implemented] module \"12\": void export `foo`");
  assert!(diagnostic.is_not_implemented());

  let diagnostic = BuildDiagnostic::skipped(None, "computed key");
  assert_eq!(diagnostic.to_string(), "[skipped] computed key");
}
