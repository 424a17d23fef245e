pub mod module_override;
pub mod normalized_unpack_options;
pub mod output_format;

use crate::{ModuleOverrides, OutputFormat};

#[derive(Default, Debug, Clone)]
pub struct UnpackOptions {
  // --- Output
  pub format: Option<OutputFormat>,
  pub annotate_variables: Option<bool>,

  // --- Overrides
  pub overrides: Option<ModuleOverrides>,
}
