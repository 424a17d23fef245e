use unchunk_common::{NormalizedUnpackOptions, UnpackOptions};

pub fn normalize_options(raw_options: UnpackOptions) -> NormalizedUnpackOptions {
  NormalizedUnpackOptions {
    format: raw_options.format.unwrap_or_default(),
    annotate_variables: raw_options.annotate_variables.unwrap_or(false),
    overrides: raw_options.overrides.unwrap_or_default(),
  }
}
