use std::fmt::Display;

use arcstr::ArcStr;
use serde::Serialize;

/// One local binding of a rewritten module, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VariableAnnotation {
  pub ordinal: u32,
  pub name: ArcStr,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub renamed_to: Option<ArcStr>,
}

impl Display for VariableAnnotation {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match &self.renamed_to {
      Some(renamed) => write!(f, "#{} {} -> {renamed}", self.ordinal, self.name),
      None => write!(f, "#{} {}", self.ordinal, self.name),
    }
  }
}

#[test]
fn test_display_variable_annotation() {
  let annotation = VariableAnnotation { ordinal: 3, name: "e".into(), renamed_to: None };
  assert_eq!(annotation.to_string(), "#3 e");
  let annotation =
    VariableAnnotation { ordinal: 0, name: "t".into(), renamed_to: Some("useState".into()) };
  assert_eq!(annotation.to_string(), "#0 t -> useState");
}
