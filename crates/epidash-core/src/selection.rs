//! Region selections and the configuration they are resolved against.

use serde::{Deserialize, Serialize};

/// What the user asked to look at.
///
/// A closed set: every consumer must handle all three scopes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "scope", rename_all = "snake_case")]
pub enum Scope {
  /// The configured country as a whole.
  Country,
  /// A district of the configured parent region. `None` or a blank name means
  /// no district has been chosen yet.
  SubRegion { name: Option<String> },
  /// Any region of the world dataset, used as the comparison side.
  Comparison { name: String },
}

impl Scope {
  pub fn sub_region(name: impl Into<String>) -> Self {
    Self::SubRegion { name: Some(name.into()) }
  }

  pub fn comparison(name: impl Into<String>) -> Self {
    Self::Comparison { name: name.into() }
  }
}

/// The fixed points of the region hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegionConfig {
  /// Country looked up in the world dataset for [`Scope::Country`].
  pub country:       String,
  /// Province whose districts make up the district dataset.
  pub parent_region: String,
}

impl Default for RegionConfig {
  fn default() -> Self {
    Self {
      country:       "Indonesia".to_string(),
      parent_region: "Bali".to_string(),
    }
  }
}

/// Upper-case the first letter of every whitespace-separated word and
/// lower-case the rest.
pub fn title_case(name: &str) -> String {
  name
    .split_whitespace()
    .map(|word| {
      let mut chars = word.chars();
      match chars.next() {
        Some(first) => {
          first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
        }
        None => String::new(),
      }
    })
    .collect::<Vec<String>>()
    .join(" ")
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn title_case_words() {
    assert_eq!(title_case("denpasar"), "Denpasar");
    assert_eq!(title_case("  KARANG   asem "), "Karang Asem");
    assert_eq!(title_case(""), "");
  }

  #[test]
  fn scope_serde_shape() {
    let scope: Scope =
      serde_json::from_str(r#"{"scope":"sub_region","name":"Badung"}"#).unwrap();
    assert_eq!(scope, Scope::sub_region("Badung"));

    let scope: Scope = serde_json::from_str(r#"{"scope":"country"}"#).unwrap();
    assert_eq!(scope, Scope::Country);

    assert!(serde_json::from_str::<Scope>(r#"{"scope":"planet"}"#).is_err());
  }

  #[test]
  fn region_config_fills_defaults() {
    let cfg: RegionConfig =
      serde_json::from_str(r#"{"parent_region":"Jawa Timur"}"#).unwrap();
    assert_eq!(cfg.country, "Indonesia");
    assert_eq!(cfg.parent_region, "Jawa Timur");
  }
}
